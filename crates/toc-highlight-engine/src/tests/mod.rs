//! Scenario tests for [`TocSync`](crate::TocSync) against an in-memory page.
//!
//! `FakeDom` and `ManualTimer` share their state with the test through
//! `Rc<RefCell<..>>`, so a test can move the scroll position, change the hash,
//! advance the clock and then inspect which link carries the active class.


use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;
use std::time::Duration;

use crate::{HeadingMark, NavLink, SyncSettings, TimerHost, TocDom, TocSync};

pub const ACTIVE: &str = "active";

#[derive(Debug, Default)]
pub struct FakeLink {
    pub href: Option<String>,
    pub classes: BTreeSet<String>,
}

#[derive(Debug, Default)]
pub struct FakePage {
    pub links: Vec<FakeLink>,
    pub headings: Vec<(String, f64)>,
    pub scroll: f64,
    pub hash: String,
    /// Times the headings were collected, i.e. scroll updates executed.
    pub heading_queries: usize,
}

impl FakePage {
    pub fn with_links(hrefs: &[&str]) -> Self {
        Self {
            links: hrefs
                .iter()
                .map(|href| FakeLink {
                    href: Some(href.to_string()),
                    classes: BTreeSet::new(),
                })
                .collect(),
            ..Self::default()
        }
    }

    pub fn heading(mut self, id: &str, top: f64) -> Self {
        self.headings.push((id.to_string(), top));
        self
    }

    pub fn active_links(&self) -> Vec<usize> {
        self.links
            .iter()
            .enumerate()
            .filter(|(_, link)| link.classes.contains(ACTIVE))
            .map(|(idx, _)| idx)
            .collect()
    }
}

#[derive(Clone)]
pub struct FakeDom(pub Rc<RefCell<FakePage>>);

impl TocDom for FakeDom {
    type Element = usize;

    fn query_links(&self) -> Vec<NavLink<usize>> {
        self.0
            .borrow()
            .links
            .iter()
            .enumerate()
            .map(|(idx, link)| NavLink::new(idx, link.href.clone().unwrap_or_default()))
            .collect()
    }

    fn query_headings(&self) -> Vec<HeadingMark> {
        let mut page = self.0.borrow_mut();
        page.heading_queries += 1;
        page.headings
            .iter()
            .map(|(id, top)| HeadingMark::new(id, *top))
            .collect()
    }

    fn scroll_offset(&self) -> f64 {
        self.0.borrow().scroll
    }

    fn location_hash(&self) -> String {
        self.0.borrow().hash.clone()
    }

    fn set_active(&mut self, link: &NavLink<usize>) {
        if let Some(fake) = self.0.borrow_mut().links.get_mut(link.element) {
            fake.classes.insert(ACTIVE.to_string());
        }
    }

    fn clear_active(&mut self, links: &[NavLink<usize>]) {
        let mut page = self.0.borrow_mut();
        for link in links {
            if let Some(fake) = page.links.get_mut(link.element) {
                fake.classes.remove(ACTIVE);
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct Clock {
    pub now: Duration,
    /// When the armed timer is due, if one is armed.
    pub deadline: Option<Duration>,
}

#[derive(Clone)]
pub struct ManualTimer(pub Rc<RefCell<Clock>>);

impl TimerHost for ManualTimer {
    fn now(&self) -> Duration {
        self.0.borrow().now
    }

    fn arm(&mut self, delay: Duration) {
        let mut clock = self.0.borrow_mut();
        clock.deadline = Some(clock.now + delay);
    }

    fn cancel(&mut self) {
        self.0.borrow_mut().deadline = None;
    }
}

pub struct Harness {
    pub page: Rc<RefCell<FakePage>>,
    pub clock: Rc<RefCell<Clock>>,
    pub sync: TocSync<FakeDom, ManualTimer>,
}

impl Harness {
    pub fn attach(page: FakePage) -> Option<Self> {
        let page = Rc::new(RefCell::new(page));
        let clock = Rc::new(RefCell::new(Clock::default()));
        let sync = TocSync::attach(
            FakeDom(page.clone()),
            ManualTimer(clock.clone()),
            SyncSettings::default(),
        )?;
        Some(Self { page, clock, sync })
    }

    pub fn new(page: FakePage) -> Self {
        Self::attach(page).expect("page has TOC links")
    }

    /// Fire every timer due up to `ms`, then set the clock to `ms`.
    pub fn advance_to(&mut self, ms: u64) {
        let target = Duration::from_millis(ms);
        loop {
            let due = {
                let mut clock = self.clock.borrow_mut();
                match clock.deadline {
                    Some(deadline) if deadline <= target => {
                        clock.now = deadline;
                        clock.deadline = None;
                        true
                    }
                    _ => false,
                }
            };
            if !due {
                break;
            }
            self.sync.timer_fired();
        }
        self.clock.borrow_mut().now = target;
    }

    pub fn scroll_at(&mut self, ms: u64, offset: f64) {
        self.advance_to(ms);
        self.page.borrow_mut().scroll = offset;
        self.sync.scroll();
    }

    pub fn navigate(&mut self, hash: &str) {
        self.page.borrow_mut().hash = hash.to_string();
        self.sync.hash_changed();
    }

    pub fn active(&self) -> Vec<usize> {
        self.page.borrow().active_links()
    }

    pub fn updates(&self) -> usize {
        self.page.borrow().heading_queries
    }

    pub fn timer_armed(&self) -> bool {
        self.clock.borrow().deadline.is_some()
    }
}
