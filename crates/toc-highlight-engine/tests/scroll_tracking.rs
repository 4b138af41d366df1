//! Drives `TocSync` through its public API the way a host binding does.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use toc_highlight_engine::{
    HeadingMark, NavLink, SyncSettings, TimerHost, TocDom, TocSync, compute_active_fragment,
    match_link_for_id,
};

/// A documentation page in the mdBook layout: the sidebar links to sections of
/// the current chapter through page-relative hrefs.
struct ChapterPage {
    hrefs: Vec<&'static str>,
    headings: Vec<HeadingMark>,
    scroll: f64,
    hash: String,
    active: Vec<bool>,
}

impl ChapterPage {
    fn new() -> Self {
        let hrefs = vec![
            "index.html",
            "guide.html#intro",
            "guide.html#install",
            "guide.html#usage",
            "guide.html#faq",
        ];
        Self {
            active: vec![false; hrefs.len()],
            hrefs,
            headings: vec![
                HeadingMark::new("intro", 150.0),
                HeadingMark::new("install", 420.0),
                HeadingMark::new("usage", 1310.0),
                HeadingMark::new("faq", 2200.0),
            ],
            scroll: 0.0,
            hash: String::new(),
        }
    }

    fn active_hrefs(&self) -> Vec<&'static str> {
        self.hrefs
            .iter()
            .zip(&self.active)
            .filter(|(_, active)| **active)
            .map(|(href, _)| *href)
            .collect()
    }
}

impl TocDom for ChapterPage {
    type Element = usize;

    fn query_links(&self) -> Vec<NavLink<usize>> {
        self.hrefs
            .iter()
            .enumerate()
            .map(|(idx, href)| NavLink::new(idx, *href))
            .collect()
    }

    fn query_headings(&self) -> Vec<HeadingMark> {
        self.headings.clone()
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll
    }

    fn location_hash(&self) -> String {
        self.hash.clone()
    }

    fn set_active(&mut self, link: &NavLink<usize>) {
        self.active[link.element] = true;
    }

    fn clear_active(&mut self, links: &[NavLink<usize>]) {
        for link in links {
            self.active[link.element] = false;
        }
    }
}

#[derive(Clone, Default)]
struct SteppedClock {
    now: Rc<Cell<Duration>>,
    armed: Rc<Cell<Option<Duration>>>,
}

impl TimerHost for SteppedClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn arm(&mut self, delay: Duration) {
        self.armed.set(Some(delay));
    }

    fn cancel(&mut self) {
        self.armed.set(None);
    }
}

#[test]
fn sidebar_follows_a_reader_through_the_chapter() {
    let page = ChapterPage::new();
    let sweep = [0.0, 130.0, 400.0, 1000.0, 1290.0, 2180.0, 5000.0]
        .iter()
        .map(|offset| {
            let links = page.query_links();
            let target = compute_active_fragment(&page.headings, *offset, 20.0)
                .and_then(|fragment| match_link_for_id(&links, fragment))
                .map(|link| link.href.clone())
                .unwrap_or_else(|| "(none)".to_string());
            format!("{offset}px -> {target}")
        })
        .collect::<Vec<_>>()
        .join("\n");

    insta::assert_snapshot!(sweep, @r"
    0px -> (none)
    130px -> guide.html#intro
    400px -> guide.html#install
    1000px -> guide.html#install
    1290px -> guide.html#usage
    2180px -> guide.html#faq
    5000px -> guide.html#faq
    ");
}

#[test]
fn opening_a_deep_link_marks_its_entry() {
    let mut page = ChapterPage::new();
    page.hash = "#usage".to_string();

    let sync = TocSync::attach(page, SteppedClock::default(), SyncSettings::default())
        .expect("chapter has a sidebar");

    assert_eq!(sync.dom().active_hrefs(), vec!["guide.html#usage"]);
}

#[test]
fn trailing_update_lands_on_final_position() {
    let clock = SteppedClock::default();
    let mut sync = TocSync::attach(ChapterPage::new(), clock.clone(), SyncSettings::default())
        .expect("chapter has a sidebar");

    sync.scroll();
    assert_eq!(sync.dom().active_hrefs(), Vec::<&str>::new());
    assert_eq!(clock.armed.get(), Some(Duration::from_millis(120)));

    clock.now.set(Duration::from_millis(30));
    sync.scroll();
    assert!(sync.throttle().is_pending());

    clock.now.set(Duration::from_millis(150));
    clock.armed.set(None);
    sync.timer_fired();
    assert!(!sync.throttle().is_pending());
    assert_eq!(clock.armed.get(), Some(Duration::from_millis(120)));

    clock.now.set(Duration::from_millis(270));
    clock.armed.set(None);
    sync.timer_fired();
    assert_eq!(clock.armed.get(), None);
}

#[test]
fn shutdown_disarms_pending_timer() {
    let clock = SteppedClock::default();
    let mut sync = TocSync::attach(ChapterPage::new(), clock.clone(), SyncSettings::default())
        .expect("chapter has a sidebar");

    sync.scroll();
    clock.now.set(Duration::from_millis(10));
    sync.scroll();
    assert!(clock.armed.get().is_some());

    sync.shutdown();
    assert_eq!(clock.armed.get(), None);
    assert!(!sync.is_attached());
}

#[test]
fn custom_settings_change_lookahead_and_interval() {
    let clock = SteppedClock::default();
    let settings = SyncSettings {
        lookahead_px: 200.0,
        throttle_interval: Duration::from_millis(40),
    };
    let mut sync =
        TocSync::attach(ChapterPage::new(), clock.clone(), settings).expect("chapter has a sidebar");

    // 0 + 200 reaches `#intro` at 150.
    sync.scroll();
    assert_eq!(sync.dom().active_hrefs(), vec!["guide.html#intro"]);
    assert_eq!(clock.armed.get(), Some(Duration::from_millis(40)));
}
