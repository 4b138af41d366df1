use std::time::Duration;

use crate::dom::{NavLink, TocDom};
use crate::headings::{DEFAULT_LOOKAHEAD_PX, compute_active_fragment};
use crate::matching::match_link_for_id;
use crate::throttle::{DEFAULT_THROTTLE_INTERVAL, Throttle, ThrottleStep, TimerCommand, TimerHost};

/// Tunables for [`TocSync`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncSettings {
    pub lookahead_px: f64,
    pub throttle_interval: Duration,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            lookahead_px: DEFAULT_LOOKAHEAD_PX,
            throttle_interval: DEFAULT_THROTTLE_INTERVAL,
        }
    }
}

/// Keeps the TOC link for the section being read marked active.
///
/// Owns the links discovered at attach time, the scroll throttle and the host
/// handles. The host forwards its events to [`click`](Self::click),
/// [`scroll`](Self::scroll), [`hash_changed`](Self::hash_changed) and
/// [`timer_fired`](Self::timer_fired). After [`shutdown`](Self::shutdown) every
/// entry point is a no-op.
pub struct TocSync<D: TocDom, T: TimerHost> {
    dom: D,
    timer: T,
    links: Vec<NavLink<D::Element>>,
    throttle: Throttle,
    lookahead_px: f64,
    attached: bool,
}

impl<D: TocDom, T: TimerHost> TocSync<D, T> {
    /// Discover the TOC and apply the fragment the page was opened with.
    ///
    /// Returns `None` when the page has no TOC links; there is nothing to keep
    /// in sync then.
    pub fn attach(dom: D, timer: T, settings: SyncSettings) -> Option<Self> {
        let links = dom.query_links();
        if links.is_empty() {
            log::debug!("no TOC links found, staying detached");
            return None;
        }
        log::debug!("attached to {} TOC links", links.len());

        let mut sync = Self {
            dom,
            timer,
            links,
            throttle: Throttle::new(settings.throttle_interval),
            lookahead_px: settings.lookahead_px,
            attached: true,
        };

        let hash = sync.dom.location_hash();
        if !hash.is_empty() {
            sync.activate_fragment(&hash);
        }
        Some(sync)
    }

    pub fn links(&self) -> &[NavLink<D::Element>] {
        &self.links
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn throttle(&self) -> &Throttle {
        &self.throttle
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    /// A TOC link was clicked: it becomes active straight away.
    pub fn click(&mut self, index: usize) {
        if !self.attached {
            return;
        }
        let Some(link) = self.links.get(index) else {
            log::warn!("click on unknown TOC link {index}");
            return;
        };
        self.dom.clear_active(&self.links);
        self.dom.set_active(link);
    }

    pub fn scroll(&mut self) {
        if !self.attached {
            return;
        }
        let step = self.throttle.event(self.timer.now());
        self.apply(step);
    }

    pub fn timer_fired(&mut self) {
        if !self.attached {
            return;
        }
        let step = self.throttle.timer_fired(self.timer.now());
        self.apply(step);
    }

    /// The location fragment changed. An unknown fragment leaves the current
    /// link as it is.
    pub fn hash_changed(&mut self) {
        if !self.attached {
            return;
        }
        let hash = self.dom.location_hash();
        if !self.activate_fragment(&hash) {
            log::debug!("hash {hash:?} matches no TOC link");
        }
    }

    /// Recompute the section under the viewport and mark its link, bypassing
    /// the throttle. Returns whether a link was marked.
    pub fn refresh_from_scroll(&mut self) -> bool {
        if !self.attached {
            return false;
        }
        let headings = self.dom.query_headings();
        let offset = self.dom.scroll_offset();
        match compute_active_fragment(&headings, offset, self.lookahead_px) {
            Some(fragment) => {
                log::trace!("scroll offset {offset} is inside {fragment}");
                self.activate_fragment(fragment)
            }
            None => false,
        }
    }

    /// Mark the link resolving `fragment`, if any. Returns whether one matched.
    pub fn activate_fragment(&mut self, fragment: &str) -> bool {
        if !self.attached {
            return false;
        }
        let Some(link) = match_link_for_id(&self.links, fragment) else {
            return false;
        };
        self.dom.clear_active(&self.links);
        self.dom.set_active(link);
        true
    }

    /// Stop reacting to events and cancel any trailing update.
    pub fn shutdown(&mut self) {
        if !self.attached {
            return;
        }
        self.attached = false;
        let command = self.throttle.reset();
        self.apply_timer(command);
        log::debug!("detached from TOC");
    }

    fn apply(&mut self, step: ThrottleStep) {
        if step.run {
            self.refresh_from_scroll();
        }
        self.apply_timer(step.timer);
    }

    fn apply_timer(&mut self, command: TimerCommand) {
        match command {
            TimerCommand::Leave => {}
            TimerCommand::Arm(delay) => self.timer.arm(delay),
            TimerCommand::Cancel => self.timer.cancel(),
        }
    }
}
