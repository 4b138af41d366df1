use std::cell::{Cell, OnceCell};
use std::rc::Rc;
use std::time::Duration;

use js_sys::Function;
use toc_highlight_engine::TimerHost;
use web_sys::{Performance, Window};

use crate::error::describe;

/// [`TimerHost`] backed by `setTimeout` and `performance.now()`.
///
/// The callback is installed after construction through [`Self::callback_slot`]
/// because it has to point back at the controller that owns this timer.
pub struct WebTimer {
    window: Window,
    performance: Option<Performance>,
    callback: Rc<OnceCell<Function>>,
    pending: TimerHandle,
}

impl WebTimer {
    pub fn new(window: Window) -> Self {
        let performance = window.performance();
        Self {
            pending: TimerHandle {
                window: window.clone(),
                id: Rc::new(Cell::new(None)),
            },
            window,
            performance,
            callback: Rc::new(OnceCell::new()),
        }
    }

    pub fn callback_slot(&self) -> Rc<OnceCell<Function>> {
        self.callback.clone()
    }

    /// Shared view of the pending timeout, usable while the timer itself is
    /// borrowed by the controller.
    pub fn handle(&self) -> TimerHandle {
        self.pending.clone()
    }
}

impl TimerHost for WebTimer {
    fn now(&self) -> Duration {
        let millis = self
            .performance
            .as_ref()
            .map_or_else(js_sys::Date::now, Performance::now);
        Duration::from_secs_f64(millis.max(0.0) / 1000.0)
    }

    fn arm(&mut self, delay: Duration) {
        self.pending.cancel();
        let Some(callback) = self.callback.get() else {
            log::warn!("timer armed before its callback was installed");
            return;
        };
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback, millis)
        {
            Ok(id) => self.pending.id.set(Some(id)),
            Err(err) => log::warn!("setTimeout failed: {}", describe(&err)),
        }
    }

    fn cancel(&mut self) {
        self.pending.cancel();
    }
}

/// The id of the timeout a [`WebTimer`] has outstanding, if any.
#[derive(Clone)]
pub struct TimerHandle {
    window: Window,
    id: Rc<Cell<Option<i32>>>,
}

impl TimerHandle {
    pub fn is_armed(&self) -> bool {
        self.id.get().is_some()
    }

    pub fn cancel(&self) {
        if let Some(id) = self.id.take() {
            self.window.clear_timeout_with_handle(id);
        }
    }

    /// Forget the id once the timeout has run; it can no longer be cleared.
    pub(crate) fn fired(&self) {
        self.id.set(None);
    }
}
