use std::cell::RefCell;
use std::rc::{Rc, Weak};

use toc_highlight_config::TocConfig;
use toc_highlight_engine::{SyncSettings, TocSync};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, Event};

use crate::dom::WebDom;
use crate::error::WebError;
use crate::listeners::Listeners;
use crate::timer::{TimerHandle, WebTimer};

type Controller = TocSync<WebDom, WebTimer>;

/// A controller attached to the live page together with the listeners and
/// timer callback that feed it.
///
/// Callbacks hold only a weak reference to the controller, so dropping the
/// session tears everything down.
pub struct Session {
    controller: Rc<RefCell<Controller>>,
    listeners: Listeners,
    timer: TimerHandle,
    _on_timer: Closure<dyn FnMut()>,
}

impl Session {
    /// Attach to the current document. `Ok(None)` means the page has no TOC.
    pub fn attach(config: &TocConfig) -> Result<Option<Self>, WebError> {
        let window = web_sys::window().ok_or(WebError::NoWindow)?;
        let dom = WebDom::new(window.clone(), config)?;
        let timer = WebTimer::new(window.clone());
        let timer_slot = timer.callback_slot();
        let timer_handle = timer.handle();

        let Some(sync) = TocSync::attach(dom, timer, settings_from(config)) else {
            return Ok(None);
        };
        let controller = Rc::new(RefCell::new(sync));

        let weak = Rc::downgrade(&controller);
        let fired = timer_handle.clone();
        let on_timer = Closure::<dyn FnMut()>::new(move || {
            fired.fired();
            with_controller(&weak, |sync| sync.timer_fired());
        });
        let _ = timer_slot.set(on_timer.as_ref().unchecked_ref::<js_sys::Function>().clone());

        let elements: Vec<Element> = controller
            .borrow()
            .links()
            .iter()
            .map(|link| link.element.clone())
            .collect();

        let mut listeners = Listeners::default();
        for (index, element) in elements.iter().enumerate() {
            listeners.listen(
                element,
                "click",
                true,
                on_event(&controller, move |sync| sync.click(index)),
            )?;
        }
        listeners.listen(&window, "scroll", true, on_event(&controller, Controller::scroll))?;
        listeners.listen(
            &window,
            "hashchange",
            false,
            on_event(&controller, Controller::hash_changed),
        )?;

        log::debug!(
            "attached to {} TOC links with {} listeners",
            elements.len(),
            listeners.len()
        );

        Ok(Some(Self {
            controller,
            listeners,
            timer: timer_handle,
            _on_timer: on_timer,
        }))
    }

    pub fn is_attached(&self) -> bool {
        self.controller
            .try_borrow()
            .is_ok_and(|sync| sync.is_attached())
    }

    pub fn link_count(&self) -> usize {
        self.controller
            .try_borrow()
            .map_or(0, |sync| sync.links().len())
    }

    /// Re-run the scroll computation immediately, bypassing the throttle.
    pub fn refresh(&self) -> bool {
        self.controller
            .try_borrow_mut()
            .is_ok_and(|mut sync| sync.refresh_from_scroll())
    }

    /// Whether a trailing scroll update is scheduled.
    pub fn timer_armed(&self) -> bool {
        self.timer.is_armed()
    }

    /// Detach every listener and clear the pending timeout, so nothing calls
    /// back into the session once it is dropped.
    pub fn teardown(&mut self) {
        self.listeners.remove_all();
        match self.controller.try_borrow_mut() {
            Ok(mut sync) => sync.shutdown(),
            Err(_) => log::warn!("teardown while an event was being handled"),
        }
        self.timer.cancel();
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.teardown();
    }
}

pub(crate) fn settings_from(config: &TocConfig) -> SyncSettings {
    SyncSettings {
        lookahead_px: config.lookahead_px,
        throttle_interval: config.throttle_interval(),
    }
}

fn on_event<F>(controller: &Rc<RefCell<Controller>>, mut action: F) -> impl FnMut(Event) + 'static
where
    F: FnMut(&mut Controller) + 'static,
{
    let weak = Rc::downgrade(controller);
    move |_event: Event| with_controller(&weak, &mut action)
}

fn with_controller(weak: &Weak<RefCell<Controller>>, action: impl FnOnce(&mut Controller)) {
    let Some(controller) = weak.upgrade() else {
        return;
    };
    match controller.try_borrow_mut() {
        Ok(mut sync) => action(&mut sync),
        Err(_) => log::warn!("dropped re-entrant TOC event"),
    }
}
