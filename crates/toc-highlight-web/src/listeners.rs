use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Event, EventTarget};

use crate::error::{WebError, describe};

struct Registration {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// Owns every event listener a session installs so they can be removed
/// together. Dropping the registry removes whatever is still attached.
#[derive(Default)]
pub struct Listeners {
    registered: Vec<Registration>,
}

impl Listeners {
    pub fn listen(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        passive: bool,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<(), WebError> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);

        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event,
                callback.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|err| WebError::Listener {
                event,
                message: describe(&err),
            })?;

        self.registered.push(Registration {
            target: target.clone(),
            event,
            callback,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.registered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }

    pub fn remove_all(&mut self) {
        for registration in self.registered.drain(..) {
            if let Err(err) = registration.target.remove_event_listener_with_callback(
                registration.event,
                registration.callback.as_ref().unchecked_ref(),
            ) {
                log::warn!(
                    "could not remove `{}` listener: {}",
                    registration.event,
                    describe(&err)
                );
            }
        }
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        self.remove_all();
    }
}
