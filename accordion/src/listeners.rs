use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Owned table of registered event listeners.
///
/// Every `(target, event, closure)` triple added here is removed again
/// when the registry drops, so a detached widget leaves no callbacks
/// behind.
#[derive(Default)]
pub struct ListenerRegistry {
    entries: Vec<(
        web_sys::EventTarget,
        &'static str,
        Closure<dyn FnMut(web_sys::Event)>,
    )>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        target: &web_sys::EventTarget,
        event: &'static str,
        closure: Closure<dyn FnMut(web_sys::Event)>,
    ) {
        let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        self.entries.push((target.clone(), event, closure));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Drop for ListenerRegistry {
    fn drop(&mut self) {
        for (target, event, closure) in &self.entries {
            let _ = target
                .remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        }
    }
}
