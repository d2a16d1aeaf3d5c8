//! Timing primitives for CSS-driven animation: next-frame deferral and
//! transition-completion callbacks.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Runs `f` on the next animation frame. No-op outside a window context.
pub fn next_frame(f: impl FnOnce() + 'static) {
    if let Some(window) = web_sys::window() {
        let callback = Closure::once_into_js(f);
        let _ = window.request_animation_frame(callback.unchecked_ref());
    }
}

/// Runs `f` once, the first time a `transitionend` for `property` fires on
/// `target`, then removes itself. Transition events for other properties
/// are ignored and leave the listener in place.
pub fn on_transition_end(
    target: &web_sys::EventTarget,
    property: &'static str,
    f: impl FnOnce() + 'static,
) {
    let mut pending = Some(f);
    let listener_target = target.clone();
    let slot: Rc<RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>>> =
        Rc::new(RefCell::new(None));
    let slot_in_handler = Rc::clone(&slot);

    let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
        let matched = event
            .dyn_ref::<web_sys::TransitionEvent>()
            .map(|transition| transition.property_name() == property)
            .unwrap_or(false);
        if !matched {
            return;
        }
        if let Some(callback) = pending.take() {
            callback();
        }
        if let Some(listener) = slot_in_handler.borrow_mut().take() {
            let _ = listener_target.remove_event_listener_with_callback(
                "transitionend",
                listener.as_ref().unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut(web_sys::Event)>);

    let _ = target
        .add_event_listener_with_callback("transitionend", closure.as_ref().unchecked_ref());
    *slot.borrow_mut() = Some(closure);
}

/// Reads layout so a just-written style takes effect before the next
/// style change, letting the browser animate between the two.
pub fn force_reflow(element: &web_sys::HtmlElement) {
    let _ = element.offset_height();
}
