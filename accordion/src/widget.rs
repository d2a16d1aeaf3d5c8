use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::controller::AccordionController;
use crate::keys::NavAction;
use crate::listeners::ListenerRegistry;
use crate::view::{DomPanelView, ITEM_SELECTOR};

type SharedController = Rc<RefCell<AccordionController<DomPanelView>>>;

/// A live accordion bound to a container element.
///
/// Holds the controller and every registered event listener; dropping the
/// widget detaches all listeners, leaving the DOM as-is.
pub struct AccordionWidget {
    controller: SharedController,
    _listeners: ListenerRegistry,
}

impl AccordionWidget {
    pub fn is_open(&self, index: usize) -> bool {
        self.controller.borrow().is_open(index)
    }

    pub fn open_indices(&self) -> Vec<usize> {
        self.controller.borrow().open_indices()
    }

    pub fn panel_count(&self) -> usize {
        self.controller.borrow().panel_count()
    }

    /// Programmatic equivalent of activating a trigger.
    pub fn toggle(&self, index: usize) {
        self.controller.borrow_mut().toggle(index);
    }
}

/// Scans `container` for panels, reconciles any markup already marked
/// expanded, and wires keyboard and click handling.
///
/// Each trigger gets its own keydown listener; a container-level fallback
/// covers engines that fail to deliver trigger-level keydown. The fallback
/// skips any event a per-trigger handler already claimed (marked by
/// `prevent_default`), so one keypress is handled exactly once.
pub fn attach(container: &web_sys::Element, allow_multiple: bool) -> AccordionWidget {
    let mut views = Vec::new();
    if let Ok(items) = container.query_selector_all(ITEM_SELECTOR) {
        for index in 0..items.length() {
            let Some(element) = items
                .get(index)
                .and_then(|node| node.dyn_into::<web_sys::Element>().ok())
            else {
                continue;
            };
            views.push(DomPanelView::from_item(element));
        }
    }

    let marked: Vec<usize> = views
        .iter()
        .enumerate()
        .filter(|(_, view)| view.initially_expanded())
        .map(|(index, _)| index)
        .collect();
    let triggers: Vec<Option<web_sys::HtmlElement>> =
        views.iter().map(DomPanelView::trigger_element).collect();
    for view in &views {
        view.ensure_focusable();
    }

    let controller: SharedController =
        Rc::new(RefCell::new(AccordionController::new(views, allow_multiple)));
    controller.borrow_mut().init(&marked);

    let mut listeners = ListenerRegistry::new();
    for (index, trigger) in triggers.iter().enumerate() {
        let Some(trigger) = trigger else {
            continue;
        };

        let ctrl = Rc::clone(&controller);
        let keydown = Closure::wrap(Box::new(move |event: web_sys::Event| {
            let Some(key_event) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
                return;
            };
            let Some(action) = NavAction::from_key(&key_event.key()) else {
                return;
            };
            event.prevent_default();
            dispatch(&ctrl, action, index);
        }) as Box<dyn FnMut(web_sys::Event)>);
        listeners.add(trigger, "keydown", keydown);

        let ctrl = Rc::clone(&controller);
        let click = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            ctrl.borrow_mut().toggle(index);
        }) as Box<dyn FnMut(web_sys::Event)>);
        listeners.add(trigger, "click", click);
    }

    let ctrl = Rc::clone(&controller);
    let fallback = Closure::wrap(Box::new(move |event: web_sys::Event| {
        let Some(key_event) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
            return;
        };
        let Some(action) = NavAction::from_key(&key_event.key()) else {
            return;
        };
        if !action.moves_focus() {
            return;
        }
        // A per-trigger handler that saw this event already called
        // prevent_default; the fallback only picks up keypresses no
        // trigger-level listener delivered.
        if event.default_prevented() {
            return;
        }
        let Some(active) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.active_element())
        else {
            return;
        };
        let Some(index) = triggers.iter().position(|trigger| {
            trigger
                .as_ref()
                .map_or(false, |trigger| trigger.contains(Some(active.unchecked_ref())))
        }) else {
            return;
        };
        event.prevent_default();
        dispatch(&ctrl, action, index);
    }) as Box<dyn FnMut(web_sys::Event)>);
    listeners.add(container, "keydown", fallback);

    AccordionWidget {
        controller,
        _listeners: listeners,
    }
}

fn dispatch(controller: &SharedController, action: NavAction, index: usize) {
    let mut controller = controller.borrow_mut();
    match action {
        NavAction::FocusPrev => controller.focus_prev(index),
        NavAction::FocusNext => controller.focus_next(index),
        NavAction::FocusFirst => controller.focus_first(),
        NavAction::FocusLast => controller.focus_last(),
        NavAction::Toggle => controller.toggle(index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> web_sys::Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn item_markup(index: usize, open: bool) -> String {
        let state = if open { "open" } else { "closed" };
        let expanded = if open { "true" } else { "false" };
        let hidden = if open { "" } else { "hidden" };
        format!(
            r#"<div data-accordion-item data-state="{state}">
                 <button id="trigger-{index}" data-accordion-trigger aria-expanded="{expanded}">
                   <span id="icon-{index}" data-accordion-icon data-icon-variant="chevron"></span>
                 </button>
                 <div id="content-{index}" data-accordion-content data-state="{state}" {hidden}>panel {index}</div>
               </div>"#
        )
    }

    fn mount_fixture(open: &[bool]) -> web_sys::Element {
        let container = document().create_element("div").unwrap();
        let markup: String = open
            .iter()
            .enumerate()
            .map(|(index, open)| item_markup(index, *open))
            .collect();
        container.set_inner_html(&markup);
        document()
            .body()
            .unwrap()
            .append_child(&container)
            .unwrap();
        container
    }

    fn content(index: usize) -> web_sys::Element {
        document()
            .get_element_by_id(&format!("content-{index}"))
            .unwrap()
    }

    fn trigger(index: usize) -> web_sys::HtmlElement {
        document()
            .get_element_by_id(&format!("trigger-{index}"))
            .unwrap()
            .dyn_into()
            .unwrap()
    }

    fn keydown(key: &str) -> web_sys::KeyboardEvent {
        let init = web_sys::KeyboardEventInit::new();
        init.set_key(key);
        init.set_bubbles(true);
        init.set_cancelable(true);
        web_sys::KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap()
    }

    fn opacity_end() -> web_sys::TransitionEvent {
        let init = web_sys::TransitionEventInit::new();
        init.set_property_name("opacity");
        web_sys::TransitionEvent::new_with_event_init_dict("transitionend", &init).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_attach_reconciles_single_open_markup() {
        let container = mount_fixture(&[true, false, true]);
        let widget = attach(&container, false);

        assert_eq!(widget.open_indices(), vec![0]);
        assert_eq!(trigger(0).get_attribute("aria-expanded").unwrap(), "true");
        assert_eq!(trigger(2).get_attribute("aria-expanded").unwrap(), "false");
        assert_eq!(content(2).get_attribute("data-state").unwrap(), "closed");
        assert!(content(2).has_attribute("hidden"));
        assert!(!content(0).has_attribute("hidden"));
        container.remove();
    }

    #[wasm_bindgen_test]
    fn test_attach_reconciles_multiple_open_markup() {
        let container = mount_fixture(&[true, false, true]);
        let widget = attach(&container, true);

        assert_eq!(widget.open_indices(), vec![0, 2]);
        assert!(content(1).has_attribute("hidden"));
        container.remove();
    }

    #[wasm_bindgen_test]
    async fn test_click_toggles_exclusively() {
        let container = mount_fixture(&[true, false, false]);
        let widget = attach(&container, false);

        trigger(1).click();
        assert_eq!(widget.open_indices(), vec![1]);
        assert_eq!(content(0).get_attribute("data-state").unwrap(), "closed");

        TimeoutFuture::new(100).await;
        assert_eq!(content(1).get_attribute("data-state").unwrap(), "open");
        assert_eq!(trigger(1).get_attribute("aria-expanded").unwrap(), "true");
        container.remove();
    }

    #[wasm_bindgen_test]
    fn test_arrow_keys_wrap_focus() {
        let container = mount_fixture(&[false, false, false]);
        let _widget = attach(&container, false);

        let _ = trigger(2).focus();
        let _ = trigger(2).dispatch_event(&keydown("ArrowDown"));
        assert_eq!(
            document().active_element().unwrap().id(),
            "trigger-0".to_string()
        );

        let _ = trigger(0).dispatch_event(&keydown("ArrowUp"));
        assert_eq!(
            document().active_element().unwrap().id(),
            "trigger-2".to_string()
        );

        let _ = trigger(2).dispatch_event(&keydown("Home"));
        assert_eq!(document().active_element().unwrap().id(), "trigger-0");
        let _ = trigger(0).dispatch_event(&keydown("End"));
        assert_eq!(document().active_element().unwrap().id(), "trigger-2");
        container.remove();
    }

    #[wasm_bindgen_test]
    fn test_keypress_inside_trigger_is_handled_once() {
        let container = mount_fixture(&[false, false, false]);
        let _widget = attach(&container, false);

        let _ = trigger(0).focus();
        let icon = document().get_element_by_id("icon-0").unwrap();
        // Bubbles through the trigger's own handler and on to the
        // container fallback; focus must move one step, not two.
        let _ = icon.dispatch_event(&keydown("ArrowDown"));
        assert_eq!(document().active_element().unwrap().id(), "trigger-1");
        container.remove();
    }

    #[wasm_bindgen_test]
    fn test_enter_key_toggles_panel() {
        let container = mount_fixture(&[false, false]);
        let widget = attach(&container, false);

        let _ = trigger(1).dispatch_event(&keydown("Enter"));
        assert_eq!(widget.open_indices(), vec![1]);
        let _ = trigger(1).dispatch_event(&keydown(" "));
        assert!(widget.open_indices().is_empty());
        container.remove();
    }

    #[wasm_bindgen_test]
    fn test_container_fallback_navigates_from_focused_trigger() {
        let container = mount_fixture(&[false, false, false]);
        let _widget = attach(&container, false);

        let _ = trigger(1).focus();
        // Delivered at the container only, as when trigger-level keydown
        // never fires; the fallback locates the focused trigger.
        let _ = container.dispatch_event(&keydown("ArrowUp"));
        assert_eq!(document().active_element().unwrap().id(), "trigger-0");
        container.remove();
    }

    #[wasm_bindgen_test]
    fn test_deferred_hide_waits_for_opacity_transition() {
        let container = mount_fixture(&[true, false]);
        let widget = attach(&container, false);

        widget.toggle(0);
        assert_eq!(content(0).get_attribute("data-state").unwrap(), "closed");
        assert_eq!(trigger(0).get_attribute("aria-expanded").unwrap(), "false");
        let inline_height = content(0)
            .dyn_into::<web_sys::HtmlElement>()
            .unwrap()
            .style()
            .get_property_value("max-height")
            .unwrap();
        assert_eq!(inline_height, "0px");
        assert!(!content(0).has_attribute("hidden"));

        let _ = content(0).dispatch_event(&opacity_end());
        assert!(content(0).has_attribute("hidden"));
        container.remove();
    }

    #[wasm_bindgen_test]
    async fn test_reopened_panel_ignores_stale_transition() {
        let container = mount_fixture(&[true, false]);
        let widget = attach(&container, false);

        widget.toggle(0);
        widget.toggle(0);
        TimeoutFuture::new(100).await;
        assert_eq!(content(0).get_attribute("data-state").unwrap(), "open");

        let _ = content(0).dispatch_event(&opacity_end());
        assert!(!content(0).has_attribute("hidden"));
        container.remove();
    }

    #[wasm_bindgen_test]
    fn test_detach_stops_handling_events() {
        let container = mount_fixture(&[false, false]);
        let widget = attach(&container, false);
        drop(widget);

        trigger(0).click();
        assert_eq!(content(0).get_attribute("data-state").unwrap(), "closed");
        container.remove();
    }

    #[wasm_bindgen_test]
    fn test_attach_tolerates_incomplete_items() {
        let container = document().create_element("div").unwrap();
        container.set_inner_html(
            r#"<div data-accordion-item></div>
               <div data-accordion-item>
                 <button id="lone-trigger" data-accordion-trigger aria-expanded="false"></button>
                 <div data-accordion-content hidden></div>
               </div>"#,
        );
        document().body().unwrap().append_child(&container).unwrap();
        let widget = attach(&container, false);

        assert_eq!(widget.panel_count(), 2);
        widget.toggle(0);
        widget.toggle(1);
        assert_eq!(widget.open_indices(), vec![1]);
        container.remove();
    }
}
