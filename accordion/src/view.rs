use wasm_bindgen::JsCast;

use crate::icon::IconVariant;
use crate::schedule;

pub const ITEM_SELECTOR: &str = "[data-accordion-item]";
pub const TRIGGER_SELECTOR: &str = "[data-accordion-trigger]";
pub const CONTENT_SELECTOR: &str = "[data-accordion-content]";
pub const ICON_SELECTOR: &str = "[data-accordion-icon]";

pub const VARIANT_ATTR: &str = "data-icon-variant";
pub const STATE_ATTR: &str = "data-state";

/// Height a content element is driven to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxHeight {
    Zero,
    /// The content's natural scroll height, measured at write time.
    Natural,
}

/// Narrow seam between the controller and one rendered panel.
///
/// The controller never touches elements directly, so its open/close and
/// focus logic can be exercised against a recording fake. Implementations
/// are best-effort throughout: a panel whose markup is incomplete absorbs
/// every call as a no-op.
pub trait PanelView: Clone + 'static {
    /// Writes the "open"/"closed" markers: state attributes on item,
    /// trigger, and content, the trigger's `aria-expanded`, and the icon
    /// rotation class for the panel's variant.
    fn set_open_markers(&self, open: bool);

    fn set_max_height(&self, height: MaxHeight);

    fn set_hidden(&self, hidden: bool);

    fn natural_height(&self) -> i32;

    fn force_reflow(&self);

    fn focus_trigger(&self);

    /// Whether the content still carries the "closed" marker. The
    /// deferred hide checks this so a panel reopened mid-transition is
    /// not hidden by a stale callback.
    fn is_marked_closed(&self) -> bool;

    fn defer_to_next_frame(&self, f: Box<dyn FnOnce()>);

    fn defer_until_opacity_end(&self, f: Box<dyn FnOnce()>);
}

/// `PanelView` over real DOM elements.
#[derive(Clone)]
pub struct DomPanelView {
    item: web_sys::Element,
    trigger: Option<web_sys::HtmlElement>,
    content: Option<web_sys::HtmlElement>,
    icon: Option<web_sys::Element>,
    icon_variant: IconVariant,
}

impl DomPanelView {
    /// Builds a view from one item element, locating trigger, content,
    /// and icon inside it. Missing pieces are tolerated; the affected
    /// operations degrade to no-ops for this panel only.
    pub fn from_item(item: web_sys::Element) -> Self {
        let trigger = item
            .query_selector(TRIGGER_SELECTOR)
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok());
        let content = item
            .query_selector(CONTENT_SELECTOR)
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok());
        let icon = item.query_selector(ICON_SELECTOR).ok().flatten();
        let icon_variant = icon
            .as_ref()
            .map(|element| {
                element
                    .get_attribute(VARIANT_ATTR)
                    .and_then(|value| IconVariant::from_attr(&value))
                    .unwrap_or_else(|| IconVariant::detect(element))
            })
            .unwrap_or_default();

        Self {
            item,
            trigger,
            content,
            icon,
            icon_variant,
        }
    }

    /// Whether the markup marks this panel expanded, via the trigger's
    /// `aria-expanded` or the item's own state attribute.
    pub fn initially_expanded(&self) -> bool {
        let trigger_expanded = self
            .trigger
            .as_ref()
            .and_then(|trigger| trigger.get_attribute("aria-expanded"))
            .map_or(false, |value| value == "true");
        let item_open = self
            .item
            .get_attribute(STATE_ATTR)
            .map_or(false, |value| value == "open");
        trigger_expanded || item_open
    }

    /// Gives the trigger a default tab order when none is set.
    pub fn ensure_focusable(&self) {
        if let Some(trigger) = &self.trigger {
            if trigger.get_attribute("tabindex").is_none() {
                let _ = trigger.set_attribute("tabindex", "0");
            }
        }
    }

    pub fn trigger_element(&self) -> Option<web_sys::HtmlElement> {
        self.trigger.clone()
    }

    pub fn icon_variant(&self) -> IconVariant {
        self.icon_variant
    }
}

impl PanelView for DomPanelView {
    fn set_open_markers(&self, open: bool) {
        let state = if open { "open" } else { "closed" };
        let _ = self.item.set_attribute(STATE_ATTR, state);
        if let Some(trigger) = &self.trigger {
            let _ = trigger.set_attribute("aria-expanded", if open { "true" } else { "false" });
            let _ = trigger.set_attribute(STATE_ATTR, state);
        }
        if let Some(content) = &self.content {
            let _ = content.set_attribute(STATE_ATTR, state);
        }
        if let Some(icon) = &self.icon {
            let delta = if open {
                self.icon_variant.on_open()
            } else {
                self.icon_variant.on_close()
            };
            let classes = icon.class_list();
            if let Some(class) = delta.add {
                let _ = classes.add_1(class);
            }
            if let Some(class) = delta.remove {
                let _ = classes.remove_1(class);
            }
        }
    }

    fn set_max_height(&self, height: MaxHeight) {
        let Some(content) = &self.content else {
            return;
        };
        let value = match height {
            MaxHeight::Zero => "0px".to_string(),
            MaxHeight::Natural => format!("{}px", content.scroll_height()),
        };
        let _ = content.style().set_property("max-height", &value);
    }

    fn set_hidden(&self, hidden: bool) {
        let Some(content) = &self.content else {
            return;
        };
        if hidden {
            let _ = content.set_attribute("hidden", "");
        } else {
            let _ = content.remove_attribute("hidden");
        }
    }

    fn natural_height(&self) -> i32 {
        self.content
            .as_ref()
            .map_or(0, |content| content.scroll_height())
    }

    fn force_reflow(&self) {
        if let Some(content) = &self.content {
            schedule::force_reflow(content);
        }
    }

    fn focus_trigger(&self) {
        if let Some(trigger) = &self.trigger {
            let _ = trigger.focus();
        }
    }

    fn is_marked_closed(&self) -> bool {
        self.content
            .as_ref()
            .and_then(|content| content.get_attribute(STATE_ATTR))
            .map_or(false, |value| value == "closed")
    }

    fn defer_to_next_frame(&self, f: Box<dyn FnOnce()>) {
        schedule::next_frame(f);
    }

    fn defer_until_opacity_end(&self, f: Box<dyn FnOnce()>) {
        if let Some(content) = &self.content {
            schedule::on_transition_end(content, "opacity", f);
        }
    }
}
