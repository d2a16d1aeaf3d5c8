use std::sync::atomic::{AtomicUsize, Ordering};

use leptos::*;

use crate::icon::IconVariant;
use crate::widget::{attach, AccordionWidget};

static NEXT_PANEL_ID: AtomicUsize = AtomicUsize::new(0);

/// Container for a group of [`AccordionItem`]s.
///
/// Renders the wrapper element and, once mounted, binds an
/// [`AccordionWidget`] to it. The widget is dropped on cleanup, which
/// detaches every listener it registered.
#[component]
pub fn Accordion(
    /// Allow more than one panel to be expanded at the same time.
    #[prop(optional)]
    allow_multiple: bool,
    #[prop(optional, into)] class: Option<String>,
    children: Children,
) -> impl IntoView {
    let container_ref = create_node_ref::<html::Div>();
    let widget = store_value(None::<AccordionWidget>);

    create_effect(move |_| {
        if let Some(container) = container_ref.get() {
            if widget.with_value(Option::is_none) {
                let container: &web_sys::Element = &container;
                widget.set_value(Some(attach(container, allow_multiple)));
            }
        }
    });
    on_cleanup(move || {
        widget.update_value(|widget| {
            widget.take();
        });
    });

    let full_class = match class {
        Some(extra) => format!("accordion {}", extra),
        None => "accordion".to_string(),
    };

    view! {
        <div class=full_class node_ref=container_ref>
            {children()}
        </div>
    }
}

/// One collapsible panel: trigger button, content region, and indicator
/// icon, wired together with the attributes the widget controller scans
/// for.
#[component]
pub fn AccordionItem(
    #[prop(into)] title: String,
    #[prop(optional)] icon: IconVariant,
    /// Render this panel expanded; the enclosing accordion reconciles it
    /// against its single-open rule on attach.
    #[prop(optional)]
    open: bool,
    children: Children,
) -> impl IntoView {
    let panel_id = NEXT_PANEL_ID.fetch_add(1, Ordering::Relaxed);
    let trigger_id = format!("accordion-trigger-{}", panel_id);
    let content_id = format!("accordion-content-{}", panel_id);

    let state = if open { "open" } else { "closed" };
    let expanded = if open { "true" } else { "false" };
    let icon_class = match icon.initial_class(open) {
        Some(rotation) => format!("accordion-icon {}", rotation),
        None => "accordion-icon".to_string(),
    };
    let glyph = match icon {
        IconVariant::PlusMinus => "+",
        IconVariant::LeftChevron => "\u{2039}",
        IconVariant::DownChevron => "\u{2304}",
    };

    view! {
        <div class="accordion-item" data-accordion-item="" data-state=state>
            <button
                type="button"
                class="accordion-trigger"
                id=trigger_id.clone()
                data-accordion-trigger=""
                data-state=state
                aria-expanded=expanded
                aria-controls=content_id.clone()
            >
                <span class="accordion-title">{title}</span>
                <span
                    class=icon_class
                    data-accordion-icon=""
                    data-icon-variant=icon.as_attr()
                    aria-hidden="true"
                >
                    {glyph}
                </span>
            </button>
            <div
                class="accordion-content"
                id=content_id
                data-accordion-content=""
                data-state=state
                role="region"
                aria-labelledby=trigger_id
                hidden={!open}
            >
                {children()}
            </div>
        </div>
    }
}
