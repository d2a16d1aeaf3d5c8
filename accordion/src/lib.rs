//! Accessible accordion widget for Leptos: collapsible panels with
//! keyboard navigation, ARIA state, and CSS-driven open/close animation.
//!
//! The [`Accordion`] and [`AccordionItem`] components render the markup
//! and bind the controller for you. [`attach`] binds the same behavior to
//! markup rendered elsewhere, as long as it carries the
//! `data-accordion-*` attributes.

pub mod components;
pub mod controller;
pub mod icon;
pub mod keys;
pub mod listeners;
pub mod schedule;
pub mod state;
pub mod view;
pub mod widget;

pub use components::{Accordion, AccordionItem};
pub use icon::IconVariant;
pub use widget::{attach, AccordionWidget};
