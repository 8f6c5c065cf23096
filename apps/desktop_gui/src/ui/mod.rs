//! UI layer for desktop GUI: app shell and slot widget.

pub mod app;
pub mod slot_widget;

pub use app::TemplateFillerApp;
