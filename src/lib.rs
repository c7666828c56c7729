//! Terminal calendar widgets for `ratatui`: a month grid and a week grid with
//! configurable visible weekdays and start of week, plus a tab container and
//! a radio-button group to host them in.
pub mod calendar;
pub mod component;
pub mod radio;
pub mod tabs;
pub mod theme;
pub use crate::component::Component;
