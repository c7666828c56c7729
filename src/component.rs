//! The seam between container widgets and the widgets they hold
use crate::calendar::{DayContent, Input, MonthGrid, Notification, WeekGrid};
use crossterm::event::Event;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

/// A widget that consumes terminal events, reports what happened, and draws
/// itself into a region of a buffer
pub trait Component {
    type Effect;

    fn handle_event(&mut self, event: &Event) -> Vec<Self::Effect>;

    fn render(&self, area: Rect, buf: &mut Buffer);
}

impl<C: DayContent> Component for MonthGrid<C> {
    type Effect = Notification<C::Effect>;

    fn handle_event(&mut self, event: &Event) -> Vec<Self::Effect> {
        self.update(Input::Event(event.clone()))
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        Widget::render(self, area, buf);
    }
}

impl<C: DayContent> Component for WeekGrid<C> {
    type Effect = Notification<C::Effect>;

    fn handle_event(&mut self, event: &Event) -> Vec<Self::Effect> {
        self.update(Input::Event(event.clone()))
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        Widget::render(self, area, buf);
    }
}
