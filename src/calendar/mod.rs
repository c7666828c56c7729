//! Month and week calendar grids.
//!
//! Both grids hold a set of visible weekdays, a start-of-week convention, a
//! cursor over the visible dates, and externally supplied per-date content.
//! Input goes in through `update`; the only output besides rendering is an
//! [`ActiveDateChanged`] notification whenever the cursor moves.
mod cell;
mod month;
mod navigation;
mod style;
mod week;
mod weekdays;
mod widget;
pub use self::cell::{ColumnRole, GridCell, RowRole};
pub use self::month::{calendar_row_count, days_in_month, first_weekday_of_month, MonthGrid};
pub use self::navigation::Direction;
pub use self::style::{BorderSets, CellStyles, DateFormat, InvalidDateFormat, WeekStyles};
pub use self::week::WeekGrid;
pub use self::weekdays::{parse_weekday, ParseWeekdayError, Weekdays};
use crossterm::event::Event;
use ratatui::text::Text;
use std::convert::Infallible;
use time::Date;

/// Per-date content placed inside a grid cell.
///
/// The grid owns its content handles and treats them opaquely: every event
/// that is not calendar navigation is forwarded to each handle in ascending
/// date order, and the resulting effects are handed back to the host.
pub trait DayContent {
    type Effect;

    fn handle_event(&mut self, event: &Event) -> Option<Self::Effect>;

    fn render(&self) -> Text<'static>;
}

impl DayContent for Text<'static> {
    type Effect = Infallible;

    fn handle_event(&mut self, _event: &Event) -> Option<Infallible> {
        None
    }

    fn render(&self) -> Text<'static> {
        self.clone()
    }
}

impl DayContent for String {
    type Effect = Infallible;

    fn handle_event(&mut self, _event: &Event) -> Option<Infallible> {
        None
    }

    fn render(&self) -> Text<'static> {
        Text::raw(self.clone())
    }
}

/// Input consumed by the grids
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Input<C> {
    Navigate(Direction),
    /// Adds or replaces the content for `date`.  Dates outside the grid are
    /// ignored.
    Content { date: Date, content: C },
    /// Anything else.  Arrow-key presses are treated as navigation; all other
    /// events go to the content handles.
    Event(Event),
}

/// Emitted whenever a grid's cursor moves
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ActiveDateChanged {
    pub date: Date,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Notification<E> {
    ActiveDateChanged(ActiveDateChanged),
    Content(E),
}

impl<E> Notification<E> {
    pub fn active_date(&self) -> Option<Date> {
        match self {
            Notification::ActiveDateChanged(ActiveDateChanged { date }) => Some(*date),
            Notification::Content(_) => None,
        }
    }
}

/// Sends `event` to every handle in order, collecting their effects
pub(crate) fn forward_event<'a, I, C>(contents: I, event: &Event) -> Vec<Notification<C::Effect>>
where
    I: IntoIterator<Item = &'a mut C>,
    C: DayContent + 'a,
{
    contents
        .into_iter()
        .filter_map(|content| content.handle_event(event))
        .map(Notification::Content)
        .collect()
}

/// Common dispatch for both grids: arrow keys navigate, anything else is
/// forwarded
pub(crate) fn route_event<'a, I, C, F>(
    contents: I,
    event: &Event,
    navigate: F,
) -> Vec<Notification<C::Effect>>
where
    I: IntoIterator<Item = &'a mut C>,
    C: DayContent + 'a,
    F: FnOnce(Direction) -> Option<ActiveDateChanged>,
{
    let direction = match event {
        Event::Key(key) => Direction::from_key(key),
        _ => None,
    };
    match direction {
        Some(d) => navigate(d)
            .map(Notification::ActiveDateChanged)
            .into_iter()
            .collect(),
        None => forward_event(contents, event),
    }
}
