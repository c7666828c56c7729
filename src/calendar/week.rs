use super::cell::{ColumnRole, GridCell, RowRole};
use super::navigation::{
    add_days, first_on_or_after, last_on_or_before, next_after, previous_before, sub_days,
    Direction,
};
use super::style::WeekStyles;
use super::weekdays::{WeekdayExt, Weekdays, DAYS_IN_WEEK};
use super::{route_event, ActiveDateChanged, DayContent, Input, Notification};
use std::collections::BTreeMap;
use std::mem;
use time::{Date, Duration, Weekday};

/// A fixed seven-day window of calendar dates, shown as a single row of its
/// visible weekdays
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WeekGrid<C> {
    start_of_week: Weekday,
    weekdays: Weekdays,
    /// Always falls on `start_of_week`
    start_date: Date,
    days: BTreeMap<Date, C>,
    active_date: Option<Date>,
    styles: WeekStyles,
}

impl<C> WeekGrid<C> {
    /// Creates the Sunday-based week containing `sample_date`
    pub fn new(sample_date: Date) -> WeekGrid<C> {
        let start_date =
            sub_days(sample_date, sample_date.weekday().index0()).unwrap_or(sample_date);
        WeekGrid {
            start_of_week: Weekday::Sunday,
            weekdays: Weekdays::default(),
            start_date,
            days: BTreeMap::new(),
            active_date: None,
            styles: WeekStyles::default(),
        }
    }

    pub fn start_of_week(mut self, weekday: Weekday) -> WeekGrid<C> {
        self.set_start_of_week(weekday);
        self
    }

    pub fn weekdays(mut self, weekdays: Weekdays) -> WeekGrid<C> {
        self.weekdays = weekdays;
        self
    }

    pub fn styles(mut self, styles: WeekStyles) -> WeekGrid<C> {
        self.styles = styles;
        self
    }

    /// Changes the start of the week, sliding the window by the signed
    /// difference between the new and old weekdays.  A cursor left outside
    /// the window is cleared.  Content outside it is kept but hidden until
    /// the window covers its date again.
    pub fn set_start_of_week(&mut self, weekday: Weekday) {
        let delta = i64::from(weekday.number_days_from_sunday())
            - i64::from(self.start_of_week.number_days_from_sunday());
        let Some(start_date) = self.start_date.checked_add(Duration::days(delta)) else {
            return;
        };
        self.start_date = start_date;
        self.start_of_week = weekday;
        if self.active_date.is_some_and(|d| !self.contains(d)) {
            self.active_date = None;
        }
    }

    pub fn week_start(&self) -> Weekday {
        self.start_of_week
    }

    pub fn labels(&self) -> &Weekdays {
        &self.weekdays
    }

    pub fn week_styles(&self) -> &WeekStyles {
        &self.styles
    }

    pub fn start_date(&self) -> Date {
        self.start_date
    }

    /// The last date of the window, six days after the start
    pub fn end_date(&self) -> Date {
        add_days(self.start_date, DAYS_IN_WEEK - 1).unwrap_or(self.start_date)
    }

    /// Whether `date` falls in the seven-day window, visible or not
    pub fn contains(&self, date: Date) -> bool {
        self.start_date <= date && date <= self.end_date()
    }

    pub fn active_date(&self) -> Option<Date> {
        self.active_date
    }

    /// Moves the cursor to `date` if it is a visible date in the window.
    /// Returns whether the cursor was moved.
    pub fn set_active_date(&mut self, date: Date) -> bool {
        if self.contains(date) && self.weekdays.is_visible(date.weekday()) {
            self.active_date = Some(date);
            true
        } else {
            false
        }
    }

    /// The content for `date`, if it falls inside the current window
    pub fn content(&self, date: Date) -> Option<&C> {
        self.days.get(&self.in_window(date)?)
    }

    /// Adds or replaces the content for `date`, returning the previous
    /// content.  Dates outside the window are ignored.
    pub fn upsert(&mut self, date: Date, content: C) -> Option<C> {
        if !self.contains(date) {
            log::debug!(
                "ignoring content for {date} outside of week starting {}",
                self.start_date
            );
            return None;
        }
        self.days.insert(date, content)
    }

    fn in_window(&self, date: Date) -> Option<Date> {
        self.contains(date).then_some(date)
    }

    fn first_visible_date(&self) -> Option<Date> {
        self.in_window(first_on_or_after(&self.weekdays, self.start_date)?)
    }

    fn last_visible_date(&self) -> Option<Date> {
        self.in_window(last_on_or_before(&self.weekdays, self.end_date())?)
    }

    /// Moves the cursor one visible day left or right, wrapping around the
    /// ends of the window.  A week is a single row, so Up and Down do
    /// nothing.  The first Right selects the first visible day of the window
    /// and the first Left selects the last.
    pub fn navigate(&mut self, direction: Direction) -> Option<ActiveDateChanged> {
        let target = match (self.active_date, direction) {
            (_, Direction::Up | Direction::Down) => None,
            (None, Direction::Right) => self.first_visible_date(),
            (None, Direction::Left) => self.last_visible_date(),
            (Some(d), Direction::Right) => next_after(&self.weekdays, d)
                .and_then(|d| self.in_window(d))
                .or_else(|| self.first_visible_date()),
            (Some(d), Direction::Left) => previous_before(&self.weekdays, d)
                .and_then(|d| self.in_window(d))
                .or_else(|| self.last_visible_date()),
        };
        let date = target?;
        if self.active_date == Some(date) {
            return None;
        }
        log::debug!("week cursor moved {direction:?} to {date}");
        self.active_date = Some(date);
        Some(ActiveDateChanged { date })
    }

    /// One cell per visible weekday of the window, in date order
    pub fn layout(&self) -> Vec<GridCell> {
        let first = self.weekdays.first(self.start_date);
        let last = self.weekdays.last(self.start_date);
        (0..DAYS_IN_WEEK)
            .filter_map(|i| add_days(self.start_date, i))
            .filter(|d| self.weekdays.is_visible(d.weekday()))
            .map(|date| GridCell {
                column: ColumnRole::classify(date.weekday(), first, last),
                row: RowRole::Bottom,
                ..GridCell::dated(date, self.active_date == Some(date))
            })
            .collect()
    }
}

impl<C: DayContent> WeekGrid<C> {
    pub fn update(&mut self, input: Input<C>) -> Vec<Notification<C::Effect>> {
        match input {
            Input::Navigate(direction) => self
                .navigate(direction)
                .map(Notification::ActiveDateChanged)
                .into_iter()
                .collect(),
            Input::Content { date, content } => {
                self.upsert(date, content);
                Vec::new()
            }
            Input::Event(event) => {
                let mut days = mem::take(&mut self.days);
                let window = days
                    .range_mut(self.start_date..=self.end_date())
                    .map(|(_, content)| content);
                let notes = route_event(window, &event, |d| self.navigate(d));
                self.days = days;
                notes
            }
        }
    }
}
