use super::cell::{ColumnRole, GridCell, RowRole};
use super::navigation::{
    first_on_or_after, last_on_or_before, next_after, previous_before, Direction,
};
use super::style::CellStyles;
use super::weekdays::{WeekdayExt, Weekdays};
use super::{route_event, ActiveDateChanged, DayContent, Input, Notification};
use std::collections::BTreeMap;
use std::mem;
use time::{util::is_leap_year, Date, Month, Weekday};

/// Number of days in `month` of `year`, accounting for leap years
pub fn days_in_month(year: i32, month: Month) -> u8 {
    match month {
        Month::February if is_leap_year(year) => 29,
        Month::February => 28,
        Month::April | Month::June | Month::September | Month::November => 30,
        _ => 31,
    }
}

/// Weekday of the first of the month, or `None` if the year is outside the
/// range `time` supports
pub fn first_weekday_of_month(year: i32, month: Month) -> Option<Weekday> {
    Date::from_calendar_date(year, month, 1)
        .ok()
        .map(Date::weekday)
}

/// Number of calendar rows a month spans when every weekday is shown: one,
/// plus one more each time a day other than the first falls on
/// `start_of_week`
pub fn calendar_row_count(year: i32, month: Month, start_of_week: Weekday) -> usize {
    let Some(first) = first_weekday_of_month(year, month) else {
        return 0;
    };
    let dim = usize::from(days_in_month(year, month));
    1 + (1..dim).filter(|&i| first.plus(i) == start_of_week).count()
}

/// A calendar month laid out as rows of visible weekdays
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MonthGrid<C> {
    year: i32,
    month: Month,
    start_of_week: Weekday,
    weekdays: Weekdays,
    /// Content keyed by day of month
    days: BTreeMap<u8, C>,
    /// `None` until the first navigation input
    active_day: Option<u8>,
    styles: CellStyles,
}

impl<C> MonthGrid<C> {
    pub fn new(year: i32, month: Month) -> MonthGrid<C> {
        MonthGrid {
            year,
            month,
            start_of_week: Weekday::Sunday,
            weekdays: Weekdays::default(),
            days: BTreeMap::new(),
            active_day: None,
            styles: CellStyles::default(),
        }
    }

    pub fn start_of_week(mut self, weekday: Weekday) -> MonthGrid<C> {
        self.set_start_of_week(weekday);
        self
    }

    pub fn weekdays(mut self, weekdays: Weekdays) -> MonthGrid<C> {
        self.weekdays = weekdays;
        self
    }

    pub fn styles(mut self, styles: CellStyles) -> MonthGrid<C> {
        self.styles = styles;
        self
    }

    pub fn set_start_of_week(&mut self, weekday: Weekday) {
        self.start_of_week = weekday;
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn week_start(&self) -> Weekday {
        self.start_of_week
    }

    pub fn labels(&self) -> &Weekdays {
        &self.weekdays
    }

    pub fn cell_styles(&self) -> &CellStyles {
        &self.styles
    }

    pub fn days_in_month(&self) -> u8 {
        days_in_month(self.year, self.month)
    }

    pub fn active_day(&self) -> Option<u8> {
        self.active_day
    }

    pub fn active_date(&self) -> Option<Date> {
        self.active_day.and_then(|d| self.date_of(d))
    }

    /// Moves the cursor to `day` if it is a visible day of this month.
    /// Returns whether the cursor was moved.
    pub fn set_active_day(&mut self, day: u8) -> bool {
        match self.date_of(day) {
            Some(date) if self.weekdays.is_visible(date.weekday()) => {
                self.active_day = Some(day);
                true
            }
            _ => false,
        }
    }

    pub fn content(&self, day: u8) -> Option<&C> {
        self.days.get(&day)
    }

    /// Adds or replaces the content for `date`, returning the previous
    /// content.  Dates in any other month are ignored.
    pub fn upsert(&mut self, date: Date, content: C) -> Option<C> {
        if date.year() != self.year || date.month() != self.month {
            log::debug!(
                "ignoring content for {date} outside of {} {}",
                self.month,
                self.year
            );
            return None;
        }
        self.days.insert(date.day(), content)
    }

    /// "September" or "September 2024"
    pub fn title(&self, include_year: bool) -> String {
        if include_year {
            format!("{} {}", self.month, self.year)
        } else {
            self.month.to_string()
        }
    }

    fn date_of(&self, day: u8) -> Option<Date> {
        Date::from_calendar_date(self.year, self.month, day).ok()
    }

    fn day_in_month(&self, date: Date) -> Option<u8> {
        (date.year() == self.year && date.month() == self.month).then(|| date.day())
    }

    fn first_visible_day(&self) -> Option<u8> {
        let first = first_on_or_after(&self.weekdays, self.date_of(1)?)?;
        self.day_in_month(first)
    }

    fn last_visible_day(&self) -> Option<u8> {
        let last = last_on_or_before(&self.weekdays, self.date_of(self.days_in_month())?)?;
        self.day_in_month(last)
    }

    fn next_visible_day(&self, day: u8) -> Option<u8> {
        let next = next_after(&self.weekdays, self.date_of(day)?)?;
        self.day_in_month(next)
    }

    fn previous_visible_day(&self, day: u8) -> Option<u8> {
        let prev = previous_before(&self.weekdays, self.date_of(day)?)?;
        self.day_in_month(prev)
    }

    // Folding assumes every month has at least 28 days, so the same weekday
    // four weeks later is always in the month.
    fn day_above(&self, day: u8) -> u8 {
        match day.checked_sub(7) {
            Some(d) if d >= 1 => d,
            _ => {
                let d = day + 28;
                if d > self.days_in_month() {
                    d - 7
                } else {
                    d
                }
            }
        }
    }

    fn day_below(&self, day: u8) -> u8 {
        let d = day + 7;
        if d <= self.days_in_month() {
            d
        } else {
            match day.checked_sub(28) {
                Some(d) if d >= 1 => d,
                _ => day + 7 - 28,
            }
        }
    }

    /// Moves the cursor one step in `direction`.
    ///
    /// Left and Right step between visible days and wrap around the ends of
    /// the month; Up and Down move by whole weeks and fold back into the
    /// month.  The first input on a fresh grid places the cursor instead:
    /// Right and Down select the first visible day, Left the last, and Up
    /// moves up from the first.
    pub fn navigate(&mut self, direction: Direction) -> Option<ActiveDateChanged> {
        let target = match (self.active_day, direction) {
            (None, Direction::Right | Direction::Down) => self.first_visible_day(),
            (None, Direction::Left) => self.last_visible_day(),
            (None, Direction::Up) => self.first_visible_day().map(|d| self.day_above(d)),
            (Some(d), Direction::Right) => self
                .next_visible_day(d)
                .or_else(|| self.first_visible_day()),
            (Some(d), Direction::Left) => self
                .previous_visible_day(d)
                .or_else(|| self.last_visible_day()),
            (Some(d), Direction::Up) => Some(self.day_above(d)),
            (Some(d), Direction::Down) => Some(self.day_below(d)),
        };
        let day = target?;
        if self.active_day == Some(day) {
            return None;
        }
        let date = self.date_of(day)?;
        log::debug!("month cursor moved {direction:?} to {date}");
        self.active_day = Some(day);
        Some(ActiveDateChanged { date })
    }

    /// The visible weekdays in column order, beginning with the first visible
    /// weekday at or after the start of the week
    pub fn columns(&self) -> Vec<Weekday> {
        self.weekdays.columns(self.start_of_week)
    }

    /// Lays the month out as rows of exactly `columns().len()` cells.
    ///
    /// Days on invisible weekdays are skipped.  The first row is padded on the
    /// left and the last row on the right with blank cells.
    pub fn layout(&self) -> Vec<Vec<GridCell>> {
        let columns = self.columns();
        let Some(&leftmost) = columns.first() else {
            return Vec::new();
        };
        let first = self.weekdays.first_from(self.start_of_week);
        let last = self.weekdays.last_before(self.start_of_week);
        let mut rows = Vec::new();
        let mut row = Vec::with_capacity(columns.len());
        for date in (1..=self.days_in_month()).filter_map(|d| self.date_of(d)) {
            let wd = date.weekday();
            if !self.weekdays.is_visible(wd) {
                continue;
            }
            if wd == leftmost && !row.is_empty() {
                rows.push(mem::replace(&mut row, Vec::with_capacity(columns.len())));
            }
            if rows.is_empty() && row.is_empty() {
                row.extend(
                    columns
                        .iter()
                        .take_while(|&&c| c != wd)
                        .map(|&c| GridCell::blank(c)),
                );
            }
            row.push(GridCell::dated(date, self.active_day == Some(date.day())));
        }
        if !row.is_empty() {
            let filled = row.len();
            row.extend(columns.iter().skip(filled).map(|&c| GridCell::blank(c)));
            rows.push(row);
        }
        let bottom = rows.len().saturating_sub(1);
        for (i, row) in rows.iter_mut().enumerate() {
            for cell in row {
                cell.column = ColumnRole::classify(cell.weekday, first, last);
                cell.row = if i == bottom {
                    RowRole::Bottom
                } else {
                    RowRole::Interior
                };
            }
        }
        rows
    }
}

impl<C: DayContent> MonthGrid<C> {
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
                let notes = route_event(days.values_mut(), &event, |d| self.navigate(d));
                self.days = days;
                notes
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::testing::Counter;
    use crate::calendar::Direction::*;
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
    use time::macros::date;
    use time::Weekday::*;

    type Grid = MonthGrid<Counter>;

    fn september() -> Grid {
        MonthGrid::new(2024, Month::September)
    }

    fn weekend() -> Weekdays {
        Weekdays::empty()
            .with(Friday, "F")
            .with(Saturday, "S")
            .with(Sunday, "U")
    }

    fn workweek() -> Weekdays {
        Weekdays::empty()
            .with(Monday, "Mon")
            .with(Tuesday, "Tue")
            .with(Wednesday, "Wed")
            .with(Thursday, "Thu")
            .with(Friday, "Fri")
    }

    fn press(grid: &mut Grid, keys: &[Direction]) -> Vec<u8> {
        keys.iter()
            .filter_map(|&d| grid.navigate(d))
            .map(|e| e.date.day())
            .collect()
    }

    fn starting_at(day: u8) -> Grid {
        let mut grid = september();
        assert!(grid.set_active_day(day));
        grid
    }

    #[test]
    fn test_new_month() {
        let grid = september();
        assert_eq!(grid.year(), 2024);
        assert_eq!(grid.month(), Month::September);
        assert_eq!(grid.week_start(), Sunday);
        assert_eq!(grid.active_day(), None);
        assert_eq!(grid.content(1), None);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, Month::February), 29);
        assert_eq!(days_in_month(2023, Month::February), 28);
        assert_eq!(days_in_month(1900, Month::February), 28);
        assert_eq!(days_in_month(2000, Month::February), 29);
        assert_eq!(days_in_month(2024, Month::September), 30);
        assert_eq!(days_in_month(2024, Month::December), 31);
    }

    #[test]
    fn test_first_weekday_of_month() {
        assert_eq!(first_weekday_of_month(2024, Month::September), Some(Sunday));
        assert_eq!(first_weekday_of_month(2024, Month::October), Some(Tuesday));
    }

    #[test]
    fn test_calendar_row_count() {
        assert_eq!(calendar_row_count(2024, Month::September, Sunday), 5);
        assert_eq!(calendar_row_count(2024, Month::September, Monday), 6);
        assert_eq!(calendar_row_count(2026, Month::February, Sunday), 4);
        assert_eq!(calendar_row_count(2026, Month::February, Monday), 5);
    }

    #[test]
    fn test_title() {
        let grid = september();
        assert_eq!(grid.title(false), "September");
        assert_eq!(grid.title(true), "September 2024");
    }

    #[test]
    fn test_first_input() {
        assert_eq!(press(&mut september(), &[Right]), [1]);
        assert_eq!(press(&mut september(), &[Down]), [1]);
        assert_eq!(press(&mut september(), &[Up]), [29]);
        assert_eq!(press(&mut september(), &[Left]), [30]);
        assert_eq!(press(&mut september(), &[Right, Up]), [1, 29]);
    }

    #[test]
    fn test_month_wraparound() {
        assert_eq!(press(&mut starting_at(30), &[Right]), [1]);
        assert_eq!(press(&mut starting_at(1), &[Left]), [30]);
    }

    #[test]
    fn test_week_boundaries() {
        assert_eq!(press(&mut starting_at(6), &[Right]), [7]);
        assert_eq!(press(&mut starting_at(14), &[Left]), [13]);
        assert_eq!(press(&mut starting_at(11), &[Up]), [4]);
        assert_eq!(press(&mut starting_at(11), &[Down]), [18]);
    }

    #[test]
    fn test_seven_rights() {
        let mut grid = starting_at(10);
        assert_eq!(press(&mut grid, &[Right; 7]), [11, 12, 13, 14, 15, 16, 17]);
        assert_eq!(grid.active_day(), Some(17));
    }

    #[test]
    fn test_seven_rights_wrap_month() {
        let mut grid = starting_at(24);
        assert_eq!(press(&mut grid, &[Right; 7]), [25, 26, 27, 28, 29, 30, 1]);
    }

    #[test]
    fn test_random_walk() {
        let mut grid = starting_at(4);
        let keys = [
            Right, Down, Down, Left, Left, Left, Left, Left, Left, Up, Up, Right, Right, Left,
            Right,
        ];
        assert_eq!(
            press(&mut grid, &keys),
            [5, 12, 19, 18, 17, 16, 15, 14, 13, 6, 27, 28, 29, 28, 29]
        );
        assert_eq!(grid.active_day(), Some(29));
    }

    #[test]
    fn test_down_folds_to_first_week() {
        assert_eq!(press(&mut starting_at(25), &[Down]), [4]);
        assert_eq!(press(&mut starting_at(29), &[Down]), [1]);
        // October 2024 has 31 days; the 28th folds back to the 7th
        let mut grid = Grid::new(2024, Month::October);
        assert!(grid.set_active_day(28));
        assert_eq!(press(&mut grid, &[Down]), [7]);
    }

    #[test]
    fn test_up_fold_in_short_month() {
        // February 2026 has exactly four weeks
        let mut grid = Grid::new(2026, Month::February);
        assert!(grid.set_active_day(1));
        assert_eq!(press(&mut grid, &[Up]), [22]);
        assert!(grid.set_active_day(7));
        assert_eq!(press(&mut grid, &[Up]), [28]);
    }

    #[test]
    fn test_up_fold_with_partial_last_week() {
        // The fold lands on the same weekday, so it stays visible even when
        // only part of the week is shown
        let mut grid = september().weekdays(workweek());
        assert!(grid.set_active_day(2));
        assert_eq!(press(&mut grid, &[Up]), [30]);
        assert!(grid.set_active_day(6));
        assert_eq!(press(&mut grid, &[Up]), [27]);
    }

    #[test]
    fn test_workweek_first_right() {
        let mut grid = september().weekdays(workweek());
        assert_eq!(
            grid.navigate(Right),
            Some(ActiveDateChanged {
                date: date!(2024 - 09 - 02)
            })
        );
        assert_eq!(grid.active_date(), Some(date!(2024 - 09 - 02)));
    }

    #[test]
    fn test_workweek_skips_weekends() {
        let mut grid = september().weekdays(workweek());
        assert!(grid.set_active_day(6));
        assert_eq!(press(&mut grid, &[Right, Left, Left]), [9, 6, 5]);
        assert!(grid.set_active_day(30));
        assert_eq!(press(&mut grid, &[Right]), [2]);
        assert_eq!(press(&mut grid, &[Left]), [30]);
    }

    #[test]
    fn test_complex_first_right() {
        let mut grid = Grid::new(2024, Month::October)
            .weekdays(
                Weekdays::empty()
                    .with(Thursday, "R")
                    .with(Friday, "F")
                    .with(Saturday, "S")
                    .with(Sunday, "U"),
            )
            .start_of_week(Tuesday);
        assert_eq!(press(&mut grid, &[Right]), [3]);
    }

    #[test]
    fn test_weekend_first_inputs() {
        let make = || {
            Grid::new(2024, Month::October)
                .weekdays(weekend())
                .start_of_week(Saturday)
        };
        assert_eq!(press(&mut make(), &[Down]), [4]);
        assert_eq!(press(&mut make(), &[Up]), [25]);
        assert_eq!(press(&mut make(), &[Left]), [27]);
        assert_eq!(press(&mut make(), &[Right]), [4]);
    }

    #[test]
    fn test_set_active_day_rejects_invisible() {
        let mut grid = september().weekdays(workweek());
        assert!(!grid.set_active_day(1));
        assert!(!grid.set_active_day(31));
        assert!(!grid.set_active_day(0));
        assert_eq!(grid.active_day(), None);
    }

    #[test]
    fn test_empty_weekdays() {
        let mut grid = september().weekdays(Weekdays::empty());
        for d in [Left, Right, Up, Down] {
            assert_eq!(grid.navigate(d), None);
        }
        assert_eq!(grid.active_day(), None);
        assert!(grid.layout().iter().all(Vec::is_empty));
        assert!(grid.columns().is_empty());
    }

    #[test]
    fn test_upsert_filters_month() {
        let mut grid = september();
        assert_eq!(
            grid.update(Input::Content {
                date: date!(2024 - 09 - 05),
                content: Counter { seen: 1 },
            }),
            []
        );
        grid.upsert(date!(2024 - 10 - 05), Counter { seen: 2 });
        grid.upsert(date!(2023 - 09 - 06), Counter { seen: 3 });
        assert_eq!(grid.content(5), Some(&Counter { seen: 1 }));
        assert_eq!(grid.content(6), None);
        assert_eq!(
            grid.upsert(date!(2024 - 09 - 05), Counter { seen: 4 }),
            Some(Counter { seen: 1 })
        );
    }

    #[test]
    fn test_events_route_to_navigation_or_content() {
        let mut grid = september();
        grid.upsert(date!(2024 - 09 - 20), Counter::default());
        grid.upsert(date!(2024 - 09 - 03), Counter::default());
        let notes = grid.update(Input::Event(Event::Key(Right.key_event())));
        assert_eq!(
            notes,
            [Notification::ActiveDateChanged(ActiveDateChanged {
                date: date!(2024 - 09 - 01)
            })]
        );
        assert_eq!(grid.content(3), Some(&Counter { seen: 0 }));
        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        let notes = grid.update(Input::Event(Event::Key(key)));
        assert_eq!(
            notes,
            [Notification::Content('x'), Notification::Content('x')]
        );
        let notes = grid.update(Input::Event(Event::Resize(80, 24)));
        assert_eq!(notes, []);
        assert_eq!(grid.content(3), Some(&Counter { seen: 2 }));
        assert_eq!(grid.content(20), Some(&Counter { seen: 2 }));
    }

    fn days(rows: &[Vec<GridCell>]) -> Vec<Vec<Option<u8>>> {
        rows.iter()
            .map(|row| row.iter().map(GridCell::day).collect())
            .collect()
    }

    #[test]
    fn test_layout_full_week() {
        let mut grid = september();
        grid.set_active_day(10);
        let rows = grid.layout();
        assert_eq!(rows.len(), 5);
        assert_eq!(days(&rows)[0], [1, 2, 3, 4, 5, 6, 7].map(Some));
        assert_eq!(
            days(&rows)[4],
            [Some(29), Some(30), None, None, None, None, None]
        );
        let active: Vec<_> = rows.iter().flatten().filter(|c| c.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].day(), Some(10));
        assert_eq!(rows[0][0].column, ColumnRole::First);
        assert_eq!(rows[0][3].column, ColumnRole::Middle);
        assert_eq!(rows[0][6].column, ColumnRole::Last);
        for row in &rows[..4] {
            assert!(row.iter().all(|c| c.row == RowRole::Interior));
        }
        assert!(rows[4].iter().all(|c| c.row == RowRole::Bottom));
    }

    #[test]
    fn test_layout_monday_start() {
        let rows = september().start_of_week(Monday).layout();
        assert_eq!(rows.len(), 6);
        assert_eq!(
            days(&rows)[0],
            [None, None, None, None, None, None, Some(1)]
        );
        assert_eq!(rows[0][0].weekday, Monday);
        assert_eq!(rows[0][6].column, ColumnRole::Last);
        assert_eq!(
            days(&rows)[5],
            [Some(30), None, None, None, None, None, None]
        );
    }

    #[test]
    fn test_layout_workweek_drops_leading_sunday() {
        let rows = september().weekdays(workweek()).layout();
        assert_eq!(rows.len(), 5);
        assert_eq!(days(&rows)[0], [2, 3, 4, 5, 6].map(Some));
        assert_eq!(days(&rows)[4], [Some(30), None, None, None, None]);
        assert_eq!(rows[0][0].weekday, Monday);
        assert_eq!(rows[0][0].column, ColumnRole::First);
        assert_eq!(rows[0][4].column, ColumnRole::Last);
    }

    #[test]
    fn test_layout_weekend_saturday_start() {
        // September 2024 starts on a Sunday, so the first row is padded with a
        // blank Saturday
        let rows = september()
            .weekdays(weekend())
            .start_of_week(Saturday)
            .layout();
        assert_eq!(rows[0][0].weekday, Saturday);
        assert_eq!(days(&rows)[0], [None, Some(1), Some(6)]);
        assert_eq!(days(&rows)[1], [7, 8, 13].map(Some));
        assert_eq!(rows[0][1].column, ColumnRole::Middle);
        assert_eq!(rows[0][2].column, ColumnRole::Last);
    }

    #[test]
    fn test_layout_start_of_week_invisible() {
        // Saturday starts the week but is hidden, so Sunday becomes the
        // leftmost column
        let weekdays = Weekdays::empty().with(Sunday, "U").with(Monday, "M");
        let rows = september()
            .weekdays(weekdays)
            .start_of_week(Saturday)
            .layout();
        assert_eq!(rows[0][0].weekday, Sunday);
        assert_eq!(rows[0][0].column, ColumnRole::First);
        assert_eq!(rows[0][1].column, ColumnRole::Last);
        assert_eq!(days(&rows)[0], [1, 2].map(Some));
    }

    #[test]
    fn test_layout_single_column() {
        let weekdays = Weekdays::empty().with(Wednesday, "W");
        let rows = september().weekdays(weekdays).layout();
        assert_eq!(days(&rows), [[Some(4)], [Some(11)], [Some(18)], [Some(25)]]);
        assert!(rows.iter().flatten().all(|c| c.column == ColumnRole::Only));
        assert_eq!(rows[3][0].row, RowRole::Bottom);
    }

    #[test]
    fn test_layout_counts_visible_days_for_every_month() {
        let label_sets = [Weekdays::default(), workweek(), weekend()];
        for weekdays in &label_sets {
            for start in [Sunday, Monday, Wednesday, Saturday] {
                for year in 2022..=2025 {
                    for month in 1..=12u8 {
                        let month = Month::try_from(month).unwrap();
                        let grid = Grid::new(year, month)
                            .weekdays(weekdays.clone())
                            .start_of_week(start);
                        let rows = grid.layout();
                        let visible = (1..=days_in_month(year, month))
                            .filter(|&d| {
                                let date = Date::from_calendar_date(year, month, d).unwrap();
                                weekdays.is_visible(date.weekday())
                            })
                            .count();
                        let placed = rows.iter().flatten().filter(|c| !c.is_blank()).count();
                        assert_eq!(placed, visible, "{month} {year} from {start}");
                        assert!(rows.iter().all(|r| r.len() == weekdays.len()));
                        assert!(rows.len() <= 6);
                    }
                }
            }
        }
    }
}
