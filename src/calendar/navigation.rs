//! Date-level navigation over a set of visible weekdays.
//!
//! These functions know nothing about months or weeks; the grids clamp and
//! wrap their results to their own boundaries.
use super::weekdays::{WeekdayExt, Weekdays, DAYS_IN_WEEK};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use time::{Date, Duration};

/// Directional input understood by the calendar grids
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Maps an unmodified arrow-key press to a direction
    pub fn from_key(key: &KeyEvent) -> Option<Direction> {
        if key.kind == KeyEventKind::Release || !key.modifiers.is_empty() {
            return None;
        }
        match key.code {
            KeyCode::Left => Some(Direction::Left),
            KeyCode::Right => Some(Direction::Right),
            KeyCode::Up => Some(Direction::Up),
            KeyCode::Down => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn key_event(self) -> KeyEvent {
        let code = match self {
            Direction::Left => KeyCode::Left,
            Direction::Right => KeyCode::Right,
            Direction::Up => KeyCode::Up,
            Direction::Down => KeyCode::Down,
        };
        KeyEvent::new(code, KeyModifiers::NONE)
    }
}

pub(crate) fn add_days(date: Date, days: usize) -> Option<Date> {
    let days = i64::try_from(days).ok()?;
    date.checked_add(Duration::days(days))
}

pub(crate) fn sub_days(date: Date, days: usize) -> Option<Date> {
    let days = i64::try_from(days).ok()?;
    date.checked_sub(Duration::days(days))
}

/// The first visible date on or after `date`
pub(crate) fn first_on_or_after(weekdays: &Weekdays, date: Date) -> Option<Date> {
    let wd = weekdays.first(date)?;
    add_days(date, date.weekday().days_until(wd))
}

/// The last visible date on or before `date`
pub(crate) fn last_on_or_before(weekdays: &Weekdays, date: Date) -> Option<Date> {
    if weekdays.is_visible(date.weekday()) {
        Some(date)
    } else {
        previous_before(weekdays, date)
    }
}

/// The first visible date strictly after `date`, at most one week later
pub(crate) fn next_after(weekdays: &Weekdays, date: Date) -> Option<Date> {
    let wd = weekdays.next(date)?;
    let offset = match date.weekday().days_until(wd) {
        0 => DAYS_IN_WEEK,
        n => n,
    };
    add_days(date, offset)
}

/// The nearest visible date strictly before `date`, at most one week earlier.
///
/// `Weekdays::previous` never returns `date`'s own weekday, so when that is
/// the only visible weekday the result is exactly one week back.
pub(crate) fn previous_before(weekdays: &Weekdays, date: Date) -> Option<Date> {
    match weekdays.previous(date) {
        Some(wd) => sub_days(date, wd.days_until(date.weekday())),
        None if weekdays.is_visible(date.weekday()) => sub_days(date, DAYS_IN_WEEK),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{macros::date, Weekday::*};

    fn workweek() -> Weekdays {
        [Monday, Tuesday, Wednesday, Thursday, Friday]
            .into_iter()
            .zip(["M", "T", "W", "R", "F"])
            .collect()
    }

    #[test]
    fn test_next_after_skips_weekend() {
        let weekdays = workweek();
        assert_eq!(
            next_after(&weekdays, date!(2024 - 09 - 06)),
            Some(date!(2024 - 09 - 09))
        );
        assert_eq!(
            next_after(&weekdays, date!(2024 - 09 - 07)),
            Some(date!(2024 - 09 - 09))
        );
        assert_eq!(
            next_after(&weekdays, date!(2024 - 09 - 03)),
            Some(date!(2024 - 09 - 04))
        );
    }

    #[test]
    fn test_previous_before_skips_weekend() {
        let weekdays = workweek();
        assert_eq!(
            previous_before(&weekdays, date!(2024 - 09 - 09)),
            Some(date!(2024 - 09 - 06))
        );
        assert_eq!(
            previous_before(&weekdays, date!(2024 - 09 - 08)),
            Some(date!(2024 - 09 - 06))
        );
    }

    #[test]
    fn test_single_weekday_steps_whole_weeks() {
        let weekdays = Weekdays::empty().with(Monday, "M");
        let d = date!(2024 - 09 - 16);
        assert_eq!(next_after(&weekdays, d), Some(date!(2024 - 09 - 23)));
        assert_eq!(previous_before(&weekdays, d), Some(date!(2024 - 09 - 09)));
    }

    #[test]
    fn test_round_trip_lands_on_first() {
        let sets = [workweek(), Weekdays::default(), Weekdays::short()];
        for weekdays in &sets {
            let mut d = date!(2024 - 09 - 01);
            for _ in 0..14 {
                if weekdays.is_visible(d.weekday()) {
                    let back = previous_before(weekdays, d).unwrap();
                    assert_eq!(next_after(weekdays, back), Some(d));
                    assert_eq!(first_on_or_after(weekdays, d), Some(d));
                }
                d = d.next_day().unwrap();
            }
        }
    }

    #[test]
    fn test_empty_set() {
        let weekdays = Weekdays::empty();
        let d = date!(2024 - 09 - 16);
        assert_eq!(first_on_or_after(&weekdays, d), None);
        assert_eq!(last_on_or_before(&weekdays, d), None);
        assert_eq!(next_after(&weekdays, d), None);
        assert_eq!(previous_before(&weekdays, d), None);
    }

    #[test]
    fn test_direction_from_key() {
        assert_eq!(
            Direction::from_key(&KeyEvent::new(KeyCode::Up, KeyModifiers::NONE)),
            Some(Direction::Up)
        );
        assert_eq!(
            Direction::from_key(&KeyEvent::new(KeyCode::Left, KeyModifiers::CONTROL)),
            None
        );
        assert_eq!(
            Direction::from_key(&KeyEvent::new(KeyCode::Char('l'), KeyModifiers::NONE)),
            None
        );
        assert_eq!(
            Direction::from_key(&Direction::Down.key_event()),
            Some(Direction::Down)
        );
    }
}
