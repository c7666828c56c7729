use std::array;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::{Date, Weekday, Weekday::*};

pub(crate) const DAYS_IN_WEEK: usize = 7;

/// All weekdays in days-from-Sunday order
pub(crate) const WEEKDAYS: [Weekday; DAYS_IN_WEEK] = [
    Sunday, Monday, Tuesday, Wednesday, Thursday, Friday, Saturday,
];

pub(crate) trait WeekdayExt {
    fn index0(&self) -> usize;

    /// Returns the weekday `n` days after `self`
    fn plus(&self, n: usize) -> Weekday;

    /// Number of days forward from `self` to the next occurrence of `other`,
    /// in `0..7`
    fn days_until(&self, other: Weekday) -> usize;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> usize {
        self.number_days_from_sunday().into()
    }

    fn plus(&self, n: usize) -> Weekday {
        WEEKDAYS[(self.index0() + n) % DAYS_IN_WEEK]
    }

    fn days_until(&self, other: Weekday) -> usize {
        (other.index0() + DAYS_IN_WEEK - self.index0()) % DAYS_IN_WEEK
    }
}

/// A mapping from weekday to display label.
///
/// A weekday without a label is not visible: it is never placed in a grid and
/// is never a navigation target.  An empty label still marks its weekday as
/// visible.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Weekdays([Option<String>; DAYS_IN_WEEK]);

impl Weekdays {
    /// A label set with no visible weekdays
    pub fn empty() -> Weekdays {
        Weekdays(array::from_fn(|_| None))
    }

    /// Single-letter labels: `U M T W R F S`
    pub fn short() -> Weekdays {
        WEEKDAYS
            .into_iter()
            .zip(["U", "M", "T", "W", "R", "F", "S"])
            .collect()
    }

    pub fn with<S: Into<String>>(mut self, weekday: Weekday, label: S) -> Weekdays {
        self.insert(weekday, label);
        self
    }

    pub fn insert<S: Into<String>>(&mut self, weekday: Weekday, label: S) {
        self.0[weekday.index0()] = Some(label.into());
    }

    pub fn remove(&mut self, weekday: Weekday) -> Option<String> {
        self.0[weekday.index0()].take()
    }

    pub fn is_visible(&self, weekday: Weekday) -> bool {
        self.0[weekday.index0()].is_some()
    }

    pub fn label(&self, weekday: Weekday) -> Option<&str> {
        self.0[weekday.index0()].as_deref()
    }

    /// Number of visible weekdays
    pub fn len(&self) -> usize {
        self.0.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    /// Iterates over the visible weekdays and their labels, starting from
    /// Sunday
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &str)> + '_ {
        WEEKDAYS
            .into_iter()
            .zip(&self.0)
            .filter_map(|(wd, label)| label.as_deref().map(|s| (wd, s)))
    }

    /// The visible weekdays in column order for a week starting on `start`
    pub fn columns(&self, start: Weekday) -> Vec<Weekday> {
        (0..DAYS_IN_WEEK)
            .map(|i| start.plus(i))
            .filter(|&wd| self.is_visible(wd))
            .collect()
    }

    /// Returns the first visible weekday at or after `weekday`, checking at
    /// most seven candidates
    pub fn first_from(&self, weekday: Weekday) -> Option<Weekday> {
        (0..DAYS_IN_WEEK)
            .map(|i| weekday.plus(i))
            .find(|&wd| self.is_visible(wd))
    }

    /// Returns the nearest visible weekday strictly before `weekday`, checking
    /// at most six candidates.  `weekday` itself is never returned.
    pub fn last_before(&self, weekday: Weekday) -> Option<Weekday> {
        (1..DAYS_IN_WEEK)
            .map(|i| weekday.plus(DAYS_IN_WEEK - i))
            .find(|&wd| self.is_visible(wd))
    }

    /// The first visible weekday on or after `date`'s weekday
    pub fn first(&self, date: Date) -> Option<Weekday> {
        self.first_from(date.weekday())
    }

    /// The nearest visible weekday strictly before `date`'s weekday
    pub fn last(&self, date: Date) -> Option<Weekday> {
        self.last_before(date.weekday())
    }

    /// Equivalent to `first` applied to the day after `date`
    pub fn next(&self, date: Date) -> Option<Weekday> {
        self.first_from(date.weekday().next())
    }

    /// Equivalent to `last`
    pub fn previous(&self, date: Date) -> Option<Weekday> {
        self.last(date)
    }
}

impl Default for Weekdays {
    /// Three-letter English labels for all seven days
    fn default() -> Weekdays {
        WEEKDAYS
            .into_iter()
            .zip(["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"])
            .collect()
    }
}

impl<S: Into<String>> FromIterator<(Weekday, S)> for Weekdays {
    fn from_iter<I: IntoIterator<Item = (Weekday, S)>>(iter: I) -> Weekdays {
        let mut weekdays = Weekdays::empty();
        for (wd, label) in iter {
            weekdays.insert(wd, label);
        }
        weekdays
    }
}

/// Parses a comma-separated list of weekday names, each labelled with its
/// default three-letter abbreviation
impl FromStr for Weekdays {
    type Err = ParseWeekdayError;

    fn from_str(s: &str) -> Result<Weekdays, ParseWeekdayError> {
        let defaults = Weekdays::default();
        let mut weekdays = Weekdays::empty();
        for name in s.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            let wd = parse_weekday(name)?;
            weekdays.insert(wd, defaults.label(wd).unwrap_or_default());
        }
        Ok(weekdays)
    }
}

impl fmt::Display for Weekdays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (wd, _) in self.iter() {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{wd}")?;
            first = false;
        }
        Ok(())
    }
}

/// Parses an English weekday name, either in full or abbreviated to at least
/// its first two letters, case-insensitively
pub fn parse_weekday(s: &str) -> Result<Weekday, ParseWeekdayError> {
    let lower = s.trim().to_ascii_lowercase();
    if lower.len() >= 2 {
        if let Some(wd) = WEEKDAYS
            .into_iter()
            .find(|wd| wd.to_string().to_ascii_lowercase().starts_with(&lower))
        {
            return Ok(wd);
        }
    }
    Err(ParseWeekdayError(s.to_owned()))
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid weekday name: {0:?}")]
pub struct ParseWeekdayError(String);
