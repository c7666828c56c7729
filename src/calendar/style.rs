use super::cell::{ColumnRole, RowRole};
use crate::theme;
use ratatui::style::Style;
use ratatui::symbols::border::Set;
use thiserror::Error;
use time::error::InvalidFormatDescription;
use time::format_description::{self, BorrowedFormatItem, OwnedFormatItem};
use time::{macros::format_description, Date};

static DEFAULT_DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[month]/[day]");

/// Border variants for the first, middle, and last column of a row
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BorderSets {
    pub first: Set,
    pub middle: Set,
    pub last: Set,
}

impl BorderSets {
    /// The border set for a column.  A lone column takes its left side from
    /// `first` and its right side from `last`.
    pub fn get(&self, role: ColumnRole) -> Set {
        match role {
            ColumnRole::First => self.first,
            ColumnRole::Middle => self.middle,
            ColumnRole::Last => self.last,
            ColumnRole::Only => Set {
                top_right: self.last.top_right,
                vertical_right: self.last.vertical_right,
                bottom_right: self.last.bottom_right,
                ..self.first
            },
        }
    }
}

/// Dimensions, styles, and border tables for calendar cells
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CellStyles {
    /// Width of a cell's content, not counting borders
    pub width: u16,
    /// Lines of per-date content drawn beneath the day number
    pub body_height: u16,
    pub label: Style,
    pub number: Style,
    pub active_number: Style,
    pub body: Style,
    pub border: Style,
    pub header: BorderSets,
    pub interior: BorderSets,
    pub bottom: BorderSets,
}

impl CellStyles {
    pub fn row_borders(&self, role: RowRole) -> &BorderSets {
        match role {
            RowRole::Interior => &self.interior,
            RowRole::Bottom => &self.bottom,
        }
    }

    pub fn width(mut self, width: u16) -> CellStyles {
        self.width = width;
        self
    }

    pub fn body_height(mut self, body_height: u16) -> CellStyles {
        self.body_height = body_height;
        self
    }

    /// The same dimensions and borders with every style reset to the
    /// terminal default
    pub fn unstyled(self) -> CellStyles {
        CellStyles {
            label: Style::new(),
            number: Style::new(),
            active_number: Style::new(),
            body: Style::new(),
            border: Style::new(),
            ..self
        }
    }
}

impl Default for CellStyles {
    fn default() -> CellStyles {
        CellStyles {
            // Default weekday labels are three characters, plus one column of
            // padding on either side
            width: 5,
            body_height: 1,
            label: theme::WEEKDAY_STYLE,
            number: theme::NUMBER_STYLE,
            active_number: theme::ACTIVE_NUMBER_STYLE,
            body: theme::BODY_STYLE,
            border: theme::BORDER_STYLE,
            header: BorderSets {
                first: theme::HEADER_FIRST,
                middle: theme::HEADER_MIDDLE,
                last: theme::HEADER_LAST,
            },
            interior: BorderSets {
                first: theme::INTERIOR_FIRST,
                middle: theme::INTERIOR_MIDDLE,
                last: theme::INTERIOR_LAST,
            },
            bottom: BorderSets {
                first: theme::BOTTOM_FIRST,
                middle: theme::BOTTOM_MIDDLE,
                last: theme::BOTTOM_LAST,
            },
        }
    }
}

/// A runtime-parsed `time` format description for the dates shown in week
/// headers
#[derive(Clone, Debug)]
pub struct DateFormat {
    source: String,
    items: OwnedFormatItem,
}

impl DateFormat {
    pub fn parse(s: &str) -> Result<DateFormat, InvalidDateFormat> {
        let items = match format_description::parse_owned::<2>(s) {
            Ok(items) => items,
            Err(source) => {
                return Err(InvalidDateFormat {
                    format: s.to_owned(),
                    source,
                })
            }
        };
        Ok(DateFormat {
            source: s.to_owned(),
            items,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Formats `date`, or returns an empty string if the description asks for
    /// components a date does not have
    pub fn format(&self, date: Date) -> String {
        date.format(&self.items).unwrap_or_else(|e| {
            log::warn!("could not format {date} with {:?}: {e}", self.source);
            String::new()
        })
    }
}

impl PartialEq for DateFormat {
    fn eq(&self, other: &DateFormat) -> bool {
        self.source == other.source
    }
}

impl Eq for DateFormat {}

impl Default for DateFormat {
    fn default() -> DateFormat {
        DateFormat {
            source: String::from("[month]/[day]"),
            items: OwnedFormatItem::from(DEFAULT_DATE_FORMAT),
        }
    }
}

#[derive(Debug, Error)]
#[error("invalid date format {format:?}")]
pub struct InvalidDateFormat {
    format: String,
    source: InvalidFormatDescription,
}

/// Styling for the week grid: cell styles plus header extras
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WeekStyles {
    pub cells: CellStyles,
    pub active_header: Style,
    pub date_format: DateFormat,
}

impl Default for WeekStyles {
    fn default() -> WeekStyles {
        WeekStyles {
            cells: CellStyles::default(),
            active_header: theme::ACTIVE_HEADER_STYLE,
            date_format: DateFormat::default(),
        }
    }
}
