use time::{Date, Weekday};

/// Horizontal position of a cell within its row, which selects the border
/// variant drawn around it
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ColumnRole {
    First,
    Middle,
    Last,
    /// The only visible column, bordered on both sides
    Only,
}

impl ColumnRole {
    /// Classifies `weekday` against the first and last visible weekdays of a
    /// row
    pub fn classify(weekday: Weekday, first: Option<Weekday>, last: Option<Weekday>) -> ColumnRole {
        if Some(weekday) == first && first == last {
            ColumnRole::Only
        } else if Some(weekday) == first {
            ColumnRole::First
        } else if Some(weekday) == last {
            ColumnRole::Last
        } else {
            ColumnRole::Middle
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RowRole {
    Interior,
    Bottom,
}

/// One slot of a laid-out grid.  Computed fresh for every render.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct GridCell {
    pub weekday: Weekday,
    /// `None` for the padding cells before the first and after the last day
    /// of a month
    pub date: Option<Date>,
    pub active: bool,
    pub column: ColumnRole,
    pub row: RowRole,
}

impl GridCell {
    pub(crate) fn blank(weekday: Weekday) -> GridCell {
        GridCell {
            weekday,
            date: None,
            active: false,
            column: ColumnRole::Middle,
            row: RowRole::Interior,
        }
    }

    pub(crate) fn dated(date: Date, active: bool) -> GridCell {
        GridCell {
            date: Some(date),
            active,
            ..GridCell::blank(date.weekday())
        }
    }

    pub fn day(&self) -> Option<u8> {
        self.date.map(|d| d.day())
    }

    pub fn is_blank(&self) -> bool {
        self.date.is_none()
    }
}
