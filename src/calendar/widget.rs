use super::cell::{ColumnRole, GridCell};
use super::month::MonthGrid;
use super::style::CellStyles;
use super::week::WeekGrid;
use super::DayContent;
use ratatui::{prelude::*, symbols::border::Set};

/// Lines taken up by the top border and labels of the month header
const MONTH_HEADER_LINES: u16 = 2;

/// Lines taken up by the top border, labels, and dates of the week header
const WEEK_HEADER_LINES: u16 = 3;

impl<C: DayContent> MonthGrid<C> {
    /// Width and height of the rendered month
    pub fn size(&self) -> (u16, u16) {
        let styles = self.cell_styles();
        let rows = u16::try_from(self.layout().len()).unwrap_or(u16::MAX);
        let row_height = month_cell_height(styles).saturating_add(1);
        let height = MONTH_HEADER_LINES
            .saturating_add(1)
            .saturating_add(rows.saturating_mul(row_height));
        (grid_width(styles, self.columns().len()), height)
    }
}

impl<C: DayContent> Widget for &MonthGrid<C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let styles = self.cell_styles();
        let columns = self.columns();
        if columns.is_empty() {
            return;
        }
        let mut canvas = BufferCanvas::new(area, buf, styles);
        let weekdays = self.labels();
        let first = weekdays.first_from(self.week_start());
        let last = weekdays.last_before(self.week_start());
        for (x, &wd) in std::iter::zip(column_offsets(styles), &columns) {
            let role = ColumnRole::classify(wd, first, last);
            canvas.draw_frame(x, 1, 1, &styles.header.get(role), true);
            canvas.mvprint(1, x, weekdays.label(wd).unwrap_or_default(), styles.label);
        }
        let height = month_cell_height(styles);
        let mut y = MONTH_HEADER_LINES + 1;
        for row in self.layout() {
            for (x, cell) in std::iter::zip(column_offsets(styles), &row) {
                canvas.draw_cell_frame(x, y, height, cell);
                if let Some(day) = cell.day() {
                    let style = if cell.active {
                        styles.active_number
                    } else {
                        styles.number
                    };
                    canvas.mvprint(y, x, day.to_string(), style);
                    if let Some(content) = self.content(day) {
                        canvas.draw_text(x, y + 1, styles.body_height, &content.render());
                    }
                }
            }
            y = y.saturating_add(height + 1);
        }
    }
}

impl<C: DayContent> WeekGrid<C> {
    /// Width and height of the rendered week
    pub fn size(&self) -> (u16, u16) {
        let styles = &self.week_styles().cells;
        let height = WEEK_HEADER_LINES
            .saturating_add(1)
            .saturating_add(week_body_height(styles))
            .saturating_add(1);
        (grid_width(styles, self.layout().len()), height)
    }
}

impl<C: DayContent> Widget for &WeekGrid<C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let week_styles = self.week_styles();
        let styles = &week_styles.cells;
        let cells = self.layout();
        let mut canvas = BufferCanvas::new(area, buf, styles);
        let weekdays = self.labels();
        let body_height = week_body_height(styles);
        let body_y = WEEK_HEADER_LINES + 1;
        for (x, cell) in std::iter::zip(column_offsets(styles), &cells) {
            let Some(date) = cell.date else {
                continue;
            };
            canvas.draw_frame(x, 1, 2, &styles.header.get(cell.column), true);
            let (label_style, date_style) = if cell.active {
                (week_styles.active_header, week_styles.active_header)
            } else {
                (styles.label, styles.number)
            };
            let label = weekdays.label(cell.weekday).unwrap_or_default();
            canvas.mvprint(1, x, label, label_style);
            canvas.mvprint(2, x, week_styles.date_format.format(date), date_style);
            canvas.draw_cell_frame(x, body_y, body_height, cell);
            if let Some(content) = self.content(date) {
                canvas.draw_text(x, body_y, body_height, &content.render());
            }
        }
    }
}

/// A month cell holds the day number followed by the body
fn month_cell_height(styles: &CellStyles) -> u16 {
    styles.body_height.saturating_add(1)
}

fn week_body_height(styles: &CellStyles) -> u16 {
    styles.body_height.max(1)
}

/// Each column is its content plus a right border, and the first column
/// also has a left border
fn grid_width(styles: &CellStyles, columns: usize) -> u16 {
    if columns == 0 {
        return 0;
    }
    let columns = u16::try_from(columns).unwrap_or(u16::MAX);
    columns
        .saturating_mul(styles.width.saturating_add(1))
        .saturating_add(1)
}

/// X coordinate of the content area of each successive column
fn column_offsets(styles: &CellStyles) -> impl Iterator<Item = u16> {
    let step = styles.width.saturating_add(1);
    std::iter::successors(Some(1u16), move |&x| x.checked_add(step))
}

#[derive(Debug)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
    styles: &'a CellStyles,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer, styles: &'a CellStyles) -> Self {
        Self { area, buf, styles }
    }

    fn draw_cell_frame(&mut self, x: u16, y: u16, height: u16, cell: &GridCell) {
        let set = self.styles.row_borders(cell.row).get(cell.column);
        self.draw_frame(x, y, height, &set, false);
    }

    /// Draws the frame around the content area whose top-left corner is
    /// (`x`, `y`).  Only the leftmost column draws a left edge; every other
    /// column shares the right edge of its neighbour.
    fn draw_frame(&mut self, x: u16, y: u16, height: u16, set: &Set, top: bool) {
        let width = self.styles.width;
        let left = x.checked_sub(1).filter(|&lx| lx == 0);
        let right = x.saturating_add(width);
        let style = self.styles.border;
        if let Some(top_y) = y.checked_sub(1).filter(|_| top) {
            if let Some(lx) = left {
                self.mvaddch(top_y, lx, set.top_left, style);
            }
            self.hline(top_y, x, set.horizontal_top, width, style);
            self.mvaddch(top_y, right, set.top_right, style);
        }
        for line in y..y.saturating_add(height) {
            if let Some(lx) = left {
                self.mvaddch(line, lx, set.vertical_left, style);
            }
            self.mvaddch(line, right, set.vertical_right, style);
        }
        let bottom_y = y.saturating_add(height);
        if let Some(lx) = left {
            self.mvaddch(bottom_y, lx, set.bottom_left, style);
        }
        self.hline(bottom_y, x, set.horizontal_bottom, width, style);
        self.mvaddch(bottom_y, right, set.bottom_right, style);
    }

    fn draw_text(&mut self, x: u16, y: u16, height: u16, text: &Text<'_>) {
        for (line, ty) in std::iter::zip(&text.lines, y..y.saturating_add(height)) {
            if ty < self.area.height && x < self.area.width {
                let width = self.styles.width.min(self.area.width - x);
                let line = line.clone().patch_style(self.styles.body);
                self.buf
                    .set_line(x + self.area.x, ty + self.area.y, &line, width);
            }
        }
    }

    fn mvaddch(&mut self, y: u16, x: u16, symbol: &str, style: Style) {
        if y < self.area.height && x < self.area.width {
            if let Some(cell) = self.buf.cell_mut((x + self.area.x, y + self.area.y)) {
                cell.set_symbol(symbol).set_style(style);
            }
        }
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        if y < self.area.height && x < self.area.width {
            let width = self.styles.width.min(self.area.width - x);
            self.buf.set_stringn(
                x + self.area.x,
                y + self.area.y,
                s.as_ref(),
                usize::from(width),
                style,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, symbol: &str, length: u16, style: Style) {
        for i in 0..length {
            self.mvaddch(y, x.saturating_add(i), symbol, style);
        }
    }
}
