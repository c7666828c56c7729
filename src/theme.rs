use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::border::Set;

pub const BASE_STYLE: Style = Style::new();

pub const BORDER_STYLE: Style = Style::new().fg(Color::Gray);

pub const WEEKDAY_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);

pub const NUMBER_STYLE: Style = BASE_STYLE;

pub const ACTIVE_NUMBER_STYLE: Style = Style::new()
    .fg(Color::LightMagenta)
    .add_modifier(Modifier::BOLD)
    .add_modifier(Modifier::UNDERLINED);

pub const ACTIVE_HEADER_STYLE: Style = Style::new()
    .fg(Color::LightMagenta)
    .add_modifier(Modifier::BOLD);

pub const BODY_STYLE: Style = BASE_STYLE;

pub const STATUS_STYLE: Style = Style::new().fg(Color::DarkGray);

/// Colour of the inactive tab and radio indicators
pub const UNFOCUSED_STYLE: Style = Style::new().fg(Color::DarkGray);

pub const ACTIVE_INDICATOR_STYLE: Style = Style::new().fg(Color::LightMagenta);

pub const ACTIVE_TAB_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);

// ╭───┬
// │Sun│
// ├───┼
pub const HEADER_FIRST: Set = Set {
    top_left: "╭",
    top_right: "┬",
    bottom_left: "├",
    bottom_right: "┼",
    vertical_left: "│",
    vertical_right: "│",
    horizontal_top: "─",
    horizontal_bottom: "─",
};

//  ┬───┬
//  │Mon│
//  ┼───┼
pub const HEADER_MIDDLE: Set = Set {
    top_left: "┬",
    top_right: "┬",
    bottom_left: "┼",
    bottom_right: "┼",
    ..HEADER_FIRST
};

//  ┬───╮
//  │Sat│
//  ┼───┤
pub const HEADER_LAST: Set = Set {
    top_left: "┬",
    top_right: "╮",
    bottom_left: "┼",
    bottom_right: "┤",
    ..HEADER_FIRST
};

//  ├───┼
//  │12 │
//  ├───┼
pub const INTERIOR_FIRST: Set = Set {
    top_left: "├",
    top_right: "┼",
    bottom_left: "├",
    bottom_right: "┼",
    ..HEADER_FIRST
};

pub const INTERIOR_MIDDLE: Set = Set {
    top_left: "┼",
    top_right: "┼",
    bottom_left: "┼",
    bottom_right: "┼",
    ..HEADER_FIRST
};

pub const INTERIOR_LAST: Set = Set {
    top_left: "┼",
    top_right: "┤",
    bottom_left: "┼",
    bottom_right: "┤",
    ..HEADER_FIRST
};

//  ├───┼
//  │12 │
//  ╰───┴
pub const BOTTOM_FIRST: Set = Set {
    top_left: "├",
    top_right: "┼",
    bottom_left: "╰",
    bottom_right: "┴",
    ..HEADER_FIRST
};

pub const BOTTOM_MIDDLE: Set = Set {
    top_left: "┼",
    top_right: "┼",
    bottom_left: "┴",
    bottom_right: "┴",
    ..HEADER_FIRST
};

//  ┼───┤
//  │12 │
//  ┴───╯
pub const BOTTOM_LAST: Set = Set {
    top_left: "┼",
    top_right: "┤",
    bottom_left: "┴",
    bottom_right: "╯",
    ..HEADER_FIRST
};
