//! A group of mutually exclusive buttons, exactly one of which is selected
use crate::calendar::Direction;
use crate::component::Component;
use crate::theme;
use crossterm::event::{Event, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span, Text},
    widgets::Widget,
};

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Orientation {
    /// Buttons sit on one line and are navigated with Left and Right
    #[default]
    Horizontal,
    /// One button per line, navigated with Up and Down
    Vertical,
}

/// Emitted when the selected button changes
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct RadioSelected {
    pub index: usize,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RadioStyles {
    pub symbol: &'static str,
    pub active_symbol: &'static str,
    pub indicator: Style,
    pub active_indicator: Style,
    pub label: Style,
    pub active_label: Style,
    /// Columns between buttons in a horizontal group
    pub spacing: u16,
}

impl Default for RadioStyles {
    fn default() -> RadioStyles {
        RadioStyles {
            symbol: "○",
            active_symbol: "●",
            indicator: theme::UNFOCUSED_STYLE,
            active_indicator: theme::ACTIVE_INDICATOR_STYLE,
            label: theme::BASE_STYLE,
            active_label: theme::BASE_STYLE,
            spacing: 2,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RadioGroup {
    labels: Vec<String>,
    active: usize,
    orientation: Orientation,
    wraparound: bool,
    styles: RadioStyles,
}

impl RadioGroup {
    /// Creates a group with the first button selected
    pub fn new<I, S>(orientation: Orientation, labels: I) -> RadioGroup
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RadioGroup {
            labels: labels.into_iter().map(Into::into).collect(),
            active: 0,
            orientation,
            wraparound: false,
            styles: RadioStyles::default(),
        }
    }

    pub fn wraparound(mut self, wraparound: bool) -> RadioGroup {
        self.wraparound = wraparound;
        self
    }

    pub fn styles(mut self, styles: RadioStyles) -> RadioGroup {
        self.styles = styles;
        self
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn active_label(&self) -> Option<&str> {
        self.labels.get(self.active).map(String::as_str)
    }

    /// Selects button `index`, clamped to the last button
    pub fn set_button(&mut self, index: usize) {
        self.active = index.min(self.labels.len().saturating_sub(1));
    }

    pub fn next_button(&mut self) {
        let i = self.active.saturating_add(1);
        if i >= self.labels.len() && self.wraparound {
            self.set_button(0);
        } else {
            self.set_button(i);
        }
    }

    pub fn previous_button(&mut self) {
        match self.active.checked_sub(1) {
            Some(i) => self.set_button(i),
            None if self.wraparound => self.set_button(self.labels.len().saturating_sub(1)),
            None => self.set_button(0),
        }
    }

    pub fn update(&mut self, key: &KeyEvent) -> Option<RadioSelected> {
        let before = self.active;
        match (self.orientation, Direction::from_key(key)?) {
            (Orientation::Horizontal, Direction::Left) | (Orientation::Vertical, Direction::Up) => {
                self.previous_button();
            }
            (Orientation::Horizontal, Direction::Right)
            | (Orientation::Vertical, Direction::Down) => self.next_button(),
            _ => return None,
        }
        (self.active != before).then_some(RadioSelected { index: self.active })
    }

    fn button(&self, index: usize, label: &str) -> Vec<Span<'static>> {
        let (symbol, indicator, label_style) = if index == self.active {
            (
                self.styles.active_symbol,
                self.styles.active_indicator,
                self.styles.active_label,
            )
        } else {
            (self.styles.symbol, self.styles.indicator, self.styles.label)
        };
        let mut spans = Vec::with_capacity(3);
        if !symbol.is_empty() {
            spans.push(Span::styled(symbol, indicator));
            spans.push(Span::raw(" "));
        }
        if !label.is_empty() {
            spans.push(Span::styled(label.to_owned(), label_style));
        }
        spans
    }

    pub fn to_text(&self) -> Text<'static> {
        let buttons = self
            .labels
            .iter()
            .enumerate()
            .map(|(i, label)| self.button(i, label));
        match self.orientation {
            Orientation::Horizontal => {
                let gap = " ".repeat(usize::from(self.styles.spacing));
                let mut spans = Vec::new();
                for (i, button) in buttons.enumerate() {
                    if i > 0 {
                        spans.push(Span::raw(gap.clone()));
                    }
                    spans.extend(button);
                }
                Text::from(Line::from(spans))
            }
            Orientation::Vertical => Text::from(buttons.map(Line::from).collect::<Vec<_>>()),
        }
    }
}

impl Component for RadioGroup {
    type Effect = RadioSelected;

    fn handle_event(&mut self, event: &Event) -> Vec<RadioSelected> {
        match event {
            Event::Key(key) => self.update(key).into_iter().collect(),
            _ => Vec::new(),
        }
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        self.to_text().render(area, buf);
    }
}
