//! Popup listing the demo's key bindings
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Padding, Paragraph, Widget},
};

/// Tab-switching digits stop at 9
const MAX_DIGIT_TABS: usize = 9;

/// Keys that do the same thing everywhere, shown in this order after the
/// digit binding
static FIXED_BINDINGS: &[(&str, &str)] = &[
    ("?", "Show this help"),
    ("q, ESC", "Quit"),
    ("CTRL+C", "Quit, even from this help"),
];

static MOVE_BINDINGS: &[(&str, &str)] = &[
    ("LEFT, RIGHT", "Move to the previous or next day"),
    ("UP, DOWN", "Move up or down a week, or pick a setting"),
    ("TAB, SHIFT+TAB", "Switch to the next or previous tab"),
    ("CTRL+RIGHT, CTRL+LEFT", "Same as TAB and SHIFT+TAB"),
];

const DISMISS: &str = "Press any key to dismiss.";

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help {
    style: Style,
    bindings: Vec<(String, &'static str)>,
}

impl Help {
    /// Lists the bindings for a tab bar with `tab_count` tabs
    pub(crate) fn new(style: Style, tab_count: usize) -> Help {
        let owned = |&(keys, action): &(&str, &'static str)| (keys.to_owned(), action);
        let mut bindings = MOVE_BINDINGS.iter().map(owned).collect::<Vec<_>>();
        let digits = (1..=tab_count.min(MAX_DIGIT_TABS))
            .map(|i| i.to_string())
            .collect::<Vec<_>>();
        if !digits.is_empty() {
            bindings.push((digits.join(", "), "Switch to the numbered tab"));
        }
        bindings.extend(FIXED_BINDINGS.iter().map(owned));
        Help { style, bindings }
    }

    fn to_text(&self) -> Text<'static> {
        let key_width = self
            .bindings
            .iter()
            .map(|(keys, _)| Span::raw(keys.as_str()).width())
            .max()
            .unwrap_or_default();
        let key_style = self.style.add_modifier(Modifier::BOLD);
        let mut lines = self
            .bindings
            .iter()
            .map(|(keys, action)| {
                Line::from(vec![
                    Span::styled(format!("{keys:<key_width$}  "), key_style),
                    Span::raw(*action),
                ])
            })
            .collect::<Vec<_>>();
        lines.push(Line::default());
        lines.push(Line::raw(DISMISS));
        Text::from(lines)
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = self.to_text();
        // Two columns of border plus one of padding on each side
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .saturating_add(4)
            .min(area.width);
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.height);
        let [popup] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [popup] = Layout::vertical([height]).flex(Flex::Center).areas(popup);
        let block = Block::bordered()
            .title(" Keys ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        Clear.render(popup, buf);
        Paragraph::new(text)
            .block(block)
            .style(self.style)
            .render(popup, buf);
    }
}
