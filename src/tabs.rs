//! A row of titled tabs above the body of whichever tab is active
use crate::component::Component;
use crate::theme;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
};

/// Digit keys `1` through this number jump straight to a tab
const MAX_NUMBERED_TABS: usize = 9;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tab<C> {
    title: String,
    child: C,
}

impl<C> Tab<C> {
    pub fn new<S: Into<String>>(title: S, child: C) -> Tab<C> {
        Tab {
            title: title.into(),
            child,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn child(&self) -> &C {
        &self.child
    }

    pub fn child_mut(&mut self) -> &mut C {
        &mut self.child
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TabStyles {
    pub tab: Style,
    pub active_tab: Style,
    pub indicator: Style,
    pub indicator_left: &'static str,
    pub indicator_right: &'static str,
    pub separator: &'static str,
    pub border: Style,
}

impl Default for TabStyles {
    fn default() -> TabStyles {
        TabStyles {
            tab: theme::UNFOCUSED_STYLE,
            active_tab: theme::ACTIVE_TAB_STYLE,
            indicator: theme::ACTIVE_INDICATOR_STYLE,
            indicator_left: "=",
            indicator_right: "=",
            separator: "│",
            border: theme::BORDER_STYLE,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TabsNotification<E> {
    TabChanged { index: usize },
    Child(E),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tabs<C> {
    pages: Vec<Tab<C>>,
    active: usize,
    wraparound: bool,
    width: u16,
    height: u16,
    styles: TabStyles,
}

impl<C> Tabs<C> {
    pub fn new(tabs: Vec<Tab<C>>) -> Tabs<C> {
        Tabs {
            pages: tabs,
            active: 0,
            wraparound: false,
            width: 0,
            height: 0,
            styles: TabStyles::default(),
        }
    }

    pub fn wraparound(mut self, wraparound: bool) -> Tabs<C> {
        self.wraparound = wraparound;
        self
    }

    pub fn styles(mut self, styles: TabStyles) -> Tabs<C> {
        self.styles = styles;
        self
    }

    pub fn width(mut self, width: u16) -> Tabs<C> {
        self.width = width;
        self
    }

    pub fn height(mut self, height: u16) -> Tabs<C> {
        self.height = height;
        self
    }

    pub fn body_width(&self) -> u16 {
        self.width
    }

    pub fn body_height(&self) -> u16 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn tabs(&self) -> &[Tab<C>] {
        &self.pages
    }

    pub fn active_tab(&self) -> Option<&Tab<C>> {
        self.pages.get(self.active)
    }

    pub fn active_child_mut(&mut self) -> Option<&mut C> {
        self.pages.get_mut(self.active).map(Tab::child_mut)
    }

    pub fn children_mut(&mut self) -> impl Iterator<Item = &mut C> {
        self.pages.iter_mut().map(Tab::child_mut)
    }

    /// Activates tab `index`, clamped to the last tab
    pub fn set_tab(&mut self, index: usize) {
        self.active = index.min(self.pages.len().saturating_sub(1));
    }

    pub fn next_tab(&mut self) {
        let i = self.active.saturating_add(1);
        if i >= self.pages.len() && self.wraparound {
            self.set_tab(0);
        } else {
            self.set_tab(i);
        }
    }

    pub fn previous_tab(&mut self) {
        match self.active.checked_sub(1) {
            Some(i) => self.set_tab(i),
            None if self.wraparound => self.set_tab(self.pages.len().saturating_sub(1)),
            None => self.set_tab(0),
        }
    }

    /// Applies a tab-switching key.  Returns `false` if `key` is not one.
    fn switch_tab(&mut self, key: &KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::BackTab, _) | (KeyCode::Left, KeyModifiers::CONTROL) => self.previous_tab(),
            (KeyCode::Tab, KeyModifiers::NONE) | (KeyCode::Right, KeyModifiers::CONTROL) => {
                self.next_tab();
            }
            (KeyCode::Char(c), KeyModifiers::NONE) => {
                let Some(n) = c.to_digit(10).and_then(|n| usize::try_from(n).ok()) else {
                    return false;
                };
                if n == 0 || n > MAX_NUMBERED_TABS || n > self.pages.len() {
                    return false;
                }
                self.set_tab(n - 1);
            }
            _ => return false,
        }
        true
    }

    fn header(&self) -> Line<'static> {
        let pad = |s: &str| " ".repeat(Span::raw(s).width());
        let styles = &self.styles;
        let mut spans = Vec::new();
        for (i, tab) in self.pages.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(styles.separator, styles.border));
            }
            let title = format!(" {} ", tab.title);
            if i == self.active {
                spans.push(Span::styled(styles.indicator_left, styles.indicator));
                spans.push(Span::styled(title, styles.active_tab));
                spans.push(Span::styled(styles.indicator_right, styles.indicator));
            } else {
                spans.push(Span::raw(pad(styles.indicator_left)));
                spans.push(Span::styled(title, styles.tab));
                spans.push(Span::raw(pad(styles.indicator_right)));
            }
        }
        Line::from(spans)
    }
}

impl<C: Component> Tabs<C> {
    /// Tab-switching keys are consumed here.  Other key events go to the
    /// active child only, and every other event goes to all children.
    pub fn update(&mut self, event: &Event) -> Vec<TabsNotification<C::Effect>> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                let before = self.active;
                if self.switch_tab(key) {
                    return if self.active != before {
                        log::debug!("switched to tab {}", self.active);
                        vec![TabsNotification::TabChanged { index: self.active }]
                    } else {
                        Vec::new()
                    };
                }
                match self.active_child_mut() {
                    Some(child) => child
                        .handle_event(event)
                        .into_iter()
                        .map(TabsNotification::Child)
                        .collect(),
                    None => Vec::new(),
                }
            }
            Event::Key(_) => Vec::new(),
            _ => {
                if let Event::Resize(width, height) = *event {
                    self.width = width.saturating_sub(2);
                    self.height = height;
                }
                self.children_mut()
                    .flat_map(|child| child.handle_event(event))
                    .map(TabsNotification::Child)
                    .collect()
            }
        }
    }
}

impl<C: Component> Component for Tabs<C> {
    type Effect = TabsNotification<C::Effect>;

    fn handle_event(&mut self, event: &Event) -> Vec<Self::Effect> {
        self.update(event)
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        let [header_area, body_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);
        self.header().render(header_area, buf);
        let block = Block::bordered().border_style(self.styles.border);
        let inner = block.inner(body_area);
        block.render(body_area, buf);
        if let Some(tab) = self.active_tab() {
            tab.child.render(inner, buf);
        }
    }
}
