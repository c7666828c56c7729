use crate::help::Help;
use crossterm::event::{read, Event, KeyCode, KeyEvent, KeyModifiers};
use gridcal::calendar::{MonthGrid, Notification, WeekGrid, Weekdays};
use gridcal::radio::{Orientation, RadioGroup};
use gridcal::tabs::{Tab, Tabs, TabsNotification};
use gridcal::theme::{BASE_STYLE, STATUS_STYLE};
use gridcal::Component;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::Widget,
    DefaultTerminal,
};
use std::convert::Infallible;
use std::io;
use time::{Date, Duration, Weekday};

/// Choices offered on the settings tab
static START_CHOICES: [Weekday; 3] = [Weekday::Sunday, Weekday::Monday, Weekday::Saturday];

const TODAY_MARKER: &str = "today";

const MONTH_TAB: usize = 0;
const WEEK_TAB: usize = 1;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Options {
    pub(crate) date: Date,
    pub(crate) start_of_week: Weekday,
    pub(crate) weekdays: Weekdays,
    pub(crate) week_tab: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App {
    tabs: Tabs<Pane>,
    status: Option<Date>,
    state: AppState,
}

impl App {
    pub(crate) fn new(today: Date, opts: Options) -> App {
        let mut month = MonthGrid::new(opts.date.year(), opts.date.month())
            .start_of_week(opts.start_of_week)
            .weekdays(opts.weekdays.clone());
        month.upsert(today, String::from(TODAY_MARKER));
        month.set_active_day(opts.date.day());
        let mut week = week_containing(opts.date, opts.start_of_week).weekdays(opts.weekdays);
        week.upsert(today, String::from(TODAY_MARKER));
        week.set_active_date(opts.date);
        let mut settings = RadioGroup::new(
            Orientation::Vertical,
            START_CHOICES.iter().map(ToString::to_string),
        );
        if let Some(i) = START_CHOICES.iter().position(|&d| d == opts.start_of_week) {
            settings.set_button(i);
        }
        let mut tabs = Tabs::new(vec![
            Tab::new("Month", Pane::Month(month)),
            Tab::new("Week", Pane::Week(week)),
            Tab::new("Settings", Pane::Settings(settings)),
        ])
        .wraparound(true);
        if opts.week_tab {
            tabs.set_tab(WEEK_TAB);
        } else {
            tabs.set_tab(MONTH_TAB);
        }
        App {
            tabs,
            status: None,
            state: AppState::Normal,
        }
    }

    pub(crate) fn run(mut self, mut terminal: DefaultTerminal) -> io::Result<()> {
        while !self.quitting() {
            terminal.draw(|frame| frame.render_widget(&self, frame.area()))?;
            self.handle_event(&read()?);
        }
        Ok(())
    }

    fn handle_event(&mut self, event: &Event) {
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = event.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
                return;
            }
            match (self.state, code) {
                (AppState::Helping, _) => {
                    self.state = AppState::Normal;
                    return;
                }
                (AppState::Normal, KeyCode::Char('q') | KeyCode::Esc) => {
                    self.state = AppState::Quitting;
                    return;
                }
                (AppState::Normal, KeyCode::Char('?')) => {
                    self.state = AppState::Helping;
                    return;
                }
                _ => (),
            }
        }
        for note in self.tabs.update(event) {
            match note {
                TabsNotification::TabChanged { .. } => (),
                TabsNotification::Child(PaneEffect::Moved(date)) => self.status = Some(date),
                TabsNotification::Child(PaneEffect::StartOfWeek(weekday)) => {
                    self.set_start_of_week(weekday);
                }
            }
        }
    }

    fn set_start_of_week(&mut self, weekday: Weekday) {
        log::debug!("start of week changed to {weekday}");
        for pane in self.tabs.children_mut() {
            match pane {
                Pane::Month(grid) => grid.set_start_of_week(weekday),
                Pane::Week(grid) => grid.set_start_of_week(weekday),
                Pane::Settings(_) => (),
            }
        }
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn status_line(&self) -> String {
        match self.status {
            Some(date) => format!("Selected {date}  ·  ? for help"),
            None => String::from("? for help"),
        }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [body_area, status_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
        Component::render(&self.tabs, body_area, buf);
        Line::styled(self.status_line(), STATUS_STYLE).render(status_area, buf);
        if self.state == AppState::Helping {
            Help::new(BASE_STYLE, self.tabs.len()).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Normal,
    Helping,
    Quitting,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Pane {
    Month(MonthGrid<String>),
    Week(WeekGrid<String>),
    Settings(RadioGroup),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum PaneEffect {
    Moved(Date),
    StartOfWeek(Weekday),
}

impl PaneEffect {
    fn from_calendar(note: Notification<Infallible>) -> PaneEffect {
        match note {
            Notification::ActiveDateChanged(change) => PaneEffect::Moved(change.date),
            Notification::Content(never) => match never {},
        }
    }
}

impl Component for Pane {
    type Effect = PaneEffect;

    fn handle_event(&mut self, event: &Event) -> Vec<PaneEffect> {
        match self {
            Pane::Month(grid) => grid
                .handle_event(event)
                .into_iter()
                .map(PaneEffect::from_calendar)
                .collect(),
            Pane::Week(grid) => grid
                .handle_event(event)
                .into_iter()
                .map(PaneEffect::from_calendar)
                .collect(),
            Pane::Settings(group) => group
                .handle_event(event)
                .into_iter()
                .filter_map(|sel| START_CHOICES.get(sel.index).copied())
                .map(PaneEffect::StartOfWeek)
                .collect(),
        }
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        match self {
            Pane::Month(grid) => {
                let [title_area, grid_area] =
                    Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);
                Line::raw(grid.title(true)).render(title_area, buf);
                Component::render(grid, grid_area, buf);
            }
            Pane::Week(grid) => {
                let [title_area, grid_area] =
                    Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);
                Line::raw(format!("{} to {}", grid.start_date(), grid.end_date()))
                    .render(title_area, buf);
                Component::render(grid, grid_area, buf);
            }
            Pane::Settings(group) => {
                let [title_area, group_area] =
                    Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(area);
                Line::raw("Start of week:").render(title_area, buf);
                Component::render(group, group_area, buf);
            }
        }
    }
}

/// The week starting on `start_of_week` that contains `date`
fn week_containing(date: Date, start_of_week: Weekday) -> WeekGrid<String> {
    let week = WeekGrid::new(date).start_of_week(start_of_week);
    if week.contains(date) {
        week
    } else {
        WeekGrid::new(date.saturating_sub(Duration::WEEK)).start_of_week(start_of_week)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn options() -> Options {
        Options {
            date: date!(2024 - 09 - 11),
            start_of_week: Weekday::Sunday,
            weekdays: Weekdays::default(),
            week_tab: false,
        }
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn month(app: &App) -> &MonthGrid<String> {
        match app.tabs.tabs().get(MONTH_TAB).map(Tab::child) {
            Some(Pane::Month(grid)) => grid,
            _ => panic!("first tab is not the month"),
        }
    }

    fn week(app: &App) -> &WeekGrid<String> {
        match app.tabs.tabs().get(WEEK_TAB).map(Tab::child) {
            Some(Pane::Week(grid)) => grid,
            _ => panic!("second tab is not the week"),
        }
    }

    #[test]
    fn test_initial_state() {
        let app = App::new(date!(2024 - 09 - 12), options());
        assert_eq!(app.tabs.active(), MONTH_TAB);
        assert_eq!(month(&app).active_date(), Some(date!(2024 - 09 - 11)));
        assert_eq!(
            month(&app).content(12).map(String::as_str),
            Some(TODAY_MARKER)
        );
        assert_eq!(week(&app).start_date(), date!(2024 - 09 - 08));
        assert_eq!(week(&app).active_date(), Some(date!(2024 - 09 - 11)));
        assert_eq!(app.status_line(), "? for help");
    }

    #[test]
    fn test_week_containing_a_sunday_with_monday_start() {
        let grid = week_containing(date!(2024 - 09 - 08), Weekday::Monday);
        assert_eq!(grid.start_date(), date!(2024 - 09 - 02));
        assert!(grid.contains(date!(2024 - 09 - 08)));
    }

    #[test]
    fn test_arrows_move_active_calendar() {
        let mut app = App::new(date!(2024 - 09 - 12), options());
        app.handle_event(&key(KeyCode::Down));
        assert_eq!(month(&app).active_date(), Some(date!(2024 - 09 - 18)));
        assert_eq!(week(&app).active_date(), Some(date!(2024 - 09 - 11)));
        assert!(app.status_line().starts_with("Selected 2024-09-18"));
        app.handle_event(&key(KeyCode::Tab));
        assert_eq!(app.tabs.active(), WEEK_TAB);
        app.handle_event(&key(KeyCode::Right));
        assert_eq!(week(&app).active_date(), Some(date!(2024 - 09 - 12)));
        assert_eq!(month(&app).active_date(), Some(date!(2024 - 09 - 18)));
        assert_eq!(app.status, Some(date!(2024 - 09 - 12)));
    }

    #[test]
    fn test_settings_change_start_of_week() {
        let mut app = App::new(date!(2024 - 09 - 12), options());
        app.handle_event(&key(KeyCode::Char('3')));
        app.handle_event(&key(KeyCode::Down));
        assert_eq!(month(&app).week_start(), Weekday::Monday);
        assert_eq!(week(&app).week_start(), Weekday::Monday);
        assert_eq!(week(&app).start_date(), date!(2024 - 09 - 09));
    }

    #[test]
    fn test_today_survives_start_of_week_round_trip() {
        let mut app = App::new(date!(2024 - 09 - 08), options());
        let marker = |app: &App| week(app).content(date!(2024 - 09 - 08)).cloned();
        assert_eq!(marker(&app).as_deref(), Some(TODAY_MARKER));
        app.handle_event(&key(KeyCode::Char('3')));
        app.handle_event(&key(KeyCode::Down));
        assert_eq!(week(&app).start_date(), date!(2024 - 09 - 09));
        assert_eq!(marker(&app), None);
        app.handle_event(&key(KeyCode::Up));
        assert_eq!(week(&app).start_date(), date!(2024 - 09 - 08));
        assert_eq!(marker(&app).as_deref(), Some(TODAY_MARKER));
    }

    #[test]
    fn test_help_and_quit() {
        let mut app = App::new(date!(2024 - 09 - 12), options());
        app.handle_event(&key(KeyCode::Char('?')));
        assert_eq!(app.state, AppState::Helping);
        app.handle_event(&key(KeyCode::Char('q')));
        assert_eq!(app.state, AppState::Normal);
        app.handle_event(&key(KeyCode::Esc));
        assert!(app.quitting());
    }

    #[test]
    fn test_ctrl_c_quits_from_help() {
        let mut app = App::new(date!(2024 - 09 - 12), options());
        app.handle_event(&key(KeyCode::Char('?')));
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        app.handle_event(&ctrl_c);
        assert!(app.quitting());
    }

    #[test]
    fn test_render_shows_tabs_and_status() {
        let mut app = App::new(date!(2024 - 09 - 12), options());
        app.handle_event(&key(KeyCode::Left));
        let area = Rect::new(0, 0, 60, 24);
        let mut buffer = Buffer::empty(area);
        (&app).render(area, &mut buffer);
        let line = |y: u16| {
            (0..area.width)
                .filter_map(|x| buffer.cell((x, y)))
                .map(|c| c.symbol())
                .collect::<String>()
        };
        assert!(line(0).starts_with("= Month =│  Week  │  Settings  "));
        assert!(line(2).contains("September 2024"));
        assert!(line(23).starts_with("Selected 2024-09-10"));
    }
}
