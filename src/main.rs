mod app;
mod help;
use crate::app::{App, Options};
use anyhow::Context;
use gridcal::calendar::{parse_weekday, Weekdays};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use time::{
    format_description::BorrowedFormatItem, macros::format_description, Date, OffsetDateTime,
    Weekday,
};

static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        date: Option<Date>,
        start_of_week: Weekday,
        weekdays: Weekdays,
        week_tab: bool,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut date = None;
        let mut start_of_week = Weekday::Sunday;
        let mut weekdays = Weekdays::default();
        let mut week_tab = false;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('w') | Arg::Long("week") => week_tab = true,
                Arg::Short('s') | Arg::Long("start") => {
                    start_of_week = parser.value()?.parse_with(parse_weekday)?;
                }
                Arg::Short('d') | Arg::Long("weekdays") => weekdays = parser.value()?.parse()?,
                Arg::Value(value) if date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run {
            date,
            start_of_week,
            weekdays,
            week_tab,
        })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                date,
                start_of_week,
                weekdays,
                week_tab,
            } => {
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let opts = Options {
                    date: date.unwrap_or(today),
                    start_of_week,
                    weekdays,
                    week_tab,
                };
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(today, opts)
                        .run(terminal)
                        .context("terminal I/O failed")?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: gridcal [<options>] [YYYY-MM-DD]");
                println!();
                println!("Browse a month or a week of the calendar in the terminal");
                println!();
                println!("Options:");
                println!("  -s, --start <weekday>  Begin each week on this day [default: Sunday]");
                println!("  -d, --weekdays <list>  Comma-separated days to show [default: all]");
                println!("  -w, --week             Open on the week view");
                println!("  -h, --help             Display this help message and exit");
                println!("  -V, --version          Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
