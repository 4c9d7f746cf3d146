mod app;
mod config;
mod help;
mod jumpto;
mod logging;
use crate::app::App;
use crate::config::Config;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use stripcal::calendar::parse::format_date;
use stripcal::calendar::{parse_date_string, StripNavigator, StripOptions};
use time::{Date, OffsetDateTime};

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        date: Option<Date>,
        config_path: Option<PathBuf>,
        overrides: Config,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut date = None;
        let mut config_path = None;
        let mut overrides = Config::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    config_path = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("first-day") => overrides.first_day = Some(parser.value()?.string()?),
                Arg::Long("start") => overrides.start = Some(parser.value()?.string()?),
                Arg::Long("end") => overrides.end = Some(parser.value()?.string()?),
                Arg::Long("min") => overrides.min = Some(parser.value()?.string()?),
                Arg::Long("max") => overrides.max = Some(parser.value()?.string()?),
                Arg::Short('m') | Arg::Long("mark") => {
                    overrides.marks.push(parser.value()?.string()?);
                }
                Arg::Long("locale") => overrides.locale = Some(parser.value()?.string()?),
                Arg::Long("theme") => overrides.theme = Some(parser.value()?.string()?),
                Arg::Long("week-count") => overrides.week_count = Some(parser.value()?.parse()?),
                Arg::Long("item-width") => overrides.item_width = Some(parser.value()?.parse()?),
                Arg::Long("log-file") => {
                    overrides.log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Value(value) if date.is_none() => {
                    let value = value.string()?;
                    match parse_date_string(&value) {
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
            config_path,
            overrides,
        })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                date,
                config_path,
                overrides,
            } => {
                let config = Config::load(config_path.as_deref())?.merge(overrides);
                logging::init(config.log_file.as_deref())?;
                let theme = config.theme()?.theme();
                let mut options = config
                    .apply(StripOptions::new())
                    .context("invalid calendar settings")?;
                if let Some(date) = date {
                    options = options.initial_date(date);
                }
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                tracing::info!(%today, ?options, "starting calendar");
                let mut nav = StripNavigator::new(options, today)
                    .context("failed to generate calendar weeks")?;
                nav.on_date_change(|date| tracing::debug!(date, "date change reported"));
                let chosen = with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    Ok(App::new(nav, theme).run(&mut terminal)?)
                })?;
                if let Some(date) = chosen {
                    println!("{}", format_date(date));
                }
                Ok(())
            }
            Command::Help => {
                println!("Usage: stripcal [OPTIONS] [YYYY-MM-DD]");
                println!();
                println!("Horizontally-scrolling week strip calendar for the terminal");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>       Read settings from the given TOML file");
                println!("      --first-day <DAY>     Day each week starts on [default: monday]");
                println!("      --start <DATE>        First date whose week is shown");
                println!("      --end <DATE>          Last date whose week is shown");
                println!("      --min <DATE>          Earliest selectable date");
                println!("      --max <DATE>          Latest selectable date");
                println!("  -m, --mark <DATE>         Mark the given date (may be repeated)");
                println!("      --locale <LOCALE>     Language for day & month names [default: en-US]");
                println!("      --theme <THEME>       classic, minimal, or contrast [default: classic]");
                println!("      --week-count <N>      Weeks to generate when open-ended [default: 52]");
                println!("      --item-width <N>      Columns per day [default: 4]");
                println!("      --log-file <PATH>     Append logs to the given file");
                println!("  -h, --help                Display this help message and exit");
                println!("  -V, --version             Show the program version and exit");
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
