mod app;
mod dates;
mod help;
mod logging;
mod planner;
mod store;
mod theme;
mod view;
mod week;
use crate::app::App;
use crate::planner::Planner;
use crate::store::{FileStore, WeekStore};
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        date: Option<Date>,
        data_dir: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut date = None;
        let mut data_dir = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Long("data-dir") => data_dir = Some(PathBuf::from(parser.value()?)),
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
        Ok(Command::Run { date, data_dir })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run { date, data_dir } => {
                let data_dir = match data_dir {
                    Some(dir) => dir,
                    None => {
                        default_data_dir().context("failed to determine a data directory")?
                    }
                };
                let _logger = logging::init(&data_dir)?;
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                log::info!("opening week records under {}", data_dir.display());
                let store = WeekStore::new(FileStore::open(&data_dir)?);
                let planner = Planner::open(store, date.unwrap_or(today))?;
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(planner, today).run(&mut terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: kiyo [OPTIONS] [YYYY-MM-DD]");
                println!();
                println!("Terminal weekly planner for anchoring intentions to each day");
                println!();
                println!("Options:");
                println!("      --data-dir <DIR>  Keep week records under this directory");
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn default_data_dir() -> Option<PathBuf> {
    Some(dirs::data_dir()?.join("kiyo"))
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
