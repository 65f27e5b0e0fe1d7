mod app;
mod clock;
mod help;
mod picker;
mod scroll;
mod selection;
mod tasks;
mod theme;
mod window;
use crate::app::App;
use crate::clock::{Clock, FixedClock, LocalClock};
use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::io;
use std::path::PathBuf;
use time::{macros::format_description, Date};

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        today: Option<Date>,
        log_file: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut today = None;
        let mut log_file = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Long("log-file") => log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if today.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, format_description!("[year]-[month]-[day]")) {
                        Ok(d) => today = Some(d),
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
        Ok(Command::Run { today, log_file })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run { today, log_file } => match today {
                Some(date) => {
                    let _logger = start_logging(log_file)?;
                    log::info!("pinning today to {date}");
                    run_app(FixedClock(date))
                }
                None => {
                    // Look up the local offset before the logger has a chance
                    // to start any threads.
                    let clock =
                        LocalClock::new().context("failed to determine local time zone")?;
                    let _logger = start_logging(log_file)?;
                    run_app(clock)
                }
            },
            Command::Help => {
                println!("Usage: dayrow [--log-file PATH] [YYYY-MM-DD]");
                println!();
                println!("Terminal date picker with a synchronized timeline ruler");
                println!();
                println!("Options:");
                println!("  --log-file PATH   Write log messages to PATH");
                println!("  -h, --help        Display this help message and exit");
                println!("  -V, --version     Show the program version and exit");
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

fn start_logging(log_file: Option<PathBuf>) -> anyhow::Result<Option<LoggerHandle>> {
    log_file.map(init_logging).transpose()
}

fn init_logging(path: PathBuf) -> anyhow::Result<LoggerHandle> {
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };
    let spec = FileSpec::try_from(path).context("invalid log file path")?;
    Logger::try_with_env_or_str(default_level)
        .context("invalid log specification")?
        .log_to_file(spec)
        .start()
        .context("failed to start logger")
}

fn run_app<C: Clock>(clock: C) -> anyhow::Result<()> {
    with_terminal(|mut terminal| {
        terminal.hide_cursor().context("failed to hide cursor")?;
        App::new(clock)
            .run(&mut terminal)
            .context("failed to drive terminal")?;
        Ok(())
    })
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = execute!(io::stdout(), EnableMouseCapture)
        .context("failed to enable mouse capture")
        .and_then(|()| func(terminal));
    if let Err(e) = execute!(io::stdout(), DisableMouseCapture) {
        log::warn!("failed to disable mouse capture: {e}");
    }
    ratatui::restore();
    r
}
