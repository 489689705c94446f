use std::io::Write;

use log::{LevelFilter, SetLoggerError};
use serde::{Deserialize, Serialize};
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            Self::Off => LevelFilter::Off,
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

fn _config() -> Config {
    ConfigBuilder::new()
        .set_location_level(LevelFilter::Debug)
        .build()
}

/// Log to stderr, and additionally to `writer` when one is given.
pub fn initialize_logger<W>(level: LogLevel, writer: Option<W>) -> Result<(), SetLoggerError>
where
    W: Write + Send + 'static,
{
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level.to_level_filter(),
        _config(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    if let Some(writer) = writer {
        loggers.push(WriteLogger::new(level.to_level_filter(), _config(), writer));
    }

    CombinedLogger::init(loggers)
}
