use std::env;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config_file::FromConfigFile;
use serde::Deserialize;
use spam_common::error::RuntimeError;
use spam_common::logger::LogLevel;

use crate::cli::Arguments;

pub const DEFAULT_WORKER_COUNT: NonZeroUsize = NonZeroUsize::MIN;
pub const DEFAULT_DURATION_SECONDS: u64 = 30;

pub fn default_target_path() -> PathBuf {
    env::temp_dir().join("event-spam.target")
}

/// Optional defaults read from a YAML file. Command-line values take precedence.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileDefaults {
    pub file: Option<PathBuf>,
    pub threads: Option<usize>,
    pub seconds: Option<u64>,
    pub log_level: Option<LogLevel>,
}

impl FileDefaults {
    pub fn load(path: &Path) -> Result<Self, RuntimeError> {
        Self::from_config_file(path).map_err(|e| {
            RuntimeError::new(format!(
                "Unable to load configuration from {}: {e}",
                path.display()
            ))
        })
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Configuration {
    pub single_shot: bool,
    pub worker_count: NonZeroUsize,
    pub target_path: PathBuf,
    pub duration: Duration,
    pub log_level: LogLevel,
}

impl Configuration {
    pub fn from_arguments(arguments: &Arguments) -> Result<Self, RuntimeError> {
        let defaults = match &arguments.config {
            Some(path) => FileDefaults::load(path)?,
            None => FileDefaults::default(),
        };

        Self::resolve(arguments, defaults)
    }

    pub fn resolve(arguments: &Arguments, defaults: FileDefaults) -> Result<Self, RuntimeError> {
        let worker_count = match (arguments.threads, defaults.threads) {
            (Some(count), _) => count,
            (None, Some(count)) => NonZeroUsize::new(count).ok_or_else(|| {
                RuntimeError::new("Invalid configuration: `threads` must be at least 1")
            })?,
            (None, None) => DEFAULT_WORKER_COUNT,
        };

        let seconds = arguments
            .seconds
            .or(defaults.seconds)
            .unwrap_or(DEFAULT_DURATION_SECONDS);

        Ok(Self {
            single_shot: arguments.single,
            worker_count,
            target_path: arguments
                .file
                .clone()
                .or(defaults.file)
                .unwrap_or_else(default_target_path),
            duration: Duration::from_secs(seconds),
            log_level: arguments
                .log_level
                .or(defaults.log_level)
                .unwrap_or_default(),
        })
    }
}
