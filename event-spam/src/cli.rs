use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Parser, crate_description, crate_version};
use spam_common::logger::LogLevel;

#[derive(Debug, Parser)]
#[command(
    long_about = crate_description!(),
    propagate_version = true,
    version = crate_version!(),
)]
pub struct Arguments {
    /// Only open the file once, do not spawn threads that open it repetitively
    #[arg(short = 'l', long)]
    pub single: bool,

    /// File to open in read mode
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Number of threads opening the file concurrently [default: 1]
    #[arg(short, long)]
    pub threads: Option<NonZeroUsize>,

    /// Amount of time in seconds to keep opening the file [default: 30]
    #[arg(short, long)]
    pub seconds: Option<u64>,

    /// YAML file providing defaults for the options above
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Minimum level of log records to emit [default: info]
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Also write log records to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Print the current PID and wait for Enter before opening anything.
    ///
    /// Useful for scoping an audit rule to this process before the first event fires.
    #[arg(long)]
    pub pause: bool,
}
