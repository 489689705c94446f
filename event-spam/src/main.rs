use std::error::Error;
use std::fs::File;
use std::io::{Write, stdin, stdout};
use std::process;

use clap::Parser;
use event_spam::cli::Arguments;
use event_spam::configuration::Configuration;
use event_spam::coordinator::Coordinator;
use log::debug;
use spam_common::logger::initialize_logger;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let arguments = Arguments::parse();
    let configuration = Configuration::from_arguments(&arguments)?;

    let log_file = match &arguments.log_file {
        Some(path) => Some(File::create(path)?),
        None => None,
    };
    initialize_logger(configuration.log_level, log_file)?;

    let coordinator = Coordinator::new(configuration);
    debug!("Resolved {:?}", coordinator.configuration());

    if arguments.pause {
        print!("Current PID is {}. Press Enter to start.", process::id());
        let _ = stdout().flush();

        let mut buf = String::new();
        let _ = stdin().read_line(&mut buf);
    }

    if let Some(report) = coordinator.run().await? {
        println!("{report}");
    }

    Ok(())
}
