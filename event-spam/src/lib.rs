pub mod cli;
pub mod configuration;
pub mod coordinator;
pub mod operation;
pub mod signal;
pub mod worker;
