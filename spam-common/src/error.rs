use std::error::Error;
use std::fmt;
use std::io;

use log::SetLoggerError;

pub struct RuntimeError {
    _message: String,
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self._message)
    }
}

impl fmt::Debug for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self._message)
    }
}

impl Error for RuntimeError {}
impl RuntimeError {
    pub fn new<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            _message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self._message
    }
}

impl From<io::Error> for RuntimeError {
    fn from(error: io::Error) -> Self {
        Self::new(format!("I/O error: {error}"))
    }
}

impl From<SetLoggerError> for RuntimeError {
    fn from(error: SetLoggerError) -> Self {
        Self::new(format!("Unable to initialize logger: {error}"))
    }
}
