use std::error::Error;
use std::fmt;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::trace;
use spam_common::error::RuntimeError;

use crate::operation::Operation;
use crate::signal::StopSignal;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WorkerResult {
    pub index: usize,
    pub count: u64,
}

pub struct SpawnError {
    pub index: usize,
    pub source: io::Error,
}

impl fmt::Display for SpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to spawn worker {}: {}", self.index, self.source)
    }
}

impl fmt::Debug for SpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Error for SpawnError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

impl From<SpawnError> for RuntimeError {
    fn from(error: SpawnError) -> Self {
        Self::new(error.to_string())
    }
}

/// Perform `operation` until `stop` is raised and return the number of iterations.
///
/// The signal is checked before every iteration, so a worker started after the signal
/// was raised performs nothing. Each iteration counts whether or not it succeeded.
pub fn run_loop<O>(operation: &O, path: &Path, stop: &StopSignal) -> u64
where
    O: Operation + ?Sized,
{
    let mut count = 0;
    while !stop.is_raised() {
        operation.perform(path);
        count += 1;
    }

    count
}

/// Default builder for worker threads: only the thread name is set.
pub fn thread_builder(index: usize) -> thread::Builder {
    thread::Builder::new().name(format!("event-spam-worker-{index}"))
}

#[derive(Debug)]
pub struct Worker {
    _index: usize,
    _handle: JoinHandle<u64>,
}

impl Worker {
    pub fn spawn<O>(
        index: usize,
        operation: Arc<O>,
        path: Arc<Path>,
        stop: StopSignal,
    ) -> Result<Self, SpawnError>
    where
        O: Operation,
    {
        Self::spawn_on(thread_builder(index), index, operation, path, stop)
    }

    pub fn spawn_on<O>(
        builder: thread::Builder,
        index: usize,
        operation: Arc<O>,
        path: Arc<Path>,
        stop: StopSignal,
    ) -> Result<Self, SpawnError>
    where
        O: Operation,
    {
        let handle = builder
            .spawn(move || run_loop(operation.as_ref(), &path, &stop))
            .map_err(|source| SpawnError { index, source })?;

        trace!("Spawned worker {index}");
        Ok(Self {
            _index: index,
            _handle: handle,
        })
    }

    /// Block until the worker thread exits.
    pub fn join(self) -> Result<WorkerResult, RuntimeError> {
        let index = self._index;
        self._handle
            .join()
            .map(|count| WorkerResult { index, count })
            .map_err(|_| RuntimeError::new(format!("Worker {index} panicked")))
    }
}
