use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use log::{debug, error, info};
use spam_common::error::RuntimeError;
use tokio::task;
use tokio::time::sleep;

use crate::configuration::Configuration;
use crate::operation::{OpenAndClose, Operation};
use crate::signal::StopSignal;
use crate::worker::{Worker, WorkerResult, thread_builder};

#[derive(Clone, Debug)]
pub struct RunReport {
    pub started: DateTime<Utc>,
    pub configured: Duration,
    pub elapsed: Duration,
    pub per_worker: Vec<u64>,
    pub total: u64,
}

impl RunReport {
    pub fn operations_per_second(&self) -> f64 {
        let seconds = self.elapsed.as_secs_f64();
        if seconds > 0.0 {
            self.total as f64 / seconds
        } else {
            0.0
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Opened the file {} times in {} seconds.",
            self.total,
            self.configured.as_secs()
        )
    }
}

pub fn aggregate(results: &[WorkerResult]) -> u64 {
    results.iter().map(|result| result.count).sum()
}

pub struct Coordinator<O = OpenAndClose> {
    _configuration: Configuration,
    _operation: Arc<O>,
    _thread_builder: fn(usize) -> thread::Builder,
}

impl Coordinator {
    pub fn new(configuration: Configuration) -> Self {
        Self::with_operation(configuration, Arc::new(OpenAndClose))
    }
}

impl<O> Coordinator<O>
where
    O: Operation,
{
    pub fn with_operation(configuration: Configuration, operation: Arc<O>) -> Self {
        Self {
            _configuration: configuration,
            _operation: operation,
            _thread_builder: thread_builder,
        }
    }

    /// Replace the factory producing the thread builder for each worker index.
    pub fn with_thread_builder(mut self, factory: fn(usize) -> thread::Builder) -> Self {
        self._thread_builder = factory;
        self
    }

    pub fn configuration(&self) -> &Configuration {
        &self._configuration
    }

    /// Run to completion. Single-shot runs perform one operation and return `None`.
    pub async fn run(self) -> Result<Option<RunReport>, RuntimeError> {
        let configuration = &self._configuration;
        if configuration.single_shot {
            debug!("Single-shot open of {}", configuration.target_path.display());
            self._operation.perform(&configuration.target_path);
            return Ok(None);
        }

        let started = Utc::now();
        let start = Instant::now();
        let stop = StopSignal::new();

        let workers = self._spawn_workers(&stop).await?;
        info!(
            "Spawned {} workers opening {} for {}s",
            workers.len(),
            configuration.target_path.display(),
            configuration.duration.as_secs()
        );

        sleep(configuration.duration).await;
        stop.raise();
        debug!("Raised stop signal");

        let results = _join_all(workers).await?;
        let elapsed = start.elapsed();
        for result in &results {
            debug!("Worker {} finished with {} operations", result.index, result.count);
        }

        let report = RunReport {
            started,
            configured: configuration.duration,
            elapsed,
            per_worker: results.iter().map(|result| result.count).collect(),
            total: aggregate(&results),
        };

        info!(
            "Run started at {} finished after {:.3}s: {} operations ({:.0}/s)",
            report.started.to_rfc3339(),
            report.elapsed.as_secs_f64(),
            report.total,
            report.operations_per_second()
        );

        Ok(Some(report))
    }

    async fn _spawn_workers(&self, stop: &StopSignal) -> Result<Vec<Worker>, RuntimeError> {
        let configuration = &self._configuration;
        let path: Arc<Path> = Arc::from(configuration.target_path.as_path());

        let mut workers = Vec::with_capacity(configuration.worker_count.get());
        for index in 0..configuration.worker_count.get() {
            match Worker::spawn_on(
                (self._thread_builder)(index),
                index,
                self._operation.clone(),
                path.clone(),
                stop.clone(),
            ) {
                Ok(worker) => workers.push(worker),
                Err(e) => {
                    error!("{e}");

                    // Reap the workers already running and discard their counts.
                    stop.raise();
                    let _ = _join_all(workers).await;
                    return Err(e.into());
                }
            }
        }

        Ok(workers)
    }
}

async fn _join_all(workers: Vec<Worker>) -> Result<Vec<WorkerResult>, RuntimeError> {
    task::spawn_blocking(move || {
        let mut results = Vec::with_capacity(workers.len());
        let mut failure = None;
        for worker in workers {
            match worker.join() {
                Ok(result) => results.push(result),
                Err(e) => {
                    error!("{e}");
                    if failure.is_none() {
                        failure = Some(e);
                    }
                }
            }
        }

        match failure {
            Some(e) => Err(e),
            None => Ok(results),
        }
    })
    .await
    .map_err(|e| RuntimeError::new(format!("Unable to join workers: {e}")))?
}
