use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use event_spam::configuration::Configuration;
use event_spam::coordinator::Coordinator;
use event_spam::operation::Operation;
use spam_common::logger::LogLevel;
use tempfile::{NamedTempFile, tempdir};

#[derive(Default)]
struct CountingOperation {
    calls: AtomicU64,
}

impl Operation for CountingOperation {
    fn perform(&self, _: &Path) {
        self.calls.fetch_add(1, Ordering::Relaxed);
    }
}

fn configuration(target: PathBuf, workers: usize, seconds: u64) -> Configuration {
    Configuration {
        single_shot: false,
        worker_count: NonZeroUsize::new(workers).unwrap(),
        target_path: target,
        duration: Duration::from_secs(seconds),
        log_level: LogLevel::Off,
    }
}

#[tokio::test]
async fn test_zero_duration_terminates_promptly() {
    let target = NamedTempFile::new().unwrap();
    let start = Instant::now();

    let report = Coordinator::new(configuration(target.path().to_path_buf(), 16, 0))
        .run()
        .await
        .unwrap()
        .unwrap();

    assert!(start.elapsed() < Duration::from_secs(2));
    assert_eq!(report.per_worker.len(), 16);
    assert_eq!(report.configured, Duration::ZERO);
}

#[tokio::test]
async fn test_missing_target_is_not_an_error() {
    let directory = tempdir().unwrap();
    let target = directory.path().join("never-created");
    let start = Instant::now();

    let report = Coordinator::new(configuration(target.clone(), 3, 1))
        .run()
        .await
        .unwrap()
        .unwrap();

    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(1));
    assert!(elapsed < Duration::from_secs(3));
    assert_eq!(report.per_worker.len(), 3);
    assert!(report.total > 0);
    assert_eq!(
        report.to_string(),
        format!("Opened the file {} times in 1 seconds.", report.total)
    );
    assert!(!target.exists());
}

#[tokio::test]
async fn test_total_equals_operations_performed() {
    let operation = Arc::new(CountingOperation::default());
    let coordinator = Coordinator::with_operation(
        configuration(PathBuf::from("/unused"), 3, 1),
        operation.clone(),
    );

    let report = coordinator.run().await.unwrap().unwrap();

    assert_eq!(report.total, operation.calls.load(Ordering::Relaxed));
    assert_eq!(report.total, report.per_worker.iter().sum::<u64>());
    assert!(report.per_worker.iter().all(|count| *count > 0));
}

#[tokio::test]
async fn test_single_worker_uses_general_path() {
    let operation = Arc::new(CountingOperation::default());
    let report = Coordinator::with_operation(
        configuration(PathBuf::from("/unused"), 1, 1),
        operation.clone(),
    )
    .run()
    .await
    .unwrap()
    .unwrap();

    assert_eq!(report.per_worker.len(), 1);
    assert_eq!(report.per_worker[0], report.total);
    assert_eq!(report.total, operation.calls.load(Ordering::Relaxed));
}

#[tokio::test]
async fn test_single_shot_is_idempotent() {
    let target = NamedTempFile::new().unwrap();
    let operation = Arc::new(CountingOperation::default());

    for run in 1..=2 {
        let mut single = configuration(target.path().to_path_buf(), 4, 30);
        single.single_shot = true;

        let start = Instant::now();
        let report = Coordinator::with_operation(single, operation.clone())
            .run()
            .await
            .unwrap();

        assert!(report.is_none());
        assert!(start.elapsed() < Duration::from_secs(1));
        assert_eq!(operation.calls.load(Ordering::Relaxed), run);
    }
}

#[tokio::test]
async fn test_single_shot_on_real_file() {
    let target = NamedTempFile::new().unwrap();
    let mut single = configuration(target.path().to_path_buf(), 1, 30);
    single.single_shot = true;

    assert!(Coordinator::new(single).run().await.unwrap().is_none());
    assert!(target.path().exists());
}
