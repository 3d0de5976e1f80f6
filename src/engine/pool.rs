//! Fixed-size worker pool with joinable task handles.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;

use crate::types::{GraphError, GraphResult};

/// A fixed number of worker threads that run submitted tasks to completion.
pub struct WorkerPool {
    pool: rayon::ThreadPool,
    threads: usize,
}

impl WorkerPool {
    /// Create a pool with `threads` workers.
    pub fn new(threads: usize) -> GraphResult<Self> {
        if threads == 0 {
            return Err(GraphError::InvalidArgument(
                "worker pool needs at least one thread".to_string(),
            ));
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("netan-worker-{i}"))
            .build()?;
        Ok(Self { pool, threads })
    }

    /// Number of worker threads.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Queue a task. Returns at once; call [`TaskHandle::join`] to wait for it.
    ///
    /// A panic inside the task is caught and reported through the handle.
    pub fn submit<T, F>(&self, job: F) -> TaskHandle<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        self.pool.spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(job));
            // The caller may have dropped the handle; nobody is left to tell.
            let _ = sender.send(outcome);
        });
        TaskHandle { receiver }
    }
}

/// Handle to a task submitted to a [`WorkerPool`].
pub struct TaskHandle<T> {
    receiver: mpsc::Receiver<std::thread::Result<T>>,
}

impl<T> TaskHandle<T> {
    /// Block until the task finishes and return its output.
    pub fn join(self) -> GraphResult<T> {
        match self.receiver.recv() {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(payload)) => Err(GraphError::TaskFailed(panic_message(payload.as_ref()))),
            Err(_) => Err(GraphError::TaskFailed(
                "worker exited without reporting".to_string(),
            )),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "task panicked".to_string()
    }
}

/// Reject partition counts that would not split the work.
pub fn check_partitions(partitions: usize) -> GraphResult<()> {
    if partitions <= 1 {
        return Err(GraphError::InvalidArgument(format!(
            "number of partitions must be greater than 1, got {partitions}"
        )));
    }
    Ok(())
}

/// Split `items` into at most `partitions` contiguous chunks of
/// `ceil(len / partitions)` items. Empty chunks are not produced.
pub fn partition<T: Clone>(items: &[T], partitions: usize) -> Vec<Vec<T>> {
    if items.is_empty() || partitions == 0 {
        return Vec::new();
    }
    let size = items.len().div_ceil(partitions);
    items.chunks(size).map(<[T]>::to_vec).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_sizes() {
        let items: Vec<u32> = (0..10).collect();

        let parts = partition(&items, 3);
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], vec![0, 1, 2, 3]);
        assert_eq!(parts[2], vec![8, 9]);

        let parts = partition(&items, 4);
        let lens: Vec<usize> = parts.iter().map(Vec::len).collect();
        assert_eq!(lens, vec![3, 3, 3, 1]);

        assert_eq!(partition(&items[..2], 4).len(), 2);
        assert!(partition::<u32>(&[], 4).is_empty());
    }

    #[test]
    fn partition_count_must_exceed_one() {
        assert!(matches!(
            check_partitions(1),
            Err(GraphError::InvalidArgument(_))
        ));
        assert!(matches!(
            check_partitions(0),
            Err(GraphError::InvalidArgument(_))
        ));
        assert!(check_partitions(2).is_ok());
    }

    #[test]
    fn submitted_tasks_return_values() {
        let pool = WorkerPool::new(2).unwrap();
        let handles: Vec<_> = (0..8u64).map(|i| pool.submit(move || i * i)).collect();
        let results: Vec<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results, vec![0, 1, 4, 9, 16, 25, 36, 49]);
    }

    #[test]
    fn panicking_task_reports_failure() {
        let pool = WorkerPool::new(2).unwrap();
        let handle = pool.submit(|| -> u32 { panic!("boom") });
        match handle.join() {
            Err(GraphError::TaskFailed(msg)) => assert!(msg.contains("boom")),
            other => panic!("expected TaskFailed, got {other:?}"),
        }
    }

    #[test]
    fn zero_threads_rejected() {
        assert!(matches!(
            WorkerPool::new(0),
            Err(GraphError::InvalidArgument(_))
        ));
    }
}
