//! Background task runner
//!
//! Runs one future at a time on the app's tokio runtime and hands its result
//! back to the UI thread through a channel polled on every tick. Spawning a
//! new task aborts the one in flight, so a stale result is never delivered.

use std::future::Future;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

struct BackgroundTask<T> {
    receiver: Receiver<T>,
    handle: JoinHandle<()>,
    start_instant: Instant,
}

/// Owner of at most one in-flight background task producing a `T`
pub struct TaskRunner<T> {
    name: &'static str,
    task: Option<BackgroundTask<T>>,
}

impl<T: Send + 'static> TaskRunner<T> {
    pub fn new(name: &'static str) -> Self {
        Self { name, task: None }
    }

    /// Start `future`, aborting whatever was running before
    pub fn spawn<F>(&mut self, runtime: &Handle, future: F)
    where
        F: Future<Output = T> + Send + 'static,
    {
        if self.abort() {
            debug!(task = self.name, "superseded in-flight task");
        }

        let (tx, rx) = mpsc::channel();
        let handle = runtime.spawn(async move {
            let output = future.await;
            let _ = tx.send(output);
        });

        self.task = Some(BackgroundTask {
            receiver: rx,
            handle,
            start_instant: Instant::now(),
        });
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// How long the current task has been running
    pub fn elapsed(&self) -> Option<Duration> {
        self.task.as_ref().map(|t| t.start_instant.elapsed())
    }

    /// Take the result if the task finished since the last poll
    pub fn poll(&mut self) -> Option<T> {
        let task = self.task.as_ref()?;
        match task.receiver.try_recv() {
            Ok(output) => {
                self.task = None;
                Some(output)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                // The task ended without sending: it panicked or was aborted.
                debug!(task = self.name, "task ended without a result");
                self.task = None;
                None
            }
        }
    }

    /// Abort the in-flight task; returns whether there was one
    pub fn abort(&mut self) -> bool {
        match self.task.take() {
            Some(task) => {
                task.handle.abort();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use tokio::runtime::Runtime;

    fn wait_for<T: Send + 'static>(runner: &mut TaskRunner<T>) -> Option<T> {
        for _ in 0..200 {
            if let Some(output) = runner.poll() {
                return Some(output);
            }
            if !runner.is_running() {
                return None;
            }
            thread::sleep(Duration::from_millis(10));
        }
        None
    }

    #[test]
    fn test_spawn_and_poll() {
        let runtime = Runtime::new().unwrap();
        let mut runner = TaskRunner::new("test");
        assert!(runner.poll().is_none());

        runner.spawn(runtime.handle(), async { 42 });
        assert!(runner.is_running());

        assert_eq!(wait_for(&mut runner), Some(42));
        assert!(!runner.is_running());
        assert!(runner.elapsed().is_none());
    }

    #[test]
    fn test_new_task_supersedes_old_one() {
        let runtime = Runtime::new().unwrap();
        let mut runner = TaskRunner::new("test");

        runner.spawn(runtime.handle(), async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            "stale"
        });
        runner.spawn(runtime.handle(), async { "fresh" });

        assert_eq!(wait_for(&mut runner), Some("fresh"));
    }

    #[test]
    fn test_abort_discards_result() {
        let runtime = Runtime::new().unwrap();
        let mut runner: TaskRunner<u32> = TaskRunner::new("test");

        runner.spawn(runtime.handle(), std::future::pending());
        assert!(runner.abort());
        assert!(!runner.is_running());
        assert!(runner.poll().is_none());
        assert!(!runner.abort());
    }
}
