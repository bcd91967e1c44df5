// SPDX-License-Identifier: MIT

//! Worker Pool + Queue. A bounded `mpsc` channel plus a counting semaphore,
//! owned by one `JudgeEngine` instance constructed once in `judge-daemon`'s
//! `main` and handed around by `Arc` — not a process-wide `static`.

use std::sync::Arc;

use judge_core::TestingTask;
use tokio::sync::{mpsc, Mutex, OnceCell, Semaphore};
use tokio::task::JoinHandle;

use crate::error::IntakeError;
use crate::runner::RunnerContext;

pub struct JudgeEngine {
    sender: Mutex<Option<mpsc::Sender<TestingTask>>>,
    semaphore: OnceCell<Arc<Semaphore>>,
    dispatcher: Mutex<Option<JoinHandle<()>>>,
    max_concurrent_workers: usize,
}

impl JudgeEngine {
    /// Construct the queue. Returns the engine handle plus the receiving end
    /// of the channel, which the caller passes to [`start`](Self::start)
    /// once the rest of the process (storage pool, container driver) is
    /// ready.
    pub fn new(pending_queue_size: usize, max_concurrent_workers: usize) -> (Arc<Self>, mpsc::Receiver<TestingTask>) {
        let (sender, receiver) = mpsc::channel(pending_queue_size.max(1));
        let engine = Arc::new(Self {
            sender: Mutex::new(Some(sender)),
            semaphore: OnceCell::new(),
            dispatcher: Mutex::new(None),
            max_concurrent_workers,
        });
        (engine, receiver)
    }

    /// Start the dispatch loop. Idempotent: only the first call spins up a
    /// dispatcher; later calls observe the already-initialized semaphore and
    /// return immediately without spawning a second loop.
    pub async fn start(&self, receiver: mpsc::Receiver<TestingTask>, ctx: Arc<RunnerContext>) {
        let mut dispatcher = self.dispatcher.lock().await;
        if dispatcher.is_some() {
            return;
        }
        let semaphore = self
            .semaphore
            .get_or_init(|| async { Arc::new(Semaphore::new(self.max_concurrent_workers)) })
            .await
            .clone();
        *dispatcher = Some(tokio::spawn(dispatch_loop(receiver, semaphore, ctx)));
    }

    /// Enqueue a task, failing immediately (not blocking) if the pending
    /// queue is full or submissions have been closed by `shutdown`.
    pub async fn try_submit(&self, task: TestingTask) -> Result<(), IntakeError> {
        let guard = self.sender.lock().await;
        let sender = guard.as_ref().ok_or(IntakeError::QueueFull)?;
        sender.try_send(task).map_err(|_| IntakeError::QueueFull)
    }

    /// Stop accepting new submissions, then block until every buffered and
    /// in-flight task has reached a terminal status. An opt-in extension
    /// over the bare Non-goal baseline (in-flight jobs lost at shutdown);
    /// only `judge-daemon`'s signal handler calls this.
    pub async fn shutdown(&self) {
        self.sender.lock().await.take();
        if let Some(handle) = self.dispatcher.lock().await.take() {
            let _ = handle.await;
        }
        if let Some(semaphore) = self.semaphore.get() {
            let _ = semaphore.acquire_many(self.max_concurrent_workers as u32).await;
        }
    }
}

/// Acquire an owned permit, then dequeue, then spawn the Task Runner
/// holding that permit — so the dispatch loop never blocks on a job's
/// execution, only on admission. FIFO and the concurrency bound both fall
/// out of this ordering: `recv()` preserves send order, and no more than
/// `max_concurrent_workers` permits can be outstanding at once.
async fn dispatch_loop(mut receiver: mpsc::Receiver<TestingTask>, semaphore: Arc<Semaphore>, ctx: Arc<RunnerContext>) {
    loop {
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };
        let Some(task) = receiver.recv().await else {
            break;
        };
        let ctx = ctx.clone();
        tokio::spawn(async move {
            let _permit = permit;
            crate::runner::run(&ctx, task).await;
        });
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
