//! Scheduler for the shared crawl queue
//!
//! This module handles:
//! - The FIFO queue of pending crawl tasks
//! - The count of tasks currently held by workers
//! - Waking idle workers when tasks arrive or the crawl stops
//! - Detecting termination (queue empty and nothing active)
//! - The optional per-crawl visited set
//!
//! All queue state sits behind one `std::sync::Mutex` that is never held across
//! an `.await`. Wakeups go through two `tokio::sync::Notify` handles, and every
//! waiter registers interest before inspecting state so no wakeup is lost.

use crate::url::RequestTarget;
use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;

/// A target queued for fetching at a given depth
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTask {
    /// The target to fetch
    pub target: RequestTarget,

    /// Distance from the seed; the seed is depth 1
    pub depth: u32,
}

impl CrawlTask {
    /// The seed task, at depth 1
    pub fn seed(target: RequestTarget) -> Self {
        Self { target, depth: 1 }
    }

    /// A task for a link found on this task's page
    pub fn child(&self, target: RequestTarget) -> Self {
        Self {
            target,
            depth: self.depth + 1,
        }
    }
}

struct QueueState {
    tasks: VecDeque<CrawlTask>,
    active: usize,
    stopped: bool,
    visited: Option<HashSet<RequestTarget>>,
}

impl QueueState {
    /// Returns false if the target was already queued during this crawl
    fn admit(&mut self, target: &RequestTarget) -> bool {
        match self.visited.as_mut() {
            Some(visited) => visited.insert(target.clone()),
            None => true,
        }
    }
}

/// Scheduler owns the shared queue and the termination condition
pub struct Scheduler {
    state: Mutex<QueueState>,

    /// Signalled when a task is enqueued or the crawl stops
    available: Notify,

    /// Signalled whenever a worker retires a task
    finished: Notify,
}

impl Scheduler {
    /// Creates an empty scheduler
    ///
    /// # Arguments
    ///
    /// * `dedupe` - Drop targets that were already queued during this crawl
    pub fn new(dedupe: bool) -> Self {
        Self {
            state: Mutex::new(QueueState {
                tasks: VecDeque::new(),
                active: 0,
                stopped: false,
                visited: dedupe.then(HashSet::new),
            }),
            available: Notify::new(),
            finished: Notify::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Enqueues a task
    ///
    /// # Returns
    ///
    /// `false` when the target was dropped as already visited
    pub fn push(&self, task: CrawlTask) -> bool {
        let admitted = {
            let mut state = self.lock();
            if state.admit(&task.target) {
                state.tasks.push_back(task);
                true
            } else {
                false
            }
        };

        if admitted {
            self.available.notify_one();
        }
        admitted
    }

    /// Waits for the next task and marks it active
    ///
    /// # Returns
    ///
    /// * `Some(CrawlTask)` - A task the caller must later pass to [`complete`](Self::complete)
    /// * `None` - The crawl is stopped and the queue is empty
    pub async fn next(&self) -> Option<CrawlTask> {
        loop {
            let notified = self.available.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            {
                let mut state = self.lock();
                if let Some(task) = state.tasks.pop_front() {
                    state.active += 1;
                    return Some(task);
                }
                if state.stopped {
                    return None;
                }
            }

            notified.await;
        }
    }

    /// Retires an active task and enqueues the children it produced
    ///
    /// Children are queued before the active count drops, inside one critical
    /// section, so the queue never looks idle while a task still has work to hand
    /// over.
    ///
    /// # Returns
    ///
    /// The number of children actually enqueued
    pub fn complete(&self, children: Vec<CrawlTask>) -> usize {
        let enqueued = {
            let mut state = self.lock();
            let mut enqueued = 0;
            for child in children {
                if state.admit(&child.target) {
                    state.tasks.push_back(child);
                    enqueued += 1;
                }
            }
            state.active = state.active.saturating_sub(1);
            enqueued
        };

        for _ in 0..enqueued {
            self.available.notify_one();
        }
        self.finished.notify_waiters();

        enqueued
    }

    /// Waits until the queue is empty and no task is active
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.finished.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.is_idle() {
                return;
            }

            notified.await;
        }
    }

    /// Raises the stop flag and wakes every waiting worker
    pub fn stop(&self) {
        self.lock().stopped = true;
        self.available.notify_waiters();
    }

    /// Returns true if nothing is queued and nothing is active
    pub fn is_idle(&self) -> bool {
        let state = self.lock();
        state.tasks.is_empty() && state.active == 0
    }

    /// Number of queued tasks
    pub fn len(&self) -> usize {
        self.lock().tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of tasks held by workers
    pub fn active(&self) -> usize {
        self.lock().active
    }
}
