//! Shared async work queue.
//!
//! Wraps a [`PriorityQueue`] so several producers and consumers can use it
//! from different tasks. Consumers wait for work instead of polling.

use tokio::sync::{Mutex, Notify};

use crate::error::QueueError;
use crate::queue::PriorityQueue;

struct State<T> {
    queue: PriorityQueue<T>,
    closed: bool,
}

/// A priority work queue shared between tasks, usually behind an `Arc`.
pub struct WorkQueue<T> {
    state: Mutex<State<T>>,
    notify: Notify,
}

impl<T> Default for WorkQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> WorkQueue<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                queue: PriorityQueue::new(),
                closed: false,
            }),
            notify: Notify::new(),
        }
    }

    /// Queue an item and wake one waiting consumer.
    pub async fn push(&self, item: T, priority: f64) -> Result<(), QueueError> {
        if !priority.is_finite() {
            return Err(QueueError::InvalidPriority(priority));
        }
        {
            let mut state = self.state.lock().await;
            if state.closed {
                return Err(QueueError::Closed);
            }
            state.queue.enqueue(item, priority);
        }
        self.notify.notify_one();
        Ok(())
    }

    /// Wait for the lowest-priority item.
    ///
    /// Returns `None` once the queue is closed and fully drained.
    pub async fn pop(&self) -> Option<T> {
        loop {
            // Register before checking so a push or close between the check
            // and the await is not missed.
            let notified = self.notify.notified();
            {
                let mut state = self.state.lock().await;
                if let Some(item) = state.queue.dequeue() {
                    return Some(item);
                }
                if state.closed {
                    return None;
                }
            }
            notified.await;
        }
    }

    /// Take the lowest-priority item without waiting.
    pub async fn try_pop(&self) -> Option<T> {
        self.state.lock().await.queue.dequeue()
    }

    /// Stop accepting work. Items already queued can still be popped.
    pub async fn close(&self) {
        self.state.lock().await.closed = true;
        self.notify.notify_waiters();
    }

    pub async fn is_closed(&self) -> bool {
        self.state.lock().await.closed
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.queue.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.queue.is_empty()
    }
}
