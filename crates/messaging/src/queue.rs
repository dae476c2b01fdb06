//! In-process work channel with at-least-once delivery semantics.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use crate::error::{ChannelError, Result};

/// Producer side of the work channel.
///
/// Delivery is at-least-once and unordered across messages: a published
/// message may be handed to a consumer more than once, so consumers
/// must be idempotent.
#[async_trait]
pub trait WorkQueue<M: Send + 'static>: Send + Sync {
    /// Publishes a message onto the channel.
    async fn publish(&self, message: M) -> Result<()>;
}

struct QueueInner<M> {
    pending: Mutex<VecDeque<M>>,
    notify: Notify,
    closed: AtomicBool,
}

/// In-memory work queue backed by a shared buffer.
///
/// The producer surface is the [`WorkQueue`] trait; the consumer
/// surface (`next_batch`, `redeliver`) is specific to this
/// implementation, matching a transport whose consumer API is its own.
pub struct InMemoryWorkQueue<M> {
    inner: Arc<QueueInner<M>>,
}

impl<M> Clone for InMemoryWorkQueue<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<M: Send + 'static> Default for InMemoryWorkQueue<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Send + 'static> InMemoryWorkQueue<M> {
    /// Creates a new empty queue.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(QueueInner {
                pending: Mutex::new(VecDeque::new()),
                notify: Notify::new(),
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// Number of messages currently waiting.
    pub async fn len(&self) -> usize {
        self.inner.pending.lock().await.len()
    }

    /// Returns true if no messages are waiting.
    pub async fn is_empty(&self) -> bool {
        self.inner.pending.lock().await.is_empty()
    }

    /// Stops accepting new messages. Already-queued messages can still
    /// be consumed.
    pub fn close(&self) {
        self.inner.closed.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    /// Returns true once the queue has been closed.
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }

    /// Takes up to `max` messages, waiting up to `timeout` when the
    /// queue is empty. Returns an empty batch on timeout.
    pub async fn next_batch(&self, max: usize, timeout: Duration) -> Vec<M> {
        {
            let mut pending = self.inner.pending.lock().await;
            if !pending.is_empty() {
                let take = max.min(pending.len());
                return pending.drain(..take).collect();
            }
        }

        if timeout.is_zero() || self.is_closed() {
            return Vec::new();
        }

        tokio::select! {
            _ = self.inner.notify.notified() => {}
            _ = tokio::time::sleep(timeout) => {}
        }

        let mut pending = self.inner.pending.lock().await;
        let take = max.min(pending.len());
        pending.drain(..take).collect()
    }

    /// Puts a message back at the front of the queue, modelling a
    /// channel redelivery.
    pub async fn redeliver(&self, message: M) {
        self.inner.pending.lock().await.push_front(message);
        self.inner.notify.notify_one();
    }
}

#[async_trait]
impl<M: Send + 'static> WorkQueue<M> for InMemoryWorkQueue<M> {
    async fn publish(&self, message: M) -> Result<()> {
        if self.is_closed() {
            return Err(ChannelError::Closed("work queue is closed".to_string()));
        }
        self.inner.pending.lock().await.push_back(message);
        self.inner.notify.notify_one();
        Ok(())
    }
}
