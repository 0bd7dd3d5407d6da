//! Bus trait and subscription handle.

use log::warn;
use tokio::sync::broadcast::{self, Receiver};

/// Trait that all sync-channel transports must implement.
/// This provides a unified interface regardless of the underlying wire.
pub trait MessageBus<T: Clone + Send + 'static>: Send + Sync {
    /// Publish a message to all current subscribers. Non-blocking and
    /// fire-and-forget: with no subscribers listening the message is
    /// dropped, and the caller never learns either way.
    fn publish(&self, msg: T);

    /// Subscribe to the channel. The subscription sees all messages
    /// published after this call.
    fn subscribe(&self) -> Subscription<T>;
}

/// Receiving end of a bus subscription.
pub struct Subscription<T> {
    rx: Receiver<T>,
}

impl<T: Clone + Send + 'static> Subscription<T> {
    pub(crate) fn new(rx: Receiver<T>) -> Self {
        Self { rx }
    }

    /// Await the next message. Lagged gaps are skipped (state messages
    /// are full replacements, so only the latest matters). Returns `None`
    /// once the publishing side has shut down.
    pub async fn recv(&mut self) -> Option<T> {
        loop {
            match self.rx.recv().await {
                Ok(msg) => return Some(msg),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("bus subscription lagged, skipped {skipped} messages");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Drain all pending messages without blocking, in publish order.
    /// Handles `Lagged` by continuing to drain.
    pub fn drain(&mut self) -> Vec<T> {
        let mut msgs = Vec::new();

        loop {
            match self.rx.try_recv() {
                Ok(msg) => msgs.push(msg),
                Err(broadcast::error::TryRecvError::Empty) => break,
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue, // Skip old, keep draining
                Err(broadcast::error::TryRecvError::Closed) => break,
            }
        }

        msgs
    }
}
