//! In-process transport backed by a tokio broadcast channel.
//!
//! All subscribers receive every message. A publish with no live
//! subscribers is dropped, which is expected while satellite displays
//! are still starting up.

use tokio::sync::broadcast::{self, Sender};

use crate::bus::{MessageBus, Subscription};

/// Broadcast channel capacity.
/// 64 is enough for burst handling without memory bloat.
/// Lagging receivers will skip old messages.
pub const CHANNEL_CAPACITY: usize = 64;

/// The default transport: one broadcast channel shared by every
/// participant in the process.
pub struct LocalBus<T> {
    tx: Sender<T>,
}

impl<T: Clone + Send + 'static> LocalBus<T> {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }
}

impl<T: Clone + Send + 'static> Default for LocalBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + 'static> MessageBus<T> for LocalBus<T> {
    fn publish(&self, msg: T) {
        let _ = self.tx.send(msg);
    }

    fn subscribe(&self) -> Subscription<T> {
        Subscription::new(self.tx.subscribe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_without_subscribers_is_dropped() {
        let bus: LocalBus<u32> = LocalBus::new();
        // Must not panic or error; the message simply goes nowhere.
        bus.publish(1);
        bus.publish(2);
    }

    #[test]
    fn test_subscriber_sees_messages_in_publish_order() {
        let bus: LocalBus<u32> = LocalBus::new();
        let mut sub = bus.subscribe();

        bus.publish(1);
        bus.publish(2);
        bus.publish(3);

        assert_eq!(sub.drain(), vec![1, 2, 3]);
        assert!(sub.drain().is_empty());
    }

    #[test]
    fn test_subscription_starts_after_subscribe() {
        let bus: LocalBus<u32> = LocalBus::new();
        bus.publish(1);

        let mut sub = bus.subscribe();
        bus.publish(2);

        assert_eq!(sub.drain(), vec![2]);
    }

    #[test]
    fn test_drain_survives_lag() {
        let bus: LocalBus<usize> = LocalBus::new();
        let mut sub = bus.subscribe();

        // Overflow the channel so the receiver lags.
        for i in 0..(CHANNEL_CAPACITY * 2) {
            bus.publish(i);
        }

        let msgs = sub.drain();
        assert_eq!(msgs.len(), CHANNEL_CAPACITY);
        assert_eq!(*msgs.last().unwrap(), CHANNEL_CAPACITY * 2 - 1);
    }

    #[tokio::test]
    async fn test_recv_skips_lagged_gap() {
        let bus: LocalBus<usize> = LocalBus::new();
        let mut sub = bus.subscribe();

        for i in 0..(CHANNEL_CAPACITY + 5) {
            bus.publish(i);
        }

        // First recv after a lag lands on the oldest retained message.
        let first = sub.recv().await.unwrap();
        assert_eq!(first, 5);
    }

    #[tokio::test]
    async fn test_recv_returns_none_when_bus_dropped() {
        let bus: LocalBus<u32> = LocalBus::new();
        let mut sub = bus.subscribe();
        drop(bus);

        assert_eq!(sub.recv().await, None);
    }
}
