//! Transport selection for the sync channel.

use std::sync::Arc;

use crate::bus::MessageBus;
use crate::local::LocalBus;

/// Known sync-channel transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Local,
    Unknown,
}

/// Detect the configured transport from the environment.
/// Defaults to the in-process channel when nothing is set.
pub fn detect_transport() -> TransportKind {
    match std::env::var("ORDERCAST_TRANSPORT") {
        Ok(value) => match value.to_lowercase().as_str() {
            "local" => TransportKind::Local,
            _ => TransportKind::Unknown,
        },
        Err(_) => TransportKind::Local,
    }
}

/// Create the bus for the detected transport.
/// Returns None if the configured transport is not supported.
pub fn create_bus<T: Clone + Send + 'static>() -> Option<Arc<dyn MessageBus<T>>> {
    match detect_transport() {
        TransportKind::Local => Some(Arc::new(LocalBus::new())),

        // Future backends:
        // TransportKind::WebSocket => Some(Arc::new(WsBus::connect(url)?)),
        TransportKind::Unknown => None,
    }
}
