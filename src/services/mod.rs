//! Authoritative POS host services.
//!
//! Services own the source-of-truth state and broadcast replacement
//! snapshots to satellite displays over the sync channel.
//!
//! - `order_host` - Order store, snapshot requests, kitchen commands
//! - `settings_watcher` - Reload settings.json on change and rebroadcast
//! - `terminal_feed` - Simulated in-store terminal entering orders

pub mod order_host;
pub mod settings_watcher;
pub mod terminal_feed;
