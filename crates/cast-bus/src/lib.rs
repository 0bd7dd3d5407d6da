//! cast-bus: pub/sub transport abstraction for POS display sync.
//!
//! The POS host and its satellite displays (kitchen screen, customer
//! display, kiosk) exchange messages over one shared channel. This crate
//! hides the transport behind a small publish/subscribe interface so the
//! backend (in-process broadcast channel today, a socket later) can be
//! swapped without touching host or display logic.

mod bus;
mod local;
mod transport;

pub use bus::{MessageBus, Subscription};
pub use local::{CHANNEL_CAPACITY, LocalBus};
pub use transport::{TransportKind, create_bus, detect_transport};
