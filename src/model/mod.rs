//! Domain models replicated between the POS host and satellite displays.

pub mod order;
pub mod settings;
pub mod table;

pub use order::{CartItem, Order, OrderSource, OrderStatus, OrderType};
pub use settings::PosSettings;
pub use table::Table;
