//! Local KDS view of the replicated POS state.

use log::debug;

use super::ticket::Ticket;
use crate::model::{Order, OrderStatus, PosSettings, Table};
use crate::protocol::PosMessage;

/// Copy-on-broadcast snapshot held by one kitchen display. Every incoming
/// update replaces a whole top-level field; nothing is patched in place.
#[derive(Debug, Default)]
pub struct KdsView {
    orders: Vec<Order>,
    tables: Vec<Table>,
    settings: PosSettings,
    location_id: Option<String>,
}

impl KdsView {
    /// Apply one decoded sync message. Snapshot fields that are absent
    /// leave prior state untouched; update messages replace wholesale.
    pub fn apply(&mut self, msg: PosMessage) {
        match msg {
            PosMessage::StateSync(snapshot) => {
                if let Some(orders) = snapshot.all_orders {
                    self.orders = orders;
                }
                if let Some(tables) = snapshot.all_tables {
                    self.tables = tables;
                }
                if let Some(settings) = snapshot.all_settings {
                    self.settings = settings;
                }
                if let Some(location) = snapshot.current_location_id {
                    self.location_id = Some(location);
                }
            }
            PosMessage::OrdersUpdate(orders) => self.orders = orders,
            PosMessage::SettingsUpdate(settings) => self.settings = settings,
            // Requests and commands belong to the host side of the channel.
            PosMessage::RequestState
            | PosMessage::CompleteKdsOrder { .. }
            | PosMessage::TogglePreparedItem { .. } => {
                debug!("display ignoring upstream message {}", msg.kind());
            }
        }
    }

    /// Derive the ticket list: kitchen-status orders for this display's
    /// location, in the order the host sent them. No independent sort.
    pub fn tickets(&self) -> Vec<Ticket> {
        self.orders
            .iter()
            .filter(|order| order.status == OrderStatus::Kitchen)
            .filter(|order| match &self.location_id {
                Some(mine) => order.location_id.as_deref() == Some(mine.as_str()),
                None => true,
            })
            .map(|order| Ticket {
                order: order.clone(),
                table_label: self.table_label(order.table_id.as_deref()),
            })
            .collect()
    }

    fn table_label(&self, table_id: Option<&str>) -> Option<String> {
        let id = table_id?;
        self.tables.iter().find(|t| t.id == id).map(|t| t.name.clone())
    }

    pub fn settings(&self) -> &PosSettings {
        &self.settings
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn location_id(&self) -> Option<&str> {
        self.location_id.as_deref()
    }
}
