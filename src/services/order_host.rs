//! Authoritative order store for the POS host process.
//!
//! Owns the orders/tables/settings source of truth and services the sync
//! channel: answers snapshot requests and applies kitchen commands, then
//! broadcasts full-replacement updates. Displays never mutate their own
//! copies; this host's broadcasts are the only path to a visible change.

use std::sync::{Arc, Mutex};

use cast_bus::MessageBus;
use log::{debug, info, warn};
use serde_json::Value;

use crate::model::{Order, OrderStatus, PosSettings, Table};
use crate::protocol::{self, PosMessage, StateSnapshot};

/// Source-of-truth state owned by the host.
#[derive(Debug, Default)]
pub struct PosState {
    pub orders: Vec<Order>,
    pub tables: Vec<Table>,
    pub settings: PosSettings,
    pub current_location_id: Option<String>,
}

/// Cloneable handle to the authoritative order store.
#[derive(Clone)]
pub struct OrderHost {
    state: Arc<Mutex<PosState>>,
    bus: Arc<dyn MessageBus<Value>>,
}

impl OrderHost {
    pub fn new(bus: Arc<dyn MessageBus<Value>>, state: PosState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            bus,
        }
    }

    /// Spawn the loop servicing the sync channel.
    pub fn start(&self) {
        let host = self.clone();
        let mut sub = self.bus.subscribe();
        tokio::spawn(async move {
            info!("order host servicing sync channel");
            while let Some(envelope) = sub.recv().await {
                let Some(msg) = protocol::decode(&envelope) else {
                    continue;
                };
                host.handle_message(msg);
            }
            info!("sync channel closed, order host stopping");
        });
    }

    pub(crate) fn handle_message(&self, msg: PosMessage) {
        match msg {
            PosMessage::RequestState => self.broadcast_snapshot(),
            PosMessage::CompleteKdsOrder { order_id } => {
                if self.complete_order(&order_id) {
                    self.broadcast_orders();
                }
            }
            PosMessage::TogglePreparedItem { order_id, cart_id } => {
                if self.toggle_prepared(&order_id, &cart_id) {
                    self.broadcast_orders();
                }
            }
            // Our own downstream broadcasts echo back on the shared channel.
            PosMessage::StateSync(_)
            | PosMessage::OrdersUpdate(_)
            | PosMessage::SettingsUpdate(_) => {}
        }
    }

    /// Mark a kitchen order completed. Status moves forward only, so an
    /// order already in a terminal state is left alone.
    pub fn complete_order(&self, order_id: &str) -> bool {
        let mut state = self.state.lock().unwrap();
        match state.orders.iter_mut().find(|o| o.id == order_id) {
            Some(order) if !order.status.is_terminal() => {
                order.status = OrderStatus::Completed;
                info!("order {order_id} completed from kitchen display");
                true
            }
            Some(order) => {
                debug!("complete for order {order_id} ignored, status {:?}", order.status);
                false
            }
            None => {
                warn!("complete for unknown order {order_id} ignored");
                false
            }
        }
    }

    /// Flip a cart line's prepared flag. No guard: staff can un-prepare
    /// an item even when the rest of the ticket is done.
    pub fn toggle_prepared(&self, order_id: &str, cart_id: &str) -> bool {
        let mut state = self.state.lock().unwrap();
        let Some(order) = state.orders.iter_mut().find(|o| o.id == order_id) else {
            warn!("toggle for unknown order {order_id} ignored");
            return false;
        };
        match order
            .prepared_cart_item_ids
            .iter()
            .position(|id| id == cart_id)
        {
            Some(idx) => {
                order.prepared_cart_item_ids.remove(idx);
            }
            None => order.prepared_cart_item_ids.push(cart_id.to_string()),
        }
        true
    }

    /// Terminal-side entry point: register a new order and broadcast.
    pub fn submit_order(&self, order: Order) {
        {
            let mut state = self.state.lock().unwrap();
            state.orders.push(order);
        }
        self.broadcast_orders();
    }

    /// Replace the settings object and broadcast the new one.
    pub fn update_settings(&self, settings: PosSettings) {
        {
            let mut state = self.state.lock().unwrap();
            state.settings = settings.clone();
        }
        self.bus
            .publish(protocol::encode(&PosMessage::SettingsUpdate(settings)));
    }

    pub fn settings(&self) -> PosSettings {
        self.state.lock().unwrap().settings.clone()
    }

    fn broadcast_snapshot(&self) {
        let snapshot = {
            let state = self.state.lock().unwrap();
            StateSnapshot {
                all_orders: Some(state.orders.clone()),
                all_tables: Some(state.tables.clone()),
                all_settings: Some(state.settings.clone()),
                current_location_id: state.current_location_id.clone(),
            }
        };
        self.bus
            .publish(protocol::encode(&PosMessage::StateSync(snapshot)));
    }

    fn broadcast_orders(&self) {
        let orders = self.state.lock().unwrap().orders.clone();
        self.bus
            .publish(protocol::encode(&PosMessage::OrdersUpdate(orders)));
    }
}
