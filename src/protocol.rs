//! Message protocol for the POS sync channel.
//!
//! Every participant exchanges JSON envelopes `{"type": ..., "payload": ...}`
//! on one shared channel. Validation is deliberately shallow: list payloads
//! get a plain is-array check, everything else is a best-effort decode, and
//! any malformed envelope is logged and dropped. Failure never reaches the
//! user; a display that misses a message just waits for the next broadcast.

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::model::{Order, PosSettings, Table};

/// Channel name shared by the POS host and all satellite displays.
/// The local transport routes by bus handle, but named routing keeps the
/// seam ready for socket transports.
pub const SYNC_CHANNEL: &str = "ordercast-sync";

// Wire tags.
const REQUEST_STATE: &str = "REQUEST_STATE";
const STATE_SYNC: &str = "STATE_SYNC";
const ORDERS_UPDATE: &str = "ORDERS_UPDATE";
const SETTINGS_UPDATE: &str = "SETTINGS_UPDATE";
const COMPLETE_KDS_ORDER: &str = "COMPLETE_KDS_ORDER";
const TOGGLE_PREPARED_ITEM: &str = "TOGGLE_PREPARED_ITEM";

/// Full state snapshot sent in answer to `REQUEST_STATE`.
/// Any or all fields may be absent; absent fields leave the consumer's
/// prior local state untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_orders: Option<Vec<Order>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_tables: Option<Vec<Table>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_settings: Option<PosSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_location_id: Option<String>,
}

/// Decoded messages on the sync channel.
#[derive(Debug, Clone)]
pub enum PosMessage {
    /// display → host: ask for a full snapshot.
    RequestState,
    /// host → display: full snapshot, partial fields optional.
    StateSync(StateSnapshot),
    /// host → display: full replacement of the order list.
    OrdersUpdate(Vec<Order>),
    /// host → display: full replacement of the settings object.
    SettingsUpdate(PosSettings),
    /// display → host: request order completion.
    CompleteKdsOrder { order_id: String },
    /// display → host: request a prepared-flag toggle.
    TogglePreparedItem { order_id: String, cart_id: String },
}

impl PosMessage {
    /// Wire tag for this message.
    pub fn kind(&self) -> &'static str {
        match self {
            PosMessage::RequestState => REQUEST_STATE,
            PosMessage::StateSync(_) => STATE_SYNC,
            PosMessage::OrdersUpdate(_) => ORDERS_UPDATE,
            PosMessage::SettingsUpdate(_) => SETTINGS_UPDATE,
            PosMessage::CompleteKdsOrder { .. } => COMPLETE_KDS_ORDER,
            PosMessage::TogglePreparedItem { .. } => TOGGLE_PREPARED_ITEM,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompleteOrderPayload {
    order_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TogglePreparedPayload {
    order_id: String,
    cart_id: String,
}

/// Encode a message into its wire envelope.
pub fn encode(msg: &PosMessage) -> Value {
    match msg {
        PosMessage::RequestState => json!({ "type": REQUEST_STATE }),
        PosMessage::StateSync(snapshot) => json!({ "type": STATE_SYNC, "payload": snapshot }),
        PosMessage::OrdersUpdate(orders) => json!({ "type": ORDERS_UPDATE, "payload": orders }),
        PosMessage::SettingsUpdate(settings) => {
            json!({ "type": SETTINGS_UPDATE, "payload": settings })
        }
        PosMessage::CompleteKdsOrder { order_id } => json!({
            "type": COMPLETE_KDS_ORDER,
            "payload": { "orderId": order_id },
        }),
        PosMessage::TogglePreparedItem { order_id, cart_id } => json!({
            "type": TOGGLE_PREPARED_ITEM,
            "payload": { "orderId": order_id, "cartId": cart_id },
        }),
    }
}

/// Decode a wire envelope. Returns `None` for anything malformed or
/// unknown; the envelope is logged and dropped, never surfaced.
pub fn decode(envelope: &Value) -> Option<PosMessage> {
    let Some(kind) = envelope.get("type").and_then(Value::as_str) else {
        warn!("sync message without a type tag dropped");
        return None;
    };
    let payload = envelope.get("payload");

    match kind {
        REQUEST_STATE => Some(PosMessage::RequestState),
        STATE_SYNC => {
            let payload = payload.cloned().unwrap_or_else(|| json!({}));
            match serde_json::from_value::<StateSnapshot>(payload) {
                Ok(snapshot) => Some(PosMessage::StateSync(snapshot)),
                Err(err) => {
                    warn!("malformed {STATE_SYNC} payload dropped: {err}");
                    None
                }
            }
        }
        ORDERS_UPDATE => {
            // Shallow shape check displays rely on: a non-array payload
            // must leave the current order list unchanged.
            let Some(payload) = payload.filter(|p| p.is_array()) else {
                warn!("{ORDERS_UPDATE} without an array payload dropped");
                return None;
            };
            match serde_json::from_value::<Vec<Order>>(payload.clone()) {
                Ok(orders) => Some(PosMessage::OrdersUpdate(orders)),
                Err(err) => {
                    warn!("malformed {ORDERS_UPDATE} payload dropped: {err}");
                    None
                }
            }
        }
        SETTINGS_UPDATE => {
            match serde_json::from_value::<PosSettings>(payload.cloned().unwrap_or(Value::Null)) {
                Ok(settings) => Some(PosMessage::SettingsUpdate(settings)),
                Err(err) => {
                    warn!("malformed {SETTINGS_UPDATE} payload dropped: {err}");
                    None
                }
            }
        }
        COMPLETE_KDS_ORDER => {
            match serde_json::from_value::<CompleteOrderPayload>(
                payload.cloned().unwrap_or(Value::Null),
            ) {
                Ok(p) => Some(PosMessage::CompleteKdsOrder {
                    order_id: p.order_id,
                }),
                Err(err) => {
                    warn!("malformed {COMPLETE_KDS_ORDER} payload dropped: {err}");
                    None
                }
            }
        }
        TOGGLE_PREPARED_ITEM => {
            match serde_json::from_value::<TogglePreparedPayload>(
                payload.cloned().unwrap_or(Value::Null),
            ) {
                Ok(p) => Some(PosMessage::TogglePreparedItem {
                    order_id: p.order_id,
                    cart_id: p.cart_id,
                }),
                Err(err) => {
                    warn!("malformed {TOGGLE_PREPARED_ITEM} payload dropped: {err}");
                    None
                }
            }
        }
        other => {
            warn!("unknown sync message type {other} dropped");
            None
        }
    }
}
