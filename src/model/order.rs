//! Order Model

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Order lifecycle status. Transitions are forward-only; once an order
/// leaves `Kitchen` for a terminal state it never comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Kitchen,
    Completed,
    Delivered,
    OutForDelivery,
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, OrderStatus::Kitchen)
    }
}

/// How the order is fulfilled. Display styling only, no behavioral rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    DineIn,
    Takeaway,
    Delivery,
    Kiosk,
    Tab,
}

/// Where the order was entered. Display styling only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderSource {
    InStore,
    Online,
    Kiosk,
    Phone,
}

/// One line in an order's cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Unique within the order; the unit of "prepared" tracking.
    pub cart_id: String,
    pub menu_item_id: String,
    pub name: String,
    pub quantity: u32,
    #[serde(default)]
    pub modifiers: Vec<String>,
}

/// Customer order as replicated to satellite displays.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub status: OrderStatus,
    #[serde(default)]
    pub location_id: Option<String>,
    #[serde(default)]
    pub table_id: Option<String>,
    /// Creation time in epoch millis; source of the elapsed-time clock.
    pub created_at: i64,
    #[serde(default)]
    pub estimated_prep_time_minutes: Option<u32>,
    pub cart: Vec<CartItem>,
    /// Cart ids marked prepared by kitchen staff. Grows and shrinks via
    /// toggle commands; the host owns it, displays only read it.
    #[serde(default)]
    pub prepared_cart_item_ids: Vec<String>,
    pub order_type: OrderType,
    pub source: OrderSource,
}

impl Order {
    /// Number of distinct prepared cart ids. Duplicate ids in the list
    /// do not double count.
    pub fn prepared_count(&self) -> usize {
        self.prepared_cart_item_ids
            .iter()
            .collect::<HashSet<_>>()
            .len()
    }

    /// Fully prepared iff the prepared set covers every cart line.
    pub fn is_fully_prepared(&self) -> bool {
        self.prepared_count() == self.cart.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_with(cart_ids: &[&str], prepared: &[&str]) -> Order {
        Order {
            id: "o1".into(),
            status: OrderStatus::Kitchen,
            location_id: None,
            table_id: None,
            created_at: 0,
            estimated_prep_time_minutes: None,
            cart: cart_ids
                .iter()
                .map(|id| CartItem {
                    cart_id: (*id).into(),
                    menu_item_id: "m1".into(),
                    name: "Fries".into(),
                    quantity: 1,
                    modifiers: Vec::new(),
                })
                .collect(),
            prepared_cart_item_ids: prepared.iter().map(|id| (*id).into()).collect(),
            order_type: OrderType::DineIn,
            source: OrderSource::InStore,
        }
    }

    #[test]
    fn test_duplicate_prepared_ids_do_not_double_count() {
        let order = order_with(&["c1", "c2"], &["c1", "c1"]);
        assert_eq!(order.prepared_count(), 1);
        assert!(!order.is_fully_prepared());
    }

    #[test]
    fn test_fully_prepared_when_set_covers_cart() {
        let order = order_with(&["c1", "c2"], &["c2", "c1"]);
        assert!(order.is_fully_prepared());
    }

    #[test]
    fn test_status_wire_names_are_kebab_case() {
        let json = serde_json::to_value(OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, serde_json::json!("out-for-delivery"));
        let back: OrderStatus = serde_json::from_value(serde_json::json!("kitchen")).unwrap();
        assert_eq!(back, OrderStatus::Kitchen);
    }

    #[test]
    fn test_order_wire_field_names_are_camel_case() {
        let order = order_with(&["c1"], &[]);
        let json = serde_json::to_value(&order).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("preparedCartItemIds").is_some());
        assert_eq!(json["cart"][0].get("cartId"), Some(&serde_json::json!("c1")));
    }
}
