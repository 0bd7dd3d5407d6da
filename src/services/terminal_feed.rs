//! Simulated in-store terminal feed.
//!
//! Stands in for the POS terminal entering orders: a background thread
//! generates seeded random orders and hands them over a crossbeam channel
//! to a bridge that submits them to the host. Each submission triggers an
//! `ORDERS_UPDATE` broadcast exactly like a real terminal would.

use std::thread;
use std::time::Duration;

use chrono::Utc;
use crossbeam_channel::bounded;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::{CartItem, Order, OrderSource, OrderStatus, OrderType};
use crate::services::order_host::OrderHost;

const MENU: &[(&str, &str)] = &[
    ("m_burger", "Smash Burger"),
    ("m_fries", "Fries"),
    ("m_salad", "Caesar Salad"),
    ("m_pasta", "Pasta Carbonara"),
    ("m_wings", "Chicken Wings"),
    ("m_cola", "Cola"),
];

const MODIFIERS: &[&str] = &["no onion", "extra cheese", "gluten free", "spicy"];

const ORDER_TYPES: &[OrderType] = &[
    OrderType::DineIn,
    OrderType::Takeaway,
    OrderType::Delivery,
    OrderType::Tab,
];

/// Start the feed. One new kitchen order lands every `interval`.
pub fn start(host: OrderHost, location_id: String, seed: u64, interval: Duration) {
    let (tx, rx) = bounded::<Order>(8);
    let default_prep = host.settings().default_prep_time_minutes;

    thread::spawn(move || {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut seq = 0u32;
        loop {
            seq += 1;
            let order = random_order(&mut rng, seq, &location_id, default_prep);
            if tx.send(order).is_err() {
                break;
            }
            thread::sleep(interval);
        }
    });

    // Bridge: crossbeam receiver into host submissions.
    tokio::task::spawn_blocking(move || {
        for order in rx.iter() {
            info!(
                "terminal feed: order {} ({} lines)",
                order.id,
                order.cart.len()
            );
            host.submit_order(order);
        }
    });
}

fn random_cart_item(rng: &mut StdRng, seq: u32, line: usize) -> CartItem {
    let (menu_item_id, name) = MENU[rng.gen_range(0..MENU.len())];
    let modifiers = if rng.gen_range(0..3) == 0 {
        vec![MODIFIERS[rng.gen_range(0..MODIFIERS.len())].to_string()]
    } else {
        Vec::new()
    };

    CartItem {
        cart_id: format!("c{seq}_{line}"),
        menu_item_id: menu_item_id.to_string(),
        name: name.to_string(),
        quantity: rng.gen_range(1..4),
        modifiers,
    }
}

fn random_order(
    rng: &mut StdRng,
    seq: u32,
    location_id: &str,
    default_prep: Option<u32>,
) -> Order {
    let lines = rng.gen_range(1..5);
    let cart = (0..lines)
        .map(|line| random_cart_item(rng, seq, line))
        .collect();

    let order_type = ORDER_TYPES[rng.gen_range(0..ORDER_TYPES.len())];
    let table_id = match order_type {
        OrderType::DineIn | OrderType::Tab => Some(format!("t{}", rng.gen_range(1..5))),
        _ => None,
    };

    // Roughly one in four orders goes out without an estimate.
    let estimated_prep_time_minutes = if rng.gen_range(0..4) == 0 {
        None
    } else {
        default_prep.or_else(|| Some(rng.gen_range(8..16)))
    };

    Order {
        id: format!("o{seq}"),
        status: OrderStatus::Kitchen,
        location_id: Some(location_id.to_string()),
        table_id,
        created_at: Utc::now().timestamp_millis(),
        estimated_prep_time_minutes,
        cart,
        prepared_cart_item_ids: Vec::new(),
        order_type,
        source: if order_type == OrderType::Delivery {
            OrderSource::Online
        } else {
            OrderSource::InStore
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_orders_enter_the_kitchen() {
        let mut rng = StdRng::seed_from_u64(7);
        for seq in 1..20 {
            let order = random_order(&mut rng, seq, "loc_1", Some(12));
            assert_eq!(order.status, OrderStatus::Kitchen);
            assert_eq!(order.location_id.as_deref(), Some("loc_1"));
            assert!(!order.cart.is_empty());
            assert!(order.prepared_cart_item_ids.is_empty());
        }
    }

    #[test]
    fn test_cart_ids_are_unique_within_an_order() {
        let mut rng = StdRng::seed_from_u64(7);
        let order = random_order(&mut rng, 1, "loc_1", None);
        let mut ids: Vec<_> = order.cart.iter().map(|i| i.cart_id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), order.cart.len());
    }
}
