//! Kitchen ticket: per-order presentation state for the KDS.

use crate::functions::formatting;
use crate::model::Order;

/// Preparation phase of a displayed ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketPhase {
    /// Just entered the kitchen view, nothing marked yet.
    Pending,
    /// Some but not all cart lines marked prepared.
    PartiallyPrepared,
    /// Every cart line marked; completion is enabled.
    FullyPrepared,
}

/// One order as shown on the kitchen display.
#[derive(Debug, Clone)]
pub struct Ticket {
    pub order: Order,
    /// Resolved table name, when the order references a table.
    pub table_label: Option<String>,
}

impl Ticket {
    pub fn phase(&self) -> TicketPhase {
        if self.order.is_fully_prepared() {
            TicketPhase::FullyPrepared
        } else if self.order.prepared_count() == 0 {
            TicketPhase::Pending
        } else {
            TicketPhase::PartiallyPrepared
        }
    }

    /// The Complete control is enabled only for fully prepared tickets.
    pub fn is_complete_enabled(&self) -> bool {
        self.phase() == TicketPhase::FullyPrepared
    }

    /// Whether a given cart line is marked prepared.
    pub fn is_prepared(&self, cart_id: &str) -> bool {
        self.order
            .prepared_cart_item_ids
            .iter()
            .any(|id| id == cart_id)
    }

    /// Elapsed time since creation as the display string.
    pub fn elapsed(&self, now_ms: i64) -> String {
        formatting::format_elapsed(now_ms - self.order.created_at)
    }

    /// Late iff an estimate exists and the fractional elapsed minutes
    /// strictly exceed it. The display string floors to whole seconds,
    /// but lateness flips the instant the threshold is crossed.
    pub fn is_late(&self, now_ms: i64) -> bool {
        match self.order.estimated_prep_time_minutes {
            Some(estimate) => {
                let elapsed_minutes = (now_ms - self.order.created_at) as f64 / 60_000.0;
                elapsed_minutes > estimate as f64
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CartItem, OrderSource, OrderStatus, OrderType};

    fn ticket(cart_ids: &[&str], prepared: &[&str], estimate: Option<u32>) -> Ticket {
        Ticket {
            order: Order {
                id: "o1".into(),
                status: OrderStatus::Kitchen,
                location_id: None,
                table_id: None,
                created_at: 0,
                estimated_prep_time_minutes: estimate,
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
            },
            table_label: None,
        }
    }

    #[test]
    fn test_phase_progression() {
        assert_eq!(ticket(&["c1", "c2"], &[], None).phase(), TicketPhase::Pending);
        assert_eq!(
            ticket(&["c1", "c2"], &["c1"], None).phase(),
            TicketPhase::PartiallyPrepared
        );
        assert_eq!(
            ticket(&["c1", "c2"], &["c1", "c2"], None).phase(),
            TicketPhase::FullyPrepared
        );
    }

    #[test]
    fn test_complete_needs_every_line_counted_once() {
        // Duplicates in the prepared list do not double count.
        let t = ticket(&["c1", "c2"], &["c1", "c1"], None);
        assert!(!t.is_complete_enabled());

        let t = ticket(&["c1", "c2"], &["c1", "c2"], None);
        assert!(t.is_complete_enabled());
    }

    #[test]
    fn test_elapsed_minutes_are_not_wrapped() {
        // 125 minutes 3 seconds.
        let t = ticket(&["c1"], &[], None);
        let now_ms = (125 * 60 + 3) * 1000;
        assert_eq!(t.elapsed(now_ms), "125:03");
    }

    #[test]
    fn test_not_late_without_an_estimate() {
        let t = ticket(&["c1"], &[], None);
        assert!(!t.is_late(90 * 60_000));
    }

    #[test]
    fn test_late_boundary_is_strict() {
        let t = ticket(&["c1"], &[], Some(10));

        // Exactly at the threshold: not late.
        assert!(!t.is_late(10 * 60_000));
        // One millisecond past: late.
        assert!(t.is_late(10 * 60_000 + 1));
    }

    #[test]
    fn test_lateness_uses_fractional_minutes() {
        let t = ticket(&["c1"], &[], Some(10));

        // 10 minutes 30 seconds: the display still reads "10:30" (floored
        // minutes) but the ticket is already late.
        let now_ms = 10 * 60_000 + 30_000;
        assert_eq!(t.elapsed(now_ms), "10:30");
        assert!(t.is_late(now_ms));
    }
}
