//! Kitchen Display System (KDS).
//!
//! Passive consumer of the sync channel: requests a snapshot on attach,
//! applies replacement broadcasts, and renders kitchen tickets each tick.
//! Commands go upstream fire-and-forget; the local view changes only when
//! the host's next broadcast echoes the effect back.

mod ticket;
mod view;

pub use ticket::{Ticket, TicketPhase};
pub use view::KdsView;

use std::sync::Arc;
use std::time::Duration;

use cast_bus::{MessageBus, Subscription};
use chrono::Utc;
use log::info;
use serde_json::Value;

use crate::functions::formatting;
use crate::protocol::{self, PosMessage};

/// How often the display refreshes timers and drains the channel.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// One attached kitchen display.
pub struct KdsDisplay {
    bus: Arc<dyn MessageBus<Value>>,
    sub: Subscription<Value>,
    view: KdsView,
}

impl KdsDisplay {
    /// Attach a display to the sync channel and request a snapshot.
    /// With no host listening the request is simply dropped and the
    /// display stays empty; there is no timeout and no error state.
    pub fn connect(bus: Arc<dyn MessageBus<Value>>) -> Self {
        let sub = bus.subscribe();
        let display = Self {
            bus,
            sub,
            view: KdsView::default(),
        };
        info!("kitchen display attached to {}", protocol::SYNC_CHANNEL);
        display.request_state();
        display
    }

    /// Ask the host for a full snapshot. Fire-and-forget.
    pub fn request_state(&self) {
        self.bus.publish(protocol::encode(&PosMessage::RequestState));
    }

    /// Request a prepared-flag flip. The local view is left untouched;
    /// the next `ORDERS_UPDATE` broadcast reflects the change.
    pub fn toggle_prepared(&self, order_id: &str, cart_id: &str) {
        self.bus
            .publish(protocol::encode(&PosMessage::TogglePreparedItem {
                order_id: order_id.to_string(),
                cart_id: cart_id.to_string(),
            }));
    }

    /// Request completion of a fully prepared order. The ticket only
    /// disappears once a later broadcast excludes it.
    pub fn complete(&self, order_id: &str) {
        self.bus
            .publish(protocol::encode(&PosMessage::CompleteKdsOrder {
                order_id: order_id.to_string(),
            }));
    }

    /// Drain pending channel messages into the view. Malformed envelopes
    /// are dropped inside the decoder.
    pub fn pump(&mut self) {
        for envelope in self.sub.drain() {
            if let Some(msg) = protocol::decode(&envelope) {
                self.view.apply(msg);
            }
        }
    }

    pub fn view(&self) -> &KdsView {
        &self.view
    }

    /// Print the current ticket board to the terminal.
    pub fn render(&self) {
        let now_ms = Utc::now().timestamp_millis();
        let settings = self.view.settings();
        let tickets = self.view.tickets();

        println!();
        println!(
            "== {} KDS | {} | {} open ticket(s) ==",
            settings.business_name,
            formatting::clock_line(),
            tickets.len()
        );

        for ticket in &tickets {
            let late = if ticket.is_late(now_ms) { "  *LATE*" } else { "" };
            let table = ticket.table_label.as_deref().unwrap_or("-");
            println!(
                "[{}] {:?} | table {} | {}{}",
                ticket.order.id,
                ticket.order.order_type,
                table,
                ticket.elapsed(now_ms),
                late
            );
            if settings.kds_show_source {
                println!("    via {:?}", ticket.order.source);
            }
            for item in &ticket.order.cart {
                let mark = if ticket.is_prepared(&item.cart_id) { "x" } else { " " };
                let mods = if item.modifiers.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", item.modifiers.join(", "))
                };
                println!("  [{mark}] {} x{}{mods}", item.name, item.quantity);
            }
            if ticket.is_complete_enabled() {
                println!("    READY - complete enabled");
            }
        }
    }
}
