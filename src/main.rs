//! OrderCast - headless POS display-sync engine.
//!
//! Single-process demo wiring: the authoritative host, a simulated
//! in-store terminal feed, and a kitchen display all share one sync
//! channel. Swap the transport and the displays move out of process.

mod config;
mod displays;
mod functions;
mod model;
mod protocol;
mod services;

use std::error::Error;
use std::time::Duration;

use cast_bus::create_bus;
use log::info;
use serde_json::Value;

use displays::kds::{KdsDisplay, TICK_INTERVAL};
use model::Table;
use services::order_host::{OrderHost, PosState};

const FEED_SEED: u64 = 42;
const FEED_INTERVAL: Duration = Duration::from_secs(7);
const DEMO_LOCATION: &str = "loc_main";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    info!("Starting OrderCast...");

    // First run: write a default settings file so it can be hand-edited
    // (the watcher rebroadcasts any later change).
    let settings_path = config::settings_path();
    if !settings_path.exists() {
        config::save_settings(&settings_path, &model::PosSettings::default())?;
    }
    let settings = config::load_settings(&settings_path)?;

    let Some(bus) = create_bus::<Value>() else {
        return Err("unsupported sync transport, check ORDERCAST_TRANSPORT".into());
    };

    // Authoritative side: order store plus settings watcher.
    let host = OrderHost::new(
        bus.clone(),
        PosState {
            tables: demo_tables(),
            settings,
            current_location_id: Some(DEMO_LOCATION.to_string()),
            ..PosState::default()
        },
    );
    host.start();

    // Keep the watcher handle alive for the whole run.
    let _settings_watcher = services::settings_watcher::start(host.clone());

    // Simulated terminal entering orders.
    services::terminal_feed::start(host, DEMO_LOCATION.to_string(), FEED_SEED, FEED_INTERVAL);

    // The kitchen display: drain the channel, render, let the demo staff
    // work the tickets. Commands go upstream; effects arrive with the
    // next broadcast.
    let mut display = KdsDisplay::connect(bus);
    let mut tick = tokio::time::interval(TICK_INTERVAL);
    loop {
        tick.tick().await;
        display.pump();
        display.render();
        run_demo_staff(&display);
    }
}

fn demo_tables() -> Vec<Table> {
    [
        ("t1", "Window 1"),
        ("t2", "Window 2"),
        ("t3", "Patio 1"),
        ("t4", "Bar"),
    ]
    .into_iter()
    .map(|(id, name)| Table {
        id: id.to_string(),
        name: name.to_string(),
    })
    .collect()
}

/// Simulated kitchen staff: marks one line per tick on the oldest ticket
/// and completes it once every line is done.
fn run_demo_staff(display: &KdsDisplay) {
    let Some(ticket) = display.view().tickets().into_iter().next() else {
        return;
    };

    if ticket.is_complete_enabled() {
        display.complete(&ticket.order.id);
        return;
    }

    if let Some(item) = ticket
        .order
        .cart
        .iter()
        .find(|item| !ticket.is_prepared(&item.cart_id))
    {
        display.toggle_prepared(&ticket.order.id, &item.cart_id);
    }
}
