//! Settings file watcher.
//!
//! Watches the on-disk settings file and pushes a full replacement
//! through the host whenever it changes, which rebroadcasts
//! `SETTINGS_UPDATE` to every display.

use log::{info, warn};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::config;
use crate::services::order_host::OrderHost;

/// Start watching the settings file. Returns the watcher handle, which
/// must be kept alive for events to keep arriving. Returns `None` when
/// watching cannot be set up; the host then simply runs with the
/// settings it loaded at startup.
pub fn start(host: OrderHost) -> Option<RecommendedWatcher> {
    let path = config::settings_path();
    let dir = path.parent()?.to_path_buf();
    let watched = path.clone();

    let handler = move |res: Result<Event, notify::Error>| match res {
        Ok(event) if event.paths.iter().any(|p| p == &watched) => {
            match config::load_settings(&watched) {
                Ok(settings) => {
                    info!("settings file changed, rebroadcasting");
                    host.update_settings(settings);
                }
                Err(err) => warn!("settings reload failed: {err}"),
            }
        }
        Ok(_) => {}
        Err(err) => warn!("settings watcher error: {err}"),
    };

    let mut watcher = match notify::recommended_watcher(handler) {
        Ok(watcher) => watcher,
        Err(err) => {
            warn!("could not create settings watcher: {err}");
            return None;
        }
    };

    // Watch the parent directory: editors often replace the file
    // atomically rather than writing in place.
    if let Err(err) = watcher.watch(&dir, RecursiveMode::NonRecursive) {
        warn!("could not watch {}: {err}", dir.display());
        return None;
    }

    info!("watching {} for settings changes", path.display());
    Some(watcher)
}
