//! POS Settings Model

use serde::{Deserialize, Serialize};

/// Settings replicated to displays. Updates arrive as full replacements
/// of the whole object, never as patches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PosSettings {
    pub business_name: String,
    /// Fallback prep-time estimate applied by the terminal when a new
    /// order has no explicit estimate.
    pub default_prep_time_minutes: Option<u32>,
    /// Show the order source badge on kitchen tickets.
    pub kds_show_source: bool,
}

impl Default for PosSettings {
    fn default() -> Self {
        Self {
            business_name: "OrderCast".to_string(),
            default_prep_time_minutes: None,
            kds_show_source: true,
        }
    }
}
