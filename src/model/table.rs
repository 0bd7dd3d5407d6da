//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Dining table entity. Displays only look tables up to resolve an
/// order's `tableId` into a human-readable label.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: String,
    pub name: String,
}
