//! # Saved Configuration Snapshots
//!
//! A visitor can name and save the configuration they are working on and
//! come back to it later. A snapshot is a full copy, not a reference: later
//! edits to the live configuration never touch it, and the price is frozen
//! exactly as the quote panel showed it at save time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::config::Configuration;
use crate::money::Money;

/// An immutable, user-named snapshot of a configuration plus its quote.
///
/// Lifecycle is create/delete only; there is no update. Construction happens
/// in the store layer (which owns id generation and timestamps) — this crate
/// only defines the shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SavedConfiguration {
    /// Unique snapshot id (UUID v4).
    pub id: String,

    /// User-chosen display name.
    pub name: String,

    /// Deep copy of the configuration at save time.
    pub config: Configuration,

    /// Quote at save time. Display-only: loading a snapshot re-prices it
    /// against the current catalog.
    pub price: Money,

    /// When the snapshot was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_shape() {
        let snapshot = SavedConfiguration {
            id: "00000000-0000-0000-0000-000000000001".to_string(),
            name: "Walnut chair".to_string(),
            config: Configuration::new(),
            price: Money::from_units(1640),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"price\":1640"));

        let back: SavedConfiguration = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
