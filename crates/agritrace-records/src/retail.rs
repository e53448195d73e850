//! Retail record: final receipt of a shipment at a store.

use agritrace_core::{DecimalInput, Timestamp};
use serde::{Deserialize, Serialize};

use crate::validate::{ValidationError, Validator};

/// Raw retail data as submitted by the retailer on receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetailerPayload {
    pub store_location: String,
    pub store_id: String,
    pub date_received: String,
    /// Unit price; accepted as a JSON number or a numeric string.
    pub price: DecimalInput,
    pub sell_by_date: String,
    pub shelf_life: String,
}

/// Validated retail data as stored on the shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetailerData {
    pub store_location: String,
    pub store_id: String,
    pub date_received: Timestamp,
    pub price: f64,
    pub sell_by_date: Timestamp,
    pub shelf_life: String,
}

impl RetailerPayload {
    /// Validate every field, reporting all violations at once.
    pub fn validate(&self) -> Result<RetailerData, ValidationError> {
        let mut v = Validator::new();
        let store_location = v.require_text("storeLocation", &self.store_location);
        let store_id = v.require_text("storeId", &self.store_id);
        let date_received = v.require_timestamp("dateReceived", &self.date_received);
        let price = v.require_decimal("price", &self.price);
        if price < 0.0 {
            v.violation("price", format!("must not be negative, got {price}"));
        }
        let sell_by_date = v.require_timestamp("sellByDate", &self.sell_by_date);
        let shelf_life = v.require_text("shelfLife", &self.shelf_life);
        v.finish(RetailerData {
            store_location,
            store_id,
            date_received,
            price,
            sell_by_date,
            shelf_life,
        })
    }
}
