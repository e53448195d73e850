//! Distribution record: transport of processed goods to a retailer.

use agritrace_core::{ActorAlias, DecimalInput, Timestamp};
use serde::{Deserialize, Serialize};

use crate::validate::{ValidationError, Validator};

/// Storage temperatures outside this band (°C) are treated as data entry
/// errors rather than plausible cold-chain readings.
const STORAGE_TEMP_MIN: f64 = -80.0;
const STORAGE_TEMP_MAX: f64 = 60.0;

/// Raw distribution data as submitted by the distributor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributorPayload {
    pub pickup_date_time: String,
    pub delivery_date_time: String,
    pub transport_conditions: String,
    pub temperature_range: String,
    pub distribution_center: String,
    pub distribution_line_id: String,
    #[serde(default)]
    pub storage_temperature: Option<DecimalInput>,
    #[serde(default)]
    pub transit_locations: Vec<String>,
    /// Retailer to hand custody to after delivery.
    #[serde(default)]
    pub destination_retailer_id: Option<String>,
}

/// Validated distribution data as stored on the shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributorData {
    pub pickup_date_time: Timestamp,
    pub delivery_date_time: Timestamp,
    pub transport_conditions: String,
    pub temperature_range: String,
    pub distribution_center: String,
    pub distribution_line_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transit_locations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_retailer_id: Option<ActorAlias>,
}

impl DistributorPayload {
    /// Validate every field, reporting all violations at once.
    pub fn validate(&self) -> Result<DistributorData, ValidationError> {
        let mut v = Validator::new();
        let pickup_date_time = v.require_timestamp("pickupDateTime", &self.pickup_date_time);
        let delivery_date_time = v.require_timestamp("deliveryDateTime", &self.delivery_date_time);
        if !v.has_violations() && delivery_date_time < pickup_date_time {
            v.violation("deliveryDateTime", "must not precede pickupDateTime");
        }
        let transport_conditions = v.require_text("transportConditions", &self.transport_conditions);
        let temperature_range = v.require_text("temperatureRange", &self.temperature_range);
        let distribution_center = v.require_text("distributionCenter", &self.distribution_center);
        let distribution_line_id = v.require_text("distributionLineId", &self.distribution_line_id);
        let storage_temperature =
            v.optional_decimal("storageTemperature", self.storage_temperature.as_ref());
        if let Some(t) = storage_temperature {
            if !(STORAGE_TEMP_MIN..=STORAGE_TEMP_MAX).contains(&t) {
                v.violation(
                    "storageTemperature",
                    format!("must be within {STORAGE_TEMP_MIN}..={STORAGE_TEMP_MAX} °C, got {t}"),
                );
            }
        }
        let transit_locations: Vec<String> = self
            .transit_locations
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        let destination_retailer_id = v.optional_alias(
            "destinationRetailerId",
            self.destination_retailer_id.as_deref(),
        );
        v.finish(DistributorData {
            pickup_date_time,
            delivery_date_time,
            transport_conditions,
            temperature_range,
            distribution_center,
            distribution_line_id,
            storage_temperature,
            transit_locations,
            destination_retailer_id,
        })
    }
}
