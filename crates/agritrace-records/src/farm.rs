//! Farm-origin record: the data a farmer supplies when creating a shipment.

use agritrace_core::{ActorAlias, Timestamp};
use serde::{Deserialize, Serialize};

use crate::validate::{ValidationError, Validator};

/// Raw farm data as submitted by the farmer at shipment creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerPayload {
    pub farmer_name: String,
    pub farm_location: String,
    pub crop_type: String,
    #[serde(default)]
    pub planting_date: Option<String>,
    #[serde(default)]
    pub harvest_date: Option<String>,
    #[serde(default)]
    pub fertilizer_used: Option<String>,
    #[serde(default)]
    pub farming_practice: Option<String>,
    /// Processor to hand custody to once certification is approved.
    #[serde(default)]
    pub destination_processor_id: Option<String>,
    #[serde(default)]
    pub certification_document_hash: Option<String>,
}

/// Validated farm-origin data as stored on the shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerData {
    pub farmer_name: String,
    pub farm_location: String,
    pub crop_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planting_date: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub harvest_date: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fertilizer_used: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farming_practice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_processor_id: Option<ActorAlias>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certification_document_hash: Option<String>,
}

impl FarmerPayload {
    /// Validate every field, reporting all violations at once.
    pub fn validate(&self) -> Result<FarmerData, ValidationError> {
        let mut v = Validator::new();
        let farmer_name = v.require_text("farmerName", &self.farmer_name);
        let farm_location = v.require_text("farmLocation", &self.farm_location);
        let crop_type = v.require_text("cropType", &self.crop_type);
        let planting_date = v.optional_timestamp("plantingDate", self.planting_date.as_deref());
        let harvest_date = v.optional_timestamp("harvestDate", self.harvest_date.as_deref());
        if let (Some(planted), Some(harvested)) = (planting_date, harvest_date) {
            if harvested < planted {
                v.violation("harvestDate", "must not precede plantingDate");
            }
        }
        let fertilizer_used = v.optional_text("fertilizerUsed", self.fertilizer_used.as_deref());
        let farming_practice = v.optional_text("farmingPractice", self.farming_practice.as_deref());
        let destination_processor_id = v.optional_alias(
            "destinationProcessorId",
            self.destination_processor_id.as_deref(),
        );
        let certification_document_hash = v.optional_text(
            "certificationDocumentHash",
            self.certification_document_hash.as_deref(),
        );
        v.finish(FarmerData {
            farmer_name,
            farm_location,
            crop_type,
            planting_date,
            harvest_date,
            fertilizer_used,
            farming_practice,
            destination_processor_id,
            certification_document_hash,
        })
    }
}
