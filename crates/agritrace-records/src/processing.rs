//! Processing record: transformation of certified produce into batches.

use agritrace_core::{ActorAlias, ContaminationCheck, Timestamp};
use serde::{Deserialize, Serialize};

use crate::validate::{ValidationError, Validator};

/// Raw processing data as submitted by the processor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessorPayload {
    pub processing_type: String,
    pub processing_line_id: String,
    pub date_processed: String,
    /// One of `PASSED`, `FAILED`.
    pub contamination_check: String,
    pub output_batch_id: String,
    pub expiry_date: String,
    pub processing_location: String,
    /// Distributor to hand custody to after processing.
    #[serde(default)]
    pub destination_distributor_id: Option<String>,
}

/// Validated processing data as stored on the shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessorData {
    pub processing_type: String,
    pub processing_line_id: String,
    pub date_processed: Timestamp,
    pub contamination_check: ContaminationCheck,
    pub output_batch_id: String,
    pub expiry_date: Timestamp,
    pub processing_location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_distributor_id: Option<ActorAlias>,
}

impl ProcessorPayload {
    /// Validate every field, reporting all violations at once.
    pub fn validate(&self) -> Result<ProcessorData, ValidationError> {
        let mut v = Validator::new();
        let processing_type = v.require_text("processingType", &self.processing_type);
        let processing_line_id = v.require_text("processingLineId", &self.processing_line_id);
        let date_processed = v.require_timestamp("dateProcessed", &self.date_processed);
        let contamination_check = v.require_token(
            "contaminationCheck",
            &self.contamination_check,
            ContaminationCheck::Failed,
        );
        let output_batch_id = v.require_text("outputBatchId", &self.output_batch_id);
        let expiry_date = v.require_timestamp("expiryDate", &self.expiry_date);
        if !v.has_violations() && expiry_date <= date_processed {
            v.violation("expiryDate", "must be after dateProcessed");
        }
        let processing_location = v.require_text("processingLocation", &self.processing_location);
        let destination_distributor_id = v.optional_alias(
            "destinationDistributorId",
            self.destination_distributor_id.as_deref(),
        );
        v.finish(ProcessorData {
            processing_type,
            processing_line_id,
            date_processed,
            contamination_check,
            output_batch_id,
            expiry_date,
            processing_location,
            destination_distributor_id,
        })
    }
}
