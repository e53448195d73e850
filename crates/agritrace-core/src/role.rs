//! # Actor Roles — Single Source of Truth
//!
//! Defines the `Role` enum with all six custodial and oversight roles in the
//! supply chain. This is the ONE definition used across the entire stack.
//! Every `match` on `Role` must be exhaustive — adding a role forces every
//! consumer to handle it at compile time.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CoreError;

/// All actor roles in the Agritrace supply chain.
///
/// The first five are custodial roles — each holds physical custody of a
/// shipment at one lifecycle stage. `Regulator` is an oversight role: it
/// never holds custody but is the only role authorized to initiate recalls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Originates shipments and submits them for certification.
    Farmer,
    /// Inspects pending shipments and records certification outcomes.
    Certifier,
    /// Transforms certified produce and records processing data.
    Processor,
    /// Transports processed goods and records transit data.
    Distributor,
    /// Receives distributed goods and records retail data.
    Retailer,
    /// Oversight authority; may recall any non-delivered shipment.
    Regulator,
}

impl Role {
    /// Returns all roles in canonical order.
    pub fn all_roles() -> &'static [Role] {
        &[
            Self::Farmer,
            Self::Certifier,
            Self::Processor,
            Self::Distributor,
            Self::Retailer,
            Self::Regulator,
        ]
    }

    /// Returns the snake_case string identifier for this role.
    ///
    /// Must match the serde serialization format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Farmer => "farmer",
            Self::Certifier => "certifier",
            Self::Processor => "processor",
            Self::Distributor => "distributor",
            Self::Retailer => "retailer",
            Self::Regulator => "regulator",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    /// Parse a role from its snake_case string identifier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "farmer" => Ok(Self::Farmer),
            "certifier" => Ok(Self::Certifier),
            "processor" => Ok(Self::Processor),
            "distributor" => Ok(Self::Distributor),
            "retailer" => Ok(Self::Retailer),
            "regulator" => Ok(Self::Regulator),
            other => Err(CoreError::UnknownRole(other.to_string())),
        }
    }
}
