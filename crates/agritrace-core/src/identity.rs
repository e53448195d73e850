//! # Identity Newtypes
//!
//! Domain-primitive newtypes for identifiers throughout the Agritrace stack.
//! Each identifier is a distinct type — you cannot pass an [`ActorAlias`]
//! where a [`ShipmentId`] is expected.
//!
//! ## Validation
//!
//! Both identifiers validate at construction time: non-empty after trimming,
//! bounded length, no control characters. Deserialization routes through the
//! same constructors so invalid values are rejected at the boundary, not
//! silently accepted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

const MAX_IDENTIFIER_LEN: usize = 255;

/// Helper macro to implement `Deserialize` for string newtypes that must
/// validate their contents. Deserializes as a plain `String`, then routes
/// through the type's `new()` constructor so that invalid values are
/// rejected at deserialization time — not silently accepted.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

fn check_identifier(s: &str) -> Result<(), String> {
    if s.is_empty() {
        return Err("must not be empty".to_string());
    }
    if s.len() > MAX_IDENTIFIER_LEN {
        return Err(format!("must not exceed {MAX_IDENTIFIER_LEN} characters"));
    }
    if s.chars().any(|c| c.is_control()) {
        return Err("must not contain control characters".to_string());
    }
    Ok(())
}

/// Globally unique identifier for a tracked shipment.
///
/// Assigned at creation — either caller-supplied or generated via
/// [`ShipmentId::generate()`] — and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ShipmentId(String);

impl ShipmentId {
    /// Create a shipment identifier, validating format.
    pub fn new(value: impl Into<String>) -> Result<Self, CoreError> {
        let value = value.into();
        let trimmed = value.trim();
        check_identifier(trimmed).map_err(CoreError::InvalidShipmentId)?;
        Ok(Self(trimmed.to_string()))
    }

    /// Generate a fresh `SHIP-`-prefixed identifier.
    pub fn generate() -> Self {
        Self(format!("SHIP-{}", Uuid::new_v4()))
    }

    /// Access the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ShipmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl_validating_deserialize!(ShipmentId);

/// Identity string of a supply-chain participant.
///
/// The alias is the unit of custody: a shipment's current owner is an
/// `ActorAlias`, and ownership checks compare aliases for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ActorAlias(String);

impl ActorAlias {
    /// Create an actor alias, validating format.
    pub fn new(value: impl Into<String>) -> Result<Self, CoreError> {
        let value = value.into();
        let trimmed = value.trim();
        check_identifier(trimmed).map_err(CoreError::InvalidActorAlias)?;
        Ok(Self(trimmed.to_string()))
    }

    /// Access the alias as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ActorAlias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl_validating_deserialize!(ActorAlias);
