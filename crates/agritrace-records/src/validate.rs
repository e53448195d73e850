//! # Field Validation Collector
//!
//! Stage payloads are validated whole: every field is checked and every
//! violation reported in one pass, so a client fixing a form sees all of its
//! problems at once instead of one per round trip.
//!
//! [`Validator`] accumulates [`FieldViolation`]s while the per-stage
//! `validate()` functions convert raw payload fields into typed record
//! fields. A check that fails records the violation and returns a benign
//! placeholder so conversion can continue; [`Validator::finish`] then rejects
//! the whole payload, so a placeholder never escapes into a stored record.

use agritrace_core::{DecimalInput, Timestamp};

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Wire name of the offending field (camelCase, as submitted).
    pub field: &'static str,
    /// Human-readable description of the failure.
    pub message: String,
}

/// All violations found while validating one payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation failed: ")?;
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", v.field, v.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Accumulates field violations while converting a payload to a record.
#[derive(Debug, Default)]
pub struct Validator {
    violations: Vec<FieldViolation>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation directly.
    pub fn violation(&mut self, field: &'static str, message: impl Into<String>) {
        self.violations.push(FieldViolation {
            field,
            message: message.into(),
        });
    }

    /// Require a non-empty text field. Returns the trimmed value.
    pub fn require_text(&mut self, field: &'static str, value: &str) -> String {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.violation(field, "must not be empty");
        }
        trimmed.to_string()
    }

    /// Normalize an optional text field. Empty or whitespace-only becomes `None`.
    pub fn optional_text(&mut self, _field: &'static str, value: Option<&str>) -> Option<String> {
        value.map(str::trim).filter(|s| !s.is_empty()).map(String::from)
    }

    /// Require a parseable date or datetime. Placeholder: current time.
    pub fn require_timestamp(&mut self, field: &'static str, value: &str) -> Timestamp {
        match Timestamp::parse_input(value) {
            Ok(ts) => ts,
            Err(e) => {
                self.violation(field, e.to_string());
                Timestamp::now()
            }
        }
    }

    /// Parse an optional date or datetime field if present and non-empty.
    pub fn optional_timestamp(
        &mut self,
        field: &'static str,
        value: Option<&str>,
    ) -> Option<Timestamp> {
        let value = value.map(str::trim).filter(|s| !s.is_empty())?;
        match Timestamp::parse_input(value) {
            Ok(ts) => Some(ts),
            Err(e) => {
                self.violation(field, e.to_string());
                None
            }
        }
    }

    /// Require a finite decimal. Placeholder: zero.
    pub fn require_decimal(&mut self, field: &'static str, value: &DecimalInput) -> f64 {
        match value.parse() {
            Ok(v) => v,
            Err(e) => {
                self.violation(field, e.to_string());
                0.0
            }
        }
    }

    /// Parse an optional decimal field if present.
    pub fn optional_decimal(
        &mut self,
        field: &'static str,
        value: Option<&DecimalInput>,
    ) -> Option<f64> {
        match value?.parse() {
            Ok(v) => Some(v),
            Err(e) => {
                self.violation(field, e.to_string());
                None
            }
        }
    }

    /// Require a token parseable via `FromStr`. Placeholder: caller-supplied.
    pub fn require_token<T>(&mut self, field: &'static str, value: &str, placeholder: T) -> T
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match value.trim().parse::<T>() {
            Ok(v) => v,
            Err(e) => {
                self.violation(field, e.to_string());
                placeholder
            }
        }
    }

    /// Parse an optional actor alias if present and non-empty.
    pub fn optional_alias(
        &mut self,
        field: &'static str,
        value: Option<&str>,
    ) -> Option<agritrace_core::ActorAlias> {
        let value = value.map(str::trim).filter(|s| !s.is_empty())?;
        match agritrace_core::ActorAlias::new(value) {
            Ok(alias) => Some(alias),
            Err(e) => {
                self.violation(field, e.to_string());
                None
            }
        }
    }

    /// Whether any violation has been recorded so far.
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Consume the validator: the converted record on success, all
    /// accumulated violations otherwise.
    pub fn finish<T>(self, record: T) -> Result<T, ValidationError> {
        if self.violations.is_empty() {
            Ok(record)
        } else {
            Err(ValidationError {
                violations: self.violations,
            })
        }
    }
}
