//! API route modules.

pub mod health;
pub mod recalls;
pub mod shipments;
