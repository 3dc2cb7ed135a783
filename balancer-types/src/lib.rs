//! Core type definitions for the balancer persistence core.
//!
//! This crate defines the kind-agnostic types every other crate builds on:
//! - Entity identifiers ([`EntityId`])
//! - UTC timestamps as stored in text columns ([`Timestamp`])
//! - Scalar values carried by extra-attribute bags ([`ExtraValue`])
//!
//! Entity structs themselves live in `balancer-model`.

mod ids;
mod timestamp;
mod value;

pub use ids::EntityId;
pub use timestamp::{Timestamp, MAX_YEAR, MIN_YEAR};
pub use value::ExtraValue;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
