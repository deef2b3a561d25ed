//! Data models for the offers backend.
//!
//! Field names match the `offers` table columns, which is what clients see on the wire.

mod offer;

pub use offer::*;
