//! # Configuration Module
//!
//! Centralizes the size constants shared by the storage and soak layers.
//! The constants are few but interdependent, so they live in one place
//! with their relationships documented rather than scattered across the
//! modules that consume them.

pub mod constants;
pub use constants::*;
