//! Garden domain model.
//!
//! # Responsibility
//! - Define the plant record, the growth rule and the garden snapshot.
//! - Keep state transitions pure so they can be tested without storage.
//!
//! # Invariants
//! - Exactly three plants exist, identified by fixed `PlantId` values.
//! - A plant's stage is always derived from its points.

pub mod garden;
pub mod plant;
