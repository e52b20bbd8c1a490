//! Repository layer for garden persistence.
//!
//! # Responsibility
//! - Define the snapshot load/save contract used by the store.
//! - Isolate SQLite details from store orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`InvalidData`) in addition to
//!   DB transport errors.

pub mod garden_repo;
