//! Process-level garden store.
//!
//! # Responsibility
//! - Own the garden snapshot and route every mutation through pure
//!   transitions, then persistence, then observer notification.
//!
//! # Invariants
//! - Mutations are synchronous and never observed half-applied.
//! - Persistence failures never roll back in-memory state.

pub mod garden_store;
