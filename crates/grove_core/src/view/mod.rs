//! Presentation projections consumed by the UI.
//!
//! # Responsibility
//! - Derive plain, render-ready data from garden and flow state.
//!
//! # Invariants
//! - Views hold no state of their own; they are rebuilt after each change.

pub mod card;
pub mod garden_view;
pub mod prompt;
pub mod scene;
