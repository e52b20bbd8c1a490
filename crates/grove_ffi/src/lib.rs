//! Flutter-facing bindings for the Mindful Grove core.

pub mod api;
mod config;
