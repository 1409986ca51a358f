//! regionpick-rs
//!
//! Workspace host crate. It re-exports [`regionpick_core`] so the demos under
//! `demos/` can be run with `cargo run --example <name>` from the repository
//! root.
pub use regionpick_core::*;
