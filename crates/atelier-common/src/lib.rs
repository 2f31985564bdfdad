//! Common utilities for the Atelier style engine.
//!
//! This crate provides shared infrastructure used by the engine crates:
//! - **Warning System** - colored terminal output for dropped or rejected input

pub mod warning;
