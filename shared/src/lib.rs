//! Shared types and rules for the Flood Guard platform
//!
//! This crate contains the pure domain models used by the core services,
//! the browser bindings (via WASM), and the command-line front-end.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::*;
