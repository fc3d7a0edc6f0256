//! Flood Guard core services
//!
//! The event history ledger, the volunteer registry and the activity
//! recorder, all running over an injected key-value store so the same code
//! serves browsers (via the wasm crate) and native front-ends.

pub mod clock;
pub mod config;
pub mod error;
pub mod services;
pub mod storage;

pub use config::Config;
pub use error::{CoreError, CoreResult, StorageError};
pub use services::*;
