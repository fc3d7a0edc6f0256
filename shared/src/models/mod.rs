//! Domain models for the Flood Guard platform

mod history;
mod prediction;
mod risk;
mod volunteer;
mod weather;

pub use history::*;
pub use prediction::*;
pub use risk::*;
pub use volunteer::*;
pub use weather::*;
