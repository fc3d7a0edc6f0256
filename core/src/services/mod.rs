//! Core services

pub mod activity;
pub mod history;
pub mod volunteer;

pub use activity::{ActivityRecorder, WeatherObservation, LOW_BATTERY_PERCENT};
pub use history::{Appended, HistoryLedger, PersistStatus};
pub use volunteer::VolunteerRegistry;
