//! Activity recorder
//!
//! Turns events from the dashboard's collaborators (weather fetcher, SOS
//! button, report form, battery and network listeners, map clicks) into
//! history entries, so every front-end logs the same messages.

use std::sync::{Mutex, PoisonError};

use shared::{
    classify, validate_feedback_text, validate_report_text, EventCategory, FloodPrediction,
    RiskAssessment, RiskLevel, WeatherReading,
};

use crate::clock::{Clock, SystemClock};
use crate::error::{CoreError, CoreResult};
use crate::services::history::{Appended, HistoryLedger};
use crate::storage::KeyValueStore;

/// Battery percentage at or below which emergency power mode is logged
pub const LOW_BATTERY_PERCENT: u8 = 20;

/// Outcome of feeding a new weather reading through the recorder
#[derive(Debug, Clone)]
pub struct WeatherObservation {
    pub assessment: RiskAssessment,
    /// The `Weather updated` entry
    pub update: Appended,
    /// Present when the derived risk level differs from the previous reading
    pub risk_change: Option<Appended>,
}

/// Records dashboard activity into a [`HistoryLedger`]
pub struct ActivityRecorder<S, C = SystemClock> {
    ledger: HistoryLedger<S, C>,
    last_risk: Mutex<Option<RiskLevel>>,
}

impl<S: KeyValueStore, C: Clock> ActivityRecorder<S, C> {
    pub fn new(ledger: HistoryLedger<S, C>) -> Self {
        Self {
            ledger,
            last_risk: Mutex::new(None),
        }
    }

    pub fn ledger(&self) -> &HistoryLedger<S, C> {
        &self.ledger
    }

    /// Risk level derived from the most recent reading, if any
    pub fn last_risk(&self) -> Option<RiskLevel> {
        *self.last_risk.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Classify a freshly fetched reading and log it exactly once.
    ///
    /// A second entry is written when the risk level changes.
    pub fn weather_updated(&self, reading: &WeatherReading) -> WeatherObservation {
        let (level, color) = classify(reading);
        let temperature = reading
            .temperature()
            .map(|t| t.to_string())
            .unwrap_or_else(|| "--".to_string());

        let update = self.ledger.record(
            EventCategory::Weather,
            format!("Weather updated: {}°C", temperature),
        );

        let previous = {
            let mut last = self.last_risk.lock().unwrap_or_else(PoisonError::into_inner);
            last.replace(level)
        };

        let risk_change = if previous != Some(level) {
            tracing::info!("Flood risk level now {} (was {:?})", level, previous);
            Some(self.ledger.record(
                EventCategory::Weather,
                format!("Flood risk level: {} ({})", level, color),
            ))
        } else {
            None
        };

        WeatherObservation {
            assessment: RiskAssessment { level, color },
            update,
            risk_change,
        }
    }

    /// The weather fetch failed
    pub fn weather_failed(&self) -> Appended {
        self.ledger
            .record(EventCategory::Weather, "⚠ Failed to update weather")
    }

    pub fn sos_triggered(&self) -> Appended {
        self.ledger.record(EventCategory::Sos, "SOS triggered")
    }

    /// A user flood report. Empty reports are rejected.
    pub fn report_submitted(&self, text: &str) -> CoreResult<Appended> {
        let text = validate_report_text(text).map_err(|msg| CoreError::validation("report", msg))?;
        Ok(self
            .ledger
            .record(EventCategory::Report, format!("📝 {}", text)))
    }

    pub fn feedback_submitted(&self, text: &str) -> CoreResult<Appended> {
        let text =
            validate_feedback_text(text).map_err(|msg| CoreError::validation("feedback", msg))?;
        Ok(self.ledger.record(EventCategory::Feedback, text))
    }

    pub fn route_requested(&self) -> Appended {
        self.ledger
            .record(EventCategory::Route, "User requested safe route")
    }

    pub fn news_updated(&self, lang: &str) -> Appended {
        self.ledger
            .record(EventCategory::News, format!("News updated ({})", lang))
    }

    pub fn prediction_received(&self, prediction: &FloodPrediction) -> Appended {
        self.ledger.record(
            EventCategory::Ai,
            format!("AI predicted: {}", prediction.risk_label),
        )
    }

    /// Logs emergency power mode when the battery is low; otherwise nothing
    pub fn battery_changed(&self, percent: u8) -> Option<Appended> {
        (percent <= LOW_BATTERY_PERCENT).then(|| {
            self.ledger.record(
                EventCategory::System,
                "⚠ Battery low, enabling emergency power mode",
            )
        })
    }

    pub fn connectivity_changed(&self, online: bool) -> Appended {
        let message = if online {
            "🌐 Online - live data restored"
        } else {
            "🌐 Offline mode activated"
        };
        self.ledger.record(EventCategory::System, message)
    }

    /// A location was inspected on the map
    pub fn location_checked(&self, place_name: &str) -> Appended {
        let name = match place_name.trim() {
            "" => "Unknown Area",
            name => name,
        };
        self.ledger.record(
            EventCategory::MapClick,
            format!("Checked location: {}", name),
        )
    }
}
