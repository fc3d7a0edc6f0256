//! WebAssembly module for the Flood Guard dashboard
//!
//! Provides client-side:
//! - Flood risk classification for the dashboard indicator
//! - Rule-based flood prediction
//! - The event history ledger, stored in `localStorage`
//! - The community volunteer list
//!
//! Structured values cross the boundary as JSON strings.

use floodguard_core::config::Config;
use floodguard_core::{
    ActivityRecorder, Appended, HistoryLedger, VolunteerRegistry, WeatherObservation,
};
use serde::Serialize;
use shared::{classify, FloodPrediction, PredictionInput, RiskAssessment, Volunteer, WeatherReading};
use wasm_bindgen::prelude::*;

mod logging;
mod storage;

pub use storage::LocalStorage;

// Re-export shared types for Rust consumers of the rlib
pub use shared::models::*;

struct Dashboard {
    activity: ActivityRecorder<LocalStorage>,
    volunteers: VolunteerRegistry<LocalStorage>,
}

impl Dashboard {
    fn open() -> Self {
        let config = Config::default();
        let store = LocalStorage::open();
        let ledger = HistoryLedger::new(store.clone(), config.history)
            .with_key(config.storage.history_key);
        Self {
            activity: ActivityRecorder::new(ledger),
            volunteers: VolunteerRegistry::new(store).with_key(config.storage.volunteers_key),
        }
    }
}

thread_local! {
    static DASHBOARD: Dashboard = Dashboard::open();
}

fn with_dashboard<T>(f: impl FnOnce(&Dashboard) -> T) -> T {
    DASHBOARD.with(f)
}

/// JSON shape returned for every recorded history entry
#[derive(Debug, Serialize)]
struct EntryResponse {
    time: String,
    #[serde(rename = "type")]
    category: String,
    message: String,
    persisted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<String>,
}

impl From<Appended> for EntryResponse {
    fn from(appended: Appended) -> Self {
        let warning = appended.warning();
        Self {
            persisted: appended.status.is_persisted(),
            warning,
            time: appended.entry.timestamp,
            category: appended.entry.category,
            message: appended.entry.message,
        }
    }
}

#[derive(Debug, Serialize)]
struct WeatherResponse {
    level: String,
    color: String,
    risk_changed: bool,
    /// True only when every entry written for the reading was persisted
    persisted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<String>,
}

impl From<WeatherObservation> for WeatherResponse {
    fn from(observation: WeatherObservation) -> Self {
        let appended: Vec<&Appended> = std::iter::once(&observation.update)
            .chain(observation.risk_change.as_ref())
            .collect();
        Self {
            level: observation.assessment.level.to_string(),
            color: observation.assessment.color.to_string(),
            risk_changed: observation.risk_change.is_some(),
            persisted: appended.iter().all(|a| a.status.is_persisted()),
            warning: appended.iter().find_map(|a| a.warning()),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

fn entry_json(appended: Appended) -> String {
    to_json(&EntryResponse::from(appended))
}

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    logging::init();
}

// ============================================================================
// Risk
// ============================================================================

/// Classify rainfall and humidity into `Low`, `Moderate` or `High`
#[wasm_bindgen]
pub fn classify_risk(rainfall_mm: f64, humidity_percent: f64) -> String {
    let (level, _) = classify(&WeatherReading::new(rainfall_mm, humidity_percent));
    level.to_string()
}

/// Indicator color for rainfall and humidity: `green`, `orange` or `red`
#[wasm_bindgen]
pub fn risk_color(rainfall_mm: f64, humidity_percent: f64) -> String {
    let (_, color) = classify(&WeatherReading::new(rainfall_mm, humidity_percent));
    color.to_string()
}

/// Classify a weather payload, returning `{"level": .., "color": ..}`
#[wasm_bindgen]
pub fn classify_reading(reading_json: &str) -> Result<String, JsValue> {
    let reading: WeatherReading = serde_json::from_str(reading_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid weather JSON: {}", e)))?;
    Ok(to_json(&RiskAssessment::from_reading(&reading)))
}

/// Composite flood prediction
#[wasm_bindgen]
pub fn predict_risk(rainfall_mm_24h: f64, humidity: f64, temperature_c: f64) -> String {
    let prediction = shared::predict_flood_risk(&PredictionInput {
        rainfall_mm_24h,
        humidity,
        temperature_c,
    });
    to_json(&prediction)
}

// ============================================================================
// History
// ============================================================================

/// Record an event under any category tag
#[wasm_bindgen]
pub fn history_append(category: &str, message: &str) -> String {
    with_dashboard(|d| entry_json(d.activity.ledger().append(category, message)))
}

/// Every entry, newest first, as a JSON array of `{time, type, message}`
#[wasm_bindgen]
pub fn history_list() -> String {
    with_dashboard(|d| to_json(&d.activity.ledger().list()))
}

/// Entries with one category tag, newest first
#[wasm_bindgen]
pub fn history_list_by_category(category: &str) -> String {
    with_dashboard(|d| to_json(&d.activity.ledger().list_by_category(category)))
}

/// Remove every entry. Returns false when only the in-memory copy was cleared.
#[wasm_bindgen]
pub fn history_clear() -> bool {
    with_dashboard(|d| d.activity.ledger().clear().is_persisted())
}

/// True once storage has failed and history is kept in memory only
#[wasm_bindgen]
pub fn history_degraded() -> bool {
    with_dashboard(|d| d.activity.ledger().is_degraded())
}

// ============================================================================
// Dashboard events
// ============================================================================

/// Log a freshly fetched weather payload and return its risk assessment
#[wasm_bindgen]
pub fn record_weather(reading_json: &str) -> Result<String, JsValue> {
    let reading: WeatherReading = serde_json::from_str(reading_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid weather JSON: {}", e)))?;

    Ok(with_dashboard(|d| {
        to_json(&WeatherResponse::from(d.activity.weather_updated(&reading)))
    }))
}

#[wasm_bindgen]
pub fn record_weather_failure() -> String {
    with_dashboard(|d| entry_json(d.activity.weather_failed()))
}

#[wasm_bindgen]
pub fn record_sos() -> String {
    with_dashboard(|d| entry_json(d.activity.sos_triggered()))
}

#[wasm_bindgen]
pub fn record_report(text: &str) -> Result<String, JsValue> {
    with_dashboard(|d| d.activity.report_submitted(text))
        .map(entry_json)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
pub fn record_feedback(text: &str) -> Result<String, JsValue> {
    with_dashboard(|d| d.activity.feedback_submitted(text))
        .map(entry_json)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
pub fn record_route() -> String {
    with_dashboard(|d| entry_json(d.activity.route_requested()))
}

#[wasm_bindgen]
pub fn record_news(lang: &str) -> String {
    with_dashboard(|d| entry_json(d.activity.news_updated(lang)))
}

/// Log a prediction response (`{predicted_risk_level, risk_label, ..}`)
#[wasm_bindgen]
pub fn record_prediction(prediction_json: &str) -> Result<String, JsValue> {
    let prediction: FloodPrediction = serde_json::from_str(prediction_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid prediction JSON: {}", e)))?;
    Ok(with_dashboard(|d| {
        entry_json(d.activity.prediction_received(&prediction))
    }))
}

/// Log a battery level; returns `undefined` unless the level is low
#[wasm_bindgen]
pub fn record_battery(percent: u8) -> Option<String> {
    with_dashboard(|d| d.activity.battery_changed(percent).map(entry_json))
}

#[wasm_bindgen]
pub fn record_connectivity(online: bool) -> String {
    with_dashboard(|d| entry_json(d.activity.connectivity_changed(online)))
}

#[wasm_bindgen]
pub fn record_location(place_name: &str) -> String {
    with_dashboard(|d| entry_json(d.activity.location_checked(place_name)))
}

// ============================================================================
// Volunteers
// ============================================================================

#[wasm_bindgen]
pub fn volunteers_list() -> Result<String, JsValue> {
    with_dashboard(|d| d.volunteers.list())
        .map(|volunteers| to_json(&volunteers))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Add a volunteer and return the updated list
#[wasm_bindgen]
pub fn volunteer_add(name: &str, area: &str, phone: &str) -> Result<String, JsValue> {
    with_dashboard(|d| d.volunteers.add(Volunteer::new(name, area, phone)))
        .map(|volunteers| to_json(&volunteers))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use floodguard_core::PersistStatus;
    use shared::{HistoryEntry, RiskColor, RiskLevel};

    #[test]
    fn test_classify_risk() {
        assert_eq!(classify_risk(90.0, 50.0), "High");
        assert_eq!(classify_risk(50.0, 85.0), "Moderate");
        assert_eq!(classify_risk(10.0, 20.0), "Low");
    }

    #[test]
    fn test_risk_color() {
        assert_eq!(risk_color(0.0, 95.0), "red");
        assert_eq!(risk_color(45.0, 0.0), "orange");
        assert_eq!(risk_color(0.0, 0.0), "green");
    }

    #[test]
    fn test_classify_reading() {
        let json = classify_reading(r#"{"rainfall": 12.1, "humidity": 76, "temperature": 29.4}"#)
            .unwrap();
        assert_eq!(json, r#"{"level":"Low","color":"green"}"#);
    }

    #[test]
    fn test_predict_risk() {
        let prediction: FloodPrediction =
            serde_json::from_str(&predict_risk(120.0, 95.0, 24.0)).unwrap();
        assert_eq!(prediction.risk_label, "High Risk");
        assert_eq!(prediction.predicted_risk_level, 3);
    }

    #[test]
    fn test_entry_response_shape() {
        let appended = Appended {
            entry: HistoryEntry::new("1/12/2026, 1:35:43 PM", "sos", "SOS triggered"),
            status: PersistStatus::Persisted,
        };
        assert_eq!(
            entry_json(appended),
            r#"{"time":"1/12/2026, 1:35:43 PM","type":"sos","message":"SOS triggered","persisted":true}"#
        );
    }

    #[test]
    fn test_entry_response_carries_warning() {
        let appended = Appended {
            entry: HistoryEntry::new("t", "sos", "SOS triggered"),
            status: PersistStatus::MemoryOnly {
                reason: "quota".to_string(),
            },
        };
        let value: serde_json::Value = serde_json::from_str(&entry_json(appended)).unwrap();
        assert_eq!(value["persisted"], false);
        assert!(value["warning"].as_str().unwrap().contains("quota"));
    }

    #[test]
    fn test_weather_response_reports_risk_change_failure() {
        let observation = WeatherObservation {
            assessment: RiskAssessment {
                level: RiskLevel::High,
                color: RiskColor::Red,
            },
            update: Appended {
                entry: HistoryEntry::new("t", "weather", "Weather updated: 24°C"),
                status: PersistStatus::Persisted,
            },
            risk_change: Some(Appended {
                entry: HistoryEntry::new("t", "weather", "Flood risk level: High (red)"),
                status: PersistStatus::MemoryOnly {
                    reason: "quota".to_string(),
                },
            }),
        };

        let response = WeatherResponse::from(observation);
        assert_eq!(response.level, "High");
        assert!(response.risk_changed);
        assert!(!response.persisted);
        assert!(response.warning.unwrap().contains("quota"));
    }
}
