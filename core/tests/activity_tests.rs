//! Activity recorder tests
//!
//! Covers the history entries written for each dashboard event, including
//! risk changes derived from consecutive weather readings.

use chrono::NaiveDate;
use floodguard_core::clock::ManualClock;
use floodguard_core::config::HistoryConfig;
use floodguard_core::storage::MemoryStore;
use floodguard_core::{ActivityRecorder, CoreError, HistoryLedger};
use shared::{predict_flood_risk, PredictionInput, RiskColor, RiskLevel, WeatherReading};

fn recorder() -> ActivityRecorder<MemoryStore, ManualClock> {
    let clock = ManualClock::new(
        NaiveDate::from_ymd_opt(2025, 12, 2)
            .unwrap()
            .and_hms_opt(15, 3, 25)
            .unwrap(),
    );
    ActivityRecorder::new(HistoryLedger::with_clock(
        MemoryStore::new(),
        clock,
        HistoryConfig::default(),
    ))
}

fn messages(recorder: &ActivityRecorder<MemoryStore, ManualClock>) -> Vec<(String, String)> {
    recorder
        .ledger()
        .list()
        .into_iter()
        .map(|e| (e.category, e.message))
        .collect()
}

// ============================================================================
// Weather
// ============================================================================

#[test]
fn test_first_reading_logs_update_and_level() {
    let recorder = recorder();
    let observation =
        recorder.weather_updated(&WeatherReading::new(12.1, 76.0).with_temperature(29.4));

    assert_eq!(observation.assessment.level, RiskLevel::Low);
    assert_eq!(observation.assessment.color, RiskColor::Green);
    assert_eq!(observation.update.entry.message, "Weather updated: 29.4°C");
    assert_eq!(
        observation.risk_change.unwrap().entry.message,
        "Flood risk level: Low (green)"
    );
    assert_eq!(recorder.last_risk(), Some(RiskLevel::Low));
}

#[test]
fn test_unchanged_level_is_logged_once() {
    let recorder = recorder();
    recorder.weather_updated(&WeatherReading::new(10.0, 20.0));
    let second = recorder.weather_updated(&WeatherReading::new(15.0, 30.0));

    assert!(second.risk_change.is_none());
    assert_eq!(recorder.ledger().list_by_category("weather").len(), 3);
}

#[test]
fn test_level_change_is_recorded() {
    let recorder = recorder();
    recorder.weather_updated(&WeatherReading::new(10.0, 20.0));
    let storm = recorder.weather_updated(&WeatherReading::new(90.0, 50.0).with_temperature(24.0));

    assert_eq!(storm.assessment.level, RiskLevel::High);
    assert_eq!(
        storm.risk_change.unwrap().entry.message,
        "Flood risk level: High (red)"
    );

    let latest = recorder.ledger().latest().unwrap();
    assert_eq!(latest.message, "Flood risk level: High (red)");
}

#[test]
fn test_missing_temperature_shows_placeholder() {
    let recorder = recorder();
    let observation = recorder.weather_updated(&WeatherReading::new(50.0, 85.0));

    assert_eq!(observation.update.entry.message, "Weather updated: --°C");
    assert_eq!(observation.assessment.level, RiskLevel::Moderate);
}

#[test]
fn test_weather_failure() {
    let recorder = recorder();
    recorder.weather_failed();
    assert_eq!(
        messages(&recorder),
        vec![("weather".to_string(), "⚠ Failed to update weather".to_string())]
    );
}

// ============================================================================
// User Actions
// ============================================================================

#[test]
fn test_sos_then_report_order() {
    let recorder = recorder();
    recorder.sos_triggered();
    recorder.report_submitted("  Water rising  ").unwrap();

    assert_eq!(
        messages(&recorder),
        vec![
            ("report".to_string(), "📝 Water rising".to_string()),
            ("sos".to_string(), "SOS triggered".to_string()),
        ]
    );
}

#[test]
fn test_empty_report_is_rejected_without_entry() {
    let recorder = recorder();
    let err = recorder.report_submitted("   ").unwrap_err();

    match err {
        CoreError::Validation { field, message } => {
            assert_eq!(field, "report");
            assert_eq!(message, "Please enter a report.");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(recorder.ledger().is_empty());
}

#[test]
fn test_feedback() {
    let recorder = recorder();
    assert!(recorder.feedback_submitted("").is_err());
    recorder.feedback_submitted("Very helpful").unwrap();
    assert_eq!(
        messages(&recorder),
        vec![("feedback".to_string(), "Very helpful".to_string())]
    );
}

#[test]
fn test_route_news_and_map() {
    let recorder = recorder();
    recorder.route_requested();
    recorder.news_updated("hi");
    recorder.location_checked("Andheri, Mumbai, Maharashtra, India");
    recorder.location_checked("  ");

    assert_eq!(
        messages(&recorder),
        vec![
            ("map_click".to_string(), "Checked location: Unknown Area".to_string()),
            (
                "map_click".to_string(),
                "Checked location: Andheri, Mumbai, Maharashtra, India".to_string()
            ),
            ("news".to_string(), "News updated (hi)".to_string()),
            ("route".to_string(), "User requested safe route".to_string()),
        ]
    );
}

#[test]
fn test_prediction_is_logged_with_label() {
    let recorder = recorder();
    let prediction = predict_flood_risk(&PredictionInput {
        rainfall_mm_24h: 120.0,
        humidity: 95.0,
        temperature_c: 24.0,
    });
    let appended = recorder.prediction_received(&prediction);
    assert_eq!(appended.entry.category, "ai");
    assert_eq!(appended.entry.message, "AI predicted: High Risk");
}

// ============================================================================
// Device Signals
// ============================================================================

#[test]
fn test_battery_only_logged_when_low() {
    let recorder = recorder();
    assert!(recorder.battery_changed(85).is_none());
    assert!(recorder.battery_changed(21).is_none());

    let low = recorder.battery_changed(20).unwrap();
    assert_eq!(low.entry.category, "system");
    assert_eq!(
        low.entry.message,
        "⚠ Battery low, enabling emergency power mode"
    );
    assert_eq!(recorder.ledger().len(), 1);
}

#[test]
fn test_connectivity_messages() {
    let recorder = recorder();
    recorder.connectivity_changed(false);
    recorder.connectivity_changed(true);

    assert_eq!(
        messages(&recorder),
        vec![
            ("system".to_string(), "🌐 Online - live data restored".to_string()),
            ("system".to_string(), "🌐 Offline mode activated".to_string()),
        ]
    );
}
