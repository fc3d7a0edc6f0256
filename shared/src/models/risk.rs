//! Flood risk classification for the dashboard indicator

use serde::{Deserialize, Serialize};

use super::weather::WeatherReading;

/// Rainfall above this many millimeters is high risk
pub const HIGH_RAINFALL_MM: f64 = 80.0;
/// Humidity above this percentage is high risk
pub const HIGH_HUMIDITY_PERCENT: f64 = 90.0;
pub const MODERATE_RAINFALL_MM: f64 = 40.0;
pub const MODERATE_HUMIDITY_PERCENT: f64 = 80.0;

/// Discrete flood risk level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Display color associated with the level
    pub fn color(&self) -> RiskColor {
        match self {
            RiskLevel::Low => RiskColor::Green,
            RiskLevel::Moderate => RiskColor::Orange,
            RiskLevel::High => RiskColor::Red,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Moderate => write!(f, "Moderate"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// Indicator color shown next to the risk level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RiskColor {
    Green,
    Orange,
    Red,
}

impl RiskColor {
    /// CSS color name
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskColor::Green => "green",
            RiskColor::Orange => "orange",
            RiskColor::Red => "red",
        }
    }
}

impl std::fmt::Display for RiskColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Level and color pair, for callers that want a single serializable value
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub color: RiskColor,
}

impl RiskAssessment {
    pub fn from_reading(reading: &WeatherReading) -> Self {
        let (level, color) = classify(reading);
        Self { level, color }
    }
}

/// Classify a weather reading into a risk level and its display color.
///
/// Checks run in order and the first match wins:
/// 1. rainfall > 80mm or humidity > 90% is `High`
/// 2. rainfall > 40mm or humidity > 80% is `Moderate`
/// 3. everything else is `Low`
pub fn classify(reading: &WeatherReading) -> (RiskLevel, RiskColor) {
    let rain = reading.rainfall();
    let humidity = reading.humidity();

    let level = if rain > HIGH_RAINFALL_MM || humidity > HIGH_HUMIDITY_PERCENT {
        RiskLevel::High
    } else if rain > MODERATE_RAINFALL_MM || humidity > MODERATE_HUMIDITY_PERCENT {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    };

    (level, level.color())
}
