//! Rule-based flood prediction
//!
//! A composite score built from rainfall, humidity and temperature
//! contributions. Independent of the dashboard indicator in [`super::classify`].

use serde::{Deserialize, Serialize};

/// Temperature assumed when the caller has none
pub const DEFAULT_TEMPERATURE_C: f64 = 25.0;

/// Inputs to the prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionInput {
    #[serde(default)]
    pub rainfall_mm_24h: f64,
    #[serde(default)]
    pub humidity: f64,
    #[serde(default = "default_temperature")]
    pub temperature_c: f64,
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE_C
}

impl Default for PredictionInput {
    fn default() -> Self {
        Self {
            rainfall_mm_24h: 0.0,
            humidity: 0.0,
            temperature_c: DEFAULT_TEMPERATURE_C,
        }
    }
}

impl From<&super::WeatherReading> for PredictionInput {
    fn from(reading: &super::WeatherReading) -> Self {
        Self {
            rainfall_mm_24h: reading.rainfall(),
            humidity: reading.humidity(),
            temperature_c: reading.temperature().unwrap_or(DEFAULT_TEMPERATURE_C),
        }
    }
}

/// Predicted risk band, ordered from no risk to high risk
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum PredictedRisk {
    None,
    Low,
    Moderate,
    High,
}

impl PredictedRisk {
    /// Numeric level, 0 (none) to 3 (high)
    pub fn level(&self) -> u8 {
        match self {
            PredictedRisk::None => 0,
            PredictedRisk::Low => 1,
            PredictedRisk::Moderate => 2,
            PredictedRisk::High => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PredictedRisk::None => "No Significant Flood Risk",
            PredictedRisk::Low => "Low Risk",
            PredictedRisk::Moderate => "Moderate Risk",
            PredictedRisk::High => "High Risk",
        }
    }
}

impl std::fmt::Display for PredictedRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Prediction result, shaped like the prediction endpoint's response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloodPrediction {
    pub predicted_risk_level: u8,
    pub risk_label: String,
    /// Percentage, 20-100
    pub confidence: f64,
    pub score: f64,
}

impl FloodPrediction {
    fn from_points(points: u32) -> Self {
        let risk = risk_for_points(points);
        Self {
            predicted_risk_level: risk.level(),
            risk_label: risk.label().to_string(),
            confidence: f64::from((points + 20).min(100)),
            score: f64::from(points) / 100.0,
        }
    }

    pub fn risk(&self) -> PredictedRisk {
        match self.predicted_risk_level {
            0 => PredictedRisk::None,
            1 => PredictedRisk::Low,
            2 => PredictedRisk::Moderate,
            _ => PredictedRisk::High,
        }
    }
}

// Contributions are kept in hundredths so band thresholds compare exactly.

fn rainfall_points(rainfall_mm: f64) -> u32 {
    if rainfall_mm > 100.0 {
        70
    } else if rainfall_mm > 60.0 {
        50
    } else if rainfall_mm > 30.0 {
        30
    } else if rainfall_mm > 10.0 {
        10
    } else {
        0
    }
}

fn humidity_points(humidity: f64) -> u32 {
    if humidity > 90.0 {
        30
    } else if humidity > 80.0 {
        20
    } else if humidity > 70.0 {
        10
    } else {
        0
    }
}

fn temperature_points(temperature_c: f64) -> u32 {
    if temperature_c < 20.0 {
        5
    } else {
        0
    }
}

fn risk_for_points(points: u32) -> PredictedRisk {
    match points {
        // 70 + 10 is High here; a float sum of 0.7 + 0.1 falls just short
        80.. => PredictedRisk::High,
        50..=79 => PredictedRisk::Moderate,
        25..=49 => PredictedRisk::Low,
        _ => PredictedRisk::None,
    }
}

/// Score a reading and assign a predicted risk band
pub fn predict_flood_risk(input: &PredictionInput) -> FloodPrediction {
    let points = rainfall_points(input.rainfall_mm_24h)
        + humidity_points(input.humidity)
        + temperature_points(input.temperature_c);
    FloodPrediction::from_points(points)
}
