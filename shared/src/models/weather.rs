//! Weather reading models

use serde::{Deserialize, Deserializer, Serialize};

/// A resolved weather reading handed to the core by the weather fetcher.
///
/// Accepts both the front-end field names (`rainfallMm`, `humidityPercent`,
/// `temperatureC`) and the backend payload names (`rainfall`, `humidity`,
/// `temperature`). Missing, `null` or unparsable values read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReading {
    /// Rainfall over the reporting window, in millimeters
    #[serde(default, alias = "rainfall", deserialize_with = "lenient_number")]
    pub rainfall_mm: f64,
    /// Relative humidity, 0-100
    #[serde(default, alias = "humidity", deserialize_with = "lenient_number")]
    pub humidity_percent: f64,
    #[serde(
        default,
        alias = "temperature",
        deserialize_with = "lenient_optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub temperature_c: Option<f64>,
}

impl WeatherReading {
    pub fn new(rainfall_mm: f64, humidity_percent: f64) -> Self {
        Self {
            rainfall_mm,
            humidity_percent,
            temperature_c: None,
        }
    }

    pub fn with_temperature(mut self, temperature_c: f64) -> Self {
        self.temperature_c = Some(temperature_c);
        self
    }

    /// Rainfall with non-finite values read as zero
    pub fn rainfall(&self) -> f64 {
        finite_or_zero(self.rainfall_mm)
    }

    /// Humidity with non-finite values read as zero
    pub fn humidity(&self) -> f64 {
        finite_or_zero(self.humidity_percent)
    }

    pub fn temperature(&self) -> Option<f64> {
        self.temperature_c.filter(|t| t.is_finite())
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl RawNumber {
    fn into_f64(self) -> Option<f64> {
        match self {
            RawNumber::Number(n) => Some(n),
            RawNumber::Text(s) => s.trim().parse().ok(),
            RawNumber::Other(_) => None,
        }
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_optional_number(deserializer)?.unwrap_or(0.0))
}

fn lenient_optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawNumber>::deserialize(deserializer)?;
    Ok(raw.and_then(RawNumber::into_f64).filter(|n| n.is_finite()))
}
