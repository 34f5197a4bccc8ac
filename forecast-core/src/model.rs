use serde::{Deserialize, Serialize};

/// A weather condition as reported by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub text: String,
    /// Icon URL as delivered by the API. May be protocol-relative
    /// (`//cdn.weatherapi.com/...`); use [`Condition::icon_url`] before
    /// dereferencing it.
    pub icon: String,
}

impl Condition {
    /// Absolute icon URL, with `https:` prepended when the API returned a
    /// protocol-relative one.
    pub fn icon_url(&self) -> String {
        if self.icon.starts_with("//") {
            format!("https:{}", self.icon)
        } else {
            self.icon.clone()
        }
    }
}

/// Conditions at the time the server last observed them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temp_c: f64,
    pub condition: Condition,
    /// Server-local timestamp string (`yyyy-MM-dd HH:mm`), kept opaque.
    pub last_updated: String,
}

/// One hour of forecast data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastHour {
    /// Server-local timestamp string (`yyyy-MM-dd HH:mm`).
    pub time: String,
    pub temp_c: f64,
    pub condition: Condition,
}

/// One day of forecast data, with its hourly breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Date string (`yyyy-MM-dd`).
    pub date: String,
    pub max_temp_c: f64,
    pub min_temp_c: f64,
    pub condition: Condition,
    pub hours: Vec<ForecastHour>,
}

/// The structured result of one successful forecast fetch: current
/// conditions plus the multi-day/hourly breakdown.
///
/// `days` may be empty; `current` is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPayload {
    pub current: CurrentConditions,
    pub days: Vec<ForecastDay>,
}
