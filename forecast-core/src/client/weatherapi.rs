use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::model::{Condition, CurrentConditions, ForecastDay, ForecastHour, ForecastPayload};

use super::ForecastClient;

/// Client for the WeatherAPI.com `forecast.json` endpoint.
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    base_url: String,
    api_key: String,
    location: String,
    days: u8,
    http: Client,
}

impl WeatherApiClient {
    pub fn new(base_url: String, api_key: String, location: String, days: u8) -> Self {
        Self { base_url, api_key, location, days, http: Client::new() }
    }

    async fn fetch_forecast(&self) -> Result<ForecastPayload> {
        let url = format!("{}/forecast.json", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", self.location.as_str()),
                ("days", &self.days.to_string()),
                ("aqi", "no"),
                ("alerts", "no"),
            ])
            .send()
            .await
            .context("Failed to send request to WeatherAPI.com (forecast)")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read WeatherAPI forecast response body")?;

        if !status.is_success() {
            return Err(anyhow::anyhow!(
                "WeatherAPI forecast request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: WaForecastResponse =
            serde_json::from_str(&body).context("Failed to parse WeatherAPI forecast JSON")?;

        Ok(parsed.into_payload())
    }
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    icon: String,
}

impl From<WaCondition> for Condition {
    fn from(c: WaCondition) -> Self {
        Condition { text: c.text, icon: c.icon }
    }
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    condition: WaCondition,
    last_updated: String,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    maxtemp_c: f64,
    mintemp_c: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaHour {
    time: String,
    temp_c: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: String,
    day: WaDay,
    hour: Vec<WaHour>,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    current: WaCurrent,
    forecast: WaForecast,
}

impl WaForecastResponse {
    fn into_payload(self) -> ForecastPayload {
        let current = CurrentConditions {
            temp_c: self.current.temp_c,
            condition: self.current.condition.into(),
            last_updated: self.current.last_updated,
        };

        let days = self
            .forecast
            .forecastday
            .into_iter()
            .map(|d| ForecastDay {
                date: d.date,
                max_temp_c: d.day.maxtemp_c,
                min_temp_c: d.day.mintemp_c,
                condition: d.day.condition.into(),
                hours: d
                    .hour
                    .into_iter()
                    .map(|h| ForecastHour {
                        time: h.time,
                        temp_c: h.temp_c,
                        condition: h.condition.into(),
                    })
                    .collect(),
            })
            .collect();

        ForecastPayload { current, days }
    }
}

#[async_trait]
impl ForecastClient for WeatherApiClient {
    async fn fetch(&self) -> Result<ForecastPayload> {
        self.fetch_forecast().await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    // Cut on a char boundary; a fixed byte offset would panic mid-codepoint.
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "current": {
            "temp_c": 5.0,
            "condition": { "text": "Clear", "icon": "//x/y.png" },
            "last_updated": "2024-01-01 12:00"
        },
        "forecast": {
            "forecastday": [
                {
                    "date": "2024-01-01",
                    "day": {
                        "maxtemp_c": 7.5,
                        "mintemp_c": -1.2,
                        "condition": { "text": "Sunny", "icon": "//x/day.png" }
                    },
                    "hour": [
                        {
                            "time": "2024-01-01 00:00",
                            "temp_c": 1.1,
                            "condition": { "text": "Clear", "icon": "//x/night.png" }
                        }
                    ]
                }
            ]
        }
    }"#;

    #[test]
    fn sample_response_maps_to_payload() {
        let parsed: WaForecastResponse = serde_json::from_str(SAMPLE).expect("valid json");
        let payload = parsed.into_payload();

        assert_eq!(payload.current.temp_c, 5.0);
        assert_eq!(payload.current.condition.text, "Clear");
        assert_eq!(payload.current.condition.icon, "//x/y.png");
        assert_eq!(payload.current.last_updated, "2024-01-01 12:00");

        assert_eq!(payload.days.len(), 1);
        let day = &payload.days[0];
        assert_eq!(day.date, "2024-01-01");
        assert_eq!(day.max_temp_c, 7.5);
        assert_eq!(day.min_temp_c, -1.2);
        assert_eq!(day.hours.len(), 1);
        assert_eq!(day.hours[0].time, "2024-01-01 00:00");
        assert_eq!(day.hours[0].temp_c, 1.1);
    }

    #[test]
    fn empty_forecastday_is_valid() {
        let json = r#"{
            "current": {
                "temp_c": 5.0,
                "condition": { "text": "Clear", "icon": "//x/y.png" },
                "last_updated": "2024-01-01 12:00"
            },
            "forecast": { "forecastday": [] }
        }"#;

        let parsed: WaForecastResponse = serde_json::from_str(json).expect("valid json");
        let payload = parsed.into_payload();

        assert!(payload.days.is_empty());
        assert_eq!(payload.current.temp_c, 5.0);
    }

    #[test]
    fn missing_current_block_is_an_error() {
        let json = r#"{ "forecast": { "forecastday": [] } }"#;
        assert!(serde_json::from_str::<WaForecastResponse>(json).is_err());
    }

    #[test]
    fn truncate_body_caps_long_bodies() {
        let long = "x".repeat(500);
        let out = truncate_body(&long);
        assert_eq!(out.len(), 203);
        assert!(out.ends_with("..."));

        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn truncate_body_backs_off_to_a_char_boundary() {
        let mut body = "x".repeat(199);
        body.push('é');
        body.push_str(&"y".repeat(100));

        let out = truncate_body(&body);

        assert_eq!(out, format!("{}...", "x".repeat(199)));
    }
}
