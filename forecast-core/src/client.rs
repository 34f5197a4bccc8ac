use crate::{Config, client::weatherapi::WeatherApiClient, model::ForecastPayload};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod weatherapi;

/// A source of forecast data.
///
/// One outbound call per `fetch` invocation, no internal retries; retrying
/// is the caller's responsibility. Any transport error, non-success HTTP
/// status, or malformed response body surfaces as a single undifferentiated
/// error.
#[async_trait]
pub trait ForecastClient: Send + Sync + Debug {
    async fn fetch(&self) -> anyhow::Result<ForecastPayload>;
}

/// Construct the real API client from config.
pub fn client_from_config(config: &Config) -> anyhow::Result<Arc<dyn ForecastClient>> {
    let api_key = config.api_key()?;

    Ok(Arc::new(WeatherApiClient::new(
        config.base_url.clone(),
        api_key.to_owned(),
        config.location.clone(),
        config.days,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = client_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn client_from_config_works_when_key_is_set() {
        let cfg = Config { api_key: Some("KEY".into()), ..Config::default() };
        assert!(client_from_config(&cfg).is_ok());
    }
}
