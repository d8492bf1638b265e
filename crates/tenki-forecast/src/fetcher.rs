//! HTTP client for the JMA forecast API.

use reqwest::Client;
use std::time::Duration;
use tenki_core::ForecastConfig;
use tracing::instrument;

use crate::error::ForecastError;
use crate::payload::RawForecastPayload;
use crate::types::AreaCode;

/// Cache-unaware transport: one GET per call, no retry.
#[derive(Debug, Clone)]
pub struct ForecastFetcher {
    client: Client,
    base_url: String,
}

impl ForecastFetcher {
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self, ForecastError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ForecastConfig) -> Result<Self, ForecastError> {
        Self::new(
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
            &config.user_agent,
        )
    }

    /// `<base_url>/<area_code>.json`
    pub fn forecast_url(&self, area: &AreaCode) -> String {
        format!("{}/{}.json", self.base_url, area)
    }

    /// Fetch and parse the raw forecast for one area.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch(&self, area: &AreaCode) -> Result<RawForecastPayload, ForecastError> {
        let url = self.forecast_url(area);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Forecast request for {} returned {}", area, status);
            return Err(ForecastError::UpstreamStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.bytes().await?;
        RawForecastPayload::from_slice(&body)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_forecast_url() {
        let fetcher = ForecastFetcher::new(
            "https://www.jma.go.jp/bosai/forecast/data/forecast/",
            Duration::from_secs(5),
            "tenki-test",
        )
        .unwrap();
        assert_eq!(
            fetcher.forecast_url(&AreaCode::from("130000")),
            "https://www.jma.go.jp/bosai/forecast/data/forecast/130000.json"
        );
    }

    #[test]
    fn test_from_default_config() {
        let fetcher = ForecastFetcher::from_config(&ForecastConfig::default()).unwrap();
        assert!(fetcher
            .forecast_url(&AreaCode::from("016000"))
            .ends_with("/forecast/016000.json"));
    }
}
