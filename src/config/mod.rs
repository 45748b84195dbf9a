use reqwest::Client;
use std::{env, time::Duration};
use tracing::info;

use crate::services::rate_reader::ExchangeRateReader;

#[derive(Clone)]
pub struct AppState {
    pub reader: ExchangeRateReader,
}

pub struct AppConfig {
    pub port: u16,
    pub rates_base_url: String,
    pub external_timeout_ms: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let port: u16 = env::var("PORT").unwrap_or_else(|_| "8080".into()).parse()?;
        let rates_base_url = env::var("RATES_BASE_URL")
            .map_err(|_| anyhow::anyhow!("RATES_BASE_URL is required"))?;
        let external_timeout_ms: u64 = env::var("EXTERNAL_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(12_000);
        Ok(Self { port, rates_base_url, external_timeout_ms })
    }

    pub fn build_state(&self) -> Result<AppState, anyhow::Error> {
        // http client
        let http = Client::builder()
            .timeout(Duration::from_millis(self.external_timeout_ms))
            .build()?;

        info!("Reading rate documents from {}", self.rates_base_url);
        Ok(AppState {
            reader: ExchangeRateReader::with_client(self.rates_base_url.clone(), http),
        })
    }
}
