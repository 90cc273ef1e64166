use crate::{
    Config, error::FetchError, model::ForecastSnapshot, provider::weatherapi::WeatherApiProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod weatherapi;

/// Source of one-day forecasts for a location query.
///
/// Each call issues exactly one upstream request: no retry, no caching.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch(&self, query: &str) -> Result<ForecastSnapshot, FetchError>;
}

/// Construct the WeatherAPI.com provider from config.
pub fn provider_from_config(config: &Config) -> Box<dyn ForecastProvider> {
    if config.api_key.is_none() {
        tracing::warn!("No API key configured; requests will be rejected upstream");
    }

    Box::new(WeatherApiProvider::new(
        config.api_key_or_empty().to_owned(),
        config.base_url.clone(),
    ))
}
