use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::{
    error::FetchError,
    model::{Astro, CurrentConditions, DayForecast, ForecastSnapshot, HourSample, Location},
};

use super::ForecastProvider;

const FORECAST_PATH: &str = "/v1/forecast.json";

#[derive(Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

// The key stays out of logs and panics.
impl std::fmt::Debug for WeatherApiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherApiProvider")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl WeatherApiProvider {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn forecast_url(&self) -> String {
        format!("{}{}", self.base_url, FORECAST_PATH)
    }
}

#[async_trait]
impl ForecastProvider for WeatherApiProvider {
    #[instrument(skip(self))]
    async fn fetch(&self, query: &str) -> Result<ForecastSnapshot, FetchError> {
        let url = self.forecast_url();
        debug!(url = %url, "Requesting one-day forecast");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", query),
                ("days", "1"),
                ("aqi", "no"),
                ("alerts", "no"),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Network(e.without_url().to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| FetchError::Network(e.without_url().to_string()))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), body = %truncate_body(&body), "Forecast request rejected");
            return Err(FetchError::UpstreamHttp(status.as_u16()));
        }

        let parsed: WaResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))?;

        parsed.into_snapshot()
    }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    code: u16,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    is_day: u8,
    condition: WaCondition,
    wind_kph: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct WaAstro {
    sunrise: String,
    sunset: String,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    maxtemp_c: f64,
    mintemp_c: f64,
}

#[derive(Debug, Deserialize)]
struct WaHour {
    time_epoch: i64,
    time: String,
    temp_c: f64,
    condition: WaCondition,
    is_day: u8,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: String,
    astro: WaAstro,
    day: WaDay,
    hour: Vec<WaHour>,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    location: WaLocation,
    current: WaCurrent,
    forecast: WaForecast,
}

impl WaResponse {
    fn into_snapshot(self) -> Result<ForecastSnapshot, FetchError> {
        let day = self
            .forecast
            .forecastday
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::Parse("response contained no forecastday data".into()))?;

        let hours = day.hour.into_iter().map(WaHour::into_sample).collect();

        Ok(ForecastSnapshot {
            location: Location { name: self.location.name, country: self.location.country },
            current: CurrentConditions {
                temperature_c: self.current.temp_c,
                condition_code: self.current.condition.code,
                condition_text: self.current.condition.text,
                wind_kph: self.current.wind_kph,
                humidity_pct: self.current.humidity,
                is_daytime: self.current.is_day == 1,
            },
            today: DayForecast {
                date: day.date,
                astro: Astro { sunrise: day.astro.sunrise, sunset: day.astro.sunset },
                day_max_c: day.day.maxtemp_c,
                day_min_c: day.day.mintemp_c,
                hours,
            },
        })
    }
}

impl WaHour {
    fn into_sample(self) -> HourSample {
        HourSample {
            epoch: self.time_epoch,
            local_time: self.time,
            temperature_c: self.temp_c,
            condition_code: self.condition.code,
            condition_text: self.condition.text,
            is_daytime: self.is_day == 1,
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((end, _)) => format!("{}...", &body[..end]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hour_json(hour: u32) -> String {
        format!(
            r#"{{"time_epoch": {}, "time": "2025-01-01 {:02}:00", "temp_c": {}.0,
                "condition": {{"text": "Light rain", "code": 1183, "icon": ""}}, "is_day": {}}}"#,
            1_735_689_600 + hour * 3600,
            hour,
            10 + hour,
            u8::from((6..=18).contains(&hour)),
        )
    }

    fn response_json(hours: u32) -> String {
        let hours: Vec<_> = (0..hours).map(hour_json).collect();
        format!(
            r#"{{
                "location": {{"name": "Recife", "country": "Brazil"}},
                "current": {{"temp_c": 27.4, "is_day": 1, "wind_kph": 14.8, "humidity": 79,
                    "condition": {{"text": "Light rain", "code": 1183, "icon": ""}}}},
                "forecast": {{"forecastday": [{{
                    "date": "2025-01-01",
                    "astro": {{"sunrise": "05:01 AM", "sunset": "05:32 PM"}},
                    "day": {{"maxtemp_c": 29.1, "mintemp_c": 24.0}},
                    "hour": [{}]
                }}]}}
            }}"#,
            hours.join(",")
        )
    }

    #[test]
    fn converts_wire_shape_into_snapshot() {
        let parsed: WaResponse = serde_json::from_str(&response_json(24)).unwrap();
        let snapshot = parsed.into_snapshot().unwrap();

        assert_eq!(snapshot.location.name, "Recife");
        assert_eq!(snapshot.current.condition_code, 1183);
        assert_eq!(snapshot.current.condition_text, "Light rain");
        assert!(snapshot.current.is_daytime);
        assert_eq!(snapshot.current.humidity_pct, 79);
        assert_eq!(snapshot.today.astro.sunrise, "05:01 AM");
        assert_eq!(snapshot.today.hours.len(), 24);
        assert_eq!(snapshot.today.hours[15].temperature_c, 25.0);
        assert!(!snapshot.today.hours[3].is_daytime);
        assert_eq!(snapshot.today.hours[9].local_time, "2025-01-01 09:00");
        assert_eq!(snapshot.today.date, "2025-01-01");
    }

    #[test]
    fn missing_forecast_day_is_parse_error() {
        let json = r#"{
            "location": {"name": "Recife", "country": "Brazil"},
            "current": {"temp_c": 27.4, "is_day": 1, "wind_kph": 14.8, "humidity": 79,
                "condition": {"text": "Sunny", "code": 1000}},
            "forecast": {"forecastday": []}
        }"#;
        let parsed: WaResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(parsed.into_snapshot(), Err(FetchError::Parse(_))));
    }

    #[test]
    fn unusual_time_formats_pass_through() {
        let json = response_json(24)
            .replace("2025-01-01 00:00", "2025-01-01 00:00:00")
            .replace("\"date\": \"2025-01-01\"", "\"date\": \"01/01/2025\"");
        let parsed: WaResponse = serde_json::from_str(&json).unwrap();
        let snapshot = parsed.into_snapshot().unwrap();

        assert_eq!(snapshot.today.hours[0].local_time, "2025-01-01 00:00:00");
        assert_eq!(snapshot.today.date, "01/01/2025");
        assert_eq!(snapshot.today.hours.len(), 24);
    }

    #[test]
    fn debug_output_redacts_key() {
        let provider = WeatherApiProvider::new("SECRET".into(), "http://x/".into());
        let debug = format!("{provider:?}");
        assert!(!debug.contains("SECRET"));
        assert_eq!(provider.forecast_url(), "http://x/v1/forecast.json");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        let cut = truncate_body(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
