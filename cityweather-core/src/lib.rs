//! Core library for the `cityweather` viewer.
//!
//! This crate defines:
//! - The fixed city registry and its lookups
//! - Condition-code classification into icons and background themes
//! - Derived display values (reconciled high/low, representative hours)
//! - The WeatherAPI.com forecast provider
//! - The view state machine shared by in-memory and routed navigation
//!
//! It is used by `cityweather-cli`, but the view models are renderer-agnostic.

pub mod cities;
pub mod condition;
pub mod config;
pub mod derived;
pub mod error;
pub mod model;
pub mod provider;
pub mod view;

pub use cities::{CITIES, CityEntry, CityRegistry};
pub use condition::{Icon, IconCategory, TextContrast, Theme, classify, theme_for};
pub use config::Config;
pub use derived::{DayPart, HourSlots};
pub use error::{FetchError, WeatherError};
pub use model::ForecastSnapshot;
pub use provider::{ForecastProvider, provider_from_config};
pub use view::{DetailsView, Navigation, Navigator, SelectionView, ViewState};
