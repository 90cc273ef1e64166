//! Screens and the navigation state machine that moves between them.
//!
//! ```text
//! Selection --select--> Loading --ok--> Details --back--> Selection
//!                          |
//!                          +--err--> Error --back--> Selection
//! ```
//!
//! The same [`Navigator`] serves in-memory navigation (with a Back action) and
//! one-shot routed rendering of a single city.

use tracing::{debug, error, info};

use crate::{
    cities::{CityEntry, CityRegistry},
    condition::{Icon, TextContrast, Theme, classify, theme_for},
    derived::{HourSlots, display_bounds, representative_hours, round_temperature},
    error::{FetchError, WeatherError},
    model::ForecastSnapshot,
    provider::ForecastProvider,
};

pub const APP_TITLE: &str = "Weather";
pub const SELECT_PROMPT: &str = "Select a city";
pub const LOADING_MESSAGE: &str = "Loading weather data...";
pub const ERROR_MESSAGE: &str = "Failed to load weather data. Check the API key.";
pub const NOT_FOUND_MESSAGE: &str = "City not found";

/// How the user got to a city, which decides whether Back is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    InMemory,
    Routed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEntry {
    pub label: &'static str,
    pub route: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionView {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub entries: Vec<SelectionEntry>,
}

impl SelectionView {
    pub fn from_registry(registry: &CityRegistry) -> Self {
        Self {
            title: APP_TITLE,
            subtitle: SELECT_PROMPT,
            entries: registry
                .entries()
                .iter()
                .map(|c| SelectionEntry { label: c.label, route: c.route() })
                .collect(),
        }
    }
}

/// Title and description of a city page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    pub title: String,
    pub description: Option<String>,
}

pub fn page_meta(registry: &CityRegistry, slug: &str) -> PageMeta {
    match registry.find_by_slug(slug) {
        Ok(city) => PageMeta {
            title: format!("{} | Weather App", city.label),
            description: Some(format!("Weather forecast for {}.", city.label)),
        },
        Err(_) => PageMeta { title: "City not found | Weather App".to_string(), description: None },
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourCard {
    pub label: &'static str,
    pub icon: Icon,
    pub temperature: String,
}

/// Everything the details screen shows, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsView {
    pub city_label: &'static str,
    pub condition_text: String,
    pub temperature: i64,
    pub high: String,
    pub low: String,
    pub icon: Icon,
    pub hour_cards: Vec<HourCard>,
    pub wind: String,
    pub sunrise: String,
    pub sunset: String,
    pub humidity: String,
    pub theme: Theme,
    pub text: TextContrast,
    pub show_back: bool,
}

impl DetailsView {
    pub fn build(
        city: &'static CityEntry,
        snapshot: &ForecastSnapshot,
        slots: &HourSlots,
        navigation: Navigation,
    ) -> Result<Self, WeatherError> {
        let current = &snapshot.current;
        let today = &snapshot.today;

        let bounds = display_bounds(current.temperature_c, today.day_max_c, today.day_min_c);
        let theme = theme_for(current.condition_code, current.is_daytime);

        let hour_cards = representative_hours(&today.hours, slots)?
            .iter()
            .map(|(part, hour)| HourCard {
                label: part.label(),
                icon: classify(hour.condition_code, hour.is_daytime).icon,
                temperature: format!("{}°C", round_temperature(hour.temperature_c)),
            })
            .collect();

        Ok(Self {
            city_label: city.label,
            condition_text: current.condition_text.clone(),
            temperature: round_temperature(current.temperature_c),
            high: format!("↑ {}°", round_temperature(bounds.max_c)),
            low: format!("↓ {}°", round_temperature(bounds.min_c)),
            icon: classify(current.condition_code, current.is_daytime).icon,
            hour_cards,
            wind: format!("{} km/h", current.wind_kph),
            sunrise: today.astro.sunrise.clone(),
            sunset: today.astro.sunset.clone(),
            humidity: format!("{}%", current.humidity_pct),
            theme,
            text: theme.text_contrast(),
            show_back: navigation == Navigation::InMemory,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Selection,
    Loading { city: &'static CityEntry },
    Details(Box<DetailsView>),
    Error { city: &'static CityEntry },
}

/// Handle for one city selection; results for older handles are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attempt {
    id: u64,
    pub city: &'static CityEntry,
}

#[derive(Debug)]
pub struct Navigator {
    registry: CityRegistry,
    slots: HourSlots,
    navigation: Navigation,
    state: ViewState,
    next_attempt: u64,
    current_attempt: Option<u64>,
}

impl Navigator {
    pub fn new(registry: CityRegistry, slots: HourSlots, navigation: Navigation) -> Self {
        Self {
            registry,
            slots,
            navigation,
            state: ViewState::Selection,
            next_attempt: 0,
            current_attempt: None,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn selection(&self) -> SelectionView {
        SelectionView::from_registry(&self.registry)
    }

    pub fn select_slug(&mut self, slug: &str) -> Result<Attempt, WeatherError> {
        let city = self.lookup(|r| r.find_by_slug(slug))?;
        Ok(self.begin(city))
    }

    pub fn select_label(&mut self, label: &str) -> Result<Attempt, WeatherError> {
        let city = self.lookup(|r| r.find_by_label(label))?;
        Ok(self.begin(city))
    }

    fn lookup<F>(&mut self, find: F) -> Result<&'static CityEntry, WeatherError>
    where
        F: FnOnce(&CityRegistry) -> Result<&'static CityEntry, WeatherError>,
    {
        find(&self.registry).inspect_err(|e| {
            info!(error = %e, "Unknown city; back to selection");
            self.back();
        })
    }

    fn begin(&mut self, city: &'static CityEntry) -> Attempt {
        let id = self.next_attempt;
        self.next_attempt += 1;
        self.current_attempt = Some(id);
        self.state = ViewState::Loading { city };

        info!(city = city.slug, attempt = id, "Loading forecast");
        Attempt { id, city }
    }

    /// Apply the outcome of `attempt`. Returns `false` if it was stale and ignored.
    pub fn resolve(
        &mut self,
        attempt: &Attempt,
        result: Result<ForecastSnapshot, FetchError>,
    ) -> bool {
        if self.current_attempt != Some(attempt.id) {
            debug!(city = attempt.city.slug, attempt = attempt.id, "Discarding stale forecast");
            return false;
        }
        self.current_attempt = None;

        let city = attempt.city;
        let details = result
            .map_err(WeatherError::from)
            .and_then(|snapshot| DetailsView::build(city, &snapshot, &self.slots, self.navigation));

        self.state = match details {
            Ok(view) => {
                debug!(city = city.slug, theme = view.theme.as_str(), "Forecast ready");
                ViewState::Details(Box::new(view))
            }
            Err(e) => {
                error!(city = city.slug, error = %e, "Failed to load forecast");
                ViewState::Error { city }
            }
        };

        true
    }

    /// Return to selection, dropping whatever the previous screen held.
    pub fn back(&mut self) {
        self.current_attempt = None;
        self.state = ViewState::Selection;
    }

    /// Perform the single fetch for `attempt` and apply its result.
    pub async fn open(&mut self, provider: &dyn ForecastProvider, attempt: &Attempt) -> &ViewState {
        let result = provider.fetch(attempt.city.query).await;
        self.resolve(attempt, result);
        &self.state
    }
}
