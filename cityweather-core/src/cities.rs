use crate::error::WeatherError;

/// A selectable city.
///
/// `slug` is the routing key, `label` the display name and `query` the
/// location string sent upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CityEntry {
    pub label: &'static str,
    pub slug: &'static str,
    pub query: &'static str,
}

impl CityEntry {
    /// Route path of this city, e.g. `/city/recife`.
    pub fn route(&self) -> String {
        format!("/city/{}", self.slug)
    }
}

/// Fixed, ordered list of cities offered on the selection screen.
pub const CITIES: &[CityEntry] = &[
    CityEntry { label: "Dallol", slug: "dallol", query: "Dallol, Ethiopia" },
    CityEntry { label: "Fairbanks", slug: "fairbanks", query: "Fairbanks, United States" },
    CityEntry { label: "Londres", slug: "londres", query: "London, United Kingdom" },
    CityEntry { label: "Recife", slug: "recife", query: "Recife, Brazil" },
    CityEntry { label: "Vancouver", slug: "vancouver", query: "Vancouver, Canada" },
    CityEntry { label: "Yakutsk", slug: "yakutsk", query: "Yakutsk, Russia" },
];

/// Read-only view over a list of cities.
#[derive(Debug, Clone, Copy)]
pub struct CityRegistry {
    entries: &'static [CityEntry],
}

impl Default for CityRegistry {
    fn default() -> Self {
        Self::new(CITIES)
    }
}

impl CityRegistry {
    pub const fn new(entries: &'static [CityEntry]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &'static [CityEntry] {
        self.entries
    }

    pub fn find_by_slug(&self, slug: &str) -> Result<&'static CityEntry, WeatherError> {
        self.entries
            .iter()
            .find(|c| c.slug == slug)
            .ok_or_else(|| WeatherError::CityNotFound(slug.to_string()))
    }

    /// Lookup used by in-memory navigation, where the label is the key.
    pub fn find_by_label(&self, label: &str) -> Result<&'static CityEntry, WeatherError> {
        self.entries
            .iter()
            .find(|c| c.label == label)
            .ok_or_else(|| WeatherError::CityNotFound(label.to_string()))
    }

    /// Every route the registry can serve, in registry order.
    pub fn routes(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().map(CityEntry::route)
    }
}
