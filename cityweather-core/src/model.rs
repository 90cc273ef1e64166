/// One successful forecast response, reduced to what the views need.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSnapshot {
    pub location: Location,
    pub current: CurrentConditions,
    pub today: DayForecast,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub condition_code: u16,
    pub condition_text: String,
    pub wind_kph: f64,
    pub humidity_pct: u8,
    pub is_daytime: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayForecast {
    /// As the provider formats it, e.g. `2025-01-01`.
    pub date: String,
    pub astro: Astro,
    pub day_max_c: f64,
    pub day_min_c: f64,
    /// Index is the hour of day, 0..=23.
    pub hours: Vec<HourSample>,
}

/// Sunrise and sunset as the provider formats them, e.g. `06:12 AM`.
#[derive(Debug, Clone, PartialEq)]
pub struct Astro {
    pub sunrise: String,
    pub sunset: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourSample {
    pub epoch: i64,
    /// Provider local time, e.g. `2025-01-01 09:00`; displayed, never parsed.
    pub local_time: String,
    pub temperature_c: f64,
    pub condition_code: u16,
    pub condition_text: String,
    pub is_daytime: bool,
}
