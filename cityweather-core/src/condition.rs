//! Mapping from provider condition codes to icons and background themes.
//!
//! Codes follow the WeatherAPI.com condition list. Grouping lives in a single
//! ordered table, [`CONDITION_TABLE`], that every caller goes through.

/// Physical phenomenon a condition code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconCategory {
    Clear,
    PartlyCloudy,
    Fog,
    /// Thunderstorm codes are folded in here.
    Rain,
    Snow,
}

/// Concrete glyph to draw, after applying the day/night variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Sun,
    MoonAndStars,
    CloudWithSun,
    CloudWithMoon,
    CloudFog,
    CloudRain,
    CloudSnow,
}

impl Icon {
    pub const fn glyph(&self) -> &'static str {
        match self {
            Self::Sun => "☀️",
            Self::MoonAndStars => "🌙",
            Self::CloudWithSun => "⛅",
            Self::CloudWithMoon => "☁️",
            Self::CloudFog => "🌫️",
            Self::CloudRain => "🌧️",
            Self::CloudSnow => "🌨️",
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sun => "sun",
            Self::MoonAndStars => "moon-and-stars",
            Self::CloudWithSun => "cloud-sun",
            Self::CloudWithMoon => "cloud-moon",
            Self::CloudFog => "cloud-fog",
            Self::CloudRain => "cloud-rain",
            Self::CloudSnow => "cloud-snow",
        }
    }
}

impl std::fmt::Display for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Page background theme.
///
/// Only a clear sky gets its own colour; every other condition shares
/// [`Theme::Overcast`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    ClearDay,
    ClearNight,
    Overcast,
}

/// Foreground colour that stays readable on a theme background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextContrast {
    Light,
    Dark,
}

impl Theme {
    /// Background colour as an RGB triple.
    pub const fn background_rgb(&self) -> (u8, u8, u8) {
        match self {
            Self::ClearDay => (0x2C, 0xAE, 0xFF),
            Self::ClearNight => (0x1A, 0x2C, 0x42),
            Self::Overcast => (0xCC, 0xCC, 0xCC),
        }
    }

    pub const fn text_contrast(&self) -> TextContrast {
        match self {
            Self::Overcast => TextContrast::Dark,
            Self::ClearDay | Self::ClearNight => TextContrast::Light,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ClearDay => "clear-day",
            Self::ClearNight => "clear-night",
            Self::Overcast => "overcast",
        }
    }
}

const CLEAR_CODE: u16 = 1000;

/// Ordered (codes, category) pairs; the first matching row wins.
pub const CONDITION_TABLE: &[(&[u16], IconCategory)] = &[
    (&[CLEAR_CODE], IconCategory::Clear),
    (&[1003, 1006, 1009], IconCategory::PartlyCloudy),
    (&[1030, 1135, 1147], IconCategory::Fog),
    (
        &[
            1063, 1150, 1153, 1168, 1171, 1180, 1183, 1186, 1189, 1192, 1195, 1198, 1201, 1204,
            1207, 1240, 1243, 1246, 1087, 1273, 1276, 1279, 1282,
        ],
        IconCategory::Rain,
    ),
    (
        &[
            1066, 1069, 1072, 1114, 1117, 1210, 1213, 1216, 1219, 1222, 1225, 1237, 1249, 1252,
            1255, 1258, 1261, 1264,
        ],
        IconCategory::Snow,
    ),
];

/// Category for unrecognised codes.
pub const FALLBACK_CATEGORY: IconCategory = IconCategory::PartlyCloudy;

/// Result of classifying one condition code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: IconCategory,
    pub icon: Icon,
}

pub fn category_for(code: u16) -> IconCategory {
    CONDITION_TABLE
        .iter()
        .find(|(codes, _)| codes.contains(&code))
        .map(|(_, category)| *category)
        .unwrap_or(FALLBACK_CATEGORY)
}

pub fn classify(code: u16, is_daytime: bool) -> Classification {
    let category = category_for(code);
    let icon = match (category, is_daytime) {
        (IconCategory::Clear, true) => Icon::Sun,
        (IconCategory::Clear, false) => Icon::MoonAndStars,
        (IconCategory::PartlyCloudy, true) => Icon::CloudWithSun,
        (IconCategory::PartlyCloudy, false) => Icon::CloudWithMoon,
        (IconCategory::Fog, _) => Icon::CloudFog,
        (IconCategory::Rain, _) => Icon::CloudRain,
        (IconCategory::Snow, _) => Icon::CloudSnow,
    };

    Classification { category, icon }
}

pub fn theme_for(code: u16, is_daytime: bool) -> Theme {
    match (code, is_daytime) {
        (CLEAR_CODE, true) => Theme::ClearDay,
        (CLEAR_CODE, false) => Theme::ClearNight,
        _ => Theme::Overcast,
    }
}
