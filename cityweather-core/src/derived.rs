//! Values computed from a forecast before rendering.

use serde::{Deserialize, Serialize};

use crate::{error::WeatherError, model::HourSample};

/// High/low bounds that always bracket the live reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayBounds {
    pub max_c: f64,
    pub min_c: f64,
}

/// Reconcile the live temperature with possibly stale daily aggregates.
///
/// No rounding here; that happens when the value is rendered.
pub fn display_bounds(current_c: f64, day_max_c: f64, day_min_c: f64) -> DisplayBounds {
    DisplayBounds {
        max_c: current_c.max(day_max_c),
        min_c: current_c.min(day_min_c),
    }
}

/// Round half up (towards positive infinity), so `-2.5` becomes `-2`.
///
/// Compares the fractional part instead of adding 0.5, which would carry
/// values just below one half (e.g. `0.49999999999999994`) up.
pub fn round_temperature(value: f64) -> i64 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i64
}

/// Part of the day a representative sample stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayPart {
    Dawn,
    Morning,
    Afternoon,
    Night,
}

impl DayPart {
    pub const ALL: [DayPart; 4] = [Self::Dawn, Self::Morning, Self::Afternoon, Self::Night];

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Dawn => "Dawn",
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Night => "Night",
        }
    }
}

/// Hour-of-day index used for each [`DayPart`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HourSlots {
    pub dawn: usize,
    pub morning: usize,
    pub afternoon: usize,
    pub night: usize,
}

impl Default for HourSlots {
    fn default() -> Self {
        Self { dawn: 3, morning: 9, afternoon: 15, night: 21 }
    }
}

impl HourSlots {
    pub const fn index_of(&self, part: DayPart) -> usize {
        match part {
            DayPart::Dawn => self.dawn,
            DayPart::Morning => self.morning,
            DayPart::Afternoon => self.afternoon,
            DayPart::Night => self.night,
        }
    }

    /// Largest referenced index.
    pub fn max_index(&self) -> usize {
        DayPart::ALL.iter().map(|p| self.index_of(*p)).max().unwrap_or(0)
    }
}

/// Pick the dawn, morning, afternoon and night samples, in that order.
pub fn representative_hours<'a>(
    hours: &'a [HourSample],
    slots: &HourSlots,
) -> Result<[(DayPart, &'a HourSample); 4], WeatherError> {
    let max = slots.max_index();
    if hours.len() <= max {
        return Err(WeatherError::IndexOutOfRange { index: max, len: hours.len() });
    }

    Ok(DayPart::ALL.map(|part| (part, &hours[slots.index_of(part)])))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;

    pub(crate) fn sample_hours(count: usize) -> Vec<HourSample> {
        (0..count)
            .map(|hour| HourSample {
                epoch: 1_735_689_600 + hour as i64 * 3600,
                local_time: format!("2025-01-01 {hour:02}:00"),
                temperature_c: 20.0 + hour as f64,
                condition_code: 1000,
                condition_text: "Sunny".to_string(),
                is_daytime: (6..=18).contains(&hour),
            })
            .collect()
    }

    #[test]
    fn bounds_bracket_current_reading() {
        let triples = [
            (30.0, 28.0, 18.0),
            (10.0, 28.0, 18.0),
            (22.0, 28.0, 18.0),
            (-5.5, -1.0, -3.0),
            (0.0, 0.0, 0.0),
        ];
        for (current, max, min) in triples {
            let b = display_bounds(current, max, min);
            assert!(b.max_c >= current && b.max_c >= max);
            assert!(b.min_c <= current && b.min_c <= min);
        }
    }

    #[test]
    fn stale_max_is_replaced_by_current() {
        let b = display_bounds(30.0, 28.0, 18.0);
        assert_eq!(round_temperature(b.max_c), 30);
        assert_eq!(round_temperature(b.min_c), 18);
    }

    #[test]
    fn rounding_goes_half_up() {
        assert_eq!(round_temperature(21.5), 22);
        assert_eq!(round_temperature(21.49), 21);
        assert_eq!(round_temperature(-2.5), -2);
        assert_eq!(round_temperature(-2.51), -3);
        assert_eq!(round_temperature(0.49999999999999994), 0);
        assert_eq!(round_temperature(-0.5), 0);
    }

    #[test]
    fn picks_configured_indices_in_order() {
        let hours = sample_hours(24);
        let picked = representative_hours(&hours, &HourSlots::default()).unwrap();

        let parts: Vec<_> = picked.iter().map(|(p, _)| *p).collect();
        assert_eq!(parts, DayPart::ALL);

        let temps: Vec<_> = picked.iter().map(|(_, h)| h.temperature_c).collect();
        assert_eq!(temps, vec![23.0, 29.0, 35.0, 41.0]);
    }

    #[test]
    fn custom_slots_are_honoured() {
        let hours = sample_hours(24);
        let slots = HourSlots { dawn: 6, morning: 10, afternoon: 15, night: 21 };
        let picked = representative_hours(&hours, &slots).unwrap();
        assert_eq!(picked[0].1.temperature_c, 26.0);
        assert_eq!(picked[1].1.temperature_c, 30.0);
    }

    #[test]
    fn short_series_is_out_of_range() {
        let hours = sample_hours(21);
        let err = representative_hours(&hours, &HourSlots::default()).unwrap_err();
        assert_eq!(err, WeatherError::IndexOutOfRange { index: 21, len: 21 });
    }

    proptest! {
        #[test]
        fn bounds_bracket_any_finite_triple(
            current in -100.0f64..100.0,
            day_max in -100.0f64..100.0,
            day_min in -100.0f64..100.0,
        ) {
            let b = display_bounds(current, day_max, day_min);
            prop_assert!(b.max_c >= current);
            prop_assert!(b.max_c >= day_max);
            prop_assert!(b.min_c <= current);
            prop_assert!(b.min_c <= day_min);
        }

        #[test]
        fn rounding_stays_within_half_a_degree(value in -100.0f64..100.0) {
            let rounded = round_temperature(value) as f64;
            prop_assert!(rounded - value <= 0.5);
            prop_assert!(value - rounded < 0.5);
        }

        #[test]
        fn any_valid_slots_pick_their_own_hours(
            dawn in 0usize..24,
            morning in 0usize..24,
            afternoon in 0usize..24,
            night in 0usize..24,
        ) {
            let hours = sample_hours(24);
            let slots = HourSlots { dawn, morning, afternoon, night };
            let picked = representative_hours(&hours, &slots).unwrap();

            prop_assert_eq!(picked.map(|(part, _)| part), DayPart::ALL);
            for (part, hour) in picked {
                prop_assert_eq!(hour, &hours[slots.index_of(part)]);
            }
        }
    }
}
