//! Day normalization and best-day selection.
//!
//! Merges the weather and marine daily series by position into one record per
//! calendar day, scores each day, and picks at most one "best day" within the
//! displayed window.

use serde::Serialize;
use utoipa::ToSchema;

use crate::helpers::{first_present, value_at};
use crate::services::open_meteo::{DailyMarine, DailyWeather};
use crate::services::surf::{surf_score, ScoreLabel, ScoreTier};

/// Number of days shown to the user.
pub const DISPLAY_DAYS: usize = 5;

/// A window maximum below this never earns a "best day" badge.
pub const MIN_BEST_SCORE: u8 = 55;

/// One calendar day of merged weather and marine data.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DayRecord {
    /// Calendar date (YYYY-MM-DD) from the weather series
    pub date: String,
    /// WMO weather interpretation code
    pub condition_code: Option<i32>,
    /// Maximum air temperature in Celsius
    pub temp_max: Option<f64>,
    /// Minimum air temperature in Celsius
    pub temp_min: Option<f64>,
    /// Precipitation sum in mm
    pub precip: Option<f64>,
    /// Maximum wind speed in km/h
    pub wind_max: Option<f64>,
    /// Wave height in metres (swell, else combined, else wind-wave)
    pub wave_height: Option<f64>,
    /// Wave period in seconds (swell, else combined, else wind-wave)
    pub wave_period: Option<f64>,
    /// Surf score 0–100, absent when wave height or period is unknown
    pub score: Option<u8>,
}

/// A day inside the display window.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DisplayDay {
    #[serde(flatten)]
    pub day: DayRecord,
    /// Qualitative band of the score
    pub label: ScoreLabel,
    /// Colour tier of the score bar, absent when unscored
    pub tier: Option<ScoreTier>,
    /// True for at most one day per window
    pub is_best: bool,
}

/// Merge daily weather and marine series into scored day records.
///
/// `weather.time` defines the output length; marine data never extends or
/// truncates it. Missing arrays, short arrays and `null` entries all read as
/// absent. Wave height and period each fall back swell → combined → wind-wave.
pub fn normalize_days(
    weather: Option<&DailyWeather>,
    marine: Option<&DailyMarine>,
) -> Vec<DayRecord> {
    let Some(weather) = weather else {
        return Vec::new();
    };

    let height_sources = [
        marine.and_then(|m| m.swell_wave_height_max.as_deref()),
        marine.and_then(|m| m.wave_height_max.as_deref()),
        marine.and_then(|m| m.wind_wave_height_max.as_deref()),
    ];
    let period_sources = [
        marine.and_then(|m| m.swell_wave_period_max.as_deref()),
        marine.and_then(|m| m.wave_period_max.as_deref()),
        marine.and_then(|m| m.wind_wave_period_max.as_deref()),
    ];

    weather
        .time
        .iter()
        .enumerate()
        .map(|(i, date)| {
            let wind_max = value_at(weather.wind_speed_10m_max.as_deref(), i);
            let wave_height = first_present(&height_sources, i);
            let wave_period = first_present(&period_sources, i);

            DayRecord {
                date: date.clone(),
                condition_code: value_at(weather.weather_code.as_deref(), i),
                temp_max: value_at(weather.temperature_2m_max.as_deref(), i),
                temp_min: value_at(weather.temperature_2m_min.as_deref(), i),
                precip: value_at(weather.precipitation_sum.as_deref(), i),
                wind_max,
                wave_height,
                wave_period,
                score: surf_score(wave_height, wave_period, wind_max),
            }
        })
        .collect()
}

/// Pick the index of the best-scoring day in `window`.
///
/// Unscored days are skipped. On ties the earliest day wins. Returns `None`
/// when nothing is scored or the maximum is below [`MIN_BEST_SCORE`].
pub fn select_best_day(window: &[DayRecord]) -> Option<usize> {
    let mut best: Option<(usize, u8)> = None;

    for (i, day) in window.iter().enumerate() {
        let Some(score) = day.score else { continue };
        if best.map_or(true, |(_, max)| score > max) {
            best = Some((i, score));
        }
    }

    best.filter(|&(_, score)| score >= MIN_BEST_SCORE)
        .map(|(i, _)| i)
}

/// Take the first `size` days and annotate them for display.
pub fn build_display_window(days: &[DayRecord], size: usize) -> Vec<DisplayDay> {
    let window = &days[..days.len().min(size)];
    let best = select_best_day(window);

    window
        .iter()
        .enumerate()
        .map(|(i, day)| DisplayDay {
            day: day.clone(),
            label: ScoreLabel::from_score(day.score),
            tier: day.score.map(ScoreTier::from_score),
            is_best: best == Some(i),
        })
        .collect()
}
