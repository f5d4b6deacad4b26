//! Surf score heuristic and its presentation bands.
//!
//! The score is a linear mix of wave height (dominant), wave period (moderate)
//! and wind speed (penalty), rounded and clamped to 0..=100. The weights are an
//! empirical heuristic, not a physical model.

use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

/// Points per metre of wave height.
const HEIGHT_WEIGHT: f64 = 30.0;

/// Points per second of wave period.
const PERIOD_WEIGHT: f64 = 2.0;

/// Points deducted per km/h of wind.
const WIND_PENALTY: f64 = 0.8;

/// Wind assumed when the forecast has none, in km/h.
pub const DEFAULT_WIND_KMH: f64 = 10.0;

/// Compute the 0–100 surf score for one day.
///
/// Returns `None` when wave height or wave period is unknown. A missing or
/// non-finite wind falls back to [`DEFAULT_WIND_KMH`]. The raw score is rounded
/// to the nearest integer and hard-clamped to `0..=100`.
pub fn surf_score(
    wave_height_m: Option<f64>,
    wave_period_s: Option<f64>,
    wind_kmh: Option<f64>,
) -> Option<u8> {
    let height = wave_height_m?;
    let period = wave_period_s?;
    let wind = wind_kmh
        .filter(|w| w.is_finite())
        .unwrap_or(DEFAULT_WIND_KMH);

    let raw = height * HEIGHT_WEIGHT + period * PERIOD_WEIGHT - wind * WIND_PENALTY;
    if raw.is_nan() {
        tracing::debug!(
            "Unscorable day: height={} period={} wind={}",
            height,
            period,
            wind
        );
        return None;
    }

    Some(raw.round().clamp(0.0, 100.0) as u8)
}

/// Qualitative band for a score. Bands are lower-bound inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum ScoreLabel {
    Epic,
    Good,
    Okay,
    Poor,
    #[serde(rename = "Flat/Blown")]
    FlatBlown,
    #[serde(rename = "—")]
    Unscored,
}

impl ScoreLabel {
    pub fn from_score(score: Option<u8>) -> Self {
        match score {
            None => ScoreLabel::Unscored,
            Some(s) if s >= 80 => ScoreLabel::Epic,
            Some(s) if s >= 60 => ScoreLabel::Good,
            Some(s) if s >= 40 => ScoreLabel::Okay,
            Some(s) if s >= 20 => ScoreLabel::Poor,
            Some(_) => ScoreLabel::FlatBlown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScoreLabel::Epic => "Epic",
            ScoreLabel::Good => "Good",
            ScoreLabel::Okay => "Okay",
            ScoreLabel::Poor => "Poor",
            ScoreLabel::FlatBlown => "Flat/Blown",
            ScoreLabel::Unscored => "—",
        }
    }
}

impl fmt::Display for ScoreLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Colour ramp for a score bar, green (best) to red (worst).
///
/// Thresholds differ from the [`ScoreLabel`] bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ScoreTier {
    Green,
    Lime,
    Yellow,
    Orange,
    Red,
}

impl ScoreTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            75..=u8::MAX => ScoreTier::Green,
            50..=74 => ScoreTier::Lime,
            30..=49 => ScoreTier::Yellow,
            15..=29 => ScoreTier::Orange,
            _ => ScoreTier::Red,
        }
    }
}
