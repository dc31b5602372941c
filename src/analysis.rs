//! Historical weather statistics
//!
//! Derives extremes, period averages and the most common weather condition
//! from a [`DailySeries`]. Everything here is pure and synchronous.
//!
//! Rounding is half away from zero (`f64::round`), at whole-number granularity
//! for temperatures and one decimal place for precipitation.

use serde::{Deserialize, Serialize};

use crate::catalog::{describe_in, Locale, UNKNOWN_CONDITION};
use crate::data::DailySeries;

/// Single maximum/minimum values across the period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extremes {
    /// Highest daily maximum temperature
    pub hottest_day: i32,
    /// Lowest daily minimum temperature
    pub coldest_day: i32,
    /// Highest daily precipitation, one decimal
    pub wettest_day: f64,
}

/// Period averages and totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Averages {
    pub avg_max_temp: i32,
    pub avg_min_temp: i32,
    /// Sum of daily precipitation, one decimal
    pub total_precipitation: f64,
}

/// Most frequent weather condition across the period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherPatterns {
    /// Localized description of the most frequent condition
    pub most_common_weather: String,
    /// Number of days with that description
    pub most_common_weather_days: usize,
    /// Number of days analyzed
    pub total_days: usize,
}

/// Statistics derived from a daily series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub extremes: Extremes,
    pub averages: Averages,
    pub weather_patterns: WeatherPatterns,
}

/// Differences between two summaries, computed as `later - earlier`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryComparison {
    pub hottest_day_delta: i32,
    pub coldest_day_delta: i32,
    pub wettest_day_delta: f64,
    pub avg_max_temp_delta: i32,
    pub avg_min_temp_delta: i32,
    pub total_precipitation_delta: f64,
    /// Whether the most common condition differs between the two periods
    pub most_common_weather_changed: bool,
}

/// Rounds `value` to `decimals` places, half away from zero.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Rounds `value` to the nearest whole number, half away from zero.
pub fn round_whole(value: f64) -> i32 {
    value.round() as i32
}

fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn min_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn mean_of(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Analyzes a series using English condition descriptions.
///
/// Returns `None` when the series has no days.
pub fn analyze(series: &DailySeries) -> Option<AnalysisSummary> {
    analyze_in(series, Locale::En)
}

/// Analyzes a series, describing conditions in the given locale.
///
/// Returns `None` when the series has no days.
pub fn analyze_in(series: &DailySeries, locale: Locale) -> Option<AnalysisSummary> {
    if series.is_empty() {
        return None;
    }

    tracing::trace!(days = series.len(), ?locale, "analyzing daily series");

    let extremes = Extremes {
        hottest_day: round_whole(max_of(&series.temperature_max)),
        coldest_day: round_whole(min_of(&series.temperature_min)),
        wettest_day: round_to(max_of(&series.precipitation_sum), 1),
    };

    let averages = Averages {
        avg_max_temp: round_whole(mean_of(&series.temperature_max)),
        avg_min_temp: round_whole(mean_of(&series.temperature_min)),
        total_precipitation: round_to(series.precipitation_sum.iter().sum(), 1),
    };

    let mut weather_patterns = weather_patterns(&series.weather_code, locale);
    weather_patterns.total_days = series.len();

    Some(AnalysisSummary {
        extremes,
        averages,
        weather_patterns,
    })
}

/// Finds the most frequent condition description.
///
/// Codes are bucketed by their description string, so distinct codes sharing
/// a description count together. Buckets keep first-seen order and the first
/// bucket reaching the maximum count wins ties.
pub fn weather_patterns(codes: &[i32], locale: Locale) -> WeatherPatterns {
    let mut counts: Vec<(&'static str, usize)> = Vec::new();
    for &code in codes {
        let description = describe_in(code, locale);
        match counts.iter_mut().find(|(d, _)| *d == description) {
            Some((_, count)) => *count += 1,
            None => counts.push((description, 1)),
        }
    }

    // Iterator::max_by_key keeps the last maximum, ties need the first.
    let mut best: Option<(&'static str, usize)> = None;
    for &(description, count) in &counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((description, count));
        }
    }

    let (description, days) = best.unwrap_or((UNKNOWN_CONDITION.get(locale), 0));
    WeatherPatterns {
        most_common_weather: description.to_string(),
        most_common_weather_days: days,
        total_days: codes.len(),
    }
}

/// Compares two summaries, e.g. the same location in two different years.
pub fn compare(earlier: &AnalysisSummary, later: &AnalysisSummary) -> SummaryComparison {
    SummaryComparison {
        hottest_day_delta: later.extremes.hottest_day - earlier.extremes.hottest_day,
        coldest_day_delta: later.extremes.coldest_day - earlier.extremes.coldest_day,
        wettest_day_delta: round_to(later.extremes.wettest_day - earlier.extremes.wettest_day, 1),
        avg_max_temp_delta: later.averages.avg_max_temp - earlier.averages.avg_max_temp,
        avg_min_temp_delta: later.averages.avg_min_temp - earlier.averages.avg_min_temp,
        total_precipitation_delta: round_to(
            later.averages.total_precipitation - earlier.averages.total_precipitation,
            1,
        ),
        most_common_weather_changed: later.weather_patterns.most_common_weather
            != earlier.weather_patterns.most_common_weather,
    }
}
