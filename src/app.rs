//! Dashboard orchestration
//!
//! Resolves the requested place, fetches the data a view needs, runs the
//! analysis and produces the final text or JSON output.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::analysis::{analyze_in, compare, AnalysisSummary, SummaryComparison};
use crate::catalog::{describe_in, icon_for};
use crate::cli::{CliError, DashboardConfig, PlaceQuery, View};
use crate::data::{
    CurrentConditions, DailyUnits, ForecastReport, ForecastUnits, GeocodeError, GeocodingClient,
    Location, WeatherClient, WeatherError,
};
use crate::render;

/// Top-level application error
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Cli(#[from] CliError),

    #[error(transparent)]
    Weather(#[from] WeatherError),

    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    #[error("No historical data for {0}")]
    NoHistory(i32),

    #[error("Failed to encode JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct CurrentOutput<'a> {
    location: &'a Location,
    current: &'a CurrentConditions,
    description: &'static str,
    icon: &'static str,
    units: &'a ForecastUnits,
}

#[derive(Serialize)]
struct HistoryOutput<'a> {
    location: &'a Location,
    start: NaiveDate,
    end: NaiveDate,
    units: &'a DailyUnits,
    summary: Option<&'a AnalysisSummary>,
}

#[derive(Serialize)]
struct YearSummary<'a> {
    year: i32,
    summary: &'a AnalysisSummary,
}

#[derive(Serialize)]
struct ComparisonOutput<'a> {
    location: &'a Location,
    units: &'a DailyUnits,
    years: [YearSummary<'a>; 2],
    comparison: &'a SummaryComparison,
}

#[derive(Serialize)]
struct ForecastOutput<'a> {
    location: &'a Location,
    #[serde(flatten)]
    report: &'a ForecastReport,
}

/// Application entry point holding the API clients
#[derive(Debug, Clone)]
pub struct App {
    weather_client: WeatherClient,
    geocoding_client: GeocodingClient,
}

impl App {
    /// Creates clients configured for the given dashboard settings
    pub fn new(config: &DashboardConfig) -> Result<Self, AppError> {
        Ok(Self {
            weather_client: WeatherClient::new().with_units(config.units),
            geocoding_client: GeocodingClient::new(config.locale)?,
        })
    }

    /// Creates an App with custom clients (for testing)
    pub fn with_clients(weather_client: WeatherClient, geocoding_client: GeocodingClient) -> Self {
        Self {
            weather_client,
            geocoding_client,
        }
    }

    /// Resolves the place to fetch weather for
    pub async fn resolve_location(&self, place: &PlaceQuery) -> Result<Location, AppError> {
        match place {
            PlaceQuery::Name(name) => Ok(self.geocoding_client.search(name).await?),
            PlaceQuery::Coordinates {
                latitude,
                longitude,
            } => {
                let mut location = Location::from_coords(*latitude, *longitude);
                location.name = self.geocoding_client.reverse(&location).await;
                Ok(location)
            }
        }
    }

    /// Runs the configured view and returns what should be printed
    pub async fn run(&self, config: &DashboardConfig) -> Result<String, AppError> {
        let location = self.resolve_location(&config.place).await?;
        let locale = config.locale;

        match config.view {
            View::Current => {
                let report = self.weather_client.fetch_forecast(&location, 1).await?;
                if config.json {
                    let current = &report.current;
                    let output = CurrentOutput {
                        location: &location,
                        current,
                        description: describe_in(current.weather_code, locale),
                        icon: icon_for(current.weather_code, current.is_day),
                        units: &report.units,
                    };
                    return Ok(serde_json::to_string_pretty(&output)?);
                }
                Ok(render::render_current(&location, &report, locale))
            }
            View::Forecast { days } => {
                let report = self.weather_client.fetch_forecast(&location, days).await?;
                if config.json {
                    let output = ForecastOutput {
                        location: &location,
                        report: &report,
                    };
                    return Ok(serde_json::to_string_pretty(&output)?);
                }
                Ok(render::render_forecast(&location, &report, locale))
            }
            View::History { start, end } => {
                let series = self.weather_client.fetch_history(&location, start, end).await?;
                let summary = analyze_in(&series, locale);
                if config.json {
                    let output = HistoryOutput {
                        location: &location,
                        start,
                        end,
                        units: &series.units,
                        summary: summary.as_ref(),
                    };
                    return Ok(serde_json::to_string_pretty(&output)?);
                }
                Ok(render::render_history(
                    &location,
                    (start, end),
                    summary.as_ref(),
                    &series.units,
                    locale,
                ))
            }
            View::Compare { first, second } => {
                // Differences always read later minus earlier
                let (first, second) = (first.min(second), first.max(second));
                let (first_series, second_series) = self
                    .weather_client
                    .fetch_years(&location, first, second)
                    .await?;
                let first_summary = analyze_in(&first_series, locale).ok_or(AppError::NoHistory(first))?;
                let second_summary =
                    analyze_in(&second_series, locale).ok_or(AppError::NoHistory(second))?;
                let comparison = compare(&first_summary, &second_summary);

                if config.json {
                    let output = ComparisonOutput {
                        location: &location,
                        units: &first_series.units,
                        years: [
                            YearSummary {
                                year: first,
                                summary: &first_summary,
                            },
                            YearSummary {
                                year: second,
                                summary: &second_summary,
                            },
                        ],
                        comparison: &comparison,
                    };
                    return Ok(serde_json::to_string_pretty(&output)?);
                }
                Ok(render::render_comparison(
                    &location,
                    (first, &first_summary),
                    (second, &second_summary),
                    &comparison,
                    &first_series.units,
                    locale,
                ))
            }
        }
    }
}
