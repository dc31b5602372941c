//! Command-line interface parsing for wxdash
//!
//! Arguments are parsed with clap and then validated into a
//! [`DashboardConfig`], which is what the rest of the application runs on.

use chrono::{Datelike, Local, NaiveDate};
use clap::{ArgAction, Parser, Subcommand};
use thiserror::Error;

use crate::catalog::Locale;
use crate::data::weather::MAX_FORECAST_DAYS;
use crate::data::Units;

/// First year the Open-Meteo archive has data for
pub const FIRST_ARCHIVE_YEAR: i32 = 1940;

/// Error types for CLI argument validation
#[derive(Debug, Error, PartialEq)]
pub enum CliError {
    #[error("Invalid language: '{0}'. Supported languages: en, de")]
    InvalidLanguage(String),

    #[error("Invalid units: '{0}'. Valid units: metric, imperial")]
    InvalidUnits(String),

    #[error("Invalid date: '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid forecast length: {0}. Days must be between 1 and 16")]
    InvalidDays(u32),

    #[error("Invalid year: {0}. History is available from 1940 to the current year")]
    InvalidYear(i32),

    #[error("No location given. Use --city NAME or --lat LAT --lon LON")]
    MissingLocation,

    #[error("Use either --city or --lat/--lon, not both")]
    ConflictingLocation,

    #[error("Invalid coordinates: {lat}, {lon}")]
    InvalidCoordinates { lat: f64, lon: f64 },
}

/// wxdash - weather dashboard for the terminal
#[derive(Parser, Debug)]
#[command(name = "wxdash")]
#[command(about = "Current conditions, forecasts and weather history in your terminal")]
#[command(version)]
pub struct Cli {
    /// Place to show weather for, e.g. "Berlin"
    #[arg(long, global = true, value_name = "NAME")]
    pub city: Option<String>,

    /// Latitude in decimal degrees (use together with --lon)
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude in decimal degrees (use together with --lat)
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Language for descriptions and labels: en, de
    #[arg(long, global = true, default_value = "en")]
    pub lang: String,

    /// Unit system: metric, imperial
    #[arg(long, global = true, default_value = "metric")]
    pub units: String,

    /// Print JSON instead of text cards
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log output (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Dashboard views
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Show current conditions
    Current,
    /// Show the next hours and the daily forecast
    Forecast {
        /// Number of forecast days (1-16)
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
    /// Summarize weather history for a date range
    History {
        /// First day, YYYY-MM-DD
        #[arg(long)]
        start: String,
        /// Last day, YYYY-MM-DD
        #[arg(long)]
        end: String,
    },
    /// Compare the weather history of two calendar years
    Compare {
        /// First year
        #[arg(long)]
        year: i32,
        /// Year to compare against
        #[arg(long = "with", value_name = "YEAR")]
        other: i32,
    },
}

/// Where to fetch weather for
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceQuery {
    /// Resolve through forward geocoding
    Name(String),
    /// Use as given, name looked up through reverse geocoding
    Coordinates { latitude: f64, longitude: f64 },
}

/// Validated view selection
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Current,
    Forecast { days: u32 },
    History { start: NaiveDate, end: NaiveDate },
    Compare { first: i32, second: i32 },
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub place: PlaceQuery,
    pub locale: Locale,
    pub units: Units,
    pub json: bool,
    pub verbosity: u8,
    pub view: View,
}

/// Parses a `YYYY-MM-DD` date argument.
pub fn parse_date_arg(s: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| CliError::InvalidDate(s.to_string()))
}

fn validate_year(year: i32, current_year: i32) -> Result<i32, CliError> {
    if (FIRST_ARCHIVE_YEAR..=current_year).contains(&year) {
        Ok(year)
    } else {
        Err(CliError::InvalidYear(year))
    }
}

impl PlaceQuery {
    fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        match (&cli.city, cli.lat, cli.lon) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(CliError::ConflictingLocation),
            (Some(city), None, None) if !city.trim().is_empty() => {
                Ok(PlaceQuery::Name(city.trim().to_string()))
            }
            (None, Some(lat), Some(lon)) => {
                if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) {
                    Ok(PlaceQuery::Coordinates {
                        latitude: lat,
                        longitude: lon,
                    })
                } else {
                    Err(CliError::InvalidCoordinates { lat, lon })
                }
            }
            _ => Err(CliError::MissingLocation),
        }
    }
}

impl View {
    fn from_command(command: &Command) -> Result<Self, CliError> {
        match command {
            Command::Current => Ok(View::Current),
            Command::Forecast { days } => {
                if (1..=MAX_FORECAST_DAYS).contains(days) {
                    Ok(View::Forecast { days: *days })
                } else {
                    Err(CliError::InvalidDays(*days))
                }
            }
            Command::History { start, end } => {
                let start = parse_date_arg(start)?;
                let end = parse_date_arg(end)?;
                if start > end {
                    return Err(CliError::InvalidRange { start, end });
                }
                Ok(View::History { start, end })
            }
            Command::Compare { year, other } => {
                let current_year = Local::now().year();
                Ok(View::Compare {
                    first: validate_year(*year, current_year)?,
                    second: validate_year(*other, current_year)?,
                })
            }
        }
    }
}

impl DashboardConfig {
    /// Creates a DashboardConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(DashboardConfig)` with validated settings
    /// * `Err(CliError)` describing the first invalid argument
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let locale = Locale::from_tag(&cli.lang).ok_or_else(|| CliError::InvalidLanguage(cli.lang.clone()))?;
        let units = Units::from_name(&cli.units).ok_or_else(|| CliError::InvalidUnits(cli.units.clone()))?;
        let place = PlaceQuery::from_cli(cli)?;
        let view = View::from_command(&cli.command)?;

        Ok(DashboardConfig {
            place,
            locale,
            units,
            json: cli.json,
            verbosity: cli.verbose,
            view,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(args: &[&str]) -> Result<DashboardConfig, CliError> {
        let mut argv = vec!["wxdash"];
        argv.extend_from_slice(args);
        DashboardConfig::from_cli(&Cli::parse_from(argv))
    }

    #[test]
    fn test_parse_date_arg() {
        assert_eq!(
            parse_date_arg("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert_eq!(
            parse_date_arg("2023-02-29"),
            Err(CliError::InvalidDate("2023-02-29".to_string()))
        );
        assert!(parse_date_arg("29.02.2024").is_err());
    }

    #[test]
    fn test_cli_parse_current_with_city() {
        let cli = Cli::parse_from(["wxdash", "--city", "Berlin", "current"]);
        assert_eq!(cli.city.as_deref(), Some("Berlin"));
        assert_eq!(cli.command, Command::Current);
        assert_eq!(cli.lang, "en");
        assert_eq!(cli.units, "metric");
        assert!(!cli.json);
    }

    #[test]
    fn test_global_args_after_subcommand() {
        let cli = Cli::parse_from(["wxdash", "forecast", "--days", "3", "--lat", "49.28", "--lon", "-123.12"]);
        assert_eq!(cli.command, Command::Forecast { days: 3 });
        assert_eq!(cli.lon, Some(-123.12));
    }

    #[test]
    fn test_verbose_counts() {
        let cli = Cli::parse_from(["wxdash", "-vv", "--city", "Oslo", "current"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_config_defaults() {
        let config = config(&["--city", "Berlin", "current"]).unwrap();
        assert_eq!(config.place, PlaceQuery::Name("Berlin".to_string()));
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.units, Units::Metric);
        assert_eq!(config.view, View::Current);
        assert!(!config.json);
    }

    #[test]
    fn test_config_coordinates() {
        let config = config(&["--lat", "52.52", "--lon", "13.41", "--lang", "de", "--units", "imperial", "--json", "current"]).unwrap();
        assert_eq!(
            config.place,
            PlaceQuery::Coordinates {
                latitude: 52.52,
                longitude: 13.41
            }
        );
        assert_eq!(config.locale, Locale::De);
        assert_eq!(config.units, Units::Imperial);
        assert!(config.json);
    }

    #[test]
    fn test_config_forecast_default_days() {
        let config = config(&["--city", "Berlin", "forecast"]).unwrap();
        assert_eq!(config.view, View::Forecast { days: 7 });
    }

    #[test]
    fn test_config_rejects_bad_forecast_days() {
        assert_eq!(config(&["--city", "Berlin", "forecast", "--days", "0"]), Err(CliError::InvalidDays(0)));
        assert_eq!(config(&["--city", "Berlin", "forecast", "--days", "17"]), Err(CliError::InvalidDays(17)));
    }

    #[test]
    fn test_config_history_range() {
        let config = config(&["--city", "Berlin", "history", "--start", "2024-01-01", "--end", "2024-12-31"]).unwrap();
        assert_eq!(
            config.view,
            View::History {
                start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            }
        );
    }

    #[test]
    fn test_config_history_single_day() {
        let config = config(&["--city", "Berlin", "history", "--start", "2024-05-05", "--end", "2024-05-05"]);
        assert!(config.is_ok());
    }

    #[test]
    fn test_config_rejects_reversed_range() {
        let result = config(&["--city", "Berlin", "history", "--start", "2024-12-31", "--end", "2024-01-01"]);
        assert!(matches!(result, Err(CliError::InvalidRange { .. })));
        assert!(result.unwrap_err().to_string().contains("is after"));
    }

    #[test]
    fn test_config_rejects_bad_date() {
        let result = config(&["--city", "Berlin", "history", "--start", "yesterday", "--end", "2024-01-01"]);
        assert_eq!(result, Err(CliError::InvalidDate("yesterday".to_string())));
    }

    #[test]
    fn test_config_compare_years() {
        let config = config(&["--city", "Berlin", "compare", "--year", "2022", "--with", "2023"]).unwrap();
        assert_eq!(config.view, View::Compare { first: 2022, second: 2023 });
    }

    #[test]
    fn test_config_rejects_years_outside_archive() {
        assert_eq!(
            config(&["--city", "Berlin", "compare", "--year", "1900", "--with", "2023"]),
            Err(CliError::InvalidYear(1900))
        );
        assert_eq!(
            config(&["--city", "Berlin", "compare", "--year", "2022", "--with", "3000"]),
            Err(CliError::InvalidYear(3000))
        );
    }

    #[test]
    fn test_config_rejects_unknown_language() {
        let result = config(&["--city", "Berlin", "--lang", "fr", "current"]);
        assert_eq!(result, Err(CliError::InvalidLanguage("fr".to_string())));
        assert!(result.unwrap_err().to_string().contains("Invalid language"));
    }

    #[test]
    fn test_config_rejects_unknown_units() {
        let result = config(&["--city", "Berlin", "--units", "kelvin", "current"]);
        assert_eq!(result, Err(CliError::InvalidUnits("kelvin".to_string())));
    }

    #[test]
    fn test_config_requires_location() {
        assert_eq!(config(&["current"]), Err(CliError::MissingLocation));
        assert_eq!(config(&["--lat", "52.5", "current"]), Err(CliError::MissingLocation));
        assert_eq!(config(&["--city", "  ", "current"]), Err(CliError::MissingLocation));
    }

    #[test]
    fn test_config_rejects_conflicting_location() {
        assert_eq!(
            config(&["--city", "Berlin", "--lat", "52.5", "--lon", "13.4", "current"]),
            Err(CliError::ConflictingLocation)
        );
    }

    #[test]
    fn test_config_rejects_out_of_range_coordinates() {
        assert_eq!(
            config(&["--lat", "91", "--lon", "0", "current"]),
            Err(CliError::InvalidCoordinates { lat: 91.0, lon: 0.0 })
        );
    }
}
