//! Core data models for the weather dashboard
//!
//! This module contains the data types produced by the Open-Meteo and
//! geocoding clients and consumed by the analysis and rendering code.

pub mod geocode;
pub mod weather;

pub use geocode::{GeocodeError, GeocodingClient};
pub use weather::{WeatherClient, WeatherError};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A position to fetch weather for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Human-readable place name, if known
    pub name: Option<String>,
    /// Latitude coordinate
    pub latitude: f64,
    /// Longitude coordinate
    pub longitude: f64,
    /// IANA timezone reported by the geocoder, if known
    pub timezone: Option<String>,
}

impl Location {
    /// Creates an unnamed location from coordinates
    pub fn from_coords(latitude: f64, longitude: f64) -> Self {
        Self {
            name: None,
            latitude,
            longitude,
            timezone: None,
        }
    }

    /// Name for display, falling back to formatted coordinates
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{:.2}, {:.2}", self.latitude, self.longitude),
        }
    }
}

/// Measurement system requested from the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Parses a units argument, case-insensitive.
    pub fn from_name(s: &str) -> Option<Units> {
        match s.to_lowercase().trim() {
            "metric" | "si" => Some(Units::Metric),
            "imperial" | "us" => Some(Units::Imperial),
            _ => None,
        }
    }

    /// Query string parameters selecting this unit system on Open-Meteo
    pub fn query_params(&self) -> &'static str {
        match self {
            Units::Metric => "temperature_unit=celsius&wind_speed_unit=kmh&precipitation_unit=mm",
            Units::Imperial => {
                "temperature_unit=fahrenheit&wind_speed_unit=mph&precipitation_unit=inch"
            }
        }
    }
}

/// Current weather conditions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Observation time in the location's timezone
    pub time: NaiveDateTime,
    /// Air temperature
    pub temperature: f64,
    /// Feels-like temperature
    pub apparent_temperature: f64,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Wind speed
    pub wind_speed: f64,
    /// WMO weather code
    pub weather_code: i32,
    /// Whether the sun is up
    pub is_day: bool,
}

/// Hourly weather forecast data for a single hour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyForecast {
    /// Time of the forecast
    pub time: NaiveDateTime,
    /// Air temperature
    pub temperature: f64,
    /// WMO weather code
    pub weather_code: i32,
    /// Chance of precipitation percentage (0-100)
    pub precipitation_probability: u8,
    /// Whether the sun is up
    pub is_day: bool,
}

/// Daily forecast entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub weather_code: i32,
    pub temperature_max: f64,
    pub temperature_min: f64,
    pub precipitation_sum: f64,
    pub sunrise: NaiveTime,
    pub sunset: NaiveTime,
}

/// Provider unit strings for a forecast, passed through unmodified
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastUnits {
    pub temperature: String,
    pub precipitation: String,
    pub wind_speed: String,
}

impl Default for ForecastUnits {
    fn default() -> Self {
        Self {
            temperature: "°C".to_string(),
            precipitation: "mm".to_string(),
            wind_speed: "km/h".to_string(),
        }
    }
}

/// Current conditions plus hourly and daily forecasts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastReport {
    /// Current weather conditions
    pub current: CurrentConditions,
    /// Hourly forecasts for the next 24 hours
    pub hourly: Vec<HourlyForecast>,
    /// One entry per forecast day
    pub daily: Vec<DailyForecast>,
    /// Units the values above are expressed in
    pub units: ForecastUnits,
}

/// Provider unit strings for a daily series, passed through unmodified
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyUnits {
    pub temperature: String,
    pub precipitation: String,
}

impl Default for DailyUnits {
    fn default() -> Self {
        Self {
            temperature: "°C".to_string(),
            precipitation: "mm".to_string(),
        }
    }
}

/// Historical daily weather, one entry per calendar day, oldest first.
///
/// All vectors share index alignment: `time[i]` describes the same day as
/// `weather_code[i]`, `temperature_max[i]` and so on. The weather client
/// guarantees equal lengths; the analysis code relies on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    pub time: Vec<NaiveDate>,
    pub weather_code: Vec<i32>,
    pub temperature_max: Vec<f64>,
    pub temperature_min: Vec<f64>,
    pub precipitation_sum: Vec<f64>,
    pub units: DailyUnits,
}

impl DailySeries {
    /// Number of days in the series
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Whether the series carries no days at all
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// First and last day covered, if any
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((*self.time.first()?, *self.time.last()?))
    }
}
