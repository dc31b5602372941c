//! Open-Meteo weather API client
//!
//! This module fetches forecasts and historical daily weather from the
//! Open-Meteo forecast and archive APIs and parses them into our data
//! structures.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::{
    CurrentConditions, DailyForecast, DailySeries, DailyUnits, ForecastReport, ForecastUnits,
    HourlyForecast, Location, Units,
};

/// Base URL for the Open-Meteo forecast API
const OPEN_METEO_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Base URL for the Open-Meteo historical weather API
const OPEN_METEO_ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

/// Number of hourly entries requested with a forecast
const FORECAST_HOURS: u32 = 24;

/// Most forecast days Open-Meteo serves
pub const MAX_FORECAST_DAYS: u32 = 16;

const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,apparent_temperature,is_day,weather_code,wind_speed_10m";
const HOURLY_FIELDS: &str = "temperature_2m,weather_code,precipitation_probability,is_day";
const FORECAST_DAILY_FIELDS: &str =
    "weather_code,temperature_2m_max,temperature_2m_min,precipitation_sum,sunrise,sunset";
const ARCHIVE_DAILY_FIELDS: &str =
    "weather_code,temperature_2m_max,temperature_2m_min,precipitation_sum";

/// Errors that can occur when fetching weather data
#[derive(Debug, Error)]
pub enum WeatherError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The provider rejected the request
    #[error("Weather API error: {0}")]
    Api(String),

    /// Missing expected field in response
    #[error("Missing expected field in response: {0}")]
    MissingField(String),

    /// Invalid time format in response
    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),

    /// Requested period cannot be served
    #[error("Invalid date range: {0}")]
    InvalidRange(String),
}

/// Client for fetching weather data from Open-Meteo
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    forecast_url: String,
    archive_url: String,
    timezone: String,
    units: Units,
}

impl Default for WeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherClient {
    /// Create a new WeatherClient with default settings
    ///
    /// The timezone defaults to `auto`, letting Open-Meteo resolve it from
    /// the coordinates. A timezone carried by the location always wins.
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    /// Create a new WeatherClient with a custom HTTP client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            forecast_url: OPEN_METEO_FORECAST_URL.to_string(),
            archive_url: OPEN_METEO_ARCHIVE_URL.to_string(),
            timezone: "auto".to_string(),
            units: Units::Metric,
        }
    }

    /// Point the client at different forecast and archive endpoints
    pub fn with_endpoints(
        mut self,
        forecast_url: impl Into<String>,
        archive_url: impl Into<String>,
    ) -> Self {
        self.forecast_url = forecast_url.into();
        self.archive_url = archive_url.into();
        self
    }

    /// Create a new WeatherClient with a custom fallback timezone
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    /// Timezone to request for `location`
    fn timezone_for<'a>(&'a self, location: &'a Location) -> &'a str {
        location.timezone.as_deref().unwrap_or(&self.timezone)
    }

    /// Request values in the given unit system
    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    /// Fetch current conditions, the next 24 hours and `days` daily forecasts
    pub async fn fetch_forecast(
        &self,
        location: &Location,
        days: u32,
    ) -> Result<ForecastReport, WeatherError> {
        if days == 0 || days > MAX_FORECAST_DAYS {
            return Err(WeatherError::InvalidRange(format!(
                "forecast days must be between 1 and {}, got {}",
                MAX_FORECAST_DAYS, days
            )));
        }

        let url = format!(
            "{}?latitude={}&longitude={}&current={}&hourly={}&forecast_hours={}&daily={}&forecast_days={}&timezone={}&{}",
            self.forecast_url,
            location.latitude,
            location.longitude,
            CURRENT_FIELDS,
            HOURLY_FIELDS,
            FORECAST_HOURS,
            FORECAST_DAILY_FIELDS,
            days,
            self.timezone_for(location),
            self.units.query_params()
        );

        let text = self.get(&url).await?;
        let api_response: ForecastResponse = serde_json::from_str(&text)?;

        parse_forecast(api_response)
    }

    /// Fetch daily history between `start` and `end`, both inclusive
    ///
    /// A response without a daily block yields an empty series.
    pub async fn fetch_history(
        &self,
        location: &Location,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<DailySeries, WeatherError> {
        if start > end {
            return Err(WeatherError::InvalidRange(format!(
                "start {} is after end {}",
                start, end
            )));
        }

        let url = format!(
            "{}?latitude={}&longitude={}&start_date={}&end_date={}&daily={}&timezone={}&{}",
            self.archive_url,
            location.latitude,
            location.longitude,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d"),
            ARCHIVE_DAILY_FIELDS,
            self.timezone_for(location),
            self.units.query_params()
        );

        let text = self.get(&url).await?;
        let api_response: ArchiveResponse = serde_json::from_str(&text)?;

        let units = api_response
            .daily_units
            .map(|u| DailyUnits {
                temperature: u.temperature_2m_max,
                precipitation: u.precipitation_sum,
            })
            .unwrap_or_default();

        match api_response.daily {
            Some(daily) => parse_daily_series(daily, units),
            None => {
                tracing::debug!("archive response carried no daily block");
                Ok(DailySeries {
                    units,
                    ..DailySeries::default()
                })
            }
        }
    }

    /// Fetch two full calendar years of history concurrently
    ///
    /// The current year is cut off at today.
    pub async fn fetch_years(
        &self,
        location: &Location,
        first: i32,
        second: i32,
    ) -> Result<(DailySeries, DailySeries), WeatherError> {
        let today = Local::now().date_naive();
        let (first_start, first_end) = year_bounds(first, today)
            .ok_or_else(|| WeatherError::InvalidRange(format!("year {} has no history yet", first)))?;
        let (second_start, second_end) = year_bounds(second, today)
            .ok_or_else(|| WeatherError::InvalidRange(format!("year {} has no history yet", second)))?;

        futures::future::try_join(
            self.fetch_history(location, first_start, first_end),
            self.fetch_history(location, second_start, second_end),
        )
        .await
    }

    /// Issue a GET request and return the body, mapping provider errors
    async fn get(&self, url: &str) -> Result<String, WeatherError> {
        tracing::debug!(%url, "requesting weather data");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let reason = serde_json::from_str::<ApiErrorBody>(&text)
                .map(|body| body.reason)
                .unwrap_or_else(|_| format!("HTTP {}", status));
            tracing::warn!(%status, %reason, "weather request rejected");
            return Err(WeatherError::Api(reason));
        }

        Ok(text)
    }
}

/// First and last day of `year` that can have history as of `today`
///
/// Returns `None` for years that have not started yet.
pub fn year_bounds(year: i32, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let end = NaiveDate::from_ymd_opt(year, 12, 31)?;
    if start > today {
        return None;
    }
    Some((start, end.min(today)))
}

/// Parse the forecast response into a ForecastReport
fn parse_forecast(response: ForecastResponse) -> Result<ForecastReport, WeatherError> {
    let current = response.current;
    let current_conditions = CurrentConditions {
        time: parse_datetime(&current.time)?,
        temperature: current.temperature_2m,
        apparent_temperature: current.apparent_temperature,
        humidity: current.relative_humidity_2m.round().clamp(0.0, 100.0) as u8,
        wind_speed: current.wind_speed_10m,
        weather_code: current.weather_code,
        is_day: current.is_day != 0,
    };

    let units = response
        .current_units
        .map(|u| ForecastUnits {
            temperature: u.temperature_2m,
            precipitation: ForecastUnits::default().precipitation,
            wind_speed: u.wind_speed_10m,
        })
        .unwrap_or_default();
    let units = match response.daily_units {
        Some(daily_units) => ForecastUnits {
            precipitation: daily_units.precipitation_sum,
            ..units
        },
        None => units,
    };

    Ok(ForecastReport {
        current: current_conditions,
        hourly: parse_hourly_data(&response.hourly)?,
        daily: parse_forecast_days(&response.daily)?,
        units,
    })
}

/// Parse hourly weather data arrays into HourlyForecast structs
fn parse_hourly_data(hourly: &HourlyWeather) -> Result<Vec<HourlyForecast>, WeatherError> {
    let len = hourly.time.len();

    if hourly.temperature_2m.len() != len
        || hourly.weather_code.len() != len
        || hourly.precipitation_probability.len() != len
        || hourly.is_day.len() != len
    {
        return Err(WeatherError::MissingField(
            "hourly arrays have inconsistent lengths".to_string(),
        ));
    }

    let mut forecasts = Vec::with_capacity(len);

    for i in 0..len {
        forecasts.push(HourlyForecast {
            time: parse_datetime(&hourly.time[i])?,
            temperature: hourly.temperature_2m[i],
            weather_code: hourly.weather_code[i],
            precipitation_probability: hourly.precipitation_probability[i].unwrap_or(0),
            is_day: hourly.is_day[i] != 0,
        });
    }

    Ok(forecasts)
}

/// Parse daily forecast arrays into DailyForecast structs
fn parse_forecast_days(daily: &ForecastDaily) -> Result<Vec<DailyForecast>, WeatherError> {
    let len = daily.time.len();

    if daily.weather_code.len() != len
        || daily.temperature_2m_max.len() != len
        || daily.temperature_2m_min.len() != len
        || daily.precipitation_sum.len() != len
        || daily.sunrise.len() != len
        || daily.sunset.len() != len
    {
        return Err(WeatherError::MissingField(
            "daily arrays have inconsistent lengths".to_string(),
        ));
    }

    let mut days = Vec::with_capacity(len);

    for i in 0..len {
        days.push(DailyForecast {
            date: parse_date(&daily.time[i])?,
            weather_code: daily.weather_code[i],
            temperature_max: daily.temperature_2m_max[i],
            temperature_min: daily.temperature_2m_min[i],
            precipitation_sum: daily.precipitation_sum[i].unwrap_or(0.0),
            sunrise: parse_time(&daily.sunrise[i])?,
            sunset: parse_time(&daily.sunset[i])?,
        });
    }

    Ok(days)
}

/// Build an index-aligned DailySeries from archive arrays
///
/// Days where any value is `null` are dropped; the archive lags a few days
/// behind real time and reports those days as `null`.
fn parse_daily_series(daily: ArchiveDaily, units: DailyUnits) -> Result<DailySeries, WeatherError> {
    let len = daily.time.len();

    if daily.weather_code.len() != len
        || daily.temperature_2m_max.len() != len
        || daily.temperature_2m_min.len() != len
        || daily.precipitation_sum.len() != len
    {
        return Err(WeatherError::MissingField(
            "daily arrays have inconsistent lengths".to_string(),
        ));
    }

    let mut series = DailySeries {
        units,
        ..DailySeries::default()
    };
    let mut skipped = 0usize;

    for i in 0..len {
        let values = (
            daily.weather_code[i],
            daily.temperature_2m_max[i],
            daily.temperature_2m_min[i],
            daily.precipitation_sum[i],
        );
        let (Some(code), Some(max), Some(min), Some(precip)) = values else {
            skipped += 1;
            continue;
        };

        series.time.push(parse_date(&daily.time[i])?);
        series.weather_code.push(code);
        series.temperature_max.push(max);
        series.temperature_min.push(min);
        series.precipitation_sum.push(precip);
    }

    if skipped > 0 {
        tracing::debug!(skipped, kept = series.len(), "dropped days with missing values");
    }

    Ok(series)
}

/// Parse a date string (e.g., "2024-07-15") to NaiveDate
fn parse_date(date_str: &str) -> Result<NaiveDate, WeatherError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| WeatherError::InvalidTimeFormat(date_str.to_string()))
}

/// Parse a datetime string in ISO 8601 format (e.g., "2024-07-15T05:30") to NaiveDateTime
fn parse_datetime(datetime_str: &str) -> Result<NaiveDateTime, WeatherError> {
    NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%dT%H:%M")
        .map_err(|_| WeatherError::InvalidTimeFormat(datetime_str.to_string()))
}

/// Parse a time string in ISO 8601 format (e.g., "2024-07-15T05:30") to NaiveTime
fn parse_time(time_str: &str) -> Result<NaiveTime, WeatherError> {
    let time_part = time_str
        .split('T')
        .nth(1)
        .ok_or_else(|| WeatherError::InvalidTimeFormat(time_str.to_string()))?;

    NaiveTime::parse_from_str(time_part, "%H:%M")
        .map_err(|_| WeatherError::InvalidTimeFormat(time_str.to_string()))
}

/// Error body returned by Open-Meteo on rejected requests
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    reason: String,
}

/// Open-Meteo forecast response structure
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_units: Option<CurrentUnits>,
    current: CurrentWeather,
    hourly: HourlyWeather,
    daily_units: Option<ForecastDailyUnits>,
    daily: ForecastDaily,
}

#[derive(Debug, Deserialize)]
struct CurrentUnits {
    temperature_2m: String,
    wind_speed_10m: String,
}

/// Current weather data from Open-Meteo
#[derive(Debug, Deserialize)]
struct CurrentWeather {
    time: String,
    temperature_2m: f64,
    relative_humidity_2m: f64,
    apparent_temperature: f64,
    is_day: u8,
    weather_code: i32,
    wind_speed_10m: f64,
}

/// Hourly weather data from Open-Meteo
#[derive(Debug, Deserialize)]
struct HourlyWeather {
    time: Vec<String>,
    temperature_2m: Vec<f64>,
    weather_code: Vec<i32>,
    precipitation_probability: Vec<Option<u8>>,
    is_day: Vec<u8>,
}

#[derive(Debug, Deserialize)]
struct ForecastDailyUnits {
    precipitation_sum: String,
}

/// Daily forecast data from Open-Meteo
#[derive(Debug, Deserialize)]
struct ForecastDaily {
    time: Vec<String>,
    weather_code: Vec<i32>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    precipitation_sum: Vec<Option<f64>>,
    sunrise: Vec<String>,
    sunset: Vec<String>,
}

/// Open-Meteo archive response structure
#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    daily_units: Option<ArchiveDailyUnits>,
    daily: Option<ArchiveDaily>,
}

#[derive(Debug, Deserialize)]
struct ArchiveDailyUnits {
    temperature_2m_max: String,
    precipitation_sum: String,
}

/// Historical daily data; any value may be `null`
#[derive(Debug, Deserialize)]
struct ArchiveDaily {
    time: Vec<String>,
    weather_code: Vec<Option<i32>>,
    temperature_2m_max: Vec<Option<f64>>,
    temperature_2m_min: Vec<Option<f64>>,
    precipitation_sum: Vec<Option<f64>>,
}
