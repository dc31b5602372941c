//! Place name lookups
//!
//! Forward geocoding goes through the Open-Meteo geocoding API, reverse
//! geocoding through Nominatim (OpenStreetMap). Neither needs an API key.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use super::Location;
use crate::catalog::Locale;

const OPEN_METEO_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/reverse";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("wxdash/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur when resolving a place name
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The geocoder returned no match
    #[error("No place found matching '{0}'")]
    NotFound(String),
}

/// Client for forward and reverse geocoding
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    client: Client,
    search_url: String,
    reverse_url: String,
    locale: Locale,
}

impl GeocodingClient {
    /// Creates a client with a 10 second timeout
    pub fn new(locale: Locale) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            search_url: OPEN_METEO_GEOCODING_URL.to_string(),
            reverse_url: NOMINATIM_URL.to_string(),
            locale,
        })
    }

    /// Point the client at different search and reverse endpoints
    pub fn with_endpoints(
        mut self,
        search_url: impl Into<String>,
        reverse_url: impl Into<String>,
    ) -> Self {
        self.search_url = search_url.into();
        self.reverse_url = reverse_url.into();
        self
    }

    /// Resolves a place name to the best matching location
    pub async fn search(&self, name: &str) -> Result<Location, GeocodeError> {
        let response = self
            .client
            .get(&self.search_url)
            .query(&[
                ("name", name),
                ("count", "1"),
                ("language", self.locale.tag()),
                ("format", "json"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: SearchResponse = response.json().await?;
        let place = body
            .results
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NotFound(name.to_string()))?;

        let location = Location {
            name: Some(place.label()),
            latitude: place.latitude,
            longitude: place.longitude,
            timezone: place.timezone,
        };
        tracing::info!(name = %location.display_name(), "resolved place");
        Ok(location)
    }

    /// Reverse geocodes coordinates to a place name (e.g. "Seattle, Washington").
    ///
    /// Returns `None` on failure; the caller can fall back to coordinates.
    pub async fn reverse(&self, location: &Location) -> Option<String> {
        if location.name.is_some() {
            return location.name.clone();
        }

        let response = match self
            .client
            .get(&self.reverse_url)
            .query(&[
                ("lat", location.latitude.to_string()),
                ("lon", location.longitude.to_string()),
                ("format", "json".to_string()),
                ("addressdetails", "1".to_string()),
                ("zoom", "10".to_string()),
                ("accept-language", self.locale.tag().to_string()),
            ])
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "reverse geocode request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "reverse geocode rejected");
            return None;
        }

        let body: NominatimResponse = match response.json().await {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(error = %e, "reverse geocode response unreadable");
                return None;
            }
        };

        let place = body.address.and_then(NominatimAddress::place_name)?;
        tracing::info!(name = %place, "reverse geocoded place");
        Some(place)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    name: String,
    latitude: f64,
    longitude: f64,
    admin1: Option<String>,
    country: Option<String>,
    timezone: Option<String>,
}

impl SearchResult {
    /// "Name, Region, Country", skipping parts that repeat the name
    fn label(&self) -> String {
        let mut parts = vec![self.name.as_str()];
        for part in [self.admin1.as_deref(), self.country.as_deref()]
            .into_iter()
            .flatten()
        {
            if !part.is_empty() && !parts.contains(&part) {
                parts.push(part);
            }
        }
        parts.join(", ")
    }
}

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    municipality: Option<String>,
    county: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

impl NominatimAddress {
    /// Most specific place name plus state or country for disambiguation
    fn place_name(self) -> Option<String> {
        let state = self.state.clone();
        let country = self.country.clone();

        // Prefer city > town > village > municipality for the primary place name
        let place = self
            .city
            .or(self.town)
            .or(self.village)
            .or(self.municipality)
            .or(self.county)
            .or(self.state)
            .or(self.country)?;

        let suffix = [state, country]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty() && *s != place);

        Some(match suffix {
            Some(s) => format!("{}, {}", place, s),
            None => place,
        })
    }
}
