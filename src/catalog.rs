//! WMO weather code catalog
//!
//! Static lookup table mapping WMO weather interpretation codes (as returned by
//! Open-Meteo) to localized descriptions and day/night-aware icon names.
//!
//! Both lookups are total: any `i32` produces a non-empty string. Unknown codes
//! resolve differently for the two lookups: descriptions fall back to a generic
//! "unknown" label, icons fall back to the code 0 (clear sky) entry.

use serde::{Deserialize, Serialize};

/// Languages the catalog and the dashboard labels are available in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    De,
}

impl Locale {
    /// Returns all supported locales.
    pub fn all() -> &'static [Locale] {
        &[Locale::En, Locale::De]
    }

    /// Parses a language tag such as `en`, `de` or `de-AT`.
    ///
    /// Matching is case-insensitive and only looks at the primary subtag.
    /// Returns `None` for languages the catalog has no strings for.
    pub fn from_tag(tag: &str) -> Option<Locale> {
        let primary = tag.trim().split(['-', '_']).next().unwrap_or_default();
        match primary.to_lowercase().as_str() {
            "en" => Some(Locale::En),
            "de" => Some(Locale::De),
            _ => None,
        }
    }

    /// ISO 639-1 code, as passed to the geocoding API.
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::De => "de",
        }
    }
}

/// A string available in every supported locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Localized {
    pub en: &'static str,
    pub de: &'static str,
}

impl Localized {
    pub fn get(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.en,
            Locale::De => self.de,
        }
    }
}

/// Icon reference for a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconRef {
    /// Same icon by day and by night
    Single(&'static str),
    /// Appearance depends on sun position
    DayNight {
        day: &'static str,
        night: &'static str,
    },
}

impl IconRef {
    /// Picks the icon name for the given time of day.
    pub fn resolve(&self, is_daytime: bool) -> &'static str {
        match *self {
            IconRef::Single(name) => name,
            IconRef::DayNight { day, night } => {
                if is_daytime {
                    day
                } else {
                    night
                }
            }
        }
    }
}

/// One catalog row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionEntry {
    /// WMO weather code
    pub code: i32,
    /// Human-readable description
    pub description: Localized,
    /// Icon to display for this condition
    pub icon: IconRef,
}

/// Label returned by [`describe_in`] for codes missing from the catalog.
pub const UNKNOWN_CONDITION: Localized = Localized {
    en: "Unknown conditions",
    de: "Unbekannte Wetterlage",
};

const fn entry_of(code: i32, en: &'static str, de: &'static str, icon: IconRef) -> ConditionEntry {
    ConditionEntry {
        code,
        description: Localized { en, de },
        icon,
    }
}

const fn day_night(day: &'static str, night: &'static str) -> IconRef {
    IconRef::DayNight { day, night }
}

/// Catalog rows sorted by code. Index 0 must stay code 0, the icon fallback.
static CATALOG: [ConditionEntry; 28] = [
    entry_of(0, "Clear sky", "Klarer Himmel", day_night("clear-day", "clear-night")),
    entry_of(1, "Mainly clear", "Überwiegend klar", day_night("mostly-clear-day", "mostly-clear-night")),
    entry_of(2, "Partly cloudy", "Teilweise bewölkt", day_night("partly-cloudy-day", "partly-cloudy-night")),
    entry_of(3, "Overcast", "Bedeckt", IconRef::Single("overcast")),
    entry_of(45, "Fog", "Nebel", IconRef::Single("fog")),
    entry_of(48, "Depositing rime fog", "Nebel mit Reifansatz", IconRef::Single("fog")),
    entry_of(51, "Light drizzle", "Leichter Nieselregen", IconRef::Single("drizzle")),
    entry_of(53, "Moderate drizzle", "Mäßiger Nieselregen", IconRef::Single("drizzle")),
    entry_of(55, "Dense drizzle", "Starker Nieselregen", IconRef::Single("drizzle")),
    entry_of(56, "Light freezing drizzle", "Leichter gefrierender Nieselregen", IconRef::Single("sleet")),
    entry_of(57, "Dense freezing drizzle", "Starker gefrierender Nieselregen", IconRef::Single("sleet")),
    entry_of(61, "Slight rain", "Leichter Regen", IconRef::Single("rain")),
    entry_of(63, "Moderate rain", "Mäßiger Regen", IconRef::Single("rain")),
    entry_of(65, "Heavy rain", "Starker Regen", IconRef::Single("heavy-rain")),
    entry_of(66, "Light freezing rain", "Leichter gefrierender Regen", IconRef::Single("sleet")),
    entry_of(67, "Heavy freezing rain", "Starker gefrierender Regen", IconRef::Single("sleet")),
    entry_of(71, "Slight snow fall", "Leichter Schneefall", IconRef::Single("snow")),
    entry_of(73, "Moderate snow fall", "Mäßiger Schneefall", IconRef::Single("snow")),
    entry_of(75, "Heavy snow fall", "Starker Schneefall", IconRef::Single("heavy-snow")),
    entry_of(77, "Snow grains", "Schneegriesel", IconRef::Single("snow")),
    entry_of(80, "Slight rain showers", "Leichte Regenschauer", day_night("showers-day", "showers-night")),
    entry_of(81, "Moderate rain showers", "Mäßige Regenschauer", day_night("showers-day", "showers-night")),
    entry_of(82, "Violent rain showers", "Heftige Regenschauer", IconRef::Single("heavy-rain")),
    entry_of(85, "Slight snow showers", "Leichte Schneeschauer", day_night("snow-showers-day", "snow-showers-night")),
    entry_of(86, "Heavy snow showers", "Starke Schneeschauer", IconRef::Single("heavy-snow")),
    entry_of(95, "Thunderstorm", "Gewitter", IconRef::Single("thunderstorm")),
    entry_of(96, "Thunderstorm with slight hail", "Gewitter mit leichtem Hagel", IconRef::Single("thunderstorm-hail")),
    entry_of(99, "Thunderstorm with heavy hail", "Gewitter mit starkem Hagel", IconRef::Single("thunderstorm-hail")),
];

/// Looks up the catalog row for a code.
pub fn entry(code: i32) -> Option<&'static ConditionEntry> {
    CATALOG
        .binary_search_by_key(&code, |e| e.code)
        .ok()
        .map(|idx| &CATALOG[idx])
}

/// Returns every code the catalog knows, ascending.
pub fn codes() -> impl Iterator<Item = i32> {
    CATALOG.iter().map(|e| e.code)
}

/// English description for a weather code.
pub fn describe(code: i32) -> &'static str {
    describe_in(code, Locale::En)
}

/// Description for a weather code in the given locale.
///
/// Codes missing from the catalog give [`UNKNOWN_CONDITION`].
pub fn describe_in(code: i32, locale: Locale) -> &'static str {
    entry(code)
        .map(|e| e.description)
        .unwrap_or(UNKNOWN_CONDITION)
        .get(locale)
}

/// Icon name for a weather code.
///
/// Codes missing from the catalog use the code 0 entry.
pub fn icon_for(code: i32, is_daytime: bool) -> &'static str {
    entry(code).unwrap_or(&CATALOG[0]).icon.resolve(is_daytime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_sorted_and_unique() {
        for pair in CATALOG.windows(2) {
            assert!(
                pair[0].code < pair[1].code,
                "catalog out of order at code {}",
                pair[1].code
            );
        }
        assert_eq!(CATALOG[0].code, 0);
    }

    #[test]
    fn test_catalog_covers_required_codes() {
        let required = [
            0, 1, 2, 3, 45, 48, 51, 53, 55, 56, 57, 61, 63, 65, 66, 67, 71, 73, 75, 77, 80, 81,
            82, 85, 86, 95, 96, 99,
        ];
        for code in required {
            assert!(entry(code).is_some(), "missing code {}", code);
        }
        assert_eq!(codes().count(), 28);
    }

    #[test]
    fn test_lookups_are_total() {
        for code in -1000..=1000 {
            for locale in Locale::all() {
                assert!(!describe_in(code, *locale).is_empty(), "empty description for {}", code);
            }
            assert!(!icon_for(code, true).is_empty(), "empty day icon for {}", code);
            assert!(!icon_for(code, false).is_empty(), "empty night icon for {}", code);
        }
    }

    #[test]
    fn test_unknown_code_fallback_asymmetry() {
        assert_eq!(describe(9999), "Unknown conditions");
        assert_ne!(describe(9999), describe(0));
        assert_eq!(icon_for(9999, true), icon_for(0, true));
        assert_eq!(icon_for(9999, false), icon_for(0, false));
        assert_eq!(icon_for(-1, true), "clear-day");
    }

    #[test]
    fn test_day_night_icon_selection() {
        assert_eq!(icon_for(0, true), "clear-day");
        assert_eq!(icon_for(0, false), "clear-night");
        assert_ne!(icon_for(0, true), icon_for(0, false));
    }

    #[test]
    fn test_single_icon_ignores_time_of_day() {
        assert_eq!(icon_for(95, true), icon_for(95, false));
        assert_eq!(icon_for(95, true), "thunderstorm");
        assert_eq!(icon_for(45, false), "fog");
    }

    #[test]
    fn test_describe_known_codes() {
        assert_eq!(describe(0), "Clear sky");
        assert_eq!(describe(61), "Slight rain");
        assert_eq!(describe(99), "Thunderstorm with heavy hail");
    }

    #[test]
    fn test_describe_german() {
        assert_eq!(describe_in(3, Locale::De), "Bedeckt");
        assert_eq!(describe_in(9999, Locale::De), "Unbekannte Wetterlage");
        for code in codes() {
            assert_ne!(
                describe_in(code, Locale::De),
                describe_in(code, Locale::En),
                "code {} is not translated",
                code
            );
        }
    }

    #[test]
    fn test_locale_from_tag() {
        assert_eq!(Locale::from_tag("en"), Some(Locale::En));
        assert_eq!(Locale::from_tag("DE"), Some(Locale::De));
        assert_eq!(Locale::from_tag("de-AT"), Some(Locale::De));
        assert_eq!(Locale::from_tag("en_GB"), Some(Locale::En));
        assert_eq!(Locale::from_tag("fr"), None);
        assert_eq!(Locale::from_tag(""), None);
    }

    #[test]
    fn test_locale_default_is_english() {
        assert_eq!(Locale::default(), Locale::En);
        assert_eq!(Locale::default().tag(), "en");
    }
}
