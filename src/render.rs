//! Text rendering of dashboard cards
//!
//! Turns forecast reports and analysis summaries into plain text cards for
//! the terminal. Card headers follow a day or night theme and all labels are
//! localized. Provider unit strings are printed as received.

use chrono::NaiveDate;

use crate::analysis::{AnalysisSummary, SummaryComparison};
use crate::catalog::{describe_in, icon_for, Locale};
use crate::data::{DailyUnits, ForecastReport, Location};

/// Day or night presentation variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Day,
    Night,
}

impl Theme {
    pub fn from_is_day(is_day: bool) -> Self {
        if is_day {
            Theme::Day
        } else {
            Theme::Night
        }
    }

    fn banner(&self) -> &'static str {
        match self {
            Theme::Day => "☀",
            Theme::Night => "☾",
        }
    }

    fn rule(&self) -> &'static str {
        match self {
            Theme::Day => "════════════════════════════════════════",
            Theme::Night => "┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄",
        }
    }
}

/// Card labels for one locale
struct Labels {
    now: &'static str,
    feels_like: &'static str,
    humidity: &'static str,
    wind: &'static str,
    next_hours: &'static str,
    daily: &'static str,
    history: &'static str,
    hottest_day: &'static str,
    coldest_day: &'static str,
    wettest_day: &'static str,
    avg_max: &'static str,
    avg_min: &'static str,
    total_precipitation: &'static str,
    most_common: &'static str,
    days: &'static str,
    no_data: &'static str,
    comparison: &'static str,
    condition_changed: &'static str,
    condition_unchanged: &'static str,
}

static LABELS_EN: Labels = Labels {
    now: "Now",
    feels_like: "Feels like",
    humidity: "Humidity",
    wind: "Wind",
    next_hours: "Next hours",
    daily: "Daily forecast",
    history: "History",
    hottest_day: "Hottest day",
    coldest_day: "Coldest day",
    wettest_day: "Wettest day",
    avg_max: "Average high",
    avg_min: "Average low",
    total_precipitation: "Total precipitation",
    most_common: "Most common",
    days: "days",
    no_data: "No historical data for this period.",
    comparison: "Comparison",
    condition_changed: "Most common weather changed",
    condition_unchanged: "Most common weather unchanged",
};

static LABELS_DE: Labels = Labels {
    now: "Jetzt",
    feels_like: "Gefühlt",
    humidity: "Luftfeuchte",
    wind: "Wind",
    next_hours: "Nächste Stunden",
    daily: "Tagesvorhersage",
    history: "Rückblick",
    hottest_day: "Heißester Tag",
    coldest_day: "Kältester Tag",
    wettest_day: "Nassester Tag",
    avg_max: "Mittleres Maximum",
    avg_min: "Mittleres Minimum",
    total_precipitation: "Niederschlag gesamt",
    most_common: "Am häufigsten",
    days: "Tage",
    no_data: "Keine historischen Daten für diesen Zeitraum.",
    comparison: "Vergleich",
    condition_changed: "Häufigstes Wetter hat sich geändert",
    condition_unchanged: "Häufigstes Wetter unverändert",
};

fn labels(locale: Locale) -> &'static Labels {
    match locale {
        Locale::En => &LABELS_EN,
        Locale::De => &LABELS_DE,
    }
}

/// Terminal glyph for a catalog icon name
pub fn glyph(icon: &str) -> &'static str {
    match icon {
        "clear-day" => "☀️",
        "clear-night" | "mostly-clear-night" => "🌙",
        "mostly-clear-day" => "🌤️",
        "partly-cloudy-day" => "⛅",
        "partly-cloudy-night" | "overcast" => "☁️",
        "fog" => "🌫️",
        "drizzle" | "showers-day" => "🌦️",
        "rain" | "heavy-rain" | "showers-night" => "🌧️",
        "sleet" | "snow-showers-day" | "snow-showers-night" => "🌨️",
        "snow" | "heavy-snow" => "❄️",
        "thunderstorm" | "thunderstorm-hail" => "⛈️",
        _ => "·",
    }
}

fn header(out: &mut String, theme: Theme, title: &str, location: &Location) {
    out.push_str(&format!("{} {} · {}\n", theme.banner(), title, location.display_name()));
    out.push_str(theme.rule());
    out.push('\n');
}

/// Current conditions card
pub fn render_current(location: &Location, report: &ForecastReport, locale: Locale) -> String {
    let l = labels(locale);
    let current = &report.current;
    let units = &report.units;
    let theme = Theme::from_is_day(current.is_day);
    let mut out = String::new();

    header(&mut out, theme, l.now, location);
    out.push_str(&format!(
        "{}  {:.0}{}  {}\n",
        glyph(icon_for(current.weather_code, current.is_day)),
        current.temperature,
        units.temperature,
        describe_in(current.weather_code, locale)
    ));
    out.push_str(&format!(
        "{}: {:.0}{}   {}: {}%   {}: {:.0} {}\n",
        l.feels_like,
        current.apparent_temperature,
        units.temperature,
        l.humidity,
        current.humidity,
        l.wind,
        current.wind_speed,
        units.wind_speed
    ));
    out
}

/// Hourly strip plus daily table
pub fn render_forecast(location: &Location, report: &ForecastReport, locale: Locale) -> String {
    let l = labels(locale);
    let units = &report.units;
    let mut out = render_current(location, report, locale);

    out.push('\n');
    out.push_str(l.next_hours);
    out.push('\n');
    for hour in &report.hourly {
        out.push_str(&format!(
            "  {}  {}  {:>5.1}{}  {:>3}%\n",
            hour.time.format("%H:%M"),
            glyph(icon_for(hour.weather_code, hour.is_day)),
            hour.temperature,
            units.temperature,
            hour.precipitation_probability
        ));
    }

    out.push('\n');
    out.push_str(l.daily);
    out.push('\n');
    for day in &report.daily {
        out.push_str(&format!(
            "  {}  {}  {:>5.1} / {:>5.1}{}  {:>5.1} {}  {}  ↑{} ↓{}\n",
            day.date.format("%a %d.%m"),
            glyph(icon_for(day.weather_code, true)),
            day.temperature_max,
            day.temperature_min,
            units.temperature,
            day.precipitation_sum,
            units.precipitation,
            describe_in(day.weather_code, locale),
            day.sunrise.format("%H:%M"),
            day.sunset.format("%H:%M")
        ));
    }
    out
}

fn summary_lines(out: &mut String, summary: &AnalysisSummary, units: &DailyUnits, l: &Labels) {
    let e = &summary.extremes;
    let a = &summary.averages;
    let p = &summary.weather_patterns;

    out.push_str(&format!("  {:<22}{}{}\n", l.hottest_day, e.hottest_day, units.temperature));
    out.push_str(&format!("  {:<22}{}{}\n", l.coldest_day, e.coldest_day, units.temperature));
    out.push_str(&format!("  {:<22}{:.1} {}\n", l.wettest_day, e.wettest_day, units.precipitation));
    out.push_str(&format!("  {:<22}{}{}\n", l.avg_max, a.avg_max_temp, units.temperature));
    out.push_str(&format!("  {:<22}{}{}\n", l.avg_min, a.avg_min_temp, units.temperature));
    out.push_str(&format!(
        "  {:<22}{:.1} {}\n",
        l.total_precipitation, a.total_precipitation, units.precipitation
    ));
    out.push_str(&format!(
        "  {:<22}{} ({}/{} {})\n",
        l.most_common, p.most_common_weather, p.most_common_weather_days, p.total_days, l.days
    ));
}

/// History summary card for a date range
///
/// `summary` is `None` when the provider had no days for the range.
pub fn render_history(
    location: &Location,
    range: (NaiveDate, NaiveDate),
    summary: Option<&AnalysisSummary>,
    units: &DailyUnits,
    locale: Locale,
) -> String {
    let l = labels(locale);
    let mut out = String::new();
    let title = format!("{} {} – {}", l.history, range.0, range.1);

    header(&mut out, Theme::Day, &title, location);
    match summary {
        Some(summary) => summary_lines(&mut out, summary, units, l),
        None => {
            out.push_str(l.no_data);
            out.push('\n');
        }
    }
    out
}

/// Two yearly summaries and their differences
pub fn render_comparison(
    location: &Location,
    earlier: (i32, &AnalysisSummary),
    later: (i32, &AnalysisSummary),
    comparison: &SummaryComparison,
    units: &DailyUnits,
    locale: Locale,
) -> String {
    let l = labels(locale);
    let mut out = String::new();
    let title = format!("{} {} / {}", l.comparison, earlier.0, later.0);

    header(&mut out, Theme::Day, &title, location);
    for (year, summary) in [earlier, later] {
        out.push_str(&format!("{}\n", year));
        summary_lines(&mut out, summary, units, l);
    }

    let c = comparison;
    out.push_str(&format!("Δ {} → {}\n", earlier.0, later.0));
    out.push_str(&format!("  {:<22}{:+}{}\n", l.hottest_day, c.hottest_day_delta, units.temperature));
    out.push_str(&format!("  {:<22}{:+}{}\n", l.coldest_day, c.coldest_day_delta, units.temperature));
    out.push_str(&format!(
        "  {:<22}{:+.1} {}\n",
        l.wettest_day, c.wettest_day_delta, units.precipitation
    ));
    out.push_str(&format!("  {:<22}{:+}{}\n", l.avg_max, c.avg_max_temp_delta, units.temperature));
    out.push_str(&format!("  {:<22}{:+}{}\n", l.avg_min, c.avg_min_temp_delta, units.temperature));
    out.push_str(&format!(
        "  {:<22}{:+.1} {}\n",
        l.total_precipitation, c.total_precipitation_delta, units.precipitation
    ));
    out.push_str("  ");
    out.push_str(if c.most_common_weather_changed {
        l.condition_changed
    } else {
        l.condition_unchanged
    });
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyze, compare};
    use crate::catalog::codes;
    use crate::data::{CurrentConditions, DailyForecast, DailySeries, ForecastUnits, HourlyForecast};
    use chrono::{NaiveDateTime, NaiveTime};

    fn berlin() -> Location {
        Location {
            name: Some("Berlin, Germany".to_string()),
            latitude: 52.52,
            longitude: 13.41,
            timezone: Some("Europe/Berlin".to_string()),
        }
    }

    fn report(is_day: bool) -> ForecastReport {
        let time = NaiveDateTime::parse_from_str("2024-07-15T14:00", "%Y-%m-%dT%H:%M").unwrap();
        ForecastReport {
            current: CurrentConditions {
                time,
                temperature: 22.4,
                apparent_temperature: 23.8,
                humidity: 65,
                wind_speed: 12.5,
                weather_code: 0,
                is_day,
            },
            hourly: vec![HourlyForecast {
                time,
                temperature: 22.4,
                weather_code: 61,
                precipitation_probability: 40,
                is_day,
            }],
            daily: vec![DailyForecast {
                date: time.date(),
                weather_code: 95,
                temperature_max: 27.0,
                temperature_min: 15.5,
                precipitation_sum: 3.2,
                sunrise: NaiveTime::from_hms_opt(5, 2, 0).unwrap(),
                sunset: NaiveTime::from_hms_opt(21, 25, 0).unwrap(),
            }],
            units: ForecastUnits::default(),
        }
    }

    fn summary_series() -> DailySeries {
        DailySeries {
            time: vec![
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            ],
            weather_code: vec![3, 3],
            temperature_max: vec![4.0, 6.0],
            temperature_min: vec![-2.0, 0.0],
            precipitation_sum: vec![1.2, 0.0],
            units: DailyUnits::default(),
        }
    }

    #[test]
    fn test_every_catalog_icon_has_a_glyph() {
        for code in codes() {
            for is_day in [true, false] {
                let icon = icon_for(code, is_day);
                assert_ne!(glyph(icon), "·", "icon {} has no glyph", icon);
            }
        }
        assert_eq!(glyph("no-such-icon"), "·");
    }

    #[test]
    fn test_current_card_uses_day_theme() {
        let card = render_current(&berlin(), &report(true), Locale::En);
        assert!(card.starts_with("☀ Now · Berlin, Germany"));
        assert!(card.contains("☀️"));
        assert!(card.contains("22°C"));
        assert!(card.contains("Clear sky"));
        assert!(card.contains("Humidity: 65%"));
        assert!(card.contains("12 km/h") || card.contains("13 km/h"));
    }

    #[test]
    fn test_current_card_uses_night_theme() {
        let card = render_current(&berlin(), &report(false), Locale::En);
        assert!(card.starts_with("☾ Now"));
        assert!(card.contains("🌙"));
    }

    #[test]
    fn test_current_card_in_german() {
        let card = render_current(&berlin(), &report(true), Locale::De);
        assert!(card.starts_with("☀ Jetzt"));
        assert!(card.contains("Klarer Himmel"));
        assert!(card.contains("Luftfeuchte: 65%"));
    }

    #[test]
    fn test_forecast_lists_hours_and_days() {
        let card = render_forecast(&berlin(), &report(true), Locale::En);
        assert!(card.contains("Next hours"));
        assert!(card.contains("14:00"));
        assert!(card.contains(" 40%"));
        assert!(card.contains("Daily forecast"));
        assert!(card.contains("Thunderstorm"));
        assert!(card.contains("↑05:02 ↓21:25"));
        assert!(card.contains("3.2 mm"));
    }

    #[test]
    fn test_history_card_with_summary() {
        let series = summary_series();
        let summary = analyze(&series).unwrap();
        let range = series.date_range().unwrap();
        let card = render_history(&berlin(), range, Some(&summary), &series.units, Locale::En);

        assert!(card.contains("History 2024-01-01 – 2024-01-02"));
        assert!(card.contains("Hottest day"));
        assert!(card.contains("6°C"));
        assert!(card.contains("-2°C"));
        assert!(card.contains("1.2 mm"));
        assert!(card.contains("Overcast (2/2 days)"));
    }

    #[test]
    fn test_history_card_without_data() {
        let range = (
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        );
        let card = render_history(&berlin(), range, None, &DailyUnits::default(), Locale::De);
        assert!(card.contains("Keine historischen Daten"));
    }

    #[test]
    fn test_history_card_forwards_provider_units() {
        let mut series = summary_series();
        series.units = DailyUnits {
            temperature: "°F".to_string(),
            precipitation: "inch".to_string(),
        };
        let summary = analyze(&series).unwrap();
        let card = render_history(
            &berlin(),
            series.date_range().unwrap(),
            Some(&summary),
            &series.units,
            Locale::En,
        );
        assert!(card.contains("6°F"));
        assert!(card.contains("1.2 inch"));
    }

    #[test]
    fn test_comparison_card_signs_deltas() {
        let earlier_series = summary_series();
        let mut later_series = summary_series();
        later_series.temperature_max = vec![5.0, 9.0];
        later_series.weather_code = vec![0, 0];
        later_series.precipitation_sum = vec![0.0, 0.0];

        let earlier = analyze(&earlier_series).unwrap();
        let later = analyze(&later_series).unwrap();
        let diff = compare(&earlier, &later);

        let card = render_comparison(
            &berlin(),
            (2023, &earlier),
            (2024, &later),
            &diff,
            &earlier_series.units,
            Locale::En,
        );
        assert!(card.contains("Comparison 2023 / 2024"));
        assert!(card.contains("+3°C"));
        assert!(card.contains("-1.2 mm"));
        assert!(card.contains("Most common weather changed"));
    }
}
