use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    app::state::{AppMode, AppState},
    domain::{
        city::{CITIES, City, CityKey},
        dates::format_date_time_label,
        forecast::{CurrentSample, ForecastSnapshot, MergedRecord, sky_description},
    },
    resilience::freshness::{FreshnessState, RefreshMetadata},
};

const MISSING: &str = "-";

/// Plain-text report: one summary line per city, then the selected city's three days.
#[must_use]
pub fn render_report(state: &AppState) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Weather at {}{}",
        state.now.format("%Y-%m-%d %H:%M:%S"),
        status_badge(&state.refresh_meta, Utc::now())
    );

    for city in &CITIES {
        let marker = if city.key == state.selected_city { ">" } else { " " };
        let current = state
            .cities
            .get(&city.key)
            .and_then(|w| w.snapshot.current.as_ref());
        let _ = writeln!(out, "{marker} {:<6} {}", city.display_name, summary_line(current));
    }

    let selected = state.selected_city.city();
    match state.selected_weather() {
        Some(weather) => {
            let _ = writeln!(out);
            render_buckets(&mut out, selected, &weather.snapshot);
        }
        None if state.mode == AppMode::Error => {
            let _ = writeln!(
                out,
                "\n{}: {}",
                selected.display_name,
                state.last_error.as_deref().unwrap_or("fetch failed")
            );
        }
        None => {
            let _ = writeln!(out, "\n{}: loading...", selected.display_name);
        }
    }
    out
}

#[must_use]
pub fn summary_line(current: Option<&CurrentSample>) -> String {
    let Some(sample) = current else {
        return "no data".to_string();
    };
    let record = &sample.record;
    let mut line = format!(
        "{}°C  {}%  wind {} m/s  {}",
        field(record.temperature.as_deref()),
        field(record.humidity.as_deref()),
        field(record.wind_speed.as_deref()),
        sample.precipitation,
    );
    let condition = sample.condition();
    if !condition.is_empty() {
        let _ = write!(line, "  {condition}");
    }
    line
}

fn render_buckets(out: &mut String, city: &City, snapshot: &ForecastSnapshot) {
    let _ = writeln!(out, "{} hourly forecast", city.display_name);
    for (title, records) in [
        ("Today", &snapshot.buckets.today),
        ("Tomorrow", &snapshot.buckets.tomorrow),
        ("Day after tomorrow", &snapshot.buckets.day_after_tomorrow),
    ] {
        let _ = writeln!(out, "{title}");
        if records.is_empty() {
            let _ = writeln!(out, "  (no data)");
        }
        for record in records {
            let _ = writeln!(out, "  {}", hourly_line(record));
        }
    }
}

#[must_use]
pub fn hourly_line(record: &MergedRecord) -> String {
    let when = format_date_time_label(&record.date, &record.time)
        .unwrap_or_else(|| format!("{} {}", record.date, record.time));
    format!(
        "{when:<18} {:>4}°C {:>4}%  POP {:>3}%  {:<16} {}",
        field(record.temperature.as_deref()),
        field(record.humidity.as_deref()),
        field(record.precipitation_probability.as_deref()),
        field(record.precipitation.as_deref()),
        sky_description(record.sky.as_deref()),
    )
}

/// Empty while fresh; otherwise the state plus how old the last good data is.
fn status_badge(meta: &RefreshMetadata, now: DateTime<Utc>) -> String {
    let label = match meta.state {
        FreshnessState::Fresh => return String::new(),
        FreshnessState::Stale => "stale",
        FreshnessState::Offline => "offline",
    };
    match meta.age_minutes(now) {
        Some(age) => format!("  [{label}, {age}m old]"),
        None => format!("  [{label}]"),
    }
}

fn field(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => MISSING,
    }
}

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub selected: CityKey,
    pub cities: Vec<JsonCity<'a>>,
}

#[derive(Debug, Serialize)]
pub struct JsonCity<'a> {
    pub city: &'a City,
    pub fetched_at: DateTime<Utc>,
    pub forecast: &'a ForecastSnapshot,
}

#[must_use]
pub fn json_report(state: &AppState) -> JsonReport<'_> {
    JsonReport {
        generated_at: Utc::now(),
        selected: state.selected_city,
        cities: CITIES
            .iter()
            .filter_map(|city| {
                state.cities.get(&city.key).map(|weather| JsonCity {
                    city,
                    fetched_at: weather.fetched_at,
                    forecast: &weather.snapshot,
                })
            })
            .collect(),
    }
}
