use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::dates::{DayKeys, parse_record_time};

mod buckets;
mod conditions;
mod normalize;
mod select;

pub use buckets::bucket_by_day;
pub use conditions::{
    NO_PRECIPITATION, condition_description, format_precipitation, precipitation_type_label,
    sky_description,
};
pub use normalize::{merge_records, normalize};
pub use select::closest_sample;

/// Quantity carried by a single provider observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Temperature,
    Humidity,
    PrecipitationProbability,
    Precipitation,
    WindSpeed,
    Sky,
    PrecipitationType,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Temperature,
        Category::Humidity,
        Category::PrecipitationProbability,
        Category::Precipitation,
        Category::WindSpeed,
        Category::Sky,
        Category::PrecipitationType,
    ];

    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "TMP" => Some(Self::Temperature),
            "REH" => Some(Self::Humidity),
            "POP" => Some(Self::PrecipitationProbability),
            "PCP" => Some(Self::Precipitation),
            "WSD" => Some(Self::WindSpeed),
            "SKY" => Some(Self::Sky),
            "PTY" => Some(Self::PrecipitationType),
            _ => None,
        }
    }

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Temperature => "TMP",
            Self::Humidity => "REH",
            Self::PrecipitationProbability => "POP",
            Self::Precipitation => "PCP",
            Self::WindSpeed => "WSD",
            Self::Sky => "SKY",
            Self::PrecipitationType => "PTY",
        }
    }
}

/// One `(date, time, category, value)` row as published by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawObservation {
    pub date: String,
    pub time: String,
    pub category: String,
    pub value: String,
}

impl RawObservation {
    pub fn new(
        date: impl Into<String>,
        time: impl Into<String>,
        category: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
            category: category.into(),
            value: value.into(),
        }
    }
}

/// Composite `(date, time)` key. Both parts are fixed-width digit strings, so the
/// derived ordering is chronological.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RecordKey {
    pub date: String,
    pub time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergedRecord {
    pub date: String,
    pub time: String,
    pub temperature: Option<String>,
    pub humidity: Option<String>,
    pub precipitation_probability: Option<String>,
    pub precipitation: Option<String>,
    pub wind_speed: Option<String>,
    pub sky: Option<String>,
    pub pty: Option<String>,
}

impl MergedRecord {
    pub fn empty(date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn key(&self) -> RecordKey {
        RecordKey {
            date: self.date.clone(),
            time: self.time.clone(),
        }
    }

    #[must_use]
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        parse_record_time(&self.date, &self.time)
    }

    #[must_use]
    pub fn field(&self, category: Category) -> Option<&str> {
        match category {
            Category::Temperature => self.temperature.as_deref(),
            Category::Humidity => self.humidity.as_deref(),
            Category::PrecipitationProbability => self.precipitation_probability.as_deref(),
            Category::Precipitation => self.precipitation.as_deref(),
            Category::WindSpeed => self.wind_speed.as_deref(),
            Category::Sky => self.sky.as_deref(),
            Category::PrecipitationType => self.pty.as_deref(),
        }
    }

    pub fn set_field(&mut self, category: Category, value: String) {
        let slot = match category {
            Category::Temperature => &mut self.temperature,
            Category::Humidity => &mut self.humidity,
            Category::PrecipitationProbability => &mut self.precipitation_probability,
            Category::Precipitation => &mut self.precipitation,
            Category::WindSpeed => &mut self.wind_speed,
            Category::Sky => &mut self.sky,
            Category::PrecipitationType => &mut self.pty,
        };
        *slot = Some(value);
    }

    /// Copies every populated field of `other` into `self`; absent fields never clear.
    pub fn absorb(&mut self, other: &MergedRecord) {
        for category in Category::ALL {
            if let Some(value) = other.field(category) {
                self.set_field(category, value.to_string());
            }
        }
    }

    #[must_use]
    pub fn populated(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|category| self.field(*category).is_some())
            .collect()
    }

    /// Replaces the precipitation amount with its display label. Labels format to
    /// themselves, so applying this twice is harmless.
    #[must_use]
    pub fn with_display_precipitation(mut self) -> Self {
        let label = format_precipitation(
            self.precipitation.as_deref(),
            self.precipitation_probability.as_deref(),
        );
        self.precipitation = Some(label);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DayBuckets {
    pub today: Vec<MergedRecord>,
    pub tomorrow: Vec<MergedRecord>,
    pub day_after_tomorrow: Vec<MergedRecord>,
}

impl DayBuckets {
    #[must_use]
    pub fn len(&self) -> usize {
        self.today.len() + self.tomorrow.len() + self.day_after_tomorrow.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The record nearest to the reference instant, with display fields resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentSample {
    pub record: MergedRecord,
    pub precipitation: String,
    pub sky_description: &'static str,
    pub precipitation_type: Option<&'static str>,
}

impl CurrentSample {
    #[must_use]
    pub fn from_record(record: MergedRecord) -> Self {
        let record = record.with_display_precipitation();
        let precipitation = record
            .precipitation
            .clone()
            .unwrap_or_else(|| NO_PRECIPITATION.to_string());
        Self {
            sky_description: sky_description(record.sky.as_deref()),
            precipitation_type: precipitation_type_label(record.pty.as_deref()),
            precipitation,
            record,
        }
    }

    #[must_use]
    pub fn condition(&self) -> &'static str {
        condition_description(self.record.sky.as_deref(), self.record.pty.as_deref())
    }
}

/// Result of one fetch-and-normalize pass for a single city.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ForecastSnapshot {
    pub records: Vec<MergedRecord>,
    pub buckets: DayBuckets,
    pub current: Option<CurrentSample>,
}

impl ForecastSnapshot {
    #[must_use]
    pub fn build(observations: &[RawObservation], now: NaiveDateTime) -> Self {
        let records = normalize(observations)
            .into_iter()
            .map(MergedRecord::with_display_precipitation)
            .collect::<Vec<_>>();
        let buckets = bucket_by_day(&records, &DayKeys::for_date(now.date()));
        let current = closest_sample(&records, now)
            .cloned()
            .map(CurrentSample::from_record);
        Self {
            records,
            buckets,
            current,
        }
    }

    /// Re-selects the current sample against the held records. Returns whether it moved.
    pub fn refresh_current(&mut self, now: NaiveDateTime) -> bool {
        let next = closest_sample(&self.records, now)
            .cloned()
            .map(CurrentSample::from_record);
        let changed = next.as_ref().map(|s| s.record.key())
            != self.current.as_ref().map(|s| s.record.key());
        self.current = next;
        changed
    }
}
