use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

const DATE_KEY_FORMAT: &str = "%Y%m%d";

/// Calendar-day keys around a reference date, in the provider's `YYYYMMDD` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayKeys {
    pub yesterday: String,
    pub today: String,
    pub tomorrow: String,
    pub day_after_tomorrow: String,
}

impl DayKeys {
    #[must_use]
    pub fn for_date(today: NaiveDate) -> Self {
        Self {
            yesterday: date_key(shift_days(today, -1)),
            today: date_key(today),
            tomorrow: date_key(shift_days(today, 1)),
            day_after_tomorrow: date_key(shift_days(today, 2)),
        }
    }
}

#[must_use]
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

#[must_use]
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    if key.len() != 8 {
        return None;
    }
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT).ok()
}

/// Hour component of an `HHMM` string. Minutes are ignored.
#[must_use]
pub fn parse_hour(time: &str) -> Option<u32> {
    let hour = time.get(0..2)?.parse::<u32>().ok()?;
    (hour < 24).then_some(hour)
}

/// Record instant: the forecast date at the top of the forecast hour.
#[must_use]
pub fn parse_record_time(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = parse_date_key(date)?;
    let hour = NaiveTime::from_hms_opt(parse_hour(time)?, 0, 0)?;
    Some(date.and_time(hour))
}

#[must_use]
pub fn format_date_label(date: &str) -> Option<String> {
    parse_date_key(date).map(|d| d.format("%Y-%m-%d").to_string())
}

#[must_use]
pub fn format_hour_label(time: &str) -> Option<String> {
    parse_hour(time).map(|hour| format!("{hour:02}:00"))
}

/// `2026-10-17 9 AM` style label for a record.
#[must_use]
pub fn format_date_time_label(date: &str, time: &str) -> Option<String> {
    let day = format_date_label(date)?;
    let hour = parse_hour(time)?;
    let meridiem = if hour < 12 { "AM" } else { "PM" };
    let clock = match hour % 12 {
        0 => 12,
        h => h,
    };
    Some(format!("{day} {clock} {meridiem}"))
}

fn shift_days(date: NaiveDate, offset: i64) -> NaiveDate {
    let days = Days::new(offset.unsigned_abs());
    let shifted = if offset < 0 {
        date.checked_sub_days(days)
    } else {
        date.checked_add_days(days)
    };
    shifted.unwrap_or(date)
}
