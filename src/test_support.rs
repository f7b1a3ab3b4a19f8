use chrono::{NaiveDate, NaiveDateTime};

use crate::{
    cli::{CityArg, Cli},
    domain::forecast::RawObservation,
};

pub(crate) fn state_test_cli() -> Cli {
    Cli {
        city: CityArg::Seoul,
        service_key: "test-key".to_string(),
        forecast_url: None,
        page_size: 1000,
        refresh_interval: 300,
        clock_interval: 1,
        one_shot: false,
        json: false,
    }
}

pub(crate) fn instant(date: &str, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::parse_from_str(date, "%Y%m%d")
        .ok()
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .expect("valid fixture instant")
}

/// Every recognized category for one forecast hour.
pub(crate) fn full_hour(date: &str, time: &str, values: [&str; 7]) -> Vec<RawObservation> {
    ["TMP", "REH", "SKY", "PTY", "WSD", "POP", "PCP"]
        .into_iter()
        .zip(values)
        .map(|(category, value)| RawObservation::new(date, time, category, value))
        .collect()
}

/// Two hours (06:00 and 18:00) on `date`, the second one wet.
pub(crate) fn two_hour_day(date: &str) -> Vec<RawObservation> {
    let mut out = full_hour(date, "0600", ["11", "85", "1", "0", "1.8", "0", "강수없음"]);
    out.extend(full_hour(date, "1800", ["14", "70", "4", "1", "3.2", "60", "2.5"]));
    out
}
