pub const NO_PRECIPITATION: &str = "no precipitation";
const BELOW_ONE_MM: &str = "less than 1.0mm";
const THIRTY_TO_FIFTY_MM: &str = "30.0–50.0mm";
const FIFTY_MM_OR_MORE: &str = "50.0mm or more";

// Labels the provider itself writes into PCP values.
const PROVIDER_NO_PRECIPITATION: &str = "강수없음";
const PROVIDER_BELOW_SUFFIX: &str = "미만";

/// Display label for a precipitation amount, given the probability for the same hour.
///
/// Total over its inputs: a zero or missing probability, a missing or `-` amount and any
/// amount without a leading number all read as no precipitation.
#[must_use]
pub fn format_precipitation(precipitation: Option<&str>, probability: Option<&str>) -> String {
    match probability.map(str::trim) {
        None | Some("0") => return NO_PRECIPITATION.to_string(),
        Some(_) => {}
    }

    let Some(raw) = precipitation.map(str::trim) else {
        return NO_PRECIPITATION.to_string();
    };
    if raw.is_empty() || raw == "-" || raw == NO_PRECIPITATION || raw == PROVIDER_NO_PRECIPITATION
    {
        return NO_PRECIPITATION.to_string();
    }
    if raw == BELOW_ONE_MM || raw.ends_with(PROVIDER_BELOW_SUFFIX) {
        return BELOW_ONE_MM.to_string();
    }

    let Some(amount) = leading_number(raw) else {
        return NO_PRECIPITATION.to_string();
    };
    if amount < 1.0 {
        BELOW_ONE_MM.to_string()
    } else if amount < 30.0 {
        format!("{:.1}mm", (amount * 10.0).round() / 10.0)
    } else if amount < 50.0 {
        THIRTY_TO_FIFTY_MM.to_string()
    } else {
        FIFTY_MM_OR_MORE.to_string()
    }
}

/// Sky code label. Code `0` and unknown codes have no description.
#[must_use]
pub fn sky_description(sky: Option<&str>) -> &'static str {
    match sky.map(str::trim) {
        Some("1") => "clear",
        Some("3") => "mostly cloudy",
        Some("4") => "cloudy",
        _ => "",
    }
}

#[must_use]
pub fn precipitation_type_label(pty: Option<&str>) -> Option<&'static str> {
    match pty.map(str::trim) {
        Some("1") => Some("rain"),
        Some("2") => Some("rain/snow"),
        Some("3") => Some("snow"),
        Some("4") => Some("shower"),
        _ => None,
    }
}

/// Precipitation type when one is forecast, otherwise the sky description.
#[must_use]
pub fn condition_description(sky: Option<&str>, pty: Option<&str>) -> &'static str {
    precipitation_type_label(pty).unwrap_or_else(|| sky_description(sky))
}

fn leading_number(value: &str) -> Option<f64> {
    let end = value
        .char_indices()
        .find(|&(idx, c)| !(c.is_ascii_digit() || c == '.' || (idx == 0 && c == '-')))
        .map_or(value.len(), |(idx, _)| idx);
    value[..end].parse::<f64>().ok().filter(|f| f.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(amount: &str, probability: &str) -> String {
        format_precipitation(Some(amount), Some(probability))
    }

    #[test]
    fn amount_bucket_boundaries() {
        assert_eq!(fmt("0.999", "60"), "less than 1.0mm");
        assert_eq!(fmt("1.0", "60"), "1.0mm");
        assert_eq!(fmt("29.95", "60"), "30.0mm");
        assert_eq!(fmt("30.0", "60"), "30.0–50.0mm");
        assert_eq!(fmt("49.99", "60"), "30.0–50.0mm");
        assert_eq!(fmt("50.0", "60"), "50.0mm or more");
        assert_eq!(fmt("2.5", "60"), "2.5mm");
    }

    #[test]
    fn zero_or_missing_probability_forces_no_precipitation() {
        assert_eq!(fmt("12.0", "0"), NO_PRECIPITATION);
        assert_eq!(fmt("55", "0"), NO_PRECIPITATION);
        assert_eq!(format_precipitation(Some("12.0"), None), NO_PRECIPITATION);
    }

    #[test]
    fn missing_and_sentinel_amounts() {
        assert_eq!(format_precipitation(None, Some("30")), NO_PRECIPITATION);
        assert_eq!(fmt("-", "30"), NO_PRECIPITATION);
        assert_eq!(fmt("", "30"), NO_PRECIPITATION);
        assert_eq!(fmt("강수없음", "30"), NO_PRECIPITATION);
        assert_eq!(fmt("no precipitation", "30"), NO_PRECIPITATION);
        assert_eq!(fmt("rainy", "30"), NO_PRECIPITATION);
    }

    #[test]
    fn provider_labels_map_to_buckets() {
        assert_eq!(fmt("1mm 미만", "30"), "less than 1.0mm");
        assert_eq!(fmt("1.0mm 미만", "30"), "less than 1.0mm");
        assert_eq!(fmt("4mm", "30"), "4.0mm");
        assert_eq!(fmt("30.0~50.0mm", "30"), "30.0–50.0mm");
        assert_eq!(fmt("50.0mm 이상", "30"), "50.0mm or more");
    }

    #[test]
    fn display_labels_are_fixed_points() {
        for label in [
            NO_PRECIPITATION,
            "less than 1.0mm",
            "2.5mm",
            "30.0–50.0mm",
            "50.0mm or more",
        ] {
            assert_eq!(fmt(label, "60"), label);
        }
    }

    #[test]
    fn sky_codes() {
        assert_eq!(sky_description(Some("1")), "clear");
        assert_eq!(sky_description(Some("3")), "mostly cloudy");
        assert_eq!(sky_description(Some("4")), "cloudy");
        assert_eq!(sky_description(Some("0")), "");
        assert_eq!(sky_description(Some("2")), "");
        assert_eq!(sky_description(None), "");
    }

    #[test]
    fn precipitation_type_overrides_sky_only_in_condition() {
        assert_eq!(condition_description(Some("1"), Some("1")), "rain");
        assert_eq!(condition_description(Some("4"), Some("3")), "snow");
        assert_eq!(condition_description(Some("3"), Some("0")), "mostly cloudy");
        assert_eq!(condition_description(Some("1"), None), "clear");
        assert_eq!(precipitation_type_label(Some("2")), Some("rain/snow"));
        assert_eq!(precipitation_type_label(Some("4")), Some("shower"));
        assert_eq!(precipitation_type_label(Some("7")), None);
    }
}
