use chrono::NaiveDateTime;

use super::MergedRecord;

/// Record whose top-of-hour instant is nearest to `reference`.
///
/// Linear scan; on equal distance the earlier record in input order wins. Records with
/// an unreadable date or time are never selected. `None` only when nothing is selectable.
#[must_use]
pub fn closest_sample(records: &[MergedRecord], reference: NaiveDateTime) -> Option<&MergedRecord> {
    let mut best: Option<(&MergedRecord, i64)> = None;
    for record in records {
        let Some(at) = record.timestamp() else {
            continue;
        };
        let distance = (reference - at).num_seconds().abs();
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((record, distance));
        }
    }
    best.map(|(record, _)| record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 17)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .expect("valid instant")
    }

    fn record(date: &str, time: &str) -> MergedRecord {
        MergedRecord::empty(date, time)
    }

    #[test]
    fn picks_nearest_hour() {
        let records = vec![record("20261017", "0900"), record("20261017", "1500")];
        let picked = closest_sample(&records, at(11, 0)).expect("selects");
        assert_eq!(picked.time, "0900");
    }

    #[test]
    fn equal_distance_keeps_first_in_input_order() {
        let records = vec![record("20261017", "1500"), record("20261017", "0900")];
        let picked = closest_sample(&records, at(12, 0)).expect("selects");
        assert_eq!(picked.time, "1500");
    }

    #[test]
    fn minutes_of_reference_count() {
        let records = vec![record("20261017", "1000"), record("20261017", "1100")];
        assert_eq!(
            closest_sample(&records, at(10, 29)).map(|r| r.time.as_str()),
            Some("1000")
        );
        assert_eq!(
            closest_sample(&records, at(10, 31)).map(|r| r.time.as_str()),
            Some("1100")
        );
    }

    #[test]
    fn crosses_day_boundary() {
        let records = vec![record("20261017", "1800"), record("20261018", "0000")];
        let picked = closest_sample(&records, at(23, 10)).expect("selects");
        assert_eq!(picked.date, "20261018");
    }

    #[test]
    fn empty_or_unreadable_input_selects_nothing() {
        assert!(closest_sample(&[], at(12, 0)).is_none());
        let records = vec![record("bad", "0900")];
        assert!(closest_sample(&records, at(12, 0)).is_none());
    }
}
