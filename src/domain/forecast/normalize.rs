use std::collections::{BTreeMap, btree_map::Entry};

use super::{Category, MergedRecord, RawObservation, RecordKey};

/// Folds category-tagged observations into one record per `(date, time)`, ascending.
///
/// Unrecognized categories are dropped. Values are stored verbatim, including `-` and
/// empty strings; formatting decides what they mean later.
#[must_use]
pub fn normalize(observations: &[RawObservation]) -> Vec<MergedRecord> {
    let singles = observations.iter().filter_map(|obs| {
        let category = Category::from_code(obs.category.trim())?;
        let mut record = MergedRecord::empty(&obs.date, &obs.time);
        record.set_field(category, obs.value.clone());
        Some(record)
    });
    merge_records(singles)
}

/// Merges records sharing a key. Later records win per field, but only for the fields
/// they actually carry.
pub fn merge_records(records: impl IntoIterator<Item = MergedRecord>) -> Vec<MergedRecord> {
    let mut merged: BTreeMap<RecordKey, MergedRecord> = BTreeMap::new();
    for record in records {
        match merged.entry(record.key()) {
            Entry::Occupied(mut slot) => slot.get_mut().absorb(&record),
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
        }
    }
    merged.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(date: &str, time: &str, category: &str, value: &str) -> RawObservation {
        RawObservation::new(date, time, category, value)
    }

    #[test]
    fn one_record_per_key_sorted_by_time() {
        let input = vec![
            obs("20261018", "0000", "TMP", "9"),
            obs("20261017", "1800", "TMP", "14"),
            obs("20261017", "0600", "TMP", "11"),
            obs("20261017", "1800", "REH", "70"),
            obs("20261017", "0600", "SKY", "1"),
        ];

        let records = normalize(&input);
        let keys = records
            .iter()
            .map(|r| (r.date.as_str(), r.time.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(
            keys,
            vec![
                ("20261017", "0600"),
                ("20261017", "1800"),
                ("20261018", "0000")
            ]
        );
        assert_eq!(records[0].temperature.as_deref(), Some("11"));
        assert_eq!(records[0].sky.as_deref(), Some("1"));
        assert_eq!(records[1].humidity.as_deref(), Some("70"));
        assert!(records[2].humidity.is_none());
    }

    #[test]
    fn unknown_categories_are_discarded() {
        let input = vec![
            obs("20261017", "0600", "TMN", "3"),
            obs("20261017", "0600", "VEC", "270"),
            obs("20261017", "0900", "UUU", "1.2"),
        ];
        assert!(normalize(&input).is_empty());
    }

    #[test]
    fn placeholder_values_are_kept_verbatim() {
        let input = vec![
            obs("20261017", "0600", "PCP", "-"),
            obs("20261017", "0600", "WSD", ""),
        ];
        let records = normalize(&input);
        assert_eq!(records[0].precipitation.as_deref(), Some("-"));
        assert_eq!(records[0].wind_speed.as_deref(), Some(""));
    }

    #[test]
    fn repeated_category_keeps_the_later_value() {
        let input = vec![
            obs("20261017", "0600", "TMP", "11"),
            obs("20261017", "0600", "REH", "85"),
            obs("20261017", "0600", "TMP", "12"),
        ];
        let records = normalize(&input);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].temperature.as_deref(), Some("12"));
        assert_eq!(records[0].humidity.as_deref(), Some("85"));
    }

    #[test]
    fn absent_fields_never_clear_earlier_ones() {
        let mut first = MergedRecord::empty("20261017", "0600");
        first.temperature = Some("11".to_string());
        let mut second = MergedRecord::empty("20261017", "0600");
        second.humidity = Some("80".to_string());

        let merged = merge_records(vec![first, second]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].temperature.as_deref(), Some("11"));
        assert_eq!(merged[0].humidity.as_deref(), Some("80"));
    }
}
