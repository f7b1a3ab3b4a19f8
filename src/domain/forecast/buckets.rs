use super::{DayBuckets, MergedRecord};
use crate::domain::dates::DayKeys;

/// Splits records into today / tomorrow / day-after-tomorrow by exact date-key match,
/// keeping input order. Records on any other date are left out.
#[must_use]
pub fn bucket_by_day(records: &[MergedRecord], keys: &DayKeys) -> DayBuckets {
    let mut buckets = DayBuckets::default();
    for record in records {
        let bucket = if record.date == keys.today {
            &mut buckets.today
        } else if record.date == keys.tomorrow {
            &mut buckets.tomorrow
        } else if record.date == keys.day_after_tomorrow {
            &mut buckets.day_after_tomorrow
        } else {
            continue;
        };
        bucket.push(record.clone());
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn partitions_three_days_and_drops_the_rest() {
        let keys = DayKeys::for_date(NaiveDate::from_ymd_opt(2026, 10, 17).expect("date"));
        let records = ["20261016", "20261017", "20261017", "20261018", "20261019", "20261020"]
            .iter()
            .enumerate()
            .map(|(idx, date)| MergedRecord::empty(*date, format!("{:02}00", idx)))
            .collect::<Vec<_>>();

        let buckets = bucket_by_day(&records, &keys);
        assert_eq!(buckets.today.len(), 2);
        assert_eq!(buckets.tomorrow.len(), 1);
        assert_eq!(buckets.day_after_tomorrow.len(), 1);
        assert_eq!(buckets.len(), 4);
        assert_eq!(buckets.today[0].time, "0100");
        assert_eq!(buckets.today[1].time, "0200");
    }

    #[test]
    fn no_matching_dates_gives_empty_buckets() {
        let keys = DayKeys::for_date(NaiveDate::from_ymd_opt(2026, 10, 17).expect("date"));
        let records = vec![MergedRecord::empty("20250101", "0000")];
        assert!(bucket_by_day(&records, &keys).is_empty());
    }
}
