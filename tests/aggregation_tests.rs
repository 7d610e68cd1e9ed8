use chrono::NaiveDate;
use sensorboard::aggregate::{aggregate_weekly, DailyBucket, WINDOW_DAYS};
use sensorboard::db::models::{SensorReading, SensorStatus};

fn reading(y: i32, m: u32, d: u32, hour: u32, status: SensorStatus) -> SensorReading {
    SensorReading {
        timestamp: NaiveDate::from_ymd_opt(y, m, d)
            .expect("valid date")
            .and_hms_opt(hour, 30, 0)
            .expect("valid time"),
        status,
    }
}

#[test]
fn empty_input_yields_empty_series() {
    let series = aggregate_weekly(&[]);
    assert!(series.is_empty());
    assert_eq!(series.len(), 0);
}

#[test]
fn no_full_readings_yields_empty_series() {
    let readings = vec![
        reading(2025, 3, 1, 9, SensorStatus::Other),
        reading(2025, 3, 2, 10, SensorStatus::Other),
        reading(2025, 3, 3, 11, SensorStatus::Other),
    ];
    assert!(aggregate_weekly(&readings).is_empty());
}

#[test]
fn window_keeps_seven_most_recent_dates_ascending() {
    // Nine dates, one full event each: only the seven most recent survive.
    let readings: Vec<SensorReading> = (1..=9)
        .map(|day| reading(2025, 3, day, 12, SensorStatus::Full))
        .collect();

    let series = aggregate_weekly(&readings);
    assert_eq!(series.len(), WINDOW_DAYS);

    let expected: Vec<DailyBucket> = (3..=9)
        .map(|day| DailyBucket {
            date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            full_count: 1,
        })
        .collect();
    assert_eq!(series.buckets(), expected.as_slice());
}

#[test]
fn series_is_strictly_ascending_with_no_duplicates() {
    // Deliberately unsorted input with several events per date.
    let readings = vec![
        reading(2025, 3, 5, 14, SensorStatus::Full),
        reading(2025, 3, 2, 9, SensorStatus::Full),
        reading(2025, 3, 5, 8, SensorStatus::Full),
        reading(2025, 3, 9, 20, SensorStatus::Full),
        reading(2025, 3, 2, 23, SensorStatus::Full),
        reading(2025, 3, 2, 1, SensorStatus::Full),
    ];

    let series = aggregate_weekly(&readings);
    assert!(series.len() <= WINDOW_DAYS);
    assert!(series
        .buckets()
        .windows(2)
        .all(|pair| pair[0].date < pair[1].date));

    assert_eq!(
        series.buckets(),
        &[
            DailyBucket {
                date: NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
                full_count: 3,
            },
            DailyBucket {
                date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
                full_count: 2,
            },
            DailyBucket {
                date: NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
                full_count: 1,
            },
        ]
    );
}

#[test]
fn other_readings_do_not_contribute_to_counts() {
    let readings = vec![
        reading(2025, 3, 4, 10, SensorStatus::Full),
        reading(2025, 3, 4, 11, SensorStatus::Other),
        reading(2025, 3, 4, 12, SensorStatus::Other),
        reading(2025, 3, 4, 13, SensorStatus::Full),
    ];

    let series = aggregate_weekly(&readings);
    assert_eq!(series.len(), 1);
    assert_eq!(series.buckets()[0].full_count, 2);
}

#[test]
fn aggregation_is_idempotent_and_does_not_mutate_input() {
    let readings: Vec<SensorReading> = (1..=9)
        .map(|day| reading(2025, 3, day, 12, SensorStatus::Full))
        .collect();
    let snapshot = readings.clone();

    let first = aggregate_weekly(&readings);
    let second = aggregate_weekly(&readings);

    assert_eq!(first, second);
    assert_eq!(readings, snapshot);
}

#[test]
fn bucketing_uses_the_timestamp_wall_clock() {
    // Events just before and just after midnight land in different buckets.
    let late = SensorReading {
        timestamp: NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap(),
        status: SensorStatus::Full,
    };
    let early = SensorReading {
        timestamp: NaiveDate::from_ymd_opt(2025, 3, 2)
            .unwrap()
            .and_hms_opt(0, 0, 1)
            .unwrap(),
        status: SensorStatus::Full,
    };

    let series = aggregate_weekly(&[late, early]);
    assert_eq!(series.len(), 2);
    assert_eq!(
        series.buckets()[0].date,
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    );
    assert_eq!(
        series.buckets()[1].date,
        NaiveDate::from_ymd_opt(2025, 3, 2).unwrap()
    );
}
