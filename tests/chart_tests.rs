use chrono::NaiveDate;
use sensorboard::aggregate::{AggregatedSeries, DailyBucket};
use sensorboard::report::chart::{render_chart, write_chart_png, y_axis_max};
use tempfile::tempdir;

fn series_with_counts(counts: &[u32]) -> AggregatedSeries {
    let buckets = counts
        .iter()
        .enumerate()
        .map(|(i, &full_count)| DailyBucket {
            date: NaiveDate::from_ymd_opt(2025, 3, 1 + i as u32).unwrap(),
            full_count,
        })
        .collect();
    AggregatedSeries::from_buckets(buckets)
}

#[test]
fn y_axis_upper_bound_is_one_above_the_max_count() {
    assert_eq!(y_axis_max(&series_with_counts(&[2, 4, 1])), 5);
    assert_eq!(y_axis_max(&series_with_counts(&[1])), 2);
    assert_eq!(y_axis_max(&series_with_counts(&[7, 7, 7])), 8);
}

#[test]
fn y_axis_upper_bound_defaults_to_five_without_positive_counts() {
    assert_eq!(y_axis_max(&AggregatedSeries::empty()), 5);
    assert_eq!(y_axis_max(&series_with_counts(&[0, 0, 0])), 5);
}

#[test]
fn chart_has_fixed_dimensions() {
    let img = render_chart(&series_with_counts(&[2, 0, 1, 3, 0, 4, 1]));
    assert_eq!(img.width(), 1200);
    assert_eq!(img.height(), 600);
}

#[test]
fn empty_series_still_renders_a_chart() {
    let img = render_chart(&AggregatedSeries::empty());
    assert_eq!(img.width(), 1200);
    assert_eq!(img.height(), 600);

    // The placeholder carries axes and grid, so it is not a blank canvas.
    let background = *img.get_pixel(0, 0);
    assert!(img.pixels().any(|pixel| *pixel != background));
}

#[test]
fn rendering_is_deterministic_for_identical_input() {
    let series = series_with_counts(&[2, 5, 1, 3]);
    let first = render_chart(&series);
    let second = render_chart(&series);
    assert_eq!(first.as_raw(), second.as_raw());
}

#[test]
fn chart_png_is_written_with_parent_directories() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("out").join("weekly_sensor_data.png");

    write_chart_png(&series_with_counts(&[1, 2, 3]), &path).expect("write chart");

    let bytes = std::fs::read(&path).expect("read chart");
    assert!(!bytes.is_empty());
    // PNG signature
    assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
}
