mod daily;

pub use daily::{aggregate_weekly, AggregatedSeries, DailyBucket, WINDOW_DAYS};
