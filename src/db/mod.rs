use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use log::{error, info};
use rusqlite::{params, Connection, OpenFlags, Row};

mod helpers;
mod migrations;
pub mod models;

use helpers::parse_sql_datetime;
use migrations::run_migrations;
use models::{SensorReading, SensorStatus};

/// How many recent readings the pipeline pulls per run.
pub const RECENT_READING_LIMIT: u32 = 100;

/// Gateway to the sensor reading store.
///
/// Holds no open connection: every call opens one, uses it, and drops it
/// on every exit path.
#[derive(Debug, Clone)]
pub struct Database {
    db_path: PathBuf,
    full_indicator: String,
}

impl Database {
    pub fn new(db_path: PathBuf, full_indicator: String) -> Self {
        Self {
            db_path,
            full_indicator,
        }
    }

    pub fn path(&self) -> &Path {
        self.db_path.as_path()
    }

    /// Create the database file and bring the schema up to date.
    pub fn init(&self) -> Result<()> {
        if let Some(parent) = self.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create database directory {}", parent.display())
                })?;
            }
        }

        let mut conn = Connection::open(&self.db_path).with_context(|| {
            format!("failed to open SQLite database {}", self.db_path.display())
        })?;
        run_migrations(&mut conn).context("failed to run database migrations")?;

        info!("Database initialized at {}", self.db_path.display());
        Ok(())
    }

    // Reads never create the database file; a missing store is an
    // unreachable store.
    fn open_read_only(&self) -> Result<Connection> {
        Connection::open_with_flags(
            &self.db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| {
            format!("failed to open SQLite database {}", self.db_path.display())
        })
    }

    /// Record one detection event with its raw status string.
    pub fn insert_reading(&self, timestamp: NaiveDateTime, raw_status: &str) -> Result<()> {
        let conn = Connection::open(&self.db_path).with_context(|| {
            format!("failed to open SQLite database {}", self.db_path.display())
        })?;
        conn.execute(
            "INSERT INTO sensor_readings (identify_time, results) VALUES (?1, ?2)",
            params![timestamp.format("%Y-%m-%d %H:%M:%S").to_string(), raw_status],
        )
        .context("failed to insert sensor reading")?;
        Ok(())
    }

    /// Fetch the most recent readings, newest first.
    pub fn fetch_recent_readings(&self, limit: u32) -> Result<Vec<SensorReading>> {
        let conn = self.open_read_only()?;

        let mut stmt = conn
            .prepare(
                "SELECT identify_time, results
                 FROM sensor_readings
                 ORDER BY identify_time DESC
                 LIMIT ?1",
            )
            .context("failed to prepare sensor reading query")?;

        let mut rows = stmt.query(params![limit])?;
        let mut readings = Vec::new();
        while let Some(row) = rows.next()? {
            readings.push(self.reading_from_row(row)?);
        }

        Ok(readings)
    }

    /// Pipeline-facing wrapper: a failing or unreachable store degrades to
    /// "no report data" instead of aborting the run.
    pub fn fetch_recent_or_empty(&self, limit: u32) -> Vec<SensorReading> {
        match self.fetch_recent_readings(limit) {
            Ok(readings) => {
                info!("Fetched {} sensor readings", readings.len());
                readings
            }
            Err(err) => {
                error!("Sensor store unavailable, continuing without data: {err:#}");
                Vec::new()
            }
        }
    }

    // Explicit row-to-record mapping; fails fast when a column is missing
    // or holds an unparsable value.
    fn reading_from_row(&self, row: &Row<'_>) -> Result<SensorReading> {
        let raw_time: String = row
            .get("identify_time")
            .context("sensor row is missing the identify_time column")?;
        let raw_status: String = row
            .get("results")
            .context("sensor row is missing the results column")?;

        Ok(SensorReading {
            timestamp: parse_sql_datetime(&raw_time, "identify_time")?,
            status: SensorStatus::from_raw(&raw_status, &self.full_indicator),
        })
    }
}
