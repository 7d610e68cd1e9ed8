//! The aggregation-and-report pipeline: gateway, aggregator, renderer,
//! publisher, run as one sequential pass.
//!
//! Two drivers sit on top of the same core: batch publish (generate and
//! push everything to the hosting root) and render-only (generate into
//! the local output directory, serving left to an external layer).

use std::path::PathBuf;

use anyhow::Result;
use log::{info, warn};

use crate::aggregate::{aggregate_weekly, AggregatedSeries};
use crate::config::AppConfig;
use crate::db::{Database, RECENT_READING_LIMIT};
use crate::publish::{collect_static_assets, publish_all, Artifact, PublishReport, PublishTarget};
use crate::report::{build_payload, chart, html, ReportPayload, CHART_FILE_NAME, INDEX_FILE_NAME};

/// Everything one render pass produces.
#[derive(Debug, Clone)]
pub struct ReportOutput {
    pub payload: ReportPayload,
    pub series: AggregatedSeries,
    pub index_path: PathBuf,
    pub chart_path: PathBuf,
}

/// Fetch, aggregate and render into the output directory.
///
/// An unreachable or empty store degrades to a "no data" report; a render
/// failure is fatal for the run and leaves previously published artifacts
/// untouched.
pub fn generate_report(config: &AppConfig) -> Result<ReportOutput> {
    let db = Database::new(config.db_path.clone(), config.full_indicator.clone());
    let readings = db.fetch_recent_or_empty(RECENT_READING_LIMIT);

    let series = aggregate_weekly(&readings);
    if series.is_empty() {
        warn!("No full events in the fetched window, rendering an empty report");
    }

    let chart_path = config.output_dir.join(CHART_FILE_NAME);
    chart::write_chart_png(&series, &chart_path)?;

    let payload = build_payload(&series);
    let index_path = config.output_dir.join(INDEX_FILE_NAME);
    html::write_page(&payload, &index_path)?;

    info!(
        "Report generated: {} daily buckets, artifacts in {}",
        series.len(),
        config.output_dir.display()
    );

    Ok(ReportOutput {
        payload,
        series,
        index_path,
        chart_path,
    })
}

/// Batch mode: generate the report, then push the page, the chart and all
/// static assets to the hosting target. Per-artifact failures are reported
/// in the returned list; only render and asset-walk failures abort.
pub fn publish_site(
    config: &AppConfig,
    target: &dyn PublishTarget,
) -> Result<Vec<PublishReport>> {
    let output = generate_report(config)?;

    let mut artifacts = vec![
        Artifact::new(output.index_path.clone(), INDEX_FILE_NAME).with_content_type("text/html"),
        Artifact::new(output.chart_path.clone(), CHART_FILE_NAME).with_content_type("image/png"),
    ];
    artifacts.extend(collect_static_assets(&config.static_dir)?);

    let reports = publish_all(target, &artifacts);

    let failed = reports.iter().filter(|report| !report.succeeded()).count();
    if failed > 0 {
        warn!("{failed} of {} artifacts failed to publish", reports.len());
    } else {
        info!("All {} artifacts published", reports.len());
    }

    Ok(reports)
}
