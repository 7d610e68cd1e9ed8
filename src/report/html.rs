//! Index page emission.
//!
//! Deliberately thin: the payload is substituted into a fixed page
//! skeleton. Anything fancier belongs to an external templating engine.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::report::payload::ReportPayload;
use crate::report::CHART_FILE_NAME;

/// Render the report page for the given payload.
pub fn render_page(payload: &ReportPayload) -> String {
    let mut rows = String::new();
    for (label, count) in payload.date_labels.iter().zip(payload.counts.iter()) {
        let _ = write!(
            rows,
            "        <tr><td>{label}</td><td>{count}</td></tr>\n"
        );
    }
    if rows.is_empty() {
        rows.push_str("        <tr><td colspan=\"2\">no data</td></tr>\n");
    }

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
           <meta charset=\"utf-8\">\n\
           <title>Weekly Sensor Report</title>\n\
         </head>\n\
         <body>\n\
           <h1>Weekly full events</h1>\n\
           <img src=\"{chart}\" alt=\"Weekly full event counts\">\n\
           <table>\n\
             <tr><th>Date</th><th>Full events</th></tr>\n\
         {rows}\
           </table>\n\
           <p>Last updated: {generated_at}</p>\n\
         </body>\n\
         </html>\n",
        chart = CHART_FILE_NAME,
        rows = rows,
        generated_at = payload.generated_at,
    )
}

/// Render the page and write it next to the chart artifact.
pub fn write_page(payload: &ReportPayload, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create output directory {}", parent.display())
            })?;
        }
    }

    std::fs::write(path, render_page(payload))
        .with_context(|| format!("failed to write report page to {}", path.display()))?;

    info!("Report page written to {}", path.display());
    Ok(())
}
