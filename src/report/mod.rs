pub mod chart;
pub mod html;
pub mod payload;

pub use payload::{build_payload, build_payload_at, ReportPayload};

/// Fixed artifact names, shared by the renderer, the index page and the
/// publish step.
pub const CHART_FILE_NAME: &str = "weekly_sensor_data.png";
pub const INDEX_FILE_NAME: &str = "index.html";
