use std::env;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Result};
use log::{error, info};

use sensorboard::config::AppConfig;
use sensorboard::pipeline;
use sensorboard::publish::DirectoryPublisher;

fn main() -> ExitCode {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let mut args = env::args().skip(1);
    let mode = args.next().unwrap_or_else(|| "publish".into());
    let config_path = args.next().unwrap_or_else(|| "config.json".into());

    let config = AppConfig::load(Path::new(&config_path))?;

    match mode.as_str() {
        "render" => {
            let output = pipeline::generate_report(&config)?;
            info!("Report rendered to {}", output.index_path.display());
            Ok(())
        }
        "publish" => {
            let publisher = DirectoryPublisher::new(config.publish_root.clone());
            let reports = pipeline::publish_site(&config, &publisher)?;

            let failed: Vec<_> = reports
                .iter()
                .filter(|report| !report.succeeded())
                .collect();
            info!(
                "Publish finished: {} delivered, {} failed",
                reports.len() - failed.len(),
                failed.len()
            );
            Ok(())
        }
        other => bail!("unknown mode '{other}' (expected 'publish' or 'render')"),
    }
}
