//! Best-effort artifact fan-out to a hosting destination.
//!
//! Every artifact is attempted independently; one failure never aborts
//! the batch. The result is a per-artifact outcome list, not a single
//! pass/fail flag.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{error, info, warn};

/// One file-like output headed for the publish step.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub local_path: PathBuf,
    /// Relative path under the hosting root.
    pub destination: String,
    /// Advisory metadata; unset for generic static files.
    pub content_type: Option<&'static str>,
}

impl Artifact {
    pub fn new(local_path: PathBuf, destination: impl Into<String>) -> Self {
        Self {
            local_path,
            destination: destination.into(),
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: &'static str) -> Self {
        self.content_type = Some(content_type);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Delivered,
    Failed(String),
}

/// Outcome of one artifact transfer.
#[derive(Debug, Clone)]
pub struct PublishReport {
    pub destination: String,
    pub outcome: PublishOutcome,
}

impl PublishReport {
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, PublishOutcome::Delivered)
    }
}

/// Hosting backend seam. Implementations transfer a single artifact and
/// report failure through `Result`; retry policy stays with the caller.
pub trait PublishTarget {
    fn put(&self, artifact: &Artifact) -> Result<()>;
}

/// Publishes by copying into a locally served web root.
#[derive(Debug, Clone)]
pub struct DirectoryPublisher {
    root: PathBuf,
}

impl DirectoryPublisher {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        self.root.as_path()
    }
}

impl PublishTarget for DirectoryPublisher {
    fn put(&self, artifact: &Artifact) -> Result<()> {
        let dest = self.root.join(&artifact.destination);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create destination directory {}", parent.display())
            })?;
        }

        fs::copy(&artifact.local_path, &dest).with_context(|| {
            format!(
                "failed to copy {} to {}",
                artifact.local_path.display(),
                dest.display()
            )
        })?;

        Ok(())
    }
}

/// Transfer every artifact, collecting a per-artifact outcome.
pub fn publish_all(target: &dyn PublishTarget, artifacts: &[Artifact]) -> Vec<PublishReport> {
    artifacts
        .iter()
        .map(|artifact| {
            let outcome = match target.put(artifact) {
                Ok(()) => {
                    info!("Published {}", artifact.destination);
                    PublishOutcome::Delivered
                }
                Err(err) => {
                    error!("Failed to publish {}: {err:#}", artifact.destination);
                    PublishOutcome::Failed(format!("{err:#}"))
                }
            };

            PublishReport {
                destination: artifact.destination.clone(),
                outcome,
            }
        })
        .collect()
}

/// Walk the static asset directory and schedule every file, keyed by its
/// path relative to the directory's parent. A missing directory is not an
/// error; there is simply nothing extra to publish.
pub fn collect_static_assets(static_dir: &Path) -> Result<Vec<Artifact>> {
    if !static_dir.exists() {
        warn!(
            "Static asset directory {} does not exist, skipping",
            static_dir.display()
        );
        return Ok(Vec::new());
    }

    let base = static_dir.parent().unwrap_or_else(|| Path::new(""));
    let mut artifacts = Vec::new();
    visit_dir(static_dir, base, &mut artifacts)?;

    // Stable publish order regardless of directory iteration order.
    artifacts.sort_by(|a, b| a.destination.cmp(&b.destination));
    Ok(artifacts)
}

fn visit_dir(dir: &Path, base: &Path, out: &mut Vec<Artifact>) -> Result<()> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read static directory {}", dir.display()))?;

    for entry in entries {
        let entry = entry
            .with_context(|| format!("failed to read entry in {}", dir.display()))?;
        let path = entry.path();
        if path.is_dir() {
            visit_dir(&path, base, out)?;
        } else {
            let destination = relative_destination(&path, base)?;
            let mut artifact = Artifact::new(path.clone(), destination);
            if let Some(content_type) = content_type_for(&path) {
                artifact = artifact.with_content_type(content_type);
            }
            out.push(artifact);
        }
    }

    Ok(())
}

// Destinations always use forward slashes, whatever the host separator.
fn relative_destination(path: &Path, base: &Path) -> Result<String> {
    let relative = path.strip_prefix(base).with_context(|| {
        format!(
            "static asset {} is outside base directory {}",
            path.display(),
            base.display()
        )
    })?;

    let parts: Vec<String> = relative
        .components()
        .map(|part| part.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}

/// Advisory content type by file extension.
pub fn content_type_for(path: &Path) -> Option<&'static str> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") => Some("text/html"),
        Some("png") => Some("image/png"),
        _ => None,
    }
}
