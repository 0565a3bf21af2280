//! Shared utilities for command handlers

use crate::cli::BoundsArgs;
use crate::config::Config;
use crate::document::load_document;
use crate::error::{Error, Result};
use gallery_core::{GalleryBounds, ImageCollection, ReconcilePlan};
use std::path::Path;

/// Pick the bounds for a document
///
/// `--profile` beats bounds stored in the document, which beat the config's
/// default profile. `--min`/`--max` then override either end individually.
pub fn resolve_bounds(
    args: &BoundsArgs,
    document_bounds: Option<GalleryBounds>,
    config: &Config,
) -> Result<GalleryBounds> {
    let base = match (&args.profile, document_bounds) {
        (Some(profile), _) => config.profile(profile)?,
        (None, Some(bounds)) => bounds,
        (None, None) => config.default_bounds()?,
    };

    let min_images = args.min.unwrap_or(base.min_images);
    let max_images = args.max.unwrap_or(base.max_images);

    GalleryBounds::new(min_images, max_images).map_err(|e| Error::invalid_args(e.to_string()))
}

/// Load a document into an editing collection with resolved bounds
pub fn load_collection(path: &Path, args: &BoundsArgs, config: &Config) -> Result<ImageCollection> {
    let document = load_document(path)?;
    let bounds = resolve_bounds(args, document.bounds, config)?;
    tracing::debug!(path = %path.display(), bounds = %bounds, "Resolved gallery bounds");
    Ok(ImageCollection::from_persisted(bounds, document.images)?)
}

/// Write a plan to disk as YAML or JSON, by extension
pub fn write_plan(path: &Path, plan: &ReconcilePlan) -> Result<()> {
    let is_yaml = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false);

    let content = if is_yaml {
        serde_yaml::to_string(plan)?
    } else {
        serde_json::to_string_pretty(plan)?
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, content)?;

    tracing::info!(path = %path.display(), summary = %plan.summary(), "Wrote persistence plan");
    Ok(())
}

/// Display name for a document path
pub fn display_name(path: &Path) -> String {
    path.display().to_string()
}
