//! Gallery documents read from disk
//!
//! A document is either a bare list of image items or an object carrying the
//! items together with optional bounds:
//!
//! ```yaml
//! bounds: { min_images: 6, max_images: 40 }
//! images:
//!   - identity_key: persisted-1
//!     persisted_id: "1"
//!     is_existing: true
//!     order: 0
//!     source: { kind: remote, url: https://cdn.example.com/1.jpg }
//! ```

use crate::error::{Error, Result};
use gallery_core::{GalleryBounds, ImageItem};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Image list plus the bounds it was saved with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryDocument {
    /// Bounds recorded in the document, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<GalleryBounds>,

    /// Every item, including soft-deleted ones
    pub images: Vec<ImageItem>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentShape {
    Full(GalleryDocument),
    Bare(Vec<ImageItem>),
}

impl From<DocumentShape> for GalleryDocument {
    fn from(shape: DocumentShape) -> Self {
        match shape {
            DocumentShape::Full(document) => document,
            DocumentShape::Bare(images) => GalleryDocument {
                bounds: None,
                images,
            },
        }
    }
}

/// Read a gallery document, choosing YAML or JSON by extension
pub fn load_document(path: &Path) -> Result<GalleryDocument> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path)?;
    let is_yaml = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false);

    let shape: DocumentShape = if is_yaml {
        serde_yaml::from_str(&content).map_err(|e| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "YAML gallery document".to_string(),
            reason: e.to_string(),
        })?
    } else {
        serde_json::from_str(&content).map_err(|e| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "JSON gallery document".to_string(),
            reason: e.to_string(),
        })?
    };

    let document = GalleryDocument::from(shape);
    tracing::debug!(
        path = %path.display(),
        images = document.images.len(),
        has_bounds = document.bounds.is_some(),
        "Loaded gallery document"
    );
    Ok(document)
}
