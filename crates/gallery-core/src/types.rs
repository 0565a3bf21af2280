//! Core data types for the gallery library
//!
//! This module contains the image item model, its upload lifecycle, the
//! count and validation result shapes consumed by presentation layers, and the
//! reconciliation payload handed to persistence.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Default minimum number of visible images
pub const DEFAULT_MIN_IMAGES: usize = 6;

/// Default maximum number of visible images
pub const DEFAULT_MAX_IMAGES: usize = 20;

/// Upload lifecycle stage of a single image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStage {
    /// Uploaded, or loaded from persisted data
    #[default]
    Complete,
    /// Selected locally, upload not started
    Pending,
    /// Upload running, with percent done (0..=100)
    InProgress(u8),
    /// Upload rejected by the collaborator
    Failed,
}

impl UploadStage {
    /// Pending or in progress
    pub fn is_uploading(&self) -> bool {
        matches!(self, UploadStage::Pending | UploadStage::InProgress(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, UploadStage::Failed)
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, UploadStage::Complete)
    }
}

impl fmt::Display for UploadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadStage::Complete => write!(f, "complete"),
            UploadStage::Pending => write!(f, "pending"),
            UploadStage::InProgress(percent) => write!(f, "in_progress({}%)", percent),
            UploadStage::Failed => write!(f, "failed"),
        }
    }
}

/// Opaque handle to a file the user picked locally
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalFile {
    /// File name as reported by the picker
    pub name: String,
    /// MIME type, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Size in bytes
    #[serde(default)]
    pub size: u64,
}

impl LocalFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mime_type: None,
            size: 0,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }
}

/// Where the bytes of an image live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImageSource {
    /// Already stored remotely
    Remote { url: String },
    /// Picked locally, not uploaded yet
    Local(LocalFile),
}

impl ImageSource {
    /// Remote URL, if the image has one
    pub fn url(&self) -> Option<&str> {
        match self {
            ImageSource::Remote { url } => Some(url),
            ImageSource::Local(_) => None,
        }
    }

    pub fn local_file(&self) -> Option<&LocalFile> {
        match self {
            ImageSource::Remote { .. } => None,
            ImageSource::Local(file) => Some(file),
        }
    }
}

/// One slot in a property's photo gallery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageItem {
    /// Remote URL or local file handle
    pub source: ImageSource,

    /// Session-stable key used for list diffing (not the database id)
    pub identity_key: String,

    /// Database id; only set for existing images
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persisted_id: Option<String>,

    /// Upload lifecycle stage
    #[serde(default)]
    pub upload_stage: UploadStage,

    /// Originated from persisted storage
    #[serde(default)]
    pub is_existing: bool,

    /// Soft-delete marker
    #[serde(default)]
    pub is_deleted: bool,

    /// Display position among visible items; gaps and duplicates are tolerated
    #[serde(default)]
    pub order: i64,

    /// Optional caption persisted alongside the image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl ImageItem {
    /// Item loaded from persisted data
    pub fn existing(persisted_id: impl Into<String>, url: impl Into<String>, order: i64) -> Self {
        let persisted_id = persisted_id.into();
        Self {
            source: ImageSource::Remote { url: url.into() },
            identity_key: format!("persisted-{}", persisted_id),
            persisted_id: Some(persisted_id),
            upload_stage: UploadStage::Complete,
            is_existing: true,
            is_deleted: false,
            order,
            caption: None,
        }
    }

    /// Item for a file the user just picked
    pub fn local(file: LocalFile, order: i64) -> Self {
        Self {
            source: ImageSource::Local(file),
            identity_key: format!("local-{}", Uuid::new_v4().simple()),
            persisted_id: None,
            upload_stage: UploadStage::Pending,
            is_existing: false,
            is_deleted: false,
            order,
            caption: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_identity_key(mut self, identity_key: impl Into<String>) -> Self {
        self.identity_key = identity_key.into();
        self
    }

    /// Not soft-deleted
    pub fn is_visible(&self) -> bool {
        !self.is_deleted
    }

    /// Check the data model invariants for this item
    pub fn verify(&self) -> Result<()> {
        if self.identity_key.trim().is_empty() {
            return Err(Error::InvalidItem {
                identity_key: self.identity_key.clone(),
                message: "identity key cannot be empty".to_string(),
            });
        }

        if self.persisted_id.is_some() && !self.is_existing {
            return Err(self.invalid("persisted id is only allowed on existing images"));
        }

        if self.is_existing && self.persisted_id.is_none() {
            return Err(self.invalid("existing images need a persisted id"));
        }

        if let UploadStage::InProgress(percent) = self.upload_stage {
            if percent > 100 {
                return Err(self.invalid(&format!("upload progress {}% is above 100%", percent)));
            }
        }

        if self.upload_stage.is_complete() && self.source.url().is_none() {
            return Err(self.invalid("completed uploads need a remote URL"));
        }

        Ok(())
    }

    /// Pending -> InProgress(0)
    pub fn begin_upload(&mut self) -> Result<()> {
        match self.upload_stage {
            UploadStage::Pending => {
                self.upload_stage = UploadStage::InProgress(0);
                Ok(())
            }
            from => Err(self.transition_error(from, "in_progress")),
        }
    }

    /// Pending|InProgress -> InProgress(percent), clamped to 100
    pub fn report_progress(&mut self, percent: u8) -> Result<()> {
        match self.upload_stage {
            UploadStage::Pending | UploadStage::InProgress(_) => {
                self.upload_stage = UploadStage::InProgress(percent.min(100));
                Ok(())
            }
            from => Err(self.transition_error(from, "in_progress")),
        }
    }

    /// Pending|InProgress -> Complete, switching the source to the uploaded URL
    pub fn complete(&mut self, url: impl Into<String>) -> Result<()> {
        match self.upload_stage {
            UploadStage::Pending | UploadStage::InProgress(_) => {
                self.upload_stage = UploadStage::Complete;
                self.source = ImageSource::Remote { url: url.into() };
                Ok(())
            }
            from => Err(self.transition_error(from, "complete")),
        }
    }

    /// Pending|InProgress -> Failed
    pub fn fail(&mut self) -> Result<()> {
        match self.upload_stage {
            UploadStage::Pending | UploadStage::InProgress(_) => {
                self.upload_stage = UploadStage::Failed;
                Ok(())
            }
            from => Err(self.transition_error(from, "failed")),
        }
    }

    /// Complete|Failed -> Pending, for new images holding a local file to send
    ///
    /// A completed upload only re-enters the cycle once its source has been
    /// replaced with a fresh local pick.
    pub fn retry(&mut self) -> Result<()> {
        if self.is_existing || self.source.local_file().is_none() {
            return Err(self.transition_error(self.upload_stage, "pending"));
        }
        match self.upload_stage {
            UploadStage::Complete | UploadStage::Failed => {
                self.upload_stage = UploadStage::Pending;
                Ok(())
            }
            from => Err(self.transition_error(from, "pending")),
        }
    }

    fn invalid(&self, message: &str) -> Error {
        Error::InvalidItem {
            identity_key: self.identity_key.clone(),
            message: message.to_string(),
        }
    }

    fn transition_error(&self, from: UploadStage, to: &'static str) -> Error {
        Error::InvalidTransition {
            identity_key: self.identity_key.clone(),
            from,
            to,
        }
    }
}

/// Partition counts over a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Counts {
    /// Every item, deleted or not
    pub total: usize,
    /// Visible items loaded from persisted data
    pub existing: usize,
    /// Visible items added this session
    pub new: usize,
    /// Soft-deleted items
    pub deleted: usize,
    /// Items not soft-deleted
    pub visible: usize,
    /// Visible items still pending or in progress
    pub pending: usize,
    /// Visible items whose upload failed
    pub failed: usize,
}

impl Counts {
    /// `"Valid"` once the minimum is met, `"Need more"` otherwise
    pub fn minimum_label(&self, bounds: &GalleryBounds) -> &'static str {
        if self.visible >= bounds.min_images {
            "Valid"
        } else {
            "Need more"
        }
    }

    /// `"OK"` while within the maximum, `"Too many"` otherwise
    pub fn maximum_label(&self, bounds: &GalleryBounds) -> &'static str {
        if self.visible <= bounds.max_images {
            "OK"
        } else {
            "Too many"
        }
    }

    /// Visible images as a fraction of the maximum, for progress bars
    pub fn fill_ratio(&self, bounds: &GalleryBounds) -> f64 {
        if bounds.max_images == 0 {
            return if self.visible == 0 { 0.0 } else { 1.0 };
        }
        (self.visible as f64 / bounds.max_images as f64).min(1.0)
    }
}

/// Compact status for a gallery, in display priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLabel {
    NeedMore,
    TooMany,
    UploadFailed,
    Uploading,
    Valid,
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusLabel::NeedMore => write!(f, "Need more"),
            StatusLabel::TooMany => write!(f, "Too many"),
            StatusLabel::UploadFailed => write!(f, "Upload failed"),
            StatusLabel::Uploading => write!(f, "Uploading"),
            StatusLabel::Valid => write!(f, "Valid"),
        }
    }
}

/// Outcome of any validator: validity, messages, and the counts they were derived from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub counts: Counts,
}

impl ValidationResult {
    /// A passing result for the given counts
    pub fn valid(counts: Counts) -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            counts,
        }
    }

    /// Record a blocking error
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.is_valid = false;
    }

    /// Record an advisory warning
    pub fn push_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// The single message to show in compact UI: first error, else first warning
    pub fn primary_message(&self) -> Option<&str> {
        self.errors
            .first()
            .or_else(|| self.warnings.first())
            .map(String::as_str)
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Status for the gallery these counts came from
    pub fn status(&self, bounds: &GalleryBounds) -> StatusLabel {
        if self.counts.visible < bounds.min_images {
            StatusLabel::NeedMore
        } else if self.counts.visible > bounds.max_images {
            StatusLabel::TooMany
        } else if self.counts.failed > 0 {
            StatusLabel::UploadFailed
        } else if self.counts.pending > 0 {
            StatusLabel::Uploading
        } else {
            StatusLabel::Valid
        }
    }
}

/// User-triggered mutation checked by the operation guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Add,
    Delete,
    Reorder,
    Upload,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Add => write!(f, "add"),
            Operation::Delete => write!(f, "delete"),
            Operation::Reorder => write!(f, "reorder"),
            Operation::Upload => write!(f, "upload"),
        }
    }
}

/// Caller-configured minimum and maximum visible image counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryBounds {
    pub min_images: usize,
    pub max_images: usize,
}

impl GalleryBounds {
    /// Bounds used by the listing form
    pub const LISTING: GalleryBounds = GalleryBounds {
        min_images: 6,
        max_images: 20,
    };

    /// Bounds used by the gallery management screen
    pub const GALLERY: GalleryBounds = GalleryBounds {
        min_images: 6,
        max_images: 40,
    };

    pub fn new(min_images: usize, max_images: usize) -> Result<Self> {
        let bounds = Self {
            min_images,
            max_images,
        };
        bounds.check()?;
        Ok(bounds)
    }

    /// Reject bounds where the maximum is below the minimum
    pub fn check(&self) -> Result<()> {
        if self.max_images < self.min_images {
            return Err(Error::InvalidBounds {
                min: self.min_images,
                max: self.max_images,
            });
        }
        Ok(())
    }
}

impl Default for GalleryBounds {
    fn default() -> Self {
        Self {
            min_images: DEFAULT_MIN_IMAGES,
            max_images: DEFAULT_MAX_IMAGES,
        }
    }
}

impl fmt::Display for GalleryBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min_images, self.max_images)
    }
}

/// Create/update/delete instructions derived from the final item list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcilePlan {
    /// New, uploaded, not deleted images, ordered by `order`
    pub to_create: Vec<ImageItem>,
    /// Surviving existing images, ordered by `order`
    pub to_update: Vec<ImageItem>,
    /// Persisted ids of existing images marked deleted
    pub to_delete: Vec<String>,
}

impl ReconcilePlan {
    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty() && self.to_update.is_empty() && self.to_delete.is_empty()
    }

    /// One-line description for logs and terminal output
    pub fn summary(&self) -> String {
        format!(
            "{} to create, {} to update, {} to delete",
            self.to_create.len(),
            self.to_update.len(),
            self.to_delete.len()
        )
    }
}
