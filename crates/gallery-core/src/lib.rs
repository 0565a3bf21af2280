//! Gallery Core - Image collection validation and reconciliation
//!
//! This crate holds the domain logic behind a property's photo gallery
//! editor: which images count toward the gallery, whether the gallery meets
//! its minimum and maximum, whether a proposed edit is allowed, whether the
//! gallery may be saved, and what has to be created, updated and deleted when
//! it is.
//!
//! # Main Components
//!
//! - **Types**: `ImageItem` and its upload lifecycle, `Counts`, `ValidationResult`
//! - **Validation**: classifier, bounds validator, operation guard, submission gate
//! - **Reconciliation**: final item list to create/update/delete instructions
//! - **Collection**: an editing session that guards every mutation
//! - **Collaborators**: `Uploader` and `GalleryStore` traits for storage and database
//!
//! # Example
//!
//! ```
//! use gallery_core::{validate_collection, ImageItem};
//!
//! let items: Vec<ImageItem> = (0..6)
//!     .map(|i| ImageItem::existing(i.to_string(), format!("https://cdn.example.com/{}.jpg", i), i))
//!     .collect();
//!
//! let result = validate_collection(&items, 6, 20);
//! assert!(result.is_valid);
//! assert_eq!(result.counts.visible, 6);
//! ```

pub mod collection;
pub mod error;
pub mod reconcile;
pub mod store;
pub mod types;
pub mod upload;
pub mod validation;

#[cfg(test)]
mod proptest_strategies;

// Re-export main types for convenience
pub use collection::{Applied, ImageCollection};
pub use error::{Error, Result};
pub use reconcile::reconcile;
pub use store::{submit, GalleryStore};
pub use types::{
    Counts, GalleryBounds, ImageItem, ImageSource, LocalFile, Operation, ReconcilePlan,
    StatusLabel, UploadStage, ValidationResult, DEFAULT_MAX_IMAGES, DEFAULT_MIN_IMAGES,
};
pub use upload::{upload_pending, UploadSummary, UploadedImage, Uploader};
pub use validation::{classify, validate_collection, validate_for_submission, validate_operation};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
