//! Submission gate
//!
//! The strict check run right before a collection is persisted. Anything
//! that is only a warning in real time (uploads in flight) blocks here, and
//! every visible source must be well formed.
//!
//! Copyright (c) 2026 Gallery Team
//! Licensed under the MIT OR Apache-2.0 license

use super::bounds::push_count_errors;
use super::classifier::classify;
use super::url_check::is_valid_source;
use crate::types::{ImageItem, ValidationResult};

/// Final validation before persistence; `is_valid == false` must block the save
pub fn validate_for_submission(
    items: &[ImageItem],
    min_images: usize,
    max_images: usize,
) -> ValidationResult {
    let counts = classify(items);
    let mut result = ValidationResult::valid(counts);

    push_count_errors(&mut result, min_images, max_images);

    // Failed uploads are already reported above
    if counts.pending > 0 {
        result.push_error(format!("{} image(s) not uploaded yet", counts.pending));
    }

    let invalid_sources = items
        .iter()
        .filter(|item| item.is_visible() && !has_submittable_source(item))
        .count();
    if invalid_sources > 0 {
        result.push_error(format!("{} image(s) have an invalid URL", invalid_sources));
    }

    if !result.is_valid {
        tracing::debug!(errors = ?result.errors, "Submission validation failed");
    }

    result
}

/// A completed upload must carry the remote URL it produced
fn has_submittable_source(item: &ImageItem) -> bool {
    if item.upload_stage.is_complete() && item.source.url().is_none() {
        return false;
    }
    is_valid_source(&item.source)
}
