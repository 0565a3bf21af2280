//! Real-time bounds validation
//!
//! Run on every change to the list. Uploads still in flight only produce a
//! warning here; the submission gate treats them as blocking.
//!
//! Copyright (c) 2026 Gallery Team
//! Licensed under the MIT OR Apache-2.0 license

use super::classifier::classify;
use crate::types::{ImageItem, ValidationResult};

/// Validate visible-image count and upload state against the bounds
///
/// Messages are pushed in a fixed order (minimum, maximum, failed,
/// uploading) so that [`ValidationResult::primary_message`] picks the most
/// actionable one.
pub fn validate_collection(
    items: &[ImageItem],
    min_images: usize,
    max_images: usize,
) -> ValidationResult {
    let counts = classify(items);
    let mut result = ValidationResult::valid(counts);

    push_count_errors(&mut result, min_images, max_images);

    if counts.pending > 0 {
        result.push_warning(format!("{} image(s) still uploading", counts.pending));
    }

    tracing::trace!(
        visible = counts.visible,
        min_images,
        max_images,
        is_valid = result.is_valid,
        "Validated image collection"
    );

    result
}

/// Minimum, maximum and failed-upload errors shared with the submission gate
pub(crate) fn push_count_errors(result: &mut ValidationResult, min_images: usize, max_images: usize) {
    let counts = result.counts;

    if counts.visible < min_images {
        result.push_error(format!("Minimum {} images required", min_images));
    }

    if counts.visible > max_images {
        result.push_error(format!("Maximum {} images allowed", max_images));
    }

    if counts.failed > 0 {
        result.push_error(format!("{} image(s) failed to upload", counts.failed));
    }
}
