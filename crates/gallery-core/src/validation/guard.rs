//! Operation guard
//!
//! Consulted before a user-triggered mutation is applied. The guard looks at
//! the collection as it is now and reports whether the proposed operation
//! would push the visible count past a bound. It never mutates anything.
//!
//! Copyright (c) 2026 Gallery Team
//! Licensed under the MIT OR Apache-2.0 license

use super::classifier::classify;
use crate::types::{ImageItem, Operation, ValidationResult};

/// Predict whether `operation` may be applied to `items`
///
/// - `Delete` is refused when the visible count sits exactly at the minimum,
///   and warns one step above it.
/// - `Add` and `Upload` are refused when the visible count sits exactly at the
///   maximum, and warn one step below it. An upload in flight occupies a slot.
/// - `Reorder` leaves the counts unchanged and is always allowed.
pub fn validate_operation(
    items: &[ImageItem],
    operation: Operation,
    min_images: usize,
    max_images: usize,
) -> ValidationResult {
    let counts = classify(items);
    let mut result = ValidationResult::valid(counts);

    match operation {
        Operation::Delete => {
            if counts.visible == min_images {
                result.push_error(format!(
                    "Cannot delete image: minimum of {} images required",
                    min_images
                ));
            } else if counts.visible == min_images + 1 {
                result.push_warning("Deleting this image will reach the minimum limit");
            }
        }
        Operation::Add | Operation::Upload => {
            if counts.visible == max_images {
                result.push_error(format!(
                    "Cannot add more images: maximum of {} reached",
                    max_images
                ));
            } else if counts.visible + 1 == max_images {
                result.push_warning("Adding this image will reach the maximum limit");
            }
        }
        Operation::Reorder => {}
    }

    if !result.is_valid {
        tracing::debug!(
            %operation,
            visible = counts.visible,
            "Operation would break gallery bounds"
        );
    }

    result
}
