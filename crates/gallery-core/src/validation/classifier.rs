//! Collection classifier
//!
//! Single pass over the list producing the partition counts every other
//! validator works from.
//!
//! Copyright (c) 2026 Gallery Team
//! Licensed under the MIT OR Apache-2.0 license

use crate::types::{Counts, ImageItem};

/// Count the items of a collection by visibility, origin and upload stage
pub fn classify(items: &[ImageItem]) -> Counts {
    let mut counts = Counts {
        total: items.len(),
        ..Counts::default()
    };

    for item in items {
        if item.is_deleted {
            counts.deleted += 1;
            continue;
        }

        counts.visible += 1;
        if item.is_existing {
            counts.existing += 1;
        } else {
            counts.new += 1;
        }

        if item.upload_stage.is_uploading() {
            counts.pending += 1;
        } else if item.upload_stage.is_failed() {
            counts.failed += 1;
        }
    }

    counts
}
