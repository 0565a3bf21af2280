//! Property-based testing strategies for generating test data
//!
//! Strategies for random but well-formed image items and collections, plus
//! the crate-internal properties that depend on them.

#![cfg(test)]

use crate::types::*;
use crate::validation::{classify, validate_collection, validate_operation};
use crate::reconcile::reconcile;
use proptest::prelude::*;
use proptest::collection::vec;

/// Strategy for generating upload stages
pub fn upload_stage_strategy() -> impl Strategy<Value = UploadStage> {
    prop_oneof![
        4 => Just(UploadStage::Complete),
        1 => Just(UploadStage::Pending),
        1 => (0u8..=100).prop_map(UploadStage::InProgress),
        1 => Just(UploadStage::Failed),
    ]
}

/// Strategy for generating a single image item
pub fn image_item_strategy() -> impl Strategy<Value = ImageItem> {
    (
        any::<bool>(),            // is_existing
        any::<bool>(),            // is_deleted
        upload_stage_strategy(),
        0i64..50,                 // order
        "[a-z0-9]{1,12}",         // file stem
    ).prop_map(|(is_existing, is_deleted, stage, order, stem)| {
        let mut item = if is_existing {
            ImageItem::existing(stem.clone(), format!("https://cdn.example.com/{}.jpg", stem), order)
        } else {
            let mut item = ImageItem::local(LocalFile::new(format!("{}.jpg", stem)), order);
            item.upload_stage = stage;
            if stage.is_complete() {
                item.source = ImageSource::Remote {
                    url: format!("https://cdn.example.com/new/{}.jpg", stem),
                };
            }
            item
        };
        item.is_deleted = is_deleted;
        item
    })
}

/// Strategy for generating collections with unique identity keys
pub fn collection_strategy() -> impl Strategy<Value = Vec<ImageItem>> {
    vec(image_item_strategy(), 0..45).prop_map(|items| {
        items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                let key = format!("{}-{}", item.identity_key, i);
                item.with_identity_key(key)
            })
            .collect()
    })
}

/// Strategy for generating bounds with min <= max
pub fn bounds_strategy() -> impl Strategy<Value = GalleryBounds> {
    (0usize..12, 0usize..30).prop_map(|(min, extra)| GalleryBounds {
        min_images: min,
        max_images: min + extra,
    })
}

proptest! {
    #[test]
    fn generated_items_are_well_formed(items in collection_strategy()) {
        for item in &items {
            prop_assert!(item.verify().is_ok());
        }
    }

    #[test]
    fn counts_add_up(items in collection_strategy()) {
        let counts = classify(&items);
        prop_assert_eq!(counts.visible, counts.existing + counts.new);
        prop_assert_eq!(counts.total, counts.visible + counts.deleted);
        prop_assert!(counts.pending + counts.failed <= counts.visible);
    }

    #[test]
    fn guard_never_mutates(items in collection_strategy(), bounds in bounds_strategy()) {
        let before = items.clone();
        for op in [Operation::Add, Operation::Delete, Operation::Reorder, Operation::Upload] {
            let _ = validate_operation(&items, op, bounds.min_images, bounds.max_images);
        }
        prop_assert_eq!(before, items);
    }

    #[test]
    fn result_counts_match_classifier(items in collection_strategy(), bounds in bounds_strategy()) {
        let result = validate_collection(&items, bounds.min_images, bounds.max_images);
        prop_assert_eq!(result.counts, classify(&items));
        prop_assert_eq!(result.is_valid, result.errors.is_empty());
    }

    #[test]
    fn reconcile_partitions_disjointly(items in collection_strategy()) {
        let plan = reconcile(&items);
        let counts = classify(&items);
        prop_assert_eq!(plan.to_update.len(), counts.existing);
        prop_assert!(plan.to_create.len() <= counts.new);
        prop_assert!(plan.to_delete.len() <= counts.deleted);
        for created in &plan.to_create {
            prop_assert!(!plan.to_update.iter().any(|u| u.identity_key == created.identity_key));
        }
    }
}
