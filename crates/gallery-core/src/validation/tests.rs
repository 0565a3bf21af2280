//! Tests for the validation system
//!
//! Exercises the classifier, the real-time bounds validator, the operation
//! guard and the submission gate together on hand-built collections.
//!
//! Copyright (c) 2026 Gallery Team
//! Licensed under the MIT OR Apache-2.0 license

#[cfg(test)]
mod tests {
    use super::super::{classify, validate_collection, validate_for_submission, validate_operation};
    use crate::{ImageItem, ImageSource, LocalFile, Operation, UploadStage};

    fn existing(n: usize) -> Vec<ImageItem> {
        (0..n)
            .map(|i| {
                ImageItem::existing(
                    format!("{}", i + 1),
                    format!("https://cdn.example.com/listing/{}.jpg", i + 1),
                    i as i64,
                )
            })
            .collect()
    }

    fn uploaded_new(n: usize) -> Vec<ImageItem> {
        (0..n)
            .map(|i| {
                let mut item = ImageItem::local(LocalFile::new(format!("new-{}.jpg", i)), i as i64);
                item.complete(format!("https://cdn.example.com/new/{}.jpg", i)).unwrap();
                item
            })
            .collect()
    }

    fn with_stage(mut item: ImageItem, stage: UploadStage) -> ImageItem {
        item.upload_stage = stage;
        item
    }

    #[test]
    fn test_classify_partitions_collection() {
        let mut items = existing(8);
        items[0].is_deleted = true;
        items[1].is_deleted = true;
        items.push(ImageItem::local(LocalFile::new("a.jpg"), 8));
        items.push(with_stage(ImageItem::local(LocalFile::new("b.jpg"), 9), UploadStage::Failed));
        items.push(with_stage(
            ImageItem::local(LocalFile::new("c.jpg"), 10),
            UploadStage::InProgress(55),
        ));

        let counts = classify(&items);
        assert_eq!(counts.total, 11);
        assert_eq!(counts.existing, 6);
        assert_eq!(counts.new, 3);
        assert_eq!(counts.deleted, 2);
        assert_eq!(counts.visible, 9);
        assert_eq!(counts.pending, 2);
        assert_eq!(counts.failed, 1);
    }

    #[test]
    fn test_deleted_items_stage_is_ignored() {
        let mut failed = with_stage(ImageItem::local(LocalFile::new("a.jpg"), 0), UploadStage::Failed);
        failed.is_deleted = true;
        let counts = classify(&[failed]);
        assert_eq!(counts.failed, 0);
        assert_eq!(counts.new, 0);
        assert_eq!(counts.deleted, 1);
    }

    #[test]
    fn test_classify_empty() {
        let counts = classify(&[]);
        assert_eq!(counts.total, 0);
        assert_eq!(counts.visible, 0);
    }

    #[test]
    fn test_six_existing_is_valid() {
        let result = validate_collection(&existing(6), 6, 20);
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        assert_eq!(result.counts.visible, 6);
        assert_eq!(result.counts.existing, 6);
        assert_eq!(result.counts.new, 0);
    }

    #[test]
    fn test_below_minimum() {
        let result = validate_collection(&uploaded_new(3), 6, 20);
        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["Minimum 6 images required".to_string()]);
    }

    #[test]
    fn test_above_maximum() {
        let result = validate_collection(&existing(21), 6, 20);
        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["Maximum 20 images allowed".to_string()]);
    }

    #[test]
    fn test_wider_bound_accepts_twenty_five() {
        let result = validate_collection(&existing(25), 6, 40);
        assert!(result.is_valid);
        assert_eq!(result.counts.visible, 25);
    }

    #[test]
    fn test_uploading_is_only_a_warning_in_real_time() {
        let mut items = existing(6);
        items.push(ImageItem::local(LocalFile::new("a.jpg"), 6));
        let result = validate_collection(&items, 6, 20);
        assert!(result.is_valid);
        assert_eq!(result.warnings, vec!["1 image(s) still uploading".to_string()]);
        assert_eq!(result.primary_message(), Some("1 image(s) still uploading"));
    }

    #[test]
    fn test_failed_upload_is_an_error() {
        let mut items = existing(6);
        items.push(with_stage(ImageItem::local(LocalFile::new("a.jpg"), 6), UploadStage::Failed));
        items.push(with_stage(ImageItem::local(LocalFile::new("b.jpg"), 7), UploadStage::Failed));
        let result = validate_collection(&items, 6, 20);
        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["2 image(s) failed to upload".to_string()]);
    }

    #[test]
    fn test_message_order() {
        let mut items = uploaded_new(1);
        items.push(with_stage(ImageItem::local(LocalFile::new("a.jpg"), 1), UploadStage::Failed));
        items.push(ImageItem::local(LocalFile::new("b.jpg"), 2));
        let result = validate_collection(&items, 6, 20);
        assert_eq!(
            result.errors,
            vec![
                "Minimum 6 images required".to_string(),
                "1 image(s) failed to upload".to_string(),
            ]
        );
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.primary_message(), Some("Minimum 6 images required"));
    }

    #[test]
    fn test_validation_is_repeatable() {
        let mut items = existing(7);
        items[2].is_deleted = true;
        assert_eq!(classify(&items), classify(&items));
        assert_eq!(validate_collection(&items, 6, 20), validate_collection(&items, 6, 20));
    }

    #[test]
    fn test_delete_blocked_at_minimum() {
        let mut items = existing(8);
        items[0].is_deleted = true;
        items[1].is_deleted = true;
        let result = validate_operation(&items, Operation::Delete, 6, 20);
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec!["Cannot delete image: minimum of 6 images required".to_string()]
        );
        assert_eq!(result.counts.visible, 6);
    }

    #[test]
    fn test_delete_warns_one_above_minimum() {
        let result = validate_operation(&existing(7), Operation::Delete, 6, 20);
        assert!(result.is_valid);
        assert_eq!(
            result.warnings,
            vec!["Deleting this image will reach the minimum limit".to_string()]
        );
    }

    #[test]
    fn test_delete_allowed_with_room() {
        let result = validate_operation(&existing(10), Operation::Delete, 6, 20);
        assert!(result.is_valid);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_add_blocked_at_maximum() {
        let result = validate_operation(&existing(20), Operation::Add, 6, 20);
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec!["Cannot add more images: maximum of 20 reached".to_string()]
        );
    }

    #[test]
    fn test_add_warns_one_below_maximum() {
        let result = validate_operation(&existing(19), Operation::Add, 6, 20);
        assert!(result.is_valid);
        assert_eq!(
            result.warnings,
            vec!["Adding this image will reach the maximum limit".to_string()]
        );
    }

    #[test]
    fn test_upload_uses_add_capacity() {
        assert!(!validate_operation(&existing(20), Operation::Upload, 6, 20).is_valid);
        assert!(validate_operation(&existing(12), Operation::Upload, 6, 20).is_valid);
    }

    #[test]
    fn test_add_with_zero_maximum() {
        let result = validate_operation(&[], Operation::Add, 0, 0);
        assert!(!result.is_valid);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_reorder_always_valid() {
        for n in [0, 6, 20, 30] {
            let result = validate_operation(&existing(n), Operation::Reorder, 6, 20);
            assert!(result.is_valid);
            assert!(result.errors.is_empty());
            assert!(result.warnings.is_empty());
        }
    }

    #[test]
    fn test_submission_blocks_uploads_in_flight() {
        let mut items = existing(6);
        items.push(with_stage(
            ImageItem::local(LocalFile::new("a.jpg"), 6),
            UploadStage::InProgress(80),
        ));

        let realtime = validate_collection(&items, 6, 20);
        assert!(realtime.is_valid);

        let submission = validate_for_submission(&items, 6, 20);
        assert!(!submission.is_valid);
        assert!(submission
            .errors
            .contains(&"1 image(s) not uploaded yet".to_string()));
        assert!(submission.warnings.is_empty());
    }

    #[test]
    fn test_submission_reports_failed_once() {
        let mut items = existing(6);
        items.push(with_stage(ImageItem::local(LocalFile::new("a.jpg"), 6), UploadStage::Failed));
        let result = validate_for_submission(&items, 6, 20);
        assert_eq!(result.errors, vec!["1 image(s) failed to upload".to_string()]);
    }

    #[test]
    fn test_submission_rejects_malformed_urls() {
        let mut items = existing(6);
        items[3].source = ImageSource::Remote {
            url: String::new(),
        };
        items[4].source = ImageSource::Remote {
            url: "uploads/4.jpg".to_string(),
        };
        let result = validate_for_submission(&items, 6, 20);
        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["2 image(s) have an invalid URL".to_string()]);

        // Not surfaced in real time
        assert!(validate_collection(&items, 6, 20).is_valid);
    }

    #[test]
    fn test_submission_rejects_complete_local_file() {
        let mut items = existing(6);
        items.push(with_stage(
            ImageItem::local(LocalFile::new("pool.jpg").with_mime_type("image/jpeg"), 6),
            UploadStage::Complete,
        ));
        let result = validate_for_submission(&items, 6, 20);
        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["1 image(s) have an invalid URL".to_string()]);
    }

    #[test]
    fn test_submission_ignores_deleted_sources() {
        let mut items = existing(7);
        items[6].is_deleted = true;
        items[6].source = ImageSource::Remote {
            url: String::new(),
        };
        assert!(validate_for_submission(&items, 6, 20).is_valid);
    }

    #[test]
    fn test_submission_accepts_clean_collection() {
        let mut items = existing(4);
        items.extend(uploaded_new(3));
        let result = validate_for_submission(&items, 6, 20);
        assert!(result.is_valid);
        assert_eq!(result.counts.visible, 7);
    }
}
