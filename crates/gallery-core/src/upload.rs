//! Upload collaborator and concurrent upload driver
//!
//! The storage provider is reached through the [`Uploader`] trait. Uploads of
//! different images are independent: each one runs in its own task and, when
//! it settles, updates only the item with its identity key. A failed or
//! panicked upload marks that item `Failed` instead of propagating.

use crate::collection::ImageCollection;
use crate::error::Result;
use crate::types::{ImageSource, LocalFile, UploadStage};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Result of a successful upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    /// Public URL of the stored image
    pub url: String,
}

/// External storage provider
#[async_trait]
pub trait Uploader: Send + Sync {
    /// Store a local file and return where it can be fetched from
    async fn upload(&self, file: &LocalFile) -> Result<UploadedImage>;
}

/// Tally of settled uploads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadSummary {
    pub completed: usize,
    pub failed: usize,
}

/// Upload every visible image that is still pending or in progress
///
/// Items are moved to `InProgress(0)` before their upload starts. Deleted
/// items are left alone. An uploading item with no local file has nothing to
/// send, so it is marked `Failed` and counted as such.
pub async fn upload_pending<U>(collection: &mut ImageCollection, uploader: Arc<U>) -> UploadSummary
where
    U: Uploader + ?Sized + 'static,
{
    let mut jobs: Vec<(String, LocalFile)> = Vec::new();
    let mut stranded: Vec<String> = Vec::new();
    for item in collection
        .items()
        .iter()
        .filter(|item| item.is_visible() && item.upload_stage.is_uploading())
    {
        match &item.source {
            ImageSource::Local(file) => jobs.push((item.identity_key.clone(), file.clone())),
            ImageSource::Remote { .. } => stranded.push(item.identity_key.clone()),
        }
    }

    let mut summary = UploadSummary::default();

    for identity_key in stranded {
        tracing::warn!(identity_key = %identity_key, "Uploading image has no local file to send");
        if let Err(e) = collection.update(&identity_key, |item| item.fail()) {
            tracing::warn!(identity_key = %identity_key, error = %e, "Could not mark upload failed");
        }
        summary.failed += 1;
    }

    if jobs.is_empty() {
        return summary;
    }

    tracing::info!(count = jobs.len(), "Starting image uploads");

    let mut outstanding = HashSet::with_capacity(jobs.len());
    let mut tasks = JoinSet::new();

    for (identity_key, file) in jobs {
        let started = collection.update(&identity_key, |item| {
            if item.upload_stage == UploadStage::Pending {
                item.begin_upload()
            } else {
                Ok(())
            }
        });
        if let Err(e) = started {
            tracing::warn!(identity_key = %identity_key, error = %e, "Could not start upload");
            continue;
        }

        outstanding.insert(identity_key.clone());
        let uploader = Arc::clone(&uploader);
        tasks.spawn(async move {
            let outcome = uploader.upload(&file).await;
            (identity_key, outcome)
        });
    }

    while let Some(joined) = tasks.join_next().await {
        let (identity_key, outcome) = match joined {
            Ok(settled) => settled,
            Err(e) => {
                // Key is unknown here; it stays in `outstanding` and is failed below
                tracing::error!(error = %e, "Upload task aborted");
                continue;
            }
        };
        outstanding.remove(&identity_key);

        let applied = match outcome {
            Ok(uploaded) => collection
                .update(&identity_key, |item| item.complete(uploaded.url))
                .map(|_| true),
            Err(e) => {
                tracing::warn!(identity_key = %identity_key, error = %e, "Image upload failed");
                collection.update(&identity_key, |item| item.fail()).map(|_| false)
            }
        };

        match applied {
            Ok(true) => summary.completed += 1,
            Ok(false) => summary.failed += 1,
            Err(e) => {
                tracing::warn!(identity_key = %identity_key, error = %e, "Could not record upload outcome");
                summary.failed += 1;
            }
        }
    }

    for identity_key in outstanding {
        if let Err(e) = collection.update(&identity_key, |item| item.fail()) {
            tracing::warn!(identity_key = %identity_key, error = %e, "Could not mark upload failed");
        }
        summary.failed += 1;
    }

    tracing::info!(
        completed = summary.completed,
        failed = summary.failed,
        "Image uploads settled"
    );

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::{GalleryBounds, ImageItem};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Succeeds unless the file name starts with "bad", panics on "boom"
    struct FakeUploader {
        calls: AtomicUsize,
    }

    impl FakeUploader {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Uploader for FakeUploader {
        async fn upload(&self, file: &LocalFile) -> Result<UploadedImage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if file.name.starts_with("boom") {
                panic!("storage client crashed");
            }
            if file.name.starts_with("bad") {
                return Err(Error::upload(file.name.clone(), "connection reset"));
            }
            Ok(UploadedImage {
                url: format!("https://cdn.example.com/uploads/{}", file.name),
            })
        }
    }

    fn collection_with(names: &[&str]) -> ImageCollection {
        let mut items: Vec<ImageItem> = (0..6)
            .map(|i| {
                ImageItem::existing(
                    format!("{}", i),
                    format!("https://cdn.example.com/{}.jpg", i),
                    i as i64,
                )
            })
            .collect();
        for (i, name) in names.iter().enumerate() {
            items.push(ImageItem::local(LocalFile::new(*name), 6 + i as i64).with_identity_key(*name));
        }
        ImageCollection::from_persisted(GalleryBounds::LISTING, items).unwrap()
    }

    #[tokio::test]
    async fn test_uploads_complete_items() {
        let mut collection = collection_with(&["a.jpg", "b.jpg"]);
        let uploader = Arc::new(FakeUploader::new());

        let summary = upload_pending(&mut collection, uploader.clone()).await;

        assert_eq!(summary, UploadSummary { completed: 2, failed: 0 });
        assert_eq!(uploader.calls.load(Ordering::SeqCst), 2);
        let item = collection.get("a.jpg").unwrap();
        assert_eq!(item.upload_stage, UploadStage::Complete);
        assert_eq!(item.source.url(), Some("https://cdn.example.com/uploads/a.jpg"));
        assert!(collection.validate_for_submission().is_valid);
    }

    #[tokio::test]
    async fn test_failures_are_recorded_per_item() {
        let mut collection = collection_with(&["a.jpg", "bad.jpg"]);
        let summary = upload_pending(&mut collection, Arc::new(FakeUploader::new())).await;

        assert_eq!(summary, UploadSummary { completed: 1, failed: 1 });
        assert_eq!(collection.get("bad.jpg").unwrap().upload_stage, UploadStage::Failed);
        assert_eq!(collection.get("a.jpg").unwrap().upload_stage, UploadStage::Complete);

        let result = collection.validate_for_submission();
        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["1 image(s) failed to upload".to_string()]);
    }

    #[tokio::test]
    async fn test_panicked_upload_marks_item_failed() {
        let mut collection = collection_with(&["boom.jpg", "ok.jpg"]);
        let summary = upload_pending(&mut collection, Arc::new(FakeUploader::new())).await;

        assert_eq!(summary, UploadSummary { completed: 1, failed: 1 });
        assert_eq!(collection.get("boom.jpg").unwrap().upload_stage, UploadStage::Failed);
    }

    #[tokio::test]
    async fn test_skips_deleted_and_finished_items() {
        let mut collection = collection_with(&["a.jpg", "b.jpg"]);
        collection.delete("b.jpg").unwrap();
        let uploader = Arc::new(FakeUploader::new());

        let summary = upload_pending(&mut collection, uploader.clone()).await;
        assert_eq!(summary.completed, 1);

        let again = upload_pending(&mut collection, uploader.clone()).await;
        assert_eq!(again, UploadSummary::default());
        assert_eq!(uploader.calls.load(Ordering::SeqCst), 1);
        assert_eq!(collection.get("b.jpg").unwrap().upload_stage, UploadStage::Pending);
    }

    #[tokio::test]
    async fn test_retried_upload_completes() {
        let mut collection = collection_with(&["bad-pool.jpg"]);
        let uploader = Arc::new(FakeUploader::new());

        let first = upload_pending(&mut collection, uploader.clone()).await;
        assert_eq!(first, UploadSummary { completed: 0, failed: 1 });

        collection
            .update("bad-pool.jpg", |item| {
                item.source = ImageSource::Local(LocalFile::new("pool.jpg"));
                item.retry()
            })
            .unwrap();
        assert!(collection.validate().warnings.iter().any(|w| w.contains("uploading")));

        let second = upload_pending(&mut collection, uploader.clone()).await;
        assert_eq!(second, UploadSummary { completed: 1, failed: 0 });
        let item = collection.get("bad-pool.jpg").unwrap();
        assert_eq!(item.source.url(), Some("https://cdn.example.com/uploads/pool.jpg"));
        assert!(collection.validate_for_submission().is_valid);
    }

    #[tokio::test]
    async fn test_uploading_remote_item_is_failed() {
        let mut items = collection_with(&[]).into_items();
        let mut stray = ImageItem::local(LocalFile::new("pool.jpg"), 6).with_identity_key("stray");
        stray.source = ImageSource::Remote {
            url: "https://cdn.example.com/pool.jpg".to_string(),
        };
        items.push(stray);
        let mut collection = ImageCollection::from_persisted(GalleryBounds::LISTING, items).unwrap();
        let uploader = Arc::new(FakeUploader::new());

        let summary = upload_pending(&mut collection, uploader.clone()).await;

        assert_eq!(summary, UploadSummary { completed: 0, failed: 1 });
        assert_eq!(uploader.calls.load(Ordering::SeqCst), 0);
        assert_eq!(collection.get("stray").unwrap().upload_stage, UploadStage::Failed);
        assert!(!collection.validate_for_submission().is_valid);
    }

    #[tokio::test]
    async fn test_accepts_trait_objects() {
        let mut collection = collection_with(&["a.jpg"]);
        let uploader: Arc<dyn Uploader> = Arc::new(FakeUploader::new());
        let summary = upload_pending(&mut collection, uploader).await;
        assert_eq!(summary.completed, 1);
    }
}
