//! Persistence collaborator and submit gate
//!
//! The database layer is reached through [`GalleryStore`]. It receives the
//! reconcile plan once per submission and is expected to apply it atomically.

use crate::collection::ImageCollection;
use crate::error::{Error, Result};
use crate::types::ReconcilePlan;
use async_trait::async_trait;

/// External persistence layer for a property's images
#[async_trait]
pub trait GalleryStore: Send + Sync {
    /// Delete removed rows, insert new rows and update order for survivors
    async fn apply(&self, plan: &ReconcilePlan) -> Result<()>;
}

/// Validate a collection for submission and hand its plan to the store
///
/// The store is not called when the submission gate fails; the gate's errors
/// come back as [`Error::SubmissionBlocked`].
pub async fn submit<S>(collection: &ImageCollection, store: &S) -> Result<ReconcilePlan>
where
    S: GalleryStore + ?Sized,
{
    let validation = collection.validate_for_submission();
    if !validation.is_valid {
        tracing::warn!(errors = ?validation.errors, "Submission blocked");
        return Err(Error::SubmissionBlocked {
            errors: validation.errors,
        });
    }

    let plan = collection.reconcile();
    tracing::info!(summary = %plan.summary(), "Submitting image collection");
    store.apply(&plan).await?;

    Ok(plan)
}
