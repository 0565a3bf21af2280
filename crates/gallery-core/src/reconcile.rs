//! Reconciliation of the final item list into persistence instructions
//!
//! Soft-deleted existing images become deletions, uploaded new images become
//! insertions, and surviving existing images are re-sent so their order (and
//! caption) can be updated. New images that were deleted before submission
//! never reached storage and are simply dropped.

use crate::types::{ImageItem, ReconcilePlan};

/// Derive create/update/delete instructions from the item list
///
/// `to_create` and `to_update` are sorted by `order` with a stable sort, so
/// items sharing an order keep their list position. `to_delete` keeps list
/// order.
pub fn reconcile(items: &[ImageItem]) -> ReconcilePlan {
    let mut plan = ReconcilePlan::default();

    for item in items {
        match (item.is_existing, item.is_deleted) {
            (true, true) => {
                if let Some(id) = &item.persisted_id {
                    plan.to_delete.push(id.clone());
                }
            }
            (true, false) => plan.to_update.push(item.clone()),
            (false, false) if item.upload_stage.is_complete() => {
                plan.to_create.push(item.clone())
            }
            (false, _) => {}
        }
    }

    plan.to_create.sort_by_key(|item| item.order);
    plan.to_update.sort_by_key(|item| item.order);

    tracing::debug!(summary = %plan.summary(), "Reconciled image collection");

    plan
}
