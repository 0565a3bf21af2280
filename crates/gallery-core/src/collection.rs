//! Editing session over a property's image list
//!
//! `ImageCollection` owns the in-memory list for one form instance together
//! with that form's bounds. Every mutation consults the operation guard first
//! and is refused with [`Error::OperationRejected`] when the guard says no, so
//! the list never changes into a state the guard would not allow. Deletes are
//! soft: the item stays in the list with `is_deleted` set until
//! reconciliation turns it into a delete instruction.

use crate::error::{Error, Result};
use crate::reconcile::reconcile;
use crate::types::{
    Counts, GalleryBounds, ImageItem, LocalFile, Operation, ReconcilePlan, ValidationResult,
};
use crate::validation::{classify, validate_collection, validate_for_submission, validate_operation};
use std::collections::HashSet;

/// Outcome of an accepted mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    /// Item the mutation touched
    pub identity_key: String,
    /// Advisory guard warnings, e.g. a bound is about to be reached
    pub warnings: Vec<String>,
}

/// In-memory image list for one editing session
#[derive(Debug, Clone)]
pub struct ImageCollection {
    items: Vec<ImageItem>,
    bounds: GalleryBounds,
}

impl ImageCollection {
    /// Empty collection
    pub fn new(bounds: GalleryBounds) -> Result<Self> {
        bounds.check()?;
        Ok(Self {
            items: Vec::new(),
            bounds,
        })
    }

    /// Collection initialized from stored data
    ///
    /// Each item must satisfy the data model invariants and identity keys
    /// must be unique.
    pub fn from_persisted(bounds: GalleryBounds, items: Vec<ImageItem>) -> Result<Self> {
        bounds.check()?;

        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            item.verify()?;
            if !seen.insert(item.identity_key.as_str()) {
                return Err(Error::InvalidItem {
                    identity_key: item.identity_key.clone(),
                    message: "duplicate identity key".to_string(),
                });
            }
        }

        tracing::debug!(items = items.len(), bounds = %bounds, "Loaded image collection");

        Ok(Self { items, bounds })
    }

    pub fn items(&self) -> &[ImageItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<ImageItem> {
        self.items
    }

    pub fn bounds(&self) -> GalleryBounds {
        self.bounds
    }

    pub fn get(&self, identity_key: &str) -> Option<&ImageItem> {
        self.items.iter().find(|item| item.identity_key == identity_key)
    }

    /// Visible items in display order (stable for equal `order`)
    pub fn visible(&self) -> Vec<&ImageItem> {
        let mut visible: Vec<_> = self.items.iter().filter(|item| item.is_visible()).collect();
        visible.sort_by_key(|item| item.order);
        visible
    }

    pub fn counts(&self) -> Counts {
        classify(&self.items)
    }

    pub fn validate(&self) -> ValidationResult {
        validate_collection(&self.items, self.bounds.min_images, self.bounds.max_images)
    }

    pub fn validate_operation(&self, operation: Operation) -> ValidationResult {
        validate_operation(&self.items, operation, self.bounds.min_images, self.bounds.max_images)
    }

    pub fn validate_for_submission(&self) -> ValidationResult {
        validate_for_submission(&self.items, self.bounds.min_images, self.bounds.max_images)
    }

    pub fn reconcile(&self) -> ReconcilePlan {
        reconcile(&self.items)
    }

    /// Add a locally picked file as a pending image at the end of the gallery
    pub fn add(&mut self, file: LocalFile) -> Result<Applied> {
        let warnings = self.guard(Operation::Add)?;

        let order = self
            .items
            .iter()
            .filter(|item| item.is_visible())
            .map(|item| item.order + 1)
            .max()
            .unwrap_or(0);
        let item = ImageItem::local(file, order);
        let identity_key = item.identity_key.clone();

        tracing::debug!(identity_key = %identity_key, order, "Added image");
        self.items.push(item);

        Ok(Applied {
            identity_key,
            warnings,
        })
    }

    /// Soft-delete an image; deleting an already deleted image does nothing
    pub fn delete(&mut self, identity_key: &str) -> Result<Applied> {
        let index = self.index_of(identity_key)?;
        if self.items[index].is_deleted {
            return Ok(Applied {
                identity_key: identity_key.to_string(),
                warnings: Vec::new(),
            });
        }

        let warnings = self.guard(Operation::Delete)?;
        self.items[index].is_deleted = true;
        tracing::debug!(identity_key, "Marked image deleted");

        Ok(Applied {
            identity_key: identity_key.to_string(),
            warnings,
        })
    }

    /// Undo a soft delete; it takes a slot again, so it is guarded like an add
    pub fn restore(&mut self, identity_key: &str) -> Result<Applied> {
        let index = self.index_of(identity_key)?;
        if !self.items[index].is_deleted {
            return Ok(Applied {
                identity_key: identity_key.to_string(),
                warnings: Vec::new(),
            });
        }

        let warnings = self.guard(Operation::Add)?;
        self.items[index].is_deleted = false;
        tracing::debug!(identity_key, "Restored image");

        Ok(Applied {
            identity_key: identity_key.to_string(),
            warnings,
        })
    }

    /// Move a visible image to `new_index` and renumber visible images `0..n`
    pub fn reorder(&mut self, identity_key: &str, new_index: usize) -> Result<Applied> {
        let index = self.index_of(identity_key)?;
        if self.items[index].is_deleted {
            return Err(Error::InvalidItem {
                identity_key: identity_key.to_string(),
                message: "deleted images cannot be reordered".to_string(),
            });
        }

        let warnings = self.guard(Operation::Reorder)?;

        let mut positions: Vec<usize> = (0..self.items.len())
            .filter(|&i| self.items[i].is_visible())
            .collect();
        positions.sort_by_key(|&i| self.items[i].order);

        let from = positions
            .iter()
            .position(|&i| i == index)
            .ok_or_else(|| Error::ItemNotFound {
                identity_key: identity_key.to_string(),
            })?;
        let moved = positions.remove(from);
        let to = new_index.min(positions.len());
        positions.insert(to, moved);

        for (order, &i) in positions.iter().enumerate() {
            self.items[i].order = order as i64;
        }

        tracing::debug!(identity_key, from, to, "Reordered image");

        Ok(Applied {
            identity_key: identity_key.to_string(),
            warnings,
        })
    }

    /// Apply a change (typically an upload lifecycle transition) to one item
    pub fn update<F>(&mut self, identity_key: &str, change: F) -> Result<()>
    where
        F: FnOnce(&mut ImageItem) -> Result<()>,
    {
        let index = self.index_of(identity_key)?;
        change(&mut self.items[index])
    }

    fn index_of(&self, identity_key: &str) -> Result<usize> {
        self.items
            .iter()
            .position(|item| item.identity_key == identity_key)
            .ok_or_else(|| Error::ItemNotFound {
                identity_key: identity_key.to_string(),
            })
    }

    fn guard(&self, operation: Operation) -> Result<Vec<String>> {
        let result = self.validate_operation(operation);
        if !result.is_valid {
            tracing::warn!(%operation, reasons = ?result.errors, "Operation rejected");
            return Err(Error::OperationRejected {
                operation,
                reasons: result.errors,
            });
        }
        Ok(result.warnings)
    }
}
