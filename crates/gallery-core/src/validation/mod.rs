//! Validation of image collections
//!
//! Everything in this module is a pure function of the item list and the
//! caller-supplied bounds. Nothing here mutates state or returns `Err`;
//! problems are reported inside a [`ValidationResult`](crate::ValidationResult).
//!
//! The validators are organized into focused modules:
//! - `classifier`: partition counts (visible/existing/new/deleted/pending/failed)
//! - `bounds`: real-time minimum/maximum and upload-state checks
//! - `guard`: predicts whether a proposed operation would break the bounds
//! - `submission`: the strict gate run before persisting
//! - `url_check`: source well-formedness used by the submission gate
//!
//! Copyright (c) 2026 Gallery Team
//! Licensed under the MIT OR Apache-2.0 license

pub mod bounds;
pub mod classifier;
pub mod guard;
pub mod submission;
pub mod url_check;
mod tests;

// Re-export public API
pub use bounds::validate_collection;
pub use classifier::classify;
pub use guard::validate_operation;
pub use submission::validate_for_submission;
pub use url_check::is_valid_source;
