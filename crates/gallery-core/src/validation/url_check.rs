//! Source well-formedness
//!
//! A remote source must be a non-empty absolute URL with a host (or a
//! `data:`/`blob:` URL produced by the browser). A local source must name a
//! file and, when a MIME type is known, it must be an image type.
//!
//! Copyright (c) 2026 Gallery Team
//! Licensed under the MIT OR Apache-2.0 license

use crate::types::{ImageSource, LocalFile};
use url::Url;

/// Schemes accepted for remote sources without a host
const HOSTLESS_SCHEMES: &[&str] = &["data", "blob"];

/// Whether an image source can be handed to persistence
pub fn is_valid_source(source: &ImageSource) -> bool {
    match source {
        ImageSource::Remote { url } => is_valid_url(url),
        ImageSource::Local(file) => is_recognized_local_file(file),
    }
}

fn is_valid_url(raw: &str) -> bool {
    let raw = raw.trim();
    if raw.is_empty() {
        return false;
    }

    match Url::parse(raw) {
        Ok(url) => url.has_host() || HOSTLESS_SCHEMES.contains(&url.scheme()),
        Err(_) => false,
    }
}

fn is_recognized_local_file(file: &LocalFile) -> bool {
    if file.name.trim().is_empty() {
        return false;
    }

    match &file.mime_type {
        Some(mime) => mime.to_ascii_lowercase().starts_with("image/"),
        None => true,
    }
}
