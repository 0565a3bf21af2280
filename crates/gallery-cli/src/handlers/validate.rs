//! Validate command handler

use super::utils::{display_name, load_collection};
use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::{OutputWriter, ValidationReport};
use tracing::{error, info, instrument, warn};

/// Handle the validate command
///
/// Every document is reported before the command fails, so one broken gallery
/// does not hide the state of the others. Documents that cannot be loaded are
/// listed after the reports and count as failed. A single unreadable document
/// fails with its own load error.
#[instrument(skip(config, output), fields(files = args.files.len()))]
pub async fn handle_validate(args: ValidateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("validate_command", &format!("files: {}", args.files.len()));
    info!("Starting validation");

    let progress = if args.files.len() > 1 && config.output.progress {
        output.progress_bar(args.files.len() as u64, "Validating galleries")
    } else {
        None
    };

    let mut reports = Vec::with_capacity(args.files.len());
    let mut unreadable = Vec::new();
    for path in &args.files {
        if let Some(pb) = &progress {
            pb.set_message(display_name(path));
        }

        match load_collection(path, &args.bounds, config) {
            Ok(collection) => {
                let result = collection.validate();
                if !result.is_valid {
                    warn!(path = %path.display(), errors = ?result.errors, "Gallery failed validation");
                }

                let mut report = ValidationReport::new(display_name(path), collection.bounds(), result);
                if args.detailed {
                    report = report.with_images(collection.items());
                }
                reports.push(report);
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Could not load gallery");
                unreadable.push((display_name(path), e));
            }
        }

        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    if reports.is_empty() && unreadable.len() == 1 {
        if let Some((_, e)) = unreadable.pop() {
            return Err(e);
        }
    }

    if !reports.is_empty() {
        output.validation_reports(&reports)?;
    }
    for (file, e) in &unreadable {
        output.error(&format!("✗ {}: {}", file, e))?;
    }

    let failed = reports.iter().filter(|r| !r.result.is_valid).count() + unreadable.len();
    if failed > 0 {
        return Err(Error::ValidationFailed { documents: failed });
    }

    output.success(&format!("✓ {} gallery document(s) valid", reports.len()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{BoundsArgs, OutputFormat};
    use crate::output::SharedBuffer;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const SIX_EXISTING: &str = r#"[
        {"identity_key": "p1", "persisted_id": "1", "is_existing": true, "order": 0,
         "source": {"kind": "remote", "url": "https://cdn.example.com/1.jpg"}},
        {"identity_key": "p2", "persisted_id": "2", "is_existing": true, "order": 1,
         "source": {"kind": "remote", "url": "https://cdn.example.com/2.jpg"}},
        {"identity_key": "p3", "persisted_id": "3", "is_existing": true, "order": 2,
         "source": {"kind": "remote", "url": "https://cdn.example.com/3.jpg"}},
        {"identity_key": "p4", "persisted_id": "4", "is_existing": true, "order": 3,
         "source": {"kind": "remote", "url": "https://cdn.example.com/4.jpg"}},
        {"identity_key": "p5", "persisted_id": "5", "is_existing": true, "order": 4,
         "source": {"kind": "remote", "url": "https://cdn.example.com/5.jpg"}},
        {"identity_key": "p6", "persisted_id": "6", "is_existing": true, "order": 5,
         "source": {"kind": "remote", "url": "https://cdn.example.com/6.jpg"}}
    ]"#;

    fn args(files: Vec<PathBuf>) -> ValidateArgs {
        ValidateArgs {
            files,
            bounds: BoundsArgs::default(),
            detailed: false,
        }
    }

    fn writer() -> (OutputWriter, SharedBuffer) {
        let buffer = SharedBuffer::default();
        let writer = OutputWriter::with_writer(OutputFormat::Human, false, false, Box::new(buffer.clone()));
        (writer, buffer)
    }

    #[tokio::test]
    async fn test_unreadable_document_does_not_hide_others() {
        let dir = TempDir::new().unwrap();
        let valid = dir.path().join("listing.json");
        std::fs::write(&valid, SIX_EXISTING).unwrap();
        let missing = dir.path().join("missing.json");

        let (mut output, buffer) = writer();
        let err = handle_validate(args(vec![missing.clone(), valid.clone()]), &Config::default(), &mut output)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::ValidationFailed { documents: 1 }));
        let printed = buffer.contents();
        assert!(printed.contains(&format!("=== {} ===", valid.display())));
        assert!(printed.contains(&format!("ERROR: ✗ {}", missing.display())));
    }

    #[tokio::test]
    async fn test_single_unreadable_document_keeps_its_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");

        let (mut output, _buffer) = writer();
        let err = handle_validate(args(vec![missing]), &Config::default(), &mut output)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn test_completed_local_file_is_rejected_on_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("listing.json");
        let mut items: Vec<serde_json::Value> = serde_json::from_str(SIX_EXISTING).unwrap();
        items.push(serde_json::json!({
            "source": {"kind": "local", "name": "pool.jpg"},
            "identity_key": "k-pool",
            "order": 6
        }));
        std::fs::write(&path, serde_json::to_string(&items).unwrap()).unwrap();

        let (mut output, _buffer) = writer();
        let err = handle_validate(args(vec![path]), &Config::default(), &mut output)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Core(gallery_core::Error::InvalidItem { ref identity_key, .. }) if identity_key == "k-pool"
        ));
    }

    #[tokio::test]
    async fn test_valid_document_succeeds() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("listing.json");
        std::fs::write(&path, SIX_EXISTING).unwrap();

        let (mut output, buffer) = writer();
        handle_validate(args(vec![path]), &Config::default(), &mut output)
            .await
            .unwrap();
        assert!(buffer.contents().contains("✓ 1 gallery document(s) valid"));
    }
}
