//! Submit and reconcile command handlers

use super::utils::{display_name, load_collection, write_plan};
use crate::cli::{BoundsArgs, ReconcileArgs, SubmitArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::{OutputWriter, PlanReport};
use async_trait::async_trait;
use gallery_core::{GalleryStore, ReconcilePlan};
use std::path::PathBuf;
use tracing::instrument;

/// Store that persists the plan to a file, or only logs it when no file is set
struct PlanFileStore {
    path: Option<PathBuf>,
}

#[async_trait]
impl GalleryStore for PlanFileStore {
    async fn apply(&self, plan: &ReconcilePlan) -> gallery_core::Result<()> {
        match &self.path {
            Some(path) => write_plan(path, plan).map_err(|e| {
                gallery_core::Error::persistence(format!(
                    "failed to write plan to {}: {}",
                    path.display(),
                    e
                ))
            }),
            None => {
                tracing::debug!(summary = %plan.summary(), "Plan not written, printing only");
                Ok(())
            }
        }
    }
}

/// Handle the submit command
#[instrument(skip(config, output), fields(file = %args.file.display()))]
pub async fn handle_submit(args: SubmitArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("submit_command", &display_name(&args.file));
    let collection = load_collection(&args.file, &args.bounds, config)?;

    let store = PlanFileStore {
        path: args.save_to.clone(),
    };

    let plan = match gallery_core::submit(&collection, &store).await {
        Ok(plan) => plan,
        Err(gallery_core::Error::SubmissionBlocked { errors }) => {
            for error in &errors {
                output.error(&format!("✗ {}", error))?;
            }
            return Err(Error::SubmissionBlocked {
                reason: errors.join("; "),
            });
        }
        Err(e) => return Err(e.into()),
    };

    emit_plan(&args.file, plan, args.save_to.as_ref(), output)
}

/// Handle the reconcile command
#[instrument(skip(config, output), fields(file = %args.file.display()))]
pub async fn handle_reconcile(args: ReconcileArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let collection = load_collection(&args.file, &BoundsArgs::default(), config)?;
    let plan = collection.reconcile();

    if let Some(path) = &args.save_to {
        write_plan(path, &plan)?;
    }

    emit_plan(&args.file, plan, args.save_to.as_ref(), output)
}

fn emit_plan(
    file: &std::path::Path,
    plan: ReconcilePlan,
    saved_to: Option<&PathBuf>,
    output: &mut OutputWriter,
) -> Result<()> {
    let report = PlanReport::new(display_name(file), plan);
    match saved_to {
        Some(path) => output.success(&format!("✓ Plan written to {} ({})", path.display(), report.summary)),
        None => output.plan_report(&report),
    }
}
