//! Operation check command handler

use super::utils::{display_name, load_collection};
use crate::cli::CheckArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::{OperationReport, OutputWriter};
use gallery_core::Operation;
use tracing::instrument;

/// Handle the check command
#[instrument(skip(config, output), fields(file = %args.file.display(), operation = ?args.operation))]
pub async fn handle_check(args: CheckArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let collection = load_collection(&args.file, &args.bounds, config)?;
    let operation = Operation::from(args.operation);
    let result = collection.validate_operation(operation);

    let report = OperationReport {
        file: display_name(&args.file),
        operation,
        allowed: result.is_valid,
        result,
    };
    output.operation_report(&report)?;

    if !report.allowed {
        return Err(Error::OperationRejected {
            operation: operation.to_string(),
            reason: report.result.primary_message().unwrap_or_default().to_string(),
        });
    }

    Ok(())
}
