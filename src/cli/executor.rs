//! Command executor for dispatching CLI commands
//!
//! Runs after parsing and configuration loading.

use super::handlers::{MigrateCommandHandler, PromoteCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};

/// Execute a CLI command with the given settings
///
/// No subcommand means `serve`.
///
/// # Errors
/// Returns errors from command handlers or validation failures
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    validate_command_args(cli)?;

    match &cli.command {
        Some(Commands::Serve { dry_run, .. }) => {
            ServeCommandHandler::new(settings).execute(*dry_run).await
        }
        None => ServeCommandHandler::new(settings).execute(false).await,
        Some(Commands::Migrate { dry_run, rollback }) => {
            MigrateCommandHandler::new(settings)
                .execute(*dry_run, *rollback)
                .await
        }
        Some(Commands::Promote { email, role }) => {
            PromoteCommandHandler::connect(&settings)
                .await?
                .execute(email, *role)
                .await
                .map(|_| ())
        }
    }
}

/// Checks argument combinations clap cannot express on its own
fn validate_command_args(cli: &Cli) -> AppResult<()> {
    match &cli.command {
        Some(Commands::Serve { host, port, .. }) => validate_serve_args(host.as_deref(), *port),
        Some(Commands::Migrate { dry_run, rollback }) => validate_migrate_args(*dry_run, *rollback),
        Some(Commands::Promote { .. }) | None => Ok(()),
    }
}

fn validate_serve_args(host: Option<&str>, port: Option<u16>) -> AppResult<()> {
    if let (Some(host_addr), Some(port_num)) = (host, port) {
        if port_num < 1024 && host_addr == "0.0.0.0" {
            eprintln!(
                "Warning: Binding to 0.0.0.0 on port {} requires root privileges",
                port_num
            );
        }
    }

    Ok(())
}

fn validate_migrate_args(dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
    if dry_run && rollback.is_some() {
        return Err(AppError::Validation {
            field: "cli_arguments".to_string(),
            reason: "--dry-run and --rollback cannot be used together".to_string(),
        });
    }

    if let Some(steps) = rollback {
        if steps > 50 {
            eprintln!(
                "Warning: Rolling back {} migrations is a large operation. Consider using smaller steps.",
                steps
            );
        }
    }

    Ok(())
}
