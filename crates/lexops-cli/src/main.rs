//! lexops -- Amazon Lex V2 bot lifecycle helper.
//!
//! Binary entry point: parses arguments, layers the configuration and
//! dispatches to the subcommand implementations in [`commands`].

mod cli;
mod commands;
mod config;
mod helpers;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use lexops_service::Services;
use lexops_workflow::LexOps;
use tracing::debug;

use cli::{Cli, Commands};
use config::Settings;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings::load(&cli.global)?;
    helpers::init_tracing(&settings.log_level, settings.log_format);
    debug!(
        root = %settings.lex.root_dir.display(),
        locale = %settings.lex.locale_id,
        region = settings.aws.region.as_deref().unwrap_or("default"),
        "settings resolved"
    );

    let services = Services::from_aws(&settings.aws)
        .await
        .context("failed to initialise AWS clients")?;
    let ops = LexOps::new(services, settings.lex);

    match cli.command {
        Commands::Export { target, version } => commands::cmd_export(&ops, &target, version).await,
        Commands::Import {
            target,
            source_version,
            alias,
            keep_old_versions,
        } => commands::cmd_import(&ops, &target, source_version, alias, keep_old_versions).await,
        Commands::Create {
            target,
            role,
            alias,
        } => commands::cmd_create(&ops, &target, &role, alias.as_deref()).await,
        Commands::Delete { target } => commands::cmd_delete(&ops, &target).await,
        Commands::Prune { target, alias } => commands::cmd_prune(&ops, &target, &alias).await,
    }
}
