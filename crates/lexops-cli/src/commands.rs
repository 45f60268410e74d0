//! Subcommand implementations.
//!
//! Each `cmd_*` function runs one workflow operation and prints a one-line
//! summary on success.

use anyhow::Context;
use lexops_workflow::{BotVersion, ImportRequest, LexOps};

use crate::cli::BotArgs;

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

pub async fn cmd_export(ops: &LexOps, target: &BotArgs, version: BotVersion) -> anyhow::Result<()> {
    let coords = target.coordinates()?;
    let report = ops
        .export(&coords, version)
        .await
        .context("failed to export bot")?;
    println!(
        "exported {} ({} files) into {}",
        coords.deployed_name(),
        report.files,
        report.bot_dir.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

pub async fn cmd_import(
    ops: &LexOps,
    target: &BotArgs,
    source_version: BotVersion,
    alias: Option<String>,
    keep_old_versions: bool,
) -> anyhow::Result<()> {
    let mut request = ImportRequest::new(target.coordinates()?)
        .with_source_version(source_version)
        .with_eviction(!keep_old_versions);
    if let Some(alias) = alias {
        request = request.with_alias(alias);
    }

    let report = ops.import(&request).await.context("failed to import bot")?;

    let mut summary = format!(
        "imported {} as version {}",
        request.coords.deployed_name(),
        report.new_version
    );
    if let (true, Some(alias)) = (report.alias_repointed, request.alias.as_deref()) {
        summary.push_str(&format!(", alias {} updated", request.coords.alias_name(alias)));
    }
    if let Some(evicted) = report.evicted_version {
        summary.push_str(&format!(", version {evicted} deleted"));
    }
    println!("{summary}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Create / delete
// ---------------------------------------------------------------------------

pub async fn cmd_create(
    ops: &LexOps,
    target: &BotArgs,
    role: &str,
    alias: Option<&str>,
) -> anyhow::Result<()> {
    let coords = target.coordinates()?;
    let report = ops
        .create(&coords, role, alias)
        .await
        .context("failed to create bot")?;
    match (&report.alias_id, alias) {
        (Some(alias_id), Some(alias)) => println!(
            "created {} ({}) with alias {} ({alias_id})",
            report.deployed_name,
            report.bot_id,
            coords.alias_name(alias)
        ),
        _ => println!("created {} ({})", report.deployed_name, report.bot_id),
    }
    Ok(())
}

pub async fn cmd_delete(ops: &LexOps, target: &BotArgs) -> anyhow::Result<()> {
    let coords = target.coordinates()?;
    let bot_id = ops.delete(&coords).await.context("failed to delete bot")?;
    println!("deleted {} ({bot_id})", coords.deployed_name());
    Ok(())
}

// ---------------------------------------------------------------------------
// Prune
// ---------------------------------------------------------------------------

pub async fn cmd_prune(ops: &LexOps, target: &BotArgs, alias: &str) -> anyhow::Result<()> {
    let coords = target.coordinates()?;
    let evicted = ops
        .prune(&coords, alias)
        .await
        .context("failed to prune bot")?;
    match evicted {
        Some(version) => println!("deleted version {version} of {}", coords.deployed_name()),
        None => println!("{} is below the version ceiling", coords.deployed_name()),
    }
    Ok(())
}
