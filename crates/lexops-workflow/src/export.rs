//! Export a deployed bot into the local workspace.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::error::{Result, WorkflowError};
use crate::naming::{BotCoordinates, BotVersion};
use crate::ops::LexOps;

/// What an export produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub bot_id: String,
    pub export_id: String,
    /// Directory the definition was written to.
    pub bot_dir: PathBuf,
    /// JSON files written.
    pub files: usize,
}

impl LexOps {
    /// Export `version` of the bot at `coords` into the workspace, replacing
    /// any local definition of the same bot.
    pub async fn export(&self, coords: &BotCoordinates, version: BotVersion) -> Result<ExportReport> {
        self.run_export(coords, version)
            .await
            .inspect_err(|e| warn!(operation = "export", bot = %coords, error = %e, "operation failed"))
    }

    async fn run_export(&self, coords: &BotCoordinates, version: BotVersion) -> Result<ExportReport> {
        let lex = &self.services.lex;
        let bot = self.resolve(coords).await?;

        let export_id = lex.create_export(&bot.bot_id, &version.to_string()).await?;
        info!(bot_id = %bot.bot_id, %export_id, %version, "export started");
        self.waiters.export_completed(&export_id).await?;

        let export = lex.describe_export(&export_id).await?;
        let url = export
            .download_url
            .ok_or_else(|| WorkflowError::MissingDownloadUrl {
                export_id: export_id.clone(),
            })?;
        let archive = self.services.transfer.download(&url).await?;
        info!(%export_id, size = archive.len(), "export archive downloaded");

        let installed =
            self.workspace
                .install_export(&archive, &bot.deployed_name, coords.bot_name())?;

        lex.delete_export(&export_id).await?;
        info!(
            bot = coords.bot_name(),
            %export_id,
            path = %installed.bot_dir.display(),
            "export finished"
        );

        Ok(ExportReport {
            bot_id: bot.bot_id,
            export_id,
            bot_dir: installed.bot_dir,
            files: installed.normalized.formatted,
        })
    }
}
