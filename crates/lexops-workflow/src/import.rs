//! Import a local definition and promote it to a new bot version.
//!
//! ```text
//! resolve ─► package ─► upload ─► start import ─► wait import
//!   ─► build locale ─► wait build ─► [evict oldest] ─► create version
//!   ─► wait version ─► re-point alias
//! ```

use lexops_service::ImportSpec;
use tracing::{info, warn};

use crate::error::Result;
use crate::naming::{BotCoordinates, BotVersion};
use crate::ops::LexOps;
use crate::versions::MissingStack;

/// Parameters of one import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRequest {
    pub coords: BotCoordinates,
    /// Version whose locale is built and snapshotted, normally `DRAFT`.
    pub source_version: BotVersion,
    /// Short alias name; re-pointed to the new version when present.
    pub alias: Option<String>,
    /// Evict the oldest version first when the ceiling is reached.
    pub evict_old_versions: bool,
}

impl ImportRequest {
    /// Import into `DRAFT` without an alias, evicting old versions.
    pub fn new(coords: BotCoordinates) -> Self {
        Self {
            coords,
            source_version: BotVersion::Draft,
            alias: None,
            evict_old_versions: true,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_source_version(mut self, version: BotVersion) -> Self {
        self.source_version = version;
        self
    }

    pub fn with_eviction(mut self, evict: bool) -> Self {
        self.evict_old_versions = evict;
        self
    }
}

/// What an import produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub bot_id: String,
    pub import_id: String,
    pub new_version: u32,
    pub alias_repointed: bool,
    pub evicted_version: Option<u32>,
}

impl LexOps {
    pub async fn import(&self, request: &ImportRequest) -> Result<ImportReport> {
        self.run_import(request).await.inspect_err(|e| {
            warn!(operation = "import", bot = %request.coords, error = %e, "operation failed")
        })
    }

    async fn run_import(&self, request: &ImportRequest) -> Result<ImportReport> {
        let lex = &self.services.lex;
        let coords = &request.coords;
        let locale_id = &self.config.locale_id;

        let bot = self.resolve(coords).await?;
        let alias_id = match request.alias.as_deref() {
            Some(alias) => self.alias_id(&bot.bot_id, &coords.alias_name(alias)).await?,
            None => None,
        };

        // Upload the packaged definition.
        let packaged = self.workspace.package(coords.bot_name(), &bot.deployed_name)?;
        let target = lex.create_upload_url().await?;
        self.services
            .transfer
            .upload(&target.upload_url, packaged.bytes)
            .await?;
        info!(
            bot_id = %bot.bot_id,
            import_id = %target.import_id,
            entries = packaged.entries.len(),
            "bot archive uploaded"
        );

        // Overwrite the bot with the uploaded archive.
        let description = lex.describe_bot(&bot.bot_id).await?;
        let import_id = lex
            .start_import(&target.import_id, &ImportSpec::from(&description))
            .await?;
        self.waiters.import_completed(&import_id).await?;
        let import = lex.describe_import(&import_id).await?;
        info!(%import_id, status = %import.status, "import finished");
        lex.delete_import(&import_id).await?;

        // Build the imported locale.
        let source = request.source_version.to_string();
        lex.build_bot_locale(&bot.bot_id, &source, locale_id).await?;
        self.waiters
            .locale_built(&bot.bot_id, &source, locale_id)
            .await?;

        let evicted_version = match request.alias.as_deref() {
            Some(alias) if request.evict_old_versions => {
                self.evict_oldest(&bot, coords, alias, MissingStack::Ignore)
                    .await?
            }
            _ => None,
        };

        let new_version = self
            .create_version(&bot.bot_id, request.source_version)
            .await?;

        let alias_repointed = match (&alias_id, request.alias.as_deref()) {
            (Some(alias_id), _) => {
                lex.repoint_alias(&bot.bot_id, alias_id, &new_version.to_string(), locale_id)
                    .await?;
                info!(bot_id = %bot.bot_id, %alias_id, new_version, "alias re-pointed");
                true
            }
            (None, Some(alias)) => {
                warn!(
                    bot_id = %bot.bot_id,
                    alias = %coords.alias_name(alias),
                    new_version,
                    "alias not found, new version is not associated with it"
                );
                false
            }
            (None, None) => false,
        };

        Ok(ImportReport {
            bot_id: bot.bot_id,
            import_id,
            new_version,
            alias_repointed,
            evicted_version,
        })
    }
}
