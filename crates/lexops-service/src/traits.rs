//! Service traits and the [`Services`] bundle.
//!
//! The workflow only ever talks to the managed services through these
//! traits.  Production code plugs in the AWS implementations from
//! [`crate::lex`], [`crate::stacks`], [`crate::roles`] and
//! [`crate::transfer`]; tests plug in in-memory fakes.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    BotAliasSummary, BotDescription, BotStatus, BotSummary, BotVersionSummary,
    ExportDescription, ImportDescription, ImportSpec, LocaleDescription, NewBot, Page,
    UploadTarget,
};

// ---------------------------------------------------------------------------
// Lex V2 model building
// ---------------------------------------------------------------------------

/// The subset of the Lex V2 model-building API used by lexops.
///
/// Version arguments are the wire form (`"DRAFT"` or a decimal number).
#[async_trait]
pub trait LexModels: Send + Sync {
    /// List bots whose name equals `name`, sorted by name ascending.
    async fn list_bots(&self, name: &str, next_token: Option<String>) -> Result<Page<BotSummary>>;

    /// List versions of a bot, sorted by version ascending.
    async fn list_bot_versions(
        &self,
        bot_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<BotVersionSummary>>;

    /// List aliases of a bot.
    async fn list_bot_aliases(
        &self,
        bot_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<BotAliasSummary>>;

    async fn describe_bot(&self, bot_id: &str) -> Result<BotDescription>;

    /// Create a bot and return its id.
    async fn create_bot(&self, bot: &NewBot) -> Result<String>;

    async fn delete_bot(&self, bot_id: &str, skip_resource_in_use_check: bool) -> Result<()>;

    /// Create an alias and return its id.
    async fn create_bot_alias(
        &self,
        bot_id: &str,
        alias_name: &str,
        description: &str,
    ) -> Result<String>;

    /// Point an existing alias at `version`, keeping every other alias
    /// setting.  `locale_id` is enabled when the alias has no locale
    /// settings of its own.
    async fn repoint_alias(
        &self,
        bot_id: &str,
        alias_id: &str,
        version: &str,
        locale_id: &str,
    ) -> Result<()>;

    /// Start a `LexJson` export and return the export id.
    async fn create_export(&self, bot_id: &str, version: &str) -> Result<String>;

    async fn describe_export(&self, export_id: &str) -> Result<ExportDescription>;

    async fn delete_export(&self, export_id: &str) -> Result<()>;

    async fn create_upload_url(&self) -> Result<UploadTarget>;

    /// Start an overwriting bot import of a previously uploaded archive.
    async fn start_import(&self, import_id: &str, spec: &ImportSpec) -> Result<String>;

    async fn describe_import(&self, import_id: &str) -> Result<ImportDescription>;

    async fn delete_import(&self, import_id: &str) -> Result<()>;

    async fn build_bot_locale(&self, bot_id: &str, version: &str, locale_id: &str) -> Result<()>;

    async fn describe_bot_locale(
        &self,
        bot_id: &str,
        version: &str,
        locale_id: &str,
    ) -> Result<LocaleDescription>;

    /// Snapshot `source_version` of `locale_id` into a new numbered version
    /// and return its number.
    async fn create_bot_version(
        &self,
        bot_id: &str,
        source_version: &str,
        locale_id: &str,
    ) -> Result<String>;

    async fn describe_bot_version(&self, bot_id: &str, version: &str) -> Result<BotStatus>;

    async fn delete_bot_version(
        &self,
        bot_id: &str,
        version: &str,
        skip_resource_in_use_check: bool,
    ) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

/// Read access to deployed stack outputs.
#[async_trait]
pub trait StackOutputs: Send + Sync {
    /// Value of output `key` on stack `stack_name`, `None` if the stack has
    /// no such output.  A stack that does not exist is
    /// [`ServiceError::NotFound`](crate::ServiceError::NotFound).
    async fn stack_output(&self, stack_name: &str, key: &str) -> Result<Option<String>>;
}

/// Resolves IAM role names to ARNs.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    async fn role_arn(&self, role_name: &str) -> Result<String>;
}

/// Moves archives to and from presigned URLs.
#[async_trait]
pub trait ArtifactTransfer: Send + Sync {
    async fn download(&self, url: &str) -> Result<Vec<u8>>;

    async fn upload(&self, url: &str, body: Vec<u8>) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Bundle
// ---------------------------------------------------------------------------

/// One handle per service seam, shared by every workflow operation.
#[derive(Clone)]
pub struct Services {
    pub lex: Arc<dyn LexModels>,
    pub stacks: Arc<dyn StackOutputs>,
    pub roles: Arc<dyn RoleDirectory>,
    pub transfer: Arc<dyn ArtifactTransfer>,
}

impl Services {
    pub fn new(
        lex: Arc<dyn LexModels>,
        stacks: Arc<dyn StackOutputs>,
        roles: Arc<dyn RoleDirectory>,
        transfer: Arc<dyn ArtifactTransfer>,
    ) -> Self {
        Self {
            lex,
            stacks,
            roles,
            transfer,
        }
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}
