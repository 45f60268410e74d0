//! In-memory Lex V2 model-building fake.
//!
//! Bots, versions and aliases live in a mutex-guarded state.  Asynchronous
//! job states are scripted per kind: each describe call pops the next
//! scripted state and, once the script runs dry, reports the terminal
//! success state.  Every call is recorded as a [`LexCall`].
//!
//! ```
//! use lexops_testing::FakeLex;
//! use lexops_service::JobStatus;
//!
//! let lex = FakeLex::new()
//!     .with_bot("BOT1", "dev-Support", Some("3"))
//!     .with_versions("BOT1", &["1", "2", "3"])
//!     .with_import_statuses([JobStatus::InProgress, JobStatus::Completed]);
//! assert!(lex.calls().is_empty());
//! ```

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use lexops_service::{
    BotAliasSummary, BotDescription, BotStatus, BotSummary, BotVersionSummary,
    ExportDescription, ImportDescription, ImportSpec, JobStatus, LexModels, LocaleDescription,
    LocaleStatus, NewBot, Page, Result, ServiceError, UploadTarget,
};

/// Default role ARN given to seeded bots.
pub const DEFAULT_ROLE_ARN: &str = "arn:aws:iam::123456789012:role/LexBotRole";

/// A recorded call against [`FakeLex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexCall {
    ListBots { name: String },
    ListBotVersions { bot_id: String },
    ListBotAliases { bot_id: String },
    DescribeBot { bot_id: String },
    CreateBot(NewBot),
    DeleteBot { bot_id: String, skip_check: bool },
    CreateBotAlias { bot_id: String, alias_name: String, description: String },
    RepointAlias { bot_id: String, alias_id: String, version: String, locale_id: String },
    CreateExport { bot_id: String, version: String },
    DescribeExport { export_id: String },
    DeleteExport { export_id: String },
    CreateUploadUrl,
    StartImport { import_id: String, spec: ImportSpec },
    DescribeImport { import_id: String },
    DeleteImport { import_id: String },
    BuildBotLocale { bot_id: String, version: String, locale_id: String },
    DescribeBotLocale { bot_id: String, version: String, locale_id: String },
    CreateBotVersion { bot_id: String, source_version: String, locale_id: String },
    DescribeBotVersion { bot_id: String, version: String },
    DeleteBotVersion { bot_id: String, version: String, skip_check: bool },
}

impl LexCall {
    /// Operation name, as used by [`FakeLex::with_failure`].
    pub fn operation(&self) -> &'static str {
        match self {
            Self::ListBots { .. } => "ListBots",
            Self::ListBotVersions { .. } => "ListBotVersions",
            Self::ListBotAliases { .. } => "ListBotAliases",
            Self::DescribeBot { .. } => "DescribeBot",
            Self::CreateBot(_) => "CreateBot",
            Self::DeleteBot { .. } => "DeleteBot",
            Self::CreateBotAlias { .. } => "CreateBotAlias",
            Self::RepointAlias { .. } => "UpdateBotAlias",
            Self::CreateExport { .. } => "CreateExport",
            Self::DescribeExport { .. } => "DescribeExport",
            Self::DeleteExport { .. } => "DeleteExport",
            Self::CreateUploadUrl => "CreateUploadUrl",
            Self::StartImport { .. } => "StartImport",
            Self::DescribeImport { .. } => "DescribeImport",
            Self::DeleteImport { .. } => "DeleteImport",
            Self::BuildBotLocale { .. } => "BuildBotLocale",
            Self::DescribeBotLocale { .. } => "DescribeBotLocale",
            Self::CreateBotVersion { .. } => "CreateBotVersion",
            Self::DescribeBotVersion { .. } => "DescribeBotVersion",
            Self::DeleteBotVersion { .. } => "DeleteBotVersion",
        }
    }
}

#[derive(Debug, Default)]
struct State {
    bots: BTreeMap<String, BotDescription>,
    latest: HashMap<String, Option<String>>,
    versions: HashMap<String, Vec<String>>,
    aliases: HashMap<String, Vec<BotAliasSummary>>,

    export_statuses: VecDeque<JobStatus>,
    import_statuses: VecDeque<JobStatus>,
    locale_statuses: VecDeque<LocaleStatus>,
    /// `None` answers `DescribeBotVersion` with not-found.
    version_statuses: VecDeque<Option<BotStatus>>,
    bot_statuses: VecDeque<BotStatus>,

    download_url: Option<String>,
    empty_pages: HashMap<&'static str, u32>,
    failures: HashMap<&'static str, String>,
    page_size: Option<usize>,
    counter: u32,
    calls: Vec<LexCall>,
}

impl State {
    fn next_id(&mut self, prefix: &str) -> String {
        self.counter += 1;
        format!("{prefix}{:06}", self.counter)
    }

    /// Record `call` and apply any injected failure.
    fn record(&mut self, call: LexCall) -> Result<()> {
        let operation = call.operation();
        tracing::debug!(operation, "fake lex call");
        self.calls.push(call);
        match self.failures.get(operation) {
            Some(reason) => Err(ServiceError::Api {
                operation,
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Whether this list call should answer with an empty page.
    fn take_empty(&mut self, operation: &'static str) -> bool {
        match self.empty_pages.get_mut(operation) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                true
            }
            _ => false,
        }
    }

    fn paginate<T: Clone>(&self, items: &[T], next_token: Option<String>) -> Page<T> {
        let start = next_token
            .and_then(|t| t.parse::<usize>().ok())
            .unwrap_or(0)
            .min(items.len());
        let size = self.page_size.unwrap_or(usize::MAX);
        let end = start.saturating_add(size).min(items.len());
        Page {
            items: items[start..end].to_vec(),
            next_token: (end < items.len()).then(|| end.to_string()),
        }
    }

    fn require_bot(&self, operation: &'static str, bot_id: &str) -> Result<&BotDescription> {
        self.bots.get(bot_id).ok_or_else(|| ServiceError::NotFound {
            operation,
            reason: format!("bot {bot_id} does not exist"),
        })
    }
}

/// In-memory [`LexModels`].
#[derive(Debug, Default)]
pub struct FakeLex {
    state: Mutex<State>,
}

impl FakeLex {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state(self, f: impl FnOnce(&mut State)) -> Self {
        f(&mut self.state.lock().unwrap());
        self
    }

    // -- Seeding -------------------------------------------------------------

    /// Seed a bot with the default role and a 300 second idle TTL.
    pub fn with_bot(self, bot_id: &str, name: &str, latest_version: Option<&str>) -> Self {
        self.with_state(|s| {
            s.bots.insert(
                bot_id.to_string(),
                BotDescription {
                    bot_id: bot_id.to_string(),
                    bot_name: name.to_string(),
                    role_arn: DEFAULT_ROLE_ARN.to_string(),
                    child_directed: false,
                    idle_session_ttl_secs: 300,
                    status: BotStatus::Available,
                },
            );
            s.latest
                .insert(bot_id.to_string(), latest_version.map(str::to_string));
        })
    }

    /// Seed the listed versions of a bot, in the order given.
    pub fn with_versions(self, bot_id: &str, versions: &[&str]) -> Self {
        self.with_state(|s| {
            s.versions.insert(
                bot_id.to_string(),
                versions.iter().map(|v| v.to_string()).collect(),
            );
        })
    }

    pub fn with_alias(self, bot_id: &str, alias_id: &str, alias_name: &str) -> Self {
        self.with_state(|s| {
            s.aliases
                .entry(bot_id.to_string())
                .or_default()
                .push(BotAliasSummary {
                    alias_id: alias_id.to_string(),
                    alias_name: alias_name.to_string(),
                });
        })
    }

    /// Answer the next `count` calls of a list operation with empty pages.
    pub fn with_empty_pages(self, operation: &'static str, count: u32) -> Self {
        self.with_state(|s| {
            s.empty_pages.insert(operation, count);
        })
    }

    /// Cap list pages at `size` items, chaining the rest with tokens.
    pub fn with_page_size(self, size: usize) -> Self {
        self.with_state(|s| s.page_size = Some(size))
    }

    /// Fail every call of `operation` with an API error.
    pub fn with_failure(self, operation: &'static str, reason: &str) -> Self {
        self.with_state(|s| {
            s.failures.insert(operation, reason.to_string());
        })
    }

    /// URL returned by `DescribeExport`.
    pub fn with_download_url(self, url: &str) -> Self {
        self.with_state(|s| s.download_url = Some(url.to_string()))
    }

    // -- Scripts -------------------------------------------------------------

    pub fn with_export_statuses(self, statuses: impl IntoIterator<Item = JobStatus>) -> Self {
        self.with_state(|s| s.export_statuses.extend(statuses))
    }

    pub fn with_import_statuses(self, statuses: impl IntoIterator<Item = JobStatus>) -> Self {
        self.with_state(|s| s.import_statuses.extend(statuses))
    }

    pub fn with_locale_statuses(self, statuses: impl IntoIterator<Item = LocaleStatus>) -> Self {
        self.with_state(|s| s.locale_statuses.extend(statuses))
    }

    /// `None` entries answer with resource-not-found.
    pub fn with_version_statuses(
        self,
        statuses: impl IntoIterator<Item = Option<BotStatus>>,
    ) -> Self {
        self.with_state(|s| s.version_statuses.extend(statuses))
    }

    pub fn with_bot_statuses(self, statuses: impl IntoIterator<Item = BotStatus>) -> Self {
        self.with_state(|s| s.bot_statuses.extend(statuses))
    }

    // -- Inspection ----------------------------------------------------------

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<LexCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Operation names of every call made so far, in order.
    pub fn operations(&self) -> Vec<&'static str> {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .map(LexCall::operation)
            .collect()
    }

    /// Current versions of a bot.
    pub fn versions(&self, bot_id: &str) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .versions
            .get(bot_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn has_bot(&self, bot_id: &str) -> bool {
        self.state.lock().unwrap().bots.contains_key(bot_id)
    }

    /// Ids of every bot whose name equals `name`.
    pub fn bot_ids_named(&self, name: &str) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .bots
            .values()
            .filter(|b| b.bot_name == name)
            .map(|b| b.bot_id.clone())
            .collect()
    }
}

#[async_trait]
impl LexModels for FakeLex {
    async fn list_bots(&self, name: &str, next_token: Option<String>) -> Result<Page<BotSummary>> {
        let mut s = self.state.lock().unwrap();
        s.record(LexCall::ListBots {
            name: name.to_string(),
        })?;
        if s.take_empty("ListBots") {
            return Ok(Page::empty(None));
        }
        let matching: Vec<BotSummary> = s
            .bots
            .values()
            .filter(|b| b.bot_name == name)
            .map(|b| BotSummary {
                bot_id: b.bot_id.clone(),
                bot_name: b.bot_name.clone(),
                latest_version: s.latest.get(&b.bot_id).cloned().flatten(),
            })
            .collect();
        Ok(s.paginate(&matching, next_token))
    }

    async fn list_bot_versions(
        &self,
        bot_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<BotVersionSummary>> {
        let mut s = self.state.lock().unwrap();
        s.record(LexCall::ListBotVersions {
            bot_id: bot_id.to_string(),
        })?;
        if s.take_empty("ListBotVersions") {
            return Ok(Page::empty(None));
        }
        let versions: Vec<BotVersionSummary> = s
            .versions
            .get(bot_id)
            .map(|vs| {
                vs.iter()
                    .map(|v| BotVersionSummary { version: v.clone() })
                    .collect()
            })
            .unwrap_or_default();
        Ok(s.paginate(&versions, next_token))
    }

    async fn list_bot_aliases(
        &self,
        bot_id: &str,
        next_token: Option<String>,
    ) -> Result<Page<BotAliasSummary>> {
        let mut s = self.state.lock().unwrap();
        s.record(LexCall::ListBotAliases {
            bot_id: bot_id.to_string(),
        })?;
        if s.take_empty("ListBotAliases") {
            return Ok(Page::empty(None));
        }
        let aliases = s.aliases.get(bot_id).cloned().unwrap_or_default();
        Ok(s.paginate(&aliases, next_token))
    }

    async fn describe_bot(&self, bot_id: &str) -> Result<BotDescription> {
        let mut s = self.state.lock().unwrap();
        s.record(LexCall::DescribeBot {
            bot_id: bot_id.to_string(),
        })?;
        let mut bot = s.require_bot("DescribeBot", bot_id)?.clone();
        if let Some(status) = s.bot_statuses.pop_front() {
            bot.status = status;
        }
        Ok(bot)
    }

    async fn create_bot(&self, bot: &NewBot) -> Result<String> {
        let mut s = self.state.lock().unwrap();
        s.record(LexCall::CreateBot(bot.clone()))?;
        let bot_id = s.next_id("BOT");
        s.bots.insert(
            bot_id.clone(),
            BotDescription {
                bot_id: bot_id.clone(),
                bot_name: bot.name.clone(),
                role_arn: bot.role_arn.clone(),
                child_directed: bot.child_directed,
                idle_session_ttl_secs: bot.idle_session_ttl_secs,
                status: BotStatus::Creating,
            },
        );
        s.latest.insert(bot_id.clone(), None);
        Ok(bot_id)
    }

    async fn delete_bot(&self, bot_id: &str, skip_resource_in_use_check: bool) -> Result<()> {
        let mut s = self.state.lock().unwrap();
        s.record(LexCall::DeleteBot {
            bot_id: bot_id.to_string(),
            skip_check: skip_resource_in_use_check,
        })?;
        s.require_bot("DeleteBot", bot_id)?;
        s.bots.remove(bot_id);
        s.versions.remove(bot_id);
        s.aliases.remove(bot_id);
        Ok(())
    }

    async fn create_bot_alias(
        &self,
        bot_id: &str,
        alias_name: &str,
        description: &str,
    ) -> Result<String> {
        let mut s = self.state.lock().unwrap();
        s.record(LexCall::CreateBotAlias {
            bot_id: bot_id.to_string(),
            alias_name: alias_name.to_string(),
            description: description.to_string(),
        })?;
        s.require_bot("CreateBotAlias", bot_id)?;
        let alias_id = s.next_id("ALIAS");
        s.aliases
            .entry(bot_id.to_string())
            .or_default()
            .push(BotAliasSummary {
                alias_id: alias_id.clone(),
                alias_name: alias_name.to_string(),
            });
        Ok(alias_id)
    }

    async fn repoint_alias(
        &self,
        bot_id: &str,
        alias_id: &str,
        version: &str,
        locale_id: &str,
    ) -> Result<()> {
        let mut s = self.state.lock().unwrap();
        s.record(LexCall::RepointAlias {
            bot_id: bot_id.to_string(),
            alias_id: alias_id.to_string(),
            version: version.to_string(),
            locale_id: locale_id.to_string(),
        })
    }

    async fn create_export(&self, bot_id: &str, version: &str) -> Result<String> {
        let mut s = self.state.lock().unwrap();
        s.record(LexCall::CreateExport {
            bot_id: bot_id.to_string(),
            version: version.to_string(),
        })?;
        s.require_bot("CreateExport", bot_id)?;
        Ok(s.next_id("EXPORT"))
    }

    async fn describe_export(&self, export_id: &str) -> Result<ExportDescription> {
        let mut s = self.state.lock().unwrap();
        s.record(LexCall::DescribeExport {
            export_id: export_id.to_string(),
        })?;
        let status = s.export_statuses.pop_front().unwrap_or(JobStatus::Completed);
        let download_url = match status {
            JobStatus::Completed => s.download_url.clone(),
            _ => None,
        };
        Ok(ExportDescription {
            export_id: export_id.to_string(),
            status,
            download_url,
            failure_reasons: Vec::new(),
        })
    }

    async fn delete_export(&self, export_id: &str) -> Result<()> {
        self.state.lock().unwrap().record(LexCall::DeleteExport {
            export_id: export_id.to_string(),
        })
    }

    async fn create_upload_url(&self) -> Result<UploadTarget> {
        let mut s = self.state.lock().unwrap();
        s.record(LexCall::CreateUploadUrl)?;
        let import_id = s.next_id("IMPORT");
        Ok(UploadTarget {
            upload_url: format!("https://uploads.example.com/{import_id}?X-Amz-Signature=abc"),
            import_id,
        })
    }

    async fn start_import(&self, import_id: &str, spec: &ImportSpec) -> Result<String> {
        let mut s = self.state.lock().unwrap();
        s.record(LexCall::StartImport {
            import_id: import_id.to_string(),
            spec: spec.clone(),
        })?;
        Ok(import_id.to_string())
    }

    async fn describe_import(&self, import_id: &str) -> Result<ImportDescription> {
        let mut s = self.state.lock().unwrap();
        s.record(LexCall::DescribeImport {
            import_id: import_id.to_string(),
        })?;
        let status = s.import_statuses.pop_front().unwrap_or(JobStatus::Completed);
        let failure_reasons = match status {
            JobStatus::Failed => vec!["invalid bot definition".to_string()],
            _ => Vec::new(),
        };
        Ok(ImportDescription {
            import_id: import_id.to_string(),
            status,
            failure_reasons,
        })
    }

    async fn delete_import(&self, import_id: &str) -> Result<()> {
        self.state.lock().unwrap().record(LexCall::DeleteImport {
            import_id: import_id.to_string(),
        })
    }

    async fn build_bot_locale(&self, bot_id: &str, version: &str, locale_id: &str) -> Result<()> {
        let mut s = self.state.lock().unwrap();
        s.record(LexCall::BuildBotLocale {
            bot_id: bot_id.to_string(),
            version: version.to_string(),
            locale_id: locale_id.to_string(),
        })?;
        s.require_bot("BuildBotLocale", bot_id).map(|_| ())
    }

    async fn describe_bot_locale(
        &self,
        bot_id: &str,
        version: &str,
        locale_id: &str,
    ) -> Result<LocaleDescription> {
        let mut s = self.state.lock().unwrap();
        s.record(LexCall::DescribeBotLocale {
            bot_id: bot_id.to_string(),
            version: version.to_string(),
            locale_id: locale_id.to_string(),
        })?;
        let status = s.locale_statuses.pop_front().unwrap_or(LocaleStatus::Built);
        let failure_reasons = match status {
            LocaleStatus::Failed => vec!["slot type missing".to_string()],
            _ => Vec::new(),
        };
        Ok(LocaleDescription {
            status,
            failure_reasons,
        })
    }

    async fn create_bot_version(
        &self,
        bot_id: &str,
        source_version: &str,
        locale_id: &str,
    ) -> Result<String> {
        let mut s = self.state.lock().unwrap();
        s.record(LexCall::CreateBotVersion {
            bot_id: bot_id.to_string(),
            source_version: source_version.to_string(),
            locale_id: locale_id.to_string(),
        })?;
        s.require_bot("CreateBotVersion", bot_id)?;
        let versions = s.versions.entry(bot_id.to_string()).or_default();
        let next = versions
            .iter()
            .filter_map(|v| v.parse::<u32>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        versions.push(next.to_string());
        s.latest.insert(bot_id.to_string(), Some(next.to_string()));
        Ok(next.to_string())
    }

    async fn describe_bot_version(&self, bot_id: &str, version: &str) -> Result<BotStatus> {
        let mut s = self.state.lock().unwrap();
        s.record(LexCall::DescribeBotVersion {
            bot_id: bot_id.to_string(),
            version: version.to_string(),
        })?;
        match s.version_statuses.pop_front() {
            Some(Some(status)) => Ok(status),
            Some(None) => Err(ServiceError::NotFound {
                operation: "DescribeBotVersion",
                reason: format!("version {version} of {bot_id} not found"),
            }),
            None => Ok(BotStatus::Available),
        }
    }

    async fn delete_bot_version(
        &self,
        bot_id: &str,
        version: &str,
        skip_resource_in_use_check: bool,
    ) -> Result<()> {
        let mut s = self.state.lock().unwrap();
        s.record(LexCall::DeleteBotVersion {
            bot_id: bot_id.to_string(),
            version: version.to_string(),
            skip_check: skip_resource_in_use_check,
        })?;
        if let Some(versions) = s.versions.get_mut(bot_id) {
            versions.retain(|v| v != version);
        }
        Ok(())
    }
}
