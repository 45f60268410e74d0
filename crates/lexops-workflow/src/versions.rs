//! Numbered bot versions: creation and oldest-first eviction.
//!
//! Lex caps the number of versions a bot may keep.  Before a new version is
//! cut, the oldest one is evicted once the live range `oldest..=latest`
//! reaches the configured ceiling.  The version pinned by the environment's
//! alias stack is never evicted.

use lexops_service::LexModels;
use tracing::{info, warn};

use crate::error::{Result, WorkflowError};
use crate::locator::{ResolvedBot, fetch_until_nonempty};
use crate::naming::{BotCoordinates, BotVersion};
use crate::ops::LexOps;

/// Stack output naming the version an alias stack has deployed.
pub const VERSION_OUTPUT_KEY: &str = "BotVersion";

/// How eviction treats an alias stack that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingStack {
    /// Fail the operation.
    Fail,
    /// Log a warning and protect nothing.
    Ignore,
}

/// The version to evict, if any.
///
/// `oldest` is the lowest of `versions` other than `protected`; it is evicted
/// when `latest - oldest + 1` has reached `ceiling`.
pub fn select_eviction(
    versions: &[u32],
    latest: u32,
    protected: Option<u32>,
    ceiling: u32,
) -> Option<u32> {
    let oldest = versions
        .iter()
        .copied()
        .filter(|v| Some(*v) != protected)
        .min()?;
    if oldest > latest {
        return None;
    }
    let active = latest - oldest + 1;
    (active >= ceiling).then_some(oldest)
}

impl LexOps {
    /// Numbered versions of a bot, ascending.  `DRAFT` is left out.
    pub async fn list_versions(&self, bot_id: &str) -> Result<Vec<u32>> {
        let lex: &dyn LexModels = self.services.lex.as_ref();
        let Some(mut page) = fetch_until_nonempty("version", &self.config.lookup, move |token| {
            lex.list_bot_versions(bot_id, token)
        })
        .await?
        else {
            return Ok(Vec::new());
        };

        let mut versions = Vec::new();
        loop {
            for summary in &page.items {
                if let BotVersion::Numbered(n) = summary.version.parse::<BotVersion>()? {
                    versions.push(n);
                }
            }
            let Some(token) = page.next_token.take() else {
                break;
            };
            page = lex.list_bot_versions(bot_id, Some(token)).await?;
        }
        versions.sort_unstable();
        Ok(versions)
    }

    /// Version deployed by the stack `stack_name`, if it reports one.
    async fn protected_version(
        &self,
        stack_name: &str,
        missing: MissingStack,
    ) -> Result<Option<u32>> {
        let output = match self
            .services
            .stacks
            .stack_output(stack_name, VERSION_OUTPUT_KEY)
            .await
        {
            Ok(output) => output,
            Err(e) if e.is_not_found() && missing == MissingStack::Ignore => {
                warn!(stack = stack_name, error = %e, "alias stack not found, no version protected");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        match output {
            Some(value) => Ok(value.parse::<BotVersion>()?.number()),
            None => {
                warn!(stack = stack_name, key = VERSION_OUTPUT_KEY, "stack has no version output");
                Ok(None)
            }
        }
    }

    /// Snapshot `source` of the configured locale into a new version and
    /// wait until it is available.
    pub async fn create_version(&self, bot_id: &str, source: BotVersion) -> Result<u32> {
        let locale_id = &self.config.locale_id;
        let raw = self
            .services
            .lex
            .create_bot_version(bot_id, &source.to_string(), locale_id)
            .await?;
        let version = match raw.parse::<BotVersion>()? {
            BotVersion::Numbered(n) => n,
            BotVersion::Draft => return Err(WorkflowError::InvalidVersion(raw)),
        };
        info!(bot_id, %source, version, "bot version created");

        self.waiters
            .version_available(bot_id, &version.to_string())
            .await?;
        Ok(version)
    }

    /// Evict the oldest version of `bot` if the live range has reached the
    /// ceiling.  Returns the evicted version.
    ///
    /// Deployments without a ticket protect the version deployed by the
    /// `{environment}-{alias}` stack.  The stack is only read once the
    /// ceiling has been reached; `missing` decides what a missing stack
    /// means.
    pub async fn evict_oldest(
        &self,
        bot: &ResolvedBot,
        coords: &BotCoordinates,
        alias: &str,
        missing: MissingStack,
    ) -> Result<Option<u32>> {
        let versions = self.list_versions(&bot.bot_id).await?;
        let Some(latest) = bot
            .latest_version
            .number()
            .or_else(|| versions.last().copied())
        else {
            info!(bot_id = %bot.bot_id, "bot has no numbered versions");
            return Ok(None);
        };

        let ceiling = self.config.version_ceiling;
        if select_eviction(&versions, latest, None, ceiling).is_none() {
            info!(bot_id = %bot.bot_id, latest, ceiling, "version count below ceiling");
            return Ok(None);
        }

        let protected = match coords.ticket() {
            None => {
                self.protected_version(&coords.alias_name(alias), missing)
                    .await?
            }
            Some(_) => None,
        };

        let Some(oldest) = select_eviction(&versions, latest, protected, ceiling) else {
            info!(
                bot_id = %bot.bot_id,
                latest,
                ?protected,
                ceiling,
                "only the protected version is old enough to evict"
            );
            return Ok(None);
        };

        self.services
            .lex
            .delete_bot_version(&bot.bot_id, &oldest.to_string(), false)
            .await?;
        info!(bot_id = %bot.bot_id, version = oldest, latest, ?protected, "evicted oldest version");
        Ok(Some(oldest))
    }

    /// Resolve the bot and evict its oldest version if needed.  A missing
    /// alias stack is an error here.
    pub async fn prune(&self, coords: &BotCoordinates, alias: &str) -> Result<Option<u32>> {
        async {
            let bot = self.resolve(coords).await?;
            self.evict_oldest(&bot, coords, alias, MissingStack::Fail)
                .await
        }
        .await
        .inspect_err(|e| warn!(operation = "prune", bot = %coords, error = %e, "operation failed"))
    }
}
