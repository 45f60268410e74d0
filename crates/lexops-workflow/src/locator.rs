//! Bot and alias lookup.
//!
//! Freshly created or imported resources can take a while to show up in
//! list calls, so every lookup retries until the service returns a non-empty
//! page.

use std::future::Future;

use lexops_service::{LexModels, Page};
use tracing::{debug, info, warn};

use crate::config::LookupPolicy;
use crate::error::{Result, WorkflowError};
use crate::naming::{BotCoordinates, BotVersion};
use crate::ops::LexOps;

/// A bot found in the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBot {
    pub bot_id: String,
    pub deployed_name: String,
    /// Highest numbered version, or `DRAFT` if none was created yet.
    pub latest_version: BotVersion,
}

/// Call `fetch` until it returns a non-empty page.
///
/// An empty page with a continuation token is followed straight away; an
/// empty final page restarts the listing after `policy.retry_delay`.
/// Returns `None` once `policy.max_attempts` calls came back empty.
pub async fn fetch_until_nonempty<T, F, Fut>(
    what: &str,
    policy: &LookupPolicy,
    mut fetch: F,
) -> Result<Option<Page<T>>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = lexops_service::Result<Page<T>>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut next_token = None;
    for attempt in 1..=max_attempts {
        let page = fetch(next_token.take()).await?;
        if !page.is_empty() {
            debug!(what, attempt, items = page.items.len(), "lookup returned results");
            return Ok(Some(page));
        }
        next_token = page.next_token;
        if next_token.is_none() && attempt < max_attempts {
            debug!(what, attempt, max_attempts, "lookup returned nothing, retrying");
            tokio::time::sleep(policy.retry_delay()).await;
        }
    }
    Ok(None)
}

impl LexOps {
    /// Find the deployed bot for `coords`.
    pub async fn resolve(&self, coords: &BotCoordinates) -> Result<ResolvedBot> {
        let deployed = coords.deployed_name();
        let lex: &dyn LexModels = self.services.lex.as_ref();
        let name: &str = &deployed;
        let policy = &self.config.lookup;

        let page = fetch_until_nonempty("bot", policy, move |token| lex.list_bots(name, token))
            .await?
            .ok_or_else(|| WorkflowError::BotNotFound {
                name: deployed.clone(),
                attempts: policy.max_attempts,
            })?;

        let summary = page
            .items
            .into_iter()
            .find(|b| b.bot_name == deployed)
            .ok_or_else(|| WorkflowError::BotNotFound {
                name: deployed.clone(),
                attempts: policy.max_attempts,
            })?;

        let latest_version = match summary.latest_version.as_deref() {
            Some(v) => v.parse()?,
            None => BotVersion::Draft,
        };
        info!(bot = %deployed, bot_id = %summary.bot_id, %latest_version, "resolved bot");
        Ok(ResolvedBot {
            bot_id: summary.bot_id,
            deployed_name: deployed,
            latest_version,
        })
    }

    /// Id of the alias named `alias_name`, `None` if the bot has no such
    /// alias.
    pub async fn alias_id(&self, bot_id: &str, alias_name: &str) -> Result<Option<String>> {
        let lex: &dyn LexModels = self.services.lex.as_ref();
        let first = fetch_until_nonempty("alias", &self.config.lookup, move |token| {
            lex.list_bot_aliases(bot_id, token)
        })
        .await?;

        let Some(mut page) = first else {
            warn!(bot_id, alias = alias_name, "bot has no aliases");
            return Ok(None);
        };
        loop {
            if let Some(alias) = page.items.iter().find(|a| a.alias_name == alias_name) {
                info!(bot_id, alias = alias_name, alias_id = %alias.alias_id, "resolved alias");
                return Ok(Some(alias.alias_id.clone()));
            }
            let Some(token) = page.next_token.take() else {
                break;
            };
            page = lex.list_bot_aliases(bot_id, Some(token)).await?;
        }

        warn!(bot_id, alias = alias_name, "alias not found");
        Ok(None)
    }
}
