//! Polling waiters for asynchronous Lex operations.
//!
//! A waiter polls immediately, then sleeps its policy's delay between polls
//! until the probe reports a success or failure state or the attempts run
//! out.  Each [`WaitKind`] has its own acceptors, see the `classify_*`
//! functions.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use lexops_service::{BotStatus, JobStatus, LexModels, LocaleStatus, ServiceError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::WaiterConfig;
use crate::error::{Result, WorkflowError};

const DEFAULT_DELAY_SECS: u64 = 20;
const DEFAULT_MAX_ATTEMPTS: u32 = 15;

/// What a waiter is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaitKind {
    ExportCompleted,
    ImportCompleted,
    LocaleBuilt,
    VersionAvailable,
    BotAvailable,
}

impl std::fmt::Display for WaitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::ExportCompleted => "export completion",
            Self::ImportCompleted => "import completion",
            Self::LocaleBuilt => "locale build",
            Self::VersionAvailable => "version availability",
            Self::BotAvailable => "bot availability",
        };
        f.write_str(s)
    }
}

/// Poll cadence of one waiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitPolicy {
    /// Seconds between polls.
    pub delay_secs: u64,
    /// Polls before giving up, including the first.
    pub max_attempts: u32,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            delay_secs: DEFAULT_DELAY_SECS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl WaitPolicy {
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }
}

/// Outcome of a single poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Poll {
    Ready,
    Pending { state: String },
    Failed { state: String, reasons: Vec<String> },
}

/// Poll `probe` until it is ready, failed, or `policy` is exhausted.
pub async fn wait_until<F, Fut>(
    kind: WaitKind,
    resource: &str,
    policy: &WaitPolicy,
    mut probe: F,
) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Poll>>,
{
    let max_attempts = policy.max_attempts.max(1);
    for attempt in 1..=max_attempts {
        match probe().await? {
            Poll::Ready => {
                info!(%kind, resource, attempt, "wait finished");
                return Ok(());
            }
            Poll::Failed { state, reasons } => {
                return Err(WorkflowError::WaitFailed {
                    kind,
                    resource: resource.to_string(),
                    state,
                    reasons,
                });
            }
            Poll::Pending { state } => {
                debug!(%kind, resource, attempt, max_attempts, state = %state, "still waiting");
                if attempt < max_attempts {
                    tokio::time::sleep(policy.delay()).await;
                }
            }
        }
    }

    Err(WorkflowError::WaitTimedOut {
        kind,
        resource: resource.to_string(),
        attempts: max_attempts,
    })
}

// ---------------------------------------------------------------------------
// Acceptors
// ---------------------------------------------------------------------------

/// Export and import jobs.
pub fn classify_job(status: &JobStatus, reasons: &[String]) -> Poll {
    match status {
        JobStatus::Completed => Poll::Ready,
        JobStatus::Failed | JobStatus::Deleting => Poll::Failed {
            state: status.to_string(),
            reasons: reasons.to_vec(),
        },
        other => Poll::Pending {
            state: other.to_string(),
        },
    }
}

/// Locale builds.
pub fn classify_locale(status: &LocaleStatus, reasons: &[String]) -> Poll {
    match status {
        LocaleStatus::Built => Poll::Ready,
        LocaleStatus::Failed | LocaleStatus::Deleting | LocaleStatus::NotBuilt => Poll::Failed {
            state: status.to_string(),
            reasons: reasons.to_vec(),
        },
        other => Poll::Pending {
            state: other.to_string(),
        },
    }
}

/// Bot versions.  A version that does not exist yet is still pending.
pub fn classify_version(status: std::result::Result<BotStatus, ServiceError>) -> Result<Poll> {
    match status {
        Ok(BotStatus::Available) => Ok(Poll::Ready),
        Ok(status @ (BotStatus::Failed | BotStatus::Deleting)) => Ok(Poll::Failed {
            state: status.to_string(),
            reasons: Vec::new(),
        }),
        Ok(other) => Ok(Poll::Pending {
            state: other.to_string(),
        }),
        Err(e) if e.is_not_found() => Ok(Poll::Pending {
            state: "NotFound".to_string(),
        }),
        Err(e) => Err(e.into()),
    }
}

/// Bots.
pub fn classify_bot(status: &BotStatus) -> Poll {
    match status {
        BotStatus::Available => Poll::Ready,
        BotStatus::Failed | BotStatus::Deleting | BotStatus::Inactive => Poll::Failed {
            state: status.to_string(),
            reasons: Vec::new(),
        },
        other => Poll::Pending {
            state: other.to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Waiters bound to the Lex API
// ---------------------------------------------------------------------------

/// The five Lex waiters, each with its own policy.
#[derive(Clone)]
pub struct Waiters {
    lex: Arc<dyn LexModels>,
    config: WaiterConfig,
}

impl Waiters {
    pub fn new(lex: Arc<dyn LexModels>, config: WaiterConfig) -> Self {
        Self { lex, config }
    }

    pub async fn export_completed(&self, export_id: &str) -> Result<()> {
        let lex = &self.lex;
        wait_until(
            WaitKind::ExportCompleted,
            export_id,
            &self.config.export,
            || async move {
                let export = lex.describe_export(export_id).await?;
                Ok(classify_job(&export.status, &export.failure_reasons))
            },
        )
        .await
    }

    pub async fn import_completed(&self, import_id: &str) -> Result<()> {
        let lex = &self.lex;
        wait_until(
            WaitKind::ImportCompleted,
            import_id,
            &self.config.import,
            || async move {
                let import = lex.describe_import(import_id).await?;
                Ok(classify_job(&import.status, &import.failure_reasons))
            },
        )
        .await
    }

    pub async fn locale_built(&self, bot_id: &str, version: &str, locale_id: &str) -> Result<()> {
        let lex = &self.lex;
        wait_until(
            WaitKind::LocaleBuilt,
            &format!("{bot_id}/{version}/{locale_id}"),
            &self.config.locale_build,
            || async move {
                let locale = lex.describe_bot_locale(bot_id, version, locale_id).await?;
                Ok(classify_locale(&locale.status, &locale.failure_reasons))
            },
        )
        .await
    }

    pub async fn version_available(&self, bot_id: &str, version: &str) -> Result<()> {
        let lex = &self.lex;
        wait_until(
            WaitKind::VersionAvailable,
            &format!("{bot_id}/{version}"),
            &self.config.version,
            || async move { classify_version(lex.describe_bot_version(bot_id, version).await) },
        )
        .await
    }

    pub async fn bot_available(&self, bot_id: &str) -> Result<()> {
        let lex = &self.lex;
        wait_until(
            WaitKind::BotAvailable,
            bot_id,
            &self.config.bot,
            || async move {
                let bot = lex.describe_bot(bot_id).await?;
                Ok(classify_bot(&bot.status))
            },
        )
        .await
    }
}

impl std::fmt::Debug for Waiters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Waiters")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
