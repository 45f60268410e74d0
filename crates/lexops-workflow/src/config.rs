//! Workflow configuration.
//!
//! Mirrors the `[lex]` section of `config/default.toml`.  Every field has a
//! default, so an empty or missing section yields a working configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::waiter::{WaitKind, WaitPolicy};

/// Settings shared by every bot lifecycle operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Directory holding `Manifest.json` and one directory per bot.
    pub root_dir: PathBuf,
    /// Locale built, versioned and enabled on aliases.
    pub locale_id: String,
    /// Number of live versions at which the oldest one is evicted.
    pub version_ceiling: u32,
    /// Idle session TTL given to newly created bots.
    pub idle_session_ttl_secs: i32,
    pub lookup: LookupPolicy,
    pub waiters: WaiterConfig,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from(lexops_bundle::DEFAULT_ROOT_DIR),
            locale_id: "en_GB".to_string(),
            version_ceiling: 25,
            idle_session_ttl_secs: 300,
            lookup: LookupPolicy::default(),
            waiters: WaiterConfig::default(),
        }
    }
}

/// Retry-until-nonempty behaviour of list lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupPolicy {
    pub max_attempts: u32,
    /// Pause after an empty page, in milliseconds.
    pub retry_delay_ms: u64,
}

impl Default for LookupPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            retry_delay_ms: 1000,
        }
    }
}

impl LookupPolicy {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

/// One [`WaitPolicy`] per waiter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaiterConfig {
    pub export: WaitPolicy,
    pub import: WaitPolicy,
    pub locale_build: WaitPolicy,
    pub version: WaitPolicy,
    pub bot: WaitPolicy,
}

impl WaiterConfig {
    pub fn policy(&self, kind: WaitKind) -> &WaitPolicy {
        match kind {
            WaitKind::ExportCompleted => &self.export,
            WaitKind::ImportCompleted => &self.import,
            WaitKind::LocaleBuilt => &self.locale_build,
            WaitKind::VersionAvailable => &self.version,
            WaitKind::BotAvailable => &self.bot,
        }
    }

    /// Every waiter polling with `policy`.
    pub fn uniform(policy: WaitPolicy) -> Self {
        Self {
            export: policy,
            import: policy,
            locale_build: policy,
            version: policy,
            bot: policy,
        }
    }
}
