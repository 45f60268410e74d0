//! On-disk layout of exported bot definitions.
//!
//! ```text
//! <root>/
//! ├── Manifest.json
//! └── <bot_name>/
//!     ├── Bot.json
//!     └── BotLocales/...
//! ```
//!
//! Bots are stored under their short name; the environment/ticket prefixed
//! name they carry inside the service only ever appears in archives.

use std::path::{Component, Path, PathBuf};

use tracing::info;

use crate::error::{BundleError, Result};

/// File name of the archive-level manifest.
pub const MANIFEST_FILE: &str = "Manifest.json";

/// File name of the bot-level definition whose `name` is rewritten.
pub const BOT_FILE: &str = "Bot.json";

/// Default root directory for bot definitions.
pub const DEFAULT_ROOT_DIR: &str = "lex_bots";

/// A directory holding one manifest and any number of bot definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotWorkspace {
    root: PathBuf,
}

impl BotWorkspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    /// Directory of the bot named `bot_name`.
    ///
    /// Rejects names that would resolve outside the workspace root.
    pub fn bot_dir(&self, bot_name: &str) -> Result<PathBuf> {
        let mut components = Path::new(bot_name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.root.join(bot_name)),
            _ => Err(BundleError::InvalidName(bot_name.to_string())),
        }
    }

    /// Whether a definition for `bot_name` exists locally.
    pub fn has_definition(&self, bot_name: &str) -> bool {
        self.bot_dir(bot_name).map(|d| d.is_dir()).unwrap_or(false)
    }

    /// Remove the local definition of `bot_name`.
    ///
    /// Returns `false` when there was nothing to remove.
    pub fn remove_definition(&self, bot_name: &str) -> Result<bool> {
        let dir = self.bot_dir(bot_name)?;
        if !dir.exists() {
            return Ok(false);
        }
        std::fs::remove_dir_all(&dir).map_err(BundleError::io(&dir))?;
        info!(path = %dir.display(), "removed existing bot definition");
        Ok(true)
    }

    /// Create the workspace root if it does not exist.
    pub fn ensure_root(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root).map_err(BundleError::io(&self.root))
    }
}

impl Default for BotWorkspace {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT_DIR)
    }
}
