//! Layered settings for the `lexops` binary.
//!
//! Defaults, then the TOML file, then `LEXOPS_*` environment variables
//! (a `.env` file is honoured), then command-line flags.

use std::path::{Path, PathBuf};

use anyhow::Context;
use lexops_service::AwsSettings;
use lexops_workflow::WorkflowConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::GlobalArgs;

/// Environment variable overriding `lex.root_dir`.
pub const ROOT_DIR_ENV: &str = "LEXOPS_ROOT_DIR";
/// Environment variable overriding `lex.locale_id`.
pub const LOCALE_ENV: &str = "LEXOPS_LOCALE";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Top-level structure of `config/default.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
    pub log_format: LogFormat,
    pub lex: WorkflowConfig,
    pub aws: AwsSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
            lex: WorkflowConfig::default(),
            aws: AwsSettings::default(),
        }
    }
}

impl Settings {
    /// Resolve settings for one invocation.
    pub fn load(global: &GlobalArgs) -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let mut settings = Self::from_file(&global.config)?;
        settings.apply_env(|key| std::env::var(key).ok());
        settings.apply_overrides(global);
        Ok(settings)
    }

    /// Read `path`; a missing file yields the defaults.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(root) = lookup(ROOT_DIR_ENV).filter(|v| !v.is_empty()) {
            self.lex.root_dir = PathBuf::from(root);
        }
        if let Some(locale) = lookup(LOCALE_ENV).filter(|v| !v.is_empty()) {
            self.lex.locale_id = locale;
        }
    }

    pub fn apply_overrides(&mut self, global: &GlobalArgs) {
        if let Some(root) = &global.root {
            self.lex.root_dir = root.clone();
        }
        if let Some(region) = &global.region {
            self.aws.region = Some(region.clone());
        }
        if let Some(profile) = &global.profile {
            self.aws.profile = Some(profile.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn global(config: PathBuf) -> GlobalArgs {
        GlobalArgs {
            config,
            root: None,
            region: None,
            profile: None,
        }
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::from_file(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.lex.locale_id, "en_GB");
        assert_eq!(settings.lex.version_ceiling, 25);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexops.toml");
        std::fs::write(
            &path,
            r#"
log_format = "json"

[lex]
locale_id = "en_US"
version_ceiling = 10

[lex.waiters.import]
delay_secs = 5
max_attempts = 40

[aws]
region = "eu-west-2"
"#,
        )
        .unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.log_format, LogFormat::Json);
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.lex.locale_id, "en_US");
        assert_eq!(settings.lex.version_ceiling, 10);
        assert_eq!(settings.lex.waiters.import.delay_secs, 5);
        assert_eq!(settings.lex.waiters.import.max_attempts, 40);
        assert_eq!(settings.lex.waiters.export.delay_secs, 20);
        assert_eq!(settings.lex.lookup.max_attempts, 30);
        assert_eq!(settings.aws.region.as_deref(), Some("eu-west-2"));
        assert_eq!(settings.aws.transfer_timeout_secs, 300);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[lex\nlocale_id = ").unwrap();
        let err = Settings::from_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse"));
    }

    #[test]
    fn env_then_flags_override_file() {
        let env: HashMap<&str, &str> =
            HashMap::from([(ROOT_DIR_ENV, "/srv/bots"), (LOCALE_ENV, "en_US")]);
        let mut settings = Settings::default();
        settings.apply_env(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(settings.lex.root_dir, PathBuf::from("/srv/bots"));
        assert_eq!(settings.lex.locale_id, "en_US");

        let mut args = global(PathBuf::from("unused.toml"));
        args.root = Some(PathBuf::from("checkout/lex_bots"));
        args.region = Some("us-east-1".into());
        settings.apply_overrides(&args);
        assert_eq!(settings.lex.root_dir, PathBuf::from("checkout/lex_bots"));
        assert_eq!(settings.lex.locale_id, "en_US");
        assert_eq!(settings.aws.region.as_deref(), Some("us-east-1"));
        assert_eq!(settings.aws.profile, None);
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let mut settings = Settings::default();
        settings.apply_env(|_| Some(String::new()));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn bundled_default_config_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/default.toml");
        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.lex.root_dir, PathBuf::from("lex_bots"));
        assert_eq!(settings.lex.waiters.bot.max_attempts, 15);
    }
}
