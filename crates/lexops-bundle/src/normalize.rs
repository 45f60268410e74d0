//! JSON normalisation of exported definitions.
//!
//! Exports come back from the service as minified JSON with the deployed
//! (prefixed) bot name.  Before they are committed, every file is rewritten
//! with sorted keys and four-space indentation so diffs stay stable between
//! exports, and `Bot.json` gets the short bot name back.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{BundleError, Result};
use crate::workspace::{BOT_FILE, BotWorkspace};

/// Outcome of a normalisation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    /// Files rewritten.
    pub formatted: usize,
    /// Files left untouched because they did not parse.
    pub skipped: Vec<PathBuf>,
}

/// Recursively rebuild every object with its keys in ascending order.
pub fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = Map::new();
            for (key, value) in entries {
                sorted.insert(key, sort_keys(value));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// Serialise `value` with four-space indentation.
pub fn to_pretty_bytes(value: &Value) -> std::result::Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}

/// Replace the top-level `name` of a bot definition.
pub(crate) fn rename_bot(value: &mut Value, name: &str, path: &Path) -> Result<()> {
    let object = value
        .as_object_mut()
        .ok_or_else(|| BundleError::NotAnObject(path.to_path_buf()))?;
    object.insert("name".to_string(), Value::String(name.to_string()));
    Ok(())
}

impl BotWorkspace {
    /// Normalise every `*.json` file of the bot named `bot_name`.
    pub fn normalize(&self, bot_name: &str) -> Result<NormalizeReport> {
        let dir = self.bot_dir(bot_name)?;
        if !dir.is_dir() {
            return Err(BundleError::MissingDefinition(dir));
        }

        let mut report = NormalizeReport::default();
        for entry in WalkDir::new(&dir).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some("json")
            {
                continue;
            }

            let raw = std::fs::read_to_string(path).map_err(BundleError::io(path))?;
            let mut value: Value = match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unparseable JSON file");
                    report.skipped.push(path.to_path_buf());
                    continue;
                }
            };

            if entry.file_name() == BOT_FILE {
                rename_bot(&mut value, bot_name, path)?;
            }

            let formatted = to_pretty_bytes(&sort_keys(value)).map_err(BundleError::json(path))?;
            std::fs::write(path, formatted).map_err(BundleError::io(path))?;
            debug!(path = %path.display(), "formatted JSON file");
            report.formatted += 1;
        }

        Ok(report)
    }
}
