//! Zip archives in the Lex JSON import/export layout.
//!
//! An archive holds `Manifest.json` at its root and one directory named
//! after the deployed bot.  Archives are built and unpacked in memory; the
//! only disk writes are the extracted definition files.

use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{BundleError, Result};
use crate::normalize::{NormalizeReport, rename_bot, sort_keys};
use crate::workspace::{BOT_FILE, BotWorkspace, MANIFEST_FILE};

/// An in-memory archive ready for upload.
#[derive(Debug, Clone)]
pub struct PackagedBot {
    pub bytes: Vec<u8>,
    /// Archive entry names, in insertion order.
    pub entries: Vec<String>,
}

/// Outcome of unpacking an export into the workspace.
#[derive(Debug, Clone)]
pub struct InstallReport {
    /// Final location of the bot definition.
    pub bot_dir: PathBuf,
    /// Whether a previous local definition was replaced.
    pub replaced: bool,
    pub normalized: NormalizeReport,
}

fn file_options() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
}

/// Archive entry name for `path` relative to `base`, joined with `/`.
fn entry_name(prefix: &str, base: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    let mut name = prefix.to_string();
    for component in relative.components() {
        name.push('/');
        name.push_str(&component.as_os_str().to_string_lossy());
    }
    name
}

impl BotWorkspace {
    /// Package the local definition of `bot_name` for import as
    /// `deployed_name`.
    ///
    /// Every file under the bot directory is stored below a top-level
    /// `deployed_name/` folder, `Bot.json` carries `deployed_name` as its
    /// `name`, and the workspace manifest is stored at the archive root.
    /// Local files are left untouched.
    pub fn package(&self, bot_name: &str, deployed_name: &str) -> Result<PackagedBot> {
        let bot_dir = self.bot_dir(bot_name)?;
        if !bot_dir.is_dir() {
            return Err(BundleError::MissingDefinition(bot_dir));
        }
        let manifest = self.manifest_path();
        if !manifest.is_file() {
            return Err(BundleError::MissingManifest(manifest));
        }

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let mut entries = Vec::new();

        for entry in WalkDir::new(&bot_dir).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let name = entry_name(deployed_name, &bot_dir, path);

            let contents = if entry.depth() == 1 && entry.file_name() == BOT_FILE {
                renamed_definition(path, deployed_name)?
            } else {
                std::fs::read(path).map_err(BundleError::io(path))?
            };

            writer.start_file(name.as_str(), file_options())?;
            writer.write_all(&contents)?;
            debug!(entry = %name, "added archive entry");
            entries.push(name);
        }

        let manifest_bytes = std::fs::read(&manifest).map_err(BundleError::io(&manifest))?;
        writer.start_file(MANIFEST_FILE, file_options())?;
        writer.write_all(&manifest_bytes)?;
        entries.push(MANIFEST_FILE.to_string());

        let bytes = writer.finish()?.into_inner();
        info!(
            bot = bot_name,
            deployed = deployed_name,
            entries = entries.len(),
            size = bytes.len(),
            "packaged bot definition"
        );
        Ok(PackagedBot { bytes, entries })
    }

    /// Unpack an exported archive and store it as the definition of
    /// `bot_name`.
    ///
    /// The export's top-level directory is `deployed_name`; it is renamed
    /// to `bot_name` and every JSON file is normalised.
    pub fn install_export(
        &self,
        archive: &[u8],
        deployed_name: &str,
        bot_name: &str,
    ) -> Result<InstallReport> {
        self.ensure_root()?;
        let target = self.bot_dir(bot_name)?;
        let extracted = self.bot_dir(deployed_name)?;

        let replaced = self.remove_definition(bot_name)?;
        if extracted != target {
            self.remove_definition(deployed_name)?;
        }

        self.extract(archive)?;

        if !extracted.is_dir() {
            return Err(BundleError::MissingDefinition(extracted));
        }
        if extracted != target {
            std::fs::rename(&extracted, &target).map_err(BundleError::io(&extracted))?;
        }

        let normalized = self.normalize(bot_name)?;
        info!(
            bot = bot_name,
            path = %target.display(),
            formatted = normalized.formatted,
            skipped = normalized.skipped.len(),
            "installed exported bot definition"
        );
        Ok(InstallReport {
            bot_dir: target,
            replaced,
            normalized,
        })
    }

    fn extract(&self, archive: &[u8]) -> Result<()> {
        let mut zip = ZipArchive::new(Cursor::new(archive))?;
        for index in 0..zip.len() {
            let mut file = zip.by_index(index)?;
            let Some(relative) = file.enclosed_name().map(|p| p.to_path_buf()) else {
                warn!(entry = file.name(), "skipping archive entry outside the workspace");
                continue;
            };
            let out = self.root().join(&relative);

            if file.is_dir() {
                std::fs::create_dir_all(&out).map_err(BundleError::io(&out))?;
                continue;
            }
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent).map_err(BundleError::io(parent))?;
            }
            let mut contents = Vec::new();
            file.read_to_end(&mut contents)?;
            std::fs::write(&out, contents).map_err(BundleError::io(&out))?;
        }
        Ok(())
    }
}

/// `Bot.json` with its `name` replaced, as compact sorted JSON.
fn renamed_definition(path: &Path, deployed_name: &str) -> Result<Vec<u8>> {
    let raw = std::fs::read_to_string(path).map_err(BundleError::io(path))?;
    let mut value: Value = serde_json::from_str(&raw).map_err(BundleError::json(path))?;
    rename_bot(&mut value, deployed_name, path)?;
    serde_json::to_vec(&sort_keys(value)).map_err(BundleError::json(path))
}
