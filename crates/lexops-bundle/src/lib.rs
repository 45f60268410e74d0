//! Local bot definitions and their archive form.
//!
//! A [`BotWorkspace`] is the directory bot definitions are committed in.
//! It knows how to package a definition into an importable archive under its
//! deployed name, and how to install an exported archive back under the
//! short bot name with stable JSON formatting.

pub mod archive;
pub mod error;
pub mod normalize;
pub mod workspace;

pub use archive::{InstallReport, PackagedBot};
pub use error::{BundleError, Result};
pub use normalize::{NormalizeReport, sort_keys, to_pretty_bytes};
pub use workspace::{BOT_FILE, BotWorkspace, DEFAULT_ROOT_DIR, MANIFEST_FILE};
