//! CLI argument definitions for lexops.
//!
//! All `clap` structures live here so that `main.rs` stays focused on
//! dispatching subcommands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use lexops_workflow::{BotCoordinates, BotVersion};

/// lexops -- Amazon Lex V2 bot lifecycle helper.
#[derive(Parser)]
#[command(
    name = "lexops",
    version,
    about = "lexops -- import, export, version and delete Amazon Lex V2 bots",
    long_about = "Moves Lex V2 bot definitions between a local LexJson workspace and \
                  the model-building API, cutting a new bot version and re-pointing the \
                  environment alias on every import."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Configuration file.
    #[arg(long, global = true, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Directory holding `Manifest.json` and the bot definitions.
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// AWS region, overriding the default provider chain.
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Named AWS profile.
    #[arg(long, global = true)]
    pub profile: Option<String>,
}

/// Which deployment of which bot.
#[derive(Args, Debug, Clone)]
pub struct BotArgs {
    /// Short bot name, as committed in the workspace.
    pub bot: String,

    /// Target environment, e.g. `dev` or `prod`.
    #[arg(long, short = 'n')]
    pub environment: String,

    /// Ticket of a feature-branch deployment.
    #[arg(long, short)]
    pub ticket: Option<String>,
}

impl BotArgs {
    pub fn coordinates(&self) -> lexops_workflow::Result<BotCoordinates> {
        BotCoordinates::new(&self.bot, &self.environment, self.ticket.clone())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Export a deployed bot into the workspace.
    Export {
        #[command(flatten)]
        target: BotArgs,

        /// Version to export.
        #[arg(long, short, default_value = "DRAFT", value_parser = parse_version)]
        version: BotVersion,
    },

    /// Import the workspace definition, cut a new version and re-point the
    /// alias.
    Import {
        #[command(flatten)]
        target: BotArgs,

        /// Version whose locale is built and snapshotted.
        #[arg(long, short, default_value = "DRAFT", value_parser = parse_version)]
        source_version: BotVersion,

        /// Alias to re-point, without the environment prefix.
        #[arg(long, short)]
        alias: Option<String>,

        /// Do not evict the oldest version when the ceiling is reached.
        #[arg(long)]
        keep_old_versions: bool,
    },

    /// Create an empty bot and, optionally, its alias.
    Create {
        #[command(flatten)]
        target: BotArgs,

        /// IAM role the bot runs as.
        #[arg(long, short)]
        role: String,

        /// Alias to create, without the environment prefix.
        #[arg(long, short)]
        alias: Option<String>,
    },

    /// Delete a deployed bot.
    Delete {
        #[command(flatten)]
        target: BotArgs,
    },

    /// Delete the oldest bot version once the version ceiling is reached.
    Prune {
        #[command(flatten)]
        target: BotArgs,

        /// Alias whose stack pins the live version.
        #[arg(long, short)]
        alias: String,
    },
}

fn parse_version(value: &str) -> Result<BotVersion, String> {
    value.parse().map_err(|e: lexops_workflow::WorkflowError| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn import_with_defaults() {
        let cli = Cli::try_parse_from(["lexops", "import", "Support", "-n", "dev", "-a", "live"])
            .unwrap();
        assert_eq!(cli.global.config, PathBuf::from("config/default.toml"));
        match cli.command {
            Commands::Import {
                target,
                source_version,
                alias,
                keep_old_versions,
            } => {
                assert_eq!(target.coordinates().unwrap().deployed_name(), "dev-Support");
                assert_eq!(source_version, BotVersion::Draft);
                assert_eq!(alias.as_deref(), Some("live"));
                assert!(!keep_old_versions);
            }
            _ => panic!("expected import"),
        }
    }

    #[test]
    fn export_with_ticket_and_version() {
        let cli = Cli::try_parse_from([
            "lexops", "--root", "bots", "export", "Support", "-n", "dev", "-t", "T-9", "-v", "4",
        ])
        .unwrap();
        assert_eq!(cli.global.root, Some(PathBuf::from("bots")));
        match cli.command {
            Commands::Export { target, version } => {
                assert_eq!(
                    target.coordinates().unwrap().deployed_name(),
                    "T-9-dev-Support"
                );
                assert_eq!(version, BotVersion::Numbered(4));
            }
            _ => panic!("expected export"),
        }
    }

    #[test]
    fn bad_version_is_rejected() {
        assert!(
            Cli::try_parse_from(["lexops", "export", "Support", "-n", "dev", "-v", "latest"])
                .is_err()
        );
    }

    #[test]
    fn prune_requires_alias() {
        assert!(Cli::try_parse_from(["lexops", "prune", "Support", "-n", "dev"]).is_err());
    }
}
