//! Deployed names of bots and aliases.
//!
//! A bot is committed under its short name and deployed once per
//! environment, optionally per ticket for feature branches:
//!
//! | ticket | environment | bot          | deployed name               |
//! |--------|-------------|--------------|-----------------------------|
//! | -      | `dev`       | `Support`    | `dev-Support`               |
//! | `T-42` | `dev`       | `Support`    | `T-42-dev-Support`          |
//!
//! Aliases and the stacks that pin a live version are named
//! `{environment}-{alias}` regardless of the ticket.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, WorkflowError};

/// Identifies one deployment of a bot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BotCoordinates {
    bot_name: String,
    environment: String,
    ticket: Option<String>,
}

impl BotCoordinates {
    /// Validate and build coordinates.  An empty ticket counts as none.
    pub fn new(
        bot_name: impl Into<String>,
        environment: impl Into<String>,
        ticket: Option<String>,
    ) -> Result<Self> {
        let bot_name = bot_name.into();
        let environment = environment.into();
        if bot_name.trim().is_empty() {
            return Err(WorkflowError::invalid_input("bot name must not be empty"));
        }
        if environment.trim().is_empty() {
            return Err(WorkflowError::invalid_input("environment must not be empty"));
        }
        let ticket = ticket.filter(|t| !t.trim().is_empty());
        Ok(Self {
            bot_name,
            environment,
            ticket,
        })
    }

    pub fn bot_name(&self) -> &str {
        &self.bot_name
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn ticket(&self) -> Option<&str> {
        self.ticket.as_deref()
    }

    /// `{ticket}-{environment}`, or just the environment.
    pub fn prefix(&self) -> String {
        match &self.ticket {
            Some(ticket) => format!("{ticket}-{}", self.environment),
            None => self.environment.clone(),
        }
    }

    /// Name of the bot inside the service.
    pub fn deployed_name(&self) -> String {
        format!("{}-{}", self.prefix(), self.bot_name)
    }

    /// Name of `alias` in this environment.  The stack pinning the live
    /// version carries the same name.
    pub fn alias_name(&self, alias: &str) -> String {
        format!("{}-{alias}", self.environment)
    }
}

impl fmt::Display for BotCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.deployed_name())
    }
}

/// A bot version as the service names it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BotVersion {
    #[default]
    Draft,
    Numbered(u32),
}

impl BotVersion {
    pub const DRAFT: &'static str = "DRAFT";

    pub fn number(&self) -> Option<u32> {
        match self {
            Self::Draft => None,
            Self::Numbered(n) => Some(*n),
        }
    }
}

impl FromStr for BotVersion {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s == Self::DRAFT {
            return Ok(Self::Draft);
        }
        s.parse::<u32>()
            .map(Self::Numbered)
            .map_err(|_| WorkflowError::InvalidVersion(s.to_string()))
    }
}

impl fmt::Display for BotVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => f.write_str(Self::DRAFT),
            Self::Numbered(n) => write!(f, "{n}"),
        }
    }
}
