//! Domain types exchanged across the service seam.
//!
//! These mirror the parts of the Lex V2 model-building responses the
//! workflow actually reads.  Status enums are parsed from the wire strings so
//! that new service states land in an `Other` variant instead of breaking
//! callers.

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// One page of a paginated list call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Token for the next page, if the service has more.
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    /// A page with items and no continuation.
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_token: None,
        }
    }

    /// An empty page, optionally pointing at a further page.
    pub fn empty(next_token: Option<String>) -> Self {
        Self {
            items: Vec::new(),
            next_token,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Summaries and descriptions
// ---------------------------------------------------------------------------

/// A bot as returned by `ListBots`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotSummary {
    pub bot_id: String,
    pub bot_name: String,
    /// Highest numbered version, absent while only `DRAFT` exists.
    pub latest_version: Option<String>,
}

/// A bot version as returned by `ListBotVersions`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotVersionSummary {
    pub version: String,
}

/// An alias as returned by `ListBotAliases`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotAliasSummary {
    pub alias_id: String,
    pub alias_name: String,
}

/// The settings of an existing bot that an import must carry over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotDescription {
    pub bot_id: String,
    pub bot_name: String,
    pub role_arn: String,
    pub child_directed: bool,
    pub idle_session_ttl_secs: i32,
    pub status: BotStatus,
}

/// Parameters for `CreateBot`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBot {
    pub name: String,
    pub description: String,
    pub role_arn: String,
    pub child_directed: bool,
    pub idle_session_ttl_secs: i32,
}

/// Bot-level settings sent with `StartImport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    pub bot_name: String,
    pub role_arn: String,
    pub child_directed: bool,
    pub idle_session_ttl_secs: i32,
}

impl From<&BotDescription> for ImportSpec {
    fn from(bot: &BotDescription) -> Self {
        Self {
            bot_name: bot.bot_name.clone(),
            role_arn: bot.role_arn.clone(),
            child_directed: bot.child_directed,
            idle_session_ttl_secs: bot.idle_session_ttl_secs,
        }
    }
}

/// Result of `CreateUploadUrl`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    pub import_id: String,
    pub upload_url: String,
}

/// Result of `DescribeExport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDescription {
    pub export_id: String,
    pub status: JobStatus,
    pub download_url: Option<String>,
    pub failure_reasons: Vec<String>,
}

/// Result of `DescribeImport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDescription {
    pub import_id: String,
    pub status: JobStatus,
    pub failure_reasons: Vec<String>,
}

/// Result of `DescribeBotLocale`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleDescription {
    pub status: LocaleStatus,
    pub failure_reasons: Vec<String>,
}

// ---------------------------------------------------------------------------
// Status enums
// ---------------------------------------------------------------------------

/// Status of an asynchronous export or import job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JobStatus {
    InProgress,
    Completed,
    Failed,
    Deleting,
    Other(String),
}

impl JobStatus {
    pub fn from_wire(value: &str) -> Self {
        match value {
            "InProgress" => Self::InProgress,
            "Completed" => Self::Completed,
            "Failed" => Self::Failed,
            "Deleting" => Self::Deleting,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InProgress => write!(f, "InProgress"),
            Self::Completed => write!(f, "Completed"),
            Self::Failed => write!(f, "Failed"),
            Self::Deleting => write!(f, "Deleting"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Build status of a bot locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LocaleStatus {
    Creating,
    Building,
    Built,
    ReadyExpressTestingOnly,
    Failed,
    Deleting,
    NotBuilt,
    Importing,
    Processing,
    Other(String),
}

impl LocaleStatus {
    pub fn from_wire(value: &str) -> Self {
        match value {
            "Creating" => Self::Creating,
            "Building" => Self::Building,
            "Built" => Self::Built,
            "ReadyExpressTestingOnly" => Self::ReadyExpressTestingOnly,
            "Failed" => Self::Failed,
            "Deleting" => Self::Deleting,
            "NotBuilt" => Self::NotBuilt,
            "Importing" => Self::Importing,
            "Processing" => Self::Processing,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for LocaleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Creating => "Creating",
            Self::Building => "Building",
            Self::Built => "Built",
            Self::ReadyExpressTestingOnly => "ReadyExpressTestingOnly",
            Self::Failed => "Failed",
            Self::Deleting => "Deleting",
            Self::NotBuilt => "NotBuilt",
            Self::Importing => "Importing",
            Self::Processing => "Processing",
            Self::Other(s) => s,
        };
        f.write_str(s)
    }
}

/// Status of a bot or bot version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BotStatus {
    Creating,
    Available,
    Inactive,
    Deleting,
    Failed,
    Versioning,
    Importing,
    Updating,
    Other(String),
}

impl BotStatus {
    pub fn from_wire(value: &str) -> Self {
        match value {
            "Creating" => Self::Creating,
            "Available" => Self::Available,
            "Inactive" => Self::Inactive,
            "Deleting" => Self::Deleting,
            "Failed" => Self::Failed,
            "Versioning" => Self::Versioning,
            "Importing" => Self::Importing,
            "Updating" => Self::Updating,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for BotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Creating => "Creating",
            Self::Available => "Available",
            Self::Inactive => "Inactive",
            Self::Deleting => "Deleting",
            Self::Failed => "Failed",
            Self::Versioning => "Versioning",
            Self::Importing => "Importing",
            Self::Updating => "Updating",
            Self::Other(s) => s,
        };
        f.write_str(s)
    }
}
