//! Bot lifecycle orchestration for Amazon Lex V2.
//!
//! [`LexOps`] drives the model-building API through the traits of
//! `lexops-service` and keeps committed definitions in a
//! `lexops-bundle` workspace:
//!
//! - [`LexOps::export`] pulls a deployed bot into the workspace.
//! - [`LexOps::import`] pushes a definition, builds it, cuts a new version
//!   and re-points the environment alias.
//! - [`LexOps::prune`] evicts the oldest version once the ceiling is hit.
//! - [`LexOps::create`] and [`LexOps::delete`] manage the bot itself.

pub mod config;
pub mod create;
pub mod delete;
pub mod error;
pub mod export;
pub mod import;
pub mod locator;
pub mod naming;
pub mod ops;
pub mod versions;
pub mod waiter;

pub use config::{LookupPolicy, WaiterConfig, WorkflowConfig};
pub use create::CreateReport;
pub use error::{Result, WorkflowError};
pub use export::ExportReport;
pub use import::{ImportReport, ImportRequest};
pub use locator::{ResolvedBot, fetch_until_nonempty};
pub use naming::{BotCoordinates, BotVersion};
pub use ops::LexOps;
pub use versions::{MissingStack, VERSION_OUTPUT_KEY, select_eviction};
pub use waiter::{Poll, WaitKind, WaitPolicy, Waiters, wait_until};
