//! Service seam for lexops.
//!
//! Everything the bot workflows need from the outside world goes through the
//! traits in [`traits`]:
//!
//! - [`LexModels`] -- the Lex V2 model-building API.
//! - [`StackOutputs`] -- deployed CloudFormation stack outputs.
//! - [`RoleDirectory`] -- IAM role name to ARN resolution.
//! - [`ArtifactTransfer`] -- presigned-URL archive uploads and downloads.
//!
//! [`Services::from_aws`] wires the AWS-backed implementations together from
//! a single SDK configuration.

pub mod aws;
pub mod error;
pub mod lex;
pub mod roles;
pub mod stacks;
pub mod traits;
pub mod transfer;
pub mod types;

pub use aws::{AwsSettings, load_sdk_config};
pub use error::{Result, ServiceError};
pub use lex::AwsLexModels;
pub use roles::AwsRoleDirectory;
pub use stacks::AwsStackOutputs;
pub use traits::{ArtifactTransfer, LexModels, RoleDirectory, Services, StackOutputs};
pub use transfer::{HttpTransfer, redacted_host};
pub use types::{
    BotAliasSummary, BotDescription, BotStatus, BotSummary, BotVersionSummary,
    ExportDescription, ImportDescription, ImportSpec, JobStatus, LocaleDescription,
    LocaleStatus, NewBot, Page, UploadTarget,
};
