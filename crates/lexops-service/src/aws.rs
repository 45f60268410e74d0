//! AWS SDK configuration shared by every client.

use std::sync::Arc;
use std::time::Duration;

use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::lex::AwsLexModels;
use crate::roles::AwsRoleDirectory;
use crate::stacks::AwsStackOutputs;
use crate::traits::Services;
use crate::transfer::HttpTransfer;

/// Default timeout for presigned archive transfers.
const DEFAULT_TRANSFER_TIMEOUT_SECS: u64 = 300;

/// Settings from the `[aws]` configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwsSettings {
    /// Explicit region; falls back to the default provider chain.
    pub region: Option<String>,
    /// Named profile from the shared config files.
    pub profile: Option<String>,
    /// Timeout for archive uploads and downloads, in seconds.
    pub transfer_timeout_secs: u64,
}

impl Default for AwsSettings {
    fn default() -> Self {
        Self {
            region: None,
            profile: None,
            transfer_timeout_secs: DEFAULT_TRANSFER_TIMEOUT_SECS,
        }
    }
}

impl AwsSettings {
    pub fn transfer_timeout(&self) -> Duration {
        Duration::from_secs(self.transfer_timeout_secs)
    }
}

/// Load the shared SDK configuration.
///
/// An explicit region wins over `AWS_REGION` / profile / IMDS; a named
/// profile replaces the default credential chain's profile selection.
pub async fn load_sdk_config(settings: &AwsSettings) -> SdkConfig {
    let region_provider = match settings.region.as_deref() {
        Some(explicit) => {
            RegionProviderChain::first_try(Region::new(explicit.to_string())).or_default_provider()
        }
        None => RegionProviderChain::default_provider(),
    };

    let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region_provider);
    if let Some(profile) = settings.profile.as_deref() {
        loader = loader.profile_name(profile);
    }

    let config = loader.load().await;
    info!(
        region = config.region().map(|r| r.as_ref()).unwrap_or("unset"),
        profile = settings.profile.as_deref().unwrap_or("default"),
        "aws configuration loaded"
    );
    config
}

impl Services {
    /// Build the production service bundle from AWS settings.
    pub async fn from_aws(settings: &AwsSettings) -> Result<Self> {
        let config = load_sdk_config(settings).await;
        Ok(Self::new(
            Arc::new(AwsLexModels::new(&config)),
            Arc::new(AwsStackOutputs::new(&config)),
            Arc::new(AwsRoleDirectory::new(&config)),
            Arc::new(HttpTransfer::new(settings.transfer_timeout())?),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_five_minute_transfers() {
        let settings = AwsSettings::default();
        assert_eq!(settings.transfer_timeout(), Duration::from_secs(300));
        assert!(settings.region.is_none());
    }

    #[tokio::test]
    async fn explicit_region_override_wins() {
        let settings = AwsSettings {
            region: Some("eu-west-2".into()),
            ..AwsSettings::default()
        };
        let config = load_sdk_config(&settings).await;
        assert_eq!(config.region().map(|r| r.as_ref()), Some("eu-west-2"));
    }
}
