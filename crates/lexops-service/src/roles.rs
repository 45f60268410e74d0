//! IAM implementation of [`RoleDirectory`].

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_iam::Client;

use crate::error::{Result, ServiceError};
use crate::traits::RoleDirectory;

/// [`RoleDirectory`] backed by `GetRole`.
#[derive(Debug, Clone)]
pub struct AwsRoleDirectory {
    client: Client,
}

impl AwsRoleDirectory {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl RoleDirectory for AwsRoleDirectory {
    async fn role_arn(&self, role_name: &str) -> Result<String> {
        const OP: &str = "GetRole";
        let out = self
            .client
            .get_role()
            .role_name(role_name)
            .send()
            .await
            .map_err(|e| ServiceError::from_sdk(OP, e))?;

        out.role()
            .map(|role| role.arn().to_string())
            .ok_or(ServiceError::MissingField {
                operation: OP,
                field: "Role",
            })
    }
}
