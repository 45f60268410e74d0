//! CloudFormation implementation of [`StackOutputs`].

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_cloudformation::Client;
use aws_sdk_cloudformation::error::ProvideErrorMetadata;
use tracing::debug;

use crate::error::{Result, ServiceError};
use crate::traits::StackOutputs;

/// [`StackOutputs`] backed by `DescribeStacks`.
#[derive(Debug, Clone)]
pub struct AwsStackOutputs {
    client: Client,
}

impl AwsStackOutputs {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

/// CloudFormation reports an unknown stack as a `ValidationError`.
fn is_missing_stack(code: Option<&str>, message: Option<&str>) -> bool {
    code == Some("ValidationError") && message.is_some_and(|m| m.contains("does not exist"))
}

#[async_trait]
impl StackOutputs for AwsStackOutputs {
    async fn stack_output(&self, stack_name: &str, key: &str) -> Result<Option<String>> {
        const OP: &str = "DescribeStacks";
        let out = self
            .client
            .describe_stacks()
            .stack_name(stack_name)
            .send()
            .await
            .map_err(|e| {
                let missing = is_missing_stack(e.code(), e.message());
                match ServiceError::from_sdk(OP, e) {
                    ServiceError::Api { operation, reason } if missing => {
                        ServiceError::NotFound { operation, reason }
                    }
                    other => other,
                }
            })?;

        let stack = out.stacks().first().ok_or_else(|| ServiceError::NotFound {
            operation: OP,
            reason: format!("stack `{stack_name}` not found"),
        })?;

        let value = stack
            .outputs()
            .iter()
            .find(|output| output.output_key() == Some(key))
            .and_then(|output| output.output_value())
            .map(str::to_string);

        debug!(stack = stack_name, key, found = value.is_some(), "read stack output");
        Ok(value)
    }
}
