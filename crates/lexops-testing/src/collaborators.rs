//! Fakes for the non-Lex collaborators.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use lexops_service::{
    ArtifactTransfer, Result, RoleDirectory, ServiceError, StackOutputs, redacted_host,
};

// ---------------------------------------------------------------------------
// Stacks
// ---------------------------------------------------------------------------

/// Stack outputs keyed by stack name.  Unknown stacks are `NotFound`.
#[derive(Debug, Default)]
pub struct FakeStacks {
    stacks: HashMap<String, HashMap<String, String>>,
    lookups: Mutex<Vec<String>>,
}

impl FakeStacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(mut self, stack: &str, key: &str, value: &str) -> Self {
        self.stacks
            .entry(stack.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
        self
    }

    /// A stack that exists but has no outputs.
    pub fn with_stack(mut self, stack: &str) -> Self {
        self.stacks.entry(stack.to_string()).or_default();
        self
    }

    /// Stack names looked up so far.
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl StackOutputs for FakeStacks {
    async fn stack_output(&self, stack_name: &str, key: &str) -> Result<Option<String>> {
        self.lookups.lock().unwrap().push(stack_name.to_string());
        let outputs = self
            .stacks
            .get(stack_name)
            .ok_or_else(|| ServiceError::NotFound {
                operation: "DescribeStacks",
                reason: format!("Stack with id {stack_name} does not exist"),
            })?;
        Ok(outputs.get(key).cloned())
    }
}

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// Role name to ARN table.
#[derive(Debug, Default)]
pub struct FakeRoles {
    roles: HashMap<String, String>,
}

impl FakeRoles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_role(mut self, name: &str, arn: &str) -> Self {
        self.roles.insert(name.to_string(), arn.to_string());
        self
    }
}

#[async_trait]
impl RoleDirectory for FakeRoles {
    async fn role_arn(&self, role_name: &str) -> Result<String> {
        self.roles
            .get(role_name)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound {
                operation: "GetRole",
                reason: format!("role {role_name} cannot be found"),
            })
    }
}

// ---------------------------------------------------------------------------
// Transfer
// ---------------------------------------------------------------------------

/// Serves canned downloads and records uploads.
#[derive(Debug, Default)]
pub struct FakeTransfer {
    downloads: HashMap<String, Vec<u8>>,
    upload_status: Option<u16>,
    uploads: Mutex<Vec<(String, Vec<u8>)>>,
}

impl FakeTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_download(mut self, url: &str, body: Vec<u8>) -> Self {
        self.downloads.insert(url.to_string(), body);
        self
    }

    /// Reject every upload with `status`.
    pub fn with_upload_status(mut self, status: u16) -> Self {
        self.upload_status = Some(status);
        self
    }

    /// `(url, body)` of every upload so far.
    pub fn uploads(&self) -> Vec<(String, Vec<u8>)> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArtifactTransfer for FakeTransfer {
    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        match self.downloads.get(url) {
            Some(body) => Ok(body.clone()),
            None => Err(ServiceError::TransferStatus {
                host: redacted_host(url)?,
                status: 404,
            }),
        }
    }

    async fn upload(&self, url: &str, body: Vec<u8>) -> Result<()> {
        if let Some(status) = self.upload_status {
            return Err(ServiceError::TransferStatus {
                host: redacted_host(url)?,
                status,
            });
        }
        self.uploads.lock().unwrap().push((url.to_string(), body));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stacks_distinguish_missing_stack_from_missing_output() {
        let stacks = FakeStacks::new()
            .with_output("dev-live", "BotVersion", "7")
            .with_stack("qa-live");
        assert_eq!(
            stacks.stack_output("dev-live", "BotVersion").await.unwrap(),
            Some("7".to_string())
        );
        assert_eq!(stacks.stack_output("qa-live", "BotVersion").await.unwrap(), None);
        let err = stacks.stack_output("prod-live", "BotVersion").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(stacks.lookups(), vec!["dev-live", "qa-live", "prod-live"]);
    }

    #[tokio::test]
    async fn unknown_download_is_a_transfer_error() {
        let transfer = FakeTransfer::new();
        let err = transfer
            .download("https://bucket.example.com/export.zip?sig=1")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::TransferStatus { status: 404, .. }));
        assert!(!err.to_string().contains("sig=1"));
    }
}
