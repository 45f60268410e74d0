//! Presigned-URL archive transfers over HTTP.
//!
//! Export downloads and import uploads both go through short-lived presigned
//! S3 URLs.  The query string carries the signature, so only the host is
//! ever logged or put into an error.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::error::{Result, ServiceError};
use crate::traits::ArtifactTransfer;

/// [`ArtifactTransfer`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransfer {
    client: reqwest::Client,
}

impl HttpTransfer {
    /// Create a transfer client whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("lexops/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

/// Host part of a presigned URL, safe to log.
pub fn redacted_host(url: &str) -> Result<String> {
    let parsed = Url::parse(url)?;
    Ok(parsed.host_str().unwrap_or("unknown-host").to_string())
}

#[async_trait]
impl ArtifactTransfer for HttpTransfer {
    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let host = redacted_host(url)?;
        debug!(%host, "downloading archive");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ServiceError::transfer(&host, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::TransferStatus {
                host,
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ServiceError::transfer(&host, e))?;
        debug!(%host, size_bytes = bytes.len(), "archive downloaded");
        Ok(bytes.to_vec())
    }

    async fn upload(&self, url: &str, body: Vec<u8>) -> Result<()> {
        let host = redacted_host(url)?;
        debug!(%host, size_bytes = body.len(), "uploading archive");

        let response = self
            .client
            .put(url)
            .body(body)
            .send()
            .await
            .map_err(|e| ServiceError::transfer(&host, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::TransferStatus {
                host,
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacted_host_drops_signature() {
        let url = "https://lex-exports.s3.eu-west-2.amazonaws.com/abc.zip?X-Amz-Signature=deadbeef";
        let host = redacted_host(url).unwrap();
        assert_eq!(host, "lex-exports.s3.eu-west-2.amazonaws.com");
        assert!(!host.contains("Signature"));
    }

    #[test]
    fn redacted_host_rejects_garbage() {
        assert!(matches!(
            redacted_host("not a url"),
            Err(ServiceError::Url(_))
        ));
    }

    fn error_chain(err: &ServiceError) -> String {
        let mut text = err.to_string();
        let mut source = std::error::Error::source(err);
        while let Some(inner) = source {
            text.push_str(&format!(": {inner}"));
            source = inner.source();
        }
        text
    }

    #[tokio::test]
    async fn failed_download_hides_signature() {
        let transfer = HttpTransfer::new(Duration::from_secs(2)).unwrap();
        let err = transfer
            .download("http://127.0.0.1:9/export.zip?X-Amz-Signature=SECRETSIG")
            .await
            .unwrap_err();

        let text = error_chain(&err);
        assert!(matches!(err, ServiceError::Transfer { .. }), "{text}");
        assert!(text.contains("127.0.0.1"), "{text}");
        assert!(!text.contains("SECRETSIG"), "{text}");
        assert!(!text.contains("X-Amz-Signature"), "{text}");
    }

    #[tokio::test]
    async fn failed_upload_hides_signature() {
        let transfer = HttpTransfer::new(Duration::from_secs(2)).unwrap();
        let err = transfer
            .upload(
                "http://127.0.0.1:9/import.zip?X-Amz-Signature=SECRETSIG",
                b"PK".to_vec(),
            )
            .await
            .unwrap_err();

        let text = error_chain(&err);
        assert!(!text.contains("SECRETSIG"), "{text}");
    }

    #[test]
    fn transfer_client_builds() {
        assert!(HttpTransfer::new(Duration::from_secs(5)).is_ok());
    }
}
