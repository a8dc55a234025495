use super::{extractor::Extractor, types::RawMetadata};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

pub struct YtDlpExtractor {
    binary: String,
    timeout: Duration,
}

impl YtDlpExtractor {
    pub fn new(binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    /// Picks the metadata payload out of the extractor's output stream.
    /// Only JSON-shaped lines (starting with `{`) count; everything else
    /// is extractor chatter and is dropped. The first accepted line is
    /// the document.
    fn json_payload(stream: &str) -> Option<&str> {
        stream.lines().find(|line| line.starts_with('{'))
    }
}

#[async_trait]
impl Extractor for YtDlpExtractor {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    async fn probe(&self, url: &Url) -> Result<RawMetadata> {
        debug!("Extracting metadata with {} for: {}", self.binary, url);

        let output = tokio::time::timeout(
            self.timeout,
            tokio::process::Command::new(&self.binary)
                .arg("--dump-json")
                .arg("--skip-download")
                .arg("--no-warnings")
                .arg(url.as_str())
                .output(),
        )
        .await
        .context("Media metadata extraction timed out")?
        .context("Failed to extract media metadata")?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow::anyhow!(
                "Media metadata extraction failed: {}",
                error
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!("{} raw output: {}", self.binary, stdout);

        let payload = Self::json_payload(&stdout)
            .ok_or_else(|| anyhow::anyhow!("No JSON metadata in extractor output"))?;

        serde_json::from_str(payload).context("Failed to parse media metadata")
    }

    async fn test_availability(&self) -> bool {
        match tokio::process::Command::new(&self.binary)
            .arg("--version")
            .output()
            .await
        {
            Ok(output) => {
                if output.status.success() {
                    let version = String::from_utf8_lossy(&output.stdout);
                    info!("✅ {} is available, version: {}", self.binary, version.trim());
                    true
                } else {
                    warn!("❌ {} command failed", self.binary);
                    false
                }
            }
            Err(e) => {
                warn!("❌ {} not found: {}", self.binary, e);
                false
            }
        }
    }
}
