mod extractor;
mod thumbnail;
mod types;
mod ytdlp;

pub use extractor::Extractor;
pub use thumbnail::fetch_image;
pub use types::MediaInfo;

use crate::config::Config;
use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use url::Url;
use ytdlp::YtDlpExtractor;

pub struct MetadataFetcher {
    extractors: Vec<Box<dyn Extractor>>,
    max_thumbnail_width: u32,
}

impl MetadataFetcher {
    pub fn new(config: &Config) -> Self {
        info!(
            "Metadata fetcher initialized - simulate-only probing with {}",
            config.extractor_bin
        );

        let extractors: Vec<Box<dyn Extractor>> = vec![Box::new(YtDlpExtractor::new(
            &config.extractor_bin,
            config.fetch_timeout(),
        ))];

        Self {
            extractors,
            max_thumbnail_width: config.max_thumbnail_width,
        }
    }

    /// Probes `url` for metadata without downloading any media. Input that
    /// is empty after trimming is not an error: it yields `Ok(None)` and no
    /// extractor is invoked. Every failure mode - malformed URL, extractor
    /// failure, unparseable or incomplete metadata - collapses into one
    /// undifferentiated error.
    pub async fn fetch(&self, url: &str) -> Result<Option<MediaInfo>> {
        let url = url.trim();
        if url.is_empty() {
            return Ok(None);
        }

        let url = Url::parse(url).context("Not a valid media URL")?;
        info!("Fetching metadata for URL: {}", url);

        let mut errors = Vec::new();

        for extractor in &self.extractors {
            match extractor.probe(&url).await {
                Ok(raw) => {
                    info!("Successfully probed with {}", extractor.name());
                    debug!("Parsed metadata: {:?}", raw);
                    return Ok(Some(MediaInfo::from_raw(raw, self.max_thumbnail_width)));
                }
                Err(e) => {
                    warn!("{} failed: {}", extractor.name(), e);
                    errors.push(format!("{e}"));
                }
            }
        }

        Err(anyhow::anyhow!(
            "Metadata fetch failed: {}",
            errors.join(". ")
        ))
    }

    pub async fn test_setup(&self) -> Result<()> {
        info!("Testing metadata fetcher setup...");

        for extractor in &self.extractors {
            if extractor.test_availability().await {
                info!("✅ At least one metadata extractor is available");
                return Ok(());
            }
        }

        Err(anyhow::anyhow!(
            "No metadata extractors are available. Please install yt-dlp."
        ))
    }
}
