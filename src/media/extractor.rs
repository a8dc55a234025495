use super::types::RawMetadata;
use anyhow::Result;
use async_trait::async_trait;
use url::Url;

#[async_trait]
pub trait Extractor: Send + Sync {
    /// Human-readable name of the extractor
    fn name(&self) -> &'static str;

    /// Query metadata for the given URL without downloading any media
    async fn probe(&self, url: &Url) -> Result<RawMetadata>;

    /// Test if this extractor is available on the system
    async fn test_availability(&self) -> bool;
}
