use super::types::RawThumbnail;
use anyhow::{Context, Result};
use tracing::debug;

/// Selects the preview image: the widest candidate whose width does not
/// exceed `max_width`. Candidates are ranked by width descending with a
/// stable sort, so ties keep their emitted order. When every candidate is
/// too wide, the smallest one is used; an empty list yields `None`.
pub fn select(thumbnails: &[RawThumbnail], max_width: u32) -> Option<&RawThumbnail> {
    let mut ordered: Vec<&RawThumbnail> = thumbnails.iter().collect();
    ordered.sort_by(|a, b| b.width.cmp(&a.width));

    ordered
        .iter()
        .find(|t| t.width <= max_width)
        .copied()
        .or_else(|| ordered.last().copied())
}

/// Downloads the selected thumbnail as raw bytes. Decoding is left to the
/// widget that renders it.
pub async fn fetch_image(url: &str) -> Result<Vec<u8>> {
    debug!("Downloading thumbnail: {}", url);

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .context("Failed to create HTTP client")?;

    let response = client
        .get(url)
        .send()
        .await
        .context("Failed to fetch thumbnail URL")?;

    if !response.status().is_success() {
        return Err(anyhow::anyhow!(
            "Failed to download thumbnail: HTTP {}",
            response.status()
        ));
    }

    let data = response
        .bytes()
        .await
        .context("Failed to read thumbnail data")?
        .to_vec();

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thumb(url: &str, width: u32) -> RawThumbnail {
        RawThumbnail {
            url: url.to_string(),
            width,
        }
    }

    #[test]
    fn test_select_widest_under_threshold() {
        let thumbnails = vec![thumb("A", 100), thumb("B", 480), thumb("C", 600)];
        let selected = select(&thumbnails, 500).unwrap();
        assert_eq!(selected.url, "B");
    }

    #[test]
    fn test_select_ignores_order_of_candidates() {
        let thumbnails = vec![thumb("C", 600), thumb("A", 100), thumb("B", 480)];
        let selected = select(&thumbnails, 500).unwrap();
        assert_eq!(selected.url, "B");
    }

    #[test]
    fn test_select_tie_keeps_first_emitted() {
        let thumbnails = vec![thumb("X", 480), thumb("Y", 480)];
        let selected = select(&thumbnails, 500).unwrap();
        assert_eq!(selected.url, "X");
    }

    #[test]
    fn test_select_missing_width_ranks_last() {
        let thumbnails = vec![thumb("unsized", 0), thumb("B", 480)];
        let selected = select(&thumbnails, 500).unwrap();
        assert_eq!(selected.url, "B");
    }

    #[test]
    fn test_select_falls_back_to_smallest_when_all_too_wide() {
        let thumbnails = vec![thumb("big", 1280), thumb("huge", 1920), thumb("wide", 800)];
        let selected = select(&thumbnails, 500).unwrap();
        assert_eq!(selected.url, "wide");
    }

    #[test]
    fn test_select_empty_list() {
        assert!(select(&[], 500).is_none());
    }
}
