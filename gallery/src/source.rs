//! Page props loading.
//!
//! Props come from the storefront's data layer as JSON, either saved to a
//! local file or served over HTTP.

use crate::details::ProductDetails;
use crate::media::GalleryProps;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

/// Where to load page props from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropsSource {
    File(PathBuf),
    Remote(Url),
}

impl PropsSource {
    /// Treat http(s) URLs as remote sources and anything else as a path.
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            if let Ok(url) = Url::parse(raw) {
                return PropsSource::Remote(url);
            }
            tracing::warn!("Invalid props URL {:?}, treating it as a path", raw);
        }
        PropsSource::File(PathBuf::from(raw))
    }
}

/// Props for one product page: the gallery plus optional details.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PageProps {
    #[serde(flatten)]
    pub gallery: GalleryProps,
    #[serde(default)]
    pub details: Option<ProductDetails>,
}

/// Load page props from the given source.
pub async fn load_props(source: &PropsSource, client: &reqwest::Client) -> Result<PageProps> {
    match source {
        PropsSource::File(path) => read_props(path).await,
        PropsSource::Remote(url) => fetch_props(client, url).await,
    }
}

async fn fetch_props(client: &reqwest::Client, url: &Url) -> Result<PageProps> {
    tracing::debug!("Fetching props from {}", url);
    let res = client
        .get(url.clone())
        .send()
        .await
        .context("Failed to send props request")?
        .error_for_status()
        .context("Server returned error")?;
    let props = res.json().await.context("Failed to parse props response")?;
    Ok(props)
}

/// Read props from disk. A missing file yields empty props.
async fn read_props(path: &Path) -> Result<PageProps> {
    let exists = tokio::fs::try_exists(path)
        .await
        .with_context(|| format!("Failed to check for props file {}", path.display()))?;
    if !exists {
        tracing::info!("No props file at {}, starting with an empty gallery", path.display());
        return Ok(PageProps::default());
    }

    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read props from {}", path.display()))?;
    let props: PageProps = serde_json::from_str(&json).context("Failed to parse props")?;
    tracing::info!(
        "Loaded props with {} images and {} videos",
        props.gallery.images.len(),
        props.gallery.videos.len()
    );
    Ok(props)
}
