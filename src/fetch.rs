// src/fetch.rs
use anyhow::{Context, Result};
use reqwest::Client;
use tracing::info;

use crate::page::{PageHost, PageSnapshot};

/// HTTP client for pulling a job posting page the way a browser would see
/// it. Some boards serve a stripped page to unknown user agents, hence the
/// desktop UA string.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    pub async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        info!("Fetching page: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to fetch page")?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP error: {}", response.status());
        }

        let url = response.url().clone();
        let html = response
            .text()
            .await
            .context("Failed to read response body")?;

        Ok(FetchedPage { url, html })
    }
}

/// A fetched document presented as a (static) page host. The URL never
/// changes and no further mutations arrive, so the detector sees it as a
/// page that has already settled.
pub struct FetchedPage {
    url: reqwest::Url,
    html: String,
}

impl FetchedPage {
    pub fn new(url: reqwest::Url, html: String) -> Self {
        Self { url, html }
    }
}

impl PageHost for FetchedPage {
    fn href(&self) -> String {
        self.url.as_str().to_string()
    }

    fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            url: self.url.as_str().to_string(),
            hostname: self.url.host_str().unwrap_or_default().to_string(),
            path: self.url.path().to_string(),
            html: self.html.clone(),
        }
    }
}
