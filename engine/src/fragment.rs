//! Shared chrome fragments.
//!
//! The header and footer are served as standalone HTML fragments and
//! fetched concurrently at startup. Each fetch succeeds or fails on its
//! own; a failed fragment leaves its mount empty and never blocks the
//! rest of the page.

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use crate::config::PageSettings;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// The two fragments the page pulls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    Header,
    Footer,
}

impl FragmentKind {
    /// DOM id of the placeholder the fragment is injected under.
    #[must_use]
    pub const fn mount_id(self) -> &'static str {
        match self {
            FragmentKind::Header => "header-placeholder",
            FragmentKind::Footer => "footer-placeholder",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            FragmentKind::Header => "header",
            FragmentKind::Footer => "footer",
        }
    }

    #[must_use]
    pub fn url(self, settings: &PageSettings) -> String {
        match self {
            FragmentKind::Header => settings.header_url(),
            FragmentKind::Footer => settings.footer_url(),
        }
    }
}

#[derive(Debug, Error)]
pub enum FragmentError {
    #[error("request for {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Result of one fragment fetch, success or not.
#[derive(Debug)]
pub struct FragmentOutcome {
    pub kind: FragmentKind,
    pub html: Result<String, FragmentError>,
}

impl FragmentOutcome {
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.html.is_ok()
    }
}

/// Builds the HTTP client used for fragment fetches and mail submission.
pub fn build_client(settings: &PageSettings) -> reqwest::Result<Client> {
    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(settings.fetch_timeout)
        .build()
}

/// Fetches both fragments concurrently and returns one outcome per kind,
/// header first. Neither failure aborts the other fetch.
pub async fn load_fragments(client: Client, settings: PageSettings) -> Vec<FragmentOutcome> {
    let (header, footer) = tokio::join!(
        fetch_fragment(&client, FragmentKind::Header, &settings),
        fetch_fragment(&client, FragmentKind::Footer, &settings),
    );
    vec![header, footer]
}

pub async fn fetch_fragment(
    client: &Client,
    kind: FragmentKind,
    settings: &PageSettings,
) -> FragmentOutcome {
    let url = kind.url(settings);
    let html = request_text(client, &url).await;
    if let Err(err) = &html {
        tracing::warn!("failed to load {} fragment: {}", kind.label(), err);
    }
    FragmentOutcome { kind, html }
}

async fn request_text(client: &Client, url: &str) -> Result<String, FragmentError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| FragmentError::Transport {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FragmentError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response
        .text()
        .await
        .map_err(|source| FragmentError::Transport {
            url: url.to_string(),
            source,
        })
}
