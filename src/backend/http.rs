use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use tracing::debug;

use super::{SectionDocument, SettingsBackend};
use crate::error::SyncError;
use crate::widget::SettingsPayload;

/// Client for the settings document store's REST facade.
///
/// Sections live at `{base}/sections/{name}`. A read answered with 404 means
/// the section was never configured and is reported as an empty document.
/// Writes treat any 4xx as the backend refusing the payload; everything else
/// that is not a success is a network failure.
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

#[derive(Serialize)]
struct WriteBody<'a> {
    settings: &'a SettingsPayload,
}

impl HttpBackend {
    /// Build a client for the given base URL. The timeout applies per
    /// request; timeout policy belongs to the transport, never to the store.
    pub fn new(base_url: &str, timeout_secs: u64) -> anyhow::Result<Self> {
        let mut base_url =
            Url::parse(base_url).with_context(|| format!("invalid backend URL '{}'", base_url))?;
        // Url::join treats a path without a trailing slash as a file and
        // would replace its last segment.
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("widgetlab/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;

        Ok(HttpBackend { client, base_url })
    }

    fn section_url(&self, section: &str) -> Result<Url, SyncError> {
        self.base_url
            .join(&format!("sections/{}", section))
            .map_err(|e| SyncError::network(section, format!("invalid section URL: {}", e)))
    }
}

#[async_trait]
impl SettingsBackend for HttpBackend {
    async fn read_section(&self, section: &str) -> Result<SectionDocument, SyncError> {
        let url = self.section_url(section)?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SyncError::network(section, e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(SectionDocument::default());
        }
        if !response.status().is_success() {
            return Err(SyncError::network(
                section,
                format!("read returned status {}", response.status()),
            ));
        }

        response
            .json::<SectionDocument>()
            .await
            .map_err(|e| SyncError::network(section, format!("malformed section document: {}", e)))
    }

    async fn write_section(
        &self,
        section: &str,
        settings: &SettingsPayload,
    ) -> Result<(), SyncError> {
        let url = self.section_url(section)?;
        debug!("PUT {}", url);

        let response = self
            .client
            .put(url)
            .json(&WriteBody { settings })
            .send()
            .await
            .map_err(|e| SyncError::network(section, e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        if status.is_client_error() {
            let reason = response.text().await.unwrap_or_default();
            let reason = if reason.is_empty() {
                status.canonical_reason().unwrap_or("rejected").to_string()
            } else {
                reason
            };
            return Err(SyncError::rejected(section, reason, status.as_u16()));
        }
        Err(SyncError::network(
            section,
            format!("write returned status {}", status),
        ))
    }
}
