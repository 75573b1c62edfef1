//! Read/write contract between the config store and the settings backend,
//! with the HTTP implementation used in production and the in-memory one
//! used by mock mode and tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SyncError;
use crate::widget::SettingsPayload;

pub mod http;
pub mod memory;

pub use http::HttpBackend;
pub use memory::MemoryBackend;

/// One persisted configuration section, as the backend returns it.
///
/// A section that was never configured comes back as an empty document with
/// no `settings` member at all. That is a normal answer, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<SettingsPayload>,
}

impl SectionDocument {
    pub fn with_settings(settings: SettingsPayload) -> Self {
        SectionDocument {
            settings: Some(settings),
        }
    }
}

/// Settings persistence protocol, implemented by the real HTTP client and by
/// the in-memory backend.
#[async_trait]
pub trait SettingsBackend: Send + Sync {
    /// Read a section by name. Backends answer `settings: None` for sections
    /// that were never configured; errors mean the read itself failed.
    async fn read_section(&self, section: &str) -> Result<SectionDocument, SyncError>;

    /// Replace a section's stored settings with the given payload.
    async fn write_section(
        &self,
        section: &str,
        settings: &SettingsPayload,
    ) -> Result<(), SyncError>;
}
