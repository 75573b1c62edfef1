use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{SectionDocument, SettingsBackend};
use crate::error::SyncError;
use crate::widget::SettingsPayload;

/// In-process settings backend.
///
/// Behaves like the document store with zero latency: reading a section that
/// was never written yields an empty document, writing replaces the stored
/// payload wholesale. Serves CLI mock mode and the test suite.
pub struct MemoryBackend {
    sections: RwLock<HashMap<String, SettingsPayload>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        MemoryBackend {
            sections: RwLock::new(HashMap::new()),
        }
    }

    /// Start with the given sections already configured.
    pub fn with_sections(sections: HashMap<String, SettingsPayload>) -> Self {
        MemoryBackend {
            sections: RwLock::new(sections),
        }
    }

    /// Stored payload for a section, if any.
    pub async fn stored(&self, section: &str) -> Option<SettingsPayload> {
        self.sections.read().await.get(section).cloned()
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        MemoryBackend::new()
    }
}

#[async_trait]
impl SettingsBackend for MemoryBackend {
    async fn read_section(&self, section: &str) -> Result<SectionDocument, SyncError> {
        let settings = self.sections.read().await.get(section).cloned();
        debug!(
            "memory backend read of '{}' (configured: {})",
            section,
            settings.is_some()
        );
        Ok(SectionDocument { settings })
    }

    async fn write_section(
        &self,
        section: &str,
        settings: &SettingsPayload,
    ) -> Result<(), SyncError> {
        debug!(
            "memory backend write of '{}' ({} fields)",
            section,
            settings.len()
        );
        self.sections
            .write()
            .await
            .insert(section.to_string(), settings.clone());
        Ok(())
    }
}
