//! Session-scoped cache of configuration sections, reconciling local edits
//! against the settings backend.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::backend::SettingsBackend;
use crate::error::SyncError;
use crate::fallback::{audit_numeric_fields, resolve};
use crate::widget::{SettingsPayload, SettingsValue};

/// Cached state of one configuration section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionState {
    /// Current working value. Edits land here before they are committed.
    pub value: SettingsPayload,
    /// Whether a fetch for this section is in flight.
    pub loading: bool,
    /// Outcome of the most recent backend interaction, if it failed.
    pub last_error: Option<SyncError>,
}

/// Widget configuration store.
///
/// Sections are created on first fetch and live for the life of the store.
/// Edits are local until committed; fetches replace the cached value
/// wholesale. Locks are taken briefly and never held across a backend call,
/// so tasks interleave only at protocol boundaries.
pub struct ConfigStore {
    backend: Arc<dyn SettingsBackend>,
    sections: RwLock<HashMap<String, SectionState>>,
    selected: RwLock<Option<String>>,
}

impl ConfigStore {
    pub fn new(backend: Arc<dyn SettingsBackend>) -> Self {
        ConfigStore {
            backend,
            sections: RwLock::new(HashMap::new()),
            selected: RwLock::new(None),
        }
    }

    /// Fetch a section from the backend and cache the resolved value.
    ///
    /// A failed or empty read resolves to the given fallback; a transport
    /// failure is recorded in `last_error`, never propagated. The first
    /// fetch seeds the section with the fallback so readers always see a
    /// usable value while the request is in flight.
    ///
    /// Concurrent fetches for the same section are not deduplicated:
    /// whichever backend call completes last overwrites the cached value,
    /// regardless of the order the fetches were issued in. Callers that need
    /// strict ordering must await one fetch before starting the next.
    pub async fn fetch_section(&self, name: &str, fallback: SettingsPayload) -> SettingsPayload {
        {
            let mut sections = self.sections.write().await;
            sections
                .entry(name.to_string())
                .and_modify(|state| state.loading = true)
                .or_insert_with(|| SectionState {
                    value: fallback.clone(),
                    loading: true,
                    last_error: None,
                });
        }

        debug!("fetching section '{}'", name);
        let outcome = self.backend.read_section(name).await;

        let error = outcome.as_ref().err().cloned();
        let adopted_remote = matches!(&outcome, Ok(doc) if doc.settings.is_some());
        if let Some(err) = &error {
            warn!("fetch of section '{}' failed, using fallback: {}", name, err);
        }

        let resolved = resolve(outcome, fallback);
        if adopted_remote {
            audit_numeric_fields(name, &resolved);
        }

        let mut sections = self.sections.write().await;
        let state = sections
            .entry(name.to_string())
            .or_insert_with(|| SectionState {
                value: resolved.clone(),
                loading: false,
                last_error: None,
            });
        state.value = resolved.clone();
        state.loading = false;
        state.last_error = error;
        resolved
    }

    /// Replace one field in a cached section. Purely local: the backend is
    /// not involved until the section is committed. A section that was never
    /// fetched is not created here; the edit is dropped with a warning.
    pub async fn update_field(&self, section: &str, field: &str, value: SettingsValue) {
        let mut sections = self.sections.write().await;
        match sections.get_mut(section) {
            Some(state) => {
                state.value.insert(field.to_string(), value);
            }
            None => warn!(
                "update of field '{}' on unknown section '{}' ignored",
                field, section
            ),
        }
    }

    /// Persist a section's current in-memory value.
    ///
    /// Optimistic: on failure the cached value keeps the uncommitted edits,
    /// the error is recorded in `last_error` and returned, and nothing is
    /// retried. A successful commit clears `last_error`. Committing a
    /// section that was never fetched is a no-op.
    pub async fn commit_section(&self, section: &str) -> Result<(), SyncError> {
        let value = {
            let sections = self.sections.read().await;
            match sections.get(section) {
                Some(state) => state.value.clone(),
                None => {
                    warn!("commit of unknown section '{}' ignored", section);
                    return Ok(());
                }
            }
        };

        debug!("committing section '{}' ({} fields)", section, value.len());
        let result = self.backend.write_section(section, &value).await;

        let mut sections = self.sections.write().await;
        if let Some(state) = sections.get_mut(section) {
            match &result {
                Ok(()) => state.last_error = None,
                Err(err) => {
                    warn!(
                        "commit of section '{}' failed, edits kept in memory: {}",
                        section, err
                    );
                    state.last_error = Some(err.clone());
                }
            }
        }
        result
    }

    /// Point the editing session at a widget. Replaces the previous
    /// selection atomically; cached sections are untouched.
    pub async fn select_widget(&self, id: impl Into<String>) {
        *self.selected.write().await = Some(id.into());
    }

    pub async fn selected_widget(&self) -> Option<String> {
        self.selected.read().await.clone()
    }

    /// Snapshot of a section's cached state, if it was ever fetched.
    pub async fn section(&self, name: &str) -> Option<SectionState> {
        self.sections.read().await.get(name).cloned()
    }

    /// Current working value of a section, if it was ever fetched.
    pub async fn value(&self, name: &str) -> Option<SettingsPayload> {
        self.sections
            .read()
            .await
            .get(name)
            .map(|state| state.value.clone())
    }
}
