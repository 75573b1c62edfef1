//! Deterministic resolution of a section's working value from the remote
//! fetch outcome and a static fallback.

use tracing::warn;

use crate::backend::SectionDocument;
use crate::constraints::{self, FieldViolation};
use crate::error::SyncError;
use crate::widget::SettingsPayload;

/// Decide the value a section starts its editing session with.
///
/// Three cases, in order of trust: the fetch failed entirely, use the
/// fallback; the fetch succeeded but the section was never configured, use
/// the fallback; the fetch produced settings, use them verbatim. A partial
/// remote payload is never backfilled from the fallback. Sections are
/// replaced wholesale or not at all, so a stored document always means
/// exactly what the operator last saved.
pub fn resolve(
    remote: Result<SectionDocument, SyncError>,
    fallback: SettingsPayload,
) -> SettingsPayload {
    match remote {
        Ok(SectionDocument {
            settings: Some(settings),
        }) => settings,
        Ok(SectionDocument { settings: None }) => fallback,
        Err(_) => fallback,
    }
}

/// Sanity-check a remote payload against the constraint registry.
///
/// Out-of-range numeric fields are logged and reported back, and that is
/// all: the payload is adopted unchanged. Constraints bound the editing
/// surface, they do not veto stored data.
pub fn audit_numeric_fields(section: &str, settings: &SettingsPayload) -> Vec<FieldViolation> {
    let violations = constraints::violations(settings);
    for violation in &violations {
        warn!(
            "section '{}': field '{}' = {} outside [{}, {}]",
            section, violation.field, violation.value, violation.range.min, violation.range.max
        );
    }
    violations
}
