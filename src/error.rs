use thiserror::Error;

use crate::widget::WidgetKind;

/// Errors surfaced by the settings backend while reading or writing a section.
///
/// Both variants are `Clone` and `PartialEq` so the store can keep the most
/// recent error next to a cached section and tests can assert on exact values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// The request never completed: DNS, connect, timeout, connection reset,
    /// or a backend that answered with a server-side failure status.
    #[error("network error for section '{section}': {message}")]
    Network { section: String, message: String },

    /// The backend understood the write and refused it.
    #[error("backend rejected write to section '{section}' (status {status_code}): {reason}")]
    Rejected {
        section: String,
        reason: String,
        status_code: u16,
    },
}

impl SyncError {
    pub fn network(section: &str, message: impl Into<String>) -> Self {
        SyncError::Network {
            section: section.to_string(),
            message: message.into(),
        }
    }

    pub fn rejected(section: &str, reason: impl Into<String>, status_code: u16) -> Self {
        SyncError::Rejected {
            section: section.to_string(),
            reason: reason.into(),
            status_code,
        }
    }
}

/// A widget's settings were requested under the wrong variant tag.
///
/// This is a programmer error on the caller's side and is never recovered
/// from silently; surfaces that assume a variant propagate it immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("widget is '{actual}', not '{expected}'")]
pub struct TypeMismatch {
    pub expected: WidgetKind,
    pub actual: WidgetKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_display_names_section() {
        let err = SyncError::network("modifier", "connection refused");
        assert_eq!(
            err.to_string(),
            "network error for section 'modifier': connection refused"
        );
    }

    #[test]
    fn test_rejected_error_display_includes_status() {
        let err = SyncError::rejected("greeting", "payload too large", 413);
        assert_eq!(
            err.to_string(),
            "backend rejected write to section 'greeting' (status 413): payload too large"
        );
    }

    #[test]
    fn test_type_mismatch_display() {
        let err = TypeMismatch {
            expected: WidgetKind::Bubble,
            actual: WidgetKind::Greeting,
        };
        assert_eq!(err.to_string(), "widget is 'greeting', not 'bubble'");
    }
}
