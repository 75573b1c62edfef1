//! Widget variant model: the tagged union of configurable widget kinds and
//! the flat settings payloads attached to them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeMismatch;

/// Section name under which the chat widget trio (bubble, chat bar, open
/// panel) is persisted.
pub const SECTION_MODIFIER: &str = "modifier";
/// Section name for the eyecatcher teaser.
pub const SECTION_EYECATCHER: &str = "eyecatcher";
/// Section name for the greeting prompt.
pub const SECTION_GREETING: &str = "greeting";

/// The five configurable widget variants.
///
/// Adding a variant extends this enum; every kind-driven behavior below is an
/// exhaustive match, so the compiler walks you to each spot that needs the
/// new case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidgetKind {
    #[serde(rename = "bubble")]
    Bubble,
    #[serde(rename = "chatBar")]
    ChatBar,
    #[serde(rename = "chatWidgetOpen")]
    ChatWidgetOpen,
    #[serde(rename = "eyecatcher")]
    Eyecatcher,
    #[serde(rename = "greeting")]
    Greeting,
}

impl WidgetKind {
    pub fn all() -> [WidgetKind; 5] {
        [
            WidgetKind::Bubble,
            WidgetKind::ChatBar,
            WidgetKind::ChatWidgetOpen,
            WidgetKind::Eyecatcher,
            WidgetKind::Greeting,
        ]
    }

    /// Human-readable name for display surfaces.
    pub fn name(&self) -> &'static str {
        match self {
            WidgetKind::Bubble => "Bubble",
            WidgetKind::ChatBar => "Chat bar",
            WidgetKind::ChatWidgetOpen => "Open chat panel",
            WidgetKind::Eyecatcher => "Eyecatcher",
            WidgetKind::Greeting => "Greeting",
        }
    }

    /// Wire tag, exactly as it appears in the `type` field of a widget
    /// document.
    pub fn tag(&self) -> &'static str {
        match self {
            WidgetKind::Bubble => "bubble",
            WidgetKind::ChatBar => "chatBar",
            WidgetKind::ChatWidgetOpen => "chatWidgetOpen",
            WidgetKind::Eyecatcher => "eyecatcher",
            WidgetKind::Greeting => "greeting",
        }
    }

    /// Configuration section this kind is persisted under. The chat widget
    /// trio shares the `modifier` section; the standalone widgets each have
    /// their own.
    pub fn section(&self) -> &'static str {
        match self {
            WidgetKind::Bubble | WidgetKind::ChatBar | WidgetKind::ChatWidgetOpen => {
                SECTION_MODIFIER
            }
            WidgetKind::Eyecatcher => SECTION_EYECATCHER,
            WidgetKind::Greeting => SECTION_GREETING,
        }
    }

    /// Static default settings for this variant. Used as the fallback payload
    /// whenever the backend has nothing usable for a section.
    pub fn default_settings(&self) -> SettingsPayload {
        match self {
            WidgetKind::Bubble => payload(&[
                ("bubbleSize", SettingsValue::number(64)),
                ("horizontalMargin", SettingsValue::number(24)),
                ("verticalMargin", SettingsValue::number(24)),
                ("bubbleColor", SettingsValue::text("#1f6feb")),
                ("pulseEnabled", SettingsValue::flag(true)),
            ]),
            WidgetKind::ChatBar => payload(&[
                ("barHeight", SettingsValue::number(44)),
                ("barWidth", SettingsValue::number(280)),
                ("cornerRadius", SettingsValue::number(12)),
                ("barColor", SettingsValue::text("#1f6feb")),
                ("barLabel", SettingsValue::text("Chat with us")),
            ]),
            WidgetKind::ChatWidgetOpen => payload(&[
                ("panelWidth", SettingsValue::number(360)),
                ("panelHeight", SettingsValue::number(520)),
                ("cornerRadius", SettingsValue::number(12)),
                ("fontSize", SettingsValue::number(14)),
                ("headerColor", SettingsValue::text("#1f6feb")),
                ("welcomeText", SettingsValue::text("How can we help you today?")),
                ("showAvatars", SettingsValue::flag(true)),
            ]),
            WidgetKind::Eyecatcher => payload(&[
                ("width", SettingsValue::number(200)),
                ("height", SettingsValue::number(80)),
                ("offsetX", SettingsValue::number(20)),
                ("offsetY", SettingsValue::number(100)),
                ("teaserText", SettingsValue::text("Questions? Chat with us!")),
            ]),
            WidgetKind::Greeting => payload(&[
                ("delaySeconds", SettingsValue::number(5)),
                ("displaySeconds", SettingsValue::number(30)),
                ("avatarSize", SettingsValue::number(40)),
                ("greetingText", SettingsValue::text("Hi there! How can we help?")),
                ("soundEnabled", SettingsValue::flag(false)),
            ]),
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One settings field value as it appears on the wire.
///
/// Untagged: JSON `true` decodes as a flag, `64` as a number, `"#1f6feb"` as
/// text. Colors are text by product convention of the field name; the wire
/// does not distinguish them from free-form strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingsValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl SettingsValue {
    pub fn flag(value: bool) -> Self {
        SettingsValue::Flag(value)
    }

    pub fn number(value: impl Into<f64>) -> Self {
        SettingsValue::Number(value.into())
    }

    pub fn text(value: impl Into<String>) -> Self {
        SettingsValue::Text(value.into())
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            SettingsValue::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            SettingsValue::Number(number) => Some(*number),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SettingsValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for SettingsValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsValue::Flag(flag) => write!(f, "{}", flag),
            SettingsValue::Number(number) if number.fract() == 0.0 && number.is_finite() => {
                write!(f, "{}", *number as i64)
            }
            SettingsValue::Number(number) => write!(f, "{}", number),
            SettingsValue::Text(text) => f.write_str(text),
        }
    }
}

/// Flat field-name to value mapping for one widget or one persisted section.
/// BTreeMap keeps iteration and serialization order deterministic.
pub type SettingsPayload = BTreeMap<String, SettingsValue>;

/// Build a payload from field/value pairs.
pub fn payload(entries: &[(&str, SettingsValue)]) -> SettingsPayload {
    entries
        .iter()
        .map(|(field, value)| (field.to_string(), value.clone()))
        .collect()
}

/// A configured widget instance as stored and served to embeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: WidgetKind,
    pub name: String,
    pub customer_id: String,
    pub customer_name: String,
    pub settings: SettingsPayload,
}

impl Widget {
    /// Narrow this widget to the given kind's settings.
    ///
    /// This is the single point where variant polymorphism is resolved:
    /// callers never branch on `kind` themselves, they ask for the variant
    /// they need and handle the mismatch.
    pub fn narrow(&self, kind: WidgetKind) -> Result<&SettingsPayload, TypeMismatch> {
        if self.kind == kind {
            Ok(&self.settings)
        } else {
            Err(TypeMismatch {
                expected: kind,
                actual: self.kind,
            })
        }
    }

    /// Whether the settings carry exactly the field set of this widget's
    /// kind. Diagnostic only; payloads are adopted verbatim either way.
    pub fn matches_shape(&self) -> bool {
        let expected = self.kind.default_settings();
        self.settings.len() == expected.len()
            && self.settings.keys().all(|field| expected.contains_key(field))
    }
}

/// Static default payload for a canonical section name. The `modifier`
/// section defaults to the bubble payload, the product's default widget type.
/// Unknown sections have no defaults and resolve to an empty payload.
pub fn default_for_section(section: &str) -> SettingsPayload {
    match section {
        SECTION_MODIFIER => WidgetKind::Bubble.default_settings(),
        SECTION_EYECATCHER => WidgetKind::Eyecatcher.default_settings(),
        SECTION_GREETING => WidgetKind::Greeting.default_settings(),
        _ => SettingsPayload::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints;

    fn sample_widget(kind: WidgetKind) -> Widget {
        Widget {
            id: format!("wgt-{}", kind.tag()),
            kind,
            name: format!("{} widget", kind.name()),
            customer_id: "cus-000042".to_string(),
            customer_name: "Acme Web Shop".to_string(),
            settings: kind.default_settings(),
        }
    }

    #[test]
    fn test_section_routing() {
        assert_eq!(WidgetKind::Bubble.section(), SECTION_MODIFIER);
        assert_eq!(WidgetKind::ChatBar.section(), SECTION_MODIFIER);
        assert_eq!(WidgetKind::ChatWidgetOpen.section(), SECTION_MODIFIER);
        assert_eq!(WidgetKind::Eyecatcher.section(), SECTION_EYECATCHER);
        assert_eq!(WidgetKind::Greeting.section(), SECTION_GREETING);
    }

    #[test]
    fn test_narrow_matching_kind_returns_settings() {
        for kind in WidgetKind::all() {
            let widget = sample_widget(kind);
            let settings = widget.narrow(kind).unwrap();
            assert_eq!(settings, &widget.settings);
        }
    }

    #[test]
    fn test_narrow_mismatch_reports_both_kinds() {
        for actual in WidgetKind::all() {
            let widget = sample_widget(actual);
            for requested in WidgetKind::all() {
                if requested == actual {
                    continue;
                }
                let err = widget.narrow(requested).unwrap_err();
                assert_eq!(err.expected, requested);
                assert_eq!(err.actual, actual);
            }
        }
    }

    #[test]
    fn test_widget_wire_format() {
        let widget = sample_widget(WidgetKind::ChatBar);
        let json = serde_json::to_value(&widget).unwrap();

        assert_eq!(json["type"], "chatBar");
        assert_eq!(json["customerId"], "cus-000042");
        assert_eq!(json["customerName"], "Acme Web Shop");
        assert_eq!(json["settings"]["barHeight"], 44.0);
        assert_eq!(json["settings"]["barLabel"], "Chat with us");

        let back: Widget = serde_json::from_value(json).unwrap();
        assert_eq!(back, widget);
    }

    #[test]
    fn test_settings_value_decodes_untagged() {
        let flag: SettingsValue = serde_json::from_value(serde_json::json!(true)).unwrap();
        assert_eq!(flag, SettingsValue::flag(true));

        let number: SettingsValue = serde_json::from_value(serde_json::json!(64)).unwrap();
        assert_eq!(number, SettingsValue::number(64));

        let text: SettingsValue = serde_json::from_value(serde_json::json!("#1f6feb")).unwrap();
        assert_eq!(text, SettingsValue::text("#1f6feb"));
    }

    #[test]
    fn test_defaults_are_in_range_and_on_step() {
        for kind in WidgetKind::all() {
            for (field, value) in kind.default_settings() {
                if let Some(number) = value.as_number() {
                    if let Some(range) = constraints::range_for(&field) {
                        assert!(
                            range.contains(number),
                            "{} default {} out of range",
                            field,
                            number
                        );
                        assert_eq!(
                            range.snap(number),
                            number,
                            "{} default {} not on step",
                            field,
                            number
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_default_for_section_routes_to_variant_defaults() {
        assert_eq!(
            default_for_section(SECTION_MODIFIER),
            WidgetKind::Bubble.default_settings()
        );
        assert_eq!(
            default_for_section(SECTION_EYECATCHER),
            WidgetKind::Eyecatcher.default_settings()
        );
        assert_eq!(
            default_for_section(SECTION_GREETING),
            WidgetKind::Greeting.default_settings()
        );
        assert!(default_for_section("unknown").is_empty());
    }

    #[test]
    fn test_matches_shape() {
        let mut widget = sample_widget(WidgetKind::Eyecatcher);
        assert!(widget.matches_shape());

        widget.settings.remove("teaserText");
        assert!(!widget.matches_shape());

        widget.settings.insert(
            "teaserText".to_string(),
            SettingsValue::text("Questions? Chat with us!"),
        );
        widget
            .settings
            .insert("surprise".to_string(), SettingsValue::flag(true));
        assert!(!widget.matches_shape());
    }

    #[test]
    fn test_value_display_trims_integral_numbers() {
        assert_eq!(SettingsValue::number(64).to_string(), "64");
        assert_eq!(SettingsValue::number(0.5).to_string(), "0.5");
        assert_eq!(SettingsValue::flag(true).to_string(), "true");
        assert_eq!(SettingsValue::text("#1f6feb").to_string(), "#1f6feb");
    }
}
