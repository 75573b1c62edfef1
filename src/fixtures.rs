//! Deterministic fixture data for testing and mock mode.
//!
//! One sample widget per variant plus a preconfigured section map, shared by
//! the test suite, CLI mock mode (`--mock`), and the benchmarks. Everything
//! here is stable across runs so assertions can use literal values.

use std::collections::HashMap;

use crate::widget::{SettingsPayload, SettingsValue, Widget, WidgetKind};

/// Customer every sample widget belongs to.
pub const SAMPLE_CUSTOMER_ID: &str = "cus-000042";
pub const SAMPLE_CUSTOMER_NAME: &str = "Acme Web Shop";

/// One sample widget per variant, with stable ids and default payloads.
pub fn create_sample_widgets() -> Vec<Widget> {
    WidgetKind::all()
        .into_iter()
        .map(create_sample_widget)
        .collect()
}

/// A sample widget of the given kind. The id is derived from the wire tag,
/// so it is stable across runs.
pub fn create_sample_widget(kind: WidgetKind) -> Widget {
    Widget {
        id: format!("wgt-{}", kind.tag()),
        kind,
        name: format!("{} widget", kind.name()),
        customer_id: SAMPLE_CUSTOMER_ID.to_string(),
        customer_name: SAMPLE_CUSTOMER_NAME.to_string(),
        settings: kind.default_settings(),
    }
}

/// Section map for mock mode: every canonical section starts configured with
/// values that differ recognizably from the static defaults.
pub fn preloaded_sections() -> HashMap<String, SettingsPayload> {
    let mut modifier = WidgetKind::Bubble.default_settings();
    modifier.insert("bubbleSize".to_string(), SettingsValue::number(80));
    modifier.insert("bubbleColor".to_string(), SettingsValue::text("#2da44e"));

    let mut eyecatcher = WidgetKind::Eyecatcher.default_settings();
    eyecatcher.insert("width".to_string(), SettingsValue::number(240));
    eyecatcher.insert(
        "teaserText".to_string(),
        SettingsValue::text("Summer sale: chat for 10% off!"),
    );

    let mut greeting = WidgetKind::Greeting.default_settings();
    greeting.insert("delaySeconds".to_string(), SettingsValue::number(8));
    greeting.insert(
        "greetingText".to_string(),
        SettingsValue::text("Hi! Ask us anything about your order."),
    );

    HashMap::from([
        ("modifier".to_string(), modifier),
        ("eyecatcher".to_string(), eyecatcher),
        ("greeting".to_string(), greeting),
    ])
}
