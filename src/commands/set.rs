use crate::commands::parse_value;
use crate::constraints;
use crate::store::ConfigStore;
use crate::widget::{default_for_section, SettingsValue};
use anyhow::{Context, Result};

/// Advisory warning for an out-of-range numeric value. Constraints never
/// block a write; the operator is told and the value is stored as given.
fn range_warning(field: &str, value: &SettingsValue) -> Option<String> {
    let number = value.as_number()?;
    let range = constraints::range_for(field)?;
    if range.contains(number) {
        return None;
    }
    Some(format!(
        "warning: {} = {} is outside [{}, {}]; storing anyway",
        field, number, range.min, range.max
    ))
}

pub async fn run(store: &ConfigStore, section: &str, field: &str, raw_value: &str) -> Result<()> {
    let value = parse_value(raw_value);
    if let Some(warning) = range_warning(field, &value) {
        println!("{}", warning);
    }

    // Seed the section first so the edit lands on the current remote value
    // (or the defaults when the backend has nothing).
    store
        .fetch_section(section, default_for_section(section))
        .await;
    store.update_field(section, field, value.clone()).await;
    store
        .commit_section(section)
        .await
        .with_context(|| format!("Failed to persist section '{}'", section))?;

    println!("{}.{} = {}", section, field, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::backend::MemoryBackend;

    #[test]
    fn test_parse_value_kinds() {
        assert_eq!(parse_value("true"), SettingsValue::flag(true));
        assert_eq!(parse_value("false"), SettingsValue::flag(false));
        assert_eq!(parse_value("72"), SettingsValue::number(72));
        assert_eq!(parse_value("0.5"), SettingsValue::number(0.5));
        assert_eq!(parse_value("1e3"), SettingsValue::number(1000));
        assert_eq!(parse_value("#1f6feb"), SettingsValue::text("#1f6feb"));
        assert_eq!(parse_value("Chat with us"), SettingsValue::text("Chat with us"));
        // Non-finite numbers stay text rather than poisoning a payload
        assert_eq!(parse_value("NaN"), SettingsValue::text("NaN"));
        assert_eq!(parse_value("inf"), SettingsValue::text("inf"));
    }

    #[test]
    fn test_range_warning_only_fires_outside_range() {
        assert!(range_warning("bubbleSize", &SettingsValue::number(64)).is_none());
        assert!(range_warning("bubbleSize", &SettingsValue::number(300)).is_some());
        assert!(range_warning("bubbleColor", &SettingsValue::text("#fff")).is_none());
        // Unconstrained numeric fields never warn
        assert!(range_warning("futureField", &SettingsValue::number(9999)).is_none());
    }

    #[tokio::test]
    async fn test_run_persists_the_edit() {
        let backend = Arc::new(MemoryBackend::new());
        let store = ConfigStore::new(backend.clone());

        run(&store, "eyecatcher", "width", "240").await.unwrap();

        let stored = backend.stored("eyecatcher").await.unwrap();
        assert_eq!(stored["width"], SettingsValue::number(240));
        // The rest of the section was seeded from the defaults
        assert_eq!(stored["height"], SettingsValue::number(80));
    }
}
