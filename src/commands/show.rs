use crate::error::SyncError;
use crate::store::ConfigStore;
use crate::widget::{default_for_section, SettingsPayload};
use anyhow::{Context, Result};

// Layout Constants
/// Width of the field name column in section tables
const FIELD_COL_WIDTH: usize = 18;

pub fn format_section(
    section: &str,
    value: &SettingsPayload,
    last_error: Option<&SyncError>,
) -> String {
    let mut output = String::new();
    output.push_str(&format!("Section: {}\n", section));

    if let Some(err) = last_error {
        output.push_str(&format!("(last sync failed: {})\n", err));
    }

    for (field, value) in value {
        output.push_str(&format!(
            "{:<width$} {}\n",
            field,
            value,
            width = FIELD_COL_WIDTH
        ));
    }

    output
}

pub async fn run(store: &ConfigStore, section: &str, as_json: bool) -> Result<()> {
    let value = store
        .fetch_section(section, default_for_section(section))
        .await;

    if as_json {
        let json =
            serde_json::to_string_pretty(&value).context("Failed to encode section as JSON")?;
        println!("{}", json);
        return Ok(());
    }

    let state = store.section(section).await;
    let last_error = state.as_ref().and_then(|s| s.last_error.as_ref());
    print!("{}", format_section(section, &value, last_error));

    Ok(())
}
