use crate::constraints;
use crate::widget::WidgetKind;
use anyhow::Result;

// Layout Constants
/// Width of the field name column
const FIELD_COL_WIDTH: usize = 18;

/// Width of the value column
const VALUE_COL_WIDTH: usize = 28;

pub fn format_defaults(kind: WidgetKind) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Default settings for {} (section '{}')\n",
        kind.name(),
        kind.section()
    ));

    for (field, value) in kind.default_settings() {
        let range_note = constraints::range_for(&field)
            .map(|range| format!("  [{}..{} step {}]", range.min, range.max, range.step))
            .unwrap_or_default();
        output.push_str(&format!(
            "{:<field_width$} {:<value_width$}{}\n",
            field,
            value.to_string(),
            range_note,
            field_width = FIELD_COL_WIDTH,
            value_width = VALUE_COL_WIDTH
        ));
    }

    output
}

pub fn run(kind: WidgetKind) -> Result<()> {
    print!("{}", format_defaults(kind));
    Ok(())
}
