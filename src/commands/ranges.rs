use crate::constraints;
use anyhow::Result;

// Layout Constants
/// Width of the field name column
const FIELD_COL_WIDTH: usize = 18;

/// Width of the min/max/step columns
const NUMBER_COL_WIDTH: usize = 6;

pub fn format_ranges() -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{:<field_width$} {:>num_width$} {:>num_width$} {:>num_width$}\n",
        "Field",
        "Min",
        "Max",
        "Step",
        field_width = FIELD_COL_WIDTH,
        num_width = NUMBER_COL_WIDTH
    ));

    let mut entries: Vec<_> = constraints::entries().collect();
    entries.sort_by_key(|(field, _)| *field);

    for (field, range) in entries {
        output.push_str(&format!(
            "{:<field_width$} {:>num_width$} {:>num_width$} {:>num_width$}\n",
            field,
            range.min,
            range.max,
            range.step,
            field_width = FIELD_COL_WIDTH,
            num_width = NUMBER_COL_WIDTH
        ));
    }

    output
}

pub fn run() -> Result<()> {
    print!("{}", format_ranges());
    Ok(())
}
