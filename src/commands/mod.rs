pub mod defaults;
pub mod ranges;
pub mod set;
pub mod show;

use crate::widget::SettingsValue;

/// Parse a CLI field value the way the wire decodes one
///
/// Tries the value kinds in the same order as the untagged wire format:
/// `true`/`false` become a flag, anything that parses as a finite number
/// becomes a number, everything else is text.
pub fn parse_value(raw: &str) -> SettingsValue {
    if let Ok(flag) = raw.parse::<bool>() {
        return SettingsValue::flag(flag);
    }
    if let Ok(number) = raw.parse::<f64>() {
        if number.is_finite() {
            return SettingsValue::number(number);
        }
    }
    SettingsValue::text(raw)
}
