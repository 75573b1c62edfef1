//! Numeric editing constraints for widget settings fields.
//!
//! This module centralizes the legal range and step size of every numeric
//! field so that sliders, steppers and diagnostics agree on the bounds.
//! Constraints are advisory: nothing here rejects a value, the store and
//! backend accept whatever they are given.

use phf::phf_map;

use crate::widget::SettingsPayload;

/// Inclusive legal domain and editing granularity of one numeric field.
///
/// `min == max` is a legal degenerate: the field is rendered but not
/// editable (`avatarSize` is the one current example).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl FieldRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Whether the field is fixed at a single value.
    pub fn is_fixed(&self) -> bool {
        self.min == self.max
    }

    /// Limit a value to `[min, max]`.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Nearest value that is `min` plus a whole number of steps, clamped to
    /// the range.
    pub fn snap(&self, value: f64) -> f64 {
        if self.is_fixed() {
            return self.min;
        }
        let steps = ((value - self.min) / self.step).round();
        self.clamp(self.min + steps * self.step)
    }

    /// Slider position of a value in `[0, 1]`. A fixed field always maps to
    /// `1.0` so the division below never sees a zero width.
    pub fn percent(&self, value: f64) -> f64 {
        if self.is_fixed() {
            return 1.0;
        }
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

/// Every constrained field, enumerated at compile time. A field missing from
/// this map is unconstrained free-form data (colors, labels, flags).
static FIELD_RANGES: phf::Map<&'static str, FieldRange> = phf_map! {
    // bubble
    "bubbleSize" => FieldRange { min: 40.0, max: 120.0, step: 4.0 },
    "horizontalMargin" => FieldRange { min: 0.0, max: 120.0, step: 4.0 },
    "verticalMargin" => FieldRange { min: 0.0, max: 120.0, step: 4.0 },
    // chat bar
    "barHeight" => FieldRange { min: 32.0, max: 64.0, step: 2.0 },
    "barWidth" => FieldRange { min: 160.0, max: 420.0, step: 10.0 },
    // shared by chat bar and open chat panel
    "cornerRadius" => FieldRange { min: 0.0, max: 24.0, step: 1.0 },
    // open chat panel
    "panelWidth" => FieldRange { min: 280.0, max: 480.0, step: 10.0 },
    "panelHeight" => FieldRange { min: 360.0, max: 720.0, step: 10.0 },
    "fontSize" => FieldRange { min: 12.0, max: 18.0, step: 1.0 },
    // eyecatcher
    "width" => FieldRange { min: 120.0, max: 480.0, step: 20.0 },
    "height" => FieldRange { min: 60.0, max: 240.0, step: 10.0 },
    "offsetX" => FieldRange { min: 0.0, max: 200.0, step: 5.0 },
    "offsetY" => FieldRange { min: 0.0, max: 200.0, step: 5.0 },
    // greeting
    "delaySeconds" => FieldRange { min: 0.0, max: 60.0, step: 1.0 },
    "displaySeconds" => FieldRange { min: 5.0, max: 120.0, step: 5.0 },
    "avatarSize" => FieldRange { min: 40.0, max: 40.0, step: 1.0 },
};

/// Look up the range for a numeric field. `None` means the field is
/// unconstrained.
pub fn range_for(field: &str) -> Option<&'static FieldRange> {
    FIELD_RANGES.get(field)
}

/// All constrained fields, in arbitrary map order.
pub fn entries() -> impl Iterator<Item = (&'static str, &'static FieldRange)> {
    FIELD_RANGES.entries().map(|(field, range)| (*field, range))
}

/// One numeric field found outside its legal range.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldViolation {
    pub field: String,
    pub value: f64,
    pub range: FieldRange,
}

/// Check every numeric field of a payload against the registry. Fields that
/// are not numeric or not in the registry are skipped.
pub fn violations(payload: &SettingsPayload) -> Vec<FieldViolation> {
    let mut found = Vec::new();
    for (field, value) in payload {
        if let Some(number) = value.as_number() {
            if let Some(range) = range_for(field) {
                if !range.contains(number) {
                    found.push(FieldViolation {
                        field: field.clone(),
                        value: number,
                        range: *range,
                    });
                }
            }
        }
    }
    found
}
