//! Ramp normalization pass: input RGB → LAB → output RGB with the target
//! lightness substituted, plus gamut flags and display projections.

use crate::error::RampError;
use crate::format;
use crate::math;
use crate::model::{MiddleRow, RAMP_LEN, RampEntry, RampModel, RangeSpec};

/// Recomputes every derived field of the ramp.
///
/// The pass is all-or-nothing: rows are computed on a scratch copy and only
/// committed when all four succeed, so a failed pass leaves the model exactly
/// as it was.
pub fn recalculate_all(model: &mut RampModel) -> Result<(), RampError> {
    let mut next = model.clone();
    next.resolve_lightness();

    let ranges = next.ranges;
    math::check_range(ranges.output_range)?;
    for (row, entry) in next.entries.iter_mut().enumerate() {
        recalculate_entry(row, entry, &ranges)?;
    }

    tracing::debug!(
        lightness = ?next.entries.map(|e| e.target_lightness),
        "ramp recalculated"
    );
    *model = next;
    Ok(())
}

fn recalculate_entry(row: usize, entry: &mut RampEntry, ranges: &RangeSpec) -> Result<(), RampError> {
    let lab = math::rgb_to_lab(entry.input_rgb, ranges.input_range)?;
    if !lab.is_finite() || !entry.target_lightness.is_finite() {
        return Err(RampError::NonFinite { row });
    }
    let output = math::lab_to_rgb(lab.with_lightness(entry.target_lightness), ranges.output_range);
    if output.iter().any(|v| !v.is_finite()) {
        return Err(RampError::NonFinite { row });
    }

    let range = ranges.output_range;
    entry.lab = lab;
    entry.output_rgb = output;
    entry.out_of_gamut = [0, 1, 2].map(|c| output[c] < 0.0 || output[c] > range[c]);
    Ok(())
}

/// Applies one edit and recalculates, returning the new display rows.
///
/// A rejected edit leaves the model untouched. An accepted edit stays in the
/// model even when the following pass fails; the previous derived values are
/// kept and the error is returned.
pub fn apply_edit<F>(model: &mut RampModel, edit: F) -> Result<[RowDisplay; RAMP_LEN], RampError>
where
    F: FnOnce(&mut RampModel) -> Result<(), RampError>,
{
    edit(model)?;
    recalculate_all(model)?;
    Ok(model.display_rows())
}

/// Display rows for `model` as it stands, computed on a copy.
///
/// Used when the model may have been changed without a recalculation.
pub fn preview_rows(model: &RampModel) -> Result<[RowDisplay; RAMP_LEN], RampError> {
    let mut next = model.clone();
    recalculate_all(&mut next)?;
    Ok(next.display_rows())
}

/// `max(0, min(range, value))`. Never panics, even for a negative range.
fn clip(value: f64, range: f64) -> f64 {
    value.min(range).max(0.0)
}

/// Normalizes a channel to 0–255 for a swatch, truncating like a `u8` cast.
fn swatch_channel(value: f64, range: f64) -> u8 {
    (value * 255.0 / range).clamp(0.0, 255.0) as u8
}

/// Everything a row shows after a successful pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RowDisplay {
    pub lab: [String; 3],
    pub target_lightness: String,
    /// Present for interpolated rows only.
    pub fraction: Option<String>,
    pub output: [String; 3],
    pub out_of_gamut: [bool; 3],
    pub input_swatch: [u8; 3],
    pub output_swatch: [u8; 3],
}

impl RowDisplay {
    pub fn from_entry(entry: &RampEntry, ranges: &RangeSpec) -> Self {
        let out = ranges.output_range;
        let clipped = [0, 1, 2].map(|c| clip(entry.output_rgb[c], out[c]));
        Self {
            lab: entry.lab.to_display(),
            target_lightness: format::format_fixed2(entry.target_lightness),
            fraction: None,
            output: [0, 1, 2].map(|c| format::format_output_channel(clipped[c], out[c])),
            out_of_gamut: entry.out_of_gamut,
            input_swatch: [0, 1, 2]
                .map(|c| swatch_channel(entry.input_rgb[c], ranges.input_range[c])),
            output_swatch: [0, 1, 2].map(|c| swatch_channel(clipped[c], out[c])),
        }
    }

    /// Clipboard form of the output color, e.g. `[0, 7, 15]`.
    pub fn copy_text(&self) -> String {
        format!("[{}, {}, {}]", self.output[0], self.output[1], self.output[2])
    }
}

impl RampModel {
    /// Display projections of every row from the last committed pass.
    pub fn display_rows(&self) -> [RowDisplay; RAMP_LEN] {
        std::array::from_fn(|row| {
            let mut display = RowDisplay::from_entry(&self.entries[row], &self.ranges);
            if let Ok(middle) = MiddleRow::try_from(row) {
                display.fraction = Some(format::format_fixed2(self.binding(middle).fraction));
            }
            display
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, eps: f64) {
        assert!(
            (actual - expected).abs() < eps,
            "expected {expected}, got {actual}"
        );
    }

    fn recalculated() -> RampModel {
        let mut model = RampModel::default();
        recalculate_all(&mut model).unwrap();
        model
    }

    #[test]
    fn end_to_end_reference_row() {
        let model = recalculated();
        let entry = &model.entries[0];
        assert_close(entry.lab.l, 51.520445, 1e-5);
        assert_close(entry.lab.a, 17.986097, 1e-5);
        assert_close(entry.lab.b, -67.772724, 1e-5);
        assert_close(entry.output_rgb[0], -24.021044, 1e-4);
        assert_close(entry.output_rgb[1], 7.412897, 1e-4);
        assert_close(entry.output_rgb[2], 15.161039, 1e-4);
        assert_eq!(entry.out_of_gamut, [true, false, false]);

        let display = &model.display_rows()[0];
        assert_eq!(display.lab, ["51.52", "17.99", "-67.77"]);
        assert_eq!(display.output, ["0", "7", "15"]);
        assert_eq!(display.target_lightness, "10.00");
        assert_eq!(display.fraction, None);
        assert_eq!(display.input_swatch, [0, 120, 240]);
        assert_eq!(display.output_swatch, [0, 30, 124]);
        assert_eq!(display.copy_text(), "[0, 7, 15]");
    }

    #[test]
    fn default_ramp_outputs() {
        let rows = recalculated().display_rows();
        assert_eq!(rows[1].output, ["6", "23", "16"]);
        assert_eq!(rows[2].output, ["24", "38", "14"]);
        assert_eq!(rows[3].output, ["31", "51", "12"]);
        assert_eq!(rows[3].out_of_gamut, [true, false, false]);
        assert_eq!(rows[1].fraction.as_deref(), Some("0.33"));
        assert_eq!(rows[2].fraction.as_deref(), Some("0.67"));
        assert_eq!(rows[1].target_lightness, "38.05");
    }

    #[test]
    fn neutral_input_stays_in_gamut_when_brightened() {
        let mut model = RampModel::default();
        model.set_input_rgb(0, [0.0, 0.0, 0.0]).unwrap();
        model.set_target_lightness(0, 95.0).unwrap();
        recalculate_all(&mut model).unwrap();
        let entry = &model.entries[0];
        assert_eq!(entry.out_of_gamut, [false, false, false]);
        assert_eq!(model.display_rows()[0].output, ["29", "59", "29"]);
    }

    #[test]
    fn output_format_follows_range() {
        let mut model = RampModel::default();
        model.set_target_lightness(0, 50.0).unwrap();

        model.set_output_range([255.0; 3]);
        recalculate_all(&mut model).unwrap();
        assert_eq!(model.display_rows()[0].output, ["0", "116", "236"]);

        model.set_output_range([1.0; 3]);
        recalculate_all(&mut model).unwrap();
        assert_eq!(model.display_rows()[0].output, ["0.000", "0.456", "0.924"]);

        model.ranges = RangeSpec::uniform(255.0, 0.8);
        recalculate_all(&mut model).unwrap();
        assert_eq!(model.display_rows()[0].output, ["0", "0.365", "0.739"]);
    }

    #[test]
    fn failed_pass_commits_nothing() {
        let mut model = recalculated();
        model.set_input_rgb(2, [10.0, 20.0, 30.0]).unwrap();
        model.set_output_range([31.0, 0.0, 31.0]);
        let before = model.clone();

        assert_eq!(
            recalculate_all(&mut model),
            Err(RampError::ZeroRange { channel: 1 })
        );
        assert_eq!(model, before);

        model.set_output_range([31.0, 63.0, 31.0]);
        model.set_input_range([255.0, 255.0, f64::NAN]);
        let before = model.clone();
        assert_eq!(
            recalculate_all(&mut model),
            Err(RampError::ZeroRange { channel: 2 })
        );
        assert_eq!(model.entries, before.entries);
    }

    #[test]
    fn apply_edit_returns_fresh_rows() {
        let mut model = recalculated();
        let rows = apply_edit(&mut model, |m| m.set_target_lightness(0, 50.0)).unwrap();
        assert_eq!(rows[0].target_lightness, "50.00");
        // Derived rows follow the new endpoint.
        assert_eq!(rows[1].target_lightness, format::format_fixed2(50.0 + 0.33 * 45.0));

        let before = model.clone();
        let err = apply_edit(&mut model, |m| m.set_target_lightness(2, 40.0));
        assert_eq!(err, Err(RampError::LightnessIsDerived { row: 2 }));
        assert_eq!(model, before);
    }

    #[test]
    fn preview_reflects_unrecalculated_changes() {
        let mut model = recalculated();
        model.set_input_rgb(0, [0.0, 0.0, 0.0]).unwrap();
        model.set_target_lightness(0, 95.0).unwrap();
        let before = model.clone();

        let rows = preview_rows(&model).unwrap();
        assert_eq!(rows[0].output, ["29", "59", "29"]);
        assert_eq!(rows[0].input_swatch, [0, 0, 0]);
        assert_eq!(model, before);

        model.set_output_range([0.0; 3]);
        assert_eq!(preview_rows(&model), Err(RampError::ZeroRange { channel: 0 }));
    }

    #[test]
    fn pasted_fraction_moves_derived_row() {
        let mut model = recalculated();
        let value = match crate::paste::paste_single("0.4", false) {
            crate::paste::SinglePaste::Commit(v) => v,
            other => panic!("unexpected paste outcome {other:?}"),
        };
        let rows = apply_edit(&mut model, |m| m.set_fraction(MiddleRow::Second, value)).unwrap();
        assert_eq!(rows[1].fraction.as_deref(), Some("0.40"));
        assert_eq!(rows[1].target_lightness, "44.00");
    }

    #[test]
    fn clip_handles_odd_ranges() {
        assert_eq!(clip(-3.0, 31.0), 0.0);
        assert_eq!(clip(40.0, 31.0), 31.0);
        assert_eq!(clip(5.0, -1.0), 0.0);
    }
}
