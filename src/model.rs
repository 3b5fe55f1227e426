//! Ramp data model: four entries, two interpolation bindings, and the
//! input/output range triples.
//!
//! Target lightness and fractions are stored at full precision. Input values
//! written by paste or the picker are stored as their fields show them, so
//! the displayed and computed colors never disagree.

use crate::color::Lab;
use crate::constants;
use crate::error::RampError;
use crate::format;

/// Number of entries in a ramp.
pub const RAMP_LEN: usize = 4;

/// Index of the dark endpoint.
pub const FIRST: usize = 0;

/// Index of the light endpoint.
pub const LAST: usize = RAMP_LEN - 1;

/// Per-channel scale factors for input and output values.
///
/// An input value `v` corresponds to `v * 255 / input_range[c]` in 0–255
/// RGB; an output is scaled from normalized 0–1 by `output_range[c]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeSpec {
    pub input_range: [f64; 3],
    pub output_range: [f64; 3],
}

impl RangeSpec {
    pub fn new(input_range: [f64; 3], output_range: [f64; 3]) -> Self {
        Self {
            input_range,
            output_range,
        }
    }

    /// Same range for every input and output channel.
    pub fn uniform(input: f64, output: f64) -> Self {
        Self::new([input; 3], [output; 3])
    }
}

impl Default for RangeSpec {
    fn default() -> Self {
        Self::new(constants::DEFAULT_INPUT_RANGE, constants::DEFAULT_OUTPUT_RANGE)
    }
}

/// One row of the ramp.
///
/// `input_rgb` and `target_lightness` are user state. `lab`, `output_rgb`, and
/// `out_of_gamut` are derived by the last successful recalculation pass;
/// `output_rgb` is kept unclipped.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RampEntry {
    pub input_rgb: [f64; 3],
    pub lab: Lab,
    pub target_lightness: f64,
    pub output_rgb: [f64; 3],
    pub out_of_gamut: [bool; 3],
}

impl RampEntry {
    pub fn new(input_rgb: [f64; 3], target_lightness: f64) -> Self {
        Self {
            input_rgb,
            target_lightness,
            ..Self::default()
        }
    }
}

/// Which variable of a binding is independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    /// Lightness follows the fraction; the lightness field is read-only.
    Derived,
    /// Lightness is user-set; the fraction is back-derived from it.
    Independent,
}

/// Links a middle entry's lightness to the endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolationBinding {
    pub state: BindingState,
    pub fraction: f64,
}

impl InterpolationBinding {
    pub fn derived(fraction: f64) -> Self {
        Self {
            state: BindingState::Derived,
            fraction,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.state == BindingState::Derived
    }
}

/// The two rows that can be interpolated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiddleRow {
    Second,
    Third,
}

impl MiddleRow {
    pub const ALL: [MiddleRow; 2] = [MiddleRow::Second, MiddleRow::Third];

    /// Index into `RampModel::entries`.
    pub fn row(self) -> usize {
        match self {
            MiddleRow::Second => 1,
            MiddleRow::Third => 2,
        }
    }

    /// Index into `RampModel::bindings`.
    pub(crate) fn slot(self) -> usize {
        self.row() - 1
    }
}

impl TryFrom<usize> for MiddleRow {
    type Error = RampError;

    fn try_from(row: usize) -> Result<Self, Self::Error> {
        match row {
            1 => Ok(MiddleRow::Second),
            2 => Ok(MiddleRow::Third),
            _ => Err(RampError::NotAMiddleRow { row }),
        }
    }
}

/// Complete ramp state, mutated in place for the life of the editor.
#[derive(Debug, Clone, PartialEq)]
pub struct RampModel {
    pub entries: [RampEntry; RAMP_LEN],
    pub bindings: [InterpolationBinding; 2],
    pub ranges: RangeSpec,
}

impl Default for RampModel {
    fn default() -> Self {
        let [l0, l3] = constants::DEFAULT_ENDPOINT_LIGHTNESS;
        let [f1, f2] = constants::DEFAULT_FRACTIONS;
        let rgb = constants::DEFAULT_INPUT_RGB;
        Self {
            entries: [
                RampEntry::new(rgb[0], l0),
                RampEntry::new(rgb[1], l0 + f1 * (l3 - l0)),
                RampEntry::new(rgb[2], l0 + f2 * (l3 - l0)),
                RampEntry::new(rgb[3], l3),
            ],
            bindings: [
                InterpolationBinding::derived(f1),
                InterpolationBinding::derived(f2),
            ],
            ranges: RangeSpec::default(),
        }
    }
}

impl RampModel {
    pub fn binding(&self, middle: MiddleRow) -> &InterpolationBinding {
        &self.bindings[middle.slot()]
    }

    /// Accepts three explicit input values for a row.
    pub fn set_input_rgb(&mut self, row: usize, rgb: [f64; 3]) -> Result<(), RampError> {
        let entry = self
            .entries
            .get_mut(row)
            .ok_or(RampError::RowOutOfRange { row })?;
        entry.input_rgb = rgb;
        Ok(())
    }

    /// Writes one input channel of a row.
    pub fn set_input_channel(
        &mut self,
        row: usize,
        channel: usize,
        value: f64,
    ) -> Result<(), RampError> {
        let entry = self
            .entries
            .get_mut(row)
            .ok_or(RampError::RowOutOfRange { row })?;
        let slot = entry
            .input_rgb
            .get_mut(channel)
            .ok_or(RampError::ChannelOutOfRange { channel })?;
        *slot = value;
        Ok(())
    }

    /// Stores input values rounded the way the row's fields show them.
    pub fn set_input_rgb_as_shown(&mut self, row: usize, rgb: [f64; 3]) -> Result<(), RampError> {
        let range = self.ranges.input_range;
        self.set_input_rgb(row, [0, 1, 2].map(|c| format::round_input_value(rgb[c], range[c])))
    }

    /// Stores a color picked in 0–255 RGB, scaled into the input range.
    pub fn apply_picked_rgb8(&mut self, row: usize, rgb: [u8; 3]) -> Result<(), RampError> {
        let range = self.ranges.input_range;
        let scaled = [
            rgb[0] as f64 * range[0] / 255.0,
            rgb[1] as f64 * range[1] / 255.0,
            rgb[2] as f64 * range[2] / 255.0,
        ];
        self.set_input_rgb_as_shown(row, scaled)
    }

    pub fn set_input_range(&mut self, range: [f64; 3]) {
        self.ranges.input_range = range;
    }

    pub fn set_output_range(&mut self, range: [f64; 3]) {
        self.ranges.output_range = range;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_startup_state() {
        let model = RampModel::default();
        assert_eq!(model.entries[FIRST].target_lightness, 10.0);
        assert_eq!(model.entries[LAST].target_lightness, 95.0);
        assert!((model.entries[1].target_lightness - 38.05).abs() < 1e-12);
        assert!((model.entries[2].target_lightness - 66.95).abs() < 1e-12);
        assert_eq!(model.entries[0].input_rgb, [0.0, 120.0, 240.0]);
        assert_eq!(model.entries[3].input_rgb, [240.0, 120.0, 0.0]);
        assert!(model.bindings.iter().all(InterpolationBinding::is_enabled));
        assert_eq!(model.ranges.output_range, [31.0, 63.0, 31.0]);
    }

    #[test]
    fn middle_row_from_index() {
        assert_eq!(MiddleRow::try_from(1), Ok(MiddleRow::Second));
        assert_eq!(MiddleRow::try_from(2), Ok(MiddleRow::Third));
        assert_eq!(
            MiddleRow::try_from(3),
            Err(RampError::NotAMiddleRow { row: 3 })
        );
        assert_eq!(MiddleRow::Third.slot(), 1);
    }

    #[test]
    fn picked_color_scales_into_input_range() {
        let mut model = RampModel::default();
        model.set_input_range([31.0, 63.0, 1.0]);
        model.apply_picked_rgb8(2, [255, 0, 51]).unwrap();
        let rgb = model.entries[2].input_rgb;
        assert_eq!(rgb[0], 31.0);
        assert_eq!(rgb[1], 0.0);
        assert!((rgb[2] - 0.2).abs() < 1e-12);
    }

    #[test]
    fn edits_reject_missing_rows() {
        let mut model = RampModel::default();
        assert_eq!(
            model.set_input_rgb(4, [0.0; 3]),
            Err(RampError::RowOutOfRange { row: 4 })
        );
        assert_eq!(
            model.set_input_channel(0, 3, 1.0),
            Err(RampError::ChannelOutOfRange { channel: 3 })
        );
        assert_eq!(model.entries[0].input_rgb, [0.0, 120.0, 240.0]);
    }

    #[test]
    fn pasted_inputs_store_what_the_field_shows() {
        let mut model = RampModel::default();
        model.set_input_range([255.0, 255.0, 1.0]);
        model
            .set_input_rgb_as_shown(1, [12.3456, 200.04, 0.12345])
            .unwrap();
        assert_eq!(model.entries[1].input_rgb, [12.3, 200.0, 0.123]);

        // Committing the untouched field text changes nothing.
        let shown = format::format_input_value(model.entries[1].input_rgb[0], 255.0);
        let before = model.clone();
        model
            .set_input_channel(1, 0, format::parse_number(&shown).unwrap())
            .unwrap();
        assert_eq!(model, before);
    }

    #[test]
    fn picked_color_is_rounded_like_its_fields() {
        let mut model = RampModel::default();
        model.set_input_range([31.0, 31.0, 31.0]);
        model.apply_picked_rgb8(0, [128, 64, 1]).unwrap();
        // 128 * 31 / 255 = 15.56..., shown with one decimal.
        assert_eq!(model.entries[0].input_rgb, [15.6, 7.8, 0.1]);
    }

    #[test]
    fn uniform_ranges() {
        let ranges = RangeSpec::uniform(1.0, 31.0);
        assert_eq!(ranges.input_range, [1.0; 3]);
        assert_eq!(ranges.output_range, [31.0; 3]);
        assert_eq!(RangeSpec::default(), RangeSpec::new([255.0; 3], [31.0, 63.0, 31.0]));
    }
}
