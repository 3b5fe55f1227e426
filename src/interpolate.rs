//! Interpolation synchronizer.
//!
//! Each middle row is either `Derived` (lightness follows the stored fraction)
//! or `Independent` (lightness is user-set and the fraction is back-derived).
//! Every edit that touches an endpoint or an independent variable resyncs the
//! dependent variables before returning.

use crate::error::RampError;
use crate::model::{BindingState, FIRST, LAST, MiddleRow, RampModel};

/// `l0 + fraction * (l3 - l0)`.
pub fn lightness_at(l0: f64, l3: f64, fraction: f64) -> f64 {
    l0 + fraction * (l3 - l0)
}

/// Position of `lightness` between the endpoints.
///
/// Returns `DegenerateEndpoints` when `l3 == l0`; callers treat that as
/// "leave the fraction alone".
pub fn fraction_of(l0: f64, l3: f64, lightness: f64) -> Result<f64, RampError> {
    let span = l3 - l0;
    if span == 0.0 {
        return Err(RampError::DegenerateEndpoints);
    }
    Ok((lightness - l0) / span)
}

impl RampModel {
    fn endpoints(&self) -> (f64, f64) {
        (
            self.entries[FIRST].target_lightness,
            self.entries[LAST].target_lightness,
        )
    }

    /// Recomputes the dependent variable of one binding.
    fn sync_binding(&mut self, middle: MiddleRow) {
        let (l0, l3) = self.endpoints();
        let binding = self.bindings[middle.slot()];
        let entry = &mut self.entries[middle.row()];
        match binding.state {
            BindingState::Derived => {
                entry.target_lightness = lightness_at(l0, l3, binding.fraction);
            }
            BindingState::Independent => {
                match fraction_of(l0, l3, entry.target_lightness) {
                    Ok(fraction) => self.bindings[middle.slot()].fraction = fraction,
                    Err(_) => tracing::debug!(
                        row = middle.row(),
                        "endpoints coincide, keeping previous fraction"
                    ),
                }
            }
        }
    }

    /// Resolves every middle row's dependent variable against the current
    /// endpoints.
    pub fn resolve_lightness(&mut self) {
        for middle in MiddleRow::ALL {
            self.sync_binding(middle);
        }
    }

    /// Toggles interpolation for a middle row.
    ///
    /// Enabling recomputes lightness from the stored fraction. Disabling
    /// freezes the last derived lightness and back-derives the fraction.
    pub fn set_interpolation_enabled(&mut self, middle: MiddleRow, enabled: bool) {
        let state = if enabled {
            BindingState::Derived
        } else {
            BindingState::Independent
        };
        let binding = &mut self.bindings[middle.slot()];
        if binding.state == state {
            return;
        }
        binding.state = state;
        tracing::debug!(row = middle.row(), ?state, "interpolation toggled");
        self.sync_binding(middle);
    }

    /// Sets a row's target lightness.
    ///
    /// Endpoint edits resync both bindings. Middle rows accept the edit only
    /// while their binding is `Independent`.
    pub fn set_target_lightness(&mut self, row: usize, lightness: f64) -> Result<(), RampError> {
        match row {
            FIRST | LAST => {
                self.entries[row].target_lightness = lightness;
                self.resolve_lightness();
                Ok(())
            }
            _ => {
                let middle = MiddleRow::try_from(row)
                    .map_err(|_| RampError::RowOutOfRange { row })?;
                if self.binding(middle).is_enabled() {
                    return Err(RampError::LightnessIsDerived { row });
                }
                self.entries[row].target_lightness = lightness;
                self.sync_binding(middle);
                Ok(())
            }
        }
    }

    /// Sets a middle row's fraction while its binding is `Derived`.
    pub fn set_fraction(&mut self, middle: MiddleRow, fraction: f64) -> Result<(), RampError> {
        if !self.binding(middle).is_enabled() {
            return Err(RampError::FractionIsDerived { row: middle.row() });
        }
        self.bindings[middle.slot()].fraction = fraction;
        self.sync_binding(middle);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn default_fraction_reproduces_lightness() {
        assert!((lightness_at(10.0, 95.0, 0.33) - 38.05).abs() < EPSILON);
    }

    #[test]
    fn fraction_back_derivation() {
        assert_eq!(fraction_of(0.0, 100.0, 50.0), Ok(0.5));
        assert_eq!(
            fraction_of(40.0, 40.0, 50.0),
            Err(RampError::DegenerateEndpoints)
        );
    }

    #[test]
    fn endpoint_edit_moves_derived_rows() {
        let mut model = RampModel::default();
        model.set_target_lightness(LAST, 100.0).unwrap();
        assert!((model.entries[1].target_lightness - (10.0 + 0.33 * 90.0)).abs() < EPSILON);
        assert!((model.entries[2].target_lightness - (10.0 + 0.67 * 90.0)).abs() < EPSILON);
    }

    #[test]
    fn endpoint_edit_rederives_independent_fraction() {
        let mut model = RampModel::default();
        model.set_interpolation_enabled(MiddleRow::Second, false);
        model.set_target_lightness(1, 50.0).unwrap();
        model.set_target_lightness(FIRST, 0.0).unwrap();
        model.set_target_lightness(LAST, 100.0).unwrap();

        assert_eq!(model.entries[1].target_lightness, 50.0);
        assert!((model.bindings[0].fraction - 0.5).abs() < EPSILON);
        // The other row is still derived from its own fraction.
        assert!((model.entries[2].target_lightness - 67.0).abs() < EPSILON);
    }

    #[test]
    fn disabling_freezes_derived_lightness() {
        let mut model = RampModel::default();
        model.set_fraction(MiddleRow::Third, 0.5).unwrap();
        model.set_interpolation_enabled(MiddleRow::Third, false);
        assert!((model.entries[2].target_lightness - 52.5).abs() < EPSILON);
        assert!((model.bindings[1].fraction - 0.5).abs() < EPSILON);
        assert_eq!(model.bindings[1].state, BindingState::Independent);
    }

    #[test]
    fn enabling_restores_lightness_from_fraction() {
        let mut model = RampModel::default();
        model.set_interpolation_enabled(MiddleRow::Second, false);
        model.set_target_lightness(1, 80.0).unwrap();
        let fraction = model.bindings[0].fraction;
        assert!((fraction - 70.0 / 85.0).abs() < EPSILON);

        model.set_interpolation_enabled(MiddleRow::Second, true);
        assert!((model.entries[1].target_lightness - 80.0).abs() < 1e-9);
        assert_eq!(model.bindings[0].fraction, fraction);
    }

    #[test]
    fn fraction_edit_leaves_other_binding_alone() {
        let mut model = RampModel::default();
        let before = model.entries[2].target_lightness;
        model.set_fraction(MiddleRow::Second, 0.0).unwrap();
        assert_eq!(model.entries[1].target_lightness, 10.0);
        assert_eq!(model.entries[2].target_lightness, before);
    }

    #[test]
    fn degenerate_endpoints_keep_fraction() {
        let mut model = RampModel::default();
        model.set_interpolation_enabled(MiddleRow::Second, false);
        let fraction = model.bindings[0].fraction;
        model.set_target_lightness(LAST, 10.0).unwrap();
        assert_eq!(model.bindings[0].fraction, fraction);
        // Derived row collapses onto the endpoints.
        assert_eq!(model.entries[2].target_lightness, 10.0);
    }

    #[test]
    fn edits_respect_binding_state() {
        let mut model = RampModel::default();
        assert_eq!(
            model.set_target_lightness(1, 40.0),
            Err(RampError::LightnessIsDerived { row: 1 })
        );
        model.set_interpolation_enabled(MiddleRow::Third, false);
        assert_eq!(
            model.set_fraction(MiddleRow::Third, 0.2),
            Err(RampError::FractionIsDerived { row: 2 })
        );
        assert_eq!(
            model.set_target_lightness(7, 40.0),
            Err(RampError::RowOutOfRange { row: 7 })
        );
    }

    proptest! {
        #[test]
        fn fraction_inverts_lightness(
            l0 in 0.0f64..100.0,
            span in 1.0f64..100.0,
            fraction in -1.0f64..2.0
        ) {
            let l3 = l0 + span;
            let lightness = lightness_at(l0, l3, fraction);
            let back = fraction_of(l0, l3, lightness).unwrap();
            prop_assert!((back - fraction).abs() < 1e-9);
        }
    }
}
