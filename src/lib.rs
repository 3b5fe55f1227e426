//! # floem-ramp
//!
//! A 4-shade palette normalizer for [Floem](https://github.com/lapce/floem).
//!
//! Each row of the ramp takes an input RGB color, converts it to CIELAB,
//! swaps in a target lightness, and converts back to RGB in a configurable
//! output range (e.g. 5/6/5-bit channels). The two middle rows can follow
//! the endpoints through an interpolation fraction or be set by hand.
//!
//! The numeric core (`math`, `model`, `engine`, `format`, `paste`) has no UI
//! dependencies; `ramp_editor` is the Floem view on top of it.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use floem::prelude::*;
//! use floem_ramp::{ramp_editor, RampModel};
//!
//! let model = RwSignal::new(RampModel::default());
//! // Use `ramp_editor(model)` in your Floem view tree.
//! ```

mod color;
mod constants;
pub mod engine;
mod error;
#[cfg(all(feature = "eyedropper", target_os = "macos"))]
mod eyedropper;
pub mod format;
mod gamut_warning;
mod inputs;
mod interpolate;
pub mod math;
mod model;
pub mod paste;
mod ramp_editor;

pub use color::Lab;
pub use engine::{apply_edit, recalculate_all, RowDisplay};
pub use error::RampError;
pub use interpolate::{fraction_of, lightness_at};
pub use model::{
    BindingState, InterpolationBinding, MiddleRow, RampEntry, RampModel, RangeSpec, FIRST, LAST,
    RAMP_LEN,
};

use std::sync::Once;

use floem::prelude::*;
use floem::reactive::{RwSignal, SignalUpdate};
use floem::text::FONT_SYSTEM;

/// Initial window size for hosts that give the editor its own window.
pub const WINDOW_SIZE: (f64, f64) = constants::WINDOW_SIZE;

static LOAD_LUCIDE_FONT: Once = Once::new();

/// Creates the ramp editor view.
///
/// The editor reads from and writes to `model`. It runs one recalculation
/// pass up front so every derived field is filled before the first paint.
pub fn ramp_editor(model: RwSignal<RampModel>) -> impl IntoView {
    LOAD_LUCIDE_FONT.call_once(|| {
        FONT_SYSTEM
            .lock()
            .db_mut()
            .load_font_data(lucide_icons::LUCIDE_FONT_BYTES.to_vec());
    });
    model.update(|m| {
        if let Err(err) = engine::recalculate_all(m) {
            tracing::warn!(%err, "initial recalculation failed");
        }
    });
    ramp_editor::ramp_editor(model)
}
