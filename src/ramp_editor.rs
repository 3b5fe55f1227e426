//! Ramp editor: the four-row grid (input RGB, CIELAB, interpolation, target
//! L*, output RGB, swatches) above the input/output range settings.

use std::cell::Cell;
use std::rc::Rc;

use floem::prelude::*;
use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate};
use floem::AnyView;

use crate::constants;
use crate::engine::{self, RowDisplay};
use crate::error::RampError;
#[cfg(all(feature = "eyedropper", target_os = "macos"))]
use crate::eyedropper::sample_rgb8;
use crate::format;
use crate::gamut_warning::gamut_warning;
use crate::inputs::{caption, copy_to_clipboard, number_field, paste_button, toggle, value_cell};
use crate::model::{MiddleRow, RAMP_LEN, RampModel};
use crate::paste::{self, SinglePaste};

const ICON_WIDTH: f32 = 20.0;

/// Width of a three-field group, gaps included.
const TRIPLE_WIDTH: f32 = constants::FIELD_WIDTH * 3.0 + constants::GAP * 2.0;

/// Model plus the display rows of the last successful pass over it.
#[derive(Clone, Copy)]
struct Editor {
    model: RwSignal<RampModel>,
    rows: RwSignal<[RowDisplay; RAMP_LEN]>,
}

impl Editor {
    /// Applies `edit` and recalculates. The rows follow the model through
    /// the effect in `ramp_editor`, so a failed pass leaves them as they were.
    fn commit(
        self,
        edit: impl FnOnce(&mut RampModel) -> Result<(), RampError>,
    ) -> Result<(), RampError> {
        let mut outcome = Ok(());
        self.model
            .update(|m| outcome = engine::apply_edit(m, edit).map(|_| ()));
        outcome
    }

    fn is_derived(self, row: usize) -> bool {
        self.is_derived_in(&self.model.get(), row)
    }

    fn is_derived_in(self, model: &RampModel, row: usize) -> bool {
        MiddleRow::try_from(row)
            .map(|middle| model.binding(middle).is_enabled())
            .unwrap_or(false)
    }

    fn input_text(self, row: usize, channel: usize) -> String {
        format!("{}", self.model.get_untracked().entries[row].input_rgb[channel])
    }
}

/// Commits an edit to a row's input RGB and rewrites its fields from the
/// model using the input-range precision rule. The edit is expected to store
/// rounded values so the fields and the model agree.
fn commit_row_inputs(
    editor: Editor,
    row: usize,
    inputs: [RwSignal<String>; 3],
    edit: impl FnOnce(&mut RampModel) -> Result<(), RampError>,
) {
    if let Err(err) = editor.commit(edit) {
        tracing::warn!(row, %err, "input color rejected");
        return;
    }
    let model = editor.model.get_untracked();
    let values = model.entries[row].input_rgb;
    for (c, text) in inputs.iter().enumerate() {
        text.set(format::format_input_value(values[c], model.ranges.input_range[c]));
    }
}

/// Handles a paste into a single-value field sharing `guard` with every other
/// paste button.
fn paste_into(
    guard: &Cell<bool>,
    field: RwSignal<String>,
    text: String,
    read_only: bool,
    current: impl Fn() -> String,
    commit: impl FnOnce(f64) -> Result<(), RampError>,
) {
    if guard.replace(true) {
        return;
    }
    match paste::paste_single(&text, read_only) {
        SinglePaste::Commit(value) => {
            field.set(format!("{value}"));
            if let Err(err) = commit(value) {
                tracing::warn!(%err, "pasted value rejected");
                field.set(current());
            }
        }
        SinglePaste::Literal(text) => field.set(text),
        SinglePaste::Ignore => tracing::debug!("field is derived, paste ignored"),
    }
    guard.set(false);
}

fn swatch(rgb: impl Fn() -> [u8; 3] + 'static) -> floem::views::Empty {
    empty().style(move |s| {
        let [r, g, b] = rgb();
        s.width(constants::SWATCH_SIZE)
            .height(constants::SWATCH_SIZE)
            .border_radius(constants::RADIUS)
            .border(1.0)
            .border_color(Color::rgb8(180, 180, 180))
            .background(Color::rgb8(r, g, b))
    })
}

fn input_swatch(editor: Editor, row: usize, inputs: [RwSignal<String>; 3]) -> impl IntoView {
    let view = swatch(move || editor.rows.get()[row].input_swatch);
    #[cfg(all(feature = "eyedropper", target_os = "macos"))]
    let view = view
        .style(|s| s.cursor(floem::style::CursorStyle::Pointer))
        .on_event_stop(floem::event::EventListener::PointerUp, move |_| {
            sample_rgb8(move |rgb| {
                tracing::debug!(row, ?rgb, "picked input color");
                commit_row_inputs(editor, row, inputs, move |m| m.apply_picked_rgb8(row, rgb));
            });
        });
    #[cfg(not(all(feature = "eyedropper", target_os = "macos")))]
    let _ = inputs;
    view
}

fn output_swatch(editor: Editor, row: usize) -> impl IntoView {
    swatch(move || editor.rows.get()[row].output_swatch)
        .style(|s| s.cursor(floem::style::CursorStyle::Pointer))
        .on_event_stop(floem::event::EventListener::PointerUp, move |_| {
            copy_to_clipboard(&editor.rows.get_untracked()[row].copy_text());
        })
}

fn output_cell(editor: Editor, row: usize, channel: usize) -> impl IntoView {
    h_stack((
        gamut_warning(move || editor.rows.get()[row].out_of_gamut[channel]),
        label(move || editor.rows.get()[row].output[channel].clone()),
    ))
    .style(|s| {
        s.width(constants::FIELD_WIDTH)
            .padding(3.0)
            .gap(2.0)
            .items_center()
            .font_size(constants::INPUT_FONT)
            .font_family("monospace".to_string())
            .background(Color::rgb8(56, 56, 56))
            .color(Color::rgb8(204, 204, 204))
            .border(1.0)
            .border_color(Color::rgb8(85, 85, 85))
            .border_radius(constants::RADIUS)
    })
}

fn interpolation_cell(
    editor: Editor,
    row: usize,
    fraction_text: RwSignal<String>,
    pasting: Rc<Cell<bool>>,
) -> AnyView {
    let Ok(middle) = MiddleRow::try_from(row) else {
        return empty()
            .style(|s| s.width(constants::FIELD_WIDTH + ICON_WIDTH))
            .into_any();
    };
    let enabled = move || editor.model.get().binding(middle).is_enabled();
    let current =
        move || format::format_fixed2(editor.model.get_untracked().binding(middle).fraction);
    let paste_fraction = move |text: String| {
        paste_into(&pasting, fraction_text, text, !enabled(), current, move |v| {
            editor.commit(move |m| m.set_fraction(middle, v))
        });
    };
    v_stack((
        toggle(enabled, move |on| {
            let result = editor.commit(move |m| {
                m.set_interpolation_enabled(middle, on);
                Ok(())
            });
            if let Err(err) = result {
                tracing::warn!(row, %err, "interpolation toggle not recalculated");
            }
        }),
        h_stack((
            number_field(
                fraction_text,
                move || !enabled(),
                current,
                move |v| editor.commit(move |m| m.set_fraction(middle, v)),
            ),
            paste_button(paste_fraction),
        ))
        .style(|s| s.items_center().gap(2.0)),
    ))
    .style(|s| {
        s.width(constants::FIELD_WIDTH + ICON_WIDTH)
            .items_center()
            .gap(1.0)
    })
    .into_any()
}

fn entry_row(editor: Editor, row: usize, pasting: Rc<Cell<bool>>) -> impl IntoView {
    let model = editor.model.get_untracked();
    let entry = model.entries[row];
    let inputs = [0, 1, 2].map(|c| RwSignal::new(format!("{}", entry.input_rgb[c])));
    let lightness_text = RwSignal::new(match MiddleRow::try_from(row) {
        Ok(_) => format::format_fixed2(entry.target_lightness),
        Err(_) => format!("{}", entry.target_lightness),
    });
    let fraction_text = RwSignal::new(match MiddleRow::try_from(row) {
        Ok(middle) => format::format_fixed2(model.binding(middle).fraction),
        Err(_) => String::new(),
    });

    // Published rows → whichever of lightness/fraction is derived.
    if let Ok(middle) = MiddleRow::try_from(row) {
        create_effect(move |_| {
            let display = editor.rows.get();
            let shown = &display[row];
            if editor.model.get_untracked().binding(middle).is_enabled() {
                if lightness_text.get_untracked() != shown.target_lightness {
                    lightness_text.set(shown.target_lightness.clone());
                }
            } else if let Some(fraction) = &shown.fraction {
                if &fraction_text.get_untracked() != fraction {
                    fraction_text.set(fraction.clone());
                }
            }
        });
    }

    // Model → editable fields, for changes that did not come from this row.
    create_effect(move |_| {
        let model = editor.model.get();
        let entry = model.entries[row];
        for (c, text) in inputs.iter().enumerate() {
            let value = entry.input_rgb[c];
            if format::parse_number(&text.get_untracked()) != Ok(value) {
                text.set(format!("{value}"));
            }
        }
        let shown_as = |text: RwSignal<String>, value: f64| {
            let shown = format::parse_number(&text.get_untracked()).map(format::format_fixed2);
            if shown != Ok(format::format_fixed2(value)) {
                text.set(format::format_fixed2(value));
            }
        };
        match MiddleRow::try_from(row) {
            Ok(middle) if model.binding(middle).is_enabled() => {
                shown_as(fraction_text, model.binding(middle).fraction)
            }
            _ if !editor.is_derived_in(&model, row) => {
                shown_as(lightness_text, entry.target_lightness)
            }
            _ => {}
        }
    });

    let input_field = move |c: usize| {
        number_field(
            inputs[c],
            || false,
            move || editor.input_text(row, c),
            move |v| editor.commit(move |m| m.set_input_channel(row, c, v)),
        )
    };

    let rgb_guard = pasting.clone();
    let lightness_guard = pasting.clone();

    let paste_rgb = move |text: String| {
        if rgb_guard.replace(true) {
            return;
        }
        match paste::extract_rgb(&text) {
            Some(values) => commit_row_inputs(editor, row, inputs, move |m| {
                m.set_input_rgb_as_shown(row, values)
            }),
            None => inputs[0].set(text),
        }
        rgb_guard.set(false);
    };

    let current_lightness = move || {
        format::format_fixed2(editor.model.get_untracked().entries[row].target_lightness)
    };
    let paste_lightness = move |text: String| {
        paste_into(
            &lightness_guard,
            lightness_text,
            text,
            editor.is_derived(row),
            current_lightness,
            move |v| editor.commit(move |m| m.set_target_lightness(row, v)),
        );
    };

    h_stack((
        input_swatch(editor, row, inputs),
        h_stack((
            input_field(0),
            input_field(1),
            input_field(2),
            paste_button(paste_rgb),
        ))
        .style(|s| s.items_center().gap(constants::GAP)),
        h_stack((
            value_cell(move || editor.rows.get()[row].lab[0].clone()),
            value_cell(move || editor.rows.get()[row].lab[1].clone()),
            value_cell(move || editor.rows.get()[row].lab[2].clone()),
        ))
        .style(|s| s.gap(constants::GAP)),
        interpolation_cell(editor, row, fraction_text, pasting),
        h_stack((
            number_field(
                lightness_text,
                move || editor.is_derived(row),
                current_lightness,
                move |v| editor.commit(move |m| m.set_target_lightness(row, v)),
            ),
            paste_button(paste_lightness),
        ))
        .style(|s| s.items_center().gap(constants::GAP)),
        h_stack((
            output_cell(editor, row, 0),
            output_cell(editor, row, 1),
            output_cell(editor, row, 2),
        ))
        .style(|s| s.gap(constants::GAP)),
        output_swatch(editor, row),
    ))
    .style(|s| {
        s.height(constants::ROW_HEIGHT + 8.0)
            .items_center()
            .gap(constants::GAP)
    })
}

fn range_field(editor: Editor, output: bool, channel: usize) -> impl IntoView {
    let value = move || {
        let ranges = editor.model.get_untracked().ranges;
        if output {
            ranges.output_range[channel]
        } else {
            ranges.input_range[channel]
        }
    };
    let text = RwSignal::new(format!("{}", value()));
    h_stack((
        caption(["R:", "G:", "B:"][channel], 16.0),
        number_field(
            text,
            || false,
            move || format!("{}", value()),
            move |v| {
                editor.commit(move |m| {
                    if output {
                        let mut range = m.ranges.output_range;
                        range[channel] = v;
                        m.set_output_range(range);
                    } else {
                        let mut range = m.ranges.input_range;
                        range[channel] = v;
                        m.set_input_range(range);
                    }
                    Ok(())
                })
            },
        ),
    ))
    .style(|s| s.items_center().gap(4.0))
}

fn range_settings(editor: Editor) -> impl IntoView {
    h_stack((
        caption("Input range:", 80.0),
        range_field(editor, false, 0),
        range_field(editor, false, 1),
        range_field(editor, false, 2),
        empty().style(|s| s.flex_grow(1.0)),
        caption("Output range:", 90.0),
        range_field(editor, true, 0),
        range_field(editor, true, 1),
        range_field(editor, true, 2),
    ))
    .style(|s| s.items_center().gap(constants::GAP).margin_top(6.0))
}

fn headers() -> impl IntoView {
    v_stack((
        h_stack((
            caption("", constants::SWATCH_SIZE),
            caption("Input RGB", TRIPLE_WIDTH),
            caption("", ICON_WIDTH),
            caption("Converted CIELAB", TRIPLE_WIDTH),
            caption("Interpolate", constants::FIELD_WIDTH + ICON_WIDTH),
            caption("Target L*", constants::FIELD_WIDTH),
            caption("", ICON_WIDTH),
            caption("Output RGB", TRIPLE_WIDTH),
        ))
        .style(|s| s.gap(constants::GAP)),
        h_stack((
            caption("", constants::SWATCH_SIZE),
            caption("R", constants::FIELD_WIDTH),
            caption("G", constants::FIELD_WIDTH),
            caption("B", constants::FIELD_WIDTH),
            caption("", ICON_WIDTH),
            caption("L*", constants::FIELD_WIDTH),
            caption("a*", constants::FIELD_WIDTH),
            caption("b*", constants::FIELD_WIDTH),
            caption(
                "",
                constants::FIELD_WIDTH * 3.0 + ICON_WIDTH * 2.0 + constants::GAP * 3.0,
            ),
            caption("R", constants::FIELD_WIDTH),
            caption("G", constants::FIELD_WIDTH),
            caption("B", constants::FIELD_WIDTH),
        ))
        .style(|s| s.gap(constants::GAP)),
    ))
}

/// Creates the ramp grid and range settings bound to `model`.
///
/// `model` should already hold a successful pass; its rows are the initial
/// display. Later changes to `model`, from the editor or from the host, are
/// recalculated on a copy before they are shown.
pub(crate) fn ramp_editor(model: RwSignal<RampModel>) -> impl IntoView {
    let rows = RwSignal::new(model.get_untracked().display_rows());
    let editor = Editor { model, rows };

    // Hosts may change the model directly; recompute rows from it either way.
    create_effect(move |_| match engine::preview_rows(&model.get()) {
        Ok(display) => rows.set(display),
        Err(err) => tracing::debug!(%err, "rows kept from last successful pass"),
    });

    // Shared by every paste button; a paste never re-enters another.
    let pasting = Rc::new(Cell::new(false));

    v_stack((
        headers(),
        entry_row(editor, 0, pasting.clone()),
        entry_row(editor, 1, pasting.clone()),
        entry_row(editor, 2, pasting.clone()),
        entry_row(editor, 3, pasting),
        range_settings(editor),
    ))
    .style(|st| {
        st.gap(2.0)
            .padding(constants::PADDING)
            .size_full()
            .background(Color::rgb8(242, 242, 242))
    })
}
