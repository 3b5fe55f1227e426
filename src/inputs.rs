//! Field components for the ramp editor: committed numeric inputs, read-only
//! value cells, clipboard buttons, and the interpolation toggle.

use floem::event::EventPropagation;
use floem::prelude::*;
use floem::reactive::{RwSignal, SignalGet, SignalUpdate};

use crate::constants;
use crate::error::RampError;
use crate::format;

const READ_ONLY_BG: Color = Color::rgb8(56, 56, 56);
const READ_ONLY_FG: Color = Color::rgb8(204, 204, 204);
const ICON_IDLE: Color = Color::rgb8(120, 120, 120);
const ICON_PRESSED: Color = Color::rgb8(80, 80, 80);

/// An editable numeric field committed on Enter or focus loss.
///
/// The parsed value goes to `on_commit`. When parsing or the commit fails, or
/// the field is currently read-only, the text is reset to `current()`.
pub(crate) fn number_field(
    text: RwSignal<String>,
    read_only: impl Fn() -> bool + Copy + 'static,
    current: impl Fn() -> String + Copy + 'static,
    on_commit: impl Fn(f64) -> Result<(), RampError> + Copy + 'static,
) -> impl IntoView {
    let commit = move || {
        let raw = text.get_untracked();
        if read_only() {
            let shown = current();
            if raw != shown {
                text.set(shown);
            }
            return;
        }
        let result = format::parse_number(&raw).and_then(on_commit);
        if let Err(err) = result {
            tracing::warn!(%err, "edit rejected");
            let shown = current();
            if raw != shown {
                text.set(shown);
            }
        }
    };

    text_input(text)
        .style(move |s| {
            let ro = read_only();
            s.width(constants::FIELD_WIDTH)
                .padding(3.0)
                .font_size(constants::INPUT_FONT)
                .font_family("monospace".to_string())
                .background(if ro { READ_ONLY_BG } else { Color::WHITE })
                .color(if ro { READ_ONLY_FG } else { Color::BLACK })
                .border(1.0)
                .border_color(Color::rgb8(200, 200, 200))
                .border_radius(constants::RADIUS)
        })
        .on_event_stop(floem::event::EventListener::FocusLost, move |_| {
            commit();
        })
        .on_event(floem::event::EventListener::KeyDown, move |e| {
            if let floem::event::Event::KeyDown(ke) = e {
                if ke.key.logical_key
                    == floem::keyboard::Key::Named(floem::keyboard::NamedKey::Enter)
                {
                    commit();
                    return EventPropagation::Stop;
                }
            }
            EventPropagation::Continue
        })
}

/// A read-only cell showing a derived value.
pub(crate) fn value_cell(value: impl Fn() -> String + 'static) -> impl IntoView {
    label(value).style(|s| {
        s.width(constants::FIELD_WIDTH)
            .padding(3.0)
            .font_size(constants::INPUT_FONT)
            .font_family("monospace".to_string())
            .background(READ_ONLY_BG)
            .color(READ_ONLY_FG)
            .border(1.0)
            .border_color(Color::rgb8(85, 85, 85))
            .border_radius(constants::RADIUS)
    })
}

/// Header or caption text.
pub(crate) fn caption(text: &'static str, width: f32) -> impl IntoView {
    label(move || text).style(move |s| {
        s.width(width)
            .height(constants::HEADER_HEIGHT)
            .font_size(constants::LABEL_FONT)
            .color(ICON_IDLE)
            .justify_content(Some(floem::taffy::AlignContent::Center))
    })
}

fn icon_button(icon: lucide_icons::Icon, on_click: impl Fn() + 'static) -> impl IntoView {
    let pressed = RwSignal::new(false);
    container(
        label(move || icon.unicode().to_string()).style(move |s| {
            let c = if pressed.get() { ICON_PRESSED } else { ICON_IDLE };
            s.font_size(14.0).font_family("lucide".to_string()).color(c)
        }),
    )
    .style(|s| {
        s.size(20.0, 20.0)
            .items_center()
            .justify_center()
            .border_radius(constants::RADIUS)
            .cursor(floem::style::CursorStyle::Pointer)
            .hover(|s| s.background(Color::rgb8(230, 230, 230)))
    })
    .on_event_stop(floem::event::EventListener::PointerDown, move |_| {
        pressed.set(true);
    })
    .on_event_stop(floem::event::EventListener::PointerUp, move |_| {
        pressed.set(false);
        on_click();
    })
}

/// A small button that hands the clipboard text to `on_paste`.
pub(crate) fn paste_button(on_paste: impl Fn(String) + 'static) -> impl IntoView {
    icon_button(lucide_icons::Icon::ClipboardPaste, move || {
        if let Some(text) = read_clipboard() {
            on_paste(text);
        }
    })
}

/// Checkbox bound to `checked`; `on_toggle` receives the new state.
pub(crate) fn toggle(
    checked: impl Fn() -> bool + Copy + 'static,
    on_toggle: impl Fn(bool) + 'static,
) -> impl IntoView {
    container(
        label(move || {
            if checked() {
                lucide_icons::Icon::Check.unicode().to_string()
            } else {
                String::new()
            }
        })
        .style(|s| {
            s.font_size(12.0)
                .font_family("lucide".to_string())
                .color(Color::rgb8(40, 40, 40))
        }),
    )
    .style(|s| {
        s.size(16.0, 16.0)
            .items_center()
            .justify_center()
            .background(Color::WHITE)
            .border(1.0)
            .border_color(Color::rgb8(160, 160, 160))
            .border_radius(constants::RADIUS)
            .cursor(floem::style::CursorStyle::Pointer)
    })
    .on_event_stop(floem::event::EventListener::PointerUp, move |_| {
        on_toggle(!checked());
    })
}

pub(crate) fn copy_to_clipboard(text: &str) {
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
        Ok(()) => tracing::info!(text, "copied to clipboard"),
        Err(err) => tracing::warn!(%err, "clipboard copy failed"),
    }
}

fn read_clipboard() -> Option<String> {
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.get_text()) {
        Ok(text) => Some(text.trim().to_string()),
        Err(err) => {
            tracing::warn!(%err, "clipboard read failed");
            None
        }
    }
}
