//! Desktop entry point: opens the normalizer in its own window.

use floem::event::{Event, EventListener, EventPropagation};
use floem::keyboard::{Key, NamedKey};
use floem::prelude::*;
use floem::window::WindowConfig;
use floem_ramp::{ramp_editor, RampModel, WINDOW_SIZE};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let model = RwSignal::new(RampModel::default());

    floem::Application::new()
        .window(
            move |_| {
                ramp_editor(model)
                    .on_event_stop(EventListener::WindowClosed, |_| floem::quit_app())
                    .on_event(EventListener::KeyDown, |e| {
                        if let Event::KeyDown(ke) = e {
                            if ke.key.logical_key == Key::Named(NamedKey::Escape) {
                                floem::quit_app();
                                return EventPropagation::Stop;
                            }
                        }
                        EventPropagation::Continue
                    })
            },
            Some(
                WindowConfig::default()
                    .size(WINDOW_SIZE)
                    .title("GB Palette Normalizer"),
            ),
        )
        .run();
}
