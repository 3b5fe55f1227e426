//! Out-of-gamut indicator: a small warning triangle painted beside an output
//! value whose channel fell outside its range before clipping.

use floem::kurbo::{BezPath, Circle, Line, Rect, Stroke};
use floem::peniko::Color;
use floem::reactive::create_effect;
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, PaintCx, UpdateCx},
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::constants;

const FILL: Color = Color::rgb8(255, 215, 0);
const INK: Color = Color::rgb8(139, 69, 19);

pub struct GamutWarning {
    id: ViewId,
    visible: bool,
    size: floem::taffy::prelude::Size<f32>,
}

/// Creates the indicator. `flagged` is re-read whenever its signals change.
pub fn gamut_warning(flagged: impl Fn() -> bool + 'static) -> GamutWarning {
    let id = ViewId::new();
    let initial = flagged();

    create_effect(move |_| {
        id.update_state(flagged());
    });

    let edge = constants::WARNING_SIZE as f32;
    GamutWarning {
        id,
        visible: initial,
        size: Default::default(),
    }
    .style(move |s| s.width(edge).height(edge))
}

/// Triangle with its apex centered at the top of a `w` × `h` box.
fn triangle(w: f64, h: f64) -> BezPath {
    let mut path = BezPath::new();
    path.move_to((w / 2.0, 0.5));
    path.line_to((0.5, h - 0.5));
    path.line_to((w - 0.5, h - 0.5));
    path.close_path();
    path
}

impl View for GamutWarning {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(visible) = state.downcast::<bool>() {
            self.visible = *visible;
            self.id.request_layout();
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        self.size = layout.size;
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        if !self.visible || w == 0.0 || h == 0.0 {
            return;
        }

        let path = triangle(w, h);
        cx.fill(&path, FILL, 0.0);
        cx.stroke(&path, INK, &Stroke::new(1.0));

        // Exclamation mark
        let mid = w / 2.0;
        cx.stroke(
            &Line::new((mid, h * 0.3), (mid, h * 0.65)),
            INK,
            &Stroke::new(1.5),
        );
        cx.fill(&Circle::new((mid, h * 0.8), 0.9), INK, 0.0);
    }
}
