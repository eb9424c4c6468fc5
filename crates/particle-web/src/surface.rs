use std::f64::consts::TAU;

use particle_field::{Color, DrawSurface, LinearGradient, Vec2};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

/// `DrawSurface` over a Canvas 2D context.
pub struct Canvas2dSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Canvas2dSurface {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }

    /// Look up `<canvas id=...>` and its 2D context. `None` when the element
    /// is missing, is not a canvas, or refuses a 2D context.
    pub fn find(document: &Document, canvas_id: &str) -> Option<Self> {
        let canvas = document
            .get_element_by_id(canvas_id)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self::new(canvas, ctx))
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl DrawSurface for Canvas2dSurface {
    fn fill_background(&mut self, gradient: &LinearGradient) {
        let fill = self.ctx.create_linear_gradient(
            gradient.start.x as f64,
            gradient.start.y as f64,
            gradient.end.x as f64,
            gradient.end.y as f64,
        );
        for stop in &gradient.stops {
            if let Err(e) = fill.add_color_stop(stop.offset, &stop.color.to_css()) {
                log::warn!("gradient stop {} rejected: {:?}", stop.offset, e);
            }
        }
        self.ctx.set_fill_style_canvas_gradient(&fill);
        self.ctx.fill_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
            .is_ok()
        {
            self.ctx.fill();
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.canvas.set_width(width.max(0.0) as u32);
        self.canvas.set_height(height.max(0.0) as u32);
    }
}
