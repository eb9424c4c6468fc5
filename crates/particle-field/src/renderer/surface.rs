//! Drawing surface contract.
//!
//! The field draws through this trait and never touches a platform API.
//! `particle-web` implements it over a Canvas 2D context; `CommandList`
//! records calls for headless rendering and tests.

use glam::Vec2;

use crate::systems::color::Color;

/// A color stop at `offset` in [0, 1] along the gradient axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Color,
}

/// Linear gradient from `start` to `end` in surface coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    pub stops: Vec<ColorStop>,
}

impl LinearGradient {
    /// Two-stop gradient from the top-left corner to the bottom-right one.
    pub fn corner_to_corner(width: f32, height: f32, from: Color, to: Color) -> Self {
        Self {
            start: Vec2::ZERO,
            end: Vec2::new(width, height),
            stops: vec![
                ColorStop { offset: 0.0, color: from },
                ColorStop { offset: 1.0, color: to },
            ],
        }
    }
}

/// 2D raster target for one frame.
pub trait DrawSurface {
    /// Fill the whole surface with a gradient, replacing the previous frame.
    fn fill_background(&mut self, gradient: &LinearGradient);

    /// Fill a circle of `radius` centered at `center`.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Stroke a straight line segment.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color);

    /// Match the backing store to a new viewport size.
    fn resize(&mut self, _width: f32, _height: f32) {}
}
