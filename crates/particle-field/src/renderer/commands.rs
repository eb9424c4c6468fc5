use glam::Vec2;

use super::surface::{DrawSurface, LinearGradient};
use crate::systems::color::Color;

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Background(LinearGradient),
    Circle { center: Vec2, radius: f32, color: Color },
    Line { from: Vec2, to: Vec2, color: Color },
}

/// A `DrawSurface` that records calls instead of rasterizing them.
/// Cleared by each background fill, so it always holds the latest frame.
#[derive(Debug, Default)]
pub struct CommandList {
    commands: Vec<DrawCommand>,
    size: Vec2,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Last size passed to `resize`.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn circles(&self) -> impl Iterator<Item = (Vec2, f32, Color)> + '_ {
        self.commands.iter().filter_map(|c| match *c {
            DrawCommand::Circle { center, radius, color } => Some((center, radius, color)),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = (Vec2, Vec2, Color)> + '_ {
        self.commands.iter().filter_map(|c| match *c {
            DrawCommand::Line { from, to, color } => Some((from, to, color)),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl DrawSurface for CommandList {
    fn fill_background(&mut self, gradient: &LinearGradient) {
        self.commands.clear();
        self.commands.push(DrawCommand::Background(gradient.clone()));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle { center, radius, color });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_starts_a_new_frame() {
        let mut list = CommandList::new();
        list.fill_circle(Vec2::ONE, 1.0, Color::WHITE);
        list.stroke_line(Vec2::ZERO, Vec2::ONE, Color::WHITE);
        assert_eq!(list.commands().len(), 2);

        let g = LinearGradient::corner_to_corner(10.0, 10.0, Color::WHITE, Color::BLACK);
        list.fill_background(&g);
        assert_eq!(list.commands(), &[DrawCommand::Background(g)]);
    }

    #[test]
    fn filters_by_kind() {
        let mut list = CommandList::new();
        list.fill_circle(Vec2::new(1.0, 2.0), 1.2, Color::WHITE);
        list.stroke_line(Vec2::ZERO, Vec2::ONE, Color::BLACK);
        list.fill_circle(Vec2::new(3.0, 4.0), 2.0, Color::BLACK);
        assert_eq!(list.circles().count(), 2);
        assert_eq!(list.lines().count(), 1);
    }

    #[test]
    fn resize_records_size() {
        let mut list = CommandList::new();
        list.resize(640.0, 480.0);
        assert_eq!(list.size(), Vec2::new(640.0, 480.0));
    }
}
