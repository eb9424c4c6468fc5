pub mod commands;
pub mod surface;

pub use commands::{CommandList, DrawCommand};
pub use surface::{ColorStop, DrawSurface, LinearGradient};
