pub mod api;
pub mod field;
pub mod input;
pub mod renderer;
pub mod runtime;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::{BackgroundConfig, BurstConfig, FieldConfig};
pub use api::error::FieldError;
pub use field::{particle_count, Attraction, Link, Particle, ParticleField, ParticleKind};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::{ColorStop, CommandList, DrawCommand, DrawSurface, LinearGradient};
pub use runtime::{FieldRunner, FrameHandle, Host, HostEvent, LoopState, RunLoop, Subscription};
pub use systems::color::Color;
pub use systems::rng::Rng;

pub use glam::Vec2;
