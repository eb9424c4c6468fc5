use crate::api::config::FieldConfig;
use crate::api::error::FieldError;
use crate::field::ParticleField;
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::surface::DrawSurface;

use super::run_loop::{Host, HostEvent, LoopState, RunLoop};

/// Wires a `ParticleField` to a host and a drawing surface.
///
/// Lifecycle: `mount` (listeners registered, particles seeded), `start`
/// (first frame requested), `frame` once per host frame callback, and
/// `teardown`, which also runs on drop so every exit path releases the
/// pending frame and the listeners.
pub struct FieldRunner<H: Host, S: DrawSurface> {
    field: ParticleField,
    host: H,
    surface: S,
    input: InputQueue,
    run_loop: RunLoop,
}

impl<H: Host, S: DrawSurface> FieldRunner<H, S> {
    /// Build the field over the host's viewport and register its listeners.
    /// Fails fast when there is no surface to draw on.
    pub fn mount(mut host: H, surface: Option<S>, config: FieldConfig) -> Result<Self, FieldError> {
        config.validate()?;
        let mut surface = surface.ok_or(FieldError::NoSurface)?;

        let (width, height) = host.viewport();
        surface.resize(width, height);
        let field = ParticleField::new(config, width, height);

        let mut run_loop = RunLoop::new();
        run_loop.listen(&mut host, &HostEvent::ALL)?;

        log::info!(
            "particle field mounted: {}x{}, {} particles",
            width,
            height,
            field.len()
        );
        Ok(Self {
            field,
            host,
            surface,
            input: InputQueue::new(),
            run_loop,
        })
    }

    /// Request the first frame.
    pub fn start(&mut self) -> Result<(), FieldError> {
        self.run_loop.start(&mut self.host)
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Handle one host frame callback: apply queued input, advance and
    /// repaint, then request the next frame. No-op once torn down.
    pub fn frame(&mut self) -> Result<(), FieldError> {
        if !self.run_loop.begin_frame() {
            return Ok(());
        }

        self.host.drain_input(&mut self.input);
        for event in self.input.drain() {
            if let InputEvent::Resize { width, height } = event {
                self.surface.resize(width, height);
            }
            self.field.handle_input(event);
        }

        self.field.advance_frame(&mut self.surface);
        if let Err(e) = self.run_loop.schedule_next(&mut self.host) {
            // No frame is pending, so the loop cannot continue.
            log::warn!("next frame request failed, stopping: {}", e);
            self.teardown();
            return Err(e);
        }
        Ok(())
    }

    /// Stop requesting frames and remove every listener. Idempotent.
    pub fn teardown(&mut self) {
        if self.run_loop.state() == LoopState::Stopped {
            return;
        }
        self.run_loop.stop(&mut self.host);
        log::info!("particle field torn down");
    }

    pub fn state(&self) -> LoopState {
        self.run_loop.state()
    }

    pub fn run_loop(&self) -> &RunLoop {
        &self.run_loop
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut ParticleField {
        &mut self.field
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

impl<H: Host, S: DrawSurface> Drop for FieldRunner<H, S> {
    fn drop(&mut self) {
        self.teardown();
    }
}
