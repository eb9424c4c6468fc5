//! Frame scheduling and listener bookkeeping against a host.

use crate::api::error::FieldError;
use crate::input::queue::InputQueue;

/// Id of a pending frame request (e.g. a `requestAnimationFrame` handle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Id of a registered event listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(pub u32);

/// Host events the field listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEvent {
    Resize,
    PointerMove,
    Click,
}

impl HostEvent {
    pub const ALL: [HostEvent; 3] = [HostEvent::Resize, HostEvent::PointerMove, HostEvent::Click];
}

/// Scheduling and input primitives supplied by the embedding environment.
pub trait Host {
    /// Ask for one frame callback.
    fn request_frame(&mut self) -> Result<FrameHandle, FieldError>;

    /// Withdraw a frame request that has not fired yet.
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Start delivering `event` to the host's input buffer.
    fn subscribe(&mut self, event: HostEvent) -> Result<Subscription, FieldError>;

    fn unsubscribe(&mut self, subscription: Subscription);

    /// Current viewport size in surface units.
    fn viewport(&self) -> (f32, f32);

    /// Move events buffered by the host's listeners into `queue`.
    fn drain_input(&mut self, _queue: &mut InputQueue) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Listeners may be attached; no frame requested yet.
    Idle,
    Running,
    /// Torn down. Terminal.
    Stopped,
}

/// A cancellable repeating frame request plus the listeners registered
/// alongside it. At most one frame is pending at a time; its handle is the
/// cancellation token cleared by `stop`.
#[derive(Debug)]
pub struct RunLoop {
    state: LoopState,
    pending: Option<FrameHandle>,
    subscriptions: Vec<Subscription>,
}

impl RunLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Idle,
            pending: None,
            subscriptions: Vec::new(),
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    /// Subscribe to every event in `events`. If any registration fails, the
    /// ones made by this call are removed again before the error is returned.
    pub fn listen<H: Host + ?Sized>(&mut self, host: &mut H, events: &[HostEvent]) -> Result<(), FieldError> {
        if self.state == LoopState::Stopped {
            return Ok(());
        }
        let first_new = self.subscriptions.len();
        for &event in events {
            match host.subscribe(event) {
                Ok(sub) => self.subscriptions.push(sub),
                Err(e) => {
                    log::warn!("subscribing to {:?} failed, unwinding listeners", event);
                    for sub in self.subscriptions.drain(first_new..) {
                        host.unsubscribe(sub);
                    }
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// Request the first frame. A second call while running is a no-op.
    pub fn start<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<(), FieldError> {
        match self.state {
            LoopState::Idle => {
                self.pending = Some(host.request_frame()?);
                self.state = LoopState::Running;
                Ok(())
            }
            LoopState::Running | LoopState::Stopped => Ok(()),
        }
    }

    /// Mark the pending frame as fired. Returns false if the loop is not
    /// running, in which case the frame's work must be skipped.
    pub fn begin_frame(&mut self) -> bool {
        self.pending = None;
        self.is_running()
    }

    /// Request the next frame after one has been processed.
    pub fn schedule_next<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<(), FieldError> {
        if !self.is_running() || self.pending.is_some() {
            return Ok(());
        }
        self.pending = Some(host.request_frame()?);
        Ok(())
    }

    /// Cancel the pending frame and remove every listener. Idempotent.
    pub fn stop<H: Host + ?Sized>(&mut self, host: &mut H) {
        if let Some(handle) = self.pending.take() {
            host.cancel_frame(handle);
        }
        for sub in self.subscriptions.drain(..) {
            host.unsubscribe(sub);
        }
        self.state = LoopState::Stopped;
    }
}

impl Default for RunLoop {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockHost;
    use super::*;

    #[test]
    fn start_requests_one_frame() {
        let mut host = MockHost::new(10.0, 10.0);
        let mut run = RunLoop::new();
        run.start(&mut host).unwrap();
        run.start(&mut host).unwrap();
        assert!(run.is_running());
        assert_eq!(host.frames.len(), 1);
        assert!(run.pending().is_some());
    }

    #[test]
    fn frame_cycle_keeps_single_pending_request() {
        let mut host = MockHost::new(10.0, 10.0);
        let mut run = RunLoop::new();
        run.start(&mut host).unwrap();
        for _ in 0..5 {
            let fired = run.pending().unwrap();
            host.frames.remove(&fired);
            assert!(run.begin_frame());
            run.schedule_next(&mut host).unwrap();
            run.schedule_next(&mut host).unwrap();
            assert_eq!(host.frames.len(), 1);
        }
    }

    #[test]
    fn stop_cancels_and_unsubscribes() {
        let mut host = MockHost::new(10.0, 10.0);
        let mut run = RunLoop::new();
        run.listen(&mut host, &HostEvent::ALL).unwrap();
        run.start(&mut host).unwrap();
        assert_eq!(host.listeners.len(), 3);

        run.stop(&mut host);
        assert_eq!(run.state(), LoopState::Stopped);
        assert!(host.frames.is_empty());
        assert_eq!(host.cancelled.len(), 1);
        assert!(host.listeners.is_empty());
        assert!(run.subscriptions().is_empty());

        run.stop(&mut host);
        assert_eq!(host.cancelled.len(), 1, "second stop has nothing to cancel");
    }

    #[test]
    fn stopped_loop_never_restarts() {
        let mut host = MockHost::new(10.0, 10.0);
        let mut run = RunLoop::new();
        run.stop(&mut host);
        run.start(&mut host).unwrap();
        assert!(!run.begin_frame());
        run.schedule_next(&mut host).unwrap();
        assert!(host.frames.is_empty());
    }

    #[test]
    fn failed_subscription_unwinds() {
        let mut host = MockHost::new(10.0, 10.0);
        host.fail_on = Some(HostEvent::Click);
        let mut run = RunLoop::new();
        let err = run.listen(&mut host, &HostEvent::ALL).unwrap_err();
        assert!(matches!(err, FieldError::Host(_)));
        assert!(host.listeners.is_empty());
        assert!(run.subscriptions().is_empty());
    }
}
