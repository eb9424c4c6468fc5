use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use particle_field::{FieldError, FrameHandle, Host, HostEvent, InputEvent, InputQueue, Subscription};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, MouseEvent, Window};

/// The `requestAnimationFrame` callback. Installed after the runner exists,
/// since it needs a handle back to it.
pub type FrameCallback = Closure<dyn FnMut(f64)>;

/// Shared slot holding the frame callback.
pub type FrameSlot = Rc<RefCell<Option<FrameCallback>>>;

struct Listener {
    event_type: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

/// `Host` over the browser window. Listeners push into a shared inbox that
/// the runner drains at the start of each frame.
pub struct BrowserHost {
    window: Window,
    frame_slot: FrameSlot,
    inbox: Rc<RefCell<InputQueue>>,
    listeners: HashMap<u32, Listener>,
    next_id: u32,
}

impl BrowserHost {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            frame_slot: Rc::new(RefCell::new(None)),
            inbox: Rc::new(RefCell::new(InputQueue::new())),
            listeners: HashMap::new(),
            next_id: 0,
        }
    }

    pub fn frame_slot(&self) -> FrameSlot {
        Rc::clone(&self.frame_slot)
    }

    fn pointer_listener(
        &self,
        make: fn(f32, f32) -> InputEvent,
    ) -> Closure<dyn FnMut(Event)> {
        let inbox = Rc::clone(&self.inbox);
        Closure::new(move |event: Event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                let input = make(mouse.client_x() as f32, mouse.client_y() as f32);
                inbox.borrow_mut().push(input);
            }
        })
    }

    fn resize_listener(&self) -> Closure<dyn FnMut(Event)> {
        let inbox = Rc::clone(&self.inbox);
        let window = self.window.clone();
        Closure::new(move |_: Event| {
            let (width, height) = viewport_of(&window);
            inbox.borrow_mut().push(InputEvent::Resize { width, height });
        })
    }
}

impl Host for BrowserHost {
    fn request_frame(&mut self) -> Result<FrameHandle, FieldError> {
        let slot = self.frame_slot.borrow();
        let callback = slot
            .as_ref()
            .ok_or_else(|| FieldError::Host("frame callback not installed".into()))?;
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map(FrameHandle)
            .map_err(js_error)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(e) = self.window.cancel_animation_frame(handle.0) {
            log::warn!("cancelAnimationFrame({}) failed: {:?}", handle.0, e);
        }
    }

    fn subscribe(&mut self, event: HostEvent) -> Result<Subscription, FieldError> {
        let (event_type, closure) = match event {
            HostEvent::Resize => ("resize", self.resize_listener()),
            HostEvent::PointerMove => (
                "mousemove",
                self.pointer_listener(|x, y| InputEvent::PointerMove { x, y }),
            ),
            HostEvent::Click => ("click", self.pointer_listener(|x, y| InputEvent::Click { x, y })),
        };
        self.window
            .add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())
            .map_err(js_error)?;

        self.next_id += 1;
        self.listeners.insert(self.next_id, Listener { event_type, closure });
        Ok(Subscription(self.next_id))
    }

    fn unsubscribe(&mut self, subscription: Subscription) {
        let Some(listener) = self.listeners.remove(&subscription.0) else {
            return;
        };
        if let Err(e) = self.window.remove_event_listener_with_callback(
            listener.event_type,
            listener.closure.as_ref().unchecked_ref(),
        ) {
            log::warn!("removing {} listener failed: {:?}", listener.event_type, e);
        }
    }

    fn viewport(&self) -> (f32, f32) {
        viewport_of(&self.window)
    }

    fn drain_input(&mut self, queue: &mut InputQueue) {
        queue.append(&mut self.inbox.borrow_mut());
    }
}

fn viewport_of(window: &Window) -> (f32, f32) {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
    (dim(window.inner_width()), dim(window.inner_height()))
}

fn js_error(e: JsValue) -> FieldError {
    FieldError::Host(format!("{:?}", e))
}
