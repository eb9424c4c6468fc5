//! Browser bridge: mounts a `ParticleField` on an HTML canvas.
//!
//! ```js
//! import init, { ParticleCanvas } from "particle_web";
//! await init();
//! const field = new ParticleCanvas("background", null);
//! // later, when the page component unmounts:
//! field.unmount();
//! field.free();
//! ```

pub mod host;
pub mod surface;

pub use host::BrowserHost;
pub use surface::Canvas2dSurface;

use std::cell::RefCell;
use std::rc::Rc;

use particle_field::{FieldConfig, FieldError, FieldRunner, LoopState};
use wasm_bindgen::prelude::*;

type Runner = FieldRunner<BrowserHost, Canvas2dSurface>;

/// A particle field running on a canvas. Dropping it (`free()` in JS) tears
/// the field down just like `unmount()`.
#[wasm_bindgen]
pub struct ParticleCanvas {
    runner: Rc<RefCell<Runner>>,
}

#[wasm_bindgen]
impl ParticleCanvas {
    /// Mount on `<canvas id=canvas_id>` sized to the window and start
    /// animating. `config_json` overrides defaults field by field.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, config_json: Option<String>) -> Result<ParticleCanvas, JsValue> {
        init_logging();

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let config = match config_json {
            Some(json) => FieldConfig::from_json(&json).map_err(to_js)?,
            None => FieldConfig::default(),
        };
        let surface = window
            .document()
            .and_then(|document| Canvas2dSurface::find(&document, canvas_id));

        let host = BrowserHost::new(window);
        let frame_slot = host.frame_slot();
        let runner = Rc::new(RefCell::new(
            FieldRunner::mount(host, surface, config).map_err(to_js)?,
        ));

        let weak = Rc::downgrade(&runner);
        *frame_slot.borrow_mut() = Some(Closure::new(move |_timestamp: f64| {
            let Some(runner) = weak.upgrade() else {
                return;
            };
            if let Err(e) = runner.borrow_mut().frame() {
                log::error!("particle field frame failed: {}", e);
            };
        }));

        runner.borrow_mut().start().map_err(to_js)?;
        log::info!("particle-web: mounted on #{}", canvas_id);
        Ok(ParticleCanvas { runner })
    }

    /// Stop the animation loop and remove the window listeners.
    pub fn unmount(&self) {
        self.runner.borrow_mut().teardown();
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.runner.borrow().state() == LoopState::Running
    }

    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 {
        self.runner.borrow().field().len() as u32
    }
}

fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

fn to_js(e: FieldError) -> JsValue {
    JsValue::from_str(&e.to_string())
}
