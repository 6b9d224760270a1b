//! Liquid orb: an interactive sphere scene with a generative ambient drone.
//!
//! The animation, scene and audio-graph logic is plain Rust and builds on any
//! target. The browser shell (DOM wiring, WebGPU renderer, WebAudio backend)
//! only builds for `wasm32`.

pub mod animation;
pub mod app;
pub mod audio;
pub mod constants;
pub mod material;
pub mod mesh;
pub mod picking;
pub mod scene;
pub mod starfield;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod render;

pub use app::Demo;
pub use audio::{AmbientStage, AudioBackend, AudioError, GraphRecorder, SynthEngine};
pub use scene::{Scene, SceneConfig};

#[cfg(target_arch = "wasm32")]
pub use web_entry::start;

#[cfg(target_arch = "wasm32")]
mod web_entry {
    use crate::app::Demo;
    use crate::audio::{SynthEngine, WebAudioBackend};
    use crate::scene::SceneConfig;
    use crate::{dom, events, frame};
    use instant::Instant;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::spawn_local;
    use web_sys as web;

    fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
        dom::sync_canvas_backing_size(canvas);
        let canvas_resize = canvas.clone();
        let resize_closure = Closure::wrap(Box::new(move || {
            dom::sync_canvas_backing_size(&canvas_resize);
        }) as Box<dyn FnMut()>);
        if let Some(window) = web::window() {
            _ = window
                .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
        }
        resize_closure.forget();
    }

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("liquid-orb starting");

        spawn_local(async move {
            if let Err(e) = init().await {
                log::error!("init error: {:?}", e);
            }
        });
        Ok(())
    }

    async fn init() -> anyhow::Result<()> {
        let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
        let canvas: web::HtmlCanvasElement = document
            .get_element_by_id("app-canvas")
            .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

        wire_canvas_resize(&canvas);

        let mut config = SceneConfig::default();
        if let Some(initial) = dom::input_value(&document, events::COLOR_INPUT_ID) {
            config.base_color = initial;
        }
        // The AudioContext is only created on the first click or toggle, which
        // keeps it inside a user gesture.
        let synth = SynthEngine::new(WebAudioBackend::open);
        let demo = Rc::new(RefCell::new(Demo::new(&config, synth)));

        events::wire_ui(events::UiWiring {
            document: document.clone(),
            canvas: canvas.clone(),
            demo: demo.clone(),
        });

        let gpu = frame::init_gpu(&canvas).await;
        let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
            demo,
            gpu,
            canvas,
            started: Instant::now(),
        }));
        frame::start_loop(frame_ctx);
        Ok(())
    }
}
