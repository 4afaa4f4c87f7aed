//! Parallax Swarm entry point
//!
//! Handles platform-specific initialization and wires the input source,
//! resource loader and frame scheduler to the simulation controller.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, CustomEvent, CustomEventInit, HtmlCanvasElement,
        HtmlImageElement, MouseEvent, Window,
    };

    use parallax_swarm::assets::AssetManifest;
    use parallax_swarm::platform::ResourceLoader;
    use parallax_swarm::platform::web::{RafScheduler, WebImageLoader};
    use parallax_swarm::renderer::CanvasSink;
    use parallax_swarm::sim::SimulationState;
    use parallax_swarm::{App, InputEvent, LoopEvent, Settings};

    /// Everything the frame callback and input listeners share
    struct Session {
        app: App<RafScheduler>,
        sink: CanvasSink,
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Parallax Swarm starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .query_selector("canvas")
            .ok()
            .flatten()
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let mut settings = Settings::load();
        if settings.viewport.fit_window {
            let inner = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64());
            if let (Some(w), Some(h)) = (inner(window.inner_width()), inner(window.inner_height())) {
                settings.viewport.width = w as f32;
                settings.viewport.height = h as f32;
            }
        }
        canvas.set_width(settings.viewport.width as u32);
        canvas.set_height(settings.viewport.height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let manifest = AssetManifest::from_settings(&settings);
        let mut loader = WebImageLoader::new();
        let images = loader.images();

        log::info!("Loading {} images...", manifest.urls().len());
        loader.load(
            manifest.urls(),
            Box::new(move |assets| {
                let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
                match SimulationState::new(&settings, &assets, seed) {
                    Ok(state) => {
                        let images = images.borrow().clone();
                        start_session(window, canvas, ctx, images, state, &settings);
                    }
                    Err(e) => log::error!("Setup failed: {}", e),
                }
            }),
        );
    }

    fn start_session(
        window: Window,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        images: Vec<HtmlImageElement>,
        state: SimulationState,
        settings: &Settings,
    ) {
        let scheduler = RafScheduler::new(window);
        let slot = scheduler.callback_slot();
        let sink = CanvasSink::new(
            ctx,
            images,
            settings.viewport.width as f64,
            settings.viewport.height as f64,
        );
        let session = Rc::new(RefCell::new(Session {
            app: App::new(state, scheduler),
            sink,
        }));

        {
            let session = session.clone();
            let closure = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                let mut guard = session.borrow_mut();
                let Session { app, sink } = &mut *guard;
                app.on_frame(time, sink);
            });
            *slot.borrow_mut() = Some(closure);
        }

        setup_input_handlers(&canvas, session);

        log::info!("Parallax Swarm ready - click the canvas to start/stop");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, session: Rc<RefCell<Session>>) {
        // Pointer position for steering
        {
            let session = session.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                session
                    .borrow_mut()
                    .app
                    .handle_input(InputEvent::PointerMoved(pos));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click toggles the loop and notifies page listeners
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let events = {
                    let mut s = session.borrow_mut();
                    s.app.handle_input(InputEvent::Toggle);
                    s.app.drain_events()
                };
                for event in events {
                    dispatch_loop_event(&canvas_clone, event);
                }
            });
            let _ =
                canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn dispatch_loop_event(canvas: &HtmlCanvasElement, event: LoopEvent) {
        let name = match event {
            LoopEvent::Started => "animation-start",
            LoopEvent::Stopped => "animation-end",
        };
        let init = CustomEventInit::new();
        init.set_bubbles(true);
        init.set_cancelable(true);
        match CustomEvent::new_with_event_init_dict(name, &init) {
            Ok(custom) => {
                let _ = canvas.dispatch_event(&custom);
            }
            Err(e) => log::warn!("Could not create {} event: {:?}", name, e),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Parallax Swarm (native) starting...");
    log::info!("Native mode runs headless - serve the wasm build for the canvas version");

    if let Err(e) = headless::run(120) {
        log::error!("Headless run failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drives a full session without a display: immediate loader, manual
/// scheduler firing at ~60 Hz, and a recording sink.
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;

    use parallax_swarm::assets::{AssetManifest, AssetTable};
    use parallax_swarm::platform::{ImmediateLoader, ManualScheduler, ResourceLoader};
    use parallax_swarm::renderer::DrawList;
    use parallax_swarm::sim::SimulationState;
    use parallax_swarm::{App, ConfigError, InputEvent, Settings, vector};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    pub fn run(frames: u32) -> Result<(), ConfigError> {
        let settings = Settings::load();
        let manifest = AssetManifest::from_settings(&settings);

        let loaded: Rc<RefCell<Option<AssetTable>>> = Rc::new(RefCell::new(None));
        let slot = loaded.clone();
        ImmediateLoader.load(
            manifest.urls(),
            Box::new(move |assets| *slot.borrow_mut() = Some(assets)),
        );
        let assets = loaded.borrow_mut().take().unwrap_or_default();

        let seed = settings.seed.unwrap_or(0x5eed);
        let state = SimulationState::new(&settings, &assets, seed)?;
        let center = state.viewport.center();

        let mut app = App::new(state, ManualScheduler::new());
        let mut sink = DrawList::default();
        app.handle_input(InputEvent::Toggle);

        for i in 0..frames {
            // Pointer circles the center once per second
            let theta = i as f32 / 60.0 * std::f32::consts::TAU;
            let pointer: Vec2 = center + vector::from_polar(theta, 150.0);
            app.handle_input(InputEvent::PointerMoved(pointer));

            if app.scheduler_mut().take_pending().is_some() {
                sink.reset();
                app.on_frame(i as f64 * FRAME_MS, &mut sink);
            }
        }

        app.handle_input(InputEvent::Toggle);
        for event in app.drain_events() {
            log::debug!("Loop event: {:?}", event);
        }

        let state = app.state();
        let layer_frames: Vec<usize> = state
            .background
            .layers()
            .iter()
            .map(|l| l.current_frame())
            .collect();
        log::info!(
            "Ran {} ticks ({:.2}s simulated): {} swarm objects, {} particles live, {} draw calls last frame, layer frames {:?}",
            app.ticks(),
            state.time,
            state.swarm.len(),
            state.particles.len(),
            sink.last_frame().len(),
            layer_frames
        );
        Ok(())
    }
}
