//! Draw Path entry point
//!
//! On the web: wires mouse and keyboard into the scene and runs the
//! animation loop. Natively: draws a few seeded random strokes and runs the
//! scene headless, printing the final state as JSON.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use draw_path::consts::MAX_FRAME_MS;
    use draw_path::renderer::CanvasRenderer;
    use draw_path::sim::Scene;
    use draw_path::view::View;
    use draw_path::{Point, Settings};

    /// Everything the page needs between frames
    struct Game {
        scene: Scene,
        settings: Settings,
        renderer: CanvasRenderer,
        /// Pointer position in grid space
        mouse: Point,
        last_time: f64,
    }

    impl Game {
        fn set_mouse(&mut self, x: f64, y: f64) {
            self.mouse = self.renderer.view.grid_coordinates(Point::new(x, y));
        }

        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                (time - self.last_time).clamp(0.0, MAX_FRAME_MS)
            } else {
                0.0
            };
            self.last_time = time;

            if self.scene.is_drawing() {
                if let Err(e) = self.scene.draw_to(self.mouse) {
                    log::warn!("Dropped pointer sample: {e}");
                }
            }
            self.scene.tick(dt);

            if let Err(e) = self.renderer.render(&self.scene, &self.settings, self.mouse, dt) {
                log::warn!("Render error: {:?}", e);
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("DRAW PATH");

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas = document
            .get_element_by_id("viewCanvas")
            .ok_or_else(|| JsValue::from_str("missing #viewCanvas"))?
            .dyn_into::<HtmlCanvasElement>()?;

        let settings = Settings::load();
        let view = View {
            zoom: settings.zoom,
            ..View::new(settings.width, settings.height)
        };
        let renderer = CanvasRenderer::new(canvas.clone(), view)?;
        let game = Rc::new(RefCell::new(Game {
            scene: Scene::new(settings.scene_config()),
            settings,
            renderer,
            mouse: Point::ZERO,
            last_time: 0.0,
        }));

        setup_input_handlers(&canvas, game.clone())?;
        request_animation_frame(game);
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        // Mouse move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .set_mouse(event.offset_x() as f64, event.offset_y() as f64);
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse down - start a stroke
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.set_mouse(event.offset_x() as f64, event.offset_y() as f64);
                g.scene.start_drawing();
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse up - finish the stroke
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                if g.scene.is_drawing() {
                    // Rejections are logged by the scene
                    let _ = g.scene.end_drawing();
                }
            });
            canvas.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if matches!(event.key().as_str(), "m" | "M") {
                    g.settings.toggle_monitoring();
                    g.settings.save();
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game.borrow_mut().frame(time);
            request_animation_frame(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use draw_path::Settings;
    use draw_path::sim::Scene;
    use draw_path::sim::demo::random_stroke;
    use draw_path::view::View;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Strokes drawn before the run
    const STROKES: usize = 6;
    /// 60 frames per second
    const FRAME_MS: f64 = 1000.0 / 60.0;
    const FRAMES: usize = 60 * 20;

    env_logger::init();

    let seed = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<u64>()?,
        None => 12345,
    };
    log::info!("Draw Path (native) starting with seed {seed}");

    let settings = Settings::load();
    let view = View {
        zoom: settings.zoom,
        ..View::new(settings.width, settings.height)
    };
    let extent = view.grid_extent();
    let mut scene = Scene::new(settings.scene_config());
    let mut rng = Pcg32::seed_from_u64(seed);

    for _ in 0..STROKES {
        scene.start_drawing();
        for point in random_stroke(&mut rng, extent.x, extent.y) {
            scene.draw_to(point)?;
        }
        // Rejections are logged by the scene
        let _ = scene.end_drawing();
    }
    log::info!("{} ball(s) on the canvas", scene.balls().len());

    let mut impacts = 0;
    for _ in 0..FRAMES {
        impacts += scene.tick(FRAME_MS).len();
    }
    log::info!("{impacts} impact(s) in {:.1}s", scene.clock_ms() / 1000.0);

    println!("{}", serde_json::to_string_pretty(&scene.snapshot())?);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
