//! Duck Hop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use duck_hop::assets::resolve_sprite;
    use duck_hop::platform::web;
    use duck_hop::renderer::RenderState;
    use duck_hop::{Game, GameError, Result, Settings, Trigger};

    /// Everything the browser callbacks share
    struct App {
        game: Game,
        render_state: RenderState,
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Duck Hop starting...");

        match start().await {
            Ok(app) => {
                log::info!("Duck Hop running!");
                request_animation_frame(app);
            }
            Err(e) => web::notify_operator(&e),
        }
    }

    /// Surface, sprite, then the session. Any failure leaves no game behind.
    async fn start() -> Result<Rc<RefCell<App>>> {
        let settings = Settings::load();

        let canvas = web::canvas("canvas")?;
        let viewport = web::window_viewport()?;
        web::size_canvas(&canvas, &viewport);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| GameError::SurfaceUnavailable(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| GameError::AdapterUnavailable(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let mut render_state = RenderState::new(
            surface,
            &adapter,
            canvas.width(),
            canvas.height(),
        )
        .await?;

        let loaded = web::load_sprite(&settings.sprite_path).await;
        let sprite = resolve_sprite(loaded, &settings)?;
        if let Some(sprite) = &sprite {
            render_state.set_sprite(sprite);
        }

        let seed = settings.seed_or(js_sys::Date::now() as u64);
        let game = Game::start(settings, viewport, seed, sprite.is_some());

        let app = Rc::new(RefCell::new(App { game, render_state }));
        setup_input_handlers(&canvas, app.clone());
        setup_resize(&canvas, app.clone());
        Ok(app)
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Mouse / pen
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().game.trigger(Trigger::Pointer);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch (suppress the synthetic mouse event and scrolling)
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                app.borrow_mut().game.trigger(Trigger::Touch);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut app = app.borrow_mut();
            match event.key().as_str() {
                " " => {
                    event.prevent_default();
                    app.game.trigger(Trigger::Key);
                }
                "i" | "I" => app.game.toggle_autopilot(),
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Ok(viewport) = web::window_viewport() else {
                return;
            };
            web::size_canvas(&canvas, &viewport);
            let mut app = app.borrow_mut();
            app.render_state.resize(canvas.width(), canvas.height());
            app.game.resize(viewport);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut guard = app.borrow_mut();
            let App { game, render_state } = &mut *guard;
            if let Err(e) = game.render_frame(time, render_state) {
                // Nothing left to draw with
                web::notify_operator(&e);
                return;
            }
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Length of a headless run when no argument is given
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_SECONDS: u32 = 60;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use std::path::Path;
    use std::process::ExitCode;

    use duck_hop::assets::resolve_sprite;
    use duck_hop::platform::native::{HeadlessCanvas, load_sprite};
    use duck_hop::sim::Viewport;
    use duck_hop::{Game, Settings};

    env_logger::init();
    log::info!("Duck Hop (native, headless) starting...");

    let seconds = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(HEADLESS_SECONDS);

    let settings = Settings::load();

    // Same relative path the web build serves, or the source asset
    let path = Path::new(&settings.sprite_path);
    let path = if path.exists() {
        path.to_path_buf()
    } else {
        Path::new("assets").join(path)
    };
    let sprite = match resolve_sprite(load_sprite(&path), &settings) {
        Ok(sprite) => sprite,
        Err(e) => return fail(&e),
    };

    let seed = settings.seed_or(
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(1),
    );
    let mut game = Game::start(settings, Viewport::new(800.0, 600.0), seed, sprite.is_some());
    game.set_autopilot(true);

    let mut canvas = HeadlessCanvas::default();
    let frame_ms = 1000.0 / 60.0;
    for frame in 1..=seconds as u64 * 60 {
        if let Err(e) = game.render_frame(frame as f64 * frame_ms, &mut canvas) {
            log::error!("Frame {} failed", frame);
            return fail(&e);
        }
    }

    log::info!(
        "Headless run done: {} frames, {} draw commands, {} crashes, best score {}, last '{}'",
        canvas.frames,
        canvas.commands,
        game.crashes,
        game.best_score,
        canvas.last_text.as_deref().unwrap_or("")
    );
    ExitCode::SUCCESS
}

/// Exit codes: 2 for a missing or broken sprite, 1 for anything else
#[cfg(not(target_arch = "wasm32"))]
fn fail(error: &duck_hop::GameError) -> std::process::ExitCode {
    log::error!("{}", error.operator_message());
    if error.is_asset() {
        std::process::ExitCode::from(2)
    } else {
        std::process::ExitCode::FAILURE
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
