//! Neon Sinkhole entry point
//!
//! Handles platform-specific initialization and runs the game loop. The web
//! build expects a page with a `#canvas`, HUD spans, `#start-screen` and
//! `#game-over` panels and a `#toasts` container.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use neon_sinkhole::renderer::{RenderState, build_frame};
    use neon_sinkhole::sim::{GameEvent, GamePhase};
    use neon_sinkhole::{
        HighScore, HighScoreStore, Notification, NotificationSink, Session, Settings,
        format_score, format_time,
    };

    const TOAST_MS: i32 = 2000;

    /// Toasts rendered straight into the page
    struct DomToasts {
        document: Document,
    }

    impl NotificationSink for DomToasts {
        fn notify(&mut self, notification: Notification) {
            let message = notification.message();
            if notification.is_error() {
                log::error!("{}", message);
            } else {
                log::info!("{}", message);
            }

            let Some(container) = self.document.get_element_by_id("toasts") else {
                return;
            };
            let Ok(toast) = self.document.create_element("div") else {
                return;
            };
            let class = if notification.is_error() { "toast error" } else { "toast" };
            let _ = toast.set_attribute("class", class);
            toast.set_text_content(Some(&message));
            if container.append_child(&toast).is_err() {
                return;
            }

            let closure = Closure::once(move || toast.remove());
            if let Some(window) = web_sys::window() {
                let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    closure.as_ref().unchecked_ref(),
                    TOAST_MS,
                );
            }
            closure.forget();
        }
    }

    /// Game instance holding the session and GPU state
    struct Game {
        session: Session<HighScore, DomToasts>,
        render_state: Option<RenderState>,
        last_time: f64,
        last_phase: GamePhase,
    }

    impl Game {
        fn update(&mut self, time: f64) {
            let elapsed = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                0.0
            };
            self.last_time = time;
            self.session.advance(elapsed);
        }

        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = build_frame(&self.session.snapshot(), self.session.settings());
            match render_state.render(&vertices) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    let (w, h) = render_state.size;
                    let world = render_state.world;
                    render_state.resize(w, h, world);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        fn start(&mut self) {
            if self.session.start_session().is_ok() {
                self.last_time = 0.0;
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, document: &Document) {
            let snapshot = self.session.snapshot();

            set_text(document, "hud-score", &format_score(snapshot.score));
            set_text(document, "hud-time", &format_time(snapshot.time_remaining));
            set_text(document, "hud-size", &format!("{:.0}", snapshot.player.radius));
            set_text(
                document,
                "hud-best",
                &format_score(self.session.high_scores().high_score()),
            );
            let (zone, description) = snapshot
                .current_zone
                .map(|z| (z.name, z.description))
                .unwrap_or(("Unknown District", "Exploring..."));
            set_text(document, "hud-zone", zone);
            set_text(document, "hud-zone-desc", description);

            let phase = snapshot.phase;
            set_hidden(document, "loading", !snapshot.loading);
            if phase == self.last_phase {
                return;
            }
            self.last_phase = phase;

            set_hidden(document, "start-screen", phase != GamePhase::Start);
            set_hidden(document, "hud", phase != GamePhase::Playing);
            set_hidden(document, "game-over", phase != GamePhase::GameOver);
            if phase == GamePhase::GameOver {
                set_text(document, "final-score", &format_score(snapshot.score));
                set_text(
                    document,
                    "final-size",
                    &format!("{:.0}", snapshot.player.radius),
                );
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    fn js_err(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    /// Canvas size in CSS pixels (the world) and physical pixels (the surface)
    fn canvas_sizes(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> ((f32, f32), (u32, u32)) {
        let dpr = window.device_pixel_ratio();
        let css_w = canvas.client_width().max(1);
        let css_h = canvas.client_height().max(1);
        let width = (css_w as f64 * dpr) as u32;
        let height = (css_h as f64 * dpr) as u32;
        ((css_w as f32, css_h as f32), (width.max(1), height.max(1)))
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(js_err)?;

        log::info!("Neon Sinkhole starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let ((world_w, world_h), (width, height)) = canvas_sizes(&window, &canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let settings = Settings::load();
        let session = Session::new(
            seed,
            world_w,
            world_h,
            settings,
            HighScore::load(),
            DomToasts {
                document: document.clone(),
            },
        )
        .map_err(js_err)?;
        log::info!("Session ready with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(js_err)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(js_err)?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, (world_w, world_h))
            .await
            .map_err(js_err)?;

        let game = Rc::new(RefCell::new(Game {
            session,
            render_state: Some(render_state),
            last_time: 0.0,
            // Forces the first HUD pass to lay out the panels
            last_phase: GamePhase::GameOver,
        }));

        set_hidden(&document, "app-loading", true);

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(&document, game.clone());
        setup_resize(&window, canvas.clone(), game.clone());

        request_animation_frame(game);

        log::info!("Neon Sinkhole running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move: offsets are already CSS pixels relative to the canvas
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let _ = game
                    .borrow_mut()
                    .session
                    .set_pointer(event.offset_x() as f32, event.offset_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start / move
        for name in ["touchstart", "touchmove"] {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f64 - rect.left();
                    let y = touch.client_y() as f64 - rect.top();
                    let _ = game.borrow_mut().session.set_pointer(x as f32, y as f32);
                }
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard: Space/Enter starts, Escape ends the run, Q cycles quality
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "Enter" if g.session.phase() != GamePhase::Playing => g.start(),
                    "Escape" => {
                        for event in g.session.end_session() {
                            if let GameEvent::GameOver { score, .. } = event {
                                log::info!("Run ended early at {}", format_score(score));
                            }
                        }
                    }
                    "q" | "Q" => {
                        let mut settings = g.session.settings().clone();
                        settings.apply_preset(settings.quality.next());
                        settings.save();
                        log::info!("Quality: {}", settings.quality.as_str());
                        g.session.apply_settings(settings);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for id in ["start-btn", "restart-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    game.borrow_mut().start();
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        if let Some(btn) = document.get_element_by_id("menu-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().session.reset_to_menu();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(window: &web_sys::Window, canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let ((world_w, world_h), (width, height)) = canvas_sizes(&window_clone, &canvas);
            canvas.set_width(width);
            canvas.set_height(height);

            let mut g = game.borrow_mut();
            if let Err(e) = g.session.resize(world_w, world_h) {
                log::warn!("Resize rejected: {}", e);
                return;
            }
            if let Some(render_state) = g.render_state.as_mut() {
                render_state.resize(width, height, (world_w, world_h));
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        web_sys::console::error_1(&e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless run: an autopilot chases the nearest swallowable object until time runs out
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use neon_sinkhole::consts::GAMEPLAY_TICK_MS;
    use neon_sinkhole::sim::GamePhase;
    use neon_sinkhole::{
        HighScore, HighScoreStore, NotificationQueue, QualityPreset, Session, Settings,
        format_score,
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Neon Sinkhole (native) starting...");
    log::info!("Native mode runs a headless autopilot - build for wasm32 to play");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    let mut settings = Settings::load();
    if let Some(arg) = std::env::args().nth(2) {
        match QualityPreset::parse(&arg) {
            Some(preset) => settings.apply_preset(preset),
            None => log::warn!("Unknown quality preset '{}', keeping {}", arg, settings.quality.as_str()),
        }
    }

    let mut session = match Session::new(
        seed,
        1280.0,
        720.0,
        settings,
        HighScore::load(),
        NotificationQueue::default(),
    ) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Could not create session: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = session.start_session() {
        log::error!("{}", e);
        std::process::exit(1);
    }

    while session.phase() == GamePhase::Playing {
        let state = session.state();
        let player = state.player;
        let target = state
            .objects
            .iter()
            .filter(|o| o.size < player.radius)
            .min_by(|a, b| {
                a.pos
                    .distance_squared(player.pos)
                    .total_cmp(&b.pos.distance_squared(player.pos))
            })
            .map(|o| o.pos)
            .unwrap_or_else(|| state.world.center());

        // Finite by construction; clamped into the world
        let _ = session.set_pointer(target.x, target.y);
        session.advance(GAMEPLAY_TICK_MS);

        for notification in session.notifier_mut().drain() {
            log::info!("{}", notification.message());
        }
    }

    let state = session.state();
    println!(
        "Final score: {} (size {:.0}, {} objects left, best {})",
        format_score(state.score),
        state.player.radius,
        state.objects.len(),
        format_score(session.high_scores().high_score()),
    );
}
