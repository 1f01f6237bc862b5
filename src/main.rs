//! Heartfall entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, MouseEvent, TouchEvent,
    };

    use heartfall::consts::*;
    use heartfall::render::{AssetSlot, Surface, draw_frame};
    use heartfall::settings::Settings;
    use heartfall::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use heartfall::sprite::{GLYPH_PADDING, Rasterize, SpriteCache};

    /// The basket artwork, fetched by reference
    const BASKET_IMAGE_URL: &str = "./basket.png";

    /// Rasterizes glyphs into offscreen canvases for the sprite cache
    struct CanvasRasterizer {
        document: web_sys::Document,
    }

    impl Rasterize for CanvasRasterizer {
        type Bitmap = HtmlCanvasElement;

        fn rasterize(&mut self, glyph: &str, size: u32) -> HtmlCanvasElement {
            let side = size + GLYPH_PADDING;
            let canvas: HtmlCanvasElement = self
                .document
                .create_element("canvas")
                .expect("create canvas")
                .dyn_into()
                .expect("not a canvas");
            canvas.set_width(side);
            canvas.set_height(side);

            let ctx: CanvasRenderingContext2d = canvas
                .get_context("2d")
                .expect("context lookup failed")
                .expect("no 2d context")
                .dyn_into()
                .expect("not a 2d context");
            ctx.set_font(&format!("{size}px Arial"));
            ctx.set_text_align("center");
            ctx.set_text_baseline("middle");
            let center = side as f64 / 2.0;
            let _ = ctx.fill_text(glyph, center, center);
            canvas
        }
    }

    /// The visible play-field canvas as a drawing surface
    struct CanvasSurface {
        ctx: CanvasRenderingContext2d,
        width: f32,
        height: f32,
    }

    impl Surface for CanvasSurface {
        type Bitmap = HtmlCanvasElement;

        fn clear(&mut self) {
            self.ctx
                .clear_rect(0.0, 0.0, self.width as f64, self.height as f64);
        }

        fn set_alpha(&mut self, alpha: f32) {
            self.ctx.set_global_alpha(alpha as f64);
        }

        fn draw_bitmap(&mut self, bitmap: &HtmlCanvasElement, x: f32, y: f32) {
            let w = bitmap.width() as f64;
            let h = bitmap.height() as f64;
            let _ = self.ctx.draw_image_with_html_canvas_element(
                bitmap,
                x as f64 - w / 2.0,
                y as f64 - h / 2.0,
            );
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: TickInput,
        cache: SpriteCache<CanvasRasterizer>,
        surface: CanvasSurface,
        basket: AssetSlot<Rc<HtmlCanvasElement>>,
        canvas: HtmlCanvasElement,
        // Track phase for panel visibility
        last_phase: GamePhase,
        win_panel_shown: bool,
    }

    impl Game {
        /// Re-read the container size after a window resize or restart
        fn resize(&mut self) {
            let document = web_sys::window().unwrap().document().unwrap();
            let (width, height) = document
                .get_element_by_id("game-container")
                .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
                .map(|el| (el.offset_width() as u32, el.offset_height() as u32))
                .unwrap_or((self.canvas.width(), self.canvas.height()));

            self.canvas.set_width(width);
            self.canvas.set_height(height);
            self.surface.width = width as f32;
            self.surface.height = height as f32;
            self.state.resize(width as f32, height as f32);
        }

        /// One display frame: tick, draw, sync the DOM
        fn frame(&mut self) {
            let events = tick(&mut self.state, &self.input);
            // Clear one-shot inputs after processing
            self.input.start = false;
            self.input.replay = false;

            if self.state.phase != GamePhase::Idle {
                draw_frame(&self.state, &mut self.cache, &self.basket, &mut self.surface);
            }

            for event in &events {
                match event {
                    GameEvent::ScoreChanged(score) => set_text("score", &score.to_string()),
                    GameEvent::Won => log::info!("game won at {} ticks", self.state.time_ticks),
                }
            }

            let phase = self.state.phase;
            if phase != self.last_phase {
                if phase == GamePhase::Running {
                    self.resize();
                    set_text("score", "0");
                    set_hidden("start-screen", true);
                    set_hidden("win-screen", true);
                    self.win_panel_shown = false;
                }
                self.last_phase = phase;
            }

            // Let the confetti burst read before revealing the panel
            if self.state.win_panel_due() && !self.win_panel_shown {
                set_hidden("win-screen", false);
                self.win_panel_shown = true;
            }
        }
    }

    fn set_text(id: &str, text: &str) {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(id: &str, hidden: bool) {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Heartfall starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("context lookup failed")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let settings = Settings::load();

        let seed = js_sys::Date::now() as u64;
        let mut state = GameState::new(seed);
        state.max_particles = settings.max_particles();
        state.confetti_enabled = settings.effective_confetti();

        // Pre-warm the bounded glyph/size key space so the first catch
        // doesn't stall on rasterization
        let mut cache = SpriteCache::new(CanvasRasterizer {
            document: document.clone(),
        });
        cache.warm(&GOOD_GLYPHS, ITEM_MIN_SIZE..=ITEM_MAX_SIZE);
        cache.warm(&[BAD_GLYPH], ITEM_MIN_SIZE..=ITEM_MAX_SIZE);
        cache.warm(&[BURST_GOOD_GLYPH, BAD_GLYPH], PARTICLE_SIZE..=PARTICLE_SIZE);
        cache.warm(&CONFETTI_GLYPHS, PARTICLE_SIZE..=PARTICLE_SIZE);
        cache.warm(
            &[BASKET_FALLBACK_GLYPH],
            BASKET_FALLBACK_SIZE..=BASKET_FALLBACK_SIZE,
        );
        log::info!("sprite cache warmed ({} bitmaps)", cache.len());

        let surface = CanvasSurface {
            ctx,
            width: canvas.width() as f32,
            height: canvas.height() as f32,
        };

        let game = Rc::new(RefCell::new(Game {
            state,
            input: TickInput::default(),
            cache,
            surface,
            basket: AssetSlot::Pending,
            canvas,
            last_phase: GamePhase::Idle,
            win_panel_shown: false,
        }));

        game.borrow_mut().resize();

        load_basket_image(game.clone(), &document);
        setup_input_handlers(game.clone());
        setup_buttons(game.clone());
        setup_resize_handler(game.clone());

        request_animation_frame(game);

        log::info!("Heartfall running (seed {seed})");
    }

    /// Fetch the basket artwork. On load it is blitted into a canvas so
    /// the asset shares the sprite bitmap type; until then (or on error)
    /// the renderer falls back to a glyph.
    fn load_basket_image(game: Rc<RefCell<Game>>, document: &web_sys::Document) {
        let image = HtmlImageElement::new().expect("create image");

        {
            let game = game.clone();
            let image_ref = image.clone();
            let document = document.clone();
            let onload = Closure::once(move || {
                let canvas: HtmlCanvasElement = document
                    .create_element("canvas")
                    .expect("create canvas")
                    .dyn_into()
                    .expect("not a canvas");
                canvas.set_width(PLAYER_WIDTH as u32);
                canvas.set_height(PLAYER_HEIGHT as u32);
                let ctx: CanvasRenderingContext2d = canvas
                    .get_context("2d")
                    .expect("context lookup failed")
                    .expect("no 2d context")
                    .dyn_into()
                    .expect("not a 2d context");
                let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    &image_ref,
                    0.0,
                    0.0,
                    PLAYER_WIDTH as f64,
                    PLAYER_HEIGHT as f64,
                );
                game.borrow_mut().basket = AssetSlot::Ready(Rc::new(canvas));
                log::info!("basket image ready");
            });
            image.set_onload(Some(onload.as_ref().unchecked_ref()));
            onload.forget();
        }

        {
            let game = game.clone();
            let onerror = Closure::once(move || {
                game.borrow_mut().basket = AssetSlot::Failed;
                log::warn!("basket image failed to load, using fallback glyph");
            });
            image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
            onerror.forget();
        }

        image.set_src(BASKET_IMAGE_URL);
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Mouse move - last value wins within a tick
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let rect = g.canvas.get_bounding_client_rect();
                g.input.pointer_x = Some(event.client_x() as f32 - rect.left() as f32);
            });
            let _ = window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move and touch start share one handler
        for event_name in ["touchmove", "touchstart"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let rect = g.canvas.get_bounding_client_rect();
                    g.input.pointer_x = Some(touch.client_x() as f32 - rect.left() as f32);
                }
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.start = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("replay-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.replay = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Heartfall (native) starting...");
    log::info!("Native mode is headless - serve the wasm build for the browser version");

    println!("\nRunning headless smoke run...");
    smoke_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_run() {
    use heartfall::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

    let mut state = GameState::new(4242);
    tick(
        &mut state,
        &TickInput {
            start: true,
            ..Default::default()
        },
    );
    assert_eq!(state.phase, GamePhase::Running);

    // Hold the basket mid-field and let the run play out
    let input = TickInput {
        pointer_x: Some(state.field.width / 2.0),
        ..Default::default()
    };
    let mut ticks = 0u64;
    while state.phase == GamePhase::Running && ticks < 200_000 {
        for event in tick(&mut state, &input) {
            if let GameEvent::ScoreChanged(score) = event {
                println!("score {score}");
            }
        }
        ticks += 1;
    }

    assert_eq!(state.phase, GamePhase::Won);
    println!("✓ Won after {ticks} ticks");
}
