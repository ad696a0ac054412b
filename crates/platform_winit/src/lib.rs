//! platform_winit: window + input + present loop (winit 0.30).
//!
//! `run()` loads the viewer configs, opens a window and drives a
//! `ViewportController` through the wgpu `Renderer` on a fixed tick.

pub mod keys;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use data_runtime::configs::model_catalog::{self, ModelCatalog};
use data_runtime::configs::viewport as viewport_cfg;
use render_wgpu::{Renderer, RendererOptions};
use viewport_core::input::{DoubleClickDetector, WheelDelta};
use viewport_core::{BodyVariant, ViewportConfig, ViewportController};
use wgpu::SurfaceError;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Fullscreen, Window, WindowAttributes},
};

use keys::{LayerSlider, ViewerAction};

const DEMO_REACTION: &str = "demo";

/// Startup choices, usually filled from the command line.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Explicit OBJ to show instead of a catalogue variant.
    pub model: Option<PathBuf>,
    /// Named extra from the catalogue (e.g. `heart`).
    pub extra: Option<String>,
    /// `male`, `female` or `medical`; defaults to male.
    pub variant: Option<String>,
    pub reaction: Option<String>,
    pub background: Option<PathBuf>,
    pub wireframe: bool,
    pub no_vsync: bool,
}

/// Everything that exists only once the window does.
struct Viewer {
    window: Arc<Window>,
    renderer: Renderer,
    controller: ViewportController<Renderer>,
    clicks: DoubleClickDetector,
    cursor: [f32; 2],
    dragging: bool,
    layer: LayerSlider,
}

struct App {
    opts: RunOptions,
    cfg: ViewportConfig,
    catalog: ModelCatalog,
    viewer: Option<Viewer>,
    next_tick: Instant,
}

impl App {
    fn new(opts: RunOptions, cfg: ViewportConfig, catalog: ModelCatalog) -> Self {
        Self { opts, cfg, catalog, viewer: None, next_tick: Instant::now() }
    }

    fn start(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<Viewer> {
        let window = event_loop
            .create_window(
                WindowAttributes::default()
                    .with_title("Lifeness")
                    .with_inner_size(LogicalSize::new(1280.0, 800.0)),
            )
            .context("create window")?;
        let window = Arc::new(window);
        let mut renderer = pollster::block_on(Renderer::new(
            Arc::clone(&window),
            RendererOptions { wireframe: self.opts.wireframe, no_vsync: self.opts.no_vsync },
        ))?;

        let mut controller = ViewportController::new(self.cfg);
        for (variant, path) in [
            (BodyVariant::Male, &self.catalog.male),
            (BodyVariant::Female, &self.catalog.female),
            (BodyVariant::Medical, &self.catalog.medical),
        ] {
            if let Err(e) = controller.preload_variant(variant, path) {
                log::warn!("variant {} unavailable: {e}", variant.as_str());
            }
        }

        let explicit = match (&self.opts.model, &self.opts.extra) {
            (Some(path), _) => Some(path.clone()),
            (None, Some(name)) => {
                let found = self.catalog.extra(name).map(Path::to_path_buf);
                if found.is_none() {
                    log::warn!("no extra model named '{name}' in the catalogue");
                }
                found
            }
            (None, None) => None,
        };
        let shown = match explicit {
            Some(path) => match controller.set_active_mesh(&path) {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("{e}; falling back to a catalogue variant");
                    false
                }
            },
            None => false,
        };
        if !shown {
            let tag = self.opts.variant.as_deref().unwrap_or("male");
            let switched = match BodyVariant::from_name(tag) {
                Some(variant) => controller.select_variant(variant),
                None => controller.set_gender_model(tag),
            };
            if !switched {
                log::warn!("variant '{tag}' not loaded; showing placeholder");
            }
        }

        let now = Instant::now();
        let bg = self.opts.background.as_deref().unwrap_or(self.catalog.background.as_path());
        let frames = controller.load_background(&mut renderer, bg, now);
        log::info!("background: {frames} frame(s) from {}", bg.display());
        if let Some(id) = self.opts.reaction.as_deref() {
            controller.apply_reaction(Some(id), now);
        }

        Ok(Viewer {
            window,
            renderer,
            clicks: DoubleClickDetector::new(self.cfg.double_click),
            controller,
            cursor: [0.0, 0.0],
            dragging: false,
            layer: LayerSlider::default(),
        })
    }

    fn on_action(&mut self, action: ViewerAction) {
        let Some(v) = &mut self.viewer else {
            return;
        };
        let now = Instant::now();
        match action {
            ViewerAction::ToggleGender => {
                v.controller.toggle_gender_model();
            }
            ViewerAction::ShowMedical => {
                v.controller.select_variant(BodyVariant::Medical);
            }
            ViewerAction::ToggleReaction => {
                let next = if v.controller.reaction().is_some() {
                    None
                } else {
                    Some(self.opts.reaction.as_deref().unwrap_or(DEMO_REACTION))
                };
                v.controller.apply_reaction(next, now);
            }
            ViewerAction::LayerDown | ViewerAction::LayerUp => {
                let value = if action == ViewerAction::LayerUp {
                    v.layer.step_up()
                } else {
                    v.layer.step_down()
                };
                match v.controller.set_model_layer(&self.catalog, value) {
                    Ok(true) => log::info!("layer slider {value}"),
                    Ok(false) => {}
                    Err(e) => log::warn!("layer slider {value}: {e}"),
                }
            }
            ViewerAction::ResetCamera => v.controller.reset_camera(),
            ViewerAction::ToggleFullscreen => {
                let next = match v.window.fullscreen() {
                    Some(_) => None,
                    None => Some(Fullscreen::Borderless(None)),
                };
                v.window.set_fullscreen(next);
            }
            ViewerAction::LeaveFullscreen => v.window.set_fullscreen(None),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.viewer.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(v) => {
                v.window.request_redraw();
                self.viewer = Some(v);
                self.next_tick = Instant::now() + self.cfg.tick;
            }
            Err(e) => {
                log::error!("viewer init failed: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(v) = &mut self.viewer else {
            return;
        };
        if v.window.id() != window_id {
            return;
        }
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => v.renderer.resize(size),
            WindowEvent::CursorMoved { position, .. } => {
                v.cursor = [position.x as f32, position.y as f32];
                if v.dragging {
                    v.controller.drag_move(v.cursor[0]);
                }
            }
            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => match state {
                ElementState::Pressed => {
                    if v.clicks.press(Instant::now(), v.cursor) {
                        v.controller.double_click();
                    }
                    v.dragging = true;
                    v.controller.drag_start(v.cursor[0]);
                }
                ElementState::Released => {
                    v.dragging = false;
                    v.controller.drag_end();
                }
            },
            WindowEvent::Focused(false) => {
                // A press before alt-tab must not pair with one after it.
                v.clicks.reset();
                if v.dragging {
                    v.dragging = false;
                    v.controller.drag_end();
                }
            }
            WindowEvent::CursorLeft { .. } => {
                if v.dragging {
                    v.dragging = false;
                    v.controller.drag_end();
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => WheelDelta::Lines(y),
                    MouseScrollDelta::PixelDelta(p) => WheelDelta::Pixels(p.y),
                };
                v.controller.scroll(delta.notches());
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && !event.repeat
                    && let Some(action) = keys::action_for(&event.logical_key)
                {
                    self.on_action(action);
                }
            }
            WindowEvent::RedrawRequested => {
                match v.renderer.render(&mut v.controller, Instant::now()) {
                    Ok(_) => {}
                    Err(SurfaceError::Lost | SurfaceError::Outdated) => {
                        v.renderer.recreate_surface_current_size(&v.window);
                    }
                    Err(SurfaceError::OutOfMemory) => {
                        log::error!("surface out of memory; exiting");
                        event_loop.exit();
                    }
                    Err(e) => log::warn!("render error: {e:?}"),
                }
            }
            _ => {}
        }
        if let Some(v) = &mut self.viewer
            && v.controller.take_redraw_request()
        {
            v.window.request_redraw();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(v) = &self.viewer else {
            return;
        };
        let now = Instant::now();
        if now >= self.next_tick {
            // The pulse and the background animate without input.
            v.window.request_redraw();
            self.next_tick = now + self.cfg.tick;
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_tick));
    }
}

fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false)
}

fn is_headless() -> bool {
    if env_flag("LF_HEADLESS") || env_flag("CI") {
        return true;
    }
    #[cfg(any(
        target_os = "linux",
        target_os = "freebsd",
        target_os = "dragonfly",
        target_os = "netbsd",
        target_os = "openbsd",
    ))]
    {
        if std::env::var_os("DISPLAY").is_none() && std::env::var_os("WAYLAND_DISPLAY").is_none() {
            return true;
        }
    }
    false
}

/// Load configs, open the window and run until it closes.
pub fn run(opts: RunOptions) -> anyhow::Result<()> {
    let cfg = viewport_cfg::load_default().context("load viewport config")?;
    let cfg = ViewportConfig::from_cfg(&cfg);
    let catalog = model_catalog::load_default().context("load model catalogue")?;
    log::info!("assets root: {}", catalog.assets_root.display());
    if is_headless() {
        log::info!("no display available; skipping window");
        return Ok(());
    }
    let event_loop = EventLoop::new()?;
    let mut app = App::new(opts, cfg, catalog);
    event_loop.run_app(&mut app)?;
    Ok(())
}
