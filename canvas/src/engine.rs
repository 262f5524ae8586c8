use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent};

use crate::buffer::{GridPoint, PaintBuffer};
use crate::camera::{Camera, Point, Viewport};
use crate::color::{ColorError, HexColor};
use crate::config::{CanvasConfig, ConfigError};
use crate::consts::{MAX_FIT_ZOOM, MAX_INITIAL_ZOOM};
use crate::input::{Button, Cursor, InputState, Key, WheelDelta};
use crate::raster::{self, ExportError};
use crate::render;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Buffer or camera changed; repaint the surface.
    RenderNeeded,
    /// Show a different cursor over the surface.
    SetCursor(Cursor),
    /// A press started; subscribe to window-level mouse move/up.
    BeginCapture,
    /// The press ended; drop the window-level subscription.
    EndCapture,
}

/// Core engine state — all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
/// Until a viewport is recorded by [`EngineCore::resize_to_container`] the
/// surface counts as detached and every view or pointer operation is a no-op.
#[derive(Debug, Clone)]
pub struct EngineCore {
    config: CanvasConfig,
    buffer: PaintBuffer,
    camera: Camera,
    input: InputState,
    can_grab: bool,
    color: HexColor,
    viewport: Option<Viewport>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            config,
            buffer: PaintBuffer::new(&config),
            camera: Camera::default(),
            input: InputState::Idle,
            can_grab: false,
            color: HexColor::default(),
            viewport: None,
        }
    }

    // --- Parameters from collaborators ---

    /// Apply new dimensions from the sizing form.
    ///
    /// A changed config resets the canvas; an identical one is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for zero dimensions; the current config stays active.
    pub fn configure(&mut self, width: u32, height: u32, cell_size: u32) -> Result<Vec<Action>, ConfigError> {
        let config = CanvasConfig::new(width, height, cell_size)?;
        if config == self.config {
            return Ok(Vec::new());
        }
        tracing::debug!(width, height, cell_size, "canvas reconfigured");
        self.config = config;
        Ok(self.reset())
    }

    /// Select the paint color for subsequent writes.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError`] for malformed input; the previous color stays active.
    pub fn set_color(&mut self, raw: &str) -> Result<(), ColorError> {
        self.color = HexColor::parse(raw)?;
        Ok(())
    }

    // --- View transform ---

    /// Record the surface size and refit the artwork, never upscaling past 1:1.
    pub fn resize_to_container(&mut self, viewport: Viewport) -> Vec<Action> {
        self.viewport = Some(viewport);
        self.camera = self.fitted(viewport, MAX_INITIAL_ZOOM);
        vec![Action::RenderNeeded]
    }

    /// Center the artwork and scale it to fill the surface, up to 10x.
    pub fn fit_to_view(&mut self) -> Vec<Action> {
        let Some(viewport) = self.viewport else {
            return Vec::new();
        };
        self.camera = self.fitted(viewport, MAX_FIT_ZOOM);
        tracing::debug!(zoom = self.camera.zoom, "fit to view");
        vec![Action::RenderNeeded]
    }

    /// Clear every painted cell and restore the initial fit.
    pub fn reset(&mut self) -> Vec<Action> {
        self.buffer.reset(&self.config);
        let Some(viewport) = self.viewport else {
            return Vec::new();
        };
        self.camera = self.fitted(viewport, MAX_INITIAL_ZOOM);
        tracing::debug!(zoom = self.camera.zoom, "canvas reset");
        vec![Action::RenderNeeded]
    }

    fn fitted(&self, viewport: Viewport, max_zoom: f64) -> Camera {
        Camera::fitted(viewport, f64::from(self.config.width()), f64::from(self.config.height()), max_zoom)
    }

    /// Convert a surface point to logical coordinates using the current camera.
    #[must_use]
    pub fn screen_to_logical(&self, screen: Point) -> Point {
        self.camera.screen_to_world(screen)
    }

    /// The grid cell under a surface point, whether or not it is inside the grid.
    #[must_use]
    pub fn screen_to_grid(&self, screen: Point) -> GridPoint {
        GridPoint::from_world(self.screen_to_logical(screen), self.config.cell_size())
    }

    // --- Input events ---

    /// Mouse pressed on the surface.
    pub fn on_pointer_down(&mut self, screen: Point, button: Button) -> Vec<Action> {
        if self.viewport.is_none() {
            return Vec::new();
        }
        let mut actions = Vec::new();
        if !self.input.is_mouse_down() {
            actions.push(Action::BeginCapture);
        }
        if button == Button::Middle {
            actions.extend(self.fit_to_view());
        }

        if self.can_grab {
            self.input = InputState::Panning { grab_offset: self.camera.grab_offset(screen) };
            actions.push(Action::SetCursor(self.cursor()));
        } else {
            self.input = InputState::Pressed;
            if button == Button::Primary {
                actions.extend(self.paint_at(screen));
            }
        }
        actions
    }

    /// Mouse moved anywhere in the window while a press is active.
    pub fn on_pointer_move(&mut self, screen: Point) -> Vec<Action> {
        match self.input {
            InputState::Idle => Vec::new(),
            _ if !self.can_grab => self.paint_at(screen),
            InputState::Panning { grab_offset } => {
                self.camera.pan_to(screen, grab_offset);
                vec![Action::RenderNeeded]
            }
            InputState::Pressed => Vec::new(),
        }
    }

    /// Mouse released anywhere in the window.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        if !self.input.is_mouse_down() {
            return Vec::new();
        }
        self.input = InputState::Idle;
        vec![Action::EndCapture, Action::SetCursor(self.cursor())]
    }

    /// Wheel over the surface: zoom one step around the cursor.
    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta) -> Vec<Action> {
        if self.viewport.is_none() {
            return Vec::new();
        }
        self.camera.zoom_at(screen, delta.dy);
        vec![Action::RenderNeeded]
    }

    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        self.set_grab(key, true)
    }

    pub fn on_key_up(&mut self, key: &Key) -> Vec<Action> {
        self.set_grab(key, false)
    }

    fn set_grab(&mut self, key: &Key, held: bool) -> Vec<Action> {
        if !key.is_grab() || self.can_grab == held {
            return Vec::new();
        }
        self.can_grab = held;
        vec![Action::SetCursor(self.cursor())]
    }

    fn paint_at(&mut self, screen: Point) -> Vec<Action> {
        let point = self.screen_to_grid(screen);
        if self.buffer.write(point, &self.color) {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    // --- Export ---

    /// Encode the painted cells as a PNG at native logical resolution.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] if the canvas is too large to rasterize or PNG encoding fails.
    pub fn export_png(&self) -> Result<Vec<u8>, ExportError> {
        raster::encode_png(&raster::rasterize(&self.buffer, &self.config)?)
    }

    /// [`EngineCore::export_png`] wrapped in a data URL.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] if the canvas is too large to rasterize or PNG encoding fails.
    pub fn export_data_url(&self) -> Result<String, ExportError> {
        self.export_png().map(|png| raster::png_data_url(&png))
    }

    // --- Queries ---

    /// Cursor matching the current grab and drag state.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        match (self.can_grab, self.input.is_dragging()) {
            (true, true) => Cursor::Grabbing,
            (true, false) => Cursor::Grab,
            (false, _) => Cursor::Crosshair,
        }
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[must_use]
    pub fn config(&self) -> CanvasConfig {
        self.config
    }

    #[must_use]
    pub fn buffer(&self) -> &PaintBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn color(&self) -> &HexColor {
        &self.color
    }

    #[must_use]
    pub fn input(&self) -> InputState {
        self.input
    }

    #[must_use]
    pub fn can_grab(&self) -> bool {
        self.can_grab
    }

    #[must_use]
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas and its container.
pub struct Engine {
    canvas: HtmlCanvasElement,
    container: HtmlElement,
    ctx: Option<CanvasRenderingContext2d>,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element and its sizing container.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, container: HtmlElement, config: CanvasConfig) -> Self {
        Self { canvas, container, ctx: None, core: EngineCore::new(config) }
    }

    /// Match the backing store to the container's rendered box and refit.
    ///
    /// No-op while the 2D context cannot be acquired.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn resize_to_container(&mut self) -> Vec<Action> {
        let rect = self.container.get_bounding_client_rect();
        self.canvas.set_width(rect.width().max(0.0) as u32);
        self.canvas.set_height(rect.height().max(0.0) as u32);

        self.ctx = context_2d(&self.canvas);
        if self.ctx.is_none() {
            tracing::warn!("2d context unavailable; surface left detached");
            return Vec::new();
        }
        let viewport = Viewport::new(f64::from(self.canvas.width()), f64::from(self.canvas.height()));
        self.core.resize_to_container(viewport)
    }

    /// Clear the drawing and refit to the container's current size.
    pub fn reset(&mut self) -> Vec<Action> {
        let mut actions = self.resize_to_container();
        actions.extend(self.core.reset());
        actions
    }

    /// Position of a mouse event relative to the canvas' top-left corner.
    #[must_use]
    pub fn surface_point(&self, event: &MouseEvent) -> Point {
        let rect = self.canvas.get_bounding_client_rect();
        Point::new(f64::from(event.client_x()) - rect.left(), f64::from(event.client_y()) - rect.top())
    }

    pub fn set_cursor(&self, cursor: Cursor) {
        if let Err(err) = self.canvas.style().set_property("cursor", cursor.css()) {
            tracing::warn!(?err, "failed to set cursor");
        }
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    pub fn render(&self) {
        let (Some(ctx), Some(viewport)) = (&self.ctx, self.core.viewport()) else {
            return;
        };
        if let Err(err) = render::draw(ctx, self.core.buffer(), &self.core.camera(), &self.core.config(), viewport) {
            tracing::warn!(?err, "render failed");
        }
    }

    /// Export as a PNG data URL, or `None` when the surface is detached or encoding fails.
    #[must_use]
    pub fn export_data_url(&self) -> Option<String> {
        if self.ctx.is_none() {
            return None;
        }
        match self.core.export_data_url() {
            Ok(url) => Some(url),
            Err(err) => {
                tracing::warn!(%err, "export failed");
                None
            }
        }
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    match canvas.get_context("2d") {
        Ok(Some(obj)) => match obj.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => Some(ctx),
            Err(_) => None,
        },
        _ => None,
    }
}
