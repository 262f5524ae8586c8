//! Rendering: draws the full canvas scene to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives read-only views of the paint buffer and camera and produces
//! pixels — it does not mutate any application state.
//!
//! Every call is a full repaint: reset, clear, apply the camera, paint the
//! checkerboard, then paint every cell. Repeated or overlapping requests
//! therefore always converge on the same picture.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::buffer::{GridPoint, PaintBuffer};
use crate::camera::{Camera, Viewport};
use crate::config::CanvasConfig;
use crate::consts::{CHECKER_DARK, CHECKER_LIGHT};

/// Draw the checkerboard and every painted cell through `camera`.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    buffer: &PaintBuffer,
    camera: &Camera,
    config: &CanvasConfig,
    viewport: Viewport,
) -> Result<(), JsValue> {
    ctx.save();
    let result = draw_scene(ctx, buffer, camera, config, viewport);
    ctx.restore();
    result
}

fn draw_scene(
    ctx: &CanvasRenderingContext2d,
    buffer: &PaintBuffer,
    camera: &Camera,
    config: &CanvasConfig,
    viewport: Viewport,
) -> Result<(), JsValue> {
    // Layer 1: clear in surface space, then enter logical space.
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, viewport.width, viewport.height);
    ctx.translate(camera.pan_x, camera.pan_y)?;
    ctx.scale(camera.zoom, camera.zoom)?;

    // Layer 2: checkerboard under the artwork area.
    draw_background(ctx, config)?;

    // Layer 3: painted cells.
    let size = f64::from(config.cell_size());
    for (point, color) in buffer.iter() {
        let (x, y) = cell_origin(point, config.cell_size());
        ctx.set_fill_style_str(color.as_str());
        ctx.fill_rect(x, y, size, size);
    }
    Ok(())
}

/// Top-left corner of a cell in logical units.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn cell_origin(point: GridPoint, cell_size: u32) -> (f64, f64) {
    let size = f64::from(cell_size);
    (point.x as f64 * size, point.y as f64 * size)
}

/// Shade of the checkerboard quadrant at `(col, row)`, counted in cells.
#[must_use]
pub fn checker_shade(col: u64, row: u64) -> &'static str {
    if (col + row) % 2 == 0 { CHECKER_LIGHT } else { CHECKER_DARK }
}

// =============================================================
// Background
// =============================================================

/// Fill the logical artwork area with a repeating 2x2-cell checker tile.
///
/// Without a document to build the tile in, the background is left clear.
fn draw_background(ctx: &CanvasRenderingContext2d, config: &CanvasConfig) -> Result<(), JsValue> {
    let Some(tile) = checker_tile(config.cell_size())? else {
        return Ok(());
    };
    let Some(pattern) = ctx.create_pattern_with_html_canvas_element(&tile, "repeat")? else {
        return Ok(());
    };
    ctx.set_fill_style_canvas_pattern(&pattern);
    ctx.fill_rect(0.0, 0.0, f64::from(config.width()), f64::from(config.height()));
    Ok(())
}

/// Offscreen `2 * cell_size` square holding one period of the checkerboard.
#[allow(clippy::cast_precision_loss)]
fn checker_tile(cell_size: u32) -> Result<Option<HtmlCanvasElement>, JsValue> {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return Ok(None);
    };
    let tile = document.create_element("canvas")?.dyn_into::<HtmlCanvasElement>()?;
    tile.set_width(cell_size.saturating_mul(2));
    tile.set_height(cell_size.saturating_mul(2));

    let Some(tctx) = tile.get_context("2d")? else {
        return Ok(None);
    };
    let tctx = tctx.dyn_into::<CanvasRenderingContext2d>()?;
    let size = f64::from(cell_size);
    for row in 0..2 {
        for col in 0..2 {
            tctx.set_fill_style_str(checker_shade(col, row));
            tctx.fill_rect(col as f64 * size, row as f64 * size, size, size);
        }
    }
    Ok(Some(tile))
}
