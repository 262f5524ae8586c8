#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::consts::{MAX_WHEEL_ZOOM, MIN_WHEEL_ZOOM, ZOOM_STEP};

/// A point in either screen or logical space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel size of the drawing surface, matching its container's rendered box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// View transform between screen pixels and logical drawing units.
///
/// `pan_x` / `pan_y` are in surface pixels.
/// `zoom` is a scale factor (1.0 = one surface pixel per logical unit).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Camera that centers a `logical_w` x `logical_h` artwork inside `viewport`,
    /// scaled to fit but never beyond `max_zoom`.
    ///
    /// A collapsed viewport still yields a positive zoom so that coordinate
    /// conversions stay finite.
    #[must_use]
    pub fn fitted(viewport: Viewport, logical_w: f64, logical_h: f64, max_zoom: f64) -> Self {
        let zoom = (viewport.width / logical_w)
            .min(viewport.height / logical_h)
            .min(max_zoom)
            .max(MIN_WHEEL_ZOOM);
        Self {
            pan_x: viewport.width * 0.5 - logical_w * 0.5 * zoom,
            pan_y: viewport.height * 0.5 - logical_h * 0.5 * zoom,
            zoom,
        }
    }

    /// Convert a screen-space point (surface pixels) to logical coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a logical point to screen coordinates (surface pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.zoom + self.pan_x,
            y: world.y * self.zoom + self.pan_y,
        }
    }

    /// Step the zoom by one wheel notch, keeping the logical point under `screen` fixed.
    ///
    /// A negative `wheel_dy` (wheel pushed away) zooms in, anything else zooms out.
    pub fn zoom_at(&mut self, screen: Point, wheel_dy: f64) {
        let anchor = self.screen_to_world(screen);
        self.zoom = if wheel_dy < 0.0 {
            (self.zoom + ZOOM_STEP).min(MAX_WHEEL_ZOOM)
        } else {
            (self.zoom - ZOOM_STEP).max(MIN_WHEEL_ZOOM)
        };
        self.pan_x = screen.x - anchor.x * self.zoom;
        self.pan_y = screen.y - anchor.y * self.zoom;
    }

    /// Offset between a screen point and the current pan, captured when a pan drag starts.
    #[must_use]
    pub fn grab_offset(&self, screen: Point) -> Point {
        Point::new(screen.x - self.pan_x, screen.y - self.pan_y)
    }

    /// Move the pan so that `grab_offset` (from [`Camera::grab_offset`]) stays under `screen`.
    pub fn pan_to(&mut self, screen: Point, grab_offset: Point) {
        self.pan_x = screen.x - grab_offset.x;
        self.pan_y = screen.y - grab_offset.y;
    }
}
