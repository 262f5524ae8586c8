//! Pixel-art canvas engine.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! full lifecycle of a zoomable, pannable pixel grid: translating raw DOM input
//! events into cell writes and view changes, maintaining the camera, painting
//! the checkerboard and cells, and exporting the drawing as a PNG. The host page
//! only supplies the canvas, its container, the grid size and the paint color.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`buffer`] | Sparse store of painted cells |
//! | [`camera`] | Pan/zoom camera, fitting and coordinate conversions |
//! | [`input`] | Input event types and the press/pan state machine |
//! | [`render`] | On-screen drawing through the camera |
//! | [`raster`] | Native-resolution PNG export |
//! | [`color`] | Validated hex paint colors |
//! | [`config`] | Grid dimensions from the sizing form |
//! | [`host`] | DOM listener wiring and the JavaScript-facing [`host::PixelCanvas`] |
//! | [`consts`] | Shared constants (zoom limits, shades, defaults) |

pub mod buffer;
pub mod camera;
pub mod color;
pub mod config;
pub mod consts;
pub mod engine;
pub mod host;
pub mod input;
pub mod raster;
pub mod render;
