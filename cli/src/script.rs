//! Replay scripts: a JSON list of input events fed to a headless engine.
//!
//! ```json
//! {
//!   "viewport": { "width": 900, "height": 600 },
//!   "events": [
//!     { "type": "color", "value": "#f00" },
//!     { "type": "pointer_down", "x": 15, "y": 15 },
//!     { "type": "pointer_move", "x": 45, "y": 15 },
//!     { "type": "pointer_up" }
//!   ]
//! }
//! ```

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use pixel_canvas::camera::{Point, Viewport};
use pixel_canvas::color::ColorError;
use pixel_canvas::config::ConfigError;
use pixel_canvas::engine::{Action, EngineCore};
use pixel_canvas::input::{Button, Key, WheelDelta};
use serde::Deserialize;

const DEFAULT_VIEWPORT_WIDTH: f64 = 800.0;
const DEFAULT_VIEWPORT_HEIGHT: f64 = 600.0;

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    /// Size of the virtual surface the events are expressed in.
    #[serde(default)]
    pub viewport: ScriptViewport,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ScriptViewport {
    pub width: f64,
    pub height: f64,
}

impl Default for ScriptViewport {
    fn default() -> Self {
        Self { width: DEFAULT_VIEWPORT_WIDTH, height: DEFAULT_VIEWPORT_HEIGHT }
    }
}

impl From<ScriptViewport> for Viewport {
    fn from(viewport: ScriptViewport) -> Self {
        Viewport::new(viewport.width, viewport.height)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

impl From<ScriptButton> for Button {
    fn from(button: ScriptButton) -> Self {
        match button {
            ScriptButton::Primary => Button::Primary,
            ScriptButton::Middle => Button::Middle,
            ScriptButton::Secondary => Button::Secondary,
        }
    }
}

/// One recorded interaction, positions in surface pixels.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        button: ScriptButton,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp,
    Wheel {
        x: f64,
        y: f64,
        dy: f64,
    },
    KeyDown {
        code: String,
    },
    KeyUp {
        code: String,
    },
    Color {
        value: String,
    },
    Resize {
        width: f64,
        height: f64,
    },
    Fit,
    Reset,
    Configure {
        width: u32,
        height: u32,
        cell_size: u32,
    },
}

/// Tally of a finished replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub events: usize,
    /// Events that asked the host to repaint.
    pub renders: usize,
    /// Color or configure events whose value was refused.
    pub rejected: usize,
}

/// Mount `core` on the script's viewport and feed it every event in order.
///
/// Refused values are logged and counted; they never stop the replay.
pub fn replay(core: &mut EngineCore, script: &Script) -> ReplayReport {
    let mut report = ReplayReport::default();
    core.resize_to_container(script.viewport.into());

    for (index, event) in script.events.iter().enumerate() {
        report.events += 1;
        match apply(core, event) {
            Ok(actions) => {
                if actions.contains(&Action::RenderNeeded) {
                    report.renders += 1;
                }
            }
            Err(reason) => {
                tracing::warn!(index, %reason, "event rejected");
                report.rejected += 1;
            }
        }
    }

    tracing::debug!(events = report.events, renders = report.renders, "replay finished");
    report
}

/// A value the engine refused; the previous state stays active.
#[derive(Debug, thiserror::Error)]
enum Rejected {
    #[error(transparent)]
    Color(#[from] ColorError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn apply(core: &mut EngineCore, event: &ScriptEvent) -> Result<Vec<Action>, Rejected> {
    let actions = match event {
        ScriptEvent::PointerDown { x, y, button } => core.on_pointer_down(Point::new(*x, *y), (*button).into()),
        ScriptEvent::PointerMove { x, y } => core.on_pointer_move(Point::new(*x, *y)),
        ScriptEvent::PointerUp => core.on_pointer_up(),
        ScriptEvent::Wheel { x, y, dy } => core.on_wheel(Point::new(*x, *y), WheelDelta { dy: *dy }),
        ScriptEvent::KeyDown { code } => core.on_key_down(&Key(code.clone())),
        ScriptEvent::KeyUp { code } => core.on_key_up(&Key(code.clone())),
        ScriptEvent::Color { value } => {
            core.set_color(value)?;
            Vec::new()
        }
        ScriptEvent::Resize { width, height } => core.resize_to_container(Viewport::new(*width, *height)),
        ScriptEvent::Fit => core.fit_to_view(),
        ScriptEvent::Reset => core.reset(),
        ScriptEvent::Configure { width, height, cell_size } => core.configure(*width, *height, *cell_size)?,
    };
    Ok(actions)
}
