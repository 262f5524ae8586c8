#![allow(clippy::float_cmp)]

use super::*;
use pixel_canvas::buffer::GridPoint;
use pixel_canvas::config::CanvasConfig;

// =============================================================
// Helpers
// =============================================================

fn parse(json: &str) -> Script {
    serde_json::from_str(json).unwrap()
}

/// Default 900x600 artwork replayed on a matching surface: zoom 1, no pan.
fn run(events: &str) -> (EngineCore, ReplayReport) {
    let script = parse(&format!(r#"{{"viewport": {{"width": 900, "height": 600}}, "events": {events}}}"#));
    let mut core = EngineCore::new(CanvasConfig::default());
    let report = replay(&mut core, &script);
    (core, report)
}

fn color_at(core: &EngineCore, x: i64, y: i64) -> Option<&str> {
    core.buffer().get(GridPoint::new(x, y)).map(|color| color.as_str())
}

// =============================================================
// Parsing
// =============================================================

#[test]
fn parse_fills_defaults() {
    let script = parse(r#"{"events": [{"type": "pointer_down", "x": 1, "y": 2}, {"type": "wheel", "x": 0, "y": 0, "dy": 3}]}"#);
    assert_eq!(script.viewport.width, 800.0);
    assert_eq!(script.viewport.height, 600.0);
    assert_eq!(script.events[0], ScriptEvent::PointerDown { x: 1.0, y: 2.0, button: ScriptButton::Primary });
    assert_eq!(script.events[1], ScriptEvent::Wheel { x: 0.0, y: 0.0, dy: 3.0 });
}

#[test]
fn parse_reads_unit_and_named_events() {
    let script = parse(
        r#"{"events": [
            {"type": "pointer_up"},
            {"type": "fit"},
            {"type": "reset"},
            {"type": "key_down", "code": "Space"},
            {"type": "pointer_down", "x": 0, "y": 0, "button": "middle"},
            {"type": "configure", "width": 64, "height": 32, "cell_size": 8}
        ]}"#,
    );
    assert_eq!(script.events.len(), 6);
    assert_eq!(script.events[3], ScriptEvent::KeyDown { code: "Space".into() });
    assert_eq!(script.events[4], ScriptEvent::PointerDown { x: 0.0, y: 0.0, button: ScriptButton::Middle });
    assert_eq!(script.events[5], ScriptEvent::Configure { width: 64, height: 32, cell_size: 8 });
}

#[test]
fn parse_rejects_unknown_event() {
    let result = serde_json::from_str::<Script>(r#"{"events": [{"type": "teleport"}]}"#);
    assert!(result.is_err());
}

#[test]
fn empty_script_only_mounts() {
    let (core, report) = run("[]");
    assert_eq!(report, ReplayReport::default());
    assert!(core.buffer().is_empty());
    assert_eq!(core.camera().zoom, 1.0);
}

// =============================================================
// Replay
// =============================================================

#[test]
fn stroke_paints_every_cell_it_crosses() {
    let (core, report) = run(
        r##"[
            {"type": "color", "value": "#f00"},
            {"type": "pointer_down", "x": 15, "y": 15},
            {"type": "pointer_move", "x": 45, "y": 15},
            {"type": "pointer_up"}
        ]"##,
    );
    assert_eq!(report.events, 4);
    assert_eq!(report.renders, 2);
    assert_eq!(report.rejected, 0);
    assert_eq!(core.buffer().len(), 2);
    assert_eq!(color_at(&core, 1, 1), Some("#f00"));
    assert_eq!(color_at(&core, 4, 1), Some("#f00"));
}

#[test]
fn space_drag_pans_without_painting() {
    let (core, _) = run(
        r#"[
            {"type": "key_down", "code": "Space"},
            {"type": "pointer_down", "x": 100, "y": 100},
            {"type": "pointer_move", "x": 150, "y": 120},
            {"type": "pointer_up"},
            {"type": "key_up", "code": "Space"}
        ]"#,
    );
    assert!(core.buffer().is_empty());
    assert_eq!(core.camera().pan_x, 50.0);
    assert_eq!(core.camera().pan_y, 20.0);
    assert!(!core.can_grab());
}

#[test]
fn wheel_zooms_around_cursor() {
    let (core, report) = run(r#"[{"type": "wheel", "x": 0, "y": 0, "dy": -100}]"#);
    assert_eq!(report.renders, 1);
    assert!((core.camera().zoom - 1.1).abs() < 1e-9);
    assert_eq!(core.camera().pan_x, 0.0);
}

#[test]
fn rejected_color_keeps_previous() {
    let (core, report) = run(
        r#"[
            {"type": "color", "value": "red"},
            {"type": "pointer_down", "x": 5, "y": 5},
            {"type": "pointer_up"}
        ]"#,
    );
    assert_eq!(report.rejected, 1);
    assert_eq!(color_at(&core, 0, 0), Some("#da1"));
}

#[test]
fn configure_clears_drawing_and_bad_sizes_are_rejected() {
    let (core, report) = run(
        r#"[
            {"type": "pointer_down", "x": 5, "y": 5},
            {"type": "pointer_up"},
            {"type": "configure", "width": 100, "height": 100, "cell_size": 10},
            {"type": "configure", "width": 100, "height": 100, "cell_size": 0}
        ]"#,
    );
    assert_eq!(report.rejected, 1);
    assert!(core.buffer().is_empty());
    assert_eq!(core.config().width(), 100);
    assert_eq!(core.config().cell_size(), 10);
}

#[test]
fn out_of_bounds_press_is_not_a_render() {
    let (core, report) = run(
        r#"[
            {"type": "pointer_down", "x": 905, "y": 5},
            {"type": "pointer_up"}
        ]"#,
    );
    assert_eq!(report.renders, 0);
    assert!(core.buffer().is_empty());
}

#[test]
fn horizontal_wheel_component_is_ignored() {
    let (plain, _) = run(r#"[{"type": "wheel", "x": 300, "y": 200, "dy": -1}]"#);
    let (sideways, _) = run(r#"[{"type": "wheel", "x": 300, "y": 200, "dx": 40, "dy": -1}]"#);
    assert_eq!(plain.camera(), sideways.camera());
}
