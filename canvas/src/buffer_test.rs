use super::*;

fn color(raw: &str) -> HexColor {
    HexColor::parse(raw).unwrap()
}

fn buffer_100() -> PaintBuffer {
    PaintBuffer::new(&CanvasConfig::new(100, 100, 10).unwrap())
}

// =============================================================
// GridPoint
// =============================================================

#[test]
fn from_world_floors_into_cells() {
    assert_eq!(GridPoint::from_world(Point::new(0.0, 0.0), 10), GridPoint::new(0, 0));
    assert_eq!(GridPoint::from_world(Point::new(9.999, 10.0), 10), GridPoint::new(0, 1));
    assert_eq!(GridPoint::from_world(Point::new(25.0, 35.0), 10), GridPoint::new(2, 3));
}

#[test]
fn from_world_negative_coordinates_floor_downward() {
    assert_eq!(GridPoint::from_world(Point::new(-0.5, -10.0), 10), GridPoint::new(-1, -1));
    assert_eq!(GridPoint::from_world(Point::new(-10.5, 3.0), 10), GridPoint::new(-2, 0));
}

#[test]
fn grid_points_are_distinct_keys() {
    // "1_11" vs "11_1" style collisions cannot happen with structural keys.
    let mut buffer = PaintBuffer::new(&CanvasConfig::new(200, 200, 1).unwrap());
    assert!(buffer.write(GridPoint::new(1, 11), &color("#111")));
    assert!(buffer.write(GridPoint::new(11, 1), &color("#222")));
    assert_eq!(buffer.len(), 2);
}

// =============================================================
// Writes
// =============================================================

#[test]
fn new_buffer_is_empty() {
    let buffer = buffer_100();
    assert!(buffer.is_empty());
    assert_eq!(buffer.len(), 0);
}

#[test]
fn write_stores_color() {
    let mut buffer = buffer_100();
    assert!(buffer.write(GridPoint::new(2, 3), &color("#00ff00")));
    assert_eq!(buffer.get(GridPoint::new(2, 3)), Some(&color("#00ff00")));
    assert_eq!(buffer.get(GridPoint::new(3, 2)), None);
}

#[test]
fn write_is_idempotent() {
    let mut once = buffer_100();
    once.write(GridPoint::new(4, 4), &color("#abc"));

    let mut twice = buffer_100();
    twice.write(GridPoint::new(4, 4), &color("#abc"));
    twice.write(GridPoint::new(4, 4), &color("#abc"));

    assert_eq!(once.len(), twice.len());
    assert_eq!(once.get(GridPoint::new(4, 4)), twice.get(GridPoint::new(4, 4)));
}

#[test]
fn last_write_wins() {
    let mut buffer = buffer_100();
    buffer.write(GridPoint::new(1, 1), &color("#ff0000"));
    buffer.write(GridPoint::new(1, 1), &color("#0000ff"));
    assert_eq!(buffer.len(), 1);
    assert_eq!(buffer.get(GridPoint::new(1, 1)), Some(&color("#0000ff")));
}

#[test]
fn write_rejects_out_of_bounds() {
    let mut buffer = buffer_100();
    for point in [
        GridPoint::new(-1, 0),
        GridPoint::new(0, -1),
        GridPoint::new(10, 0),
        GridPoint::new(0, 10),
        GridPoint::new(i64::MAX, i64::MIN),
    ] {
        assert!(!buffer.write(point, &color("#fff")), "{point:?}");
    }
    assert!(buffer.is_empty());
}

#[test]
fn write_accepts_grid_corners() {
    let mut buffer = buffer_100();
    assert!(buffer.write(GridPoint::new(0, 0), &color("#fff")));
    assert!(buffer.write(GridPoint::new(9, 9), &color("#fff")));
    assert_eq!(buffer.len(), 2);
}

#[test]
fn partial_trailing_cell_is_out_of_bounds() {
    // 105 / 10 leaves half a cell on the right edge; it is not paintable.
    let mut buffer = PaintBuffer::new(&CanvasConfig::new(105, 100, 10).unwrap());
    assert!(buffer.write(GridPoint::new(9, 0), &color("#fff")));
    assert!(!buffer.write(GridPoint::new(10, 0), &color("#fff")));
}

// =============================================================
// Clear / reset / iteration
// =============================================================

#[test]
fn clear_empties_buffer() {
    let mut buffer = buffer_100();
    buffer.write(GridPoint::new(1, 2), &color("#fff"));
    buffer.write(GridPoint::new(3, 4), &color("#000"));
    buffer.clear();
    assert!(buffer.is_empty());
}

#[test]
fn reset_adopts_new_bounds() {
    let mut buffer = buffer_100();
    buffer.write(GridPoint::new(5, 5), &color("#fff"));
    buffer.reset(&CanvasConfig::new(20, 20, 10).unwrap());
    assert!(buffer.is_empty());
    assert!(buffer.contains(GridPoint::new(1, 1)));
    assert!(!buffer.contains(GridPoint::new(5, 5)));
}

#[test]
fn iter_yields_every_cell() {
    let mut buffer = buffer_100();
    buffer.write(GridPoint::new(0, 0), &color("#ff0000"));
    buffer.write(GridPoint::new(2, 3), &color("#00ff00"));

    let mut cells: Vec<_> = buffer.iter().map(|(p, c)| (p, c.as_str().to_owned())).collect();
    cells.sort();
    assert_eq!(
        cells,
        vec![(GridPoint::new(0, 0), "#ff0000".to_owned()), (GridPoint::new(2, 3), "#00ff00".to_owned())]
    );
}
