mod test_utils;

use polyslice::{
    assert_fuzzy_eq,
    core::{math::Vector2, traits::FuzzyEq},
    polygon,
    polygon::{rectangle_points, Polygon},
    slicer::{split_polygon, CutLine, SliceOptions, SLICE_BLADE_WIDTH},
};
use test_utils::{create_property_set, for_each_modified, property_sets_match, PgonProperties};

fn u_shape() -> Polygon<f64> {
    polygon![
        (0.0, 0.0),
        (300.0, 0.0),
        (300.0, 300.0),
        (200.0, 300.0),
        (200.0, 100.0),
        (100.0, 100.0),
        (100.0, 300.0),
        (0.0, 300.0)
    ]
}

#[test]
fn square_split_through_center() {
    // 200 x 200 square centered on the origin cut horizontally with the interactive blade width
    let square = rectangle_points(Vector2::new(100.0, 100.0));
    let cut = CutLine::new(Vector2::new(-100.0, 0.0), Vector2::new(1.0, 0.0));
    let expected = [
        PgonProperties::new(4, 200.0 * 97.5, -100.0, -100.0, 100.0, -2.5),
        PgonProperties::new(4, 200.0 * 97.5, -100.0, 2.5, 100.0, 100.0),
    ];

    for_each_modified(&square, |pgon, state| {
        let pieces = pgon.split(&cut, SLICE_BLADE_WIDTH);
        let result_set = create_property_set(&pieces);
        assert!(
            property_sets_match(&result_set, &expected),
            "modified state: {:?}",
            state
        );
    });
}

#[test]
fn cut_far_outside_returns_single_unchanged_piece() {
    let square = rectangle_points(Vector2::new(100.0, 100.0));
    let cut = CutLine::new(Vector2::new(-1000.0, 5000.0), Vector2::new(1.0, 0.0));
    let pieces = square.split(&cut, SLICE_BLADE_WIDTH);
    assert_eq!(pieces.len(), 1);
    assert_fuzzy_eq!(pieces[0].area(), square.area());
    assert_eq!(pieces[0], square);
}

#[test]
fn non_convex_split_gives_three_pieces() {
    let cut = CutLine::new(Vector2::new(-50.0, 200.0), Vector2::new(1.0, 0.0));
    let expected = [
        PgonProperties::new(8, 30000.0 + 2.0 * 100.0 * 97.5, 0.0, 0.0, 300.0, 197.5),
        PgonProperties::new(4, 100.0 * 97.5, 0.0, 202.5, 100.0, 300.0),
        PgonProperties::new(4, 100.0 * 97.5, 200.0, 202.5, 300.0, 300.0),
    ];

    for_each_modified(&u_shape(), |pgon, state| {
        let pieces = pgon.split(&cut, SLICE_BLADE_WIDTH);
        let result_set = create_property_set(&pieces);
        assert!(
            property_sets_match(&result_set, &expected),
            "modified state: {:?}",
            state
        );
    });
}

#[test]
fn cut_direction_is_reversible() {
    // entering from the right gives the same pieces as entering from the left
    let cut = CutLine::new(Vector2::new(350.0, 200.0), Vector2::new(-1.0, 0.0));
    let pieces = u_shape().split(&cut, SLICE_BLADE_WIDTH);
    assert_eq!(pieces.len(), 3);
    let total: f64 = pieces.iter().map(|p| p.area()).sum();
    assert_fuzzy_eq!(total, 70000.0 - 300.0 * SLICE_BLADE_WIDTH + 100.0 * SLICE_BLADE_WIDTH, 1e-6);
}

#[test]
fn split_mass_converges_as_blade_narrows() {
    let pgon = polygon![(-80.0, -60.0), (90.0, -70.0), (120.0, 40.0), (-10.0, 110.0)];
    let original = pgon.area();
    // start just outside the polygon so the blade reaches across
    let cut = CutLine::new(Vector2::new(-84.0, -56.0), Vector2::new(3.0, 2.0));

    let mut prev_missing = f64::MAX;
    for width in [4.0, 1.0, 0.25, 0.01] {
        let pieces = pgon.split(&cut, width);
        assert_eq!(pieces.len(), 2, "blade width: {}", width);
        let total: f64 = pieces.iter().map(|p| p.area()).sum();
        let missing = original - total;
        assert!(missing > 0.0);
        assert!(missing < prev_missing);
        prev_missing = missing;
    }

    // chord is well under 300 long
    assert!(prev_missing < 0.01 * 300.0);
}

#[test]
fn diagonal_split_from_corner() {
    // 200 x 100 rectangle cut at 45 degrees from its lower left corner, exits through the top
    let rect = rectangle_points(Vector2::new(100.0, 50.0));
    let cut = CutLine::new(Vector2::new(-100.0, -50.0), Vector2::new(1.0, 1.0));
    let pieces = rect.split(&cut, SLICE_BLADE_WIDTH);
    assert_eq!(pieces.len(), 2);

    // blade edges sit 2.5 * sqrt(2) above and below the diagonal along each axis
    let offset = 2.5 * 2.0f64.sqrt();
    let upper_leg = 100.0 - offset;
    let lower_leg = 100.0 + offset;
    let mut areas: Vec<f64> = pieces.iter().map(|p| p.area()).collect();
    areas.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_fuzzy_eq!(areas[0], upper_leg * upper_leg / 2.0, 1e-6);
    assert_fuzzy_eq!(areas[1], 20000.0 - lower_leg * lower_leg / 2.0, 1e-6);
}

#[test]
fn wide_blade_consumes_polygon() {
    let small = rectangle_points(Vector2::new(2.0, 1.0));
    let cut = CutLine::new(Vector2::new(-2.0, 0.0), Vector2::new(1.0, 0.0));
    assert!(small.split(&cut, SLICE_BLADE_WIDTH).is_empty());
}

#[test]
fn short_margin_from_inside_leaves_notch() {
    let square = rectangle_points(Vector2::new(100.0, 100.0));
    let mut options = SliceOptions::new();
    options.margin = 1.0;

    // blade starts just left of the center and runs out through the right edge
    let cut = CutLine::new(Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0));
    let pieces = split_polygon(&square, &cut, 1.0, &options);
    assert_eq!(pieces.len(), 1);
    assert_fuzzy_eq!(pieces[0].area(), square.area() - 101.0, 1e-6);
    assert_eq!(pieces[0].vertex_count(), 8);

    // blade beside the polygon
    let tiny = rectangle_points(Vector2::new(1.0, 1.0));
    let cut = CutLine::new(Vector2::new(-40.0, 0.0), Vector2::new(0.0, 1.0));
    assert_eq!(split_polygon(&tiny, &cut, 1.0, &options), vec![tiny.clone()]);
}
