//! Split a U shaped polygon with a horizontal blade and print the pieces as JSON.
//!
//! Run with `RUST_LOG=trace` to see the clip stages.
use polyslice::{
    core::math::Vector2,
    polygon,
    polygon::Polygon,
    slicer::{CutLine, SLICE_BLADE_WIDTH},
};

fn main() -> Result<(), serde_json::Error> {
    env_logger::init();

    let u_shape: Polygon<f64> = polygon![
        (0.0, 0.0),
        (300.0, 0.0),
        (300.0, 300.0),
        (200.0, 300.0),
        (200.0, 100.0),
        (100.0, 100.0),
        (100.0, 300.0),
        (0.0, 300.0)
    ];

    let cut = CutLine::new(Vector2::new(-50.0, 200.0), Vector2::new(1.0, 0.0));
    let pieces = u_shape.split(&cut, SLICE_BLADE_WIDTH);

    log::info!("split area {} into {} pieces", u_shape.area(), pieces.len());
    for (i, piece) in pieces.iter().enumerate() {
        log::info!(
            "piece {}: {} vertexes, area {:.2}, centroid {:?}",
            i,
            piece.vertex_count(),
            piece.area(),
            piece.centroid()
        );
    }

    println!("{}", serde_json::to_string_pretty(&pieces)?);
    Ok(())
}
