use super::{CutLine, SliceOptions};
use crate::{
    core::traits::Real,
    polygon::{blade_points, ClipOptions, Polygon},
};

/// Cut `polygon` along `cut_line` with a blade of `blade_width`.
///
/// The blade starts `options.margin` before the cut start and runs for the bounding box diagonal
/// plus the margin, so it crosses the whole polygon from any entry point. The blade area is
/// subtracted and the remaining pieces are returned:
///
/// * no pieces when the blade covers the polygon (or the polygon is invalid),
/// * the polygon unchanged when the blade misses it or `cut_line.direction` is zero,
/// * one or more pieces otherwise.
///
/// A blade that sits fully inside the polygon leaves it whole (the hole is dropped).
///
/// # Examples
///
/// ```
/// # use polyslice::polygon::rectangle_points;
/// # use polyslice::slicer::{split_polygon, CutLine, SliceOptions};
/// # use polyslice::core::{math::Vector2, traits::*};
/// let square = rectangle_points(Vector2::new(100.0, 100.0));
/// let cut = CutLine::new(Vector2::new(-100.0, 0.0), Vector2::new(1.0, 0.0));
/// let pieces = split_polygon(&square, &cut, 5.0, &SliceOptions::new());
/// assert_eq!(pieces.len(), 2);
/// assert!(pieces[0].area().fuzzy_eq_eps(200.0 * 97.5, 1e-6));
/// assert!(pieces[1].area().fuzzy_eq_eps(200.0 * 97.5, 1e-6));
/// ```
pub fn split_polygon<T>(
    polygon: &Polygon<T>,
    cut_line: &CutLine<T>,
    blade_width: T,
    options: &SliceOptions<T>,
) -> Vec<Polygon<T>>
where
    T: Real,
{
    let direction = match cut_line.direction.try_normalize() {
        Some(d) => d,
        None => return vec![polygon.clone()],
    };

    let max_span = polygon.bounding_box().length();
    let start = cut_line.start - direction * options.margin;
    let blade = blade_points(direction, blade_width, max_span + options.margin).translated(start);

    // subject index is always built from `polygon`
    let clip_options = ClipOptions {
        subject_aabb_index: None,
        ..options.clip_options.clone()
    };
    let result = polygon.clip_opt(&blade, &clip_options);
    log::trace!(
        "split with blade {:?}: {:?}, {} pieces",
        blade.vertexes(),
        result.result_info,
        result.pos_polygons.len()
    );

    result.pos_polygons
}

impl<T> Polygon<T>
where
    T: Real,
{
    /// Cut this polygon along `cut_line` with default [SliceOptions].
    ///
    /// See [split_polygon].
    pub fn split(&self, cut_line: &CutLine<T>, blade_width: T) -> Vec<Polygon<T>> {
        split_polygon(self, cut_line, blade_width, &SliceOptions::new())
    }
}
