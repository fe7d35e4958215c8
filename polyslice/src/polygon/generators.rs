//! Functions that build the polygons used for bodies and blades.
use super::Polygon;
use crate::core::{math::Vector2, traits::Real};

/// Minimum number of edges produced by [circle_points].
pub const MIN_CIRCLE_EDGE_COUNT: usize = 3;

/// Axis aligned rectangle centered at the origin with the given half extents.
///
/// Starts at the max corner and flips one axis sign per step, always exactly 4 points (also for
/// zero extents).
///
/// # Examples
///
/// ```
/// # use polyslice::polygon::rectangle_points;
/// # use polyslice::core::math::Vector2;
/// let rect = rectangle_points(Vector2::new(2.0, 1.0));
/// assert_eq!(rect.vertex_count(), 4);
/// assert_eq!(rect[0], Vector2::new(2.0, 1.0));
/// assert_eq!(rect[2], Vector2::new(-2.0, -1.0));
/// assert!(rect.bounding_box().fuzzy_eq(Vector2::new(4.0, 2.0)));
/// ```
pub fn rectangle_points<T>(half_extents: Vector2<T>) -> Polygon<T>
where
    T: Real,
{
    let Vector2 { x, y } = half_extents;
    Polygon::from_points(vec![
        Vector2::new(x, y),
        Vector2::new(-x, y),
        Vector2::new(-x, -y),
        Vector2::new(x, -y),
    ])
}

/// Number of edges used to approximate a circle of `radius`.
///
/// Grows with `floor(ln(radius)) * 8` and is clamped to [MIN_CIRCLE_EDGE_COUNT] for small,
/// non-positive or non-finite radii.
pub fn circle_edge_count<T>(radius: T) -> usize
where
    T: Real,
{
    if !radius.is_finite() || radius <= T::one() {
        return MIN_CIRCLE_EDGE_COUNT;
    }

    let steps = radius.ln().floor().to_usize().unwrap_or(0);
    steps.saturating_mul(8).max(MIN_CIRCLE_EDGE_COUNT)
}

/// Regular polygon approximating a circle of `radius` centered at the origin.
///
/// Point `k` sits at angle `k * 2π / edge_count` starting from the positive x axis. See
/// [circle_edge_count] for the edge count.
///
/// # Examples
///
/// ```
/// # use polyslice::polygon::circle_points;
/// # use polyslice::core::math::Vector2;
/// // ln(100) = 4.6 so 4 * 8 edges
/// let circle = circle_points(100.0);
/// assert_eq!(circle.vertex_count(), 32);
/// assert!(circle[0].fuzzy_eq(Vector2::new(100.0, 0.0)));
/// // clamped for tiny radius
/// assert_eq!(circle_points(0.5).vertex_count(), 3);
/// ```
pub fn circle_points<T>(radius: T) -> Polygon<T>
where
    T: Real,
{
    let edge_count = circle_edge_count(radius);
    let step = T::tau() / T::from_literal(edge_count as f64);
    let mut result = Polygon::with_capacity(edge_count);
    let mut angle = T::zero();
    for _ in 0..edge_count {
        let (s, c) = angle.sin_cos();
        result.add(c * radius, s * radius);
        angle = angle + step;
    }

    result
}

/// Thin rectangle used as the cutting blade.
///
/// One short edge is centered on the origin, the long axis runs to `direction * length`, and the
/// width is split evenly on both sides of the axis. Points are `+offset`, `-offset`,
/// `end - offset`, `end + offset` where `offset = normal * width / 2` and `normal` is `direction`
/// rotated a quarter turn.
///
/// `direction` is expected to be normalized.
///
/// # Examples
///
/// ```
/// # use polyslice::polygon::blade_points;
/// # use polyslice::core::math::Vector2;
/// # use polyslice::core::traits::*;
/// let blade = blade_points(Vector2::new(1.0, 0.0), 2.0, 10.0);
/// assert!(blade[0].fuzzy_eq(Vector2::new(0.0, 1.0)));
/// assert!(blade[1].fuzzy_eq(Vector2::new(0.0, -1.0)));
/// assert!(blade[2].fuzzy_eq(Vector2::new(10.0, -1.0)));
/// assert!(blade[3].fuzzy_eq(Vector2::new(10.0, 1.0)));
/// assert!(blade.area().fuzzy_eq(20.0));
/// ```
pub fn blade_points<T>(direction: Vector2<T>, width: T, length: T) -> Polygon<T>
where
    T: Real,
{
    let normal = direction.perp();
    let end = direction * length;
    let width_offset = normal * (width / T::two());
    Polygon::from_points(vec![
        width_offset,
        -width_offset,
        end - width_offset,
        end + width_offset,
    ])
}
