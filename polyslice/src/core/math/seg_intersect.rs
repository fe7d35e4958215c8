use super::{base_math::parametric_from_point, Vector2};
use crate::core::traits::Real;

/// Result of intersecting two line segments `a0->a1` and `b0->b1`.
///
/// Parametric values follow `P(t) = p0 + t * (p1 - p0)`, so `0` is the segment start and `1` is
/// the segment end.
#[derive(Debug, Copy, Clone)]
pub enum SegIntr<T>
where
    T: Real,
{
    /// Segments do not touch.
    NoIntersect,
    /// Segments touch at a single point.
    Point {
        /// Parametric value of the intersect on segment `a`.
        a_t: T,
        /// Parametric value of the intersect on segment `b`.
        b_t: T,
    },
    /// Segments are collinear and share a stretch of non-zero length.
    Overlapping {
        /// Parametric value on segment `b` where the shared stretch starts (always `<= b_t1`).
        b_t0: T,
        /// Parametric value on segment `b` where the shared stretch ends.
        b_t1: T,
    },
}

/// Finds the intersect between two line segments `a0->a1` and `b0->b1`.
///
/// Handles parallel, collinear and degenerate (single point) segments. `epsilon` is applied at
/// position scale so very long and very short segments are treated consistently.
///
/// # Examples
///
/// ```
/// # use polyslice::core::math::*;
/// let a0: Vector2<f64> = Vector2::new(0.0, 0.0);
/// let a1 = Vector2::new(2.0, 0.0);
/// let b0 = Vector2::new(0.5, -1.0);
/// let b1 = Vector2::new(0.5, 1.0);
/// match seg_intr(a0, a1, b0, b1, 1e-5) {
///     SegIntr::Point { a_t, b_t } => {
///         assert!((a_t - 0.25).abs() < 1e-12);
///         assert!((b_t - 0.5).abs() < 1e-12);
///     }
///     r => unreachable!("expected single point intersect, got {:?}", r),
/// }
/// ```
pub fn seg_intr<T>(
    a0: Vector2<T>,
    a1: Vector2<T>,
    b0: Vector2<T>,
    b1: Vector2<T>,
    epsilon: T,
) -> SegIntr<T>
where
    T: Real,
{
    // parametric form with perpendicular products
    // http://geomalgorithms.com/a05-_intersect-1.html
    let a = a1 - a0;
    let b = b1 - b0;
    let w = a0 - b0;
    let denom = a.cross(b);

    let a_len = a.length();
    let b_len = b.length();
    let in_range = |t: T, len: T| (t * len).fuzzy_in_range_eps(T::zero(), len, epsilon);

    if !denom.fuzzy_eq_zero_eps(epsilon) {
        let a_t = b.cross(w) / denom;
        let b_t = a.cross(w) / denom;
        if in_range(a_t, a_len) && in_range(b_t, b_len) {
            return SegIntr::Point { a_t, b_t };
        }
        return SegIntr::NoIntersect;
    }

    // parallel, check collinear
    if !a.cross(w).fuzzy_eq_zero_eps(epsilon) || !b.cross(w).fuzzy_eq_zero_eps(epsilon) {
        return SegIntr::NoIntersect;
    }

    let a_is_point = a0.fuzzy_eq_eps(a1, epsilon);
    let b_is_point = b0.fuzzy_eq_eps(b1, epsilon);

    match (a_is_point, b_is_point) {
        (true, true) => {
            if a0.fuzzy_eq_eps(b0, epsilon) {
                SegIntr::Point {
                    a_t: T::zero(),
                    b_t: T::zero(),
                }
            } else {
                SegIntr::NoIntersect
            }
        }
        (true, false) => {
            let b_t = parametric_from_point(b0, b1, a0, epsilon);
            if in_range(b_t, b_len) {
                SegIntr::Point { a_t: T::zero(), b_t }
            } else {
                SegIntr::NoIntersect
            }
        }
        (false, true) => {
            let a_t = parametric_from_point(a0, a1, b0, epsilon);
            if in_range(a_t, a_len) {
                SegIntr::Point { a_t, b_t: T::zero() }
            } else {
                SegIntr::NoIntersect
            }
        }
        (false, false) => collinear_overlap(a0, a1, b0, b1, b_len, epsilon),
    }
}

fn collinear_overlap<T>(
    a0: Vector2<T>,
    a1: Vector2<T>,
    b0: Vector2<T>,
    b1: Vector2<T>,
    b_len: T,
    epsilon: T,
) -> SegIntr<T>
where
    T: Real,
{
    // project a's end points onto b
    let mut t0 = parametric_from_point(b0, b1, a0, epsilon);
    let mut t1 = parametric_from_point(b0, b1, a1, epsilon);
    if t0 > t1 {
        std::mem::swap(&mut t0, &mut t1);
    }

    if !(t0 * b_len).fuzzy_lt_eps(b_len, epsilon) || !(t1 * b_len).fuzzy_gt_eps(T::zero(), epsilon)
    {
        return SegIntr::NoIntersect;
    }

    let b_t0 = num_traits::real::Real::max(t0, T::zero());
    let b_t1 = num_traits::real::Real::min(t1, T::one());

    if ((b_t1 - b_t0) * b_len).fuzzy_eq_zero_eps(epsilon) {
        // segments touch end to end
        let a_t = if a0.fuzzy_eq_eps(b0, epsilon) || a0.fuzzy_eq_eps(b1, epsilon) {
            T::zero()
        } else {
            T::one()
        };
        return SegIntr::Point { a_t, b_t: b_t0 };
    }

    SegIntr::Overlapping { b_t0, b_t1 }
}
