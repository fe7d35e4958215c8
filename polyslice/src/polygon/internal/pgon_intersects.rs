use std::cmp::Ordering;

use static_aabb2d_index::StaticAABB2DIndex;

use crate::{
    core::{
        math::{min_max, parametric_from_point, point_from_parametric, seg_intr, SegIntr, Vector2},
        traits::Real,
    },
    polygon::Polygon,
};

/// Position on a polygon boundary where the other polygon's boundary touches it.
#[derive(Debug, Copy, Clone)]
pub struct BoundaryPoint<T> {
    /// Index of the edge the point lies on (edge `i` starts at vertex `i`).
    pub edge_index: usize,
    /// Parametric position along the edge, `0 <= t < 1`.
    pub t: T,
    pub pos: Vector2<T>,
}

/// All intersects between two polygon boundaries, recorded from the view of each polygon.
#[derive(Debug, Clone)]
pub struct BoundaryIntersects<T> {
    /// Points on the subject boundary, sorted along the boundary.
    pub subject_points: Vec<BoundaryPoint<T>>,
    /// Points on the clip boundary, sorted along the boundary.
    pub clip_points: Vec<BoundaryPoint<T>>,
}

impl<T> BoundaryIntersects<T> {
    pub fn is_empty(&self) -> bool {
        self.subject_points.is_empty() && self.clip_points.is_empty()
    }
}

/// Find all the points where the boundaries of `subject` and `clip` touch.
///
/// Collinear overlaps contribute both end points of the shared stretch. Points landing on the end
/// vertex of an edge are attributed to the start of the following edge so every boundary position
/// has exactly one representation, and duplicates are removed.
pub fn find_intersects<T>(
    subject: &Polygon<T>,
    clip: &Polygon<T>,
    subject_aabb_index: &StaticAABB2DIndex<T>,
    pos_equal_eps: T,
) -> BoundaryIntersects<T>
where
    T: Real,
{
    let eps = pos_equal_eps;
    let mut subject_points = Vec::new();
    let mut clip_points = Vec::new();
    let mut query_stack = Vec::with_capacity(8);

    for (clip_idx, (b0, b1)) in clip.iter_edges().enumerate() {
        let mut query_visitor = |subject_idx: usize| {
            let a0 = subject.at(subject_idx);
            let a1 = subject.at(subject.next_wrapping_index(subject_idx));
            match seg_intr(a0, a1, b0, b1, eps) {
                SegIntr::NoIntersect => {}
                SegIntr::Point { a_t, b_t } => {
                    let pos = point_from_parametric(a0, a1, a_t);
                    subject_points.push(boundary_point(subject, subject_idx, a_t, pos, eps));
                    clip_points.push(boundary_point(clip, clip_idx, b_t, pos, eps));
                }
                SegIntr::Overlapping { b_t0, b_t1 } => {
                    for b_t in [b_t0, b_t1] {
                        let pos = point_from_parametric(b0, b1, b_t);
                        let a_t = parametric_from_point(a0, a1, pos, eps);
                        subject_points.push(boundary_point(subject, subject_idx, a_t, pos, eps));
                        clip_points.push(boundary_point(clip, clip_idx, b_t, pos, eps));
                    }
                }
            }
        };

        let (min_x, max_x) = min_max(b0.x, b1.x);
        let (min_y, max_y) = min_max(b0.y, b1.y);
        subject_aabb_index.visit_query_with_stack(
            min_x - pos_equal_eps,
            min_y - pos_equal_eps,
            max_x + pos_equal_eps,
            max_y + pos_equal_eps,
            &mut query_visitor,
            &mut query_stack,
        );
    }

    sort_and_dedup(&mut subject_points, pos_equal_eps);
    sort_and_dedup(&mut clip_points, pos_equal_eps);

    BoundaryIntersects {
        subject_points,
        clip_points,
    }
}

/// Locate `pos` on `polygon` edge `edge_index`, snapping to vertexes within `pos_equal_eps`.
fn boundary_point<T>(
    polygon: &Polygon<T>,
    edge_index: usize,
    t: T,
    pos: Vector2<T>,
    pos_equal_eps: T,
) -> BoundaryPoint<T>
where
    T: Real,
{
    let next_index = polygon.next_wrapping_index(edge_index);
    let start = polygon.at(edge_index);
    let end = polygon.at(next_index);

    if pos.fuzzy_eq_eps(end, pos_equal_eps) {
        return BoundaryPoint {
            edge_index: next_index,
            t: T::zero(),
            pos: end,
        };
    }

    if pos.fuzzy_eq_eps(start, pos_equal_eps) {
        return BoundaryPoint {
            edge_index,
            t: T::zero(),
            pos: start,
        };
    }

    let t = num_traits::real::Real::min(num_traits::real::Real::max(t, T::zero()), T::one());
    BoundaryPoint { edge_index, t, pos }
}

fn sort_and_dedup<T>(points: &mut Vec<BoundaryPoint<T>>, pos_equal_eps: T)
where
    T: Real,
{
    points.sort_unstable_by(|p1, p2| {
        p1.edge_index
            .cmp(&p2.edge_index)
            .then_with(|| p1.t.partial_cmp(&p2.t).unwrap_or(Ordering::Equal))
    });

    points.dedup_by(|curr, prev| curr.pos.fuzzy_eq_eps(prev.pos, pos_equal_eps));

    while points.len() > 1 {
        let first = points[0].pos;
        match points.last() {
            Some(last) if last.pos.fuzzy_eq_eps(first, pos_equal_eps) => {
                points.pop();
            }
            _ => break,
        }
    }
}
