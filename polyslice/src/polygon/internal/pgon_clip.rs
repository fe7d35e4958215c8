use static_aabb2d_index::StaticAABB2DIndexBuilder;

use super::pgon_intersects::{find_intersects, BoundaryPoint};
use crate::{
    core::{
        math::{midpoint, Vector2},
        traits::Real,
    },
    polygon::{ClipOptions, ClipResult, ClipResultInfo, Orientation, Polygon},
};

/// Open piece of a polygon boundary running between two consecutive intersect points.
#[derive(Debug, Clone)]
pub struct BoundarySlice<T> {
    pub points: Vec<Vector2<T>>,
    /// True if the slice came from the subject polygon, false if from the clip polygon.
    pub source_is_subject: bool,
}

/// Cut `polygon` into open slices at `points` (sorted along the boundary), keeping the slices for
/// which `keep_slice` returns true.
///
/// `keep_slice` is given the longest segment of the slice, every point strictly inside a slice
/// is on the same side of the other polygon since slices never contain an intersect.
pub fn slice_at_intersects<T, F>(
    polygon: &Polygon<T>,
    points: &[BoundaryPoint<T>],
    source_is_subject: bool,
    keep_slice: &mut F,
    output: &mut Vec<BoundarySlice<T>>,
    pos_equal_eps: T,
) where
    T: Real,
    F: FnMut(Vector2<T>, Vector2<T>) -> bool,
{
    let n = polygon.vertex_count();
    let m = points.len();
    for k in 0..m {
        let start = points[k];
        let end = points[(k + 1) % m];

        let vertexes_between = if m > 1 && start.edge_index == end.edge_index && end.t > start.t {
            0
        } else {
            match (end.edge_index + n - start.edge_index) % n {
                0 => n,
                count => count,
            }
        };

        let mut slice_points = Vec::with_capacity(vertexes_between + 2);
        slice_points.push(start.pos);
        let mut index = start.edge_index;
        for _ in 0..vertexes_between {
            index = polygon.next_wrapping_index(index);
            push_unique(&mut slice_points, polygon.at(index), pos_equal_eps);
        }
        push_unique(&mut slice_points, end.pos, pos_equal_eps);

        if slice_points.len() < 2 {
            // end points on top of each other
            continue;
        }

        let (p0, p1) = longest_segment(&slice_points);
        if !keep_slice(p0, p1) {
            continue;
        }

        output.push(BoundarySlice {
            points: slice_points,
            source_is_subject,
        });
    }
}

fn push_unique<T>(points: &mut Vec<Vector2<T>>, point: Vector2<T>, pos_equal_eps: T)
where
    T: Real,
{
    match points.last() {
        Some(last) if last.fuzzy_eq_eps(point, pos_equal_eps) => {}
        _ => points.push(point),
    }
}

fn longest_segment<T>(points: &[Vector2<T>]) -> (Vector2<T>, Vector2<T>)
where
    T: Real,
{
    let mut result = (points[0], points[1]);
    let mut max_length = (points[1] - points[0]).length_squared();
    for w in points.windows(2).skip(1) {
        let length = (w[1] - w[0]).length_squared();
        if length > max_length {
            max_length = length;
            result = (w[0], w[1]);
        }
    }

    result
}

/// Pick which of the `available` slices to stitch onto the current one.
///
/// Prefers switching between subject and clip slices, which is how the boundary of a difference
/// alternates, otherwise takes the first available.
fn select_next_slice<T>(
    slices: &[BoundarySlice<T>],
    current_idx: usize,
    available: &[usize],
) -> Option<usize> {
    let current_source = slices[current_idx].source_is_subject;
    available
        .iter()
        .copied()
        .find(|&i| slices[i].source_is_subject != current_source)
        .or_else(|| available.first().copied())
}

/// Stitch open slices end to start into closed polygons.
///
/// Slices must agree on direction (every end point meets a start point). Chains that can not be
/// closed are discarded.
pub fn stitch_slices_into_closed_polygons<T>(
    slices: &[BoundarySlice<T>],
    slice_join_eps: T,
) -> Vec<Vec<Vector2<T>>>
where
    T: Real,
{
    let mut result = Vec::new();
    if slices.is_empty() {
        return result;
    }

    let aabb_index = {
        let mut builder = StaticAABB2DIndexBuilder::new(slices.len());
        for slice in slices.iter() {
            let pt = slice.points[0];
            builder.add(
                pt.x - slice_join_eps,
                pt.y - slice_join_eps,
                pt.x + slice_join_eps,
                pt.y + slice_join_eps,
            );
        }

        match builder.build() {
            Ok(index) => index,
            Err(e) => unreachable!("failed to build slice start point index: {e}"),
        }
    };

    let mut visited_slice_idx = vec![false; slices.len()];
    let mut query_results = Vec::new();
    let mut query_stack = Vec::with_capacity(8);

    for i in 0..slices.len() {
        if visited_slice_idx[i] {
            continue;
        }
        visited_slice_idx[i] = true;

        let mut current_points = slices[i].points.clone();
        let beginning_slice_idx = i;
        let mut current_slice_idx = i;
        let mut loop_count = 0;
        let max_loop_count = slices.len();
        loop {
            if loop_count > max_loop_count {
                unreachable!("loop_count exceeded max_loop_count while stitching clip slices");
            }
            loop_count += 1;

            let ep = match current_points.last() {
                Some(&ep) => ep,
                None => break,
            };

            query_results.clear();
            let mut query_visitor = |idx: usize| {
                if idx == beginning_slice_idx || !visited_slice_idx[idx] {
                    query_results.push(idx);
                }
            };

            aabb_index.visit_query_with_stack(
                ep.x - slice_join_eps,
                ep.y - slice_join_eps,
                ep.x + slice_join_eps,
                ep.y + slice_join_eps,
                &mut query_visitor,
                &mut query_stack,
            );

            // keep candidate order deterministic regardless of index traversal order
            query_results.sort_unstable();

            match select_next_slice(slices, current_slice_idx, &query_results) {
                None => {
                    // dangling chain from near coincident edges, discard
                    log::trace!("discarding open chain of {} points", current_points.len());
                    break;
                }
                Some(idx) if idx == beginning_slice_idx => {
                    // closing point duplicates the first point
                    current_points.pop();
                    result.push(current_points);
                    break;
                }
                Some(idx) => {
                    current_points.extend(slices[idx].points.iter().skip(1).copied());
                    visited_slice_idx[idx] = true;
                    current_slice_idx = idx;
                }
            }
        }
    }

    result
}

/// Subtract `clip` from `subject`, see [Polygon::clip_opt].
pub fn polygon_clip<T>(
    subject: &Polygon<T>,
    clip: &Polygon<T>,
    options: &ClipOptions<T>,
) -> ClipResult<T>
where
    T: Real,
{
    if subject.vertex_count() < 3 || clip.vertex_count() < 3 {
        return ClipResult::empty(ClipResultInfo::InvalidInput);
    }

    let pos_equal_eps = options.pos_equal_eps;
    let subject_orientation = subject.orientation();

    // subject counter clockwise and clip clockwise so kept slices from both chain together with
    // the interior on the left
    let subject_ccw = subject.to_counter_clockwise();
    let clip_cw = clip.to_clockwise();

    let constructed_index;
    let subject_aabb_index = match options.subject_aabb_index {
        // provided index is only valid if vertex order was not flipped
        Some(index) if subject_orientation == Orientation::CounterClockwise => index,
        _ => {
            constructed_index = subject_ccw.create_aabb_index();
            &constructed_index
        }
    };

    let intersects = find_intersects(&subject_ccw, &clip_cw, subject_aabb_index, pos_equal_eps);

    if intersects.is_empty() {
        return if clip_cw.contains_point(subject_ccw.at(0)) {
            ClipResult::empty(ClipResultInfo::SubjectInsideClip)
        } else if subject_ccw.contains_point(clip_cw.at(0)) {
            let hole = match subject_orientation {
                Orientation::CounterClockwise => clip.to_clockwise(),
                Orientation::Clockwise => clip.to_counter_clockwise(),
            };
            ClipResult::new(
                vec![subject.clone()],
                vec![hole],
                ClipResultInfo::ClipInsideSubject,
            )
        } else {
            ClipResult::new(vec![subject.clone()], Vec::new(), ClipResultInfo::Disjoint)
        };
    }

    let probe_dist = options.probe_dist;
    let on_boundary = |polygon: &Polygon<T>, pt: Vector2<T>| {
        polygon.distance_to_boundary(pt) < pos_equal_eps
    };

    let mut slices = Vec::new();

    // subject boundary outside of the clip polygon
    slice_at_intersects(
        &subject_ccw,
        &intersects.subject_points,
        true,
        &mut |p0, p1| {
            let mid = midpoint(p0, p1);
            if on_boundary(&clip_cw, mid) {
                // running along the clip boundary, keep only if the clip polygon lies outside
                let probe = mid + (p1 - p0).unit_perp() * probe_dist;
                !clip_cw.contains_point(probe)
            } else {
                !clip_cw.contains_point(mid)
            }
        },
        &mut slices,
        pos_equal_eps,
    );

    // clip boundary strictly inside of the subject polygon
    slice_at_intersects(
        &clip_cw,
        &intersects.clip_points,
        false,
        &mut |p0, p1| {
            let mid = midpoint(p0, p1);
            !on_boundary(&subject_ccw, mid) && subject_ccw.contains_point(mid)
        },
        &mut slices,
        pos_equal_eps,
    );

    log::trace!(
        "clip: {} subject intersects, {} clip intersects, {} slices kept",
        intersects.subject_points.len(),
        intersects.clip_points.len(),
        slices.len()
    );

    let mut pos_polygons = Vec::new();
    let mut hole_polygons = Vec::new();
    for points in stitch_slices_into_closed_polygons(&slices, options.slice_join_eps) {
        let polygon = Polygon::from_points(points)
            .remove_repeat_pos(pos_equal_eps)
            .remove_collinear(options.collinear_eps);

        if polygon.vertex_count() < 3 || polygon.area().fuzzy_eq_zero_eps(pos_equal_eps) {
            continue;
        }

        let is_hole = polygon.orientation() == Orientation::Clockwise;
        let polygon = match subject_orientation {
            Orientation::CounterClockwise => polygon,
            Orientation::Clockwise => polygon.reversed(),
        };

        if is_hole {
            hole_polygons.push(polygon);
        } else {
            pos_polygons.push(polygon);
        }
    }

    ClipResult::new(pos_polygons, hole_polygons, ClipResultInfo::Intersected)
}
