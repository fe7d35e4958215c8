use static_aabb2d_index::StaticAABB2DIndex;

use super::Polygon;
use crate::core::traits::Real;

/// Winding direction of a polygon.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Positive signed area (Y up).
    CounterClockwise,
    /// Negative signed area (Y up).
    Clockwise,
}

/// Options for [Polygon::clip_opt].
#[derive(Debug, Clone)]
pub struct ClipOptions<'a, T>
where
    T: Real,
{
    /// Spatial index of the subject polygon edges, built on the fly when `None`.
    pub subject_aabb_index: Option<&'a StaticAABB2DIndex<T>>,
    /// Fuzzy comparison epsilon used when testing if two positions are equal.
    pub pos_equal_eps: T,
    /// Fuzzy comparison epsilon used when joining slice end points back together.
    pub slice_join_eps: T,
    /// Vertexes closer than this to the line through their neighbors are dropped from outputs.
    pub collinear_eps: T,
    /// How far off an edge to probe when a slice runs along the other polygon's boundary.
    pub probe_dist: T,
}

impl<'a, T> ClipOptions<'a, T>
where
    T: Real,
{
    pub fn new() -> Self {
        Self {
            subject_aabb_index: None,
            pos_equal_eps: T::from_literal(1e-5),
            slice_join_eps: T::from_literal(1e-4),
            collinear_eps: T::from_literal(1e-5),
            probe_dist: T::from_literal(1e-3),
        }
    }
}

impl<'a, T> Default for ClipOptions<'a, T>
where
    T: Real,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// How the two polygons related to each other in a clip.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ClipResultInfo {
    /// One of the polygons has fewer than 3 vertexes.
    InvalidInput,
    /// Boundaries intersect, outputs were stitched from slices.
    Intersected,
    /// No overlap, subject returned unchanged.
    Disjoint,
    /// Subject fully covered, nothing left.
    SubjectInsideClip,
    /// Clip polygon fully inside the subject, returned as a hole.
    ClipInsideSubject,
}

/// Result of subtracting one polygon from another.
#[derive(Debug, Clone)]
pub struct ClipResult<T> {
    /// Remaining solid polygons, wound like the subject.
    pub pos_polygons: Vec<Polygon<T>>,
    /// Holes left inside `pos_polygons` (only for [ClipResultInfo::ClipInsideSubject]).
    pub hole_polygons: Vec<Polygon<T>>,
    pub result_info: ClipResultInfo,
}

impl<T> ClipResult<T>
where
    T: Real,
{
    pub fn new(
        pos_polygons: Vec<Polygon<T>>,
        hole_polygons: Vec<Polygon<T>>,
        result_info: ClipResultInfo,
    ) -> Self {
        Self {
            pos_polygons,
            hole_polygons,
            result_info,
        }
    }

    pub fn empty(result_info: ClipResultInfo) -> Self {
        Self::new(Vec::new(), Vec::new(), result_info)
    }
}
