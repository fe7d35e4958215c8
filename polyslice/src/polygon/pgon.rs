use std::ops::Index;

use static_aabb2d_index::{
    StaticAABB2DIndex, StaticAABB2DIndexBuildError, StaticAABB2DIndexBuilder, AABB,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{
    internal::{pgon_clip::polygon_clip, pgon_intersects::find_intersects},
    ClipOptions, ClipResult, Orientation,
};
use crate::core::{
    math::{dist_squared, is_left, line_seg_closest_point, Vector2},
    traits::Real,
};

/// Closed polygon made of straight edges.
///
/// Edge `i` connects vertex `i` to vertex `(i + 1) % vertex_count`, the closing edge is implicit.
/// Winding is not fixed, use [Polygon::orientation] or the sign of [Polygon::signed_area] when it
/// matters.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Polygon<T = f64> {
    vertex_data: Vec<Vector2<T>>,
}

impl<T> Polygon<T>
where
    T: Real,
{
    /// Create a new empty polygon.
    #[inline]
    pub fn new() -> Self {
        Polygon {
            vertex_data: Vec::new(),
        }
    }

    /// Create an empty polygon with `capacity` reserved for vertexes.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Polygon {
            vertex_data: Vec::with_capacity(capacity),
        }
    }

    /// Create a polygon taking ownership of `points`.
    #[inline]
    pub fn from_points(points: Vec<Vector2<T>>) -> Self {
        Polygon {
            vertex_data: points,
        }
    }

    /// Add a vertex at the end of the polygon.
    #[inline]
    pub fn add(&mut self, x: T, y: T) {
        self.vertex_data.push(Vector2::new(x, y));
    }

    #[inline]
    pub fn add_point(&mut self, point: Vector2<T>) {
        self.vertex_data.push(point);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertex_data.is_empty()
    }

    /// Vertex at `index`, panics if out of bounds.
    #[inline]
    pub fn at(&self, index: usize) -> Vector2<T> {
        self.vertex_data[index]
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Vector2<T>> {
        self.vertex_data.get(index).copied()
    }

    #[inline]
    pub fn last(&self) -> Option<Vector2<T>> {
        self.vertex_data.last().copied()
    }

    #[inline]
    pub fn remove_last(&mut self) -> Option<Vector2<T>> {
        self.vertex_data.pop()
    }

    /// All vertexes as a slice.
    #[inline]
    pub fn vertexes(&self) -> &[Vector2<T>] {
        &self.vertex_data
    }

    #[inline]
    pub fn into_vertexes(self) -> Vec<Vector2<T>> {
        self.vertex_data
    }

    /// Index of the vertex after `index`, wrapping back to 0 after the last vertex.
    #[inline]
    pub fn next_wrapping_index(&self, index: usize) -> usize {
        let next = index + 1;
        if next >= self.vertex_count() {
            0
        } else {
            next
        }
    }

    /// Index of the vertex before `index`, wrapping to the last vertex before 0.
    #[inline]
    pub fn prev_wrapping_index(&self, index: usize) -> usize {
        if index == 0 {
            self.vertex_count().saturating_sub(1)
        } else {
            index - 1
        }
    }

    /// Iterate over the edges `(v1, v2)` including the closing edge.
    ///
    /// Polygons with fewer than 2 vertexes have no edges.
    pub fn iter_edges(&self) -> impl Iterator<Item = (Vector2<T>, Vector2<T>)> + '_ {
        let n = if self.vertex_count() < 2 {
            0
        } else {
            self.vertex_count()
        };

        (0..n).map(move |i| (self.at(i), self.at(self.next_wrapping_index(i))))
    }

    /// Signed area using the shoelace formula.
    ///
    /// Positive for counter clockwise winding (Y up), negative for clockwise.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polyslice::polygon;
    /// # use polyslice::core::traits::*;
    /// let ccw = polygon![(0.0, 0.0), (2.0, 0.0), (2.0, 3.0), (0.0, 3.0)];
    /// assert!(ccw.signed_area().fuzzy_eq(6.0));
    /// assert!(ccw.reversed().signed_area().fuzzy_eq(-6.0));
    /// ```
    pub fn signed_area(&self) -> T {
        let mut double_area = T::zero();
        for (v1, v2) in self.iter_edges() {
            double_area = double_area + v1.cross(v2);
        }

        double_area / T::two()
    }

    /// Area enclosed by the polygon, always `>= 0`.
    #[inline]
    pub fn area(&self) -> T {
        self.signed_area().abs()
    }

    /// Winding direction derived from the sign of the signed area.
    #[inline]
    pub fn orientation(&self) -> Orientation {
        if self.signed_area() < T::zero() {
            Orientation::Clockwise
        } else {
            Orientation::CounterClockwise
        }
    }

    /// Axis aligned extents of the polygon, `None` if the polygon is empty.
    pub fn extents(&self) -> Option<AABB<T>> {
        let first = self.vertex_data.first()?;
        let mut result = AABB::new(first.x, first.y, first.x, first.y);
        for v in self.vertex_data.iter().skip(1) {
            if v.x < result.min_x {
                result.min_x = v.x;
            } else if v.x > result.max_x {
                result.max_x = v.x;
            }

            if v.y < result.min_y {
                result.min_y = v.y;
            } else if v.y > result.max_y {
                result.max_y = v.y;
            }
        }

        Some(result)
    }

    /// Bounding box size as `(width, height)`, zero for an empty polygon.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polyslice::polygon;
    /// # use polyslice::core::math::Vector2;
    /// let triangle = polygon![(-1.0, 0.0), (4.0, 1.0), (0.0, 3.0)];
    /// assert!(triangle.bounding_box().fuzzy_eq(Vector2::new(5.0, 3.0)));
    /// ```
    pub fn bounding_box(&self) -> Vector2<T> {
        match self.extents() {
            Some(e) => Vector2::new(e.max_x - e.min_x, e.max_y - e.min_y),
            None => Vector2::zero(),
        }
    }

    /// Area weighted centroid (center of mass for uniform density).
    ///
    /// Correct for either winding since both accumulators carry the same sign. A polygon with an
    /// exactly zero signed area uses `1` as the area so the result is finite but meaningless,
    /// callers that care must check [Polygon::area] first.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polyslice::polygon;
    /// # use polyslice::core::math::Vector2;
    /// let square = polygon![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)];
    /// assert!(square.centroid().fuzzy_eq(Vector2::new(2.0, 2.0)));
    /// assert!(square.reversed().centroid().fuzzy_eq(Vector2::new(2.0, 2.0)));
    /// ```
    pub fn centroid(&self) -> Vector2<T> {
        let mut cross_acc = T::zero();
        let mut point_acc = Vector2::zero();
        for (v1, v2) in self.iter_edges() {
            let c = v1.cross(v2);
            cross_acc = cross_acc + c;
            point_acc += (v1 + v2) * c;
        }

        let signed_area = if cross_acc.abs() == T::zero() {
            T::one()
        } else {
            cross_acc / T::two()
        };

        point_acc / (T::six() * signed_area)
    }

    /// Returns a copy with every vertex offset by `offset`.
    pub fn translated(&self, offset: Vector2<T>) -> Self {
        self.vertex_data.iter().map(|v| v + offset).collect()
    }

    /// Returns a copy with every vertex rotated about the origin by `angle` radians.
    pub fn rotated(&self, angle: T) -> Self {
        self.vertex_data.iter().map(|v| v.rotate(angle)).collect()
    }

    /// Returns a copy with the vertex order reversed (flips the winding).
    pub fn reversed(&self) -> Self {
        self.vertex_data.iter().rev().copied().collect()
    }

    /// Returns a copy wound counter clockwise.
    pub fn to_counter_clockwise(&self) -> Self {
        match self.orientation() {
            Orientation::CounterClockwise => self.clone(),
            Orientation::Clockwise => self.reversed(),
        }
    }

    /// Returns a copy wound clockwise.
    pub fn to_clockwise(&self) -> Self {
        match self.orientation() {
            Orientation::Clockwise => self.clone(),
            Orientation::CounterClockwise => self.reversed(),
        }
    }

    /// Winding number of the polygon around `point`.
    ///
    /// Non-zero means the point is inside. Counter clockwise polygons give positive values.
    /// Result is undefined for points exactly on an edge.
    pub fn winding_number(&self, point: Vector2<T>) -> i32 {
        // http://geomalgorithms.com/a03-_inclusion.html
        let mut winding = 0;
        for (v1, v2) in self.iter_edges() {
            if v1.y <= point.y {
                if v2.y > point.y && is_left(v1, v2, point) {
                    // upward crossing with point left of edge
                    winding += 1;
                }
            } else if v2.y <= point.y && !is_left(v1, v2, point) {
                // downward crossing with point right of edge
                winding -= 1;
            }
        }

        winding
    }

    /// Returns true if `point` is inside the polygon (non-zero winding).
    #[inline]
    pub fn contains_point(&self, point: Vector2<T>) -> bool {
        self.winding_number(point) != 0
    }

    /// Closest point on the polygon boundary to `point`, `None` for an empty polygon.
    pub fn closest_point(&self, point: Vector2<T>) -> Option<Vector2<T>> {
        if self.vertex_count() == 1 {
            return Some(self.at(0));
        }

        let mut result = None;
        let mut min_dist2 = T::zero();
        for (v1, v2) in self.iter_edges() {
            let cp = line_seg_closest_point(v1, v2, point);
            let dist2 = dist_squared(cp, point);
            if result.is_none() || dist2 < min_dist2 {
                result = Some(cp);
                min_dist2 = dist2;
            }
        }

        result
    }

    /// Distance from `point` to the nearest point on the boundary.
    ///
    /// Returns the max value of `T` for an empty polygon.
    pub fn distance_to_boundary(&self, point: Vector2<T>) -> T {
        match self.closest_point(point) {
            Some(cp) => (cp - point).length(),
            None => <T as Real>::max_value(),
        }
    }

    /// Build a static spatial index of the edge bounding boxes, index `i` maps to the edge
    /// starting at vertex `i`.
    pub fn create_aabb_index(&self) -> StaticAABB2DIndex<T> {
        let mut builder = StaticAABB2DIndexBuilder::new(self.iter_edges().count());
        for (v1, v2) in self.iter_edges() {
            builder.add(
                num_traits::real::Real::min(v1.x, v2.x),
                num_traits::real::Real::min(v1.y, v2.y),
                num_traits::real::Real::max(v1.x, v2.x),
                num_traits::real::Real::max(v1.y, v2.y),
            );
        }

        unwrap_spatial_index(builder)
    }

    /// Returns a copy with consecutive vertexes closer than `pos_equal_eps` merged, including the
    /// last vertex against the first.
    pub fn remove_repeat_pos(&self, pos_equal_eps: T) -> Self {
        let mut result = Polygon::with_capacity(self.vertex_count());
        for &v in self.vertex_data.iter() {
            match result.last() {
                Some(last) if last.fuzzy_eq_eps(v, pos_equal_eps) => {}
                _ => result.add_point(v),
            }
        }

        while result.vertex_count() > 1 {
            let last = result.at(result.vertex_count() - 1);
            if !result.at(0).fuzzy_eq_eps(last, pos_equal_eps) {
                break;
            }
            result.remove_last();
        }

        result
    }

    /// Returns a copy with vertexes that lie on the straight line between their neighbors
    /// removed (including spikes that double back on themselves).
    pub fn remove_collinear(&self, collinear_eps: T) -> Self {
        let mut points = self.vertex_data.clone();
        let mut changed = true;
        while changed && points.len() > 2 {
            changed = false;
            let n = points.len();
            for i in 0..n {
                let prev = points[(i + n - 1) % n];
                let curr = points[i];
                let next = points[(i + 1) % n];
                let d = next - prev;
                let len = d.length();
                let is_collinear = if len.fuzzy_eq_zero_eps(collinear_eps) {
                    // spike returning to the previous vertex
                    true
                } else {
                    ((curr - prev).cross(d) / len).abs() < collinear_eps
                };

                if is_collinear {
                    points.remove(i);
                    changed = true;
                    break;
                }
            }
        }

        Polygon::from_points(points)
    }

    /// Fuzzy compare vertex by vertex using `fuzzy_epsilon`.
    pub fn fuzzy_eq_eps(&self, other: &Self, fuzzy_epsilon: T) -> bool {
        self.vertex_count() == other.vertex_count()
            && self
                .vertex_data
                .iter()
                .zip(other.vertex_data.iter())
                .all(|(a, b)| a.fuzzy_eq_eps(*b, fuzzy_epsilon))
    }

    /// Returns true if this polygon and `other` share any area or touch along their boundaries.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polyslice::polygon;
    /// let square = polygon![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
    /// let diamond = polygon![(15.0, 5.0), (20.0, 10.0), (15.0, 15.0), (10.0, 10.0)];
    /// assert!(square.overlaps(&diamond, 1e-5));
    /// let shifted = polygon![(16.0, 5.0), (21.0, 10.0), (16.0, 15.0), (11.0, 10.0)];
    /// assert!(!square.overlaps(&shifted, 1e-5));
    /// ```
    pub fn overlaps(&self, other: &Polygon<T>, pos_equal_eps: T) -> bool {
        let (e1, e2) = match (self.extents(), other.extents()) {
            (Some(e1), Some(e2)) => (e1, e2),
            _ => return false,
        };

        let eps = pos_equal_eps;
        if e1.min_x > e2.max_x + eps
            || e2.min_x > e1.max_x + eps
            || e1.min_y > e2.max_y + eps
            || e2.min_y > e1.max_y + eps
        {
            return false;
        }

        // one fully inside the other
        if self.contains_point(other.at(0)) || other.contains_point(self.at(0)) {
            return true;
        }

        let index = self.create_aabb_index();
        !find_intersects(self, other, &index, eps).is_empty()
    }

    /// Subtract `clip` from this polygon using default options.
    ///
    /// See [Polygon::clip_opt] for details.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polyslice::polygon;
    /// # use polyslice::polygon::ClipResultInfo;
    /// # use polyslice::core::traits::*;
    /// let square = polygon![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
    /// let bite = polygon![(5.0, -1.0), (11.0, -1.0), (11.0, 11.0), (5.0, 11.0)];
    /// let result = square.clip(&bite);
    /// assert_eq!(result.result_info, ClipResultInfo::Intersected);
    /// assert_eq!(result.pos_polygons.len(), 1);
    /// assert!(result.pos_polygons[0].area().fuzzy_eq(50.0));
    /// ```
    pub fn clip(&self, clip: &Polygon<T>) -> ClipResult<T> {
        self.clip_opt(clip, &ClipOptions::new())
    }

    /// Subtract `clip` from this polygon (boolean difference).
    ///
    /// Produces any number of disjoint polygons in `pos_polygons`, wound the same way as this
    /// polygon. When `clip` sits entirely inside this polygon the result is this polygon plus
    /// `clip` as a hole in `hole_polygons`.
    pub fn clip_opt(&self, clip: &Polygon<T>, options: &ClipOptions<T>) -> ClipResult<T> {
        polygon_clip(self, clip, options)
    }
}

impl<T> Index<usize> for Polygon<T> {
    type Output = Vector2<T>;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.vertex_data[index]
    }
}

impl<T> FromIterator<Vector2<T>> for Polygon<T> {
    fn from_iter<I: IntoIterator<Item = Vector2<T>>>(iter: I) -> Self {
        Polygon {
            vertex_data: iter.into_iter().collect(),
        }
    }
}

impl<T> From<Vec<Vector2<T>>> for Polygon<T> {
    fn from(points: Vec<Vector2<T>>) -> Self {
        Polygon {
            vertex_data: points,
        }
    }
}

fn unwrap_spatial_index<T>(builder: StaticAABB2DIndexBuilder<T>) -> StaticAABB2DIndex<T>
where
    T: Real,
{
    match builder.build() {
        Ok(x) => x,
        Err(e) => match e {
            StaticAABB2DIndexBuildError::ItemCountError { .. } => {
                unreachable!("internal library error: count mismatch when building spatial index")
            }
            StaticAABB2DIndexBuildError::NumericCastError => {
                panic!("failed to cast numeric type: {e}")
            }
        },
    }
}

/// Build a static spatial index from pre-computed boxes.
pub(crate) fn build_spatial_index<T, I>(count: usize, boxes: I) -> StaticAABB2DIndex<T>
where
    T: Real,
    I: IntoIterator<Item = AABB<T>>,
{
    let mut builder = StaticAABB2DIndexBuilder::new(count);
    for b in boxes {
        builder.add(b.min_x, b.min_y, b.max_x, b.max_y);
    }

    unwrap_spatial_index(builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::FuzzyEq;

    fn unit_square() -> Polygon<f64> {
        Polygon::from_points(vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(1.0, 1.0),
            Vector2::new(0.0, 1.0),
        ])
    }

    #[test]
    fn wrapping_indexes() {
        let sq = unit_square();
        assert_eq!(sq.next_wrapping_index(3), 0);
        assert_eq!(sq.next_wrapping_index(1), 2);
        assert_eq!(sq.prev_wrapping_index(0), 3);
        assert_eq!(sq.iter_edges().count(), 4);
        assert_eq!(Polygon::<f64>::new().iter_edges().count(), 0);
    }

    #[test]
    fn remove_repeat_pos_merges_closing_duplicate() {
        let mut pg = unit_square();
        pg.add(0.0, 1.0 + 1e-9);
        pg.add(0.0, 0.0);
        let cleaned = pg.remove_repeat_pos(1e-5);
        assert_eq!(cleaned.vertex_count(), 4);
    }

    #[test]
    fn remove_collinear_drops_midpoints_and_spikes() {
        let pg = Polygon::from_points(vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(2.0, 0.0),
            Vector2::new(2.0, 2.0),
            Vector2::new(2.0, 3.0),
            Vector2::new(2.0, 2.0),
            Vector2::new(0.0, 2.0),
        ]);
        let cleaned = pg.remove_collinear(1e-5);
        assert_eq!(cleaned.vertex_count(), 4);
        assert!(cleaned.area().fuzzy_eq(4.0));
    }

    #[test]
    fn zero_area_centroid_is_finite() {
        let line = Polygon::from_points(vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 1.0),
            Vector2::new(2.0, 2.0),
        ]);
        let c = line.centroid();
        assert!(c.is_finite());
        assert!(line.area().fuzzy_eq(0.0));
    }

    #[test]
    fn distance_to_boundary() {
        let sq = unit_square();
        assert!(sq.distance_to_boundary(Vector2::new(0.5, 0.25)).fuzzy_eq(0.25));
        assert!(sq.distance_to_boundary(Vector2::new(2.0, 0.5)).fuzzy_eq(1.0));
        assert!(sq.distance_to_boundary(Vector2::new(0.0, 0.5)).fuzzy_eq(0.0));
    }

    #[test]
    fn overlaps_checks_outlines_not_extents() {
        let sq = unit_square();
        // extents cover the square corner (1, 1) but the diamond edge stays clear of it
        let diamond = Polygon::from_points(vec![
            Vector2::new(1.6, 0.7),
            Vector2::new(2.5, 1.6),
            Vector2::new(1.6, 2.5),
            Vector2::new(0.7, 1.6),
        ]);
        assert!(!sq.overlaps(&diamond, 1e-5));
        assert!(!diamond.overlaps(&sq, 1e-5));

        let inner = Polygon::from_points(vec![
            Vector2::new(0.4, 0.4),
            Vector2::new(0.6, 0.4),
            Vector2::new(0.6, 0.6),
            Vector2::new(0.4, 0.6),
        ]);
        assert!(sq.overlaps(&inner, 1e-5));
        assert!(inner.overlaps(&sq, 1e-5));

        let crossing = sq.translated(Vector2::new(0.5, 0.5));
        assert!(sq.overlaps(&crossing, 1e-5));
        assert!(!sq.overlaps(&Polygon::new(), 1e-5));
    }
}
