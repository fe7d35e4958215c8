use std::collections::HashSet;

use slab::Slab;

use super::{
    Body, BodyDesc, BodyHandle, BodyLifecycle, RayHit, RegionQuery, Sliceable, SpatialQuery,
    WorldError,
};
use crate::{
    core::{
        math::{min_max, parametric_from_point, point_from_parametric, seg_intr, SegIntr, Vector2},
        traits::Real,
    },
    polygon::{build_spatial_index, Polygon},
    AABB,
};

/// In-process store of bodies answering the queries the slicer needs.
///
/// Queries work on world space outlines computed on demand, there is no persistent broad phase
/// since bodies are replaced wholesale by every cut.
#[derive(Debug, Clone)]
pub struct World<T = f64> {
    bodies: Slab<Body<T>>,
    pos_equal_eps: T,
}

impl<T> World<T>
where
    T: Real,
{
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bodies: Slab::with_capacity(capacity),
            pos_equal_eps: T::from_literal(1e-5),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    #[inline]
    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.bodies.contains(handle.0)
    }

    #[inline]
    pub fn get(&self, handle: BodyHandle) -> Option<&Body<T>> {
        self.bodies.get(handle.0)
    }

    #[inline]
    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut Body<T>> {
        self.bodies.get_mut(handle.0)
    }

    /// Iterate live bodies in handle order.
    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &Body<T>)> + '_ {
        self.bodies.iter().map(|(k, b)| (BodyHandle(k), b))
    }

    pub fn handles(&self) -> Vec<BodyHandle> {
        self.bodies.iter().map(|(k, _)| BodyHandle(k)).collect()
    }

    /// Remove a body and hand it back.
    pub fn remove(&mut self, handle: BodyHandle) -> Result<Body<T>, WorldError> {
        self.bodies
            .try_remove(handle.0)
            .ok_or(WorldError::BodyNotFound(handle))
    }

    /// Replace the outline of a body, its mass is recomputed.
    pub fn set_polygon(
        &mut self,
        handle: BodyHandle,
        polygon: Polygon<T>,
    ) -> Result<(), WorldError> {
        let body = self
            .bodies
            .get_mut(handle.0)
            .ok_or(WorldError::BodyNotFound(handle))?;
        body.set_polygon(polygon);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    /// World space outlines paired with their extents, empty polygons are left out.
    fn world_outlines<F>(&self, mut filter: F) -> Vec<(BodyHandle, Polygon<T>, AABB<T>)>
    where
        F: FnMut(BodyHandle) -> bool,
    {
        self.iter()
            .filter(|(h, _)| filter(*h))
            .filter_map(|(h, b)| {
                let outline = b.world_polygon();
                let extents = outline.extents()?;
                Some((h, outline, extents))
            })
            .collect()
    }

    /// Nearest point along `from -> to` where `outline` is crossed, as a ray parameter.
    fn ray_entry_t(&self, from: Vector2<T>, to: Vector2<T>, outline: &Polygon<T>) -> Option<T> {
        let eps = self.pos_equal_eps;
        let mut result: Option<T> = None;
        let mut consider = |t: T| {
            if result.map_or(true, |r| t < r) {
                result = Some(t);
            }
        };

        for (v1, v2) in outline.iter_edges() {
            match seg_intr(from, to, v1, v2, eps) {
                SegIntr::NoIntersect => {}
                SegIntr::Point { a_t, .. } => consider(a_t),
                SegIntr::Overlapping { b_t0, b_t1 } => {
                    for b_t in [b_t0, b_t1] {
                        let pos = point_from_parametric(v1, v2, b_t);
                        consider(parametric_from_point(from, to, pos, eps));
                    }
                }
            }
        }

        result.map(|t| num_traits::real::Real::max(t, T::zero()))
    }
}

impl<T> Default for World<T>
where
    T: Real,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SpatialQuery<T> for World<T>
where
    T: Real,
{
    type Handle = BodyHandle;

    fn cast_ray(
        &self,
        from: Vector2<T>,
        to: Vector2<T>,
        excluded: &HashSet<BodyHandle>,
    ) -> Option<RayHit<BodyHandle, T>> {
        if from.fuzzy_eq_eps(to, self.pos_equal_eps) {
            return None;
        }

        let candidates = self.world_outlines(|h| !excluded.contains(&h));
        if candidates.is_empty() {
            return None;
        }

        let index = build_spatial_index(
            candidates.len(),
            candidates.iter().map(|(_, _, extents)| *extents),
        );

        let (min_x, max_x) = min_max(from.x, to.x);
        let (min_y, max_y) = min_max(from.y, to.y);
        let eps = self.pos_equal_eps;

        let mut best: Option<(T, BodyHandle)> = None;
        for i in index.query(min_x - eps, min_y - eps, max_x + eps, max_y + eps) {
            let (handle, outline, _) = &candidates[i];
            if outline.contains_point(from) {
                continue;
            }

            let t = match self.ray_entry_t(from, to, outline) {
                Some(t) => t,
                None => continue,
            };

            let is_better = match best {
                None => true,
                Some((best_t, best_handle)) => {
                    t < best_t || (t.fuzzy_eq_eps(best_t, eps) && *handle < best_handle)
                }
            };

            if is_better {
                best = Some((t, *handle));
            }
        }

        best.map(|(t, handle)| {
            log::trace!("ray hit {handle} at t = {t:?}");
            RayHit {
                handle,
                point: point_from_parametric(from, to, t),
                t,
            }
        })
    }

    fn body_containing(&self, point: Vector2<T>) -> Option<BodyHandle> {
        self.iter()
            .find(|(_, b)| b.world_polygon().contains_point(point))
            .map(|(h, _)| h)
    }
}

impl<T> BodyLifecycle<T> for World<T>
where
    T: Real,
{
    type Body = Body<T>;

    #[inline]
    fn body(&self, handle: BodyHandle) -> Option<&Body<T>> {
        self.get(handle)
    }

    fn spawn(&mut self, desc: BodyDesc<T>) -> BodyHandle {
        let handle = BodyHandle(self.bodies.insert(Body::from_desc(desc)));
        log::trace!("spawned {handle}");
        handle
    }

    fn destroy(&mut self, handle: BodyHandle) -> bool {
        let removed = self.bodies.try_remove(handle.0).is_some();
        if removed {
            log::trace!("destroyed {handle}");
        }

        removed
    }
}

impl<T> RegionQuery<T> for World<T>
where
    T: Real,
{
    fn bodies_overlapping(&self, outline: &Polygon<T>) -> Vec<BodyHandle> {
        let region = match outline.extents() {
            Some(e) => e,
            None => return Vec::new(),
        };

        let eps = self.pos_equal_eps;
        self.world_outlines(|_| true)
            .into_iter()
            .filter(|(_, _, e)| {
                e.min_x <= region.max_x + eps
                    && e.max_x >= region.min_x - eps
                    && e.min_y <= region.max_y + eps
                    && e.max_y >= region.min_y - eps
            })
            .filter(|(_, body_outline, _)| body_outline.overlaps(outline, eps))
            .map(|(h, _, _)| h)
            .collect()
    }
}
