use std::{collections::HashSet, fmt::Debug, hash::Hash};

use super::{BodyDesc, RayHit};
use crate::{
    core::{math::Vector2, traits::Real},
    polygon::Polygon,
};

/// Capability shared by every body that can be cut.
///
/// The polygon is in the body's local frame with the origin at its center of mass, `position` and
/// `rotation` place it in the world.
pub trait Sliceable<T>
where
    T: Real,
{
    fn polygon(&self) -> &Polygon<T>;
    fn position(&self) -> Vector2<T>;
    fn rotation(&self) -> T;
    fn linear_velocity(&self) -> Vector2<T>;
    fn angular_velocity(&self) -> T;
    fn mass(&self) -> T;

    /// Convert a world point into the body's local unrotated frame.
    #[inline]
    fn to_local(&self, point: Vector2<T>) -> Vector2<T> {
        (point - self.position()).rotate(-self.rotation())
    }

    /// Convert a local point into world space.
    #[inline]
    fn to_world(&self, local: Vector2<T>) -> Vector2<T> {
        self.position() + local.rotate(self.rotation())
    }

    /// Outline placed in world space.
    fn world_polygon(&self) -> Polygon<T> {
        self.polygon()
            .rotated(self.rotation())
            .translated(self.position())
    }
}

/// Ray and point queries against the bodies of a world.
pub trait SpatialQuery<T>
where
    T: Real,
{
    type Handle: Copy + Eq + Hash + Debug;

    /// Nearest body struck by the segment `from -> to`, skipping handles in `excluded`.
    ///
    /// Bodies that contain `from` are not reported, a ray only hits a body it enters.
    fn cast_ray(
        &self,
        from: Vector2<T>,
        to: Vector2<T>,
        excluded: &HashSet<Self::Handle>,
    ) -> Option<RayHit<Self::Handle, T>>;

    /// Body whose outline contains `point`, if any.
    fn body_containing(&self, point: Vector2<T>) -> Option<Self::Handle>;
}

/// Access to body state plus spawning and destroying bodies.
pub trait BodyLifecycle<T>: SpatialQuery<T>
where
    T: Real,
{
    type Body: Sliceable<T>;

    fn body(&self, handle: Self::Handle) -> Option<&Self::Body>;

    fn spawn(&mut self, desc: BodyDesc<T>) -> Self::Handle;

    /// Returns false if the handle did not refer to a live body.
    fn destroy(&mut self, handle: Self::Handle) -> bool;
}

/// Area queries, used for deleting and for overlap checks before spawning.
pub trait RegionQuery<T>: SpatialQuery<T>
where
    T: Real,
{
    /// All bodies whose world outline overlaps or touches `outline` (given in world space).
    fn bodies_overlapping(&self, outline: &Polygon<T>) -> Vec<Self::Handle>;

    /// All bodies whose world outline overlaps the rectangle spanned by `corner1` and `corner2`.
    fn bodies_in_region(&self, corner1: Vector2<T>, corner2: Vector2<T>) -> Vec<Self::Handle> {
        let region = Polygon::from_points(vec![
            corner1,
            Vector2::new(corner2.x, corner1.y),
            corner2,
            Vector2::new(corner1.x, corner2.y),
        ]);
        self.bodies_overlapping(&region)
    }
}
