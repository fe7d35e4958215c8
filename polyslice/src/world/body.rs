#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Sliceable;
use crate::{
    core::{math::Vector2, traits::Real},
    polygon::Polygon,
};

/// Key of a body stored in a [super::World].
///
/// Handles are reused after a body is destroyed, holding on to one past the destroy may refer to
/// a different body later.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BodyHandle(pub(crate) usize);

impl BodyHandle {
    /// Raw slot index of the handle.
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "body#{}", self.0)
    }
}

/// Tag for the kind of shape a body was created as.
///
/// Fragments produced by slicing are always [BodyKind::Polygon] since their outline is arbitrary.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BodyKind {
    Polygon,
    Rectangle,
    Circle,
}

/// Everything needed to spawn a body, mass is derived from the polygon.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BodyDesc<T = f64> {
    pub kind: BodyKind,
    /// Outline in the local frame, the origin is expected to be the centroid.
    pub polygon: Polygon<T>,
    pub position: Vector2<T>,
    pub rotation: T,
    pub linear_velocity: Vector2<T>,
    pub angular_velocity: T,
}

impl<T> BodyDesc<T>
where
    T: Real,
{
    /// Body at rest at the origin.
    pub fn new(kind: BodyKind, polygon: Polygon<T>) -> Self {
        Self {
            kind,
            polygon,
            position: Vector2::zero(),
            rotation: T::zero(),
            linear_velocity: Vector2::zero(),
            angular_velocity: T::zero(),
        }
    }

    pub fn with_position(mut self, position: Vector2<T>) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: T) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_velocity(mut self, linear_velocity: Vector2<T>, angular_velocity: T) -> Self {
        self.linear_velocity = linear_velocity;
        self.angular_velocity = angular_velocity;
        self
    }
}

/// Rigid body state as seen by the slicer.
///
/// `mass` always equals the area of `polygon` (uniform unit density), the polygon can only be
/// replaced through [Body::set_polygon] to keep that in sync.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Body<T = f64> {
    pub kind: BodyKind,
    polygon: Polygon<T>,
    pub position: Vector2<T>,
    pub rotation: T,
    pub linear_velocity: Vector2<T>,
    pub angular_velocity: T,
    mass: T,
}

impl<T> Body<T>
where
    T: Real,
{
    pub fn from_desc(desc: BodyDesc<T>) -> Self {
        let mass = desc.polygon.area();
        Self {
            kind: desc.kind,
            polygon: desc.polygon,
            position: desc.position,
            rotation: desc.rotation,
            linear_velocity: desc.linear_velocity,
            angular_velocity: desc.angular_velocity,
            mass,
        }
    }

    /// Replace the outline and recompute the mass.
    pub fn set_polygon(&mut self, polygon: Polygon<T>) {
        self.mass = polygon.area();
        self.polygon = polygon;
    }
}

impl<T> Sliceable<T> for Body<T>
where
    T: Real,
{
    #[inline]
    fn polygon(&self) -> &Polygon<T> {
        &self.polygon
    }

    #[inline]
    fn position(&self) -> Vector2<T> {
        self.position
    }

    #[inline]
    fn rotation(&self) -> T {
        self.rotation
    }

    #[inline]
    fn linear_velocity(&self) -> Vector2<T> {
        self.linear_velocity
    }

    #[inline]
    fn angular_velocity(&self) -> T {
        self.angular_velocity
    }

    #[inline]
    fn mass(&self) -> T {
        self.mass
    }
}

/// First point where a ray struck a body.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RayHit<H, T = f64> {
    pub handle: H,
    pub point: Vector2<T>,
    /// Parametric position of `point` along the ray, `0` at the ray start and `1` at its end.
    pub t: T,
}
