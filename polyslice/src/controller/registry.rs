use std::collections::HashMap;

use thiserror::Error;

use crate::{
    core::{math::Vector2, traits::Real},
    polygon::{circle_points, rectangle_points, Polygon},
    world::BodyKind,
};

/// Builds a local outline for a body kind from a size (half extents, or radius in `x`).
pub type ShapeFactory<T> = fn(Vector2<T>) -> Polygon<T>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("no shape factory registered for {0:?}")]
    UnknownKind(BodyKind),
}

/// Map from body kind to the factory that outlines it.
#[derive(Debug, Clone)]
pub struct BodyRegistry<T> {
    factories: HashMap<BodyKind, ShapeFactory<T>>,
}

impl<T> BodyRegistry<T>
where
    T: Real,
{
    /// Registry without any kinds.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registry with the drawable kinds: [BodyKind::Rectangle] from half extents and
    /// [BodyKind::Circle] from a radius in `size.x`.
    pub fn with_default_kinds() -> Self {
        let mut registry = Self::new();
        registry.register(BodyKind::Rectangle, rectangle_points);
        registry.register(BodyKind::Circle, circle_from_size);
        registry
    }

    /// Add or replace the factory for `kind`, returning the previous one.
    pub fn register(
        &mut self,
        kind: BodyKind,
        factory: ShapeFactory<T>,
    ) -> Option<ShapeFactory<T>> {
        self.factories.insert(kind, factory)
    }

    #[inline]
    pub fn contains(&self, kind: BodyKind) -> bool {
        self.factories.contains_key(&kind)
    }

    pub fn create(&self, kind: BodyKind, size: Vector2<T>) -> Result<Polygon<T>, RegistryError> {
        let factory = self
            .factories
            .get(&kind)
            .ok_or(RegistryError::UnknownKind(kind))?;
        Ok(factory(size))
    }
}

impl<T> Default for BodyRegistry<T>
where
    T: Real,
{
    fn default() -> Self {
        Self::with_default_kinds()
    }
}

fn circle_from_size<T>(size: Vector2<T>) -> Polygon<T>
where
    T: Real,
{
    circle_points(size.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::FuzzyEq;

    #[test]
    fn default_kinds() {
        let registry = BodyRegistry::<f64>::with_default_kinds();
        let rect = registry
            .create(BodyKind::Rectangle, Vector2::new(10.0, 5.0))
            .unwrap();
        assert!(rect.area().fuzzy_eq(200.0));
        let circle = registry
            .create(BodyKind::Circle, Vector2::new(100.0, 0.0))
            .unwrap();
        assert_eq!(circle.vertex_count(), 32);
        assert_eq!(
            registry.create(BodyKind::Polygon, Vector2::new(1.0, 1.0)),
            Err(RegistryError::UnknownKind(BodyKind::Polygon))
        );
    }

    #[test]
    fn register_replaces() {
        let mut registry = BodyRegistry::<f64>::new();
        assert!(!registry.contains(BodyKind::Circle));
        assert!(registry.register(BodyKind::Circle, rectangle_points).is_none());
        assert!(registry.register(BodyKind::Circle, circle_from_size).is_some());
        assert!(registry.contains(BodyKind::Circle));
    }
}
