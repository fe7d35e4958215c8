use polyslice::{core::traits::FuzzyEq, polygon::Polygon, AABB};

/// Fuzzy compare AABB values
pub fn aabb_fuzzy_eq_eps(a: &AABB<f64>, b: &AABB<f64>, eps: f64) -> bool {
    a.min_x.fuzzy_eq_eps(b.min_x, eps)
        && a.min_y.fuzzy_eq_eps(b.min_y, eps)
        && a.max_x.fuzzy_eq_eps(b.max_x, eps)
        && a.max_y.fuzzy_eq_eps(b.max_y, eps)
}

/// Holds a set of properties of a polygon for comparison in tests, independent of winding and
/// start vertex.
#[derive(Debug, Copy, Clone)]
pub struct PgonProperties {
    pub vertex_count: usize,
    pub area: f64,
    pub extents: AABB<f64>,
}

impl PgonProperties {
    // positions equal epsilon
    pub const POS_EQ_EPS: f64 = 1e-5;
    // property comparer epsilon
    pub const PROP_CMP_EPS: f64 = 1e-4;

    pub fn new(
        vertex_count: usize,
        area: f64,
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    ) -> Self {
        Self {
            vertex_count,
            area,
            extents: AABB::new(min_x, min_y, max_x, max_y),
        }
    }

    pub fn from_polygon(polygon: &Polygon<f64>) -> Self {
        // cleanup for consistent vertex counts
        let polygon = polygon
            .remove_repeat_pos(Self::POS_EQ_EPS)
            .remove_collinear(Self::POS_EQ_EPS);
        Self {
            vertex_count: polygon.vertex_count(),
            area: polygon.area(),
            extents: polygon.extents().unwrap(),
        }
    }

    pub fn fuzzy_eq_eps(&self, other: &Self, eps: f64) -> bool {
        self.vertex_count == other.vertex_count
            && self.area.fuzzy_eq_eps(other.area, eps)
            && aabb_fuzzy_eq_eps(&self.extents, &other.extents, eps)
    }
}

pub fn create_property_set<'a, I>(polygons: I) -> Vec<PgonProperties>
where
    I: IntoIterator<Item = &'a Polygon<f64>>,
{
    polygons
        .into_iter()
        .map(PgonProperties::from_polygon)
        .collect()
}

pub fn property_sets_match(result_set: &[PgonProperties], expected_set: &[PgonProperties]) -> bool {
    let mut sets_match = result_set.len() == expected_set.len();
    if sets_match {
        // N^2 compare, sets are small
        for properties_expected in expected_set {
            let match_count = result_set
                .iter()
                .filter(|properties_result| {
                    properties_expected
                        .fuzzy_eq_eps(properties_result, PgonProperties::PROP_CMP_EPS)
                })
                .count();

            if match_count != 1 {
                sets_match = false;
                break;
            }
        }
    }

    if !sets_match {
        eprintln!("result:\n{:?}", result_set);
        eprintln!("expected:\n{:?}", expected_set);
    }

    sets_match
}
