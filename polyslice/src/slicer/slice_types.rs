use crate::{
    core::{math::Vector2, traits::Real},
    polygon::ClipOptions,
};

/// Distance the blade starts before the cut line start so it never begins inside the polygon.
pub const SPLIT_LENGTH_MARGIN: f64 = 10.0;

/// Blade width used for interactive slicing.
pub const SLICE_BLADE_WIDTH: f64 = 5.0;

/// Bodies and pieces with an area below this are degenerate and removed.
pub const MINIMUM_AREA: f64 = 100.0;

/// Line to cut along, `direction` does not need to be normalized.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CutLine<T = f64> {
    pub start: Vector2<T>,
    pub direction: Vector2<T>,
}

impl<T> CutLine<T>
where
    T: Real,
{
    #[inline]
    pub fn new(start: Vector2<T>, direction: Vector2<T>) -> Self {
        Self { start, direction }
    }

    /// Cut line running from `start` towards `end`.
    #[inline]
    pub fn through(start: Vector2<T>, end: Vector2<T>) -> Self {
        Self::new(start, end - start)
    }
}

/// Tunables for splitting and slicing.
#[derive(Debug, Clone)]
pub struct SliceOptions<T>
where
    T: Real,
{
    /// How far before the cut start the blade begins, see [SPLIT_LENGTH_MARGIN].
    pub margin: T,
    /// Width of the blade used by [super::slice_all], see [SLICE_BLADE_WIDTH].
    pub blade_width: T,
    /// Pieces (and consumed bodies) below this area are removed, see [MINIMUM_AREA].
    pub minimum_area: T,
    /// A single piece within this of the original area counts as a miss.
    pub area_eq_eps: T,
    /// Options for the underlying clip. `subject_aabb_index` is ignored, the index is always built
    /// from the polygon being split.
    pub clip_options: ClipOptions<'static, T>,
}

impl<T> SliceOptions<T>
where
    T: Real,
{
    pub fn new() -> Self {
        Self {
            margin: T::from_literal(SPLIT_LENGTH_MARGIN),
            blade_width: T::from_literal(SLICE_BLADE_WIDTH),
            minimum_area: T::from_literal(MINIMUM_AREA),
            area_eq_eps: T::from_literal(1e-4),
            clip_options: ClipOptions::new(),
        }
    }
}

impl<T> Default for SliceOptions<T>
where
    T: Real,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Body struck by a cut and the world point where the cut entered it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SliceHit<H, T = f64> {
    pub handle: H,
    pub point: Vector2<T>,
}

/// What happened to a single body handed to [super::split_body].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitOutcome<H> {
    /// Handle did not refer to a live body.
    Missing,
    /// Blade did not change the body, it was left as is.
    Missed,
    /// Blade removed the whole body and the body was already below the minimum area, it was
    /// destroyed without replacement.
    Consumed,
    /// Body was destroyed and replaced by the spawned pieces.
    Replaced {
        spawned: Vec<H>,
        /// Number of pieces spawned then removed for being below the minimum area.
        discarded: usize,
    },
}

/// Summary of one [super::slice_all] call.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceReport<H, T = f64> {
    /// Bodies struck by the cut, nearest to the cut start first.
    pub hits: Vec<SliceHit<H, T>>,
    /// New bodies left in the world.
    pub spawned: Vec<H>,
    /// Original bodies removed.
    pub destroyed: Vec<H>,
    /// Pieces removed for being below the minimum area.
    pub discarded_pieces: usize,
    /// Struck bodies that were left untouched.
    pub missed: Vec<H>,
}

impl<H, T> SliceReport<H, T> {
    pub fn new() -> Self {
        Self {
            hits: Vec::new(),
            spawned: Vec::new(),
            destroyed: Vec::new(),
            discarded_pieces: 0,
            missed: Vec::new(),
        }
    }

    /// True if the world was not modified.
    pub fn is_noop(&self) -> bool {
        self.spawned.is_empty() && self.destroyed.is_empty()
    }
}

impl<H, T> Default for SliceReport<H, T> {
    fn default() -> Self {
        Self::new()
    }
}
