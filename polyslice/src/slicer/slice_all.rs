use std::collections::HashSet;

use super::{split_polygon, CutLine, SliceHit, SliceOptions, SliceReport, SplitOutcome};
use crate::{
    core::{math::Vector2, traits::Real},
    world::{BodyDesc, BodyKind, BodyLifecycle, Sliceable, SpatialQuery},
};

/// Find every body the segment `start -> end` cuts through, nearest to `start` first.
///
/// Repeatedly casts the segment, excluding bodies already found, until nothing more is hit. A
/// body that contains `end` stops the search without being recorded since the cut would end
/// inside it. Bodies containing `start` are never hit (see [SpatialQuery::cast_ray]).
pub fn collect_hits<T, Q>(
    query: &Q,
    start: Vector2<T>,
    end: Vector2<T>,
) -> Vec<SliceHit<Q::Handle, T>>
where
    T: Real,
    Q: SpatialQuery<T>,
{
    let end_body = query.body_containing(end);
    let mut excluded = HashSet::new();
    let mut hits = Vec::new();

    while let Some(hit) = query.cast_ray(start, end, &excluded) {
        if Some(hit.handle) == end_body {
            log::trace!("cut ends inside {:?}, stopping", hit.handle);
            break;
        }

        if !excluded.insert(hit.handle) {
            log::warn!("ray cast returned excluded body {:?}", hit.handle);
            break;
        }

        hits.push(SliceHit {
            handle: hit.handle,
            point: hit.point,
        });
    }

    hits
}

/// Cut a single body along a line given in the body's local unrotated frame.
///
/// Every remaining piece is re-origined on its centroid and spawned as a [BodyKind::Polygon] body
/// at the matching world position, inheriting rotation and velocities. Pieces whose mass is below
/// `options.minimum_area` are destroyed again right away. The original is destroyed once all
/// pieces are spawned.
///
/// Cuts that leave the body unchanged are a no-op, as are cuts that remove the whole body unless
/// the body was already below the minimum area.
pub fn split_body<T, W>(
    world: &mut W,
    handle: W::Handle,
    local_start: Vector2<T>,
    local_direction: Vector2<T>,
    options: &SliceOptions<T>,
) -> SplitOutcome<W::Handle>
where
    T: Real,
    W: BodyLifecycle<T>,
{
    let outcome = split_body_keep_original(world, handle, local_start, local_direction, options);
    if matches!(outcome, SplitOutcome::Consumed | SplitOutcome::Replaced { .. }) {
        world.destroy(handle);
    }

    outcome
}

/// [split_body] without destroying the original, the caller must destroy it when the outcome is
/// [SplitOutcome::Consumed] or [SplitOutcome::Replaced].
fn split_body_keep_original<T, W>(
    world: &mut W,
    handle: W::Handle,
    local_start: Vector2<T>,
    local_direction: Vector2<T>,
    options: &SliceOptions<T>,
) -> SplitOutcome<W::Handle>
where
    T: Real,
    W: BodyLifecycle<T>,
{
    let (pieces, original_area, position, rotation, linear_velocity, angular_velocity) =
        match world.body(handle) {
            Some(body) => {
                let polygon = body.polygon();
                let cut_line = CutLine::new(local_start, local_direction);
                (
                    split_polygon(polygon, &cut_line, options.blade_width, options),
                    polygon.area(),
                    body.position(),
                    body.rotation(),
                    body.linear_velocity(),
                    body.angular_velocity(),
                )
            }
            None => {
                log::warn!("split requested for missing body {handle:?}");
                return SplitOutcome::Missing;
            }
        };

    match pieces.as_slice() {
        [] => {
            if original_area < options.minimum_area {
                return SplitOutcome::Consumed;
            }
            return SplitOutcome::Missed;
        }
        [piece] if piece.area().fuzzy_eq_eps(original_area, options.area_eq_eps) => {
            return SplitOutcome::Missed;
        }
        _ => {}
    }

    let mut spawned = Vec::with_capacity(pieces.len());
    let mut discarded = 0;
    for piece in pieces {
        let centroid = piece.centroid();
        let desc = BodyDesc::new(BodyKind::Polygon, piece.translated(-centroid))
            .with_position(position + centroid.rotate(rotation))
            .with_rotation(rotation)
            .with_velocity(linear_velocity, angular_velocity);

        let piece_handle = world.spawn(desc);
        let mass = world.body(piece_handle).map_or(T::zero(), |b| b.mass());
        if mass < options.minimum_area {
            log::trace!("piece {piece_handle:?} below minimum area ({mass:?}), removing");
            world.destroy(piece_handle);
            discarded += 1;
        } else {
            spawned.push(piece_handle);
        }
    }

    SplitOutcome::Replaced { spawned, discarded }
}

/// Slice every body crossed by the world space segment `start -> end`.
///
/// Bodies are found with [collect_hits] before any of them is modified, then each is cut in turn
/// with [split_body] using `options.blade_width`. A zero length segment does nothing.
///
/// Cut bodies are only destroyed after every hit is resolved, so a handle never appears in both
/// [SliceReport::destroyed] and [SliceReport::spawned] even when the world reuses handles.
pub fn slice_all<T, W>(
    world: &mut W,
    start: Vector2<T>,
    end: Vector2<T>,
    options: &SliceOptions<T>,
) -> SliceReport<W::Handle, T>
where
    T: Real,
    W: BodyLifecycle<T>,
{
    let mut report = SliceReport::new();
    let direction = match (end - start).try_normalize() {
        Some(d) => d,
        None => {
            log::debug!("zero length cut, nothing to slice");
            return report;
        }
    };

    report.hits = collect_hits(&*world, start, end);

    for hit in report.hits.iter() {
        let (local_start, local_direction) = match world.body(hit.handle) {
            Some(body) => (body.to_local(hit.point), direction.rotate(-body.rotation())),
            None => {
                log::warn!("hit body {:?} no longer exists", hit.handle);
                continue;
            }
        };

        let outcome =
            split_body_keep_original(world, hit.handle, local_start, local_direction, options);
        match outcome {
            SplitOutcome::Missing => {}
            SplitOutcome::Missed => report.missed.push(hit.handle),
            SplitOutcome::Consumed => report.destroyed.push(hit.handle),
            SplitOutcome::Replaced { spawned, discarded } => {
                report.spawned.extend(spawned);
                report.discarded_pieces += discarded;
                report.destroyed.push(hit.handle);
            }
        }
    }

    for &handle in report.destroyed.iter() {
        world.destroy(handle);
    }

    log::debug!(
        "slice {:?} -> {:?}: {} hits, {} spawned, {} destroyed, {} discarded, {} missed",
        start,
        end,
        report.hits.len(),
        report.spawned.len(),
        report.destroyed.len(),
        report.discarded_pieces,
        report.missed.len()
    );

    report
}
