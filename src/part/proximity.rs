use smallvec::SmallVec;

use crate::part::baseline::Baseline;
use crate::scene::NodeHandle;

pub const DEFAULT_MAX_DISTANCE: f32 = 2.0;
pub const DEFAULT_MAX_COUNT: usize = 3;

/// Distance at which the ripple would fade to zero before the floor kicks in.
const RIPPLE_FALLOFF: f32 = 2.0;
const RIPPLE_FLOOR: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub node: NodeHandle,
    pub distance: f32,
}

/// Leaves whose baseline world position lies within `max_distance` of
/// `target`'s, nearest first, at most `max_count` of them. The target itself
/// is excluded and equal distances keep capture order.
///
/// An untracked `target` yields nothing. Leaf counts are small (tens), so
/// this is a plain linear scan.
#[must_use]
pub fn find_nearby(
    baseline: &Baseline,
    target: NodeHandle,
    max_distance: f32,
    max_count: usize,
) -> SmallVec<[Neighbor; 4]> {
    let Some(origin) = baseline.get(target).map(|leaf| leaf.world_position) else {
        return SmallVec::new();
    };

    let mut nearby: SmallVec<[Neighbor; 4]> = baseline
        .leaves()
        .iter()
        .filter(|leaf| leaf.node != target)
        .map(|leaf| Neighbor {
            node: leaf.node,
            distance: origin.distance(leaf.world_position),
        })
        .filter(|n| n.distance <= max_distance)
        .collect();

    nearby.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    nearby.truncate(max_count);
    nearby
}

/// Float intensity for a neighbour at `distance`: fades linearly with
/// distance but never drops below 0.3.
#[must_use]
pub fn ripple_intensity(distance: f32) -> f32 {
    (1.0 - distance / RIPPLE_FALLOFF).max(RIPPLE_FLOOR)
}
