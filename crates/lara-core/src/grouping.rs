//! Position grouping strategies.
//!
//! A grouping strategy partitions eligible positions into candidate
//! corridor groups. The canonical strategy buckets positions by heading
//! and then agglomerates spatial neighbours greedily inside each bucket.

use rayon::prelude::*;
use std::collections::BTreeMap;

use crate::models::{Position, PositionGroup};
use crate::params::DetectionParams;
use crate::spatial::{angular_difference_deg, haversine_km};

/// Width of a heading bucket in degrees.
pub const HEADING_BUCKET_DEG: f64 = 10.0;

/// Smallest bucket or group that can describe a segment.
pub const MIN_GROUP_SIZE: usize = 3;

/// Strategy for partitioning positions into candidate corridor groups.
pub trait GroupingStrategy: Send + Sync {
    /// Partition `positions` into groups. Groups are returned in discovery order.
    fn group(&self, positions: &[Position], params: &DetectionParams) -> Vec<PositionGroup>;

    /// Short name for logging.
    fn name(&self) -> &str;
}

/// Bucket index for a heading: `floor(heading / 10)`, in 0..=35.
pub fn heading_bucket(heading: f64) -> u16 {
    let bucket = (heading / HEADING_BUCKET_DEG).floor();
    (bucket.max(0.0) as u16).min(35)
}

/// Heading-bucket + greedy proximity agglomeration.
///
/// Deterministic and fast, not an optimal clustering: absorption follows
/// bucket order and the first unprocessed position always seeds the next group.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectionalProximityGrouper {
    /// Cluster heading buckets on the rayon thread pool
    pub parallel: bool,
}

impl DirectionalProximityGrouper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parallel() -> Self {
        Self { parallel: true }
    }
}

impl GroupingStrategy for DirectionalProximityGrouper {
    fn group(&self, positions: &[Position], params: &DetectionParams) -> Vec<PositionGroup> {
        let buckets = bucket_by_heading(positions);

        // Buckets are disjoint, so they can be clustered independently.
        let per_bucket: Vec<Vec<PositionGroup>> = if self.parallel {
            buckets
                .par_iter()
                .map(|bucket| agglomerate(bucket, params))
                .collect()
        } else {
            buckets
                .iter()
                .map(|bucket| agglomerate(bucket, params))
                .collect()
        };

        per_bucket.into_iter().flatten().collect()
    }

    fn name(&self) -> &str {
        "directional-proximity"
    }
}

/// Split positions into heading buckets, ascending by bucket index.
/// Buckets with fewer than [`MIN_GROUP_SIZE`] members are dropped.
fn bucket_by_heading(positions: &[Position]) -> Vec<Vec<&Position>> {
    let mut buckets: BTreeMap<u16, Vec<&Position>> = BTreeMap::new();
    for position in positions {
        buckets
            .entry(heading_bucket(position.heading))
            .or_default()
            .push(position);
    }

    buckets
        .into_values()
        .filter(|bucket| bucket.len() >= MIN_GROUP_SIZE)
        .collect()
}

/// Greedy agglomeration of one bucket.
fn agglomerate(bucket: &[&Position], params: &DetectionParams) -> Vec<PositionGroup> {
    let mut groups = Vec::new();
    let mut processed = vec![false; bucket.len()];

    for seed_idx in 0..bucket.len() {
        if processed[seed_idx] {
            continue;
        }
        processed[seed_idx] = true;

        let seed = bucket[seed_idx];
        let mut members: Vec<&Position> = vec![seed];

        // Keep sweeping until a full pass absorbs nothing: a late member may
        // bring an earlier candidate within range.
        loop {
            let mut absorbed = false;
            for (idx, candidate) in bucket.iter().enumerate() {
                if processed[idx] {
                    continue;
                }
                if angular_difference_deg(seed.heading, candidate.heading)
                    > params.heading_tolerance_deg
                {
                    continue;
                }
                let near_member = members.iter().any(|member| {
                    haversine_km(
                        member.latitude,
                        member.longitude,
                        candidate.latitude,
                        candidate.longitude,
                    ) <= params.proximity_km
                });
                if near_member {
                    processed[idx] = true;
                    members.push(candidate);
                    absorbed = true;
                }
            }
            if !absorbed {
                break;
            }
        }

        if members.len() >= MIN_GROUP_SIZE {
            groups.push(PositionGroup::new(members.into_iter().cloned().collect()));
        }
    }

    groups
}
