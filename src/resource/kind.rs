use fixedbitset::FixedBitSet;
use serde::{Deserialize, Serialize};

use super::value::{ResourceValue, DOMINANCE_EPS};
use crate::error::RcsppError;

/// Tag identifying which of the standard resource kinds a composition
/// component is. New kinds are added by extending this enum and the
/// dispatch functions below.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKindTag {
    /// Additive numeric accumulator (cost, demand, ...).
    Additive,
    /// Additive-with-lower-bound-clamp, feasibility is an upper bound.
    TimeWindow,
    /// ng-path / visited-set bookkeeping.
    NgSet,
}

/// Per-node configuration for a single resource-kind component.
#[derive(Clone, Debug)]
pub enum NodeBound {
    /// No feasibility constraint.
    Unbounded,
    /// Closed-interval feasibility, e.g. vehicle capacity.
    Interval { min: f64, max: f64 },
    /// Time-window feasibility: `value <= upper`. `lower` is exposed so
    /// arcs landing on this node can precompute their extend-time clamp.
    TimeWindow { lower: f64, upper: f64 },
    /// ng-path feasibility: the accumulated set must not intersect
    /// `forbidden`.
    NgSet { forbidden: FixedBitSet },
}

/// Per-arc operator bundle for a single resource-kind component.
#[derive(Clone, Debug)]
pub enum ArcPayload {
    Additive(f64),
    /// `dest_lower` is the destination node's time-window lower bound,
    /// captured once at arc-construction time.
    TimeWindow { travel: f64, dest_lower: f64 },
    /// `origin_bit` is the dense bit index of the arc's origin node;
    /// `ng_neighborhood` is the origin's ng-neighborhood, captured at
    /// extender-creation time.
    NgSet {
        origin_bit: usize,
        ng_neighborhood: FixedBitSet,
    },
}

fn payload_kind_name(payload: &ArcPayload) -> &'static str {
    match payload {
        ArcPayload::Additive(_) => "additive",
        ArcPayload::TimeWindow { .. } => "time-window",
        ArcPayload::NgSet { .. } => "ng-set",
    }
}

pub fn extend(
    tag: ResourceKindTag,
    index: usize,
    prev: &ResourceValue,
    payload: &ArcPayload,
) -> Result<ResourceValue, RcsppError> {
    match (tag, payload) {
        (ResourceKindTag::Additive, ArcPayload::Additive(amount)) => {
            Ok(ResourceValue::Number(prev.as_number() + amount))
        }
        (ResourceKindTag::TimeWindow, ArcPayload::TimeWindow { travel, dest_lower }) => {
            Ok(ResourceValue::Number(
                (prev.as_number() + travel).max(*dest_lower),
            ))
        }
        (
            ResourceKindTag::NgSet,
            ArcPayload::NgSet {
                origin_bit,
                ng_neighborhood,
            },
        ) => {
            let mut set = prev.as_set().clone();
            if ng_neighborhood.len() > set.len() {
                set.grow(ng_neighborhood.len());
            }
            set.intersect_with(ng_neighborhood);
            if *origin_bit >= set.len() {
                set.grow(origin_bit + 1);
            }
            set.insert(*origin_bit);
            Ok(ResourceValue::Set(set))
        }
        _ => Err(RcsppError::KindPayloadMismatch {
            index,
            payload_kind: payload_kind_name(payload),
        }),
    }
}

pub fn is_feasible(tag: ResourceKindTag, value: &ResourceValue, bound: &NodeBound) -> bool {
    match (tag, bound) {
        (ResourceKindTag::Additive, NodeBound::Unbounded) => true,
        (ResourceKindTag::Additive, NodeBound::Interval { min, max }) => {
            let v = value.as_number();
            v >= min - DOMINANCE_EPS && v <= max + DOMINANCE_EPS
        }
        (ResourceKindTag::TimeWindow, NodeBound::TimeWindow { upper, .. }) => {
            value.as_number() <= upper + DOMINANCE_EPS
        }
        (ResourceKindTag::TimeWindow, NodeBound::Unbounded) => true,
        (ResourceKindTag::NgSet, NodeBound::NgSet { forbidden }) => {
            value.as_set().is_disjoint(forbidden)
        }
        (ResourceKindTag::NgSet, NodeBound::Unbounded) => true,
        _ => true,
    }
}

/// Scalar cost contribution of a single component: the value itself for
/// additive kinds, zero for set kinds.
pub fn component_cost(tag: ResourceKindTag, value: &ResourceValue) -> f64 {
    match tag {
        ResourceKindTag::Additive | ResourceKindTag::TimeWindow => value.as_number(),
        ResourceKindTag::NgSet => 0.0,
    }
}

/// `dominates(a, b)`: true iff a label carrying `a` is at least as good as
/// one carrying `b` in this coordinate.
pub fn dominates(tag: ResourceKindTag, a: &ResourceValue, b: &ResourceValue) -> bool {
    match tag {
        ResourceKindTag::Additive | ResourceKindTag::TimeWindow => {
            a.as_number() <= b.as_number() + DOMINANCE_EPS
        }
        ResourceKindTag::NgSet => a.as_set().is_subset(b.as_set()),
    }
}
