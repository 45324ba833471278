use fixedbitset::FixedBitSet;

/// Dominance/feasibility tolerance for floating-point additive and
/// time-window resources. Applied uniformly to both floating kinds; the
/// set kind compares exactly by inclusion instead.
pub const DOMINANCE_EPS: f64 = 1e-9;

/// A single resource-kind value inside a label's resource tuple.
///
/// Both the additive-numeric and time-window kinds share the `Number`
/// representation — both are additive accumulators over `f64`; only their
/// `extend`/`is_feasible` behavior differs, which is dispatched on the kind
/// tag rather than the value representation.
#[derive(Clone, Debug, PartialEq)]
pub enum ResourceValue {
    Number(f64),
    Set(FixedBitSet),
}

impl ResourceValue {
    pub fn as_number(&self) -> f64 {
        match self {
            ResourceValue::Number(v) => *v,
            ResourceValue::Set(_) => panic!("resource value is a set, not a number"),
        }
    }

    pub fn as_set(&self) -> &FixedBitSet {
        match self {
            ResourceValue::Set(s) => s,
            ResourceValue::Number(_) => panic!("resource value is a number, not a set"),
        }
    }
}
