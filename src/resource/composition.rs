use std::rc::Rc;

use super::kind::{self, ArcPayload, NodeBound, ResourceKindTag};
use super::value::ResourceValue;
use crate::error::RcsppError;

/// The heterogeneous product of resource-kind values carried by a label.
/// Represented as a flat vector of a closed value enum rather than a true
/// heterogeneous tuple.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceTuple(pub Vec<ResourceValue>);

impl ResourceTuple {
    pub fn arity(&self) -> usize {
        self.0.len()
    }
}

/// Per-node template: one `NodeBound` per composition component, plus the
/// initial resource value a label starts with when created at that node.
#[derive(Clone, Debug)]
pub struct ResourceTemplate {
    pub bounds: Vec<NodeBound>,
    pub initial: ResourceTuple,
}

/// Per-arc extender: one `ArcPayload` per composition component.
#[derive(Clone, Debug)]
pub struct Extender(pub Vec<ArcPayload>);

/// Describes the shape of the composition: the ordered list of kinds and
/// which component (if any) is the designated cost coordinate. Shared
/// (read-only) across the whole graph via `Rc`, since the algorithm is
/// single-threaded.
#[derive(Clone, Debug)]
pub struct ResourceSpec {
    kinds: Vec<ResourceKindTag>,
    cost_component: Option<usize>,
}

impl ResourceSpec {
    pub fn arity(&self) -> usize {
        self.kinds.len()
    }

    pub fn kinds(&self) -> &[ResourceKindTag] {
        &self.kinds
    }

    fn check_arity(&self, len: usize) -> Result<(), RcsppError> {
        if len != self.kinds.len() {
            return Err(RcsppError::ArityMismatch {
                expected: self.kinds.len(),
                actual: len,
            });
        }
        Ok(())
    }

    pub fn make_template(
        &self,
        bounds: Vec<NodeBound>,
        initial: Vec<ResourceValue>,
    ) -> Result<ResourceTemplate, RcsppError> {
        self.check_arity(bounds.len())?;
        self.check_arity(initial.len())?;
        Ok(ResourceTemplate {
            bounds,
            initial: ResourceTuple(initial),
        })
    }

    pub fn make_extender(&self, payloads: Vec<ArcPayload>) -> Result<Extender, RcsppError> {
        self.check_arity(payloads.len())?;
        Ok(Extender(payloads))
    }

    /// Forward resource extension along an arc: component-wise application
    /// of the arc's per-kind extender. O(K) plus per-kind cost.
    pub fn extend(
        &self,
        prev: &ResourceTuple,
        extender: &Extender,
    ) -> Result<ResourceTuple, RcsppError> {
        self.check_arity(prev.0.len())?;
        self.check_arity(extender.0.len())?;
        let mut out = Vec::with_capacity(self.kinds.len());
        for i in 0..self.kinds.len() {
            out.push(kind::extend(self.kinds[i], i, &prev.0[i], &extender.0[i])?);
        }
        Ok(ResourceTuple(out))
    }

    /// Component-wise conjunction, short-circuiting at the first
    /// infeasible component.
    pub fn is_feasible(&self, value: &ResourceTuple, template: &ResourceTemplate) -> bool {
        for i in 0..self.kinds.len() {
            if !kind::is_feasible(self.kinds[i], &value.0[i], &template.bounds[i]) {
                return false;
            }
        }
        true
    }

    /// Sum of per-component costs, unless a single cost component is
    /// designated.
    pub fn cost(&self, value: &ResourceTuple) -> f64 {
        if let Some(idx) = self.cost_component {
            return kind::component_cost(self.kinds[idx], &value.0[idx]);
        }
        (0..self.kinds.len())
            .map(|i| kind::component_cost(self.kinds[i], &value.0[i]))
            .sum()
    }

    /// Conjunction of per-component dominance.
    pub fn dominates(&self, a: &ResourceTuple, b: &ResourceTuple) -> bool {
        for i in 0..self.kinds.len() {
            if !kind::dominates(self.kinds[i], &a.0[i], &b.0[i]) {
                return false;
            }
        }
        true
    }
}

/// Builds a `ResourceSpec` by appending resource kinds in the order they
/// should occupy the composition tuple; arity is the number of calls made,
/// order is insertion order.
#[derive(Clone, Debug, Default)]
pub struct ResourceFactory {
    kinds: Vec<ResourceKindTag>,
    cost_component: Option<usize>,
}

impl ResourceFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_additive_resource(&mut self, is_cost_component: bool) -> usize {
        self.add_kind(ResourceKindTag::Additive, is_cost_component)
    }

    pub fn add_time_window_resource(&mut self) -> usize {
        self.add_kind(ResourceKindTag::TimeWindow, false)
    }

    pub fn add_ng_set_resource(&mut self) -> usize {
        self.add_kind(ResourceKindTag::NgSet, false)
    }

    fn add_kind(&mut self, tag: ResourceKindTag, is_cost_component: bool) -> usize {
        let index = self.kinds.len();
        self.kinds.push(tag);
        if is_cost_component {
            self.cost_component = Some(index);
        }
        index
    }

    pub fn build(self) -> Rc<ResourceSpec> {
        Rc::new(ResourceSpec {
            kinds: self.kinds,
            cost_component: self.cost_component,
        })
    }
}
