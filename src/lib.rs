//! Label-setting engine for the resource-constrained shortest path problem.
//!
//! A [`Graph`](graph::Graph) of typed resource-carrying nodes and arcs is
//! solved by [`algorithm::Solver`], which propagates
//! [`label::Label`](label::Label)s under a pluggable
//! [`algorithm::SchedulerVariant`] while pruning with Pareto dominance
//! ([`dominance::DominanceSets`]). Paths are recovered after the fact via
//! [`solution::reconstruct_path`] rather than by walking predecessor
//! pointers stored on labels.

pub mod algorithm;
pub mod dominance;
pub mod error;
pub mod graph;
pub mod label;
pub mod pool;
pub mod preprocessor;
pub mod resource;
pub mod scheduler;
pub mod solution;

pub use algorithm::{AlgorithmParams, SchedulerVariant, Solver};
pub use error::{NegativeCycleError, ReconstructionError, RcsppError};
pub use graph::{Arc, DualRow, Graph, Node};
pub use label::Label;
pub use resource::{ArcPayload, NodeBound, ResourceFactory, ResourceKindTag, ResourceSpec};
pub use solution::Solution;
