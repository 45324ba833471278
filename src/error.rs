use thiserror::Error;

/// Error kinds surfaced by the core.
///
/// "Cap reached" and "dead end" are *not* represented here: both are normal
/// termination states encoded as an empty or partial `Vec<Solution>`.
#[derive(Debug, Error)]
pub enum RcsppError {
    #[error("resource payload arity mismatch: expected {expected} components, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    #[error("unknown resource kind index {index} (composition has {arity} components)")]
    UnknownResourceKind { index: usize, arity: usize },

    #[error("resource kind at index {index} does not accept a {payload_kind} payload")]
    KindPayloadMismatch {
        index: usize,
        payload_kind: &'static str,
    },

    #[error("node ordering was not applied before a node-ordered scheduler was used; call Graph::sort_nodes first")]
    NodesNotSorted,

    #[error("unknown node id {0}")]
    UnknownNode(u64),

    #[error("unknown arc id {0}")]
    UnknownArc(u64),

    #[error("dual row references row index {0} with no matching dual value")]
    UnknownDualRow(usize),
}

/// Non-fatal: a reconstruction pass could not find a predecessor label for an
/// intermediate node. Surfaced to the caller rather than panicking; the
/// caller typically logs and treats the path as unavailable.
#[derive(Debug, Error)]
#[error("failed to reconstruct path: no predecessor label found at node {node_id}")]
pub struct ReconstructionError {
    pub node_id: u64,
}

/// Raised by the Bellman-Ford preprocessing helper when the cost coordinate
/// admits a negative-weight cycle reachable from the source set. This is
/// the one error kind the core itself never observes, since preprocessing
/// runs external to the core.
#[derive(Debug, Error)]
#[error("negative-weight cycle detected reachable from the source set")]
pub struct NegativeCycleError;
