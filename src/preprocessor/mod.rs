pub mod bellman_ford;
pub mod connectivity;

use crate::graph::Graph;

/// A pass that inspects (and optionally narrows) a graph before the
/// label-setting core runs over it. Preprocessors never touch labels or
/// resources; they work purely off arc costs and topology, ahead of and
/// separate from the main algorithm.
pub trait Preprocessor {
    type Output;
    type Error;

    fn run(&self, graph: &Graph) -> Result<Self::Output, Self::Error>;
}
