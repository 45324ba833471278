mod composition;
mod kind;
mod value;

pub use composition::{Extender, ResourceFactory, ResourceSpec, ResourceTemplate, ResourceTuple};
pub use kind::{ArcPayload, NodeBound, ResourceKindTag};
pub use value::{ResourceValue, DOMINANCE_EPS};
