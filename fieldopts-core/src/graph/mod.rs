mod dependency;
mod model;

pub use dependency::{build_dependency_graph, CycleError};
pub use model::DependencyGraph;
