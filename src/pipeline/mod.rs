mod engine;
mod graph;
mod value;

pub use engine::{Actor, Feature, Pipeline, PipelineBuilder};
pub use graph::{GraphError, GraphIssue};
pub use value::{FeatureValues, Value, ValueCache};
