use std::collections::HashMap;

use crate::capture::Frame;

use super::graph::{self, GraphError};
use super::value::{FeatureValues, Value};

/// A named per-frame computation. Dependencies are declared by label and must
/// appear earlier in the pipeline's feature list; their finalized values are
/// reachable through the upstream view, never by direct feature-to-feature
/// calls.
pub trait Feature: Send {
    fn label(&self) -> &str;

    fn depends_on(&self) -> &[&'static str] {
        &[]
    }

    /// Whether this feature needs the capture device's object-tracking
    /// capability.
    fn requires_tracking(&self) -> bool {
        false
    }

    fn compute(&mut self, frame: &Frame, upstream: &FeatureValues<'_>) -> Value;
}

/// A named consumer of feature values. The pipeline supplies every expected
/// value during the compute phase, then calls `update` once per frame.
pub trait Actor: Send {
    fn label(&self) -> &str;

    fn expected_labels(&self) -> &[&'static str];

    fn supply(&mut self, label: &str, value: Value);

    fn update(&mut self, frame: &Frame);

    /// Release held resources. Called exactly once, after the run loop has
    /// exited; must be idempotent.
    fn stop(&mut self);
}

/// Orchestrates one compute pass per frame: features in declared order, then
/// actors. Built through [`PipelineBuilder`], which validates the dependency
/// graph once; a constructed pipeline cannot be invalid.
pub struct Pipeline {
    features: Vec<Box<dyn Feature>>,
    labels: Vec<String>,
    values: Vec<Option<Value>>,
    index: HashMap<String, usize>,
    actors: Vec<Box<dyn Actor>>,
    needs_tracking: bool,
    stopped: bool,
}

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Aggregated over all features at validation time.
    pub fn needs_tracking(&self) -> bool {
        self.needs_tracking
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    /// The most recently computed value for a feature label.
    pub fn last_value(&self, label: &str) -> Option<&Value> {
        let &position = self.index.get(label)?;
        self.values[position].as_ref()
    }

    /// One full compute pass. All feature values are finalized before any
    /// actor observes them.
    pub fn on_frame(&mut self, frame: &Frame) {
        tracing::trace!(
            sequence = frame.sequence,
            objects = frame.objects.len(),
            "compute pass"
        );

        for position in 0..self.features.len() {
            let upstream = FeatureValues::new(&self.index, &self.values, position);
            let value = self.features[position].compute(frame, &upstream);

            let label = self.labels[position].as_str();
            for actor in &mut self.actors {
                if actor.expected_labels().iter().any(|&l| l == label) {
                    actor.supply(label, value.clone());
                }
            }

            self.values[position] = Some(value);
        }

        for actor in &mut self.actors {
            actor.update(frame);
        }
    }

    /// Stop every actor in registration order. Safe to call more than once;
    /// only the first call reaches the actors.
    pub fn shutdown(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;

        for actor in &mut self.actors {
            tracing::debug!(actor = %actor.label(), "stopping actor");
            actor.stop();
        }
    }
}

#[derive(Default)]
pub struct PipelineBuilder {
    features: Vec<Box<dyn Feature>>,
    actors: Vec<Box<dyn Actor>>,
}

impl PipelineBuilder {
    /// Features run in the order they are added; that order is the
    /// dependency contract.
    pub fn feature(mut self, feature: impl Feature + 'static) -> Self {
        self.features.push(Box::new(feature));
        self
    }

    pub fn actor(mut self, actor: impl Actor + 'static) -> Self {
        self.actors.push(Box::new(actor));
        self
    }

    /// Validate the graph and assemble the pipeline. Every unsatisfied
    /// constraint is collected and reported; any single one is fatal.
    pub fn build(self) -> Result<Pipeline, GraphError> {
        let mut check = graph::check_features(&self.features);
        check
            .issues
            .extend(graph::check_actors(&self.actors, &self.features));

        if !check.issues.is_empty() {
            for issue in &check.issues {
                tracing::error!(%issue, "pipeline graph check failed");
            }
            return Err(GraphError {
                issues: check.issues,
            });
        }

        let labels: Vec<String> = self.features.iter().map(|f| f.label().to_string()).collect();
        let index: HashMap<String, usize> = labels
            .iter()
            .enumerate()
            .map(|(position, label)| (label.clone(), position))
            .collect();
        let values = vec![None; self.features.len()];

        Ok(Pipeline {
            features: self.features,
            labels,
            values,
            index,
            actors: self.actors,
            needs_tracking: check.needs_tracking,
            stopped: false,
        })
    }
}
