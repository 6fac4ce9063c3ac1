use std::collections::HashMap;

use serde::Serialize;

/// A feature's computed value for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Scalar(f32),
    /// Ordered series, one entry per detected object in detection order.
    Series(Vec<f32>),
}

impl Value {
    pub fn as_scalar(&self) -> Option<f32> {
        match self {
            Value::Scalar(v) => Some(*v),
            Value::Series(_) => None,
        }
    }

    pub fn as_series(&self) -> Option<&[f32]> {
        match self {
            Value::Series(v) => Some(v),
            Value::Scalar(_) => None,
        }
    }
}

/// Label-keyed store of the values supplied to an actor during the current
/// compute pass. The key set is fixed by validation at construction, so a
/// missing entry at read time is a programming error, not a runtime condition.
#[derive(Debug, Default)]
pub struct ValueCache {
    values: HashMap<String, Value>,
}

impl ValueCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: &str, value: Value) {
        self.values.insert(label.to_string(), value);
    }

    pub fn get(&self, label: &str) -> Option<&Value> {
        self.values.get(label)
    }

    /// Contract-checked lookup. Panics when the label was never supplied,
    /// naming the actor so the broken wiring is identifiable.
    pub fn demand(&self, actor: &str, label: &str) -> &Value {
        match self.values.get(label) {
            Some(value) => value,
            None => panic!("actor '{actor}' is missing its expected value '{label}'"),
        }
    }
}

/// Read view over the values of features that ran earlier in the current
/// pass. Features reach their dependencies through this view only.
pub struct FeatureValues<'a> {
    index: &'a HashMap<String, usize>,
    values: &'a [Option<Value>],
    /// Features at or past this position have not run yet this pass.
    limit: usize,
}

impl<'a> FeatureValues<'a> {
    pub(crate) fn new(
        index: &'a HashMap<String, usize>,
        values: &'a [Option<Value>],
        limit: usize,
    ) -> Self {
        Self {
            index,
            values,
            limit,
        }
    }

    pub fn get(&self, label: &str) -> Option<&Value> {
        let &position = self.index.get(label)?;
        if position >= self.limit {
            return None;
        }
        self.values[position].as_ref()
    }

    /// Contract-checked dependency lookup; declared dependencies are always
    /// present once validation has passed.
    pub fn demand(&self, feature: &str, dependency: &str) -> &Value {
        match self.get(dependency) {
            Some(value) => value,
            None => panic!("feature '{feature}' is missing its dependency '{dependency}'"),
        }
    }
}
