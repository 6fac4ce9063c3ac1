use std::collections::HashSet;

use thiserror::Error;

use super::engine::{Actor, Feature};

/// One unsatisfied wiring constraint. Validation collects every issue it
/// finds instead of stopping at the first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphIssue {
    #[error("feature '{feature}' depends on '{dependency}', which is not declared earlier in the feature list")]
    UnmetDependency { feature: String, dependency: String },
    #[error("duplicate feature label '{label}'")]
    DuplicateLabel { label: String },
    #[error("actor '{actor}' expects value '{label}', which no feature provides")]
    UnmetExpectation { actor: String, label: String },
}

#[derive(Debug, Error)]
#[error("invalid pipeline graph: {}", .issues.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
pub struct GraphError {
    pub issues: Vec<GraphIssue>,
}

pub(super) struct FeatureCheck {
    pub issues: Vec<GraphIssue>,
    pub needs_tracking: bool,
}

/// Single linear scan: a feature may only depend on labels declared strictly
/// earlier in the list. Declaration order is the dependency proof; there is
/// no cycle detection or reordering. Also aggregates the tracking capability
/// requirement across all features.
pub(super) fn check_features(features: &[Box<dyn Feature>]) -> FeatureCheck {
    let mut issues = Vec::new();
    let mut needs_tracking = false;
    let mut seen: HashSet<&str> = HashSet::new();

    for feature in features {
        needs_tracking |= feature.requires_tracking();

        for &dependency in feature.depends_on() {
            if !seen.contains(dependency) {
                issues.push(GraphIssue::UnmetDependency {
                    feature: feature.label().to_string(),
                    dependency: dependency.to_string(),
                });
            }
        }

        if !seen.insert(feature.label()) {
            issues.push(GraphIssue::DuplicateLabel {
                label: feature.label().to_string(),
            });
        }
    }

    FeatureCheck {
        issues,
        needs_tracking,
    }
}

/// Every label an actor expects must be provided by some feature; position in
/// the list is irrelevant. All unmet expectations are reported.
pub(super) fn check_actors(
    actors: &[Box<dyn Actor>],
    features: &[Box<dyn Feature>],
) -> Vec<GraphIssue> {
    let provided: HashSet<&str> = features.iter().map(|f| f.label()).collect();
    let mut issues = Vec::new();

    for actor in actors {
        for &label in actor.expected_labels() {
            if !provided.contains(label) {
                issues.push(GraphIssue::UnmetExpectation {
                    actor: actor.label().to_string(),
                    label: label.to_string(),
                });
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::super::value::{FeatureValues, Value};
    use super::*;
    use crate::capture::Frame;

    struct TestFeature {
        label: &'static str,
        depends_on: &'static [&'static str],
        tracking: bool,
    }

    impl Feature for TestFeature {
        fn label(&self) -> &str {
            self.label
        }

        fn depends_on(&self) -> &[&'static str] {
            self.depends_on
        }

        fn requires_tracking(&self) -> bool {
            self.tracking
        }

        fn compute(&mut self, _frame: &Frame, _upstream: &FeatureValues<'_>) -> Value {
            Value::Series(Vec::new())
        }
    }

    struct TestActor {
        label: &'static str,
        expects: &'static [&'static str],
    }

    impl Actor for TestActor {
        fn label(&self) -> &str {
            self.label
        }

        fn expected_labels(&self) -> &[&'static str] {
            self.expects
        }

        fn supply(&mut self, _label: &str, _value: Value) {}

        fn update(&mut self, _frame: &Frame) {}

        fn stop(&mut self) {}
    }

    fn feature(
        label: &'static str,
        depends_on: &'static [&'static str],
        tracking: bool,
    ) -> Box<dyn Feature> {
        Box::new(TestFeature {
            label,
            depends_on,
            tracking,
        })
    }

    fn actor(label: &'static str, expects: &'static [&'static str]) -> Box<dyn Actor> {
        Box::new(TestActor { label, expects })
    }

    #[test]
    fn ordered_dependencies_are_valid() {
        let features = vec![
            feature("a", &[], false),
            feature("b", &["a"], false),
            feature("c", &["a", "b"], false),
        ];

        let check = check_features(&features);
        assert!(check.issues.is_empty());
    }

    #[test]
    fn forward_reference_names_the_offender() {
        let features = vec![feature("a", &["b"], false), feature("b", &[], false)];

        let check = check_features(&features);
        assert_eq!(
            check.issues,
            vec![GraphIssue::UnmetDependency {
                feature: "a".to_string(),
                dependency: "b".to_string(),
            }]
        );
    }

    #[test]
    fn missing_reference_is_invalid() {
        let features = vec![feature("a", &["ghost"], false)];

        let check = check_features(&features);
        assert_eq!(check.issues.len(), 1);
    }

    #[test]
    fn self_reference_is_invalid() {
        let features = vec![feature("a", &["a"], false)];

        let check = check_features(&features);
        assert_eq!(check.issues.len(), 1);
    }

    #[test]
    fn duplicate_labels_are_reported() {
        let features = vec![feature("a", &[], false), feature("a", &[], false)];

        let check = check_features(&features);
        assert_eq!(
            check.issues,
            vec![GraphIssue::DuplicateLabel {
                label: "a".to_string()
            }]
        );
    }

    #[test]
    fn tracking_requirement_is_or_of_all_features() {
        assert!(!check_features(&[]).needs_tracking);

        let none = vec![feature("a", &[], false), feature("b", &[], false)];
        assert!(!check_features(&none).needs_tracking);

        let one = vec![feature("a", &[], false), feature("b", &[], true)];
        assert!(check_features(&one).needs_tracking);
    }

    #[test]
    fn actor_expectations_match_any_feature_position() {
        let features = vec![feature("a", &[], false), feature("b", &["a"], false)];
        let actors = vec![actor("sink", &["b", "a"])];

        assert!(check_actors(&actors, &features).is_empty());
    }

    #[test]
    fn removing_the_expected_feature_flips_the_result() {
        let features = vec![feature("a", &[], false)];
        let actors = vec![actor("sink", &["a", "gone"])];

        let issues = check_actors(&actors, &features);
        assert_eq!(
            issues,
            vec![GraphIssue::UnmetExpectation {
                actor: "sink".to_string(),
                label: "gone".to_string(),
            }]
        );
    }

    #[test]
    fn all_unmet_expectations_are_accumulated() {
        let features = vec![feature("a", &[], false)];
        let actors = vec![
            actor("first", &["x"]),
            actor("second", &["a", "y", "z"]),
        ];

        let issues = check_actors(&actors, &features);
        assert_eq!(issues.len(), 3);
        assert!(issues.contains(&GraphIssue::UnmetExpectation {
            actor: "first".to_string(),
            label: "x".to_string(),
        }));
        assert!(issues.contains(&GraphIssue::UnmetExpectation {
            actor: "second".to_string(),
            label: "z".to_string(),
        }));
    }
}
