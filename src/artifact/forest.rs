use serde::{Deserialize, Serialize};

use crate::{error::PredictionError, features::FeatureRecord, predictor::Predictor};

/// A node of a regression tree. Split nodes route a row to `left` when
/// `row[feature] <= threshold` and to `right` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f32,
    },
}

/// A single regression tree stored as a flat node array rooted at index 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    /// Checks the tree can be walked from the root to a leaf for any row of `n_features` values.
    ///
    /// Children must point strictly forward, which rules out cycles.
    fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".into());
        }

        for (i, node) in self.nodes.iter().enumerate() {
            match *node {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= n_features {
                        return Err(format!(
                            "node {i}: feature {feature} out of range for {n_features} features"
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {i}: threshold must be finite"));
                    }
                    for child in [left, right] {
                        if child <= i || child >= self.nodes.len() {
                            return Err(format!("node {i}: invalid child index {child}"));
                        }
                    }
                }
                Node::Leaf { value } if !value.is_finite() => {
                    return Err(format!("node {i}: leaf value must be finite"));
                }
                Node::Leaf { .. } => {}
            }
        }

        Ok(())
    }

    /// Walks the tree for the given row.
    fn predict(&self, row: &[f32]) -> Result<f32, PredictionError> {
        let mut idx = 0;

        loop {
            match self.nodes.get(idx) {
                Some(Node::Leaf { value }) => return Ok(*value),
                Some(&Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let x = row.get(feature).ok_or(PredictionError::SizeMismatch {
                        what: "row",
                        got: row.len(),
                        expected: feature + 1,
                    })?;
                    idx = if *x <= threshold { left } else { right };
                }
                None => {
                    return Err(PredictionError::Model(format!(
                        "tree references missing node {idx}"
                    )));
                }
            }
        }
    }
}

/// A random forest regressor: the prediction is the mean over its trees.
#[derive(Debug, Clone)]
pub struct RandomForest {
    n_features: usize,
    trees: Vec<Tree>,
}

impl RandomForest {
    /// Creates a new `RandomForest`.
    ///
    /// # Arguments
    /// * `n_features` - The width of the rows the forest was fitted on.
    /// * `trees` - The fitted trees.
    ///
    /// # Errors
    /// Returns a human-readable string if the forest is empty or any tree is malformed.
    pub fn new(n_features: usize, trees: Vec<Tree>) -> Result<Self, String> {
        if trees.is_empty() {
            return Err("forest must have at least one tree".into());
        }

        for (i, tree) in trees.iter().enumerate() {
            tree.validate(n_features)
                .map_err(|e| format!("tree {i}: {e}"))?;
        }

        Ok(Self { n_features, trees })
    }

    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }

    /// Predicts a single dense row.
    ///
    /// # Errors
    /// Returns a `PredictionError` if the row width doesn't match the forest's.
    pub fn predict_row(&self, row: &[f32]) -> Result<f32, PredictionError> {
        if row.len() != self.n_features {
            return Err(PredictionError::SizeMismatch {
                what: "row",
                got: row.len(),
                expected: self.n_features,
            });
        }

        let mut sum = 0.0;
        for tree in &self.trees {
            sum += tree.predict(row)?;
        }

        Ok(sum / self.trees.len() as f32)
    }
}

impl Predictor for RandomForest {
    fn predict(&self, record: &FeatureRecord) -> Result<f32, PredictionError> {
        self.predict_row(&record.to_row())
    }
}
