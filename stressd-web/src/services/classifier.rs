//! Pre-fitted affective-state classifier
//!
//! Loads a linear multi-class scorer from a JSON artifact at startup:
//! `{"labels": [..], "weights": [[f32; n]; k], "bias": [f32; k]}`.
//! Prediction scores each class against the normalized feature vector and
//! returns the argmax label. Label strings are open-ended data; mapping to
//! display states happens downstream.

use serde::{Deserialize, Serialize};
use std::path::Path;
use stressd_common::{Error, Result};
use tracing::info;

/// Pre-fitted linear classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearClassifier {
    pub labels: Vec<String>,
    pub weights: Vec<Vec<f32>>,
    pub bias: Vec<f32>,
}

impl LinearClassifier {
    /// Load and validate the classifier artifact
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read model artifact {}: {}",
                path.display(),
                e
            ))
        })?;
        let model: LinearClassifier = serde_json::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse model artifact {}: {}",
                path.display(),
                e
            ))
        })?;
        model.validate()?;
        info!(
            path = %path.display(),
            classes = model.labels.len(),
            input_dimension = model.input_dimension(),
            "Loaded classifier artifact"
        );
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        if self.labels.is_empty() {
            return Err(Error::Config("Model artifact has no classes".to_string()));
        }
        if self.weights.len() != self.labels.len() {
            return Err(Error::Config(format!(
                "Model has {} weight rows for {} labels",
                self.weights.len(),
                self.labels.len()
            )));
        }
        if self.bias.len() != self.labels.len() {
            return Err(Error::Config(format!(
                "Model has {} bias entries for {} labels",
                self.bias.len(),
                self.labels.len()
            )));
        }
        let dim = self.weights[0].len();
        if dim == 0 {
            return Err(Error::Config("Model weight rows are empty".to_string()));
        }
        if self.weights.iter().any(|row| row.len() != dim) {
            return Err(Error::Config(
                "Model weight rows have inconsistent lengths".to_string(),
            ));
        }
        Ok(())
    }

    /// Fitted input dimensionality
    pub fn input_dimension(&self) -> usize {
        self.weights[0].len()
    }

    /// Score each class and return the argmax label.
    ///
    /// Fails loudly when the vector's dimensionality disagrees with the
    /// fitted dimensionality.
    pub fn predict(&self, features: &[f32]) -> Result<&str> {
        if features.len() != self.input_dimension() {
            return Err(Error::Model(format!(
                "Feature vector has {} dimensions but model was fitted on {}",
                features.len(),
                self.input_dimension()
            )));
        }

        let mut best = 0usize;
        let mut best_score = f32::NEG_INFINITY;
        for (i, (row, &b)) in self.weights.iter().zip(self.bias.iter()).enumerate() {
            let score: f32 = row.iter().zip(features.iter()).map(|(&w, &x)| w * x).sum::<f32>() + b;
            if score > best_score {
                best = i;
                best_score = score;
            }
        }
        Ok(&self.labels[best])
    }
}
