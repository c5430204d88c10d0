//! Pre-fitted feature normalization
//!
//! Loads a per-feature center/scale transform from a JSON artifact at
//! startup and applies it unchanged for the process lifetime. The artifact
//! shape is `{"mean": [f32; n], "scale": [f32; n]}`.

use serde::{Deserialize, Serialize};
use std::path::Path;
use stressd_common::{Error, Result};
use tracing::info;

/// Pre-fitted standard scaler (per-feature center and scale)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f32>,
    pub scale: Vec<f32>,
}

impl StandardScaler {
    /// Load and validate the scaler artifact
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read scaler artifact {}: {}",
                path.display(),
                e
            ))
        })?;
        let scaler: StandardScaler = serde_json::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse scaler artifact {}: {}",
                path.display(),
                e
            ))
        })?;
        scaler.validate()?;
        info!(
            path = %path.display(),
            dimension = scaler.dimension(),
            "Loaded scaler artifact"
        );
        Ok(scaler)
    }

    fn validate(&self) -> Result<()> {
        if self.mean.is_empty() {
            return Err(Error::Config("Scaler artifact is empty".to_string()));
        }
        if self.mean.len() != self.scale.len() {
            return Err(Error::Config(format!(
                "Scaler mean/scale length mismatch: {} vs {}",
                self.mean.len(),
                self.scale.len()
            )));
        }
        if self.scale.iter().any(|&s| s == 0.0 || !s.is_finite()) {
            return Err(Error::Config(
                "Scaler contains zero or non-finite scale entries".to_string(),
            ));
        }
        Ok(())
    }

    /// Fitted feature dimensionality
    pub fn dimension(&self) -> usize {
        self.mean.len()
    }

    /// Apply the transform to one feature vector.
    ///
    /// Fails loudly when the vector's dimensionality disagrees with the
    /// fitted dimensionality.
    pub fn transform(&self, features: &[f32]) -> Result<Vec<f32>> {
        if features.len() != self.dimension() {
            return Err(Error::Model(format!(
                "Feature vector has {} dimensions but scaler was fitted on {}",
                features.len(),
                self.dimension()
            )));
        }
        Ok(features
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(&x, (&m, &s))| (x - m) / s)
            .collect())
    }
}
