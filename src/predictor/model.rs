//! Win-probability model loaded from a serialized pipeline artifact.
//!
//! The artifact describes a one-hot logistic regression: each categorical
//! column maps its known categories to a weight (the dropped reference
//! category carries 0), each numeric column has a single coefficient, and
//! the win probability is `sigmoid(intercept + Σ weights)`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::MatchFeatures;

/// Categorical columns the pipeline one-hot encodes.
pub const CATEGORICAL_COLUMNS: [&str; 3] = ["batting_team", "bowling_team", "city"];

/// Numeric columns the pipeline passes through.
pub const NUMERIC_COLUMNS: [&str; 6] = [
    "runs_left",
    "balls_left",
    "wickets_left",
    "total_runs_x",
    "crr",
    "rr",
];

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed model artifact: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("model artifact has no weights for column {0}")]
    MissingFeature(String),
    #[error("model artifact has unexpected column {0}")]
    UnexpectedColumn(String),
    #[error("model weight for {0} is not finite")]
    InvalidWeight(String),
    #[error("category {value:?} was not seen in training for column {column}")]
    UnknownCategory { column: String, value: String },
    #[error("model produced a non-finite score")]
    NonFinite,
}

/// Two-class output of the model: `loss` is the batting side losing, `win`
/// the batting side winning. They sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Probabilities {
    pub loss: f64,
    pub win: f64,
}

impl Probabilities {
    pub fn from_win(win: f64) -> Self {
        Probabilities {
            loss: 1.0 - win,
            win,
        }
    }

    /// Batting side's chance as a whole percentage.
    pub fn win_percent(&self) -> i64 {
        round_percent(self.win)
    }

    /// Bowling side's chance as a whole percentage.
    pub fn loss_percent(&self) -> i64 {
        round_percent(self.loss)
    }
}

/// `p × 100` rounded to the nearest integer, ties to even.
pub fn round_percent(p: f64) -> i64 {
    (p * 100.0).round_ties_even() as i64
}

/// Metadata surfaced by `/api/model`.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub name: String,
    pub trained_at: Option<DateTime<Utc>>,
    pub categorical_columns: Vec<String>,
    pub numeric_columns: Vec<String>,
}

/// Anything that can score a match state.
pub trait WinPredictor: Send + Sync {
    fn predict_proba(&self, features: &MatchFeatures) -> Result<Probabilities, ModelError>;

    fn info(&self) -> ModelInfo;
}

/// On-disk layout of the artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    pub name: String,
    #[serde(default)]
    pub trained_at: Option<DateTime<Utc>>,
    pub intercept: f64,
    pub categorical: BTreeMap<String, BTreeMap<String, f64>>,
    pub numeric: BTreeMap<String, f64>,
}

/// Logistic regression over one-hot categorical and raw numeric columns.
#[derive(Debug, Clone)]
pub struct LogisticPipeline {
    artifact: Artifact,
}

impl LogisticPipeline {
    /// Read and validate the artifact at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: Artifact = serde_json::from_str(&raw)?;
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: Artifact) -> Result<Self, ModelError> {
        if !artifact.intercept.is_finite() {
            return Err(ModelError::InvalidWeight("intercept".into()));
        }

        for column in CATEGORICAL_COLUMNS {
            let table = artifact
                .categorical
                .get(column)
                .ok_or_else(|| ModelError::MissingFeature(column.into()))?;
            if let Some((category, _)) = table.iter().find(|(_, w)| !w.is_finite()) {
                return Err(ModelError::InvalidWeight(format!("{column}={category}")));
            }
        }
        for column in NUMERIC_COLUMNS {
            let weight = artifact
                .numeric
                .get(column)
                .ok_or_else(|| ModelError::MissingFeature(column.into()))?;
            if !weight.is_finite() {
                return Err(ModelError::InvalidWeight(column.into()));
            }
        }

        let unexpected = artifact
            .categorical
            .keys()
            .find(|c| !CATEGORICAL_COLUMNS.contains(&c.as_str()))
            .or_else(|| {
                artifact
                    .numeric
                    .keys()
                    .find(|c| !NUMERIC_COLUMNS.contains(&c.as_str()))
            });
        if let Some(column) = unexpected {
            return Err(ModelError::UnexpectedColumn(column.clone()));
        }

        Ok(LogisticPipeline { artifact })
    }

    /// Linear score before the sigmoid.
    fn logit(&self, features: &MatchFeatures) -> Result<f64, ModelError> {
        let mut z = self.artifact.intercept;

        for (column, table) in &self.artifact.categorical {
            let value = features
                .categorical(column)
                .ok_or_else(|| ModelError::MissingFeature(column.clone()))?;
            let weight = table.get(value).ok_or_else(|| ModelError::UnknownCategory {
                column: column.clone(),
                value: value.to_string(),
            })?;
            z += weight;
        }

        for (column, weight) in &self.artifact.numeric {
            let value = features
                .numeric(column)
                .ok_or_else(|| ModelError::MissingFeature(column.clone()))?;
            z += weight * value;
        }

        Ok(z)
    }
}

impl WinPredictor for LogisticPipeline {
    fn predict_proba(&self, features: &MatchFeatures) -> Result<Probabilities, ModelError> {
        let z = self.logit(features)?;
        if !z.is_finite() {
            return Err(ModelError::NonFinite);
        }
        Ok(Probabilities::from_win(sigmoid(z)))
    }

    fn info(&self) -> ModelInfo {
        ModelInfo {
            name: self.artifact.name.clone(),
            trained_at: self.artifact.trained_at,
            categorical_columns: self.artifact.categorical.keys().cloned().collect(),
            numeric_columns: self.artifact.numeric.keys().cloned().collect(),
        }
    }
}

fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        let z = (-x).exp();
        1.0 / (1.0 + z)
    } else {
        let z = x.exp();
        z / (1.0 + z)
    }
}
