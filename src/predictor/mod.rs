pub mod catalog;
pub mod features;
pub mod model;

pub use catalog::{City, Team};
pub use features::{MatchFeatures, MatchState};
pub use model::{LogisticPipeline, ModelError, Probabilities, WinPredictor};

/// Rejected match-state input. These are values the form controls never
/// produce, so they only show up from hand-crafted requests.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum InputError {
    #[error("unknown team: {0}")]
    UnknownTeam(String),
    #[error("unknown city: {0}")]
    UnknownCity(String),
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        value: i64,
    },
    #[error("{field} must be a whole number, got {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}
