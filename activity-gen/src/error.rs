use std::io;

use rand::distributions::WeightedError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("I/O Error")]
    IoError(#[from] io::Error),
    #[error("JSON Error")]
    JsonError(#[from] serde_json::Error),
    #[error("The activity catalog is empty")]
    EmptyCatalog,
    #[error("Expected {expected} weights, one per activity, but got {actual}")]
    WeightCountMismatch { expected: usize, actual: usize },
    #[error("Weight at position {index} is negative or not a finite number: {weight}")]
    InvalidWeight { index: usize, weight: f64 },
    #[error("Weights must sum to 1, but they sum to {sum}")]
    WeightsNotNormalized { sum: f64 },
    #[error("Category `{0}` is declared more than once")]
    DuplicateCategory(String),
    #[error("Activity `{activity}` refers to unknown category `{category_id}`")]
    UnknownCategory {
        activity: String,
        category_id: String,
    },
    #[error("Activity `{activity}` is not listed in category `{category_id}`")]
    UnlistedActivity {
        activity: String,
        category_id: String,
    },
    #[error("Activity `{0}` has no category, which the composite schema requires")]
    Uncategorized(String),
    #[error("Invalid sampling distribution")]
    Distribution(#[from] WeightedError),
}
