use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipError {
    #[error("Invalid polygon dataset: {0}")]
    InvalidDataset(String),

    #[error("Feature index {index} out of range (dataset has {num_features} features)")]
    FeatureIndexOutOfRange { index: usize, num_features: usize },

    #[error("Point arrays differ in length: {x_len} x values, {y_len} y values")]
    MismatchedPointArrays { x_len: usize, y_len: usize },
}

impl PipError {
    pub(crate) fn invalid(msg: impl Into<String>) -> PipError {
        PipError::InvalidDataset(msg.into())
    }
}

pub type PipResult<T> = Result<T, PipError>;
