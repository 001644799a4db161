use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ShapeError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error("Shape mismatch at {path}: {reason}")]
    ShapeMismatch { path: String, reason: String },
}

pub fn new_shape_mismatch(path: impl Into<String>, reason: impl Into<String>) -> ShapeError {
    ShapeError::ShapeMismatch {
        path: path.into(),
        reason: reason.into(),
    }
}
