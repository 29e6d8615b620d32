//! HAL error taxonomy and the host-facing status codes.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HalError {
    #[error("Bad value: {0}")]
    BadValue(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Status codes of the host vibrator interface. Everything the driver
/// reports folds into one of these four values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    BadValue,
    UnsupportedOperation,
    UnknownError,
}

impl HalError {
    /// Wire status corresponding to this error.
    pub fn status(&self) -> Status {
        match self {
            HalError::BadValue(_) => Status::BadValue,
            HalError::Unsupported(_) => Status::UnsupportedOperation,
            HalError::Io(_) => Status::UnknownError,
        }
    }
}

impl<T> From<&Result<T, HalError>> for Status {
    fn from(result: &Result<T, HalError>) -> Self {
        match result {
            Ok(_) => Status::Ok,
            Err(e) => e.status(),
        }
    }
}
