//! Error types, one enum per subsystem, aggregated into [`VeilError`].

mod detection_error;
mod mapping_error;
mod operator_error;

pub use detection_error::DetectionError;
pub use mapping_error::MappingError;
pub use operator_error::OperatorError;

/// Top-level error for every fallible engine operation.
#[derive(Debug, thiserror::Error)]
pub enum VeilError {
    #[error(transparent)]
    Detection(#[from] DetectionError),

    #[error(transparent)]
    Operator(#[from] OperatorError),

    #[error(transparent)]
    Mapping(#[from] MappingError),
}

/// Workspace-wide result alias.
pub type VeilResult<T> = Result<T, VeilError>;
