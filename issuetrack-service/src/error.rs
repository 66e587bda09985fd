//! The domain error taxonomy.
//!
//! One immutable enum; whatever payload a failure carries (the field ->
//! message map of a validation failure) travels with the instance, never
//! through shared state. Store-level errors are translated at the service
//! boundary into exactly these kinds; anything unclassified propagates
//! opaquely through `Internal` and is treated as a fault by the transport.

use issuetrack_shared::store::StoreError;
use issuetrack_shared::validate::{ValidationErrors, Validator};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("not found")]
    NotFound,

    /// Every violation found for the candidate entity, keyed by field.
    #[error("failed validation: {0}")]
    FailedValidation(ValidationErrors),

    /// The record changed underneath the caller; re-fetch and resubmit.
    #[error("edit conflict")]
    EditConflict,

    #[error("invalid credentials")]
    InvalidCredentials,

    /// The assignment candidate does not hold the required role.
    #[error("invalid role")]
    InvalidRole,

    /// The acting user may not perform this operation on this record.
    #[error("not permitted")]
    NotPermitted,

    #[error("already activated")]
    AlreadyActivated,

    /// The caller's deadline elapsed; benign, not a failure.
    #[error("operation canceled")]
    Canceled,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    pub(crate) fn failed_validation(v: Validator) -> Self {
        ServiceError::FailedValidation(v.into_errors())
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ServiceError::NotFound,
            StoreError::EditConflict => ServiceError::EditConflict,
            StoreError::Canceled => ServiceError::Canceled,
            // Call sites that can legitimately hit a uniqueness violation
            // match on DuplicateKey before converting; reaching this arm
            // means the store misbehaved.
            StoreError::DuplicateKey => {
                ServiceError::Internal(anyhow::anyhow!("unexpected duplicate key from store"))
            }
            StoreError::Other(err) => ServiceError::Internal(err),
        }
    }
}
