use thiserror::Error;

use super::ports::BackendError;
use super::value_objects::ValueObjectError;

#[derive(Debug, Error)]
pub enum DraftError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Backend error: {0}")]
  Backend(#[from] BackendError),
}
