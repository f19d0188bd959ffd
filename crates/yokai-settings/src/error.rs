use thiserror::Error;
use yokai_state::StorageError;

/// Errors of the settings layer.
///
/// Validation failures are not errors, they are reported as
/// [`ValidationResult::Failure`](crate::validation::ValidationResult::Failure).
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A field could not be read or written.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A background validation task panicked.
    #[error("Validation task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
