//! Error types for codetree

use thiserror::Error;

pub type OutlineResult<T> = std::result::Result<T, OutlineError>;

#[derive(Debug, Error)]
pub enum OutlineError {
    #[error("{0}")]
    Provider(#[from] ProviderError),

    #[error("{0}")]
    Host(#[from] HostError),

    #[error("{0}")]
    Input(#[from] InputError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failures reported by the external symbol/folding capability providers.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider exists but has not finished initializing (e.g. a
    /// language service still indexing). Worth retrying after a delay.
    #[error("Symbol provider not ready")]
    NotReady,

    #[error("No provider registered for document: {0}")]
    NoProvider(String),

    #[error("Provider request failed: {0}")]
    RequestFailed(String),
}

impl ProviderError {
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotReady)
    }
}

/// Failures surfaced by the host editor control surface or tree widget.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Reveal failed: {0}")]
    RevealFailed(String),

    #[error("Editor command failed: {0}")]
    CommandFailed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Invalid user input, surfaced as inline validation feedback.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Enter a level between 0 and 9")]
    LevelOutOfRange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_ready_is_recoverable() {
        assert!(ProviderError::NotReady.is_recoverable());
    }

    #[test]
    fn test_request_failed_is_not_recoverable() {
        let err = ProviderError::RequestFailed("boom".to_string());
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_outline_error_from_provider() {
        let err: OutlineError = ProviderError::NotReady.into();
        assert!(matches!(err, OutlineError::Provider(_)));
    }
}
