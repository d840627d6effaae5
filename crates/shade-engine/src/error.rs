//! # Engine Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │     Startup     │  │    Mutation     │  │      Dispatch           │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Wiring         │  │  Rejected       │  │  Handler, Core          │ │
//! │  │  StartingData   │  │  (state is left │  │  (aborts the rest of    │ │
//! │  │  InvalidConfig  │  │   untouched)    │  │   the publish)          │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use shade_core::CoreError;
use thiserror::Error;

use crate::events::Topic;

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    // =========================================================================
    // Startup Errors
    // =========================================================================
    /// A collaborator is missing or wired twice.
    #[error("Wiring error: {0}")]
    Wiring(String),

    /// Externally supplied starting data is unusable.
    #[error("Invalid starting data: {0}")]
    StartingData(String),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    // =========================================================================
    // Runtime Errors
    // =========================================================================
    /// The store refused a mutation before committing it; the state did
    /// not change and nothing was published.
    #[error("{mutation} rejected: {source}")]
    Rejected {
        mutation: &'static str,
        #[source]
        source: CoreError,
    },

    /// A domain error raised outside the store's validation step, such as
    /// by a subscriber while a committed change is being announced.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A subscriber failed while handling an event.
    #[error("Handler for {topic} failed: {message}")]
    Handler { topic: Topic, message: String },
}

impl EngineError {
    /// Rejected mutations are expected during normal use and can be absorbed
    /// by whoever triggered them from a user event. Only [`EngineError::Rejected`]
    /// qualifies: a `Core` error from a subscriber means a committed change
    /// was only partly announced.
    pub fn is_rejected_mutation(&self) -> bool {
        matches!(self, EngineError::Rejected { .. })
    }

    /// Re-labels a rejection raised while a committed change was being
    /// announced. The change already happened, so the caller must see a
    /// dispatch failure rather than something it may absorb.
    pub(crate) fn after_commit(self, topic: Topic) -> Self {
        if self.is_rejected_mutation() {
            EngineError::Handler {
                topic,
                message: self.to_string(),
            }
        } else {
            self
        }
    }

    /// The domain error behind a rejection or a domain failure.
    pub fn core_error(&self) -> Option<&CoreError> {
        match self {
            EngineError::Rejected { source, .. } | EngineError::Core(source) => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_names_mutation() {
        let err = EngineError::Rejected {
            mutation: "delete_row",
            source: CoreError::LastRow,
        };
        assert_eq!(err.to_string(), "delete_row rejected: Cannot delete the last row of a table");
        assert!(err.is_rejected_mutation());
        assert!(matches!(err.core_error(), Some(CoreError::LastRow)));
    }

    #[test]
    fn test_core_error_is_not_a_rejection() {
        let err: EngineError = CoreError::LastRow.into();
        assert_eq!(err.to_string(), "Cannot delete the last row of a table");
        assert!(!err.is_rejected_mutation());
    }

    #[test]
    fn test_rejection_after_commit_becomes_handler_error() {
        let nested = EngineError::Rejected {
            mutation: "set_target_cell",
            source: CoreError::NoTargetCell,
        };
        let err = nested.after_commit(Topic::StateChanged);
        assert!(matches!(err, EngineError::Handler { topic: Topic::StateChanged, .. }));
        assert!(!err.is_rejected_mutation());

        let core: EngineError = CoreError::LastRow.into();
        assert!(matches!(core.after_commit(Topic::StateChanged), EngineError::Core(CoreError::LastRow)));
    }

    #[test]
    fn test_handler_error_names_topic() {
        let err = EngineError::Handler {
            topic: Topic::StateChanged,
            message: "surface detached".to_string(),
        };
        assert_eq!(err.to_string(), "Handler for StateChanged failed: surface detached");
        assert!(!err.is_rejected_mutation());
    }
}
