//=========================================================================
// Scene Errors
//=========================================================================
//
// Failure taxonomy of the scene manager.
//
// Classes:
//   configuration  → registry / initial id rejected at initialize()
//   exhaustion     → stack growth refused, push rolled back
//   scene failures → initialize() returned nothing, invalid request
//   misuse         → operation against the wrong manager state
//   critical       → a scene forced full shutdown
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::scene::{CriticalError, SceneId};

//=== SceneError ==========================================================

/// Errors reported by [`SceneManager`](crate::core::scene::SceneManager)
/// operations.
///
/// Only configuration errors, invalid execute results and critical
/// shutdowns are faults (see [`SceneError::is_fault`]). The rest describe
/// a request that was absorbed without damaging the stack.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// The registry holds no scenes.
    #[error("scene registry is empty")]
    EmptyRegistry,

    /// The initial scene id does not index the registry.
    #[error("initial scene {id} is out of range (registry holds {count} scenes)")]
    InitialSceneOutOfRange { id: SceneId, count: usize },

    /// A descriptor lacks one of its required lifecycle hooks.
    #[error("scene {id} ('{name}') has no {operation} hook")]
    MissingOperation {
        id: SceneId,
        name: String,
        operation: &'static str,
    },

    /// A hook of a descriptor expects state of another type than its
    /// initialize hook produces.
    #[error("scene {id} ('{name}') {operation} hook takes {found}, not {expected}")]
    HookTypeMismatch {
        id: SceneId,
        name: String,
        operation: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// The manager has not been initialized.
    #[error("scene manager is not initialized")]
    NotInitialized,

    /// The scene stack holds no scenes.
    #[error("scene stack is empty")]
    EmptyStack,

    /// The stack could not grow by one slot.
    #[error("scene stack cannot grow past depth {depth}")]
    StackExhausted { depth: usize },

    /// A scene's initialize hook returned no data.
    #[error("scene {id} failed to initialize")]
    SceneInitFailed { id: SceneId },

    /// A scene's execute hook returned neither a pop nor a valid push.
    #[error("scene {id} returned an invalid request")]
    InvalidExecuteResult { id: SceneId },

    /// A scene raised the critical signal and the stack was unwound.
    #[error("critical scene error: {0}")]
    CriticalShutdown(CriticalError),
}

impl SceneError {
    /// Returns true for errors that reject the registry or initial id.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::EmptyRegistry
                | Self::InitialSceneOutOfRange { .. }
                | Self::MissingOperation { .. }
                | Self::HookTypeMismatch { .. }
        )
    }

    /// Returns true for errors after which the host should stop driving
    /// the manager.
    ///
    /// Benign failures (empty stack, uninitialized manager, a refused
    /// non-initial push) leave the manager in a consistent state.
    pub fn is_fault(&self) -> bool {
        self.is_configuration()
            || matches!(self, Self::InvalidExecuteResult { .. } | Self::CriticalShutdown(_))
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_are_faults() {
        let errors = [
            SceneError::EmptyRegistry,
            SceneError::InitialSceneOutOfRange { id: 3, count: 2 },
            SceneError::MissingOperation {
                id: 0,
                name: "menu".into(),
                operation: "execute",
            },
            SceneError::HookTypeMismatch {
                id: 1,
                name: "menu".into(),
                operation: "terminate",
                expected: "u32",
                found: "u64",
            },
        ];

        for error in errors {
            assert!(error.is_configuration(), "{error}");
            assert!(error.is_fault(), "{error}");
        }
    }

    #[test]
    fn absorbed_failures_are_not_faults() {
        let errors = [
            SceneError::NotInitialized,
            SceneError::EmptyStack,
            SceneError::StackExhausted { depth: 4 },
            SceneError::SceneInitFailed { id: 1 },
        ];

        for error in errors {
            assert!(!error.is_configuration(), "{error}");
            assert!(!error.is_fault(), "{error}");
        }
    }

    #[test]
    fn execution_faults() {
        assert!(SceneError::InvalidExecuteResult { id: 0 }.is_fault());
        assert!(SceneError::CriticalShutdown(CriticalError::new(1, None)).is_fault());
    }

    #[test]
    fn display_names_the_missing_hook() {
        let error = SceneError::MissingOperation {
            id: 2,
            name: "pause".into(),
            operation: "terminate",
        };
        assert_eq!(error.to_string(), "scene 2 ('pause') has no terminate hook");
    }
}
