//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_scenes::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine driver
pub use crate::engine::{Engine, EngineBuilder, RunOutcome, RunReport};

// Scene system
pub use crate::core::scene::{
    CriticalError, CriticalSignal, Scene, SceneDescriptor, SceneId, SceneManager,
    SceneManagerConfig, SceneRegistry, SceneRequest, Transition,
};

// Errors
pub use crate::core::SceneError;
