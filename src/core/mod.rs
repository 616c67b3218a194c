//=========================================================================
// Core Systems
//
// Scene lifecycle management and its error taxonomy.
//
// Responsibilities:
// - Validate the host-supplied scene registry
// - Maintain the stack of live scenes and their owned data
// - Interpret scene requests (push / pop) and recover from failed resumes
// - Unwind deterministically on terminate or critical signal
//
// Notes:
// Everything here is single-threaded and synchronous. The host drives
// the manager one execute_top() call per frame; no work happens between
// calls.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod scene;

mod error;

//=== Public API ==========================================================

pub use error::SceneError;
pub use scene::{
    CriticalError, CriticalSignal, HookMismatch, Scene, SceneDescriptor, SceneId, SceneManager,
    SceneManagerConfig, SceneRegistry, SceneRequest, Transition,
};
