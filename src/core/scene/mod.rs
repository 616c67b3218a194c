//=========================================================================
// Scene System
//=========================================================================
//
// Stack-based scene lifecycle management.
//
// Architecture:
//   SceneManager<'r>
//     ├─ registry: Option<&'r SceneRegistry>   (None = uninitialized)
//     ├─ stack: SceneStack                     (id + owned data per slot)
//     └─ signals: SignalChannel                (critical shutdown)
//
// Flow:
//   initialize() → push(initial)
//   execute_top() → Scene::execute() → Pop  → pop + resume cascade
//                                    → Push → push
//   terminate() → pop every scene
//
//=========================================================================

//=== Module Declarations =================================================

mod descriptor;
mod registry;
mod request;
mod scene_manager;
mod signal;
mod stack;

#[cfg(test)]
mod testing;

//=== Public API ==========================================================

pub use descriptor::{HookMismatch, SceneData, SceneDescriptor};
pub use registry::SceneRegistry;
pub use request::{SceneRequest, POP_REQUEST};
pub use scene_manager::{SceneManager, SceneManagerConfig, Transition};
pub use signal::{CriticalError, CriticalSignal};

pub(crate) use signal::SignalChannel;

//=== Scene Id ============================================================

/// Identifier of a scene: its index in the [`SceneRegistry`].
pub type SceneId = usize;

//=== Scene Trait =========================================================

/// Typed scene behavior with lifecycle hooks.
///
/// The implementing type is the scene's private state: `initialize`
/// creates it, the manager owns it while the scene is on the stack, and
/// `terminate` consumes it. Register with [`SceneDescriptor::of`].
///
/// # Minimal Implementation
///
/// Only `initialize()` and `execute()` are required:
///
/// ```rust
/// # use aetheric_scenes::prelude::*;
/// struct Splash {
///     frames: u32,
/// }
///
/// impl Scene for Splash {
///     fn initialize(_signal: &CriticalSignal) -> Option<Self> {
///         Some(Splash { frames: 0 })
///     }
///
///     fn execute(&mut self, _signal: &CriticalSignal) -> SceneRequest {
///         self.frames += 1;
///         SceneRequest::Pop
///     }
/// }
///
/// let registry = SceneRegistry::new().with_scene(SceneDescriptor::of::<Splash>("splash"));
/// assert!(registry.validate(0).is_ok());
/// ```
pub trait Scene: Sized + 'static {
    /// Called when the scene is pushed. `None` means the scene failed to
    /// initialize and nothing is pushed.
    fn initialize(signal: &CriticalSignal) -> Option<Self>;

    /// Called when a pop exposes this scene at the top of the stack.
    ///
    /// Default implementation resumes unconditionally. Returning `false`
    /// discards the scene as well.
    fn reinitialize(&mut self, _signal: &CriticalSignal) -> bool {
        true
    }

    /// Called once per host frame while the scene is on top.
    fn execute(&mut self, signal: &CriticalSignal) -> SceneRequest;

    /// Called when the scene leaves the stack.
    ///
    /// Default implementation just drops the state.
    fn terminate(self, _signal: &CriticalSignal) {}
}
