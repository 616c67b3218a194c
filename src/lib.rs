//=========================================================================
// Aetheric Scenes — Library Root
//
// This crate defines a stack-based scene manager.
//
// Responsibilities:
// - Expose the scene manager and its registry types (`core`)
// - Provide a host-side driver running the standard frame loop (`Engine`)
// - Keep scene data ownership explicit: the manager owns every live
//   scene's state from initialize until terminate
//
// Typical usage:
// ```no_run
// use aetheric_scenes::prelude::*;
//
// fn main() -> Result<(), SceneError> {
//     let registry = SceneRegistry::new().with_scene(/* ... */);
//     EngineBuilder::new().build().run(&registry, 0)?;
//     Ok(())
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the scene manager, registry, requests and errors.
// Hosts that need per-frame control drive `SceneManager` directly.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `engine` defines the convenience driver and its builder.
//
mod engine;

//--- Public Exports ------------------------------------------------------
//
// Re-exports the engine types so applications can simply
// `use aetheric_scenes::EngineBuilder;`.
//
pub use engine::{Engine, EngineBuilder, RunOutcome, RunReport};
