//=========================================================================
// Scene Registry
//=========================================================================
//
// Immutable catalog of scene descriptors indexed by SceneId.
//
// The host builds and owns the registry; the scene manager borrows it
// for as long as it stays initialized and validates it once on entry.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::ops::Index;

use log::error;

//=== Internal Dependencies ===============================================

use super::{SceneDescriptor, SceneId};
use crate::core::SceneError;

//=== SceneRegistry =======================================================

/// Catalog mapping scene ids to their descriptors.
///
/// Ids are assigned in registration order, starting at `0`.
///
/// # Example
///
/// ```
/// use aetheric_scenes::prelude::*;
///
/// let registry = SceneRegistry::new()
///     .with_scene(
///         SceneDescriptor::new("title")
///             .on_initialize(|_| Some(()))
///             .on_execute(|_: &mut (), _| SceneRequest::Pop)
///             .on_terminate(|_: (), _| {}),
///     );
///
/// assert_eq!(registry.len(), 1);
/// assert!(registry.validate(0).is_ok());
/// ```
#[derive(Debug, Default)]
pub struct SceneRegistry {
    scenes: Vec<SceneDescriptor>,
}

impl SceneRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self { scenes: Vec::new() }
    }

    /// Appends a descriptor; its id is the registry length before the call.
    pub fn with_scene(mut self, descriptor: SceneDescriptor) -> Self {
        self.scenes.push(descriptor);
        self
    }

    /// Returns the number of registered scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Returns true if no scene is registered.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Returns true if `id` indexes a registered scene.
    pub fn contains(&self, id: SceneId) -> bool {
        id < self.scenes.len()
    }

    /// Returns the descriptor registered under `id`.
    pub fn get(&self, id: SceneId) -> Option<&SceneDescriptor> {
        self.scenes.get(id)
    }

    /// Returns the diagnostic name of `id`, or `"?"` if unregistered.
    pub fn name(&self, id: SceneId) -> &str {
        self.get(id).map_or("?", SceneDescriptor::name)
    }

    /// Iterates descriptors in id order.
    pub fn iter(&self) -> impl Iterator<Item = (SceneId, &SceneDescriptor)> {
        self.scenes.iter().enumerate()
    }

    //--- Validation -------------------------------------------------------

    /// Checks the registry can drive a manager starting at `initial`.
    ///
    /// # Errors
    ///
    /// - [`SceneError::EmptyRegistry`] if no scene is registered
    /// - [`SceneError::InitialSceneOutOfRange`] if `initial` is not an id
    /// - [`SceneError::MissingOperation`] for the first descriptor lacking
    ///   `initialize`, `execute` or `terminate`
    /// - [`SceneError::HookTypeMismatch`] for the first descriptor whose
    ///   hooks disagree on the scene's state type
    pub fn validate(&self, initial: SceneId) -> Result<(), SceneError> {
        if self.is_empty() {
            error!(target: "scene", "Invalid scene registry: no scenes registered");
            return Err(SceneError::EmptyRegistry);
        }

        if !self.contains(initial) {
            error!(
                target: "scene",
                "Invalid initial scene {} for a registry of {} scenes",
                initial,
                self.len()
            );
            return Err(SceneError::InitialSceneOutOfRange {
                id: initial,
                count: self.len(),
            });
        }

        for (id, descriptor) in self.iter() {
            if let Some(operation) = descriptor.missing_operation() {
                error!(
                    target: "scene",
                    "Scene {} ('{}') has no {} hook",
                    id,
                    descriptor.name(),
                    operation
                );
                return Err(SceneError::MissingOperation {
                    id,
                    name: descriptor.name().to_owned(),
                    operation,
                });
            }

            if let Some(mismatch) = descriptor.mismatched_operation() {
                error!(
                    target: "scene",
                    "Scene {} ('{}') {} hook takes {}, but initialize produces {}",
                    id,
                    descriptor.name(),
                    mismatch.operation,
                    mismatch.found,
                    mismatch.expected
                );
                return Err(SceneError::HookTypeMismatch {
                    id,
                    name: descriptor.name().to_owned(),
                    operation: mismatch.operation,
                    expected: mismatch.expected,
                    found: mismatch.found,
                });
            }
        }

        Ok(())
    }
}

/// Indexing by a registered id; panics on an unregistered one.
impl Index<SceneId> for SceneRegistry {
    type Output = SceneDescriptor;

    fn index(&self, id: SceneId) -> &SceneDescriptor {
        &self.scenes[id]
    }
}

impl FromIterator<SceneDescriptor> for SceneRegistry {
    fn from_iter<I: IntoIterator<Item = SceneDescriptor>>(iter: I) -> Self {
        Self {
            scenes: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<SceneDescriptor>> for SceneRegistry {
    fn from(scenes: Vec<SceneDescriptor>) -> Self {
        Self { scenes }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::SceneRequest;

    fn popping(name: &str) -> SceneDescriptor {
        SceneDescriptor::new(name)
            .on_initialize(|_| Some(()))
            .on_execute(|_: &mut (), _| SceneRequest::Pop)
            .on_terminate(|_: (), _| {})
    }

    #[test]
    fn ids_follow_registration_order() {
        let registry: SceneRegistry = vec![popping("a"), popping("b")].into();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.name(0), "a");
        assert_eq!(registry.name(1), "b");
        assert_eq!(registry.name(2), "?");
        assert!(registry.contains(1));
        assert!(!registry.contains(2));
    }

    #[test]
    fn empty_registry_is_rejected() {
        assert_eq!(
            SceneRegistry::new().validate(0),
            Err(SceneError::EmptyRegistry)
        );
    }

    #[test]
    fn out_of_range_initial_scene_is_rejected() {
        let registry: SceneRegistry = [popping("a"), popping("b")].into_iter().collect();

        assert_eq!(
            registry.validate(2),
            Err(SceneError::InitialSceneOutOfRange { id: 2, count: 2 })
        );
    }

    #[test]
    fn missing_required_hook_is_rejected() {
        let registry = SceneRegistry::new()
            .with_scene(popping("ok"))
            .with_scene(SceneDescriptor::new("broken").on_initialize(|_| Some(())));

        assert_eq!(
            registry.validate(0),
            Err(SceneError::MissingOperation {
                id: 1,
                name: "broken".into(),
                operation: "execute",
            })
        );
    }

    #[test]
    fn hooks_with_foreign_state_type_are_rejected() {
        let registry = SceneRegistry::new().with_scene(popping("ok")).with_scene(
            SceneDescriptor::new("mismatch")
                .on_initialize(|_| Some(1_u32))
                .on_execute(|_: &mut u32, _| SceneRequest::Push(0))
                .on_terminate(|_: u64, _| {}),
        );

        let result = registry.validate(0);
        assert_eq!(
            result,
            Err(SceneError::HookTypeMismatch {
                id: 1,
                name: "mismatch".into(),
                operation: "terminate",
                expected: "u32",
                found: "u64",
            })
        );
        assert!(result.is_err_and(|e| e.is_configuration()));
    }

    #[test]
    fn missing_reinitialize_is_accepted() {
        let registry = SceneRegistry::new().with_scene(popping("plain"));

        assert!(!registry.get(0).expect("registered").has_reinitialize());
        assert_eq!(registry.validate(0), Ok(()));
    }
}
