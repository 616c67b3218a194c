//=========================================================================
// Scene Descriptor
//=========================================================================
//
// Lifecycle hooks describing one scene kind.
//
// Hooks:
//   initialize   (required) → creates the scene's private data
//   reinitialize (optional) → resumes the scene after a pop exposes it
//   execute      (required) → runs one step, returns a SceneRequest
//   terminate    (required) → consumes the private data
//
// Private data is type-erased (`Box<dyn Any>`). The typed builder
// methods downcast back to the concrete state type before calling the
// scene's closure.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::{self, Any, TypeId};
use std::fmt;

use log::warn;

//=== Internal Dependencies ===============================================

use super::{CriticalSignal, Scene, SceneRequest};

//=== Hook Types ==========================================================

/// Owned, type-erased private data of a live scene instance.
pub type SceneData = Box<dyn Any>;

type InitializeHook = Box<dyn Fn(&CriticalSignal) -> Option<SceneData>>;
type ReinitializeHook = Box<dyn Fn(&mut dyn Any, &CriticalSignal) -> bool>;
type ExecuteHook = Box<dyn Fn(&mut dyn Any, &CriticalSignal) -> SceneRequest>;
type TerminateHook = Box<dyn Fn(SceneData, &CriticalSignal)>;

/// Concrete state type a hook was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StateType {
    id: TypeId,
    name: &'static str,
}

impl StateType {
    fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: any::type_name::<T>(),
        }
    }
}

/// A type-erased hook together with the state type it downcasts to.
struct Hook<F> {
    call: F,
    state: StateType,
}

impl<F> Hook<F> {
    fn new<T: Any>(call: F) -> Self {
        Self {
            call,
            state: StateType::of::<T>(),
        }
    }
}

/// A hook whose state type disagrees with the initialize hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookMismatch {
    /// Name of the mismatched hook.
    pub operation: &'static str,

    /// State type produced by `initialize`.
    pub expected: &'static str,

    /// State type the mismatched hook downcasts to.
    pub found: &'static str,
}

//=== SceneDescriptor =====================================================

/// Behavior of one scene kind, as registered in a
/// [`SceneRegistry`](super::SceneRegistry).
///
/// Built fluently; each hook is generic over the scene's state type, and
/// all hooks of one descriptor must agree on it:
///
/// ```
/// use aetheric_scenes::prelude::*;
///
/// struct Counter(u32);
///
/// let descriptor = SceneDescriptor::new("counter")
///     .on_initialize(|_| Some(Counter(0)))
///     .on_execute(|counter: &mut Counter, _| {
///         counter.0 += 1;
///         if counter.0 < 3 {
///             SceneRequest::Push(0)
///         } else {
///             SceneRequest::Pop
///         }
///     })
///     .on_terminate(|_: Counter, _| {});
///
/// assert!(descriptor.missing_operation().is_none());
/// assert!(descriptor.mismatched_operation().is_none());
/// ```
///
/// The manager only ever invokes descriptors; it never copies or
/// mutates them.
pub struct SceneDescriptor {
    name: String,
    initialize: Option<Hook<InitializeHook>>,
    reinitialize: Option<Hook<ReinitializeHook>>,
    execute: Option<Hook<ExecuteHook>>,
    terminate: Option<Hook<TerminateHook>>,
}

impl SceneDescriptor {
    //--- Construction -----------------------------------------------------

    /// Creates a descriptor with no hooks.
    ///
    /// `initialize`, `execute` and `terminate` must be set before the
    /// descriptor passes registry validation.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initialize: None,
            reinitialize: None,
            execute: None,
            terminate: None,
        }
    }

    /// Creates a descriptor whose hooks forward to a [`Scene`] implementation.
    ///
    /// The reinitialize hook is always installed, forwarding to
    /// [`Scene::reinitialize`] (which resumes unconditionally unless
    /// overridden).
    pub fn of<T: Scene>(name: impl Into<String>) -> Self {
        Self::new(name)
            .on_initialize(T::initialize)
            .on_reinitialize(T::reinitialize)
            .on_execute(T::execute)
            .on_terminate(T::terminate)
    }

    //--- Hook Registration ------------------------------------------------

    /// Sets the initialize hook. Returning `None` signals failure.
    pub fn on_initialize<T, F>(mut self, hook: F) -> Self
    where
        T: Any,
        F: Fn(&CriticalSignal) -> Option<T> + 'static,
    {
        let call: InitializeHook = Box::new(move |signal: &CriticalSignal| {
            hook(signal).map(|data| Box::new(data) as SceneData)
        });
        self.initialize = Some(Hook::new::<T>(call));
        self
    }

    /// Sets the reinitialize hook. Returning `false` discards the scene.
    pub fn on_reinitialize<T, F>(mut self, hook: F) -> Self
    where
        T: Any,
        F: Fn(&mut T, &CriticalSignal) -> bool + 'static,
    {
        let name = self.name.clone();
        let call: ReinitializeHook = Box::new(move |data: &mut dyn Any, signal: &CriticalSignal| {
            match data.downcast_mut::<T>() {
                Some(data) => hook(data, signal),
                None => {
                    warn!(target: "scene", "Scene '{}' resumed with data of another type", name);
                    false
                }
            }
        });
        self.reinitialize = Some(Hook::new::<T>(call));
        self
    }

    /// Sets the execute hook.
    pub fn on_execute<T, F>(mut self, hook: F) -> Self
    where
        T: Any,
        F: Fn(&mut T, &CriticalSignal) -> SceneRequest + 'static,
    {
        let name = self.name.clone();
        let call: ExecuteHook = Box::new(move |data: &mut dyn Any, signal: &CriticalSignal| {
            match data.downcast_mut::<T>() {
                Some(data) => hook(data, signal),
                None => {
                    warn!(target: "scene", "Scene '{}' executed with data of another type", name);
                    SceneRequest::Invalid
                }
            }
        });
        self.execute = Some(Hook::new::<T>(call));
        self
    }

    /// Sets the terminate hook. The hook takes ownership of the data.
    pub fn on_terminate<T, F>(mut self, hook: F) -> Self
    where
        T: Any,
        F: Fn(T, &CriticalSignal) + 'static,
    {
        let name = self.name.clone();
        let call: TerminateHook = Box::new(move |data: SceneData, signal: &CriticalSignal| {
            match data.downcast::<T>() {
                Ok(data) => hook(*data, signal),
                Err(_) => {
                    warn!(target: "scene", "Scene '{}' terminated with data of another type", name);
                }
            }
        });
        self.terminate = Some(Hook::new::<T>(call));
        self
    }

    //--- Queries ----------------------------------------------------------

    /// Returns the diagnostic name of the scene.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if a reinitialize hook is installed.
    ///
    /// Descriptors built with [`of`](Self::of) always report true, even
    /// when the [`Scene`] keeps the default resume-unconditionally
    /// behavior.
    pub fn has_reinitialize(&self) -> bool {
        self.reinitialize.is_some()
    }

    /// Returns the first required hook that is not set, if any.
    pub fn missing_operation(&self) -> Option<&'static str> {
        if self.initialize.is_none() {
            Some("initialize")
        } else if self.execute.is_none() {
            Some("execute")
        } else if self.terminate.is_none() {
            Some("terminate")
        } else {
            None
        }
    }

    /// Returns the first hook whose state type differs from the type the
    /// initialize hook produces, if any.
    ///
    /// A descriptor without an initialize hook has nothing to compare
    /// against and reports no mismatch.
    pub fn mismatched_operation(&self) -> Option<HookMismatch> {
        let expected = self.initialize.as_ref()?.state;

        [
            ("reinitialize", self.reinitialize.as_ref().map(|hook| hook.state)),
            ("execute", self.execute.as_ref().map(|hook| hook.state)),
            ("terminate", self.terminate.as_ref().map(|hook| hook.state)),
        ]
        .into_iter()
        .find_map(|(operation, state)| match state {
            Some(found) if found != expected => Some(HookMismatch {
                operation,
                expected: expected.name,
                found: found.name,
            }),
            _ => None,
        })
    }

    //--- Invocation -------------------------------------------------------
    //
    // Registry validation guarantees the required hooks exist and agree
    // on the state type before any of these run; the fallbacks only keep
    // the calls total.
    //

    pub(crate) fn initialize(&self, signal: &CriticalSignal) -> Option<SceneData> {
        self.initialize.as_ref().and_then(|hook| (hook.call)(signal))
    }

    /// Returns `None` when the scene has no reinitialize hook.
    pub(crate) fn reinitialize(
        &self,
        data: &mut SceneData,
        signal: &CriticalSignal,
    ) -> Option<bool> {
        self.reinitialize
            .as_ref()
            .map(|hook| (hook.call)(&mut **data, signal))
    }

    pub(crate) fn execute(&self, data: &mut SceneData, signal: &CriticalSignal) -> SceneRequest {
        match &self.execute {
            Some(hook) => (hook.call)(&mut **data, signal),
            None => SceneRequest::Invalid,
        }
    }

    pub(crate) fn terminate(&self, data: SceneData, signal: &CriticalSignal) {
        if let Some(hook) = &self.terminate {
            (hook.call)(data, signal);
        }
    }
}

impl fmt::Debug for SceneDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneDescriptor")
            .field("name", &self.name)
            .field("state", &self.initialize.as_ref().map(|hook| hook.state.name))
            .field("initialize", &self.initialize.is_some())
            .field("reinitialize", &self.reinitialize.is_some())
            .field("execute", &self.execute.is_some())
            .field("terminate", &self.terminate.is_some())
            .finish()
    }
}

//=========================================================================
// Tests
//=========================================================================
