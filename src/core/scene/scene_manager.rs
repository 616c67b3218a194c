//=========================================================================
// Scene Manager
//=========================================================================
//
// Drives registered scenes through their lifecycle on a LIFO stack.
//
// State machine:
//   uninitialized ──initialize()──> initialized ──terminate()──> uninitialized
//
// Per execute_top() call:
//   execute() → Pop      → pop top, resume new top (cascade on failure)
//             → Push(id) → push id (absorbed on failure)
//             → Invalid  → fault, stack untouched
//
// A critical signal raised from any hook unwinds the whole stack and
// returns the manager to uninitialized.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, error, info, warn};

//=== Internal Dependencies ===============================================

use super::stack::SceneStack;
use super::{
    CriticalSignal, SceneDescriptor, SceneId, SceneRegistry, SceneRequest, SignalChannel,
};
use crate::core::SceneError;

//=== SceneManagerConfig ==================================================

/// Stack sizing for a [`SceneManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneManagerConfig {
    /// Slots allocated up front and retained across pops.
    pub stack_capacity: usize,

    /// Maximum stack height; `None` leaves it unbounded.
    pub max_depth: Option<usize>,
}

impl Default for SceneManagerConfig {
    fn default() -> Self {
        Self {
            stack_capacity: 8,
            max_depth: None,
        }
    }
}

//=== Transition ==========================================================

/// Stack change produced by a successful [`SceneManager::execute_top`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// A new scene was initialized on top of the requesting one.
    Pushed { id: SceneId },

    /// The requesting scene was popped.
    Popped {
        /// Id of the scene that requested the pop.
        id: SceneId,

        /// Scenes discarded because their reinitialize failed, top first.
        discarded: Vec<SceneId>,

        /// Scene now on top, or `None` if the stack emptied.
        resumed: Option<SceneId>,
    },
}

//=== Scene Manager =======================================================

/// Stack-based scene lifecycle manager.
///
/// The manager borrows the host's [`SceneRegistry`] while initialized and
/// owns every live scene's private data. Each pushed scene receives
/// exactly one terminate call, at the latest when the manager is
/// terminated or dropped.
///
/// # Example
///
/// ```rust
/// # use aetheric_scenes::prelude::*;
/// let registry = SceneRegistry::new().with_scene(
///     SceneDescriptor::new("once")
///         .on_initialize(|_| Some(()))
///         .on_execute(|_: &mut (), _| SceneRequest::Pop)
///         .on_terminate(|_: (), _| {}),
/// );
///
/// let mut manager = SceneManager::new();
/// manager.initialize(&registry, 0)?;
///
/// while manager.is_stack_not_empty() {
///     manager.execute_top()?;
/// }
///
/// manager.terminate();
/// # Ok::<(), SceneError>(())
/// ```
pub struct SceneManager<'r> {
    registry: Option<&'r SceneRegistry>,
    stack: SceneStack,
    signals: SignalChannel,
}

impl<'r> SceneManager<'r> {
    //--- Construction -----------------------------------------------------

    /// Creates an uninitialized manager with the default configuration.
    pub fn new() -> Self {
        Self::with_config(SceneManagerConfig::default())
    }

    /// Creates an uninitialized manager with the given configuration.
    pub fn with_config(config: SceneManagerConfig) -> Self {
        Self {
            registry: None,
            stack: SceneStack::new(config.stack_capacity, config.max_depth),
            signals: SignalChannel::new(),
        }
    }

    //--- Lifecycle --------------------------------------------------------

    /// Validates `registry` and pushes the `initial` scene.
    ///
    /// Calling this on an initialized manager logs a warning and succeeds
    /// without touching the stack.
    ///
    /// # Errors
    ///
    /// - Configuration errors from [`SceneRegistry::validate`]
    /// - Any push failure of the initial scene; the manager then stays
    ///   uninitialized
    pub fn initialize(
        &mut self,
        registry: &'r SceneRegistry,
        initial: SceneId,
    ) -> Result<(), SceneError> {
        if self.registry.is_some() {
            warn!(target: "scene", "Attempt to reinitialize scene manager");
            return Ok(());
        }

        registry.validate(initial)?;

        if let Some(stale) = self.signals.take() {
            warn!(
                target: "scene",
                "Discarding critical signal {} raised before initialization",
                stale
            );
        }

        self.registry = Some(registry);
        debug!(
            target: "scene",
            "Scene manager initialized with {} scenes, initial scene {} ('{}')",
            registry.len(),
            initial,
            registry.name(initial)
        );

        if let Err(e) = self.push(initial, &registry[initial]) {
            self.registry = None;
            error!(target: "scene", "Failed to initialize initial scene: {}", e);
            return Err(e);
        }

        Ok(())
    }

    /// Runs one step of the top scene and applies its request.
    ///
    /// # Errors
    ///
    /// - [`SceneError::NotInitialized`] / [`SceneError::EmptyStack`] when
    ///   there is nothing to run; no side effects
    /// - [`SceneError::InvalidExecuteResult`] when the scene returned
    ///   neither a pop nor a registered id; stack untouched
    /// - Push failures ([`SceneError::SceneInitFailed`],
    ///   [`SceneError::StackExhausted`]); the requesting scene stays on
    ///   top as it was, without being reinitialized
    /// - [`SceneError::CriticalShutdown`] when a hook raised the critical
    ///   signal; the manager is uninitialized afterwards
    pub fn execute_top(&mut self) -> Result<Transition, SceneError> {
        let Some(registry) = self.registry else {
            warn!(target: "scene", "Attempt to run a scene in an uninitialized scene manager");
            return Err(SceneError::NotInitialized);
        };

        self.check_signal()?;

        let Some(top) = self.stack.top_mut() else {
            warn!(target: "scene", "Attempt to run a scene in an empty scene manager");
            return Err(SceneError::EmptyStack);
        };

        let id = top.id;
        let request = registry[id].execute(&mut top.data, self.signals.signal());
        self.check_signal()?;

        match request {
            SceneRequest::Pop => self.pop_and_resume(registry, id),
            SceneRequest::Push(next) if registry.contains(next) => {
                self.push(next, &registry[next])?;
                Ok(Transition::Pushed { id: next })
            }
            SceneRequest::Push(_) | SceneRequest::Invalid => {
                warn!(
                    target: "scene",
                    "Scene {} ('{}') returned an invalid request: {:?}",
                    id,
                    registry.name(id),
                    request
                );
                Err(SceneError::InvalidExecuteResult { id })
            }
        }
    }

    /// Terminates every scene top to bottom and uninitializes the manager.
    ///
    /// Calling this on an uninitialized manager logs a warning and does
    /// nothing.
    pub fn terminate(&mut self) {
        if self.registry.is_none() {
            warn!(target: "scene", "Attempt to terminate an uninitialized scene manager");
            return;
        }

        debug!(
            target: "scene",
            "Terminating scene manager ({} scenes on stack)",
            self.stack.height()
        );
        self.unwind();
    }

    //--- Queries ----------------------------------------------------------

    /// Returns true if no scene is on the stack.
    ///
    /// An uninitialized manager logs a warning and reports empty.
    pub fn is_stack_empty(&self) -> bool {
        if self.registry.is_none() {
            warn!(target: "scene", "Inquiry of stack height of an uninitialized scene manager");
            debug_assert!(self.stack.is_empty());
        }
        self.stack.is_empty()
    }

    /// Returns true if at least one scene is on the stack.
    pub fn is_stack_not_empty(&self) -> bool {
        !self.is_stack_empty()
    }

    /// Returns true between a successful initialize and the next terminate.
    pub fn is_initialized(&self) -> bool {
        self.registry.is_some()
    }

    /// Returns the number of scenes on the stack.
    pub fn height(&self) -> usize {
        self.stack.height()
    }

    /// Returns the id of the top scene.
    pub fn top(&self) -> Option<SceneId> {
        self.stack.top().map(|instance| instance.id)
    }

    /// Iterates the ids on the stack, bottom to top.
    pub fn ids(&self) -> impl Iterator<Item = SceneId> + '_ {
        self.stack.ids()
    }

    /// Returns a handle the host can use to force a critical shutdown.
    ///
    /// A signal raised outside a hook is handled by the next
    /// [`execute_top`](Self::execute_top).
    pub fn critical_signal(&self) -> CriticalSignal {
        self.signals.signal().clone()
    }

    //--- Stack Operations -------------------------------------------------

    fn push(&mut self, id: SceneId, descriptor: &SceneDescriptor) -> Result<(), SceneError> {
        self.stack.reserve_slot()?;

        let data = descriptor.initialize(self.signals.signal());
        let initialized = data.is_some();
        if let Some(data) = data {
            self.stack.push(id, data);
        }

        // Data created alongside a critical signal is already on the stack,
        // so unwinding still terminates it.
        self.check_signal()?;

        if initialized {
            debug!(
                target: "scene",
                "Pushed scene {} ('{}'), height {}",
                id,
                descriptor.name(),
                self.stack.height()
            );
            Ok(())
        } else {
            warn!(target: "scene", "Scene {} ('{}') failed to initialize", id, descriptor.name());
            Err(SceneError::SceneInitFailed { id })
        }
    }

    /// Pops the top scene, calling its terminate hook.
    fn pop(&mut self, registry: &SceneRegistry) -> Option<SceneId> {
        let instance = self.stack.pop()?;
        let descriptor = &registry[instance.id];
        descriptor.terminate(instance.data, self.signals.signal());
        debug!(
            target: "scene",
            "Popped scene {} ('{}'), height {}",
            instance.id,
            descriptor.name(),
            self.stack.height()
        );
        Some(instance.id)
    }

    fn pop_and_resume(
        &mut self,
        registry: &SceneRegistry,
        id: SceneId,
    ) -> Result<Transition, SceneError> {
        self.pop(registry);
        self.check_signal()?;

        let mut discarded = Vec::new();
        let resumed = loop {
            let Some(top) = self.stack.top_mut() else {
                break None;
            };

            let next = top.id;
            let resumes = registry[next].reinitialize(&mut top.data, self.signals.signal());
            self.check_signal()?;

            match resumes {
                None | Some(true) => break Some(next),
                Some(false) => {
                    warn!(
                        target: "scene",
                        "Scene {} ('{}') failed to reinitialize",
                        next,
                        registry.name(next)
                    );
                    self.pop(registry);
                    self.check_signal()?;
                    discarded.push(next);
                }
            }
        };

        if let Some(next) = resumed {
            debug!(target: "scene", "Resumed scene {} ('{}')", next, registry.name(next));
        }

        Ok(Transition::Popped {
            id,
            discarded,
            resumed,
        })
    }

    //--- Shutdown ---------------------------------------------------------

    /// Handles a pending critical signal by unwinding the whole stack.
    fn check_signal(&mut self) -> Result<(), SceneError> {
        let Some(critical) = self.signals.take() else {
            return Ok(());
        };

        if critical.is_silent() {
            info!(target: "scene", "Critical shutdown requested");
        } else {
            error!(target: "scene", "Critical scene manager error {}", critical);
        }

        self.unwind();
        Err(SceneError::CriticalShutdown(critical))
    }

    /// Pops every scene and returns to the uninitialized state.
    fn unwind(&mut self) {
        if let Some(registry) = self.registry {
            while self.pop(registry).is_some() {}
        }
        self.registry = None;

        if let Some(late) = self.signals.take() {
            warn!(target: "scene", "Ignoring critical signal {} raised during shutdown", late);
        }
    }
}

impl Default for SceneManager<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SceneManager<'_> {
    fn drop(&mut self) {
        if self.registry.is_some() {
            debug!(target: "scene", "Scene manager dropped while initialized, unwinding");
            self.unwind();
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
