//=========================================================================
// Aetheric Scenes Engine
//
// Host-side driver for the scene manager.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run(registry, id)──>  RunReport
//         │                          │
//         ├─ with_stack_capacity()   └─ initialize manager
//         ├─ with_max_depth()           execute top scene per frame
//         └─ with_frame_limit()         terminate manager
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{info, warn};

//=== Internal Dependencies ===============================================

use crate::core::{SceneError, SceneId, SceneManager, SceneManagerConfig, SceneRegistry};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Stack capacity**: 8 scenes preallocated
/// - **Max depth**: unbounded
/// - **Frame limit**: none (run until the stack empties or a frame fails)
///
/// # Examples
///
/// Simple usage with defaults:
/// ```
/// use aetheric_scenes::prelude::*;
///
/// let registry = SceneRegistry::new().with_scene(
///     SceneDescriptor::new("main")
///         .on_initialize(|_| Some(()))
///         .on_execute(|_: &mut (), _| SceneRequest::Pop)
///         .on_terminate(|_: (), _| {}),
/// );
///
/// let report = EngineBuilder::new().build().run(&registry, 0)?;
/// assert_eq!(report.outcome, RunOutcome::Completed);
/// # Ok::<(), SceneError>(())
/// ```
///
/// Advanced configuration:
/// ```
/// # use aetheric_scenes::EngineBuilder;
/// let _engine = EngineBuilder::new()
///     .with_stack_capacity(32)   // Deep menu hierarchies
///     .with_max_depth(64)        // Guard against runaway pushes
///     .with_frame_limit(10_000)  // Bounded test runs
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    stack_capacity: usize,
    max_depth: Option<usize>,
    frame_limit: Option<u64>,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        let defaults = SceneManagerConfig::default();
        Self {
            stack_capacity: defaults.stack_capacity,
            max_depth: defaults.max_depth,
            frame_limit: None,
        }
    }

    /// Sets how many stack slots are allocated up front.
    ///
    /// The stack still grows past this on demand; the capacity is kept
    /// across pops.
    ///
    /// Default: 8
    pub fn with_stack_capacity(mut self, capacity: usize) -> Self {
        self.stack_capacity = capacity;
        self
    }

    /// Bounds the stack height. Pushes beyond it fail without initializing
    /// the requested scene.
    ///
    /// # Panics
    ///
    /// Panics if `depth == 0`.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        assert!(depth > 0, "Max depth must be positive");
        self.max_depth = Some(depth);
        self
    }

    /// Stops the run after this many frames even if scenes remain.
    ///
    /// # Panics
    ///
    /// Panics if `frames == 0`.
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        assert!(frames > 0, "Frame limit must be positive");
        self.frame_limit = Some(frames);
        self
    }

    /// Builds the engine instance.
    pub fn build(self) -> Engine {
        info!(
            "Building engine (stack capacity: {}, max depth: {:?}, frame limit: {:?})",
            self.stack_capacity, self.max_depth, self.frame_limit
        );

        Engine {
            config: SceneManagerConfig {
                stack_capacity: self.stack_capacity,
                max_depth: self.max_depth,
            },
            frame_limit: self.frame_limit,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== RunReport ===========================================================

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The scene stack emptied.
    Completed,

    /// An execute call failed; the run stopped at that frame.
    Stopped(SceneError),

    /// The configured frame limit was reached with scenes remaining.
    FrameLimit,
}

/// Summary of an [`Engine::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Number of execute calls made.
    pub frames: u64,

    /// Why the loop ended.
    pub outcome: RunOutcome,
}

//=== Engine ==============================================================

/// Runs the standard host loop over a scene registry.
///
/// Create via [`EngineBuilder`].
///
/// # Lifecycle
///
/// 1. Initializes a fresh [`SceneManager`] with the registry
/// 2. Executes the top scene once per frame while the stack is non-empty
/// 3. Stops on the first failed frame or the frame limit
/// 4. Terminates the manager, so every remaining scene is terminated
#[derive(Debug, Clone)]
pub struct Engine {
    config: SceneManagerConfig,
    frame_limit: Option<u64>,
}

impl Engine {
    /// Returns the manager configuration used for each run.
    pub fn config(&self) -> SceneManagerConfig {
        self.config
    }

    /// Drives `registry` from `initial` until the run ends.
    ///
    /// # Errors
    ///
    /// Returns the error of [`SceneManager::initialize`] if the run cannot
    /// start. Failures after that are reported in [`RunReport::outcome`].
    pub fn run(
        &self,
        registry: &SceneRegistry,
        initial: SceneId,
    ) -> Result<RunReport, SceneError> {
        info!(
            "Starting scene run (initial scene {} of {})",
            initial,
            registry.len()
        );

        let mut manager = SceneManager::with_config(self.config);
        manager.initialize(registry, initial)?;

        let mut frames = 0;
        let outcome = loop {
            if manager.is_stack_empty() {
                break RunOutcome::Completed;
            }

            if self.frame_limit.is_some_and(|limit| frames >= limit) {
                warn!(
                    "Frame limit reached with {} scenes on the stack",
                    manager.height()
                );
                break RunOutcome::FrameLimit;
            }

            frames += 1;
            if let Err(e) = manager.execute_top() {
                warn!("Frame {} failed: {}", frames, e);
                break RunOutcome::Stopped(e);
            }
        };

        if manager.is_initialized() {
            manager.terminate();
        }

        info!("Scene run finished after {} frames: {:?}", frames, outcome);
        Ok(RunReport { frames, outcome })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::core::{CriticalError, SceneDescriptor, SceneRequest};

    /// Counts live instances so tests can check every scene was terminated.
    #[derive(Clone, Default)]
    struct Live(Rc<Cell<i32>>);

    fn scene(live: &Live, requests: &'static [SceneRequest]) -> SceneDescriptor {
        let (up, down) = (live.clone(), live.clone());
        SceneDescriptor::new("scripted")
            .on_initialize(move |_| {
                up.0.set(up.0.get() + 1);
                Some(0_usize)
            })
            .on_execute(move |frame: &mut usize, _| {
                let request = requests[(*frame).min(requests.len() - 1)];
                *frame += 1;
                request
            })
            .on_terminate(move |_: usize, _| down.0.set(down.0.get() - 1))
    }

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new();
        assert_eq!(builder.stack_capacity, 8);
        assert_eq!(builder.max_depth, None);
        assert_eq!(builder.frame_limit, None);
    }

    #[test]
    #[should_panic(expected = "Max depth must be positive")]
    fn builder_with_max_depth_panics_on_zero() {
        EngineBuilder::new().with_max_depth(0);
    }

    #[test]
    #[should_panic(expected = "Frame limit must be positive")]
    fn builder_with_frame_limit_panics_on_zero() {
        EngineBuilder::new().with_frame_limit(0);
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let engine = EngineBuilder::new()
            .with_stack_capacity(16)
            .with_max_depth(4)
            .with_frame_limit(100)
            .build();

        assert_eq!(
            engine.config(),
            SceneManagerConfig {
                stack_capacity: 16,
                max_depth: Some(4),
            }
        );
        assert_eq!(engine.frame_limit, Some(100));
    }

    //=====================================================================
    // Engine Tests
    //=====================================================================

    #[test]
    fn run_completes_when_stack_empties() {
        use crate::core::SceneRequest::{Pop, Push};

        let live = Live::default();
        let registry = SceneRegistry::new()
            .with_scene(scene(&live, &[Push(1), Pop]))
            .with_scene(scene(&live, &[Pop]));

        let report = EngineBuilder::new().build().run(&registry, 0).expect("run");

        assert_eq!(
            report,
            RunReport {
                frames: 3,
                outcome: RunOutcome::Completed,
            }
        );
        assert_eq!(live.0.get(), 0);
    }

    #[test]
    fn run_stops_on_invalid_request_and_terminates() {
        use crate::core::SceneRequest::{Invalid, Push};

        let live = Live::default();
        let registry = SceneRegistry::new()
            .with_scene(scene(&live, &[Push(1)]))
            .with_scene(scene(&live, &[Invalid]));

        let report = EngineBuilder::new().build().run(&registry, 0).expect("run");

        assert_eq!(report.frames, 2);
        assert_eq!(
            report.outcome,
            RunOutcome::Stopped(SceneError::InvalidExecuteResult { id: 1 })
        );
        assert_eq!(live.0.get(), 0);
    }

    #[test]
    fn run_honors_frame_limit() {
        let live = Live::default();
        let registry = SceneRegistry::new().with_scene(scene(&live, &[SceneRequest::Push(0)]));

        let report = EngineBuilder::new()
            .with_max_depth(100)
            .with_frame_limit(5)
            .build()
            .run(&registry, 0)
            .expect("run");

        assert_eq!(
            report,
            RunReport {
                frames: 5,
                outcome: RunOutcome::FrameLimit,
            }
        );
        assert_eq!(live.0.get(), 0);
    }

    #[test]
    fn run_stops_on_exhausted_stack() {
        let live = Live::default();
        let registry = SceneRegistry::new().with_scene(scene(&live, &[SceneRequest::Push(0)]));

        let report = EngineBuilder::new()
            .with_max_depth(3)
            .build()
            .run(&registry, 0)
            .expect("run");

        assert_eq!(report.frames, 3);
        assert_eq!(
            report.outcome,
            RunOutcome::Stopped(SceneError::StackExhausted { depth: 3 })
        );
        assert_eq!(live.0.get(), 0);
    }

    #[test]
    fn run_reports_critical_shutdown() {
        let registry = SceneRegistry::new().with_scene(
            SceneDescriptor::new("fatal")
                .on_initialize(|_| Some(()))
                .on_execute(|_: &mut (), signal| {
                    signal.raise(2, Some("device lost"));
                    SceneRequest::Pop
                })
                .on_terminate(|_: (), _| {}),
        );

        let report = EngineBuilder::new().build().run(&registry, 0).expect("run");

        assert_eq!(
            report.outcome,
            RunOutcome::Stopped(SceneError::CriticalShutdown(CriticalError::new(
                2,
                Some("device lost")
            )))
        );
    }

    #[test]
    fn run_fails_on_invalid_registry() {
        let registry = SceneRegistry::new();
        assert_eq!(
            EngineBuilder::new().build().run(&registry, 0),
            Err(SceneError::EmptyRegistry)
        );
    }
}
