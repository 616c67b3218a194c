//=========================================================================
// Two Scenes Demo
//=========================================================================
//
// Scene ONE pushes scene TWO on its first frame and pops itself on the
// next. Scene TWO pops immediately.
//
// Run with:
//   RUST_LOG=debug cargo run --example two_scenes
//
//=========================================================================

use aetheric_scenes::prelude::*;

//=== Scene Ids ===========================================================

const SCENE_ONE: SceneId = 0;
const SCENE_TWO: SceneId = 1;

//=== Scene ONE ===========================================================

struct SceneOne {
    first_run: bool,
    _buffer: Vec<u8>,
}

impl Scene for SceneOne {
    fn initialize(_signal: &CriticalSignal) -> Option<Self> {
        println!("Initializing scene ONE");
        Some(SceneOne {
            first_run: true,
            _buffer: vec![0; 100],
        })
    }

    fn reinitialize(&mut self, _signal: &CriticalSignal) -> bool {
        println!("Reinitializing scene ONE");
        true
    }

    fn execute(&mut self, _signal: &CriticalSignal) -> SceneRequest {
        println!("Executing scene ONE");
        if self.first_run {
            self.first_run = false;
            SceneRequest::Push(SCENE_TWO)
        } else {
            SceneRequest::Pop
        }
    }

    fn terminate(self, _signal: &CriticalSignal) {
        println!("Terminating scene ONE");
    }
}

//=== Scene TWO ===========================================================

fn scene_two() -> SceneDescriptor {
    SceneDescriptor::new("two")
        .on_initialize(|_| {
            println!("Initializing scene TWO");
            Some("Executing scene TWO")
        })
        .on_execute(|message: &mut &'static str, _| {
            println!("{}", message);
            SceneRequest::Pop
        })
        .on_terminate(|_: &'static str, _| println!("Terminating scene TWO"))
}

//=== Main ================================================================

fn main() {
    env_logger::init();

    let registry = SceneRegistry::new()
        .with_scene(SceneDescriptor::of::<SceneOne>("one"))
        .with_scene(scene_two());

    let mut manager = SceneManager::new();
    if let Err(e) = manager.initialize(&registry, SCENE_ONE) {
        eprintln!("Scene manager failed to start: {}", e);
        return;
    }

    while manager.is_stack_not_empty() {
        if let Err(e) = manager.execute_top() {
            eprintln!("Stopping: {}", e);
            break;
        }
    }

    if manager.is_initialized() {
        manager.terminate();
    }
}
