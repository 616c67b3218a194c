//=========================================================================
// Test Scenes
//=========================================================================
//
// Scripted scene descriptors that record every hook call in a shared
// journal, for asserting lifecycle order in manager tests.
//
//=========================================================================

use std::cell::RefCell;
use std::rc::Rc;

use super::{SceneDescriptor, SceneId, SceneRequest};

//=== Journal =============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Initialize(SceneId),
    Reinitialize(SceneId),
    Execute(SceneId),
    Terminate(SceneId),
}

#[derive(Debug, Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<Call>>>);

impl Journal {
    pub fn record(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    pub fn count(&self, call: Call) -> usize {
        self.0.borrow().iter().filter(|&&c| c == call).count()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

//=== Scripted Scenes =====================================================

/// Per-instance state: how many times the instance has executed.
pub struct Frame(pub usize);

/// A scene that initializes successfully and answers its n-th execute
/// with `requests[n]`, repeating the last request once exhausted.
pub fn scripted(journal: &Journal, id: SceneId, requests: &[SceneRequest]) -> SceneDescriptor {
    let requests = requests.to_vec();
    let (on_init, on_execute, on_terminate) = (journal.clone(), journal.clone(), journal.clone());

    SceneDescriptor::new(format!("scene-{id}"))
        .on_initialize(move |_| {
            on_init.record(Call::Initialize(id));
            Some(Frame(0))
        })
        .on_execute(move |frame: &mut Frame, _| {
            on_execute.record(Call::Execute(id));
            let request = requests[frame.0.min(requests.len() - 1)];
            frame.0 += 1;
            request
        })
        .on_terminate(move |_: Frame, _| on_terminate.record(Call::Terminate(id)))
}

/// Adds a reinitialize hook answering `resumes`.
pub fn resumable(
    descriptor: SceneDescriptor,
    journal: &Journal,
    id: SceneId,
    resumes: bool,
) -> SceneDescriptor {
    let journal = journal.clone();
    descriptor.on_reinitialize(move |_: &mut Frame, _| {
        journal.record(Call::Reinitialize(id));
        resumes
    })
}

/// A scene whose initialize always fails.
pub fn unloadable(journal: &Journal, id: SceneId) -> SceneDescriptor {
    let journal = journal.clone();
    scripted(&Journal::default(), id, &[SceneRequest::Pop]).on_initialize(move |_| {
        journal.record(Call::Initialize(id));
        None::<Frame>
    })
}
