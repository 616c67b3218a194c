//=========================================================================
// Scene Stack
//=========================================================================
//
// LIFO storage of live scene instances.
//
// Growth is two-phase: reserve_slot() claims room for one more instance
// (honoring the depth limit) before the scene is initialized, and push()
// then places the instance without reallocating. A failed reservation or
// a failed initialize leaves the stack at its prior height.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::error;

//=== Internal Dependencies ===============================================

use super::{SceneData, SceneId};
use crate::core::SceneError;

//=== SceneInstance =======================================================

/// One live occurrence of a scene: its id plus exclusively owned data.
pub(crate) struct SceneInstance {
    pub id: SceneId,
    pub data: SceneData,
}

//=== SceneStack ==========================================================

pub(crate) struct SceneStack {
    instances: Vec<SceneInstance>,
    base_capacity: usize,
    max_depth: Option<usize>,
}

impl SceneStack {
    /// Creates an empty stack.
    ///
    /// `capacity` slots are allocated up front and kept across pops;
    /// `max_depth` bounds the height, `None` leaves it unbounded.
    pub fn new(capacity: usize, max_depth: Option<usize>) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            base_capacity: capacity,
            max_depth,
        }
    }

    //--- Growth -----------------------------------------------------------

    /// Guarantees room for one more instance.
    ///
    /// # Errors
    ///
    /// [`SceneError::StackExhausted`] if the depth limit is reached or the
    /// allocation fails. The stack is left untouched.
    pub fn reserve_slot(&mut self) -> Result<(), SceneError> {
        let depth = self.instances.len();

        if self.max_depth.is_some_and(|max| depth >= max) {
            error!(target: "scene", "Scene stack reached its depth limit ({})", depth);
            return Err(SceneError::StackExhausted { depth });
        }

        self.instances.try_reserve(1).map_err(|e| {
            error!(target: "scene", "Failed to expand scene stack: {}", e);
            SceneError::StackExhausted { depth }
        })
    }

    /// Places an instance on top. Call [`reserve_slot`](Self::reserve_slot) first.
    pub fn push(&mut self, id: SceneId, data: SceneData) {
        self.instances.push(SceneInstance { id, data });
    }

    //--- Shrinking --------------------------------------------------------

    /// Removes and returns the top instance.
    pub fn pop(&mut self) -> Option<SceneInstance> {
        let instance = self.instances.pop()?;
        self.instances.shrink_to(self.base_capacity);
        Some(instance)
    }

    //--- Queries ----------------------------------------------------------

    pub fn top(&self) -> Option<&SceneInstance> {
        self.instances.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut SceneInstance> {
        self.instances.last_mut()
    }

    pub fn height(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Iterates ids bottom to top.
    pub fn ids(&self) -> impl Iterator<Item = SceneId> + '_ {
        self.instances.iter().map(|instance| instance.id)
    }
}

//=========================================================================
// Tests
//=========================================================================
