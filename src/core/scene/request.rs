//=========================================================================
// Scene Request
//=========================================================================
//
// Control-flow request returned by a scene's execute hook.
//
// The manager interprets the request after every execute call:
//   Pop      → pop the scene, resume the one beneath
//   Push(id) → instantiate scene `id` on top
//   Invalid  → fault, stack untouched
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::SceneId;

//=== Constants ===========================================================

/// Raw value encoding a pop request in the integer wire format.
pub const POP_REQUEST: i32 = -1;

//=== SceneRequest ========================================================

/// Encapsulates the stack operation requested by an executing scene.
///
/// A `Push` carrying an id outside the registry is treated by the
/// manager exactly like `Invalid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneRequest {
    /// Removes the requesting scene from the top of the stack.
    Pop,

    /// Instantiates the given scene on top of the requesting one.
    Push(SceneId),

    /// The scene failed; the host should stop driving the manager.
    Invalid,
}

impl SceneRequest {
    /// Decodes the integer wire format.
    ///
    /// [`POP_REQUEST`] maps to `Pop`, non-negative values to `Push` and
    /// every other value to `Invalid`.
    pub fn from_raw(value: i32) -> Self {
        match value {
            POP_REQUEST => Self::Pop,
            id if id >= 0 => Self::Push(id as SceneId),
            _ => Self::Invalid,
        }
    }

    /// Encodes the request in the integer wire format.
    ///
    /// Returns `None` for `Invalid` and for ids that do not fit an `i32`.
    pub fn to_raw(self) -> Option<i32> {
        match self {
            Self::Pop => Some(POP_REQUEST),
            Self::Push(id) => i32::try_from(id).ok(),
            Self::Invalid => None,
        }
    }
}

impl From<i32> for SceneRequest {
    fn from(value: i32) -> Self {
        Self::from_raw(value)
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_sentinel_decodes_to_pop() {
        assert_eq!(SceneRequest::from_raw(POP_REQUEST), SceneRequest::Pop);
    }

    #[test]
    fn non_negative_values_decode_to_push() {
        assert_eq!(SceneRequest::from_raw(0), SceneRequest::Push(0));
        assert_eq!(SceneRequest::from_raw(7), SceneRequest::Push(7));
    }

    #[test]
    fn other_negative_values_are_invalid() {
        assert_eq!(SceneRequest::from_raw(-2), SceneRequest::Invalid);
        assert_eq!(SceneRequest::from(i32::MIN), SceneRequest::Invalid);
    }

    #[test]
    fn invalid_has_no_raw_form() {
        assert_eq!(SceneRequest::Invalid.to_raw(), None);
        assert_eq!(SceneRequest::Pop.to_raw(), Some(POP_REQUEST));
        assert_eq!(SceneRequest::Push(3).to_raw(), Some(3));
    }
}
