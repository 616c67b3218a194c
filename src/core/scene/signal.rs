//=========================================================================
// Critical Signal
//=========================================================================
//
// Out-of-band shutdown channel from scenes to the scene manager.
//
// Architecture:
//   Scene hook ──raise()──> Sender<CriticalError>
//                                  ↓
//   SceneManager ←──take()─── Receiver (after every hook call)
//                                  ↓
//                         unwind the whole stack
//
// A raised signal bypasses the pop/resume cascade entirely.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::debug;

//=== CriticalError =======================================================

/// Diagnostic payload of a critical signal.
///
/// A signal with code `0` and no description is silent: the manager
/// still unwinds, but writes no error diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriticalError {
    /// Scene-defined error code.
    pub code: i32,

    /// Optional human-readable description.
    pub description: Option<String>,
}

impl CriticalError {
    /// Creates a new critical error payload.
    pub fn new(code: i32, description: Option<&str>) -> Self {
        Self {
            code,
            description: description.map(str::to_owned),
        }
    }

    /// Returns true if the error carries no diagnostic information.
    pub fn is_silent(&self) -> bool {
        self.code == 0 && self.description.is_none()
    }
}

impl fmt::Display for CriticalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(description) => write!(f, "#{}: '{}'", self.code, description),
            None => write!(f, "#{}", self.code),
        }
    }
}

//=== CriticalSignal ======================================================

/// Handle scenes use to request immediate, unconditional shutdown.
///
/// Passed to every lifecycle hook. Cloning is cheap; all clones feed the
/// same manager.
#[derive(Debug, Clone)]
pub struct CriticalSignal {
    sender: Sender<CriticalError>,
}

impl CriticalSignal {
    /// Raises a critical error with a code and an optional description.
    pub fn raise(&self, code: i32, description: Option<&str>) {
        self.send(CriticalError::new(code, description));
    }

    /// Raises a silent critical error.
    pub fn shutdown(&self) {
        self.send(CriticalError::new(0, None));
    }

    fn send(&self, error: CriticalError) {
        // The receiver lives as long as the manager; a closed channel means
        // there is nothing left to shut down.
        let _ = self.sender.send(error);
    }
}

//=== SignalChannel =======================================================

/// Receiving side of the critical signal, owned by the scene manager.
#[derive(Debug)]
pub(crate) struct SignalChannel {
    signal: CriticalSignal,
    receiver: Receiver<CriticalError>,
}

impl SignalChannel {
    /// Creates a fresh channel.
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            signal: CriticalSignal { sender },
            receiver,
        }
    }

    /// Returns the sending handle passed to scene hooks.
    pub fn signal(&self) -> &CriticalSignal {
        &self.signal
    }

    /// Drains all pending signals and returns the first one raised.
    ///
    /// Later signals raised in the same burst are folded into the first.
    pub fn take(&self) -> Option<CriticalError> {
        let first = self.receiver.try_recv().ok()?;
        let folded = self.receiver.try_iter().count();
        if folded > 0 {
            debug!(target: "scene", "{} further critical signals folded into {}", folded, first);
        }
        Some(first)
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_channel_yields_nothing() {
        let channel = SignalChannel::new();
        assert_eq!(channel.take(), None);
    }

    #[test]
    fn first_signal_wins_and_rest_are_drained() {
        let channel = SignalChannel::new();
        let signal = channel.signal().clone();

        signal.raise(3, Some("out of memory"));
        signal.shutdown();

        assert_eq!(
            channel.take(),
            Some(CriticalError::new(3, Some("out of memory")))
        );
        assert_eq!(channel.take(), None);
    }

    #[test]
    fn silent_only_without_code_and_description() {
        assert!(CriticalError::new(0, None).is_silent());
        assert!(!CriticalError::new(1, None).is_silent());
        assert!(!CriticalError::new(0, Some("gone")).is_silent());
    }

    #[test]
    fn display_format() {
        assert_eq!(
            CriticalError::new(5, Some("bad state")).to_string(),
            "#5: 'bad state'"
        );
        assert_eq!(CriticalError::new(5, None).to_string(), "#5");
    }
}
