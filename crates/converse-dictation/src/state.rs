//! Dictation state machine with thread-safe transitions.
//!
//! Enforces valid state transitions for the dictation lifecycle:
//! - Idle -> Listening (start dictation)
//! - Listening -> Idle (user toggle, engine end, or engine error)

use std::fmt;
use std::sync::{Arc, Mutex};

use converse_core::error::ConverseError;

/// Operational state of dictation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DictationState {
    /// No dictation in progress. Ready to start.
    Idle,
    /// Actively listening for speech input via the microphone.
    Listening,
}

impl fmt::Display for DictationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictationState::Idle => write!(f, "Idle"),
            DictationState::Listening => write!(f, "Listening"),
        }
    }
}

impl DictationState {
    /// Returns whether a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: &DictationState) -> bool {
        matches!(
            (self, target),
            (DictationState::Idle, DictationState::Listening)
                | (DictationState::Listening, DictationState::Idle)
        )
    }
}

/// Thread-safe state machine for dictation transitions.
///
/// All transitions are validated before being applied, returning an error
/// if the requested transition is not permitted from the current state.
#[derive(Debug, Clone)]
pub struct StateMachine {
    state: Arc<Mutex<DictationState>>,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    /// Create a new state machine initialized to `Idle`.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(DictationState::Idle)),
        }
    }

    /// Returns the current state.
    pub fn current(&self) -> DictationState {
        *self.state.lock().expect("state mutex poisoned")
    }

    /// Attempt to transition to the target state.
    pub fn transition(&self, target: DictationState) -> Result<(), ConverseError> {
        let mut state = self.state.lock().expect("state mutex poisoned");
        if state.can_transition_to(&target) {
            tracing::debug!("Dictation state: {} -> {}", *state, target);
            *state = target;
            Ok(())
        } else {
            Err(ConverseError::Dictation(format!(
                "Invalid state transition: {} -> {}",
                *state, target
            )))
        }
    }

    /// Force the state machine back to Idle (used for error recovery).
    pub fn reset(&self) {
        let mut state = self.state.lock().expect("state mutex poisoned");
        if *state != DictationState::Idle {
            tracing::debug!("Dictation state machine reset to Idle from {}", *state);
        }
        *state = DictationState::Idle;
    }
}

// =============================================================================
// Tests
// =============================================================================
