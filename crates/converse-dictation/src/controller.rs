//! Dictation controller: toggle surface and engine-event handling.
//!
//! Owns the dictation state machine and the optional speech-capability
//! binding. The controller never touches the input buffer itself; it tells
//! its owner what to do with each engine event via [`SpeechOutcome`], which
//! keeps buffer ownership exclusively with the conversation controller.

use tracing::{debug, warn};

use crate::capability::{SpeechCapability, SpeechEvent};
use crate::state::{DictationState, StateMachine};

/// Result of a toggle attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The engine was started; now Listening.
    Started,
    /// The engine was stopped; back to Idle.
    Stopped,
    /// No capability is bound, or the engine refused to start. No state
    /// change.
    Unavailable,
}

/// What the owner should do after an engine event is handled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpeechOutcome {
    /// Overwrite the input buffer with the engine's full hypothesis.
    ReplaceTranscript { transcript: String, is_final: bool },
    /// The engine stopped on its own; dictation is Idle again.
    Stopped,
    /// Recognition failed (already logged); dictation is Idle again.
    Failed { code: String },
    /// The event changed nothing (e.g. a stray end event while Idle).
    Ignored,
}

/// Wraps the external speech capability into a start/stop state machine.
pub struct DictationController {
    machine: StateMachine,
    capability: Option<Box<dyn SpeechCapability>>,
}

impl DictationController {
    /// A controller with no speech capability. Toggling is a no-op that
    /// reports unavailability; transcript events are still honored.
    pub fn new() -> Self {
        Self {
            machine: StateMachine::new(),
            capability: None,
        }
    }

    /// A controller bound to a speech engine for the controller's lifetime.
    /// The binding is aborted on drop, releasing the microphone on every
    /// teardown path.
    pub fn with_capability(capability: Box<dyn SpeechCapability>) -> Self {
        Self {
            machine: StateMachine::new(),
            capability: Some(capability),
        }
    }

    /// Returns the current dictation state.
    pub fn state(&self) -> DictationState {
        self.machine.current()
    }

    pub fn is_listening(&self) -> bool {
        self.machine.current() == DictationState::Listening
    }

    /// Whether a speech capability is bound.
    pub fn is_available(&self) -> bool {
        self.capability.is_some()
    }

    /// Flip between Idle and Listening.
    ///
    /// Starting calls the engine's `start`; stopping calls `stop` and lets
    /// the engine flush a final result event. Without a capability this is
    /// a no-op.
    pub fn toggle(&mut self) -> ToggleOutcome {
        let Some(capability) = self.capability.as_mut() else {
            warn!("Dictation toggle ignored: no speech capability in this host");
            return ToggleOutcome::Unavailable;
        };

        if self.machine.current() == DictationState::Listening {
            if let Err(e) = capability.stop() {
                // Release the session state even if the engine could not
                // stop cleanly.
                warn!(error = %e, "Speech engine stop failed");
            }
            self.machine.reset();
            debug!("Dictation stopped by toggle");
            ToggleOutcome::Stopped
        } else {
            match capability.start() {
                Ok(()) => {
                    if let Err(e) = self.machine.transition(DictationState::Listening) {
                        warn!(error = %e, "Dictation state transition failed");
                        return ToggleOutcome::Unavailable;
                    }
                    debug!("Dictation started");
                    ToggleOutcome::Started
                }
                Err(e) => {
                    warn!(error = %e, "Speech engine failed to start");
                    ToggleOutcome::Unavailable
                }
            }
        }
    }

    /// Handle an asynchronous event from the speech engine.
    ///
    /// Transcript results are honored in any state and always carry the
    /// whole cumulative hypothesis. End and error events move Listening
    /// back to Idle; while Idle they change nothing.
    pub fn handle_event(&mut self, event: SpeechEvent) -> SpeechOutcome {
        match event {
            SpeechEvent::Result {
                transcript,
                is_final,
            } => SpeechOutcome::ReplaceTranscript {
                transcript,
                is_final,
            },
            SpeechEvent::End => {
                if self.machine.current() == DictationState::Listening {
                    self.machine.reset();
                    debug!("Speech engine ended on its own");
                    SpeechOutcome::Stopped
                } else {
                    SpeechOutcome::Ignored
                }
            }
            SpeechEvent::Error { code } => {
                warn!(code = %code, "Speech recognition error");
                if self.machine.current() == DictationState::Listening {
                    self.machine.reset();
                    SpeechOutcome::Failed { code }
                } else {
                    SpeechOutcome::Ignored
                }
            }
        }
    }
}

impl Default for DictationController {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DictationController {
    fn drop(&mut self) {
        // Guaranteed microphone release: abort the binding on every
        // teardown path, listening or not.
        if let Some(capability) = self.capability.as_mut() {
            capability.abort();
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
