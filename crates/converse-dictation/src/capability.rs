//! External speech-capability boundary.
//!
//! The host environment may or may not provide a continuous speech
//! recognition engine. When it does, the engine is injected behind
//! `SpeechCapability`; when it does not, the dictation controller is built
//! without one and toggling degrades to a no-op.

use converse_core::error::ConverseError;

/// Handle to an external continuous speech-recognition engine.
///
/// `start` and `stop` are fire-and-forget toward the engine; recognition
/// results come back asynchronously as [`SpeechEvent`]s queued onto the
/// host event loop and fed to the dictation controller. `abort` tears the
/// binding down immediately, releasing the microphone without waiting for
/// a final result.
pub trait SpeechCapability: Send {
    /// Begin a listening session.
    fn start(&mut self) -> Result<(), ConverseError>;

    /// End the listening session, letting the engine flush a final result.
    fn stop(&mut self) -> Result<(), ConverseError>;

    /// Tear down the binding immediately. Must be safe to call in any
    /// state, including after `stop`.
    fn abort(&mut self);
}

/// Asynchronous events delivered by the speech engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpeechEvent {
    /// The engine's current hypothesis. Cumulative: each event carries the
    /// whole transcript so far, not a delta, so consumers replace rather
    /// than append.
    Result { transcript: String, is_final: bool },

    /// Recognition failed. The code is engine-specific ("no-speech",
    /// "not-allowed", ...) and is diagnostic only.
    Error { code: String },

    /// The engine stopped on its own, e.g. after a silence timeout.
    End,
}
