//! Converse dictation crate - dictation state machine and the external
//! speech-capability boundary.
//!
//! The dictation lifecycle is a two-state toggle, Idle <-> Listening,
//! enforced by an explicit state machine. The speech engine itself is
//! external: it is injected behind the `SpeechCapability` trait and its
//! recognition results arrive as `SpeechEvent`s queued onto the host event
//! loop.

pub mod capability;
pub mod controller;
pub mod state;

pub use capability::{SpeechCapability, SpeechEvent};
pub use controller::{DictationController, SpeechOutcome, ToggleOutcome};
pub use state::DictationState;
