//! Converse core - shared types, configuration, events, and errors.
//!
//! Everything the conversation controller and its collaborators agree on
//! lives here: the message log and input buffer, the request lifecycle
//! state, the domain events broadcast to presentation, and the TOML
//! configuration.

pub mod config;
pub mod error;
pub mod events;
pub mod types;

pub use config::ConverseConfig;
pub use error::{ConverseError, Result};
pub use events::{ConverseEvent, DictationStopReason};
pub use types::*;
