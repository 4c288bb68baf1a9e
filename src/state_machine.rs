//! Core dialogue state machine
//!
//! Classifies each utterance, tracks multi-turn state across techniques,
//! games and follow-up questions, and selects Pippy's reply. Everything in
//! here is synchronous; remote generation is left to the runtime.

pub mod activities;
pub mod intent;
pub mod lexicon;
mod response;
pub mod selector;
pub mod state;

#[cfg(test)]
mod proptests;

pub use intent::Intent;
pub use lexicon::Voice;
pub use response::{Response, Selection};
pub use state::{ConversationState, GameKind, Mode, Technique};
