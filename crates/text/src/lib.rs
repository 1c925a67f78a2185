//! Rule-text synthesis — English sentences generated from context rules.
//!
//! Three kinds of sentence are produced from a single rule:
//!
//! - the **UCA** itself: "Heater did not provide the control action
//!   'turn on', while Temp was low."
//! - a **controller constraint**: "Heater must provide the control action
//!   'turn on', while Temp is low."
//! - a **scenario**: the UCA followed by one "Because ..." belief per
//!   assigned context variable.
//!
//! Free-text UCAs pass through verbatim; as constraint or scenario
//! suggestions they carry a draft marker ("TODO") so the user knows to
//! rewrite them.

mod clause;
mod completions;
mod synthesizer;

pub use clause::{Tense, action_phrase, base_clause, join_list, joined_assignments, with_context};
pub use completions::Completion;
pub use synthesizer::{DEFAULT_DRAFT_MARKER, Synthesizer, UcaSource, Variant};

/// Errors from parsing text-generation options.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    #[error("unknown sentence variant '{0}' (expected uca, constraint or scenario)")]
    UnknownVariant(String),

    #[error("unknown tense '{0}' (expected present or past)")]
    UnknownTense(String),
}
