//! # ucatable Core
//!
//! Domain types, reference resolution, and error definitions for the
//! context-table and rule-text engine. This crate has **no engine logic** —
//! it defines the model that the table and text crates compute against.
//!
//! ## Design Philosophy
//!
//! Everything here is an immutable value object read from an external rule
//! repository snapshot ([`ModelDocument`]). The engine crates borrow it and
//! never mutate it, which keeps every derived artifact a pure function of
//! its inputs.

pub mod diagnostic;
pub mod error;
pub mod index;
pub mod model;

// Re-export key types at crate root for ergonomics
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use error::{Error, Result};
pub use index::ModelIndex;
pub use model::{
    ActionRef, Assignment, Controller, ControllerVariables, HazardRef, Mode, ModelDocument, Rule,
    RuleId, TextUca, TimingType, Variable,
};
