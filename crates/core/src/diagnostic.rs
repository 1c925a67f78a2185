//! Non-fatal diagnostics reported alongside engine results.
//!
//! The engine never fails into the host: every operation returns something
//! renderable, and whatever went wrong on the way is described here.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// The kind of problem a [`Diagnostic`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// An action, variable, or value reference could not be resolved.
    MissingReference,
    /// A context variable declares no values.
    EmptyDomain,
    /// A mode string was not one of the recognised values.
    InvalidMode,
    /// The number of combinations exceeds the configured ceiling.
    OversizedResult,
    /// Several rules landed in the same cell of the same row.
    DuplicateColumnRule,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::MissingReference => "missing_reference",
            DiagnosticKind::EmptyDomain => "empty_domain",
            DiagnosticKind::InvalidMode => "invalid_mode",
            DiagnosticKind::OversizedResult => "oversized_result",
            DiagnosticKind::DuplicateColumnRule => "duplicate_column_rule",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single reported problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Create a diagnostic and log it at `warn` level.
    pub fn reported(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        let diagnostic = Self::new(kind, message);
        warn!(kind = %diagnostic.kind, "{}", diagnostic.message);
        diagnostic
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}
