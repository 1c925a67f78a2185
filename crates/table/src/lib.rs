//! Context tables — every combination of context values for a control
//! action, and which rules make the action hazardous in each.
//!
//! # Pipeline
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐    ┌─────────┐
//! │ Combination  │───▶│ Rule Matcher │───▶│ Cell Merger  │───▶│  Table  │
//! │ Space        │    │ + Columns    │    │              │    │         │
//! └──────────────┘    └──────────────┘    └──────────────┘    └─────────┘
//!   rows of values      (rule, column,      spanning "No" /
//!                        hazards) per row    hazard cells
//! ```
//!
//! Everything here is a pure function of the borrowed [`ModelDocument`]
//! and the selected action and [`Mode`]. Rendering is left to the host;
//! [`render_text`] is a plain-text convenience.
//!
//! # Example
//!
//! ```
//! use ucatable_core::{ActionRef, ModelDocument, Mode};
//! use ucatable_table::{TableBuilder, TableOptions};
//!
//! let doc = ModelDocument {
//!     actions: vec![ActionRef::new("CTRL", "brake")],
//!     ..ModelDocument::default()
//! };
//! let report = TableBuilder::new(&doc, TableOptions::default()).build(0, Mode::Both);
//! assert_eq!(report.table.rows.len(), 1);
//! ```
//!
//! [`ModelDocument`]: ucatable_core::ModelDocument
//! [`Mode`]: ucatable_core::Mode

mod builder;
mod columns;
mod combinations;
mod matcher;
mod merger;
mod render;
mod selection;

pub use builder::{
    CONTROL_ACTION_TITLE, DEFAULT_MAX_ROWS, Header, Table, TableBuilder, TableOptions, TableReport,
    TableRow,
};
pub use columns::{ColumnGroup, NOT_PROVIDED_GROUP, PROVIDED_GROUP, column_for, hazard_groups};
pub use combinations::{CombinationSpace, Combinations, Row};
pub use matcher::{ClassifiedRow, NO, RuleMatch, RuleMatcher, matches_row};
pub use merger::{CellContent, ColumnCollision, DisplayCell, MergedRow, merge_cells};
pub use render::render_text;
pub use selection::Selection;

/// Errors that stop a table from being filled.
///
/// [`TableBuilder::build`] never returns these: it turns them into
/// diagnostics next to a header-only table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("no action at index {index} ({count} actions declared)")]
    UnknownAction { index: usize, count: usize },

    #[error("context combinations for '{action}' exceed the limit of {limit} rows")]
    Oversized { action: String, limit: usize },
}
