//! Context table construction.
//!
//! Ties the pipeline together: resolve the selected action, enumerate its
//! context combinations, classify each against the action's rules, and
//! merge the classifications into display cells. Every problem met on the
//! way becomes a [`Diagnostic`]; a renderable table is always returned.

use crate::TableError;
use crate::columns::{ColumnGroup, hazard_groups};
use crate::combinations::CombinationSpace;
use crate::matcher::RuleMatcher;
use crate::merger::{DisplayCell, merge_cells};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info};
use ucatable_core::{
    ActionRef, Diagnostic, DiagnosticKind, Mode, ModelDocument, ModelIndex, RuleId, Variable,
};

/// Title of the fixed first column.
pub const CONTROL_ACTION_TITLE: &str = "Control Action";

/// Default ceiling on the number of combinations in one table.
pub const DEFAULT_MAX_ROWS: usize = 10_000;

/// Limits applied while building a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    pub max_rows: usize,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_MAX_ROWS,
        }
    }
}

/// Column headers of a context table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub control_action: String,
    pub variables: Vec<String>,
    pub hazard_groups: Vec<ColumnGroup>,
}

/// One combination with its display cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub action: String,
    pub values: Vec<String>,
    pub cells: Vec<DisplayCell>,
}

/// A fully computed context table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub action: Option<ActionRef>,
    pub mode: Mode,
    pub header: Header,
    pub rows: Vec<TableRow>,
}

impl Table {
    fn empty(action: Option<ActionRef>, mode: Mode, variables: &[Variable]) -> Self {
        Self {
            action,
            mode,
            header: Header {
                control_action: CONTROL_ACTION_TITLE.into(),
                variables: variables.iter().map(|v| v.name.clone()).collect(),
                hazard_groups: hazard_groups(mode),
            },
            rows: Vec::new(),
        }
    }

    pub fn column_count(&self) -> usize {
        self.mode.column_count()
    }
}

/// A table plus the diagnostics produced while building it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableReport {
    pub table: Table,
    pub diagnostics: Vec<Diagnostic>,
}

impl TableReport {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Builds context tables from a borrowed model.
///
/// Holds no mutable state: one builder can serve any number of tables,
/// from any number of threads.
pub struct TableBuilder<'a> {
    index: ModelIndex<'a>,
    options: TableOptions,
}

impl<'a> TableBuilder<'a> {
    pub fn new(doc: &'a ModelDocument, options: TableOptions) -> Self {
        Self {
            index: ModelIndex::new(doc),
            options,
        }
    }

    /// Build the table for the action at `action_index` under `mode`.
    pub fn build(&self, action_index: usize, mode: Mode) -> TableReport {
        let mut diagnostics = Vec::new();
        let table = match self.try_build(action_index, mode, &mut diagnostics) {
            Ok(table) => table,
            Err(err) => {
                let kind = match &err {
                    TableError::UnknownAction { .. } => DiagnosticKind::MissingReference,
                    TableError::Oversized { .. } => DiagnosticKind::OversizedResult,
                };
                diagnostics.push(Diagnostic::reported(kind, err.to_string()));
                let action = self.index.action_at(action_index);
                let variables = action
                    .and_then(|a| self.index.variables_of(&a.controller))
                    .unwrap_or(&[]);
                Table::empty(action.cloned(), mode, variables)
            }
        };
        TableReport { table, diagnostics }
    }

    fn try_build(
        &self,
        action_index: usize,
        mode: Mode,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Table, TableError> {
        let action = self
            .index
            .action_at(action_index)
            .ok_or_else(|| TableError::UnknownAction {
                index: action_index,
                count: self.index.document().actions.len(),
            })?;
        let action_label = self.index.action_label_or_raw(action);

        let declared: &[Variable] = match self.index.variables_of(&action.controller) {
            Some(variables) => variables,
            None => {
                debug!(controller = %action.controller, "Controller declares no context variables");
                &[]
            }
        };

        let mut variables = declared;
        let empty: Vec<&Variable> = declared.iter().filter(|v| v.domain.is_empty()).collect();
        if !empty.is_empty() {
            for variable in empty {
                diagnostics.push(Diagnostic::reported(
                    DiagnosticKind::EmptyDomain,
                    format!(
                        "context variable '{}' of '{}' has no values; showing a single row without context",
                        variable.name, action.controller
                    ),
                ));
            }
            variables = &[];
        }

        let space = CombinationSpace::new(variables);
        match space.row_count() {
            Some(rows) if rows <= self.options.max_rows => {}
            _ => {
                return Err(TableError::Oversized {
                    action: action_label.to_string(),
                    limit: self.options.max_rows,
                });
            }
        }

        let matcher = RuleMatcher::with_declared(
            &self.index.document().rules,
            action,
            variables,
            declared,
            mode,
        );
        diagnostics.extend_from_slice(matcher.diagnostics());

        let column_count = mode.column_count();
        let mut seen_collisions: HashSet<(usize, Vec<RuleId>)> = HashSet::new();
        let mut table = Table::empty(Some(action.clone()), mode, variables);

        for values in space.iter() {
            let classified = matcher.classify(values);
            let merged = merge_cells(&classified, column_count);
            for collision in merged.collisions {
                let message = format!(
                    "rules {} share column {} of '{}'; their hazards are merged into one cell",
                    collision.rule_ids.join(", "),
                    collision.column,
                    action_label
                );
                if seen_collisions.insert((collision.column, collision.rule_ids)) {
                    diagnostics.push(Diagnostic::reported(
                        DiagnosticKind::DuplicateColumnRule,
                        message,
                    ));
                }
            }
            table.rows.push(TableRow {
                action: action_label.to_string(),
                values: classified.values,
                cells: merged.cells,
            });
        }

        info!(
            action = %action_label,
            mode = %mode,
            rows = table.rows.len(),
            rules = matcher.rule_count(),
            "Context table built"
        );
        Ok(table)
    }
}
