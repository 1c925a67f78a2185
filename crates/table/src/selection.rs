//! Cell selection — what the host should highlight when a cell is clicked.

use crate::builder::Table;
use crate::merger::CellContent;
use serde::{Deserialize, Serialize};
use ucatable_core::{HazardRef, RuleId};

/// Result of selecting a table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selection {
    /// A "No" cell (or nothing) was selected: clear any highlighting.
    Clear,
    /// A hazardous cell: the rules and hazards to navigate to.
    Rules {
        rule_ids: Vec<RuleId>,
        hazard_refs: Vec<HazardRef>,
    },
}

impl Table {
    /// Select display cell `cell` (0-based, among the hazard cells) of row `row`.
    pub fn select(&self, row: usize, cell: usize) -> Selection {
        let Some(cell) = self.rows.get(row).and_then(|r| r.cells.get(cell)) else {
            return Selection::Clear;
        };
        match &cell.content {
            CellContent::No => Selection::Clear,
            CellContent::Hazards {
                hazard_refs,
                rule_ids,
            } => Selection::Rules {
                rule_ids: rule_ids.clone(),
                hazard_refs: hazard_refs.clone(),
            },
        }
    }

    /// Select by 1-based hazard column instead of cell index.
    pub fn select_column(&self, row: usize, column: usize) -> Selection {
        let Some(r) = self.rows.get(row) else {
            return Selection::Clear;
        };
        match r
            .cells
            .iter()
            .position(|c| (c.column..c.column + c.span).contains(&column))
        {
            Some(index) => self.select(row, index),
            None => Selection::Clear,
        }
    }
}
