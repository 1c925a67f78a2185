//! Cell merger — run-length encodes a classified row into display cells.
//!
//! Consecutive unmatched columns collapse into one spanning "No" cell. The
//! spans of a row always add up to the mode's column count.

use crate::matcher::{ClassifiedRow, NO, RuleMatch};
use serde::{Deserialize, Serialize};
use ucatable_core::{HazardRef, RuleId};

/// What a display cell shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellContent {
    /// Not hazardous.
    No,
    /// Hazardous: the hazards cited and the rules that cite them.
    Hazards {
        hazard_refs: Vec<HazardRef>,
        rule_ids: Vec<RuleId>,
    },
}

/// A renderable cell spanning one or more hazard columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayCell {
    /// First (1-based) hazard column covered by this cell.
    pub column: usize,
    pub span: usize,
    pub content: CellContent,
}

impl DisplayCell {
    fn no(column: usize, span: usize) -> Self {
        Self {
            column,
            span,
            content: CellContent::No,
        }
    }

    pub fn is_no(&self) -> bool {
        matches!(self.content, CellContent::No)
    }

    /// Cell text: "No", or the hazard references joined by ", ".
    /// A matched rule that cites no hazard shows its rule id instead.
    pub fn text(&self) -> String {
        match &self.content {
            CellContent::No => NO.to_string(),
            CellContent::Hazards {
                hazard_refs,
                rule_ids,
            } => {
                if hazard_refs.is_empty() {
                    rule_ids.join(", ")
                } else {
                    hazard_refs.join(", ")
                }
            }
        }
    }

    /// Tooltip naming the rule(s) behind a hazardous cell.
    pub fn tooltip(&self) -> Option<String> {
        match &self.content {
            CellContent::No => None,
            CellContent::Hazards { rule_ids, .. } => Some(rule_ids.join(", ")),
        }
    }
}

/// Several rules that landed in the same column of one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnCollision {
    pub column: usize,
    pub rule_ids: Vec<RuleId>,
}

/// The display cells of one row plus any column collisions found on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedRow {
    pub cells: Vec<DisplayCell>,
    pub collisions: Vec<ColumnCollision>,
}

/// Merge a classified row into display cells for `column_count` columns.
///
/// Rules sharing a column are merged into one cell: hazards in rule order
/// without repeats, and every rule id in the tooltip. Each such column is
/// also returned as a [`ColumnCollision`].
pub fn merge_cells(row: &ClassifiedRow, column_count: usize) -> MergedRow {
    if !row.is_hazardous() {
        return MergedRow {
            cells: vec![DisplayCell::no(1, column_count)],
            collisions: Vec::new(),
        };
    }

    let mut by_column: Vec<Vec<&RuleMatch>> = vec![Vec::new(); column_count + 1];
    for m in &row.matches {
        if (1..=column_count).contains(&m.column) {
            by_column[m.column].push(m);
        }
    }

    let mut cells = Vec::new();
    let mut collisions = Vec::new();
    let mut run = 0;

    for (column, matches) in by_column.iter().enumerate().skip(1) {
        if matches.is_empty() {
            run += 1;
            continue;
        }
        if run > 0 {
            cells.push(DisplayCell::no(column - run, run));
            run = 0;
        }

        let rule_ids: Vec<RuleId> = matches.iter().map(|m| m.rule_id.clone()).collect();
        let mut hazard_refs: Vec<HazardRef> = Vec::new();
        for hazard in matches.iter().flat_map(|m| &m.hazard_refs) {
            if !hazard_refs.contains(hazard) {
                hazard_refs.push(hazard.clone());
            }
        }
        if rule_ids.len() > 1 {
            collisions.push(ColumnCollision {
                column,
                rule_ids: rule_ids.clone(),
            });
        }
        cells.push(DisplayCell {
            column,
            span: 1,
            content: CellContent::Hazards {
                hazard_refs,
                rule_ids,
            },
        });
    }

    if run > 0 {
        cells.push(DisplayCell::no(column_count + 1 - run, run));
    }

    MergedRow { cells, collisions }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classified(matches: &[(&str, usize, &[&str])]) -> ClassifiedRow {
        ClassifiedRow {
            values: vec!["high".into(), "auto".into()],
            matches: matches
                .iter()
                .map(|(id, column, hazards)| RuleMatch {
                    rule_id: id.to_string(),
                    column: *column,
                    hazard_refs: hazards.iter().map(|h| h.to_string()).collect(),
                })
                .collect(),
        }
    }

    fn spans(cells: &[DisplayCell]) -> Vec<(String, usize)> {
        cells.iter().map(|c| (c.text(), c.span)).collect()
    }

    #[test]
    fn unmatched_row_is_one_spanning_no() {
        for columns in [1, 3, 4] {
            let merged = merge_cells(&classified(&[]), columns);
            assert_eq!(merged.cells, vec![DisplayCell::no(1, columns)]);
            assert!(merged.collisions.is_empty());
        }
    }

    #[test]
    fn middle_match_is_flanked_by_no_cells() {
        let merged = merge_cells(&classified(&[("RL1", 2, &["H1"])]), 3);
        assert_eq!(
            spans(&merged.cells),
            vec![("No".into(), 1), ("H1".into(), 1), ("No".into(), 1)]
        );
        assert_eq!(merged.cells[1].column, 2);
        assert_eq!(merged.cells[1].tooltip().as_deref(), Some("RL1"));
        assert_eq!(merged.cells[2].column, 3);
    }

    #[test]
    fn leading_and_trailing_runs_merge() {
        let merged = merge_cells(&classified(&[("RL1", 3, &["H1", "H2"])]), 4);
        assert_eq!(
            spans(&merged.cells),
            vec![("No".into(), 2), ("H1, H2".into(), 1), ("No".into(), 1)]
        );

        let merged = merge_cells(&classified(&[("RL1", 1, &["H1"])]), 4);
        assert_eq!(spans(&merged.cells), vec![("H1".into(), 1), ("No".into(), 3)]);
        assert_eq!(merged.cells[1].column, 2);
    }

    #[test]
    fn adjacent_matches_have_no_gap() {
        let merged = merge_cells(
            &classified(&[("RL1", 1, &["H1"]), ("RL2", 2, &["H2"]), ("RL4", 4, &["H4"])]),
            4,
        );
        assert_eq!(
            spans(&merged.cells),
            vec![
                ("H1".into(), 1),
                ("H2".into(), 1),
                ("No".into(), 1),
                ("H4".into(), 1)
            ]
        );
    }

    #[test]
    fn cells_ascend_and_cover_all_columns() {
        let merged = merge_cells(&classified(&[("RL4", 4, &["H4"]), ("RL2", 2, &["H2"])]), 4);
        let total: usize = merged.cells.iter().map(|c| c.span).sum();
        assert_eq!(total, 4);
        let starts: Vec<usize> = merged.cells.iter().map(|c| c.column).collect();
        assert_eq!(starts, vec![1, 2, 3, 4]);
    }

    #[test]
    fn colliding_rules_merge_hazards_and_report() {
        let merged = merge_cells(
            &classified(&[("RL1", 2, &["H1", "H2"]), ("RL2", 2, &["H2", "H3"])]),
            3,
        );
        assert_eq!(merged.cells.len(), 3);
        assert_eq!(merged.cells[1].text(), "H1, H2, H3");
        assert_eq!(merged.cells[1].tooltip().as_deref(), Some("RL1, RL2"));
        assert_eq!(
            merged.collisions,
            vec![ColumnCollision {
                column: 2,
                rule_ids: vec!["RL1".into(), "RL2".into()],
            }]
        );
    }

    #[test]
    fn rule_without_hazards_shows_rule_id() {
        let merged = merge_cells(&classified(&[("RL7", 1, &[])]), 1);
        assert_eq!(merged.cells[0].text(), "RL7");
        assert!(!merged.cells[0].is_no());
    }
}
