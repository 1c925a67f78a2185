//! Rule matcher — classifies a combination against the rules of one action.
//!
//! Rules are compiled once per (action, mode): assignments are resolved to
//! variable positions and the display column is looked up, so classifying
//! a row is a plain scan over the applicable rules.

use crate::columns::column_for;
use crate::combinations::Row;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, trace};
use ucatable_core::{
    ActionRef, Diagnostic, DiagnosticKind, HazardRef, Mode, Rule, RuleId, Variable,
};

/// Content of an unmatched cell or row.
pub const NO: &str = "No";

/// One rule that renders the action hazardous for a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleMatch {
    pub rule_id: RuleId,
    /// 1-based hazard column.
    pub column: usize,
    pub hazard_refs: Vec<HazardRef>,
}

/// A row together with every rule that matched it.
///
/// No matches is the "not hazardous" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedRow {
    pub values: Row,
    pub matches: Vec<RuleMatch>,
}

impl ClassifiedRow {
    pub fn is_hazardous(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// A rule prepared for matching against rows of a fixed variable layout.
#[derive(Debug)]
struct CompiledRule<'a> {
    rule: &'a Rule,
    column: usize,
    /// `(variable position, required value)`; `None` if some mentioned
    /// variable is not part of the layout, so the rule can never match.
    requirements: Option<Vec<(usize, &'a str)>>,
}

/// Matches rows of one action against its rules under one mode.
#[derive(Debug)]
pub struct RuleMatcher<'a> {
    compiled: Vec<CompiledRule<'a>>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> RuleMatcher<'a> {
    /// Compile the rules of `action` for rows laid out as `variables`.
    pub fn new(rules: &'a [Rule], action: &ActionRef, variables: &'a [Variable], mode: Mode) -> Self {
        Self::with_declared(rules, action, variables, variables, mode)
    }

    /// Like [`RuleMatcher::new`], but rule references are checked against
    /// `declared` while rows are laid out as `layout`. A declared variable
    /// missing from the layout is not an error; the rule just cannot match.
    pub fn with_declared(
        rules: &'a [Rule],
        action: &ActionRef,
        layout: &'a [Variable],
        declared: &[Variable],
        mode: Mode,
    ) -> Self {
        let positions: HashMap<&str, usize> = layout
            .iter()
            .enumerate()
            .map(|(i, v)| (v.name.as_str(), i))
            .collect();

        let mut compiled = Vec::new();
        let mut diagnostics = Vec::new();

        for rule in rules.iter().filter(|r| r.action.same_action(action)) {
            let Some(column) = column_for(mode, rule.timing_type) else {
                debug!(
                    rule = %rule.id,
                    timing = %rule.timing_type,
                    mode = %mode,
                    "Rule not shown under this mode"
                );
                continue;
            };

            let mut requirements = Some(Vec::with_capacity(rule.assignments.len()));
            let mut unknown: Vec<&str> = Vec::new();
            for assignment in &rule.assignments {
                let Some(variable) = declared.iter().find(|v| v.name == assignment.variable) else {
                    unknown.push(assignment.variable.as_str());
                    continue;
                };
                if !variable.has_value(&assignment.value) {
                    diagnostics.push(Diagnostic::reported(
                        DiagnosticKind::MissingReference,
                        format!(
                            "rule '{}' requires {} = '{}', which is not a declared value",
                            rule.id, assignment.variable, assignment.value
                        ),
                    ));
                }
                match positions.get(assignment.variable.as_str()) {
                    Some(&position) => {
                        if let Some(reqs) = requirements.as_mut() {
                            reqs.push((position, assignment.value.as_str()));
                        }
                    }
                    None => {
                        debug!(
                            rule = %rule.id,
                            variable = %assignment.variable,
                            "Variable not in the row layout; rule cannot match"
                        );
                        requirements = None;
                    }
                }
            }

            if !unknown.is_empty() {
                let names: Vec<String> = unknown.iter().map(|n| format!("'{n}'")).collect();
                diagnostics.push(Diagnostic::reported(
                    DiagnosticKind::MissingReference,
                    format!(
                        "rule '{}' references unknown context variable(s) {}",
                        rule.id,
                        names.join(", ")
                    ),
                ));
                requirements = None;
            }

            compiled.push(CompiledRule {
                rule,
                column,
                requirements,
            });
        }

        debug!(
            action = %action.name,
            rules = compiled.len(),
            "Rules compiled for matching"
        );

        Self {
            compiled,
            diagnostics,
        }
    }

    /// Problems found while compiling the rules.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of rules that can appear in the table under this mode.
    pub fn rule_count(&self) -> usize {
        self.compiled.len()
    }

    /// Classify one row. Matches keep rule declaration order.
    pub fn classify(&self, values: Row) -> ClassifiedRow {
        let matches = self
            .compiled
            .iter()
            .filter(|c| {
                c.requirements.as_ref().is_some_and(|reqs| {
                    reqs.iter()
                        .all(|&(position, value)| values.get(position).is_some_and(|v| v == value))
                })
            })
            .map(|c| {
                trace!(rule = %c.rule.id, column = c.column, "Rule matched row");
                RuleMatch {
                    rule_id: c.rule.id.clone(),
                    column: c.column,
                    hazard_refs: c.rule.hazard_refs.clone(),
                }
            })
            .collect();
        ClassifiedRow { values, matches }
    }
}

/// Whether every assignment of `rule` agrees with `row`, where `row` is laid
/// out as `variables`. Unmentioned variables are wildcards.
pub fn matches_row(rule: &Rule, variables: &[Variable], row: &[String]) -> bool {
    rule.assignments.iter().all(|assignment| {
        variables
            .iter()
            .position(|v| v.name == assignment.variable)
            .and_then(|i| row.get(i))
            .is_some_and(|value| *value == assignment.value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ucatable_core::{Assignment, TimingType};

    fn vars() -> Vec<Variable> {
        vec![
            Variable::new("Speed", ["low", "high"]),
            Variable::new("Mode", ["auto", "manual"]),
        ]
    }

    fn brake() -> ActionRef {
        ActionRef::new("CTRL", "brake")
    }

    fn rule(id: &str, timing: TimingType, assignments: &[(&str, &str)], hazards: &[&str]) -> Rule {
        Rule {
            id: id.into(),
            action: brake(),
            timing_type: timing,
            assignments: assignments
                .iter()
                .map(|(v, x)| Assignment::new(*v, *x))
                .collect(),
            hazard_refs: hazards.iter().map(|h| h.to_string()).collect(),
        }
    }

    fn row(values: &[&str]) -> Row {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn unmentioned_variable_is_wildcard() {
        let rules = vec![rule("RL1", TimingType::TooLate, &[("Speed", "high")], &["H1"])];
        let variables = vars();
        let matcher = RuleMatcher::new(&rules, &brake(), &variables, Mode::ProvidedOnly);

        let classified = matcher.classify(row(&["high", "auto"]));
        assert_eq!(
            classified.matches,
            vec![RuleMatch {
                rule_id: "RL1".into(),
                column: 2,
                hazard_refs: vec!["H1".into()],
            }]
        );
        assert!(matcher.classify(row(&["high", "manual"])).is_hazardous());
        assert!(!matcher.classify(row(&["low", "auto"])).is_hazardous());
    }

    #[test]
    fn any_mismatch_excludes_rule() {
        let rules = vec![rule(
            "RL1",
            TimingType::NotProvided,
            &[("Speed", "high"), ("Mode", "manual")],
            &["H2"],
        )];
        let variables = vars();
        let matcher = RuleMatcher::new(&rules, &brake(), &variables, Mode::Both);
        assert!(matcher.classify(row(&["high", "manual"])).is_hazardous());
        assert!(!matcher.classify(row(&["high", "auto"])).is_hazardous());
        assert!(!matcher.classify(row(&["low", "manual"])).is_hazardous());
    }

    #[test]
    fn rules_of_other_actions_ignored() {
        let mut other = rule("RL9", TimingType::Anytime, &[], &["H9"]);
        other.action = ActionRef::new("CTRL", "accelerate");
        let rules = vec![other];
        let variables = vars();
        let matcher = RuleMatcher::new(&rules, &brake(), &variables, Mode::Both);
        assert_eq!(matcher.rule_count(), 0);
        assert!(!matcher.classify(row(&["low", "auto"])).is_hazardous());
    }

    #[test]
    fn timing_outside_mode_ignored() {
        let rules = vec![rule("RL1", TimingType::NotProvided, &[], &["H1"])];
        let variables = vars();
        let matcher = RuleMatcher::new(&rules, &brake(), &variables, Mode::ProvidedOnly);
        assert_eq!(matcher.rule_count(), 0);
        assert!(!matcher.classify(row(&["low", "auto"])).is_hazardous());
    }

    #[test]
    fn empty_context_matches_every_row() {
        let rules = vec![rule("RL1", TimingType::Never, &[], &["H1"])];
        let matcher = RuleMatcher::new(&rules, &brake(), &[], Mode::NotProvidedOnly);
        let classified = matcher.classify(Vec::new());
        assert_eq!(classified.matches.len(), 1);
        assert_eq!(classified.matches[0].column, 1);
    }

    #[test]
    fn unknown_variable_never_matches_and_reports() {
        let rules = vec![rule("RL1", TimingType::Anytime, &[("Pressure", "high")], &["H1"])];
        let variables = vars();
        let matcher = RuleMatcher::new(&rules, &brake(), &variables, Mode::Both);
        assert_eq!(matcher.diagnostics().len(), 1);
        assert_eq!(matcher.diagnostics()[0].kind, DiagnosticKind::MissingReference);
        assert!(!matcher.classify(row(&["high", "auto"])).is_hazardous());
    }

    #[test]
    fn unknown_variables_reported_once_per_rule() {
        let rules = vec![rule(
            "RL1",
            TimingType::Anytime,
            &[("Ghost", "x"), ("Phantom", "y")],
            &["H1"],
        )];
        let variables = vars();
        let matcher = RuleMatcher::new(&rules, &brake(), &variables, Mode::Both);
        assert_eq!(matcher.diagnostics().len(), 1);
        let message = &matcher.diagnostics()[0].message;
        assert!(message.contains("'Ghost'"));
        assert!(message.contains("'Phantom'"));
    }

    #[test]
    fn declared_variable_outside_layout_is_silent() {
        let rules = vec![
            rule("RL1", TimingType::Anytime, &[("Speed", "high")], &["H1"]),
            rule("RL2", TimingType::Anytime, &[], &["H2"]),
        ];
        let declared = vars();
        let matcher = RuleMatcher::with_declared(&rules, &brake(), &[], &declared, Mode::Both);
        assert!(matcher.diagnostics().is_empty());
        let ids: Vec<String> = matcher
            .classify(Vec::new())
            .matches
            .into_iter()
            .map(|m| m.rule_id)
            .collect();
        assert_eq!(ids, vec!["RL2"]);
    }

    #[test]
    fn undeclared_value_is_reported() {
        let rules = vec![rule("RL1", TimingType::Anytime, &[("Speed", "warp")], &["H1"])];
        let variables = vars();
        let matcher = RuleMatcher::new(&rules, &brake(), &variables, Mode::Both);
        assert_eq!(matcher.diagnostics().len(), 1);
        assert!(matcher.diagnostics()[0].message.contains("warp"));
    }

    #[test]
    fn matches_keep_rule_order() {
        let rules = vec![
            rule("RL2", TimingType::NotProvided, &[], &["H2"]),
            rule("RL1", TimingType::Anytime, &[("Speed", "low")], &["H1"]),
        ];
        let variables = vars();
        let matcher = RuleMatcher::new(&rules, &brake(), &variables, Mode::Both);
        let ids: Vec<String> = matcher
            .classify(row(&["low", "auto"]))
            .matches
            .into_iter()
            .map(|m| m.rule_id)
            .collect();
        assert_eq!(ids, vec!["RL2", "RL1"]);
    }

    #[test]
    fn matches_row_agrees_with_matcher() {
        let r = rule("RL1", TimingType::TooEarly, &[("Mode", "manual")], &[]);
        let variables = vars();
        assert!(matches_row(&r, &variables, &row(&["low", "manual"])));
        assert!(!matches_row(&r, &variables, &row(&["low", "auto"])));
    }
}
