//! Text synthesizer — UCA, controller-constraint and scenario sentences.
//!
//! Sentences are assembled from the structure of a rule: the controller is
//! the subject, the timing type picks the verb phrase, and the rule's
//! assignments become the "while ..." context. Unresolved references fall
//! back to their raw names; nothing here fails.

use crate::clause::{Tense, action_phrase, base_clause, with_context};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;
use ucatable_core::{Assignment, ModelDocument, ModelIndex, Rule, TextUca, TimingType};

/// Default suffix of free-text suggestions.
pub const DEFAULT_DRAFT_MARKER: &str = "TODO";

/// Which sentence to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// The unsafe control action itself.
    Uca,
    /// A controller constraint that forbids the UCA.
    Constraint,
    /// A loss scenario explaining the UCA.
    Scenario,
}

impl Variant {
    /// Constraints and scenarios are suggestions the user still has to edit.
    pub fn is_suggestion(&self) -> bool {
        matches!(self, Variant::Constraint | Variant::Scenario)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Uca => "uca",
            Variant::Constraint => "constraint",
            Variant::Scenario => "scenario",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = crate::TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uca" => Ok(Variant::Uca),
            "constraint" => Ok(Variant::Constraint),
            "scenario" => Ok(Variant::Scenario),
            other => Err(crate::TextError::UnknownVariant(other.to_string())),
        }
    }
}

/// The UCA a sentence is generated from.
#[derive(Debug, Clone, Copy)]
pub enum UcaSource<'a> {
    /// A context-table rule.
    Context(&'a Rule),
    /// A free-text UCA without context.
    Text(&'a TextUca),
}

impl UcaSource<'_> {
    pub fn id(&self) -> &str {
        match self {
            UcaSource::Context(rule) => &rule.id,
            UcaSource::Text(uca) => &uca.id,
        }
    }
}

/// Generates sentences against a borrowed model.
pub struct Synthesizer<'a> {
    index: ModelIndex<'a>,
    draft_marker: String,
}

impl<'a> Synthesizer<'a> {
    pub fn new(doc: &'a ModelDocument) -> Self {
        Self {
            index: ModelIndex::new(doc),
            draft_marker: DEFAULT_DRAFT_MARKER.into(),
        }
    }

    /// Suffix appended to free-text suggestions. Empty disables it.
    pub fn with_draft_marker(mut self, marker: impl Into<String>) -> Self {
        self.draft_marker = marker.into();
        self
    }

    pub fn document(&self) -> &'a ModelDocument {
        self.index.document()
    }

    /// Look up a rule or free-text UCA by id. Rules win on a clash.
    pub fn resolve(&self, id: &str) -> Option<UcaSource<'a>> {
        let doc = self.index.document();
        doc.rules
            .iter()
            .find(|r| r.id == id)
            .map(UcaSource::Context)
            .or_else(|| doc.ucas.iter().find(|u| u.id == id).map(UcaSource::Text))
    }

    /// Produce the `variant` sentence for `source`.
    pub fn synthesize(&self, source: UcaSource<'_>, tense: Tense, variant: Variant) -> String {
        match source {
            UcaSource::Text(uca) => self.free_text(uca, variant),
            UcaSource::Context(rule) => match variant {
                Variant::Uca => self.uca(rule, tense),
                Variant::Constraint => self.constraint(rule, tense),
                Variant::Scenario => self.rule_scenario(rule, tense),
            },
        }
    }

    /// Scenario for an optional UCA reference. No reference, or one that
    /// does not resolve, gives an empty string: "no suggestion".
    pub fn scenario(&self, uca_id: Option<&str>, tense: Tense) -> String {
        let Some(id) = uca_id else {
            return String::new();
        };
        match self.resolve(id) {
            Some(source) => self.synthesize(source, tense, Variant::Scenario),
            None => {
                debug!(uca = %id, "Scenario references an unknown UCA");
                String::new()
            }
        }
    }

    /// "Heater did not provide the control action 'turn on', while Temp was low."
    pub fn uca(&self, rule: &Rule, tense: Tense) -> String {
        let (system, action) = self.subject_and_action(rule);
        with_context(
            &base_clause(system, &action, rule.timing_type),
            &rule.assignments,
            tense,
        )
    }

    /// "Heater must provide the control action 'turn on', while Temp is low."
    pub fn constraint(&self, rule: &Rule, tense: Tense) -> String {
        let (system, action) = self.subject_and_action(rule);
        let head = match rule.timing_type {
            TimingType::NotProvided | TimingType::Never => format!("{system} must provide {action}"),
            TimingType::Provided | TimingType::Anytime => {
                format!("{system} must not provide {action}")
            }
            TimingType::TooLate => format!("{system} must provide {action} in time"),
            TimingType::TooEarly => {
                return too_early_constraint(system, &action, &rule.assignments, tense);
            }
            TimingType::StoppedTooSoon => format!("{system} must not stop {action} too soon"),
            TimingType::AppliedTooLong => format!("{system} must not apply {action} too long"),
            TimingType::WrongTime => {
                format!("{system} must provide {action} only at the right time")
            }
        };
        with_context(&head, &rule.assignments, tense)
    }

    fn rule_scenario(&self, rule: &Rule, tense: Tense) -> String {
        let (system, _) = self.subject_and_action(rule);
        let mut text = self.uca(rule, tense);
        for assignment in &rule.assignments {
            if let Some(belief) = causal_belief(system, assignment, rule.timing_type) {
                text.push(' ');
                text.push_str(&belief);
            }
        }
        text
    }

    fn free_text(&self, uca: &TextUca, variant: Variant) -> String {
        if uca.description.trim().is_empty() {
            return String::new();
        }
        if variant.is_suggestion() && !self.draft_marker.is_empty() {
            format!("{} {}", uca.description, self.draft_marker)
        } else {
            uca.description.clone()
        }
    }

    fn subject_and_action<'r>(&self, rule: &'r Rule) -> (&'r str, String)
    where
        'a: 'r,
    {
        if self.index.action(&rule.action).is_none() {
            debug!(
                rule = %rule.id,
                controller = %rule.action.controller,
                action = %rule.action.name,
                "Rule references an undeclared action; using raw names"
            );
        }
        let system = self.index.system_or_raw(&rule.action.controller);
        let action = action_phrase(self.index.action_label_or_raw(&rule.action));
        (system, action)
    }
}

/// "must not provide <action> before <context>." or "... too early." without context.
fn too_early_constraint(
    system: &str,
    action: &str,
    assignments: &[Assignment],
    tense: Tense,
) -> String {
    if assignments.is_empty() {
        format!("{system} must not provide {action} too early.")
    } else {
        format!(
            "{system} must not provide {action} before {}.",
            crate::clause::joined_assignments(assignments, tense)
        )
    }
}

/// One "Because ..." sentence for an assigned variable, if the timing type
/// has a causal template.
fn causal_belief(system: &str, assignment: &Assignment, timing: TimingType) -> Option<String> {
    let Assignment { variable, value } = assignment;
    match timing {
        TimingType::NotProvided | TimingType::Never | TimingType::Provided | TimingType::Anytime => {
            Some(format!(
                "Because {system} incorrectly believes that {variable} is not {value}."
            ))
        }
        TimingType::TooLate => Some(format!(
            "Because {system} realized too late that {variable} is {value}."
        )),
        TimingType::StoppedTooSoon => Some(format!(
            "Because {system} incorrectly believes that {variable} is not {value} anymore."
        )),
        TimingType::AppliedTooLong => Some(format!(
            "Because {system} realized too late that {variable} is not {value} anymore."
        )),
        TimingType::TooEarly | TimingType::WrongTime => None,
    }
}
