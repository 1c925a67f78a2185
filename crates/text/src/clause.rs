//! Sentence building blocks: base clauses and context-clause joining.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ucatable_core::{Assignment, TimingType};

/// Verb tense of context clauses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tense {
    /// "is": current belief, used for constraints.
    Present,
    /// "was": historical, used for UCAs and scenarios.
    #[default]
    Past,
}

impl Tense {
    pub fn verb(&self) -> &'static str {
        match self {
            Tense::Present => "is",
            Tense::Past => "was",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tense::Present => "present",
            Tense::Past => "past",
        }
    }
}

impl fmt::Display for Tense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tense {
    type Err = crate::TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(Tense::Present),
            "past" => Ok(Tense::Past),
            other => Err(crate::TextError::UnknownTense(other.to_string())),
        }
    }
}

/// "the control action '<label>'"
pub fn action_phrase(label: &str) -> String {
    format!("the control action '{label}'")
}

/// "<system> did not provide <action>", "<system> provided <action> too late", ...
pub fn base_clause(system: &str, action: &str, timing: TimingType) -> String {
    match timing {
        TimingType::NotProvided | TimingType::Never => format!("{system} did not provide {action}"),
        TimingType::Provided | TimingType::Anytime => format!("{system} provided {action}"),
        TimingType::TooEarly => format!("{system} provided {action} too early"),
        TimingType::TooLate => format!("{system} provided {action} too late"),
        TimingType::StoppedTooSoon => format!("{system} stopped {action} too soon"),
        TimingType::AppliedTooLong => format!("{system} applied {action} too long"),
        TimingType::WrongTime => format!("{system} provided {action} at the wrong time"),
    }
}

/// Join items with ", ", putting "and" right before the last one when
/// there are at least two. `k` items give `k - 1` separators.
pub fn join_list(items: &[String]) -> String {
    let mut out = String::new();
    let last = items.len().saturating_sub(1);
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        if i == last && items.len() >= 2 {
            out.push_str("and ");
        }
        out.push_str(item);
    }
    out
}

/// "<var> was <value>, <var> was <value>, and <var> was <value>"
pub fn joined_assignments(assignments: &[Assignment], tense: Tense) -> String {
    let items: Vec<String> = assignments
        .iter()
        .map(|a| format!("{} {} {}", a.variable, tense.verb(), a.value))
        .collect();
    join_list(&items)
}

/// Finish a sentence: `<head>, while <context>.`, or `<head>.` without context.
pub fn with_context(head: &str, assignments: &[Assignment], tense: Tense) -> String {
    if assignments.is_empty() {
        format!("{head}.")
    } else {
        format!("{head}, while {}.", joined_assignments(assignments, tense))
    }
}
