//! Rule repository data model — the immutable inputs of the engine.

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Identifier of a rule as written in the model.
pub type RuleId = String;

/// Identifier of a hazard referenced by a rule.
pub type HazardRef = String;

/// A snapshot of the rule repository, as produced by the DSL front-end.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDocument {
    /// Controllers with optional display labels.
    #[serde(default)]
    pub controllers: Vec<Controller>,

    /// Control actions; the table's selected action is an index into this list.
    #[serde(default)]
    pub actions: Vec<ActionRef>,

    /// Context variables, grouped per controller.
    #[serde(default)]
    pub variables: Vec<ControllerVariables>,

    /// Context-table rules.
    #[serde(default)]
    pub rules: Vec<Rule>,

    /// Free-text unsafe control actions (no context).
    #[serde(default)]
    pub ucas: Vec<TextUca>,
}

impl ModelDocument {
    /// Parse a model from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a model from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load a model file. `.toml` files are parsed as TOML, anything else as JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        let doc = if is_toml {
            Self::from_toml(&content)?
        } else {
            Self::from_json(&content)?
        };
        tracing::debug!(
            path = %path.display(),
            actions = doc.actions.len(),
            rules = doc.rules.len(),
            "Model loaded"
        );
        Ok(doc)
    }

    /// Rules that target the given action, in document order.
    pub fn rules_for<'a>(&'a self, action: &'a ActionRef) -> impl Iterator<Item = &'a Rule> + 'a {
        self.rules.iter().filter(move |r| r.action.same_action(action))
    }
}

/// A controller (the subject of generated sentences).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controller {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Reference to a control action: `(controller, action name, optional label)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionRef {
    pub controller: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ActionRef {
    pub fn new(controller: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            name: name.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Identity comparison. The label is display-only and ignored.
    pub fn same_action(&self, other: &ActionRef) -> bool {
        self.controller == other.controller && self.name == other.name
    }
}

/// A context variable and its ordered domain of values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    #[serde(default)]
    pub domain: Vec<String>,
}

impl Variable {
    pub fn new<I, S>(name: impl Into<String>, domain: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            domain: domain.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_value(&self, value: &str) -> bool {
        self.domain.iter().any(|v| v == value)
    }
}

/// The context variables declared for one controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerVariables {
    pub controller: String,
    #[serde(default)]
    pub variables: Vec<Variable>,
}

/// A required `(variable, value)` pair of a rule's context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    pub variable: String,
    pub value: String,
}

impl Assignment {
    pub fn new(variable: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            value: value.into(),
        }
    }
}

/// A context-table rule.
///
/// The assignment list is a conjunction: the rule applies to a combination
/// iff every listed pair agrees with it. Variables it does not mention are
/// unconstrained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: RuleId,
    pub action: ActionRef,
    pub timing_type: TimingType,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    #[serde(default)]
    pub hazard_refs: Vec<HazardRef>,
}

/// A free-text unsafe control action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextUca {
    pub id: String,
    #[serde(default)]
    pub controller: String,
    pub description: String,
}

/// Hazard-timing classification of a control action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimingType {
    Anytime,
    #[serde(alias = "tooEarly")]
    TooEarly,
    #[serde(alias = "tooLate")]
    TooLate,
    #[serde(alias = "stoppedTooSoon")]
    StoppedTooSoon,
    #[serde(alias = "appliedTooLong")]
    AppliedTooLong,
    #[serde(alias = "notProvided")]
    NotProvided,
    Provided,
    #[serde(alias = "wrongTime")]
    WrongTime,
    Never,
}

impl TimingType {
    pub const ALL: [TimingType; 9] = [
        TimingType::Anytime,
        TimingType::TooEarly,
        TimingType::TooLate,
        TimingType::StoppedTooSoon,
        TimingType::AppliedTooLong,
        TimingType::NotProvided,
        TimingType::Provided,
        TimingType::WrongTime,
        TimingType::Never,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimingType::Anytime => "anytime",
            TimingType::TooEarly => "too-early",
            TimingType::TooLate => "too-late",
            TimingType::StoppedTooSoon => "stopped-too-soon",
            TimingType::AppliedTooLong => "applied-too-long",
            TimingType::NotProvided => "not-provided",
            TimingType::Provided => "provided",
            TimingType::WrongTime => "wrong-time",
            TimingType::Never => "never",
        }
    }
}

impl fmt::Display for TimingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimingType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "anytime" => Ok(TimingType::Anytime),
            "too-early" | "tooEarly" => Ok(TimingType::TooEarly),
            "too-late" | "tooLate" => Ok(TimingType::TooLate),
            "stopped-too-soon" | "stoppedTooSoon" => Ok(TimingType::StoppedTooSoon),
            "applied-too-long" | "appliedTooLong" => Ok(TimingType::AppliedTooLong),
            "not-provided" | "notProvided" => Ok(TimingType::NotProvided),
            "provided" => Ok(TimingType::Provided),
            "wrong-time" | "wrongTime" => Ok(TimingType::WrongTime),
            "never" => Ok(TimingType::Never),
            other => Err(Error::UnknownTimingType(other.to_string())),
        }
    }
}

/// Display filter selecting which timing columns the table shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    #[serde(rename = "provided")]
    ProvidedOnly,
    #[serde(rename = "notProvided")]
    NotProvidedOnly,
    #[default]
    #[serde(rename = "both")]
    Both,
}

impl Mode {
    /// Number of hazard columns displayed under this mode.
    pub fn column_count(&self) -> usize {
        match self {
            Mode::ProvidedOnly => 3,
            Mode::NotProvidedOnly => 1,
            Mode::Both => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::ProvidedOnly => "provided",
            Mode::NotProvidedOnly => "notProvided",
            Mode::Both => "both",
        }
    }

    /// Parse a mode string, falling back to [`Mode::Both`] with a diagnostic.
    pub fn parse_lenient(s: &str) -> (Mode, Option<Diagnostic>) {
        match s.parse() {
            Ok(mode) => (mode, None),
            Err(e) => (
                Mode::Both,
                Some(Diagnostic::reported(
                    DiagnosticKind::InvalidMode,
                    format!("{e}; showing both"),
                )),
            ),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "provided" => Ok(Mode::ProvidedOnly),
            "notProvided" => Ok(Mode::NotProvidedOnly),
            "both" => Ok(Mode::Both),
            other => Err(Error::InvalidMode(other.to_string())),
        }
    }
}
