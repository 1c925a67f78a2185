//! Completion catalogue — the sentences an editor offers for insertion.

use crate::clause::Tense;
use crate::synthesizer::{Synthesizer, UcaSource, Variant};
use serde::{Deserialize, Serialize};

/// One insertable sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    /// Id of the rule or free-text UCA the text was generated from.
    pub source_id: String,
    /// Short label for a completion list.
    pub label: String,
    pub text: String,
}

impl Synthesizer<'_> {
    /// Generate `variant` sentences for every rule, then every free-text
    /// UCA, in document order. Empty results are skipped.
    pub fn completions(&self, variant: Variant, tense: Tense) -> Vec<Completion> {
        let doc = self.document();
        let rules = doc.rules.iter().map(UcaSource::Context);
        let ucas = doc.ucas.iter().map(UcaSource::Text);

        rules
            .chain(ucas)
            .filter_map(|source| {
                let text = self.synthesize(source, tense, variant);
                if text.is_empty() {
                    return None;
                }
                let label = match source {
                    UcaSource::Context(rule) => format!("{} ({})", rule.id, rule.timing_type),
                    UcaSource::Text(uca) => uca.id.clone(),
                };
                Some(Completion {
                    source_id: source.id().to_string(),
                    label,
                    text,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ucatable_core::{ActionRef, Assignment, ModelDocument, Rule, TextUca, TimingType};

    fn doc() -> ModelDocument {
        ModelDocument {
            actions: vec![ActionRef::new("Pump", "start")],
            rules: vec![
                Rule {
                    id: "RL1".into(),
                    action: ActionRef::new("Pump", "start"),
                    timing_type: TimingType::NotProvided,
                    assignments: vec![Assignment::new("Level", "high")],
                    hazard_refs: vec!["H1".into()],
                },
                Rule {
                    id: "RL2".into(),
                    action: ActionRef::new("Pump", "start"),
                    timing_type: TimingType::TooEarly,
                    assignments: vec![],
                    hazard_refs: vec!["H2".into()],
                },
            ],
            ucas: vec![
                TextUca {
                    id: "UCA1".into(),
                    controller: "Pump".into(),
                    description: "Pump starts dry.".into(),
                },
                TextUca {
                    id: "UCA2".into(),
                    controller: "Pump".into(),
                    description: String::new(),
                },
            ],
            ..ModelDocument::default()
        }
    }

    #[test]
    fn completions_follow_document_order() {
        let doc = doc();
        let completions = Synthesizer::new(&doc).completions(Variant::Uca, Tense::Past);
        let ids: Vec<&str> = completions.iter().map(|c| c.source_id.as_str()).collect();
        assert_eq!(ids, vec!["RL1", "RL2", "UCA1"]);
        assert_eq!(completions[0].label, "RL1 (not-provided)");
        assert_eq!(
            completions[0].text,
            "Pump did not provide the control action 'start', while Level was high."
        );
        assert_eq!(completions[2].text, "Pump starts dry.");
    }

    #[test]
    fn constraint_completions_mark_free_text() {
        let doc = doc();
        let completions = Synthesizer::new(&doc).completions(Variant::Constraint, Tense::Present);
        assert_eq!(
            completions[1].text,
            "Pump must not provide the control action 'start' too early."
        );
        assert_eq!(completions[2].text, "Pump starts dry. TODO");
        // An empty free-text UCA offers nothing.
        assert_eq!(completions.len(), 3);
    }

    #[test]
    fn completions_serialize() {
        let doc = doc();
        let completions = Synthesizer::new(&doc).completions(Variant::Uca, Tense::Past);
        let json = serde_json::to_string(&completions).unwrap();
        assert!(json.contains("\"source_id\":\"RL1\""));
    }
}
