//! `ucatable actions` — List the actions of a model.

use std::path::Path;
use ucatable_core::{ModelDocument, ModelIndex};

pub fn run(model: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = ModelDocument::load(model)?;
    let index = ModelIndex::new(&doc);

    if doc.actions.is_empty() {
        println!("No actions declared in {}.", model.display());
        return Ok(());
    }

    println!(
        "{:<6} {:<20} {:<24} {:<6} {}",
        "INDEX", "CONTROLLER", "ACTION", "RULES", "VARIABLES"
    );
    println!("{}", "-".repeat(70));

    for (i, action) in doc.actions.iter().enumerate() {
        let rules = doc.rules_for(action).count();
        let variables = index
            .variables_of(&action.controller)
            .map(|v| v.len().to_string())
            .unwrap_or_else(|| "-".into());
        println!(
            "{:<6} {:<20} {:<24} {:<6} {}",
            i,
            index.system_or_raw(&action.controller),
            index.action_label_or_raw(action),
            rules,
            variables
        );
    }

    println!();
    println!(
        "   {} action(s), {} rule(s), {} free-text UCA(s)",
        doc.actions.len(),
        doc.rules.len(),
        doc.ucas.len()
    );

    Ok(())
}
