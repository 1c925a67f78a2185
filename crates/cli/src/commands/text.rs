//! `ucatable text` — Print generated sentences for a model.

use std::path::Path;
use ucatable_text::{Synthesizer, Tense, Variant};

pub fn run(
    model: &Path,
    variant: &str,
    tense: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (config, doc) = super::load(model)?;
    let variant: Variant = variant.parse()?;
    let tense: Tense = match tense {
        Some(tense) => tense.parse()?,
        None => config.tense(),
    };

    let synthesizer = Synthesizer::new(&doc).with_draft_marker(config.text.draft_marker.as_str());
    let completions = synthesizer.completions(variant, tense);

    if json {
        println!("{}", serde_json::to_string_pretty(&completions)?);
        return Ok(());
    }

    if completions.is_empty() {
        println!("No rules or UCAs in {}.", model.display());
        return Ok(());
    }

    for c in &completions {
        println!("  {:<24} {}", c.label, c.text);
    }
    println!();
    println!("   {} {variant} sentence(s)", completions.len());

    Ok(())
}
