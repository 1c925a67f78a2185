//! `ucatable select` — Show the rules and hazards behind one table cell.

use std::path::Path;
use ucatable_table::{Selection, TableBuilder};
use ucatable_text::{Synthesizer, Variant};

pub fn run(
    model: &Path,
    action: usize,
    mode: Option<&str>,
    row: usize,
    cell: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let (config, doc) = super::load(model)?;
    let (mode, mode_diagnostic) = super::resolve_mode(mode, &config);
    let report = TableBuilder::new(&doc, super::table_options(&config)).build(action, mode);
    super::print_diagnostics(mode_diagnostic.iter().chain(&report.diagnostics));

    let Some(values) = report.table.rows.get(row).map(|r| r.values.join(", ")) else {
        return Err(format!(
            "row {row} out of range ({} rows)",
            report.table.rows.len()
        )
        .into());
    };
    println!("Row {row}: {values}");

    match report.table.select(row, cell) {
        Selection::Clear => println!("   Cell {cell}: No"),
        Selection::Rules {
            rule_ids,
            hazard_refs,
        } => {
            let synthesizer = Synthesizer::new(&doc);
            println!("   Hazards: {}", hazard_refs.join(", "));
            for id in &rule_ids {
                let text = synthesizer
                    .resolve(id)
                    .map(|source| synthesizer.synthesize(source, config.tense(), Variant::Uca))
                    .unwrap_or_default();
                println!("   {id}: {text}");
            }
        }
    }

    Ok(())
}
