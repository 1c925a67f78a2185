//! `ucatable table` — Build and print a context table.

use std::path::Path;
use ucatable_table::{TableBuilder, render_text};

pub fn run(
    model: &Path,
    action: usize,
    mode: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (config, doc) = super::load(model)?;
    let (mode, mode_diagnostic) = super::resolve_mode(mode, &config);

    let builder = TableBuilder::new(&doc, super::table_options(&config));
    let mut report = builder.build(action, mode);
    if let Some(d) = mode_diagnostic {
        report.diagnostics.insert(0, d);
    }

    if json {
        println!("{}", report.to_json_pretty()?);
        return Ok(());
    }

    print!("{}", render_text(&report.table));
    let hazardous = report
        .table
        .rows
        .iter()
        .filter(|r| r.cells.iter().any(|c| !c.is_no()))
        .count();
    println!();
    println!(
        "   {} rows, {} hazardous ({mode})",
        report.table.rows.len(),
        hazardous
    );

    if !report.diagnostics.is_empty() {
        eprintln!();
        eprintln!("Diagnostics:");
        super::print_diagnostics(&report.diagnostics);
    }

    Ok(())
}
