//! Plain-text rendering of a [`Table`] as an aligned grid.

use crate::builder::Table;

const SEPARATOR: &str = " | ";

fn width_of(s: &str) -> usize {
    s.chars().count()
}

/// Width of `span` columns starting at `start`, separators included.
fn spanned(widths: &[usize], start: usize, span: usize) -> usize {
    let end = (start + span).min(widths.len());
    let inner: usize = widths[start.min(end)..end].iter().sum();
    inner + SEPARATOR.len() * span.saturating_sub(1)
}

fn push_line(out: &mut String, fields: &[(String, usize)]) {
    let line = fields
        .iter()
        .map(|(text, width)| format!("{text:<width$}"))
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Render a table as text: a group title line, a header line, a rule, and
/// one line per row. Spanning cells stretch over the columns they cover.
pub fn render_text(table: &Table) -> String {
    let header = &table.header;
    let lead = 1 + header.variables.len();
    let hazard_labels: Vec<&str> = header
        .hazard_groups
        .iter()
        .flat_map(|g| g.columns.iter().map(String::as_str))
        .collect();

    let mut widths: Vec<usize> = std::iter::once(header.control_action.as_str())
        .chain(header.variables.iter().map(String::as_str))
        .chain(hazard_labels.iter().copied())
        .map(width_of)
        .collect();

    for row in &table.rows {
        widths[0] = widths[0].max(width_of(&row.action));
        for (i, value) in row.values.iter().enumerate().take(header.variables.len()) {
            widths[1 + i] = widths[1 + i].max(width_of(value));
        }
        for cell in row.cells.iter().filter(|c| c.span == 1) {
            let i = lead + cell.column - 1;
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(width_of(&cell.text()));
            }
        }
    }

    let mut out = String::new();

    let mut groups = vec![(String::new(), spanned(&widths, 0, lead))];
    let mut start = lead;
    for group in &header.hazard_groups {
        let span = group.columns.len();
        groups.push((group.title.clone(), spanned(&widths, start, span)));
        start += span;
    }
    push_line(&mut out, &groups);

    let titles: Vec<(String, usize)> = std::iter::once(header.control_action.as_str())
        .chain(header.variables.iter().map(String::as_str))
        .chain(hazard_labels.iter().copied())
        .zip(&widths)
        .map(|(title, &w)| (title.to_string(), w))
        .collect();
    push_line(&mut out, &titles);

    let total = spanned(&widths, 0, widths.len());
    out.push_str(&"-".repeat(total));
    out.push('\n');

    for row in &table.rows {
        let mut fields = vec![(row.action.clone(), widths[0])];
        fields.extend(
            row.values
                .iter()
                .zip(&widths[1..lead])
                .map(|(value, &w)| (value.clone(), w)),
        );
        fields.extend(
            row.cells
                .iter()
                .map(|cell| (cell.text(), spanned(&widths, lead + cell.column - 1, cell.span))),
        );
        push_line(&mut out, &fields);
    }

    out
}
