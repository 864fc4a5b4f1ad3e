//! Console table for filtered offers.

use common::COLUMNS;

use crate::IndexedOffer;

const MAX_CELL: usize = 40;
const ELLIPSIS: &str = "...";

fn cell(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= MAX_CELL {
        return flat;
    }
    let kept: String = flat.chars().take(MAX_CELL - ELLIPSIS.len()).collect();
    format!("{kept}{ELLIPSIS}")
}

/// Formats rows as an index column plus the seven offer columns.
pub fn render_table(rows: &[IndexedOffer<'_>]) -> String {
    if rows.is_empty() {
        return format!("Empty result\nColumns: [{}]\nIndex: []", COLUMNS.join(", "));
    }

    let body: Vec<(String, Vec<String>)> = rows
        .iter()
        .map(|(index, offer)| (index.to_string(), offer.cells().iter().map(|c| cell(c)).collect()))
        .collect();

    let index_width = body.iter().map(|(i, _)| i.len()).max().unwrap_or(0);
    let mut widths: Vec<usize> = COLUMNS.iter().map(|c| c.chars().count()).collect();
    for (_, cells) in &body {
        for (width, text) in widths.iter_mut().zip(cells) {
            *width = (*width).max(text.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(body.len() + 1);
    let header: Vec<String> = COLUMNS
        .iter()
        .zip(&widths)
        .map(|(name, width)| format!("{name:<width$}"))
        .collect();
    lines.push(format!("{:index_width$}  {}", "", header.join("  ")).trim_end().to_string());

    for (index, cells) in &body {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(text, width)| format!("{text:<width$}"))
            .collect();
        lines.push(format!("{index:<index_width$}  {}", padded.join("  ")).trim_end().to_string());
    }

    lines.join("\n")
}
