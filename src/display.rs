//! Text rendering for records: detail blocks and summary tables.

use crate::record::Record;
use std::fmt::Write;

const TABLE_HEADERS: [&str; 4] = ["Name", "Species", "Location", "Population"];

/// Multi-line detail block for one record.
pub fn render_details(record: &Record) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "🐒 {}", record.name);
    let _ = writeln!(out, "   Species:     {}", record.species);
    let _ = writeln!(out, "   Location:    {}", record.location);
    if let Some(position) = record.coordinates {
        let _ = writeln!(
            out,
            "   Coordinates: {:.4}, {:.4}",
            position.latitude, position.longitude
        );
    }
    let _ = writeln!(out, "   Population:  {}", format_population(record.population));
    let _ = writeln!(out, "   Description: {}", record.description);
    let _ = writeln!(out, "   Image:       {}", record.image_url);
    out
}

/// Fixed-width table, one row per record, columns sized to their content.
pub fn render_table(records: &[Record]) -> String {
    let rows: Vec<[String; 4]> = records
        .iter()
        .map(|record| {
            [
                record.name.clone(),
                record.species.clone(),
                record.location.clone(),
                format_population(record.population),
            ]
        })
        .collect();

    let mut widths = TABLE_HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &TABLE_HEADERS.map(str::to_string), &widths);
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    let _ = writeln!(out, "{}", rule.join("-+-"));
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    let _ = writeln!(out, "{}", padded.join(" | ").trim_end());
}

/// Group digits in thousands: `100000` becomes `100,000`.
pub fn format_population(population: u32) -> String {
    let digits = population.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
