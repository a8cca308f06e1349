use crate::models::{ColorTable, Rgb8};
use crate::reader::{Grammar, scan::ScanEntry};
use comfy_table::{Attribute, Cell, CellAlignment, Table};

fn ansi_block(c: Rgb8) -> String {
    format!("\x1b[38;2;{};{};{}m█\x1b[0m", c.r, c.g, c.b)
}

/// One truecolour block per band, lowest breakpoint first. Gradients show
/// their start and end colours.
pub fn colour_bar(table: &ColorTable) -> String {
    let mut s = String::new();
    for band in table.sorted_bands() {
        s.push_str(&ansi_block(band.start_color()));
        if let Some(end) = band.end_color() {
            s.push_str(&ansi_block(end));
        }
    }
    s
}

fn header(name: &str) -> Cell {
    Cell::new(name)
        .add_attribute(Attribute::Bold)
        .set_alignment(CellAlignment::Center)
}

pub fn summary_table(entries: &[ScanEntry]) -> Table {
    let mut table = Table::new();
    table
        .set_header(vec![
            header(""),
            header("File"),
            header("Grammar"),
            header("Bands"),
            header("Min"),
            header("Max"),
            header("Skipped"),
            Cell::new("Colourbar").add_attribute(Attribute::Bold),
        ])
        .load_preset(comfy_table::presets::ASCII_BORDERS_ONLY_CONDENSED);

    for entry in entries {
        let file = entry.path.display().to_string();
        let row = match &entry.result {
            Ok(report) => {
                let (min_v, max_v) = report
                    .table
                    .value_range()
                    .map(|(lo, hi)| (format!("{:.2}", lo), format!("{:.2}", hi)))
                    .unwrap_or_else(|| ("-".to_string(), "-".to_string()));
                let status = if report.warnings.is_empty() { "✅" } else { "⚠️" };
                let grammar = match report.grammar {
                    Grammar::Block => "block",
                    Grammar::Legacy => "legacy",
                };
                vec![
                    Cell::new(status).set_alignment(CellAlignment::Center),
                    Cell::new(file),
                    Cell::new(grammar).set_alignment(CellAlignment::Center),
                    Cell::new(report.table.bands.len()).set_alignment(CellAlignment::Center),
                    Cell::new(min_v).set_alignment(CellAlignment::Center),
                    Cell::new(max_v).set_alignment(CellAlignment::Center),
                    Cell::new(report.warnings.len()).set_alignment(CellAlignment::Center),
                    Cell::new(colour_bar(&report.table)),
                ]
            }
            Err(_) => vec![
                Cell::new("❌").set_alignment(CellAlignment::Center),
                Cell::new(file),
                Cell::new("-").set_alignment(CellAlignment::Center),
                Cell::new("-").set_alignment(CellAlignment::Center),
                Cell::new("-").set_alignment(CellAlignment::Center),
                Cell::new("-").set_alignment(CellAlignment::Center),
                Cell::new("-").set_alignment(CellAlignment::Center),
                Cell::new(""),
            ],
        };
        table.add_row(row);
    }

    table
}

pub fn print_table_summary(entries: &[ScanEntry]) {
    println!("\nColour table summary:\n{}", summary_table(entries));

    let mut warnings = Vec::new();
    let mut errors = Vec::new();
    for entry in entries {
        match &entry.result {
            Ok(report) => {
                for w in &report.warnings {
                    warnings.push(format!(
                        "  ⚠️ {}:{}: {}",
                        entry.path.display(),
                        w.line,
                        w.message
                    ));
                }
            }
            Err(e) => errors.push(format!("  ❌ {}: {}", entry.path.display(), e)),
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for warning in warnings {
            println!("{}", warning);
        }
    }

    if !errors.is_empty() {
        println!("\nErrors:");
        for error in errors {
            println!("{}", error);
        }
    }

    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use crate::models::ColorBand;
    use crate::reader::parse_report;
    use std::path::PathBuf;

    #[test]
    fn test_colour_bar_orders_by_value() {
        let mut table = ColorTable::new();
        table.push_band(ColorBand::single(10.0, Rgb8::new(0, 0, 255), 255).unwrap());
        table.push_band(ColorBand::single(0.0, Rgb8::new(255, 0, 0), 255).unwrap());
        let bar = colour_bar(&table);
        let red = bar.find("255;0;0").unwrap();
        let blue = bar.find("0;0;255").unwrap();
        assert!(red < blue);
    }

    #[test]
    fn test_gradient_contributes_two_blocks() {
        let mut table = ColorTable::new();
        table.push_band(ColorBand::gradient(0.0, Rgb8::BLACK, 255, Rgb8::WHITE, 255).unwrap());
        assert_eq!(colour_bar(&table).matches('█').count(), 2);
    }

    #[test]
    fn test_summary_table_lists_every_entry() {
        let entries = vec![
            ScanEntry {
                path: PathBuf::from("good.pal"),
                size_bytes: 10,
                result: parse_report("Color: 0 0 0 0\nColor: 5 1 2\nColor: 10 9 9 9"),
            },
            ScanEntry {
                path: PathBuf::from("broken.pal"),
                size_bytes: 10,
                result: Err(ParseError::InvalidBlock),
            },
        ];
        let rendered = summary_table(&entries).to_string();
        assert!(rendered.contains("good.pal"));
        assert!(rendered.contains("broken.pal"));
        assert!(rendered.contains("legacy"));
        assert!(rendered.contains("10.00"));
    }
}
