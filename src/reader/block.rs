//! The structured `ColorTable { key = value }` syntax. Import only.
//!
//! The whole document is one unit: a malformed colour band aborts the load.
//! Only RF lines are skipped with a warning.

use super::{Grammar, ParseReport, SourceLine, expr, is_comment, parse_band_value, parse_rf};
use crate::error::{ParseError, Result};
use crate::models::{BandKind, ColorBand, OPAQUE, table::optional_field};

/// Locate `colortable { ... }` in the joined text and return the byte offset of
/// the body together with the body itself (between the first `{` and the last `}`).
fn find_block(content: &str) -> Option<(usize, &str)> {
    let lowered = content.to_ascii_lowercase();
    let close = content.rfind('}')?;

    for (at, keyword) in lowered.match_indices("colortable") {
        let after = at + keyword.len();
        let rest = &content[after..];
        let skipped = rest.len() - rest.trim_start().len();
        let open = after + skipped;
        if content[open..].starts_with('{') && open < close {
            return Some((open + 1, &content[open + 1..close]));
        }
    }
    None
}

fn strip_quotes(raw: &str) -> &str {
    raw.trim().trim_matches('"').trim_matches('\'')
}

pub(crate) fn parse_block(lines: &[SourceLine<'_>]) -> Result<ParseReport> {
    let content = lines
        .iter()
        .map(|(_, line)| *line)
        .collect::<Vec<_>>()
        .join("\n");
    let (body_start, body) = find_block(&content).ok_or(ParseError::InvalidBlock)?;

    // The body's first segment sits on the surviving line holding the `{`.
    let first = content[..body_start].matches('\n').count();
    let mut report = ParseReport::new(Grammar::Block);

    for (offset, line) in body.split('\n').enumerate() {
        let line_no = lines.get(first + offset).map(|(n, _)| *n).unwrap_or(0);
        let line = line.trim();
        if line.is_empty() || is_comment(line) {
            continue;
        }
        let Some((key, rest)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let rest = strip_quotes(rest);

        match key.as_str() {
            "category" => report.table.product = rest.to_string(),
            "units" => report.table.units = rest.to_string(),
            "scale" => report.table.scale = optional_field(rest),
            "offset" => report.table.offset = optional_field(rest),
            "step" => report.table.step = optional_field(rest),
            "rf" => match parse_rf(rest) {
                Ok(color) => report.table.rf_color = color,
                Err(err) => report.skip(line_no, err),
            },
            key if key.starts_with("color[") => {
                let Some((raw_value, _)) = key["color[".len()..].split_once(']') else {
                    continue;
                };
                let value = parse_band_value(raw_value)?;
                let spec = expr::parse_band(rest)?;
                let band = match (spec.kind, spec.end) {
                    (BandKind::Gradient, Some(end)) => {
                        ColorBand::gradient(value, spec.start, OPAQUE, end, OPAQUE)
                    }
                    (BandKind::Solid, _) => ColorBand::solid(value, spec.start, OPAQUE),
                    _ => ColorBand::single(value, spec.start, OPAQUE),
                };
                let band = band.ok_or_else(|| ParseError::InvalidValue(raw_value.to_string()))?;
                report.table.push_band(band);
            }
            // Decimals, ND, Label and other keys are accepted and ignored.
            _ => {}
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use crate::error::ParseError;
    use crate::models::{BandKind, ColorFormat, Rgb8};
    use crate::reader::{Grammar, parse, parse_report};

    const SAMPLE: &str = r#"
; GR2Analyst-style block table
ColorTable {
    Category = "Reflectivity"
    Units = 'dBZ'
    Scale = 1
    Offset = 0
    Step = 10
    // bands
    Color[5] = rgb(0, 236, 236)
    color[20] = SOLID(rgb(1, 160, 246))
    Color[35] = gradient(rgb(255, 0, 0), rgb(0, 0, 255))
    RF = 102 0 102
    Decimals = 1
}
"#;

    #[test]
    fn test_parse_sample_block() {
        let report = parse_report(SAMPLE).unwrap();
        assert_eq!(report.grammar, Grammar::Block);
        assert!(report.warnings.is_empty());

        let table = report.table;
        assert_eq!(table.product, "Reflectivity");
        assert_eq!(table.units, "dBZ");
        assert_eq!(table.scale.as_deref(), Some("1"));
        assert_eq!(table.offset.as_deref(), Some("0"));
        assert_eq!(table.step.as_deref(), Some("10"));
        assert_eq!(table.rf_color, Rgb8::new(102, 0, 102));
        assert_eq!(table.bands.len(), 3);

        let single = &table.bands[0];
        assert_eq!(single.value(), 5.0);
        assert_eq!(single.kind(), BandKind::Single);
        assert_eq!(single.start_color(), Rgb8::new(0, 236, 236));
        assert_eq!(single.format(), ColorFormat::Rgb);

        assert_eq!(table.bands[1].kind(), BandKind::Solid);

        let gradient = &table.bands[2];
        assert_eq!(gradient.kind(), BandKind::Gradient);
        assert_eq!(gradient.start_color().to_hex(), "#ff0000");
        assert_eq!(gradient.end_color().map(|c| c.to_hex()).as_deref(), Some("#0000ff"));
    }

    #[test]
    fn test_braces_on_separate_lines() {
        let text = "colortable\n{\ncolor[1]=rgb(1,1,1)\ncolor[2]=rgb(2,2,2)\n}\n";
        let table = parse(text).unwrap();
        assert_eq!(table.bands.len(), 2);
    }

    #[test]
    fn test_missing_braces_is_structural_error() {
        assert!(matches!(
            parse("ColorTable\ncolor[1]=rgb(1,1,1)\n"),
            Err(ParseError::InvalidBlock)
        ));
        assert!(matches!(
            parse("ColorTable {\ncolor[1]=rgb(1,1,1)\n"),
            Err(ParseError::InvalidBlock)
        ));
    }

    #[test]
    fn test_bad_band_aborts_the_document() {
        let text = "ColorTable {\ncolor[1]=rgb(1,1,1)\ncolor[2]=rgb(300,0,0)\n}";
        assert!(matches!(
            parse(text),
            Err(ParseError::InvalidColorComponent(_))
        ));

        let text = "ColorTable {\ncolor[1]=hsluv(1,1,1)\n}";
        assert!(matches!(
            parse(text),
            Err(ParseError::UnsupportedColorFormat(_))
        ));

        let text = "ColorTable {\ncolor[1]=bright red\n}";
        assert!(matches!(parse(text), Err(ParseError::UnknownColorBand(_))));

        let text = "ColorTable {\ncolor[abc]=rgb(1,1,1)\n}";
        assert!(matches!(parse(text), Err(ParseError::InvalidValue(_))));
    }

    #[test]
    fn test_malformed_rf_is_skipped() {
        let text = "ColorTable {\ncolor[1]=rgb(1,1,1)\n\nrf = 1 2\n}";
        let report = parse_report(text).unwrap();
        assert_eq!(report.table.rf_color, Rgb8::WHITE);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].line, 4);
    }

    #[test]
    fn test_content_on_brace_line() {
        let text = "ColorTable { category=\"VEL\"\ncolor[-10]=rgb(0,0,255) }";
        let table = parse(text).unwrap();
        assert_eq!(table.product, "VEL");
        assert_eq!(table.bands.len(), 1);
        assert_eq!(table.bands[0].value(), -10.0);
    }
}
