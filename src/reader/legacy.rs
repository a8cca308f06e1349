//! The line-oriented `Key: args...` syntax, which is also the save format.
//!
//! Every line is an independent record, so a bad line is logged and skipped.

use super::{Grammar, ParseReport, SourceLine, parse_band_value, parse_rf};
use crate::error::{ParseError, Result};
use crate::models::{ColorBand, OPAQUE, Rgb8, colour::parse_component, table::optional_field};

fn component(token: &str, line: &str) -> Result<u8> {
    parse_component(token).ok_or_else(|| ParseError::InvalidColorComponent(line.to_string()))
}

fn rgb(tokens: &[&str], line: &str) -> Result<Rgb8> {
    Ok(Rgb8::new(
        component(tokens[0], line)?,
        component(tokens[1], line)?,
        component(tokens[2], line)?,
    ))
}

/// Build a band from `SolidColor`, `SolidColor4`, `Color` or `Color4` arguments.
/// The token count selects the shape:
///
/// | key          | tokens | band                       |
/// |--------------|--------|----------------------------|
/// | solidcolor   | 4      | solid RGB                  |
/// | solidcolor4  | 5      | solid RGBA                 |
/// | color/color4 | 4      | single RGB                 |
/// | color4       | 5      | single RGBA                |
/// | color/color4 | 7      | gradient RGB to RGB        |
/// | color4       | 9      | gradient RGBA to RGBA      |
pub fn parse_band_line(key: &str, rest: &str) -> Result<ColorBand> {
    let t: Vec<&str> = rest.split_whitespace().collect();
    let count_error = |expected: &'static str| ParseError::InvalidTokenCount {
        key: key.to_string(),
        expected,
        found: t.len(),
    };

    let shape = match (key, t.len()) {
        ("solidcolor", 4) | ("solidcolor4", 5) | ("color" | "color4", 4 | 7) | ("color4", 5 | 9) => {
            (key, t.len())
        }
        ("solidcolor", _) => return Err(count_error("4")),
        ("solidcolor4", _) => return Err(count_error("5")),
        ("color", _) => return Err(count_error("4 or 7")),
        _ => return Err(count_error("4, 5, 7 or 9")),
    };

    let value = parse_band_value(t[0])?;
    let band = match shape {
        ("solidcolor", _) => ColorBand::solid(value, rgb(&t[1..4], rest)?, OPAQUE),
        ("solidcolor4", _) => {
            ColorBand::solid(value, rgb(&t[1..4], rest)?, component(t[4], rest)?)
        }
        (_, 4) => ColorBand::single(value, rgb(&t[1..4], rest)?, OPAQUE),
        (_, 5) => ColorBand::single(value, rgb(&t[1..4], rest)?, component(t[4], rest)?),
        (_, 7) => ColorBand::gradient(
            value,
            rgb(&t[1..4], rest)?,
            OPAQUE,
            rgb(&t[4..7], rest)?,
            OPAQUE,
        ),
        _ => ColorBand::gradient(
            value,
            rgb(&t[1..4], rest)?,
            component(t[4], rest)?,
            rgb(&t[5..8], rest)?,
            component(t[8], rest)?,
        ),
    };
    band.ok_or_else(|| ParseError::InvalidValue(t[0].to_string()))
}

pub(crate) fn parse_legacy(lines: &[SourceLine<'_>]) -> ParseReport {
    let mut report = ParseReport::new(Grammar::Legacy);

    for &(line_no, line) in lines {
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let rest = rest.trim();

        match key.as_str() {
            "product" => report.table.product = rest.to_string(),
            "units" => report.table.units = rest.to_string(),
            "scale" => report.table.scale = optional_field(rest),
            "offset" => report.table.offset = optional_field(rest),
            "step" => report.table.step = optional_field(rest),
            "solidcolor" | "solidcolor4" | "color" | "color4" => {
                match parse_band_line(&key, rest) {
                    Ok(band) => report.table.push_band(band),
                    Err(err) => report.skip(line_no, err),
                }
            }
            "rf" => match parse_rf(rest) {
                Ok(color) => report.table.rf_color = color,
                Err(err) => report.skip(line_no, err),
            },
            _ => {}
        }
    }

    report
}
