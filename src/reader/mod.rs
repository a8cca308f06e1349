use crate::error::{ParseError, Result};
use crate::models::{ColorTable, Rgb8, colour::parse_component};
use serde::Serialize;
use std::fs;
use std::path::Path;

pub mod block;
pub mod expr;
pub mod legacy;
pub mod scan;

const COMMENT_MARKERS: [&str; 3] = [";", "#", "//"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Grammar {
    Block,
    Legacy,
}

/// A line that was skipped without aborting the load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineWarning {
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ParseReport {
    pub table: ColorTable,
    pub grammar: Grammar,
    pub warnings: Vec<LineWarning>,
}

/// A surviving source line: 1-based line number and trimmed text.
pub(crate) type SourceLine<'a> = (usize, &'a str);

pub(crate) fn is_comment(line: &str) -> bool {
    COMMENT_MARKERS.iter().any(|m| line.starts_with(m))
}

/// Drop blank and comment lines, keeping the original line numbers.
pub(crate) fn normalize(text: &str) -> Vec<SourceLine<'_>> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !is_comment(line))
        .collect()
}

pub(crate) fn parse_rf(rest: &str) -> Result<Rgb8> {
    let parts: Vec<&str> = rest.split_whitespace().collect();
    let invalid = || ParseError::InvalidRf(rest.trim().to_string());
    let [r, g, b] = parts.as_slice() else {
        return Err(invalid());
    };
    Ok(Rgb8::new(
        parse_component(r).ok_or_else(invalid)?,
        parse_component(g).ok_or_else(invalid)?,
        parse_component(b).ok_or_else(invalid)?,
    ))
}

pub(crate) fn parse_band_value(raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseError::InvalidValue(raw.trim().to_string()))
}

impl ParseReport {
    pub(crate) fn new(grammar: Grammar) -> Self {
        ParseReport {
            table: ColorTable::new(),
            grammar,
            warnings: Vec::new(),
        }
    }

    /// Record a recoverable error against a source line.
    pub(crate) fn skip(&mut self, line: usize, err: ParseError) {
        tracing::warn!(line, "Skipping line: {}", err);
        self.warnings.push(LineWarning {
            line,
            message: err.to_string(),
        });
    }
}

/// Parse either grammar, reporting which one was used and what was skipped.
pub fn parse_report(text: &str) -> Result<ParseReport> {
    let lines = normalize(text);

    let is_block = lines
        .first()
        .map(|(_, first)| first.to_ascii_lowercase().contains("colortable"))
        .unwrap_or(false);

    let report = if is_block {
        block::parse_block(&lines)?
    } else {
        legacy::parse_legacy(&lines)
    };

    tracing::debug!(
        grammar = ?report.grammar,
        bands = report.table.bands.len(),
        skipped = report.warnings.len(),
        "Parsed colour table"
    );
    Ok(report)
}

pub fn parse(text: &str) -> Result<ColorTable> {
    parse_report(text).map(|report| report.table)
}

pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<ParseReport> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_report(&content)
}
