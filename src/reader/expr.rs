//! Colour band expressions of the block grammar, e.g.
//! `gradient(rgb(255,0,0), rgb(0,0,255))`.
//!
//! Text is tokenized, parsed into a small call tree and then evaluated into a
//! band shape. Function names are matched case-insensitively.

use crate::error::{ParseError, Result};
use crate::models::{BandKind, Rgb8, colour::parse_component};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Number(String),
    LParen,
    RParen,
    Comma,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Call { name: String, args: Vec<Expr> },
    Number(String),
}

/// A band's colours as written in the expression; the breakpoint comes from the
/// `color[...]` key.
#[derive(Debug, Clone, PartialEq)]
pub struct BandSpec {
    pub kind: BandKind,
    pub start: Rgb8,
    pub end: Option<Rgb8>,
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => f.write_str(n),
            Expr::Call { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
        }
    }
}

fn tokenize(src: &str) -> Option<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = src.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut end = start;
                while let Some(&(i, c)) = chars.peek() {
                    if !(c.is_ascii_alphanumeric() || c == '_') {
                        break;
                    }
                    end = i + c.len_utf8();
                    chars.next();
                }
                tokens.push(Token::Ident(src[start..end].to_ascii_lowercase()));
            }
            c if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => {
                let mut end = start;
                while let Some(&(i, c)) = chars.peek() {
                    if !(c.is_ascii_alphanumeric() || matches!(c, '-' | '+' | '.' | '%')) {
                        break;
                    }
                    end = i + c.len_utf8();
                    chars.next();
                }
                tokens.push(Token::Number(src[start..end].to_string()));
            }
            _ => return None,
        }
    }

    Some(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn expr(&mut self) -> Option<Expr> {
        match self.next()? {
            Token::Number(n) => Some(Expr::Number(n)),
            Token::Ident(name) => {
                if self.next()? != Token::LParen {
                    return None;
                }
                let mut args = Vec::new();
                if self.peek() == Some(&Token::RParen) {
                    self.next();
                    return Some(Expr::Call { name, args });
                }
                loop {
                    args.push(self.expr()?);
                    match self.next()? {
                        Token::Comma => continue,
                        Token::RParen => break,
                        _ => return None,
                    }
                }
                Some(Expr::Call { name, args })
            }
            _ => None,
        }
    }
}

/// Parse a whole expression; trailing tokens make it invalid.
pub fn parse_expr(src: &str) -> Option<Expr> {
    let mut parser = Parser {
        tokens: tokenize(src)?,
        pos: 0,
    };
    let expr = parser.expr()?;
    (parser.pos == parser.tokens.len()).then_some(expr)
}

/// Evaluate the right-hand side of a `color[...]` entry.
pub fn parse_band(src: &str) -> Result<BandSpec> {
    let src = src.trim();
    let expr = parse_expr(src).ok_or_else(|| ParseError::UnknownColorBand(src.to_string()))?;

    let Expr::Call { name, args } = &expr else {
        return Err(ParseError::UnknownColorBand(src.to_string()));
    };

    match (name.as_str(), args.as_slice()) {
        ("rgb", _) => Ok(BandSpec {
            kind: BandKind::Single,
            start: eval_rgb(&expr)?,
            end: None,
        }),
        ("solid", [inner]) => Ok(BandSpec {
            kind: BandKind::Solid,
            start: eval_color(inner)?,
            end: None,
        }),
        ("gradient", [first, second]) => Ok(BandSpec {
            kind: BandKind::Gradient,
            start: eval_color(first)?,
            end: Some(eval_color(second)?),
        }),
        ("solid" | "gradient", _) => Err(ParseError::UnknownColorBand(src.to_string())),
        _ => Err(ParseError::UnsupportedColorFormat(expr.to_string())),
    }
}

fn eval_color(expr: &Expr) -> Result<Rgb8> {
    match expr {
        Expr::Call { name, .. } if name == "rgb" => eval_rgb(expr),
        // hsluv() and friends are valid syntax without an implementation
        Expr::Call { .. } => Err(ParseError::UnsupportedColorFormat(expr.to_string())),
        Expr::Number(_) => Err(ParseError::UnknownColorBand(expr.to_string())),
    }
}

/// `rgb(r, g, b[, a])`. The alpha argument is checked but not carried over.
fn eval_rgb(expr: &Expr) -> Result<Rgb8> {
    let invalid = || ParseError::InvalidColorComponent(expr.to_string());
    let Expr::Call { args, .. } = expr else {
        return Err(invalid());
    };
    if !(3..=4).contains(&args.len()) {
        return Err(invalid());
    }

    let mut channels = [0u8; 4];
    for (slot, arg) in channels.iter_mut().zip(args) {
        *slot = match arg {
            Expr::Number(n) => parse_component(n).ok_or_else(invalid)?,
            Expr::Call { .. } => return Err(invalid()),
        };
    }

    Ok(Rgb8::new(channels[0], channels[1], channels[2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_expression() {
        let band = parse_band("gradient(rgb(255,0,0), rgb(0,0,255))").unwrap();
        assert_eq!(band.kind, BandKind::Gradient);
        assert_eq!(band.start.to_hex(), "#ff0000");
        assert_eq!(band.end.map(Rgb8::to_hex).as_deref(), Some("#0000ff"));
    }

    #[test]
    fn test_single_and_solid() {
        let band = parse_band("RGB( 1, 2 ,3 )").unwrap();
        assert_eq!(band.kind, BandKind::Single);
        assert_eq!(band.start, Rgb8::new(1, 2, 3));
        assert_eq!(band.end, None);

        let band = parse_band("Solid(rgb(10,20,30))").unwrap();
        assert_eq!(band.kind, BandKind::Solid);
        assert_eq!(band.start, Rgb8::new(10, 20, 30));
    }

    #[test]
    fn test_rgb_alpha_argument_is_ignored() {
        let band = parse_band("rgb(10, 20, 30, 40)").unwrap();
        assert_eq!(band.kind, BandKind::Single);
        assert_eq!(band.start, Rgb8::new(10, 20, 30));
    }

    #[test]
    fn test_unsupported_functions() {
        assert!(matches!(
            parse_band("hsluv(120, 50, 50)"),
            Err(ParseError::UnsupportedColorFormat(_))
        ));
        assert!(matches!(
            parse_band("solid(hsluv(120, 50, 50))"),
            Err(ParseError::UnsupportedColorFormat(_))
        ));
        assert!(matches!(
            parse_band("lab(1, 2, 3)"),
            Err(ParseError::UnsupportedColorFormat(_))
        ));
    }

    #[test]
    fn test_unknown_band_definitions() {
        for src in ["", "#ff0000", "255 0 0", "rgb(1,2,3) junk", "solid(", "42"] {
            assert!(
                matches!(parse_band(src), Err(ParseError::UnknownColorBand(_))),
                "expected UnknownColorBand for {:?}",
                src
            );
        }
    }

    #[test]
    fn test_invalid_components() {
        for src in ["rgb(256, 0, 0)", "rgb(1.5, 0, 0)", "rgb(1, 2)", "rgb(-1, 0, 0)"] {
            assert!(
                matches!(parse_band(src), Err(ParseError::InvalidColorComponent(_))),
                "expected InvalidColorComponent for {:?}",
                src
            );
        }
    }

    #[test]
    fn test_expr_display() {
        let expr = parse_expr("gradient(rgb(1,2,3),rgb(4,5,6))").unwrap();
        assert_eq!(expr.to_string(), "gradient(rgb(1, 2, 3), rgb(4, 5, 6))");
    }
}
