//! # Numeric Literals
//!
//! Parses the three literal notations the assembler and interpreter accept:
//!
//! - `$` prefix: hexadecimal (`$1F`, `$C000`)
//! - `%` prefix: binary (`%01000010`)
//! - no prefix: decimal (`066`, `49152`)
//!
//! Parsing is all-or-nothing: a token either parses completely or yields a
//! [`NumberError`]. Signs, separators and surrounding whitespace are rejected.

use thiserror::Error;

/// Failure to parse a numeric literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberError {
    /// The token (or the part after its prefix) was empty.
    #[error("empty numeric literal")]
    Empty,

    /// A character is not a valid digit in the literal's base.
    #[error("invalid digit '{digit}' in base-{radix} literal '{literal}'")]
    InvalidDigit {
        literal: String,
        digit: char,
        radix: u32,
    },

    /// The literal does not fit in 32 bits.
    #[error("numeric literal '{0}' is too large")]
    Overflow(String),
}

/// Syntactic width of a literal, decided by its digit count alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralWidth {
    /// `$XX`, `%XXXXXXXX` or three decimal digits.
    Byte,
    /// `$XXXX`, sixteen binary digits or five decimal digits.
    Word,
}

/// A literal whose width and value have both been checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Literal {
    pub width: LiteralWidth,
    pub value: u16,
}

/// Parse a number from a string (supports hex `$XX`, binary `%XXXXXXXX`, decimal)
///
/// # Examples
///
/// ```
/// use w65c02s::number::parse_number;
///
/// assert_eq!(parse_number("$FF"), Ok(255));
/// assert_eq!(parse_number("%00000101"), Ok(5));
/// assert_eq!(parse_number("042"), Ok(42));
/// assert!(parse_number("$XY").is_err());
/// ```
pub fn parse_number(s: &str) -> Result<u32, NumberError> {
    let (digits, radix) = split_prefix(s);

    if digits.is_empty() {
        return Err(NumberError::Empty);
    }

    // from_str_radix tolerates a leading '+', so check every digit up front
    if let Some(bad) = digits.chars().find(|c| !c.is_digit(radix)) {
        return Err(NumberError::InvalidDigit {
            literal: s.to_string(),
            digit: bad,
            radix,
        });
    }

    u32::from_str_radix(digits, radix).map_err(|_| NumberError::Overflow(s.to_string()))
}

/// Classify a literal by its syntactic width and parse its value.
///
/// Returns `None` when the token is not a literal, has a digit count that
/// matches neither width, or has a value too large for the width it claims
/// (for example `999`).
pub fn classify_literal(s: &str) -> Option<Literal> {
    let (digits, radix) = split_prefix(s);

    let width = match (radix, digits.len()) {
        (16, 2) | (2, 8) | (10, 3) => LiteralWidth::Byte,
        (16, 4) | (2, 16) | (10, 5) => LiteralWidth::Word,
        _ => return None,
    };

    let value = parse_number(s).ok()?;
    let limit = match width {
        LiteralWidth::Byte => 0xFF,
        LiteralWidth::Word => 0xFFFF,
    };

    if value > limit {
        return None;
    }

    Some(Literal {
        width,
        value: value as u16,
    })
}

fn split_prefix(s: &str) -> (&str, u32) {
    if let Some(hex) = s.strip_prefix('$') {
        (hex, 16)
    } else if let Some(bin) = s.strip_prefix('%') {
        (bin, 2)
    } else {
        (s, 10)
    }
}
