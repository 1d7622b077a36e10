//! Assembly source parser
//!
//! Turns raw text into [`AssemblyLine`]s. Blank and comment-only lines are
//! dropped, so the position of a line in [`parse_source`]'s output is its
//! index among the meaningful lines.

use crate::assembler::{validate_label, AssemblerError, ErrorType};

/// A parsed line of assembly source
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyLine {
    /// Line number in source file (1-indexed)
    pub line_number: usize,

    /// Optional label definition (e.g., "START" from "START:")
    pub label: Option<String>,

    /// Optional mnemonic as written (e.g., "lda")
    pub mnemonic: Option<String>,

    /// Optional operand text (e.g., "#$42", "$1234,X")
    pub operand: Option<String>,

    /// Optional comment text (after semicolon)
    pub comment: Option<String>,

    /// Byte span (start, end) of the statement within the source line
    pub span: (usize, usize),
}

/// An operand field split into tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperandField {
    /// The field was parenthesized.
    pub indirect: bool,

    /// Value and index tokens with parentheses removed (`($20),Y` gives `["$20", "Y"]`).
    pub tokens: Vec<String>,
}

/// Parses every meaningful line of `source`.
///
/// Each entry is the parse result for one non-blank line; a malformed line
/// does not stop the rest of the file from being parsed.
pub fn parse_source(source: &str) -> Vec<Result<AssemblyLine, AssemblerError>> {
    source
        .lines()
        .enumerate()
        .filter_map(|(i, raw)| parse_line(i + 1, raw))
        .collect()
}

/// Parses one raw source line. `None` for blank and comment-only lines.
pub fn parse_line(line_number: usize, raw: &str) -> Option<Result<AssemblyLine, AssemblerError>> {
    let (code, comment) = match raw.find(';') {
        Some(i) => (&raw[..i], Some(raw[i + 1..].trim().to_string())),
        None => (raw, None),
    };

    let text = code.trim();
    if text.is_empty() {
        return None;
    }

    let start = code.len() - code.trim_start().len();
    Some(parse_statement(line_number, text, start, comment))
}

fn parse_statement(
    line_number: usize,
    text: &str,
    start: usize,
    comment: Option<String>,
) -> Result<AssemblyLine, AssemblerError> {
    let (label, rest, rest_start) = match text.find(':') {
        Some(colon) => {
            let name = text[..colon].trim();
            validate_label(name).map_err(|message| AssemblerError {
                error_type: ErrorType::InvalidLabel,
                line: line_number,
                column: start,
                span: (start, start + colon),
                message,
            })?;

            let after = &text[colon + 1..];
            let rest = after.trim_start();
            let offset = start + colon + 1 + (after.len() - rest.len());
            (Some(name.to_string()), rest, offset)
        }
        None => (None, text, start),
    };

    let (mnemonic, operand) = match rest.split_once(char::is_whitespace) {
        _ if rest.is_empty() => (None, None),
        Some((mnemonic, operand)) => {
            let operand = operand.trim();
            (
                Some(mnemonic.to_string()),
                (!operand.is_empty()).then(|| operand.to_string()),
            )
        }
        None => (Some(rest.to_string()), None),
    };

    let span = if mnemonic.is_some() {
        (rest_start, rest_start + rest.len())
    } else {
        (start, start + text.len())
    };

    Ok(AssemblyLine {
        line_number,
        label,
        mnemonic,
        operand,
        comment,
        span,
    })
}

/// Splits an operand field into tokens.
///
/// Tokens are separated by a comma when the field has one, otherwise by
/// whitespace. A `(` in the first token marks the field as indirect; the
/// parentheses are removed from the tokens. X must be indexed inside the
/// parentheses and Y outside, so `($20),X` and `($20,Y)` are rejected.
///
/// ```
/// use w65c02s::assembler::parser::split_operands;
///
/// let field = split_operands("($20),Y").unwrap();
/// assert!(field.indirect);
/// assert_eq!(field.tokens, vec!["$20", "Y"]);
///
/// let field = split_operands("$10, X").unwrap();
/// assert!(!field.indirect);
/// assert_eq!(field.tokens, vec!["$10", "X"]);
/// ```
pub fn split_operands(field: &str) -> Result<OperandField, String> {
    let field = field.trim();
    if field.is_empty() {
        return Ok(OperandField {
            indirect: false,
            tokens: Vec::new(),
        });
    }

    let mut tokens: Vec<String> = if field.contains(',') {
        field.split(',').map(|t| t.trim().to_string()).collect()
    } else {
        field.split_whitespace().map(str::to_string).collect()
    };

    let Some(open) = tokens[0].find('(') else {
        if field.contains(')') {
            return Err(format!("unexpected ')' in operand '{}'", field));
        }
        return Ok(OperandField {
            indirect: false,
            tokens,
        });
    };

    if open != 0 {
        return Err(format!("unexpected text before '(' in operand '{}'", field));
    }
    if !field.contains(')') {
        return Err(format!("missing ')' in operand '{}'", field));
    }

    let closed_before_index = tokens[0].contains(')');
    let inner = &tokens[0][1..];
    let inner = match inner.split_once(')') {
        Some((value, "")) => value,
        Some(_) => return Err(format!("unexpected text after ')' in operand '{}'", field)),
        None => inner,
    };
    tokens[0] = inner.trim().to_string();

    for token in tokens.iter_mut().skip(1) {
        *token = token.replace(')', "").trim().to_string();
    }

    if let [_, index] = tokens.as_slice() {
        if closed_before_index && index.eq_ignore_ascii_case("X") {
            return Err(format!("X index must be inside the parentheses in '{}'", field));
        }
        if !closed_before_index && index.eq_ignore_ascii_case("Y") {
            return Err(format!("Y index must be outside the parentheses in '{}'", field));
        }
    }

    Ok(OperandField {
        indirect: true,
        tokens,
    })
}

/// Rewrites every identifier in `token` through `replace`.
///
/// Identifiers are whole words starting with a letter or `_`. Numeric
/// literals (`$C0DE`, `%0101`, `042`) are copied through untouched even when
/// their digits look like letters. `replace` returns `Some(text)` to
/// substitute or `None` to keep the identifier.
///
/// ```
/// use w65c02s::assembler::parser::substitute_identifiers;
///
/// let out = substitute_identifiers::<()>("#DATA", |ident| {
///     Ok((ident == "DATA").then(|| "$10".to_string()))
/// });
/// assert_eq!(out, Ok("#$10".to_string()));
///
/// // `$BEEF` is a literal, not an identifier
/// let out = substitute_identifiers::<()>("$BEEF", |_| Ok(Some("$0000".to_string())));
/// assert_eq!(out, Ok("$BEEF".to_string()));
/// ```
pub fn substitute_identifiers<E>(
    token: &str,
    mut replace: impl FnMut(&str) -> Result<Option<String>, E>,
) -> Result<String, E> {
    let bytes = token.as_bytes();
    let mut out = String::with_capacity(token.len());
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];

        if c == b'$' || c == b'%' || c.is_ascii_digit() {
            let end = scan(bytes, i + 1, |b| b.is_ascii_alphanumeric());
            out.push_str(&token[i..end]);
            i = end;
        } else if c.is_ascii_alphabetic() || c == b'_' {
            let end = scan(bytes, i + 1, |b| b.is_ascii_alphanumeric() || b == b'_');
            let ident = &token[i..end];
            match replace(ident)? {
                Some(text) => out.push_str(&text),
                None => out.push_str(ident),
            }
            i = end;
        } else {
            // Multi-byte characters are copied whole
            let ch_len = token[i..].chars().next().map_or(1, char::len_utf8);
            out.push_str(&token[i..i + ch_len]);
            i += ch_len;
        }
    }

    Ok(out)
}

fn scan(bytes: &[u8], from: usize, accept: impl Fn(u8) -> bool) -> usize {
    bytes[from..]
        .iter()
        .position(|&b| !accept(b))
        .map_or(bytes.len(), |n| from + n)
}
