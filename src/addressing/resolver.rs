//! Addressing-mode recognition for textual operands.
//!
//! The caller splits an instruction's operand field into tokens and strips
//! any parentheses, remembering whether they were present. [`resolve`] then
//! walks [`RESOLUTION_ORDER`] and returns the first mode whose pattern accepts
//! the tokens.
//!
//! | Source          | Tokens           | Indirect | Mode                    |
//! |-----------------|------------------|----------|-------------------------|
//! | `ASL`           | `[]`             | no       | Accumulator             |
//! | `ASL A`         | `["A"]`          | no       | Accumulator             |
//! | `LDA #$10`      | `["#$10"]`       | no       | Immediate               |
//! | `LDA $10,X`     | `["$10", "X"]`   | no       | ZeroPageX               |
//! | `LDA $1234`     | `["$1234"]`      | no       | Absolute                |
//! | `LDA ($20,X)`   | `["$20", "X"]`   | yes      | IndirectX               |
//! | `LDA ($20),Y`   | `["$20", "Y"]`   | yes      | IndirectY               |
//! | `LDA ($20)`     | `["$20"]`        | yes      | ZeroPageIndirect        |

use super::{AddressingMode, RESOLUTION_ORDER};
use crate::number::{classify_literal, LiteralWidth};
use crate::opcodes::{supports, Mnemonic};

/// A successful match: the mode and its raw operand value.
///
/// `operand` is `None` for modes without operand bytes. For branches it is
/// the unrelocated offset byte exactly as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub mode: AddressingMode,
    pub operand: Option<u16>,
}

/// Determine the addressing mode of an instruction's operand tokens.
///
/// Returns `None` when no candidate mode accepts the tokens. Whether the
/// mnemonic actually has an opcode for the returned mode is left to the
/// opcode table, except for the zero-operand modes and branches, which are
/// gated on the mnemonic here.
///
/// # Examples
///
/// ```
/// use w65c02s::addressing::{resolve, AddressingMode, Resolution};
/// use w65c02s::Mnemonic;
///
/// assert_eq!(
///     resolve(false, Mnemonic::Lda, &["$1234"]),
///     Some(Resolution { mode: AddressingMode::Absolute, operand: Some(0x1234) })
/// );
/// assert_eq!(resolve(false, Mnemonic::Lda, &["$123"]), None);
/// ```
pub fn resolve(is_indirect: bool, mnemonic: Mnemonic, operands: &[&str]) -> Option<Resolution> {
    RESOLUTION_ORDER
        .iter()
        .filter(|mode| mode.is_indirect() == is_indirect)
        .find_map(|&mode| {
            accepts(mode, mnemonic, operands).map(|operand| Resolution { mode, operand })
        })
}

/// Pattern for a single mode. `Some(operand)` on a match.
fn accepts(mode: AddressingMode, mnemonic: Mnemonic, operands: &[&str]) -> Option<Option<u16>> {
    use AddressingMode::*;

    match (mode, operands) {
        (Accumulator, []) if supports(mnemonic, Accumulator) => Some(None),
        (Accumulator, [reg]) if reg.eq_ignore_ascii_case("A") => Some(None),
        (Stack, []) if supports(mnemonic, Stack) => Some(None),
        (Implied, []) if supports(mnemonic, Implied) => Some(None),

        (Immediate, [value]) => {
            let digits = value.strip_prefix('#')?;
            literal(digits, LiteralWidth::Byte).map(Some)
        }
        (Relative, [value]) if mnemonic.is_branch() => {
            literal(value, LiteralWidth::Byte).map(Some)
        }

        (ZeroPage, [value]) | (ZeroPageIndirect, [value]) => {
            literal(value, LiteralWidth::Byte).map(Some)
        }
        (Absolute, [value]) | (Indirect, [value]) => literal(value, LiteralWidth::Word).map(Some),

        (ZeroPageX, [value, index]) | (IndirectX, [value, index]) => {
            indexed(value, index, "X", LiteralWidth::Byte)
        }
        (ZeroPageY, [value, index]) | (IndirectY, [value, index]) => {
            indexed(value, index, "Y", LiteralWidth::Byte)
        }
        (AbsoluteX, [value, index]) | (AbsoluteIndexedIndirect, [value, index]) => {
            indexed(value, index, "X", LiteralWidth::Word)
        }
        (AbsoluteY, [value, index]) => indexed(value, index, "Y", LiteralWidth::Word),

        _ => None,
    }
}

fn literal(token: &str, width: LiteralWidth) -> Option<u16> {
    classify_literal(token)
        .filter(|lit| lit.width == width)
        .map(|lit| lit.value)
}

fn indexed(value: &str, index: &str, register: &str, width: LiteralWidth) -> Option<Option<u16>> {
    if !index.eq_ignore_ascii_case(register) {
        return None;
    }
    literal(value, width).map(Some)
}
