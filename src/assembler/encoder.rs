//! Instruction encoder for the assembler
//!
//! Emits the opcode byte from [`OPCODE_TABLE`](crate::OPCODE_TABLE) followed by
//! as many operand bytes as the addressing mode carries. Two-byte operands are
//! little-endian; one-byte operands are the low byte of the value.

use crate::addressing::AddressingMode;
use crate::opcodes::{opcode_for, Mnemonic};

/// Encodes one instruction.
///
/// Returns `None` when the mnemonic has no opcode in `mode`. A missing operand
/// for a mode that needs one is encoded as zero.
///
/// ```
/// use w65c02s::assembler::encoder::encode;
/// use w65c02s::{AddressingMode, Mnemonic};
///
/// assert_eq!(encode(Mnemonic::Lda, AddressingMode::Absolute, Some(0x1234)), Some(vec![0xAD, 0x34, 0x12]));
/// assert_eq!(encode(Mnemonic::Tax, AddressingMode::Implied, None), Some(vec![0xAA]));
/// ```
pub fn encode(mnemonic: Mnemonic, mode: AddressingMode, operand: Option<u16>) -> Option<Vec<u8>> {
    let opcode = opcode_for(mnemonic, mode)?;
    let [lo, hi] = operand.unwrap_or(0).to_le_bytes();

    let bytes = match mode.operand_bytes() {
        0 => vec![opcode],
        1 => vec![opcode, lo],
        _ => vec![opcode, lo, hi],
    };

    Some(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_follows_mode_not_value() {
        // A small value in an absolute mode still takes two bytes
        assert_eq!(
            encode(Mnemonic::Sta, AddressingMode::Absolute, Some(0x0010)),
            Some(vec![0x8D, 0x10, 0x00])
        );
        // Zero is emitted, not dropped
        assert_eq!(
            encode(Mnemonic::Lda, AddressingMode::Immediate, Some(0)),
            Some(vec![0xA9, 0x00])
        );
    }

    #[test]
    fn test_accumulator_and_stack_forms() {
        assert_eq!(encode(Mnemonic::Asl, AddressingMode::Accumulator, None), Some(vec![0x0A]));
        assert_eq!(encode(Mnemonic::Inc, AddressingMode::Accumulator, None), Some(vec![0x1A]));
        assert_eq!(encode(Mnemonic::Plp, AddressingMode::Stack, None), Some(vec![0x28]));
    }

    #[test]
    fn test_branch_offset_byte() {
        assert_eq!(
            encode(Mnemonic::Bne, AddressingMode::Relative, Some(0xFB)),
            Some(vec![0xD0, 0xFB])
        );
    }

    #[test]
    fn test_unsupported_combination() {
        assert_eq!(encode(Mnemonic::Stx, AddressingMode::AbsoluteX, Some(0x1234)), None);
        assert_eq!(encode(Mnemonic::Lda, AddressingMode::Accumulator, None), None);
    }
}
