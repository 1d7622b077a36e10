//! Opcode table validation tests
//!
//! Verifies that the opcode metadata table is complete and consistent with
//! the mnemonic and addressing mode sets.

use w65c02s::opcodes::{opcode_for, supports};
use w65c02s::{AddressingMode, Mnemonic, OPCODE_TABLE};

#[test]
fn test_opcode_table_completeness() {
    assert_eq!(OPCODE_TABLE.len(), 256);

    for (opcode, metadata) in OPCODE_TABLE.iter().enumerate() {
        assert!(
            !metadata.mnemonic.is_empty(),
            "Opcode 0x{:02X} has empty mnemonic",
            opcode
        );
        assert!(
            (1..=3).contains(&metadata.size_bytes),
            "Opcode 0x{:02X} has invalid size: {}",
            opcode,
            metadata.size_bytes
        );
    }
}

#[test]
fn test_size_matches_addressing_mode() {
    for (opcode, metadata) in OPCODE_TABLE.iter().enumerate() {
        // BBRn/BBSn carry an extra zero page byte
        if metadata.mnemonic.starts_with("BB") {
            continue;
        }
        assert_eq!(
            metadata.size_bytes,
            1 + metadata.addressing_mode.operand_bytes(),
            "Opcode 0x{:02X} ({})",
            opcode,
            metadata.mnemonic
        );
    }
}

#[test]
fn test_every_mnemonic_has_an_opcode() {
    for mnemonic in Mnemonic::ALL {
        let count = OPCODE_TABLE
            .iter()
            .filter(|m| m.instruction == Some(mnemonic) && !m.reserved)
            .count();
        assert!(count > 0, "{} has no opcode", mnemonic);
    }
}

#[test]
fn test_opcode_for_inverts_table() {
    for (opcode, metadata) in OPCODE_TABLE.iter().enumerate() {
        let Some(mnemonic) = metadata.instruction else {
            continue;
        };
        if metadata.reserved {
            continue;
        }
        assert_eq!(
            opcode_for(mnemonic, metadata.addressing_mode),
            Some(opcode as u8),
            "{} {}",
            mnemonic,
            metadata.addressing_mode
        );
    }
}

#[test]
fn test_reserved_slots_are_nops() {
    let reserved: Vec<_> = OPCODE_TABLE.iter().filter(|m| m.reserved).collect();

    assert_eq!(reserved.len(), 46);
    assert!(reserved
        .iter()
        .all(|m| m.mnemonic == "NOP" && m.instruction == Some(Mnemonic::Nop)));
}

#[test]
fn test_foreign_opcodes_have_no_handler() {
    for opcode in [0x00, 0x20, 0x40, 0x4C, 0x60, 0x64, 0x6C, 0x80, 0x89] {
        assert_eq!(
            OPCODE_TABLE[opcode].instruction,
            None,
            "Opcode 0x{:02X} ({})",
            opcode,
            OPCODE_TABLE[opcode].mnemonic
        );
    }
}

#[test]
fn test_known_encodings() {
    use AddressingMode::*;

    assert_eq!(opcode_for(Mnemonic::Lda, Immediate), Some(0xA9));
    assert_eq!(opcode_for(Mnemonic::Lda, ZeroPageIndirect), Some(0xB2));
    assert_eq!(opcode_for(Mnemonic::Adc, IndirectY), Some(0x71));
    assert_eq!(opcode_for(Mnemonic::Sbc, AbsoluteX), Some(0xFD));
    assert_eq!(opcode_for(Mnemonic::Stx, ZeroPageY), Some(0x96));
    assert_eq!(opcode_for(Mnemonic::Dec, Accumulator), Some(0x3A));
    assert_eq!(opcode_for(Mnemonic::Bvs, Relative), Some(0x70));
    assert_eq!(opcode_for(Mnemonic::Plp, Stack), Some(0x28));

    assert!(!supports(Mnemonic::Sta, Immediate));
    assert!(!supports(Mnemonic::Ldx, ZeroPageX));
    assert!(!supports(Mnemonic::Ldy, AbsoluteY));
}
