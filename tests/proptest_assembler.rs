//! Property-based tests for the assembler.
//!
//! These tests verify assembler invariants like:
//! - Number format equivalence (hex, decimal, binary produce same bytes)
//! - No panics on malformed input
//! - ROM dispatch and the interpreter agreeing on generated programs

use proptest::prelude::*;
use w65c02s::{assemble, interpret, FlatMemory, CPU};

// ========== Number Format Equivalence Tests ==========

proptest! {
    /// Property: Decimal, hex, and binary formats produce identical bytes for immediate operands
    #[test]
    fn prop_number_formats_equivalent_immediate(value in 0u8..=255u8) {
        let hex = assemble(&format!("LDA #${:02X}", value)).unwrap();
        let dec = assemble(&format!("LDA #{:03}", value)).unwrap();
        let bin = assemble(&format!("LDA #%{:08b}", value)).unwrap();

        prop_assert_eq!(&hex.bytes, &dec.bytes);
        prop_assert_eq!(&hex.bytes, &bin.bytes);
        prop_assert_eq!(&hex.bytes, &vec![0xA9, value]);
    }

    /// Property: Absolute operands are emitted little-endian in every format
    #[test]
    fn prop_number_formats_equivalent_absolute(addr in 0u16..=0xFFFF) {
        let hex = assemble(&format!("STA ${:04X}", addr)).unwrap();
        let dec = assemble(&format!("STA {:05}", addr)).unwrap();

        let [lo, hi] = addr.to_le_bytes();
        prop_assert_eq!(&hex.bytes, &vec![0x8D, lo, hi]);
        prop_assert_eq!(&hex.bytes, &dec.bytes);
    }
}

// ========== Robustness ==========

proptest! {
    /// Property: the assembler never panics, whatever the input
    #[test]
    fn prop_no_panic_on_arbitrary_input(source in "\\PC{0,200}") {
        let _ = assemble(&source);
    }

    /// Property: operand-shaped garbage is rejected, not mis-assembled
    #[test]
    fn prop_no_panic_on_operand_noise(operand in "[#$%(),XYxy0-9A-Fa-f ]{0,12}") {
        let _ = assemble(&format!("LDA {}", operand));
    }
}

// ========== Execution Agreement ==========

fn instruction() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<u8>().prop_map(|v| format!("LDA #${:02X}", v)),
        any::<u8>().prop_map(|v| format!("LDX #${:02X}", v)),
        any::<u8>().prop_map(|v| format!("LDY #${:02X}", v)),
        any::<u8>().prop_map(|v| format!("ADC #${:02X}", v)),
        any::<u8>().prop_map(|v| format!("SBC #${:02X}", v)),
        any::<u8>().prop_map(|v| format!("EOR #${:02X}", v)),
        any::<u8>().prop_map(|v| format!("CMP #${:02X}", v)),
        any::<u8>().prop_map(|v| format!("STA ${:02X}", v)),
        any::<u8>().prop_map(|v| format!("INC ${:02X},X", v)),
        any::<u8>().prop_map(|v| format!("LDA (${:02X}),Y", v)),
        Just("TAX".to_string()),
        Just("TYA".to_string()),
        Just("INX".to_string()),
        Just("DEY".to_string()),
        Just("ASL A".to_string()),
        Just("ROR".to_string()),
        Just("PHA".to_string()),
        Just("PLA".to_string()),
        Just("PHP".to_string()),
        Just("SEC".to_string()),
        Just("CLC".to_string()),
    ]
}

proptest! {
    /// Property: ROM dispatch and the interpreter end in the same state
    #[test]
    fn prop_rom_and_interpreter_agree(lines in prop::collection::vec(instruction(), 1..40)) {
        let source = lines.join("\n");

        let output = assemble(&source).unwrap();
        let mut rom = CPU::new(FlatMemory::new());
        rom.execute_from_rom(&output.bytes).unwrap();

        let mut interpreted = CPU::new(FlatMemory::new());
        interpret(&mut interpreted, &source).unwrap();

        prop_assert_eq!(rom.a(), interpreted.a());
        prop_assert_eq!(rom.x(), interpreted.x());
        prop_assert_eq!(rom.y(), interpreted.y());
        prop_assert_eq!(rom.sp(), interpreted.sp());
        prop_assert_eq!(rom.pc(), interpreted.pc());
        prop_assert_eq!(rom.status(), interpreted.status());
        prop_assert_eq!(rom.memory().as_slice(), interpreted.memory().as_slice());
    }
}
