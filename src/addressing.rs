//! # Addressing Modes
//!
//! This module defines the 16 addressing modes of the W65C02S. Each mode
//! determines how the CPU interprets operand bytes and calculates effective
//! addresses, and how the assembler recognizes an operand in source text.
//!
//! Textual recognition lives in [`resolver`].

pub mod resolver;

pub use resolver::{resolve, Resolution};

/// W65C02S addressing mode enumeration.
///
/// The addressing mode determines how the CPU interprets the operand bytes
/// that follow an opcode and how it calculates the effective memory address
/// for the operation.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implied, Accumulator, Stack
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX, IndirectY,
///   ZeroPageIndirect
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect, AbsoluteIndexedIndirect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, TAX, NOP
    Implied,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, ROL A, ASL
    Accumulator,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10 (load immediate value 0x10 into accumulator)
    Immediate,

    /// Push or pull through the stack page (0x0100-0x01FF).
    ///
    /// Examples: PHA, PLP
    Stack,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80 (load from address 0x0080)
    ZeroPage,

    /// Zero page address indexed by X register.
    ///
    /// Example: LDA $80,X (load from address 0x0080 + X, wraps within zero page)
    ZeroPageX,

    /// Zero page address indexed by Y register.
    ///
    /// Example: LDX $80,Y (load from address 0x0080 + Y, wraps within zero page)
    ZeroPageY,

    /// Signed 8-bit offset for branch instructions.
    ///
    /// Example: BEQ $FC (branch back four bytes if the zero flag is set)
    Relative,

    /// Full 16-bit address.
    ///
    /// Example: LDA $1234 (load from address 0x1234)
    Absolute,

    /// 16-bit address indexed by X register.
    ///
    /// Example: LDA $1234,X (load from address 0x1234 + X)
    AbsoluteX,

    /// 16-bit address indexed by Y register.
    ///
    /// Example: LDA $1234,Y (load from address 0x1234 + Y)
    AbsoluteY,

    /// Indirect through a 16-bit pointer.
    ///
    /// Example: JMP ($FFFC). No emulated instruction uses this mode.
    Indirect,

    /// Indirect through a 16-bit pointer indexed by X.
    ///
    /// Example: JMP ($1234,X). No emulated instruction uses this mode.
    AbsoluteIndexedIndirect,

    /// Indexed indirect: (ZP + X) then dereference.
    ///
    /// Example: LDA ($40,X) (add X to 0x40, read 16-bit address from that ZP location, load from result)
    IndirectX,

    /// Indirect indexed: ZP dereference then + Y.
    ///
    /// Example: LDA ($40),Y (read 16-bit address from ZP 0x40, add Y, load from result)
    IndirectY,

    /// Zero page indirect (65C02 only): ZP dereference, no index.
    ///
    /// Example: LDA ($40) (read 16-bit address from ZP 0x40, load from result)
    ZeroPageIndirect,
}

/// The order in which the resolver tries candidate modes.
///
/// Operand syntaxes overlap (`$12` is both a zero-page address and a branch
/// offset, and every indexed form also looks like its unindexed one once the
/// index token is ignored), so the most specific patterns come first. Only
/// the modes whose [`AddressingMode::is_indirect`] matches the operand's
/// parenthesization are considered.
pub const RESOLUTION_ORDER: [AddressingMode; 16] = [
    // Parenthesized forms
    AddressingMode::AbsoluteIndexedIndirect,
    AddressingMode::IndirectY,
    AddressingMode::IndirectX,
    AddressingMode::Indirect,
    AddressingMode::ZeroPageIndirect,
    // Plain forms
    AddressingMode::Accumulator,
    AddressingMode::Stack,
    AddressingMode::Implied,
    AddressingMode::Immediate,
    AddressingMode::Relative,
    AddressingMode::AbsoluteX,
    AddressingMode::AbsoluteY,
    AddressingMode::ZeroPageX,
    AddressingMode::ZeroPageY,
    AddressingMode::Absolute,
    AddressingMode::ZeroPage,
];

impl AddressingMode {
    /// Number of operand bytes that follow the opcode in machine code.
    pub const fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Implied | AddressingMode::Accumulator | AddressingMode::Stack => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY
            | AddressingMode::ZeroPageIndirect => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect
            | AddressingMode::AbsoluteIndexedIndirect => 2,
        }
    }

    /// Whether the mode is written with parentheses in source text.
    pub const fn is_indirect(self) -> bool {
        matches!(
            self,
            AddressingMode::Indirect
                | AddressingMode::AbsoluteIndexedIndirect
                | AddressingMode::IndirectX
                | AddressingMode::IndirectY
                | AddressingMode::ZeroPageIndirect
        )
    }

    /// Short datasheet-style tag (`zp,x`, `(zp),y`, ...) used in messages.
    pub const fn notation(self) -> &'static str {
        match self {
            AddressingMode::Implied => "i",
            AddressingMode::Accumulator => "A",
            AddressingMode::Immediate => "#",
            AddressingMode::Stack => "s",
            AddressingMode::ZeroPage => "zp",
            AddressingMode::ZeroPageX => "zp,x",
            AddressingMode::ZeroPageY => "zp,y",
            AddressingMode::Relative => "r",
            AddressingMode::Absolute => "a",
            AddressingMode::AbsoluteX => "a,x",
            AddressingMode::AbsoluteY => "a,y",
            AddressingMode::Indirect => "(a)",
            AddressingMode::AbsoluteIndexedIndirect => "(a,x)",
            AddressingMode::IndirectX => "(zp,x)",
            AddressingMode::IndirectY => "(zp),y",
            AddressingMode::ZeroPageIndirect => "(zp)",
        }
    }
}

impl std::fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.notation())
    }
}
