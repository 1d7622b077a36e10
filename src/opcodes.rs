//! # Opcode Metadata Table
//!
//! This module contains the complete 256-entry opcode metadata table that serves as the
//! single source of truth for W65C02S instruction encoding, shared by the execution
//! engine and the assembler.
//!
//! The table covers:
//! - **Emulated instructions** - the closed [`Mnemonic`] set, one entry per supported
//!   (mnemonic, addressing mode) pair
//! - **Reserved opcodes** - slots the W65C02S datasheet documents as no-ops, each with
//!   its documented operand width
//! - **Foreign opcodes** - real 65C02 instructions this simulator does not model
//!   (JMP, JSR, BIT, STZ, ...), kept so decoding is total and errors can name them
//!
//! Each opcode entry includes:
//! - Mnemonic text
//! - The emulated instruction, if any
//! - Addressing mode
//! - Instruction size in bytes

use crate::addressing::AddressingMode;
use std::fmt;
use std::str::FromStr;

/// The closed set of emulated instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bmi,
    Bne,
    Bpl,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
}

impl Mnemonic {
    /// Every emulated mnemonic, in alphabetical order.
    pub const ALL: [Mnemonic; 50] = [
        Mnemonic::Adc,
        Mnemonic::And,
        Mnemonic::Asl,
        Mnemonic::Bcc,
        Mnemonic::Bcs,
        Mnemonic::Beq,
        Mnemonic::Bmi,
        Mnemonic::Bne,
        Mnemonic::Bpl,
        Mnemonic::Bvc,
        Mnemonic::Bvs,
        Mnemonic::Clc,
        Mnemonic::Cld,
        Mnemonic::Cli,
        Mnemonic::Clv,
        Mnemonic::Cmp,
        Mnemonic::Cpx,
        Mnemonic::Cpy,
        Mnemonic::Dec,
        Mnemonic::Dex,
        Mnemonic::Dey,
        Mnemonic::Eor,
        Mnemonic::Inc,
        Mnemonic::Inx,
        Mnemonic::Iny,
        Mnemonic::Lda,
        Mnemonic::Ldx,
        Mnemonic::Ldy,
        Mnemonic::Lsr,
        Mnemonic::Nop,
        Mnemonic::Ora,
        Mnemonic::Pha,
        Mnemonic::Php,
        Mnemonic::Pla,
        Mnemonic::Plp,
        Mnemonic::Rol,
        Mnemonic::Ror,
        Mnemonic::Sbc,
        Mnemonic::Sec,
        Mnemonic::Sed,
        Mnemonic::Sei,
        Mnemonic::Sta,
        Mnemonic::Stx,
        Mnemonic::Sty,
        Mnemonic::Tax,
        Mnemonic::Tay,
        Mnemonic::Tsx,
        Mnemonic::Txa,
        Mnemonic::Txs,
        Mnemonic::Tya,
    ];

    /// Upper-case assembler spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Mnemonic::Adc => "ADC",
            Mnemonic::And => "AND",
            Mnemonic::Asl => "ASL",
            Mnemonic::Bcc => "BCC",
            Mnemonic::Bcs => "BCS",
            Mnemonic::Beq => "BEQ",
            Mnemonic::Bmi => "BMI",
            Mnemonic::Bne => "BNE",
            Mnemonic::Bpl => "BPL",
            Mnemonic::Bvc => "BVC",
            Mnemonic::Bvs => "BVS",
            Mnemonic::Clc => "CLC",
            Mnemonic::Cld => "CLD",
            Mnemonic::Cli => "CLI",
            Mnemonic::Clv => "CLV",
            Mnemonic::Cmp => "CMP",
            Mnemonic::Cpx => "CPX",
            Mnemonic::Cpy => "CPY",
            Mnemonic::Dec => "DEC",
            Mnemonic::Dex => "DEX",
            Mnemonic::Dey => "DEY",
            Mnemonic::Eor => "EOR",
            Mnemonic::Inc => "INC",
            Mnemonic::Inx => "INX",
            Mnemonic::Iny => "INY",
            Mnemonic::Lda => "LDA",
            Mnemonic::Ldx => "LDX",
            Mnemonic::Ldy => "LDY",
            Mnemonic::Lsr => "LSR",
            Mnemonic::Nop => "NOP",
            Mnemonic::Ora => "ORA",
            Mnemonic::Pha => "PHA",
            Mnemonic::Php => "PHP",
            Mnemonic::Pla => "PLA",
            Mnemonic::Plp => "PLP",
            Mnemonic::Rol => "ROL",
            Mnemonic::Ror => "ROR",
            Mnemonic::Sbc => "SBC",
            Mnemonic::Sec => "SEC",
            Mnemonic::Sed => "SED",
            Mnemonic::Sei => "SEI",
            Mnemonic::Sta => "STA",
            Mnemonic::Stx => "STX",
            Mnemonic::Sty => "STY",
            Mnemonic::Tax => "TAX",
            Mnemonic::Tay => "TAY",
            Mnemonic::Tsx => "TSX",
            Mnemonic::Txa => "TXA",
            Mnemonic::Txs => "TXS",
            Mnemonic::Tya => "TYA",
        }
    }

    /// True for the eight conditional branches, the only users of relative mode.
    pub const fn is_branch(self) -> bool {
        matches!(
            self,
            Mnemonic::Bcc
                | Mnemonic::Bcs
                | Mnemonic::Beq
                | Mnemonic::Bmi
                | Mnemonic::Bne
                | Mnemonic::Bpl
                | Mnemonic::Bvc
                | Mnemonic::Bvs
        )
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when text does not name an emulated instruction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mnemonic '{0}'")]
pub struct UnknownMnemonic(pub String);

impl FromStr for Mnemonic {
    type Err = UnknownMnemonic;

    /// Case-insensitive lookup (`lda`, `LDA` and `LdA` are all accepted).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mnemonic::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownMnemonic(s.to_string()))
    }
}

/// Metadata for a single W65C02S opcode.
///
/// # Fields
///
/// - `mnemonic`: Datasheet instruction name (e.g., "LDA", "NOP", "JMP")
/// - `instruction`: The emulated instruction, `None` for foreign opcodes
/// - `addressing_mode`: How the instruction interprets operand bytes
/// - `size_bytes`: Total instruction size including opcode and operands (1-3 bytes)
/// - `reserved`: Datasheet-reserved slot that executes as NOP
///
/// # Examples
///
/// ```
/// use w65c02s::{AddressingMode, Mnemonic, OPCODE_TABLE};
///
/// // Look up LDA immediate (opcode 0xA9)
/// let lda_imm = &OPCODE_TABLE[0xA9];
/// assert_eq!(lda_imm.mnemonic, "LDA");
/// assert_eq!(lda_imm.instruction, Some(Mnemonic::Lda));
/// assert_eq!(lda_imm.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.size_bytes, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Instruction mnemonic text.
    pub mnemonic: &'static str,

    /// Emulated instruction for this opcode.
    pub instruction: Option<Mnemonic>,

    /// Addressing mode for this instruction.
    pub addressing_mode: AddressingMode,

    /// Total instruction size in bytes (opcode + operands).
    pub size_bytes: u8,

    /// Whether this slot is a reserved no-op rather than a documented instruction.
    pub reserved: bool,
}

impl OpcodeMetadata {
    /// Number of operand bytes following the opcode.
    pub const fn operand_bytes(&self) -> u8 {
        self.size_bytes - 1
    }
}

const fn op(instruction: Mnemonic, mode: AddressingMode) -> OpcodeMetadata {
    OpcodeMetadata {
        mnemonic: instruction.as_str(),
        instruction: Some(instruction),
        addressing_mode: mode,
        size_bytes: 1 + mode.operand_bytes(),
        reserved: false,
    }
}

const fn reserved(mode: AddressingMode) -> OpcodeMetadata {
    OpcodeMetadata {
        mnemonic: "NOP",
        instruction: Some(Mnemonic::Nop),
        addressing_mode: mode,
        size_bytes: 1 + mode.operand_bytes(),
        reserved: true,
    }
}

const fn foreign(mnemonic: &'static str, mode: AddressingMode) -> OpcodeMetadata {
    OpcodeMetadata {
        mnemonic,
        instruction: None,
        addressing_mode: mode,
        size_bytes: 1 + mode.operand_bytes(),
        reserved: false,
    }
}

// BBRn/BBSn carry a zero page address and a branch offset.
const fn bit_branch(mnemonic: &'static str) -> OpcodeMetadata {
    OpcodeMetadata {
        mnemonic,
        instruction: None,
        addressing_mode: AddressingMode::Relative,
        size_bytes: 3,
        reserved: false,
    }
}

/// Complete 256-entry opcode metadata table indexed by opcode byte value.
///
/// # Examples
///
/// ```
/// use w65c02s::OPCODE_TABLE;
///
/// let reserved = &OPCODE_TABLE[0x02];
/// assert_eq!(reserved.mnemonic, "NOP");
/// assert!(reserved.reserved);
/// assert_eq!(reserved.size_bytes, 2);
///
/// let jmp = &OPCODE_TABLE[0x4C];
/// assert_eq!(jmp.instruction, None);
/// ```
pub static OPCODE_TABLE: [OpcodeMetadata; 256] = {
    use AddressingMode::*;
    use Mnemonic::*;

    [
        // 0x00
        foreign("BRK", Stack),
        op(Ora, IndirectX),
        reserved(Immediate),
        reserved(Implied),
        foreign("TSB", ZeroPage),
        op(Ora, ZeroPage),
        op(Asl, ZeroPage),
        foreign("RMB0", ZeroPage),
        op(Php, Stack),
        op(Ora, Immediate),
        op(Asl, Accumulator),
        reserved(Implied),
        foreign("TSB", Absolute),
        op(Ora, Absolute),
        op(Asl, Absolute),
        bit_branch("BBR0"),
        // 0x10
        op(Bpl, Relative),
        op(Ora, IndirectY),
        op(Ora, ZeroPageIndirect),
        reserved(Implied),
        foreign("TRB", ZeroPage),
        op(Ora, ZeroPageX),
        op(Asl, ZeroPageX),
        foreign("RMB1", ZeroPage),
        op(Clc, Implied),
        op(Ora, AbsoluteY),
        op(Inc, Accumulator),
        reserved(Implied),
        foreign("TRB", Absolute),
        op(Ora, AbsoluteX),
        op(Asl, AbsoluteX),
        bit_branch("BBR1"),
        // 0x20
        foreign("JSR", Absolute),
        op(And, IndirectX),
        reserved(Immediate),
        reserved(Implied),
        foreign("BIT", ZeroPage),
        op(And, ZeroPage),
        op(Rol, ZeroPage),
        foreign("RMB2", ZeroPage),
        op(Plp, Stack),
        op(And, Immediate),
        op(Rol, Accumulator),
        reserved(Implied),
        foreign("BIT", Absolute),
        op(And, Absolute),
        op(Rol, Absolute),
        bit_branch("BBR2"),
        // 0x30
        op(Bmi, Relative),
        op(And, IndirectY),
        op(And, ZeroPageIndirect),
        reserved(Implied),
        foreign("BIT", ZeroPageX),
        op(And, ZeroPageX),
        op(Rol, ZeroPageX),
        foreign("RMB3", ZeroPage),
        op(Sec, Implied),
        op(And, AbsoluteY),
        op(Dec, Accumulator),
        reserved(Implied),
        foreign("BIT", AbsoluteX),
        op(And, AbsoluteX),
        op(Rol, AbsoluteX),
        bit_branch("BBR3"),
        // 0x40
        foreign("RTI", Stack),
        op(Eor, IndirectX),
        reserved(Immediate),
        reserved(Implied),
        reserved(ZeroPage),
        op(Eor, ZeroPage),
        op(Lsr, ZeroPage),
        foreign("RMB4", ZeroPage),
        op(Pha, Stack),
        op(Eor, Immediate),
        op(Lsr, Accumulator),
        reserved(Implied),
        foreign("JMP", Absolute),
        op(Eor, Absolute),
        op(Lsr, Absolute),
        bit_branch("BBR4"),
        // 0x50
        op(Bvc, Relative),
        op(Eor, IndirectY),
        op(Eor, ZeroPageIndirect),
        reserved(Implied),
        reserved(ZeroPageX),
        op(Eor, ZeroPageX),
        op(Lsr, ZeroPageX),
        foreign("RMB5", ZeroPage),
        op(Cli, Implied),
        op(Eor, AbsoluteY),
        foreign("PHY", Stack),
        reserved(Implied),
        reserved(Absolute),
        op(Eor, AbsoluteX),
        op(Lsr, AbsoluteX),
        bit_branch("BBR5"),
        // 0x60
        foreign("RTS", Stack),
        op(Adc, IndirectX),
        reserved(Immediate),
        reserved(Implied),
        foreign("STZ", ZeroPage),
        op(Adc, ZeroPage),
        op(Ror, ZeroPage),
        foreign("RMB6", ZeroPage),
        op(Pla, Stack),
        op(Adc, Immediate),
        op(Ror, Accumulator),
        reserved(Implied),
        foreign("JMP", Indirect),
        op(Adc, Absolute),
        op(Ror, Absolute),
        bit_branch("BBR6"),
        // 0x70
        op(Bvs, Relative),
        op(Adc, IndirectY),
        op(Adc, ZeroPageIndirect),
        reserved(Implied),
        foreign("STZ", ZeroPageX),
        op(Adc, ZeroPageX),
        op(Ror, ZeroPageX),
        foreign("RMB7", ZeroPage),
        op(Sei, Implied),
        op(Adc, AbsoluteY),
        foreign("PLY", Stack),
        reserved(Implied),
        foreign("JMP", AbsoluteIndexedIndirect),
        op(Adc, AbsoluteX),
        op(Ror, AbsoluteX),
        bit_branch("BBR7"),
        // 0x80
        foreign("BRA", Relative),
        op(Sta, IndirectX),
        reserved(Immediate),
        reserved(Implied),
        op(Sty, ZeroPage),
        op(Sta, ZeroPage),
        op(Stx, ZeroPage),
        foreign("SMB0", ZeroPage),
        op(Dey, Implied),
        foreign("BIT", Immediate),
        op(Txa, Implied),
        reserved(Implied),
        op(Sty, Absolute),
        op(Sta, Absolute),
        op(Stx, Absolute),
        bit_branch("BBS0"),
        // 0x90
        op(Bcc, Relative),
        op(Sta, IndirectY),
        op(Sta, ZeroPageIndirect),
        reserved(Implied),
        op(Sty, ZeroPageX),
        op(Sta, ZeroPageX),
        op(Stx, ZeroPageY),
        foreign("SMB1", ZeroPage),
        op(Tya, Implied),
        op(Sta, AbsoluteY),
        op(Txs, Implied),
        reserved(Implied),
        foreign("STZ", Absolute),
        op(Sta, AbsoluteX),
        foreign("STZ", AbsoluteX),
        bit_branch("BBS1"),
        // 0xA0
        op(Ldy, Immediate),
        op(Lda, IndirectX),
        op(Ldx, Immediate),
        reserved(Implied),
        op(Ldy, ZeroPage),
        op(Lda, ZeroPage),
        op(Ldx, ZeroPage),
        foreign("SMB2", ZeroPage),
        op(Tay, Implied),
        op(Lda, Immediate),
        op(Tax, Implied),
        reserved(Implied),
        op(Ldy, Absolute),
        op(Lda, Absolute),
        op(Ldx, Absolute),
        bit_branch("BBS2"),
        // 0xB0
        op(Bcs, Relative),
        op(Lda, IndirectY),
        op(Lda, ZeroPageIndirect),
        reserved(Implied),
        op(Ldy, ZeroPageX),
        op(Lda, ZeroPageX),
        op(Ldx, ZeroPageY),
        foreign("SMB3", ZeroPage),
        op(Clv, Implied),
        op(Lda, AbsoluteY),
        op(Tsx, Implied),
        reserved(Implied),
        op(Ldy, AbsoluteX),
        op(Lda, AbsoluteX),
        op(Ldx, AbsoluteY),
        bit_branch("BBS3"),
        // 0xC0
        op(Cpy, Immediate),
        op(Cmp, IndirectX),
        reserved(Immediate),
        reserved(Implied),
        op(Cpy, ZeroPage),
        op(Cmp, ZeroPage),
        op(Dec, ZeroPage),
        foreign("SMB4", ZeroPage),
        op(Iny, Implied),
        op(Cmp, Immediate),
        op(Dex, Implied),
        reserved(Implied),
        op(Cpy, Absolute),
        op(Cmp, Absolute),
        op(Dec, Absolute),
        bit_branch("BBS4"),
        // 0xD0
        op(Bne, Relative),
        op(Cmp, IndirectY),
        op(Cmp, ZeroPageIndirect),
        reserved(Implied),
        reserved(ZeroPageX),
        op(Cmp, ZeroPageX),
        op(Dec, ZeroPageX),
        foreign("SMB5", ZeroPage),
        op(Cld, Implied),
        op(Cmp, AbsoluteY),
        foreign("PHX", Stack),
        reserved(Implied),
        reserved(Absolute),
        op(Cmp, AbsoluteX),
        op(Dec, AbsoluteX),
        bit_branch("BBS5"),
        // 0xE0
        op(Cpx, Immediate),
        op(Sbc, IndirectX),
        reserved(Immediate),
        reserved(Implied),
        op(Cpx, ZeroPage),
        op(Sbc, ZeroPage),
        op(Inc, ZeroPage),
        foreign("SMB6", ZeroPage),
        op(Inx, Implied),
        op(Sbc, Immediate),
        op(Nop, Implied),
        reserved(Implied),
        op(Cpx, Absolute),
        op(Sbc, Absolute),
        op(Inc, Absolute),
        bit_branch("BBS6"),
        // 0xF0
        op(Beq, Relative),
        op(Sbc, IndirectY),
        op(Sbc, ZeroPageIndirect),
        reserved(Implied),
        reserved(ZeroPageX),
        op(Sbc, ZeroPageX),
        op(Inc, ZeroPageX),
        foreign("SMB7", ZeroPage),
        op(Sed, Implied),
        op(Sbc, AbsoluteY),
        foreign("PLX", Stack),
        reserved(Implied),
        reserved(Absolute),
        op(Sbc, AbsoluteX),
        op(Inc, AbsoluteX),
        bit_branch("BBS7"),
    ]
};

/// Metadata for an opcode byte. Total over all 256 values.
pub fn decode(opcode: u8) -> &'static OpcodeMetadata {
    &OPCODE_TABLE[opcode as usize]
}

/// Total instruction length (1, 2 or 3 bytes) for an opcode byte.
pub fn bytes_for(opcode: u8) -> u8 {
    decode(opcode).size_bytes
}

/// Opcode byte for an emulated (mnemonic, addressing mode) pair.
///
/// Reserved NOP slots are never returned; `NOP` always encodes as `0xEA`.
/// `None` means the instruction has no encoding in that mode.
///
/// # Examples
///
/// ```
/// use w65c02s::{opcodes::opcode_for, AddressingMode, Mnemonic};
///
/// assert_eq!(opcode_for(Mnemonic::Lda, AddressingMode::Immediate), Some(0xA9));
/// assert_eq!(opcode_for(Mnemonic::Stx, AddressingMode::AbsoluteY), None);
/// ```
pub fn opcode_for(mnemonic: Mnemonic, mode: AddressingMode) -> Option<u8> {
    OPCODE_TABLE
        .iter()
        .position(|entry| {
            !entry.reserved && entry.instruction == Some(mnemonic) && entry.addressing_mode == mode
        })
        .map(|index| index as u8)
}

/// Whether `mnemonic` has an encoding in `mode`.
pub fn supports(mnemonic: Mnemonic, mode: AddressingMode) -> bool {
    opcode_for(mnemonic, mode).is_some()
}
