//! # W65C02S Simulator Core
//!
//! An instruction-set simulator for the WDC W65C02S paired with a two-pass assembler
//! whose output the simulator consumes unchanged.
//!
//! This crate provides the processor state and instruction handlers, a trait-based
//! memory bus abstraction, a table-driven opcode map shared by the engine and the
//! assembler, and an interpreter that runs assembled instructions without a binary stage.
//!
//! ## Quick Start
//!
//! ```rust
//! use w65c02s::{assemble, CPU, FlatMemory};
//!
//! let output = assemble("LDA #$05\nTAX\n").unwrap();
//! assert_eq!(output.bytes, vec![0xA9, 0x05, 0xAA]);
//!
//! let mut cpu = CPU::new(FlatMemory::new());
//! cpu.execute_from_rom(&output.bytes).unwrap();
//!
//! assert_eq!(cpu.a(), 0x05);
//! assert_eq!(cpu.x(), 0x05);
//! assert!(!cpu.flag_z());
//! assert!(!cpu.flag_n());
//! ```
//!
//! ## Architecture
//!
//! - **Table-Driven Design**: All opcode metadata in a single 256-entry table
//! - **Closed Sets**: Mnemonics and addressing modes are enums; dispatch is a `match`
//! - **Modularity**: CPU state is separated from memory implementation via the `MemoryBus` trait
//! - **Configurable Semantics**: Compare, overflow and label policies live in [`config`]
//!
//! Not modeled: cycle timing, interrupts, decimal-mode arithmetic, and control-flow
//! instructions other than the eight conditional branches.
//!
//! ## Modules
//!
//! - `number` - Numeric literal parsing
//! - `addressing` - Addressing modes and operand recognition
//! - `opcodes` - Opcode metadata table
//! - `cpu` - CPU state and execution logic
//! - `memory` - MemoryBus trait and implementations
//! - `assembler` - Two-pass assembler
//! - `interpreter` - Direct execution of assembly source
//! - `config` - Simulator and assembler policies

pub mod addressing;
pub mod assembler;
pub mod config;
pub mod cpu;
pub mod interpreter;
pub mod memory;
pub mod number;
pub mod opcodes;

// Internal instruction implementations (not part of public API)
mod instructions;

// Re-export public API
pub use addressing::AddressingMode;
pub use assembler::{
    assemble, assemble_with_config, AssembledInstruction, AssemblerError, AssemblerOutput,
    ErrorType,
};
pub use config::{AssemblerConfig, CpuConfig, EmulatorConfig};
pub use cpu::{RunSummary, StopReason, CPU};
pub use interpreter::{interpret, InterpretError, Interpreter};
pub use memory::{FlatMemory, MemoryBus};
pub use number::{parse_number, NumberError};
pub use opcodes::{Mnemonic, OpcodeMetadata, OPCODE_TABLE};

/// Errors that can occur during CPU execution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    /// The opcode has no emulated instruction (a foreign 65C02 opcode, or 0x00
    /// outside a run loop).
    #[error("opcode 0x{opcode:02X} at PC 0x{pc:04X} is not emulated")]
    UnknownOpcode { opcode: u8, pc: u16 },

    /// The mnemonic has no encoding in the requested addressing mode.
    #[error("{mnemonic} does not support {mode} addressing")]
    UnsupportedCombination {
        mnemonic: Mnemonic,
        mode: AddressingMode,
    },

    /// The addressing mode needs an operand and none was supplied.
    #[error("{0} addressing requires an operand")]
    MissingOperand(AddressingMode),

    /// The program ended in the middle of an instruction's operand bytes.
    #[error("opcode 0x{opcode:02X} needs {expected} operand byte(s), found {found}")]
    TruncatedInstruction {
        opcode: u8,
        expected: u8,
        found: usize,
    },

    /// The configured `max_steps` was reached before the program stopped.
    #[error("step limit of {0} instructions exceeded")]
    StepLimitExceeded(u64),
}
