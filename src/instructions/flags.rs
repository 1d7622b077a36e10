//! # Status Flag Manipulation Instructions
//!
//! This module implements instructions that directly modify processor status flags:
//! - CLC / SEC: Clear / Set Carry Flag
//! - CLI / SEI: Clear / Set Interrupt Disable
//! - CLD / SED: Clear / Set Decimal Mode
//! - CLV: Clear Overflow Flag
//!
//! These instructions use implied addressing mode and touch exactly one bit.

use crate::cpu::{FLAG_C, FLAG_D, FLAG_I, FLAG_V};
use crate::{MemoryBus, CPU};

/// Executes the CLC (Clear Carry Flag) instruction.
///
/// Opcode: 0x18
pub(crate) fn execute_clc<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.set_flag(FLAG_C, false);
}

/// Executes the SEC (Set Carry Flag) instruction.
///
/// Opcode: 0x38
pub(crate) fn execute_sec<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.set_flag(FLAG_C, true);
}

/// Executes the CLI (Clear Interrupt Disable) instruction.
///
/// Opcode: 0x58
pub(crate) fn execute_cli<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.set_flag(FLAG_I, false);
}

/// Executes the SEI (Set Interrupt Disable) instruction.
///
/// Opcode: 0x78
pub(crate) fn execute_sei<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.set_flag(FLAG_I, true);
}

/// Executes the CLV (Clear Overflow Flag) instruction.
///
/// Opcode: 0xB8. There is no SEV; V is only set by arithmetic or PLP.
pub(crate) fn execute_clv<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.set_flag(FLAG_V, false);
}

/// Executes the CLD (Clear Decimal Mode) instruction.
///
/// Opcode: 0xD8
pub(crate) fn execute_cld<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.set_flag(FLAG_D, false);
}

/// Executes the SED (Set Decimal Mode) instruction.
///
/// Opcode: 0xF8. Only the flag changes; arithmetic stays binary.
pub(crate) fn execute_sed<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.set_flag(FLAG_D, true);
}
