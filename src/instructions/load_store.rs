//! # Load and Store Instructions
//!
//! This module implements load and store operations:
//! - LDA: Load Accumulator
//! - LDX: Load X Register
//! - LDY: Load Y Register
//! - STA: Store Accumulator
//! - STX: Store X Register
//! - STY: Store Y Register

use crate::cpu::Target;
use crate::{MemoryBus, CPU};

/// Executes the LDA (Load Accumulator) instruction.
///
/// Loads a byte of memory into the accumulator, setting the zero and negative
/// flags as appropriate.
///
/// # Flag Behavior
///
/// - Zero (Z): Set if A = 0
/// - Negative (N): Set if bit 7 of A is set
/// - Other flags: Not affected
pub(crate) fn execute_lda<M: MemoryBus>(cpu: &mut CPU<M>, target: Target) {
    let value = cpu.read_target(target);
    cpu.a = value;
    cpu.set_zn(value);
}

/// Executes the LDX (Load X Register) instruction. Same flags as LDA.
pub(crate) fn execute_ldx<M: MemoryBus>(cpu: &mut CPU<M>, target: Target) {
    let value = cpu.read_target(target);
    cpu.x = value;
    cpu.set_zn(value);
}

/// Executes the LDY (Load Y Register) instruction. Same flags as LDA.
pub(crate) fn execute_ldy<M: MemoryBus>(cpu: &mut CPU<M>, target: Target) {
    let value = cpu.read_target(target);
    cpu.y = value;
    cpu.set_zn(value);
}

/// Executes the STA (Store Accumulator) instruction.
///
/// Stores the accumulator at the effective address. No flags are affected.
pub(crate) fn execute_sta<M: MemoryBus>(cpu: &mut CPU<M>, target: Target) {
    cpu.write_target(target, cpu.a);
}

/// Executes the STX (Store X Register) instruction.
pub(crate) fn execute_stx<M: MemoryBus>(cpu: &mut CPU<M>, target: Target) {
    cpu.write_target(target, cpu.x);
}

/// Executes the STY (Store Y Register) instruction.
pub(crate) fn execute_sty<M: MemoryBus>(cpu: &mut CPU<M>, target: Target) {
    cpu.write_target(target, cpu.y);
}
