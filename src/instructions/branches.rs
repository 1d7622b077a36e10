//! # Branch Instructions
//!
//! This module implements the conditional branch operations:
//! - BCC / BCS: Branch on Carry Clear / Set
//! - BNE / BEQ: Branch on Zero Clear / Set
//! - BPL / BMI: Branch on Negative Clear / Set
//! - BVC / BVS: Branch on Overflow Clear / Set
//!
//! All branch instructions use relative addressing with a signed 8-bit offset,
//! measured from the address after the two-byte instruction. No flags are affected.

use crate::cpu::{Target, FLAG_C, FLAG_N, FLAG_V, FLAG_Z};
use crate::{MemoryBus, CPU};

/// Adds the branch offset to PC when `condition` holds.
///
/// PC already points past the instruction when this runs.
fn branch_if<M: MemoryBus>(cpu: &mut CPU<M>, condition: bool, target: Target) {
    if let (true, Target::Relative(offset)) = (condition, target) {
        cpu.pc = cpu.pc.wrapping_add_signed(offset as i16);
    }
}

/// Executes the BCC (Branch if Carry Clear) instruction.
pub(crate) fn execute_bcc<M: MemoryBus>(cpu: &mut CPU<M>, target: Target) {
    let taken = !cpu.flag(FLAG_C);
    branch_if(cpu, taken, target);
}

/// Executes the BCS (Branch if Carry Set) instruction.
pub(crate) fn execute_bcs<M: MemoryBus>(cpu: &mut CPU<M>, target: Target) {
    let taken = cpu.flag(FLAG_C);
    branch_if(cpu, taken, target);
}

/// Executes the BNE (Branch if Not Equal) instruction.
pub(crate) fn execute_bne<M: MemoryBus>(cpu: &mut CPU<M>, target: Target) {
    let taken = !cpu.flag(FLAG_Z);
    branch_if(cpu, taken, target);
}

/// Executes the BEQ (Branch if Equal) instruction.
pub(crate) fn execute_beq<M: MemoryBus>(cpu: &mut CPU<M>, target: Target) {
    let taken = cpu.flag(FLAG_Z);
    branch_if(cpu, taken, target);
}

/// Executes the BPL (Branch if Plus) instruction.
pub(crate) fn execute_bpl<M: MemoryBus>(cpu: &mut CPU<M>, target: Target) {
    let taken = !cpu.flag(FLAG_N);
    branch_if(cpu, taken, target);
}

/// Executes the BMI (Branch if Minus) instruction.
pub(crate) fn execute_bmi<M: MemoryBus>(cpu: &mut CPU<M>, target: Target) {
    let taken = cpu.flag(FLAG_N);
    branch_if(cpu, taken, target);
}

/// Executes the BVC (Branch if Overflow Clear) instruction.
pub(crate) fn execute_bvc<M: MemoryBus>(cpu: &mut CPU<M>, target: Target) {
    let taken = !cpu.flag(FLAG_V);
    branch_if(cpu, taken, target);
}

/// Executes the BVS (Branch if Overflow Set) instruction.
pub(crate) fn execute_bvs<M: MemoryBus>(cpu: &mut CPU<M>, target: Target) {
    let taken = cpu.flag(FLAG_V);
    branch_if(cpu, taken, target);
}
