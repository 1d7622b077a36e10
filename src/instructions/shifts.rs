//! # Shift and Rotate Instructions
//!
//! This module implements bit shift and rotate operations:
//! - ASL: Arithmetic Shift Left
//! - LSR: Logical Shift Right
//! - ROL: Rotate Left through carry
//! - ROR: Rotate Right through carry
//!
//! Each works on the accumulator or a memory location, sets C from the bit
//! shifted out and updates Z and N from the result.

use crate::cpu::{Target, FLAG_C};
use crate::{MemoryBus, CPU};

fn shift<M: MemoryBus>(cpu: &mut CPU<M>, target: Target, op: impl Fn(u8, bool) -> (u8, bool)) {
    let value = cpu.read_target(target);
    let (result, carry_out) = op(value, cpu.flag(FLAG_C));

    cpu.write_target(target, result);
    cpu.set_flag(FLAG_C, carry_out);
    cpu.set_zn(result);
}

/// Executes the ASL (Arithmetic Shift Left) instruction.
///
/// Bit 0 is set to 0 and bit 7 is placed in the carry flag.
pub(crate) fn execute_asl<M: MemoryBus>(cpu: &mut CPU<M>, target: Target) {
    shift(cpu, target, |value, _| (value << 1, value & 0x80 != 0));
}

/// Executes the LSR (Logical Shift Right) instruction.
///
/// Bit 7 is set to 0 and bit 0 is placed in the carry flag, so N always clears.
pub(crate) fn execute_lsr<M: MemoryBus>(cpu: &mut CPU<M>, target: Target) {
    shift(cpu, target, |value, _| (value >> 1, value & 0x01 != 0));
}

/// Executes the ROL (Rotate Left) instruction.
///
/// The old carry enters bit 0; bit 7 leaves into the carry.
pub(crate) fn execute_rol<M: MemoryBus>(cpu: &mut CPU<M>, target: Target) {
    shift(cpu, target, |value, carry| {
        ((value << 1) | carry as u8, value & 0x80 != 0)
    });
}

/// Executes the ROR (Rotate Right) instruction.
///
/// The old carry enters bit 7; bit 0 leaves into the carry.
pub(crate) fn execute_ror<M: MemoryBus>(cpu: &mut CPU<M>, target: Target) {
    shift(cpu, target, |value, carry| {
        ((value >> 1) | ((carry as u8) << 7), value & 0x01 != 0)
    });
}
