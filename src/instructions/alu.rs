//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic, logical and compare operations:
//! - ADC: Add with Carry
//! - SBC: Subtract with Carry
//! - AND, ORA, EOR: Bitwise logic on the accumulator
//! - CMP, CPX, CPY: Compare a register with memory
//!
//! Decimal mode is not emulated; the D flag never changes arithmetic.

use crate::cpu::{Target, FLAG_C, FLAG_V};
use crate::{MemoryBus, CPU};

/// Executes the ADC (Add with Carry) instruction.
///
/// A = A + M + C, truncated to 8 bits.
///
/// # Flag Behavior
///
/// - Carry (C): Set if the unsigned 9-bit sum exceeds 255
/// - Zero (Z): Set if the result is 0
/// - Overflow (V): Per the configured [`OverflowMode`](crate::config::OverflowMode)
/// - Negative (N): Set if bit 7 of the result is set
pub(crate) fn execute_adc<M: MemoryBus>(cpu: &mut CPU<M>, target: Target) {
    let value = cpu.read_target(target);
    let a = cpu.a;
    let carry_in = cpu.flag(FLAG_C) as u16;

    let sum = a as u16 + value as u16 + carry_in;
    let result = sum as u8;

    cpu.set_flag(FLAG_C, sum > 0xFF);
    cpu.set_flag(FLAG_V, cpu.overflow(a, value, result, false));
    cpu.set_zn(result);

    cpu.a = result;
}

/// Executes the SBC (Subtract with Carry) instruction.
///
/// A = A - M - (1 - C), truncated to 8 bits. The carry is an inverted
/// borrow: set when no borrow occurred.
///
/// # Flag Behavior
///
/// - Carry (C): Set if `A - M - (1 - C) >= 0`
/// - Zero (Z): Set if the result is 0
/// - Overflow (V): Per the configured [`OverflowMode`](crate::config::OverflowMode)
/// - Negative (N): Set if bit 7 of the result is set
pub(crate) fn execute_sbc<M: MemoryBus>(cpu: &mut CPU<M>, target: Target) {
    let value = cpu.read_target(target);
    let a = cpu.a;
    let borrow = 1 - cpu.flag(FLAG_C) as i16;

    let difference = a as i16 - value as i16 - borrow;
    let result = difference as u8;

    cpu.set_flag(FLAG_C, difference >= 0);
    cpu.set_flag(FLAG_V, cpu.overflow(a, value, result, true));
    cpu.set_zn(result);

    cpu.a = result;
}

/// Executes the AND (Logical AND) instruction. Updates Z and N.
pub(crate) fn execute_and<M: MemoryBus>(cpu: &mut CPU<M>, target: Target) {
    let result = cpu.a & cpu.read_target(target);
    cpu.set_zn(result);
    cpu.a = result;
}

/// Executes the ORA (Logical Inclusive OR) instruction. Updates Z and N.
pub(crate) fn execute_ora<M: MemoryBus>(cpu: &mut CPU<M>, target: Target) {
    let result = cpu.a | cpu.read_target(target);
    cpu.set_zn(result);
    cpu.a = result;
}

/// Executes the EOR (Exclusive OR) instruction. Updates Z and N.
pub(crate) fn execute_eor<M: MemoryBus>(cpu: &mut CPU<M>, target: Target) {
    let result = cpu.a ^ cpu.read_target(target);
    cpu.set_zn(result);
    cpu.a = result;
}

/// Executes the CMP (Compare Accumulator) instruction.
///
/// # Flag Behavior
///
/// - Carry (C): Set if A >= M under the configured [`CompareMode`](crate::config::CompareMode)
/// - Zero (Z): Set if A == M
/// - Negative (N): Bit 7 of `A - M`
pub(crate) fn execute_cmp<M: MemoryBus>(cpu: &mut CPU<M>, target: Target) {
    let value = cpu.read_target(target);
    cpu.compare(cpu.a, value);
}

/// Executes the CPX (Compare X Register) instruction.
pub(crate) fn execute_cpx<M: MemoryBus>(cpu: &mut CPU<M>, target: Target) {
    let value = cpu.read_target(target);
    cpu.compare(cpu.x, value);
}

/// Executes the CPY (Compare Y Register) instruction.
pub(crate) fn execute_cpy<M: MemoryBus>(cpu: &mut CPU<M>, target: Target) {
    let value = cpu.read_target(target);
    cpu.compare(cpu.y, value);
}
