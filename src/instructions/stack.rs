//! # Stack Operations
//!
//! This module implements stack manipulation instructions:
//! - PHA: Push Accumulator on Stack
//! - PHP: Push Processor Status on Stack
//! - PLA: Pull Accumulator from Stack
//! - PLP: Pull Processor Status from Stack
//!
//! The stack is located at memory addresses 0x0100-0x01FF and grows downward.
//! The stack pointer (SP) is an 8-bit register that serves as an offset into this
//! page. The full stack address is calculated as 0x0100 | SP.

use crate::{MemoryBus, CPU};

/// Executes the PHA (Push Accumulator) instruction.
///
/// Stack operation:
/// 1. Write accumulator value to 0x0100 | SP
/// 2. Decrement SP (wraps from 0x00 to 0xFF)
///
/// Flags affected: None
pub(crate) fn execute_pha<M: MemoryBus>(cpu: &mut CPU<M>) {
    let a = cpu.a;
    cpu.push(a);
}

/// Executes the PHP (Push Processor Status) instruction.
///
/// The status byte is pushed exactly as held, B and bit 5 included.
pub(crate) fn execute_php<M: MemoryBus>(cpu: &mut CPU<M>) {
    let p = cpu.p;
    cpu.push(p);
}

/// Executes the PLA (Pull Accumulator) instruction. Updates Z and N.
pub(crate) fn execute_pla<M: MemoryBus>(cpu: &mut CPU<M>) {
    let value = cpu.pull();
    cpu.a = value;
    cpu.set_zn(value);
}

/// Executes the PLP (Pull Processor Status) instruction.
///
/// The pulled byte replaces P verbatim.
pub(crate) fn execute_plp<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.p = cpu.pull();
}
