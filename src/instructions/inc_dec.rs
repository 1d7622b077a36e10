//! # Increment and Decrement Instructions
//!
//! - INC / DEC: memory or accumulator (`INC A` is 65C02-only), wrapping at 8 bits
//! - INX / INY / DEX / DEY: index registers, wrapping at 8 bits
//!
//! All update Z and N from the new value. Carry and overflow are untouched.

use crate::cpu::Target;
use crate::{MemoryBus, CPU};

/// Executes the INC (Increment) instruction.
pub(crate) fn execute_inc<M: MemoryBus>(cpu: &mut CPU<M>, target: Target) {
    let result = cpu.read_target(target).wrapping_add(1);
    cpu.write_target(target, result);
    cpu.set_zn(result);
}

/// Executes the DEC (Decrement) instruction.
pub(crate) fn execute_dec<M: MemoryBus>(cpu: &mut CPU<M>, target: Target) {
    let result = cpu.read_target(target).wrapping_sub(1);
    cpu.write_target(target, result);
    cpu.set_zn(result);
}

/// Executes the INX (Increment X) instruction.
pub(crate) fn execute_inx<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.set_zn(cpu.x);
}

/// Executes the INY (Increment Y) instruction.
pub(crate) fn execute_iny<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.set_zn(cpu.y);
}

/// Executes the DEX (Decrement X) instruction.
pub(crate) fn execute_dex<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.set_zn(cpu.x);
}

/// Executes the DEY (Decrement Y) instruction.
pub(crate) fn execute_dey<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.set_zn(cpu.y);
}
