//! Fuzz target for ROM execution.
//!
//! Creates an arbitrary CPU state and program image, then runs the image to
//! find panics in decoding, addressing and the instruction handlers.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use w65c02s::config::{CompareMode, CpuConfig, OverflowMode};
use w65c02s::{FlatMemory, CPU};

/// Arbitrary CPU initial state for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    status: u8,
    unsigned_compare: bool,
    hardware_overflow: bool,
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    /// Zero page contents, so indirect modes follow arbitrary pointers
    zero_page: [u8; 256],
    rom: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::new();
    memory.load(0x0000, &input.zero_page);

    let state = input.cpu_state;
    let config = CpuConfig {
        compare: if state.unsigned_compare {
            CompareMode::Unsigned
        } else {
            CompareMode::Signed
        },
        overflow: if state.hardware_overflow {
            OverflowMode::TwosComplement
        } else {
            OverflowMode::SignHeuristic
        },
        max_steps: Some(10_000),
    };

    let mut cpu = CPU::with_config(memory, config);
    cpu.set_a(state.a);
    cpu.set_x(state.x);
    cpu.set_y(state.y);
    cpu.set_sp(state.sp);
    cpu.set_status(state.status);

    // Errors (foreign opcodes, truncated operands, step limit) are fine; panics are not
    let _ = cpu.execute_from_rom(&input.rom);
});
