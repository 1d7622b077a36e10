//! Execution loop tests
//!
//! Verifies ROM dispatch, halting, and error handling.

use w65c02s::config::CpuConfig;
use w65c02s::cpu::StepOutcome;
use w65c02s::{
    assemble, ExecutionError, FlatMemory, MemoryBus, Mnemonic, RunSummary, StopReason, CPU,
};

#[test]
fn test_assembled_program_round_trip() {
    let output = assemble("LDA #$05\nTAX\n").unwrap();
    let mut cpu = CPU::new(FlatMemory::new());

    let summary = cpu.execute_from_rom(&output.bytes).unwrap();

    assert_eq!(cpu.a(), 0x05);
    assert_eq!(cpu.x(), 0x05);
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
    assert_eq!(
        summary,
        RunSummary {
            instructions: 2,
            stop: StopReason::EndOfRom
        }
    );
}

#[test]
fn test_halt_byte_stops_run() {
    let mut cpu = CPU::new(FlatMemory::new());

    // INX; halt; INX
    let summary = cpu.execute_from_rom(&[0xE8, 0x00, 0xE8]).unwrap();

    assert_eq!(cpu.x(), 1);
    assert_eq!(cpu.pc(), 1);
    assert_eq!(summary.stop, StopReason::Halt);
    assert_eq!(summary.instructions, 1);
}

#[test]
fn test_empty_rom() {
    let mut cpu = CPU::new(FlatMemory::new());

    let summary = cpu.execute_from_rom(&[]).unwrap();

    assert_eq!(summary.instructions, 0);
    assert_eq!(summary.stop, StopReason::EndOfRom);
}

#[test]
fn test_rom_run_resets_pc() {
    let mut cpu = CPU::new(FlatMemory::new());
    cpu.set_pc(0x1234);

    cpu.execute_from_rom(&[0xEA]).unwrap();

    assert_eq!(cpu.pc(), 1);
}

#[test]
fn test_foreign_opcode_is_error() {
    let mut cpu = CPU::new(FlatMemory::new());

    // NOP; JMP $8000
    let err = cpu.execute_from_rom(&[0xEA, 0x4C, 0x00, 0x80]).unwrap_err();

    assert_eq!(err, ExecutionError::UnknownOpcode { opcode: 0x4C, pc: 1 });
}

#[test]
fn test_reserved_opcode_is_nop_with_operands() {
    let mut cpu = CPU::new(FlatMemory::new());

    // 0x02 is a reserved two-byte NOP; 0xE8 is INX
    let summary = cpu.execute_from_rom(&[0x02, 0xFF, 0xE8]).unwrap();

    assert_eq!(cpu.x(), 1);
    assert_eq!(summary.instructions, 2);
    assert_eq!(cpu.pc(), 3);
}

#[test]
fn test_truncated_instruction() {
    let mut cpu = CPU::new(FlatMemory::new());

    // LDA $12xx with the high byte missing
    let err = cpu.execute_from_rom(&[0xAD, 0x12]).unwrap_err();

    assert_eq!(
        err,
        ExecutionError::TruncatedInstruction {
            opcode: 0xAD,
            expected: 2,
            found: 1
        }
    );
}

#[test]
fn test_step_limit() {
    let config = CpuConfig {
        max_steps: Some(100),
        ..CpuConfig::default()
    };
    let mut cpu = CPU::with_config(FlatMemory::new(), config);

    // 256 INX/BNE pairs before X wraps to zero
    let program = assemble("loop: INX\nBNE loop\n").unwrap();
    let err = cpu.execute_from_rom(&program.bytes).unwrap_err();

    assert_eq!(err, ExecutionError::StepLimitExceeded(100));
}

#[test]
fn test_step_reports_instruction() {
    let mut memory = FlatMemory::new();
    memory.load(0x0200, &[0xA9, 0x07, 0x00]);
    let mut cpu = CPU::new(memory);
    cpu.set_pc(0x0200);

    assert_eq!(cpu.step().unwrap(), StepOutcome::Executed(Mnemonic::Lda));
    assert_eq!(cpu.step().unwrap(), StepOutcome::Halted);
    assert_eq!(cpu.a(), 0x07);
    assert_eq!(cpu.pc(), 0x0202);
}

#[test]
fn test_rom_is_not_copied_to_memory() {
    let mut cpu = CPU::new(FlatMemory::new());

    cpu.execute_from_rom(&[0xA9, 0x01]).unwrap();

    assert_eq!(cpu.memory().read(0x0000), 0x00);
}
