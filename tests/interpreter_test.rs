//! Interpreter tests
//!
//! Programs run directly from source must end in the same state as the
//! assembled bytes run through ROM dispatch.

use w65c02s::config::{AssemblerConfig, CpuConfig};
use w65c02s::{
    assemble, interpret, ExecutionError, FlatMemory, InterpretError, Interpreter, MemoryBus,
    StopReason, CPU,
};

fn run_both(source: &str) -> (CPU<FlatMemory>, CPU<FlatMemory>) {
    let mut interpreted = CPU::new(FlatMemory::new());
    interpret(&mut interpreted, source).unwrap();

    let mut rom = CPU::new(FlatMemory::new());
    let output = assemble(source).unwrap();
    rom.execute_from_rom(&output.bytes).unwrap();

    (interpreted, rom)
}

fn assert_same_state(a: &CPU<FlatMemory>, b: &CPU<FlatMemory>) {
    assert_eq!(a.a(), b.a(), "A");
    assert_eq!(a.x(), b.x(), "X");
    assert_eq!(a.y(), b.y(), "Y");
    assert_eq!(a.sp(), b.sp(), "SP");
    assert_eq!(a.pc(), b.pc(), "PC");
    assert_eq!(a.status(), b.status(), "P");
    assert_eq!(a.memory().as_slice(), b.memory().as_slice(), "memory");
}

#[test]
fn test_counting_loop_matches_rom() {
    let source = "\
        LDX #$00
        LDY #$0A
loop:   TXA
        STA $0200,X
        INX
        DEY
        BNE loop
";
    let (interpreted, rom) = run_both(source);

    assert_same_state(&interpreted, &rom);
    assert_eq!(interpreted.memory().read(0x0209), 0x09);
    assert_eq!(interpreted.x(), 0x0A);
}

#[test]
fn test_stack_and_flags_match_rom() {
    let source = "\
        SEC
        LDA #$50
        ADC #$50
        PHP
        PHA
        LDA #$00
        PLA
        PLP
        ROR A
        STA ($10)
";
    let (interpreted, rom) = run_both(source);

    assert_same_state(&interpreted, &rom);
}

#[test]
fn test_summary() {
    let mut cpu = CPU::new(FlatMemory::new());

    let summary = interpret(&mut cpu, "NOP\nNOP\nINX\n").unwrap();

    assert_eq!(summary.instructions, 3);
    assert_eq!(summary.stop, StopReason::EndOfRom);
}

#[test]
fn test_interpreter_reuse() {
    let interpreter = Interpreter::new("INX\nINY\n", &AssemblerConfig::default()).unwrap();
    assert_eq!(interpreter.instructions().len(), 2);

    let mut cpu = CPU::new(FlatMemory::new());
    interpreter.run(&mut cpu).unwrap();
    interpreter.run(&mut cpu).unwrap();

    assert_eq!(cpu.x(), 2);
    assert_eq!(cpu.y(), 2);
}

#[test]
fn test_from_output() {
    let output = assemble("LDA #$2A\n").unwrap();
    let interpreter = Interpreter::from_output(&output);

    let mut cpu = CPU::new(FlatMemory::new());
    interpreter.run(&mut cpu).unwrap();

    assert_eq!(cpu.a(), 0x2A);
}

#[test]
fn test_branch_into_instruction_is_misaligned() {
    // BNE jumps back one byte into the middle of LDA #$01
    let mut cpu = CPU::new(FlatMemory::new());
    let err = interpret(&mut cpu, "LDA #$01\nBNE $FD\n").unwrap_err();

    assert_eq!(err, InterpretError::MisalignedPc(0x0001));
}

#[test]
fn test_step_limit() {
    let config = CpuConfig {
        max_steps: Some(5),
        ..CpuConfig::default()
    };
    let mut cpu = CPU::with_config(FlatMemory::new(), config);

    let err = interpret(&mut cpu, "spin: CLC\nBCC spin\n").unwrap_err();

    assert_eq!(err, InterpretError::Execution(ExecutionError::StepLimitExceeded(5)));
}
