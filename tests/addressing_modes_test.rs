//! Effective address tests for every memory addressing mode.

use w65c02s::{AddressingMode, ExecutionError, FlatMemory, MemoryBus, Mnemonic, CPU};

/// Helper function to create a CPU with PC at 0x8000
fn setup_cpu() -> CPU<FlatMemory> {
    let mut cpu = CPU::new(FlatMemory::new());
    cpu.set_pc(0x8000);
    cpu
}

#[test]
fn test_indexed_indirect_x() {
    let mut cpu = setup_cpu();
    cpu.set_x(0x04);
    cpu.memory_mut().write(0x0024, 0x00);
    cpu.memory_mut().write(0x0025, 0x80);
    cpu.memory_mut().write(0x8000, 0x5C);

    cpu.execute(Mnemonic::Lda, AddressingMode::IndirectX, Some(0x20))
        .unwrap();

    // Pointer at 0x24 resolves to 0x8000
    assert_eq!(cpu.a(), 0x5C);
}

#[test]
fn test_indexed_indirect_x_wraps_in_zero_page() {
    let mut cpu = setup_cpu();
    cpu.set_x(0x02);
    cpu.memory_mut().write(0x0001, 0x00);
    cpu.memory_mut().write(0x0002, 0x40);
    cpu.memory_mut().write(0x4000, 0x11);

    cpu.execute(Mnemonic::Lda, AddressingMode::IndirectX, Some(0xFF))
        .unwrap();

    assert_eq!(cpu.a(), 0x11);
}

#[test]
fn test_zero_page_indirect() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0030, 0x34);
    cpu.memory_mut().write(0x0031, 0x12);
    cpu.set_a(0x99);

    cpu.execute(Mnemonic::Sta, AddressingMode::ZeroPageIndirect, Some(0x30))
        .unwrap();

    assert_eq!(cpu.memory().read(0x1234), 0x99);
}

#[test]
fn test_zero_page_x_wraps() {
    let mut cpu = setup_cpu();
    cpu.set_x(0x20);
    cpu.memory_mut().write(0x0010, 0x5A);

    cpu.execute(Mnemonic::Lda, AddressingMode::ZeroPageX, Some(0xF0))
        .unwrap();

    assert_eq!(cpu.a(), 0x5A);
}

#[test]
fn test_zero_page_operand_is_masked() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0034, 0x77);

    cpu.execute(Mnemonic::Lda, AddressingMode::ZeroPage, Some(0x1234))
        .unwrap();

    assert_eq!(cpu.a(), 0x77);
}

#[test]
fn test_unsupported_combination_leaves_state() {
    let mut cpu = setup_cpu();

    let err = cpu
        .execute(Mnemonic::Stx, AddressingMode::AbsoluteX, Some(0x1234))
        .unwrap_err();

    assert_eq!(
        err,
        ExecutionError::UnsupportedCombination {
            mnemonic: Mnemonic::Stx,
            mode: AddressingMode::AbsoluteX
        }
    );
    assert_eq!(cpu.pc(), 0x8000);
}

#[test]
fn test_missing_operand() {
    let mut cpu = setup_cpu();

    let err = cpu
        .execute(Mnemonic::Lda, AddressingMode::Immediate, None)
        .unwrap_err();

    assert_eq!(err, ExecutionError::MissingOperand(AddressingMode::Immediate));
    assert_eq!(cpu.pc(), 0x8000);
}
