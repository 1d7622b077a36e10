//! Tests for stack instructions and the flag set/clear instructions.

use w65c02s::{AddressingMode, FlatMemory, MemoryBus, Mnemonic, CPU};

/// Helper function to create a CPU with PC at 0x8000
fn setup_cpu() -> CPU<FlatMemory> {
    let mut cpu = CPU::new(FlatMemory::new());
    cpu.set_pc(0x8000);
    cpu
}

fn stack(cpu: &mut CPU<FlatMemory>, mnemonic: Mnemonic) {
    cpu.execute(mnemonic, AddressingMode::Stack, None).unwrap();
}

fn implied(cpu: &mut CPU<FlatMemory>, mnemonic: Mnemonic) {
    cpu.execute(mnemonic, AddressingMode::Implied, None).unwrap();
}

// ========== Stack ==========

#[test]
fn test_pha_pla_round_trip() {
    let mut cpu = setup_cpu();
    let sp = cpu.sp();
    cpu.set_a(0x42);

    stack(&mut cpu, Mnemonic::Pha);
    assert_eq!(cpu.sp(), sp.wrapping_sub(1));
    assert_eq!(cpu.memory().read(0x0100 | sp as u16), 0x42);

    cpu.set_a(0x00);
    stack(&mut cpu, Mnemonic::Pla);

    assert_eq!(cpu.a(), 0x42);
    assert_eq!(cpu.sp(), sp);
    assert!(!cpu.flag_z());
}

#[test]
fn test_pla_sets_flags() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x80);
    stack(&mut cpu, Mnemonic::Pha);
    cpu.set_a(0x00);

    stack(&mut cpu, Mnemonic::Pla);

    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
}

#[test]
fn test_php_plp_raw_status() {
    let mut cpu = setup_cpu();
    cpu.set_status(0b1100_0011);

    stack(&mut cpu, Mnemonic::Php);
    assert_eq!(cpu.memory().read(0x01FD), 0b1100_0011);

    cpu.set_status(0x00);
    stack(&mut cpu, Mnemonic::Plp);

    assert_eq!(cpu.status(), 0b1100_0011);
}

#[test]
fn test_stack_pointer_wraps() {
    let mut cpu = setup_cpu();
    cpu.set_sp(0x00);
    cpu.set_a(0x99);

    stack(&mut cpu, Mnemonic::Pha);
    assert_eq!(cpu.memory().read(0x0100), 0x99);
    assert_eq!(cpu.sp(), 0xFF);

    stack(&mut cpu, Mnemonic::Pla);
    assert_eq!(cpu.sp(), 0x00);
    assert_eq!(cpu.a(), 0x99);
}

// ========== Flag Instructions ==========

#[test]
fn test_set_and_clear_flags() {
    let mut cpu = setup_cpu();

    implied(&mut cpu, Mnemonic::Sec);
    assert!(cpu.flag_c());
    implied(&mut cpu, Mnemonic::Clc);
    assert!(!cpu.flag_c());

    implied(&mut cpu, Mnemonic::Sed);
    assert!(cpu.flag_d());
    implied(&mut cpu, Mnemonic::Cld);
    assert!(!cpu.flag_d());

    implied(&mut cpu, Mnemonic::Cli);
    assert!(!cpu.flag_i());
    implied(&mut cpu, Mnemonic::Sei);
    assert!(cpu.flag_i());
}

#[test]
fn test_clv() {
    let mut cpu = setup_cpu();
    cpu.set_flag_v(true);

    implied(&mut cpu, Mnemonic::Clv);

    assert!(!cpu.flag_v());
}

#[test]
fn test_nop_changes_only_pc() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x12);
    let status = cpu.status();

    implied(&mut cpu, Mnemonic::Nop);

    assert_eq!(cpu.a(), 0x12);
    assert_eq!(cpu.status(), status);
    assert_eq!(cpu.pc(), 0x8001);
}
