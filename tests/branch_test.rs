//! Tests for the eight conditional branch instructions.
//!
//! Offsets are relative to the address after the two-byte branch.

use w65c02s::{AddressingMode, FlatMemory, MemoryBus, Mnemonic, CPU};

/// Helper function to create a CPU with PC at 0x8000
fn setup_cpu() -> CPU<FlatMemory> {
    let mut cpu = CPU::new(FlatMemory::new());
    cpu.set_pc(0x8000);
    cpu
}

fn branch(cpu: &mut CPU<FlatMemory>, mnemonic: Mnemonic, offset: u8) {
    cpu.execute(mnemonic, AddressingMode::Relative, Some(offset as u16))
        .unwrap();
}

#[test]
fn test_branch_taken_forward() {
    let mut cpu = setup_cpu();
    cpu.set_flag_z(true);

    branch(&mut cpu, Mnemonic::Beq, 0x10);

    assert_eq!(cpu.pc(), 0x8012);
}

#[test]
fn test_branch_taken_backward() {
    let mut cpu = setup_cpu();
    cpu.set_flag_z(false);

    branch(&mut cpu, Mnemonic::Bne, 0xFC); // -4

    assert_eq!(cpu.pc(), 0x7FFE);
}

#[test]
fn test_branch_not_taken() {
    let mut cpu = setup_cpu();
    cpu.set_flag_c(true);

    branch(&mut cpu, Mnemonic::Bcc, 0x10);

    assert_eq!(cpu.pc(), 0x8002);
}

#[test]
fn test_branch_conditions() {
    let cases: [(Mnemonic, fn(&mut CPU<FlatMemory>)); 8] = [
        (Mnemonic::Bcc, |cpu| cpu.set_flag_c(false)),
        (Mnemonic::Bcs, |cpu| cpu.set_flag_c(true)),
        (Mnemonic::Bne, |cpu| cpu.set_flag_z(false)),
        (Mnemonic::Beq, |cpu| cpu.set_flag_z(true)),
        (Mnemonic::Bpl, |cpu| cpu.set_flag_n(false)),
        (Mnemonic::Bmi, |cpu| cpu.set_flag_n(true)),
        (Mnemonic::Bvc, |cpu| cpu.set_flag_v(false)),
        (Mnemonic::Bvs, |cpu| cpu.set_flag_v(true)),
    ];

    for (mnemonic, arrange) in cases {
        let mut cpu = setup_cpu();
        arrange(&mut cpu);
        let status = cpu.status();

        branch(&mut cpu, mnemonic, 0x04);

        assert_eq!(cpu.pc(), 0x8006, "{} should be taken", mnemonic);
        assert_eq!(cpu.status(), status, "{} must not change flags", mnemonic);
    }
}

#[test]
fn test_branch_wraps_program_counter() {
    let mut cpu = CPU::new(FlatMemory::new());
    cpu.set_flag_n(false);

    branch(&mut cpu, Mnemonic::Bpl, 0x80); // -128 from 0x0002

    assert_eq!(cpu.pc(), 0xFF82);
}

#[test]
fn test_branch_loop_from_memory() {
    let mut cpu = setup_cpu();
    // LDX #$03; loop: DEX; BNE loop
    cpu.memory_mut()
        .load(0x8000, &[0xA2, 0x03, 0xCA, 0xD0, 0xFD]);

    let mut steps = 0;
    while cpu.pc() < 0x8005 {
        cpu.step().unwrap();
        steps += 1;
    }

    assert_eq!(cpu.x(), 0x00);
    assert_eq!(steps, 7);
    assert!(cpu.flag_z());
}
