//! # W65C02S Instruction Implementations
//!
//! This module contains the implementations of all emulated instructions, organized by
//! category. Each instruction is a standalone function taking the CPU and the already
//! resolved [`Target`]; PC has been advanced past the instruction before it runs.
//!
//! ## Categories
//!
//! - **alu**: Arithmetic, logic and compare (ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY)
//! - **branches**: Conditional branches (BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS)
//! - **shifts**: Shift and rotate operations (ASL, LSR, ROL, ROR)
//! - **load_store**: Load and store instructions (LDA, LDX, LDY, STA, STX, STY)
//! - **inc_dec**: Increment and decrement operations (INC, DEC, INX, INY, DEX, DEY)
//! - **stack**: Stack operations (PHA, PHP, PLA, PLP)
//! - **flags**: Status flag manipulation (CLC, SEC, CLI, SEI, CLD, SED, CLV)
//! - **transfer**: Register transfer operations (TAX, TAY, TXA, TYA, TSX, TXS)

pub(crate) mod alu;
pub(crate) mod branches;
pub(crate) mod flags;
pub(crate) mod inc_dec;
pub(crate) mod load_store;
pub(crate) mod shifts;
pub(crate) mod stack;
pub(crate) mod transfer;

use crate::cpu::Target;
use crate::opcodes::Mnemonic;
use crate::{MemoryBus, CPU};

/// Runs the handler for `mnemonic`.
pub(crate) fn dispatch<M: MemoryBus>(cpu: &mut CPU<M>, mnemonic: Mnemonic, target: Target) {
    match mnemonic {
        Mnemonic::Adc => alu::execute_adc(cpu, target),
        Mnemonic::Sbc => alu::execute_sbc(cpu, target),
        Mnemonic::And => alu::execute_and(cpu, target),
        Mnemonic::Ora => alu::execute_ora(cpu, target),
        Mnemonic::Eor => alu::execute_eor(cpu, target),
        Mnemonic::Cmp => alu::execute_cmp(cpu, target),
        Mnemonic::Cpx => alu::execute_cpx(cpu, target),
        Mnemonic::Cpy => alu::execute_cpy(cpu, target),

        Mnemonic::Bcc => branches::execute_bcc(cpu, target),
        Mnemonic::Bcs => branches::execute_bcs(cpu, target),
        Mnemonic::Beq => branches::execute_beq(cpu, target),
        Mnemonic::Bne => branches::execute_bne(cpu, target),
        Mnemonic::Bmi => branches::execute_bmi(cpu, target),
        Mnemonic::Bpl => branches::execute_bpl(cpu, target),
        Mnemonic::Bvc => branches::execute_bvc(cpu, target),
        Mnemonic::Bvs => branches::execute_bvs(cpu, target),

        Mnemonic::Asl => shifts::execute_asl(cpu, target),
        Mnemonic::Lsr => shifts::execute_lsr(cpu, target),
        Mnemonic::Rol => shifts::execute_rol(cpu, target),
        Mnemonic::Ror => shifts::execute_ror(cpu, target),

        Mnemonic::Lda => load_store::execute_lda(cpu, target),
        Mnemonic::Ldx => load_store::execute_ldx(cpu, target),
        Mnemonic::Ldy => load_store::execute_ldy(cpu, target),
        Mnemonic::Sta => load_store::execute_sta(cpu, target),
        Mnemonic::Stx => load_store::execute_stx(cpu, target),
        Mnemonic::Sty => load_store::execute_sty(cpu, target),

        Mnemonic::Inc => inc_dec::execute_inc(cpu, target),
        Mnemonic::Dec => inc_dec::execute_dec(cpu, target),
        Mnemonic::Inx => inc_dec::execute_inx(cpu),
        Mnemonic::Iny => inc_dec::execute_iny(cpu),
        Mnemonic::Dex => inc_dec::execute_dex(cpu),
        Mnemonic::Dey => inc_dec::execute_dey(cpu),

        Mnemonic::Pha => stack::execute_pha(cpu),
        Mnemonic::Php => stack::execute_php(cpu),
        Mnemonic::Pla => stack::execute_pla(cpu),
        Mnemonic::Plp => stack::execute_plp(cpu),

        Mnemonic::Clc => flags::execute_clc(cpu),
        Mnemonic::Sec => flags::execute_sec(cpu),
        Mnemonic::Cli => flags::execute_cli(cpu),
        Mnemonic::Sei => flags::execute_sei(cpu),
        Mnemonic::Clv => flags::execute_clv(cpu),
        Mnemonic::Cld => flags::execute_cld(cpu),
        Mnemonic::Sed => flags::execute_sed(cpu),

        Mnemonic::Tax => transfer::execute_tax(cpu),
        Mnemonic::Tay => transfer::execute_tay(cpu),
        Mnemonic::Txa => transfer::execute_txa(cpu),
        Mnemonic::Tya => transfer::execute_tya(cpu),
        Mnemonic::Tsx => transfer::execute_tsx(cpu),
        Mnemonic::Txs => transfer::execute_txs(cpu),

        // Reserved opcodes decode to NOP as well
        Mnemonic::Nop => {}
    }
}
