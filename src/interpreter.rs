//! Source-level execution without a binary stage.
//!
//! The [`Interpreter`] assembles a program into [`AssembledInstruction`]s and
//! hands each one straight to [`CPU::execute`], following PC the same way
//! [`CPU::execute_from_rom`] does. For any program both paths finish with
//! the same registers, flags and memory.
//!
//! ```
//! use w65c02s::{interpret, CPU, FlatMemory};
//!
//! let mut cpu = CPU::new(FlatMemory::new());
//! let summary = interpret(&mut cpu, "LDX #$03\nloop: DEX\nBNE loop\n").unwrap();
//!
//! assert_eq!(cpu.x(), 0);
//! assert_eq!(summary.instructions, 7);
//! ```

use crate::assembler::{
    assemble_with_config, AssembledInstruction, AssemblerError, AssemblerOutput,
};
use crate::config::AssemblerConfig;
use crate::cpu::{RunSummary, StopReason, CPU};
use crate::memory::MemoryBus;
use crate::opcodes::Mnemonic;
use crate::ExecutionError;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// Errors from running assembly source.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpretError {
    /// The source did not assemble.
    #[error("assembly failed with {} error(s)", .0.len())]
    Assembly(Vec<AssemblerError>),

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    /// PC points into the middle of an instruction.
    #[error("PC 0x{0:04X} is not the start of an instruction")]
    MisalignedPc(u16),
}

/// A program ready for direct execution.
#[derive(Debug, Clone)]
pub struct Interpreter {
    instructions: Vec<AssembledInstruction>,
    by_address: BTreeMap<u16, usize>,
    /// One past the last program byte
    end: u32,
}

impl Interpreter {
    /// Assembles `source` with the given label and error policies.
    pub fn new(source: &str, config: &AssemblerConfig) -> Result<Self, InterpretError> {
        let output = assemble_with_config(source, config).map_err(InterpretError::Assembly)?;
        Ok(Self::from_output(&output))
    }

    /// Builds an interpreter from an existing assembly.
    pub fn from_output(output: &AssemblerOutput) -> Self {
        let instructions = output.instructions.clone();
        let by_address = instructions
            .iter()
            .enumerate()
            .map(|(i, inst)| (inst.address, i))
            .collect();
        let end = instructions
            .last()
            .map_or(0, |inst| inst.address as u32 + inst.size as u32);

        Self {
            instructions,
            by_address,
            end,
        }
    }

    pub fn instructions(&self) -> &[AssembledInstruction] {
        &self.instructions
    }

    /// The instruction starting at `pc`.
    ///
    /// `Ok(None)` when PC is outside the program.
    pub fn instruction_at(
        &self,
        pc: u16,
    ) -> Result<Option<&AssembledInstruction>, InterpretError> {
        if pc as u32 >= self.end {
            return Ok(None);
        }

        match self.by_address.get(&pc) {
            Some(&index) => Ok(Some(&self.instructions[index])),
            None => Err(InterpretError::MisalignedPc(pc)),
        }
    }

    /// Executes the instruction at the CPU's PC.
    ///
    /// Returns `None` without touching the CPU when PC is outside the program.
    pub fn step<M: MemoryBus>(
        &self,
        cpu: &mut CPU<M>,
    ) -> Result<Option<Mnemonic>, InterpretError> {
        let Some(inst) = self.instruction_at(cpu.pc())? else {
            return Ok(None);
        };

        cpu.execute(inst.mnemonic, inst.mode, inst.operand)?;
        Ok(Some(inst.mnemonic))
    }

    /// Runs from PC = 0 until PC leaves the program.
    ///
    /// Honors the CPU's `max_steps` limit the same way a ROM run does.
    pub fn run<M: MemoryBus>(&self, cpu: &mut CPU<M>) -> Result<RunSummary, InterpretError> {
        cpu.set_pc(0);
        let mut instructions = 0u64;
        let limit = cpu.config().max_steps;

        loop {
            if self.instruction_at(cpu.pc())?.is_none() {
                debug!(pc = cpu.pc(), instructions, "end of program");
                return Ok(RunSummary {
                    instructions,
                    stop: StopReason::EndOfRom,
                });
            }

            if let Some(limit) = limit {
                if instructions >= limit {
                    return Err(ExecutionError::StepLimitExceeded(limit).into());
                }
            }

            self.step(cpu)?;
            instructions += 1;
        }
    }
}

/// Assembles `source` with the default policies and runs it on `cpu`.
pub fn interpret<M: MemoryBus>(
    cpu: &mut CPU<M>,
    source: &str,
) -> Result<RunSummary, InterpretError> {
    Interpreter::new(source, &AssemblerConfig::default())?.run(cpu)
}
