//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the W65C02S processor state and
//! the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of next instruction
//! - **Stack pointer** (SP): 8-bit offset into stack page (0x0100-0x01FF)
//! - **Status register** (P): packed NV-BDIZC byte
//!
//! ## Execution Model
//!
//! Every path ends in the same per-mnemonic handlers:
//! - `execute()`: direct dispatch of an already-resolved instruction
//! - `execute_opcode()`: decode one opcode plus its operand bytes
//! - `step()`: fetch one instruction from memory at PC
//! - `execute_from_rom()`: run a byte stream from PC = 0 until halt

use crate::config::{CompareMode, CpuConfig, OverflowMode};
use crate::instructions;
use crate::opcodes::{decode, opcode_for, Mnemonic};
use crate::{AddressingMode, ExecutionError, MemoryBus};
use tracing::{debug, trace, warn};

/// Carry flag mask (bit 0).
pub const FLAG_C: u8 = 0b0000_0001;
/// Zero flag mask (bit 1).
pub const FLAG_Z: u8 = 0b0000_0010;
/// Interrupt disable flag mask (bit 2).
pub const FLAG_I: u8 = 0b0000_0100;
/// Decimal mode flag mask (bit 3).
pub const FLAG_D: u8 = 0b0000_1000;
/// Break flag mask (bit 4).
pub const FLAG_B: u8 = 0b0001_0000;
/// Unused bit 5, conventionally set.
pub const FLAG_UNUSED: u8 = 0b0010_0000;
/// Overflow flag mask (bit 6).
pub const FLAG_V: u8 = 0b0100_0000;
/// Negative flag mask (bit 7).
pub const FLAG_N: u8 = 0b1000_0000;

/// Status register value after construction.
pub const INITIAL_STATUS: u8 = FLAG_UNUSED | FLAG_I;

/// Initial stack pointer.
pub const INITIAL_SP: u8 = 0xFD;

/// Base address of the stack page.
pub const STACK_BASE: u16 = 0x0100;

/// Opcode byte that ends a program run.
pub const HALT_OPCODE: u8 = 0x00;

/// Masks a value to 8 bits.
///
/// ```
/// use w65c02s::cpu::mask8;
///
/// assert_eq!(mask8(0x1FF), 0xFF);
/// assert_eq!(mask8(256), 0);
/// ```
pub fn mask8(value: u32) -> u8 {
    (value & 0xFF) as u8
}

/// Masks a value to 16 bits.
pub fn mask16(value: u32) -> u16 {
    (value & 0xFFFF) as u16
}

/// Reads a byte as a two's-complement value.
///
/// ```
/// use w65c02s::cpu::signed8;
///
/// assert_eq!(signed8(0x7F), 127);
/// assert_eq!(signed8(0x80), -128);
/// assert_eq!(signed8(0xFF), -1);
/// ```
pub fn signed8(value: u8) -> i8 {
    value as i8
}

/// What an instruction operates on, once its addressing mode is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    /// No operand (implied and stack modes).
    None,
    /// The accumulator register.
    Accumulator,
    /// A constant byte from the instruction stream.
    Immediate(u8),
    /// An effective address.
    Memory(u16),
    /// A signed branch offset.
    Relative(i8),
}

/// Why a ROM run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A 0x00 opcode was fetched.
    Halt,
    /// PC moved outside the ROM.
    EndOfRom,
}

/// Result of a successful ROM run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Instructions executed, not counting the halt byte.
    pub instructions: u64,
    /// How the run ended.
    pub stop: StopReason,
}

/// Result of a single [`CPU::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// One instruction was executed.
    Executed(Mnemonic),
    /// The byte at PC is the halt opcode; nothing changed.
    Halted,
}

/// W65C02S CPU state and execution context.
///
/// Generic over the memory implementation via the `MemoryBus` trait.
///
/// # Examples
///
/// ```
/// use w65c02s::{CPU, FlatMemory};
///
/// let cpu = CPU::new(FlatMemory::new());
///
/// assert_eq!(cpu.pc(), 0x0000);
/// assert_eq!(cpu.sp(), 0xFD);
/// assert_eq!(cpu.status(), 0b0010_0100);
/// assert!(cpu.flag_i());
/// ```
pub struct CPU<M: MemoryBus> {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Program counter (address of next instruction)
    pub(crate) pc: u16,

    /// Stack pointer (0x0100 + sp gives full stack address)
    pub(crate) sp: u8,

    /// Packed status register
    pub(crate) p: u8,

    pub(crate) config: CpuConfig,

    /// Memory bus implementation
    pub(crate) memory: M,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a new CPU with the given memory bus and default configuration.
    ///
    /// A, X and Y are zero, PC is 0x0000, SP is 0xFD and P is `0b0010_0100`.
    pub fn new(memory: M) -> Self {
        Self::with_config(memory, CpuConfig::default())
    }

    /// Creates a new CPU with an explicit configuration.
    ///
    /// ```
    /// use w65c02s::{CPU, FlatMemory};
    /// use w65c02s::config::CpuConfig;
    ///
    /// let cpu = CPU::with_config(FlatMemory::new(), CpuConfig::hardware());
    /// assert_eq!(cpu.config(), &CpuConfig::hardware());
    /// ```
    pub fn with_config(memory: M, config: CpuConfig) -> Self {
        Self {
            a: 0x00,
            x: 0x00,
            y: 0x00,
            pc: 0x0000,
            sp: INITIAL_SP,
            p: INITIAL_STATUS,
            config,
            memory,
        }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &CpuConfig {
        &self.config
    }

    /// Replaces the configuration.
    pub fn set_config(&mut self, config: CpuConfig) {
        self.config = config;
    }

    // ========== Execution ==========

    /// Executes an already-resolved instruction (direct dispatch).
    ///
    /// The (mnemonic, mode) pair and the operand are validated before any
    /// state changes. PC then advances by the instruction's encoded length,
    /// exactly as if it had been fetched from memory, and the handler runs.
    ///
    /// `operand` is the raw value from the instruction: a byte for one-byte
    /// modes (a branch offset is the unrelocated offset byte), a word for
    /// two-byte modes, ignored for modes without operand bytes.
    ///
    /// # Errors
    ///
    /// - `UnsupportedCombination` if the mnemonic has no opcode in `mode`
    /// - `MissingOperand` if the mode needs an operand and none was given
    ///
    /// # Examples
    ///
    /// ```
    /// use w65c02s::{AddressingMode, CPU, FlatMemory, Mnemonic};
    ///
    /// let mut cpu = CPU::new(FlatMemory::new());
    /// cpu.execute(Mnemonic::Lda, AddressingMode::Immediate, Some(0x05)).unwrap();
    /// cpu.execute(Mnemonic::Tax, AddressingMode::Implied, None).unwrap();
    ///
    /// assert_eq!(cpu.x(), 0x05);
    /// assert_eq!(cpu.pc(), 3);
    /// ```
    pub fn execute(
        &mut self,
        mnemonic: Mnemonic,
        mode: AddressingMode,
        operand: Option<u16>,
    ) -> Result<(), ExecutionError> {
        if opcode_for(mnemonic, mode).is_none() {
            return Err(ExecutionError::UnsupportedCombination { mnemonic, mode });
        }

        let target = self.effective_target(mode, operand)?;
        trace!(pc = self.pc, %mnemonic, %mode, ?target, "execute");

        self.pc = self.pc.wrapping_add(1 + mode.operand_bytes() as u16);
        instructions::dispatch(self, mnemonic, target);

        Ok(())
    }

    /// Decodes and executes one opcode with its operand bytes, returning the
    /// instruction that ran.
    ///
    /// Operand bytes are little-endian; extra bytes are ignored. PC advances
    /// by the decoded instruction size, so reserved opcodes skip their
    /// documented operand bytes.
    ///
    /// # Errors
    ///
    /// - `UnknownOpcode` if the opcode has no emulated instruction
    /// - `TruncatedInstruction` if fewer operand bytes than required are given
    ///
    /// # Examples
    ///
    /// ```
    /// use w65c02s::{CPU, FlatMemory};
    ///
    /// let mut cpu = CPU::new(FlatMemory::new());
    /// cpu.execute_opcode(0xA9, &[0x42]).unwrap(); // LDA #$42
    /// assert_eq!(cpu.a(), 0x42);
    ///
    /// assert!(cpu.execute_opcode(0x4C, &[0x00, 0x80]).is_err()); // JMP
    /// ```
    pub fn execute_opcode(
        &mut self,
        opcode: u8,
        operand_bytes: &[u8],
    ) -> Result<Mnemonic, ExecutionError> {
        let metadata = decode(opcode);

        let Some(mnemonic) = metadata.instruction else {
            warn!(
                "Unknown opcode: 0x{:02X} ({}) at PC 0x{:04X}",
                opcode, metadata.mnemonic, self.pc
            );
            return Err(ExecutionError::UnknownOpcode { opcode, pc: self.pc });
        };

        let operand = match (metadata.operand_bytes(), operand_bytes) {
            (0, _) => None,
            (1, [lo, ..]) => Some(*lo as u16),
            (2, [lo, hi, ..]) => Some(u16::from_le_bytes([*lo, *hi])),
            (expected, found) => {
                return Err(ExecutionError::TruncatedInstruction {
                    opcode,
                    expected,
                    found: found.len(),
                })
            }
        };

        let target = self.effective_target(metadata.addressing_mode, operand)?;
        trace!(
            pc = self.pc,
            opcode = format_args!("0x{:02X}", opcode),
            %mnemonic,
            mode = %metadata.addressing_mode,
            "execute_opcode"
        );

        self.pc = self.pc.wrapping_add(metadata.size_bytes as u16);
        instructions::dispatch(self, mnemonic, target);

        Ok(mnemonic)
    }

    /// Executes one instruction fetched from memory at PC.
    ///
    /// Operand bytes are read from the addresses following PC, wrapping at
    /// 0xFFFF. A halt opcode at PC is reported without changing any state.
    ///
    /// # Examples
    ///
    /// ```
    /// use w65c02s::{CPU, FlatMemory, MemoryBus, Mnemonic};
    /// use w65c02s::cpu::StepOutcome;
    ///
    /// let mut memory = FlatMemory::new();
    /// memory.load(0x0000, &[0xE8, 0x00]); // INX, halt
    ///
    /// let mut cpu = CPU::new(memory);
    /// assert_eq!(cpu.step().unwrap(), StepOutcome::Executed(Mnemonic::Inx));
    /// assert_eq!(cpu.step().unwrap(), StepOutcome::Halted);
    /// assert_eq!(cpu.x(), 1);
    /// assert_eq!(cpu.pc(), 1);
    /// ```
    pub fn step(&mut self) -> Result<StepOutcome, ExecutionError> {
        let opcode = self.memory.read(self.pc);
        if opcode == HALT_OPCODE {
            debug!(pc = self.pc, "halt");
            return Ok(StepOutcome::Halted);
        }

        let operands = [
            self.memory.read(self.pc.wrapping_add(1)),
            self.memory.read(self.pc.wrapping_add(2)),
        ];
        let mnemonic = self.execute_opcode(opcode, &operands)?;

        Ok(StepOutcome::Executed(mnemonic))
    }

    /// Runs a headerless program image from PC = 0.
    ///
    /// Instructions and their operands are fetched from `rom`, not from the
    /// memory bus. The run ends when a 0x00 opcode is fetched or PC leaves
    /// the image; if `max_steps` is configured, executing more instructions
    /// than that is an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use w65c02s::{CPU, FlatMemory};
    /// use w65c02s::cpu::StopReason;
    ///
    /// let mut cpu = CPU::new(FlatMemory::new());
    /// let summary = cpu.execute_from_rom(&[0xA9, 0x05, 0xAA, 0x00]).unwrap();
    ///
    /// assert_eq!(summary.instructions, 2);
    /// assert_eq!(summary.stop, StopReason::Halt);
    /// assert_eq!(cpu.x(), 0x05);
    /// ```
    pub fn execute_from_rom(&mut self, rom: &[u8]) -> Result<RunSummary, ExecutionError> {
        self.pc = 0;
        let mut instructions = 0u64;

        loop {
            let pc = self.pc as usize;

            let Some(&opcode) = rom.get(pc) else {
                debug!(pc, instructions, "end of ROM");
                return Ok(RunSummary {
                    instructions,
                    stop: StopReason::EndOfRom,
                });
            };

            if opcode == HALT_OPCODE {
                debug!(pc, instructions, "halt");
                return Ok(RunSummary {
                    instructions,
                    stop: StopReason::Halt,
                });
            }

            if let Some(limit) = self.config.max_steps {
                if instructions >= limit {
                    return Err(ExecutionError::StepLimitExceeded(limit));
                }
            }

            let end = (pc + decode(opcode).size_bytes as usize).min(rom.len());
            self.execute_opcode(opcode, &rom[pc + 1..end])?;
            instructions += 1;
        }
    }

    /// Applies an addressing mode to a raw operand.
    ///
    /// Only reads memory, so it is safe to call before committing an instruction.
    pub(crate) fn effective_target(
        &self,
        mode: AddressingMode,
        operand: Option<u16>,
    ) -> Result<Target, ExecutionError> {
        let value = match mode {
            AddressingMode::Implied | AddressingMode::Stack => return Ok(Target::None),
            AddressingMode::Accumulator => return Ok(Target::Accumulator),
            _ => operand.ok_or(ExecutionError::MissingOperand(mode))?,
        };

        let zp = value & 0x00FF;

        let target = match mode {
            AddressingMode::Immediate => Target::Immediate(value as u8),
            AddressingMode::Relative => Target::Relative(signed8(value as u8)),
            AddressingMode::ZeroPage => Target::Memory(zp),
            AddressingMode::ZeroPageX => Target::Memory((zp + self.x as u16) & 0x00FF),
            AddressingMode::ZeroPageY => Target::Memory((zp + self.y as u16) & 0x00FF),
            AddressingMode::Absolute => Target::Memory(value),
            AddressingMode::AbsoluteX => Target::Memory(value.wrapping_add(self.x as u16)),
            AddressingMode::AbsoluteY => Target::Memory(value.wrapping_add(self.y as u16)),
            AddressingMode::Indirect => Target::Memory(self.memory.read_word(value)),
            AddressingMode::AbsoluteIndexedIndirect => {
                Target::Memory(self.memory.read_word(value.wrapping_add(self.x as u16)))
            }
            AddressingMode::IndirectX => {
                let ind = (zp + self.x as u16) & 0x00FF;
                Target::Memory(self.memory.read_word(ind))
            }
            AddressingMode::IndirectY => {
                let base = self.memory.read_word(zp);
                Target::Memory(base.wrapping_add(self.y as u16))
            }
            AddressingMode::ZeroPageIndirect => Target::Memory(self.memory.read_word(zp)),
            AddressingMode::Implied | AddressingMode::Stack | AddressingMode::Accumulator => {
                Target::None
            }
        };

        Ok(target)
    }

    /// Reads the byte an instruction operates on.
    ///
    /// Handlers only call this for value-bearing targets; the opcode table
    /// guarantees it.
    pub(crate) fn read_target(&self, target: Target) -> u8 {
        match target {
            Target::Accumulator => self.a,
            Target::Immediate(value) => value,
            Target::Memory(addr) => self.memory.read(addr),
            Target::None | Target::Relative(_) => 0,
        }
    }

    /// Writes the result of a read-modify-write instruction back.
    pub(crate) fn write_target(&mut self, target: Target, value: u8) {
        match target {
            Target::Accumulator => self.a = value,
            Target::Memory(addr) => self.memory.write(addr, value),
            Target::None | Target::Immediate(_) | Target::Relative(_) => {}
        }
    }

    // ========== Flag Arithmetic ==========

    pub(crate) fn set_flag(&mut self, mask: u8, on: bool) {
        if on {
            self.p |= mask;
        } else {
            self.p &= !mask;
        }
    }

    pub(crate) fn flag(&self, mask: u8) -> bool {
        self.p & mask != 0
    }

    /// Z = (value == 0), N = bit 7.
    pub(crate) fn set_zn(&mut self, value: u8) {
        self.set_flag(FLAG_Z, value == 0);
        self.set_flag(FLAG_N, value & 0x80 != 0);
    }

    /// Overflow for `lhs (+|-) rhs = result` under the configured rule.
    pub(crate) fn overflow(&self, lhs: u8, rhs: u8, result: u8, subtract: bool) -> bool {
        match self.config.overflow {
            OverflowMode::SignHeuristic => {
                let (l, r, res) = (signed8(lhs), signed8(rhs), signed8(result));
                (l > 0 && r > 0 && res < 0) || (l < 0 && r < 0 && res > 0)
            }
            OverflowMode::TwosComplement if subtract => (lhs ^ rhs) & (lhs ^ result) & 0x80 != 0,
            OverflowMode::TwosComplement => (lhs ^ result) & (rhs ^ result) & 0x80 != 0,
        }
    }

    /// Sets C, Z and N for `register` against `value` under the configured ordering.
    ///
    /// Signed mode takes N from the register itself; unsigned mode takes it
    /// from `register - value` as the hardware does.
    pub(crate) fn compare(&mut self, register: u8, value: u8) {
        let (carry, zero, negative) = match self.config.compare {
            CompareMode::Signed => (
                signed8(register) >= signed8(value),
                signed8(register) == signed8(value),
                register & 0x80 != 0,
            ),
            CompareMode::Unsigned => (
                register >= value,
                register == value,
                register.wrapping_sub(value) & 0x80 != 0,
            ),
        };

        self.set_flag(FLAG_C, carry);
        self.set_flag(FLAG_Z, zero);
        self.set_flag(FLAG_N, negative);
    }

    // ========== Stack ==========

    /// Pushes a byte: writes to 0x0100 + SP, then decrements SP (wrapping).
    pub fn push(&mut self, value: u8) {
        self.memory.write(STACK_BASE | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    /// Pulls a byte: increments SP (wrapping), then reads 0x0100 + SP.
    pub fn pull(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.memory.read(STACK_BASE | self.sp as u16)
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    ///
    /// Note: The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the status register as a packed byte.
    ///
    /// Bit layout (NV-BDIZC):
    /// - Bit 7: N (Negative)
    /// - Bit 6: V (Overflow)
    /// - Bit 5: (unused, conventionally 1)
    /// - Bit 4: B (Break)
    /// - Bit 3: D (Decimal)
    /// - Bit 2: I (Interrupt Disable)
    /// - Bit 1: Z (Zero)
    /// - Bit 0: C (Carry)
    pub fn status(&self) -> u8 {
        self.p
    }

    // ========== Status Flag Getters ==========

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.flag(FLAG_N)
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.flag(FLAG_V)
    }

    /// Returns true if the Break flag is set.
    pub fn flag_b(&self) -> bool {
        self.flag(FLAG_B)
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.flag(FLAG_D)
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.flag(FLAG_I)
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.flag(FLAG_Z)
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.flag(FLAG_C)
    }

    // ========== Register Setters ==========

    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Overwrites the whole status register, bits 4 and 5 included.
    pub fn set_status(&mut self, value: u8) {
        self.p = value;
    }

    // ========== Status Flag Setters ==========

    pub fn set_flag_n(&mut self, value: bool) {
        self.set_flag(FLAG_N, value);
    }

    pub fn set_flag_v(&mut self, value: bool) {
        self.set_flag(FLAG_V, value);
    }

    pub fn set_flag_b(&mut self, value: bool) {
        self.set_flag(FLAG_B, value);
    }

    pub fn set_flag_d(&mut self, value: bool) {
        self.set_flag(FLAG_D, value);
    }

    pub fn set_flag_i(&mut self, value: bool) {
        self.set_flag(FLAG_I, value);
    }

    pub fn set_flag_z(&mut self, value: bool) {
        self.set_flag(FLAG_Z, value);
    }

    pub fn set_flag_c(&mut self, value: bool) {
        self.set_flag(FLAG_C, value);
    }

    // ========== Memory Access ==========

    /// Returns a shared reference to the memory bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Returns a mutable reference to the memory bus, for pokes and program loading.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Consumes the CPU and returns its memory bus.
    pub fn into_memory(self) -> M {
        self.memory
    }
}
