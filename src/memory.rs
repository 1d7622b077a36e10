//! # Memory Bus Abstraction
//!
//! This module provides the `MemoryBus` trait that decouples the CPU from specific
//! memory implementations, and [`FlatMemory`], the 64KB zero-initialized RAM the
//! simulator runs against by default.
//!
//! The MemoryBus trait follows 6502 hardware behavior:
//! - No bus errors - reads/writes always succeed
//! - Every value on the bus is a single byte

/// Memory bus trait for CPU to read/write bytes.
///
/// # Examples
///
/// ```
/// use w65c02s::{MemoryBus, FlatMemory};
///
/// let mut mem = FlatMemory::new();
/// mem.write(0x1234, 0x42);
/// assert_eq!(mem.read(0x1234), 0x42);
/// ```
///
/// ## Implementing Custom Memory
///
/// ```
/// use w65c02s::MemoryBus;
///
/// struct WriteProtectedTop {
///     ram: [u8; 0x8000],
///     rom: [u8; 0x8000],
/// }
///
/// impl MemoryBus for WriteProtectedTop {
///     fn read(&self, addr: u16) -> u8 {
///         if addr < 0x8000 {
///             self.ram[addr as usize]
///         } else {
///             self.rom[(addr - 0x8000) as usize]
///         }
///     }
///
///     fn write(&mut self, addr: u16, value: u8) {
///         if addr < 0x8000 {
///             self.ram[addr as usize] = value;
///         }
///     }
/// }
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified 16-bit address. Must never panic.
    fn read(&self, addr: u16) -> u8;

    /// Writes a byte to the specified 16-bit address. Must never panic.
    fn write(&mut self, addr: u16, value: u8);

    /// Reads a little-endian word from `addr` and `addr + 1`.
    ///
    /// The high byte address wraps at 0xFFFF, not at the zero page boundary,
    /// so a pointer stored at 0x00FF takes its high byte from 0x0100.
    ///
    /// ```
    /// use w65c02s::{MemoryBus, FlatMemory};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0x0024, 0x00);
    /// mem.write(0x0025, 0x80);
    /// assert_eq!(mem.read_word(0x0024), 0x8000);
    /// ```
    fn read_word(&self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }
}

/// Simple 64KB flat memory implementation.
///
/// All addresses (0x0000-0xFFFF) are writable RAM initialized to 0x00.
///
/// # Examples
///
/// ```
/// use w65c02s::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0x0010, 0x42);
///
/// let cpu = CPU::new(memory);
/// assert_eq!(cpu.memory().read(0x0010), 0x42);
/// assert_eq!(cpu.pc(), 0x0000);
/// ```
pub struct FlatMemory {
    data: Box<[u8; 65536]>,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; 65536]),
        }
    }

    /// Copies `bytes` into memory starting at `start`, wrapping past 0xFFFF.
    ///
    /// ```
    /// use w65c02s::{FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.load(0xFFFF, &[0xAA, 0xBB]);
    /// assert_eq!(mem.read(0xFFFF), 0xAA);
    /// assert_eq!(mem.read(0x0000), 0xBB);
    /// ```
    pub fn load(&mut self, start: u16, bytes: &[u8]) {
        let mut addr = start;
        for &byte in bytes {
            self.data[addr as usize] = byte;
            addr = addr.wrapping_add(1);
        }
    }

    /// Whole address space as a slice, for dumps and snapshots.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..]
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_memory_read_write() {
        let mut mem = FlatMemory::new();

        assert_eq!(mem.read(0x0000), 0x00);
        assert_eq!(mem.read(0xFFFF), 0x00);

        mem.write(0x1234, 0x42);
        assert_eq!(mem.read(0x1234), 0x42);

        // Neighbours untouched
        assert_eq!(mem.read(0x1233), 0x00);
        assert_eq!(mem.read(0x1235), 0x00);
    }

    #[test]
    fn test_read_word_crosses_zero_page() {
        let mut mem = FlatMemory::new();
        mem.write(0x00FF, 0x34);
        mem.write(0x0100, 0x12);
        mem.write(0x0000, 0x99);

        assert_eq!(mem.read_word(0x00FF), 0x1234);
    }

    #[test]
    fn test_read_word_wraps_address_space() {
        let mut mem = FlatMemory::new();
        mem.write(0xFFFF, 0xCD);
        mem.write(0x0000, 0xAB);

        assert_eq!(mem.read_word(0xFFFF), 0xABCD);
    }

    #[test]
    fn test_load_and_snapshot() {
        let mut mem = FlatMemory::new();
        mem.load(0x0200, &[1, 2, 3]);

        assert_eq!(&mem.as_slice()[0x0200..0x0203], &[1, 2, 3]);
        assert_eq!(mem.as_slice().len(), 65536);
    }
}
