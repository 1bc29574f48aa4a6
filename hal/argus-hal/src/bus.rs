//! Address-space access for the memory commands
//!
//! The dump, peek and poke commands operate on three address spaces:
//! SRAM data (including the memory-mapped I/O registers), program code,
//! and EEPROM. On a real target these map to raw reads, flash reads and
//! EEPROM controller accesses; the monitor core only sees this trait.

/// EEPROM page size in bytes
pub const EEPROM_PAGE_SIZE: usize = 128;

/// Address space selector for [`MemoryBus`] accesses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MemSpace {
    /// SRAM data space (I/O registers appear at offset 0x20)
    Data,
    /// Program code space
    Code,
    /// EEPROM space
    Eeprom,
}

/// Errors from memory bus operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// The target does not implement this space or operation
    Unsupported,
    /// Address or page out of range for the space
    OutOfRange,
}

/// Byte-granular access to the target's address spaces
pub trait MemoryBus {
    /// Read one byte from the given space.
    ///
    /// Out-of-range addresses read as 0xFF, matching unprogrammed memory;
    /// reads never fail.
    fn read(&mut self, space: MemSpace, addr: u16) -> u8;

    /// Write one byte into the data space. The write is not verified.
    fn write_data(&mut self, addr: u16, value: u8);

    /// Fill one EEPROM page with 0xFF.
    fn erase_eeprom_page(&mut self, page: u8) -> Result<(), BusError>;
}
