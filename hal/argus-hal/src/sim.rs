//! In-memory implementations for host tests and simulation
//!
//! These doubles let the whole monitor run on a development host: a
//! loopback serial port with scripted input and captured output, a clock
//! whose simulated time advances as the foreground busy-waits, and
//! SRAM-backed memory bus / parameter store / system control stand-ins.

use core::cell::RefCell;

use heapless::Vec;

use argus_core::ring::RxRing;
use argus_core::sched::Clock;
use argus_core::tick::{Period, TickConfig, TickState};

use crate::bus::{BusError, MemSpace, MemoryBus, EEPROM_PAGE_SIZE};
use crate::serial::{ByteRx, ByteTx};
use crate::store::{ParamKey, ParamStore, StoreError};
use crate::system::SystemControl;

/// Scripted input capacity
const RX_CAPACITY: usize = 256;
/// Captured output capacity
const TX_CAPACITY: usize = 8192;

/// Loopback serial port: scripted RX bytes, captured TX bytes.
#[derive(Default)]
pub struct LoopbackSerial {
    rx: RxRing<RX_CAPACITY>,
    tx: Vec<u8, TX_CAPACITY>,
}

impl LoopbackSerial {
    /// Create an idle port
    pub fn new() -> Self {
        Self {
            rx: RxRing::new(),
            tx: Vec::new(),
        }
    }

    /// Script bytes to appear on the receive side.
    ///
    /// Bytes beyond the internal capacity are dropped, the same policy as
    /// the real interrupt-fed FIFO.
    pub fn feed(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.rx.push(b);
        }
    }

    /// Everything written so far
    pub fn tx_bytes(&self) -> &[u8] {
        &self.tx
    }

    /// Drop the captured output
    pub fn clear_tx(&mut self) {
        self.tx.clear();
    }
}

impl ByteTx for LoopbackSerial {
    fn write_byte(&mut self, byte: u8) {
        // Capture overflow just drops, tests keep output small
        let _ = self.tx.push(byte);
    }
}

impl ByteRx for LoopbackSerial {
    fn rx_ready(&self) -> bool {
        !self.rx.is_empty()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.rx.pop()
    }

    fn flush_rx(&mut self) {
        self.rx.flush();
    }
}

/// Simulated tick source.
///
/// Real hardware advances the tick state from a timer interrupt while the
/// foreground busy-waits; here simulated time advances by a fixed number
/// of ticks on every `millis()` read, so blocking delay loops terminate.
/// Tests can also advance time explicitly.
pub struct SimClock {
    state: RefCell<TickState>,
    ticks_per_poll: u32,
}

impl SimClock {
    /// Clock that only advances via [`SimClock::advance`]
    pub fn manual() -> Self {
        Self::with_rate(0)
    }

    /// Clock advancing `ticks_per_poll` ticks per `millis()` read
    pub fn with_rate(ticks_per_poll: u32) -> Self {
        Self {
            state: RefCell::new(TickState::new(TickConfig::default())),
            ticks_per_poll,
        }
    }

    /// Advance simulated time by the given number of ticks
    pub fn advance(&self, ticks: u32) {
        let mut state = self.state.borrow_mut();
        for _ in 0..ticks {
            state.tick();
        }
    }
}

impl Clock for SimClock {
    fn millis(&self) -> u32 {
        self.advance(self.ticks_per_poll);
        self.state.borrow().millis()
    }

    fn is_due(&self, period: Period) -> bool {
        self.state.borrow().is_due(period)
    }

    fn clear_due(&self, period: Period) {
        self.state.borrow_mut().clear_due(period);
    }
}

/// Data space size of the simulated target
pub const SIM_DATA_SIZE: usize = 4096;
/// Code space size of the simulated target
pub const SIM_CODE_SIZE: usize = 1024;
/// EEPROM size of the simulated target (8 pages)
pub const SIM_EEPROM_SIZE: usize = 1024;

/// SRAM-backed memory bus double.
pub struct SimBus {
    pub data: [u8; SIM_DATA_SIZE],
    pub code: [u8; SIM_CODE_SIZE],
    pub eeprom: [u8; SIM_EEPROM_SIZE],
}

impl SimBus {
    /// All spaces zeroed except EEPROM, which reads erased (0xFF)
    pub fn new() -> Self {
        Self {
            data: [0; SIM_DATA_SIZE],
            code: [0; SIM_CODE_SIZE],
            eeprom: [0xFF; SIM_EEPROM_SIZE],
        }
    }
}

impl Default for SimBus {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for SimBus {
    fn read(&mut self, space: MemSpace, addr: u16) -> u8 {
        let addr = addr as usize;
        match space {
            MemSpace::Data => self.data.get(addr).copied().unwrap_or(0xFF),
            MemSpace::Code => self.code.get(addr).copied().unwrap_or(0xFF),
            MemSpace::Eeprom => self.eeprom.get(addr).copied().unwrap_or(0xFF),
        }
    }

    fn write_data(&mut self, addr: u16, value: u8) {
        if let Some(slot) = self.data.get_mut(addr as usize) {
            *slot = value;
        }
    }

    fn erase_eeprom_page(&mut self, page: u8) -> Result<(), BusError> {
        let start = page as usize * EEPROM_PAGE_SIZE;
        let end = start + EEPROM_PAGE_SIZE;
        if end > self.eeprom.len() {
            return Err(BusError::OutOfRange);
        }
        self.eeprom[start..end].fill(0xFF);
        Ok(())
    }
}

/// Largest parameter blob the store double accepts
const SIM_BLOB_MAX: usize = 64;

/// In-memory parameter store double.
#[derive(Default)]
pub struct SimStore {
    slots: [Option<Vec<u8, SIM_BLOB_MAX>>; 2],
}

impl SimStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl ParamStore for SimStore {
    fn read(&mut self, key: ParamKey, buffer: &mut [u8]) -> Result<usize, StoreError> {
        let slot = self.slots[key.as_u8() as usize]
            .as_ref()
            .ok_or(StoreError::NotFound)?;
        if buffer.len() < slot.len() {
            return Err(StoreError::BufferTooSmall);
        }
        buffer[..slot.len()].copy_from_slice(slot);
        Ok(slot.len())
    }

    fn write(&mut self, key: ParamKey, data: &[u8]) -> Result<(), StoreError> {
        let mut blob = Vec::new();
        blob.extend_from_slice(data).map_err(|_| StoreError::Full)?;
        self.slots[key.as_u8() as usize] = Some(blob);
        Ok(())
    }
}

/// System control double recording reset requests.
#[derive(Debug, Default)]
pub struct SimSystem {
    pub reset_requests: u32,
}

impl SimSystem {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SystemControl for SimSystem {
    fn reset(&mut self) {
        self.reset_requests += 1;
    }
}
