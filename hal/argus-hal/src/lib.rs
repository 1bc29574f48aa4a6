//! Hardware abstraction traits for the Argus debug monitor
//!
//! The monitor core never touches device registers. Everything
//! hardware-dependent sits behind the seams defined here:
//!
//! - [`serial`]: byte-oriented transport (blocking write, polled read)
//! - [`bus`]: address-space access for the dump/peek/poke commands
//! - [`store`]: persistent key-value store for configuration defaults
//! - [`system`]: MCU reset
//! - [`shared`]: interrupt-masked wrappers around the cross-context state
//! - [`sim`]: in-memory implementations for host tests and simulation
//!
//! A target port implements these traits over its UART, flash and reset
//! peripherals and binds the `shared` wrappers to its interrupt vectors.

#![no_std]

pub mod bus;
pub mod serial;
pub mod shared;
pub mod sim;
pub mod store;
pub mod system;

pub use bus::{BusError, MemSpace, MemoryBus};
pub use serial::{ByteRx, ByteTx, SerialPort};
pub use shared::{IrqRxQueue, QueueRx, TickTimer};
pub use store::{ParamKey, ParamStore, StoreError};
pub use system::SystemControl;
