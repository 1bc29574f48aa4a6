//! Board-agnostic core logic for the Argus debug monitor
//!
//! This crate contains the concurrency machinery that does not depend on
//! specific hardware implementations:
//!
//! - Receive ring buffer bridging the RX interrupt and the foreground loop
//! - Tick state: monotonic counter and cascaded period due-flags
//! - Cooperative scheduler servicing the due-flags
//! - Monitor configuration defaults
//!
//! The interrupt side of the design only ever touches [`ring::RxRing`] and
//! [`tick::TickState`]; everything else runs in the single foreground
//! context. Cross-context wrappers live in `argus-hal`.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod ring;
pub mod sched;
pub mod tick;

pub use ring::RxRing;
pub use sched::{Clock, Housekeeping, Scheduler};
pub use tick::{Period, PeriodFlags, TickConfig, TickState};
