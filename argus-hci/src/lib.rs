//! Host Command Interface (HCI) for the Argus debug monitor
//!
//! Line-oriented ASCII command protocol over a serial link:
//!
//! ```text
//! <mnemonic:2><SP><arg1>[<SP><arg2>]...<CR>
//! ```
//!
//! Mnemonics are two characters, case-insensitive; arguments sit at fixed
//! offsets after single-space separators; lines are at most 63 bytes with
//! silent truncation beyond. Every transaction is closed by `CR LF` and a
//! response code: `-` (machine mode), `=` (interactive mode) or `!`
//! (error), plus a `>` prompt in interactive mode.
//!
//! The interface is built for machine-to-machine use; interactive mode
//! adds character echo and human-oriented error text for use with a
//! terminal emulator.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod ascii;
pub mod assembler;
pub mod commands;
pub mod console;
pub mod line;
pub mod monitor;
pub mod table;
pub mod version;

pub use assembler::Hci;
pub use console::{Console, Services};
pub use line::{CommandLine, CMD_LINE_SIZE};
pub use monitor::Monitor;
pub use table::{CmndEntry, CmndFn};
