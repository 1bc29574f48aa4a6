//! Monitor console: the context object behind every command
//!
//! [`Console`] owns all monitor state that the original design kept in
//! globals: the serial port, the scheduler and its housekeeping tasks,
//! the collaborator seams (memory bus, parameter store, system control),
//! the interactive flag, the one-shot response code and the debug/error
//! flag words. Handlers see it through the [`Services`] trait.
//!
//! The blocking byte I/O here is the system's only form of blocking:
//! after transferring one byte (or while waiting for one) the console
//! runs a scheduler pass, so tick-driven housekeeping keeps running while
//! a handler is, from its own point of view, blocked. Housekeeping
//! actions never receive the console and therefore cannot re-enter these
//! helpers; the scheduler's own guard backs that up at runtime.

use argus_core::config::MonitorConfig;
use argus_core::sched::{Clock, Housekeeping, Scheduler};

use argus_hal::bus::MemoryBus;
use argus_hal::serial::SerialPort;
use argus_hal::store::ParamStore;
use argus_hal::system::SystemControl;

use crate::line::{CR, LF};

/// Response code in machine (non-interactive) mode
pub const RESP_MACHINE: u8 = b'-';
/// Response code in interactive mode
pub const RESP_INTERACTIVE: u8 = b'=';
/// Response code after a command error (one-shot)
pub const RESP_ERROR: u8 = b'!';
/// Prompt glyph appended in interactive mode
pub const PROMPT: u8 = b'>';

/// Services available to command handlers.
///
/// Dyn-safe seam between the dispatch table and the generic [`Console`];
/// the emit helpers are default methods over [`Services::put_byte`], so
/// every byte they produce pumps the scheduler.
pub trait Services {
    /// Write one byte and run a scheduler pass.
    fn put_byte(&mut self, byte: u8);

    /// Fetch the next buffered input byte, if any. No echo, never blocks.
    fn read_raw(&mut self) -> Option<u8>;

    /// True when input is buffered
    fn rx_ready(&self) -> bool;

    /// Discard all buffered input
    fn flush_rx(&mut self);

    /// Masked read of the monotonic tick counter
    fn millis(&self) -> u32;

    /// Run one scheduler pass
    fn pump(&mut self);

    /// Interactive (echo + prompt) mode flag
    fn interactive(&self) -> bool;

    /// Switch interactive mode
    fn set_interactive(&mut self, on: bool);

    /// Current response code
    fn resp_code(&self) -> u8;

    /// Reset the response code to the mode's normal-completion code
    fn reset_resp_code(&mut self);

    /// Latch the error response code for the next terminator
    fn set_resp_error(&mut self);

    /// Build-time configuration defaults
    fn config(&self) -> MonitorConfig;

    /// Resident cursor for the auto-advancing memory dump
    fn dump_addr(&mut self) -> &mut u16;

    /// System debug flag word (shown and cleared by `SF`)
    fn debug_flags(&mut self) -> &mut u16;

    /// System error flag word (shown and cleared by `SE`)
    fn system_errors(&mut self) -> &mut u16;

    /// Target address spaces
    fn bus(&mut self) -> &mut dyn MemoryBus;

    /// Parameter persistence
    fn store(&mut self) -> &mut dyn ParamStore;

    /// MCU control
    fn system(&mut self) -> &mut dyn SystemControl;

    /// Wait for a keypress, echo it, return it.
    ///
    /// Pumps the scheduler while waiting. Must not be called from a
    /// housekeeping action (handlers only).
    fn get_byte(&mut self) -> u8 {
        loop {
            if let Some(byte) = self.read_raw() {
                self.put_byte(byte);
                return byte;
            }
            self.pump();
        }
    }

    /// Emit the two-byte output line break
    fn put_newline(&mut self) {
        self.put_byte(CR);
        self.put_byte(LF);
    }

    /// Output a string, expanding `\n` to CR LF.
    fn put_str(&mut self, s: &str) {
        for &b in s.as_bytes() {
            if b == b'\n' {
                self.put_newline();
            } else {
                self.put_byte(b);
            }
        }
    }

    /// Output the low nibble as one hex ASCII char
    fn put_hex_digit(&mut self, value: u8) {
        let digit = value & 0x0F;
        if digit < 10 {
            self.put_byte(b'0' + digit);
        } else {
            self.put_byte(b'A' + digit - 10);
        }
    }

    /// Output a byte as two hex ASCII chars, MSD first
    fn put_hex_byte(&mut self, value: u8) {
        self.put_hex_digit(value >> 4);
        self.put_hex_digit(value);
    }

    /// Output a word as four hex ASCII chars, MSD first
    fn put_hex_word(&mut self, value: u16) {
        self.put_hex_digit((value >> 12) as u8);
        self.put_hex_digit((value >> 8) as u8);
        self.put_hex_digit((value >> 4) as u8);
        self.put_hex_digit(value as u8);
    }

    /// Output a word as decimal with leading zeros in `places` digits
    /// (1..=5). Values wider than `places` are truncated to the least
    /// significant digits.
    fn put_dec_word(&mut self, value: u16, places: u8) {
        let places = places.min(5) as usize;
        let mut digits = [0u8; 5];
        let mut v = value;
        for slot in digits.iter_mut().rev() {
            *slot = (v % 10) as u8;
            v /= 10;
        }
        for &d in &digits[5 - places..] {
            self.put_hex_digit(d);
        }
    }

    /// Output a word as 16 binary digits, MS bit first, space separated,
    /// with a wider gap between the two bytes.
    fn put_word_bits(&mut self, value: u16) {
        let mut bit: u16 = 0x8000;
        while bit != 0 {
            self.put_byte(if value & bit != 0 { b'1' } else { b'0' });
            self.put_byte(b' ');
            if bit == 0x0100 {
                self.put_byte(b' ');
                self.put_byte(b' ');
            }
            bit >>= 1;
        }
    }

    /// Emit the response terminator: CR LF, the response code, and the
    /// prompt glyph in interactive mode.
    fn put_resp_term(&mut self) {
        self.put_newline();
        self.put_byte(self.resp_code());
        if self.interactive() {
            self.put_byte(PROMPT);
        }
    }

    /// Report a command error: latch the error code and, interactively,
    /// print a human-readable message.
    fn put_cmd_error(&mut self) {
        self.set_resp_error();
        if self.interactive() {
            self.put_str("\n! Command Error");
        }
    }
}

/// The monitor context object.
///
/// Owned by the top-level loop and passed by reference everywhere; the
/// generic parameters are the hardware seams of a target port.
pub struct Console<'c, S, C, H, B, P, Y>
where
    S: SerialPort,
    C: Clock,
    H: Housekeeping,
    B: MemoryBus,
    P: ParamStore,
    Y: SystemControl,
{
    serial: S,
    clock: &'c C,
    sched: Scheduler,
    tasks: H,
    bus: B,
    store: P,
    system: Y,
    config: MonitorConfig,
    interactive: bool,
    resp_code: u8,
    dump_addr: u16,
    debug_flags: u16,
    system_errors: u16,
}

impl<'c, S, C, H, B, P, Y> Console<'c, S, C, H, B, P, Y>
where
    S: SerialPort,
    C: Clock,
    H: Housekeeping,
    B: MemoryBus,
    P: ParamStore,
    Y: SystemControl,
{
    /// Assemble a console from its collaborators.
    ///
    /// Interactive mode and the response code start from the configured
    /// build-time default.
    pub fn new(
        serial: S,
        clock: &'c C,
        tasks: H,
        bus: B,
        store: P,
        system: Y,
        config: MonitorConfig,
    ) -> Self {
        let interactive = config.interactive_on_startup;
        Self {
            serial,
            clock,
            sched: Scheduler::new(),
            tasks,
            bus,
            store,
            system,
            config,
            interactive,
            resp_code: if interactive {
                RESP_INTERACTIVE
            } else {
                RESP_MACHINE
            },
            dump_addr: 0,
            debug_flags: 0,
            system_errors: 0,
        }
    }

    /// The underlying serial port (test observation point)
    pub fn serial(&self) -> &S {
        &self.serial
    }

    /// Mutable access to the serial port (test injection point)
    pub fn serial_mut(&mut self) -> &mut S {
        &mut self.serial
    }

    /// The housekeeping task set
    pub fn tasks(&self) -> &H {
        &self.tasks
    }

    /// The memory bus (test observation point)
    pub fn bus_ref(&self) -> &B {
        &self.bus
    }

    /// Mutable access to the memory bus (test injection point)
    pub fn bus_ref_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// The parameter store (test observation point)
    pub fn store_ref(&mut self) -> &mut P {
        &mut self.store
    }

    /// The system control seam (test observation point)
    pub fn system_ref(&self) -> &Y {
        &self.system
    }
}

impl<S, C, H, B, P, Y> Services for Console<'_, S, C, H, B, P, Y>
where
    S: SerialPort,
    C: Clock,
    H: Housekeeping,
    B: MemoryBus,
    P: ParamStore,
    Y: SystemControl,
{
    fn put_byte(&mut self, byte: u8) {
        self.serial.write_byte(byte);
        self.pump();
    }

    fn read_raw(&mut self) -> Option<u8> {
        self.serial.read_byte()
    }

    fn rx_ready(&self) -> bool {
        self.serial.rx_ready()
    }

    fn flush_rx(&mut self) {
        self.serial.flush_rx();
    }

    fn millis(&self) -> u32 {
        self.clock.millis()
    }

    fn pump(&mut self) {
        self.sched.service(self.clock, &mut self.tasks);
    }

    fn interactive(&self) -> bool {
        self.interactive
    }

    fn set_interactive(&mut self, on: bool) {
        self.interactive = on;
    }

    fn resp_code(&self) -> u8 {
        self.resp_code
    }

    fn reset_resp_code(&mut self) {
        self.resp_code = if self.interactive {
            RESP_INTERACTIVE
        } else {
            RESP_MACHINE
        };
    }

    fn set_resp_error(&mut self) {
        self.resp_code = RESP_ERROR;
    }

    fn config(&self) -> MonitorConfig {
        self.config
    }

    fn dump_addr(&mut self) -> &mut u16 {
        &mut self.dump_addr
    }

    fn debug_flags(&mut self) -> &mut u16 {
        &mut self.debug_flags
    }

    fn system_errors(&mut self) -> &mut u16 {
        &mut self.system_errors
    }

    fn bus(&mut self) -> &mut dyn MemoryBus {
        &mut self.bus
    }

    fn store(&mut self) -> &mut dyn ParamStore {
        &mut self.store
    }

    fn system(&mut self) -> &mut dyn SystemControl {
        &mut self.system
    }
}
