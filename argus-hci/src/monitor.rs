//! Top-level monitor loop
//!
//! Ties the console and the HCI state machine together. A target's main
//! does the hardware bring-up, builds a [`Monitor`], calls
//! [`Monitor::startup`] once, then calls [`Monitor::poll`] forever:
//! drain at most one received byte into the assembler, then run one
//! scheduler pass. Command handlers that block on I/O keep the
//! housekeeping alive through the console's cooperative pumping, so the
//! loop itself stays trivial.

use argus_core::config::MonitorConfig;
use argus_core::sched::{Clock, Housekeeping};

use argus_hal::bus::MemoryBus;
use argus_hal::serial::SerialPort;
use argus_hal::store::ParamStore;
use argus_hal::system::SystemControl;

use crate::assembler::Hci;
use crate::commands::COMMANDS;
use crate::console::{Console, Services};
use crate::table::CmndEntry;

/// The assembled monitor: context object plus input state machine.
pub struct Monitor<'c, S, C, H, B, P, Y>
where
    S: SerialPort,
    C: Clock,
    H: Housekeeping,
    B: MemoryBus,
    P: ParamStore,
    Y: SystemControl,
{
    console: Console<'c, S, C, H, B, P, Y>,
    hci: Hci,
}

impl<'c, S, C, H, B, P, Y> Monitor<'c, S, C, H, B, P, Y>
where
    S: SerialPort,
    C: Clock,
    H: Housekeeping,
    B: MemoryBus,
    P: ParamStore,
    Y: SystemControl,
{
    /// Build a monitor over the resident command set.
    pub fn new(
        serial: S,
        clock: &'c C,
        tasks: H,
        bus: B,
        store: P,
        system: Y,
        config: MonitorConfig,
    ) -> Self {
        Self::with_table(serial, clock, tasks, bus, store, system, config, COMMANDS)
    }

    /// Build a monitor with an application-specific command table.
    #[allow(clippy::too_many_arguments)]
    pub fn with_table(
        serial: S,
        clock: &'c C,
        tasks: H,
        bus: B,
        store: P,
        system: Y,
        config: MonitorConfig,
        table: &'static [CmndEntry],
    ) -> Self {
        Self {
            console: Console::new(serial, clock, tasks, bus, store, system, config),
            hci: Hci::new(table),
        }
    }

    /// Announce the monitor on the serial link.
    ///
    /// Interactive startup prints a banner, the version and a prompt;
    /// machine-mode startup stays silent.
    pub fn startup(&mut self) {
        if !self.console.interactive() {
            return;
        }
        self.console.put_str("\nARGUS : Resident Debug Monitor : ");
        crate::commands::version_cmd(&mut self.console, &crate::line::CommandLine::new());
        self.console.put_resp_term();
    }

    /// One foreground iteration: at most one input byte, one scheduler
    /// pass.
    pub fn poll(&mut self) {
        if let Some(byte) = self.console.read_raw() {
            self.hci.process_byte(&mut self.console, byte);
        }
        self.console.pump();
    }

    /// The monitor's context object
    pub fn console(&self) -> &Console<'c, S, C, H, B, P, Y> {
        &self.console
    }

    /// Mutable access to the context object
    pub fn console_mut(&mut self) -> &mut Console<'c, S, C, H, B, P, Y> {
        &mut self.console
    }
}
