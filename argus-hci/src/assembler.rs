//! Command assembly and dispatch state machine
//!
//! Consumes input bytes one at a time: printable bytes accumulate into
//! the line buffer (echoed in interactive mode), CR dispatches a
//! non-empty line through the command table, ESC/CAN discard the line,
//! and every other control byte is ignored. Each call does at most one
//! byte's worth of work so a slow interactive peer never starves the
//! tick scheduler.

use crate::console::Services;
use crate::line::{is_printable, CommandLine, CAN, CR, ESC};
use crate::table::{find, CmndEntry};

/// The HCI input state machine: line buffer plus dispatch table.
pub struct Hci {
    line: CommandLine,
    table: &'static [CmndEntry],
}

impl Hci {
    /// Create an assembler dispatching into the given table.
    pub const fn new(table: &'static [CmndEntry]) -> Self {
        Self {
            line: CommandLine::new(),
            table,
        }
    }

    /// The line currently under assembly (test observation point)
    pub fn line(&self) -> &CommandLine {
        &self.line
    }

    /// Process one input byte.
    ///
    /// Called from the foreground loop for every byte drained from the
    /// receive FIFO.
    pub fn process_byte(&mut self, con: &mut dyn Services, byte: u8) {
        if byte == CR {
            if !self.line.is_empty() {
                self.exec(con);
            } else {
                // Bare CR: fresh prompt, no dispatch, no error
                con.put_resp_term();
            }
        } else if is_printable(byte) {
            // Beyond capacity the byte is dropped; the line dispatches
            // truncated. Echo regardless, the peer sent it.
            self.line.push(byte);
            if con.interactive() {
                con.put_byte(byte);
            }
        } else if byte == ESC || byte == CAN {
            self.clear(con);
            con.put_resp_term();
        }
        // Any other non-printable byte: ignored
    }

    /// Dispatch the accumulated line, close the transaction, reset.
    fn exec(&mut self, con: &mut dyn Services) {
        match find(self.table, self.line.byte(0), self.line.byte(1)) {
            Some(entry) => {
                if con.interactive() {
                    // Separate echoed input from handler output
                    con.put_newline();
                }
                (entry.run)(con, &self.line);
            }
            None => con.put_cmd_error(),
        }
        con.put_resp_term();
        self.clear(con);
    }

    /// Discard the line buffer and re-arm the response code.
    fn clear(&mut self, con: &mut dyn Services) {
        self.line.clear();
        con.reset_resp_code();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::Console;
    use argus_core::config::MonitorConfig;
    use argus_core::sched::NullTasks;
    use argus_hal::sim::{LoopbackSerial, SimBus, SimClock, SimStore, SimSystem};
    use proptest::prelude::*;
    use std::cell::Cell;

    std::thread_local! {
        static HITS: Cell<u32> = const { Cell::new(0) };
    }

    fn counting(_con: &mut dyn Services, _line: &CommandLine) {
        HITS.with(|h| h.set(h.get() + 1));
    }

    static TEST_TABLE: &[CmndEntry] = &[CmndEntry {
        name: *b"XX",
        help: "XX | test",
        run: counting,
    }];

    fn console(
        clock: &SimClock,
        interactive: bool,
    ) -> Console<'_, LoopbackSerial, SimClock, NullTasks, SimBus, SimStore, SimSystem> {
        Console::new(
            LoopbackSerial::new(),
            clock,
            NullTasks,
            SimBus::new(),
            SimStore::new(),
            SimSystem::new(),
            MonitorConfig {
                interactive_on_startup: interactive,
                ..MonitorConfig::default()
            },
        )
    }

    fn feed(hci: &mut Hci, con: &mut dyn Services, bytes: &[u8]) {
        for &b in bytes {
            hci.process_byte(con, b);
        }
    }

    #[test]
    fn test_terminated_line_dispatches_once() {
        let clock = SimClock::manual();
        let mut con = console(&clock, false);
        let mut hci = Hci::new(TEST_TABLE);

        HITS.with(|h| h.set(0));
        feed(&mut hci, &mut con, b"XX\r");
        assert_eq!(HITS.with(|h| h.get()), 1);
        assert_eq!(con.serial().tx_bytes(), b"\r\n-");
    }

    #[test]
    fn test_unterminated_line_never_dispatches() {
        let clock = SimClock::manual();
        let mut con = console(&clock, false);
        let mut hci = Hci::new(TEST_TABLE);

        HITS.with(|h| h.set(0));
        // Far more bytes than the line buffer holds, but no CR
        for _ in 0..200 {
            feed(&mut hci, &mut con, b"X");
        }
        assert_eq!(HITS.with(|h| h.get()), 0);
        assert!(con.serial().tx_bytes().is_empty());
    }

    #[test]
    fn test_cancel_discards_line() {
        let clock = SimClock::manual();
        let mut con = console(&clock, false);
        let mut hci = Hci::new(TEST_TABLE);

        HITS.with(|h| h.set(0));
        feed(&mut hci, &mut con, b"XX\x1b");
        assert_eq!(HITS.with(|h| h.get()), 0);
        assert!(hci.line().is_empty());
        // Prompt, no dispatch, normal code
        assert_eq!(con.serial().tx_bytes(), b"\r\n-");

        // CAN is a synonym for ESC
        feed(&mut hci, &mut con, b"XX\x18");
        assert_eq!(HITS.with(|h| h.get()), 0);
    }

    #[test]
    fn test_bare_cr_repeats_prompt() {
        let clock = SimClock::manual();
        let mut con = console(&clock, false);
        let mut hci = Hci::new(TEST_TABLE);

        feed(&mut hci, &mut con, b"\r\r");
        assert_eq!(con.serial().tx_bytes(), b"\r\n-\r\n-");
    }

    #[test]
    fn test_unknown_mnemonic_sets_error() {
        let clock = SimClock::manual();
        let mut con = console(&clock, false);
        let mut hci = Hci::new(TEST_TABLE);

        feed(&mut hci, &mut con, b"ZZ\r");
        assert_eq!(con.serial().tx_bytes(), b"\r\n!");
        // Error code is one-shot
        con.serial_mut().clear_tx();
        feed(&mut hci, &mut con, b"\r");
        assert_eq!(con.serial().tx_bytes(), b"\r\n-");
    }

    #[test]
    fn test_interactive_echo_and_error_text() {
        let clock = SimClock::manual();
        let mut con = console(&clock, true);
        let mut hci = Hci::new(TEST_TABLE);

        feed(&mut hci, &mut con, b"zz\r");
        let out = core::str::from_utf8(con.serial().tx_bytes()).unwrap();
        // Echoed input, then the error message, then code and prompt
        assert!(out.starts_with("zz"));
        assert!(out.contains("! Command Error"));
        assert!(out.ends_with("\r\n!>"));
    }

    #[test]
    fn test_lowercase_mnemonic_matches() {
        let clock = SimClock::manual();
        let mut con = console(&clock, false);
        let mut hci = Hci::new(TEST_TABLE);

        HITS.with(|h| h.set(0));
        feed(&mut hci, &mut con, b"xx\r");
        assert_eq!(HITS.with(|h| h.get()), 1);
    }

    #[test]
    fn test_other_control_bytes_ignored() {
        let clock = SimClock::manual();
        let mut con = console(&clock, false);
        let mut hci = Hci::new(TEST_TABLE);

        HITS.with(|h| h.set(0));
        feed(&mut hci, &mut con, b"X\x07\x00X\r");
        assert_eq!(HITS.with(|h| h.get()), 1);
    }

    proptest! {
        /// Arbitrary CR-free input never dispatches and never grows the
        /// line past its capacity.
        #[test]
        fn prop_no_dispatch_without_cr(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
            let clock = SimClock::manual();
            let mut con = console(&clock, false);
            let mut hci = Hci::new(TEST_TABLE);

            HITS.with(|h| h.set(0));
            for b in bytes.into_iter().filter(|&b| b != CR) {
                hci.process_byte(&mut con, b);
            }
            prop_assert_eq!(HITS.with(|h| h.get()), 0);
            prop_assert!(hci.line().len() <= crate::line::CMD_LINE_SIZE);
        }
    }
}
