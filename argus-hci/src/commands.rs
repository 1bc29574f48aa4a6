//! Resident command set
//!
//! The generic debug commands every monitor build carries. Handlers are
//! plain functions over the [`Services`] seam; each parses its arguments
//! from fixed offsets in the command line (argument one at offset 3).
//! Application-specific commands go at the top of the table; first match
//! wins.

use argus_core::config::{MonitorConfig, CONFIG_BLOB_MAX};
use argus_hal::bus::MemSpace;
use argus_hal::store::ParamKey;

use crate::ascii::{is_hex_digit, parse_hex};
use crate::console::Services;
use crate::line::{ARG1_OFFSET, CommandLine, CR, ESC};
use crate::table::CmndEntry;
use crate::version::{BUILD_TAG, VER_MAJOR, VER_MINOR, VER_PATCH};

/// Offset into the data space where the I/O registers appear
const IO_REG_BASE: u16 = 0x20;

/// The resident command table.
pub static COMMANDS: &[CmndEntry] = &[
    CmndEntry { name: *b"DP", help: "DP        | Default Params\n", run: default_params_cmd },
    CmndEntry { name: *b"LS", help: "LS        | List Command Set\n", run: list_cmd },
    CmndEntry { name: *b"IM", help: "IM x      | Interactive Mode\n", run: interactive_cmd },
    CmndEntry { name: *b"VN", help: "VN        | Show Version\n", run: version_cmd },
    CmndEntry { name: *b"WD", help: "WD        | Watch Data\n", run: watch_data_cmd },
    CmndEntry { name: *b"SE", help: "SE        | Show Errors\n", run: show_errors_cmd },
    CmndEntry { name: *b"SF", help: "SF        | Show Flags\n", run: show_flags_cmd },
    CmndEntry { name: *b"RS", help: "RS        | Reset System\n", run: reset_cmd },
    CmndEntry { name: *b"DC", help: "DC [aaaa] | Dump Code mem\n", run: dump_memory_cmd },
    CmndEntry { name: *b"DD", help: "DD [aaaa] | Dump Data mem\n", run: dump_memory_cmd },
    CmndEntry { name: *b"DE", help: "DE pp     | Dump EEPROM page\n", run: dump_memory_cmd },
    CmndEntry { name: *b"EE", help: "EE pp     | Erase EEPROM page\n", run: erase_eeprom_cmd },
    CmndEntry { name: *b"RM", help: "RM aaa    | Read Memory byte\n", run: read_mem_cmd },
    CmndEntry { name: *b"WM", help: "WM aaa bb | Write Memory byte\n", run: write_mem_cmd },
    CmndEntry { name: *b"IP", help: "IP rr     | Input I/O reg\n", run: input_ioreg_cmd },
    CmndEntry { name: *b"OP", help: "OP rr bb  | Output I/O reg\n", run: output_ioreg_cmd },
];

/// `LS`: list the command set with argument syntax.
fn list_cmd(con: &mut dyn Services, _line: &CommandLine) {
    for entry in COMMANDS {
        con.put_str(entry.help);
    }
}

/// `IM x`: enable or disable interactive mode.
///
/// `'1'`, `'Y'` or `'y'` enable; anything else disables. The response
/// code is re-armed so the terminator for this very command already
/// reflects the new mode.
fn interactive_cmd(con: &mut dyn Services, line: &CommandLine) {
    let arg = line.byte(ARG1_OFFSET);
    con.set_interactive(arg == b'1' || arg == b'Y' || arg == b'y');
    con.reset_resp_code();
}

/// `VN`: report the build version.
///
/// Public because the startup banner reuses it outside the dispatch path.
pub fn version_cmd(con: &mut dyn Services, _line: &CommandLine) {
    con.put_byte(b'V');
    con.put_dec_word(VER_MAJOR, 1);
    con.put_byte(b'.');
    con.put_dec_word(VER_MINOR, 1);
    con.put_byte(b'.');
    con.put_dec_word(VER_PATCH, 3);
    if con.interactive() {
        con.put_byte(b' ');
        con.put_str(BUILD_TAG);
        con.put_newline();
    }
}

/// `DP`: persist the build-time default parameters.
fn default_params_cmd(con: &mut dyn Services, _line: &CommandLine) {
    let mut blob = [0u8; CONFIG_BLOB_MAX];
    let Ok(len) = MonitorConfig::default().to_blob(&mut blob) else {
        con.put_cmd_error();
        return;
    };
    if con.store().write(ParamKey::MonitorConfig, &blob[..len]).is_err() {
        con.put_cmd_error();
    }
}

/// `SE`: show the system error word as bit glyphs, then clear it.
fn show_errors_cmd(con: &mut dyn Services, _line: &CommandLine) {
    let word = *con.system_errors();
    con.put_word_bits(word);
    *con.system_errors() = 0;
}

/// `SF`: show the debug flag word as bit glyphs, then clear it.
fn show_flags_cmd(con: &mut dyn Services, _line: &CommandLine) {
    let word = *con.debug_flags();
    con.put_word_bits(word);
    *con.debug_flags() = 0;
}

/// `RS`: request an MCU reset. Does not return on a real target.
fn reset_cmd(con: &mut dyn Services, _line: &CommandLine) {
    con.system().reset();
}

/// `WD`: watch data in real time until ESC arrives.
///
/// Prints one status line per refresh interval, rewinding with a bare CR
/// so the line updates in place on a terminal. Housekeeping keeps
/// running: the delay loop pumps the scheduler. The data columns are the
/// customization point for an application build; the resident version
/// shows elapsed time in 0.1 s units.
fn watch_data_cmd(con: &mut dyn Services, _line: &CommandLine) {
    let interval = con.config().watch_interval_ms as u32;
    let start = con.millis();

    con.put_str("Hit <Esc> to quit...\n");

    loop {
        let elapsed = con.millis().wrapping_sub(start);
        con.put_dec_word((elapsed / 100) as u16, 5);
        // Application data columns go here, all on the one line
        con.put_byte(b' ');

        let delay_start = con.millis();
        while con.millis().wrapping_sub(delay_start) < interval {
            con.pump();
        }
        con.put_byte(CR);

        if let Some(byte) = con.read_raw() {
            if byte == ESC {
                break;
            }
        }
    }
}

/// `DC aaaa` / `DD aaaa` / `DE pp`: dump a block of memory as hex+ASCII.
///
/// The second mnemonic letter selects the space: code, data or EEPROM.
/// For code/data the optional argument is a start address, remembered
/// and advanced by 256 on each argument-less reuse; the dump always
/// starts on a 16-byte boundary. For EEPROM the argument is a page
/// number (the low 3 bits select one of 8 128-byte pages).
fn dump_memory_cmd(con: &mut dyn Services, line: &CommandLine) {
    let selector = line.byte(1).to_ascii_uppercase();
    let arg = parse_hex(line.tail(ARG1_OFFSET));

    let (space, rows, mut addr) = match selector {
        b'E' => (MemSpace::Eeprom, 8u8, (arg & 7) * 128),
        _ => {
            let space = if selector == b'C' {
                MemSpace::Code
            } else {
                MemSpace::Data
            };
            let addr = if is_hex_digit(line.byte(ARG1_OFFSET)) {
                let aligned = arg & 0xFFF0;
                *con.dump_addr() = aligned;
                aligned
            } else {
                *con.dump_addr()
            };
            (space, 16u8, addr)
        }
    };

    for _ in 0..rows {
        con.put_hex_word(addr);
        con.put_byte(b' ');
        for col in 0..16u16 {
            con.put_byte(b' ');
            if col == 8 {
                con.put_byte(b' ');
            }
            let data = con.bus().read(space, addr.wrapping_add(col));
            con.put_hex_byte(data);
        }
        con.put_byte(b' ');
        con.put_byte(b' ');
        for col in 0..16u16 {
            let data = con.bus().read(space, addr.wrapping_add(col));
            if (32..127).contains(&data) {
                con.put_byte(data);
            } else {
                con.put_byte(b' ');
            }
        }
        con.put_newline();
        addr = addr.wrapping_add(16);
    }

    if space != MemSpace::Eeprom {
        // Next argument-less dump shows the following 256-byte block
        *con.dump_addr() = con.dump_addr().wrapping_add(256);
    }
}

/// `RM aaa`: read and show one data-space byte.
fn read_mem_cmd(con: &mut dyn Services, line: &CommandLine) {
    if con.interactive() {
        con.put_byte(b' ');
    }
    let addr = parse_hex(line.tail(ARG1_OFFSET));
    let data = con.bus().read(MemSpace::Data, addr);
    con.put_hex_byte(data);
}

/// `WM aaa bb`: write one data-space byte. Strict positional syntax;
/// the write is not verified.
fn write_mem_cmd(con: &mut dyn Services, line: &CommandLine) {
    if !is_hex_digit(line.byte(3))
        || !is_hex_digit(line.byte(4))
        || !is_hex_digit(line.byte(5))
        || line.byte(6) != b' '
        || !is_hex_digit(line.byte(7))
        || !is_hex_digit(line.byte(8))
    {
        con.put_cmd_error();
        return;
    }
    let addr = parse_hex(line.tail(3));
    let value = parse_hex(line.tail(7)) as u8;
    con.bus().write_data(addr, value);
}

/// `IP rr`: read and show one I/O register (data space + 0x20).
fn input_ioreg_cmd(con: &mut dyn Services, line: &CommandLine) {
    if con.interactive() {
        con.put_byte(b' ');
    }
    let addr = parse_hex(line.tail(ARG1_OFFSET)).wrapping_add(IO_REG_BASE);
    let data = con.bus().read(MemSpace::Data, addr);
    con.put_hex_byte(data);
}

/// `OP rr bb`: write one I/O register (data space + 0x20). Strict
/// positional syntax.
fn output_ioreg_cmd(con: &mut dyn Services, line: &CommandLine) {
    if !is_hex_digit(line.byte(3))
        || !is_hex_digit(line.byte(4))
        || line.byte(5) != b' '
        || !is_hex_digit(line.byte(6))
        || !is_hex_digit(line.byte(7))
    {
        con.put_cmd_error();
        return;
    }
    let addr = parse_hex(line.tail(3)).wrapping_add(IO_REG_BASE);
    let value = parse_hex(line.tail(6)) as u8;
    con.bus().write_data(addr, value);
}

/// `EE pp`: fill one EEPROM page with 0xFF.
fn erase_eeprom_cmd(con: &mut dyn Services, line: &CommandLine) {
    if !is_hex_digit(line.byte(ARG1_OFFSET)) {
        con.put_cmd_error();
        return;
    }
    let page = (parse_hex(line.tail(ARG1_OFFSET)) & 7) as u8;
    if con.bus().erase_eeprom_page(page).is_err() {
        con.put_cmd_error();
    }
}
