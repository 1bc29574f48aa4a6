//! Command dispatch table
//!
//! A command is a two-byte mnemonic bound to a handler function. The
//! table is a statically defined slice scanned linearly; the first exact
//! match wins, and reaching the end means "not found". The scan
//! terminates naturally with the slice, so no sentinel entry or
//! iteration cap is needed.

use crate::console::Services;
use crate::line::CommandLine;

/// Handler signature: the full command line is the argument context;
/// handlers parse fixed offsets out of it. Handlers have no return
/// value - one that detects bad argument syntax latches the error
/// response code itself before returning.
pub type CmndFn = fn(&mut dyn Services, &CommandLine);

/// One dispatch table entry.
pub struct CmndEntry {
    /// Two-character mnemonic, stored uppercase
    pub name: [u8; 2],
    /// Help line for the `LS` listing (syntax summary)
    pub help: &'static str,
    /// Bound handler
    pub run: CmndFn,
}

/// Case-folded first-match lookup.
pub fn find<'t>(table: &'t [CmndEntry], c1: u8, c2: u8) -> Option<&'t CmndEntry> {
    let key = [c1.to_ascii_uppercase(), c2.to_ascii_uppercase()];
    table.iter().find(|entry| entry.name == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nop(_con: &mut dyn Services, _line: &CommandLine) {}
    fn other(_con: &mut dyn Services, _line: &CommandLine) {}

    fn table() -> [CmndEntry; 3] {
        [
            CmndEntry {
                name: *b"VN",
                help: "VN | first",
                run: nop,
            },
            CmndEntry {
                name: *b"VN",
                help: "VN | shadowed duplicate",
                run: other,
            },
            CmndEntry {
                name: *b"IM",
                help: "IM x | mode",
                run: nop,
            },
        ]
    }

    #[test]
    fn test_lookup_case_folds() {
        let table = table();
        assert!(find(&table, b'v', b'n').is_some());
        assert!(find(&table, b'I', b'm').is_some());
        assert!(find(&table, b'Z', b'Z').is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let table = table();
        let hit = find(&table, b'V', b'N').unwrap();
        assert_eq!(hit.help, "VN | first");
    }
}
