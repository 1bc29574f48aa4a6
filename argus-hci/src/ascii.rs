//! ASCII number conversion helpers
//!
//! Command arguments arrive as bare hex or decimal digit runs with no
//! leading whitespace. Parsing stops at the first non-digit byte; a run
//! whose first byte is not a digit yields zero, matching the forgiving
//! behavior handlers rely on for optional arguments.

/// Value of a hex ASCII digit, either case.
pub fn hex_digit(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        _ => None,
    }
}

/// Value of a decimal ASCII digit.
pub fn dec_digit(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        _ => None,
    }
}

/// True when the byte is a hex ASCII digit
pub fn is_hex_digit(byte: u8) -> bool {
    hex_digit(byte).is_some()
}

/// Parse up to four hex digits into a word.
///
/// Stops at the first non-hex byte; returns 0 when the first byte is not
/// a hex digit.
pub fn parse_hex(bytes: &[u8]) -> u16 {
    let mut result: u16 = 0;
    for &b in bytes.iter().take(4) {
        match hex_digit(b) {
            Some(digit) => result = (result << 4) | digit as u16,
            None => break,
        }
    }
    result
}

/// Parse up to `max_digits` (at most five) decimal digits into a word.
///
/// Stops at the first non-decimal byte; returns 0 when the first byte is
/// not a digit.
pub fn parse_dec(bytes: &[u8], max_digits: usize) -> u16 {
    let mut result: u16 = 0;
    for &b in bytes.iter().take(max_digits.min(5)) {
        match dec_digit(b) {
            Some(digit) => result = result.wrapping_mul(10).wrapping_add(digit as u16),
            None => break,
        }
    }
    result
}
