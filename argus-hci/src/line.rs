//! Command line buffer
//!
//! Fixed-capacity buffer holding the command currently being assembled.
//! Handlers parse their arguments directly out of fixed byte offsets
//! (argument one starts at offset 3, after the two-letter mnemonic and
//! one separator), so reads past the stored length yield NUL rather than
//! failing - the same view a zero-filled C buffer would give.

use heapless::Vec;

/// Maximum command line length; excess input is silently dropped.
pub const CMD_LINE_SIZE: usize = 63;

/// Offset of the first argument within a command line
pub const ARG1_OFFSET: usize = 3;

/// Command terminator
pub const CR: u8 = 0x0D;
/// Second byte of the output line break
pub const LF: u8 = 0x0A;
/// Cancel byte (interactive escape)
pub const ESC: u8 = 0x1B;
/// Cancel byte (control-X, synonym for ESC)
pub const CAN: u8 = 0x18;

/// True for printable ASCII (0x20..=0x7E)
pub fn is_printable(byte: u8) -> bool {
    (0x20..=0x7E).contains(&byte)
}

/// The command line under assembly.
#[derive(Debug, Clone, Default)]
pub struct CommandLine {
    buf: Vec<u8, CMD_LINE_SIZE>,
}

impl CommandLine {
    /// Empty line
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Append a byte; a byte past capacity is dropped and `false` returned.
    pub fn push(&mut self, byte: u8) -> bool {
        self.buf.push(byte).is_ok()
    }

    /// Discard the buffered line
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Number of buffered bytes
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True when nothing has been buffered
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The buffered bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Byte at a fixed offset; NUL when the line is shorter.
    pub fn byte(&self, index: usize) -> u8 {
        self.buf.get(index).copied().unwrap_or(0)
    }

    /// The bytes from a fixed offset to the end of the line.
    pub fn tail(&self, from: usize) -> &[u8] {
        self.buf.get(from..).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_fixed_offsets() {
        let mut line = CommandLine::new();
        for &b in b"WM 1A0 55" {
            assert!(line.push(b));
        }
        assert_eq!(line.byte(0), b'W');
        assert_eq!(line.byte(2), b' ');
        assert_eq!(line.tail(3), b"1A0 55");
        // Past the stored length reads as NUL
        assert_eq!(line.byte(20), 0);
    }

    #[test]
    fn test_truncation_at_capacity() {
        let mut line = CommandLine::new();
        for _ in 0..CMD_LINE_SIZE {
            assert!(line.push(b'A'));
        }
        assert!(!line.push(b'B'));
        assert_eq!(line.len(), CMD_LINE_SIZE);
        assert_eq!(line.byte(CMD_LINE_SIZE - 1), b'A');
    }

    #[test]
    fn test_clear() {
        let mut line = CommandLine::new();
        line.push(b'X');
        line.clear();
        assert!(line.is_empty());
        assert_eq!(line.byte(0), 0);
        assert_eq!(line.tail(0), b"");
    }

    #[test]
    fn test_printable_classification() {
        assert!(is_printable(b' '));
        assert!(is_printable(b'~'));
        assert!(!is_printable(CR));
        assert!(!is_printable(ESC));
        assert!(!is_printable(0x7F));
    }
}
