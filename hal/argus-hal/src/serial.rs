//! Byte-oriented serial transport abstractions
//!
//! The monitor serves exactly one serial peer. Reads are non-blocking
//! (the receive interrupt has already buffered the bytes); writes block
//! until the transmitter accepts the byte. Cooperative pumping during a
//! blocked write is the console's job, not the transport's.

/// Serial transmitter
pub trait ByteTx {
    /// Write one byte, blocking until the transmitter is ready.
    fn write_byte(&mut self, byte: u8);
}

/// Serial receiver
///
/// Backed by the interrupt-fed receive FIFO; all methods are foreground
/// operations and never block.
pub trait ByteRx {
    /// True when at least one unread byte is buffered
    fn rx_ready(&self) -> bool;

    /// Fetch the next unread byte, if any
    fn read_byte(&mut self) -> Option<u8>;

    /// Discard all buffered unread bytes
    fn flush_rx(&mut self);
}

/// Combined serial interface
///
/// For transports that provide both directions on a single peripheral.
pub trait SerialPort: ByteTx + ByteRx {}

// Blanket implementation
impl<T: ByteTx + ByteRx> SerialPort for T {}
