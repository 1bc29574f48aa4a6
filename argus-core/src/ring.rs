//! Receive ring buffer
//!
//! Fixed-capacity byte FIFO written only by the receive interrupt and read
//! only by the foreground loop. The buffer itself is plain data; the
//! interrupt-masking discipline required to share it between the two
//! contexts is provided by the `IrqRxQueue` wrapper in `argus-hal`.
//!
//! Overflow policy: a byte pushed into a full buffer is silently discarded.
//! There is no backpressure signal on this link; the host protocol assumes
//! the monitor keeps up under normal operation.

/// Single-producer single-consumer byte FIFO.
///
/// Invariant: `0 <= len <= N`; head and tail always index within the
/// backing array.
#[derive(Debug, Clone)]
pub struct RxRing<const N: usize> {
    buf: [u8; N],
    /// Next unread byte (consumer side)
    head: usize,
    /// Next free slot (producer side)
    tail: usize,
    /// Number of unread bytes
    len: usize,
}

impl<const N: usize> RxRing<N> {
    /// Create an empty ring
    pub const fn new() -> Self {
        Self {
            buf: [0; N],
            head: 0,
            tail: 0,
            len: 0,
        }
    }

    /// Buffer capacity in bytes
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of unread bytes
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when no unread bytes are available
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append a byte at the tail.
    ///
    /// Producer-side operation; called from the receive interrupt. When the
    /// buffer is full the byte is dropped and `false` is returned.
    pub fn push(&mut self, byte: u8) -> bool {
        if self.len >= N {
            return false;
        }
        self.buf[self.tail] = byte;
        self.tail = (self.tail + 1) % N;
        self.len += 1;
        true
    }

    /// Remove and return the oldest unread byte.
    ///
    /// Consumer-side operation; called from the foreground loop.
    pub fn pop(&mut self) -> Option<u8> {
        if self.len == 0 {
            return None;
        }
        let byte = self.buf[self.head];
        self.head = (self.head + 1) % N;
        self.len -= 1;
        Some(byte)
    }

    /// Discard all unread bytes and reset both indices.
    pub fn flush(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.len = 0;
    }
}

impl<const N: usize> Default for RxRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_ring() {
        let mut ring: RxRing<8> = RxRing::new();
        assert!(ring.is_empty());
        assert_eq!(ring.len(), 0);
        assert_eq!(ring.pop(), None);
    }

    #[test]
    fn test_push_pop_order() {
        let mut ring: RxRing<8> = RxRing::new();
        for b in [0x41, 0x42, 0x43] {
            assert!(ring.push(b));
        }
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.pop(), Some(0x41));
        assert_eq!(ring.pop(), Some(0x42));
        assert_eq!(ring.pop(), Some(0x43));
        assert_eq!(ring.pop(), None);
    }

    #[test]
    fn test_overflow_drops_excess() {
        let mut ring: RxRing<4> = RxRing::new();
        for b in 0..6u8 {
            ring.push(b);
        }
        assert_eq!(ring.len(), 4);
        // Only the first four bytes survive
        for expected in 0..4u8 {
            assert_eq!(ring.pop(), Some(expected));
        }
        assert_eq!(ring.pop(), None);
    }

    #[test]
    fn test_wraparound() {
        let mut ring: RxRing<4> = RxRing::new();
        for b in 0..4u8 {
            ring.push(b);
        }
        assert_eq!(ring.pop(), Some(0));
        assert_eq!(ring.pop(), Some(1));
        // Tail wraps past the end of the backing array
        assert!(ring.push(4));
        assert!(ring.push(5));
        assert_eq!(ring.len(), 4);
        for expected in 2..6u8 {
            assert_eq!(ring.pop(), Some(expected));
        }
    }

    #[test]
    fn test_flush_resets() {
        let mut ring: RxRing<8> = RxRing::new();
        ring.push(1);
        ring.push(2);
        ring.flush();
        assert!(ring.is_empty());
        assert_eq!(ring.pop(), None);
        assert!(ring.push(9));
        assert_eq!(ring.pop(), Some(9));
    }

    proptest! {
        /// Any interleaving of pushes and pops preserves FIFO order for
        /// the bytes that were accepted.
        #[test]
        fn prop_fifo_order(input in proptest::collection::vec(any::<u8>(), 0..64)) {
            let mut ring: RxRing<16> = RxRing::new();
            let mut accepted = std::vec::Vec::new();
            let mut popped = std::vec::Vec::new();

            for &b in &input {
                if ring.push(b) {
                    accepted.push(b);
                }
                // Drain roughly half the time to exercise wraparound
                if accepted.len() % 2 == 0 {
                    if let Some(out) = ring.pop() {
                        popped.push(out);
                    }
                }
            }
            while let Some(out) = ring.pop() {
                popped.push(out);
            }
            prop_assert_eq!(popped, accepted);
        }

        /// The ring never reports more unread bytes than its capacity.
        #[test]
        fn prop_len_bounded(input in proptest::collection::vec(any::<u8>(), 0..256)) {
            let mut ring: RxRing<16> = RxRing::new();
            for &b in &input {
                ring.push(b);
                prop_assert!(ring.len() <= ring.capacity());
            }
        }
    }
}
