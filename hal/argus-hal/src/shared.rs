//! Interrupt-masked wrappers for cross-context state
//!
//! Exactly two pieces of state are touched by both the interrupt context
//! and the foreground loop: the receive ring buffer and the tick state.
//! Both are wrapped in `critical_section::Mutex<RefCell<..>>` so every
//! access runs with the producing interrupt excluded for the minimum
//! necessary duration. On a single-core target the critical section
//! implementation is interrupt masking; no other locking exists or is
//! needed on this execution model.
//!
//! A target port places these in `static` cells, pushes into the queue
//! from its UART receive vector and ticks the timer from its timer
//! compare vector.

use core::cell::RefCell;

use critical_section::Mutex;

use argus_core::ring::RxRing;
use argus_core::sched::Clock;
use argus_core::tick::{Period, TickConfig, TickState};

use crate::serial::ByteRx;

/// Receive FIFO shared between the RX interrupt and the foreground loop.
pub struct IrqRxQueue<const N: usize> {
    ring: Mutex<RefCell<RxRing<N>>>,
}

impl<const N: usize> IrqRxQueue<N> {
    /// Create an empty queue (usable in a `static`)
    pub const fn new() -> Self {
        Self {
            ring: Mutex::new(RefCell::new(RxRing::new())),
        }
    }

    /// Producer entry point, called from the receive interrupt.
    ///
    /// Returns false when the byte was dropped because the buffer is full.
    pub fn push_from_irq(&self, byte: u8) -> bool {
        critical_section::with(|cs| self.ring.borrow_ref_mut(cs).push(byte))
    }

    /// Number of unread bytes
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.ring.borrow_ref(cs).len())
    }

    /// True when no unread bytes are buffered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fetch the next unread byte (foreground side)
    pub fn pop(&self) -> Option<u8> {
        critical_section::with(|cs| self.ring.borrow_ref_mut(cs).pop())
    }

    /// Discard all unread bytes
    pub fn flush(&self) {
        critical_section::with(|cs| self.ring.borrow_ref_mut(cs).flush());
    }
}

impl<const N: usize> Default for IrqRxQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Tick state shared between the timer interrupt and the foreground loop.
///
/// The counter is wider than the hardware's natural read width, so every
/// foreground read masks the tick source for the instant of the access.
pub struct TickTimer {
    state: Mutex<RefCell<TickState>>,
}

impl TickTimer {
    /// Create a timer with the given divider ratios (usable in a `static`)
    pub const fn new(config: TickConfig) -> Self {
        Self {
            state: Mutex::new(RefCell::new(TickState::new(config))),
        }
    }

    /// Producer entry point, called once per timer interrupt.
    pub fn tick_from_irq(&self) {
        critical_section::with(|cs| self.state.borrow_ref_mut(cs).tick());
    }
}

impl Clock for TickTimer {
    fn millis(&self) -> u32 {
        critical_section::with(|cs| self.state.borrow_ref(cs).millis())
    }

    fn is_due(&self, period: Period) -> bool {
        critical_section::with(|cs| self.state.borrow_ref(cs).is_due(period))
    }

    fn clear_due(&self, period: Period) {
        critical_section::with(|cs| self.state.borrow_ref_mut(cs).clear_due(period));
    }
}

/// Foreground serial-receive view over a shared queue.
///
/// Pairs a queue reference with the transport's receiver contract so the
/// console can drain interrupt-buffered bytes through the common trait.
pub struct QueueRx<'a, const N: usize> {
    queue: &'a IrqRxQueue<N>,
}

impl<'a, const N: usize> QueueRx<'a, N> {
    /// Wrap a shared queue
    pub fn new(queue: &'a IrqRxQueue<N>) -> Self {
        Self { queue }
    }
}

impl<const N: usize> ByteRx for QueueRx<'_, N> {
    fn rx_ready(&self) -> bool {
        !self.queue.is_empty()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.queue.pop()
    }

    fn flush_rx(&mut self) {
        self.queue.flush();
    }
}
