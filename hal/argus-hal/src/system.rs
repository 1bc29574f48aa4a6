//! System control

/// MCU-level control operations
pub trait SystemControl {
    /// Request a system reset.
    ///
    /// On a real target this disables interrupts and forces a watchdog
    /// reset (or jumps to the reset vector) and does not return. Host
    /// doubles record the request and return so tests can observe it.
    fn reset(&mut self);
}
