//! Parameter store abstractions
//!
//! Persistent key-value storage for configuration defaults. Values are
//! small postcard-encoded blobs; the storage implementation handles wear
//! leveling and data integrity.

/// Storage keys for persisted parameter blobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ParamKey {
    /// Monitor configuration (binary postcard format)
    MonitorConfig = 0,
    /// Reserved for application parameters
    Reserved1 = 1,
}

impl ParamKey {
    /// Get the key as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create a key from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(ParamKey::MonitorConfig),
            1 => Some(ParamKey::Reserved1),
            _ => None,
        }
    }
}

/// Errors from parameter store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Storage operation failed
    Storage,
    /// Key not found
    NotFound,
    /// Buffer too small for the data
    BufferTooSmall,
    /// Data corrupted or invalid
    Corrupted,
    /// Storage is full
    Full,
}

/// Parameter store trait
pub trait ParamStore {
    /// Read a value by key into the provided buffer.
    ///
    /// Returns the number of bytes read.
    fn read(&mut self, key: ParamKey, buffer: &mut [u8]) -> Result<usize, StoreError>;

    /// Write a value under the given key, replacing any previous value.
    fn write(&mut self, key: ParamKey, data: &[u8]) -> Result<(), StoreError>;
}
