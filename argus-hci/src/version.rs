//! Build version identification
//!
//! Reported by the `VN` command as `V<major>.<minor>.<patch:03>`.

/// Major version
pub const VER_MAJOR: u16 = 1;
/// Minor version
pub const VER_MINOR: u16 = 2;
/// Patch / debug build number, reported with three digits
pub const VER_PATCH: u16 = 20;

/// Build tag appended to the interactive version report
pub const BUILD_TAG: &str = concat!("argus ", env!("CARGO_PKG_VERSION"));
