//! Generic register abstractions for type-safe PMU programming

use crate::port::RawError;

/// Trait for register layouts that can be converted to/from raw register values
///
/// The AArch32 Performance Monitors registers are 32 bits wide, so layouts
/// convert to and from `u32`.
///
/// # Example
///
/// ```ignore
/// use perfmon_raw::register::RegisterLayout;
///
/// #[derive(Debug, Default)]
/// struct MyControl {
///     enable: bool,
///     count: u8,
/// }
///
/// impl RegisterLayout for MyControl {
///     fn to_raw_value(&self) -> u32 {
///         (if self.enable { 1 } else { 0 }) | ((self.count as u32) << 11)
///     }
///
///     fn from_raw_value(value: u32) -> Self {
///         Self {
///             enable: (value & 1) != 0,
///             count: ((value >> 11) & 0x1F) as u8,
///         }
///     }
/// }
/// ```
pub trait RegisterLayout: Sized {
    /// Convert this register layout to a raw register value
    fn to_raw_value(&self) -> u32;

    /// Parse a raw register value into this register layout
    fn from_raw_value(value: u32) -> Self;

    /// Validate that the register values are within acceptable ranges
    fn validate(&self) -> Result<(), RawError> {
        Ok(())
    }
}

/// Bit helpers shared by the layouts
#[inline]
pub(crate) fn bit(value: u32, n: u32) -> bool {
    (value & (1 << n)) != 0
}

#[inline]
pub(crate) fn flag(set: bool, n: u32) -> u32 {
    if set {
        1 << n
    } else {
        0
    }
}
