//! Density-independent pixels.
//!
//! All configurable dimensions of the field (item width, spacing, line width,
//! cursor width) are expressed in [`Dp`] so the widget renders at the same
//! physical size across screen densities. Conversion to physical pixels goes
//! through a process-wide scale factor, set once by the host binding during
//! startup (and updatable if the window moves between monitors).

use std::sync::OnceLock;

use parking_lot::RwLock;

/// Global dp-to-pixel scale factor.
///
/// Typically written once by the host binding from the window's device scale.
/// Reads fall back to `1.0` when the host never set it, which keeps unit
/// tests independent of any windowing environment.
pub static SCALE_FACTOR: OnceLock<RwLock<f64>> = OnceLock::new();

/// Sets the global scale factor used for all [`Dp`] conversions.
pub fn set_scale_factor(factor: f64) {
    let lock = SCALE_FACTOR.get_or_init(|| RwLock::new(factor));
    *lock.write() = factor;
}

fn scale_factor() -> f64 {
    SCALE_FACTOR.get().map(|lock| *lock.read()).unwrap_or(1.0)
}

/// A length in density-independent pixels.
///
/// `Dp(16.0)` is roughly the same physical size on a low-DPI laptop panel and
/// a high-DPI phone screen. Values convert to physical pixels with
/// [`Dp::to_pixels_f32`] using the current [`SCALE_FACTOR`].
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Dp(pub f64);

impl Dp {
    pub const ZERO: Dp = Dp(0.0);

    /// Creates a new `Dp` value; usable in const contexts.
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Converts to physical pixels under the current scale factor.
    pub fn to_pixels_f32(self) -> f32 {
        (self.0 * scale_factor()) as f32
    }

    /// Converts a physical pixel length back into dp.
    pub fn from_pixels_f32(pixels: f32) -> Self {
        Self(pixels as f64 / scale_factor())
    }
}

impl From<f64> for Dp {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<f32> for Dp {
    fn from(value: f32) -> Self {
        Self(value as f64)
    }
}
