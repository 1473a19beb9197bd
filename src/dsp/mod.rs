//! Audio-thread processing.
//!
//! Everything here is allocation free and realtime safe. The shaper only
//! reads tables published by the control thread; the curve itself never
//! crosses over.

/// Dry/wet crossfading.
pub mod mix;
/// Transfer-table waveshaper with ramped blend and bypass.
#[cfg(feature = "rtrb")]
pub mod shaper;
/// Linear parameter ramps.
pub mod smooth;

#[cfg(feature = "rtrb")]
pub use shaper::Waveshaper;
pub use smooth::LinearSmoother;
