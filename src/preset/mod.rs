//! Named curves and wholesale curve replacement.

pub mod bank;
#[cfg(feature = "serde")]
pub mod stored;
pub mod swap;

pub use bank::{Preset, PresetBank, BYPASS_NAME};
#[cfg(feature = "serde")]
pub use stored::{StoredBank, StoredCurve, StoredNode, StoredPoint};
pub use swap::apply_preset;
