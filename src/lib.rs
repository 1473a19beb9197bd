//! Editable transfer-curve waveshaping.
//!
//! A curve is a chain of cubic Bézier segments mapping an input sample in
//! [-1, 1] to an output sample in [-1, 1]. The control thread edits the curve
//! through the constraint engine and publishes sampled lookup tables; the
//! audio thread only ever reads the latest published table.

pub mod config;
pub mod curve; // Curve model and Bézier evaluation
pub mod dsp;
pub mod edit; // Drag gestures and geometric constraints
pub mod error;
pub mod preset;
#[cfg(feature = "rtrb")]
pub mod session;
pub mod table; // Sampled transfer tables

pub use config::ShaperConfig;
pub use curve::{Curve, CurveEvaluator, Node, Point};
pub use error::{ConfigError, CurveError, EditError, PresetError};

pub const MAX_BLOCK_SIZE: usize = 2048;
pub const DEFAULT_TABLE_RESOLUTION: usize = 1024;

/// Smallest x distance allowed between two neighbouring endpoints.
pub const MIN_NODE_GAP: f32 = 1.0e-3;
