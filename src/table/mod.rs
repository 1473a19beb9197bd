//! Sampled transfer tables and their realtime handoff.
//!
//! Tables are built on the control thread whenever the curve changes and
//! read on the audio thread with a single interpolation per sample.

/// Fixed-resolution sampled curve with interpolated lookup.
pub mod lookup;
/// Ring-buffer publication of finished tables to the audio thread.
#[cfg(feature = "rtrb")]
pub mod publish;

pub use lookup::TransferTable;
#[cfg(feature = "rtrb")]
pub use publish::{table_channel, PublishOutcome, TablePublisher, TableReader};
