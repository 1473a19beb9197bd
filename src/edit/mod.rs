//! Pointer gestures on the curve and the corrections that keep it valid.

pub mod constraint;
pub mod gesture;

pub use crate::curve::Handle;
pub use constraint::{constrain, ControlPointMode, DragTarget};
pub use gesture::{ConstraintEngine, GestureState};
