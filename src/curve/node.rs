#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::fmt;

use super::Point;

/// One vertex of the curve: an on-curve endpoint plus two tangent handles.
///
/// The handles are stored as offsets from the endpoint so that moving the
/// endpoint carries its tangents along with it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Node {
    pub end_point: Point,
    /// Handle shaping the segment arriving from the left.
    pub control_in: Point,
    /// Handle shaping the segment leaving to the right.
    pub control_out: Point,
}

impl Node {
    pub fn new(end_point: Point, control_in: Point, control_out: Point) -> Self {
        Self {
            end_point,
            control_in,
            control_out,
        }
    }

    /// A node with both handles collapsed onto the endpoint.
    pub fn corner(end_point: Point) -> Self {
        Self::new(end_point, Point::ZERO, Point::ZERO)
    }

    /// A node whose handles are mirror images of `control_out`.
    pub fn smooth(end_point: Point, control_out: Point) -> Self {
        Self::new(end_point, -control_out, control_out)
    }

    #[inline]
    pub fn control_in_absolute(&self) -> Point {
        self.end_point + self.control_in
    }

    #[inline]
    pub fn control_out_absolute(&self) -> Point {
        self.end_point + self.control_out
    }

    /// Absolute position of one of the node's three points.
    pub fn absolute(&self, handle: Handle) -> Point {
        match handle {
            Handle::EndPoint => self.end_point,
            Handle::ControlIn => self.control_in_absolute(),
            Handle::ControlOut => self.control_out_absolute(),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.end_point.is_finite() && self.control_in.is_finite() && self.control_out.is_finite()
    }
}

/// Which of a node's three points a gesture or error refers to.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    EndPoint,
    ControlIn,
    ControlOut,
}

impl Handle {
    pub const ALL: [Handle; 3] = [Handle::EndPoint, Handle::ControlIn, Handle::ControlOut];

    /// The handle on the other side of the endpoint, if this is a handle.
    pub fn opposite(self) -> Option<Handle> {
        match self {
            Handle::EndPoint => None,
            Handle::ControlIn => Some(Handle::ControlOut),
            Handle::ControlOut => Some(Handle::ControlIn),
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Handle::EndPoint => "endpoint",
            Handle::ControlIn => "incoming",
            Handle::ControlOut => "outgoing",
        };
        f.write_str(name)
    }
}
