use crate::{AbsoluteOffset, Point, Rectangle, Size};

/// One of the two scrolling axes.
///
/// Every scrollbar component is parameterized by an [`Axis`] instead of
/// duplicating the horizontal and vertical logic. The accessors below pick
/// the component of a geometric value that belongs to the axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// The horizontal axis.
    X,
    /// The vertical axis.
    Y,
}

impl Axis {
    /// Returns the length of the given [`Size`] along this axis.
    pub fn length(self, size: Size) -> f32 {
        match self {
            Axis::X => size.width,
            Axis::Y => size.height,
        }
    }

    /// Returns the coordinate of the given [`Point`] along this axis.
    pub fn coordinate(self, point: Point) -> f32 {
        match self {
            Axis::X => point.x,
            Axis::Y => point.y,
        }
    }

    /// Returns the offset of the given [`AbsoluteOffset`] along this axis.
    pub fn offset(self, offset: AbsoluteOffset) -> f32 {
        match self {
            Axis::X => offset.x,
            Axis::Y => offset.y,
        }
    }

    /// Returns the start and the length of the [`Rectangle`] along this axis.
    pub fn span(self, bounds: Rectangle) -> (f32, f32) {
        match self {
            Axis::X => (bounds.x, bounds.width),
            Axis::Y => (bounds.y, bounds.height),
        }
    }

    /// Builds an [`AbsoluteOffset`] that only touches this axis.
    pub fn only(self, value: f32) -> AbsoluteOffset<Option<f32>> {
        match self {
            Axis::X => AbsoluteOffset {
                x: Some(value),
                y: None,
            },
            Axis::Y => AbsoluteOffset {
                x: None,
                y: Some(value),
            },
        }
    }
}
