//! Name the edges of a scrollable area.
use crate::Axis;

/// An edge of the scrollable content.
///
/// Horizontal edges are logical: [`Edge::Start`] is the left edge in LTR
/// content and the right edge in RTL content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Edge {
    /// The top edge.
    Top,
    /// The bottom edge.
    Bottom,
    /// The start edge.
    Start,
    /// The end edge.
    End,
}

impl Edge {
    /// All the edges.
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Start, Edge::End];

    /// Returns the [`Axis`] the edge belongs to.
    pub fn axis(self) -> Axis {
        match self {
            Edge::Top | Edge::Bottom => Axis::Y,
            Edge::Start | Edge::End => Axis::X,
        }
    }

    /// Returns the distance between a logical `offset` and this edge on an
    /// axis that can scroll `scroll_max` pixels.
    pub fn distance(self, offset: f32, scroll_max: f32) -> f32 {
        match self {
            Edge::Top | Edge::Start => offset.max(0.0),
            Edge::Bottom | Edge::End => (scroll_max - offset).max(0.0),
        }
    }

    /// Returns the name of the edge.
    pub fn name(self) -> &'static str {
        match self {
            Edge::Top => "top",
            Edge::Bottom => "bottom",
            Edge::Start => "start",
            Edge::End => "end",
        }
    }
}

bitflags::bitflags! {
    /// A set of [`Edge`]s.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Edges: u8 {
        /// The top edge.
        const TOP = 1 << 0;
        /// The bottom edge.
        const BOTTOM = 1 << 1;
        /// The start edge.
        const START = 1 << 2;
        /// The end edge.
        const END = 1 << 3;
        /// The vertical edges.
        const VERTICAL = Self::TOP.bits() | Self::BOTTOM.bits();
        /// The horizontal edges.
        const HORIZONTAL = Self::START.bits() | Self::END.bits();
    }
}

impl Edges {
    /// Iterates over the [`Edge`]s in the set.
    pub fn edges(self) -> impl Iterator<Item = Edge> {
        Edge::ALL
            .into_iter()
            .filter(move |edge| self.contains(Edges::from(*edge)))
    }
}

impl From<Edge> for Edges {
    fn from(edge: Edge) -> Self {
        match edge {
            Edge::Top => Edges::TOP,
            Edge::Bottom => Edges::BOTTOM,
            Edge::Start => Edges::START,
            Edge::End => Edges::END,
        }
    }
}

impl Default for Edges {
    fn default() -> Self {
        Edges::all()
    }
}
