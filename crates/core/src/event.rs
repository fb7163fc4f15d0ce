//! Handle events of a scrollable area.
use crate::host::NodeId;
use crate::time::Instant;
use crate::{Axis, Point, Vector};

/// An event delivered by the host to a scrollbar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// A pointer event.
    Pointer(Pointer),

    /// The wheel was turned over a node.
    Wheel {
        /// The node under the pointer.
        node: NodeId,
        /// The scroll delta.
        delta: Vector,
    },

    /// A touch drag gesture started on a node.
    Touch {
        /// The node being dragged.
        node: NodeId,
    },

    /// A node scrolled, whatever the cause.
    Scrolled(NodeId),

    /// A resize observer reported a new size for a node.
    Resized(NodeId),

    /// A mutation observer reported a change in the subtree of a node.
    Mutated(NodeId),

    /// An intersection observer reported a new state for a sentinel.
    Intersection {
        /// The observed sentinel.
        sentinel: NodeId,
        /// Whether the sentinel intersects its root.
        is_intersecting: bool,
    },

    /// A frame requested through a [`RedrawRequest`](crate::RedrawRequest).
    Frame(Instant),
}

/// A pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pointer {
    /// A button was pressed over a target.
    Pressed {
        /// The position of the pointer.
        position: Point,
        /// What was hit.
        target: Target,
    },

    /// The pointer moved.
    ///
    /// Moves are only delivered while the pointer is over the scrollbar or
    /// while a document-wide listener is registered.
    Moved {
        /// The position of the pointer.
        position: Point,
    },

    /// The button was released.
    Released {
        /// The position of the pointer.
        position: Point,
    },

    /// The pointer entered the scrollable area.
    Entered,

    /// The pointer left the scrollable area.
    Left,
}

/// The part of a scrollbar hit by a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// The thumb of the given [`Axis`].
    Thumb(Axis),
    /// The track of the given [`Axis`], outside of its thumb.
    Track(Axis),
    /// The scrollable content.
    Viewport,
}

/// The status of an [`Event`] after being processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The [`Event`] was **NOT** handled by the scrollbar.
    Ignored,

    /// The [`Event`] was handled and processed by the scrollbar.
    Captured,
}
