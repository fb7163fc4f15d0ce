//! Connect the scrollbar engine to the nodes of a host.
//!
//! A host is whatever owns the real user interface: a browser DOM, a retained
//! widget tree or the headless simulator used in tests. It exposes its nodes
//! through [`Node`] and its observers through [`Host`].
//!
//! Nodes behave like DOM handles: every method takes `&self` and cloning a
//! [`NodeRef`] refers to the same underlying node.
use crate::{AbsoluteOffset, Axis, Edge, LayoutDirection, Rectangle, Size, Vector};

use std::fmt;
use std::rc::Rc;

/// The identity of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates a [`NodeId`] from a raw value chosen by the host.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value of the [`NodeId`].
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node of the host.
pub trait Node {
    /// Returns the identity of the node.
    fn id(&self) -> NodeId;

    /// Returns whether the node is still part of the host tree.
    fn is_connected(&self) -> bool {
        true
    }

    /// Returns the bounding rectangle of the node, in host coordinates.
    fn bounds(&self) -> Rectangle;

    /// Returns the size of the visible area of the node.
    fn client_size(&self) -> Size {
        self.bounds().size()
    }

    /// Returns the size of the content of the node, including the parts
    /// hidden by overflow.
    fn scroll_size(&self) -> Size {
        self.client_size()
    }

    /// Returns the physical scroll offset of the node.
    fn scroll_offset(&self) -> Vector {
        Vector::ZERO
    }

    /// Writes the physical scroll offset of the node. Axes set to `None`
    /// are left untouched.
    fn set_scroll_offset(&self, offset: AbsoluteOffset<Option<f32>>) {
        let _ = offset;
    }

    /// Returns the computed layout direction of the node.
    fn direction(&self) -> LayoutDirection {
        LayoutDirection::Ltr
    }

    /// Applies the size and the translation of a thumb along an axis.
    ///
    /// Only thumb nodes need to implement this.
    fn set_thumb(&self, axis: Axis, size: f32, offset: f32) {
        let _ = (axis, size, offset);
    }
}

/// A shared reference to a [`Node`].
pub type NodeRef = Rc<dyn Node>;

/// A host that can look up nodes and observe them.
///
/// Every registration returns an [`ObserverHandle`]. The scrollbar keeps the
/// handles it creates and disconnects them when it is destroyed. Observer
/// callbacks are delivered back as [`Event`](crate::Event)s.
pub trait Host {
    /// Finds the first node matching `selector`, inside `root` if given.
    fn query(&self, root: Option<NodeId>, selector: &str) -> Option<NodeRef>;

    /// Observes size changes of a node, reported as
    /// [`Event::Resized`](crate::Event::Resized).
    fn observe_resize(&self, node: NodeId) -> ObserverHandle;

    /// Observes changes in the subtree of a node, reported as
    /// [`Event::Mutated`](crate::Event::Mutated).
    fn observe_mutations(&self, node: NodeId) -> ObserverHandle;

    /// Observes the intersection between a sentinel and the visible area of
    /// `root`, reported as [`Event::Intersection`](crate::Event::Intersection).
    ///
    /// Hosts are expected to report the initial state right after the call.
    fn observe_intersection(&self, sentinel: NodeId, root: NodeId) -> ObserverHandle;

    /// Creates a sentinel inside `parent`, placed `offset` pixels inwards
    /// from the given edge.
    fn create_sentinel(&self, parent: NodeId, edge: Edge, offset: f32) -> NodeId;

    /// Creates the track and the thumb of a scrollbar inside `parent`.
    fn create_scrollbar(&self, parent: NodeId, axis: Axis) -> Option<(NodeRef, NodeRef)> {
        let _ = (parent, axis);
        None
    }

    /// Removes a node previously created by the host on our behalf.
    fn remove_node(&self, node: NodeId);

    /// Enables or disables text selection in the whole document.
    fn set_text_selection(&self, enabled: bool);

    /// Forwards pointer moves and releases happening anywhere in the
    /// document, until the returned handle is disconnected.
    fn listen_pointer(&self) -> ObserverHandle;
}

/// The registration of an observer or a listener.
///
/// Disconnecting is idempotent and also happens when the handle is dropped.
#[derive(Default)]
pub struct ObserverHandle {
    disconnect: Option<Box<dyn FnOnce()>>,
}

impl ObserverHandle {
    /// Creates a new [`ObserverHandle`] that runs `disconnect` once.
    pub fn new(disconnect: impl FnOnce() + 'static) -> Self {
        Self {
            disconnect: Some(Box::new(disconnect)),
        }
    }

    /// Creates an [`ObserverHandle`] that is not connected to anything.
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns whether the handle is still connected.
    pub fn is_connected(&self) -> bool {
        self.disconnect.is_some()
    }

    /// Disconnects the observer.
    pub fn disconnect(&mut self) {
        if let Some(disconnect) = self.disconnect.take() {
            disconnect();
        }
    }
}

impl Drop for ObserverHandle {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl fmt::Debug for ObserverHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverHandle")
            .field("connected", &self.is_connected())
            .finish()
    }
}
