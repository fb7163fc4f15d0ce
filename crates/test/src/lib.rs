//! Test your scrollbars in headless mode.
//!
//! This crate provides [`Dom`], a simulated host that keeps a tiny tree of
//! nodes with fixed layouts. It behaves like a browser where it matters to
//! the scrollbar engine:
//!
//! - Scroll offsets are clamped and follow the negated convention in
//!   right-to-left nodes.
//! - Writing a new offset queues an [`Event::Scrolled`].
//! - Observers only report changes of the nodes they watch.
//! - Intersection observers report their initial state right away.
//!
//! Events are queued instead of dispatched; drain them with
//! [`Dom::take_events`] and feed them to the scrollbar under test.
//!
//! ```
//! use icy_scroll_core::{Node, Size};
//! use icy_scroll_test::Dom;
//!
//! let dom = Dom::new();
//! let (viewport, _content) = dom.viewport("#list", Size::new(100.0, 100.0), Size::new(100.0, 300.0));
//!
//! assert_eq!(viewport.scroll_size(), Size::new(100.0, 300.0));
//! ```
use icy_scroll_core::{
    AbsoluteOffset, Axis, Edge, Event, Host, LayoutDirection, Node, NodeId, NodeRef,
    ObserverHandle, Point, Rectangle, Size, Vector,
};

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::{Rc, Weak};

/// The width of the tracks created by [`Dom`].
pub const TRACK_WIDTH: f32 = 10.0;

/// A simulated host.
#[derive(Debug, Clone, Default)]
pub struct Dom {
    state: Rc<RefCell<State>>,
}

#[derive(Debug, Default)]
struct State {
    next_id: u64,
    nodes: BTreeMap<NodeId, Data>,
    events: VecDeque<Event>,
    observers: BTreeMap<u64, Observer>,
    next_observer: u64,
    text_selection_disabled: bool,
}

#[derive(Debug, Clone)]
struct Data {
    selectors: Vec<String>,
    parent: Option<NodeId>,
    layout: Rectangle,
    content: Size,
    offset: Vector,
    direction: LayoutDirection,
    thumb: Option<(Axis, f32, f32)>,
    sentinel: Option<(Edge, f32)>,
}

#[derive(Debug, Clone, Copy)]
enum Observer {
    Resize(NodeId),
    Mutations(NodeId),
    Intersection {
        sentinel: NodeId,
        root: NodeId,
        is_intersecting: bool,
    },
    Pointer,
}

impl Dom {
    /// Creates an empty [`Dom`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the [`Dom`] as a shared [`Host`].
    pub fn host(&self) -> Rc<dyn Host> {
        Rc::new(self.clone())
    }

    /// Appends a new node to `parent` with the given layout, relative to the
    /// content of its parent.
    pub fn append(&self, parent: Option<NodeId>, selector: &str, layout: Rectangle) -> NodeRef {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;

        let id = NodeId::new(state.next_id);

        let direction = parent
            .and_then(|parent| state.nodes.get(&parent))
            .map(|parent| parent.direction)
            .unwrap_or_default();

        let _ = state.nodes.insert(
            id,
            Data {
                selectors: selector
                    .split_whitespace()
                    .map(str::to_owned)
                    .collect(),
                parent,
                layout,
                content: layout.size(),
                offset: Vector::ZERO,
                direction,
                thumb: None,
                sentinel: None,
            },
        );

        drop(state);

        self.node(id)
    }

    /// Creates a viewport of `size` at the origin holding a content node of
    /// `content` size.
    ///
    /// The content node matches `.content`.
    pub fn viewport(&self, selector: &str, size: Size, content: Size) -> (NodeRef, NodeRef) {
        let viewport = self.append(None, selector, Rectangle::new(Point::ORIGIN, size));
        let content_node = self.append(
            Some(viewport.id()),
            ".content",
            Rectangle::new(Point::ORIGIN, content),
        );

        self.update(viewport.id(), |data| data.content = content);

        (viewport, content_node)
    }

    /// Returns a handle to the node with the given id.
    pub fn node(&self, id: NodeId) -> NodeRef {
        Rc::new(DomNode {
            id,
            state: Rc::downgrade(&self.state),
        })
    }

    /// Drains the queued events.
    pub fn take_events(&self) -> Vec<Event> {
        self.state.borrow_mut().events.drain(..).collect()
    }

    /// Sets the layout direction of a node and its descendants.
    pub fn set_direction(&self, id: NodeId, direction: LayoutDirection) {
        let mut state = self.state.borrow_mut();

        for node in state.subtree(id) {
            if let Some(data) = state.nodes.get_mut(&node) {
                data.direction = direction;
            }
        }
    }

    /// Resizes the scrollable content of a scroll container, like adding or
    /// removing children would.
    pub fn set_content_size(&self, viewport: NodeId, content: Size) {
        let children: Vec<NodeId> = {
            let state = self.state.borrow();

            state
                .nodes
                .iter()
                .filter(|(_, data)| data.parent == Some(viewport) && data.sentinel.is_none())
                .map(|(id, _)| *id)
                .collect()
        };

        self.update(viewport, |data| data.content = content);

        for child in children {
            self.update(child, |data| {
                data.layout.width = content.width;
                data.layout.height = content.height;
            });

            self.state.borrow_mut().notify_resize(child);
            self.state.borrow_mut().notify_mutation(child);
        }

        let mut state = self.state.borrow_mut();
        state.clamp_offset(viewport);
        state.refresh_intersections(viewport);
    }

    /// Resizes the visible area of a node.
    pub fn set_client_size(&self, id: NodeId, size: Size) {
        self.update(id, |data| {
            data.layout.width = size.width;
            data.layout.height = size.height;
        });

        let mut state = self.state.borrow_mut();
        state.notify_resize(id);
        state.clamp_offset(id);
        state.refresh_intersections(id);
    }

    /// Reports a mutation in the subtree of a node.
    pub fn mutate(&self, id: NodeId) {
        self.state.borrow_mut().notify_mutation(id);
    }

    /// Scrolls a node as the user would, by a physical delta.
    pub fn scroll_by(&self, id: NodeId, delta: Vector) {
        let offset = self.node(id).scroll_offset();

        self.node(id).set_scroll_offset(AbsoluteOffset {
            x: Some(offset.x + delta.x),
            y: Some(offset.y + delta.y),
        });
    }

    /// Detaches a node and its descendants from the tree.
    pub fn detach(&self, id: NodeId) {
        self.state.borrow_mut().remove(id);
    }

    /// Returns whether the node exists in the tree.
    pub fn contains(&self, id: NodeId) -> bool {
        self.state.borrow().nodes.contains_key(&id)
    }

    /// Returns the thumb geometry last applied to a node.
    pub fn thumb(&self, id: NodeId) -> Option<(Axis, f32, f32)> {
        self.state
            .borrow()
            .nodes
            .get(&id)
            .and_then(|data| data.thumb)
    }

    /// Returns the amount of live observers and listeners.
    pub fn observer_count(&self) -> usize {
        self.state.borrow().observers.len()
    }

    /// Returns the amount of live sentinels.
    pub fn sentinel_count(&self) -> usize {
        self.state
            .borrow()
            .nodes
            .values()
            .filter(|data| data.sentinel.is_some())
            .count()
    }

    /// Returns whether a document-wide pointer listener is registered.
    pub fn has_pointer_listener(&self) -> bool {
        self.state
            .borrow()
            .observers
            .values()
            .any(|observer| matches!(observer, Observer::Pointer))
    }

    /// Returns whether text selection is currently enabled.
    pub fn is_text_selection_enabled(&self) -> bool {
        !self.state.borrow().text_selection_disabled
    }

    fn update(&self, id: NodeId, f: impl FnOnce(&mut Data)) {
        if let Some(data) = self.state.borrow_mut().nodes.get_mut(&id) {
            f(data);
        }
    }

    fn observe(&self, observer: Observer) -> ObserverHandle {
        let mut state = self.state.borrow_mut();
        state.next_observer += 1;

        let key = state.next_observer;
        let _ = state.observers.insert(key, observer);

        let weak = Rc::downgrade(&self.state);

        ObserverHandle::new(move || {
            if let Some(state) = weak.upgrade() {
                let _ = state.borrow_mut().observers.remove(&key);
            }
        })
    }
}

impl Host for Dom {
    fn query(&self, root: Option<NodeId>, selector: &str) -> Option<NodeRef> {
        let id = {
            let state = self.state.borrow();
            let scope = root.map(|root| state.subtree(root));

            state
                .nodes
                .iter()
                .filter(|(id, _)| {
                    scope
                        .as_ref()
                        .is_none_or(|scope| scope.contains(id) && Some(**id) != root)
                })
                .find(|(_, data)| data.selectors.iter().any(|name| name == selector))
                .map(|(id, _)| *id)?
        };

        Some(self.node(id))
    }

    fn observe_resize(&self, node: NodeId) -> ObserverHandle {
        self.observe(Observer::Resize(node))
    }

    fn observe_mutations(&self, node: NodeId) -> ObserverHandle {
        self.observe(Observer::Mutations(node))
    }

    fn observe_intersection(&self, sentinel: NodeId, root: NodeId) -> ObserverHandle {
        let is_intersecting = self.state.borrow().is_intersecting(sentinel, root);

        let handle = self.observe(Observer::Intersection {
            sentinel,
            root,
            is_intersecting,
        });

        self.state.borrow_mut().events.push_back(Event::Intersection {
            sentinel,
            is_intersecting,
        });

        handle
    }

    fn create_sentinel(&self, parent: NodeId, edge: Edge, offset: f32) -> NodeId {
        let sentinel = self.append(Some(parent), ".sentinel", Rectangle::default());
        self.update(sentinel.id(), |data| data.sentinel = Some((edge, offset)));

        sentinel.id()
    }

    fn create_scrollbar(&self, parent: NodeId, axis: Axis) -> Option<(NodeRef, NodeRef)> {
        let bounds = self.node(parent).bounds();

        let track_bounds = match axis {
            Axis::Y => Rectangle {
                x: bounds.x + bounds.width - TRACK_WIDTH,
                y: bounds.y,
                width: TRACK_WIDTH,
                height: bounds.height,
            },
            Axis::X => Rectangle {
                x: bounds.x,
                y: bounds.y + bounds.height - TRACK_WIDTH,
                width: bounds.width,
                height: TRACK_WIDTH,
            },
        };

        let track = self.append(None, ".track", track_bounds);
        let thumb = self.append(
            Some(track.id()),
            ".thumb",
            Rectangle::new(Point::ORIGIN, Size::ZERO),
        );

        Some((track, thumb))
    }

    fn remove_node(&self, node: NodeId) {
        self.state.borrow_mut().remove(node);
    }

    fn set_text_selection(&self, enabled: bool) {
        self.state.borrow_mut().text_selection_disabled = !enabled;
    }

    fn listen_pointer(&self) -> ObserverHandle {
        self.observe(Observer::Pointer)
    }
}

impl State {
    fn subtree(&self, root: NodeId) -> Vec<NodeId> {
        let mut nodes = vec![root];
        let mut index = 0;

        while index < nodes.len() {
            let parent = nodes[index];

            nodes.extend(
                self.nodes
                    .iter()
                    .filter(|(_, data)| data.parent == Some(parent))
                    .map(|(id, _)| *id),
            );

            index += 1;
        }

        nodes.retain(|id| self.nodes.contains_key(id));
        nodes
    }

    fn remove(&mut self, id: NodeId) {
        for node in self.subtree(id) {
            let _ = self.nodes.remove(&node);
        }
    }

    fn scroll_max(&self, id: NodeId) -> Vector {
        self.nodes.get(&id).map_or(Vector::ZERO, |data| {
            Vector::new(
                (data.content.width - data.layout.width).max(0.0),
                (data.content.height - data.layout.height).max(0.0),
            )
        })
    }

    fn bounds(&self, id: NodeId) -> Rectangle {
        let Some(data) = self.nodes.get(&id) else {
            return Rectangle::default();
        };

        let Some((parent_id, parent)) = data
            .parent
            .and_then(|parent| Some((parent, self.nodes.get(&parent)?)))
        else {
            return data.layout;
        };

        let origin = self.bounds(parent_id).position();
        let scroll_max = self.scroll_max(parent_id);

        // The content coordinate shown at the left edge of the parent
        let visible_left = match parent.direction {
            LayoutDirection::Ltr => parent.offset.x,
            LayoutDirection::Rtl => parent.offset.x + scroll_max.x,
        };

        Rectangle {
            x: origin.x + data.layout.x - visible_left,
            y: origin.y + data.layout.y - parent.offset.y,
            width: data.layout.width,
            height: data.layout.height,
        }
    }

    fn set_offset(&mut self, id: NodeId, offset: AbsoluteOffset<Option<f32>>) {
        let scroll_max = self.scroll_max(id);

        let Some(data) = self.nodes.get_mut(&id) else {
            return;
        };

        let previous = data.offset;

        if let Some(x) = offset.x {
            data.offset.x = data.direction.clamp_physical(x, scroll_max.x);
        }

        if let Some(y) = offset.y {
            data.offset.y = y.clamp(0.0, scroll_max.y);
        }

        if data.offset != previous {
            log::trace!("{id} scrolled to {:?}", data.offset);

            self.events.push_back(Event::Scrolled(id));
            self.refresh_intersections(id);
        }
    }

    fn clamp_offset(&mut self, id: NodeId) {
        if let Some(offset) = self.nodes.get(&id).map(|data| data.offset) {
            self.set_offset(
                id,
                AbsoluteOffset {
                    x: Some(offset.x),
                    y: Some(offset.y),
                },
            );
        }
    }

    fn is_intersecting(&self, sentinel: NodeId, root: NodeId) -> bool {
        let (Some(sentinel), Some(root_data)) = (
            self.nodes.get(&sentinel).and_then(|data| data.sentinel),
            self.nodes.get(&root),
        ) else {
            return false;
        };

        let (edge, threshold) = sentinel;
        let scroll_max = self.scroll_max(root);

        let (offset, max) = match edge.axis() {
            Axis::X => (
                root_data
                    .direction
                    .to_logical(root_data.offset.x, scroll_max.x),
                scroll_max.x,
            ),
            Axis::Y => (root_data.offset.y, scroll_max.y),
        };

        edge.distance(offset, max) <= threshold
    }

    fn refresh_intersections(&mut self, root: NodeId) {
        let keys: Vec<u64> = self.observers.keys().copied().collect();

        for key in keys {
            let Some(Observer::Intersection {
                sentinel,
                root: observed_root,
                is_intersecting,
            }) = self.observers.get(&key).copied()
            else {
                continue;
            };

            if observed_root != root {
                continue;
            }

            let now_intersecting = self.is_intersecting(sentinel, root);

            if now_intersecting != is_intersecting {
                let _ = self.observers.insert(
                    key,
                    Observer::Intersection {
                        sentinel,
                        root,
                        is_intersecting: now_intersecting,
                    },
                );

                self.events.push_back(Event::Intersection {
                    sentinel,
                    is_intersecting: now_intersecting,
                });
            }
        }
    }

    fn notify_resize(&mut self, id: NodeId) {
        if self
            .observers
            .values()
            .any(|observer| matches!(observer, Observer::Resize(node) if *node == id))
        {
            self.events.push_back(Event::Resized(id));
        }
    }

    fn notify_mutation(&mut self, id: NodeId) {
        if self
            .observers
            .values()
            .any(|observer| matches!(observer, Observer::Mutations(node) if *node == id))
        {
            self.events.push_back(Event::Mutated(id));
        }
    }
}

/// A handle to a node of a [`Dom`].
#[derive(Debug, Clone)]
pub struct DomNode {
    id: NodeId,
    state: Weak<RefCell<State>>,
}

impl DomNode {
    fn with<T>(&self, f: impl FnOnce(&State) -> T) -> Option<T> {
        let state = self.state.upgrade()?;
        let state = state.borrow();

        Some(f(&state))
    }
}

impl Node for DomNode {
    fn id(&self) -> NodeId {
        self.id
    }

    fn is_connected(&self) -> bool {
        self.with(|state| state.nodes.contains_key(&self.id))
            .unwrap_or(false)
    }

    fn bounds(&self) -> Rectangle {
        self.with(|state| state.bounds(self.id)).unwrap_or_default()
    }

    fn client_size(&self) -> Size {
        self.with(|state| {
            state
                .nodes
                .get(&self.id)
                .map(|data| data.layout.size())
                .unwrap_or_default()
        })
        .unwrap_or_default()
    }

    fn scroll_size(&self) -> Size {
        self.with(|state| {
            state
                .nodes
                .get(&self.id)
                .map(|data| {
                    Size::new(
                        data.content.width.max(data.layout.width),
                        data.content.height.max(data.layout.height),
                    )
                })
                .unwrap_or_default()
        })
        .unwrap_or_default()
    }

    fn scroll_offset(&self) -> Vector {
        self.with(|state| {
            state
                .nodes
                .get(&self.id)
                .map(|data| data.offset)
                .unwrap_or_default()
        })
        .unwrap_or_default()
    }

    fn set_scroll_offset(&self, offset: AbsoluteOffset<Option<f32>>) {
        if let Some(state) = self.state.upgrade() {
            state.borrow_mut().set_offset(self.id, offset);
        }
    }

    fn direction(&self) -> LayoutDirection {
        self.with(|state| {
            state
                .nodes
                .get(&self.id)
                .map(|data| data.direction)
                .unwrap_or_default()
        })
        .unwrap_or_default()
    }

    fn set_thumb(&self, axis: Axis, size: f32, offset: f32) {
        if let Some(state) = self.state.upgrade()
            && let Some(data) = state.borrow_mut().nodes.get_mut(&self.id)
        {
            data.thumb = Some((axis, size, offset));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_clamped_and_reported() {
        let dom = Dom::new();
        let (viewport, _) = dom.viewport("#v", Size::new(100.0, 100.0), Size::new(100.0, 300.0));

        viewport.set_scroll_offset(AbsoluteOffset {
            x: None,
            y: Some(500.0),
        });

        assert_eq!(viewport.scroll_offset(), Vector::new(0.0, 200.0));
        assert_eq!(dom.take_events(), vec![Event::Scrolled(viewport.id())]);

        viewport.set_scroll_offset(AbsoluteOffset {
            x: None,
            y: Some(200.0),
        });

        assert!(dom.take_events().is_empty());
    }

    #[test]
    fn rtl_offsets_are_negative() {
        let dom = Dom::new();
        let (viewport, _) = dom.viewport("#v", Size::new(100.0, 100.0), Size::new(300.0, 100.0));
        dom.set_direction(viewport.id(), LayoutDirection::Rtl);

        viewport.set_scroll_offset(AbsoluteOffset {
            x: Some(50.0),
            y: None,
        });
        assert_eq!(viewport.scroll_offset().x, 0.0);

        viewport.set_scroll_offset(AbsoluteOffset {
            x: Some(-500.0),
            y: None,
        });
        assert_eq!(viewport.scroll_offset().x, -200.0);
    }

    #[test]
    fn children_move_with_the_scroll_offset() {
        let dom = Dom::new();
        let (viewport, content) =
            dom.viewport("#v", Size::new(100.0, 100.0), Size::new(100.0, 300.0));
        let item = dom.append(
            Some(content.id()),
            "#item",
            Rectangle::new(Point::new(0.0, 150.0), Size::new(100.0, 20.0)),
        );

        assert_eq!(item.bounds().y, 150.0);

        dom.scroll_by(viewport.id(), Vector::new(0.0, 100.0));

        assert_eq!(item.bounds().y, 50.0);
    }

    #[test]
    fn intersection_observers_report_the_initial_state() {
        let dom = Dom::new();
        let (viewport, content) =
            dom.viewport("#v", Size::new(100.0, 100.0), Size::new(100.0, 300.0));

        let sentinel = dom.create_sentinel(content.id(), Edge::Top, 0.0);
        let _handle = dom.observe_intersection(sentinel, viewport.id());

        assert_eq!(
            dom.take_events(),
            vec![Event::Intersection {
                sentinel,
                is_intersecting: true
            }]
        );

        dom.scroll_by(viewport.id(), Vector::new(0.0, 10.0));

        assert_eq!(
            dom.take_events(),
            vec![
                Event::Scrolled(viewport.id()),
                Event::Intersection {
                    sentinel,
                    is_intersecting: false
                }
            ]
        );
    }

    #[test]
    fn dropped_handles_unregister_observers() {
        let dom = Dom::new();
        let (viewport, _) = dom.viewport("#v", Size::new(100.0, 100.0), Size::new(100.0, 300.0));

        let handle = dom.observe_resize(viewport.id());
        assert_eq!(dom.observer_count(), 1);

        drop(handle);
        assert_eq!(dom.observer_count(), 0);
    }

    #[test]
    fn queries_are_scoped() {
        let dom = Dom::new();
        let (first, _) = dom.viewport("#a", Size::new(10.0, 10.0), Size::new(10.0, 10.0));
        let (second, _) = dom.viewport("#b", Size::new(10.0, 10.0), Size::new(10.0, 10.0));

        let content = dom.query(Some(second.id()), ".content");

        assert!(content.is_some_and(|content| content.bounds() == second.bounds()));
        assert!(dom.query(Some(first.id()), "#b").is_none());
        assert!(dom.query(None, "#missing").is_none());
    }
}
