//! Measure the scrollable viewport of a scrollbar.
//!
//! A [`Viewport`] either owns its nodes or looks them up through the
//! [`Host`] with selectors. Lookups may be asynchronous: the viewport then
//! keeps polling until the nodes show up or a timeout expires.
//!
//! Offsets exposed here are logical. They grow from the start edge of the
//! content, whatever the layout direction.
use crate::core::time::{Duration, Instant};
use crate::core::{
    AbsoluteOffset, Axis, Error, Host, LayoutDirection, NodeId, NodeRef, Size, Vector,
};
use crate::smooth_scroll;

use std::rc::Rc;

/// Where the nodes of a [`Viewport`] come from.
#[derive(Clone)]
pub enum Source {
    /// The nodes are given directly.
    Owned {
        /// The scroll container.
        viewport: NodeRef,
        /// The content inside the scroll container.
        content: NodeRef,
    },
    /// The nodes are looked up with selectors.
    External {
        /// The node the lookups are scoped to.
        root: Option<NodeId>,
        /// The selectors.
        selectors: ExternalViewport,
    },
}

impl std::fmt::Debug for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Owned { viewport, content } => f
                .debug_struct("Owned")
                .field("viewport", &viewport.id())
                .field("content", &content.id())
                .finish(),
            Source::External { root, selectors } => f
                .debug_struct("External")
                .field("root", root)
                .field("selectors", selectors)
                .finish(),
        }
    }
}

/// The selectors of a viewport owned by someone else, like a virtual list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExternalViewport {
    /// The scroll container.
    pub viewport: String,
    /// The content inside the scroll container. Defaults to the container.
    pub content: Option<String>,
    /// A node whose size stands for the size of the content.
    pub spacer: Option<String>,
}

impl ExternalViewport {
    /// Creates an [`ExternalViewport`] with the given container selector.
    pub fn new(viewport: impl Into<String>) -> Self {
        Self {
            viewport: viewport.into(),
            content: None,
            spacer: None,
        }
    }

    /// Sets the selector of the content.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Sets the selector of the spacer.
    pub fn spacer(mut self, spacer: impl Into<String>) -> Self {
        self.spacer = Some(spacer.into());
        self
    }
}

/// The lifecycle of a [`Viewport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The nodes are not known yet.
    Uninitialized,
    /// The nodes are known and being measured for the first time.
    Measuring,
    /// The viewport is measured.
    Ready,
    /// The viewport is being measured again.
    Updating,
    /// The viewport was destroyed.
    Destroyed,
}

/// A change reported by a [`Viewport`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Notification {
    /// The viewport was measured for the first time.
    AfterInit(ViewportMeasurement),
    /// The extents or the direction of the viewport changed.
    AfterUpdate(ViewportMeasurement),
    /// The viewport left the host tree.
    Invalidated,
}

/// The measured state of a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportMeasurement {
    /// The size of the visible area.
    pub client: Size,
    /// The size of the content.
    pub content: Size,
    /// The logical scroll offset.
    pub offset: AbsoluteOffset,
    /// The layout direction.
    pub direction: LayoutDirection,
}

impl ViewportMeasurement {
    /// Returns the maximum logical offset along an axis.
    pub fn scroll_max(&self, axis: Axis) -> f32 {
        (axis.length(self.content) - axis.length(self.client)).max(0.0)
    }

    /// Returns the maximum logical offsets along both axes.
    pub fn scroll_maxima(&self) -> Vector {
        Vector::new(self.scroll_max(Axis::X), self.scroll_max(Axis::Y))
    }

    /// Returns true if the content overflows along an axis.
    pub fn is_scrollable(&self, axis: Axis) -> bool {
        self.scroll_max(axis) > 0.0
    }

    fn same_extents(&self, other: &Self) -> bool {
        self.client == other.client
            && self.content == other.content
            && self.direction == other.direction
    }
}

#[derive(Clone)]
struct Nodes {
    viewport: NodeRef,
    content: NodeRef,
    spacer: Option<NodeRef>,
}

#[derive(Debug, Clone, Copy)]
struct Polling {
    started_at: Instant,
    next_at: Instant,
}

/// The viewport of a scrollbar.
pub struct Viewport {
    host: Rc<dyn Host>,
    source: Source,
    phase: Phase,
    nodes: Option<Nodes>,
    measurement: Option<ViewportMeasurement>,
    polling: Option<Polling>,
    asynchronous: Option<(Duration, Duration)>,
}

impl std::fmt::Debug for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Viewport")
            .field("source", &self.source)
            .field("phase", &self.phase)
            .field("measurement", &self.measurement)
            .finish_non_exhaustive()
    }
}

impl Viewport {
    /// Creates a new [`Viewport`] from its [`Source`].
    pub fn new(host: Rc<dyn Host>, source: Source) -> Self {
        Self {
            host,
            source,
            phase: Phase::Uninitialized,
            nodes: None,
            measurement: None,
            polling: None,
            asynchronous: None,
        }
    }

    /// Keeps looking up missing external nodes every `interval`, until
    /// `timeout`.
    pub fn asynchronous(mut self, interval: Duration, timeout: Duration) -> Self {
        self.asynchronous = Some((interval, timeout));
        self
    }

    /// Resolves the nodes and measures them for the first time.
    ///
    /// An unresolved selector is an error, unless the viewport is
    /// asynchronous; it then starts polling and returns `None`.
    pub fn attach(&mut self, now: Instant) -> Result<Option<Notification>, Error> {
        match self.phase {
            Phase::Destroyed => return Err(Error::Destroyed),
            Phase::Uninitialized => {}
            _ => return Ok(None),
        }

        match self.resolve() {
            Ok(nodes) => Ok(Some(self.initialize(nodes))),
            Err(error) => match self.asynchronous {
                Some((interval, _)) => {
                    log::debug!("Waiting for viewport: {error}");

                    self.polling = Some(Polling {
                        started_at: now,
                        next_at: now + interval,
                    });

                    Ok(None)
                }
                None => Err(error),
            },
        }
    }

    /// Returns when the next lookup of a missing viewport should happen.
    pub fn next_poll(&self) -> Option<Instant> {
        self.polling.map(|polling| polling.next_at)
    }

    /// Looks up a missing viewport again, if it is time to.
    pub fn poll(&mut self, now: Instant) -> Option<Notification> {
        let polling = self.polling?;
        let (interval, timeout) = self.asynchronous?;

        if now < polling.next_at {
            return None;
        }

        match self.resolve() {
            Ok(nodes) => {
                self.polling = None;

                Some(self.initialize(nodes))
            }
            Err(error) if now.saturating_duration_since(polling.started_at) >= timeout => {
                log::warn!("Gave up waiting for viewport after {timeout:?}: {error}");

                self.polling = None;

                None
            }
            Err(_) => {
                self.polling = Some(Polling {
                    next_at: now + interval,
                    ..polling
                });

                None
            }
        }
    }

    /// Measures the viewport again.
    ///
    /// Returns [`Notification::AfterUpdate`] when the extents changed and
    /// [`Notification::Invalidated`] when the viewport is gone.
    pub fn update(&mut self) -> Option<Notification> {
        if self.phase != Phase::Ready {
            return None;
        }

        let nodes = self.nodes.clone()?;

        if !nodes.viewport.is_connected() {
            log::debug!("Viewport {} left the tree", nodes.viewport.id());

            self.phase = Phase::Uninitialized;
            self.nodes = None;
            self.measurement = None;

            return Some(Notification::Invalidated);
        }

        self.phase = Phase::Updating;

        let measurement = measure(&nodes);
        let previous = self.measurement.replace(measurement);

        self.phase = Phase::Ready;

        match previous {
            Some(previous) if previous.same_extents(&measurement) => None,
            _ => Some(Notification::AfterUpdate(measurement)),
        }
    }

    /// Writes a logical offset along an axis straight into the viewport.
    pub fn scroll_to_logical(&self, axis: Axis, offset: f32) {
        let Some(nodes) = &self.nodes else {
            return;
        };

        nodes
            .viewport
            .set_scroll_offset(axis.only(self.to_physical(axis, offset)));
    }

    /// Converts a logical offset along an axis into a physical one.
    pub fn to_physical(&self, axis: Axis, offset: f32) -> f32 {
        let Some(measurement) = &self.measurement else {
            return 0.0;
        };

        let scroll_max = measurement.scroll_max(axis);

        match axis {
            Axis::X => measurement.direction.to_physical(offset, scroll_max),
            Axis::Y => offset.clamp(0.0, scroll_max),
        }
    }

    /// Releases the nodes. The viewport cannot be attached again.
    pub fn destroy(&mut self) {
        self.phase = Phase::Destroyed;
        self.nodes = None;
        self.measurement = None;
        self.polling = None;
    }

    /// Returns the current [`Phase`].
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the scroll container, once resolved.
    pub fn viewport(&self) -> Option<&NodeRef> {
        self.nodes.as_ref().map(|nodes| &nodes.viewport)
    }

    /// Returns the content node, once resolved.
    pub fn content(&self) -> Option<&NodeRef> {
        self.nodes.as_ref().map(|nodes| &nodes.content)
    }

    /// Returns the latest [`ViewportMeasurement`].
    pub fn measurement(&self) -> Option<&ViewportMeasurement> {
        self.measurement.as_ref()
    }

    /// Returns the latest logical offset.
    pub fn offset(&self) -> AbsoluteOffset {
        self.measurement
            .map(|measurement| measurement.offset)
            .unwrap_or_default()
    }

    /// Returns true if the content overflows vertically.
    pub fn is_vertically_scrollable(&self) -> bool {
        self.measurement
            .is_some_and(|measurement| measurement.is_scrollable(Axis::Y))
    }

    /// Returns true if the content overflows horizontally.
    pub fn is_horizontally_scrollable(&self) -> bool {
        self.measurement
            .is_some_and(|measurement| measurement.is_scrollable(Axis::X))
    }

    /// Returns true if the viewport owns the node with the given id.
    pub fn is_viewport(&self, node: NodeId) -> bool {
        self.viewport().is_some_and(|viewport| viewport.id() == node)
    }

    fn resolve(&self) -> Result<Nodes, Error> {
        match &self.source {
            Source::Owned { viewport, content } => {
                if !viewport.is_connected() {
                    return Err(Error::MissingHost {
                        what: "connected viewport",
                    });
                }

                Ok(Nodes {
                    viewport: viewport.clone(),
                    content: content.clone(),
                    spacer: None,
                })
            }
            Source::External { root, selectors } => {
                let query = |selector: &str, scope: Option<NodeId>| {
                    self.host
                        .query(scope, selector)
                        .ok_or_else(|| Error::SelectorNotFound {
                            selector: selector.to_owned(),
                        })
                };

                let viewport = query(&selectors.viewport, *root)?;

                let content = match &selectors.content {
                    Some(selector) => query(selector, Some(viewport.id()))?,
                    None => viewport.clone(),
                };

                let spacer = selectors
                    .spacer
                    .as_deref()
                    .map(|selector| query(selector, Some(viewport.id())))
                    .transpose()?;

                Ok(Nodes {
                    viewport,
                    content,
                    spacer,
                })
            }
        }
    }

    fn initialize(&mut self, nodes: Nodes) -> Notification {
        self.phase = Phase::Measuring;

        let measurement = measure(&nodes);

        log::debug!(
            "Viewport {} initialized: {:?}",
            nodes.viewport.id(),
            measurement
        );

        self.nodes = Some(nodes);
        self.measurement = Some(measurement);
        self.phase = Phase::Ready;

        Notification::AfterInit(measurement)
    }
}

fn measure(nodes: &Nodes) -> ViewportMeasurement {
    let viewport = nodes.viewport.as_ref();
    let client = sanitize(viewport.client_size());

    let content = match &nodes.spacer {
        Some(spacer) => {
            let spacer = sanitize(spacer.client_size());

            Size::new(
                spacer.width.max(client.width),
                spacer.height.max(client.height),
            )
        }
        None => sanitize(viewport.scroll_size()),
    };

    let measurement = ViewportMeasurement {
        client,
        content,
        offset: AbsoluteOffset::default(),
        direction: viewport.direction(),
    };

    let offset = if nodes.spacer.is_some() {
        let physical = viewport.scroll_offset();
        let scroll_max = measurement.scroll_maxima();

        AbsoluteOffset {
            x: measurement
                .direction
                .to_logical(physical.x, scroll_max.x),
            y: physical.y.clamp(0.0, scroll_max.y),
        }
    } else {
        smooth_scroll::logical_offset(viewport)
    };

    ViewportMeasurement {
        offset: AbsoluteOffset {
            x: finite(offset.x),
            y: finite(offset.y),
        },
        ..measurement
    }
}

fn sanitize(size: Size) -> Size {
    let sanitized = Size::new(finite(size.width).max(0.0), finite(size.height).max(0.0));

    if sanitized != size {
        log::trace!("Sanitized reported size {size:?} to {sanitized:?}");
    }

    sanitized
}

fn finite(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        log::trace!("Replacing non-finite measurement {value} with 0");

        0.0
    }
}
