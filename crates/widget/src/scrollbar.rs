//! Keep custom scrollbars in sync with a scrollable viewport.
//!
//! A [`Scrollbar`] is driven by the host like any other widget: every
//! [`Event`] goes through [`Scrollbar::update`], which publishes
//! [`ScrollbarEvent`]s and asks for frames through the [`Shell`].
//!
//! # Example
//! ```no_run
//! use icy_scroll_test::Dom;
//! use icy_scroll_widget::core::time::Instant;
//! use icy_scroll_widget::core::{Shell, Size};
//! use icy_scroll_widget::scrollbar::Scrollbar;
//! use icy_scroll_widget::settings::Settings;
//! use icy_scroll_widget::viewport::Source;
//!
//! let dom = Dom::new();
//! let (viewport, content) = dom.viewport("#list", Size::new(100.0, 100.0), Size::new(100.0, 300.0));
//!
//! let mut scrollbar = Scrollbar::new(
//!     dom.host(),
//!     Source::Owned { viewport, content },
//!     Settings::default(),
//! )?;
//!
//! let mut events = Vec::new();
//! scrollbar.attach(Instant::now(), &mut Shell::new(&mut events))?;
//!
//! for event in dom.take_events() {
//!     scrollbar.update(&event, Instant::now(), &mut Shell::new(&mut events));
//! }
//! # Ok::<(), icy_scroll_widget::core::Error>(())
//! ```
use crate::core::event::{self, Pointer};
use crate::core::time::{Duration, Instant};
use crate::core::{
    AbsoluteOffset, Animation, Axis, Edge, Edges, Error, Event, Host, LayoutDirection, NodeRef,
    RedrawRequest, ScrollToElementOptions, ScrollToOptions, Shell, ThumbGeometry, Vector,
};
use crate::observer::{ContentObserver, Schedule};
use crate::reached::{EdgeDetector, Kind};
use crate::settings::{EdgeMode, Settings, Visibility};
use crate::smooth_scroll::{ScrollTask, SmoothScroll};
use crate::thumb::{Gesture, ThumbController};
use crate::viewport::{Notification, Phase, Source, Viewport, ViewportMeasurement};

use std::rc::Rc;

/// An event published by a [`Scrollbar`].
#[derive(Debug, Clone, PartialEq)]
pub enum ScrollbarEvent {
    /// The viewport was measured for the first time.
    AfterInit,
    /// The extents of the viewport changed.
    AfterUpdate,
    /// The viewport came within the threshold of an edge.
    Reached(Edge),
    /// The viewport went beyond the threshold of an edge.
    Dropped(Edge),
    /// The viewport scrolled.
    Scrolled(ScrollState),
    /// The viewport left the host tree.
    Invalidated,
}

/// The observable state of a [`Scrollbar`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    /// Whether the vertical scrollbar is shown.
    pub vertical_used: bool,
    /// Whether the horizontal scrollbar is shown.
    pub horizontal_used: bool,
    /// Whether the content overflows vertically.
    pub is_vertically_scrollable: bool,
    /// Whether the content overflows horizontally.
    pub is_horizontally_scrollable: bool,
    /// The axis whose thumb is being dragged.
    pub dragging: Option<Axis>,
    /// Whether the pointer is over the scrollable area.
    pub hovered: bool,
    /// The layout direction of the viewport.
    pub direction: LayoutDirection,
    /// The logical scroll offset.
    pub offset: AbsoluteOffset,
    /// The maximum logical scroll offset.
    pub scroll_max: Vector,
    /// The geometry of the vertical thumb.
    pub vertical: ThumbGeometry,
    /// The geometry of the horizontal thumb.
    pub horizontal: ThumbGeometry,
}

/// The node a [`Scrollbar`] should scroll to.
#[derive(Clone)]
pub enum Target {
    /// The first node in the content matching a selector.
    Selector(String),
    /// A node.
    Node(NodeRef),
}

impl std::fmt::Debug for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Selector(selector) => f.debug_tuple("Selector").field(selector).finish(),
            Target::Node(node) => f.debug_tuple("Node").field(&node.id()).finish(),
        }
    }
}

impl From<&str> for Target {
    fn from(selector: &str) -> Self {
        Target::Selector(selector.to_owned())
    }
}

impl From<String> for Target {
    fn from(selector: String) -> Self {
        Target::Selector(selector)
    }
}

impl From<NodeRef> for Target {
    fn from(node: NodeRef) -> Self {
        Target::Node(node)
    }
}

/// Custom scrollbars for a viewport.
pub struct Scrollbar {
    host: Rc<dyn Host>,
    settings: Settings,
    viewport: Viewport,
    engine: SmoothScroll,
    thumbs: Vec<ThumbController>,
    sensor: ContentObserver,
    reached: EdgeDetector,
    dropped: EdgeDetector,
    hover: Animation<bool>,
    last_offset: Option<AbsoluteOffset>,
    is_destroyed: bool,
}

impl std::fmt::Debug for Scrollbar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scrollbar")
            .field("settings", &self.settings)
            .field("viewport", &self.viewport)
            .field("engine", &self.engine)
            .field("thumbs", &self.thumbs)
            .field("is_destroyed", &self.is_destroyed)
            .finish_non_exhaustive()
    }
}

impl Scrollbar {
    /// Creates a new [`Scrollbar`] for the viewport of the given [`Source`].
    ///
    /// Nothing happens in the host until [`Scrollbar::attach`] is called.
    pub fn new(host: Rc<dyn Host>, source: Source, settings: Settings) -> Result<Self, Error> {
        settings.validate()?;

        let mut viewport = Viewport::new(host.clone(), source);

        if settings.async_viewport {
            viewport = viewport.asynchronous(settings.async_poll_interval, settings.async_timeout);
        }

        Ok(Self {
            host,
            viewport,
            engine: SmoothScroll::new(),
            thumbs: Vec::new(),
            sensor: ContentObserver::new(Schedule::new(
                settings.sensor_debounce,
                settings.sensor_throttle,
            )),
            reached: EdgeDetector::new(
                Kind::Reached,
                settings.reached_offset,
                settings.edge_mode,
                settings.arm_timeout,
            ),
            dropped: EdgeDetector::new(
                Kind::Dropped,
                settings.dropped_offset,
                settings.edge_mode,
                settings.arm_timeout,
            ),
            hover: Animation::new(false).duration(settings.hover_fade),
            last_offset: None,
            is_destroyed: false,
            settings,
        })
    }

    /// Resolves and measures the viewport, then creates the thumbs and the
    /// observers.
    ///
    /// [`ScrollbarEvent::AfterInit`] is published once the viewport is
    /// measured, which may happen later for asynchronous viewports.
    pub fn attach(
        &mut self,
        now: Instant,
        shell: &mut Shell<'_, ScrollbarEvent>,
    ) -> Result<(), Error> {
        if self.is_destroyed {
            return Err(Error::Destroyed);
        }

        if let Some(notification) = self.viewport.attach(now)? {
            self.notify(notification, now, shell);
        }

        self.request_redraws(now, shell);

        Ok(())
    }

    /// Processes an [`Event`] of the host.
    pub fn update(
        &mut self,
        event: &Event,
        now: Instant,
        shell: &mut Shell<'_, ScrollbarEvent>,
    ) {
        if self.is_destroyed {
            return;
        }

        match *event {
            Event::Frame(_) => {
                if self.engine.is_animating() {
                    let _ = self.engine.tick(now);
                }

                if let Some(notification) = self.viewport.poll(now) {
                    self.notify(notification, now, shell);
                }

                if self.sensor.poll(now) {
                    self.measure(now, shell);
                }

                if let Some(measurement) = self.viewport.measurement().copied() {
                    self.reached.tick(now, &measurement);
                    self.dropped.tick(now, &measurement);
                }
            }
            Event::Scrolled(node) if self.viewport.is_viewport(node) => {
                self.measure(now, shell);
            }
            Event::Resized(node) | Event::Mutated(node) if self.sensor.is_observing(node) => {
                if self.sensor.notify(now) {
                    self.measure(now, shell);
                }
            }
            Event::Wheel { node, .. } | Event::Touch { node }
                if self.viewport.is_viewport(node) =>
            {
                if self.engine.interrupt(node) {
                    log::trace!("Scroll animation of {node} interrupted by the user");
                }
            }
            Event::Intersection {
                sentinel,
                is_intersecting,
            } => {
                let Some(measurement) = self.viewport.measurement().copied() else {
                    return;
                };

                if let Some(edge) = self
                    .reached
                    .intersection(sentinel, is_intersecting, &measurement)
                {
                    shell.publish(ScrollbarEvent::Reached(edge));
                }

                if let Some(edge) = self
                    .dropped
                    .intersection(sentinel, is_intersecting, &measurement)
                {
                    shell.publish(ScrollbarEvent::Dropped(edge));
                }
            }
            Event::Pointer(pointer) => self.pointer(pointer, now, shell),
            _ => {}
        }

        self.request_redraws(now, shell);
    }

    /// Returns when the [`Scrollbar`] needs its next frame.
    pub fn redraw_request(&self, now: Instant) -> RedrawRequest {
        if self.is_destroyed {
            return RedrawRequest::Wait;
        }

        if self.engine.is_animating() || self.hover.is_animating(now) {
            return RedrawRequest::NextFrame;
        }

        [
            self.viewport.next_poll(),
            self.sensor.next_deadline(),
            self.reached.next_deadline(),
            self.dropped.next_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
        .map_or(RedrawRequest::Wait, RedrawRequest::At)
    }

    /// Scrolls the viewport to the position described by `options`.
    ///
    /// Missing durations and easings fall back to the [`Settings`].
    pub fn scroll_to(&mut self, options: ScrollToOptions, now: Instant) -> ScrollTask {
        let Some(viewport) = self.ready_viewport() else {
            return ScrollTask::cancelled();
        };

        let options = ScrollToOptions {
            duration: options.duration.or(Some(self.settings.scroll_duration)),
            easing: options.easing.or(Some(self.settings.scroll_easing)),
            ..options
        };

        self.engine.scroll_to(&viewport, &options, now)
    }

    /// Scrolls the viewport until a node of the content becomes visible.
    pub fn scroll_to_element(
        &mut self,
        target: impl Into<Target>,
        options: ScrollToElementOptions,
        now: Instant,
    ) -> Result<ScrollTask, Error> {
        if self.is_destroyed {
            return Err(Error::Destroyed);
        }

        let Some(viewport) = self.ready_viewport() else {
            return Ok(ScrollTask::cancelled());
        };

        let target = match target.into() {
            Target::Node(node) => node,
            Target::Selector(selector) => {
                let scope = self.viewport.content().map(|content| content.id());

                self.host
                    .query(scope, &selector)
                    .ok_or(Error::SelectorNotFound { selector })?
            }
        };

        let options = ScrollToElementOptions {
            duration: options.duration.or(Some(self.settings.scroll_duration)),
            easing: options.easing.or(Some(self.settings.scroll_easing)),
            ..options
        };

        Ok(self
            .engine
            .scroll_to_element(&viewport, target.as_ref(), &options, now))
    }

    /// Scrolls to the top of the content.
    pub fn scroll_to_top(&mut self, duration: Option<Duration>, now: Instant) -> ScrollTask {
        self.scroll_to(with_duration(ScrollToOptions::new().top(0.0), duration), now)
    }

    /// Scrolls to the bottom of the content.
    pub fn scroll_to_bottom(&mut self, duration: Option<Duration>, now: Instant) -> ScrollTask {
        self.scroll_to(with_duration(ScrollToOptions::new().bottom(0.0), duration), now)
    }

    /// Scrolls to the left edge of the content.
    pub fn scroll_to_left(&mut self, duration: Option<Duration>, now: Instant) -> ScrollTask {
        self.scroll_to(with_duration(ScrollToOptions::new().left(0.0), duration), now)
    }

    /// Scrolls to the right edge of the content.
    pub fn scroll_to_right(&mut self, duration: Option<Duration>, now: Instant) -> ScrollTask {
        self.scroll_to(with_duration(ScrollToOptions::new().right(0.0), duration), now)
    }

    /// Scrolls to the start edge of the content.
    pub fn scroll_to_start(&mut self, duration: Option<Duration>, now: Instant) -> ScrollTask {
        self.scroll_to(with_duration(ScrollToOptions::new().start(0.0), duration), now)
    }

    /// Scrolls to the end edge of the content.
    pub fn scroll_to_end(&mut self, duration: Option<Duration>, now: Instant) -> ScrollTask {
        self.scroll_to(with_duration(ScrollToOptions::new().end(0.0), duration), now)
    }

    /// Watches the given edges for reached events. An empty set stops
    /// watching.
    pub fn set_reached(&mut self, edges: Edges, now: Instant) {
        self.settings.reached = edges;
        self.observe_edges(Kind::Reached, now);
    }

    /// Watches the given edges for dropped events. An empty set stops
    /// watching.
    pub fn set_dropped(&mut self, edges: Edges, now: Instant) {
        self.settings.dropped = edges;
        self.observe_edges(Kind::Dropped, now);
    }

    /// Stops publishing reached events.
    pub fn disable_reached(&mut self, now: Instant) {
        self.set_reached(Edges::empty(), now);
    }

    /// Stops publishing dropped events.
    pub fn disable_dropped(&mut self, now: Instant) {
        self.set_dropped(Edges::empty(), now);
    }

    /// Returns the current [`ScrollState`].
    pub fn state(&self) -> ScrollState {
        let measurement = self.viewport.measurement().copied().unwrap_or_default();
        let geometry = |axis| {
            self.thumb(axis)
                .map_or(ThumbGeometry::HIDDEN, ThumbController::geometry)
        };

        let is_vertically_scrollable = measurement.is_scrollable(Axis::Y);
        let is_horizontally_scrollable = measurement.is_scrollable(Axis::X);
        let always = self.settings.visibility == Visibility::Always;

        ScrollState {
            vertical_used: self.settings.track.has_vertical()
                && (always || is_vertically_scrollable),
            horizontal_used: self.settings.track.has_horizontal()
                && (always || is_horizontally_scrollable),
            is_vertically_scrollable,
            is_horizontally_scrollable,
            dragging: self
                .thumbs
                .iter()
                .find(|thumb| thumb.is_dragging())
                .map(ThumbController::axis),
            hovered: self.hover.value(),
            direction: measurement.direction,
            offset: measurement.offset,
            scroll_max: measurement.scroll_maxima(),
            vertical: geometry(Axis::Y),
            horizontal: geometry(Axis::X),
        }
    }

    /// Returns the state attributes a renderer would set on the host
    /// element.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let state = self.state();

        let dragging = match state.dragging {
            Some(Axis::X) => "x",
            Some(Axis::Y) => "y",
            None => "none",
        };

        vec![
            ("verticalUsed", state.vertical_used.to_string()),
            ("horizontalUsed", state.horizontal_used.to_string()),
            (
                "isVerticallyScrollable",
                state.is_vertically_scrollable.to_string(),
            ),
            (
                "isHorizontallyScrollable",
                state.is_horizontally_scrollable.to_string(),
            ),
            ("dragging", dragging.to_owned()),
            ("hover", state.hovered.to_string()),
            (
                "dir",
                if state.direction.is_rtl() { "rtl" } else { "ltr" }.to_owned(),
            ),
            ("track", self.settings.track.name().to_owned()),
            ("visibility", self.settings.visibility.name().to_owned()),
            ("appearance", self.settings.appearance.name().to_owned()),
            ("position", self.settings.position.name().to_owned()),
        ]
    }

    /// Returns the opacity of the scrollbars at the given time.
    ///
    /// Only [`Visibility::Hover`] scrollbars fade; the others are always
    /// opaque.
    pub fn opacity(&self, now: Instant) -> f32 {
        match self.settings.visibility {
            Visibility::Hover => self.hover.interpolate(0.0, 1.0, now),
            Visibility::Native | Visibility::Always => 1.0,
        }
    }

    /// Returns the [`Settings`] of the [`Scrollbar`].
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the [`Phase`] of the viewport.
    pub fn phase(&self) -> Phase {
        self.viewport.phase()
    }

    /// Returns the latest [`ViewportMeasurement`].
    pub fn measurement(&self) -> Option<&ViewportMeasurement> {
        self.viewport.measurement()
    }

    /// Returns the scroll container, once resolved.
    pub fn viewport(&self) -> Option<&NodeRef> {
        self.viewport.viewport()
    }

    /// Returns true if the [`Scrollbar`] was destroyed.
    pub fn is_destroyed(&self) -> bool {
        self.is_destroyed
    }

    /// Releases everything the [`Scrollbar`] registered in the host.
    ///
    /// Running animations resolve as cancelled. Calling this more than once
    /// does nothing.
    pub fn destroy(&mut self) {
        if self.is_destroyed {
            return;
        }

        self.teardown();
        self.viewport.destroy();
        self.is_destroyed = true;

        log::debug!("Scrollbar destroyed");
    }

    fn notify(
        &mut self,
        notification: Notification,
        now: Instant,
        shell: &mut Shell<'_, ScrollbarEvent>,
    ) {
        match notification {
            Notification::AfterInit(measurement) => {
                self.initialize(now);
                self.sync(&measurement, shell);

                shell.publish(ScrollbarEvent::AfterInit);
            }
            Notification::AfterUpdate(measurement) => {
                self.sync(&measurement, shell);

                shell.publish(ScrollbarEvent::AfterUpdate);
            }
            Notification::Invalidated => {
                self.teardown();

                shell.publish(ScrollbarEvent::Invalidated);
            }
        }
    }

    fn initialize(&mut self, now: Instant) {
        let (Some(viewport), Some(content)) = (
            self.viewport.viewport().map(|node| node.id()),
            self.viewport.content().map(|node| node.id()),
        ) else {
            return;
        };

        for axis in [Axis::Y, Axis::X] {
            let is_tracked = match axis {
                Axis::Y => self.settings.track.has_vertical(),
                Axis::X => self.settings.track.has_horizontal(),
            };

            if !is_tracked {
                continue;
            }

            match self.host.create_scrollbar(viewport, axis) {
                Some((track, thumb)) => self.thumbs.push(ThumbController::new(axis, track, thumb)),
                None => log::debug!("Host renders no {axis:?} scrollbar"),
            }
        }

        if !self.settings.disable_sensor {
            self.sensor.observe(self.host.as_ref(), viewport, content);
        }

        self.observe_edges(Kind::Reached, now);
        self.observe_edges(Kind::Dropped, now);
    }

    fn observe_edges(&mut self, kind: Kind, now: Instant) {
        let (detector, edges) = match kind {
            Kind::Reached => (&mut self.reached, self.settings.reached),
            Kind::Dropped => (&mut self.dropped, self.settings.dropped),
        };

        let nodes = self
            .viewport
            .viewport()
            .map(|node| node.id())
            .zip(self.viewport.content().map(|node| node.id()));

        match nodes {
            Some((viewport, content)) if !edges.is_empty() => {
                detector.observe(self.host.as_ref(), viewport, content, edges, now);

                if self.settings.edge_mode == EdgeMode::Position
                    && let Some(measurement) = self.viewport.measurement()
                {
                    let _ = detector.measure(measurement);
                }
            }
            _ => detector.disconnect(self.host.as_ref()),
        }
    }

    fn measure(&mut self, now: Instant, shell: &mut Shell<'_, ScrollbarEvent>) {
        match self.viewport.update() {
            Some(notification) => self.notify(notification, now, shell),
            None => {
                if let Some(measurement) = self.viewport.measurement().copied() {
                    self.sync(&measurement, shell);
                }
            }
        }
    }

    /// Renders the thumbs and publishes what changed in the offset.
    fn sync(&mut self, measurement: &ViewportMeasurement, shell: &mut Shell<'_, ScrollbarEvent>) {
        for thumb in &mut self.thumbs {
            let _ = thumb.update(measurement, self.settings.min_thumb_size);
        }

        for edge in self.reached.measure(measurement) {
            shell.publish(ScrollbarEvent::Reached(edge));
        }

        for edge in self.dropped.measure(measurement) {
            shell.publish(ScrollbarEvent::Dropped(edge));
        }

        let previous = self.last_offset.replace(measurement.offset);

        if previous.is_some_and(|previous| previous != measurement.offset) {
            shell.publish(ScrollbarEvent::Scrolled(self.state()));
        }
    }

    fn pointer(&mut self, pointer: Pointer, now: Instant, shell: &mut Shell<'_, ScrollbarEvent>) {
        match pointer {
            Pointer::Entered => self.hover.go_mut(true, now),
            Pointer::Left => self.hover.go_mut(false, now),
            Pointer::Pressed { position, target } => {
                if self.settings.disable_interaction {
                    return;
                }

                let (axis, gesture) = match target {
                    event::Target::Thumb(axis) => {
                        let host = self.host.clone();

                        match self.thumb_mut(axis) {
                            Some(thumb) => (axis, thumb.press_thumb(host.as_ref(), position)),
                            None => return,
                        }
                    }
                    event::Target::Track(axis) => match self.thumb(axis) {
                        Some(thumb) => (axis, thumb.press_track(position)),
                        None => return,
                    },
                    event::Target::Viewport => return,
                };

                shell.capture_event();
                self.apply(axis, gesture, now);
            }
            Pointer::Moved { position } => {
                let Some(thumb) = self.thumbs.iter().find(|thumb| thumb.is_dragging()) else {
                    return;
                };

                let (axis, gesture) = (thumb.axis(), thumb.move_pointer(position));

                shell.capture_event();
                self.apply(axis, gesture, now);
            }
            Pointer::Released { .. } => {
                let host = self.host.clone();

                for thumb in &mut self.thumbs {
                    if thumb.is_dragging() {
                        thumb.release(host.as_ref());
                        shell.capture_event();
                    }
                }
            }
        }
    }

    fn apply(&mut self, axis: Axis, gesture: Gesture, now: Instant) {
        let Some(viewport) = self.ready_viewport() else {
            return;
        };

        match gesture {
            Gesture::None => {}
            Gesture::Direct(offset) => {
                let _ = self.engine.interrupt(viewport.id());

                self.viewport.scroll_to_logical(axis, offset);
            }
            Gesture::Animate(offset) => {
                let target = axis.only(self.viewport.to_physical(axis, offset));

                // Nobody awaits track clicks
                let _ = self.engine.animate(
                    &viewport,
                    target,
                    self.settings.track_click_duration,
                    self.settings.scroll_easing,
                    now,
                );
            }
        }
    }

    fn request_redraws(&self, now: Instant, shell: &mut Shell<'_, ScrollbarEvent>) {
        match self.redraw_request(now) {
            RedrawRequest::Wait => {}
            request => shell.request_redraw_at(request),
        }
    }

    fn ready_viewport(&self) -> Option<NodeRef> {
        if self.is_destroyed || self.viewport.phase() != Phase::Ready {
            return None;
        }

        self.viewport.viewport().cloned()
    }

    fn thumb(&self, axis: Axis) -> Option<&ThumbController> {
        self.thumbs.iter().find(|thumb| thumb.axis() == axis)
    }

    fn thumb_mut(&mut self, axis: Axis) -> Option<&mut ThumbController> {
        self.thumbs.iter_mut().find(|thumb| thumb.axis() == axis)
    }

    /// Releases the thumbs, the observers and the sentinels.
    fn teardown(&mut self) {
        let host = self.host.as_ref();

        self.engine.cancel_all();

        for mut thumb in self.thumbs.drain(..) {
            thumb.destroy(host);
            host.remove_node(thumb.track());
        }

        self.sensor.disconnect();
        self.reached.disconnect(host);
        self.dropped.disconnect(host);
        self.last_offset = None;
    }
}

impl Drop for Scrollbar {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn with_duration(options: ScrollToOptions, duration: Option<Duration>) -> ScrollToOptions {
    ScrollToOptions {
        duration: duration.or(options.duration),
        ..options
    }
}
