//! Render a thumb and turn pointer gestures into scroll offsets.
use crate::core::thumb::{ThumbGeometry, scroll_from_drag, scroll_from_track_click};
use crate::core::{Axis, Host, LayoutDirection, NodeId, NodeRef, ObserverHandle, Point};
use crate::viewport::ViewportMeasurement;

/// What a pointer gesture asks the viewport to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Nothing.
    None,
    /// Jump to a logical offset right away.
    Direct(f32),
    /// Scroll smoothly to a logical offset.
    Animate(f32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Drag {
    Idle,
    Dragging {
        /// The distance between the pointer and the start of the thumb.
        grabbed_at: f32,
        /// The span of the track when the drag started.
        track: (f32, f32),
    },
}

/// The thumb of a scrollbar along one axis.
pub struct ThumbController {
    axis: Axis,
    track: NodeRef,
    thumb: NodeRef,
    geometry: ThumbGeometry,
    content: f32,
    direction: LayoutDirection,
    rendered: Option<(f32, f32)>,
    drag: Drag,
    listener: ObserverHandle,
}

impl std::fmt::Debug for ThumbController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThumbController")
            .field("axis", &self.axis)
            .field("track", &self.track.id())
            .field("thumb", &self.thumb.id())
            .field("geometry", &self.geometry)
            .field("drag", &self.drag)
            .finish_non_exhaustive()
    }
}

impl ThumbController {
    /// Attaches a controller to the track and the thumb of an axis.
    pub fn new(axis: Axis, track: NodeRef, thumb: NodeRef) -> Self {
        Self {
            axis,
            track,
            thumb,
            geometry: ThumbGeometry::HIDDEN,
            content: 0.0,
            direction: LayoutDirection::Ltr,
            rendered: None,
            drag: Drag::Idle,
            listener: ObserverHandle::none(),
        }
    }

    /// Returns the [`Axis`] of the controller.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Returns the id of the track node.
    pub fn track(&self) -> NodeId {
        self.track.id()
    }

    /// Returns the latest [`ThumbGeometry`].
    pub fn geometry(&self) -> ThumbGeometry {
        self.geometry
    }

    /// Returns true while the thumb is dragged.
    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, Drag::Dragging { .. })
    }

    /// Recomputes the geometry from a measurement and renders the thumb if
    /// it changed.
    ///
    /// An ongoing drag keeps the track span it started with.
    pub fn update(&mut self, measurement: &ViewportMeasurement, min_size: f32) -> ThumbGeometry {
        let axis = self.axis;
        let track = axis.length(self.track.client_size());

        self.content = axis.length(measurement.content);
        self.direction = measurement.direction;
        self.geometry = ThumbGeometry::compute(
            track,
            axis.length(measurement.client),
            self.content,
            axis.offset(measurement.offset),
            min_size,
        );

        let offset = if self.is_mirrored() {
            self.geometry.track_max - self.geometry.position
        } else {
            self.geometry.position
        };

        let rendered = (self.geometry.size, offset);

        if self.rendered != Some(rendered) {
            self.thumb.set_thumb(axis, rendered.0, rendered.1);
            self.rendered = Some(rendered);
        }

        self.geometry
    }

    /// Handles a press on the thumb.
    ///
    /// Text selection is disabled and document-wide pointer events are
    /// requested until the drag ends.
    pub fn press_thumb(&mut self, host: &dyn Host, position: Point) -> Gesture {
        if !self.geometry.is_visible() {
            return Gesture::None;
        }

        let track = self.axis.span(self.track.bounds());
        let pointer = self.pointer(position, track);

        self.drag = Drag::Dragging {
            grabbed_at: pointer - self.geometry.position,
            track,
        };

        host.set_text_selection(false);
        self.listener = host.listen_pointer();

        log::trace!("Started dragging {:?} thumb", self.axis);

        Gesture::None
    }

    /// Handles a press on the track, outside of the thumb.
    pub fn press_track(&self, position: Point) -> Gesture {
        if !self.geometry.is_visible() {
            return Gesture::None;
        }

        let track = self.axis.span(self.track.bounds());

        Gesture::Animate(scroll_from_track_click(
            self.pointer(position, track),
            track.1,
            self.geometry.natural_size,
            self.content,
            self.geometry.scroll_max,
        ))
    }

    /// Handles a pointer move.
    pub fn move_pointer(&self, position: Point) -> Gesture {
        match self.drag {
            Drag::Idle => Gesture::None,
            Drag::Dragging { grabbed_at, track } => {
                let delta = self.pointer(position, track) - grabbed_at;

                Gesture::Direct(scroll_from_drag(
                    delta,
                    self.geometry.track_max,
                    self.geometry.scroll_max,
                ))
            }
        }
    }

    /// Handles a pointer release, ending any drag.
    pub fn release(&mut self, host: &dyn Host) {
        if self.is_dragging() {
            log::trace!("Stopped dragging {:?} thumb", self.axis);

            self.drag = Drag::Idle;
            self.listener.disconnect();
            host.set_text_selection(true);
        }
    }

    /// Ends any drag and forgets what was rendered.
    pub fn destroy(&mut self, host: &dyn Host) {
        self.release(host);
        self.rendered = None;
    }

    fn is_mirrored(&self) -> bool {
        self.axis == Axis::X && self.direction.is_rtl()
    }

    /// Returns the distance between the pointer and the start of a track.
    fn pointer(&self, position: Point, (start, length): (f32, f32)) -> f32 {
        let coordinate = self.axis.coordinate(position);

        if self.is_mirrored() {
            start + length - coordinate
        } else {
            coordinate - start
        }
    }
}
