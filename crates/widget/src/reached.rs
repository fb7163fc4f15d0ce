//! Detect when the viewport reaches or leaves its edges.
//!
//! Sentinels are placed inside the content, a few pixels away from each
//! edge, and observed against the viewport. The host reports the initial
//! state of every sentinel as soon as it is observed; that first report is
//! discarded, so nothing fires on startup. Hosts that stay silent arm their
//! triggers after a timeout instead.
use crate::core::time::{Duration, Instant};
use crate::core::{Edge, Edges, Host, NodeId, ObserverHandle};
use crate::settings::EdgeMode;
use crate::viewport::ViewportMeasurement;

/// What a detector reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Edges coming within the threshold.
    Reached,
    /// Edges going beyond the threshold.
    Dropped,
}

#[derive(Debug)]
struct Trigger {
    edge: Edge,
    sentinel: Option<NodeId>,
    armed: bool,
    deadline: Instant,
    is_active: Option<bool>,
    handle: ObserverHandle,
}

impl Trigger {
    fn fire(&mut self, kind: Kind, is_within: bool) -> bool {
        let is_active = match kind {
            Kind::Reached => is_within,
            Kind::Dropped => !is_within,
        };

        let previous = self.is_active.replace(is_active);

        is_active && previous != Some(true)
    }
}

/// Publishes the reached or dropped edges of a viewport.
#[derive(Debug)]
pub struct EdgeDetector {
    kind: Kind,
    offset: f32,
    mode: EdgeMode,
    arm_timeout: Duration,
    triggers: Vec<Trigger>,
}

impl EdgeDetector {
    /// Creates a new [`EdgeDetector`].
    pub fn new(kind: Kind, offset: f32, mode: EdgeMode, arm_timeout: Duration) -> Self {
        Self {
            kind,
            offset,
            mode,
            arm_timeout,
            triggers: Vec::new(),
        }
    }

    /// Starts watching the given edges, replacing the previous ones.
    pub fn observe(
        &mut self,
        host: &dyn Host,
        viewport: NodeId,
        content: NodeId,
        edges: Edges,
        now: Instant,
    ) {
        self.disconnect(host);

        for edge in edges.edges() {
            let (sentinel, handle) = match self.mode {
                EdgeMode::Sentinel => {
                    let sentinel = host.create_sentinel(content, edge, self.offset);

                    (
                        Some(sentinel),
                        host.observe_intersection(sentinel, viewport),
                    )
                }
                EdgeMode::Position => (None, ObserverHandle::none()),
            };

            self.triggers.push(Trigger {
                edge,
                sentinel,
                armed: false,
                deadline: now + self.arm_timeout,
                is_active: None,
                handle,
            });
        }

        log::trace!(
            "Observing {:?} edges {edges:?} with {:?}",
            self.kind,
            self.mode
        );
    }

    /// Stops watching, removing every sentinel.
    pub fn disconnect(&mut self, host: &dyn Host) {
        for mut trigger in self.triggers.drain(..) {
            trigger.handle.disconnect();

            if let Some(sentinel) = trigger.sentinel {
                host.remove_node(sentinel);
            }
        }
    }

    /// Returns true if any edge is watched.
    pub fn is_active(&self) -> bool {
        !self.triggers.is_empty()
    }

    /// Handles an intersection report of a sentinel.
    ///
    /// Edges along axes that cannot scroll never fire.
    pub fn intersection(
        &mut self,
        sentinel: NodeId,
        is_intersecting: bool,
        measurement: &ViewportMeasurement,
    ) -> Option<Edge> {
        let kind = self.kind;

        let trigger = self
            .triggers
            .iter_mut()
            .find(|trigger| trigger.sentinel == Some(sentinel))?;

        if !trigger.armed {
            trigger.armed = true;
            trigger.is_active = Some(match kind {
                Kind::Reached => is_intersecting,
                Kind::Dropped => !is_intersecting,
            });

            return None;
        }

        let fired = trigger.fire(kind, is_intersecting);

        (fired && measurement.is_scrollable(trigger.edge.axis())).then_some(trigger.edge)
    }

    /// Compares a measurement against the thresholds. Only used with
    /// [`EdgeMode::Position`].
    pub fn measure(&mut self, measurement: &ViewportMeasurement) -> Vec<Edge> {
        if self.mode != EdgeMode::Position {
            return Vec::new();
        }

        let (kind, offset) = (self.kind, self.offset);
        let mut edges = Vec::new();

        for trigger in &mut self.triggers {
            let axis = trigger.edge.axis();
            let is_within = is_within(trigger.edge, measurement, offset);

            if !trigger.armed {
                trigger.armed = true;
                let _ = trigger.fire(kind, is_within);
                continue;
            }

            if trigger.fire(kind, is_within) && measurement.is_scrollable(axis) {
                edges.push(trigger.edge);
            }
        }

        edges
    }

    /// Arms the triggers whose first report is overdue.
    ///
    /// Their state is seeded from the measurement, so a late first report
    /// that agrees with it does not fire.
    pub fn tick(&mut self, now: Instant, measurement: &ViewportMeasurement) {
        if self.mode != EdgeMode::Sentinel {
            return;
        }

        let (kind, offset) = (self.kind, self.offset);

        for trigger in &mut self.triggers {
            if !trigger.armed && now >= trigger.deadline {
                log::debug!("Arming {:?} sentinel without a report", trigger.edge);

                trigger.armed = true;
                let _ = trigger.fire(kind, is_within(trigger.edge, measurement, offset));
            }
        }
    }

    /// Returns when the next overdue trigger should be armed.
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.mode != EdgeMode::Sentinel {
            return None;
        }

        self.triggers
            .iter()
            .filter(|trigger| !trigger.armed)
            .map(|trigger| trigger.deadline)
            .min()
    }
}

fn is_within(edge: Edge, measurement: &ViewportMeasurement, offset: f32) -> bool {
    let axis = edge.axis();

    edge.distance(axis.offset(measurement.offset), measurement.scroll_max(axis)) <= offset
}
