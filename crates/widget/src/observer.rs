//! Observe content changes and schedule measurements.
use crate::core::time::{Duration, Instant};
use crate::core::{Host, NodeId, ObserverHandle};

/// When a change triggers a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Schedule {
    /// Right away.
    #[default]
    Immediate,
    /// Right away, then at most once per interval.
    Throttle(Duration),
    /// Once changes stop for an interval.
    Debounce(Duration),
}

impl Schedule {
    /// Picks a [`Schedule`] from optional intervals. Zero intervals are
    /// immediate.
    pub fn new(debounce: Option<Duration>, throttle: Option<Duration>) -> Self {
        match (debounce, throttle) {
            (Some(interval), _) if !interval.is_zero() => Schedule::Debounce(interval),
            (_, Some(interval)) if !interval.is_zero() => Schedule::Throttle(interval),
            _ => Schedule::Immediate,
        }
    }
}

/// Watches the viewport and its content for size and subtree changes.
#[derive(Debug, Default)]
pub struct ContentObserver {
    schedule: Schedule,
    watched: Vec<NodeId>,
    handles: Vec<ObserverHandle>,
    last_run: Option<Instant>,
    pending: Option<Instant>,
}

impl ContentObserver {
    /// Creates a new [`ContentObserver`] with the given [`Schedule`].
    pub fn new(schedule: Schedule) -> Self {
        Self {
            schedule,
            ..Self::default()
        }
    }

    /// Starts observing a viewport and its content.
    pub fn observe(&mut self, host: &dyn Host, viewport: NodeId, content: NodeId) {
        self.disconnect();

        self.handles.push(host.observe_resize(viewport));

        if content != viewport {
            self.handles.push(host.observe_resize(content));
        }

        self.handles.push(host.observe_mutations(content));
        self.watched = vec![viewport, content];
    }

    /// Stops observing and drops any pending measurement.
    pub fn disconnect(&mut self) {
        for mut handle in self.handles.drain(..) {
            handle.disconnect();
        }

        self.watched.clear();
        self.last_run = None;
        self.pending = None;
    }

    /// Returns true if changes of the node are observed.
    pub fn is_observing(&self, node: NodeId) -> bool {
        self.watched.contains(&node)
    }

    /// Records a change. Returns true if a measurement should run now.
    pub fn notify(&mut self, now: Instant) -> bool {
        match self.schedule {
            Schedule::Immediate => true,
            Schedule::Throttle(interval) => match self.last_run {
                Some(last_run) if now < last_run + interval => {
                    self.pending = Some(last_run + interval);
                    false
                }
                _ => {
                    self.last_run = Some(now);
                    true
                }
            },
            Schedule::Debounce(interval) => {
                self.pending = Some(now + interval);
                false
            }
        }
    }

    /// Returns true if a scheduled measurement is due.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(deadline) if now >= deadline => {
                self.pending = None;
                self.last_run = Some(now);
                true
            }
            _ => false,
        }
    }

    /// Returns when the next scheduled measurement is due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending
    }
}
