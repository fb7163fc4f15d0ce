//! Animate the scroll offset of nodes over time.
//!
//! A [`SmoothScroll`] engine keeps at most one animation per node. Starting
//! a new animation on a node supersedes the previous one, which resolves its
//! [`ScrollTask`] as [`ScrollOutcome::Cancelled`] right away; the new one
//! starts from wherever the node currently is.
//!
//! The engine does not own a clock. Call [`SmoothScroll::tick`] on every
//! frame while [`SmoothScroll::is_animating`] returns true.
use crate::core::easing;
use crate::core::time::{Duration, Instant};
use crate::core::{
    AbsoluteOffset, Easing, LayoutDirection, Node, NodeId, NodeRef, ScrollToElementOptions,
    ScrollToOptions, Vector,
};

use futures::FutureExt;
use futures::channel::oneshot;
use rustc_hash::FxHashMap;

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// How a scroll animation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollOutcome {
    /// The node reached its target.
    Completed,
    /// The animation was superseded, interrupted or torn down.
    Cancelled,
}

/// A running scroll animation.
///
/// It resolves once the animation ends and never fails. Dropping it does
/// not stop the animation.
#[derive(Debug)]
#[must_use = "`ScrollTask` does nothing unless polled; drop it to ignore the outcome"]
pub struct ScrollTask {
    inner: Inner,
}

#[derive(Debug)]
enum Inner {
    Ready(ScrollOutcome),
    Pending(oneshot::Receiver<ScrollOutcome>),
}

impl ScrollTask {
    /// A [`ScrollTask`] that already completed.
    pub fn completed() -> Self {
        Self {
            inner: Inner::Ready(ScrollOutcome::Completed),
        }
    }

    /// A [`ScrollTask`] that was already cancelled.
    pub fn cancelled() -> Self {
        Self {
            inner: Inner::Ready(ScrollOutcome::Cancelled),
        }
    }

    fn pending(receiver: oneshot::Receiver<ScrollOutcome>) -> Self {
        Self {
            inner: Inner::Pending(receiver),
        }
    }
}

impl Future for ScrollTask {
    type Output = ScrollOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<ScrollOutcome> {
        match &mut self.inner {
            Inner::Ready(outcome) => Poll::Ready(*outcome),
            Inner::Pending(receiver) => receiver
                .poll_unpin(cx)
                .map(|outcome| outcome.unwrap_or(ScrollOutcome::Cancelled)),
        }
    }
}

struct ScrollAnimation {
    node: NodeRef,
    started_at: Instant,
    start: Vector,
    target: AbsoluteOffset<Option<f32>>,
    duration: Duration,
    easing: Easing,
    sender: oneshot::Sender<ScrollOutcome>,
}

impl ScrollAnimation {
    fn progress(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started_at);

        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    fn offset_at(&self, progress: f32) -> AbsoluteOffset<Option<f32>> {
        let eased = self.easing.apply(progress);

        AbsoluteOffset {
            x: self
                .target
                .x
                .map(|x| easing::interpolate(self.start.x, x, eased)),
            y: self
                .target
                .y
                .map(|y| easing::interpolate(self.start.y, y, eased)),
        }
    }
}

/// Drives smooth scrolling of any amount of nodes.
#[derive(Default)]
pub struct SmoothScroll {
    animations: FxHashMap<NodeId, ScrollAnimation>,
}

impl fmt::Debug for SmoothScroll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmoothScroll")
            .field("animating", &self.animations.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl SmoothScroll {
    /// Creates a new [`SmoothScroll`] engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scrolls `node` to the position described by `options`.
    ///
    /// Missing durations or zero durations jump right away.
    pub fn scroll_to(
        &mut self,
        node: &NodeRef,
        options: &ScrollToOptions,
        now: Instant,
    ) -> ScrollTask {
        let target = options.resolve(node.direction(), scroll_max(node.as_ref()));

        self.animate(
            node,
            target,
            options.duration.unwrap_or_default(),
            options.easing.unwrap_or_default(),
            now,
        )
    }

    /// Scrolls `node` by a physical `delta`.
    pub fn scroll_by(
        &mut self,
        node: &NodeRef,
        delta: Vector,
        duration: Duration,
        easing: Easing,
        now: Instant,
    ) -> ScrollTask {
        let offset = node.scroll_offset();
        let max = scroll_max(node.as_ref());
        let direction = node.direction();

        let target = AbsoluteOffset {
            x: (delta.x != 0.0).then(|| direction.clamp_physical(offset.x + delta.x, max.x)),
            y: (delta.y != 0.0).then(|| (offset.y + delta.y).clamp(0.0, max.y)),
        };

        self.animate(node, target, duration, easing, now)
    }

    /// Scrolls `node` until `target` is visible, aligned as `options`
    /// describe.
    pub fn scroll_to_element(
        &mut self,
        node: &NodeRef,
        target: &dyn Node,
        options: &ScrollToElementOptions,
        now: Instant,
    ) -> ScrollTask {
        let delta = options.delta(node.bounds(), target.bounds(), node.direction());

        self.scroll_by(
            node,
            delta,
            options.duration.unwrap_or_default(),
            options.easing.unwrap_or_default(),
            now,
        )
    }

    /// Animates `node` towards a physical `target`.
    ///
    /// Any animation already running on the node is cancelled first.
    pub fn animate(
        &mut self,
        node: &NodeRef,
        target: AbsoluteOffset<Option<f32>>,
        duration: Duration,
        easing: Easing,
        now: Instant,
    ) -> ScrollTask {
        let id = node.id();

        if self.interrupt(id) {
            log::trace!("Superseding scroll animation of {id}");
        }

        if target.x.is_none() && target.y.is_none() {
            return ScrollTask::completed();
        }

        if duration.is_zero() {
            node.set_scroll_offset(target);

            return ScrollTask::completed();
        }

        let (sender, receiver) = oneshot::channel();

        let _ = self.animations.insert(
            id,
            ScrollAnimation {
                node: node.clone(),
                started_at: now,
                start: node.scroll_offset(),
                target,
                duration,
                easing,
                sender,
            },
        );

        ScrollTask::pending(receiver)
    }

    /// Advances every animation to `now`.
    ///
    /// Returns true if any animation is still running.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut finished = Vec::new();

        for (id, animation) in &self.animations {
            if !animation.node.is_connected() {
                log::debug!("{id} left the tree while animating");
                finished.push((*id, ScrollOutcome::Cancelled));
                continue;
            }

            let progress = animation.progress(now);

            if progress >= 1.0 {
                animation.node.set_scroll_offset(animation.target);
                finished.push((*id, ScrollOutcome::Completed));
            } else {
                animation
                    .node
                    .set_scroll_offset(animation.offset_at(progress));
            }
        }

        for (id, outcome) in finished {
            if let Some(animation) = self.animations.remove(&id) {
                let _ = animation.sender.send(outcome);
            }
        }

        !self.animations.is_empty()
    }

    /// Stops the animation of a node where it is, as a user gesture would.
    ///
    /// Returns true if an animation was running.
    pub fn interrupt(&mut self, node: NodeId) -> bool {
        match self.animations.remove(&node) {
            Some(animation) => {
                let _ = animation.sender.send(ScrollOutcome::Cancelled);
                true
            }
            None => false,
        }
    }

    /// Cancels every running animation.
    pub fn cancel_all(&mut self) {
        for (_, animation) in self.animations.drain() {
            let _ = animation.sender.send(ScrollOutcome::Cancelled);
        }
    }

    /// Returns true if any node is animating.
    pub fn is_animating(&self) -> bool {
        !self.animations.is_empty()
    }

    /// Returns true if the given node is animating.
    pub fn is_node_animating(&self, node: NodeId) -> bool {
        self.animations.contains_key(&node)
    }
}

/// Returns the maximum physical scroll distance of a node along each axis.
pub fn scroll_max(node: &dyn Node) -> Vector {
    let client = node.client_size();
    let content = node.scroll_size();

    Vector::new(
        (content.width - client.width).max(0.0),
        (content.height - client.height).max(0.0),
    )
}

/// Returns the logical, start-based scroll offset of a node.
pub fn logical_offset(node: &dyn Node) -> AbsoluteOffset {
    let physical = node.scroll_offset();
    let max = scroll_max(node);
    let direction: LayoutDirection = node.direction();

    AbsoluteOffset {
        x: direction.to_logical(physical.x, max.x).clamp(0.0, max.x),
        y: physical.y.clamp(0.0, max.y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Size;
    use crate::core::time::milliseconds;

    use icy_scroll_test::Dom;

    fn setup() -> (Dom, NodeRef) {
        let dom = Dom::new();
        let (viewport, _) = dom.viewport("#v", Size::new(100.0, 100.0), Size::new(300.0, 1_000.0));

        (dom, viewport)
    }

    #[test]
    fn animations_land_exactly_on_target() {
        let (_dom, viewport) = setup();
        let mut engine = SmoothScroll::new();
        let start = Instant::now();

        let mut task = engine.scroll_to(
            &viewport,
            &ScrollToOptions::new()
                .top(500.0)
                .duration(milliseconds(300))
                .easing(Easing::EaseOutCubic),
            start,
        );

        assert!(engine.tick(start + milliseconds(100)));
        assert!((&mut task).now_or_never().is_none());

        let halfway = viewport.scroll_offset().y;
        assert!(halfway > 0.0 && halfway < 500.0);

        assert!(!engine.tick(start + milliseconds(301)));
        assert_eq!(viewport.scroll_offset().y, 500.0);
        assert_eq!(task.now_or_never(), Some(ScrollOutcome::Completed));
    }

    #[test]
    fn new_animations_supersede_old_ones() {
        let (_dom, viewport) = setup();
        let mut engine = SmoothScroll::new();
        let start = Instant::now();
        let duration = milliseconds(200);

        let first = engine.scroll_to(
            &viewport,
            &ScrollToOptions::new().top(800.0).duration(duration),
            start,
        );

        let _ = engine.tick(start + milliseconds(100));
        let interrupted_at = viewport.scroll_offset().y;

        let second = engine.scroll_to(
            &viewport,
            &ScrollToOptions::new().top(100.0).duration(duration),
            start + milliseconds(100),
        );

        assert_eq!(first.now_or_never(), Some(ScrollOutcome::Cancelled));

        // The new animation starts where the old one was interrupted
        let _ = engine.tick(start + milliseconds(101));
        let offset = viewport.scroll_offset().y;
        assert!((offset - interrupted_at).abs() < 5.0);

        let _ = engine.tick(start + milliseconds(300));
        assert_eq!(viewport.scroll_offset().y, 100.0);
        assert_eq!(second.now_or_never(), Some(ScrollOutcome::Completed));
    }

    #[test]
    fn zero_duration_jumps_right_away() {
        let (_dom, viewport) = setup();
        let mut engine = SmoothScroll::new();

        let task = engine.scroll_to(
            &viewport,
            &ScrollToOptions::new().top(42.0),
            Instant::now(),
        );

        assert_eq!(viewport.scroll_offset().y, 42.0);
        assert!(!engine.is_animating());
        assert_eq!(task.now_or_never(), Some(ScrollOutcome::Completed));
    }

    #[test]
    fn interruptions_stop_in_place() {
        let (_dom, viewport) = setup();
        let mut engine = SmoothScroll::new();
        let start = Instant::now();

        let task = engine.scroll_to(
            &viewport,
            &ScrollToOptions::new()
                .top(1_000.0)
                .duration(milliseconds(100)),
            start,
        );

        let _ = engine.tick(start + milliseconds(50));
        let offset = viewport.scroll_offset().y;

        assert!(engine.interrupt(viewport.id()));
        assert!(!engine.interrupt(viewport.id()));
        assert!(!engine.tick(start + milliseconds(200)));

        assert_eq!(viewport.scroll_offset().y, offset);
        assert_eq!(task.now_or_never(), Some(ScrollOutcome::Cancelled));
    }

    #[test]
    fn nodes_animate_independently() {
        let dom = Dom::new();
        let (first, _) = dom.viewport("#a", Size::new(100.0, 100.0), Size::new(100.0, 500.0));
        let (second, _) = dom.viewport("#b", Size::new(100.0, 100.0), Size::new(100.0, 500.0));

        let mut engine = SmoothScroll::new();
        let start = Instant::now();

        let a = engine.scroll_to(
            &first,
            &ScrollToOptions::new().top(400.0).duration(milliseconds(100)),
            start,
        );
        let b = engine.scroll_to(
            &second,
            &ScrollToOptions::new().top(200.0).duration(milliseconds(300)),
            start,
        );

        assert!(engine.tick(start + milliseconds(150)));
        assert_eq!(first.scroll_offset().y, 400.0);
        assert!(engine.is_node_animating(second.id()));

        engine.cancel_all();

        assert_eq!(a.now_or_never(), Some(ScrollOutcome::Completed));
        assert_eq!(b.now_or_never(), Some(ScrollOutcome::Cancelled));
        assert!(!engine.is_animating());
    }

    #[test]
    fn scroll_by_is_relative_and_clamped() {
        let (_dom, viewport) = setup();
        let mut engine = SmoothScroll::new();
        let now = Instant::now();

        let _ = engine.scroll_by(
            &viewport,
            Vector::new(50.0, 950.0),
            Duration::ZERO,
            Easing::Linear,
            now,
        );

        assert_eq!(viewport.scroll_offset(), Vector::new(50.0, 900.0));

        let _ = engine.scroll_by(
            &viewport,
            Vector::new(-80.0, 0.0),
            Duration::ZERO,
            Easing::Linear,
            now,
        );

        assert_eq!(viewport.scroll_offset(), Vector::new(0.0, 900.0));
    }

    #[test]
    fn detached_nodes_cancel_their_animation() {
        let (dom, viewport) = setup();
        let mut engine = SmoothScroll::new();
        let start = Instant::now();

        let task = engine.scroll_to(
            &viewport,
            &ScrollToOptions::new().top(500.0).duration(milliseconds(100)),
            start,
        );

        dom.detach(viewport.id());

        assert!(!engine.tick(start + milliseconds(10)));
        assert_eq!(task.now_or_never(), Some(ScrollOutcome::Cancelled));
    }

    #[test]
    fn logical_offsets_ignore_direction() {
        let (dom, viewport) = setup();
        dom.set_direction(viewport.id(), LayoutDirection::Rtl);

        let mut engine = SmoothScroll::new();
        let _ = engine.scroll_to(
            &viewport,
            &ScrollToOptions::new().start(60.0),
            Instant::now(),
        );

        assert_eq!(viewport.scroll_offset().x, -60.0);
        assert_eq!(logical_offset(viewport.as_ref()).x, 60.0);
    }
}
