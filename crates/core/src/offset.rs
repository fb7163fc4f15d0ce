//! Describe where a scrollable node should scroll to.
use crate::time::Duration;
use crate::{Easing, LayoutDirection, Rectangle, Vector};

/// The amount of absolute offset in each direction of a scrollable node.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbsoluteOffset<T = f32> {
    /// The amount of horizontal offset
    pub x: T,
    /// The amount of vertical offset
    pub y: T,
}

/// A request to scroll a node to a position.
///
/// Offsets may be given in physical (`top`, `left`, `bottom`, `right`) or
/// logical (`start`, `end`) terms; they are measured from the named edge of
/// the content. When several horizontal offsets are set, `left` wins over
/// `right`, which wins over `start`, which wins over `end`. Likewise `top`
/// wins over `bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollToOptions {
    /// Distance from the top of the content.
    pub top: Option<f32>,
    /// Distance from the bottom of the content.
    pub bottom: Option<f32>,
    /// Distance from the left of the content.
    pub left: Option<f32>,
    /// Distance from the right of the content.
    pub right: Option<f32>,
    /// Distance from the start of the content (left in LTR, right in RTL).
    pub start: Option<f32>,
    /// Distance from the end of the content (right in LTR, left in RTL).
    pub end: Option<f32>,
    /// The duration of the animation. `None` means the caller's default.
    pub duration: Option<Duration>,
    /// The easing of the animation. `None` means the caller's default.
    pub easing: Option<Easing>,
}

impl ScrollToOptions {
    /// Creates empty [`ScrollToOptions`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the distance from the top of the content.
    pub fn top(mut self, top: f32) -> Self {
        self.top = Some(top);
        self
    }

    /// Sets the distance from the bottom of the content.
    pub fn bottom(mut self, bottom: f32) -> Self {
        self.bottom = Some(bottom);
        self
    }

    /// Sets the distance from the left of the content.
    pub fn left(mut self, left: f32) -> Self {
        self.left = Some(left);
        self
    }

    /// Sets the distance from the right of the content.
    pub fn right(mut self, right: f32) -> Self {
        self.right = Some(right);
        self
    }

    /// Sets the distance from the start of the content.
    pub fn start(mut self, start: f32) -> Self {
        self.start = Some(start);
        self
    }

    /// Sets the distance from the end of the content.
    pub fn end(mut self, end: f32) -> Self {
        self.end = Some(end);
        self
    }

    /// Sets the duration of the animation.
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Sets the [`Easing`] of the animation.
    pub fn easing(mut self, easing: impl Into<Easing>) -> Self {
        self.easing = Some(easing.into());
        self
    }

    /// Resolves the options into the physical scroll offset of a node with
    /// the given direction and scroll maxima.
    ///
    /// Axes without any offset stay `None`.
    pub fn resolve(
        &self,
        direction: LayoutDirection,
        scroll_max: Vector,
    ) -> AbsoluteOffset<Option<f32>> {
        let max_x = scroll_max.x.max(0.0);
        let max_y = scroll_max.y.max(0.0);

        let y = self
            .top
            .or_else(|| self.bottom.map(|bottom| max_y - bottom))
            .map(|top| top.clamp(0.0, max_y));

        let x = if let Some(left) = self.left {
            Some(direction.left_to_physical(left, max_x))
        } else if let Some(right) = self.right {
            Some(direction.left_to_physical(max_x - right, max_x))
        } else if let Some(start) = self.start {
            Some(direction.to_physical(start, max_x))
        } else {
            self.end
                .map(|end| direction.to_physical(max_x - end, max_x))
        };

        AbsoluteOffset { x, y }
    }
}

/// The alignment of a target inside the viewport after scrolling to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    /// Align the start edges of the target and the viewport.
    #[default]
    Start,
    /// Center the target in the viewport.
    Center,
    /// Scroll the minimum amount needed to make the target visible.
    Nearest,
}

/// A request to scroll a node until a target becomes visible.
///
/// With [`Align::Start`], the paddings pick the viewport edge the target is
/// aligned to. Vertically, `top` wins over `bottom`. Horizontally, the
/// physical `left` and `right` win over the logical `start` and `end`. With
/// no padding set, the target is aligned to the top and start edges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollToElementOptions {
    /// Space kept between the top of the viewport and the target.
    pub top: Option<f32>,
    /// Space kept between the bottom of the viewport and the target.
    pub bottom: Option<f32>,
    /// Space kept between the left of the viewport and the target.
    pub left: Option<f32>,
    /// Space kept between the right of the viewport and the target.
    pub right: Option<f32>,
    /// Space kept between the start of the viewport and the target.
    pub start: Option<f32>,
    /// Space kept between the end of the viewport and the target.
    pub end: Option<f32>,
    /// How the target is aligned.
    pub align: Align,
    /// The duration of the animation. `None` means the caller's default.
    pub duration: Option<Duration>,
    /// The easing of the animation. `None` means the caller's default.
    pub easing: Option<Easing>,
}

impl ScrollToElementOptions {
    /// Creates default [`ScrollToElementOptions`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the space kept above the target.
    pub fn top(mut self, top: f32) -> Self {
        self.top = Some(top);
        self
    }

    /// Sets the space kept below the target.
    pub fn bottom(mut self, bottom: f32) -> Self {
        self.bottom = Some(bottom);
        self
    }

    /// Sets the space kept left of the target.
    pub fn left(mut self, left: f32) -> Self {
        self.left = Some(left);
        self
    }

    /// Sets the space kept right of the target.
    pub fn right(mut self, right: f32) -> Self {
        self.right = Some(right);
        self
    }

    /// Sets the space kept before the target.
    pub fn start(mut self, start: f32) -> Self {
        self.start = Some(start);
        self
    }

    /// Sets the space kept after the target.
    pub fn end(mut self, end: f32) -> Self {
        self.end = Some(end);
        self
    }

    /// Centers the target in the viewport.
    pub fn center(mut self) -> Self {
        self.align = Align::Center;
        self
    }

    /// Sets the [`Align`]ment of the target.
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Sets the duration of the animation.
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Sets the [`Easing`] of the animation.
    pub fn easing(mut self, easing: impl Into<Easing>) -> Self {
        self.easing = Some(easing.into());
        self
    }

    /// Computes the physical scroll delta that brings `target` into the
    /// viewport.
    ///
    /// Both rectangles are in the same coordinate space, e.g. the bounding
    /// rectangles reported by the host.
    pub fn delta(
        &self,
        viewport: Rectangle,
        target: Rectangle,
        direction: LayoutDirection,
    ) -> Vector {
        match self.align {
            Align::Start => {
                let y = match (self.top, self.bottom) {
                    (None, Some(bottom)) => {
                        (target.y + target.height) - (viewport.y + viewport.height) + bottom
                    }
                    (top, _) => target.y - viewport.y - top.unwrap_or(0.0),
                };

                let is_ltr = direction == LayoutDirection::Ltr;

                let (to_left, padding) = match (self.left, self.right, self.start, self.end) {
                    (Some(left), _, _, _) => (true, left),
                    (None, Some(right), _, _) => (false, right),
                    (None, None, None, Some(end)) => (!is_ltr, end),
                    (None, None, start, _) => (is_ltr, start.unwrap_or(0.0)),
                };

                let x = if to_left {
                    target.x - viewport.x - padding
                } else {
                    (target.x + target.width) - (viewport.x + viewport.width) + padding
                };

                Vector::new(x, y)
            }
            Align::Center => {
                let target = target.center();
                let viewport = viewport.center();

                Vector::new(target.x - viewport.x, target.y - viewport.y)
            }
            Align::Nearest => compute_visible_delta(viewport, target),
        }
    }
}

/// Computes the scroll delta needed to make `target` visible within `viewport`.
fn compute_visible_delta(viewport: Rectangle, target: Rectangle) -> Vector {
    let mut delta = Vector::ZERO;

    if target.y < viewport.y {
        delta.y = target.y - viewport.y;
    } else if target.y + target.height > viewport.y + viewport.height {
        delta.y = (target.y + target.height) - (viewport.y + viewport.height);
    }

    if target.x < viewport.x {
        delta.x = target.x - viewport.x;
    } else if target.x + target.width > viewport.x + viewport.width {
        delta.x = (target.x + target.width) - (viewport.x + viewport.width);
    }

    delta
}
