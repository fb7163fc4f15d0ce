//! Schedule the next frame of a scrollbar.
use crate::time::Instant;

/// A request to wake the scrollbar up again.
///
/// The host answers a request with an [`Event::Frame`](crate::Event::Frame)
/// carrying the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RedrawRequest {
    /// Wake up on the next frame, e.g. while an animation is running.
    NextFrame,

    /// Wake up at the given [`Instant`], e.g. when a debounce timer expires.
    At(Instant),

    /// Nothing to do until the next event.
    Wait,
}

impl From<Instant> for RedrawRequest {
    fn from(time: Instant) -> Self {
        Self::At(time)
    }
}
