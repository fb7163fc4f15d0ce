//! Compute the geometry of a scrollbar thumb.
//!
//! All functions work along a single axis using logical coordinates that
//! grow from the start of the track. Right-to-left mirroring happens in the
//! layers above.
//!
//! Degenerate inputs (non-finite values, zero-length tracks or contents that
//! do not overflow) always produce `0.0` instead of `NaN`.

/// The size of a thumb, as computed by [`thumb_size`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ThumbSize {
    /// The rendered size of the thumb.
    pub size: f32,
    /// The maximum scroll offset of the axis.
    pub scroll_max: f32,
    /// The proportional size of the thumb before applying the minimum.
    pub natural_size: f32,
}

/// Computes the size of a thumb inside a track of `track` length for a
/// viewport of `viewport` length showing content of `content` length.
///
/// The natural size is proportional to the visible share of the content.
/// It is raised to `min_size` when smaller, and collapses to `0.0` when the
/// axis cannot scroll at all. The result never exceeds the track.
pub fn thumb_size(track: f32, viewport: f32, content: f32, min_size: f32) -> ThumbSize {
    let track = sanitize(track);
    let viewport = sanitize(viewport);
    let content = sanitize(content);
    let min_size = sanitize(min_size);

    let natural_size = if content > 0.0 {
        track * (viewport / content)
    } else {
        track
    };

    let scroll_max = (content - viewport).max(0.0);

    let size = if scroll_max == 0.0 {
        0.0
    } else if natural_size < min_size {
        min_size
    } else {
        natural_size
    };

    ThumbSize {
        size: size.min(track),
        scroll_max,
        natural_size,
    }
}

/// Maps a scroll `offset` to the position of the thumb along a track where
/// the thumb can travel `track_max` pixels.
pub fn thumb_position(offset: f32, track_max: f32, scroll_max: f32) -> f32 {
    let track_max = sanitize(track_max);
    let scroll_max = sanitize(scroll_max);

    if scroll_max == 0.0 || track_max == 0.0 {
        return 0.0;
    }

    (sanitize(offset) * track_max / scroll_max).clamp(0.0, track_max)
}

/// Computes the scroll offset targeted by a click at `click` pixels from the
/// start of a track of `track` length.
///
/// The click lands on the center of a thumb of `natural_size`; the result is
/// mapped proportionally onto the content and clamped to `[0, scroll_max]`.
pub fn scroll_from_track_click(
    click: f32,
    track: f32,
    natural_size: f32,
    content: f32,
    scroll_max: f32,
) -> f32 {
    let track = sanitize(track);

    if track == 0.0 {
        return 0.0;
    }

    let thumb_start = sanitize(click) - sanitize(natural_size) / 2.0;

    (thumb_start / track * sanitize(content)).clamp(0.0, sanitize(scroll_max))
}

/// Computes the scroll offset for a thumb dragged `delta` pixels away from
/// the start of its track.
pub fn scroll_from_drag(delta: f32, track_max: f32, scroll_max: f32) -> f32 {
    let track_max = sanitize(track_max);
    let scroll_max = sanitize(scroll_max);

    if track_max == 0.0 || !delta.is_finite() {
        return 0.0;
    }

    (scroll_max * delta / track_max).clamp(0.0, scroll_max)
}

/// The complete geometry of a thumb along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ThumbGeometry {
    /// The rendered size of the thumb. `0.0` hides it.
    pub size: f32,
    /// The position of the thumb from the start of the track.
    pub position: f32,
    /// The distance the thumb can travel along the track.
    pub track_max: f32,
    /// The proportional size of the thumb before applying the minimum.
    pub natural_size: f32,
    /// The maximum scroll offset of the axis.
    pub scroll_max: f32,
}

impl ThumbGeometry {
    /// The geometry of a hidden thumb.
    pub const HIDDEN: Self = Self {
        size: 0.0,
        position: 0.0,
        track_max: 0.0,
        natural_size: 0.0,
        scroll_max: 0.0,
    };

    /// Computes the [`ThumbGeometry`] of a thumb.
    pub fn compute(track: f32, viewport: f32, content: f32, offset: f32, min_size: f32) -> Self {
        let ThumbSize {
            size,
            scroll_max,
            natural_size,
        } = thumb_size(track, viewport, content, min_size);

        let track_max = (sanitize(track) - size).max(0.0);

        Self {
            size,
            position: thumb_position(offset, track_max, scroll_max),
            track_max,
            natural_size,
            scroll_max,
        }
    }

    /// Returns true if the thumb is visible.
    pub fn is_visible(&self) -> bool {
        self.size > 0.0
    }
}

fn sanitize(value: f32) -> f32 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}
