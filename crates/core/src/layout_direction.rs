//! Layout direction support for RTL (right-to-left) content.
//!
//! A scrollable node reports its horizontal scroll offset in physical
//! coordinates. Following the behavior of current browsers, a right-to-left
//! node starts at `0` and scrolls towards negative values:
//!
//! | Direction | Start of content | End of content |
//! |-----------|------------------|----------------|
//! | LTR       | `0`              | `max`          |
//! | RTL       | `0`              | `-max`         |
//!
//! The geometry model only ever works with the logical, start-based offset
//! in `[0, max]`. [`LayoutDirection`] converts between both worlds.

/// The direction of the layout flow.
///
/// This determines whether the layout flows from left-to-right (LTR)
/// or right-to-left (RTL).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum LayoutDirection {
    /// Left-to-right layout (default for most Western languages).
    #[default]
    Ltr = 0,
    /// Right-to-left layout (for Arabic, Hebrew, etc.).
    Rtl = 1,
}

impl LayoutDirection {
    /// Returns `true` if the layout direction is right-to-left.
    pub fn is_rtl(self) -> bool {
        matches!(self, Self::Rtl)
    }

    /// Converts a logical offset, measured from the start of the content,
    /// into the physical horizontal scroll offset of a node.
    pub fn to_physical(self, logical: f32, scroll_max: f32) -> f32 {
        let logical = logical.clamp(0.0, scroll_max.max(0.0));

        match self {
            Self::Ltr => logical,
            Self::Rtl if logical == 0.0 => 0.0,
            Self::Rtl => -logical,
        }
    }

    /// Converts the physical horizontal scroll offset of a node into a
    /// logical offset measured from the start of the content.
    pub fn to_logical(self, physical: f32, scroll_max: f32) -> f32 {
        let scroll_max = scroll_max.max(0.0);

        match self {
            Self::Ltr => physical.clamp(0.0, scroll_max),
            Self::Rtl => (-physical).clamp(0.0, scroll_max),
        }
    }

    /// Converts a distance from the left edge of the content into a
    /// physical horizontal scroll offset.
    pub fn left_to_physical(self, left: f32, scroll_max: f32) -> f32 {
        let scroll_max = scroll_max.max(0.0);
        let left = left.clamp(0.0, scroll_max);

        match self {
            Self::Ltr => left,
            Self::Rtl => left - scroll_max,
        }
    }

    /// Clamps a physical horizontal scroll offset to the range a node
    /// with the given `scroll_max` accepts.
    pub fn clamp_physical(self, physical: f32, scroll_max: f32) -> f32 {
        let scroll_max = scroll_max.max(0.0);

        match self {
            Self::Ltr => physical.clamp(0.0, scroll_max),
            Self::Rtl => physical.clamp(-scroll_max, 0.0),
        }
    }
}
