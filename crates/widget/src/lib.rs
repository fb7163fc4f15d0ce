//! Custom scrollbars that stay in sync with a scrollable viewport.
//!
//! A [`Scrollbar`] measures a viewport through a [`Host`], renders a thumb
//! per tracked axis and turns drags and track clicks back into scroll
//! offsets. It also animates programmatic scrolling with [`SmoothScroll`],
//! reports reached and dropped edges and re-measures the viewport whenever
//! its content changes.
//!
//! [`Host`]: core::Host
pub use icy_scroll_core as core;

pub mod attach;
pub mod observer;
pub mod reached;
pub mod scrollbar;
pub mod settings;
pub mod smooth_scroll;
pub mod thumb;
pub mod viewport;

pub use attach::{AttachOptions, AttachedScrollbar, attach};
pub use scrollbar::{ScrollState, Scrollbar, ScrollbarEvent, Target};
pub use settings::Settings;
pub use smooth_scroll::{ScrollOutcome, ScrollTask, SmoothScroll};
pub use thumb::ThumbController;
pub use viewport::{ExternalViewport, Source, Viewport, ViewportMeasurement};
