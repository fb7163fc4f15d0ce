//! icy_scroll keeps custom scrollbars in sync with any scrollable viewport.
//!
//! The engine does not render anything by itself. Instead, it talks to a
//! [`Host`] (a DOM, a retained widget tree, a headless test double) that
//! owns the scrollable nodes, and it is driven like any other widget:
//!
//! - The host delivers every [`Event`] to [`Scrollbar::update`].
//! - The [`Scrollbar`] publishes [`ScrollbarEvent`]s through a [`Shell`].
//! - The host renders a frame whenever the [`Shell`] asks for one.
//!
//! # Overview
//! A [`Scrollbar`] measures its viewport, renders a thumb per tracked axis
//! and turns drags and track clicks back into scroll offsets. Programmatic
//! scrolling is animated and resolves a [`ScrollTask`] once it lands or gets
//! interrupted:
//!
//! ```
//! use futures::FutureExt;
//! use icy_scroll::time::{Instant, milliseconds};
//! use icy_scroll::{
//!     Event, RedrawRequest, ScrollOutcome, ScrollToOptions, Scrollbar, Settings, Shell, Size,
//!     Source,
//! };
//! use icy_scroll_test::Dom;
//!
//! let dom = Dom::new();
//! let (viewport, content) =
//!     dom.viewport("#list", Size::new(100.0, 100.0), Size::new(100.0, 300.0));
//!
//! let mut scrollbar = Scrollbar::new(
//!     dom.host(),
//!     Source::Owned { viewport, content },
//!     Settings::default(),
//! )?;
//!
//! let mut events = Vec::new();
//! let mut now = Instant::now();
//!
//! scrollbar.attach(now, &mut Shell::new(&mut events))?;
//!
//! let task = scrollbar.scroll_to(
//!     ScrollToOptions::new().bottom(0.0).duration(milliseconds(100)),
//!     now,
//! );
//!
//! while scrollbar.redraw_request(now) == RedrawRequest::NextFrame {
//!     now += milliseconds(16);
//!     scrollbar.update(&Event::Frame(now), now, &mut Shell::new(&mut events));
//! }
//!
//! assert_eq!(task.now_or_never(), Some(ScrollOutcome::Completed));
//! # Ok::<(), icy_scroll::Error>(())
//! ```
//!
//! # Settings
//! Every [`Scrollbar`] is configured with [`Settings`]. With the `serde`
//! feature, they can also be loaded from RON files.
//!
//! [`Host`]: core::Host
#![cfg_attr(docsrs, feature(doc_cfg))]
pub use icy_scroll_core as core;
pub use icy_scroll_widget as widget;

pub use crate::core::easing;
pub use crate::core::event;
pub use crate::core::time;

pub use crate::core::{
    AbsoluteOffset, Align, Axis, Easing, Edge, Edges, Error, Event, Host, LayoutDirection, Node,
    NodeId, NodeRef, ObserverHandle, Point, Rectangle, RedrawRequest,
    ScrollToElementOptions, ScrollToOptions, Shell, Size, ThumbGeometry, Vector,
};

pub use widget::settings::{self, Appearance, EdgeMode, Position, Track, Visibility};
pub use widget::{
    AttachOptions, AttachedScrollbar, ExternalViewport, ScrollOutcome, ScrollState, ScrollTask,
    Scrollbar, ScrollbarEvent, Settings, SmoothScroll, Source, Target, attach,
};
