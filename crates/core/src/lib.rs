//! The core library of [icy_scroll].
//!
//! This library holds basic types and pure functions that can be reused by
//! any host embedding custom scrollbars: geometry primitives, the thumb
//! geometry model, easing curves, scroll options and the traits a host
//! implements to expose its scrollable nodes.
//!
//! Nothing in this crate touches a real user interface. Hosts implement
//! [`Node`] and [`Host`] and feed [`Event`]s back into the engine.
//!
//! [icy_scroll]: https://github.com/mkrueger/icy_scroll
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/iced-rs/iced/9ab6923e943f784985e9ef9ca28b10278297225d/docs/logo.svg"
)]
pub mod animation;
pub mod easing;
pub mod edge;
pub mod event;
pub mod frame;
pub mod host;
pub mod offset;
pub mod thumb;
pub mod time;

mod axis;
mod error;
mod geometry;
mod layout_direction;
mod shell;

pub use animation::Animation;
pub use axis::Axis;
pub use easing::{CubicBezier, Easing};
pub use edge::{Edge, Edges};
pub use error::Error;
pub use event::Event;
pub use frame::RedrawRequest;
pub use geometry::{Point, Rectangle, Size, Vector};
pub use host::{Host, Node, NodeId, NodeRef, ObserverHandle};
pub use layout_direction::LayoutDirection;
pub use offset::{AbsoluteOffset, Align, ScrollToElementOptions, ScrollToOptions};
pub use shell::Shell;
pub use thumb::ThumbGeometry;
