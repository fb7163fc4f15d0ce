//! Attach scrollbars to any node of a host.
//!
//! This is the entry point for overlays and third-party components that do
//! not build their own viewport: point [`attach`] at a host element and,
//! optionally, at the viewport living inside of it.
use crate::core::time::Instant;
use crate::core::{Error, Event, Host, NodeId, NodeRef, Shell};
use crate::scrollbar::{Scrollbar, ScrollbarEvent};
use crate::settings::Settings;
use crate::viewport::{ExternalViewport, Source};

use std::rc::Rc;

/// The options of [`attach`].
#[derive(Debug, Clone, Default)]
pub struct AttachOptions {
    /// The selector of the host element.
    pub host: String,
    /// The selectors of the viewport inside the host element. The host
    /// element is the viewport when missing.
    pub viewport: Option<ExternalViewport>,
    /// The [`Settings`] of the scrollbar.
    pub settings: Settings,
}

impl AttachOptions {
    /// Creates [`AttachOptions`] for the host element matching `selector`.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    /// Sets the [`ExternalViewport`] inside the host element.
    pub fn viewport(mut self, viewport: ExternalViewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    /// Sets the [`Settings`].
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }
}

/// A [`Scrollbar`] attached with [`attach`].
///
/// It is destroyed when dropped, when [`AttachedScrollbar::destroy`] is
/// called or when its host element leaves the tree.
pub struct AttachedScrollbar {
    element: NodeRef,
    scrollbar: Scrollbar,
}

impl std::fmt::Debug for AttachedScrollbar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttachedScrollbar")
            .field("element", &self.element.id())
            .field("scrollbar", &self.scrollbar)
            .finish()
    }
}

impl AttachedScrollbar {
    /// Returns the id of the host element.
    pub fn element(&self) -> NodeId {
        self.element.id()
    }

    /// Returns the [`Scrollbar`].
    pub fn scrollbar(&self) -> &Scrollbar {
        &self.scrollbar
    }

    /// Returns the [`Scrollbar`] mutably.
    pub fn scrollbar_mut(&mut self) -> &mut Scrollbar {
        &mut self.scrollbar
    }

    /// Processes an [`Event`] of the host.
    pub fn update(&mut self, event: &Event, now: Instant, shell: &mut Shell<'_, ScrollbarEvent>) {
        if !self.scrollbar.is_destroyed() && !self.element.is_connected() {
            log::debug!("Host element {} left the tree", self.element.id());

            self.scrollbar.destroy();
            return;
        }

        self.scrollbar.update(event, now, shell);
    }

    /// Releases everything the scrollbar registered in the host.
    ///
    /// Calling this more than once does nothing.
    pub fn destroy(&mut self) {
        self.scrollbar.destroy();
    }

    /// Returns true if the scrollbar was destroyed.
    pub fn is_destroyed(&self) -> bool {
        self.scrollbar.is_destroyed()
    }
}

/// Attaches a [`Scrollbar`] to the host element described by `options`.
pub fn attach(
    host: Rc<dyn Host>,
    options: AttachOptions,
    now: Instant,
    shell: &mut Shell<'_, ScrollbarEvent>,
) -> Result<AttachedScrollbar, Error> {
    let AttachOptions {
        host: selector,
        viewport,
        settings,
    } = options;

    if selector.trim().is_empty() {
        return Err(Error::MissingHost {
            what: "host element selector",
        });
    }

    let element = host
        .query(None, &selector)
        .ok_or(Error::SelectorNotFound { selector })?;

    let source = match viewport {
        Some(selectors) => Source::External {
            root: Some(element.id()),
            selectors,
        },
        None => Source::Owned {
            viewport: element.clone(),
            content: element.clone(),
        },
    };

    let mut scrollbar = Scrollbar::new(host, source, settings)?;
    scrollbar.attach(now, shell)?;

    Ok(AttachedScrollbar { element, scrollbar })
}
