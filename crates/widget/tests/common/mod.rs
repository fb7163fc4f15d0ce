#![allow(dead_code)]

use icy_scroll_test::Dom;
use icy_scroll_widget::core::time::{Duration, Instant, milliseconds};
use icy_scroll_widget::core::{Event, NodeRef, RedrawRequest, Shell, Size};
use icy_scroll_widget::settings::Settings;
use icy_scroll_widget::viewport::Source;
use icy_scroll_widget::{Scrollbar, ScrollbarEvent};

/// A scrollbar wired to a simulated host, with its own clock.
pub struct Harness {
    pub dom: Dom,
    pub viewport: NodeRef,
    pub content: NodeRef,
    pub scrollbar: Scrollbar,
    pub now: Instant,
    pub events: Vec<ScrollbarEvent>,
}

impl Harness {
    /// A 100x100 viewport showing content of the given size.
    pub fn new(content: Size, settings: Settings) -> Self {
        let dom = Dom::new();
        let (viewport, content) = dom.viewport("#viewport", Size::new(100.0, 100.0), content);

        Self::with_dom(dom, viewport, content, settings)
    }

    pub fn with_dom(dom: Dom, viewport: NodeRef, content: NodeRef, settings: Settings) -> Self {
        let scrollbar = Scrollbar::new(
            dom.host(),
            Source::Owned {
                viewport: viewport.clone(),
                content: content.clone(),
            },
            settings,
        )
        .expect("valid settings");

        let mut harness = Self {
            dom,
            viewport,
            content,
            scrollbar,
            now: Instant::now(),
            events: Vec::new(),
        };

        let now = harness.now;

        harness
            .scrollbar
            .attach(now, &mut Shell::new(&mut harness.events))
            .expect("attach scrollbar");

        harness.pump();
        harness
    }

    /// Feeds an event to the scrollbar, returning whether it was captured.
    pub fn send(&mut self, event: Event) -> bool {
        let mut shell = Shell::new(&mut self.events);

        self.scrollbar.update(&event, self.now, &mut shell);

        shell.is_event_captured()
    }

    /// Delivers every queued host event.
    pub fn pump(&mut self) {
        loop {
            let events = self.dom.take_events();

            if events.is_empty() {
                break;
            }

            for event in events {
                let _ = self.send(event);
            }
        }
    }

    /// Moves the clock forward and renders a frame.
    pub fn advance(&mut self, duration: Duration) {
        self.now += duration;

        let _ = self.send(Event::Frame(self.now));
        self.pump();
    }

    /// Renders frames until the scrollbar stops asking for them.
    pub fn settle(&mut self) {
        for _ in 0..1_000 {
            match self.scrollbar.redraw_request(self.now) {
                RedrawRequest::Wait => return,
                RedrawRequest::NextFrame => self.advance(milliseconds(16)),
                RedrawRequest::At(at) => {
                    let duration = at.saturating_duration_since(self.now);
                    self.advance(duration);
                }
            }
        }

        panic!("scrollbar never settled");
    }

    /// Drains the published events.
    pub fn take_events(&mut self) -> Vec<ScrollbarEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn offset(&self) -> f32 {
        self.viewport.scroll_offset().y
    }
}
