use crate::RedrawRequest;
use crate::event;

/// A connection to the state of a host.
///
/// A scrollbar leverages a [`Shell`] to publish its events and to ask the
/// host for another frame.
#[derive(Debug)]
pub struct Shell<'a, Message> {
    messages: &'a mut Vec<Message>,
    event_status: event::Status,
    redraw_request: RedrawRequest,
}

impl<'a, Message> Shell<'a, Message> {
    /// Creates a new [`Shell`] with the provided buffer of messages.
    pub fn new(messages: &'a mut Vec<Message>) -> Self {
        Self {
            messages,
            event_status: event::Status::Ignored,
            redraw_request: RedrawRequest::Wait,
        }
    }

    /// Publish the given `Message` for the host to process it.
    pub fn publish(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Marks the current event as captured. Prevents "event bubbling".
    ///
    /// A scrollbar captures pointer events it turned into a gesture, so the
    /// host does not forward them to the content.
    pub fn capture_event(&mut self) {
        self.event_status = event::Status::Captured;
    }

    /// Returns whether the current event has been captured.
    #[must_use]
    pub fn is_event_captured(&self) -> bool {
        self.event_status == event::Status::Captured
    }

    /// Requests a new frame at the given [`RedrawRequest`].
    ///
    /// The earliest request wins.
    pub fn request_redraw_at(&mut self, redraw_request: impl Into<RedrawRequest>) {
        self.redraw_request = self.redraw_request.min(redraw_request.into());
    }

    /// Returns the request a redraw should happen, if any.
    #[must_use]
    pub fn redraw_request(&self) -> RedrawRequest {
        self.redraw_request
    }
}
