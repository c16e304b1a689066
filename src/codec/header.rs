//! Header capture state.

use tracing::debug;

/// Tracks whether a header line has been captured and what it named.
///
/// ```text
///   Inactive                      (capture disabled; reset is a no-op)
///
///   AwaitingHeaderLine --capture--> HeaderCaptured(names)
///          ^                               |
///          +------------reset--------------+
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderState {
    /// Header capture is disabled.
    Inactive,
    /// Capture is enabled and the next line defines the header.
    AwaitingHeaderLine,
    /// A header has been captured.
    HeaderCaptured(Vec<String>),
}

impl HeaderState {
    /// Initial state for a codec with capture enabled or disabled.
    pub fn new(capture_enabled: bool) -> Self {
        if capture_enabled {
            HeaderState::AwaitingHeaderLine
        } else {
            HeaderState::Inactive
        }
    }

    /// True if the next decoded line should be captured as the header.
    pub fn is_awaiting(&self) -> bool {
        matches!(self, HeaderState::AwaitingHeaderLine)
    }

    /// The captured header names, if any.
    pub fn names(&self) -> Option<&[String]> {
        match self {
            HeaderState::HeaderCaptured(names) => Some(names.as_slice()),
            _ => None,
        }
    }

    /// Stores `names` as the header, replacing any previous one.
    ///
    /// Ignored while [`HeaderState::Inactive`].
    pub fn capture(&mut self, names: Vec<String>) {
        if matches!(self, HeaderState::Inactive) {
            return;
        }
        debug!(columns = names.len(), "Captured CSV header");
        *self = HeaderState::HeaderCaptured(names);
    }

    /// Forgets the captured header so the next line defines a new one.
    pub fn reset(&mut self) {
        if matches!(self, HeaderState::Inactive) {
            return;
        }
        debug!("CSV header reset");
        *self = HeaderState::AwaitingHeaderLine;
    }
}
