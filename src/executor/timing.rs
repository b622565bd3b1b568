//! Request timing measurement.

use crate::models::response::RequestTiming;
use std::time::Instant;

/// Timing checkpoints collected during request execution.
///
/// The "sent" mark is taken just before `send()`, so `connect` only covers
/// local preparation. DNS, TCP and TLS happen inside `send()` and are
/// counted in `first_byte`.
#[derive(Debug, Clone)]
pub struct TimingCheckpoints {
    /// When the request started.
    pub request_start: Instant,

    /// When the request was handed to reqwest.
    pub request_sent: Option<Instant>,

    /// When the response headers were received.
    pub first_byte_received: Option<Instant>,

    /// When the body was completely read.
    pub response_complete: Option<Instant>,
}

impl TimingCheckpoints {
    /// Creates checkpoints with the start time set to now.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(request_start: Instant) -> Self {
        Self {
            request_start,
            request_sent: None,
            first_byte_received: None,
            response_complete: None,
        }
    }

    pub fn mark_request_sent(&mut self) {
        self.request_sent = Some(Instant::now());
    }

    pub fn mark_first_byte_received(&mut self) {
        self.first_byte_received = Some(Instant::now());
    }

    pub fn mark_response_complete(&mut self) {
        self.response_complete = Some(Instant::now());
    }

    /// Converts checkpoints into a [`RequestTiming`].
    ///
    /// Missing checkpoints collapse onto the previous one, so the phases always
    /// add up to the elapsed time between start and the last recorded mark.
    pub fn to_request_timing(&self) -> RequestTiming {
        let sent = self.request_sent.unwrap_or(self.request_start);
        let first_byte = self.first_byte_received.unwrap_or(sent);
        let complete = self.response_complete.unwrap_or(first_byte);

        RequestTiming {
            connect: sent.saturating_duration_since(self.request_start),
            first_byte: first_byte.saturating_duration_since(sent),
            download: complete.saturating_duration_since(first_byte),
        }
    }
}

impl Default for TimingCheckpoints {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats timing as a one-line summary, e.g. `180ms (connect 30ms, ttfb 100ms, download 50ms)`.
pub fn format_timing_compact(timing: &RequestTiming) -> String {
    format!(
        "{}ms (connect {}ms, ttfb {}ms, download {}ms)",
        timing.total().as_millis(),
        timing.connect.as_millis(),
        timing.first_byte.as_millis(),
        timing.download.as_millis()
    )
}
