//! Outbound-send errors.
//!
//! Transport-level lifecycle failures are not errors in the `Result` sense;
//! they travel the event channel as [`TransportState::Closed`] so the
//! controller can render them into the transcript. `SendError` covers the
//! only fallible call a caller makes directly.
//!
//! [`TransportState::Closed`]: crate::transport::TransportState::Closed

use thiserror::Error;

/// Failure to hand a command to the server.
#[derive(Debug, Error)]
pub enum SendError {
    /// No transport has been selected yet, or the session is already closed
    #[error("no transport is connected")]
    NotConnected,
    /// The socket writer task is gone; the session is effectively over
    #[error("transport channel closed")]
    ChannelClosed,
    /// The one-shot HTTP command submission failed (hybrid/push-only mode)
    #[error("command submission failed: {0}")]
    Http(#[from] reqwest::Error),
}
