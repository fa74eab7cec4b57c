//! Fallback eligibility tracking.
//!
//! Runtime-free core logic so the rule is testable without a socket: the
//! push-stream fallback is reachable at most once per session, and only
//! before the bidirectional transport has ever reached the open state. A
//! successful open disables it permanently.

#[derive(Debug, Default)]
pub(crate) struct FallbackPolicy {
    socket_opened: bool,
    fallback_used: bool,
}

impl FallbackPolicy {
    /// Record that the socket transport reached the open state.
    pub fn on_socket_open(&mut self) {
        self.socket_opened = true;
    }

    /// Whether the push-stream fallback may be attempted now.
    ///
    /// Consumes the single attempt when it returns true.
    pub fn should_fall_back(&mut self) -> bool {
        if self.socket_opened || self.fallback_used {
            return false;
        }
        self.fallback_used = true;
        true
    }
}
