//! Session configuration.

/// When the masked ("noecho") input mode reverts to plain entry.
///
/// The server never sends an explicit un-mask instruction, so the revert
/// trigger is a client policy. `OnSubmit` matches an input field that
/// resets to plain entry after every submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EchoRevertPolicy {
    /// Revert as soon as the next command is submitted
    #[default]
    OnSubmit,
    /// Revert when the next text message arrives without the `noecho` flag
    OnNextMessage,
    /// Stay masked until told otherwise
    Never,
}

/// Per-session tunables.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub echo_revert: EchoRevertPolicy,
}
