//! UI state projection.
//!
//! The client does not draw anything itself; it maintains plain state
//! structs that a front end binds to. Inbound events are projected onto
//! [`UiState`] by [`render`], and the catch-up scroll runs as its own task
//! ([`scroll::ScrollAnimator`]) against the shared state.

pub mod images;
pub mod render;
pub mod scroll;
pub mod transcript;

pub use images::{ImageSlot, ImageSlots};
pub use scroll::ScrollAnimator;
pub use transcript::{TranscriptEntry, TranscriptView};

/// State of the single command-input affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputState {
    /// Whether the input accepts submissions (false while waiting or after a
    /// terminal transport failure)
    pub enabled: bool,
    /// Password-style masked entry ("noecho" mode)
    pub masked: bool,
    /// Front end should move focus back to the input
    pub focus_requested: bool,
    /// A command is outstanding; show the waiting indicator
    pub waiting_indicator: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            enabled: true,
            masked: false,
            focus_requested: false,
            waiting_indicator: false,
        }
    }
}

/// Everything the page shows, as plain data.
#[derive(Debug, Default)]
pub struct UiState {
    pub transcript: TranscriptView,
    pub input: InputState,
    pub location_label: String,
    pub images: ImageSlots,
    pub items_pane: String,
    pub exits_pane: String,
    /// Textual NPC roster list (mirrors the dropdown contents)
    pub roster_list: Vec<String>,
    pub turns: Option<u64>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }
}
