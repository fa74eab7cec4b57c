//! Taleway Client - the session-transport layer of the browser game client.
//!
//! Maintains a live ordered channel between one player session and the game
//! server: user intent becomes wire commands, server-pushed events become
//! incremental updates of the transcript and auxiliary UI state.
//!
//! - [`transport`] - socket transport with a one-shot push-stream fallback
//! - [`compose`] - command-line composition from input + dropdown selections
//! - [`session`] - single-in-flight pacing and inbound dispatch
//! - [`view`] - UI state the inbound events project onto
//! - [`roster`] - NPC/item/exit state and the selection dropdowns
//!
//! The crate draws nothing itself: a front end binds to the plain state
//! structs in [`view`] and feeds user input to [`session::SessionController`].

pub mod compose;
pub mod config;
pub mod error;
pub mod roster;
pub mod session;
pub mod transport;
pub mod view;

pub use taleway_protocol as protocol;

// =============================================================================
// Command composition
// =============================================================================
pub use compose::{compose, NO_ACTION, NO_TARGET};

// =============================================================================
// Configuration & errors
// =============================================================================
pub use config::{EchoRevertPolicy, SessionConfig};
pub use error::SendError;

// =============================================================================
// Session
// =============================================================================
pub use session::{Session, SessionController};

// =============================================================================
// Transport
// =============================================================================
pub use transport::{
    ChannelEvent, CloseReason, CommandSink, TransportChannel, TransportHandle, TransportState,
};

// =============================================================================
// View & roster
// =============================================================================
pub use roster::{Dropdown, RosterModel, SlotView, ACTION_VERBS, NPC_SLOT_COUNT};
pub use view::{ImageSlot, ImageSlots, ScrollAnimator, TranscriptEntry, TranscriptView, UiState};
