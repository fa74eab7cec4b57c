//! Taleway Protocol - wire types shared between the game server and the session client
//!
//! This crate contains everything the client needs to speak the server's wire
//! protocol, on either transport (WebSocket or the server-push fallback):
//! - Inbound event types and the single validating parse step (`ServerEvent`)
//! - Outbound command encoding for both wire forms (`OutboundCommand`)
//! - Endpoint derivation from the hosting origin (`Endpoints`)
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, serde_json, thiserror, and url
//! 2. **No business logic** - Pure data types, parsing, and encoding
//! 3. **One parse step** - Inbound payloads are classified exactly once, at the
//!    transport boundary; nothing downstream re-checks optional wire fields

pub mod commands;
pub mod endpoints;
pub mod events;

// =============================================================================
// Inbound Events
// =============================================================================
pub use events::{DataEvent, ProtocolError, ServerEvent, SpecialFlags, TextEvent};

// =============================================================================
// Outbound Commands
// =============================================================================
pub use commands::OutboundCommand;

// =============================================================================
// Endpoints
// =============================================================================
pub use endpoints::{EndpointError, Endpoints};
