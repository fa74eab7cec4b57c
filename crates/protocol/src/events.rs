//! Inbound event types and the validating parse step.
//!
//! Both transports deliver the same JSON payloads. Every payload goes through
//! [`ServerEvent::parse`] exactly once, at the transport boundary: it either
//! yields a well-formed tagged event or a [`ProtocolError`] the transport logs
//! and drops. Downstream code never re-inspects optional wire fields.

use serde::Deserialize;
use thiserror::Error;

/// Errors produced by the inbound parse step.
///
/// These never alter session state; the transport logs them and drops the
/// offending payload.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Payload was not valid JSON or not an object
    #[error("malformed inbound payload: {0}")]
    Parse(#[from] serde_json::Error),
    /// Payload carried a `type` discriminator this client does not know
    #[error("unrecognized message discriminator: {0}")]
    UnknownDiscriminator(String),
    /// Payload fit no known shape (no discriminator, no recognizable fields)
    #[error("inbound payload fits no known message shape")]
    Unclassifiable,
}

/// Out-of-band flags carried on a text event.
///
/// `clear` and `noecho` are independent and may both be present. The wire
/// form is either a comma-separated string or a JSON array of tokens;
/// unrecognized tokens are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpecialFlags {
    /// Wipe the transcript before appending the new text
    pub clear: bool,
    /// Switch the input affordance to masked (password-style) entry
    pub noecho: bool,
}

impl SpecialFlags {
    fn from_tokens<'a>(tokens: impl Iterator<Item = &'a str>) -> Self {
        let mut flags = Self::default();
        for token in tokens {
            match token.trim() {
                "clear" => flags.clear = true,
                "noecho" => flags.noecho = true,
                _ => {}
            }
        }
        flags
    }

    pub fn is_empty(&self) -> bool {
        !self.clear && !self.noecho
    }
}

/// Wire form of the `special` field: the server has sent both a CSV string
/// and a JSON list across protocol revisions, so both are accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SpecialWire {
    Csv(String),
    List(Vec<String>),
}

impl From<SpecialWire> for SpecialFlags {
    fn from(wire: SpecialWire) -> Self {
        match wire {
            SpecialWire::Csv(s) => SpecialFlags::from_tokens(s.split(',')),
            SpecialWire::List(items) => SpecialFlags::from_tokens(items.iter().map(String::as_str)),
        }
    }
}

/// A narrative text update, plus whatever partial location state the server
/// chose to attach. Absent fields mean "no change", not "empty".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextEvent {
    /// Pre-rendered transcript text to append; may be empty
    pub text: String,
    /// Current location label
    pub location: Option<String>,
    /// Server-chosen location image file name, relative to the resource base
    pub location_image: Option<String>,
    /// Out-of-band control flags
    pub special: SpecialFlags,
    /// Comma-separated NPC names present at the location
    pub npcs: Option<String>,
    /// Opaque display string for the items pane
    pub items: Option<String>,
    /// Opaque display string for the exits pane
    pub exits: Option<String>,
    /// Turn counter, when the server reports one
    pub turns: Option<u64>,
}

/// An out-of-band data payload targeting a UI image slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataEvent {
    /// Target slot id; the client substitutes its default slot when absent
    pub id: Option<String>,
    /// Opaque payload, set as the slot's image source verbatim
    pub payload: String,
}

/// A fully classified inbound message.
///
/// Constructed only by [`ServerEvent::parse`].
#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    /// Transport-level hello sent by the server once the channel is up
    Connected,
    /// Narrative text plus incremental location state
    Text(TextEvent),
    /// Opaque data payload for an image slot
    Data(DataEvent),
    /// Application-level error reported by the server
    Error { detail: String },
}

/// Raw wire shape: a flat JSON object where every key is optional.
#[derive(Debug, Deserialize)]
struct RawMessage {
    #[serde(rename = "type")]
    kind: Option<String>,
    text: Option<String>,
    location: Option<String>,
    location_image: Option<String>,
    special: Option<SpecialWire>,
    npcs: Option<String>,
    items: Option<String>,
    exits: Option<String>,
    turns: Option<u64>,
    id: Option<String>,
    data: Option<String>,
    error: Option<serde_json::Value>,
}

impl RawMessage {
    fn into_text_event(self) -> TextEvent {
        TextEvent {
            text: self.text.unwrap_or_default(),
            location: self.location,
            location_image: self.location_image,
            special: self.special.map(SpecialFlags::from).unwrap_or_default(),
            npcs: self.npcs,
            items: self.items,
            exits: self.exits,
            turns: self.turns,
        }
    }
}

impl ServerEvent {
    /// Parse one inbound payload into a classified event.
    ///
    /// Classification order: an `error` key wins over everything (the server
    /// attaches it to otherwise ordinary text messages), then the explicit
    /// `type` discriminator, then the legacy shape where the presence of a
    /// `text` field implies a text message.
    pub fn parse(payload: &str) -> Result<Self, ProtocolError> {
        let raw: RawMessage = serde_json::from_str(payload)?;

        if let Some(error) = raw.error {
            let detail = match error {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            return Ok(ServerEvent::Error { detail });
        }

        match raw.kind.as_deref() {
            Some("connected") => Ok(ServerEvent::Connected),
            Some("text") => Ok(ServerEvent::Text(raw.into_text_event())),
            Some("data") => Ok(ServerEvent::Data(DataEvent {
                id: raw.id,
                payload: raw.data.unwrap_or_default(),
            })),
            Some(other) => Err(ProtocolError::UnknownDiscriminator(other.to_string())),
            None if raw.text.is_some() => Ok(ServerEvent::Text(raw.into_text_event())),
            None => Err(ProtocolError::Unclassifiable),
        }
    }
}
