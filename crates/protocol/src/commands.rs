//! Outbound command encoding.
//!
//! One command, two wire forms: a JSON object over the WebSocket, or a
//! form-encoded body POSTed to the command endpoint when inbound delivery is
//! running over the push stream. The server treats the mere presence of the
//! `autocomplete` key as the completion-request marker.

use serde::Serialize;

/// A single composed command on its way to the server.
///
/// Ephemeral: built per submission, consumed by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundCommand {
    /// The composed command line (may be empty; the server rejects empties)
    pub line: String,
    /// Marks this as a completion request rather than a turn command
    pub autocomplete: bool,
}

#[derive(Serialize)]
struct WireCommand<'a> {
    cmd: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    autocomplete: Option<u8>,
}

impl OutboundCommand {
    pub fn command(line: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            autocomplete: false,
        }
    }

    pub fn autocomplete(line: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            autocomplete: true,
        }
    }

    /// JSON form sent over the bidirectional socket.
    pub fn to_socket_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&WireCommand {
            cmd: &self.line,
            autocomplete: self.autocomplete.then_some(1),
        })
    }

    /// Form-encoded body for the HTTP command endpoint.
    pub fn to_form_body(&self) -> String {
        let mut body = url::form_urlencoded::Serializer::new(String::new());
        body.append_pair("cmd", &self.line);
        if self.autocomplete {
            body.append_pair("autocomplete", "1");
        }
        body.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn socket_json_omits_autocomplete_for_plain_commands() {
        let json = OutboundCommand::command("look")
            .to_socket_json()
            .expect("serialize");
        assert_eq!(json, r#"{"cmd":"look"}"#);
    }

    #[test]
    fn socket_json_marks_autocomplete_requests() {
        let json = OutboundCommand::autocomplete("lo")
            .to_socket_json()
            .expect("serialize");
        assert_eq!(json, r#"{"cmd":"lo","autocomplete":1}"#);
    }

    #[test]
    fn form_body_url_escapes_the_command() {
        let body = OutboundCommand::command("say hello & welcome").to_form_body();
        assert_eq!(body, "cmd=say+hello+%26+welcome");
    }

    #[test]
    fn form_body_appends_autocomplete_flag() {
        let body = OutboundCommand::autocomplete("lo").to_form_body();
        assert_eq!(body, "cmd=lo&autocomplete=1");
    }
}
