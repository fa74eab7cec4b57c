//! The one-way push-stream fallback (text/event-stream).
//!
//! Inbound only: game payloads arrive as `event: text` frames whose data is
//! the same JSON the socket would carry. Unclassified frames are ignored.
//! Outbound goes over the HTTP command endpoint instead (hybrid mode).

use futures_util::StreamExt;
use tokio::sync::mpsc;
use url::Url;

use taleway_protocol::ServerEvent;

use super::{ChannelEvent, CloseReason};

/// Incremental text/event-stream parser.
///
/// Byte-buffered so UTF-8 sequences and lines split across network chunks
/// reassemble correctly.
#[derive(Debug, Default)]
pub(crate) struct EventStreamParser {
    buffer: Vec<u8>,
    event: Option<String>,
    data: Vec<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct SseFrame {
    pub event: String,
    pub data: String,
}

impl EventStreamParser {
    /// Feed one network chunk, yielding any frames it completes.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseFrame> {
        self.buffer.extend_from_slice(chunk);
        let mut frames = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);
            let line = line.trim_end_matches(['\n', '\r']);
            if line.is_empty() {
                if let Some(frame) = self.dispatch() {
                    frames.push(frame);
                }
            } else {
                self.field(line);
            }
        }
        frames
    }

    fn field(&mut self, line: &str) {
        // Lines starting with a colon are comments (keep-alives)
        if line.starts_with(':') {
            return;
        }
        let (name, value) = match line.split_once(':') {
            Some((name, value)) => (name, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match name {
            "event" => self.event = Some(value.to_string()),
            "data" => self.data.push(value.to_string()),
            // id and retry are irrelevant to this client
            _ => {}
        }
    }

    fn dispatch(&mut self) -> Option<SseFrame> {
        let event = self.event.take();
        if self.data.is_empty() {
            return None;
        }
        Some(SseFrame {
            event: event.unwrap_or_else(|| "message".to_string()),
            data: std::mem::take(&mut self.data).join("\n"),
        })
    }
}

/// Open the push stream; a setup failure here exhausts the session's
/// transport options.
pub(crate) async fn open(client: &reqwest::Client, url: Url) -> Result<reqwest::Response, reqwest::Error> {
    let response = client
        .get(url)
        .header(reqwest::header::ACCEPT, "text/event-stream")
        .send()
        .await?;
    response.error_for_status()
}

pub(crate) async fn pump(
    response: reqwest::Response,
    events: &mpsc::Sender<ChannelEvent>,
) -> CloseReason {
    let mut parser = EventStreamParser::default();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(error) => return CloseReason::Error(error.to_string()),
        };
        for frame in parser.push(&chunk) {
            match frame.event.as_str() {
                "text" => match ServerEvent::parse(&frame.data) {
                    Ok(event) => {
                        if events.send(ChannelEvent::Inbound(event)).await.is_err() {
                            return CloseReason::Closed;
                        }
                    }
                    Err(error) => tracing::warn!(%error, "dropping malformed push-stream payload"),
                },
                other => tracing::debug!(event = other, "ignoring unclassified push-stream event"),
            }
        }
    }

    CloseReason::Closed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_complete_frame() {
        let mut parser = EventStreamParser::default();
        let frames = parser.push(b"event: text\ndata: {\"text\":\"hi\"}\n\n");
        assert_eq!(
            frames,
            vec![SseFrame {
                event: "text".to_string(),
                data: r#"{"text":"hi"}"#.to_string(),
            }]
        );
    }

    #[test]
    fn reassembles_frames_split_across_chunks() {
        let mut parser = EventStreamParser::default();
        assert!(parser.push(b"event: te").is_empty());
        assert!(parser.push(b"xt\ndata: {\"text\"").is_empty());
        let frames = parser.push(b":\"hi\"}\n\n");
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].event, "text");
    }

    #[test]
    fn unnamed_events_default_to_message() {
        let mut parser = EventStreamParser::default();
        let frames = parser.push(b"data: ping\n\n");
        assert_eq!(frames[0].event, "message");
        assert_eq!(frames[0].data, "ping");
    }

    #[test]
    fn multi_line_data_joins_with_newlines() {
        let mut parser = EventStreamParser::default();
        let frames = parser.push(b"data: one\ndata: two\n\n");
        assert_eq!(frames[0].data, "one\ntwo");
    }

    #[test]
    fn comments_and_dataless_frames_are_skipped() {
        let mut parser = EventStreamParser::default();
        assert!(parser.push(b": keep-alive\n\n").is_empty());
        assert!(parser.push(b"event: text\n\n").is_empty());
    }

    #[test]
    fn handles_crlf_line_endings() {
        let mut parser = EventStreamParser::default();
        let frames = parser.push(b"event: text\r\ndata: x\r\n\r\n");
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].data, "x");
    }
}
