//! The bidirectional socket transport.
//!
//! One pump per session: reads inbound frames into the event channel and
//! drains the outbound command queue into the socket. Returning hands the
//! terminal close reason back to the connection task; nothing here retries.

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use taleway_protocol::{OutboundCommand, ServerEvent};

use super::{ChannelEvent, CloseReason};

pub(crate) async fn pump(
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    mut outbound: mpsc::Receiver<OutboundCommand>,
    events: &mpsc::Sender<ChannelEvent>,
) -> CloseReason {
    let (mut write, mut read) = stream.split();

    loop {
        tokio::select! {
            inbound = read.next() => match inbound {
                Some(Ok(Message::Text(payload))) => match ServerEvent::parse(&payload) {
                    Ok(event) => {
                        if events.send(ChannelEvent::Inbound(event)).await.is_err() {
                            return CloseReason::Closed;
                        }
                    }
                    // Malformed payloads are dropped without touching state
                    Err(error) => tracing::warn!(%error, "dropping malformed socket payload"),
                },
                Some(Ok(Message::Close(_))) | None => return CloseReason::Closed,
                // Pings are answered by tungstenite itself
                Some(Ok(_)) => {}
                Some(Err(error)) => return CloseReason::Error(error.to_string()),
            },
            command = outbound.recv() => match command {
                Some(command) => {
                    let payload = match command.to_socket_json() {
                        Ok(payload) => payload,
                        Err(error) => {
                            tracing::error!(%error, "failed to encode outbound command");
                            continue;
                        }
                    };
                    if let Err(error) = write.send(Message::Text(payload)).await {
                        return CloseReason::Error(error.to_string());
                    }
                }
                None => return CloseReason::Closed,
            },
        }
    }
}
