//! Transport channel: connection lifecycle, fallback policy, and the
//! uniform inbound event stream.
//!
//! Exactly one transport mechanism is ever active. The connection task
//! first tries the bidirectional socket; a setup failure (before the socket
//! ever opens) falls back once to the one-way push stream, in which case
//! outbound commands travel over one-shot HTTP requests instead. After a
//! transport has been selected, any error or close is terminal - surfaced
//! as a [`TransportState::Closed`] event, never retried.
//!
//! Inbound messages and state changes flow through a single mpsc channel
//! the session controller drains in arrival order.

mod http;
mod policy;
mod push;
mod socket;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, RwLock};
use url::Url;

use taleway_protocol::{Endpoints, OutboundCommand, ServerEvent};

use crate::error::SendError;

use policy::FallbackPolicy;

/// Events channel depth; the controller drains promptly, this only absorbs
/// short bursts.
const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Why the selected transport ended. Terminal either way; the two variants
/// differ only in the message shown to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    /// Orderly close (server shut the channel)
    Closed,
    /// Transport-level error
    Error(String),
}

/// Lifecycle of the session's single transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportState {
    Disconnected,
    ConnectingSocket,
    SocketOpen,
    /// Push-stream inbound, HTTP outbound (hybrid mode)
    PushOnly,
    Closed(CloseReason),
}

/// What the connection task feeds the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEvent {
    State(TransportState),
    Inbound(ServerEvent),
}

/// The outbound seam: the controller sends through this, tests substitute
/// a recording implementation.
#[async_trait]
pub trait CommandSink: Send + Sync {
    async fn send(&self, command: OutboundCommand) -> Result<(), SendError>;
}

#[derive(Debug)]
enum SendMode {
    /// No transport selected yet
    Pending,
    /// Socket open; commands go to the writer task
    Socket(mpsc::Sender<OutboundCommand>),
    /// Push-stream inbound; commands go over one-shot HTTP
    Push,
    /// Terminal; the session is over
    Closed,
}

/// Cloneable handle for sending commands through whatever transport is
/// currently selected.
#[derive(Clone)]
pub struct TransportHandle {
    mode: Arc<RwLock<SendMode>>,
    http: reqwest::Client,
    command_url: Url,
}

impl TransportHandle {
    async fn set_mode(&self, mode: SendMode) {
        *self.mode.write().await = mode;
    }
}

#[async_trait]
impl CommandSink for TransportHandle {
    async fn send(&self, command: OutboundCommand) -> Result<(), SendError> {
        enum Route {
            Socket(mpsc::Sender<OutboundCommand>),
            Http,
        }

        let route = {
            let mode = self.mode.read().await;
            match &*mode {
                SendMode::Pending | SendMode::Closed => return Err(SendError::NotConnected),
                SendMode::Socket(tx) => Route::Socket(tx.clone()),
                SendMode::Push => Route::Http,
            }
        };

        match route {
            Route::Socket(tx) => tx
                .send(command)
                .await
                .map_err(|_| SendError::ChannelClosed),
            Route::Http => http::post_command(&self.http, self.command_url.clone(), &command).await,
        }
    }
}

/// Connection entry point.
pub struct TransportChannel;

impl TransportChannel {
    /// Spawn the connection task and return the send handle plus the event
    /// stream the controller drains.
    pub fn connect(endpoints: Endpoints) -> (TransportHandle, mpsc::Receiver<ChannelEvent>) {
        let (events_tx, events_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let handle = TransportHandle {
            mode: Arc::new(RwLock::new(SendMode::Pending)),
            http: reqwest::Client::new(),
            command_url: endpoints.command(),
        };

        let task_handle = handle.clone();
        tokio::spawn(async move {
            run(endpoints, task_handle, events_tx).await;
        });

        (handle, events_rx)
    }
}

async fn run(endpoints: Endpoints, handle: TransportHandle, events: mpsc::Sender<ChannelEvent>) {
    let mut policy = FallbackPolicy::default();
    let _ = events
        .send(ChannelEvent::State(TransportState::ConnectingSocket))
        .await;

    let socket_url = endpoints.socket();
    match tokio_tungstenite::connect_async(socket_url.as_str()).await {
        Ok((stream, _)) => {
            policy.on_socket_open();
            tracing::info!(url = %socket_url, "socket transport open");

            let (outbound_tx, outbound_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
            handle.set_mode(SendMode::Socket(outbound_tx)).await;
            let _ = events
                .send(ChannelEvent::State(TransportState::SocketOpen))
                .await;

            // Fallback is unreachable from here on: once the socket has
            // opened, any later failure is terminal.
            let reason = socket::pump(stream, outbound_rx, &events).await;
            tracing::warn!(?reason, "socket transport ended");
            handle.set_mode(SendMode::Closed).await;
            let _ = events
                .send(ChannelEvent::State(TransportState::Closed(reason)))
                .await;
        }
        Err(error) => {
            tracing::warn!(%error, url = %socket_url, "socket transport setup failed");
            if !policy.should_fall_back() {
                handle.set_mode(SendMode::Closed).await;
                let _ = events
                    .send(ChannelEvent::State(TransportState::Closed(
                        CloseReason::Error(error.to_string()),
                    )))
                    .await;
                return;
            }

            match push::open(&handle.http, endpoints.push_stream()).await {
                Ok(response) => {
                    tracing::info!("push-stream transport selected, outbound over http");
                    handle.set_mode(SendMode::Push).await;
                    let _ = events
                        .send(ChannelEvent::State(TransportState::PushOnly))
                        .await;

                    let reason = push::pump(response, &events).await;
                    tracing::warn!(?reason, "push-stream transport ended");
                    handle.set_mode(SendMode::Closed).await;
                    let _ = events
                        .send(ChannelEvent::State(TransportState::Closed(reason)))
                        .await;
                }
                Err(fallback_error) => {
                    tracing::error!(%fallback_error, "push-stream fallback setup failed");
                    handle.set_mode(SendMode::Closed).await;
                    let _ = events
                        .send(ChannelEvent::State(TransportState::Closed(
                            CloseReason::Error(fallback_error.to_string()),
                        )))
                        .await;
                }
            }
        }
    }
}
