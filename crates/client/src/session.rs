//! The session controller: single-in-flight command pacing and inbound
//! dispatch.
//!
//! One controller per page load. It owns the composer inputs (via the
//! roster's dropdowns), the transport handle, and the UI state the view
//! layer mutates; the transport's event channel is drained one message at
//! a time, in arrival order.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;
use url::Url;

use taleway_protocol::{Endpoints, OutboundCommand, ServerEvent};

use crate::compose::compose;
use crate::config::{EchoRevertPolicy, SessionConfig};
use crate::error::SendError;
use crate::roster::RosterModel;
use crate::transport::{ChannelEvent, CommandSink, TransportChannel, TransportState};
use crate::view::{render, ScrollAnimator, UiState};

/// Session-scoped flags, fields instead of page globals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub transport: TransportState,
    /// A command is outstanding; further submissions are ignored
    pub waiting: bool,
    /// The navigate-away confirmation prompt is armed
    pub unload_guard: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            transport: TransportState::Disconnected,
            waiting: false,
            unload_guard: true,
        }
    }
}

/// Orchestrates one player session.
pub struct SessionController {
    session: Session,
    config: SessionConfig,
    endpoints: Endpoints,
    outbound: Arc<dyn CommandSink>,
    roster: RosterModel,
    ui: Arc<Mutex<UiState>>,
    scroll: ScrollAnimator,
}

impl SessionController {
    pub fn new(
        endpoints: Endpoints,
        config: SessionConfig,
        outbound: Arc<dyn CommandSink>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            session: Session::default(),
            config,
            endpoints,
            outbound,
            roster: RosterModel::new(),
            ui: Arc::new(Mutex::new(UiState::new())),
            scroll: ScrollAnimator::new(shutdown),
        }
    }

    /// Connect the real transport and build a controller around it.
    pub fn connect(
        endpoints: Endpoints,
        config: SessionConfig,
        shutdown: CancellationToken,
    ) -> (Self, mpsc::Receiver<ChannelEvent>) {
        let (handle, events) = TransportChannel::connect(endpoints.clone());
        (
            Self::new(endpoints, config, Arc::new(handle), shutdown),
            events,
        )
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn waiting(&self) -> bool {
        self.session.waiting
    }

    pub fn roster(&self) -> &RosterModel {
        &self.roster
    }

    pub fn roster_mut(&mut self) -> &mut RosterModel {
        &mut self.roster
    }

    /// Shared UI state, for front-end binding and the scroll task.
    pub fn ui(&self) -> Arc<Mutex<UiState>> {
        Arc::clone(&self.ui)
    }

    /// Drain the transport's event stream until it ends.
    pub async fn run(&mut self, mut events: mpsc::Receiver<ChannelEvent>) {
        while let Some(event) = events.recv().await {
            self.dispatch(event).await;
        }
    }

    /// Submit a command composed from the raw input plus the current
    /// dropdown selections.
    ///
    /// Returns `Ok(false)` when a command is already in flight: the
    /// submission is ignored, nothing is sent, no error is surfaced.
    pub async fn submit(&mut self, raw_input: &str) -> Result<bool, SendError> {
        if self.session.waiting {
            tracing::debug!("submission ignored, a command is already in flight");
            return Ok(false);
        }
        if matches!(self.session.transport, TransportState::Closed(_)) {
            tracing::debug!("submission ignored, transport is closed");
            return Ok(false);
        }

        let line = compose(
            raw_input,
            self.roster.selected_verb(),
            self.roster.selected_target(),
        );

        self.session.waiting = true;
        {
            let mut ui = self.ui.lock().await;
            ui.input.enabled = false;
            ui.input.waiting_indicator = true;
            ui.input.focus_requested = true;
            if self.config.echo_revert == EchoRevertPolicy::OnSubmit {
                ui.input.masked = false;
            }
        }

        match self.outbound.send(OutboundCommand::command(line)).await {
            Ok(()) => Ok(true),
            Err(error) => {
                self.clear_waiting().await;
                Err(error)
            }
        }
    }

    /// Request command completion for the current input.
    ///
    /// Deliberately not gated by the in-flight state: completions may be
    /// requested at any time and never transition it. Their responses come
    /// back through the normal text path and may clear an unrelated
    /// in-flight command, an accepted race.
    pub async fn autocomplete(&self, raw_input: &str) -> Result<(), SendError> {
        if raw_input.is_empty() {
            return Ok(());
        }
        self.outbound
            .send(OutboundCommand::autocomplete(raw_input))
            .await
    }

    /// Handle the quit affordance.
    ///
    /// On a confirmed quit the unload prompt is disarmed and the caller
    /// gets the navigation target that ends the session; a declined quit
    /// has no side effects.
    pub fn confirm_quit(&mut self, confirmed: bool) -> Option<Url> {
        if !confirmed {
            return None;
        }
        self.session.unload_guard = false;
        Some(self.endpoints.quit())
    }

    /// Process one transport event.
    pub async fn dispatch(&mut self, event: ChannelEvent) {
        match event {
            ChannelEvent::State(state) => self.on_transport_state(state).await,
            ChannelEvent::Inbound(event) => self.on_inbound(event).await,
        }
    }

    async fn on_transport_state(&mut self, state: TransportState) {
        tracing::info!(?state, "transport state changed");
        if let TransportState::Closed(reason) = &state {
            self.session.waiting = false;
            let mut ui = self.ui.lock().await;
            render::apply_connection_lost(&mut ui, reason);
        }
        self.session.transport = state;
    }

    async fn on_inbound(&mut self, event: ServerEvent) {
        if matches!(event, ServerEvent::Connected) {
            tracing::info!("server acknowledged the connection");
            return;
        }

        let clears_waiting = matches!(event, ServerEvent::Text(_) | ServerEvent::Error { .. });
        let kick_scroll = matches!(&event, ServerEvent::Text(text) if !text.text.is_empty());

        {
            let mut ui = self.ui.lock().await;
            render::apply(&mut ui, &mut self.roster, &event, &self.config);
        }

        if clears_waiting {
            self.clear_waiting().await;
        }
        if kick_scroll {
            self.scroll.kick(Arc::clone(&self.ui));
        }
    }

    async fn clear_waiting(&mut self) {
        self.session.waiting = false;
        let mut ui = self.ui.lock().await;
        ui.input.waiting_indicator = false;
        ui.input.focus_requested = true;
        // A terminal transport failure keeps input disabled for good
        if !matches!(self.session.transport, TransportState::Closed(_)) {
            ui.input.enabled = true;
        }
    }
}
