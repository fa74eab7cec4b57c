//! Projects classified inbound events onto the UI state.
//!
//! Pure state mutation, no async: the controller locks [`UiState`], applies
//! the event, then decides whether to kick the scroll animator.

use taleway_protocol::{DataEvent, ServerEvent, TextEvent};

use crate::config::{EchoRevertPolicy, SessionConfig};
use crate::roster::RosterModel;
use crate::transport::CloseReason;

use super::images::{
    derived_image_file, npc_slot_id, resource_path, DEFAULT_DATA_SLOT, LOCATION_SLOT,
};
use super::UiState;

/// Apply one inbound event.
///
/// `Connected` is a transport-level hello with no visible effect here.
pub fn apply(ui: &mut UiState, roster: &mut RosterModel, event: &ServerEvent, config: &SessionConfig) {
    match event {
        ServerEvent::Connected => {}
        ServerEvent::Text(text) => apply_text(ui, roster, text, config),
        ServerEvent::Data(data) => apply_data(ui, data),
        ServerEvent::Error { detail } => apply_server_error(ui, detail),
    }
}

fn apply_text(ui: &mut UiState, roster: &mut RosterModel, text: &TextEvent, config: &SessionConfig) {
    // Flags first: a clear wipes before the new text lands, and both flags
    // are independent of each other.
    if text.special.clear {
        ui.transcript.clear();
    }
    if text.special.noecho {
        ui.input.masked = true;
    } else if config.echo_revert == EchoRevertPolicy::OnNextMessage {
        ui.input.masked = false;
    }

    if !text.text.is_empty() {
        // Location label updates unconditionally, even when unchanged.
        if let Some(location) = &text.location {
            set_location(ui, location, text.location_image.as_deref());
        }
        ui.transcript.append_text(&text.text);
    }

    if let Some(turns) = text.turns {
        ui.turns = Some(turns);
    }
    if let Some(npcs) = &text.npcs {
        roster.set_npcs(npcs);
        project_npc_slots(ui, roster);
        ui.roster_list = roster.npcs().to_vec();
    }
    if let Some(items) = &text.items {
        ui.items_pane = items.clone();
        roster.set_items(items);
    }
    if let Some(exits) = &text.exits {
        ui.exits_pane = exits.clone();
        roster.set_exits(exits);
    }
}

fn set_location(ui: &mut UiState, label: &str, image_file: Option<&str>) {
    ui.location_label = label.to_string();
    let file = match image_file {
        Some(file) if !file.is_empty() => file.to_string(),
        _ => derived_image_file(label),
    };
    ui.images.set_source(LOCATION_SLOT, resource_path(&file));
}

fn project_npc_slots(ui: &mut UiState, roster: &RosterModel) {
    for (index, slot) in roster.slots().iter().enumerate() {
        let id = npc_slot_id(index);
        if slot.visible {
            ui.images
                .set_source(&id, resource_path(&derived_image_file(&slot.name)));
        } else {
            ui.images.hide(&id);
        }
    }
}

fn apply_data(ui: &mut UiState, data: &DataEvent) {
    let slot = data.id.as_deref().unwrap_or(DEFAULT_DATA_SLOT);
    // Payload is opaque to this layer: set verbatim, no validation.
    ui.images.set_source(slot, data.payload.clone());
}

fn apply_server_error(ui: &mut UiState, detail: &str) {
    ui.transcript.append_server_error(detail);
    ui.transcript.jump_to_end();
}

/// Render a terminal transport failure: a notice in the transcript (never a
/// native alert) and input disabled for the rest of the session.
pub fn apply_connection_lost(ui: &mut UiState, reason: &CloseReason) {
    let notice = match reason {
        CloseReason::Closed => "Connection closed. Refresh the page to restore it.",
        CloseReason::Error(_) => "Connection error. Perhaps refreshing the page fixes it.",
    };
    ui.transcript.append_connection_notice(notice);
    ui.transcript.jump_to_end();
    ui.input.enabled = false;
    ui.input.waiting_indicator = false;
}

#[cfg(test)]
mod tests {
    use taleway_protocol::SpecialFlags;

    use super::*;

    fn text_event(text: &str) -> TextEvent {
        TextEvent {
            text: text.to_string(),
            ..TextEvent::default()
        }
    }

    #[test]
    fn full_text_event_updates_every_pane() {
        let mut ui = UiState::new();
        let mut roster = RosterModel::new();
        let config = SessionConfig::default();

        let event = ServerEvent::parse(
            r#"{"type":"text","text":"You see a sword.","location":"Armory","items":"sword","exits":"north","npcs":"Alice, Bob"}"#,
        )
        .expect("valid payload");
        apply(&mut ui, &mut roster, &event, &config);

        assert!(ui.transcript.contains("You see a sword."));
        assert_eq!(ui.location_label, "Armory");
        assert_eq!(ui.items_pane, "sword");
        assert_eq!(ui.exits_pane, "north");
        assert_eq!(
            ui.images.get(LOCATION_SLOT).expect("location slot").source.as_deref(),
            Some("resources/armory.jpg")
        );
        assert_eq!(ui.roster_list, ["Alice", "Bob"]);
        assert!(ui.images.get(&npc_slot_id(0)).expect("npc slot").visible);
        assert!(!ui.images.get(&npc_slot_id(2)).expect("npc slot").visible);
    }

    #[test]
    fn clear_and_noecho_apply_in_the_same_update() {
        let mut ui = UiState::new();
        let mut roster = RosterModel::new();
        let config = SessionConfig::default();
        ui.transcript.append_text("old text");

        let mut event = text_event("Password:");
        event.special = SpecialFlags { clear: true, noecho: true };
        apply(&mut ui, &mut roster, &ServerEvent::Text(event), &config);

        assert!(!ui.transcript.contains("old text"));
        assert!(ui.transcript.contains("Password:"));
        assert!(ui.input.masked);
        assert_eq!(ui.transcript.scroll_top(), 0);
    }

    #[test]
    fn masked_mode_is_sticky_under_the_default_policy() {
        let mut ui = UiState::new();
        let mut roster = RosterModel::new();
        let config = SessionConfig::default();

        let mut masked = text_event("Password:");
        masked.special = SpecialFlags { clear: false, noecho: true };
        apply(&mut ui, &mut roster, &ServerEvent::Text(masked), &config);
        apply(&mut ui, &mut roster, &ServerEvent::Text(text_event("Next.")), &config);

        assert!(ui.input.masked);
    }

    #[test]
    fn on_next_message_policy_reverts_masking() {
        let mut ui = UiState::new();
        let mut roster = RosterModel::new();
        let config = SessionConfig {
            echo_revert: EchoRevertPolicy::OnNextMessage,
        };

        let mut masked = text_event("Password:");
        masked.special = SpecialFlags { clear: false, noecho: true };
        apply(&mut ui, &mut roster, &ServerEvent::Text(masked), &config);
        assert!(ui.input.masked);

        apply(&mut ui, &mut roster, &ServerEvent::Text(text_event("Next.")), &config);
        assert!(!ui.input.masked);
    }

    #[test]
    fn explicit_location_image_wins_over_derivation() {
        let mut ui = UiState::new();
        let mut roster = RosterModel::new();
        let config = SessionConfig::default();

        let mut event = text_event("A windswept ridge.");
        event.location = Some("The Ridge".to_string());
        event.location_image = Some("ridge_at_dusk.jpg".to_string());
        apply(&mut ui, &mut roster, &ServerEvent::Text(event), &config);

        assert_eq!(
            ui.images.get(LOCATION_SLOT).expect("location slot").source.as_deref(),
            Some("resources/ridge_at_dusk.jpg")
        );
    }

    #[test]
    fn data_event_sets_the_named_slot_verbatim() {
        let mut ui = UiState::new();
        let mut roster = RosterModel::new();
        let config = SessionConfig::default();

        let event = ServerEvent::parse(r#"{"type":"data","id":"portrait","data":"<opaque>"}"#)
            .expect("valid payload");
        apply(&mut ui, &mut roster, &event, &config);

        assert_eq!(
            ui.images.get("portrait").expect("portrait slot").source.as_deref(),
            Some("<opaque>")
        );
        assert!(ui.transcript.entries().is_empty());
    }

    #[test]
    fn data_event_without_id_targets_the_default_slot() {
        let mut ui = UiState::new();
        let mut roster = RosterModel::new();
        let config = SessionConfig::default();

        let event = ServerEvent::parse(r#"{"type":"data","data":"pic"}"#).expect("valid payload");
        apply(&mut ui, &mut roster, &event, &config);

        assert_eq!(
            ui.images.get(DEFAULT_DATA_SLOT).expect("default slot").source.as_deref(),
            Some("pic")
        );
    }

    #[test]
    fn server_error_appends_without_touching_roster_or_location() {
        let mut ui = UiState::new();
        let mut roster = RosterModel::new();
        let config = SessionConfig::default();
        ui.location_label = "Armory".to_string();
        roster.set_npcs("Alice");

        apply(
            &mut ui,
            &mut roster,
            &ServerEvent::Error { detail: "boom".to_string() },
            &config,
        );

        assert!(ui.transcript.contains("boom"));
        assert_eq!(ui.location_label, "Armory");
        assert_eq!(roster.npcs(), ["Alice"]);
    }

    #[test]
    fn connection_loss_disables_input_and_leaves_a_notice() {
        let mut ui = UiState::new();
        apply_connection_lost(&mut ui, &CloseReason::Closed);

        assert!(!ui.input.enabled);
        assert!(ui.transcript.contains("Connection closed"));

        let mut ui = UiState::new();
        apply_connection_lost(&mut ui, &CloseReason::Error("reset".to_string()));
        assert!(ui.transcript.contains("Connection error"));
    }
}
