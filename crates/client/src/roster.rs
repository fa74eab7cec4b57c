//! Roster state: NPCs, items, exits, and the two selection dropdowns.
//!
//! The roster is the client's mirror of whatever the server last reported
//! for the player's location. NPC names project onto a fixed number of
//! portrait slots and onto the target dropdown; items and exits are opaque
//! display strings.

use crate::compose::{NO_ACTION, NO_TARGET};

/// Number of NPC portrait slots on the page.
pub const NPC_SLOT_COUNT: usize = 4;

/// Fixed verb list for the action dropdown, independent of server state.
pub const ACTION_VERBS: &[&str] = &[
    "say", "give", "take", "use", "attack", "look", "examine", "open", "close", "loot", "wear",
    "wield",
];

/// One NPC portrait slot: its computed name and whether it should be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotView {
    pub name: String,
    pub visible: bool,
}

/// A selection dropdown with a synthetic "none" entry that is always first.
///
/// Repopulation preserves the previous selection when the value survives
/// into the new option set, otherwise the selection resets to the sentinel.
#[derive(Debug, Clone)]
pub struct Dropdown {
    sentinel: String,
    options: Vec<String>,
    selected: String,
}

impl Dropdown {
    pub fn new(sentinel: impl Into<String>) -> Self {
        let sentinel = sentinel.into();
        Self {
            options: vec![sentinel.clone()],
            selected: sentinel.clone(),
            sentinel,
        }
    }

    /// Replace the option set (sentinel stays first), keeping the current
    /// selection iff it still exists.
    pub fn repopulate(&mut self, values: impl IntoIterator<Item = String>) {
        let previous = std::mem::take(&mut self.selected);
        self.options.clear();
        self.options.push(self.sentinel.clone());
        self.options.extend(values);
        self.selected = if self.options.iter().any(|o| *o == previous) {
            previous
        } else {
            self.sentinel.clone()
        };
    }

    /// Select a value; ignored unless it is one of the current options.
    pub fn select(&mut self, value: &str) -> bool {
        if self.options.iter().any(|o| o == value) {
            self.selected = value.to_string();
            true
        } else {
            false
        }
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// The selection as the composer sees it: `None` for the sentinel.
    pub fn selection(&self) -> Option<&str> {
        (self.selected != self.sentinel).then_some(self.selected.as_str())
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }
}

/// The synchronized set of NPCs, items, exits, and available actions.
#[derive(Debug, Clone)]
pub struct RosterModel {
    npcs: Vec<String>,
    items: String,
    exits: String,
    npc_dropdown: Dropdown,
    action_dropdown: Dropdown,
}

impl RosterModel {
    pub fn new() -> Self {
        let mut action_dropdown = Dropdown::new(NO_ACTION);
        action_dropdown.repopulate(ACTION_VERBS.iter().map(|v| (*v).to_string()));
        Self {
            npcs: Vec::new(),
            items: String::new(),
            exits: String::new(),
            npc_dropdown: Dropdown::new(NO_TARGET),
            action_dropdown,
        }
    }

    /// Update the NPC set from the wire's comma-delimited form.
    pub fn set_npcs(&mut self, csv: &str) {
        self.npcs = csv
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect();
        self.npc_dropdown.repopulate(self.npcs.iter().cloned());
    }

    pub fn npcs(&self) -> &[String] {
        &self.npcs
    }

    /// Project the NPC list onto exactly [`NPC_SLOT_COUNT`] display slots:
    /// padded with empty placeholders, truncated beyond the slot count.
    pub fn slots(&self) -> [SlotView; NPC_SLOT_COUNT] {
        std::array::from_fn(|i| {
            let name = self.npcs.get(i).cloned().unwrap_or_default();
            let visible = !name.is_empty();
            SlotView { name, visible }
        })
    }

    pub fn set_items(&mut self, items: &str) {
        self.items = items.to_string();
    }

    pub fn items(&self) -> &str {
        &self.items
    }

    pub fn set_exits(&mut self, exits: &str) {
        self.exits = exits.to_string();
    }

    pub fn exits(&self) -> &str {
        &self.exits
    }

    pub fn npc_dropdown(&self) -> &Dropdown {
        &self.npc_dropdown
    }

    pub fn npc_dropdown_mut(&mut self) -> &mut Dropdown {
        &mut self.npc_dropdown
    }

    pub fn action_dropdown(&self) -> &Dropdown {
        &self.action_dropdown
    }

    pub fn action_dropdown_mut(&mut self) -> &mut Dropdown {
        &mut self.action_dropdown
    }

    pub fn selected_verb(&self) -> Option<&str> {
        self.action_dropdown.selection()
    }

    pub fn selected_target(&self) -> Option<&str> {
        self.npc_dropdown.selection()
    }
}

impl Default for RosterModel {
    fn default() -> Self {
        Self::new()
    }
}
