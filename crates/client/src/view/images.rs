//! Image slots: location picture, NPC portraits, and data-message targets.
//!
//! Slots are addressed by id. A slot whose image failed to load is hidden
//! rather than left showing a broken image.

use std::collections::HashMap;

/// Fixed resource base path images resolve against.
pub const RESOURCE_BASE: &str = "resources/";

/// Image extension used for derived file names.
pub const IMAGE_EXT: &str = ".jpg";

/// Slot id of the location picture.
pub const LOCATION_SLOT: &str = "location";

/// Slot a data message targets when it carries no id.
pub const DEFAULT_DATA_SLOT: &str = "portrait";

/// Slot id for NPC portrait slot `index`.
pub fn npc_slot_id(index: usize) -> String {
    format!("npc-{index}")
}

/// Derive an image file name from a display label: lower-cased, spaces
/// replaced with underscores, fixed extension.
pub fn derived_image_file(label: &str) -> String {
    format!("{}{IMAGE_EXT}", label.to_lowercase().replace(' ', "_"))
}

/// Resolve a file name against the resource base.
pub fn resource_path(file: &str) -> String {
    format!("{RESOURCE_BASE}{file}")
}

/// One image affordance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSlot {
    pub source: Option<String>,
    pub visible: bool,
}

/// All image slots on the page, keyed by id.
#[derive(Debug, Default)]
pub struct ImageSlots {
    slots: HashMap<String, ImageSlot>,
}

impl ImageSlots {
    /// Point a slot at a new source and show it.
    pub fn set_source(&mut self, id: &str, source: impl Into<String>) {
        let slot = self.slots.entry(id.to_string()).or_default();
        slot.source = Some(source.into());
        slot.visible = true;
    }

    pub fn hide(&mut self, id: &str) {
        self.slots.entry(id.to_string()).or_default().visible = false;
    }

    /// Front-end callback for a failed image load: hide instead of showing
    /// a broken image.
    pub fn mark_load_failed(&mut self, id: &str) {
        tracing::debug!(slot = id, "image failed to load, hiding slot");
        self.hide(id);
    }

    pub fn get(&self, id: &str) -> Option<&ImageSlot> {
        self.slots.get(id)
    }
}
