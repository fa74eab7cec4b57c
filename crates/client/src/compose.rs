//! Command composition.
//!
//! Builds the outbound command line from raw user text plus the optional
//! dropdown selections. Pure string work, no UI state, so it is directly
//! unit testable.

/// Sentinel shown in the action dropdown when no verb is selected.
pub const NO_ACTION: &str = "- - -";

/// Sentinel shown in the NPC dropdown when no target is selected.
pub const NO_TARGET: &str = "None";

/// Compose the wire command line.
///
/// Rules, in order:
/// - a selected verb (not the sentinel) is prepended with a separating space;
/// - a selected target (not the sentinel) is appended, spaces replaced with
///   underscores; if the text so far contains the substring `say` the target
///   is addressed with `" to "`, otherwise with a plain space.
///
/// The result is produced even for empty input; rejecting empty commands is
/// the server's job. Note `compose("", Some("say"), Some("Bob"))` yields
/// `"say  to Bob"` with a double space, a direct consequence of the
/// concatenation rules.
pub fn compose(raw_input: &str, selected_verb: Option<&str>, selected_target: Option<&str>) -> String {
    let mut line = String::new();

    if let Some(verb) = selected_verb.filter(|v| !v.is_empty() && *v != NO_ACTION) {
        line.push_str(verb);
        line.push(' ');
    }
    line.push_str(raw_input);

    if let Some(target) = selected_target.filter(|t| !t.is_empty() && *t != NO_TARGET) {
        let target = target.replace(' ', "_");
        // Substring heuristic, not a tokenized parse: "say" anywhere in the
        // text selects the addressed form.
        if line.contains("say") {
            line.push_str(" to ");
        } else {
            line.push(' ');
        }
        line.push_str(&target);
    }

    line
}
