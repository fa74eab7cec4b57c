//! The transcript pane: an append-only sequence of entries plus a scroll
//! position the animator advances toward the end.

/// One block in the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEntry {
    /// Ordinary narrative text from the server
    Text(String),
    /// Application-level error reported by the server
    ServerError(String),
    /// Terminal transport failure notice
    ConnectionNotice(String),
}

impl TranscriptEntry {
    pub fn content(&self) -> &str {
        match self {
            TranscriptEntry::Text(s)
            | TranscriptEntry::ServerError(s)
            | TranscriptEntry::ConnectionNotice(s) => s,
        }
    }
}

/// Transcript contents and scroll state.
///
/// The scroll offset is measured in lines. Appending grows the height;
/// the animator advances `scroll_top` toward `scroll_height` in fixed
/// steps, and clearing resets both.
#[derive(Debug, Default)]
pub struct TranscriptView {
    entries: Vec<TranscriptEntry>,
    scroll_top: usize,
    scroll_height: usize,
    user_scrolling: bool,
}

impl TranscriptView {
    pub fn append_text(&mut self, text: &str) {
        self.grow(text);
        self.entries.push(TranscriptEntry::Text(text.to_string()));
    }

    pub fn append_server_error(&mut self, detail: &str) {
        self.grow(detail);
        self.entries
            .push(TranscriptEntry::ServerError(detail.to_string()));
    }

    pub fn append_connection_notice(&mut self, notice: &str) {
        self.grow(notice);
        self.entries
            .push(TranscriptEntry::ConnectionNotice(notice.to_string()));
    }

    /// Wipe everything and reset the scroll position to the top.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.scroll_top = 0;
        self.scroll_height = 0;
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|e| e.content().contains(needle))
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn scroll_height(&self) -> usize {
        self.scroll_height
    }

    pub fn set_user_scrolling(&mut self, scrolling: bool) {
        self.user_scrolling = scrolling;
    }

    pub fn user_scrolling(&self) -> bool {
        self.user_scrolling
    }

    /// Advance the scroll offset by one animation step.
    ///
    /// Returns true while more remains; the offset never overshoots the end.
    pub fn advance_scroll(&mut self, step: usize) -> bool {
        if self.scroll_top >= self.scroll_height {
            return false;
        }
        self.scroll_top = (self.scroll_top + step).min(self.scroll_height);
        self.scroll_top < self.scroll_height
    }

    /// Snap straight to the end (error blocks do not animate).
    pub fn jump_to_end(&mut self) {
        self.scroll_top = self.scroll_height;
    }

    pub fn caught_up(&self) -> bool {
        self.scroll_top >= self.scroll_height
    }

    fn grow(&mut self, text: &str) {
        self.scroll_height += text.lines().count().max(1);
    }
}
