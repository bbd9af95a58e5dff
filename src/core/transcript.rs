//! Append-only chat transcript.
//!
//! Entries are only ever pushed, with one exception: typing placeholders,
//! which are removed through the [`PlaceholderHandle`] returned when they were
//! added. The handle is consumed by [`Transcript::remove_placeholder`], so a
//! placeholder can be removed at most once.

use std::time::{Duration, Instant};

use crate::core::constants::LOADER_DURATION;
use crate::core::message::TranscriptRole;
use crate::ui::markdown::{render_reply, CodeBlock, RenderedReply};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u64);

impl EntryId {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Address of one code block inside one assistant entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CodeBlockId {
    pub entry: EntryId,
    pub index: usize,
}

/// Owner token for a typing placeholder. Deliberately neither `Clone` nor
/// `Copy`.
#[derive(Debug, PartialEq, Eq)]
pub struct PlaceholderHandle(EntryId);

impl PlaceholderHandle {
    pub fn entry_id(&self) -> EntryId {
        self.0
    }
}

/// Cosmetic progress animation with a fixed length. It is not tied to any
/// real work and simply stops drawing once `duration` has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderAnimation {
    pub started_at: Instant,
    pub duration: Duration,
}

impl LoaderAnimation {
    pub fn starting_at(started_at: Instant) -> Self {
        Self {
            started_at,
            duration: LOADER_DURATION,
        }
    }

    /// Fraction in `0.0..=1.0`, or `None` once the animation has finished.
    pub fn progress(&self, now: Instant) -> Option<f32> {
        let elapsed = now.saturating_duration_since(self.started_at);
        if elapsed >= self.duration {
            return None;
        }
        Some(elapsed.as_secs_f32() / self.duration.as_secs_f32())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntryBody {
    /// Literal user text, never interpreted as markup.
    User { text: String },
    SystemNote {
        text: String,
        loader: Option<LoaderAnimation>,
    },
    Assistant {
        source: String,
        reply: RenderedReply,
    },
    Typing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    pub id: EntryId,
    pub body: EntryBody,
}

impl TranscriptEntry {
    pub fn role(&self) -> TranscriptRole {
        match self.body {
            EntryBody::User { .. } => TranscriptRole::User,
            EntryBody::SystemNote { .. } => TranscriptRole::SystemNote,
            EntryBody::Assistant { .. } => TranscriptRole::Assistant,
            EntryBody::Typing => TranscriptRole::Typing,
        }
    }

    /// Plain text used for logs and exports.
    pub fn text(&self) -> &str {
        match &self.body {
            EntryBody::User { text } | EntryBody::SystemNote { text, .. } => text,
            EntryBody::Assistant { source, .. } => source,
            EntryBody::Typing => "",
        }
    }

    pub fn reply(&self) -> Option<&RenderedReply> {
        match &self.body {
            EntryBody::Assistant { reply, .. } => Some(reply),
            _ => None,
        }
    }
}

/// Whether the view should pin to the newest entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollState {
    pub follow: bool,
    /// Lines scrolled up from the bottom while not following.
    pub offset_from_bottom: u16,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            follow: true,
            offset_from_bottom: 0,
        }
    }
}

#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
    next_id: u64,
    scroll: ScrollState,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: EntryId) -> Option<&TranscriptEntry> {
        self.entries
            .binary_search_by_key(&id, |entry| entry.id)
            .ok()
            .map(|index| &self.entries[index])
    }

    pub fn append_user_message(&mut self, text: impl Into<String>) -> EntryId {
        self.push(EntryBody::User { text: text.into() })
    }

    /// Append a system note. With `with_loader`, a fixed-length cosmetic
    /// loader starting at `now` is drawn under it.
    pub fn append_system_note(
        &mut self,
        text: impl Into<String>,
        with_loader: bool,
        now: Instant,
    ) -> EntryId {
        self.push(EntryBody::SystemNote {
            text: text.into(),
            loader: with_loader.then(|| LoaderAnimation::starting_at(now)),
        })
    }

    pub fn append_assistant_message(&mut self, markdown: impl Into<String>) -> EntryId {
        let source = markdown.into();
        let reply = render_reply(&source);
        self.push(EntryBody::Assistant { source, reply })
    }

    pub fn append_typing_placeholder(&mut self) -> PlaceholderHandle {
        PlaceholderHandle(self.push(EntryBody::Typing))
    }

    /// Remove a placeholder. Returns `false` if it was already gone.
    pub fn remove_placeholder(&mut self, handle: PlaceholderHandle) -> bool {
        let Ok(index) = self
            .entries
            .binary_search_by_key(&handle.0, |entry| entry.id)
        else {
            return false;
        };
        if self.entries[index].body != EntryBody::Typing {
            return false;
        }
        self.entries.remove(index);
        true
    }

    pub fn code_block(&self, id: CodeBlockId) -> Option<&CodeBlock> {
        self.get(id.entry)?.reply()?.code_block(id.index)
    }

    /// Every code block currently in the transcript, in display order.
    pub fn code_block_ids(&self) -> Vec<CodeBlockId> {
        self.entries
            .iter()
            .filter_map(|entry| entry.reply().map(|reply| (entry.id, reply)))
            .flat_map(|(entry, reply)| {
                (0..reply.code_block_count()).map(move |index| CodeBlockId { entry, index })
            })
            .collect()
    }

    pub fn typing_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.body == EntryBody::Typing)
            .count()
    }

    pub fn scroll(&self) -> ScrollState {
        self.scroll
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll.follow = false;
        self.scroll.offset_from_bottom = self.scroll.offset_from_bottom.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll.offset_from_bottom = self.scroll.offset_from_bottom.saturating_sub(lines);
        if self.scroll.offset_from_bottom == 0 {
            self.scroll.follow = true;
        }
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = ScrollState::default();
    }

    /// Clamp the scroll-back offset once the renderer knows how far it can go.
    pub fn clamp_scroll(&mut self, max_offset: u16) {
        if self.scroll.offset_from_bottom > max_offset {
            self.scroll.offset_from_bottom = max_offset;
        }
    }

    fn push(&mut self, body: EntryBody) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        self.entries.push(TranscriptEntry { id, body });
        self.scroll_to_bottom();
        id
    }
}
