//! # Transcript
//!
//! Ordered, append-only list of conversation entries. Insertion order is
//! display order. The only non-append mutations are inserting/removing the
//! typing placeholder and clearing the whole history.
//!
//! ```text
//! Transcript
//! ├── entries: Vec<Entry>          // (handle, message) in display order
//! ├── placeholder: Option<Handle>  // at most one, always
//! ├── next_handle: u64             // handles are never reused
//! └── revision: u64                // bumped on every mutation
//! ```
//!
//! The transcript does not scroll anything itself. Every mutation bumps
//! `revision`; the message list compares it against the last revision it
//! rendered and re-pins to the bottom once the new layout is measured.

use log::debug;

use crate::core::message::Message;

/// Opaque reference to a transcript entry, valid until that entry is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryHandle(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub handle: EntryHandle,
    pub message: Message,
}

#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<Entry>,
    placeholder: Option<EntryHandle>,
    next_handle: u64,
    revision: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `message` at the end and returns its handle.
    ///
    /// Placeholder messages must go through [`show_placeholder`](Self::show_placeholder);
    /// a placeholder passed here is routed there so the single-placeholder
    /// invariant holds.
    pub fn append(&mut self, message: Message) -> EntryHandle {
        if message.is_placeholder {
            return self.show_placeholder();
        }
        let handle = self.push(message);
        debug!("Transcript append {:?} (len={})", handle, self.entries.len());
        handle
    }

    /// Shows the typing placeholder at the end. Idempotent: returns the
    /// existing handle if one is already shown.
    pub fn show_placeholder(&mut self) -> EntryHandle {
        if let Some(handle) = self.placeholder {
            return handle;
        }
        let handle = self.push(Message::placeholder());
        self.placeholder = Some(handle);
        debug!("Transcript placeholder shown {:?}", handle);
        handle
    }

    /// Removes the placeholder if present. Never touches normal messages.
    pub fn remove_placeholder(&mut self) {
        let Some(handle) = self.placeholder.take() else {
            return;
        };
        self.entries.retain(|entry| entry.handle != handle);
        self.revision += 1;
        debug!("Transcript placeholder removed {:?}", handle);
    }

    /// Drops every entry, placeholder included. Handles keep counting up.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.placeholder = None;
        self.revision += 1;
    }

    pub fn get(&self, handle: EntryHandle) -> Option<&Message> {
        self.entries
            .iter()
            .find(|entry| entry.handle == handle)
            .map(|entry| &entry.message)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn placeholder(&self) -> Option<EntryHandle> {
        self.placeholder
    }

    pub fn placeholder_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.message.is_placeholder)
            .count()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn push(&mut self, message: Message) -> EntryHandle {
        let handle = EntryHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push(Entry { handle, message });
        self.revision += 1;
        handle
    }
}
