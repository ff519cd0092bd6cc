//! Stack of currently held keys.
//!
//! Held keys are kept as a linked list, used as a LIFO stack for monosynth-like behaviour:
//!
//! - C4 pressed and held -> C4 is played.
//! - C5 pressed while holding C4 -> C5 is played.
//! - G4 pressed while holding C4 and C5 -> G4 is played.
//! - C5 released -> G4 is still played.
//! - G4 released -> C4 is played.
//!
//! List nodes live in a fixed pool, links are indices into that pool. A second index array
//! keeps the held keys sorted by ascending pitch for random access to the n-th lowest key.

// Based on GPL-licensed code (c) 2009 by Emilie Gillet (emilie.o.gillet@gmail.com)

/// Maximum number of simultaneously held keys.
pub const NOTE_STACK_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteEntry {
    pub note: u8,
    pub velocity: u8,
    next: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct NoteStack {
    pool: [Option<NoteEntry>; NOTE_STACK_SIZE],
    root: Option<usize>,
    sorted: [usize; NOTE_STACK_SIZE],
    size: usize,
}

impl Default for NoteStack {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteStack {
    pub fn new() -> Self {
        Self {
            pool: [None; NOTE_STACK_SIZE],
            root: None,
            sorted: [0; NOTE_STACK_SIZE],
            size: 0,
        }
    }

    pub fn init(&mut self) {
        self.clear();
    }

    pub fn note_on(&mut self, note: u8, velocity: u8) {
        // Remove the note from the list first (in case it is already here).
        self.note_off(note);

        // In case of saturation, remove the least recently played note.
        if self.size == NOTE_STACK_SIZE {
            if let Some(least_recent) = self.least_recent_note() {
                self.note_off(least_recent.note);
            }
        }

        let Some(free_slot) = self.pool.iter().position(Option::is_none) else {
            return;
        };
        self.pool[free_slot] = Some(NoteEntry {
            note,
            velocity,
            next: self.root,
        });
        self.root = Some(free_slot);

        // Insert into the sorted index before the first higher note.
        let position = self.sorted[..self.size]
            .iter()
            .position(|&slot| self.pool[slot].is_some_and(|entry| entry.note > note))
            .unwrap_or(self.size);
        self.sorted.copy_within(position..self.size, position + 1);
        self.sorted[position] = free_slot;
        self.size += 1;
    }

    /// Removes `note` from the stack. Does nothing if the note is not held.
    pub fn note_off(&mut self, note: u8) {
        let mut current = self.root;
        let mut previous = None;
        while let Some(slot) = current {
            let Some(entry) = self.pool[slot] else {
                return;
            };
            if entry.note == note {
                break;
            }
            previous = current;
            current = entry.next;
        }

        let Some(slot) = current else {
            return;
        };
        let next = self.pool[slot].and_then(|entry| entry.next);
        match previous.and_then(|p| self.pool[p].as_mut()) {
            Some(previous_entry) => previous_entry.next = next,
            None => self.root = next,
        }

        if let Some(position) = self.sorted[..self.size].iter().position(|&s| s == slot) {
            self.sorted.copy_within(position + 1..self.size, position);
        }
        self.pool[slot] = None;
        self.size -= 1;
    }

    pub fn clear(&mut self) {
        self.pool = [None; NOTE_STACK_SIZE];
        self.sorted = [0; NOTE_STACK_SIZE];
        self.root = None;
        self.size = 0;
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn max_size(&self) -> usize {
        NOTE_STACK_SIZE
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns `true` if `note` is currently held.
    pub fn contains(&self, note: u8) -> bool {
        self.iter().any(|entry| entry.note == note)
    }

    pub fn most_recent_note(&self) -> Option<NoteEntry> {
        self.root.and_then(|slot| self.pool[slot])
    }

    pub fn least_recent_note(&self) -> Option<NoteEntry> {
        self.iter().last().copied()
    }

    /// Held note by rank of ascending pitch, `0` being the lowest.
    pub fn sorted_note(&self, index: usize) -> Option<NoteEntry> {
        if index < self.size {
            self.pool[self.sorted[index]]
        } else {
            None
        }
    }

    /// Held note by play order, `0` being the least recently played.
    pub fn played_note(&self, index: usize) -> Option<NoteEntry> {
        if index < self.size {
            self.iter().nth(self.size - index - 1).copied()
        } else {
            None
        }
    }

    /// Iterates over the held notes from most to least recently played.
    pub fn iter(&self) -> NoteStackIter<'_> {
        NoteStackIter {
            stack: self,
            current: self.root,
        }
    }
}

#[derive(Debug)]
pub struct NoteStackIter<'a> {
    stack: &'a NoteStack,
    current: Option<usize>,
}

impl<'a> Iterator for NoteStackIter<'a> {
    type Item = &'a NoteEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.stack.pool[self.current?].as_ref()?;
        self.current = entry.next;
        Some(entry)
    }
}
