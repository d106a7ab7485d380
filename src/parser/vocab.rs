use tracing::debug;

use super::lines::{self, LineCursor};
use crate::record::{Component, VocabEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VocabState {
    /// Before the first entry.
    Main,
    /// Reading continuation lines of the current entry.
    Entry,
    /// After a "Component Breakdown" marker, until the first non-bullet line.
    Components,
}

struct VocabScanner {
    state: VocabState,
    current: Option<VocabEntry>,
    entries: Vec<VocabEntry>,
}

/// Parse the vocabulary region into entries, in order of appearance.
pub fn parse_vocabulary(cursor: LineCursor<'_>) -> Vec<VocabEntry> {
    let mut scanner = VocabScanner {
        state: VocabState::Main,
        current: None,
        entries: Vec::new(),
    };
    for line in cursor {
        scanner.scan(line);
    }
    scanner.finish()
}

impl VocabScanner {
    fn scan(&mut self, line: &str) {
        if self.state == VocabState::Components {
            if lines::is_bullet(line) {
                self.component_line(line);
                return;
            }
            self.state = VocabState::Entry;
        }

        if let Some(gloss) = lines::primary_bullet(line) {
            self.flush();
            self.current = Some(VocabEntry {
                word: gloss.word,
                reading: gloss.reading,
                meaning: gloss.meaning,
                role: gloss.role,
                ..Default::default()
            });
            self.state = VocabState::Entry;
            return;
        }

        if self.state == VocabState::Main {
            return;
        }
        self.entry_line(line);
    }

    fn entry_line(&mut self, line: &str) {
        let Some(entry) = self.current.as_mut() else {
            return;
        };

        if lines::is_component_marker(line) {
            self.state = VocabState::Components;
        } else if let Some(text) = lines::contribution(line) {
            entry.combined_explanation = text.to_string();
        } else if let Some(text) = lines::strip_bullet(line) {
            append_explanation(entry, text);
        } else if !line.is_empty() && !lines::is_rule(line) {
            append_explanation(entry, line);
        }
    }

    fn component_line(&mut self, line: &str) {
        let Some(entry) = self.current.as_mut() else {
            return;
        };

        if let Some(text) = lines::contribution(line) {
            entry.combined_explanation = text.to_string();
        } else if let Some(gloss) = lines::any_bullet(line) {
            entry.components.push(Component {
                part: gloss.word,
                reading: gloss.reading,
                meaning: gloss.meaning,
                contribution: gloss.role,
            });
        } else {
            debug!("dropped component line for {}: {}", entry.word, line);
        }
    }

    fn flush(&mut self) {
        if let Some(entry) = self.current.take() {
            self.entries.push(entry);
        }
    }

    fn finish(mut self) -> Vec<VocabEntry> {
        self.flush();
        self.entries
    }
}

/// Stray lines extend the explanation; they never replace it.
fn append_explanation(entry: &mut VocabEntry, text: &str) {
    if text.is_empty() {
        return;
    }
    if !entry.combined_explanation.is_empty() {
        entry.combined_explanation.push(' ');
    }
    entry.combined_explanation.push_str(text);
}
