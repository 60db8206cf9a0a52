//! Easel History
//!
//! Linear undo/redo over owned snapshot entries.
//!
//! Recording after an undo discards everything past the cursor, so redo
//! information is lost once a new action branches off.

use std::collections::VecDeque;

/// Undo/redo availability reported to the UI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HistoryStatus {
    pub can_undo: bool,
    pub can_redo: bool,
}

/// Linear history with a cursor
#[derive(Debug, Clone)]
pub struct History<E> {
    entries: VecDeque<E>,
    cursor: usize,
    limit: Option<usize>,
}

impl<E> History<E> {
    /// Unbounded history
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            cursor: 0,
            limit: None,
        }
    }

    /// History that keeps at most `limit` entries, dropping the oldest
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit.max(1)),
            ..Self::new()
        }
    }

    /// Append an entry after the cursor and move the cursor onto it
    pub fn record(&mut self, entry: E) {
        if !self.entries.is_empty() {
            let discarded = self.entries.len() - (self.cursor + 1);
            if discarded > 0 {
                tracing::debug!("Discarding {} redo entries", discarded);
            }
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push_back(entry);

        if let Some(limit) = self.limit {
            while self.entries.len() > limit {
                self.entries.pop_front();
            }
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Step back, returning the entry to restore
    pub fn undo(&mut self) -> Option<&E> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Step forward, returning the entry to restore
    pub fn redo(&mut self) -> Option<&E> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty() && self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        !self.entries.is_empty() && self.cursor < self.entries.len() - 1
    }

    pub fn status(&self) -> HistoryStatus {
        HistoryStatus {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }

    /// Entry under the cursor
    pub fn current(&self) -> Option<&E> {
        self.entries.get(self.cursor)
    }

    /// Cursor position, `None` while empty
    pub fn cursor(&self) -> Option<usize> {
        (!self.entries.is_empty()).then_some(self.cursor)
    }

    pub fn entries(&self) -> impl Iterator<Item = &E> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}

impl<E> Default for History<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(entries: &[&'static str]) -> History<&'static str> {
        let mut h = History::new();
        for e in entries {
            h.record(*e);
        }
        h
    }

    #[test]
    fn test_empty_history() {
        let mut h: History<u32> = History::new();
        assert_eq!(h.status(), HistoryStatus::default());
        assert_eq!(h.cursor(), None);
        assert_eq!(h.undo(), None);
        assert_eq!(h.redo(), None);
    }

    #[test]
    fn test_record_moves_cursor_to_end() {
        let mut h = history(&["A"]);
        assert_eq!(h.cursor(), Some(0));
        assert!(!h.can_undo());

        h.record("B");
        assert_eq!(h.cursor(), Some(h.len() - 1));
        assert_eq!(h.status(), HistoryStatus { can_undo: true, can_redo: false });
    }

    #[test]
    fn test_undo_redo() {
        let mut h = history(&["A", "B", "C"]);
        assert_eq!(h.undo(), Some(&"B"));
        assert_eq!(h.undo(), Some(&"A"));
        assert_eq!(h.undo(), None);
        assert_eq!(h.cursor(), Some(0));

        assert_eq!(h.redo(), Some(&"B"));
        assert_eq!(h.redo(), Some(&"C"));
        assert_eq!(h.redo(), None);
        assert_eq!(h.current(), Some(&"C"));
    }

    #[test]
    fn test_truncation_on_branch() {
        let mut h = history(&["A", "B", "C"]);
        h.undo();
        h.record("D");

        assert_eq!(h.entries().copied().collect::<Vec<_>>(), vec!["A", "B", "D"]);
        assert_eq!(h.redo(), None);
        assert_eq!(h.undo(), Some(&"B"));
        assert_eq!(h.redo(), Some(&"D"));
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut h = History::with_limit(3);
        for n in 0..5 {
            h.record(n);
        }
        assert_eq!(h.entries().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(h.cursor(), Some(2));
        assert_eq!(h.undo(), Some(&3));
        assert_eq!(h.undo(), Some(&2));
        assert_eq!(h.undo(), None);
    }

    #[test]
    fn test_limit_after_undo() {
        let mut h = History::with_limit(2);
        h.record(1);
        h.record(2);
        h.undo();
        h.record(3);
        assert_eq!(h.entries().copied().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(h.cursor(), Some(1));
    }

    #[test]
    fn test_clear() {
        let mut h = history(&["A", "B"]);
        h.clear();
        assert!(h.is_empty());
        assert_eq!(h.status(), HistoryStatus::default());
    }
}
