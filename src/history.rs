//! Linear undo/redo history of scene snapshots.

use crate::draw::Snapshot;

/// Undo/redo availability published after every history change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Availability {
    pub can_undo: bool,
    pub can_redo: bool,
}

/// Ordered list of snapshots with a cursor.
///
/// The entry at `index` always mirrors the live scene content. `index == 0`
/// points at the oldest retained snapshot (initially the empty canvas).
#[derive(Debug)]
pub struct History {
    entries: Vec<Snapshot>,
    index: usize,
    /// Maximum retained entries (0 = unlimited)
    max_entries: usize,
}

impl History {
    /// Creates a history seeded with the initial (usually empty) scene snapshot.
    pub fn new(initial: Snapshot) -> Self {
        Self::with_limit(initial, 0)
    }

    /// Creates a history that keeps at most `max_entries` snapshots (0 = unlimited).
    pub fn with_limit(initial: Snapshot, max_entries: usize) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
            max_entries,
        }
    }

    /// Records a new snapshot, discarding any redo branch.
    pub fn commit(&mut self, snapshot: Snapshot) -> Availability {
        self.entries.truncate(self.index + 1);
        self.entries.push(snapshot);
        self.index = self.entries.len() - 1;

        if self.max_entries > 0 && self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(..excess);
            self.index -= excess;
            log::debug!("History limit reached, dropped {} oldest entries", excess);
        }
        self.availability()
    }

    /// Steps back one entry and returns the snapshot to restore.
    ///
    /// Returns `None` (and changes nothing) when already at the oldest entry.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.entries.get(self.index)
    }

    /// Steps forward one entry and returns the snapshot to restore.
    ///
    /// Returns `None` (and changes nothing) when already at the newest entry.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.entries.get(self.index)
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn availability(&self) -> Availability {
        Availability {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Snapshot at the cursor.
    pub fn current(&self) -> Option<&Snapshot> {
        self.entries.get(self.index)
    }

    /// Drops all entries and starts over from `initial`.
    pub fn reset(&mut self, initial: Snapshot) {
        self.entries.clear();
        self.entries.push(initial);
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{Scene, WHITE};

    fn snapshot(n: usize) -> Snapshot {
        // Distinct snapshots come from scenes with different sizes of content.
        let mut scene = Scene::new(10, 10, WHITE);
        for i in 0..n {
            scene.add_object(crate::draw::create_object(
                crate::draw::Shape::Line {
                    x1: i as f64,
                    y1: 0.0,
                    x2: 1.0,
                    y2: 1.0,
                },
                Default::default(),
                crate::draw::ObjectRole::Content,
            ));
        }
        scene.serialize().unwrap()
    }

    #[test]
    fn fresh_history_has_nothing_to_undo() {
        let mut history = History::new(snapshot(0));
        assert_eq!(history.availability(), Availability::default());
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn undo_then_redo_walks_entries() {
        let mut history = History::new(snapshot(0));
        for n in 1..=3 {
            history.commit(snapshot(n));
        }
        assert_eq!(history.undo(), Some(&snapshot(2)));
        assert_eq!(history.undo(), Some(&snapshot(1)));
        assert_eq!(history.undo(), Some(&snapshot(0)));
        assert!(history.undo().is_none());
        assert_eq!(history.redo(), Some(&snapshot(1)));
        assert_eq!(history.redo(), Some(&snapshot(2)));
        assert_eq!(history.redo(), Some(&snapshot(3)));
        assert!(!history.can_redo());
    }

    #[test]
    fn commit_after_undo_discards_redo_branch() {
        let mut history = History::new(snapshot(0));
        history.commit(snapshot(1));
        history.commit(snapshot(2));
        history.undo();
        let availability = history.commit(snapshot(3));
        assert!(availability.can_undo);
        assert!(!availability.can_redo);
        assert!(history.redo().is_none());
        assert_eq!(history.len(), 3);
        assert_eq!(history.current(), Some(&snapshot(3)));
    }

    #[test]
    fn limit_drops_oldest_entries() {
        let mut history = History::with_limit(snapshot(0), 3);
        for n in 1..=5 {
            history.commit(snapshot(n));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.index(), 2);
        assert_eq!(history.undo(), Some(&snapshot(4)));
        assert_eq!(history.undo(), Some(&snapshot(3)));
        assert!(history.undo().is_none());
    }

    #[test]
    fn reset_returns_to_single_entry() {
        let mut history = History::new(snapshot(0));
        history.commit(snapshot(1));
        history.reset(snapshot(0));
        assert_eq!(history.len(), 1);
        assert!(!history.can_undo());
    }
}
