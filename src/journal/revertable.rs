//! A journal decorated with an undo history.

use super::{Journal, JournaledSequence};
use crate::errors::Error;

/// Wraps a [`Journal`] with a history stack so each `record_*` can be undone
/// in LIFO order; used while the base tree backtracks along a DFS path.
///
/// Each entry on the stack is a full snapshot of the prior entry list rather
/// than a minimal diff: entries are small and `Rc`-shared, so cloning the
/// list is cheap relative to the bookkeeping a true inverse-operation log
/// would need, and it makes `revert` trivially correct.
pub struct RevertableJournal<'r> {
    journal: Journal<'r>,
    history: Vec<Vec<super::Entry>>,
}

impl<'r> RevertableJournal<'r> {
    pub fn new(journal: Journal<'r>) -> Self {
        RevertableJournal { journal, history: Vec::new() }
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }

    pub fn record_insertion(&mut self, position: u64, seq: Vec<u8>) -> Result<(), Error> {
        let snapshot = self.journal.snapshot();
        self.journal.record_insertion(position, seq)?;
        self.history.push(snapshot);
        Ok(())
    }

    pub fn record_deletion(&mut self, first: u64, last: u64) -> Result<(), Error> {
        let snapshot = self.journal.snapshot();
        self.journal.record_deletion(first, last)?;
        self.history.push(snapshot);
        Ok(())
    }

    pub fn record_substitution(&mut self, position: u64, seq: Vec<u8>) -> Result<(), Error> {
        let snapshot = self.journal.snapshot();
        self.journal.record_substitution(position, seq)?;
        self.history.push(snapshot);
        Ok(())
    }

    /// Undoes the most recent `record_*` call.
    ///
    /// # Panics
    /// Panics if the history is empty; callers (the tree traverser) only
    /// call this once per matching `record_*`, so an empty history means a
    /// push/pop mismatch in the traversal itself.
    pub fn revert(&mut self) {
        let previous = self.history.pop().expect("revert called with empty journal history");
        self.journal.restore(previous);
    }

    pub fn sequence(&self) -> JournaledSequence<'_, 'r> {
        self.journal.sequence()
    }

    pub fn len(&self) -> u64 {
        self.journal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.journal.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revert_undoes_last_edit() {
        let journal = Journal::new(b"ACGTACGT");
        let mut revertable = RevertableJournal::new(journal);
        revertable.record_insertion(4, b"NN".to_vec()).unwrap();
        assert_eq!(revertable.sequence().to_vec(), b"ACGTNNACGT".to_vec());
        revertable.revert();
        assert_eq!(revertable.sequence().to_vec(), b"ACGTACGT".to_vec());
    }

    #[test]
    fn nested_edits_revert_in_lifo_order() {
        let journal = Journal::new(b"ACGTACGT");
        let mut revertable = RevertableJournal::new(journal);
        revertable.record_deletion(0, 2).unwrap();
        revertable.record_insertion(0, b"X".to_vec()).unwrap();
        assert_eq!(revertable.sequence().to_vec(), b"XGTACGT".to_vec());

        revertable.revert();
        assert_eq!(revertable.sequence().to_vec(), b"GTACGT".to_vec());
        revertable.revert();
        assert_eq!(revertable.sequence().to_vec(), b"ACGTACGT".to_vec());
        assert_eq!(revertable.depth(), 0);
    }

    #[test]
    #[should_panic]
    fn revert_without_history_panics() {
        let journal = Journal::new(b"ACGT");
        let mut revertable = RevertableJournal::new(journal);
        revertable.revert();
    }
}
