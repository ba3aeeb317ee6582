// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change notifications delivered to the host list widget.

use alloc::vec::Vec;

/// Receives change notifications from an [`ItemList`](crate::ItemList).
///
/// Positions are host rows: when the list has a header, they are already
/// shifted past it.
///
/// Only [`data_set_changed`](ChangeSink::data_set_changed) is required. Every
/// granular hook falls back to it, which suits pager-style hosts that can only
/// refresh wholesale. Recycler-style hosts override the granular hooks so they
/// can animate individual rows.
pub trait ChangeSink {
    /// Anything may have changed; refresh everything.
    fn data_set_changed(&mut self);

    /// The row at `position` may need to be rebound.
    fn item_changed(&mut self, position: usize) {
        let _ = position;
        self.data_set_changed();
    }

    /// A row was inserted at `position`.
    fn item_inserted(&mut self, position: usize) {
        let _ = position;
        self.data_set_changed();
    }

    /// `count` rows were inserted starting at `start`.
    fn items_inserted(&mut self, start: usize, count: usize) {
        for position in start..start + count {
            self.item_inserted(position);
        }
    }

    /// The row at `position` was removed.
    fn item_removed(&mut self, position: usize) {
        let _ = position;
        self.data_set_changed();
    }

    /// The row at `from` moved to `to`.
    fn item_moved(&mut self, from: usize, to: usize) {
        let _ = (from, to);
        self.data_set_changed();
    }
}

/// Nobody is listening.
impl ChangeSink for () {
    fn data_set_changed(&mut self) {}
    fn item_changed(&mut self, _position: usize) {}
    fn item_inserted(&mut self, _position: usize) {}
    fn items_inserted(&mut self, _start: usize, _count: usize) {}
    fn item_removed(&mut self, _position: usize) {}
    fn item_moved(&mut self, _from: usize, _to: usize) {}
}

impl<S: ChangeSink + ?Sized> ChangeSink for &mut S {
    fn data_set_changed(&mut self) {
        (**self).data_set_changed();
    }

    fn item_changed(&mut self, position: usize) {
        (**self).item_changed(position);
    }

    fn item_inserted(&mut self, position: usize) {
        (**self).item_inserted(position);
    }

    fn items_inserted(&mut self, start: usize, count: usize) {
        (**self).items_inserted(start, count);
    }

    fn item_removed(&mut self, position: usize) {
        (**self).item_removed(position);
    }

    fn item_moved(&mut self, from: usize, to: usize) {
        (**self).item_moved(from, to);
    }
}

/// A single notification, as recorded by [`ChangeLog`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Change {
    /// See [`ChangeSink::data_set_changed`].
    DataSetChanged,
    /// See [`ChangeSink::item_changed`].
    Changed(usize),
    /// See [`ChangeSink::item_inserted`].
    Inserted(usize),
    /// See [`ChangeSink::items_inserted`]: `(start, count)`.
    RangeInserted(usize, usize),
    /// See [`ChangeSink::item_removed`].
    Removed(usize),
    /// See [`ChangeSink::item_moved`]: `(from, to)`.
    Moved(usize, usize),
}

/// A sink that keeps every notification, for hosts that apply them in batches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeLog {
    changes: Vec<Change>,
}

impl ChangeLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            changes: Vec::new(),
        }
    }

    /// Notifications received so far, oldest first.
    #[must_use]
    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    /// Returns `true` if nothing has been received since the last drain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Takes every pending notification, leaving the log empty.
    pub fn drain(&mut self) -> Vec<Change> {
        core::mem::take(&mut self.changes)
    }
}

impl ChangeSink for ChangeLog {
    fn data_set_changed(&mut self) {
        self.changes.push(Change::DataSetChanged);
    }

    fn item_changed(&mut self, position: usize) {
        self.changes.push(Change::Changed(position));
    }

    fn item_inserted(&mut self, position: usize) {
        self.changes.push(Change::Inserted(position));
    }

    fn items_inserted(&mut self, start: usize, count: usize) {
        self.changes.push(Change::RangeInserted(start, count));
    }

    fn item_removed(&mut self, position: usize) {
        self.changes.push(Change::Removed(position));
    }

    fn item_moved(&mut self, from: usize, to: usize) {
        self.changes.push(Change::Moved(from, to));
    }
}

#[cfg(test)]
mod tests {
    use super::{Change, ChangeLog, ChangeSink};

    /// Pager-style sink: counts wholesale refreshes only.
    #[derive(Default)]
    struct Pager {
        refreshes: usize,
    }

    impl ChangeSink for Pager {
        fn data_set_changed(&mut self) {
            self.refreshes += 1;
        }
    }

    #[test]
    fn granular_hooks_fall_back_to_refresh() {
        let mut pager = Pager::default();
        pager.item_changed(0);
        pager.item_inserted(1);
        pager.item_removed(2);
        pager.item_moved(0, 3);
        assert_eq!(pager.refreshes, 4);

        pager.items_inserted(5, 3);
        assert_eq!(pager.refreshes, 7);
    }

    #[test]
    fn log_records_and_drains() {
        fn notify<S: ChangeSink>(mut sink: S) {
            sink.item_moved(1, 2);
            sink.items_inserted(0, 2);
        }

        let mut log = ChangeLog::new();
        notify(&mut log);
        assert_eq!(
            log.changes(),
            [Change::Moved(1, 2), Change::RangeInserted(0, 2)]
        );
        assert_eq!(log.drain().len(), 2);
        assert!(log.is_empty());
    }
}
