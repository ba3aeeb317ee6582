// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The capability the reconciler uses to read and mutate a backing sequence.

use alloc::vec::Vec;

/// Read/mutate access to an adapter's backing sequence, plus change notifications.
///
/// The backing sequence is owned by the implementor. The reconciler never keeps
/// its own copy; every read goes through [`get`](Updater::get) and every
/// mutation through [`remove_at`](Updater::remove_at) or
/// [`insert_at`](Updater::insert_at), so an implementor can forward each step to
/// its list widget as it happens.
///
/// Items are correlated with [`PartialEq`]. Equality does not have to imply that
/// two items render identically (for example, equal keys with changed fields);
/// that is what [`notify_changed`](Updater::notify_changed) is for.
///
/// Only `len`, `get`, and the three mutation hooks are required. The lookups
/// have linear-scan defaults that implementors may replace with something
/// faster.
pub trait Updater {
    /// Item type stored in the backing sequence.
    type Item: PartialEq;

    /// Number of items in the backing sequence.
    fn len(&self) -> usize;

    /// Returns `true` if the backing sequence is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Item at `index`.
    ///
    /// Implementations should panic when `index >= len()`; the reconciler never
    /// asks for an out-of-range slot.
    fn get(&self, index: usize) -> &Self::Item;

    /// Ordered snapshot of the whole backing sequence.
    fn items(&self) -> Vec<Self::Item>
    where
        Self::Item: Clone,
    {
        (0..self.len()).map(|i| self.get(i).clone()).collect()
    }

    /// Index of the first item equal to `item`.
    fn index_of(&self, item: &Self::Item) -> Option<usize> {
        (0..self.len()).find(|&i| self.get(i) == item)
    }

    /// Index of the last item equal to `item`.
    fn last_index_of(&self, item: &Self::Item) -> Option<usize> {
        (0..self.len()).rev().find(|&i| self.get(i) == item)
    }

    /// The content at `index` may need a visual refresh.
    ///
    /// Must not alter the sequence.
    fn notify_changed(&mut self, index: usize);

    /// Removes and returns the item at `index`, shifting later items left.
    ///
    /// Returns `None` if nothing was removed.
    fn remove_at(&mut self, index: usize) -> Option<Self::Item>;

    /// Inserts `item` at `index`, shifting later items right.
    ///
    /// `index` is always `<= len()` when called by the reconciler.
    fn insert_at(&mut self, index: usize, item: Self::Item);
}

/// A plain vector is an updater with nobody to notify.
impl<T: PartialEq> Updater for Vec<T> {
    type Item = T;

    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn get(&self, index: usize) -> &T {
        &self[index]
    }

    fn items(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.clone()
    }

    fn index_of(&self, item: &T) -> Option<usize> {
        self.iter().position(|x| x == item)
    }

    fn last_index_of(&self, item: &T) -> Option<usize> {
        self.iter().rposition(|x| x == item)
    }

    fn notify_changed(&mut self, _index: usize) {}

    fn remove_at(&mut self, index: usize) -> Option<T> {
        (index < self.as_slice().len()).then(|| self.remove(index))
    }

    fn insert_at(&mut self, index: usize, item: T) {
        self.insert(index, item);
    }
}
