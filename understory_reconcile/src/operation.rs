// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reconciliation as an operation log.
//!
//! [`reconcile`](crate::reconcile) applies each step through an [`Updater`] as
//! soon as it decides it. Wrapping the updater in a [`Recording`] captures the
//! same steps as [`Operation`] values, which can be kept and replayed later
//! with [`apply`]. [`plan`] does this against a scratch copy, so it computes
//! the log without touching anything.

use alloc::vec::Vec;
use core::fmt;

use crate::{Updater, reconcile};

/// A single step emitted by the reconciler, in emission order.
///
/// Indices refer to the backing sequence as it is at the moment the step is
/// applied, not to the starting or the target sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation<T> {
    /// The slot's content may need a refresh; the sequence is unchanged.
    Changed(usize),
    /// The item at this index was removed; later items shift left.
    Removed(usize),
    /// The item was inserted at this index; later items shift right.
    Inserted(usize, T),
}

impl<T> Operation<T> {
    /// Index this operation applies to.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::Changed(i) | Self::Removed(i) | Self::Inserted(i, _) => *i,
        }
    }

    /// Returns `true` for removals and insertions.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        !matches!(self, Self::Changed(_))
    }

    /// Apply this operation to `updater`.
    ///
    /// Returns `false` if a removal did not remove anything.
    pub fn apply_to<U>(self, updater: &mut U) -> bool
    where
        U: Updater<Item = T> + ?Sized,
    {
        match self {
            Self::Changed(i) => {
                updater.notify_changed(i);
                true
            }
            Self::Removed(i) => updater.remove_at(i).is_some(),
            Self::Inserted(i, item) => {
                updater.insert_at(i, item);
                true
            }
        }
    }
}

/// Replay `operations` against `updater`, in order.
///
/// Replaying [`plan(current, target)`](plan) against an updater holding
/// `current` leaves it holding `target`, with the same notifications a direct
/// [`reconcile`](crate::reconcile) would have produced.
pub fn apply<U, I>(operations: I, updater: &mut U)
where
    U: Updater + ?Sized,
    I: IntoIterator<Item = Operation<U::Item>>,
{
    for op in operations {
        let applied = op.apply_to(updater);
        debug_assert!(applied, "replayed removal did not remove anything");
    }
}

/// Compute the operations that turn `current` into `target` without applying them.
#[must_use]
pub fn plan<T>(current: &[T], target: &[T]) -> Vec<Operation<T>>
where
    T: PartialEq + Clone,
{
    let mut recording = Recording::new(current.to_vec());
    reconcile(&mut recording, target);
    recording.into_parts().1
}

/// An [`Updater`] that forwards to an inner updater and logs every operation.
///
/// Lookups pass straight through; only notifications and mutations are
/// recorded.
///
/// ```rust
/// use understory_reconcile::{Operation, Recording, reconcile};
///
/// let mut rec = Recording::new(vec![1, 2, 3]);
/// reconcile(&mut rec, &[1, 3, 4]);
/// assert_eq!(rec.inner(), &[1, 3, 4]);
/// assert_eq!(
///     rec.operations(),
///     [
///         Operation::Changed(0),
///         Operation::Changed(2),
///         Operation::Removed(1),
///         Operation::Inserted(2, 4),
///     ]
/// );
/// ```
pub struct Recording<U: Updater> {
    inner: U,
    operations: Vec<Operation<U::Item>>,
}

impl<U: Updater> Recording<U> {
    /// Wrap `inner` with an empty log.
    pub fn new(inner: U) -> Self {
        Self {
            inner,
            operations: Vec::new(),
        }
    }

    /// The wrapped updater.
    pub fn inner(&self) -> &U {
        &self.inner
    }

    /// Operations recorded so far, oldest first.
    pub fn operations(&self) -> &[Operation<U::Item>] {
        &self.operations
    }

    /// Drain the log, keeping the wrapped updater.
    pub fn take_operations(&mut self) -> Vec<Operation<U::Item>> {
        core::mem::take(&mut self.operations)
    }

    /// Unwrap into the inner updater and the recorded log.
    pub fn into_parts(self) -> (U, Vec<Operation<U::Item>>) {
        (self.inner, self.operations)
    }
}

impl<U> fmt::Debug for Recording<U>
where
    U: Updater + fmt::Debug,
    U::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recording")
            .field("inner", &self.inner)
            .field("operations", &self.operations)
            .finish()
    }
}

impl<U> Updater for Recording<U>
where
    U: Updater,
    U::Item: Clone,
{
    type Item = U::Item;

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn get(&self, index: usize) -> &Self::Item {
        self.inner.get(index)
    }

    fn items(&self) -> Vec<Self::Item> {
        self.inner.items()
    }

    fn index_of(&self, item: &Self::Item) -> Option<usize> {
        self.inner.index_of(item)
    }

    fn last_index_of(&self, item: &Self::Item) -> Option<usize> {
        self.inner.last_index_of(item)
    }

    fn notify_changed(&mut self, index: usize) {
        self.inner.notify_changed(index);
        self.operations.push(Operation::Changed(index));
    }

    fn remove_at(&mut self, index: usize) -> Option<Self::Item> {
        let removed = self.inner.remove_at(index);
        if removed.is_some() {
            self.operations.push(Operation::Removed(index));
        }
        removed
    }

    fn insert_at(&mut self, index: usize, item: Self::Item) {
        self.operations.push(Operation::Inserted(index, item.clone()));
        self.inner.insert_at(index, item);
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{Operation, Recording, apply, plan};
    use crate::{Updater, reconcile};

    #[test]
    fn plan_does_not_touch_inputs_and_replays() {
        let current = ['a', 'b', 'c', 'd'];
        let target = ['d', 'x', 'b', 'b'];
        let ops = plan(&current, &target);

        let mut replayed = current.to_vec();
        apply(ops.iter().copied(), &mut replayed);
        assert_eq!(replayed, target);

        let mut direct = Recording::new(current.to_vec());
        reconcile(&mut direct, &target);
        assert_eq!(direct.operations(), ops.as_slice());
    }

    #[test]
    fn replay_through_a_recording_reproduces_the_log() {
        let ops = plan(&[1, 2, 3], &[3, 2, 1]);
        let mut rec = Recording::new(vec![1, 2, 3]);
        apply(ops.clone(), &mut rec);
        assert_eq!(rec.inner(), &[3, 2, 1]);
        assert_eq!(rec.take_operations(), ops);
        assert!(rec.operations().is_empty());
    }

    #[test]
    fn operation_accessors() {
        let ops: Vec<Operation<u8>> = vec![
            Operation::Changed(3),
            Operation::Removed(1),
            Operation::Inserted(0, 7),
        ];
        let indices: Vec<_> = ops.iter().map(Operation::index).collect();
        assert_eq!(indices, [3, 1, 0]);
        let structural: Vec<_> = ops.iter().map(Operation::is_structural).collect();
        assert_eq!(structural, [false, true, true]);
    }

    #[test]
    fn failed_removal_is_reported() {
        let mut v = vec![1_u8];
        assert!(!Operation::Removed(4).apply_to(&mut v));
        assert!(Operation::Removed(0).apply_to(&mut v));
        assert!(v.is_empty());
    }

    #[test]
    fn failed_removal_is_not_logged() {
        let mut rec = Recording::new(vec![1_u8]);
        assert_eq!(rec.remove_at(5), None);
        assert!(rec.operations().is_empty());
    }

    #[test]
    fn plan_of_identical_lists_has_no_structural_steps() {
        let ops = plan(&['q', 'q', 'r'], &['q', 'q', 'r']);
        assert_eq!(
            ops,
            [
                Operation::Changed(0),
                Operation::Changed(1),
                Operation::Changed(2)
            ]
        );
        let mut v = vec!['q', 'q', 'r'];
        reconcile(&mut v, &['q', 'q', 'r']);
        assert_eq!(v, ['q', 'q', 'r']);
    }
}
