// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The reconciliation algorithm.

use core::cmp::Ordering;

use crate::Updater;

/// Per-call totals, reported through `log` once reconciliation finishes.
#[derive(Debug, Default)]
struct Tally {
    changed: usize,
    removed: usize,
    inserted: usize,
    moved: usize,
}

/// Transform the backing sequence behind `updater` into `target`.
///
/// After this returns, the items of `updater`, in order, equal `target`
/// (duplicates included). Every step is applied through `updater` as it is
/// decided, in four strictly ordered phases:
///
/// 1. For each current slot whose item occurs anywhere in `target`, call
///    [`notify_changed`](Updater::notify_changed). Nothing moves.
/// 2. Scanning from the front, remove every item that does not occur in
///    `target`. Survivors keep their relative order.
/// 3. For each target slot `i` in ascending order, locate the item with
///    [`index_in_previous`]. If it is missing, insert it at `i`. If it sits
///    elsewhere, remove it there and insert it at `min(len, i)`.
/// 4. Remove any surplus items left past `target.len()`. This only happens
///    when the backing sequence held more copies of an item than `target`.
///
/// Within a phase, operations are emitted in ascending index order as scanned.
/// Identical input (`target` equal to the current items) and a repeated call
/// with the same `target` emit no structural operations.
///
/// There is no rollback: if an [`Updater`] callback panics, the sequence is
/// left partially reconciled.
pub fn reconcile<U>(updater: &mut U, target: &[U::Item])
where
    U: Updater + ?Sized,
    U::Item: Clone,
{
    let mut tally = Tally::default();
    notify_retained(updater, target, &mut tally);
    remove_absent(updater, target, &mut tally);
    insert_and_reorder(updater, target, &mut tally);
    trim_surplus(updater, target.len(), &mut tally);
    log::debug!(
        "reconciled {} items: {} changed, {} removed, {} inserted, {} moved",
        target.len(),
        tally.changed,
        tally.removed,
        tally.inserted,
        tally.moved
    );
}

/// Locate the backing slot that should fill target slot `index_in_new`.
///
/// Returns `None` when `item` must be inserted fresh. The lookup is
/// duplicate-aware:
///
/// - If `item` does not occur in the backing sequence, `None`.
/// - If its first occurrence is at or after `index_in_new`, that occurrence.
/// - Otherwise the first occurrence already belongs to an earlier target slot:
///   - if slot `index_in_new` already holds an equal item, `index_in_new`;
///   - else if the last occurrence lies after `index_in_new`, the last
///     occurrence (it gets moved into place);
///   - else `None`, leaving the earlier occurrences where they are.
///
/// Slots `0..index_in_new` are assumed to already match the target, which is
/// what [`reconcile`] guarantees while it walks the target.
pub fn index_in_previous<U>(updater: &U, index_in_new: usize, item: &U::Item) -> Option<usize>
where
    U: Updater + ?Sized,
{
    let first = updater.index_of(item)?;
    if first >= index_in_new {
        return Some(first);
    }
    if index_in_new < updater.len() && updater.get(index_in_new) == item {
        return Some(index_in_new);
    }
    let last = updater.last_index_of(item)?;
    match last.cmp(&index_in_new) {
        Ordering::Less => None,
        Ordering::Greater => Some(last),
        Ordering::Equal => Some(index_in_new),
    }
}

fn notify_retained<U>(updater: &mut U, target: &[U::Item], tally: &mut Tally)
where
    U: Updater + ?Sized,
{
    for i in 0..updater.len() {
        if target.contains(updater.get(i)) {
            updater.notify_changed(i);
            tally.changed += 1;
        }
    }
}

fn remove_absent<U>(updater: &mut U, target: &[U::Item], tally: &mut Tally)
where
    U: Updater + ?Sized,
{
    let mut i = 0;
    while i < updater.len() {
        if target.contains(updater.get(i)) {
            i += 1;
            continue;
        }
        log::trace!("remove absent item at {i}");
        let removed = updater.remove_at(i);
        debug_assert!(
            removed.is_some(),
            "updater refused to remove in-range index {i}"
        );
        if removed.is_some() {
            tally.removed += 1;
        } else {
            // Step over it so a misbehaving updater cannot stall the scan.
            i += 1;
        }
    }
}

fn insert_and_reorder<U>(updater: &mut U, target: &[U::Item], tally: &mut Tally)
where
    U: Updater + ?Sized,
    U::Item: Clone,
{
    for (index_in_new, item) in target.iter().enumerate() {
        match index_in_previous(updater, index_in_new, item) {
            None => {
                log::trace!("insert at {index_in_new}");
                updater.insert_at(index_in_new, item.clone());
                tally.inserted += 1;
            }
            Some(index_in_previous) if index_in_previous != index_in_new => {
                log::trace!("move {index_in_previous} -> {index_in_new}");
                let removed = updater.remove_at(index_in_previous);
                debug_assert!(
                    removed.is_some(),
                    "updater refused to remove in-range index {index_in_previous}"
                );
                let at = index_in_new.min(updater.len());
                updater.insert_at(at, item.clone());
                tally.moved += 1;
            }
            Some(_) => {}
        }
    }
}

fn trim_surplus<U>(updater: &mut U, target_len: usize, tally: &mut Tally)
where
    U: Updater + ?Sized,
{
    while updater.len() > target_len {
        log::trace!("trim surplus item at {target_len}");
        let removed = updater.remove_at(target_len);
        debug_assert!(
            removed.is_some(),
            "updater refused to remove in-range index {target_len}"
        );
        if removed.is_none() {
            break;
        }
        tally.removed += 1;
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{index_in_previous, reconcile};
    use crate::{Operation, Recording};

    const A: char = 'A';
    const B: char = 'B';
    const C: char = 'C';
    const D: char = 'D';
    const E: char = 'E';
    const F: char = 'F';

    fn five() -> Recording<Vec<char>> {
        Recording::new(vec![A, B, C, D, E])
    }

    fn changed(ops: &[Operation<char>]) -> Vec<usize> {
        ops.iter()
            .filter_map(|op| match op {
                Operation::Changed(i) => Some(*i),
                _ => None,
            })
            .collect()
    }

    fn structural(ops: &[Operation<char>]) -> Vec<Operation<char>> {
        ops.iter().filter(|op| op.is_structural()).cloned().collect()
    }

    fn assert_update_with(mut rec: Recording<Vec<char>>, target: &[char]) -> Vec<Operation<char>> {
        reconcile(&mut rec, target);
        let (items, ops) = rec.into_parts();
        assert_eq!(items, target);
        ops
    }

    #[test]
    fn insert_in_the_middle() {
        let ops = assert_update_with(five(), &[A, B, F, C, D, E]);
        assert_eq!(changed(&ops), [0, 1, 2, 3, 4]);
        assert_eq!(structural(&ops), [Operation::Inserted(2, F)]);
    }

    #[test]
    fn remove_from_the_middle() {
        let ops = assert_update_with(five(), &[A, B, D, E]);
        assert_eq!(changed(&ops), [0, 1, 3, 4]);
        assert_eq!(structural(&ops), [Operation::Removed(2)]);
    }

    #[test]
    fn move_to_front_is_a_single_pair() {
        let ops = assert_update_with(five(), &[C, A, B, D, E]);
        assert_eq!(
            structural(&ops),
            [Operation::Removed(2), Operation::Inserted(0, C)]
        );
    }

    #[test]
    fn moves_in_every_direction() {
        for target in [
            [A, B, D, C, E],
            [A, B, D, E, C],
            [A, C, B, D, E],
            [E, B, D, C, A],
        ] {
            assert_update_with(five(), &target);
        }
    }

    #[test]
    fn from_empty_inserts_in_order() {
        let ops = assert_update_with(Recording::new(Vec::new()), &[A, B, C, D, E, F]);
        let expected: Vec<_> = [A, B, C, D, E, F]
            .into_iter()
            .enumerate()
            .map(|(i, item)| Operation::Inserted(i, item))
            .collect();
        assert_eq!(ops, expected);
    }

    #[test]
    fn from_empty_with_duplicate() {
        assert_update_with(Recording::new(Vec::new()), &[A, B, C, D, C, F]);
    }

    #[test]
    fn to_empty_removes_everything() {
        let ops = assert_update_with(five(), &[]);
        assert_eq!(ops, [Operation::Removed(0); 5]);
    }

    #[test]
    fn duplicate_replaces_dropped_tail() {
        let ops = assert_update_with(five(), &[A, B, C, D, C]);
        assert_eq!(changed(&ops), [0, 1, 2, 3]);
        // The existing C stays put for slot 2; slot 4 gets a fresh copy.
        assert_eq!(
            structural(&ops),
            [Operation::Removed(4), Operation::Inserted(4, C)]
        );
    }

    #[test]
    fn duplicate_appended() {
        let ops = assert_update_with(five(), &[A, B, C, D, E, C]);
        assert_eq!(structural(&ops), [Operation::Inserted(5, C)]);
    }

    #[test]
    fn later_duplicate_is_reused() {
        // The second A reaches slot 2, so it is moved rather than re-inserted.
        let rec = Recording::new(vec![A, B, C, A]);
        let ops = assert_update_with(rec, &[A, B, A, C]);
        assert_eq!(
            structural(&ops),
            [Operation::Removed(3), Operation::Inserted(2, A)]
        );
    }

    #[test]
    fn surplus_duplicates_are_trimmed() {
        let ops = assert_update_with(Recording::new(vec![A, A, B, A]), &[A, B]);
        assert_eq!(changed(&ops), [0, 1, 2, 3]);
        assert_eq!(
            structural(&ops),
            [
                Operation::Removed(2),
                Operation::Inserted(1, B),
                Operation::Removed(2),
                Operation::Removed(2),
            ]
        );
    }

    #[test]
    fn identical_lists_only_notify() {
        for items in [vec![A, B, C, D, E], vec![A, A, A], vec![A, B, A, B], vec![]] {
            let ops = assert_update_with(Recording::new(items.clone()), &items);
            assert!(structural(&ops).is_empty(), "{items:?} -> {ops:?}");
            assert_eq!(changed(&ops).len(), items.len());
        }
    }

    #[test]
    fn second_call_is_a_no_op() {
        let target = [E, C, C, F, A];
        let mut rec = five();
        reconcile(&mut rec, &target);
        rec.take_operations();
        reconcile(&mut rec, &target);
        assert!(structural(rec.operations()).is_empty());
        assert_eq!(rec.inner(), &target);
    }

    #[test]
    fn disjoint_target_replaces_everything() {
        let ops = assert_update_with(Recording::new(vec![A, B, C]), &[D, E]);
        assert_eq!(
            ops,
            [
                Operation::Removed(0),
                Operation::Removed(0),
                Operation::Removed(0),
                Operation::Inserted(0, D),
                Operation::Inserted(1, E),
            ]
        );
    }

    #[test]
    fn lookup_rules() {
        let current = vec![A, B, A, C];
        assert_eq!(index_in_previous(&current, 0, &D), None);
        // First occurrence at or past the slot.
        assert_eq!(index_in_previous(&current, 1, &B), Some(1));
        assert_eq!(index_in_previous(&current, 0, &C), Some(3));
        // Slot already holds the item.
        assert_eq!(index_in_previous(&current, 2, &A), Some(2));
        // Last occurrence lies beyond the slot.
        assert_eq!(index_in_previous(&current, 1, &A), Some(2));
        // Nothing reaches the slot.
        assert_eq!(index_in_previous(&current, 3, &A), None);
        assert_eq!(index_in_previous(&current, 4, &B), None);
    }
}
