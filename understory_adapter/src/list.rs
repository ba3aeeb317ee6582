// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The backing item list of an adapter.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use understory_reconcile::{Updater, reconcile};

use crate::{ChangeSink, ViewHolder};

type ClickListener<T> = Box<dyn FnMut(&T, usize)>;
type LongClickListener<T> = Box<dyn FnMut(&T, usize) -> bool>;

/// An adapter's ordered item list, reporting every mutation to a [`ChangeSink`].
///
/// This type:
/// - owns the backing sequence and the sink,
/// - reports granular notifications for each mutation, translated to host rows
///   (see [`set_header`](Self::set_header)),
/// - reconciles itself against a new list with [`update_with`](Self::update_with)
///   instead of clearing and refilling,
/// - binds [`ViewHolder`]s and dispatches item clicks to registered listeners.
///
/// Notifications can be suspended with
/// [`set_notify_on_change`](Self::set_notify_on_change); the host is then
/// responsible for refreshing on its own.
///
/// ```rust
/// use understory_adapter::{Change, ChangeLog, ItemList};
///
/// let mut list = ItemList::with_items(vec!["a", "b", "c"], ChangeLog::new());
/// list.update_with(&["a", "c", "d"]);
/// assert_eq!(list.items(), ["a", "c", "d"]);
/// assert_eq!(
///     list.sink().changes(),
///     [
///         Change::Changed(0),
///         Change::Changed(2),
///         Change::Removed(1),
///         Change::Inserted(2),
///     ]
/// );
/// ```
pub struct ItemList<T, S = ()> {
    items: Vec<T>,
    sink: S,
    notify_on_change: bool,
    header: bool,
    on_item_click: Option<ClickListener<T>>,
    on_item_long_click: Option<LongClickListener<T>>,
}

impl<T, S: Default> Default for ItemList<T, S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<T, S> ItemList<T, S> {
    /// Creates an empty list reporting to `sink`.
    pub fn new(sink: S) -> Self {
        Self::with_items(Vec::new(), sink)
    }

    /// Creates a list over `items`, reporting to `sink`.
    ///
    /// The initial items are not announced; the host is expected to pick them
    /// up on its first layout.
    pub fn with_items(items: Vec<T>, sink: S) -> Self {
        Self {
            items,
            sink,
            notify_on_change: true,
            header: false,
            on_item_click: None,
            on_item_long_click: None,
        }
    }

    /// Number of items (not counting the header row).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of host rows, including the header row if present.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.items.len() + self.header_rows()
    }

    /// Item at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// All items, in order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Unwraps the list into its items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// The notification sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The notification sink, mutably.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Returns whether mutations are reported to the sink.
    #[must_use]
    pub const fn notify_on_change(&self) -> bool {
        self.notify_on_change
    }

    /// Enables or disables reporting mutations to the sink.
    pub fn set_notify_on_change(&mut self, enable: bool) {
        self.notify_on_change = enable;
    }

    /// Returns whether a header row precedes the items.
    #[must_use]
    pub const fn has_header(&self) -> bool {
        self.header
    }

    /// Declares whether the host shows a header row before the items.
    ///
    /// With a header, every position reported to the sink is shifted by one so
    /// it addresses host rows. Item indices passed to this type's methods are
    /// unaffected.
    pub fn set_header(&mut self, header: bool) {
        self.header = header;
    }

    /// Host row at which [`push`](Self::push) will insert.
    #[must_use]
    pub fn insert_position(&self) -> usize {
        self.row_count()
    }

    /// Maps a host row back to an item index, if the row shows an item.
    #[must_use]
    pub fn item_index(&self, row: usize) -> Option<usize> {
        row.checked_sub(self.header_rows())
            .filter(|&index| index < self.items.len())
    }

    /// Registers the listener for item clicks, replacing any previous one.
    pub fn set_on_item_click(&mut self, listener: impl FnMut(&T, usize) + 'static) {
        self.on_item_click = Some(Box::new(listener));
    }

    /// Registers the listener for item long clicks, replacing any previous one.
    ///
    /// The listener returns whether it consumed the long click.
    pub fn set_on_item_long_click(&mut self, listener: impl FnMut(&T, usize) -> bool + 'static) {
        self.on_item_long_click = Some(Box::new(listener));
    }

    /// Removes the item click listener.
    pub fn clear_on_item_click(&mut self) {
        self.on_item_click = None;
    }

    /// Removes the item long-click listener.
    pub fn clear_on_item_long_click(&mut self) {
        self.on_item_long_click = None;
    }

    /// Returns `true` if an item click listener is registered.
    ///
    /// Hosts use this to decide whether a holder's view should be clickable at all.
    #[must_use]
    pub fn has_item_click_listener(&self) -> bool {
        self.on_item_click.is_some()
    }

    /// Binds `holder` to the item at `index`.
    ///
    /// Returns `false`, leaving the holder untouched, if `index` is out of range.
    pub fn bind<H>(&self, holder: &mut H, index: usize) -> bool
    where
        H: ViewHolder<T> + ?Sized,
    {
        let Some(item) = self.items.get(index) else {
            return false;
        };
        holder.update_view(item, index);
        true
    }

    /// Dispatches a click on `holder`, showing the item at `index`.
    ///
    /// Returns `true` if the click listener ran. It does not run when no
    /// listener is registered, the holder is not clickable, or `index` is out
    /// of range.
    pub fn click<H>(&mut self, holder: &H, index: usize) -> bool
    where
        H: ViewHolder<T> + ?Sized,
    {
        if !holder.is_clickable() {
            return false;
        }
        let (Some(listener), Some(item)) = (self.on_item_click.as_mut(), self.items.get(index))
        else {
            return false;
        };
        listener(item, index);
        true
    }

    /// Dispatches a long click on `holder`, showing the item at `index`.
    ///
    /// Returns whether the long-click listener consumed it; `false` when it
    /// could not run for the same reasons as [`click`](Self::click).
    pub fn long_click<H>(&mut self, holder: &H, index: usize) -> bool
    where
        H: ViewHolder<T> + ?Sized,
    {
        if !holder.is_long_clickable() {
            return false;
        }
        let (Some(listener), Some(item)) =
            (self.on_item_long_click.as_mut(), self.items.get(index))
        else {
            return false;
        };
        listener(item, index)
    }

    fn header_rows(&self) -> usize {
        usize::from(self.header)
    }
}

impl<T, S: ChangeSink> ItemList<T, S> {
    /// Appends `item`.
    pub fn push(&mut self, item: T) {
        let row = self.insert_position();
        self.items.push(item);
        self.notify(|sink, _| sink.item_inserted(row));
    }

    /// Appends every item of `items`, reported as one inserted range.
    pub fn extend(&mut self, items: impl IntoIterator<Item = T>) {
        let row = self.insert_position();
        let before = self.items.len();
        self.items.extend(items);
        let count = self.items.len() - before;
        if count > 0 {
            self.notify(|sink, _| sink.items_inserted(row, count));
        }
    }

    /// Inserts `item` at `index`, shifting later items right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert(&mut self, index: usize, item: T) {
        self.items.insert(index, item);
        self.notify(|sink, rows| sink.item_inserted(index + rows));
    }

    /// Removes and returns the item at `index`, or `None` if it is out of range.
    ///
    /// Nothing is reported when nothing was removed.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        self.take(index)
    }

    fn take(&mut self, index: usize) -> Option<T> {
        if index >= self.items.len() {
            return None;
        }
        let item = self.items.remove(index);
        self.notify(|sink, rows| sink.item_removed(index + rows));
        Some(item)
    }

    /// Removes the first item equal to `item`, returning the index it had.
    pub fn remove(&mut self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        let index = self.index_of(item)?;
        self.remove_at(index).map(|_| index)
    }

    /// Moves the item at `from` so that it ends up at `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn move_item(&mut self, from: usize, to: usize) {
        assert!(
            from < self.items.len() && to < self.items.len(),
            "move from {from} to {to} is out of range for {} items",
            self.items.len()
        );
        let item = self.items.remove(from);
        self.items.insert(to, item);
        self.notify(|sink, rows| sink.item_moved(from + rows, to + rows));
    }

    /// Removes every item, returning how many there were.
    ///
    /// Removals are reported last row first, so each reported row is still
    /// valid when the host processes it.
    pub fn clear(&mut self) -> usize {
        let count = self.items.len();
        self.items.clear();
        self.notify(|sink, rows| {
            for index in (0..count).rev() {
                sink.item_removed(index + rows);
            }
        });
        count
    }

    /// Returns `true` if an item equal to `item` is present.
    #[must_use]
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.items.contains(item)
    }

    /// Index of the first item equal to `item`.
    #[must_use]
    pub fn index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.items.iter().position(|x| x == item)
    }

    /// Replaces the contents with `target`, touching only what differs.
    ///
    /// Items are correlated by equality: surviving items are reported as
    /// changed in place, missing ones inserted, absent ones removed, and
    /// misplaced ones removed and re-inserted where they belong. See
    /// [`understory_reconcile::reconcile`] for the exact order of operations.
    pub fn update_with(&mut self, target: &[T])
    where
        T: PartialEq + Clone,
    {
        log::debug!("updating {} items with {}", self.items.len(), target.len());
        reconcile(self, target);
    }

    fn notify(&mut self, f: impl FnOnce(&mut S, usize)) {
        if self.notify_on_change {
            let rows = self.header_rows();
            f(&mut self.sink, rows);
        }
    }
}

impl<T: PartialEq, S: ChangeSink> Updater for ItemList<T, S> {
    type Item = T;

    fn len(&self) -> usize {
        self.items.len()
    }

    fn get(&self, index: usize) -> &T {
        &self.items[index]
    }

    fn index_of(&self, item: &T) -> Option<usize> {
        self.items.iter().position(|x| x == item)
    }

    fn last_index_of(&self, item: &T) -> Option<usize> {
        self.items.iter().rposition(|x| x == item)
    }

    fn notify_changed(&mut self, index: usize) {
        self.notify(|sink, rows| sink.item_changed(index + rows));
    }

    fn remove_at(&mut self, index: usize) -> Option<T> {
        self.take(index)
    }

    fn insert_at(&mut self, index: usize, item: T) {
        self.insert(index, item);
    }
}

impl<T: fmt::Debug, S: fmt::Debug> fmt::Debug for ItemList<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemList")
            .field("items", &self.items)
            .field("sink", &self.sink)
            .field("notify_on_change", &self.notify_on_change)
            .field("header", &self.header)
            .field("on_item_click", &self.on_item_click.is_some())
            .field("on_item_long_click", &self.on_item_long_click.is_some())
            .finish()
    }
}
