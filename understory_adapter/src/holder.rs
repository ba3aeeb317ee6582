// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View holders: the host-side objects that display one item each.

/// A reusable view container bound to one item at a time.
///
/// The host creates holders (inflating whatever views it needs) and asks an
/// [`ItemList`](crate::ItemList) to bind them with
/// [`ItemList::bind`](crate::ItemList::bind). A holder may be rebound to a
/// different item at any time; it should not assume it keeps the same one.
pub trait ViewHolder<T: ?Sized> {
    /// Refresh the holder's views to show `item`, found at item index `position`.
    fn update_view(&mut self, item: &T, position: usize);

    /// Whether item clicks on this holder reach the list's click listener.
    fn is_clickable(&self) -> bool {
        true
    }

    /// Whether long clicks on this holder reach the list's long-click listener.
    fn is_long_clickable(&self) -> bool {
        true
    }
}
