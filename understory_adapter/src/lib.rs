// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_adapter --heading-base-level=0

//! Understory Adapter: the data side of a view-recycling list adapter.
//!
//! A recycling list widget realizes only a handful of views and rebinds them as
//! the user scrolls. The adapter behind it owns the items, tells the widget
//! exactly which rows changed, and binds reusable holders to items on demand.
//! This crate provides that adapter core, independent of any widget toolkit.
//!
//! The core concepts are:
//!
//! - [`ItemList`]: the ordered item list. Every mutation is reported to a
//!   [`ChangeSink`] as a granular row notification, optionally shifted past a
//!   header row. [`ItemList::update_with`] reconciles the list against a new one
//!   with [`understory_reconcile::reconcile`], so surviving items keep their rows.
//! - [`ChangeSink`]: the host widget's notification surface. Pager-style hosts
//!   implement only [`ChangeSink::data_set_changed`]; recycler-style hosts
//!   override the granular hooks. [`ChangeLog`] records notifications for hosts
//!   that apply them in batches.
//! - [`ViewHolder`]: a reusable container bound to one item at a time, which
//!   also decides whether clicks on it reach the list's listeners.
//! - [`ViewCache`] (feature `view_cache`, on by default): memoized child-view
//!   lookups so that rebinding a holder does not walk its view tree every time.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_adapter::{Change, ChangeLog, ItemList, ViewHolder};
//!
//! struct Label(String);
//!
//! impl ViewHolder<&str> for Label {
//!     fn update_view(&mut self, item: &&str, _position: usize) {
//!         self.0 = item.to_uppercase();
//!     }
//! }
//!
//! let mut list = ItemList::new(ChangeLog::new());
//! list.extend(["a", "b"]);
//! list.push("c");
//! assert_eq!(
//!     list.sink_mut().drain(),
//!     [Change::RangeInserted(0, 2), Change::Inserted(2)]
//! );
//!
//! let mut label = Label(String::new());
//! assert!(list.bind(&mut label, 2));
//! assert_eq!(label.0, "C");
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod holder;
mod list;
mod sink;

#[cfg(feature = "view_cache")]
pub mod view_cache;

pub use holder::ViewHolder;
pub use list::ItemList;
pub use sink::{Change, ChangeLog, ChangeSink};

#[cfg(feature = "view_cache")]
pub use view_cache::{ViewCache, ViewId, ViewLookup};
