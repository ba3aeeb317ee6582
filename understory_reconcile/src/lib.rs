// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_reconcile --heading-base-level=0

//! Understory Reconcile: in-place list reconciliation for UI adapters.
//!
//! Given the sequence of items an adapter currently displays and a new target
//! sequence, [`reconcile`] mutates the displayed sequence until it equals the
//! target, emitting a small, ordered set of change/remove/insert notifications
//! along the way. Items are correlated by equality rather than by index, so an
//! item that survives an update keeps its slot (and its realized view) instead
//! of being replaced.
//!
//! The core concepts are:
//!
//! - [`Updater`]: the capability through which the reconciler reads and mutates
//!   the backing sequence. Host adapters implement it and forward the mutations
//!   to their list widget as granular notifications.
//! - [`reconcile`]: the algorithm itself. It runs in ordered phases:
//!   1. notify every current slot whose item is still wanted,
//!   2. remove items absent from the target,
//!   3. insert missing items and move misplaced ones into place,
//!   4. trim surplus duplicates past the end of the target.
//! - [`Operation`], [`Recording`], [`plan`], and [`apply`]: an operation-log view
//!   of the same algorithm, for callers that want to compute a diff first and
//!   replay it later (or assert on it in tests).
//!
//! This crate deliberately does **not** know about widgets, views, or any
//! particular UI framework.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_reconcile::{Operation, plan, reconcile};
//!
//! let mut shown = vec!['A', 'B', 'C', 'D', 'E'];
//! reconcile(&mut shown, &['C', 'A', 'B', 'D', 'E']);
//! assert_eq!(shown, ['C', 'A', 'B', 'D', 'E']);
//!
//! // The same transition as an operation log.
//! let ops = plan(&['A', 'B', 'C'], &['A', 'C']);
//! assert_eq!(
//!     ops,
//!     [Operation::Changed(0), Operation::Changed(2), Operation::Removed(1)]
//! );
//! ```
//!
//! ## Duplicates
//!
//! Items may repeat in either sequence. When the first occurrence of an item
//! sits before the slot being filled, the reconciler never steals it back: it
//! either reuses a later occurrence that reaches the slot, or inserts a fresh
//! copy. See [`index_in_previous`] for the exact rule.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod operation;
mod reconcile;
mod updater;

pub use operation::{Operation, Recording, apply, plan};
pub use reconcile::{index_in_previous, reconcile};
pub use updater::Updater;
