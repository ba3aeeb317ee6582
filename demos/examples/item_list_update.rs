// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter updates: an item list reconciled against new data, with view lookups.
//!
//! This example shows how to combine:
//! - `understory_adapter::ItemList` for the backing data and row notifications,
//! - `understory_reconcile::plan` to preview a transition before applying it,
//! - `understory_adapter::ViewCache` to memoize child-view lookups while binding.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p understory_demos --example item_list_update`

use std::collections::HashMap;

use understory_adapter::{ChangeLog, ItemList, ViewCache, ViewHolder, ViewId, ViewLookup};
use understory_reconcile::plan;

const TITLE: ViewId = ViewId(1);
const SUBTITLE: ViewId = ViewId(2);

/// A flat stand-in for a toolkit's view tree: view id -> parent id.
#[derive(Debug)]
struct RowTemplate {
    parents: HashMap<u32, u32>,
}

impl ViewLookup for RowTemplate {
    type View = u32;

    fn find_child(&self, parent: &u32, id: ViewId) -> Option<u32> {
        log::debug!("walking row template for {id:?}");
        let mut node = id.0;
        while node != *parent {
            node = *self.parents.get(&node)?;
        }
        Some(id.0)
    }
}

/// A holder that renders into text slots keyed by child view.
struct Row {
    views: ViewCache<RowTemplate>,
    text: HashMap<u32, String>,
}

impl Row {
    fn new() -> Self {
        let template = RowTemplate {
            parents: HashMap::from([(TITLE.0, 0), (SUBTITLE.0, TITLE.0)]),
        };
        Self {
            views: ViewCache::new(template, 0),
            text: HashMap::new(),
        }
    }
}

impl ViewHolder<(&'static str, u32)> for Row {
    fn update_view(&mut self, item: &(&'static str, u32), position: usize) {
        let (name, count) = *item;
        if let Some(title) = self.views.find(TITLE) {
            self.text.insert(title, format!("{position}: {name}"));
        }
        if let Some(subtitle) = self.views.find_in(TITLE, SUBTITLE) {
            self.text.insert(subtitle, format!("{count} unread"));
        }
    }
}

fn main() {
    env_logger::init();

    let mut inbox: ItemList<(&str, u32), ChangeLog> = ItemList::new(ChangeLog::new());
    inbox.set_header(true);
    inbox.extend([("alice", 2), ("bob", 0), ("carol", 5)]);
    println!("initial: {:?}", inbox.sink_mut().drain());

    let next = [("carol", 5), ("alice", 2), ("dave", 1)];
    for op in plan(inbox.items(), &next) {
        println!("planned: {op:?}");
    }

    inbox.update_with(&next);
    println!("rows: {:?}", inbox.sink_mut().drain());

    let mut row = Row::new();
    for index in 0..inbox.len() {
        inbox.bind(&mut row, index);
        println!(
            "bound {:?} / {:?}",
            row.text.get(&TITLE.0),
            row.text.get(&SUBTITLE.0)
        );
    }
    println!("cached views: {}", row.views.len());
}
