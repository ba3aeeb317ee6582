// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Memoized child-view lookups within a holder's root view.
//!
//! Finding a child view by identifier usually means walking the view tree.
//! A [`ViewCache`] remembers every successful lookup, so a holder that is
//! rebound many times only walks its tree once per child.
//!
//! Lookups can be scoped to a parent view. The parent itself is resolved (and
//! cached) first, then the child is searched for beneath it. Unscoped lookups
//! also reuse children that were previously found through a parent.
//!
//! ```rust
//! use understory_adapter::view_cache::{ViewCache, ViewId, ViewLookup};
//!
//! /// A tiny flat "tree": every view is a direct child of view 0.
//! struct Flat;
//!
//! impl ViewLookup for Flat {
//!     type View = u32;
//!
//!     fn find_child(&self, parent: &u32, id: ViewId) -> Option<u32> {
//!         (*parent == 0 && id.0 < 10).then_some(id.0)
//!     }
//! }
//!
//! let mut cache = ViewCache::new(Flat, 0);
//! assert_eq!(cache.find(ViewId(3)), Some(3));
//! assert_eq!(cache.find(ViewId(42)), None);
//! ```

use alloc::collections::BTreeMap;

use hashbrown::HashMap;

/// Identifier of a view within a holder's view tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewId(pub u32);

/// How to search a host view tree.
pub trait ViewLookup {
    /// A cheap, clonable handle to a view.
    type View: Clone;

    /// Finds the view with identifier `id` at or beneath `parent`.
    fn find_child(&self, parent: &Self::View, id: ViewId) -> Option<Self::View>;

    /// Returns `false` if `view` has been torn down and must not be reused.
    ///
    /// Dead views are evicted from the cache when they are next looked up.
    fn is_live(&self, view: &Self::View) -> bool {
        let _ = view;
        true
    }
}

/// Cache of child views found under a root view.
///
/// Entries are keyed by the parent they were looked up under (`None` for the
/// root) and then by view identifier. Parents are visited in identifier order
/// when an unscoped lookup falls back to parent-scoped entries.
pub struct ViewCache<L: ViewLookup> {
    lookup: L,
    root: L::View,
    views: BTreeMap<Option<ViewId>, HashMap<ViewId, L::View>>,
}

impl<L: ViewLookup> ViewCache<L> {
    /// Creates an empty cache over the tree rooted at `root`.
    pub fn new(lookup: L, root: L::View) -> Self {
        Self {
            lookup,
            root,
            views: BTreeMap::new(),
        }
    }

    /// The root view.
    pub fn root(&self) -> &L::View {
        &self.root
    }

    /// The lookup strategy.
    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Number of cached views.
    pub fn len(&self) -> usize {
        self.views.values().map(HashMap::len).sum()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finds the view `id` beneath the root, from the cache when possible.
    pub fn find(&mut self, id: ViewId) -> Option<L::View> {
        if let Some(view) = self.cached(None, id) {
            return Some(view);
        }
        let scoped: Option<ViewId> = self
            .views
            .iter()
            .filter(|(parent, views)| parent.is_some() && views.contains_key(&id))
            .map(|(parent, _)| *parent)
            .next()
            .flatten();
        if let Some(parent) = scoped
            && let Some(view) = self.cached(Some(parent), id)
        {
            return Some(view);
        }
        let view = self.lookup.find_child(&self.root, id)?;
        self.store(None, id, view.clone());
        Some(view)
    }

    /// Finds the view `id` beneath the view `parent`, from the cache when possible.
    ///
    /// Returns `None` if either view cannot be found.
    pub fn find_in(&mut self, parent: ViewId, id: ViewId) -> Option<L::View> {
        if let Some(view) = self.cached(Some(parent), id) {
            return Some(view);
        }
        let parent_view = self.find(parent)?;
        let view = self.lookup.find_child(&parent_view, id)?;
        self.store(Some(parent), id, view.clone());
        Some(view)
    }

    /// Forgets every cached view.
    pub fn clear(&mut self) {
        self.views.clear();
    }

    /// Forgets the view `id` cached directly under the root.
    pub fn clear_view(&mut self, id: ViewId) {
        self.evict(None, id);
    }

    /// Forgets the view `id` cached under `parent`.
    pub fn clear_view_in(&mut self, parent: ViewId, id: ViewId) {
        self.evict(Some(parent), id);
    }

    fn cached(&mut self, parent: Option<ViewId>, id: ViewId) -> Option<L::View> {
        let view = self.views.get(&parent)?.get(&id)?;
        if self.lookup.is_live(view) {
            return Some(view.clone());
        }
        log::trace!("evicting dead view {id:?} under {parent:?}");
        self.evict(parent, id);
        None
    }

    fn store(&mut self, parent: Option<ViewId>, id: ViewId, view: L::View) {
        self.views.entry(parent).or_default().insert(id, view);
    }

    fn evict(&mut self, parent: Option<ViewId>, id: ViewId) {
        if let Some(views) = self.views.get_mut(&parent) {
            views.remove(&id);
        }
    }
}

impl<L> core::fmt::Debug for ViewCache<L>
where
    L: ViewLookup + core::fmt::Debug,
    L::View: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ViewCache")
            .field("lookup", &self.lookup)
            .field("root", &self.root)
            .field("views", &self.views)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::{Cell, RefCell};

    use super::{ViewCache, ViewId, ViewLookup};

    /// A view tree given as `(id, parent)` pairs; view handles are the ids.
    #[derive(Default)]
    struct Tree {
        nodes: Vec<(u32, u32)>,
        dead: RefCell<Vec<u32>>,
        walks: Cell<usize>,
    }

    impl Tree {
        fn new(nodes: &[(u32, u32)]) -> Self {
            Self {
                nodes: nodes.to_vec(),
                ..Self::default()
            }
        }

        fn is_beneath(&self, mut node: u32, ancestor: u32) -> bool {
            while node != ancestor {
                match self.nodes.iter().find(|(id, _)| *id == node) {
                    Some(&(_, parent)) if parent != node => node = parent,
                    _ => return false,
                }
            }
            true
        }
    }

    impl ViewLookup for Tree {
        type View = u32;

        fn find_child(&self, parent: &u32, id: ViewId) -> Option<u32> {
            self.walks.set(self.walks.get() + 1);
            let known = id.0 == *parent || self.nodes.iter().any(|(n, _)| *n == id.0);
            (known && !self.dead.borrow().contains(&id.0) && self.is_beneath(id.0, *parent))
                .then_some(id.0)
        }

        fn is_live(&self, view: &u32) -> bool {
            !self.dead.borrow().contains(view)
        }
    }

    /// root(0) -> header(1) -> title(2); root(0) -> body(3) -> title2(4)
    fn cache() -> ViewCache<Tree> {
        ViewCache::new(Tree::new(&[(1, 0), (2, 1), (3, 0), (4, 3)]), 0)
    }

    #[test]
    fn second_lookup_is_served_from_cache() {
        let mut c = cache();
        assert_eq!(c.find(ViewId(2)), Some(2));
        assert_eq!(c.find(ViewId(2)), Some(2));
        assert_eq!(c.lookup().walks.get(), 1);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn misses_are_not_cached() {
        let mut c = cache();
        assert_eq!(c.find(ViewId(9)), None);
        assert_eq!(c.find(ViewId(9)), None);
        assert_eq!(c.lookup().walks.get(), 2);
        assert!(c.is_empty());
    }

    #[test]
    fn scoped_lookup_resolves_and_caches_the_parent() {
        let mut c = cache();
        assert_eq!(c.find_in(ViewId(3), ViewId(4)), Some(4));
        // Parent 3 was cached at root level, child 4 under 3.
        assert_eq!(c.len(), 2);
        assert_eq!(c.find_in(ViewId(1), ViewId(4)), None);
        assert_eq!(c.find_in(ViewId(7), ViewId(4)), None);

        let walks = c.lookup().walks.get();
        // An unscoped lookup reuses the scoped entry.
        assert_eq!(c.find(ViewId(4)), Some(4));
        assert_eq!(c.lookup().walks.get(), walks);
    }

    #[test]
    fn clearing_forces_a_new_walk() {
        let mut c = cache();
        c.find(ViewId(1));
        c.find_in(ViewId(1), ViewId(2));
        c.clear_view(ViewId(1));
        c.clear_view_in(ViewId(1), ViewId(2));
        assert!(c.is_empty());

        c.find(ViewId(3));
        c.clear();
        assert!(c.is_empty());
        let walks = c.lookup().walks.get();
        assert_eq!(c.find(ViewId(3)), Some(3));
        assert_eq!(c.lookup().walks.get(), walks + 1);
    }

    #[test]
    fn dead_views_are_evicted() {
        let mut c = cache();
        assert_eq!(c.find(ViewId(1)), Some(1));
        *c.lookup().dead.borrow_mut() = vec![1];
        assert_eq!(c.find(ViewId(1)), None);
        assert!(c.is_empty());
        assert_eq!(*c.root(), 0);
    }
}
