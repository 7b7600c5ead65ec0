//! Reference-counted pool.
//!
//! Same slot discipline as [`Pool`](crate::Pool), but a slot lives as long
//! as at least one [`Share`] points at it.

use std::cell;
use std::collections::BTreeMap;
use std::fmt;
use std::mem;
use std::rc::Rc;

use crate::slots::{Shared, Slots};

#[derive(Clone)]
struct Counted<T> {
    value: T,
    refs: usize,
}

/// Pool of values shared between many handles.
///
/// # Examples
///
/// ```
/// use hexrealm_pool::RefPool;
///
/// let mut pool = RefPool::new();
/// let a = pool.add(10u32);
/// let b = a.clone();
/// assert_eq!(a.refs(), 2);
/// *b.get_mut() += 1;
/// assert_eq!(*a.get(), 11);
/// drop(a);
/// drop(b);
/// assert_eq!(pool.count(), 0);
/// ```
pub struct RefPool<T> {
    shared: Rc<Shared<Counted<T>>>,
}

impl<T> RefPool<T> {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self {
            shared: Shared::new(Slots::new()),
        }
    }

    /// Store a value and return the first handle to it.
    pub fn add(&mut self, value: T) -> Share<T> {
        let index = self
            .shared
            .slots
            .borrow_mut()
            .insert(Counted { value, refs: 1 });
        Share {
            shared: Rc::clone(&self.shared),
            index,
        }
    }

    /// Number of slots spanned, deleted holes included.
    pub fn capacity(&self) -> usize {
        self.shared.slots.borrow().capacity()
    }

    /// Number of live values.
    pub fn count(&self) -> usize {
        self.shared.slots.borrow().count()
    }

    /// Point `share` at this pool, keeping its index.
    ///
    /// The handle gives up its count in the source pool and takes over one
    /// of the counts the copy inherited when it was cloned. Rebasing one
    /// handle per handle that existed at clone time leaves both pools
    /// consistent.
    pub fn rebase(&self, share: &mut Share<T>) {
        if Rc::ptr_eq(&self.shared, &share.shared) {
            return;
        }
        let source = mem::replace(&mut share.shared, Rc::clone(&self.shared));
        decrement(&source, share.index);
    }

    /// Whether `share` points into this pool.
    pub fn owns(&self, share: &Share<T>) -> bool {
        Rc::ptr_eq(&self.shared, &share.shared)
    }

    /// Reset every count to the number of `shares` pointing at its slot.
    ///
    /// Slots none of `shares` reach are deleted. After cloning a pool and
    /// rebasing the handles that belong with the copy, this drops the counts
    /// the copy inherited from handles that stayed with the source.
    pub fn recount<'a>(&self, shares: impl IntoIterator<Item = &'a Share<T>>)
    where
        T: 'a,
    {
        let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
        for share in shares {
            if self.owns(share) {
                *counts.entry(share.index).or_default() += 1;
            }
        }

        let mut orphans = Vec::new();
        {
            let mut slots = self.shared.slots.borrow_mut();
            for index in 0..slots.capacity() {
                if let Some(c) = slots.get_mut(index) {
                    c.refs = counts.get(&index).copied().unwrap_or(0);
                    if c.refs == 0 {
                        orphans.push(index);
                    }
                }
            }
        }
        for index in orphans {
            self.shared.release(index);
        }
    }
}

impl<T> Default for RefPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for RefPool<T> {
    fn clone(&self) -> Self {
        let slots = self.shared.slots.borrow().clone();
        Self {
            shared: Shared::new(slots),
        }
    }
}

impl<T> Drop for RefPool<T> {
    fn drop(&mut self) {
        self.shared.void.set(true);
    }
}

impl<T> fmt::Debug for RefPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.shared.slots.borrow();
        f.debug_struct("RefPool")
            .field("capacity", &slots.capacity())
            .field("count", &slots.count())
            .field("deleted", &slots.deleted())
            .finish()
    }
}

/// Counted handle into a [`RefPool`].
///
/// Cloning increments the slot's count and dropping decrements it; the
/// slot is deleted when the count reaches zero. Equality is pool identity
/// plus index, so two handles compare equal exactly when they name the
/// same slot.
pub struct Share<T> {
    shared: Rc<Shared<Counted<T>>>,
    index: usize,
}

impl<T> Share<T> {
    /// Slot index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of handles pointing at this slot.
    pub fn refs(&self) -> usize {
        self.shared
            .slots
            .borrow()
            .get(self.index)
            .map_or(0, |c| c.refs)
    }

    /// Borrow the shared value.
    ///
    /// # Panics
    ///
    /// Panics if the value is currently mutably borrowed through another
    /// handle to the same pool.
    pub fn get(&self) -> cell::Ref<'_, T> {
        cell::Ref::map(self.shared.slots.borrow(), |s| &s.slot(self.index).value)
    }

    /// Mutably borrow the shared value.
    ///
    /// Every handle to the slot observes the change.
    ///
    /// # Panics
    ///
    /// Panics if any value in the pool is currently borrowed.
    pub fn get_mut(&self) -> cell::RefMut<'_, T> {
        cell::RefMut::map(self.shared.slots.borrow_mut(), |s| {
            &mut s.slot_mut(self.index).value
        })
    }
}

impl<T> Clone for Share<T> {
    fn clone(&self) -> Self {
        if let Some(c) = self.shared.slots.borrow_mut().get_mut(self.index) {
            c.refs += 1;
        }
        Self {
            shared: Rc::clone(&self.shared),
            index: self.index,
        }
    }
}

impl<T> Drop for Share<T> {
    fn drop(&mut self) {
        decrement(&self.shared, self.index);
    }
}

fn decrement<T>(shared: &Shared<Counted<T>>, index: usize) {
    if shared.void.get() {
        return;
    }
    let last = match shared.slots.borrow_mut().get_mut(index) {
        Some(c) => {
            c.refs = c.refs.saturating_sub(1);
            c.refs == 0
        }
        None => false,
    };
    if last {
        shared.release(index);
    }
}

impl<T> PartialEq for Share<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared) && self.index == other.index
    }
}

impl<T> Eq for Share<T> {}

impl<T> fmt::Debug for Share<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Share")
            .field("index", &self.index)
            .field("refs", &self.refs())
            .finish()
    }
}
