//! Arena pool with owning and bare handles.

use std::cell;
use std::fmt;
use std::mem;
use std::rc::Rc;

use crate::error::{PoolAccessError, PoolPopError};
use crate::slots::{Shared, Slots};

/// Index-stable storage for values of one type.
///
/// Values are added through [`Pool::add`], which hands back an owning
/// [`Item`]. Dropping the item deletes the slot. Deleted indices are reused
/// smallest-first, and deleting the last slot trims every deleted slot at
/// the tail, so `capacity()` never ends on a hole.
///
/// Handles share the storage with the pool. Dropping the pool voids the
/// storage: values stay readable through surviving handles, but their drops
/// no longer delete anything.
///
/// # Examples
///
/// ```
/// use hexrealm_pool::Pool;
///
/// let mut pool = Pool::new();
/// let a = pool.add("a");
/// let b = pool.add("b");
/// drop(a);
/// assert_eq!(pool.count(), 1);
/// let c = pool.add("c");
/// assert_eq!(c.index(), 0);
/// assert_eq!(*b.get().unwrap(), "b");
/// ```
pub struct Pool<T> {
    shared: Rc<Shared<T>>,
}

impl<T> Pool<T> {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self {
            shared: Shared::new(Slots::new()),
        }
    }

    /// Store a value and return the handle that owns its slot.
    pub fn add(&mut self, value: T) -> Item<T> {
        let index = self.shared.slots.borrow_mut().insert(value);
        Item {
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

    /// Borrow the value at `index`.
    pub fn get(&self, index: usize) -> Result<cell::Ref<'_, T>, PoolAccessError> {
        borrow(&self.shared, index)
    }

    /// Mutably borrow the value at `index`.
    pub fn get_mut(&mut self, index: usize) -> Result<cell::RefMut<'_, T>, PoolAccessError> {
        borrow_mut(&self.shared, index)
    }

    /// Delete the value at `index` directly.
    ///
    /// An [`Item`] that still owns the slot is left dangling; prefer
    /// dropping the item.
    pub fn pop(&mut self, index: usize) -> Result<(), PoolPopError> {
        let _removed = self.shared.slots.borrow_mut().remove(index)?;
        Ok(())
    }

    /// Point `item` at this pool, keeping its index.
    ///
    /// Used after cloning a pool so that handles copied alongside it refer
    /// to the copy instead of the source. The item stops owning its slot in
    /// the source, which is deleted there.
    pub fn rebase(&self, item: &mut Item<T>) {
        if Rc::ptr_eq(&self.shared, &item.shared) {
            return;
        }
        let source = mem::replace(&mut item.shared, Rc::clone(&self.shared));
        source.release(item.index);
    }

    /// Point a bare handle at this pool, keeping its index.
    pub fn rebase_ref(&self, r: &mut Ref<T>) {
        r.shared = Rc::clone(&self.shared);
    }

    /// Whether `item` points into this pool.
    pub fn owns(&self, item: &Item<T>) -> bool {
        Rc::ptr_eq(&self.shared, &item.shared)
    }
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Pool<T> {
    /// Deep-copy the storage. Existing handles keep pointing at `self`
    /// until passed to [`Pool::rebase`] on the copy.
    fn clone(&self) -> Self {
        let slots = self.shared.slots.borrow().clone();
        Self {
            shared: Shared::new(slots),
        }
    }
}

impl<T> Drop for Pool<T> {
    fn drop(&mut self) {
        self.shared.void.set(true);
    }
}

impl<T> fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.shared.slots.borrow();
        f.debug_struct("Pool")
            .field("capacity", &slots.capacity())
            .field("count", &slots.count())
            .field("deleted", &slots.deleted())
            .finish()
    }
}

/// Owning handle to a pool slot. Dropping it deletes the slot.
pub struct Item<T> {
    shared: Rc<Shared<T>>,
    index: usize,
}

impl<T> Item<T> {
    /// Slot index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Borrow the value.
    pub fn get(&self) -> Result<cell::Ref<'_, T>, PoolAccessError> {
        borrow(&self.shared, self.index)
    }

    /// Mutably borrow the value.
    pub fn get_mut(&mut self) -> Result<cell::RefMut<'_, T>, PoolAccessError> {
        borrow_mut(&self.shared, self.index)
    }

    /// A non-owning handle to the same slot.
    pub fn reference(&self) -> Ref<T> {
        Ref {
            shared: Rc::clone(&self.shared),
            index: self.index,
        }
    }
}

impl<T> Drop for Item<T> {
    fn drop(&mut self) {
        self.shared.release(self.index);
    }
}

impl<T> PartialEq for Item<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared) && self.index == other.index
    }
}

impl<T> Eq for Item<T> {}

impl<T> fmt::Debug for Item<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Item").field(&self.index).finish()
    }
}

/// Bare handle to a pool slot. Never deletes anything.
pub struct Ref<T> {
    shared: Rc<Shared<T>>,
    index: usize,
}

impl<T> Ref<T> {
    /// Slot index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Borrow the value, if the slot is still live.
    pub fn get(&self) -> Result<cell::Ref<'_, T>, PoolAccessError> {
        borrow(&self.shared, self.index)
    }

    /// Mutably borrow the value, if the slot is still live.
    pub fn get_mut(&self) -> Result<cell::RefMut<'_, T>, PoolAccessError> {
        borrow_mut(&self.shared, self.index)
    }
}

impl<T> Clone for Ref<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
            index: self.index,
        }
    }
}

impl<T> PartialEq for Ref<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared) && self.index == other.index
    }
}

impl<T> Eq for Ref<T> {}

impl<T> fmt::Debug for Ref<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Ref").field(&self.index).finish()
    }
}

fn borrow<T>(shared: &Shared<T>, index: usize) -> Result<cell::Ref<'_, T>, PoolAccessError> {
    let slots = shared.slots.borrow();
    slots.check(index)?;
    cell::Ref::filter_map(slots, |s| s.get(index)).map_err(|_| PoolAccessError::Deleted { index })
}

fn borrow_mut<T>(
    shared: &Shared<T>,
    index: usize,
) -> Result<cell::RefMut<'_, T>, PoolAccessError> {
    let slots = shared.slots.borrow_mut();
    slots.check(index)?;
    cell::RefMut::filter_map(slots, |s| s.get_mut(index))
        .map_err(|_| PoolAccessError::Deleted { index })
}
