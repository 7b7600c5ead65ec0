//! Slot bookkeeping shared by [`Pool`](crate::Pool) and
//! [`RefPool`](crate::RefPool).

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::error::{PoolAccessError, PoolPopError};

/// Storage reachable from a pool and from every handle into it.
///
/// `void` is set when the pool value is dropped. Handles may outlive the
/// pool; their releases become no-ops from then on.
pub(crate) struct Shared<V> {
    pub(crate) slots: RefCell<Slots<V>>,
    pub(crate) void: Cell<bool>,
}

impl<V> Shared<V> {
    pub(crate) fn new(slots: Slots<V>) -> Rc<Self> {
        Rc::new(Self {
            slots: RefCell::new(slots),
            void: Cell::new(false),
        })
    }

    /// Remove `index` on behalf of a handle being dropped.
    pub(crate) fn release(&self, index: usize) {
        if self.void.get() {
            tracing::trace!(index, "handle released after its pool was dropped");
            return;
        }
        // Values are dropped after the borrow ends so a value holding
        // handles into this same pool cannot re-enter it.
        let removed = self.slots.borrow_mut().remove(index);
        if let Err(e) = &removed {
            tracing::debug!(error = %e, "owning handle released an already removed slot");
        }
    }
}

/// Dense slot vector with a free list.
///
/// A removed slot gives up its value immediately and stays empty until
/// reused or trimmed.
#[derive(Clone)]
pub(crate) struct Slots<V> {
    values: Vec<Option<V>>,
    deleted: BTreeSet<usize>,
}

impl<V> Slots<V> {
    pub(crate) fn new() -> Self {
        Self {
            values: Vec::new(),
            deleted: BTreeSet::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn count(&self) -> usize {
        self.values.len() - self.deleted.len()
    }

    pub(crate) fn deleted(&self) -> usize {
        self.deleted.len()
    }

    /// Store `value` in the smallest free index, or append.
    pub(crate) fn insert(&mut self, value: V) -> usize {
        match self.deleted.pop_first() {
            Some(index) => {
                self.values[index] = Some(value);
                index
            }
            None => {
                self.values.push(Some(value));
                self.values.len() - 1
            }
        }
    }

    /// Mark `index` deleted, trimming every deleted slot at the tail.
    ///
    /// Returns the removed value so the caller can drop it outside any
    /// borrow of the slots.
    pub(crate) fn remove(&mut self, index: usize) -> Result<Option<V>, PoolPopError> {
        let capacity = self.values.len();
        if index >= capacity {
            return Err(PoolPopError::OutOfRange { index, capacity });
        }
        if self.deleted.contains(&index) {
            return Err(PoolPopError::Deleted { index });
        }

        let removed = if index + 1 == capacity {
            let value = self.values.pop().flatten();
            while let Some(&last) = self.deleted.last() {
                if last + 1 != self.values.len() {
                    break;
                }
                self.deleted.pop_last();
                self.values.pop();
            }
            value
        } else {
            self.deleted.insert(index);
            self.values[index].take()
        };
        Ok(removed)
    }

    pub(crate) fn check(&self, index: usize) -> Result<(), PoolAccessError> {
        let capacity = self.values.len();
        if index >= capacity {
            return Err(PoolAccessError::OutOfRange { index, capacity });
        }
        if self.deleted.contains(&index) {
            return Err(PoolAccessError::Deleted { index });
        }
        Ok(())
    }

    /// Direct slot access for handles whose slot is known to be live.
    pub(crate) fn slot(&self, index: usize) -> &V {
        self.get(index)
            .expect("a live handle always points at an occupied slot")
    }

    pub(crate) fn slot_mut(&mut self, index: usize) -> &mut V {
        self.get_mut(index)
            .expect("a live handle always points at an occupied slot")
    }

    pub(crate) fn get(&self, index: usize) -> Option<&V> {
        self.values.get(index).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut V> {
        self.values.get_mut(index).and_then(Option::as_mut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_middle_then_tail_trims_both() {
        let mut slots = Slots::new();
        for v in 0..5 {
            slots.insert(v);
        }
        assert_eq!(slots.remove(3).unwrap(), Some(3));
        assert_eq!(slots.capacity(), 5);
        assert_eq!(slots.remove(4).unwrap(), Some(4));
        assert_eq!(slots.capacity(), 3);
        assert_eq!(slots.deleted(), 0);
    }

    #[test]
    fn removed_slot_is_emptied_and_reused() {
        let mut slots = Slots::new();
        slots.insert("a");
        slots.insert("b");
        assert_eq!(slots.remove(0).unwrap(), Some("a"));
        assert_eq!(slots.get(0), None);
        assert_eq!(slots.insert("c"), 0);
        assert_eq!(slots.get(0), Some(&"c"));
    }
}
