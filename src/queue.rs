use std::collections::VecDeque;

use parking_lot::{Condvar, Mutex};

/// An unbounded FIFO shared between the orchestrator and its workers.
///
/// Every operation takes the same lock, so no caller can observe a half-applied
/// push or pop. Emptiness is reported through `try_pop`'s return value, never as an error.
#[derive(Debug)]
pub struct WorkQueue<T> {
    items: Mutex<VecDeque<T>>,
    available: Condvar,
}

impl<T> Default for WorkQueue<T> {
    fn default() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            available: Condvar::new(),
        }
    }
}

impl<T> WorkQueue<T> {
    /// Creates a new empty `WorkQueue`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `item` to the tail and wakes at most one blocked waiter.
    pub fn push(&self, item: T) {
        self.items.lock().push_back(item);
        self.available.notify_one();
    }

    /// Appends every item of `iter` under a single lock acquisition.
    pub fn extend<I>(&self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.items.lock().extend(iter);
        self.available.notify_all();
    }

    /// Removes the head of the queue without blocking.
    ///
    /// # Returns
    /// `None` if the queue is empty at the moment of the call.
    pub fn try_pop(&self) -> Option<T> {
        self.items.lock().pop_front()
    }

    /// Blocks the calling thread until an item is available and removes it.
    pub fn blocking_pop(&self) -> T {
        let mut items = self.items.lock();

        loop {
            if let Some(item) = items.pop_front() {
                return item;
            }

            self.available.wait(&mut items);
        }
    }

    /// Returns the amount of queued items.
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    /// Drops every queued item.
    pub fn clear(&self) {
        self.items.lock().clear();
    }
}
