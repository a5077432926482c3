//! Shared, append-only data log carried from state to state.
//!
//! A transition does not copy the log: the destination receives a handle to
//! the same storage as its predecessor. Every state reached from a common
//! lineage therefore observes the same appends, which is what makes the log
//! an accumulating trail. Replacing a state's handle (see
//! [`State::replace_data`](crate::core::State::replace_data)) is the only
//! way to detach it from that lineage.

use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Reference-counted handle to an ordered log of values.
///
/// Cloning a `DataLog` aliases the same storage; use [`DataLog::detached`]
/// for an independent copy.
///
/// # Example
///
/// ```rust
/// use instate::core::DataLog;
///
/// let log = DataLog::from(vec!["math"]);
/// let alias = log.clone();
/// alias.push("geography");
///
/// assert_eq!(log.len(), 2);
/// assert!(log.shares_with(&alias));
/// ```
pub struct DataLog<D> {
    entries: Arc<RwLock<Vec<D>>>,
}

impl<D> DataLog<D> {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Append a value to the end of the log.
    pub fn push(&self, value: D) {
        self.entries.write().push(value);
    }

    /// Append every value from `values`, preserving their order.
    pub fn extend<I: IntoIterator<Item = D>>(&self, values: I) {
        self.entries.write().extend(values);
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Whether both handles point at the same storage.
    pub fn shares_with(&self, other: &DataLog<D>) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }

    /// Run `f` against the current contents without cloning them.
    pub fn with<R>(&self, f: impl FnOnce(&[D]) -> R) -> R {
        f(&self.entries.read())
    }
}

impl<D: Clone> DataLog<D> {
    /// Copy of the current contents.
    pub fn to_vec(&self) -> Vec<D> {
        self.entries.read().clone()
    }

    pub fn last(&self) -> Option<D> {
        self.entries.read().last().cloned()
    }

    pub fn get(&self, index: usize) -> Option<D> {
        self.entries.read().get(index).cloned()
    }

    /// New log holding a copy of the current contents, sharing nothing.
    pub fn detached(&self) -> Self {
        Self::from(self.to_vec())
    }
}

impl<D> Clone for DataLog<D> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<D> Default for DataLog<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> From<Vec<D>> for DataLog<D> {
    fn from(values: Vec<D>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(values)),
        }
    }
}

impl<D: fmt::Debug> fmt::Debug for DataLog<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.read().iter()).finish()
    }
}
