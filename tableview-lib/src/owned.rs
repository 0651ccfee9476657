//! Dual ownership of a state axis

use std::fmt;
use std::sync::Arc;

/// Change notification for an externally owned value.
pub type Notify<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// A piece of table state held either by the engine or by its caller.
///
/// Resolved once at construction. `Internal` values change in place on every
/// request. `External` values only change when the owner pushes a new value
/// back through [`Owned::sync`]; a request merely notifies the owner.
///
/// # Example
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use tableview_lib::owned::Owned;
///
/// let mut local = Owned::internal(String::new());
/// local.request("ada".to_string());
/// assert_eq!(local.value(), "ada");
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = seen.clone();
/// let mut remote = Owned::external(String::new(), move |q: &String| sink.lock().unwrap().push(q.clone()));
/// remote.request("ada".to_string());
/// assert_eq!(remote.value(), "");
/// assert_eq!(*seen.lock().unwrap(), ["ada"]);
/// ```
pub enum Owned<T> {
    Internal(T),
    External(T, Notify<T>),
}

impl<T> Owned<T> {
    pub fn internal(value: T) -> Self {
        Self::Internal(value)
    }

    pub fn external(value: T, notify: impl Fn(&T) + Send + Sync + 'static) -> Self {
        Self::External(value, Arc::new(notify))
    }

    /// Current value (for external axes, the last one the owner supplied).
    pub fn value(&self) -> &T {
        match self {
            Self::Internal(value) | Self::External(value, _) => value,
        }
    }

    /// Returns `true` when the caller owns the value.
    pub fn is_controlled(&self) -> bool {
        matches!(self, Self::External(..))
    }

    /// Asks for a new value: stored when internal, forwarded when external.
    pub fn request(&mut self, value: T) {
        match self {
            Self::Internal(current) => *current = value,
            Self::External(_, notify) => notify(&value),
        }
    }

    /// Adopts a value pushed down by the owner. Does not notify.
    pub fn sync(&mut self, value: T) {
        match self {
            Self::Internal(current) | Self::External(current, _) => *current = value,
        }
    }
}

impl<T: Clone> Clone for Owned<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Internal(value) => Self::Internal(value.clone()),
            Self::External(value, notify) => Self::External(value.clone(), Arc::clone(notify)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Owned<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Internal(value) => f.debug_tuple("Internal").field(value).finish(),
            Self::External(value, _) => f.debug_tuple("External").field(value).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    #[test]
    fn test_external_request_only_notifies() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut owned = Owned::external(1, move |_: &i32| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        owned.request(2);
        assert_eq!(*owned.value(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        owned.sync(2);
        assert_eq!(*owned.value(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(owned.is_controlled());
    }

    #[test]
    fn test_internal_request_stores() {
        let mut owned = Owned::internal(vec![1]);
        owned.request(vec![]);
        assert!(owned.value().is_empty());
        assert!(!owned.is_controlled());
    }
}
