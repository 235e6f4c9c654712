use std::fmt;

// ============================================================================
// Change Notifier - Observer list for applied events
// ============================================================================
//
// Observers are plain callbacks. They are invoked synchronously, in
// subscription order, once per event handed to `notify`.
//
// ============================================================================

/// Handle returned by `subscribe`, used to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer<E> = Box<dyn FnMut(&E) + Send>;

pub struct ChangeNotifier<E> {
    next_id: u64,
    observers: Vec<(SubscriptionId, Observer<E>)>,
}

impl<E> ChangeNotifier<E> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            observers: Vec::new(),
        }
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&E) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false when the subscription was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub fn notify(&mut self, event: &E) {
        for (_, observer) in self.observers.iter_mut() {
            observer(event);
        }
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl<E> Default for ChangeNotifier<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for ChangeNotifier<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("observers", &self.observers.len())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_notify_reaches_all_observers_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut notifier = ChangeNotifier::<u32>::new();

        let first = seen.clone();
        notifier.subscribe(move |value| first.lock().unwrap().push(("first", *value)));
        let second = seen.clone();
        notifier.subscribe(move |value| second.lock().unwrap().push(("second", *value)));

        notifier.notify(&7);

        assert_eq!(*seen.lock().unwrap(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Arc::new(Mutex::new(0));
        let mut notifier = ChangeNotifier::<()>::new();

        let counter = count.clone();
        let id = notifier.subscribe(move |_| *counter.lock().unwrap() += 1);

        notifier.notify(&());
        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
        notifier.notify(&());

        assert_eq!(*count.lock().unwrap(), 1);
        assert_eq!(notifier.observer_count(), 0);
    }
}
