use std::cell::RefCell;

type Callback<T> = Box<dyn FnMut(&T)>;

/// Single-slot completion callback. Subscribing again replaces the previous
/// callback; there is never more than one listener.
pub struct Notifier<T> {
    slot: RefCell<Option<Callback<T>>>,
}

impl<T> Notifier<T> {
    pub fn new() -> Self {
        Self {
            slot: RefCell::new(None),
        }
    }

    pub fn subscribe(&self, callback: impl FnMut(&T) + 'static) {
        *self.slot.borrow_mut() = Some(Box::new(callback));
    }

    /// Returns whether a callback was invoked.
    pub fn notify(&self, value: &T) -> bool {
        // Taken out of the slot for the call so the callback may resubscribe.
        let Some(mut callback) = self.slot.borrow_mut().take() else {
            return false;
        };
        callback(value);

        let mut slot = self.slot.borrow_mut();
        if slot.is_none() {
            *slot = Some(callback);
        }
        true
    }
}

impl<T> Default for Notifier<T> {
    fn default() -> Self {
        Self::new()
    }
}
