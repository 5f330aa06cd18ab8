//! Optional callbacks as an explicit capability.
//!
//! Code that reports an event takes `impl Listener<T>`; callers that do not
//! care pass [`NoopListener`] instead of an `Option` that must be checked.

pub trait Listener<T> {
    fn emit(&self, value: T);
}

/// Listener that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl<T> Listener<T> for NoopListener {
    fn emit(&self, _value: T) {}
}

impl<T, F: Fn(T)> Listener<T> for F {
    fn emit(&self, value: T) {
        self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn fire<L: Listener<u32>>(listener: &L) {
        listener.emit(7);
    }

    #[test]
    fn test_closure_listener_receives_value() {
        let seen = RefCell::new(Vec::new());
        fire(&|v: u32| seen.borrow_mut().push(v));
        assert_eq!(*seen.borrow(), vec![7]);
    }

    #[test]
    fn test_noop_listener() {
        fire(&NoopListener);
    }
}
