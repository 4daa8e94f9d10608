//! Single-thread-or-multi-thread mutexing, switched on at library init
//! and applied uniformly at the engine and VM level.
//!
//! In single-thread mode (the default) every lock call is free: there is
//! no mutex to acquire. In multi-thread mode each [`Guarded`] wraps a
//! reentrant lock so the same thread can re-enter an API surface it's
//! already holding (a host callback invoked mid-operation calling back
//! into the engine) without deadlocking itself.

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadLevel {
    Single,
    Multi,
}

impl Default for ThreadLevel {
    fn default() -> Self {
        ThreadLevel::Single
    }
}

/// A lock that exists only under [`ThreadLevel::Multi`]; under `Single`
/// every `enter` call is a no-op.
pub struct Guarded {
    lock: Option<ReentrantMutex<()>>,
}

impl Guarded {
    pub fn new(level: ThreadLevel) -> Self {
        Self { lock: matches!(level, ThreadLevel::Multi).then(|| ReentrantMutex::new(())) }
    }

    pub fn set_level(&mut self, level: ThreadLevel) {
        self.lock = matches!(level, ThreadLevel::Multi).then(|| ReentrantMutex::new(()));
    }

    /// Acquires the lock for the duration of the returned guard's scope.
    /// Holds nothing under `Single` mode.
    pub fn enter(&self) -> Ticket<'_> {
        Ticket(self.lock.as_ref().map(ReentrantMutex::lock))
    }
}

/// RAII guard returned by [`Guarded::enter`]. Releases on drop; carries
/// no payload under single-thread mode.
pub struct Ticket<'a>(Option<ReentrantMutexGuard<'a, ()>>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_thread_mode_holds_no_lock() {
        let g = Guarded::new(ThreadLevel::Single);
        let _a = g.enter();
        let _b = g.enter();
    }

    #[test]
    fn multi_thread_mode_is_reentrant_on_one_thread() {
        let g = Guarded::new(ThreadLevel::Multi);
        let _a = g.enter();
        let _b = g.enter();
    }
}
