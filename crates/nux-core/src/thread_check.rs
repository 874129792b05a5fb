//! Thread affinity checks.
//!
//! Input routing in Nux is single-threaded: a compositor, its areas and its
//! gesture broker are only ever touched by the window thread that created
//! them. [`ThreadAffinity`] records that thread and lets the owner assert it
//! at its entry points.
//!
//! ```
//! use nux_core::ThreadAffinity;
//!
//! struct Dispatcher {
//!     affinity: ThreadAffinity,
//! }
//!
//! impl Dispatcher {
//!     fn dispatch(&mut self) {
//!         self.affinity.debug_assert_same_thread();
//!         // ... safe to touch routing state ...
//!     }
//! }
//!
//! let mut dispatcher = Dispatcher { affinity: ThreadAffinity::current() };
//! dispatcher.dispatch();
//! ```

use std::thread::ThreadId;

/// Records the thread an object belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadAffinity {
    thread_id: ThreadId,
}

impl Default for ThreadAffinity {
    fn default() -> Self {
        Self::current()
    }
}

impl ThreadAffinity {
    /// Create a new thread affinity tracker for the current thread.
    #[inline]
    pub fn current() -> Self {
        Self {
            thread_id: std::thread::current().id(),
        }
    }

    /// Get the thread ID this affinity is bound to.
    #[inline]
    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    /// Check if the current thread matches this affinity.
    #[inline]
    pub fn is_same_thread(&self) -> bool {
        std::thread::current().id() == self.thread_id
    }

    /// Assert that we are on the same thread as the affinity.
    ///
    /// This always runs (debug and release builds).
    ///
    /// # Panics
    ///
    /// Panics with a descriptive message if called from a different thread.
    #[inline]
    pub fn assert_same_thread(&self) {
        self.assert_same_thread_with_msg("object accessed from wrong thread")
    }

    /// Assert that we are on the same thread, with a custom message.
    ///
    /// # Panics
    ///
    /// Panics if called from a different thread.
    pub fn assert_same_thread_with_msg(&self, msg: &str) {
        if !self.is_same_thread() {
            self.panic_wrong_thread(msg);
        }
    }

    /// Debug-only assertion that we are on the same thread.
    ///
    /// This is a no-op in release builds.
    #[inline]
    pub fn debug_assert_same_thread(&self) {
        #[cfg(debug_assertions)]
        self.assert_same_thread();
    }

    #[cold]
    #[inline(never)]
    fn panic_wrong_thread(&self, msg: &str) -> ! {
        let current = std::thread::current();
        let current_name = current.name().unwrap_or("<unnamed>");
        let current_id = current.id();

        panic!(
            "thread affinity violation: {msg}\n\
             owner thread: {:?}\n\
             current thread: \"{current_name}\" ({current_id:?})\n\
             input routing state must only be touched from the window thread that created it",
            self.thread_id
        )
    }
}
