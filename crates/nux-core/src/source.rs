//! Poll-driven event sources.
//!
//! A source is something with data to read "sometimes": the multitouch
//! recognizer feed is the main example. The event loop calls
//! [`SourceRegistry::dispatch_ready`] once per iteration; every registered
//! source whose [`PollSource::is_ready`] returns `true` gets its
//! [`PollSource::dispatch`] called with the loop's context.
//!
//! Sources may remove themselves, either by returning
//! [`SourceControl::Remove`] or by calling [`SourceRegistry::remove`] with
//! their own id from inside `dispatch`. Sources registered during a dispatch
//! pass are first polled on the next pass.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::logging::targets;

/// A unique identifier for a registered source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(u64);

impl SourceId {
    /// Get the raw u64 value of this source ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

static NEXT_SOURCE_ID: AtomicU64 = AtomicU64::new(1);

fn next_source_id() -> SourceId {
    SourceId(NEXT_SOURCE_ID.fetch_add(1, Ordering::Relaxed))
}

/// What a source wants after being dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceControl {
    /// Keep the source registered.
    Continue,
    /// Unregister the source.
    Remove,
}

/// A ready-to-read source driven by the event loop.
///
/// `C` is the context handed to the source when it is dispatched, usually
/// the window compositor the source feeds.
pub trait PollSource<C>: Send {
    /// Whether the source has data to read right now.
    fn is_ready(&mut self) -> bool;

    /// Read what is ready and hand it to `context`.
    fn dispatch(&mut self, context: &mut C, sources: &SourceRegistry<C>) -> SourceControl;
}

struct SourceEntry<C> {
    id: SourceId,
    /// `None` while the source is being dispatched.
    source: Option<Box<dyn PollSource<C>>>,
}

/// Registry of poll-driven sources.
///
/// Cloning the registry yields another handle to the same set of sources.
pub struct SourceRegistry<C> {
    entries: Arc<Mutex<Vec<SourceEntry<C>>>>,
}

impl<C> Clone for SourceRegistry<C> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<C> Default for SourceRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> SourceRegistry<C> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Register a source. Returns the id that can be used to remove it.
    pub fn register<S>(&self, source: S) -> SourceId
    where
        S: PollSource<C> + 'static,
    {
        let id = next_source_id();
        self.entries.lock().push(SourceEntry {
            id,
            source: Some(Box::new(source)),
        });
        tracing::debug!(target: targets::SOURCE, source = id.as_u64(), "registered source");
        id
    }

    /// Remove a source.
    ///
    /// Safe to call from inside the source's own `dispatch`. Returns `true`
    /// if the source was registered.
    pub fn remove(&self, id: SourceId) -> bool {
        let mut entries = self.entries.lock();
        match entries.iter().position(|e| e.id == id) {
            Some(pos) => {
                entries.remove(pos);
                tracing::debug!(target: targets::SOURCE, source = id.as_u64(), "removed source");
                true
            }
            None => false,
        }
    }

    /// Whether `id` is still registered.
    pub fn contains(&self, id: SourceId) -> bool {
        self.entries.lock().iter().any(|e| e.id == id)
    }

    /// Number of registered sources.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether no source is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Poll every source once and dispatch the ready ones.
    ///
    /// Returns the number of sources dispatched.
    pub fn dispatch_ready(&self, context: &mut C) -> usize {
        let ids: Vec<SourceId> = self.entries.lock().iter().map(|e| e.id).collect();
        let mut dispatched = 0;

        for id in ids {
            // The lock is not held while the source runs.
            let taken = {
                let mut entries = self.entries.lock();
                entries
                    .iter_mut()
                    .find(|e| e.id == id)
                    .and_then(|e| e.source.take())
            };
            let Some(mut source) = taken else {
                continue;
            };

            let control = if source.is_ready() {
                dispatched += 1;
                tracing::trace!(target: targets::SOURCE, source = id.as_u64(), "dispatching source");
                source.dispatch(context, self)
            } else {
                SourceControl::Continue
            };

            let mut entries = self.entries.lock();
            let pos = entries.iter().position(|e| e.id == id);
            match (control, pos) {
                (SourceControl::Continue, Some(pos)) => entries[pos].source = Some(source),
                (SourceControl::Remove, Some(pos)) => {
                    entries.remove(pos);
                    tracing::debug!(target: targets::SOURCE, source = id.as_u64(), "source removed itself");
                }
                // Removed by id during its own dispatch.
                (_, None) => {}
            }
        }

        dispatched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct Feed {
        pending: VecDeque<i32>,
        remove_self_when_empty: bool,
    }

    impl PollSource<Vec<i32>> for Feed {
        fn is_ready(&mut self) -> bool {
            !self.pending.is_empty()
        }

        fn dispatch(&mut self, context: &mut Vec<i32>, _: &SourceRegistry<Vec<i32>>) -> SourceControl {
            while let Some(value) = self.pending.pop_front() {
                context.push(value);
            }
            if self.remove_self_when_empty {
                SourceControl::Remove
            } else {
                SourceControl::Continue
            }
        }
    }

    /// Removes itself by id from inside its own dispatch.
    struct SelfRemoving {
        id: Arc<Mutex<Option<SourceId>>>,
    }

    impl PollSource<Vec<i32>> for SelfRemoving {
        fn is_ready(&mut self) -> bool {
            true
        }

        fn dispatch(&mut self, context: &mut Vec<i32>, sources: &SourceRegistry<Vec<i32>>) -> SourceControl {
            context.push(-1);
            if let Some(id) = *self.id.lock() {
                assert!(sources.remove(id));
            }
            SourceControl::Continue
        }
    }

    #[test]
    fn test_dispatch_ready_sources_only() {
        let registry = SourceRegistry::new();
        registry.register(Feed {
            pending: VecDeque::from(vec![1, 2]),
            remove_self_when_empty: false,
        });
        registry.register(Feed {
            pending: VecDeque::new(),
            remove_self_when_empty: false,
        });

        let mut received = Vec::new();
        assert_eq!(registry.dispatch_ready(&mut received), 1);
        assert_eq!(received, vec![1, 2]);
        assert_eq!(registry.len(), 2);

        // Nothing left to read
        assert_eq!(registry.dispatch_ready(&mut received), 0);
    }

    #[test]
    fn test_source_returning_remove_is_unregistered() {
        let registry = SourceRegistry::new();
        let id = registry.register(Feed {
            pending: VecDeque::from(vec![5]),
            remove_self_when_empty: true,
        });

        let mut received = Vec::new();
        registry.dispatch_ready(&mut received);
        assert_eq!(received, vec![5]);
        assert!(!registry.contains(id));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_source_can_remove_itself_by_id() {
        let registry = SourceRegistry::new();
        let slot = Arc::new(Mutex::new(None));
        let id = registry.register(SelfRemoving { id: slot.clone() });
        *slot.lock() = Some(id);

        let mut received = Vec::new();
        registry.dispatch_ready(&mut received);
        registry.dispatch_ready(&mut received);

        assert_eq!(received, vec![-1]);
        assert!(!registry.contains(id));
    }

    #[test]
    fn test_remove_unknown_source() {
        let registry: SourceRegistry<Vec<i32>> = SourceRegistry::new();
        let id = registry.register(Feed {
            pending: VecDeque::new(),
            remove_self_when_empty: false,
        });
        assert!(registry.remove(id));
        assert!(!registry.remove(id));
    }
}
