//! Redis-like list storage kept in process memory.
//!
//! Lists live in one mutex-guarded map; blocked pops sleep on a condvar
//! and are woken by pushes and by `disconnect`. Empty lists are removed,
//! matching how Redis drops a key once its list drains.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use super::{Broker, PopResult};
use crate::error::QueueError;

#[derive(Default)]
struct State {
    lists: HashMap<String, VecDeque<String>>,
    closed: bool,
}

impl State {
    fn pop_front(&mut self, queue_name: &str) -> Option<String> {
        let list = self.lists.get_mut(queue_name)?;
        let payload = list.pop_front();
        if list.is_empty() {
            self.lists.remove(queue_name);
        }
        payload
    }
}

#[derive(Default)]
struct Inner {
    state: Mutex<State>,
    available: Condvar,
}

/// In-memory list broker.
///
/// Clones share the same lists, so a test can hand one clone to a
/// `Context` and keep another to inspect or push raw payloads.
///
/// - One FIFO list per queue name; pushes append, pops take the head
/// - `blocking_pop` parks on a condvar until a push, a timeout or `disconnect`
/// - `disconnect` fails every pending and later call with `BrokerUnavailable`
///
/// A `timeout_secs` of 0 waits indefinitely, as Redis `BRPOP` does.
///
/// ## Example
///
/// ```
/// use redis_queue::broker::{Broker, InMemoryBroker};
///
/// let broker = InMemoryBroker::new();
/// broker.push("jobs", "first".to_string()).unwrap();
/// broker.push("jobs", "second".to_string()).unwrap();
///
/// let popped = broker.blocking_pop(&["jobs"], 1).unwrap().unwrap();
/// assert_eq!(popped.queue_name, "jobs");
/// assert_eq!(popped.payload, "first");
/// assert_eq!(broker.non_blocking_pop("jobs").unwrap().as_deref(), Some("second"));
/// assert!(broker.is_empty("jobs"));
/// ```
#[derive(Clone, Default)]
pub struct InMemoryBroker {
    inner: Arc<Inner>,
}

impl InMemoryBroker {
    /// Create a new, empty broker.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, QueueError> {
        let state = self
            .inner
            .state
            .lock()
            .map_err(|_| QueueError::BrokerUnavailable("broker lock poisoned".into()))?;
        if state.closed {
            return Err(QueueError::BrokerUnavailable("connection closed".into()));
        }
        Ok(state)
    }

    // Inspection helpers read through a poisoned lock.
    fn snapshot(&self) -> MutexGuard<'_, State> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of payloads waiting on `queue_name`.
    pub fn len(&self, queue_name: &str) -> usize {
        self.snapshot().lists.get(queue_name).map_or(0, VecDeque::len)
    }

    /// Check if `queue_name` has nothing waiting.
    pub fn is_empty(&self, queue_name: &str) -> bool {
        self.len(queue_name) == 0
    }

    /// Payloads waiting on `queue_name`, head first.
    pub fn payloads(&self, queue_name: &str) -> Vec<String> {
        self.snapshot()
            .lists
            .get(queue_name)
            .map(|list| list.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Check if `disconnect` has been called.
    pub fn is_closed(&self) -> bool {
        self.snapshot().closed
    }
}

impl Broker for InMemoryBroker {
    fn blocking_pop(
        &self,
        queue_names: &[&str],
        timeout_secs: u64,
    ) -> Result<Option<PopResult>, QueueError> {
        let deadline =
            (timeout_secs > 0).then(|| Instant::now() + Duration::from_secs(timeout_secs));
        let mut state = self.lock()?;

        loop {
            for name in queue_names {
                if let Some(payload) = state.pop_front(name) {
                    return Ok(Some(PopResult::new(*name, payload)));
                }
            }

            state = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Ok(None);
                    }
                    self.inner
                        .available
                        .wait_timeout(state, deadline - now)
                        .map_err(|_| QueueError::BrokerUnavailable("broker lock poisoned".into()))?
                        .0
                }
                None => self
                    .inner
                    .available
                    .wait(state)
                    .map_err(|_| QueueError::BrokerUnavailable("broker lock poisoned".into()))?,
            };

            if state.closed {
                return Err(QueueError::BrokerUnavailable(
                    "connection closed while waiting".into(),
                ));
            }
        }
    }

    fn non_blocking_pop(&self, queue_name: &str) -> Result<Option<String>, QueueError> {
        Ok(self.lock()?.pop_front(queue_name))
    }

    fn push(&self, queue_name: &str, payload: String) -> Result<(), QueueError> {
        self.lock()?
            .lists
            .entry(queue_name.to_string())
            .or_default()
            .push_back(payload);
        self.inner.available.notify_all();
        Ok(())
    }

    fn delete(&self, queue_name: &str) -> Result<(), QueueError> {
        self.lock()?.lists.remove(queue_name);
        Ok(())
    }

    fn disconnect(&self) -> Result<(), QueueError> {
        self.snapshot().closed = true;
        self.inner.available.notify_all();
        Ok(())
    }
}
