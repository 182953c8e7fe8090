//! The subscription registry: concurrent bookkeeping for expression-based
//! queries, and the two-phase initialize/commit splice that welds a
//! caller-supplied historical snapshot to the continuing live stream.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::entry::{Phase, SubscriptionEntry};
use crate::error::RegistryError;
use crate::evaluator::{Expression, Filter};
use crate::limit::SnapshotLimit;
use crate::policy::{QueryResult, UpdatePolicy};
use crate::sequence::{Range, SequencedValue};

/// Keeps track of streaming subscriptions to expression-based queries.
///
/// `I` is the type of data input to expressions, `O` the type produced by
/// them, and `C` an opaque client handle compared only for identity — `C`'s
/// `Eq`/`Hash` impls must correspond to peer identity (e.g. a connection id
/// or an `Arc` compared by pointer), not value equality of arbitrary
/// client-supplied data.
///
/// Two concurrent collections back the registry: an all-entries set
/// (iterated during `publish`) and an initializing index restricted to
/// entries still awaiting `commit`, keyed by `(client, id)` for expected
/// O(1) lookup. They're guarded by independent locks, never held at once
/// with an entry's own lock — see the module-level ordering rule: never
/// hold an entry lock while acquiring either registry-wide lock.
pub struct SubscriptionRegistry<I, O, C> {
    subscriptions: Mutex<Vec<Arc<SubscriptionEntry<I, O, C>>>>,
    initializing: Mutex<HashMap<C, HashMap<i32, Arc<SubscriptionEntry<I, O, C>>>>>,
}

impl<I, O, C> Default for SubscriptionRegistry<I, O, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, O, C> SubscriptionRegistry<I, O, C> {
    pub fn new() -> Self {
        Self {
            subscriptions: Mutex::new(Vec::new()),
            initializing: Mutex::new(HashMap::new()),
        }
    }
}

impl<I, O, C> SubscriptionRegistry<I, O, C>
where
    I: Clone + Send + Sync + 'static,
    O: Clone + PartialEq + Send + Sync + 'static,
    C: Clone + Eq + Hash + Send + Sync + 'static,
{
    /// Initializes an expression-based subscription in the `Initializing`
    /// phase. Non-blocking with respect to concurrent `publish`: once
    /// inserted into the all-entries set, a concurrent `publish` may
    /// observe the entry and, finding it `Initializing`, append matching
    /// inputs to its write log.
    ///
    /// Fails with [`RegistryError::DuplicateQuery`] if `(client, id)` is
    /// already in use among initializing entries; the entry is not
    /// created.
    pub fn initialize(
        &self,
        client: C,
        id: i32,
        range: Range,
        filter: Box<Filter<I>>,
        update_policy: UpdatePolicy,
        expression: Box<Expression<I, O>>,
    ) -> Result<(), RegistryError> {
        let entry = {
            let mut initializing = self.initializing.lock().unwrap();
            let per_client = initializing.entry(client.clone()).or_default();
            if per_client.contains_key(&id) {
                return Err(RegistryError::DuplicateQuery);
            }
            let entry = Arc::new(SubscriptionEntry::new(
                id,
                client,
                range,
                filter,
                update_policy,
                expression,
            ));
            per_client.insert(id, Arc::clone(&entry));
            entry
        };
        self.subscriptions.lock().unwrap().push(Arc::clone(&entry));
        debug!(query_id = id, "subscription initialized");
        Ok(())
    }

    /// Commits a previously initialized subscription: splices the
    /// caller-supplied `snapshot` with the write log captured during
    /// initialization, evaluates and limits the result, and invokes `send`
    /// while still holding the entry lock so the client cannot observe a
    /// `publish`-emitted value ordered strictly before the last snapshot
    /// element.
    ///
    /// If `(client, result.query_id)` is not a known initializing entry
    /// (ended or already committed), this returns silently — a stale
    /// commit (spec's `StaleCommit` disposition).
    pub fn commit<F>(
        &self,
        client: &C,
        limit: SnapshotLimit,
        mut result: QueryResult<SequencedValue<O>>,
        mut snapshot: Vec<SequencedValue<I>>,
        send: F,
    ) where
        F: FnOnce(QueryResult<SequencedValue<O>>),
    {
        let query_id = result.query_id;
        let entry = {
            let mut initializing = self.initializing.lock().unwrap();
            let Some(per_client) = initializing.get_mut(client) else {
                debug!(query_id, "commit for unknown client, ignored");
                return;
            };
            let Some(entry) = per_client.remove(&query_id) else {
                debug!(query_id, "stale commit, ignored");
                return;
            };
            if per_client.is_empty() {
                initializing.remove(client);
            }
            entry
        };

        let mut state = entry.state.lock().unwrap();

        if snapshot.is_empty() {
            snapshot = std::mem::take(&mut state.write_log);
        } else {
            let boundary = snapshot.last().map(|v| v.sequence).unwrap_or(0);
            let merge_start = state.write_log.partition_point(|v| v.sequence <= boundary);
            snapshot.extend(state.write_log[merge_start..].iter().cloned());
            state.write_log.clear();
        }

        let mut accumulator = limit.accumulator::<SequencedValue<O>>();
        for input in &snapshot {
            let output = match entry.evaluate(&input.value) {
                Ok(output) => output,
                Err(error) => {
                    debug!(query_id, %error, "evaluator failed during commit, input dropped");
                    continue;
                }
            };
            if entry.update_policy == UpdatePolicy::Change {
                if state.previous_value.as_ref() == Some(&output) {
                    continue;
                }
                state.previous_value = Some(output.clone());
            }
            if !accumulator.push(SequencedValue::new(output, input.sequence)) {
                break;
            }
        }

        let outputs = accumulator.into_vec();
        match limit {
            SnapshotLimit::Tail(_) => {
                result.snapshot.splice(0..0, outputs);
            }
            SnapshotLimit::Head(_) | SnapshotLimit::Unlimited => {
                result.snapshot = outputs;
            }
        }

        state.phase = Phase::Committed;
        info!(query_id, snapshot_len = result.snapshot.len(), "subscription committed");
        send(result);
    }

    /// Ends a single subscription. Tolerates entries in either phase, and
    /// is idempotent: ending an already-ended or nonexistent `(client,
    /// id)` is a no-op.
    pub fn end(&self, client: &C, id: i32) {
        self.subscriptions
            .lock()
            .unwrap()
            .retain(|entry| !(entry.client == *client && entry.id == id));
        let mut initializing = self.initializing.lock().unwrap();
        if let Some(per_client) = initializing.get_mut(client) {
            per_client.remove(&id);
            if per_client.is_empty() {
                initializing.remove(client);
            }
        }
        debug!(query_id = id, "subscription ended");
    }

    /// Removes every subscription belonging to `client` (e.g. on
    /// disconnect). Idempotent.
    pub fn remove_all(&self, client: &C) {
        self.subscriptions
            .lock()
            .unwrap()
            .retain(|entry| entry.client != *client);
        self.initializing.lock().unwrap().remove(client);
        debug!("all subscriptions removed for client");
    }

    /// Publishes a value to every matching subscriber.
    ///
    /// For each entry whose range and filter match: if the entry is still
    /// `Initializing`, the value is appended to its write log; otherwise
    /// the expression is evaluated and, subject to the update policy,
    /// `send` is invoked with the transformed output. `send` runs while
    /// the entry lock is held, preserving strictly increasing delivery
    /// order per entry even under concurrent `publish` calls.
    pub fn publish<F>(&self, value: &SequencedValue<I>, send: F)
    where
        F: Fn(&C, i32, SequencedValue<O>),
    {
        let snapshot = self.subscriptions.lock().unwrap().clone();
        for entry in &snapshot {
            let mut state = entry.state.lock().unwrap();
            if !entry.in_range(value.sequence) {
                continue;
            }
            if !entry.passes_filter(&value.value) {
                continue;
            }
            match state.phase {
                Phase::Initializing => {
                    state.write_log.push(value.clone());
                }
                Phase::Committed => {
                    let output = match entry.evaluate(&value.value) {
                        Ok(output) => output,
                        Err(error) => {
                            debug!(query_id = entry.id, %error, "evaluator failed, input dropped");
                            continue;
                        }
                    };
                    let should_send = if entry.update_policy == UpdatePolicy::Change {
                        if state.previous_value.as_ref() == Some(&output) {
                            false
                        } else {
                            state.previous_value = Some(output.clone());
                            true
                        }
                    } else {
                        true
                    };
                    if should_send {
                        send(&entry.client, entry.id, SequencedValue::new(output, value.sequence));
                    }
                }
            }
        }
        if snapshot.is_empty() {
            warn!("publish called with no subscribers");
        }
    }

    /// Number of live entries, in any phase. Exposed for diagnostics.
    pub fn len(&self) -> usize {
        self.subscriptions.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
