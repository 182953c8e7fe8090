//! Update policy and the caller-facing commit result type.

/// When a matching value should be emitted to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePolicy {
    /// Emit every in-range, filter-passing transformed value.
    All,
    /// Emit only when the transformed value differs from the last one
    /// emitted for this entry.
    Change,
}

/// The result of a `Commit`, handed to the caller's send sink.
///
/// `snapshot` starts as whatever the caller supplied and is overwritten by
/// `Commit` with the spliced, evaluated, limited result.
#[derive(Debug, Clone)]
pub struct QueryResult<T> {
    pub query_id: i32,
    pub snapshot: Vec<T>,
}

impl<T> QueryResult<T> {
    pub fn new(query_id: i32) -> Self {
        Self { query_id, snapshot: Vec::new() }
    }
}
