#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

//! questream — a streaming expression-query subscription engine.
//!
//! A [`registry::SubscriptionRegistry`] lets clients subscribe to an
//! arbitrary expression over a stream of published inputs, each scoped to a
//! sequence range and optionally filtered. Subscribing is a two-phase
//! protocol: [`registry::SubscriptionRegistry::initialize`] registers the
//! subscription and starts buffering matching live values, and
//! [`registry::SubscriptionRegistry::commit`] splices that buffer with a
//! caller-supplied historical snapshot so no published value is lost or
//! delivered twice across the join.
//!
//! This library re-exports the key building blocks:
//! - `sequence` — `Sequence`, `Range`, `SequencedValue`
//! - `expect` — `Expect<T>`, a value-or-captured-failure carrier
//! - `error` — `EvalError` and `RegistryError`
//! - `evaluator` — the `Evaluator` trait implemented by filters and expressions
//! - `limit` — `SnapshotLimit` and its accumulator
//! - `policy` — `UpdatePolicy` and `QueryResult`
//! - `entry` — per-subscription state (crate-internal fields)
//! - `registry` — `SubscriptionRegistry`, the engine itself
//! - `when` — the conditional task executor
//! - `config` — configuration loading

pub mod config;
pub mod entry;
pub mod error;
pub mod evaluator;
pub mod expect;
pub mod limit;
pub mod policy;
pub mod registry;
pub mod sequence;
pub mod when;

pub use config::Config;
pub use error::{EvalError, RegistryError};
pub use evaluator::{Evaluator, Expression, Filter};
pub use expect::Expect;
pub use limit::SnapshotLimit;
pub use policy::{QueryResult, UpdatePolicy};
pub use registry::SubscriptionRegistry;
pub use sequence::{Range, RangeStart, Sequence, SequencedValue};
pub use when::{State as WhenState, Termination, WhenTask};
