//! # rf-build — Field Definition Interpreter
//!
//! Turns field definitions into concrete JSON values and runs batches of
//! input records through the builder.
//!
//! ## Building (`builder`)
//!
//! [`ValueBuilder::build`] dispatches on the declared kind of a definition.
//! Scalars come from the literal slots; objects and arrays recurse through
//! the normalized container entries. Only `number` parsing can fail under
//! the default policy.
//!
//! ## Orchestration (`orchestrator`)
//!
//! [`execute`] builds one output record per input record through an
//! [`ExecutionHost`]. A failed record either becomes a per-record error
//! report (when the host continues past failures) or aborts the batch with
//! a [`NodeApiError`].
//!
//! ## Batches (`batch`)
//!
//! [`Batch`] is a self-contained host read from a JSON or YAML document.
//!
//! ## Crate Policy
//!
//! - Depends only on `rf-core` internally. The schema generator defines the
//!   shape this crate reads but is not a dependency.
//! - Building is synchronous, single-threaded and side-effect free.

pub mod batch;
pub mod builder;
pub mod number;
pub mod orchestrator;

pub use batch::{Batch, ItemParameters};
pub use builder::{BuildPolicy, UnknownTypes, ValueBuilder};
pub use number::parse_number;
pub use orchestrator::{build_record, execute, ExecutionHost, InputItem, NodeApiError, NodeInfo, OutputItem};
