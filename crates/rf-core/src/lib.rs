//! # rf-core — Foundational Types for Rich Fields
//!
//! Defines the data model shared by the schema generator and the value
//! builder. Every other crate in the workspace depends on `rf-core`; it
//! depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **One `FieldKind` enum.** The five value kinds (`string`, `number`,
//!    `boolean`, `object`, `array`) are a closed sum type. Every dispatch on
//!    a declared type is an exhaustive `match`.
//!
//! 2. **Discriminator keys are data, not strings.** Top-level fields and
//!    object members store their type under `type`; array items store it
//!    under `itemType`. [`DiscriminatorKey`] names the two slots.
//!
//! 3. **One normalization path for containers.** Nested fields arrive either
//!    as a sequence of group wrappers or as a direct mapping. [`flatten`] is
//!    the only function that turns either shape into an ordered list.
//!
//! 4. **Explicit depth bound.** [`MAX_DEPTH`] caps nesting; [`Depth`] is the
//!    counter threaded through generation and (optionally) building.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `rf-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod container;
pub mod definition;
pub mod depth;
pub mod error;
pub mod kind;

// Re-export primary types for ergonomic imports.
pub use container::{flatten, Container, Group, GroupKey, GroupSlot, OneOrMany};
pub use definition::{FieldDefinition, VALUE_BOOL_DEFAULT};
pub use depth::{Depth, MAX_DEPTH};
pub use error::BuildError;
pub use kind::{Discriminator, DiscriminatorKey, FieldKind, UnknownFieldKind};
