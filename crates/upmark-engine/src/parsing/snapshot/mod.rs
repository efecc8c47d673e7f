//! # Snapshot Testing Support
//!
//! Utilities for testing the parser via snapshot assertions and invariant checks.
//!
//! ## Modules
//!
//! - **`normalize`**: Converts a parsed [`Content`](crate::parsing::entity::Content)
//!   to a stable, serializable `Snap` tree for `insta` snapshot testing
//! - **`invariants`**: Runtime checks for parser correctness (spans in bounds,
//!   children inside their parents, top-level entities ordered and disjoint,
//!   lists ending at their last child)

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::{EntitySnap, Snap, normalize};
