// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Abstract syntax tree for the Java subset inspected by the resource rules.
//!
//! Trees come from a host parser (usually as JSON, with the `serde` feature)
//! or are assembled with [`build::AstBuilder`]. Analysis passes only borrow
//! them.

pub mod build;
pub mod decl;
pub mod expr;
pub mod span;
pub mod stmt;

pub use span::{LineMap, Span};

/// Unique identifier for AST nodes.
///
/// Resolution results are keyed by these, so ids must be unique within a
/// compilation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u32);
