//
// Part of colander
// Copyright (c) 2026 The Colander Developers
// License: MIT
//

//! The semantic analyzer for Sieve mail filtering scripts.
//!
//! Colander is the second pass over a Sieve script (RFC 5228 and its
//! extensions): the first-pass parser builds a [`Script`] production
//! tree through the builder API in [common], and [`analyze`] then
//! verifies that each command and test is well-formed, that every
//! feature used is declared via `require`, that tagged options are
//! consistent, and that each diagnostic is attributed to the source span
//! that caused it. The pass never aborts and never throws: errors are
//! data on the tree, collected through [`Script::bad_productions`] and
//! rendered through [error].
//!
//! The production tree is detailed in [common]. Errors are laid out in
//! [error]. The [analyzer] module holds the per-identifier schemas, and
//! [collation], [extensions], [header], [address], [mailbox], [mime] and
//! [notify] are the read-only registries and delegated capabilities the
//! schemas consult.

pub mod address;
pub mod analyzer;
pub mod collation;
pub mod common;
pub mod error;
pub mod extensions;
pub mod header;
pub mod mailbox;
pub mod mime;
pub mod notify;

pub use common::AddressPart;
pub use common::ArgumentValue;
pub use common::BodyMatchType;
pub use common::Diagnostic;
pub use common::MatchOperator;
pub use common::MatchType;
pub use common::NodeId;
pub use common::Script;
pub use common::Span;
pub use common::ValueShape;
pub use error::Error;

/// Convenience method that runs the semantic pass over a parsed script.
pub fn analyze(script: &mut Script)
{
	analyzer::analyze(script)
}
