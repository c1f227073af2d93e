//! Native (C-style) type expressions and function signatures.
//!
//! This crate holds the input model of the binding generator:
//!
//! - [`CType`]: a small closed tree of type expressions with structural
//!   matching ([`matches`], [`first_match_index`])
//! - [`Parameter`] and [`FunctionSignature`]: one native function, in
//!   calling-convention order
//! - [`parse_type`]: the textual spelling used in bindings files
//!   (`"const char *"`, `"sp_track*"`)

mod parse;
mod signature;
mod ty;

pub use parse::{TypeParseError, parse_type};
pub use signature::{FunctionSignature, Parameter};
pub use ty::{CType, first_match_index, matches};
