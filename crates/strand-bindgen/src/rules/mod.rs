//! The transformer catalogue.
//!
//! Rules are a closed set of variants tried in a fixed priority order, one
//! list for argument positions and one for the return value. A rule
//! inspects the cursor through a [`SignatureRewriter`] and stages its
//! output; the applicator commits the staged mutations only when the rule
//! returns `true`.
//!
//! Argument rules are tried in [`ArgumentRule::PRIORITY`] order. The
//! receiver rule comes before the handle rule: a receiver type is always
//! handle-mapped too, and the receiver must win at index 0.

mod arguments;
mod buffers;
mod returns;
mod rewriter;

pub use rewriter::SignatureRewriter;
use tracing::{debug, trace};

use crate::assembler::FunctionAssembler;
use crate::config::BindingConfig;
use crate::cursor::SignatureCursor;

/// A rule that can match at the current cursor position and stage the
/// code it generates.
pub trait SignaturePattern {
    /// Returns `false`, staging whatever it likes, when the rule does not
    /// apply. Staged mutations of a declining rule are discarded.
    fn match_and_rewrite(&self, rewriter: &mut SignatureRewriter<'_>) -> bool;

    fn name(&self) -> &'static str;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArgumentRule {
    /// Primitive or enum passed by value.
    Scalar,
    /// First parameter is the wrapper instance itself.
    Receiver,
    /// Opaque handle passed through its wrapper class.
    Handle,
    /// `(char*, length)` pair filled by a measure-then-fill double call.
    GrowableString,
    /// `(char* buffer, int buffer_size)` filled once into a fixed buffer.
    FixedString,
    /// Managed string encoded to UTF-8 for the duration of the call.
    StringIn,
    /// Pointer to a scalar passed with `ref`.
    ByReference,
}

impl ArgumentRule {
    pub const PRIORITY: [ArgumentRule; 7] = [
        ArgumentRule::Scalar,
        ArgumentRule::Receiver,
        ArgumentRule::Handle,
        ArgumentRule::GrowableString,
        ArgumentRule::FixedString,
        ArgumentRule::StringIn,
        ArgumentRule::ByReference,
    ];
}

impl SignaturePattern for ArgumentRule {
    fn match_and_rewrite(&self, rewriter: &mut SignatureRewriter<'_>) -> bool {
        match self {
            ArgumentRule::Scalar => arguments::scalar(rewriter),
            ArgumentRule::Receiver => arguments::receiver(rewriter),
            ArgumentRule::Handle => arguments::handle(rewriter),
            ArgumentRule::GrowableString => buffers::growable_string(rewriter),
            ArgumentRule::FixedString => buffers::fixed_string(rewriter),
            ArgumentRule::StringIn => arguments::string_in(rewriter),
            ArgumentRule::ByReference => arguments::by_reference(rewriter),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ArgumentRule::Scalar => "scalar",
            ArgumentRule::Receiver => "receiver",
            ArgumentRule::Handle => "handle",
            ArgumentRule::GrowableString => "growable-string",
            ArgumentRule::FixedString => "fixed-string",
            ArgumentRule::StringIn => "string-in",
            ArgumentRule::ByReference => "by-reference",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReturnRule {
    /// Designated error-code type, checked after the call.
    StatusCode,
    Scalar,
    /// Raw pointer wrapped in a new wrapper-class instance.
    Handle,
    Void,
    /// `char*` decoded from UTF-8.
    CString,
}

impl ReturnRule {
    pub const PRIORITY: [ReturnRule; 5] = [
        ReturnRule::StatusCode,
        ReturnRule::Scalar,
        ReturnRule::Handle,
        ReturnRule::Void,
        ReturnRule::CString,
    ];
}

impl SignaturePattern for ReturnRule {
    fn match_and_rewrite(&self, rewriter: &mut SignatureRewriter<'_>) -> bool {
        match self {
            ReturnRule::StatusCode => returns::status_code(rewriter),
            ReturnRule::Scalar => returns::scalar(rewriter),
            ReturnRule::Handle => returns::handle(rewriter),
            ReturnRule::Void => returns::void(rewriter),
            ReturnRule::CString => returns::c_string(rewriter),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ReturnRule::StatusCode => "status-code",
            ReturnRule::Scalar => "scalar-return",
            ReturnRule::Handle => "handle-return",
            ReturnRule::Void => "void-return",
            ReturnRule::CString => "c-string-return",
        }
    }
}

/// Try `rules` in order and commit the first one that applies.
///
/// Returns the name of the committed rule. When every rule declines, the
/// cursor and the assembler are left untouched.
pub fn apply_first<R: SignaturePattern>(
    rules: &[R],
    cursor: &mut SignatureCursor<'_>,
    assembler: &mut FunctionAssembler,
    config: &BindingConfig,
) -> Option<&'static str> {
    for rule in rules {
        let mut rewriter = SignatureRewriter::new(cursor, config);
        if !rule.match_and_rewrite(&mut rewriter) {
            trace!(rule = rule.name(), index = cursor.index(), "declined");
            continue;
        }
        debug_assert!(
            rewriter.has_mutations(),
            "rule {} committed without consuming anything",
            rule.name()
        );

        let mutations = rewriter.take_mutations();
        debug_assert!(
            mutations.is_balanced(),
            "rule {} left a scope open",
            rule.name()
        );
        debug!(
            function = %cursor.signature().native_name,
            rule = rule.name(),
            index = cursor.index(),
            parameters = mutations.parameters,
            consumes_return = mutations.consumes_return,
            "applied rule"
        );

        cursor.consume_parameters(mutations.parameters);
        if mutations.consumes_return {
            cursor.consume_return();
        }
        assembler.apply(mutations.edits);
        return Some(rule.name());
    }
    None
}
