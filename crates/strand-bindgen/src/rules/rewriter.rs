//! SignatureRewriter: read access to the cursor plus staged mutations.
//!
//! Rules never touch the cursor or the assembler directly. Everything a
//! rule emits is recorded here and only replayed once the rule reports
//! success, so a declining rule leaves no trace.

use strand_ctype::CType;

use crate::assembler::{Edit, ManagedParameter, PinvokeParameter};
use crate::config::BindingConfig;
use crate::convert::TypeConverter;
use crate::cursor::SignatureCursor;
use crate::target::TargetType;

/// Accumulated mutations from one rule application.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Mutations {
    pub(crate) edits: Vec<Edit>,
    /// Parameters consumed, starting at the cursor index.
    pub(crate) parameters: usize,
    pub(crate) consumes_return: bool,
}

impl Mutations {
    /// Every scope entered by the rule is also exited.
    pub(crate) fn is_balanced(&self) -> bool {
        let entered = self.edits.iter().filter(|e| **e == Edit::EnterScope).count();
        let exited = self.edits.iter().filter(|e| **e == Edit::ExitScope).count();
        entered == exited
    }
}

/// Interface handed to rules.
///
/// # Mutations
///
/// - [`pinvoke_parameter`](Self::pinvoke_parameter) / [`managed_parameter`](Self::managed_parameter)
/// - [`insert_at_top`](Self::insert_at_top), [`insert_before_call`](Self::insert_before_call),
///   [`insert_after_call`](Self::insert_after_call), [`insert_at_bottom`](Self::insert_at_bottom)
/// - [`increase_indent`](Self::increase_indent) / [`decrease_indent`](Self::decrease_indent),
///   which must be paired
/// - [`consume_parameter`](Self::consume_parameter) / [`consume_return`](Self::consume_return)
pub struct SignatureRewriter<'a> {
    cursor: &'a SignatureCursor<'a>,
    config: &'a BindingConfig,
    mutations: Mutations,
}

impl<'a> SignatureRewriter<'a> {
    pub(crate) fn new(cursor: &'a SignatureCursor<'a>, config: &'a BindingConfig) -> Self {
        Self {
            cursor,
            config,
            mutations: Mutations::default(),
        }
    }

    // === Read access ===

    pub fn cursor(&self) -> &'a SignatureCursor<'a> {
        self.cursor
    }

    pub fn types(&self) -> TypeConverter<'a> {
        TypeConverter::new(self.config)
    }

    pub fn config(&self) -> &'a BindingConfig {
        self.config
    }

    // === Mutations ===

    pub fn pinvoke_parameter(
        &mut self,
        name: impl Into<String>,
        ty: TargetType,
        argument: impl Into<String>,
    ) {
        self.mutations
            .edits
            .push(Edit::PinvokeParameter(PinvokeParameter {
                name: name.into(),
                ty,
                argument: argument.into(),
            }));
    }

    pub fn managed_parameter(&mut self, name: impl Into<String>, ty: TargetType) {
        self.mutations
            .edits
            .push(Edit::ManagedParameter(ManagedParameter {
                name: name.into(),
                ty,
            }));
    }

    pub fn insert_at_top(&mut self, text: impl Into<String>) {
        self.mutations.edits.push(Edit::Top(text.into()));
    }

    pub fn insert_before_call(&mut self, text: impl Into<String>) {
        self.mutations.edits.push(Edit::BeforeCall(text.into()));
    }

    pub fn insert_after_call(&mut self, text: impl Into<String>) {
        self.insert_after_call_nested(text, 0);
    }

    /// Post-call line indented `nested` levels inside the current depth.
    pub fn insert_after_call_nested(&mut self, text: impl Into<String>, nested: usize) {
        self.mutations.edits.push(Edit::AfterCall {
            text: text.into(),
            nested,
        });
    }

    /// Issue the native call again at the current post-call depth.
    pub fn recall_after(&mut self) {
        self.mutations.edits.push(Edit::Recall);
    }

    pub fn insert_at_bottom(&mut self, text: impl Into<String>) {
        self.mutations.edits.push(Edit::Bottom(text.into()));
    }

    pub fn increase_indent(&mut self) {
        self.mutations.edits.push(Edit::EnterScope);
    }

    pub fn decrease_indent(&mut self) {
        self.mutations.edits.push(Edit::ExitScope);
    }

    /// Type of the P/Invoke return and the local the call assigns it to.
    pub fn set_pinvoke_return(&mut self, ty: TargetType, variable: Option<&str>) {
        self.mutations.edits.push(Edit::PinvokeReturn {
            ty,
            variable: variable.map(str::to_owned),
        });
    }

    pub fn set_managed_return(&mut self, ty: TargetType) {
        self.mutations.edits.push(Edit::ManagedReturn(ty));
    }

    /// Make the wrapper an instance method.
    pub fn mark_instance(&mut self) {
        self.mutations.edits.push(Edit::Instance);
    }

    /// Consume the parameter at the cursor plus any already consumed by
    /// this rule, returning its type.
    pub fn consume_parameter(&mut self) -> Option<&'a CType> {
        let ty = self
            .cursor
            .remaining_types()
            .nth(self.mutations.parameters)?;
        self.mutations.parameters += 1;
        Some(ty)
    }

    pub fn consume_return(&mut self) {
        debug_assert!(
            !self.cursor.is_return_consumed() && !self.mutations.consumes_return,
            "return consumed twice"
        );
        self.mutations.consumes_return = true;
    }

    // === Internal ===

    pub(crate) fn has_mutations(&self) -> bool {
        !self.mutations.edits.is_empty()
            || self.mutations.parameters > 0
            || self.mutations.consumes_return
    }

    pub(crate) fn take_mutations(self) -> Mutations {
        self.mutations
    }
}

#[cfg(test)]
mod tests {
    use strand_ctype::{FunctionSignature, Parameter};

    use super::*;

    #[test]
    fn consumption_is_staged() {
        let signature = FunctionSignature::new(
            "f",
            "F",
            vec![
                Parameter::new("a", CType::named("int")),
                Parameter::new("b", CType::named("bool")),
            ],
            CType::named("void"),
        );
        let cursor = SignatureCursor::new(&signature);
        let config = BindingConfig::default();
        let mut rewriter = SignatureRewriter::new(&cursor, &config);
        assert!(!rewriter.has_mutations());

        assert_eq!(rewriter.consume_parameter(), Some(&CType::named("int")));
        assert_eq!(rewriter.consume_parameter(), Some(&CType::named("bool")));
        assert_eq!(rewriter.consume_parameter(), None);
        assert_eq!(cursor.index(), 0);

        let mutations = rewriter.take_mutations();
        assert_eq!(mutations.parameters, 2);
        assert!(!mutations.consumes_return);
    }

    #[test]
    fn balance_counts_scope_edits() {
        let mutations = Mutations {
            edits: vec![Edit::EnterScope, Edit::BeforeCall("{".to_owned())],
            ..Mutations::default()
        };
        assert!(!mutations.is_balanced());

        let mutations = Mutations {
            edits: vec![Edit::EnterScope, Edit::ExitScope],
            ..Mutations::default()
        };
        assert!(mutations.is_balanced());
    }
}
