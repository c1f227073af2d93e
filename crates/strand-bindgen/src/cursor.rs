//! Consumption state over one function signature.

use strand_ctype::{CType, FunctionSignature, Parameter};

/// Tracks how much of a [`FunctionSignature`] has been consumed by rules.
///
/// The signature itself is never modified. The index only moves forward
/// and the return value can be consumed once.
#[derive(Clone, Debug)]
pub struct SignatureCursor<'a> {
    signature: &'a FunctionSignature,
    index: usize,
    consumed_return: bool,
}

impl<'a> SignatureCursor<'a> {
    pub fn new(signature: &'a FunctionSignature) -> Self {
        Self {
            signature,
            index: 0,
            consumed_return: false,
        }
    }

    pub fn signature(&self) -> &'a FunctionSignature {
        self.signature
    }

    /// Index of the current (first unconsumed) parameter.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Total number of parameters.
    pub fn len(&self) -> usize {
        self.signature.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signature.parameters.is_empty()
    }

    pub fn current_parameter(&self) -> Option<&'a Parameter> {
        self.signature.parameters.get(self.index)
    }

    pub fn next_parameter(&self) -> Option<&'a Parameter> {
        self.signature.parameters.get(self.index + 1)
    }

    pub fn current_type(&self) -> Option<&'a CType> {
        self.current_parameter().map(|p| &p.ty)
    }

    pub fn next_type(&self) -> Option<&'a CType> {
        self.next_parameter().map(|p| &p.ty)
    }

    /// Types of the current parameter and everything after it.
    pub fn remaining_types(&self) -> impl Iterator<Item = &'a CType> + use<'a> {
        self.signature.parameters[self.index..].iter().map(|p| &p.ty)
    }

    pub fn return_type(&self) -> &'a CType {
        &self.signature.return_type
    }

    pub fn is_return_consumed(&self) -> bool {
        self.consumed_return
    }

    pub fn has_parameters_left(&self) -> bool {
        self.index < self.len()
    }

    /// All parameters and the return value have been consumed.
    pub fn is_complete(&self) -> bool {
        !self.has_parameters_left() && self.consumed_return
    }

    pub(crate) fn consume_parameters(&mut self, count: usize) {
        debug_assert!(
            self.index + count <= self.len(),
            "consumed past the end of {}",
            self.signature.native_name
        );
        self.index = (self.index + count).min(self.len());
    }

    pub(crate) fn consume_return(&mut self) {
        debug_assert!(
            !self.consumed_return,
            "return of {} consumed twice",
            self.signature.native_name
        );
        self.consumed_return = true;
    }
}
