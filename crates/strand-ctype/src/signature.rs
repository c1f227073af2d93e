//! Native function signatures.

use crate::CType;

/// One native parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Parameter {
    pub name: String,
    pub ty: CType,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: CType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// The description of one native function.
///
/// Parameters are kept in native calling-convention order. A signature is
/// never mutated during translation; consumption state lives in the cursor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionSignature {
    pub native_name: String,
    pub managed_name: String,
    pub parameters: Vec<Parameter>,
    pub return_type: CType,
    /// Native handle type of the implicit receiver, if the function is
    /// generated as a method on that handle's wrapper class.
    pub receiver: Option<String>,
    /// Whether a convenience wrapper method is generated.
    pub wrapper: bool,
}

impl FunctionSignature {
    pub fn new(
        native_name: impl Into<String>,
        managed_name: impl Into<String>,
        parameters: Vec<Parameter>,
        return_type: CType,
    ) -> Self {
        Self {
            native_name: native_name.into(),
            managed_name: managed_name.into(),
            parameters,
            return_type,
            receiver: None,
            wrapper: true,
        }
    }

    pub fn with_receiver(mut self, handle: impl Into<String>) -> Self {
        self.receiver = Some(handle.into());
        self
    }

    pub fn without_wrapper(mut self) -> Self {
        self.wrapper = false;
        self
    }

    pub fn parameter_types(&self) -> impl Iterator<Item = &CType> {
        self.parameters.iter().map(|p| &p.ty)
    }
}
