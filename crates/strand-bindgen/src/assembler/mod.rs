//! Accumulation of the generated declarations and wrapper body.
//!
//! A [`FunctionAssembler`] collects what committed rules emit for one
//! function and renders three fragments from it:
//!
//! - a delegate declaration matching the P/Invoke signature
//! - the `[DllImport]` extern declaration
//! - the managed wrapper method (or a placeholder comment)
//!
//! The wrapper body is laid out in regions around a single call to the
//! native function:
//!
//! ```text
//! top      declarations, in insertion order
//! above    pre-call code, in insertion order
//! call     `ret = NativeMethods.fn(args);`
//! below    post-call groups, last group first
//! bottom   epilogue groups, last group first
//! ```
//!
//! Each committed rule opens one `below` group and one `bottom` group, so
//! resources acquired by later rules are released first.

mod render;
mod scope;

pub use scope::ScopeDepth;
use strand_ctype::FunctionSignature;

use crate::config::BindingConfig;
use crate::target::TargetType;

/// A parameter of the P/Invoke layer together with the expression the
/// wrapper passes for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PinvokeParameter {
    pub name: String,
    pub ty: TargetType,
    pub argument: String,
}

/// A parameter of the managed wrapper method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManagedParameter {
    pub name: String,
    pub ty: TargetType,
}

/// One change recorded by a rule, replayed by [`FunctionAssembler::apply`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Edit {
    PinvokeParameter(PinvokeParameter),
    ManagedParameter(ManagedParameter),
    Top(String),
    BeforeCall(String),
    /// Post-call line, `nested` levels deeper than the current post-call depth.
    AfterCall { text: String, nested: usize },
    /// Repeat the native call inside the post-call region.
    Recall,
    Bottom(String),
    EnterScope,
    ExitScope,
    PinvokeReturn { ty: TargetType, variable: Option<String> },
    ManagedReturn(TargetType),
    Instance,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum LineKind {
    Code(String),
    Call,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Line {
    pub(crate) depth: usize,
    pub(crate) kind: LineKind,
}

impl Line {
    fn code(depth: usize, text: String) -> Self {
        Self {
            depth,
            kind: LineKind::Code(text),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionAssembler {
    native_name: String,
    managed_name: String,
    library: String,
    native_class: String,
    pinvoke_parameters: Vec<PinvokeParameter>,
    managed_parameters: Vec<ManagedParameter>,
    top: Vec<Line>,
    above: Vec<Line>,
    below: Vec<Vec<Line>>,
    bottom: Vec<Vec<Line>>,
    scopes: ScopeDepth,
    pinvoke_return: TargetType,
    return_variable: Option<String>,
    managed_return: TargetType,
    wrapper: bool,
    /// Wrappers are `static` unless the receiver rule marks them instance methods.
    instance: bool,
}

impl FunctionAssembler {
    pub fn new(signature: &FunctionSignature, config: &BindingConfig) -> Self {
        Self {
            native_name: signature.native_name.clone(),
            managed_name: signature.managed_name.clone(),
            library: config.library.clone(),
            native_class: config.native_class.clone(),
            pinvoke_parameters: Vec::new(),
            managed_parameters: Vec::new(),
            top: Vec::new(),
            above: Vec::new(),
            below: Vec::new(),
            bottom: Vec::new(),
            scopes: ScopeDepth::default(),
            pinvoke_return: TargetType::void(),
            return_variable: None,
            managed_return: TargetType::void(),
            wrapper: signature.wrapper,
            instance: false,
        }
    }

    /// Replay the edits of one committed rule.
    ///
    /// The rule gets a fresh post-call group and a fresh epilogue group.
    pub fn apply(&mut self, edits: impl IntoIterator<Item = Edit>) {
        let mut below = Vec::new();
        let mut bottom = Vec::new();

        for edit in edits {
            match edit {
                Edit::PinvokeParameter(parameter) => self.pinvoke_parameters.push(parameter),
                Edit::ManagedParameter(parameter) => self.managed_parameters.push(parameter),
                Edit::Top(text) => self.top.push(Line::code(0, text)),
                Edit::BeforeCall(text) => self.above.push(Line::code(self.scopes.above(), text)),
                Edit::AfterCall { text, nested } => {
                    below.push(Line::code(self.scopes.below() + nested, text))
                }
                Edit::Recall => below.push(Line {
                    depth: self.scopes.below(),
                    kind: LineKind::Call,
                }),
                Edit::Bottom(text) => bottom.push(Line::code(0, text)),
                Edit::EnterScope => self.scopes.enter(),
                Edit::ExitScope => self.scopes.exit(),
                Edit::PinvokeReturn { ty, variable } => {
                    self.pinvoke_return = ty;
                    self.return_variable = variable;
                }
                Edit::ManagedReturn(ty) => self.managed_return = ty,
                Edit::Instance => self.instance = true,
            }
        }

        self.below.push(below);
        self.bottom.push(bottom);
    }

    pub fn native_name(&self) -> &str {
        &self.native_name
    }

    pub fn managed_name(&self) -> &str {
        &self.managed_name
    }

    pub fn pinvoke_parameters(&self) -> &[PinvokeParameter] {
        &self.pinvoke_parameters
    }

    pub fn managed_parameters(&self) -> &[ManagedParameter] {
        &self.managed_parameters
    }

    pub fn pinvoke_return(&self) -> &TargetType {
        &self.pinvoke_return
    }

    pub fn return_variable(&self) -> Option<&str> {
        self.return_variable.as_deref()
    }

    pub fn managed_return(&self) -> &TargetType {
        &self.managed_return
    }

    pub fn emits_wrapper(&self) -> bool {
        self.wrapper
    }

    pub fn is_instance(&self) -> bool {
        self.instance
    }

    pub fn scopes(&self) -> ScopeDepth {
        self.scopes
    }
}
