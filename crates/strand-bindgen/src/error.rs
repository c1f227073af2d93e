//! Translation failures for a single native function.

use derive_more::{Display, Error};
use strand_ctype::CType;

/// Why a function could not be translated.
///
/// A failure is always local to one function; the batch driver records it
/// and moves on.
#[derive(Clone, Debug, Display, Error, PartialEq, Eq)]
pub enum TranslateError {
    /// No argument rule applies at the cursor position.
    #[display("no rule for parameter `{parameter}` ({ty}) at index {index} of `{function}`")]
    NoArgumentRule {
        function: String,
        index: usize,
        parameter: String,
        ty: CType,
    },

    #[display("no rule for return type {ty} of `{function}`")]
    NoReturnRule {
        function: String,
        ty: CType,
    },

    /// The rules stopped before every parameter and the return were consumed.
    #[display("`{function}` left unconsumed: {consumed} of {total} parameters")]
    Incomplete {
        function: String,
        consumed: usize,
        total: usize,
    },
}

impl TranslateError {
    pub fn function(&self) -> &str {
        match self {
            TranslateError::NoArgumentRule { function, .. }
            | TranslateError::NoReturnRule { function, .. }
            | TranslateError::Incomplete { function, .. } => function,
        }
    }

    /// Short reason without the function name, used in skip comments.
    pub fn reason(&self) -> String {
        match self {
            TranslateError::NoArgumentRule {
                parameter, ty, ..
            } => format!("no rule for parameter `{parameter}` of type {ty}"),
            TranslateError::NoReturnRule { ty, .. } => format!("no rule for return type {ty}"),
            TranslateError::Incomplete {
                consumed, total, ..
            } => format!("{consumed} of {total} parameters consumed"),
        }
    }
}
