//! Type expression tree and structural matching.

use std::fmt;

/// A native type expression.
///
/// The tree is immutable once built. Equality and matching are structural.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CType {
    /// A scalar or opaque type identified by name (`int`, `sp_error`, `sp_track`).
    Named(String),
    /// Pointer to another type expression.
    Pointer(Box<CType>),
    /// A fixed window of types, only used to match several positions at once.
    Tuple(Vec<CType>),
}

impl CType {
    pub fn named(name: impl Into<String>) -> Self {
        CType::Named(name.into())
    }

    pub fn pointer(base: CType) -> Self {
        CType::Pointer(Box::new(base))
    }

    /// Shorthand for `Pointer(Named(name))`.
    pub fn pointer_to(name: impl Into<String>) -> Self {
        CType::pointer(CType::named(name))
    }

    pub fn tuple(elements: impl IntoIterator<Item = CType>) -> Self {
        CType::Tuple(elements.into_iter().collect())
    }

    /// The name of a `Named` type.
    pub fn as_named(&self) -> Option<&str> {
        match self {
            CType::Named(name) => Some(name),
            _ => None,
        }
    }

    /// The base of a `Pointer` type.
    pub fn pointee(&self) -> Option<&CType> {
        match self {
            CType::Pointer(base) => Some(base),
            _ => None,
        }
    }

    /// The name `h` of a `Pointer(Named(h))`.
    pub fn pointee_name(&self) -> Option<&str> {
        self.pointee().and_then(CType::as_named)
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self, CType::Pointer(_))
    }
}

impl fmt::Display for CType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CType::Named(name) => f.write_str(name),
            CType::Pointer(base) => write!(f, "{base}*"),
            CType::Tuple(elements) => {
                f.write_str("(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Structurally match `subject` against `template`.
///
/// A `Named` template matches only a `Named` subject with the same name, a
/// `Pointer` template matches a `Pointer` whose base matches, and a `Tuple`
/// template matches a `Tuple` of equal length element by element.
pub fn matches(subject: &CType, template: &CType) -> bool {
    match (subject, template) {
        (CType::Named(a), CType::Named(b)) => a == b,
        (CType::Pointer(a), CType::Pointer(b)) => matches(a, b),
        (CType::Tuple(a), CType::Tuple(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(s, t)| matches(s, t))
        }
        _ => false,
    }
}

/// Position of the first element of `sequence` matching any of `templates`.
///
/// Scans the sequence once. Returns `None` when no element matches.
pub fn first_match_index<'a, I>(sequence: I, templates: &[CType]) -> Option<usize>
where
    I: IntoIterator<Item = &'a CType>,
{
    sequence
        .into_iter()
        .position(|ty| templates.iter().any(|template| matches(ty, template)))
}
