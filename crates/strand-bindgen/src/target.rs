//! Target-language (C#) type descriptors.

use std::fmt;

/// Marshalling attribute that makes a `bool` cross the boundary as one byte.
pub const ONE_BYTE_BOOL: &str = "MarshalAs(UnmanagedType.I1)";

/// A C# type plus the metadata needed to render it in a declaration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TargetType {
    name: String,
    is_reference: bool,
    attributes: Vec<String>,
}

impl TargetType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_reference: false,
            attributes: Vec::new(),
        }
    }

    pub fn void() -> Self {
        Self::new("void")
    }

    pub fn int() -> Self {
        Self::new("int")
    }

    pub fn int_ptr() -> Self {
        Self::new("IntPtr")
    }

    pub fn uint_ptr() -> Self {
        Self::new("UIntPtr")
    }

    pub fn string() -> Self {
        Self::new("string")
    }

    pub fn bool() -> Self {
        Self::new("bool").with_attribute(ONE_BYTE_BOOL)
    }

    /// Pass by `ref`.
    pub fn by_reference(mut self) -> Self {
        self.is_reference = true;
        self
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attributes.push(attribute.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_reference(&self) -> bool {
        self.is_reference
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn is_void(&self) -> bool {
        self.name == "void"
    }

    /// `[Attr] ref Type name`
    pub fn render_parameter(&self, name: &str) -> String {
        let mut out = String::new();
        for attribute in &self.attributes {
            out.push('[');
            out.push_str(attribute);
            out.push_str("] ");
        }
        if self.is_reference {
            out.push_str("ref ");
        }
        out.push_str(&self.name);
        out.push(' ');
        out.push_str(name);
        out
    }

    pub fn render_return(&self) -> &str {
        &self.name
    }

    /// `[return: Attr, ...]`, or `None` when the type carries no attribute.
    pub fn render_return_attributes(&self) -> Option<String> {
        if self.attributes.is_empty() {
            return None;
        }
        Some(format!("[return: {}]", self.attributes.join(", ")))
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_parameter() {
        assert_eq!(TargetType::int().render_parameter("count"), "int count");
        assert_eq!(TargetType::int().render_return_attributes(), None);
    }

    #[test]
    fn bool_carries_marshalling_attribute() {
        let ty = TargetType::bool();
        assert_eq!(
            ty.render_parameter("enabled"),
            "[MarshalAs(UnmanagedType.I1)] bool enabled"
        );
        assert_eq!(
            ty.render_return_attributes().as_deref(),
            Some("[return: MarshalAs(UnmanagedType.I1)]")
        );
        assert_eq!(ty.render_return(), "bool");
    }

    #[test]
    fn reference_modifier_follows_attributes() {
        let ty = TargetType::bool().by_reference();
        assert_eq!(
            ty.render_parameter("flag"),
            "[MarshalAs(UnmanagedType.I1)] ref bool flag"
        );
        assert!(ty.is_reference());
    }

    #[test]
    fn several_return_attributes_share_one_line() {
        let ty = TargetType::new("Thing").with_attribute("A").with_attribute("B(1)");
        assert_eq!(
            ty.render_return_attributes().as_deref(),
            Some("[return: A, B(1)]")
        );
    }
}
