//! Identifier handling for generated C#.

use heck::ToUpperCamelCase;

const CSHARP_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Prefix C# keywords with `@` so they can be used as parameter names.
pub fn escape_identifier(name: &str) -> String {
    if CSHARP_KEYWORDS.contains(&name) {
        format!("@{name}")
    } else {
        name.to_owned()
    }
}

/// Default managed method name for a native function.
///
/// The receiver's prefix (`sp_track_` for receiver `sp_track`) is dropped
/// when present, otherwise everything up to the first underscore. The rest
/// is converted to PascalCase: `sp_track_is_loaded` on `sp_track` becomes
/// `IsLoaded`, `sp_session_create` becomes `SessionCreate`.
pub fn managed_method_name(native: &str, receiver: Option<&str>) -> String {
    let stripped = receiver
        .and_then(|r| native.strip_prefix(r))
        .and_then(|rest| rest.strip_prefix('_'))
        .filter(|rest| !rest.is_empty())
        .or_else(|| native.split_once('_').map(|(_, rest)| rest))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(native);

    stripped.to_upper_camel_case()
}
