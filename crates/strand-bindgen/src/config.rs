//! Read-only configuration shared by every function translation.

use std::collections::HashMap;

pub const DEFAULT_LIBRARY: &str = "native";
pub const DEFAULT_NATIVE_CLASS: &str = "NativeMethods";
pub const DEFAULT_ERROR_TYPE: &str = "sp_error";
pub const DEFAULT_ERROR_CHECK: &str = "SpotifyException.Check";
pub const DEFAULT_HANDLE_FIELD: &str = "_handle";

/// Library-wide settings plus the enum and handle mapping tables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BindingConfig {
    /// Library name placed in `[DllImport]`.
    pub library: String,
    /// Class that owns the `extern` declarations and is used as call target.
    pub native_class: String,
    /// Native status-code type recognised by the status return rule.
    pub error_type: String,
    /// Method invoked with the captured status code after each call.
    pub error_check: String,
    /// Field of a wrapper class holding its native pointer.
    pub handle_field: String,
    /// Native enum name to target enum name.
    pub enums: HashMap<String, String>,
    /// Native handle struct name to wrapper class name.
    pub handles: HashMap<String, String>,
}

impl BindingConfig {
    pub fn new(library: impl Into<String>) -> Self {
        Self {
            library: library.into(),
            ..Self::default()
        }
    }

    pub fn with_enum(mut self, native: impl Into<String>, target: impl Into<String>) -> Self {
        self.enums.insert(native.into(), target.into());
        self
    }

    pub fn with_handle(mut self, native: impl Into<String>, class: impl Into<String>) -> Self {
        self.handles.insert(native.into(), class.into());
        self
    }

    pub fn with_error_type(
        mut self,
        error_type: impl Into<String>,
        error_check: impl Into<String>,
    ) -> Self {
        self.error_type = error_type.into();
        self.error_check = error_check.into();
        self
    }

    pub fn enum_name(&self, native: &str) -> Option<&str> {
        self.enums.get(native).map(String::as_str)
    }

    pub fn handle_class(&self, native: &str) -> Option<&str> {
        self.handles.get(native).map(String::as_str)
    }
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            library: DEFAULT_LIBRARY.to_owned(),
            native_class: DEFAULT_NATIVE_CLASS.to_owned(),
            error_type: DEFAULT_ERROR_TYPE.to_owned(),
            error_check: DEFAULT_ERROR_CHECK.to_owned(),
            handle_field: DEFAULT_HANDLE_FIELD.to_owned(),
            enums: HashMap::new(),
            handles: HashMap::new(),
        }
    }
}
