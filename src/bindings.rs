//! The TOML bindings file: library settings, mapping tables and the
//! native functions to translate.

use std::collections::BTreeMap;
use std::ops::Range;

use serde::Deserialize;
use strand_bindgen::BindingConfig;
use strand_bindgen::config::{
    DEFAULT_ERROR_CHECK, DEFAULT_ERROR_TYPE, DEFAULT_HANDLE_FIELD, DEFAULT_LIBRARY,
    DEFAULT_NATIVE_CLASS,
};
use strand_bindgen::naming::managed_method_name;
use strand_ctype::{CType, FunctionSignature, Parameter, parse_type};
use toml::Spanned;

use crate::error::{Error, Result};

/// Default width of the indentation prefix for composed fragments.
pub const DEFAULT_INDENT: usize = 8;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBindings {
    #[serde(default)]
    library: RawLibrary,
    #[serde(default)]
    enums: BTreeMap<String, String>,
    #[serde(default)]
    handles: BTreeMap<String, String>,
    #[serde(default)]
    functions: Vec<Spanned<RawFunction>>,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawLibrary {
    dll: String,
    native_class: String,
    error_type: String,
    error_check: String,
    handle_field: String,
    indent: usize,
}

impl Default for RawLibrary {
    fn default() -> Self {
        Self {
            dll: DEFAULT_LIBRARY.to_owned(),
            native_class: DEFAULT_NATIVE_CLASS.to_owned(),
            error_type: DEFAULT_ERROR_TYPE.to_owned(),
            error_check: DEFAULT_ERROR_CHECK.to_owned(),
            handle_field: DEFAULT_HANDLE_FIELD.to_owned(),
            indent: DEFAULT_INDENT,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFunction {
    native: String,
    managed: Option<String>,
    receiver: Option<String>,
    #[serde(default = "default_wrapper")]
    wrapper: bool,
    returns: Option<Spanned<String>>,
    #[serde(default)]
    params: Vec<RawParameter>,
}

fn default_wrapper() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawParameter {
    name: String,
    #[serde(rename = "type")]
    ty: Spanned<String>,
}

/// One function of the bindings file and where it was declared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionEntry {
    pub signature: FunctionSignature,
    pub span: Range<usize>,
}

/// A fully parsed bindings file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bindings {
    pub config: BindingConfig,
    /// Width of the prefix placed in front of every generated line.
    pub indent: usize,
    pub functions: Vec<FunctionEntry>,
}

impl Bindings {
    pub fn from_toml(text: &str) -> Result<Self> {
        let raw: RawBindings = toml::from_str(text)?;

        let mut config = BindingConfig::new(raw.library.dll)
            .with_error_type(raw.library.error_type, raw.library.error_check);
        config.native_class = raw.library.native_class;
        config.handle_field = raw.library.handle_field;
        config.enums.extend(raw.enums);
        config.handles.extend(raw.handles);

        let functions = raw
            .functions
            .into_iter()
            .map(lower_function)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            config,
            indent: raw.library.indent,
            functions,
        })
    }

    pub fn prefix(&self) -> String {
        " ".repeat(self.indent)
    }

    pub fn signatures(&self) -> impl Iterator<Item = &FunctionSignature> {
        self.functions.iter().map(|entry| &entry.signature)
    }
}

fn lower_function(spanned: Spanned<RawFunction>) -> Result<FunctionEntry> {
    let span = spanned.span();
    let raw = spanned.into_inner();

    let parse = |text: &Spanned<String>| {
        parse_type(text.get_ref()).map_err(|source| Error::InvalidType {
            function: raw.native.clone(),
            span: text.span(),
            source,
        })
    };

    let parameters = raw
        .params
        .iter()
        .map(|p| -> Result<Parameter> { Ok(Parameter::new(&p.name, parse(&p.ty)?)) })
        .collect::<Result<Vec<_>>>()?;
    let return_type = match &raw.returns {
        Some(text) => parse(text)?,
        None => CType::named("void"),
    };
    let managed_name = raw
        .managed
        .clone()
        .unwrap_or_else(|| managed_method_name(&raw.native, raw.receiver.as_deref()));

    let mut signature =
        FunctionSignature::new(raw.native.clone(), managed_name, parameters, return_type);
    if let Some(receiver) = &raw.receiver {
        signature = signature.with_receiver(receiver);
    }
    if !raw.wrapper {
        signature = signature.without_wrapper();
    }
    Ok(FunctionEntry { signature, span })
}
