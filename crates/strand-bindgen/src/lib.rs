//! Rule-based translation of native function signatures into C# interop
//! code.
//!
//! For each [`FunctionSignature`](strand_ctype::FunctionSignature) the
//! driver walks the parameters left to right with a [`SignatureCursor`],
//! tries the [`ArgumentRule`] catalogue at every position and finally the
//! [`ReturnRule`] catalogue. Committed rules write into a
//! [`FunctionAssembler`], which renders three fragments:
//!
//! - a delegate declaration
//! - a `[DllImport]` extern declaration
//! - a managed wrapper method
//!
//! A function no rule can handle is skipped with a [`TranslateError`];
//! the others are unaffected.
//!
//! ```
//! use strand_bindgen::{BindingConfig, translate_function};
//! use strand_ctype::{CType, FunctionSignature, Parameter};
//!
//! let config = BindingConfig::new("libspotify");
//! let signature = FunctionSignature::new(
//!     "sp_session_set_volume",
//!     "SetVolume",
//!     vec![Parameter::new("volume", CType::named("int"))],
//!     CType::named("void"),
//! );
//! let assembler = translate_function(&signature, &config).unwrap();
//! assert_eq!(
//!     assembler.render_import(""),
//!     "[DllImport(\"libspotify\")]\n\
//!      internal static extern void sp_session_set_volume(int volume);\n"
//! );
//! ```

pub mod assembler;
pub mod config;
pub mod convert;
pub mod cursor;
pub mod driver;
pub mod error;
pub mod naming;
pub mod rules;
pub mod runtime;
pub mod target;

pub use assembler::{Edit, FunctionAssembler, ManagedParameter, PinvokeParameter, ScopeDepth};
pub use config::BindingConfig;
pub use convert::TypeConverter;
pub use cursor::SignatureCursor;
pub use driver::{Translation, TranslationReport, translate_all, translate_function};
pub use error::TranslateError;
pub use rules::{ArgumentRule, ReturnRule, SignaturePattern, SignatureRewriter};
pub use target::TargetType;
