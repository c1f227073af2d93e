//! Generate C# P/Invoke bindings from a TOML description of a native
//! library.
//!
//! The bindings file is loaded into a [`StrandDatabaseImpl`] as a
//! [`BindingsFile`] input and translated by the tracked
//! [`pipeline::generate`] query. Translation itself lives in
//! `strand-bindgen`.

pub mod bindings;
pub mod database;
pub mod diagnostic;
pub mod diagnostics;
pub mod error;
pub mod pipeline;

pub use bindings::{Bindings, FunctionEntry};
pub use database::{BindingsFile, StrandDatabaseImpl};
pub use diagnostic::{CompilationPhase, Diagnostic, DiagnosticSeverity, Span};
pub use error::{Error, Result};
pub use pipeline::{GeneratedBindings, GenerationResult, generate, generate_with_diagnostics};
