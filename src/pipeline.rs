//! Binding generation as Salsa tracked functions.
//!
//! ```text
//! BindingsFile
//!     │
//!     ▼
//! generate ─► GeneratedBindings (delegates, imports, wrappers)
//! ```
//!
//! Editing the file text re-runs `generate`; an untouched file is served
//! from the cache.
//!
//! ## Diagnostics
//!
//! A configuration error accumulates one `Error` diagnostic and produces
//! empty output. Every skipped function accumulates one `Warning`
//! diagnostic; the remaining functions are generated normally.

use salsa::Accumulator;
use strand_bindgen::{Translation, translate_all};
use tracing::debug;

use crate::bindings::Bindings;
use crate::database::BindingsFile;
use crate::diagnostic::{CompilationPhase, Diagnostic, DiagnosticSeverity, Span};

/// Generated C# source, grouped by fragment kind in input order.
#[derive(Clone, Debug, Default, PartialEq, Eq, salsa::Update)]
pub struct GeneratedBindings {
    pub delegates: String,
    pub imports: String,
    pub wrappers: String,
    pub translated: usize,
    pub skipped: usize,
    /// The bindings file itself could not be read.
    pub configuration_failed: bool,
}

impl GeneratedBindings {
    /// The three sections separated by blank lines.
    pub fn compose(&self) -> String {
        [&self.delegates, &self.imports, &self.wrappers]
            .into_iter()
            .filter(|section| !section.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Result of generation, including diagnostics.
pub struct GenerationResult {
    pub output: GeneratedBindings,
    pub diagnostics: Vec<Diagnostic>,
}

#[salsa::tracked]
pub fn generate(db: &dyn salsa::Database, file: BindingsFile) -> GeneratedBindings {
    let bindings = match Bindings::from_toml(file.text(db)) {
        Ok(bindings) => bindings,
        Err(error) => {
            Diagnostic {
                message: error.to_string(),
                function: None,
                span: error.span().map(Span::from).unwrap_or_default(),
                severity: DiagnosticSeverity::Error,
                phase: CompilationPhase::Configuration,
            }
            .accumulate(db);
            return GeneratedBindings {
                configuration_failed: true,
                ..GeneratedBindings::default()
            };
        }
    };
    debug!(
        path = %file.path(db).display(),
        functions = bindings.functions.len(),
        "generating"
    );

    let report = translate_all(bindings.signatures(), &bindings.config);
    for (entry, translation) in bindings.functions.iter().zip(&report.translations) {
        if let Some(error) = translation.error() {
            Diagnostic {
                message: error.to_string(),
                function: Some(translation.native_name().to_owned()),
                span: Span::from(entry.span.clone()),
                severity: DiagnosticSeverity::Warning,
                phase: CompilationPhase::Translation,
            }
            .accumulate(db);
        }
    }

    let prefix = bindings.prefix();
    let section = |render: fn(&Translation, &str) -> String| {
        report
            .translations
            .iter()
            .map(|translation| render(translation, &prefix))
            .collect::<Vec<_>>()
            .join("\n")
    };

    GeneratedBindings {
        delegates: section(Translation::render_delegate),
        imports: section(Translation::render_import),
        wrappers: section(Translation::render_wrapper),
        translated: report.translated(),
        skipped: report.skipped(),
        configuration_failed: false,
    }
}

/// Run generation and collect the diagnostics it accumulated.
pub fn generate_with_diagnostics(db: &dyn salsa::Database, file: BindingsFile) -> GenerationResult {
    let output = generate(db, file);
    let diagnostics = generate::accumulated::<Diagnostic>(db, file)
        .into_iter()
        .cloned()
        .collect();
    GenerationResult {
        output,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;
    use crate::database::StrandDatabaseImpl;

    fn file(db: &StrandDatabaseImpl, text: &str) -> BindingsFile {
        BindingsFile::new(db, "test.toml".into(), text.to_owned())
    }

    #[test]
    fn sections_follow_input_order() {
        let db = StrandDatabaseImpl::default();
        let source = file(
            &db,
            r#"
[library]
dll = "libspotify"
indent = 0

[[functions]]
native = "sp_a"
managed = "A"

[[functions]]
native = "sp_b"
managed = "B"
returns = "int"
"#,
        );
        let output = generate(&db, source);
        assert_eq!(output.translated, 2);
        assert_snapshot!(output.delegates, @r"
        internal delegate void sp_a_delegate();

        internal delegate int sp_b_delegate();
        ");
        assert_snapshot!(output.wrappers, @r"
        public static void A()
        {
            NativeMethods.sp_a();
        }

        public static int B()
        {
            int ret_value;
            ret_value = NativeMethods.sp_b();
            return ret_value;
        }
        ");
    }

    #[test]
    fn compose_separates_sections() {
        let output = GeneratedBindings {
            delegates: "d\n".to_owned(),
            imports: String::new(),
            wrappers: "w\n".to_owned(),
            ..GeneratedBindings::default()
        };
        assert_eq!(output.compose(), "d\n\nw\n");
    }

    #[test]
    fn configuration_error_is_reported_once() {
        let db = StrandDatabaseImpl::default();
        let source = file(&db, "[library\n");
        let result = generate_with_diagnostics(&db, source);
        assert!(result.output.configuration_failed);
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].severity, DiagnosticSeverity::Error);
        assert_eq!(result.diagnostics[0].phase, CompilationPhase::Configuration);
    }
}
