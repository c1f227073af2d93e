//! Per-function orchestration of the rule catalogue.

use strand_ctype::FunctionSignature;
use tracing::{debug, warn};

use crate::assembler::FunctionAssembler;
use crate::config::BindingConfig;
use crate::cursor::SignatureCursor;
use crate::error::TranslateError;
use crate::rules::{ArgumentRule, ReturnRule, apply_first};

/// Translate one function: argument rules left to right, then the return.
pub fn translate_function(
    signature: &FunctionSignature,
    config: &BindingConfig,
) -> Result<FunctionAssembler, TranslateError> {
    let mut cursor = SignatureCursor::new(signature);
    let mut assembler = FunctionAssembler::new(signature, config);

    while let Some(parameter) = cursor.current_parameter() {
        let index = cursor.index();
        if apply_first(&ArgumentRule::PRIORITY, &mut cursor, &mut assembler, config).is_none() {
            return Err(TranslateError::NoArgumentRule {
                function: signature.native_name.clone(),
                index,
                parameter: parameter.name.clone(),
                ty: parameter.ty.clone(),
            });
        }
        if cursor.index() == index {
            return Err(incomplete(&cursor));
        }
    }

    if !cursor.is_return_consumed()
        && apply_first(&ReturnRule::PRIORITY, &mut cursor, &mut assembler, config).is_none()
    {
        return Err(TranslateError::NoReturnRule {
            function: signature.native_name.clone(),
            ty: signature.return_type.clone(),
        });
    }

    if !cursor.is_complete() {
        return Err(incomplete(&cursor));
    }
    debug_assert!(
        assembler.scopes().is_balanced(),
        "unbalanced scopes in {}",
        signature.native_name
    );
    debug!(function = %signature.native_name, "translated");
    Ok(assembler)
}

fn incomplete(cursor: &SignatureCursor<'_>) -> TranslateError {
    TranslateError::Incomplete {
        function: cursor.signature().native_name.clone(),
        consumed: cursor.index(),
        total: cursor.len(),
    }
}

/// Outcome of translating one function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Translation {
    Translated(FunctionAssembler),
    Skipped {
        native_name: String,
        error: TranslateError,
    },
}

impl Translation {
    /// Translate, turning a failure into a skip.
    pub fn translate(signature: &FunctionSignature, config: &BindingConfig) -> Self {
        match translate_function(signature, config) {
            Ok(assembler) => Translation::Translated(assembler),
            Err(error) => {
                warn!(function = %signature.native_name, "skipping: {error}");
                Translation::Skipped {
                    native_name: signature.native_name.clone(),
                    error,
                }
            }
        }
    }

    pub fn native_name(&self) -> &str {
        match self {
            Translation::Translated(assembler) => assembler.native_name(),
            Translation::Skipped { native_name, .. } => native_name,
        }
    }

    pub fn error(&self) -> Option<&TranslateError> {
        match self {
            Translation::Translated(_) => None,
            Translation::Skipped { error, .. } => Some(error),
        }
    }

    pub fn is_translated(&self) -> bool {
        matches!(self, Translation::Translated(_))
    }

    pub fn render_delegate(&self, prefix: &str) -> String {
        match self {
            Translation::Translated(assembler) => assembler.render_delegate(prefix),
            Translation::Skipped { .. } => self.skip_comment(prefix),
        }
    }

    pub fn render_import(&self, prefix: &str) -> String {
        match self {
            Translation::Translated(assembler) => assembler.render_import(prefix),
            Translation::Skipped { .. } => self.skip_comment(prefix),
        }
    }

    pub fn render_wrapper(&self, prefix: &str) -> String {
        match self {
            Translation::Translated(assembler) => assembler.render_wrapper(prefix),
            Translation::Skipped { .. } => self.skip_comment(prefix),
        }
    }

    fn skip_comment(&self, prefix: &str) -> String {
        match self {
            Translation::Skipped { native_name, error } => {
                format!("{prefix}// {native_name}: skipped ({})\n", error.reason())
            }
            Translation::Translated(_) => String::new(),
        }
    }
}

/// Ordered outcomes of a batch translation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TranslationReport {
    pub translations: Vec<Translation>,
}

impl TranslationReport {
    pub fn translated(&self) -> usize {
        self.translations.iter().filter(|t| t.is_translated()).count()
    }

    pub fn skipped(&self) -> usize {
        self.translations.len() - self.translated()
    }

    pub fn errors(&self) -> impl Iterator<Item = &TranslateError> {
        self.translations.iter().filter_map(Translation::error)
    }
}

/// Translate every function independently, in input order.
pub fn translate_all<'s>(
    functions: impl IntoIterator<Item = &'s FunctionSignature>,
    config: &BindingConfig,
) -> TranslationReport {
    let translations = functions
        .into_iter()
        .map(|signature| Translation::translate(signature, config))
        .collect();
    TranslationReport { translations }
}

#[cfg(test)]
mod tests {
    use strand_ctype::{CType, Parameter};

    use super::*;

    fn config() -> BindingConfig {
        BindingConfig::new("libspotify")
            .with_enum("sp_error", "SpotifyError")
            .with_handle("sp_session", "Session")
    }

    #[test]
    fn every_parameter_is_consumed_once() {
        let signature = FunctionSignature::new(
            "sp_session_login",
            "Login",
            vec![
                Parameter::new("session", CType::pointer_to("sp_session")),
                Parameter::new("username", CType::pointer_to("char")),
                Parameter::new("password", CType::pointer_to("char")),
                Parameter::new("remember_me", CType::named("bool")),
            ],
            CType::named("sp_error"),
        )
        .with_receiver("sp_session");
        let assembler = translate_function(&signature, &config()).unwrap();
        assert_eq!(assembler.pinvoke_parameters().len(), 4);
        assert_eq!(assembler.managed_parameters().len(), 3);
        assert!(assembler.is_instance());
        assert!(assembler.scopes().is_balanced());
        assert_eq!(assembler.scopes().entered(), 2);
    }

    #[test]
    fn unmatched_return_is_reported() {
        let signature =
            FunctionSignature::new("sp_f", "F", vec![], CType::pointer_to("sp_unknown"));
        assert_eq!(
            translate_function(&signature, &config()).unwrap_err(),
            TranslateError::NoReturnRule {
                function: "sp_f".to_owned(),
                ty: CType::pointer_to("sp_unknown"),
            }
        );
    }

    #[test]
    fn later_failure_reports_its_index() {
        let signature = FunctionSignature::new(
            "sp_f",
            "F",
            vec![
                Parameter::new("a", CType::named("int")),
                Parameter::new("cb", CType::pointer_to("sp_callbacks")),
            ],
            CType::named("void"),
        );
        let error = translate_function(&signature, &config()).unwrap_err();
        assert!(matches!(
            error,
            TranslateError::NoArgumentRule { index: 1, ref parameter, .. } if parameter == "cb"
        ));
    }

    #[test]
    fn report_counts_outcomes() {
        let good = FunctionSignature::new("sp_a", "A", vec![], CType::named("void"));
        let bad = FunctionSignature::new(
            "sp_b",
            "B",
            vec![Parameter::new("f", CType::pointer_to("FILE"))],
            CType::named("int"),
        );
        let report = translate_all([&good, &bad, &good], &config());
        assert_eq!(report.translated(), 2);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.errors().count(), 1);
        assert_eq!(report.translations[1].native_name(), "sp_b");
    }

    #[test]
    fn skipped_functions_render_comments() {
        let bad = FunctionSignature::new(
            "sp_b",
            "B",
            vec![Parameter::new("f", CType::pointer_to("FILE"))],
            CType::named("int"),
        );
        let translation = Translation::translate(&bad, &config());
        let expected = "    // sp_b: skipped (no rule for parameter `f` of type FILE*)\n";
        assert_eq!(translation.render_delegate("    "), expected);
        assert_eq!(translation.render_import("    "), expected);
        assert_eq!(translation.render_wrapper("    "), expected);
    }
}
