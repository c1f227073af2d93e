//! Parser for C type spellings used in bindings files.
//!
//! Grammar (whitespace-insensitive):
//!
//! ```text
//! type    = word+ ('*' qualifier*)*
//! word    = ident            ; `const` is accepted and discarded
//! ```
//!
//! Several base words are joined with a single space, so `unsigned int`
//! becomes `Named("unsigned int")`.

use derive_more::{Display, Error};
use winnow::combinator::{fail, repeat, terminated};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

use crate::CType;

const CONST: &str = "const";

/// Error returned by [`parse_type`].
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("invalid type `{text}` at offset {offset}")]
pub struct TypeParseError {
    pub text: String,
    pub offset: usize,
}

/// Parse a type spelling such as `"const char *"` into a [`CType`].
pub fn parse_type(text: &str) -> Result<CType, TypeParseError> {
    (ws, type_expr)
        .map(|((), ty)| ty)
        .parse(text)
        .map_err(|e| TypeParseError {
            text: text.to_owned(),
            offset: e.offset(),
        })
}

fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_ascii_whitespace())
        .void()
        .parse_next(input)
}

fn ident<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    (
        one_of(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .take()
        .parse_next(input)
}

fn const_qualifier(input: &mut &str) -> ModalResult<()> {
    let word = ident(input)?;
    if word == CONST { Ok(()) } else { fail(input) }
}

fn pointer_suffix(input: &mut &str) -> ModalResult<()> {
    ('*', ws).void().parse_next(input)?;
    let () = repeat(0.., terminated(const_qualifier, ws)).parse_next(input)?;
    Ok(())
}

fn type_expr(input: &mut &str) -> ModalResult<CType> {
    let words: Vec<&str> = repeat(1.., terminated(ident, ws)).parse_next(input)?;
    let base: Vec<&str> = words.into_iter().filter(|word| *word != CONST).collect();
    if base.is_empty() {
        return fail(input);
    }
    let depth: usize = repeat(0.., pointer_suffix).parse_next(input)?;

    let mut ty = CType::named(base.join(" "));
    for _ in 0..depth {
        ty = CType::pointer(ty);
    }
    Ok(ty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named() {
        assert_eq!(parse_type("int").unwrap(), CType::named("int"));
        assert_eq!(parse_type("  sp_error ").unwrap(), CType::named("sp_error"));
    }

    #[test]
    fn parses_pointers() {
        assert_eq!(parse_type("sp_track*").unwrap(), CType::pointer_to("sp_track"));
        assert_eq!(parse_type("sp_track *").unwrap(), CType::pointer_to("sp_track"));
        assert_eq!(
            parse_type("char **").unwrap(),
            CType::pointer(CType::pointer_to("char"))
        );
    }

    #[test]
    fn discards_const() {
        assert_eq!(parse_type("const char *").unwrap(), CType::pointer_to("char"));
        assert_eq!(parse_type("char const*").unwrap(), CType::pointer_to("char"));
        assert_eq!(
            parse_type("const char * const").unwrap(),
            CType::pointer_to("char")
        );
    }

    #[test]
    fn joins_multi_word_names() {
        assert_eq!(
            parse_type("unsigned int").unwrap(),
            CType::named("unsigned int")
        );
    }

    #[test]
    fn const_prefix_of_identifier_is_kept() {
        assert_eq!(parse_type("constant").unwrap(), CType::named("constant"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_type("").is_err());
        assert!(parse_type("*").is_err());
        assert!(parse_type("const").is_err());
        assert!(parse_type("int)").is_err());
    }

    #[test]
    fn error_reports_text() {
        let err = parse_type("int)").unwrap_err();
        assert_eq!(err.text, "int)");
        assert_eq!(err.offset, 3);
    }
}
