//! Output-string rules over a `(char*, length)` parameter pair.
//!
//! The growable rule emits the two-call protocol:
//!
//! ```text
//! string managed_string;
//! int ret_length;
//! using (Utf8Buffer out_buffer = Utf8Buffer.Allocate(256))
//! {
//!     ret_length = NativeMethods.f(out_buffer.IntPtr, out_buffer.Capacity);
//!     if (out_buffer.Capacity <= ret_length)
//!     {
//!         out_buffer.Reallocate(ret_length + 1);
//!     }
//!     ret_length = NativeMethods.f(out_buffer.IntPtr, out_buffer.Capacity);
//!     managed_string = out_buffer.GetString(ret_length);
//! }
//! return managed_string;
//! ```
//!
//! The fixed rule calls once into a buffer of [`FIXED_BUFFER_CAPACITY`]
//! bytes and keeps whatever fits. Its managed return is always `string`;
//! a status-code return is left for the return rules to check.

use strand_ctype::{CType, first_match_index};

use super::SignatureRewriter;
use crate::convert::{TypeConverter, length_templates};
use crate::naming::escape_identifier;
use crate::runtime::{
    FIXED_BUFFER_CAPACITY, GROWABLE_INITIAL_CAPACITY, allocate_buffer, buffer_capacity,
    buffer_pointer, buffer_to_string, output_local, reallocate_buffer,
};
use crate::target::TargetType;

const RESULT: &str = "managed_string";
const RET_LENGTH: &str = "ret_length";

/// Capacity argument for a length parameter of type `length`.
fn capacity_argument(local: &str, length: &TargetType) -> String {
    if *length == TargetType::uint_ptr() {
        format!("(UIntPtr){}", buffer_capacity(local))
    } else {
        buffer_capacity(local)
    }
}

pub(super) fn growable_string(rw: &mut SignatureRewriter<'_>) -> bool {
    let cursor = rw.cursor();
    let (Some(buffer), Some(size)) = (cursor.current_parameter(), cursor.next_parameter()) else {
        return false;
    };
    if !TypeConverter::is_c_string(&buffer.ty) {
        return false;
    }
    if first_match_index(cursor.remaining_types().skip(1), &length_templates()) != Some(0) {
        return false;
    }
    if cursor.index() + 2 != cursor.len() {
        return false;
    }
    if cursor.is_return_consumed() || cursor.return_type().as_named() != Some("int") {
        return false;
    }
    let Some(length) = rw.types().scalar(&size.ty) else {
        return false;
    };

    let local = output_local(&buffer.name);
    let capacity = capacity_argument(&local, &length);
    rw.pinvoke_parameter(
        escape_identifier(&buffer.name),
        TargetType::int_ptr(),
        buffer_pointer(&local),
    );
    rw.pinvoke_parameter(escape_identifier(&size.name), length, capacity);
    rw.set_pinvoke_return(TargetType::int(), Some(RET_LENGTH));
    rw.set_managed_return(TargetType::string());

    rw.insert_at_top(format!("string {RESULT};"));
    rw.insert_at_top(format!("int {RET_LENGTH};"));
    rw.insert_before_call(allocate_buffer(&local, GROWABLE_INITIAL_CAPACITY));
    rw.insert_before_call("{");
    rw.increase_indent();
    rw.insert_after_call(format!("if ({} <= {RET_LENGTH})", buffer_capacity(&local)));
    rw.insert_after_call("{");
    rw.insert_after_call_nested(reallocate_buffer(&local, &format!("{RET_LENGTH} + 1")), 1);
    rw.insert_after_call("}");
    rw.recall_after();
    rw.insert_after_call(format!(
        "{RESULT} = {};",
        buffer_to_string(&local, Some(RET_LENGTH))
    ));
    rw.decrease_indent();
    rw.insert_after_call("}");
    rw.insert_at_bottom(format!("return {RESULT};"));

    rw.consume_parameter();
    rw.consume_parameter();
    rw.consume_return();
    true
}

/// P/Invoke type of a return value the fixed-buffer call captures and
/// ignores. The status code is left to the return rules.
fn ignored_return(types: &TypeConverter<'_>, ty: &CType) -> Option<TargetType> {
    if types.is_status_code(ty) {
        return None;
    }
    if TypeConverter::is_c_string(ty) || types.handle_class(ty).is_some() {
        return Some(TargetType::int_ptr());
    }
    if TypeConverter::is_void(ty) {
        return Some(TargetType::void());
    }
    types.scalar(ty)
}

pub(super) fn fixed_string(rw: &mut SignatureRewriter<'_>) -> bool {
    let cursor = rw.cursor();
    let (Some(buffer), Some(size)) = (cursor.current_parameter(), cursor.next_parameter()) else {
        return false;
    };
    if buffer.name != "buffer" || size.name != "buffer_size" {
        return false;
    }
    if !TypeConverter::is_c_string(&buffer.ty) || size.ty != CType::named("int") {
        return false;
    }
    let ignored = if cursor.is_return_consumed() {
        None
    } else {
        ignored_return(&rw.types(), cursor.return_type())
    };

    let local = output_local(&buffer.name);
    rw.pinvoke_parameter("buffer", TargetType::int_ptr(), buffer_pointer(&local));
    rw.pinvoke_parameter("buffer_size", TargetType::int(), buffer_capacity(&local));
    rw.set_managed_return(TargetType::string());

    rw.insert_at_top(format!("string {RESULT};"));
    rw.insert_before_call(allocate_buffer(&local, FIXED_BUFFER_CAPACITY));
    rw.insert_before_call("{");
    rw.increase_indent();
    rw.insert_after_call(format!("{RESULT} = {};", buffer_to_string(&local, None)));
    rw.decrease_indent();
    rw.insert_after_call("}");
    rw.insert_at_bottom(format!("return {RESULT};"));

    rw.consume_parameter();
    rw.consume_parameter();
    if let Some(ty) = ignored {
        rw.set_pinvoke_return(ty, None);
        rw.consume_return();
    }
    true
}

#[cfg(test)]
mod tests {
    use strand_ctype::{FunctionSignature, Parameter};

    use super::*;
    use crate::config::BindingConfig;
    use crate::cursor::SignatureCursor;
    use crate::rules::rewriter::Mutations;

    fn attempt(
        rule: fn(&mut SignatureRewriter<'_>) -> bool,
        parameters: &[(&str, CType)],
        ret: CType,
        skip: usize,
    ) -> Option<Mutations> {
        let signature = FunctionSignature::new(
            "sp_f",
            "F",
            parameters
                .iter()
                .map(|(name, ty)| Parameter::new(*name, ty.clone()))
                .collect(),
            ret,
        );
        let mut cursor = SignatureCursor::new(&signature);
        cursor.consume_parameters(skip);
        let config = BindingConfig::default();
        let mut rewriter = SignatureRewriter::new(&cursor, &config);
        rule(&mut rewriter).then(|| rewriter.take_mutations())
    }

    fn pair(length: &str) -> Vec<(&'static str, CType)> {
        vec![
            ("buffer", CType::pointer_to("char")),
            ("buffer_size", CType::named(length)),
        ]
    }

    #[test]
    fn growable_consumes_pair_and_return() {
        let mutations = attempt(growable_string, &pair("int"), CType::named("int"), 0).unwrap();
        assert_eq!(mutations.parameters, 2);
        assert!(mutations.consumes_return);
        assert!(mutations.is_balanced());
    }

    #[test]
    fn growable_casts_size_capacity() {
        let mutations =
            attempt(growable_string, &pair("size_t"), CType::named("int"), 0).unwrap();
        let crate::assembler::Edit::PinvokeParameter(size) = &mutations.edits[1] else {
            panic!("expected the length parameter");
        };
        assert_eq!(size.ty, TargetType::uint_ptr());
        assert_eq!(size.argument, "(UIntPtr)out_buffer.Capacity");
    }

    #[test]
    fn growable_needs_pair_at_the_end() {
        let mut parameters = pair("int");
        parameters.push(("flags", CType::named("int")));
        assert!(attempt(growable_string, &parameters, CType::named("int"), 0).is_none());

        let mut parameters = vec![("session", CType::named("int"))];
        parameters.extend(pair("int"));
        assert!(attempt(growable_string, &parameters, CType::named("int"), 1).is_some());
    }

    #[test]
    fn growable_needs_int_return() {
        for ret in [CType::named("void"), CType::pointer_to("char"), CType::named("size_t")] {
            assert!(attempt(growable_string, &pair("int"), ret, 0).is_none());
        }
    }

    #[test]
    fn growable_needs_length_next() {
        let parameters = [
            ("buffer", CType::pointer_to("char")),
            ("flag", CType::named("bool")),
        ];
        assert!(attempt(growable_string, &parameters, CType::named("int"), 0).is_none());
    }

    #[test]
    fn fixed_requires_canonical_names() {
        let renamed = [
            ("out", CType::pointer_to("char")),
            ("out_size", CType::named("int")),
        ];
        assert!(attempt(fixed_string, &renamed, CType::pointer_to("char"), 0).is_none());
        assert!(attempt(fixed_string, &pair("size_t"), CType::pointer_to("char"), 0).is_none());

        let mutations = attempt(fixed_string, &pair("int"), CType::pointer_to("char"), 0).unwrap();
        assert_eq!(mutations.parameters, 2);
        assert!(mutations.consumes_return);
    }

    #[test]
    fn fixed_leaves_status_code_return() {
        let mutations = attempt(fixed_string, &pair("int"), CType::named("sp_error"), 0).unwrap();
        assert_eq!(mutations.parameters, 2);
        assert!(!mutations.consumes_return);
        assert!(mutations
            .edits
            .contains(&crate::assembler::Edit::ManagedReturn(TargetType::string())));
        assert!(!mutations
            .edits
            .iter()
            .any(|edit| matches!(edit, crate::assembler::Edit::PinvokeReturn { .. })));
    }

    #[test]
    fn fixed_ignores_other_returns() {
        for ret in [CType::named("bool"), CType::named("size_t"), CType::named("void")] {
            let mutations = attempt(fixed_string, &pair("int"), ret, 0).unwrap();
            assert!(mutations.consumes_return);
        }
    }
}
