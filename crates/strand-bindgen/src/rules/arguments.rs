//! Single-parameter argument rules.

use strand_ctype::{CType, matches};

use super::SignatureRewriter;
use crate::convert::TypeConverter;
use crate::naming::escape_identifier;
use crate::runtime;
use crate::target::TargetType;

/// `int`, `bool`, `size_t` or a mapped enum, passed unchanged.
pub(super) fn scalar(rw: &mut SignatureRewriter<'_>) -> bool {
    let Some(parameter) = rw.cursor().current_parameter() else {
        return false;
    };
    let Some(ty) = rw.types().scalar(&parameter.ty) else {
        return false;
    };

    let name = escape_identifier(&parameter.name);
    rw.pinvoke_parameter(&name, ty.clone(), &name);
    rw.managed_parameter(name, ty);
    rw.consume_parameter();
    true
}

/// `self_type*` at index 0 becomes `this`.
pub(super) fn receiver(rw: &mut SignatureRewriter<'_>) -> bool {
    let cursor = rw.cursor();
    if cursor.index() != 0 {
        return false;
    }
    let Some(receiver) = cursor.signature().receiver.as_deref() else {
        return false;
    };
    let Some(parameter) = cursor.current_parameter() else {
        return false;
    };
    if !matches(&parameter.ty, &CType::pointer_to(receiver)) {
        return false;
    }

    let field = &rw.config().handle_field;
    rw.pinvoke_parameter(
        escape_identifier(&parameter.name),
        TargetType::int_ptr(),
        format!("this.{field}"),
    );
    rw.mark_instance();
    rw.consume_parameter();
    true
}

/// Mapped `handle*`, passed through the wrapper's handle field.
pub(super) fn handle(rw: &mut SignatureRewriter<'_>) -> bool {
    let Some(parameter) = rw.cursor().current_parameter() else {
        return false;
    };
    let Some(class) = rw.types().handle_class(&parameter.ty) else {
        return false;
    };

    let name = escape_identifier(&parameter.name);
    let field = &rw.config().handle_field;
    rw.pinvoke_parameter(&name, TargetType::int_ptr(), format!("{name}.{field}"));
    rw.managed_parameter(name, TargetType::new(class));
    rw.consume_parameter();
    true
}

/// Any remaining `char*`, taken as a managed string.
pub(super) fn string_in(rw: &mut SignatureRewriter<'_>) -> bool {
    let Some(parameter) = rw.cursor().current_parameter() else {
        return false;
    };
    if !TypeConverter::is_c_string(&parameter.ty) {
        return false;
    }

    let name = escape_identifier(&parameter.name);
    let local = runtime::scoped_local(&parameter.name);
    rw.pinvoke_parameter(&name, TargetType::int_ptr(), runtime::buffer_pointer(&local));
    rw.managed_parameter(&name, TargetType::string());
    rw.insert_before_call(runtime::encode_string(&local, &name));
    rw.insert_before_call("{");
    rw.increase_indent();
    rw.decrease_indent();
    rw.insert_after_call("}");
    rw.consume_parameter();
    true
}

/// `bool*`, `int*` or `enum*`, passed with `ref`.
pub(super) fn by_reference(rw: &mut SignatureRewriter<'_>) -> bool {
    let Some(parameter) = rw.cursor().current_parameter() else {
        return false;
    };
    let Some(pointee) = parameter.ty.pointee() else {
        return false;
    };
    let Some(ty) = rw.types().reference_scalar(pointee) else {
        return false;
    };

    let ty = ty.by_reference();
    let name = escape_identifier(&parameter.name);
    rw.pinvoke_parameter(&name, ty.clone(), format!("ref {name}"));
    rw.managed_parameter(name, ty);
    rw.consume_parameter();
    true
}

#[cfg(test)]
mod tests {
    use strand_ctype::{FunctionSignature, Parameter};

    use super::*;
    use crate::assembler::{Edit, ManagedParameter, PinvokeParameter};
    use crate::config::BindingConfig;
    use crate::cursor::SignatureCursor;

    fn config() -> BindingConfig {
        BindingConfig::new("libspotify").with_handle("sp_session", "Session")
    }

    fn staged(
        rule: fn(&mut SignatureRewriter<'_>) -> bool,
        parameter: Parameter,
        receiver: Option<&str>,
    ) -> Option<Vec<Edit>> {
        let mut signature =
            FunctionSignature::new("sp_f", "F", vec![parameter], CType::named("void"));
        if let Some(receiver) = receiver {
            signature = signature.with_receiver(receiver);
        }
        let cursor = SignatureCursor::new(&signature);
        let config = config();
        let mut rewriter = SignatureRewriter::new(&cursor, &config);
        rule(&mut rewriter).then(|| {
            let mutations = rewriter.take_mutations();
            assert_eq!(mutations.parameters, 1);
            mutations.edits
        })
    }

    fn pinvoke(name: &str, ty: TargetType, argument: &str) -> Edit {
        Edit::PinvokeParameter(PinvokeParameter {
            name: name.to_owned(),
            ty,
            argument: argument.to_owned(),
        })
    }

    fn managed(name: &str, ty: TargetType) -> Edit {
        Edit::ManagedParameter(ManagedParameter {
            name: name.to_owned(),
            ty,
        })
    }

    #[test]
    fn scalar_escapes_keywords() {
        let edits = staged(scalar, Parameter::new("string", CType::named("bool")), None);
        assert_eq!(
            edits,
            Some(vec![
                pinvoke("@string", TargetType::bool(), "@string"),
                managed("@string", TargetType::bool()),
            ])
        );
    }

    #[test]
    fn receiver_passes_own_handle() {
        let parameter = Parameter::new("session", CType::pointer_to("sp_session"));
        let edits = staged(receiver, parameter.clone(), Some("sp_session"));
        assert_eq!(
            edits,
            Some(vec![
                pinvoke("session", TargetType::int_ptr(), "this._handle"),
                Edit::Instance,
            ])
        );
        assert_eq!(staged(receiver, parameter.clone(), None), None);
        assert_eq!(staged(receiver, parameter, Some("sp_track")), None);
    }

    #[test]
    fn handle_uses_wrapper_class() {
        let parameter = Parameter::new("session", CType::pointer_to("sp_session"));
        assert_eq!(
            staged(handle, parameter, None),
            Some(vec![
                pinvoke("session", TargetType::int_ptr(), "session._handle"),
                managed("session", TargetType::new("Session")),
            ])
        );
    }

    #[test]
    fn string_in_opens_a_paired_scope() {
        let parameter = Parameter::new("name", CType::pointer_to("char"));
        let edits = staged(string_in, parameter, None).unwrap();
        assert_eq!(edits[0], pinvoke("name", TargetType::int_ptr(), "utf8_name.IntPtr"));
        assert_eq!(
            edits[2],
            Edit::BeforeCall(
                "using (Utf8String utf8_name = SpotifyMarshalling.StringToUtf8(name))"
                    .to_owned()
            )
        );
        let entered = edits.iter().filter(|e| **e == Edit::EnterScope).count();
        let exited = edits.iter().filter(|e| **e == Edit::ExitScope).count();
        assert_eq!((entered, exited), (1, 1));
    }

    #[test]
    fn by_reference_rejects_size_and_unmapped() {
        let attempt = |ty: CType| staged(by_reference, Parameter::new("out", ty), None);
        assert_eq!(
            attempt(CType::pointer_to("int")),
            Some(vec![
                pinvoke("@out", TargetType::int().by_reference(), "ref @out"),
                managed("@out", TargetType::int().by_reference()),
            ])
        );
        assert_eq!(attempt(CType::pointer_to("size_t")), None);
        assert_eq!(attempt(CType::pointer_to("sp_unknown")), None);
        assert_eq!(attempt(CType::pointer(CType::pointer_to("int"))), None);
    }
}
