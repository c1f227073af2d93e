//! Return-value rules, tried once the parameters are consumed.

use super::SignatureRewriter;
use crate::convert::TypeConverter;
use crate::runtime::{construct_handle, decode_string};
use crate::target::TargetType;

/// Status code captured and handed to the configured error check.
pub(super) fn status_code(rw: &mut SignatureRewriter<'_>) -> bool {
    let ret = rw.cursor().return_type();
    let types = rw.types();
    if !types.is_status_code(ret) {
        return false;
    }
    let Some(ty) = types.scalar(ret) else {
        return false;
    };

    let check = &rw.config().error_check;
    rw.insert_at_top(format!("{ty} ret_status;"));
    rw.set_pinvoke_return(ty, Some("ret_status"));
    rw.insert_at_bottom(format!("{check}(ret_status);"));
    rw.consume_return();
    true
}

pub(super) fn scalar(rw: &mut SignatureRewriter<'_>) -> bool {
    let Some(ty) = rw.types().scalar(rw.cursor().return_type()) else {
        return false;
    };

    rw.insert_at_top(format!("{ty} ret_value;"));
    rw.set_pinvoke_return(ty.clone(), Some("ret_value"));
    rw.set_managed_return(ty);
    rw.insert_at_bottom("return ret_value;");
    rw.consume_return();
    true
}

pub(super) fn handle(rw: &mut SignatureRewriter<'_>) -> bool {
    let Some(class) = rw.types().handle_class(rw.cursor().return_type()) else {
        return false;
    };

    rw.insert_at_top("IntPtr ret_handle;");
    rw.set_pinvoke_return(TargetType::int_ptr(), Some("ret_handle"));
    rw.set_managed_return(TargetType::new(class));
    rw.insert_at_bottom(format!("return {};", construct_handle(class, "ret_handle")));
    rw.consume_return();
    true
}

pub(super) fn void(rw: &mut SignatureRewriter<'_>) -> bool {
    if !TypeConverter::is_void(rw.cursor().return_type()) {
        return false;
    }
    rw.consume_return();
    true
}

pub(super) fn c_string(rw: &mut SignatureRewriter<'_>) -> bool {
    if !TypeConverter::is_c_string(rw.cursor().return_type()) {
        return false;
    }

    rw.insert_at_top("IntPtr ret_string;");
    rw.set_pinvoke_return(TargetType::int_ptr(), Some("ret_string"));
    rw.set_managed_return(TargetType::string());
    rw.insert_at_bottom(format!("return {};", decode_string("ret_string")));
    rw.consume_return();
    true
}
