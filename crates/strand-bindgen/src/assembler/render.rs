//! Text rendering of an assembled function.
//!
//! Every fragment takes the caller's indentation prefix and ends with a
//! newline, so fragments can be concatenated into a larger source file.

use super::{FunctionAssembler, Line, LineKind};
use crate::target::TargetType;

const INDENT: &str = "    ";

impl FunctionAssembler {
    /// `internal delegate RET NAME_delegate(PARAMS);`
    pub fn render_delegate(&self, prefix: &str) -> String {
        let mut out = String::new();
        push_return_attributes(&mut out, prefix, &self.pinvoke_return);
        out.push_str(&format!(
            "{prefix}internal delegate {} {}_delegate({});\n",
            self.pinvoke_return.render_return(),
            self.native_name,
            self.pinvoke_parameter_list(),
        ));
        out
    }

    /// `[DllImport]` extern declaration.
    pub fn render_import(&self, prefix: &str) -> String {
        let mut out = format!("{prefix}[DllImport(\"{}\")]\n", self.library);
        push_return_attributes(&mut out, prefix, &self.pinvoke_return);
        out.push_str(&format!(
            "{prefix}internal static extern {} {}({});\n",
            self.pinvoke_return.render_return(),
            self.native_name,
            self.pinvoke_parameter_list(),
        ));
        out
    }

    /// The managed wrapper method, or a comment when the wrapper is suppressed.
    pub fn render_wrapper(&self, prefix: &str) -> String {
        if !self.wrapper {
            return format!("{prefix}// {}: no wrapper generated\n", self.native_name);
        }

        let mut out = String::new();
        push_return_attributes(&mut out, prefix, &self.managed_return);
        let modifier = if self.instance { "" } else { "static " };
        let parameters = self
            .managed_parameters
            .iter()
            .map(|p| p.ty.render_parameter(&p.name))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!(
            "{prefix}public {modifier}{} {}({parameters})\n",
            self.managed_return.render_return(),
            self.managed_name,
        ));
        out.push_str(&format!("{prefix}{{\n"));

        let call = Line {
            depth: self.scopes.above(),
            kind: LineKind::Call,
        };
        let body = self
            .top
            .iter()
            .chain(&self.above)
            .chain(std::iter::once(&call))
            .chain(self.below.iter().rev().flatten())
            .chain(self.bottom.iter().rev().flatten());
        for line in body {
            out.push_str(prefix);
            out.push_str(&INDENT.repeat(line.depth + 1));
            match &line.kind {
                LineKind::Code(text) => out.push_str(text),
                LineKind::Call => out.push_str(&self.call_statement()),
            }
            out.push('\n');
        }
        out.push_str(&format!("{prefix}}}\n"));
        out
    }

    fn call_expression(&self) -> String {
        let arguments = self
            .pinvoke_parameters
            .iter()
            .map(|p| p.argument.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}.{}({arguments})", self.native_class, self.native_name)
    }

    fn call_statement(&self) -> String {
        match &self.return_variable {
            Some(variable) => format!("{variable} = {};", self.call_expression()),
            None => format!("{};", self.call_expression()),
        }
    }

    fn pinvoke_parameter_list(&self) -> String {
        self.pinvoke_parameters
            .iter()
            .map(|p| p.ty.render_parameter(&p.name))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn push_return_attributes(out: &mut String, prefix: &str, ty: &TargetType) {
    if let Some(attributes) = ty.render_return_attributes() {
        out.push_str(prefix);
        out.push_str(&attributes);
        out.push('\n');
    }
}
