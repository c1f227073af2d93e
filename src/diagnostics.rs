//! Diagnostic formatting utilities for the strand CLI.

use ariadne::{Color, Label, Report, ReportKind, Source};

use crate::diagnostic::{CompilationPhase, Diagnostic, DiagnosticSeverity};

pub fn phase_color(phase: &CompilationPhase) -> Color {
    match phase {
        CompilationPhase::Configuration => Color::Red,
        CompilationPhase::Translation => Color::Yellow,
    }
}

fn report_kind(severity: &DiagnosticSeverity) -> ReportKind<'static> {
    match severity {
        DiagnosticSeverity::Error => ReportKind::Error,
        DiagnosticSeverity::Warning => ReportKind::Warning,
    }
}

/// Normalize a span to ensure end > start (required by ariadne).
pub fn normalize_span(start: usize, end: usize) -> (usize, usize) {
    (start, end.max(start + 1))
}

/// One-line rendering used by `strand check`.
pub fn summary_line(diag: &Diagnostic) -> String {
    match &diag.function {
        Some(function) => format!("{} [{function}] {}", diag.severity, diag.message),
        None => format!("{} {}", diag.severity, diag.message),
    }
}

/// Print a diagnostic using ariadne for pretty output.
pub fn print_diagnostic(diag: &Diagnostic, source: &str, file_path: &str) {
    let (start, end) = normalize_span(diag.span.start, diag.span.end);
    let color = phase_color(&diag.phase);
    let label = match &diag.function {
        Some(function) => format!("`{function}` is skipped"),
        None => diag.message.clone(),
    };

    Report::build(report_kind(&diag.severity), (file_path, start..end))
        .with_code(format!("{:?}", diag.phase))
        .with_message(&diag.message)
        .with_label(
            Label::new((file_path, start..end))
                .with_message(label)
                .with_color(color),
        )
        .finish()
        .eprint((file_path, Source::from(source)))
        .ok();
}
