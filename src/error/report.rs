use std::fmt::Display;

use crate::{error::RuntimeError, span::Span};

/// Renders a lexical or syntax error.
///
/// ```text
/// Invalid Syntax: Expected ')'
/// (File: <stdin>, Line: 1)
///
/// (1+
///    ^
/// ```
#[must_use]
pub fn render_static(error: &impl Display, span: &Span) -> String {
    format!("{error}\n(File: {}, Line: {})\n\n{}",
            span.filename(),
            span.start.line,
            underline(span))
}

/// Renders a runtime error with its traceback, oldest frame first.
///
/// ```text
/// Traceback (most recent call last):
/// (File <stdin>, line 1, in <program>)
/// (File <stdin>, line 1, in div)
/// Division By Zero: Division by zero
///
/// fn div(a) { a / 0 }
///                 ^
/// ```
#[must_use]
pub fn render_runtime(error: &RuntimeError) -> String {
    let mut frames = Vec::new();
    let mut position = Some(error.span.clone());
    let mut context = error.context.clone();

    while let Some(ctx) = context {
        if let Some(span) = &position {
            frames.push(format!("(File {}, line {}, in {})",
                                span.filename(),
                                span.start.line,
                                ctx.display_name));
        }
        position = ctx.call_site.clone();
        context = ctx.parent.clone();
    }

    let mut out = String::from("Traceback (most recent call last):\n");
    for frame in frames.iter().rev() {
        out.push_str(frame);
        out.push('\n');
    }
    out.push_str(&format!("{error}\n\n{}", underline(&error.span)));
    out
}

/// Returns the source line(s) covered by `span`, each followed by a line of
/// carets under the covered columns.
///
/// An empty or inverted range is widened to a single caret.
#[must_use]
pub fn underline(span: &Span) -> String {
    let first = span.start.line;
    let last = span.end.line.max(first);
    let mut lines = Vec::new();

    for line_no in first..=last {
        let text = span.source.line(line_no);
        let col_start = if line_no == first {
            span.start.column.saturating_sub(1)
        } else {
            0
        };
        let mut col_end = if line_no == last {
            span.end.column.saturating_sub(1)
        } else {
            text.chars().count()
        };
        if col_end <= col_start {
            col_end = col_start + 1;
        }

        lines.push(text.to_string());
        lines.push(format!("{}{}", " ".repeat(col_start), "^".repeat(col_end - col_start)));
    }

    lines.join("\n")
}
