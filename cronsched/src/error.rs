use std::fmt;

/// Byte range within the input string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Zero-width span at `offset`.
    pub fn at(offset: usize) -> Self {
        Self::new(offset, offset)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// All errors produced by cronsched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ScheduleError {
    /// The expression was empty or contained only whitespace.
    #[error("schedule expression must not be empty")]
    Empty,

    /// Malformed term, unexpected character, or unparseable number.
    #[error("{message}")]
    Syntax {
        message: String,
        span: Span,
        input: String,
    },

    /// A value, step, or range outside the field's legal bounds.
    #[error("{message}")]
    Range {
        message: String,
        span: Span,
        input: String,
    },

    /// Fewer or more than five fields.
    #[error("{message}")]
    FieldCount {
        message: String,
        span: Span,
        input: String,
    },

    /// No instant within the search horizon satisfies every field.
    #[error("{message}")]
    Unreachable { message: String },

    /// Calendar arithmetic failed (e.g. past the last representable year).
    #[error("{message}")]
    Eval { message: String },
}

impl ScheduleError {
    pub fn syntax(message: impl Into<String>, span: Span, input: impl Into<String>) -> Self {
        Self::Syntax {
            message: message.into(),
            span,
            input: input.into(),
        }
    }

    pub fn range(message: impl Into<String>, span: Span, input: impl Into<String>) -> Self {
        Self::Range {
            message: message.into(),
            span,
            input: input.into(),
        }
    }

    pub fn field_count(message: impl Into<String>, span: Span, input: impl Into<String>) -> Self {
        Self::FieldCount {
            message: message.into(),
            span,
            input: input.into(),
        }
    }

    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable {
            message: message.into(),
        }
    }

    pub fn eval(message: impl Into<String>) -> Self {
        Self::Eval {
            message: message.into(),
        }
    }

    /// The offending byte range, for errors raised while parsing.
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Syntax { span, .. } | Self::Range { span, .. } | Self::FieldCount { span, .. } => {
                Some(*span)
            }
            _ => None,
        }
    }

    /// True for every error raised at parse time.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::Empty | Self::Syntax { .. } | Self::Range { .. } | Self::FieldCount { .. }
        )
    }

    /// Format a rich error with the input and a caret underline.
    pub fn display_rich(&self) -> String {
        match self {
            Self::Syntax {
                message,
                span,
                input,
            }
            | Self::Range {
                message,
                span,
                input,
            }
            | Self::FieldCount {
                message,
                span,
                input,
            } => format_span_error("error", message, span, input),
            other => format!("error: {other}"),
        }
    }
}

fn format_span_error(prefix: &str, message: &str, span: &Span, input: &str) -> String {
    let mut out = format!("{prefix}: {message}\n");
    out.push_str(&format!("  {input}\n"));
    let padding = " ".repeat(span.start + 2);
    let underline = "^".repeat((span.end - span.start).max(1));
    out.push_str(&padding);
    out.push_str(&underline);
    out
}
