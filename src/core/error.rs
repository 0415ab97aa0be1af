use thiserror::Error;

/// Source location span for error reporting
/// Represents a range of characters in the input string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start position (0-indexed byte offset)
    pub start: usize,
    /// End position (exclusive, 0-indexed byte offset)
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Create a span for a single position
    pub fn at(pos: usize) -> Self {
        Span {
            start: pos,
            end: pos + 1,
        }
    }

    /// Check if this span has valid location info
    pub fn is_valid(&self) -> bool {
        self.end > self.start
    }

    /// Format the span for display (1-indexed for users)
    pub fn display(&self) -> String {
        if !self.is_valid() {
            String::new()
        } else if self.end - self.start == 1 {
            format!(" at position {}", self.start + 1)
        } else {
            format!(" at positions {}-{}", self.start + 1, self.end)
        }
    }
}

fn span_suffix(span: &Option<Span>) -> String {
    span.map_or(String::new(), |s| s.display())
}

/// Errors raised by parsing, simplification, solving and evaluation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CasError {
    // Parsing errors
    #[error("Formula cannot be empty")]
    EmptyFormula,

    #[error("Invalid syntax: {msg}{}", span_suffix(.span))]
    InvalidSyntax { msg: String, span: Option<Span> },

    #[error("Invalid number format: '{value}'{}", span_suffix(.span))]
    InvalidNumber { value: String, span: Option<Span> },

    #[error("Invalid token: '{token}'{}", span_suffix(.span))]
    InvalidToken { token: String, span: Option<Span> },

    #[error("Expected '{expected}', but got '{got}'{}", span_suffix(.span))]
    UnexpectedToken {
        expected: String,
        got: String,
        span: Option<Span>,
    },

    #[error("Unexpected end of input")]
    UnexpectedEndOfInput,

    // Algebraic errors
    #[error("Expression is not a polynomial in '{var}': {expr}")]
    NotPolynomial { var: String, expr: String },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Expected exactly one solution for '{var}', found {count}")]
    SolutionCount { var: String, count: usize },

    #[error("Cannot solve for '{var}': {reason}")]
    Unsolvable { var: String, reason: String },

    // Evaluation errors
    #[error("Cannot evaluate: symbol '{0}' has no value")]
    UnboundSymbol(String),

    #[error("Cannot evaluate: {0}")]
    NonReal(String),

    // Safety limits
    #[error("Expression nesting depth exceeds maximum limit")]
    MaxDepthExceeded,
}

impl CasError {
    /// Create InvalidSyntax with span
    pub fn invalid_syntax_at(msg: impl Into<String>, span: Span) -> Self {
        CasError::InvalidSyntax {
            msg: msg.into(),
            span: Some(span),
        }
    }

    /// Create InvalidToken with span
    pub fn invalid_token_at(token: impl Into<String>, span: Span) -> Self {
        CasError::InvalidToken {
            token: token.into(),
            span: Some(span),
        }
    }

    pub(crate) fn unsolvable(var: impl Into<String>, reason: impl Into<String>) -> Self {
        CasError::Unsolvable {
            var: var.into(),
            reason: reason.into(),
        }
    }
}
