use num_rational::BigRational;

use crate::Span;

/// Binary operators recognized by the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl Operator {
    /// Binding power for Pratt parsing
    pub(crate) fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Sub => 10,
            Operator::Mul | Operator::Div => 20,
            Operator::Pow => 30,
        }
    }

    pub(crate) fn is_right_associative(self) -> bool {
        matches!(self, Operator::Pow)
    }

    pub(crate) fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Pow => "^",
        }
    }
}

/// Binding power of prefix `-` and `+`: tighter than `*`, looser than `^`,
/// so `-x^2` reads as `-(x^2)`
pub(crate) const UNARY_PRECEDENCE: u8 = 25;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    /// Numeric literal, kept exact
    Number(BigRational),
    Identifier(String),
    Operator(Operator),
    LeftParen,
    RightParen,
}

impl Token {
    /// Text shown to users in error messages
    pub(crate) fn to_user_string(&self) -> String {
        match self {
            Token::Number(n) => n.to_string(),
            Token::Identifier(name) => name.clone(),
            Token::Operator(op) => op.symbol().to_string(),
            Token::LeftParen => "(".to_string(),
            Token::RightParen => ")".to_string(),
        }
    }
}

/// A token with its location in the source text
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Lexeme {
    pub token: Token,
    pub span: Span,
}
