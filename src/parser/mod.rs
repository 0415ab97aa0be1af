//! Parser module - converts strings to AST
mod lexer;
mod pratt;
mod tokens;

use crate::{CasError, Expr, Symbol};

/// Parse a formula string into an expression AST
///
/// Supports `+ - * /`, `^` (or `**`) for powers, parentheses, unary minus,
/// `sqrt(...)` and the constant `pi`. Decimal literals are read exactly, so
/// `0.5` is the rational `1/2`.
///
/// # Arguments
/// * `input` - The formula string to parse (e.g., "4/3*pi*R^3")
/// * `known_symbols` - Symbols to use for matching identifiers, so that
///   assumptions such as positivity carry into the parsed expression.
///   Other identifiers become plain symbols.
///
/// # Example
/// ```
/// use simplicity_calc::{parse, symb_positive};
///
/// let r = symb_positive("parse_doc_R");
/// let expr = parse("4/3*pi*parse_doc_R^3", &[r]).unwrap();
/// assert_eq!(expr.to_string(), "4*pi*parse_doc_R^3/3");
/// ```
///
/// # Errors
/// Returns `CasError` if:
/// - The input is empty
/// - The input contains an invalid character or number literal
/// - Parentheses are unbalanced or an operator lacks an operand
pub fn parse(input: &str, known_symbols: &[Symbol]) -> Result<Expr, CasError> {
    if input.trim().is_empty() {
        return Err(CasError::EmptyFormula);
    }

    let tokens = lexer::lex(input)?;
    pratt::parse_expression(&tokens, known_symbols)
}
