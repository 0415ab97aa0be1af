use rustc_hash::FxHashMap;

use crate::parser::tokens::{Lexeme, Operator, Token, UNARY_PRECEDENCE};
use crate::{CasError, Expr, Span, Symbol, pi, symb};

/// Parse tokens into an AST using Pratt parsing algorithm.
///
/// Identifiers resolve to the matching entry of `known`, then to `pi`, then
/// to a fresh plain symbol.
pub(crate) fn parse_expression(tokens: &[Lexeme], known: &[Symbol]) -> Result<Expr, CasError> {
    if tokens.is_empty() {
        return Err(CasError::UnexpectedEndOfInput);
    }

    let symbols = known.iter().map(|s| (s.name().to_string(), *s)).collect();
    let mut parser = Parser {
        tokens,
        pos: 0,
        symbols,
    };

    let expr = parser.parse_expr(0)?;
    match parser.tokens.get(parser.pos) {
        None => Ok(expr),
        Some(extra) => Err(CasError::UnexpectedToken {
            expected: "operator or end of input".to_string(),
            got: extra.token.to_user_string(),
            span: Some(extra.span),
        }),
    }
}

struct Parser<'a> {
    tokens: &'a [Lexeme],
    pos: usize,
    symbols: FxHashMap<String, Symbol>,
}

impl Parser<'_> {
    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|l| &l.token)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    /// Span of the current token, or an empty span at the end of input
    fn current_span(&self) -> Span {
        self.tokens.get(self.pos).map_or_else(
            || {
                let end = self.tokens.last().map_or(0, |l| l.span.end);
                Span::new(end, end)
            },
            |l| l.span,
        )
    }

    fn parse_expr(&mut self, min_precedence: u8) -> Result<Expr, CasError> {
        // Parse left side (prefix)
        let mut left = self.parse_prefix()?;

        // Parse operators and right side (infix)
        while let Some(Token::Operator(op)) = self.current() {
            let op = *op;
            let precedence = op.precedence();
            if precedence < min_precedence {
                break;
            }
            self.advance();

            let next_precedence = if op.is_right_associative() {
                precedence
            } else {
                precedence + 1
            };
            let right = self.parse_expr(next_precedence)?;

            left = match op {
                Operator::Add => Expr::add_expr(left, right),
                Operator::Sub => Expr::sub_expr(left, right),
                Operator::Mul => Expr::mul_expr(left, right),
                Operator::Div => Expr::div_expr(left, right),
                Operator::Pow => Expr::pow(left, right),
            };
        }

        Ok(left)
    }

    fn expect_right_paren(&mut self) -> Result<(), CasError> {
        if let Some(Token::RightParen) = self.current() {
            self.advance();
            Ok(())
        } else {
            Err(CasError::UnexpectedToken {
                expected: ")".to_string(),
                got: self
                    .current()
                    .map_or_else(|| "end of input".to_string(), Token::to_user_string),
                span: Some(self.current_span()),
            })
        }
    }

    fn parse_prefix(&mut self) -> Result<Expr, CasError> {
        // Borrow from the underlying slice so `advance` can run while `lexeme` is live
        let tokens = self.tokens;
        let lexeme = tokens.get(self.pos).ok_or(CasError::UnexpectedEndOfInput)?;

        match &lexeme.token {
            Token::Number(n) => {
                self.advance();
                Ok(Expr::number(n.clone()))
            }

            Token::Identifier(name) => {
                self.advance();

                if let Some(Token::LeftParen) = self.current() {
                    if name != "sqrt" {
                        return Err(CasError::invalid_syntax_at(
                            format!("unknown function '{name}'"),
                            lexeme.span,
                        ));
                    }
                    self.advance(); // consume (
                    let arg = self.parse_expr(0)?;
                    self.expect_right_paren()?;
                    return Ok(Expr::sqrt(arg));
                }

                Ok(self.resolve(name))
            }

            // Unary minus binds looser than ^ so -x^2 is -(x^2)
            Token::Operator(Operator::Sub) => {
                self.advance();
                let expr = self.parse_expr(UNARY_PRECEDENCE)?;
                Ok(Expr::neg_expr(expr))
            }

            Token::Operator(Operator::Add) => {
                self.advance();
                self.parse_expr(UNARY_PRECEDENCE)
            }

            Token::LeftParen => {
                self.advance(); // consume (
                if let Some(Token::RightParen) = self.current() {
                    return Err(CasError::invalid_syntax_at(
                        "empty parentheses",
                        Span::new(lexeme.span.start, self.current_span().end),
                    ));
                }
                let expr = self.parse_expr(0)?;
                self.expect_right_paren()?;
                Ok(expr)
            }

            token => Err(CasError::invalid_token_at(token.to_user_string(), lexeme.span)),
        }
    }

    fn resolve(&self, name: &str) -> Expr {
        match self.symbols.get(name) {
            Some(symbol) => symbol.to_expr(),
            None if name == "pi" => pi().to_expr(),
            None => symb(name).to_expr(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::lex;
    use crate::{ExprKind, symb_positive};

    fn parse_str(input: &str) -> Result<Expr, CasError> {
        parse_expression(&lex(input)?, &[])
    }

    #[test]
    fn test_precedence() {
        // x + 2 * 3 should be x + 6
        let e = parse_str("pratt_x + 2 * 3").unwrap();
        assert_eq!(e.to_string(), "pratt_x + 6");
    }

    #[test]
    fn test_power_is_right_associative() {
        let e = parse_str("pratt_b^2^3").unwrap();
        match &e.kind {
            ExprKind::Pow(_, exp) => assert!(matches!(exp.kind, ExprKind::Pow(_, _))),
            _ => panic!("Expected Pow at top level"),
        }
    }

    #[test]
    fn test_unary_minus_binds_looser_than_power() {
        let e = parse_str("-pratt_u^2").unwrap();
        assert_eq!(e.to_string(), "-pratt_u^2");
        assert!(matches!(e.kind, ExprKind::Product(_)));
    }

    #[test]
    fn test_known_symbol_keeps_assumptions() {
        let r = symb_positive("pratt_r");
        let e = parse_expression(&lex("pratt_r").unwrap(), &[r]).unwrap();
        assert_eq!(e.as_symbol(), Some(r));
        assert!(e.is_known_positive());
    }

    #[test]
    fn test_pi_identifier() {
        let e = parse_str("pi").unwrap();
        assert_eq!(e.as_symbol(), Some(pi()));
    }

    #[test]
    fn test_missing_paren_reports_span() {
        let err = parse_str("(pratt_m + 1").unwrap_err();
        assert_eq!(
            err,
            CasError::UnexpectedToken {
                expected: ")".to_string(),
                got: "end of input".to_string(),
                span: Some(Span::new(12, 12)),
            }
        );
    }

    #[test]
    fn test_empty_parentheses() {
        // () should be an error, NOT 1 or anything else
        let result = parse_str("()");
        assert!(
            result.is_err(),
            "Empty parentheses should fail to parse, but got: {:?}",
            result
        );
    }

    #[test]
    fn test_unknown_function() {
        let err = parse_str("sin(pratt_s)").unwrap_err();
        assert!(matches!(err, CasError::InvalidSyntax { span: Some(s), .. } if s == Span::new(0, 3)));
    }

    #[test]
    fn test_trailing_token() {
        let err = parse_str("pratt_t pratt_t").unwrap_err();
        assert!(matches!(err, CasError::UnexpectedToken { span: Some(s), .. } if s == Span::new(8, 15)));
    }
}
