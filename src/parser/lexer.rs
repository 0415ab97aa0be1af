use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::pow;

use super::tokens::{Lexeme, Operator, Token};
use crate::{CasError, Span};

/// Decimal exponents beyond this magnitude are rejected
const MAX_DECIMAL_EXPONENT: u32 = 4096;

/// Split the input into tokens.
///
/// Decimal literals (`0.25`, `1.5e-3`) become exact rationals.
pub(crate) fn lex(input: &str) -> Result<Vec<Lexeme>, CasError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::with_capacity(input.len() / 2 + 1);
    let mut pos = 0;

    while pos < bytes.len() {
        let c = bytes[pos];
        let start = pos;

        let token = match c {
            b' ' | b'\t' | b'\n' | b'\r' => {
                pos += 1;
                continue;
            }
            b'+' => {
                pos += 1;
                Token::Operator(Operator::Add)
            }
            b'-' => {
                pos += 1;
                Token::Operator(Operator::Sub)
            }
            b'*' if bytes.get(pos + 1) == Some(&b'*') => {
                pos += 2;
                Token::Operator(Operator::Pow)
            }
            b'*' => {
                pos += 1;
                Token::Operator(Operator::Mul)
            }
            b'/' => {
                pos += 1;
                Token::Operator(Operator::Div)
            }
            b'^' => {
                pos += 1;
                Token::Operator(Operator::Pow)
            }
            b'(' => {
                pos += 1;
                Token::LeftParen
            }
            b')' => {
                pos += 1;
                Token::RightParen
            }
            b'0'..=b'9' | b'.' => {
                pos = scan_number(bytes, pos);
                Token::Number(parse_decimal(&input[start..pos], Span::new(start, pos))?)
            }
            c if c.is_ascii_alphabetic() || c == b'_' => {
                while pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_')
                {
                    pos += 1;
                }
                Token::Identifier(input[start..pos].to_string())
            }
            _ => {
                let ch = input[start..].chars().next().unwrap_or_default();
                return Err(CasError::invalid_token_at(
                    ch.to_string(),
                    Span::new(start, start + ch.len_utf8()),
                ));
            }
        };

        tokens.push(Lexeme {
            token,
            span: Span::new(start, pos),
        });
    }

    Ok(tokens)
}

/// End offset of the numeric literal starting at `pos`
fn scan_number(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && (bytes[pos].is_ascii_digit() || bytes[pos] == b'.') {
        pos += 1;
    }
    // Exponent only if digits follow, so `2e` stays `2` then identifier `e`
    if pos < bytes.len() && matches!(bytes[pos], b'e' | b'E') {
        let mut end = pos + 1;
        if end < bytes.len() && matches!(bytes[end], b'+' | b'-') {
            end += 1;
        }
        if end < bytes.len() && bytes[end].is_ascii_digit() {
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
            pos = end;
        }
    }
    pos
}

/// Exact value of a decimal literal
fn parse_decimal(text: &str, span: Span) -> Result<BigRational, CasError> {
    let invalid = || CasError::InvalidNumber {
        value: text.to_string(),
        span: Some(span),
    };

    let (mantissa, exponent) = match text.find(['e', 'E']) {
        Some(i) => (&text[..i], text[i + 1..].parse::<i32>().map_err(|_| invalid())?),
        None => (text, 0),
    };

    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if (int_part.is_empty() && frac_part.is_empty()) || frac_part.contains('.') {
        return Err(invalid());
    }

    let digits = format!("{int_part}{frac_part}");
    let numer: BigInt = digits.parse().map_err(|_| invalid())?;
    let scale = exponent - i32::try_from(frac_part.len()).map_err(|_| invalid())?;
    if scale.unsigned_abs() > MAX_DECIMAL_EXPONENT {
        return Err(invalid());
    }

    let magnitude = pow(BigInt::from(10), scale.unsigned_abs() as usize);
    Ok(if scale >= 0 {
        BigRational::from_integer(numer * magnitude)
    } else {
        BigRational::new(numer, magnitude)
    })
}
