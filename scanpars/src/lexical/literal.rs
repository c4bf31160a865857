//! Decoding numeric and string tokens into values
//!
//! Tokens keep their source text verbatim; these helpers interpret that text
//! after the fact for the catalog's numeric and quoted types.

use super::catalog::kinds;
use crate::logging::codes;
use crate::tokens::Token;
use serde::Serialize;
use std::num::{ParseFloatError, ParseIntError};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LiteralError {
    #[error("Token type {kind} does not carry a {expected} value")]
    WrongType { kind: String, expected: &'static str },

    #[error("Invalid integer literal '{lexeme}': {source}")]
    InvalidInteger {
        lexeme: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Invalid float literal '{lexeme}': {source}")]
    InvalidFloat {
        lexeme: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("Malformed complex literal '{lexeme}'")]
    MalformedComplex { lexeme: String },

    #[error("Literal '{lexeme}' is missing its base prefix")]
    MissingPrefix { lexeme: String },
}

impl LiteralError {
    pub fn error_code(&self) -> crate::logging::Code {
        codes::lexical::INVALID_LITERAL
    }
}

/// Value of any numeric catalog token
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
    Complex { re: f64, im: f64 },
}

/// `UINT`, `INT`, `HEXNUM`, `BINNUM` and `OCTNUM` tokens
pub fn parse_int(token: &Token) -> Result<i64, LiteralError> {
    let radix = if token.kind == kinds::HEXNUM {
        16
    } else if token.kind == kinds::BINNUM {
        2
    } else if token.kind == kinds::OCTNUM {
        8
    } else if token.kind == kinds::UINT || token.kind == kinds::INT {
        10
    } else {
        return Err(wrong_type(token, "integer"));
    };

    let (negative, unsigned) = split_sign(&token.lexeme);
    let digits = if radix == 10 {
        unsigned
    } else {
        unsigned
            .get(2..)
            .filter(|digits| !digits.is_empty())
            .ok_or_else(|| LiteralError::MissingPrefix {
                lexeme: token.lexeme.clone(),
            })?
    };
    let invalid = |source| LiteralError::InvalidInteger {
        lexeme: token.lexeme.clone(),
        source,
    };

    // Parse with the sign attached so i64::MIN stays representable
    let text = if negative {
        format!("-{}", digits)
    } else {
        digits.to_string()
    };
    i64::from_str_radix(&text, radix).map_err(invalid)
}

/// `FLOAT` tokens, plus decimal integers widened to `f64`
pub fn parse_float(token: &Token) -> Result<f64, LiteralError> {
    if token.kind != kinds::FLOAT && token.kind != kinds::UINT && token.kind != kinds::INT {
        return Err(wrong_type(token, "float"));
    }
    token
        .lexeme
        .parse()
        .map_err(|source| LiteralError::InvalidFloat {
            lexeme: token.lexeme.clone(),
            source,
        })
}

/// `COMPLEX_NUM` tokens such as `(-2+1j)`, as `(re, im)`
pub fn parse_complex(token: &Token) -> Result<(f64, f64), LiteralError> {
    if token.kind != kinds::COMPLEX_NUM {
        return Err(wrong_type(token, "complex"));
    }
    let malformed = || LiteralError::MalformedComplex {
        lexeme: token.lexeme.clone(),
    };

    let inner = token
        .lexeme
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .and_then(|rest| rest.strip_suffix(['j', 'J']))
        .ok_or_else(malformed)?;

    // The imaginary part starts at the last sign that is neither leading nor an exponent sign
    let bytes = inner.as_bytes();
    let split = (1..bytes.len())
        .rev()
        .find(|&i| matches!(bytes[i], b'+' | b'-') && !matches!(bytes[i - 1], b'e' | b'E'))
        .ok_or_else(malformed)?;

    let part = |text: &str| {
        text.parse::<f64>().map_err(|source| LiteralError::InvalidFloat {
            lexeme: token.lexeme.clone(),
            source,
        })
    };
    Ok((part(&inner[..split])?, part(&inner[split..])?))
}

/// Decode any numeric catalog token; non-numeric tokens yield `None`
pub fn parse_number(token: &Token) -> Option<Result<Number, LiteralError>> {
    if !kinds::NUMBERS.contains(&token.kind) {
        return None;
    }
    let value = if token.kind == kinds::COMPLEX_NUM {
        parse_complex(token).map(|(re, im)| Number::Complex { re, im })
    } else if token.kind == kinds::FLOAT {
        parse_float(token).map(Number::Float)
    } else {
        parse_int(token).map(Number::Int)
    };
    Some(value)
}

/// Text between the delimiters of a quoted token, escapes left untouched
pub fn unquote(token: &Token) -> Option<&str> {
    let fence = if token.kind == kinds::TRIPLEQUOTED {
        "\"\"\""
    } else if token.kind == kinds::DBLQUOTED {
        "\""
    } else if token.kind == kinds::QUOTED {
        "'"
    } else {
        return None;
    };
    token
        .lexeme
        .strip_prefix(fence)
        .and_then(|rest| rest.strip_suffix(fence))
}

fn split_sign(lexeme: &str) -> (bool, &str) {
    match lexeme.as_bytes().first() {
        Some(b'-') => (true, &lexeme[1..]),
        Some(b'+') => (false, &lexeme[1..]),
        _ => (false, lexeme),
    }
}

fn wrong_type(token: &Token, expected: &'static str) -> LiteralError {
    LiteralError::WrongType {
        kind: token.kind.to_string(),
        expected,
    }
}
