//! Python literal expressions.
//!
//! Covers the subset used in decorator arguments and parameter defaults:
//! strings (including raw strings), ints, floats, booleans, `None`, and
//! lists of the above. Anything richer stays as raw source text upstream.

use std::fmt;

use serde::ser::{Serialize, SerializeSeq, Serializer};

use super::scan::split_top_level;

/// A parsed Python literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum PyLiteral {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    None,
    List(Vec<PyLiteral>),
}

impl PyLiteral {
    /// String content, if this literal is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Boolean value, if this literal is a bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// List elements, if this literal is a list.
    pub fn as_list(&self) -> Option<&[PyLiteral]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for PyLiteral {
    /// Renders the literal back as Python source.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"")),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Bool(true) => write!(f, "True"),
            Self::Bool(false) => write!(f, "False"),
            Self::None => write!(f, "None"),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

impl Serialize for PyLiteral {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Str(s) => serializer.serialize_str(s),
            Self::Int(n) => serializer.serialize_i64(*n),
            Self::Float(n) => serializer.serialize_f64(*n),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::None => serializer.serialize_none(),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

/// Parse an expression as a Python literal, or `None` if it is not one.
pub fn parse_literal(text: &str) -> Option<PyLiteral> {
    let text = text.trim();

    match text {
        "None" => return Some(PyLiteral::None),
        "True" => return Some(PyLiteral::Bool(true)),
        "False" => return Some(PyLiteral::Bool(false)),
        _ => {}
    }

    if let Some(s) = parse_py_string(text) {
        return Some(PyLiteral::Str(s));
    }

    if let Ok(n) = text.parse::<i64>() {
        return Some(PyLiteral::Int(n));
    }
    if (text.contains('.') || text.contains('e') || text.contains('E'))
        && text.parse::<f64>().is_ok()
    {
        return Some(PyLiteral::Float(text.parse().ok()?));
    }

    if text.starts_with('[') && text.ends_with(']') {
        let inner = &text[1..text.len() - 1];
        if inner.trim().is_empty() {
            return Some(PyLiteral::List(Vec::new()));
        }
        let mut items = Vec::new();
        for part in split_top_level(inner, ',') {
            let part = part.trim();
            if part.is_empty() {
                continue; // trailing comma
            }
            items.push(parse_literal(part)?);
        }
        return Some(PyLiteral::List(items));
    }

    None
}

/// Parse a complete Python string literal, handling `r`-prefixes and
/// triple quotes. Returns the unescaped content.
pub fn parse_py_string(text: &str) -> Option<String> {
    let text = text.trim();
    let (raw, body) = match text.strip_prefix(['r', 'R']) {
        Some(rest) if rest.starts_with(['"', '\'']) => (true, rest),
        _ => (false, text),
    };

    let quote = match body.chars().next() {
        Some(c @ ('"' | '\'')) => c,
        _ => return None,
    };

    let triple = {
        let q3: String = std::iter::repeat(quote).take(3).collect();
        body.starts_with(&q3) && body.ends_with(&q3) && body.len() >= 6
    };

    let inner = if triple {
        &body[3..body.len() - 3]
    } else {
        if body.len() < 2 || !body.ends_with(quote) {
            return None;
        }
        &body[1..body.len() - 1]
    };

    if raw {
        return Some(inner.to_string());
    }

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    Some(out)
}
