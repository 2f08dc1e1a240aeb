//! Python module-surface parser.
//!
//! Parses a source file far enough to enumerate its top-level functions
//! and classes with decorators, signatures, return annotations and
//! docstrings. Function bodies are never interpreted; this is the
//! source-level counterpart of runtime signature introspection.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::literal::{parse_literal, parse_py_string, PyLiteral};
use super::scan::{find_matching, find_top_level, split_top_level, ScanState};
use crate::meta::ParamSpec;

/// Parse failure with the physical line it was detected on.
#[derive(Debug, Error)]
#[error("line {line}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

impl ParseError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self { line, message: message.into() }
    }
}

/// A decorator applied to a function or class.
#[derive(Debug, Clone, PartialEq)]
pub struct Decorator {
    /// Decorator name (`activity` in `@activity(...)`)
    pub name: String,

    /// Call arguments as `(keyword, raw value text)`; positional
    /// arguments have no keyword.
    pub args: Vec<(Option<String>, String)>,
}

impl Decorator {
    /// Raw text of the keyword argument `key`, if present.
    pub fn kwarg(&self, key: &str) -> Option<&str> {
        self.args
            .iter()
            .find(|(k, _)| k.as_deref() == Some(key))
            .map(|(_, v)| v.as_str())
    }

    /// Keyword argument parsed as a string literal.
    pub fn kwarg_str(&self, key: &str) -> Option<String> {
        parse_py_string(self.kwarg(key)?)
    }

    /// Raw text of the `index`-th positional argument.
    pub fn positional(&self, index: usize) -> Option<&str> {
        self.args
            .iter()
            .filter(|(k, _)| k.is_none())
            .nth(index)
            .map(|(_, v)| v.as_str())
    }
}

/// How a parameter binds its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Regular,
    /// `*args`
    VarArgs,
    /// `**kwargs`
    VarKwargs,
}

/// A parameter's default value expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamDefault {
    /// A structured `Parameter(...)` descriptor
    Structured(ParamSpec),
    /// A plain literal default
    Literal(PyLiteral),
    /// Anything else, kept as source text
    Raw(String),
}

/// One entry of a function's parameter list.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub kind: ParamKind,
    pub annotation: Option<String>,
    pub default: Option<ParamDefault>,
}

/// A parsed `def` or `async def`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    pub is_async: bool,
    pub decorators: Vec<Decorator>,

    /// `None` when the parameter list could not be introspected.
    pub signature: Option<Vec<Param>>,

    pub return_annotation: Option<String>,
    pub docstring: Option<String>,
}

impl FunctionDef {
    /// Look up a decorator by name.
    pub fn decorator(&self, name: &str) -> Option<&Decorator> {
        self.decorators.iter().find(|d| d.name == name)
    }

    /// Whether the signature has a regular parameter with this name.
    pub fn has_param(&self, name: &str) -> bool {
        self.signature
            .as_ref()
            .is_some_and(|params| params.iter().any(|p| p.name == name))
    }

    /// Whether the signature has a `**kwargs`-style catch-all.
    pub fn has_var_kwargs(&self) -> bool {
        self.signature
            .as_ref()
            .is_some_and(|params| params.iter().any(|p| p.kind == ParamKind::VarKwargs))
    }

    /// Renders the parameter list back as `(a, b=1, **kwargs)` source.
    pub fn signature_text(&self) -> String {
        let Some(params) = &self.signature else {
            return "(...)".to_string();
        };
        let rendered: Vec<String> = params
            .iter()
            .map(|p| {
                let mut s = match p.kind {
                    ParamKind::Regular => p.name.clone(),
                    ParamKind::VarArgs => format!("*{}", p.name),
                    ParamKind::VarKwargs => format!("**{}", p.name),
                };
                if let Some(anno) = &p.annotation {
                    s.push_str(": ");
                    s.push_str(anno);
                }
                match &p.default {
                    Some(ParamDefault::Literal(lit)) => {
                        s.push('=');
                        s.push_str(&lit.to_string());
                    }
                    Some(ParamDefault::Structured(_)) => s.push_str("=Parameter(...)"),
                    Some(ParamDefault::Raw(text)) => {
                        s.push('=');
                        s.push_str(text);
                    }
                    None => {}
                }
                s
            })
            .collect();
        format!("({})", rendered.join(", "))
    }
}

/// A parsed top-level `class`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    pub name: String,
    pub decorators: Vec<Decorator>,
    pub methods: Vec<FunctionDef>,
    pub docstring: Option<String>,
}

impl ClassDef {
    /// Look up a decorator by name.
    pub fn decorator(&self, name: &str) -> Option<&Decorator> {
        self.decorators.iter().find(|d| d.name == name)
    }

    /// Look up a method by name.
    pub fn method(&self, name: &str) -> Option<&FunctionDef> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// The enumerable symbol table of one parsed source file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedModule {
    pub functions: Vec<FunctionDef>,
    pub classes: Vec<ClassDef>,
}

/// One logical statement, possibly joined from several physical lines.
#[derive(Debug)]
struct LogicalLine {
    text: String,
    indent: usize,
    line_no: usize,
}

static DEF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(async\s+)?def\s+([A-Za-z_]\w*)\s*").unwrap());
static CLASS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^class\s+([A-Za-z_]\w*)\s*(?:\(([^)]*)\))?\s*:").unwrap());
static IDENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_]\w*$").unwrap());

/// Parse Python source into its module-level symbol table.
pub fn parse_module(source: &str) -> Result<ParsedModule, ParseError> {
    let lines = logical_lines(source)?;
    let mut module = ParsedModule::default();

    let mut i = 0;
    let mut pending: Vec<Decorator> = Vec::new();
    let mut pending_line = 0;

    while i < lines.len() {
        let line = &lines[i];

        if line.indent > 0 {
            // Nested statement; module members live at indent zero.
            i += 1;
            continue;
        }

        let text = line.text.trim_start();

        if let Some(rest) = text.strip_prefix('@') {
            pending.push(parse_decorator(rest, line.line_no)?);
            pending_line = line.line_no;
            i += 1;
            continue;
        }

        if DEF_RE.is_match(text) {
            let mut func = parse_function_header(text, line.line_no)?;
            func.decorators = std::mem::take(&mut pending);
            func.docstring = block_docstring(&lines, i + 1, line.indent);
            module.functions.push(func);
            i = skip_block(&lines, i + 1, line.indent);
            continue;
        }

        if text.starts_with("class ") || text == "class" {
            let caps = CLASS_RE
                .captures(text)
                .ok_or_else(|| ParseError::new(line.line_no, "invalid class definition"))?;
            let end = skip_block(&lines, i + 1, line.indent);
            let body = &lines[i + 1..end];
            let mut class = parse_class_body(caps[1].to_string(), body)?;
            class.decorators = std::mem::take(&mut pending);
            module.classes.push(class);
            i = end;
            continue;
        }

        if !pending.is_empty() {
            return Err(ParseError::new(
                pending_line,
                "expected function or class definition after decorator",
            ));
        }

        i += 1;
    }

    if !pending.is_empty() {
        return Err(ParseError::new(
            pending_line,
            "expected function or class definition after decorator",
        ));
    }

    Ok(module)
}

/// Join physical lines into logical statements, validating bracket and
/// string nesting along the way.
fn logical_lines(source: &str) -> Result<Vec<LogicalLine>, ParseError> {
    let mut out = Vec::new();
    let mut state = ScanState::new();
    let mut current = String::new();
    let mut start_line = 0;
    let mut start_indent = 0;

    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;

        if !state.pending() {
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            start_line = line_no;
            start_indent = raw.len() - raw.trim_start().len();
            current.clear();
        } else {
            current.push('\n');
        }

        state.feed(raw);
        if state.unbalanced() {
            return Err(ParseError::new(line_no, "unmatched closing bracket"));
        }
        current.push_str(raw);

        if state.complete() {
            out.push(LogicalLine {
                text: current.clone(),
                indent: start_indent,
                line_no: start_line,
            });
            state = ScanState::new();
        }
    }

    if state.pending() {
        return Err(ParseError::new(
            source.lines().count(),
            "unexpected end of file while parsing",
        ));
    }

    Ok(out)
}

/// Index of the first line at or below `indent` after `start`.
fn skip_block(lines: &[LogicalLine], start: usize, indent: usize) -> usize {
    let mut i = start;
    while i < lines.len() && lines[i].indent > indent {
        i += 1;
    }
    i
}

/// Docstring of the block opening after `start`, if its first statement
/// is a string literal.
fn block_docstring(lines: &[LogicalLine], start: usize, indent: usize) -> Option<String> {
    let first = lines.get(start)?;
    if first.indent <= indent {
        return None;
    }
    parse_py_string(first.text.trim()).map(|s| s.trim().to_string())
}

fn parse_decorator(text: &str, line_no: usize) -> Result<Decorator, ParseError> {
    let text = text.trim();

    let Some(open) = text.find('(') else {
        // Bare decorator like `@staticmethod`
        let name = text.trim();
        if name.is_empty() {
            return Err(ParseError::new(line_no, "invalid decorator"));
        }
        return Ok(Decorator { name: name.to_string(), args: Vec::new() });
    };

    let name = text[..open].trim().to_string();
    if name.is_empty() {
        return Err(ParseError::new(line_no, "invalid decorator"));
    }
    let close = find_matching(text, open)
        .ok_or_else(|| ParseError::new(line_no, "unterminated decorator arguments"))?;

    let mut args = Vec::new();
    let inner = &text[open + 1..close];
    if !inner.trim().is_empty() {
        for part in split_top_level(inner, ',') {
            let part = part.trim();
            if part.is_empty() {
                continue; // trailing comma
            }
            match find_top_level(part, '=') {
                Some(eq) if IDENT_RE.is_match(part[..eq].trim()) => {
                    args.push((
                        Some(part[..eq].trim().to_string()),
                        part[eq + 1..].trim().to_string(),
                    ));
                }
                _ => args.push((None, part.to_string())),
            }
        }
    }

    Ok(Decorator { name, args })
}

fn parse_function_header(text: &str, line_no: usize) -> Result<FunctionDef, ParseError> {
    let caps = DEF_RE
        .captures(text)
        .ok_or_else(|| ParseError::new(line_no, "invalid function definition"))?;
    let is_async = caps.get(1).is_some();
    let name = caps[2].to_string();

    let header = &text[caps.get(0).unwrap().end()..];
    let open = header
        .find('(')
        .ok_or_else(|| ParseError::new(line_no, "invalid function definition"))?;
    let close = find_matching(header, open)
        .ok_or_else(|| ParseError::new(line_no, "invalid function definition"))?;

    let signature = parse_params(&header[open + 1..close]);

    let tail = header[close + 1..].trim();
    let return_annotation = tail.strip_prefix("->").and_then(|rest| {
        let anno = rest.trim().trim_end_matches(':').trim();
        (!anno.is_empty()).then(|| anno.to_string())
    });

    Ok(FunctionDef {
        name,
        is_async,
        decorators: Vec::new(),
        signature,
        return_annotation,
        docstring: None,
    })
}

/// Parse a parameter list. Returns `None` when any entry falls outside
/// the supported grammar; an unintrospectable signature is not an error.
fn parse_params(text: &str) -> Option<Vec<Param>> {
    let mut params = Vec::new();

    for chunk in split_top_level(text, ',') {
        let chunk = chunk.trim().replace('\n', " ");
        if chunk.is_empty() {
            continue;
        }

        // Positional-only / keyword-only markers carry no name
        if chunk == "*" || chunk == "/" {
            continue;
        }

        let (kind, rest) = if let Some(rest) = chunk.strip_prefix("**") {
            (ParamKind::VarKwargs, rest)
        } else if let Some(rest) = chunk.strip_prefix('*') {
            (ParamKind::VarArgs, rest)
        } else {
            (ParamKind::Regular, chunk.as_str())
        };

        let eq = find_top_level(rest, '=');
        let (head, default_text) = match eq {
            Some(idx) => (&rest[..idx], Some(rest[idx + 1..].trim())),
            None => (rest, None),
        };

        let colon = find_top_level(head, ':');
        let (name, annotation) = match colon {
            Some(idx) => {
                let anno = head[idx + 1..].trim();
                (head[..idx].trim(), (!anno.is_empty()).then(|| anno.to_string()))
            }
            None => (head.trim(), None),
        };

        if !IDENT_RE.is_match(name) {
            return None;
        }

        let default = default_text.map(parse_default);
        params.push(Param { name: name.to_string(), kind, annotation, default });
    }

    Some(params)
}

fn parse_default(text: &str) -> ParamDefault {
    let text = text.trim();
    if text.starts_with("Parameter(") || text.starts_with("Parameter (") {
        if let Some(spec) = parse_param_spec(text) {
            return ParamDefault::Structured(spec);
        }
    }
    match parse_literal(text) {
        Some(lit) => ParamDefault::Literal(lit),
        None => ParamDefault::Raw(text.to_string()),
    }
}

/// Parse a `Parameter(...)` call expression into a descriptor.
fn parse_param_spec(text: &str) -> Option<ParamSpec> {
    let open = text.find('(')?;
    let close = find_matching(text, open)?;
    let inner = &text[open + 1..close];

    let mut spec = ParamSpec::default();
    let mut positional = 0usize;

    for part in split_top_level(inner, ',') {
        let part = part.trim().replace('\n', " ");
        if part.is_empty() {
            continue;
        }

        let (key, value) = match find_top_level(&part, '=') {
            Some(eq) if IDENT_RE.is_match(part[..eq].trim()) => {
                (part[..eq].trim().to_string(), part[eq + 1..].trim().to_string())
            }
            _ => {
                // `label` is the only positional argument
                if positional > 0 {
                    return None;
                }
                positional += 1;
                ("label".to_string(), part.clone())
            }
        };

        match key.as_str() {
            "label" => spec.label = parse_py_string(&value)?,
            "description" => spec.description = parse_py_string(&value)?,
            "required" => spec.required = parse_literal(&value)?.as_bool()?,
            "template" => spec.template = parse_literal(&value)?.as_bool()?,
            "secret" => spec.secret = parse_literal(&value)?.as_bool()?,
            "default" => {
                spec.default = match parse_literal(&value)? {
                    PyLiteral::None => None,
                    lit => Some(lit),
                };
            }
            "options" => {
                spec.options = match parse_literal(&value)? {
                    PyLiteral::None => None,
                    PyLiteral::List(items) => Some(items),
                    _ => return None,
                };
            }
            "validation" => {
                spec.validation = match parse_literal(&value)? {
                    PyLiteral::None => None,
                    lit => Some(lit.as_str()?.to_string()),
                };
            }
            _ => return None,
        }
    }

    Some(spec)
}

/// Parse the body of a class: docstring plus methods.
fn parse_class_body(name: String, body: &[LogicalLine]) -> Result<ClassDef, ParseError> {
    let mut class =
        ClassDef { name, decorators: Vec::new(), methods: Vec::new(), docstring: None };

    let Some(first) = body.first() else {
        return Ok(class);
    };
    let base = first.indent;
    class.docstring = parse_py_string(first.text.trim()).map(|s| s.trim().to_string());

    let mut i = 0;
    let mut pending: Vec<Decorator> = Vec::new();
    let mut pending_line = 0;

    while i < body.len() {
        let line = &body[i];
        if line.indent > base {
            i += 1;
            continue;
        }

        let text = line.text.trim_start();

        if let Some(rest) = text.strip_prefix('@') {
            pending.push(parse_decorator(rest, line.line_no)?);
            pending_line = line.line_no;
            i += 1;
            continue;
        }

        if DEF_RE.is_match(text) {
            let mut method = parse_function_header(text, line.line_no)?;
            method.decorators = std::mem::take(&mut pending);
            method.docstring = block_docstring(body, i + 1, line.indent);
            class.methods.push(method);
            i = skip_block(body, i + 1, line.indent);
            continue;
        }

        if !pending.is_empty() {
            return Err(ParseError::new(
                pending_line,
                "expected function or class definition after decorator",
            ));
        }

        i += 1;
    }

    if !pending.is_empty() {
        return Err(ParseError::new(
            pending_line,
            "expected function or class definition after decorator",
        ));
    }

    Ok(class)
}
