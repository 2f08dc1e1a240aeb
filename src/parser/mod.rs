//! Source-level parsing of workflow DSL Python files.
//!
//! The linter never executes user code; it parses just enough of the
//! module surface (decorators, signatures, docstrings) to stand in for
//! runtime introspection.

mod literal;
mod python;
mod scan;

pub use literal::{parse_literal, parse_py_string, PyLiteral};
pub use python::{
    parse_module, ClassDef, Decorator, FunctionDef, Param, ParamDefault, ParamKind, ParseError,
    ParsedModule,
};
