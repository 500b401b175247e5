//! The Assembler module is in charge of taking one line
//! of source and producing an `ast::Ast` from it.
//!
//! It does this with a whitespace-splitting classifier
//! and a fixed-arity, position-based parser. Anything
//! that goes wrong is per-line and recoverable.

pub mod ast;
pub mod codegen;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod lexer;
pub mod parser;
