/*!
# Rust Language Module

This Rust module provides lexical analysis of the Colt language.

*/

/// Byte range of a lexeme within its source line.
pub type Column = std::ops::Range<usize>;

/// 1-based source line.
pub type LineNumber = Option<usize>;

#[macro_use]
mod error;
mod lex;
mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::lex;
pub use lex::Scanner;
pub use token::Keyword;
pub use token::Operator;
pub use token::Token;
