/*!
## Language module

Lexical analysis and per-line parsing of the drawing language.

*/

#[macro_use]
mod error;
mod lex;
mod parse;
mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::lex;
pub use parse::parse;

pub mod ast;

/// Character span of a token or statement within its source line.
pub type Column = std::ops::Range<usize>;

/// 1-based source line, `None` while an error has not been located yet.
pub type LineNumber = Option<usize>;
