#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]

mod lexer;
mod parser;
pub mod token;

pub use lexer::{tokenize, Lexer};
pub use parser::parse_str;
