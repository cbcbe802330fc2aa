pub mod lexer;
pub mod parser;
pub mod environment;
pub mod eval;
pub mod format;
pub mod interpreter;
pub mod utils;
