pub mod error;
pub mod token;
pub mod lexer;
pub mod preprocess;

pub mod prelude {
	pub use super::{
		error::*,
		token::*,
		lexer::*,
		preprocess::*
	};
}

#[cfg(test)]
mod tests;
