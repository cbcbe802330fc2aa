use calc_core::interpreter::prelude::Interpreter;

use crate::cli::{print_error, read_line, EXIT_COMMAND, PROMPT};

pub fn start(interpreter: &Interpreter) -> std::io::Result<()> {
	while let Some(input) = read_line(PROMPT)? {
		match input.as_str() {
			"" => {},
			EXIT_COMMAND => return Ok(()),
			_ => match interpreter.tokenize(&input) {
				Ok(tokens) => {
					for (start, token, end) in tokens {
						println!("{start:>3}..{end:<3} {token:?}");
					}
				},
				Err(err) => print_error(&err),
			}
		}
	}

	Ok(())
}
