use calc_core::{
    environment::prelude::{Environment, UserId},
    interpreter::prelude::Interpreter,
};

use crate::cli::{print_error, read_line, EXIT_COMMAND, PROMPT};

pub fn start(interpreter: &Interpreter, user: UserId) -> std::io::Result<()> {
	let mut env = Environment::new();

	while let Some(input) = read_line(PROMPT)? {
		if input.trim() == EXIT_COMMAND {
			return Ok(());
		}

		match interpreter.parse(&input, user, &mut env) {
			Ok(output) => {
				let text = output.to_string();

				if !text.is_empty() {
					println!("{text}");
				}
			},
			Err(err) => print_error(&err),
		}
	}

	Ok(())
}
