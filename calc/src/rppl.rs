use calc_core::{interpreter::prelude::Interpreter, parser::prelude::Postfix};

use crate::cli::{print_error, read_line, EXIT_COMMAND, PROMPT};

pub fn start(interpreter: &Interpreter, postfix: bool) -> std::io::Result<()> {
	while let Some(input) = read_line(PROMPT)? {
		match input.as_str() {
			"" => {},
			EXIT_COMMAND => return Ok(()),
			_ => match interpreter.parse_tree(&input) {
				Ok(node) if postfix => println!("{}", node.postfix()),
				Ok(node) => println!("{node}"),
				Err(err) => print_error(&err),
			}
		}
	}

	Ok(())
}
