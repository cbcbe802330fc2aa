use std::sync::OnceLock;

use regex::Regex;

fn minus_after_digit() -> &'static Regex {
	static PATTERN: OnceLock<Regex> = OnceLock::new();

	PATTERN.get_or_init(|| Regex::new(r"([0-9])-([0-9])").expect("valid minus pattern"))
}

/// Textual patches applied to a line before it reaches the [`Lexer`](super::lexer::Lexer).
///
/// A literal may start with `-`, so `5-3` would lex as `5` followed by `-3`.
/// Every non-overlapping `<digit>-<digit>` is rewritten to `<digit>+-<digit>`,
/// which turns it back into a subtraction. Then `^` is spelled `**`.
///
/// Matches do not overlap: `5-3-2` becomes `5+-3-2`.
pub fn preprocess(line: &str) -> String {
	minus_after_digit()
		.replace_all(line, "${1}+-${2}")
		.replace('^', "**")
}
