use super::error::{LexicalError, LexicalErrorType};
use super::token::Token;
use std::collections::VecDeque;
use std::str::FromStr;
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use crate::utils::prelude::SrcSpan;

pub type Spanned = (u32, Token, u32);
pub type LexResult = std::result::Result<Spanned, LexicalError>;

const KEYWORDS: [(&str, Token); 3] = [
	("sqrt", Token::Sqrt),
	("exp", Token::Exp),
	("log", Token::Log),
];

/// Keyword that `word` starts with, if any.
///
/// Keywords win over identifiers at the start of a word, so `logx` is `log` followed by `x`.
pub fn keyword_prefix(word: &str) -> Option<(&'static str, Token)> {
	KEYWORDS.iter()
		.find(|(keyword, _)| word.starts_with(keyword))
		.map(|(keyword, token)| (*keyword, token.clone()))
}

fn is_word_char(ch: char) -> bool {
	ch.is_ascii_alphabetic() || ch == '_'
}

#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
	position: u32,
	next_position: u32,
	end_position: u32,
	ch: Option<char>,
	next_ch: Option<char>,
	input: T,

	pending: VecDeque<Spanned>,
	finished: bool,
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
	pub fn new(input: T) -> Self {
		let mut lexer = Self {
			position: 0,
			next_position: 0,
			end_position: 0,
			ch: None,
			next_ch: None,
			input,

			pending: VecDeque::new(),
			finished: false,
		};

		lexer.next_char();
		lexer.next_char();

		lexer
	}

	pub fn next_token(&mut self) -> LexResult {
		if let Some(spanned) = self.pending.pop_front() {
			return Ok(spanned);
		}

		self.skip_trivia();

		let spanned = match self.ch {
			Some(ch) => match ch {
				'0'..='9' => return self.lex_number(),
				'-' if self.next_ch.is_some_and(|c| c.is_ascii_digit()) => return self.lex_number(),
				c if is_word_char(c) => self.lex_word(),
				'+' => self.eat_one_char(Token::Plus),
				'-' => self.eat_one_char(Token::Minus),
				'/' => self.eat_one_char(Token::Slash),
				'(' => self.eat_one_char(Token::LParen),
				')' => self.eat_one_char(Token::RParen),
				'*' => match self.next_ch {
					Some('*') => self.eat_two_chars(Token::Power),
					_ => self.eat_one_char(Token::Star),
				},
				'=' => match self.next_ch {
					Some('=') => self.eat_two_chars(Token::Equal),
					_ => self.eat_one_char(Token::Assign),
				},
				'>' => match self.next_ch {
					Some('=') => self.eat_two_chars(Token::GreaterThanOrEqual),
					_ => self.eat_one_char(Token::GreaterThan),
				},
				'<' => match self.next_ch {
					Some('=') => self.eat_two_chars(Token::LessThanOrEqual),
					_ => self.eat_one_char(Token::LessThan),
				},
				'!' if self.next_ch == Some('=') => self.eat_two_chars(Token::NotEqual),
				c => {
					let start = self.position;
					let end = start + c.len_utf8() as u32;

					return Err(LexicalError {
						error: LexicalErrorType::UnrecognizedToken { tok: c },
						location: SrcSpan::from(start, end),
					});
				}
			},
			None => self.eat_one_char(Token::Eof)
		};

		Ok(spanned)
	}

	/// Lexes the whole input, stopping at the first error.
	pub fn tokenize(mut self) -> Result<Vec<Spanned>, LexicalError> {
		let mut tokens = vec![];

		loop {
			let spanned = self.next_token()?;
			let is_eof = spanned.1 == Token::Eof;

			tokens.push(spanned);

			if is_eof {
				return Ok(tokens);
			}
		}
	}

	fn next_char(&mut self) -> Option<char> {
		let ch = self.ch;

		let (next_position, next) = match self.input.next() {
			Some((pos, ch)) => {
				self.end_position = pos + ch.len_utf8() as u32;

				(pos, Some(ch))
			},
			None => (self.end_position, None)
		};

		self.position = self.next_position;
		self.ch = self.next_ch;
		self.next_position = next_position;
		self.next_ch = next;

		ch
	}

	fn skip_trivia(&mut self) {
		loop {
			match self.ch {
				Some(' ' | '\t' | '\r' | '\n' | '\x0C') => {
					self.next_char();
				},
				// comment runs to the end of the line
				Some('#') => {
					while !matches!(self.ch, None | Some('\n')) {
						self.next_char();
					}
				},
				_ => return
			}
		}
	}

	fn eat_one_char(&mut self, token: Token) -> Spanned {
		let start_pos = self.position;
		self.next_char();
		let end_pos = self.position;

		(start_pos, token, end_pos)
	}

	fn eat_two_chars(&mut self, token: Token) -> Spanned {
		let start_pos = self.position;
		self.next_char();
		self.next_char();
		let end_pos = self.position;

		(start_pos, token, end_pos)
	}

	fn lex_word(&mut self) -> Spanned {
		let start_pos = self.position;
		let mut word = String::new();

		while let Some(ch) = self.ch.filter(|ch| is_word_char(*ch)) {
			word.push(ch);
			self.next_char();
		}

		let end_pos = self.position;

		// words are ASCII, so byte offsets follow char offsets
		let mut offset = 0;

		while offset < word.len() {
			let rest = &word[offset..];
			let start = start_pos + offset as u32;

			match keyword_prefix(rest) {
				Some((keyword, token)) => {
					offset += keyword.len();
					self.pending.push_back((start, token, start_pos + offset as u32));
				},
				None => {
					self.pending.push_back((start, Token::Ident(rest.to_string()), end_pos));
					break;
				}
			}
		}

		self.pending.pop_front()
			.unwrap_or((start_pos, Token::Ident(word), end_pos))
	}

	fn lex_number(&mut self) -> LexResult {
		let start_pos = self.position;
		let mut value = String::new();

		if self.ch == Some('-') {
			value.push('-');
			self.next_char();
		}

		self.read_digits(&mut value);

		let is_decimal = self.ch == Some('.')
			&& self.next_ch.is_some_and(|c| c.is_ascii_digit());

		if is_decimal {
			value.push('.');
			self.next_char();
			self.read_digits(&mut value);
		}

		let end_pos = self.position;

		let token = if is_decimal {
			BigDecimal::from_str(&value).map(Token::Decimal).ok()
		} else {
			BigInt::from_str(&value).map(Token::Int).ok()
		};

		match token {
			Some(token) => Ok((start_pos, token, end_pos)),
			None => Err(LexicalError {
				error: LexicalErrorType::InvalidNumber,
				location: SrcSpan::from(start_pos, end_pos)
			})
		}
	}

	fn read_digits(&mut self, value: &mut String) {
		while let Some(ch) = self.ch.filter(|ch| ch.is_ascii_digit()) {
			value.push(ch);
			self.next_char();
		}
	}
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
	type Item = LexResult;

	fn next(&mut self) -> Option<Self::Item> {
		if self.finished {
			return None;
		}

		let token = self.next_token();

		if matches!(token, Err(_) | Ok((_, Token::Eof, _))) {
			self.finished = true;
		}

		Some(token)
	}
}
