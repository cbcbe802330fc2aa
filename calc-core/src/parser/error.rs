use crate::{lexer::prelude::{LexicalError, Token}, utils::prelude::SrcSpan};

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
    ExpectedIdent,
    UnexpectedEof,
    UnexpectedToken {
        token: Token,
        expected: Vec<String>,
    },
    ChainedComparison,
    NestingTooDeep { limit: usize },
    LexError { error: LexicalError },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub error: ParseErrorType,
    pub span: SrcSpan
}

impl ParseError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            ParseErrorType::ExpectedIdent => ("Expected a variable name", vec![]),
            ParseErrorType::UnexpectedEof => ("Unexpected end of input", vec![]),
            ParseErrorType::UnexpectedToken { token, expected } => {
                let found = match token {
                    Token::Int(_) => "an integer".to_string(),
                    Token::Decimal(_) => "a decimal".to_string(),
                    Token::Ident(name) => format!("the variable `{name}`"),
                    _ if token.is_function() => format!("the function `{}`", token.as_literal()),
                    _ => format!("`{}`", token.as_literal())
                };

                let messages = std::iter::once(format!("Found {found}, expected one of: "))
                    .chain(expected.iter().map(|s| format!("- {s}")))
                    .collect();

                ("Not expected this", messages)
            },
            ParseErrorType::ChainedComparison => (
                "Comparisons cannot be chained",
                vec!["Compare two expressions at a time, e.g. `a < b`".to_string()]
            ),
            ParseErrorType::NestingTooDeep { limit } => (
                "Expression is nested too deeply",
                vec![format!("At most {limit} levels of nesting are allowed")]
            ),
            ParseErrorType::LexError { error } => error.details()
        }
    }
}
