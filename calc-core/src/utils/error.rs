use termcolor::Buffer;
use thiserror::Error;

use crate::{
    eval::prelude::EvalError,
    lexer::prelude::LexicalError,
    parser::prelude::{ParseError, ParseErrorType},
    utils::prelude::SrcSpan,
};
use super::diagnostic::{Diagnostic, Label, Level, Location, INPUT_NAME};

/// Category a host reports a failed line under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lex,
    Syntax,
    /// Undefined variable.
    Name,
    /// Arithmetic without a real result, or a non-number in arithmetic.
    Domain,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("failed to lex input")]
    Lex {
        src: String,
        error: LexicalError
    },
    #[error("failed to parse input")]
    Parse {
        src: String,
        error: ParseError
    },
    #[error("evaluation failed")]
    Eval {
        src: String,
        error: EvalError
    },
}

impl Error {
    /// Lex errors surfacing through the parser are reported as lex errors.
    pub fn from_parse(src: String, error: ParseError) -> Self {
        match error.error {
            ParseErrorType::LexError { error } => Error::Lex { src, error },
            _ => Error::Parse { src, error }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Lex { .. } => ErrorKind::Lex,
            Error::Parse { .. } => ErrorKind::Syntax,
            Error::Eval { error, .. } if error.is_name_error() => ErrorKind::Name,
            Error::Eval { .. } => ErrorKind::Domain,
        }
    }

    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);
        String::from_utf8(nocolor.into_inner()).expect("Error printing produced invalid utf8")
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        use std::io::Write;

        for diagnostic in self.to_diagnostics() {
            diagnostic.write(buf);
            writeln!(buf).expect("write new line diagnostic");
        }
    }

    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            Error::Lex { src, error } => {
                let (label, extra) = error.details();

                vec![Diagnostic {
                    title: "Lexical error".into(),
                    text: extra.join("\n"),
                    hint: None,
                    level: Level::Error,
                    location: Some(Location {
                        src,
                        name: INPUT_NAME,
                        label: Label {
                            text: Some(label.to_string()),
                            span: error.location,
                        },
                        extra_labels: vec![],
                    }),
                }]
            },
            Error::Parse { src, error } => {
                let (label, extra) = error.details();

                let adjusted_location = if error.error == ParseErrorType::UnexpectedEof {
                    SrcSpan::point(src.len() as u32)
                } else {
                    error.span
                };

                vec![Diagnostic {
                    title: "Syntax error".into(),
                    text: extra.join("\n"),
                    hint: None,
                    level: Level::Error,
                    location: Some(Location {
                        src,
                        name: INPUT_NAME,
                        label: Label {
                            text: Some(label.to_string()),
                            span: adjusted_location,
                        },
                        extra_labels: vec![],
                    }),
                }]
            },
            Error::Eval { src, error } => {
                let (label, extra) = error.details();

                let title = if error.is_name_error() {
                    "Name error"
                } else {
                    "Math domain error"
                };

                vec![Diagnostic {
                    title: title.into(),
                    text: extra.join("\n"),
                    hint: error.hint(),
                    level: Level::Error,
                    location: Some(Location {
                        src,
                        name: INPUT_NAME,
                        label: Label {
                            text: Some(label.to_string()),
                            span: error.location,
                        },
                        extra_labels: vec![],
                    }),
                }]
            },
        }
    }
}
