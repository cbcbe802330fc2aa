
use std::rc::Rc;

use crate::{
    environment::prelude::{Environment, UserId},
    eval::prelude::{eval, EvalContext},
    format::prelude::{format, Output},
    lexer::prelude::{preprocess, Lexer, Spanned},
    parser::prelude::{parse_line, Node, DEFAULT_MAX_DEPTH},
    utils::prelude::{Error, LineWarningEmitter, NullWarningEmitterIO, WarningEmitter, WarningEmitterIO},
};

pub mod prelude {
    pub use super::{parse, Interpreter, Settings, DEFAULT_PRECISION};
}

/// Significant digits kept by exact division unless configured otherwise.
pub const DEFAULT_PRECISION: u64 = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Significant digits of an exact quotient. Zero is treated as one.
    pub precision: u64,
    pub max_depth: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

pub struct Interpreter {
    settings: Settings,
    warnings: WarningEmitter,
}

impl Interpreter {
    pub fn new(settings: Settings, warnings: Rc<dyn WarningEmitterIO>) -> Self {
        Self {
            settings,
            warnings: WarningEmitter::new(warnings),
        }
    }

    /// Warnings emitted since the interpreter was created.
    pub fn warning_count(&self) -> usize {
        self.warnings.count()
    }

    /// Evaluates one line against the table of `user`, creating it on first use.
    pub fn parse(&self, line: &str, user: UserId, env: &mut Environment) -> Result<Output, Error> {
        let table = env.set_user(user);
        let src = preprocess(line);

        let node = parse_line(&src, self.settings.max_depth)
            .map_err(|error| Error::from_parse(src.clone(), error))?;

        let warnings = LineWarningEmitter::new(src.clone(), &self.warnings);
        let context = EvalContext {
            precision: self.settings.precision,
            warnings: &warnings,
        };

        let value = eval(&node, table, &context)
            .map_err(|error| Error::Eval { src, error })?;

        Ok(format(value))
    }

    /// Tokens of a preprocessed line, ending with `Eof`.
    pub fn tokenize(&self, line: &str) -> Result<Vec<Spanned>, Error> {
        let src = preprocess(line);

        Lexer::new(src.char_indices().map(|(i, c)| (i as u32, c)))
            .tokenize()
            .map_err(|error| Error::Lex { src, error })
    }

    pub fn parse_tree(&self, line: &str) -> Result<Node, Error> {
        let src = preprocess(line);

        parse_line(&src, self.settings.max_depth)
            .map_err(|error| Error::from_parse(src, error))
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(Settings::default(), Rc::new(NullWarningEmitterIO))
    }
}

/// Evaluates one line for `user` with default settings, discarding warnings.
pub fn parse(line: &str, user: UserId, env: &mut Environment) -> Result<Output, Error> {
    Interpreter::default().parse(line, user, env)
}
