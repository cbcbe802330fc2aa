use num_bigint::BigInt;

use crate::{lexer::prelude::{LexResult, LexicalError, Lexer, Spanned, Token}, utils::prelude::SrcSpan};
use super::error::{ParseError, ParseErrorType};
use super::ast::{BinaryOperator, Function, Literal, Node};

pub const DEFAULT_MAX_DEPTH: usize = 256;

/// What follows a numeric literal inside a primary.
enum NumberSuffix {
    /// `e` then an integer: standard form.
    StandardForm,
    /// Any other identifier: implicit multiplication.
    Variable,
    None,
}

pub struct Parser<T: Iterator<Item = LexResult>> {
    pub current_token: Option<Spanned>,
    pub next_token: Option<Spanned>,
    pub lex_errors: Vec<LexicalError>,

    max_depth: usize,
    depth: usize,
    tokens: T,
}

impl<T: Iterator<Item = LexResult>> Parser<T> {
    pub fn new(input: T) -> Self {
        Self::with_max_depth(input, DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(input: T, max_depth: usize) -> Self {
        let mut parser = Self {
            current_token: None,
            next_token: None,
            lex_errors: vec![],

            max_depth,
            depth: 0,
            tokens: input,
        };

        parser.step();
        parser.step();

        parser
    }

    pub fn step(&mut self) {
        let _ = self.next_token();
    }

    pub fn next_token(&mut self) -> Option<Spanned> {
        let t = self.current_token.take();

        let next = match self.tokens.next() {
            Some(Ok(tok)) => Some(tok),
            Some(Err(err)) => {
                self.lex_errors.push(err);

                None
            },
            None => None
        };

        self.current_token = self.next_token.take();
        self.next_token = next;

        t
    }

    pub fn current_precedence(&self) -> Precedence {
        match &self.current_token {
            Some((_, token, _)) => Precedence::from(token),
            None => Precedence::Lowest
        }
    }

    /// Parses one line. Lexical errors take priority over whatever the grammar
    /// reported, since they cut the token stream short.
    pub fn parse(&mut self) -> Result<Node, ParseError> {
        let node = self.parse_line();

        if let Some(error) = self.lex_errors.first() {
            return parse_error(
                ParseErrorType::LexError { error: *error },
                error.location
            );
        }

        node
    }

    fn parse_line(&mut self) -> Result<Node, ParseError> {
        let is_assignment = matches!(
            (&self.current_token, &self.next_token),
            (Some((_, Token::Ident(_), _)), Some((_, Token::Assign, _)))
        );

        match &self.current_token {
            Some((_, Token::Eof, _)) => return Ok(Node::Empty),
            _ if is_assignment => return self.parse_assignment(),
            _ => {}
        }

        let node = self.parse_comparison()?;
        self.expect_eof()?;

        Ok(node)
    }

    fn parse_assignment(&mut self) -> Result<Node, ParseError> {
        let (start, name, _) = self.expect_ident()?;
        self.expect_one(Token::Assign)?;

        let value = self.parse_comparison()?;
        self.expect_eof()?;

        let location = SrcSpan::from(start, value.location().end);

        Ok(Node::Assign {
            name,
            value: Box::new(value),
            location
        })
    }

    fn parse_comparison(&mut self) -> Result<Node, ParseError> {
        let left = self.parse_expression(Precedence::Lowest)?;

        let operator = match &self.current_token {
            Some((_, token, _)) if token.is_comparison() => BinaryOperator::from_token(token),
            _ => None
        };

        let Some(operator) = operator else {
            return Ok(left);
        };

        self.step();

        let right = self.parse_expression(Precedence::Lowest)?;

        if let Some((start, token, end)) = &self.current_token {
            if token.is_comparison() {
                return parse_error(
                    ParseErrorType::ChainedComparison,
                    SrcSpan::from(*start, *end)
                );
            }
        }

        Ok(Node::binary(operator, left, right))
    }

    /// Every operator folded into `left` deepens the tree by one level, so it
    /// counts towards the nesting limit like a parenthesised group does.
    pub fn parse_expression(&mut self, precedence: Precedence) -> Result<Node, ParseError> {
        self.enter()?;
        let mut levels = 1;

        let mut left = self.parse_primary()?;

        while precedence < self.current_precedence() {
            let operator_precedence = self.current_precedence();

            let operator = match self.next_token() {
                Some((_, token, _)) => BinaryOperator::from_token(&token),
                None => None
            };

            let Some(operator) = operator else {
                break;
            };

            let right = self.parse_expression(operator_precedence)?;

            self.enter()?;
            levels += 1;

            left = Node::binary(operator, left, right);
        }

        self.depth -= levels;

        Ok(left)
    }

    fn parse_primary(&mut self) -> Result<Node, ParseError> {
        match &self.current_token {
            Some((_, Token::Int(_) | Token::Decimal(_), _)) => self.parse_number(),
            Some((_, Token::Ident(_), _)) => {
                let (start, name, end) = self.expect_ident()?;

                Ok(Node::VarRef { name, location: SrcSpan::from(start, end) })
            },
            Some((_, token, _)) if token.is_function() => self.parse_function_call(),
            Some((_, Token::LParen, _)) => {
                self.expect_one(Token::LParen)?;

                let expression = self.parse_expression(Precedence::Lowest)?;

                self.expect_one(Token::RParen)?;

                Ok(expression)
            },
            Some((start, Token::Eof, end)) => parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan::from(*start, *end)
            ),
            Some((start, token, end)) => parse_error(
                ParseErrorType::UnexpectedToken {
                    token: token.clone(),
                    expected: vec![
                        "a number".to_string(),
                        "a variable".to_string(),
                        "a function call".to_string(),
                        "`(`".to_string(),
                    ]
                },
                SrcSpan::from(*start, *end)
            ),
            None => parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan::default()
            )
        }
    }

    // <number> e <int> is standard form, <number> <identifier> is implicit multiplication
    fn parse_number(&mut self) -> Result<Node, ParseError> {
        let (start, token, end) = match self.next_token() {
            Some(spanned) => spanned,
            None => return parse_error(ParseErrorType::UnexpectedEof, SrcSpan::default())
        };

        let literal = match Literal::from_token(token.clone()) {
            Some(value) => Node::Literal { value, location: SrcSpan::from(start, end) },
            None => return parse_error(
                ParseErrorType::UnexpectedToken {
                    token,
                    expected: vec!["a number".to_string()]
                },
                SrcSpan::from(start, end)
            )
        };

        let suffix = match (&self.current_token, &self.next_token) {
            (Some((_, Token::Ident(name), _)), Some((_, Token::Int(_), _))) if name == "e" => {
                NumberSuffix::StandardForm
            },
            (Some((_, Token::Ident(_), _)), _) => NumberSuffix::Variable,
            _ => NumberSuffix::None
        };

        match suffix {
            NumberSuffix::StandardForm => {
                let (e_start, _, e_end) = self.expect_ident()?;

                let exponent = match self.next_token() {
                    Some((start, Token::Int(value), end)) => Node::Literal {
                        value: Literal::Int(value),
                        location: SrcSpan::from(start, end)
                    },
                    _ => return parse_error(ParseErrorType::UnexpectedEof, SrcSpan::from(e_start, e_end))
                };

                let base = Node::Literal {
                    value: Literal::Int(BigInt::from(10)),
                    location: SrcSpan::from(e_start, e_end)
                };

                Ok(Node::binary(
                    BinaryOperator::Mul,
                    literal,
                    Node::binary(BinaryOperator::Pow, base, exponent)
                ))
            },
            NumberSuffix::Variable => {
                let (start, name, end) = self.expect_ident()?;

                Ok(Node::binary(
                    BinaryOperator::Mul,
                    literal,
                    Node::VarRef { name, location: SrcSpan::from(start, end) }
                ))
            },
            NumberSuffix::None => Ok(literal)
        }
    }

    fn parse_function_call(&mut self) -> Result<Node, ParseError> {
        let (start, token, end) = match self.next_token() {
            Some(spanned) => spanned,
            None => return parse_error(ParseErrorType::UnexpectedEof, SrcSpan::default())
        };

        let Some(function) = Function::from_token(&token) else {
            return parse_error(
                ParseErrorType::UnexpectedToken {
                    token,
                    expected: vec!["`sqrt`, `exp` or `log`".to_string()]
                },
                SrcSpan::from(start, end)
            );
        };

        self.expect_one(Token::LParen)?;

        let argument = self.parse_expression(Precedence::Lowest)?;

        let (_, end) = self.expect_one(Token::RParen)?;

        Ok(Node::UnaryFunc {
            function,
            argument: Box::new(argument),
            location: SrcSpan::from(start, end)
        })
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;

        if self.depth > self.max_depth {
            let span = match &self.current_token {
                Some((start, _, end)) => SrcSpan::from(*start, *end),
                None => SrcSpan::default()
            };

            return parse_error(
                ParseErrorType::NestingTooDeep { limit: self.max_depth },
                span
            );
        }

        Ok(())
    }

    pub fn expect_one(&mut self, token: Token) -> Result<(u32, u32), ParseError> {
        match self.current_token.take() {
            Some((start, tok, end)) if tok == token => {
                self.step();
                Ok((start, end))
            },
            Some((start, Token::Eof, end)) => {
                self.current_token = Some((start, Token::Eof, end));

                parse_error(
                    ParseErrorType::UnexpectedEof,
                    SrcSpan::from(start, end)
                )
            },
            Some(t) => {
                let (start, tok, end) = t.clone();
                self.current_token = Some(t);

                parse_error(
                    ParseErrorType::UnexpectedToken {
                        token: tok,
                        expected: vec![format!("`{}`", token.as_literal())],
                    },
                    SrcSpan::from(start, end)
                )
            },
            None => parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan::default()
            )
        }
    }

    pub fn expect_ident(&mut self) -> Result<(u32, String, u32), ParseError> {
        match self.current_token.take() {
            Some((start, Token::Ident(value), end)) => {
                self.step();
                Ok((start, value, end))
            },
            Some(t) => {
                let (start, _, end) = t.clone();
                self.current_token = Some(t);

                parse_error(
                    ParseErrorType::ExpectedIdent,
                    SrcSpan::from(start, end)
                )
            },
            None => parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan::default()
            )
        }
    }

    fn expect_eof(&mut self) -> Result<(), ParseError> {
        match &self.current_token {
            Some((_, Token::Eof, _)) => Ok(()),
            Some((start, token, end)) => parse_error(
                ParseErrorType::UnexpectedToken {
                    token: token.clone(),
                    expected: vec![
                        "an operator".to_string(),
                        "end of input".to_string(),
                    ]
                },
                SrcSpan::from(*start, *end)
            ),
            None => parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan::default()
            )
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Precedence {
    Lowest,
    Sum,
    Product,
    Power,
}

impl From<&Token> for Precedence {
    fn from(value: &Token) -> Self {
        match value {
            Token::Plus | Token::Minus => Self::Sum,
            Token::Star | Token::Slash => Self::Product,
            Token::Power => Self::Power,
            _ => Self::Lowest,
        }
    }
}

/// Lexes and parses one already preprocessed line.
pub fn parse_line(src: &str, max_depth: usize) -> Result<Node, ParseError> {
    let lexer = Lexer::new(src.char_indices().map(|(i, c)| (i as u32, c)));
    let mut parser = Parser::with_max_depth(lexer, max_depth);

    parser.parse()
}

pub fn parse_error<T>(error: ParseErrorType, span: SrcSpan) -> Result<T, ParseError> {
    Err(ParseError { error, span })
}
