use std::fmt::Display;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::{lexer::prelude::Token, utils::prelude::SrcSpan};

/// Reverse Polish rendering, used by the read-parse-print loop.
pub trait Postfix {
    fn postfix(&self) -> String;
}

// literal -> <int> | <decimal>
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(BigInt),
    Decimal(BigDecimal),
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Decimal(value) => write!(f, "{value}"),
        }
    }
}

impl Literal {
    pub fn from_token(token: Token) -> Option<Self> {
        match token {
            Token::Int(value) => Some(Self::Int(value)),
            Token::Decimal(value) => Some(Self::Decimal(value)),
            _ => None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

impl BinaryOperator {
    pub fn from_token(token: &Token) -> Option<Self> {
        Some(match token {
            Token::Plus => Self::Add,
            Token::Minus => Self::Sub,
            Token::Star => Self::Mul,
            Token::Slash => Self::Div,
            Token::Power => Self::Pow,
            Token::Equal => Self::Equal,
            Token::NotEqual => Self::NotEqual,
            Token::GreaterThan => Self::GreaterThan,
            Token::LessThan => Self::LessThan,
            Token::GreaterThanOrEqual => Self::GreaterThanOrEqual,
            Token::LessThanOrEqual => Self::LessThanOrEqual,
            _ => return None
        })
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Self::Equal
            | Self::NotEqual
            | Self::GreaterThan
            | Self::LessThan
            | Self::GreaterThanOrEqual
            | Self::LessThanOrEqual
        )
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "**",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::GreaterThan => ">",
            Self::LessThan => "<",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThanOrEqual => "<=",
        }
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sqrt,
    Exp,
    Log,
}

impl Function {
    pub fn from_token(token: &Token) -> Option<Self> {
        match token {
            Token::Sqrt => Some(Self::Sqrt),
            Token::Exp => Some(Self::Exp),
            Token::Log => Some(Self::Log),
            _ => None
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sqrt => "sqrt",
            Self::Exp => "exp",
            Self::Log => "log",
        }
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// line -> <empty> | <identifier> = <comparison> | <comparison>
// comparison -> <expression> [<cmp> <expression>]
// expression -> <primary> {<operator> <primary>}
// primary -> <number> [e <int> | <identifier>] | <identifier> | <function> ( <expression> ) | ( <expression> )
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Literal {
        value: Literal,
        location: SrcSpan
    },
    VarRef {
        name: String,
        location: SrcSpan
    },
    BinaryOp {
        operator: BinaryOperator,
        left: Box<Node>,
        right: Box<Node>,
        location: SrcSpan
    },
    UnaryFunc {
        function: Function,
        argument: Box<Node>,
        location: SrcSpan
    },
    Assign {
        name: String,
        value: Box<Node>,
        location: SrcSpan
    },
    Empty,
}

impl Node {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Literal { location, .. }
            | Self::VarRef { location, .. }
            | Self::BinaryOp { location, .. }
            | Self::UnaryFunc { location, .. }
            | Self::Assign { location, .. } => *location,
            Self::Empty => SrcSpan::default()
        }
    }

    pub fn binary(operator: BinaryOperator, left: Node, right: Node) -> Self {
        let location = left.location().join(right.location());

        Self::BinaryOp {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            location
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal { value, .. } => write!(f, "{value}"),
            Self::VarRef { name, .. } => write!(f, "{name}"),
            Self::BinaryOp { operator, left, right, .. } => write!(f, "({left} {operator} {right})"),
            Self::UnaryFunc { function, argument, .. } => write!(f, "{function}({argument})"),
            Self::Assign { name, value, .. } => write!(f, "{name} = {value}"),
            Self::Empty => Ok(())
        }
    }
}

impl Postfix for Node {
    fn postfix(&self) -> String {
        match self {
            Self::Literal { value, .. } => format!("{value}"),
            Self::VarRef { name, .. } => name.clone(),
            Self::BinaryOp { operator, left, right, .. } => {
                format!("{} {} {}", left.postfix(), right.postfix(), operator)
            },
            Self::UnaryFunc { function, argument, .. } => {
                format!("{} {}", argument.postfix(), function)
            },
            Self::Assign { name, value, .. } => format!("{name} {} =", value.postfix()),
            Self::Empty => String::new()
        }
    }
}
