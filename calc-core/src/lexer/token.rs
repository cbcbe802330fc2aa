use bigdecimal::BigDecimal;
use num_bigint::BigInt;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // -?<digit>+
    Int(BigInt),
    // -?<digit>+ . <digit>+
    Decimal(BigDecimal),
    // (<letter>|_){<letter>|_}
    Ident(String),

    // Functions
    Sqrt, // sqrt
    Exp, // exp
    Log, // log

    // Arithmetic
    Plus, // +
    Minus, // -
    Star, // *
    Slash, // /
    Power, // ** (and ^ after preprocessing)

    // Comparison
    Equal, // ==
    NotEqual, // !=
    GreaterThan, // >
    LessThan, // <
    GreaterThanOrEqual, // >=
    LessThanOrEqual, // <=

    Assign, // =
    LParen, // (
    RParen, // )

    Eof,
}

impl Token {
    pub fn is_function(&self) -> bool {
        matches!(self, Token::Sqrt | Token::Exp | Token::Log)
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Token::Equal
            | Token::NotEqual
            | Token::GreaterThan
            | Token::LessThan
            | Token::GreaterThanOrEqual
            | Token::LessThanOrEqual
        )
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Token::Int(_) | Token::Decimal(_))
    }

    pub fn as_literal(&self) -> String {
        match self {
            Token::Int(value) => value.to_string(),
            Token::Decimal(value) => value.to_string(),
            Token::Ident(value) => value.clone(),

            Token::Sqrt => "sqrt".to_string(),
            Token::Exp => "exp".to_string(),
            Token::Log => "log".to_string(),

            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Star => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::Power => "**".to_string(),

            Token::Equal => "==".to_string(),
            Token::NotEqual => "!=".to_string(),
            Token::GreaterThan => ">".to_string(),
            Token::LessThan => "<".to_string(),
            Token::GreaterThanOrEqual => ">=".to_string(),
            Token::LessThanOrEqual => "<=".to_string(),

            Token::Assign => "=".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),

            Token::Eof => "end of input".to_string(),
        }
    }
}
