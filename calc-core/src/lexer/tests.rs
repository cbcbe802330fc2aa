use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use super::prelude::{preprocess, Lexer, LexicalError, LexicalErrorType, Token};

fn lex(input: &str) -> Result<Vec<Token>, LexicalError> {
    let lexer = Lexer::new(input.char_indices().map(|(i, c)| (i as u32, c)));

    Ok(lexer.tokenize()?
        .into_iter()
        .map(|(_, token, _)| token)
        .collect())
}

fn int(value: i64) -> Token {
    Token::Int(BigInt::from(value))
}

fn decimal(value: &str) -> Token {
    Token::Decimal(BigDecimal::from_str(value).unwrap())
}

fn ident(name: &str) -> Token {
    Token::Ident(name.to_string())
}

#[test]
fn test_numbers() -> Result<(), LexicalError> {
    let tokens = lex("10 -7 1.5 -0.25 123456789012345678901234567890")?;

    assert_eq!(tokens, vec![
        int(10),
        int(-7),
        decimal("1.5"),
        decimal("-0.25"),
        Token::Int(BigInt::from_str("123456789012345678901234567890").unwrap()),
        Token::Eof,
    ]);

    Ok(())
}

#[test]
fn test_decimal_keeps_exact_digits() -> Result<(), LexicalError> {
    let tokens = lex("0.1")?;

    match &tokens[0] {
        Token::Decimal(value) => assert_eq!(value.to_string(), "0.1"),
        other => panic!("expected a decimal, got {other:?}"),
    }

    Ok(())
}

#[test]
fn test_trailing_period_is_not_part_of_number() {
    let err = lex("1.").unwrap_err();

    assert_eq!(err.error, LexicalErrorType::UnrecognizedToken { tok: '.' });
    assert_eq!((err.location.start, err.location.end), (1, 2));
}

#[test]
fn test_operators() -> Result<(), LexicalError> {
    let tokens = lex("+ - * / ** == != >= <= > < = ( )")?;

    assert_eq!(tokens, vec![
        Token::Plus,
        Token::Minus,
        Token::Star,
        Token::Slash,
        Token::Power,
        Token::Equal,
        Token::NotEqual,
        Token::GreaterThanOrEqual,
        Token::LessThanOrEqual,
        Token::GreaterThan,
        Token::LessThan,
        Token::Assign,
        Token::LParen,
        Token::RParen,
        Token::Eof,
    ]);

    Ok(())
}

#[test]
fn test_two_char_operators_without_spaces() -> Result<(), LexicalError> {
    let tokens = lex("2**3>=x")?;

    assert_eq!(tokens, vec![
        int(2),
        Token::Power,
        int(3),
        Token::GreaterThanOrEqual,
        ident("x"),
        Token::Eof,
    ]);

    Ok(())
}

#[test]
fn test_minus_before_digit_is_a_literal() -> Result<(), LexicalError> {
    assert_eq!(lex("2*-3")?, vec![int(2), Token::Star, int(-3), Token::Eof]);
    assert_eq!(lex("x-3")?, vec![ident("x"), int(-3), Token::Eof]);
    assert_eq!(lex("x - y")?, vec![ident("x"), Token::Minus, ident("y"), Token::Eof]);

    Ok(())
}

#[test]
fn test_identifiers_and_keywords() -> Result<(), LexicalError> {
    let tokens = lex("sqrt(x_value) exp log total")?;

    assert_eq!(tokens, vec![
        Token::Sqrt,
        Token::LParen,
        ident("x_value"),
        Token::RParen,
        Token::Exp,
        Token::Log,
        ident("total"),
        Token::Eof,
    ]);

    Ok(())
}

#[test]
fn test_keyword_prefix_splits_words() -> Result<(), LexicalError> {
    assert_eq!(lex("logx")?, vec![Token::Log, ident("x"), Token::Eof]);
    assert_eq!(lex("sqrtexp")?, vec![Token::Sqrt, Token::Exp, Token::Eof]);
    // keywords are only recognised at the start of a word
    assert_eq!(lex("xlog")?, vec![ident("xlog"), Token::Eof]);

    Ok(())
}

#[test]
fn test_digits_end_identifiers() -> Result<(), LexicalError> {
    let tokens = lex("2e3")?;

    assert_eq!(tokens, vec![int(2), ident("e"), int(3), Token::Eof]);

    Ok(())
}

#[test]
fn test_comments_and_whitespace() -> Result<(), LexicalError> {
    assert_eq!(lex("  1 +\t2  # the rest is ignored ^ $")?, vec![
        int(1),
        Token::Plus,
        int(2),
        Token::Eof,
    ]);
    assert_eq!(lex("# only a comment")?, vec![Token::Eof]);
    assert_eq!(lex("")?, vec![Token::Eof]);

    Ok(())
}

#[test]
fn test_unrecognized_characters() {
    let fails = vec![
        ("1 $ 2", '$', 2),
        ("x ! y", '!', 2),
        ("5 % 2", '%', 2),
        ("a.b", '.', 1),
    ];

    for (input, tok, start) in fails {
        let err = lex(input).unwrap_err();

        assert_eq!(
            err.error, LexicalErrorType::UnrecognizedToken { tok },
            "unexpected error for {input:?}"
        );
        assert_eq!(err.location.start, start, "unexpected location for {input:?}");
    }
}

#[test]
fn test_spans() -> Result<(), LexicalError> {
    let lexer = Lexer::new("ab + 12.5".char_indices().map(|(i, c)| (i as u32, c)));
    let spans = lexer.tokenize()?
        .into_iter()
        .map(|(start, _, end)| (start, end))
        .collect::<Vec<_>>();

    assert_eq!(spans, vec![(0, 2), (3, 4), (5, 9), (9, 9)]);

    Ok(())
}

#[test]
fn test_iterator_stops_after_error() {
    let lexer = Lexer::new("1 @ 2".char_indices().map(|(i, c)| (i as u32, c)));
    let results = lexer.collect::<Vec<_>>();

    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());
}

#[test]
fn test_preprocess() {
    assert_eq!(preprocess("5-3"), "5+-3");
    assert_eq!(preprocess("5 - 3"), "5 - 3");
    assert_eq!(preprocess("5-3-2"), "5+-3-2");
    assert_eq!(preprocess("10-2*4-1"), "10+-2*4+-1");
    assert_eq!(preprocess("2^3"), "2**3");
    assert_eq!(preprocess("x-1"), "x-1");
}
