use subc::{
    error::LexError,
    interpreter::lexer::{Token, tokenize},
    util::position::Position,
};

fn kinds(src: &str) -> Vec<Token> {
    tokenize(src).unwrap_or_else(|e| panic!("Lexing failed: {e}"))
                 .into_iter()
                 .map(|(token, _)| token)
                 .collect()
}

fn lex_error(src: &str) -> LexError {
    match tokenize(src) {
        Ok(tokens) => panic!("Lexing succeeded but was expected to fail: {tokens:?}"),
        Err(e) => e,
    }
}

#[test]
fn keywords_and_identifiers() {
    assert_eq!(kinds("Program int char string void if else while for switch case default break return"),
               vec![Token::Program,
                    Token::Int,
                    Token::CharType,
                    Token::StringType,
                    Token::Void,
                    Token::If,
                    Token::Else,
                    Token::While,
                    Token::For,
                    Token::Switch,
                    Token::Case,
                    Token::Default,
                    Token::Break,
                    Token::Return,
                    Token::Eof]);

    assert_eq!(kinds("integer _tmp iffy print2"),
               vec![Token::Identifier("integer".into()),
                    Token::Identifier("_tmp".into()),
                    Token::Identifier("iffy".into()),
                    Token::Identifier("print2".into()),
                    Token::Eof]);
}

#[test]
fn operators_prefer_the_longest_match() {
    assert_eq!(kinds("a<=b == !c != d >= e && f || g = h"),
               vec![Token::Identifier("a".into()),
                    Token::LessEqual,
                    Token::Identifier("b".into()),
                    Token::EqualEqual,
                    Token::Bang,
                    Token::Identifier("c".into()),
                    Token::BangEqual,
                    Token::Identifier("d".into()),
                    Token::GreaterEqual,
                    Token::Identifier("e".into()),
                    Token::AndAnd,
                    Token::Identifier("f".into()),
                    Token::OrOr,
                    Token::Identifier("g".into()),
                    Token::Equals,
                    Token::Identifier("h".into()),
                    Token::Eof]);
}

#[test]
fn literals_decode_escapes() {
    assert_eq!(kinds(r#"42 'a' '\n' '\'' "tab\there" "say \"hi\"\n""#),
               vec![Token::Integer(42),
                    Token::Char(b'a'),
                    Token::Char(b'\n'),
                    Token::Char(b'\''),
                    Token::Str("tab\there".into()),
                    Token::Str("say \"hi\"\n".into()),
                    Token::Eof]);

    assert_eq!(kinds(r#""""#), vec![Token::Str(String::new()), Token::Eof]);
}

#[test]
fn comments_are_skipped() {
    let src = "x // trailing comment\n/* a\n block\n comment */ y";

    assert_eq!(kinds(src),
               vec![Token::Identifier("x".into()), Token::Identifier("y".into()), Token::Eof]);
}

#[test]
fn positions_track_lines_and_columns() {
    let tokens = tokenize("Program p;\n  int x;\n/* one\ntwo */ x").unwrap();

    let positions: Vec<Position> = tokens.iter().map(|(_, position)| *position).collect();
    assert_eq!(positions[0], Position::new(1, 1));
    assert_eq!(positions[1], Position::new(1, 9));
    assert_eq!(positions[3], Position::new(2, 3));
    assert_eq!(positions[4], Position::new(2, 7));
    assert_eq!(tokens[6].0, Token::Identifier("x".into()));
    assert_eq!(positions[6], Position::new(4, 8));
}

#[test]
fn stream_always_ends_with_eof() {
    assert_eq!(kinds(""), vec![Token::Eof]);
    assert_eq!(kinds("  \n\t // nothing here"), vec![Token::Eof]);
}

#[test]
fn unexpected_character_is_reported_with_its_position() {
    assert_eq!(lex_error("int x;\nx = 1 @ 2;"),
               LexError::UnexpectedCharacter { character: '@',
                                               position:  Position::new(2, 7), });
}

#[test]
fn malformed_literals_are_rejected() {
    for src in ["''", "'ab'", r"'\q'", r#""bad \q escape""#, "\"unterminated"] {
        assert!(matches!(lex_error(src), LexError::MalformedLiteral { .. }),
                "expected a malformed literal for {src:?}");
    }
}

#[test]
fn oversized_integer_is_rejected() {
    let err = lex_error("x = 99999999999999999999;");

    assert_eq!(err,
               LexError::IntegerOutOfRange { lexeme:   "99999999999999999999".into(),
                                             position: Position::new(1, 5), });
}

#[test]
fn error_message_names_the_position() {
    let message = lex_error("int $x;").to_string();

    assert!(message.contains("line 1, column 5"), "unexpected message: {message}");
}
