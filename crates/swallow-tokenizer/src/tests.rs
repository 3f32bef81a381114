use super::*;

fn tokens(text: &str) -> Vec<(SyntaxKind, &str)> {
    tokenize(text).into_iter().map(|token| (token.kind, &text[token.kind_range])).collect()
}

fn kinds(text: &str) -> Vec<SyntaxKind> {
    tokenize(text).into_iter().map(|token| token.kind).collect()
}

fn assert_lossless(text: &str) {
    let mut offset = TextSize::new(0);
    for token in tokenize(text) {
        assert_eq!(token.full_range().start(), offset, "gap before {:?} in {text:?}", token.kind);
        offset = token.full_range().end();
    }
    assert_eq!(offset, TextSize::of(text), "tokens do not cover {text:?}");
}

#[test]
fn test_integer_literals() {
    for input in ["123", "0", "0b1010", "0o755", "0x1f", "123_456"] {
        assert_eq!(tokens(input), vec![(INTEGER_LITERAL, input), (EOF, "")], "Input: '{input}'");
    }
}

#[test]
fn test_float_literals() {
    for input in ["123.456", "0.0", "1e10", "1.0e-5", "123_456.789_012"] {
        assert_eq!(tokens(input), vec![(FLOAT_LITERAL, input), (EOF, "")], "Input: '{input}'");
    }
}

#[test]
fn test_integer_followed_by_member() {
    assert_eq!(
        tokens("1.description"),
        vec![(INTEGER_LITERAL, "1"), (PERIOD, "."), (IDENTIFIER, "description"), (EOF, "")]
    );
}

#[test]
fn test_eq_operator() {
    let expected = vec![(IDENTIFIER, "x"), (EQ, "="), (IDENTIFIER, "y"), (EOF, "")];
    assert_eq!(tokens("x = y"), expected);
    assert_eq!(tokens("x=y"), expected);
}

#[test]
fn test_double_eq_operator() {
    assert_eq!(
        tokens("x == y"),
        vec![(IDENTIFIER, "x"), (BINARY_OPERATOR, "=="), (IDENTIFIER, "y"), (EOF, "")]
    );
}

#[test]
fn test_operator_binding() {
    assert_eq!(
        tokens("-a * b++ / ++c - d--"),
        vec![
            (PREFIX_OPERATOR, "-"),
            (IDENTIFIER, "a"),
            (BINARY_OPERATOR, "*"),
            (IDENTIFIER, "b"),
            (POSTFIX_OPERATOR, "++"),
            (BINARY_OPERATOR, "/"),
            (PREFIX_OPERATOR, "++"),
            (IDENTIFIER, "c"),
            (BINARY_OPERATOR, "-"),
            (IDENTIFIER, "d"),
            (POSTFIX_OPERATOR, "--"),
            (EOF, ""),
        ]
    );
    assert_eq!(kinds("a+b"), vec![IDENTIFIER, BINARY_OPERATOR, IDENTIFIER, EOF]);
    assert_eq!(kinds("- a"), vec![BINARY_OPERATOR, IDENTIFIER, EOF]);
    assert_eq!(kinds("a ++"), vec![IDENTIFIER, BINARY_OPERATOR, EOF]);
    assert_eq!(kinds("foo(&x)"), vec![
        IDENTIFIER,
        LEFT_PAREN,
        PREFIX_OPERATOR,
        IDENTIFIER,
        RIGHT_PAREN,
        EOF
    ]);
}

#[test]
fn test_question_marks() {
    assert_eq!(
        tokens("a ? b : c"),
        vec![
            (IDENTIFIER, "a"),
            (INFIX_QUESTION_MARK, "?"),
            (IDENTIFIER, "b"),
            (COLON, ":"),
            (IDENTIFIER, "c"),
            (EOF, ""),
        ]
    );
    assert_eq!(
        tokens("a?.b!"),
        vec![
            (IDENTIFIER, "a"),
            (POSTFIX_OPERATOR, "?"),
            (PERIOD, "."),
            (IDENTIFIER, "b"),
            (POSTFIX_OPERATOR, "!"),
            (EOF, ""),
        ]
    );
    assert_eq!(kinds("a ?? b"), vec![IDENTIFIER, BINARY_OPERATOR, IDENTIFIER, EOF]);
}

#[test]
fn test_dots_and_arrows() {
    assert_eq!(
        tokens("object.property"),
        vec![(IDENTIFIER, "object"), (PERIOD, "."), (IDENTIFIER, "property"), (EOF, "")]
    );
    assert_eq!(
        tokens("0..<n"),
        vec![(INTEGER_LITERAL, "0"), (BINARY_OPERATOR, "..<"), (IDENTIFIER, "n"), (EOF, "")]
    );
    assert_eq!(
        tokens("(Int) -> Bool"),
        vec![
            (LEFT_PAREN, "("),
            (IDENTIFIER, "Int"),
            (RIGHT_PAREN, ")"),
            (ARROW, "->"),
            (IDENTIFIER, "Bool"),
            (EOF, ""),
        ]
    );
}

#[test]
fn test_keywords_and_identifiers() {
    assert_eq!(
        tokens("let _ = `class` + $0 + 😀"),
        vec![
            (LET_KW, "let"),
            (UNDERSCORE, "_"),
            (EQ, "="),
            (IDENTIFIER, "`class`"),
            (BINARY_OPERATOR, "+"),
            (DOLLAR_IDENTIFIER, "$0"),
            (BINARY_OPERATOR, "+"),
            (IDENTIFIER, "😀"),
            (EOF, ""),
        ]
    );
}

#[test]
fn test_pound_tokens() {
    assert_eq!(
        tokens("#if DEBUG\n#file\n#endif"),
        vec![
            (POUND_IF, "#if"),
            (IDENTIFIER, "DEBUG"),
            (POUND_IDENTIFIER, "#file"),
            (POUND_ENDIF, "#endif"),
            (EOF, ""),
        ]
    );
}

#[test]
fn test_editor_placeholder() {
    assert_eq!(
        tokens("foo(<#T##Int#>)"),
        vec![
            (IDENTIFIER, "foo"),
            (LEFT_PAREN, "("),
            (EDITOR_PLACEHOLDER, "<#T##Int#>"),
            (RIGHT_PAREN, ")"),
            (EOF, ""),
        ]
    );
    assert_eq!(
        tokens("!<#b1#> && -<#b2#>"),
        vec![
            (PREFIX_OPERATOR, "!"),
            (EDITOR_PLACEHOLDER, "<#b1#>"),
            (BINARY_OPERATOR, "&&"),
            (PREFIX_OPERATOR, "-"),
            (EDITOR_PLACEHOLDER, "<#b2#>"),
            (EOF, ""),
        ]
    );
}

#[test]
fn test_trivia_attachment() {
    let text = "let a // note\n  /* block */ b";
    let tokens = tokenize(text);

    assert_eq!(tokens[0].kind, LET_KW);
    assert!(tokens[0].at_line_start);
    assert_eq!(tokens[1].trailing.pieces().len(), 2);
    assert_eq!(tokens[1].trailing.pieces()[1].kind, TriviaPieceKind::LineComment);

    let b = &tokens[2];
    assert_eq!(b.text(text), "b");
    assert!(b.at_line_start);
    let kinds: Vec<_> = b.leading.pieces().iter().map(|piece| piece.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TriviaPieceKind::Newline,
            TriviaPieceKind::Whitespace,
            TriviaPieceKind::BlockComment,
            TriviaPieceKind::Whitespace,
        ]
    );
    assert_lossless(text);
}

#[test]
fn test_nested_block_comment() {
    assert_eq!(tokens("/* a /* b */ c */ x"), vec![(IDENTIFIER, "x"), (EOF, "")]);
}

#[test]
fn test_string_with_interpolation() {
    assert_eq!(
        tokens(r#""a\(b)c""#),
        vec![
            (STRING_QUOTE, "\""),
            (STRING_SEGMENT, "a"),
            (BACKSLASH, "\\"),
            (LEFT_PAREN, "("),
            (IDENTIFIER, "b"),
            (RIGHT_PAREN, ")"),
            (STRING_SEGMENT, "c"),
            (STRING_QUOTE, "\""),
            (EOF, ""),
        ]
    );
}

#[test]
fn test_nested_parens_in_interpolation() {
    assert_eq!(
        kinds(r#""\(f(x))""#),
        vec![
            STRING_QUOTE,
            BACKSLASH,
            LEFT_PAREN,
            IDENTIFIER,
            LEFT_PAREN,
            IDENTIFIER,
            RIGHT_PAREN,
            RIGHT_PAREN,
            STRING_QUOTE,
            EOF,
        ]
    );
}

#[test]
fn test_escaped_quote_stays_in_segment() {
    assert_eq!(
        tokens(r#""say \"hi\"""#),
        vec![
            (STRING_QUOTE, "\""),
            (STRING_SEGMENT, r#"say \"hi\""#),
            (STRING_QUOTE, "\""),
            (EOF, ""),
        ]
    );
}

#[test]
fn test_raw_string_scans_past_shorter_delimiter() {
    assert_eq!(
        tokens(r####"##"""#"""##"####),
        vec![
            (RAW_STRING_DELIMITER, "##"),
            (STRING_QUOTE, "\""),
            (STRING_SEGMENT, "\"\"#\"\""),
            (STRING_QUOTE, "\""),
            (RAW_STRING_DELIMITER, "##"),
            (EOF, ""),
        ]
    );
}

#[test]
fn test_raw_multiline_string() {
    assert_eq!(
        tokens("#\"\"\"\nabc\n\"\"\"#"),
        vec![
            (RAW_STRING_DELIMITER, "#"),
            (MULTILINE_STRING_QUOTE, "\"\"\""),
            (STRING_SEGMENT, "\nabc\n"),
            (MULTILINE_STRING_QUOTE, "\"\"\""),
            (RAW_STRING_DELIMITER, "#"),
            (EOF, ""),
        ]
    );
}

#[test]
fn test_raw_interpolation() {
    assert_eq!(
        kinds(r##"#"\(a)\#(b)"#"##),
        vec![
            RAW_STRING_DELIMITER,
            STRING_QUOTE,
            STRING_SEGMENT,
            BACKSLASH,
            LEFT_PAREN,
            IDENTIFIER,
            RIGHT_PAREN,
            STRING_QUOTE,
            RAW_STRING_DELIMITER,
            EOF,
        ]
    );
}

#[test]
fn test_unterminated_string_stops_at_newline() {
    let text = "\"abc\nx";
    assert_eq!(
        tokens(text),
        vec![(STRING_QUOTE, "\""), (STRING_SEGMENT, "abc"), (IDENTIFIER, "x"), (EOF, "")]
    );
    assert!(tokenize(text)[2].at_line_start);
}

#[test]
fn test_unterminated_interpolation_collapses() {
    assert_eq!(tokens(r#""\(()"#), vec![(UNKNOWN, r#""\(()"#), (EOF, "")]);
    assert_eq!(tokens("x = \"\\(a "), vec![
        (IDENTIFIER, "x"),
        (EQ, "="),
        (UNKNOWN, "\"\\(a"),
        (EOF, ""),
    ]);
    assert_lossless("x = \"\\(a ");
}

#[test]
fn test_trailing_backslash_collapses() {
    assert_eq!(tokens("\"\\"), vec![(UNKNOWN, "\"\\"), (EOF, "")]);
}

#[test]
fn test_regex_literals() {
    assert_eq!(
        tokens("let r = /ab+c/"),
        vec![(LET_KW, "let"), (IDENTIFIER, "r"), (EQ, "="), (REGEX_LITERAL, "/ab+c/"), (EOF, "")]
    );
    assert_eq!(kinds("a / b / c"), vec![
        IDENTIFIER,
        BINARY_OPERATOR,
        IDENTIFIER,
        BINARY_OPERATOR,
        IDENTIFIER,
        EOF
    ]);
    assert_eq!(tokens("#/a/b/#"), vec![(REGEX_LITERAL, "#/a/b/#"), (EOF, "")]);
}

#[test]
fn test_lossless_samples() {
    for text in [
        "",
        "   ",
        "func f(x: Int) -> Int {\n  return x * 2 // double\n}\n",
        "\"\\(\"\\(x)\")\"",
        "#\"\"\"\"#",
        "a\r\nb",
        "@escaping (Int) throws -> Void",
        "\u{0}",
    ] {
        assert_lossless(text);
    }
}
