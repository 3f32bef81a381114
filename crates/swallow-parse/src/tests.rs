use std::fs;
use std::path::{Path, PathBuf};

use expect_test::expect;
use swallow_errors::Markers;
use swallow_syntax::ast::{self, Node as _};
use swallow_syntax::{SyntaxKind, SyntaxNode};

use super::*;

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct TestCase {
    input: PathBuf,
    text: String,
}

impl TestCase {
    fn list() -> Vec<Self> {
        let test_data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data");

        let mut cases = fs::read_dir(&test_data_dir)
            .unwrap_or_else(|err| {
                panic!("Cannot read directory {}: {err}", test_data_dir.display())
            })
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                if path.extension()? == "swift" {
                    let text = fs::read_to_string(&path).ok()?;
                    Some(Self { input: path, text })
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();

        cases.sort();
        cases
    }
}

fn assert_lossless(text: &str, parse: &Parse) {
    assert_eq!(parse.syntax().text(), text, "tree does not reproduce its input");
    assert_eq!(u32::from(parse.syntax().text_range().end()) as usize, text.len());
}

/// Parses `input` with `parse` after pulling out its `#^NAME^#` markers, and
/// compares every diagnostic against the expected `(marker, message)` list.
fn check_with(parse: fn(&str) -> Parse, input: &str, expected: &[(&str, &str)]) -> Parse {
    let (text, markers) = Markers::extract(input);
    let result = parse(&text);
    assert_lossless(&text, &result);

    let actual = result
        .diagnostics()
        .iter()
        .map(|diagnostic| (diagnostic.offset(), diagnostic.message().to_owned()))
        .collect::<Vec<_>>();
    let expected = expected
        .iter()
        .map(|(marker, message)| {
            let offset =
                markers.get(marker).unwrap_or_else(|| panic!("no marker named {marker}"));
            (offset, (*message).to_owned())
        })
        .collect::<Vec<_>>();

    assert_eq!(actual, expected, "input:\n{text}\ntree:\n{}", result.debug_tree());
    result
}

fn check(input: &str, expected: &[(&str, &str)]) -> Parse {
    check_with(parse_source_file, input, expected)
}

fn check_clean(input: &str) -> Parse {
    check(input, &[])
}

fn marker(input: &str, name: &str) -> (String, TextSize) {
    let (text, markers) = Markers::extract(input);
    let offset = markers.get(name).unwrap_or_else(|| panic!("no marker named {name}"));
    (text, offset)
}

fn descendant(root: &SyntaxNode, kind: SyntaxKind) -> SyntaxNode {
    root.descendants()
        .find(|node| node.kind() == kind)
        .unwrap_or_else(|| panic!("no {kind:?} in tree"))
}

#[test]
fn test_data() {
    let cases = TestCase::list();
    assert!(!cases.is_empty());

    for case in cases {
        let first = parse_source_file(&case.text);
        assert_eq!(first.syntax().text(), case.text, "{}", case.input.display());

        let second = parse_source_file(&case.text);
        assert_eq!(first, second, "{}", case.input.display());
        assert_eq!(first.debug_tree(), second.debug_tree());
    }
}

#[test]
fn test_tree_shape() {
    let parse = parse_expression("a + 1");
    expect![[r#"
        SOURCE_FRAGMENT@0..5
          BINARY_EXPR@0..5
            IDENTIFIER_EXPR@0..2
              IDENTIFIER@0..1 "a"
            BINARY_OPERATOR@2..3 "+"
            INTEGER_LITERAL_EXPR@4..5
              INTEGER_LITERAL@4..5 "1"
          EOF@5..5 ""
    "#]]
    .assert_eq(&parse.debug_tree());
    assert!(!parse.has_errors());
}

#[test]
fn test_missing_token_shape() {
    let parse = parse_expression("(a");
    expect![[r#"
        SOURCE_FRAGMENT@0..2
          TUPLE_EXPR@0..2
            LEFT_PAREN@0..1 "("
            TUPLE_ELEMENT_LIST@1..2
              TUPLE_ELEMENT@1..2
                IDENTIFIER_EXPR@1..2
                  IDENTIFIER@1..2 "a"
            RIGHT_PAREN@2..2 missing
          EOF@2..2 ""
    "#]]
    .assert_eq(&parse.debug_tree());
    assert_eq!(parse.diagnostics().messages(), ["expected ')' to end tuple"]);
}

#[test]
fn test_variable_missing_initializer() {
    check("let a =#^DIAG^#", &[("DIAG", "expected expression in variable")]);
}

#[test]
fn test_ternary() {
    let parse = check_clean("a ? b : c ? d : e");
    let ternary = parse.syntax().descendants().find_map(ast::TernaryExpr::cast).unwrap();
    assert!(matches!(ternary.else_branch(), Some(ast::Expr::Ternary(_))));

    check("a ? b :#^DIAG^#", &[("DIAG", "expected expression")]);
    check(
        "foo ? 1#^DIAG^#",
        &[
            ("DIAG", "expected ':' after '? ...' in ternary expression"),
            ("DIAG", "expected expression"),
        ],
    );
}

#[test]
fn test_sequence() {
    check_clean("A as? B + C -> D is E as! F ? G = 42 : H");
}

#[test]
fn test_closure_signatures() {
    check_clean("{ @MainActor (a: Int) async -> Int in print(\"hi\") }");
    check_clean("{ [weak self, weak weakB = b] foo in\n  return 0\n}");
}

#[test]
fn test_trailing_closures() {
    check_clean("var button =  View.Button[5, 4, 3\n] {\n  // comment #0\n  Text(\"ABC\")\n}");
    check_clean("compactMap { (parserDiag) in }");
}

#[test]
fn test_async_await() {
    check_clean("await a()");
    check_clean(
        "async let child = testNestedTaskPriority(basePri: basePri, curPri: curPri)\nawait child",
    );
}

#[test]
fn test_generic_specialization() {
    check_clean("Swift.Array<Array<Foo>>()");
}

#[test]
fn test_object_literals() {
    check_clean("#colorLiteral()");
    check_clean("#colorLiteral(red: 1.0, green: 1.0, blue: 1.0, alpha: 1.0)");
    check_clean("#imageLiteral(resourceName: \"foo.png\")");
}

#[test]
fn test_key_paths() {
    check_clean("children.filter(\\.type.defaultInitialization.isEmpty)");
    check(
        "\\a\nc[#^DIAG^#",
        &[("DIAG", "expected value in subscript"), ("DIAG", "expected ']' to end subscript")],
    );
    check_clean("_ = \\Lens<[Int]>.[0]");
    check_clean("\\(UnsafeRawPointer?, String).1");
    check(
        "\\#^AFTER_SLASH^#\\(#^AFTER_PAREN^#",
        &[
            ("AFTER_SLASH", "expected root and expression in key path"),
            ("AFTER_PAREN", "expected value in tuple"),
            ("AFTER_PAREN", "expected ')' to end tuple"),
            ("AFTER_PAREN", "expected expression in key path"),
        ],
    );
}

#[test]
fn test_pound_keypath() {
    check(
        "#keyPath(#^DIAG^#(b:#^MISSING_VALUE^#)",
        &[
            ("DIAG", "expected identifier in '#keyPath' expression"),
            ("DIAG", "expected ')' to end '#keyPath' expression"),
            ("MISSING_VALUE", "expected value in function call"),
        ],
    );
}

#[test]
fn test_basic_literals() {
    for text in [
        "#file",
        "#fileID",
        "(#line)",
        "#column",
        "#function",
        "#dsohandle",
        "__FILE__",
        "__LINE__",
        "__COLUMN__",
        "__FUNCTION__",
        "__DSO_HANDLE__",
        "'red'",
        "array[]",
        "text[...]",
    ] {
        check_clean(text);
    }
}

#[test]
fn test_regex_literal() {
    check_clean("/(?<identifier>[[:alpha:]]\\w*) = (?<hex>[0-9A-F]+)/");
}

#[test]
fn test_initializer_call() {
    check_clean("Lexer.Cursor(input: input, previous: 0)");
}

#[test]
fn test_collections() {
    check_clean("[Dictionary<String, Int>: Int]()");
    check_clean("[(Int, Double) -> Bool]()");
    check_clean("_ = [@convention(block) ()  -> Int]().count");
    check_clean("A<@convention(c) () -> Int32>.c()");
    check_clean("A<(@autoclosure @escaping () -> Int, Int) -> Void>.c()");
    check_clean("_ = [String: (@escaping (A<B>) -> Int) -> Void]().keys");
    check_clean("[\n  condition ? firstOption : secondOption,\n  bar(),\n]");
}

#[test]
fn test_unterminated_collections() {
    check(
        "[#^EXPECTED_EXPR^#\n  ,#^END_ARRAY^#",
        &[
            ("EXPECTED_EXPR", "expected value in array element"),
            ("END_ARRAY", "expected ']' to end array"),
        ],
    );
    check(
        "([1:#^DIAG^#)",
        &[
            ("DIAG", "expected value in dictionary element"),
            ("DIAG", "expected ']' to end dictionary"),
        ],
    );
}

#[test]
fn test_function_types_in_arrays() {
    check(
        "[(Int) -> #^DIAG^#throws Int]()",
        &[
            ("DIAG", "expected expression in array element"),
            ("DIAG", "unexpected text 'throws Int' in array"),
        ],
    );
    check("let _ = [Int throws #^DIAG^#Int]()", &[("DIAG", "expected '->' in array element")]);
}

#[test]
fn test_interpolation() {
    check_clean("return \"Fixit: \\(range.debugDescription) Text: \\\"\\(text)\\\"\"");
    check_clean("\"text \\(array.map({ \"\\($0)\" }).joined(separator: \",\")) text\"");
    check_clean("#\"\\\\(\"#");
    check(
        "\" >> \\( abc #^DIAG^#} ) << \"",
        &[("DIAG", "unexpected text '}' in string literal")],
    );
}

#[test]
fn test_unterminated_strings() {
    check("#^DIAG^#\"\\(()", &[("DIAG", "extraneous '\"\\(()' at top level")]);
    check("#^DIAG^#\"\\", &[("DIAG", "extraneous '\"\\' at top level")]);
    check("\"\\\",#^DIAG^#", &[("DIAG", "expected '\"' to end string literal")]);
    check("\"#^DIAG^#", &[("DIAG", "expected '\"' to end string literal")]);
    check("\"'#^DIAG^#", &[("DIAG", "expected '\"' to end string literal")]);
    check("#\"#^DIAG^#", &[("DIAG", "expected '\"#' to end string literal")]);
    check("#\"\"\"#^DIAG^#", &[("DIAG", "expected '\"\"\"#' to end string literal")]);
    check("#\"\"\"a#^DIAG^#", &[("DIAG", "expected '\"\"\"#' to end string literal")]);
}

#[test]
fn test_string_literals() {
    check_clean(r#""""#);
    check_clean("\"\"\"\n\"\"\"");
    check_clean("\n\n#\"Hello World\"#\n\n\"Hello World\"\n\n");
    check_clean(r#""\(x)""#);
    check_clean(r#""Founded: \(Date.appleFounding, format: 📆)""#);
    check_clean(
        r##""""
    Custom(custom: \(interval),\
    Expr: \(pause?.debugDescription ?? "–"), \
    PlainWithContinuation: \(countdown), \
    Plain: \(units))"
""""##,
    );
    check_clean(
        r##""""
\(gen(xx) { (x) in
    return """
    case
"""
})
""""##,
    );
}

#[test]
fn test_multiline_delimiters() {
    check_clean(r##"#"""#"##);
    check_clean(r##"#"""""#"##);
    check_clean("#\"\"\"\nmultiline raw\n\"\"\"#");
    check_clean(r#""""""""#);
    check(r##""""#^DIAG^#"##, &[("DIAG", r#"expected '"""' to end string literal"#)]);
    check(r##"""""#^DIAG^#"##, &[("DIAG", r#"expected '"""' to end string literal"#)]);
    check_clean(
        "_ = #\"\u{200B}\"\u{200B}\"#\n\n_ = #\"\"\"\"#\n\n_ = #\"\"\"\"\"#\n\n_ = #\"\"\"\"\"\"#\n\n\
         _ = ##\"\"\" foo # \"# \"##",
    );
}

#[test]
fn test_ternary_in_do_block() {
    check(
        "do {\n  true ? () : #^DIAG^#throw opaque_error()\n} catch _ {\n}",
        &[("DIAG", "expected expression in 'do' statement")],
    );
}

#[test]
fn test_broken_function_type_annotation() {
    check(
        "let #^VAR_NAME^#:(#^DIAG_1^#..)->#^END^#",
        &[
            ("VAR_NAME", "expected pattern in variable"),
            ("DIAG_1", "expected type in function type"),
            ("DIAG_1", "unexpected text '..' in function type"),
            ("END", "expected type in function type"),
        ],
    );
}

#[test]
fn test_async_arrow_in_sequence() {
    let input = "Foo #^ASYNC^#async ->#^END^#";
    let parse = check_with(
        |text| parse_sequence_expression(text, ExprFlags::empty()),
        input,
        &[("END", "expected expression")],
    );
    let (_, async_offset) = marker(input, "ASYNC");
    let token = parse.syntax().token_at_offset(async_offset).unwrap();
    assert_eq!(token.kind(), ASYNC_KW);
}

#[test]
fn test_some_any_and_move() {
    check_clean("_ = (any Sequence<Int>).self");
    check_clean("_move msg");
    check_clean("use(_move msg)");
    check_clean("let b = (_move self).buffer");
}

#[test]
fn test_editor_placeholders() {
    check_clean("if !<#b1#> && !<#b2#> {}");
    check_clean("if <#test#> {}");
    check_clean("if <#b1#>, <#b2#> {}");
    check_clean("x = -<#y#>");
}

#[test]
fn test_implicit_members_and_tuple_types() {
    check_clean(
        "optional(x: .some(23))\noptional(x: .none)\nvar pair : (Int, Double) = makePair(a: 1, b: 2.5)",
    );
}

#[test]
fn test_modifier_stays_on_its_line() {
    let parse = check_clean("open(path)\nvar x = 1");
    let call = descendant(&parse.syntax(), FUNCTION_CALL_EXPR);
    assert_eq!(call.text_trimmed(), "open(path)");
    let decl = descendant(&parse.syntax(), VARIABLE_DECL);
    assert!(decl.children().all(|child| child.kind() != DECL_MODIFIER));

    let parse = check_clean("private(set) var count = 0\nstatic\nlet y = 2");
    let modifiers = parse
        .syntax()
        .descendants()
        .filter(|node| node.kind() == DECL_MODIFIER)
        .map(|node| node.text_trimmed())
        .collect::<Vec<_>>();
    assert_eq!(modifiers, ["private(set)"]);
}

#[test]
fn test_operator_reference() {
    let input = "reduce(0, #^PLUS^#+)";
    let (text, plus) = marker(input, "PLUS");
    let parse = check_clean(input);
    let node = parse.node_at_offset(plus).unwrap();
    assert_eq!(node.kind(), OPERATOR_REF_EXPR);
    assert_eq!(node.first_token().unwrap().kind(), BINARY_OPERATOR);
    assert_eq!(node.text_trimmed(), "+");
    assert_eq!(parse.syntax().text(), text);
}

#[test]
fn test_nested_key_path_recovery() {
    check(
        r##"func nestThoseIfs() {
  \n    #^KEY_PATH_1^#
  if false != true {
    \n       #^KEY_PATH_2^#
    print "\(i)\"\n#^END^#"##,
        &[
            ("KEY_PATH_1", "expected expression in key path"),
            ("KEY_PATH_2", "expected expression in key path"),
            ("END", "expected '\"' to end string literal"),
            ("END", "expected '}' to end 'if' statement"),
            ("END", "expected '}' to end function"),
        ],
    );
}

#[test]
fn test_optional_binding_shorthand() {
    let parse = check_clean("if let baz {}");
    let binding = descendant(&parse.syntax(), OPTIONAL_BINDING_CONDITION);
    assert!(binding.children().any(|child| child.kind() == IDENTIFIER_PATTERN));
    assert!(binding.children().all(|child| child.kind() != INITIALIZER_CLAUSE));

    check_clean("if let self = self {}");
    check_clean("if let x { }");
}

#[test]
fn test_broken_case_condition() {
    check(
        "if case#^DIAG^#* ! = x {\n  bar()\n}",
        &[
            ("DIAG", "expected expression in pattern"),
            ("DIAG", "expected '=' and expression in pattern matching"),
            ("DIAG", "unexpected text '* ! = x' in 'if' statement"),
        ],
    );
}

#[test]
fn test_deeply_nested_ifs() {
    let mut text = String::from("func nestThoseIfs() {\n");
    for depth in 0..23 {
        let indent = "  ".repeat(depth + 1);
        text.push_str(&format!("{indent}if false != true {{\n{indent}  print \"\\(i)\"\n"));
    }
    for depth in (0..23).rev() {
        let indent = "  ".repeat(depth + 1);
        text.push_str(&format!("{indent}}}\n"));
    }
    text.push_str("}\n");

    let parse = check_clean(&text);
    assert_eq!(parse.syntax().descendants().filter(|node| node.kind() == IF_STMT).count(), 23);
}

#[test]
fn test_do_catch() {
    check_clean("do {\n\n}");
    check_clean("do {\n\n} catch {\n\n}");
}

#[test]
fn test_return_entry_point() {
    check_with(parse_return_statement, "return actor", &[]);
    check_clean("return");
    check_clean("return true ? nil : nil");
}

#[test]
fn test_closure_entry_point() {
    let input = "{ #^ASYNC^#return 0 }";
    let parse = check_with(parse_closure_expression, input, &[]);
    let (_, offset) = marker(input, "ASYNC");

    let stmt = parse.node_at_offset(offset).unwrap();
    assert_eq!(stmt.kind(), RETURN_STMT);
    assert!(stmt.children().any(|child| child.kind() == INTEGER_LITERAL_EXPR));
}

#[test]
fn test_statement_entry_point() {
    let parse = check_with(parse_statement, "while x < 10 { x += 1 }", &[]);
    assert!(parse.syntax().children().any(|child| child.kind() == WHILE_STMT));

    check_with(parse_statement, "x = 1 #^DIAG^#}", &[("DIAG", "unexpected text '}'")]);
}

#[test]
fn test_switch_cases() {
    check_clean(
        "switch command {\ncase .start:\n  start()\ncase .stop, .pause:\n  stop()\ndefault:\n  break\n}",
    );
    let parse = check_clean(
        "switch command {\ncase .start:\n  break\n\ncase .stop:\n  return\n\ndefault:\n  break\n}",
    );
    let switch = parse.syntax().descendants().find_map(ast::SwitchStmt::cast).unwrap();
    assert_eq!(switch.cases().count(), 3);
    check_clean("switch x { case .A, .B: break }");
    check_clean("switch 0 {\n@$dollar case _:\n  break\n}");

    let parse = check_clean(
        "switch x {\ncase .A:\n  break\n#if NEVER\n#elseif ENABLE_C\ncase .C:\n  break\n#endif\n}",
    );
    let if_config = descendant(&parse.syntax(), IF_CONFIG_DECL);
    assert_eq!(if_config.parent().unwrap().kind(), SWITCH_CASE_LIST);

    let parse = check_clean("switch x { case let .y(z): break }");
    let pattern = descendant(&parse.syntax(), IDENTIFIER_PATTERN);
    assert_eq!(pattern.text_trimmed(), "z");
}

#[test]
fn test_c_style_for() {
    let parse = check(
        "#^DIAG^#for let x = 0; x < 10; x += 1, y += 1 {\n}",
        &[("DIAG", "C-style for statement has been removed in Swift 3")],
    );
    let text = parse.syntax().text();
    let diagnostic = &parse.diagnostics().as_slice()[0];
    let highlight = diagnostic.highlight().unwrap();
    assert_eq!(&text[highlight], "let x = 0; x < 10; x += 1, y += 1 ");
}

#[test]
fn test_top_level_recovery() {
    check(
        "/*#-editable-code Swift Platground editable area*/#^DIAG^#default/*#-end-editable-code*/",
        &[("DIAG", "extraneous 'default' at top level")],
    );
    check("#^DIAG^#case:", &[("DIAG", "extraneous 'case:' at top level")]);
    check(
        "#^DIAG^#case: { (\"Hello World\") }",
        &[("DIAG", "extraneous 'case: { (\"Hello World\") }' at top level")],
    );
    check("LABEL#^DIAG^#:", &[("DIAG", "extraneous ':' at top level")]);
}

#[test]
fn test_wildcard_condition() {
    check_clean("if _ = 42 {}");
}

#[test]
fn test_attributes_on_statements() {
    check(
        "func test1() {\n  #^TEST_1^#@s return\n}\nfunc test2() {\n  #^TEST_2^#@unknown return\n}",
        &[
            ("TEST_1", "unexpected text '@s return' in function"),
            ("TEST_2", "unexpected text '@unknown return' in function"),
        ],
    );
}

#[test]
fn test_bogus_switch_items() {
    check(
        "switch x {\n  #^FOO^#foo()\n#if true\n  #^BAR^#bar()\n#endif\n  case .A, .B:\n    break\n}",
        &[
            ("FOO", "unexpected text 'foo()' before conditional compilation clause"),
            ("BAR", "unexpected text 'bar()' in conditional compilation block"),
        ],
    );
    check(
        "switch x {\n#^DIAG^#print()\n#if ENABLE_C\ncase .NOT_EXIST:\n  break\ncase .C:\n  break\n#endif\ncase .A, .B:\n  break\n}",
        &[("DIAG", "unexpected text 'print()' before conditional compilation clause")],
    );
}

#[test]
fn test_has_symbol() {
    check_clean("if #_hasSymbol(foo) {}");
    check_clean("if #_hasSymbol(foo as () -> ()) {}");
}

#[test]
fn test_missing_brace_at_end() {
    check(
        "// Make sure source ranges satisfy the verifier.\nfor foo in [1, 2] { \n  _ = foo#^DIAG^#",
        &[("DIAG", "expected '}' to end 'for' statement")],
    );
}

#[test]
fn test_first_node_after() {
    let text = "let a = 1\nlet b = foo(2)";
    let parse = parse_source_file(text);
    let second_let = TextSize::from(10);

    let decl = parse.first_node_after(second_let, |node| node.kind() == VARIABLE_DECL).unwrap();
    assert_eq!(decl.text_trimmed(), "let b = foo(2)");

    let call =
        parse.first_node_after(TextSize::from(0), |node| node.kind() == FUNCTION_CALL_EXPR).unwrap();
    assert_eq!(call.text_trimmed(), "foo(2)");

    assert!(parse.first_node_after(second_let, |node| node.kind() == IF_STMT).is_none());
}

#[test]
fn test_parse_is_send() {
    fn assert_send<T: Send + Sync>() {}
    assert_send::<Parse>();
}

#[test]
fn test_diagnostics_anchored_to_marker() {
    let (text, markers) = Markers::extract("let x = 1\n#^A^#let y = (#^B^#");
    let parse = parse_source_file(&text);

    let at_b = parse.diagnostics().anchored_to(&markers, "B");
    let messages = at_b.iter().map(|diagnostic| diagnostic.message()).collect::<Vec<_>>();
    assert_eq!(messages, ["expected value in tuple", "expected ')' to end tuple"]);
    assert!(parse.diagnostics().anchored_to(&markers, "A").is_empty());
    assert!(parse.diagnostics().anchored_to(&markers, "missing").is_empty());
}

#[test]
fn test_raw_string_delimiters() {
    let parse = check_clean(r####"_ = ##"""#"""##"####);
    let literal = descendant(&parse.syntax(), STRING_LITERAL_EXPR);
    assert_eq!(literal.text_trimmed(), r####"##"""#"""##"####);
}

#[test]
fn test_c_style_for_keeps_shape() {
    let parse = check(
        "#^DIAG^#for let x = 0; x < 10; x += 1 {}",
        &[("DIAG", "C-style for statement has been removed in Swift 3")],
    );
    let for_stmt = descendant(&parse.syntax(), FOR_STMT);
    let unexpected = for_stmt.children().find(|child| child.kind() == UNEXPECTED).unwrap();
    assert_eq!(unexpected.text_trimmed(), "let x = 0; x < 10; x += 1");
    assert!(for_stmt.children().any(|child| child.kind() == CODE_BLOCK));
}

#[test]
fn test_typed_views() {
    let text = r#"func add(_ a: Int, to b: Int) -> Int {
  return a + b
}
var total = [1, 2].map { $0 * 2 }
switch total {
case .a:
  break
#if DEBUG
case .b:
  break
#endif
}
"#;
    let parse = parse_source_file(text);
    assert!(!parse.has_errors(), "{:?}", parse.diagnostics().messages());

    let file = ast::SourceFile::cast(parse.syntax()).unwrap();
    let items = file.items().collect::<Vec<_>>();
    assert_eq!(items.len(), 3);

    let ast::CodeBlockItem::Stmt(ast::Stmt::Function(function)) = &items[0] else {
        panic!("expected a function, got {:?}", items[0]);
    };
    assert_eq!(function.name().unwrap().text_trimmed(), "add");
    let signature = function.signature().unwrap();
    assert_eq!(signature.parameters().count(), 2);
    assert!(signature.return_type().is_some());
    let body = function.body().unwrap();
    assert!(body.is_closed());
    let ret = body
        .statements()
        .unwrap()
        .items()
        .find_map(|item| match item {
            ast::CodeBlockItem::Stmt(ast::Stmt::Return(ret)) => Some(ret),
            _ => None,
        })
        .unwrap();
    let Some(ast::Expr::Binary(sum)) = ret.expr() else { panic!("expected a binary expression") };
    assert_eq!(sum.op().unwrap().text_trimmed(), "+");

    let ast::CodeBlockItem::Stmt(ast::Stmt::Variable(variable)) = &items[1] else {
        panic!("expected a variable, got {:?}", items[1]);
    };
    assert!(variable.is_mutable());
    let binding = variable.bindings().next().unwrap();
    let Some(ast::Expr::FunctionCall(call)) = binding.initializer().and_then(|init| init.value())
    else {
        panic!("expected a call");
    };
    assert!(call.trailing_closure().is_some());

    let ast::CodeBlockItem::Stmt(ast::Stmt::Switch(switch)) = &items[2] else {
        panic!("expected a switch, got {:?}", items[2]);
    };
    assert_eq!(switch.cases().count(), 1);
    let if_config = switch.if_configs().next().unwrap();
    let directive = if_config.clauses().next().unwrap().directive().unwrap();
    assert_eq!(directive.kind(), POUND_IF);
}

#[test]
fn test_collection_views() {
    let parse = check_clean("_ = [[1, 2], [3]]");
    let array = parse.syntax().descendants().find_map(ast::ArrayExpr::cast).unwrap();
    let elements = array.elements().collect::<Vec<_>>();
    assert_eq!(elements.len(), 2);
    assert!(elements.iter().all(|element| matches!(element, ast::Expr::Array(_))));

    let parse = check_clean("_ = [\"a\": 1, \"b\": [2]]");
    let dictionary = parse.syntax().descendants().find_map(ast::DictionaryExpr::cast).unwrap();
    let entries = dictionary.entries().collect::<Vec<_>>();
    assert_eq!(entries.len(), 2);
    assert!(matches!(entries[1], (Some(ast::Expr::StringLiteral(_)), Some(ast::Expr::Array(_)))));
}
