//! Diagnostics derived from a finished tree.
//!
//! The grammar never reports errors while parsing. It leaves missing tokens,
//! placeholder nodes and `UNEXPECTED` nodes behind, and a single pre-order
//! walk turns them into messages afterwards. Consecutive missing items that
//! share a context are reported together, as in `expected '=' and
//! expression in pattern matching`.

use std::iter::Peekable;

use swallow_errors::{Diagnostic, DiagnosticKind, Diagnostics};
use swallow_syntax::SyntaxKind::*;
use swallow_syntax::{NodeOrToken, SyntaxElement, SyntaxNode, SyntaxToken};
use text_size::{TextRange, TextSize};

use crate::parser::Overrides;

pub(crate) fn generate(root: &SyntaxNode, overrides: &Overrides) -> Diagnostics {
    let mut pass = Pass { overrides, pending: None, diagnostics: Diagnostics::new() };
    pass.node(root);
    pass.flush();

    let mut diagnostics = pass.diagnostics;
    diagnostics.sort();
    tracing::debug!(count = diagnostics.len(), "generated diagnostics");
    diagnostics
}

/// Missing items waiting to be reported as one diagnostic.
struct Group {
    offset: TextSize,
    context: Option<&'static str>,
    items: Vec<String>,
}

struct Pass<'a> {
    overrides: &'a Overrides,
    pending: Option<Group>,
    diagnostics: Diagnostics,
}

impl Pass<'_> {
    fn node(&mut self, node: &SyntaxNode) {
        let mut children = node.children_with_tokens().peekable();
        while let Some(child) = children.next() {
            match child {
                NodeOrToken::Token(token) if token.is_present() => self.flush(),
                NodeOrToken::Token(token) => self.missing_token(node, &token, &mut children),
                NodeOrToken::Node(child) => self.child(&child),
            }
        }
    }

    fn child(&mut self, child: &SyntaxNode) {
        let kind = child.kind();
        if kind == UNEXPECTED {
            self.flush();
            self.unexpected(child);
        } else if let Some(item) = describe_missing_node(child) {
            self.push(child, item);
        } else if has_present_tokens(child) {
            self.flush();
            self.node(child);
        } else {
            self.node(child);
        }
    }

    fn missing_token<I>(&mut self, node: &SyntaxNode, token: &SyntaxToken, rest: &mut Peekable<I>)
    where
        I: Iterator<Item = SyntaxElement>,
    {
        if token.kind() == COLON && node.kind() == TERNARY_EXPR {
            self.flush();
            self.emit(DiagnosticKind::ExpectedTernaryColon, token.text_range().start());
            return;
        }

        if closes_present_opener(node, token) {
            self.flush();
            let mut closer = token.text().to_owned();
            if let Some(NodeOrToken::Token(delimiter)) = rest.next_if(is_missing_raw_delimiter) {
                closer.push_str(delimiter.text());
            }
            let kind = match context(node) {
                Some(context) => DiagnosticKind::ExpectedToEnd { closer, context },
                None => DiagnosticKind::Expected { items: format!("'{closer}'"), context: None },
            };
            self.emit(kind, token.text_range().start());
            return;
        }

        let item = describe_missing_token(token);
        self.push_at(token.text_range().start(), context(node), item);
    }

    fn push(&mut self, node: &SyntaxNode, item: String) {
        self.push_at(node.text_range().start(), context(node), item);
    }

    fn push_at(&mut self, offset: TextSize, context: Option<&'static str>, item: String) {
        if self.pending.as_ref().is_some_and(|group| group.context != context) {
            self.flush();
        }
        self.pending
            .get_or_insert_with(|| Group { offset, context, items: Vec::new() })
            .items
            .push(item);
    }

    fn flush(&mut self) {
        let Some(group) = self.pending.take() else { return };
        let items = join_items(&group.items);
        self.emit(DiagnosticKind::Expected { items, context: group.context }, group.offset);
    }

    fn emit(&mut self, kind: DiagnosticKind, offset: TextSize) {
        self.diagnostics.push(Diagnostic::error(kind, TextRange::empty(offset)));
    }

    fn unexpected(&mut self, node: &SyntaxNode) {
        let range = node.trimmed_range();
        let replaced = self.overrides.iter().find(|(start, _)| *start == range.start());
        if let Some((_, diagnostic)) = replaced {
            self.diagnostics.push(diagnostic.clone());
            return;
        }

        let text = node.text_trimmed();
        let kind = match node.parent() {
            Some(parent) if at_top_level(&parent) => DiagnosticKind::ExtraneousAtTopLevel { text },
            Some(parent)
                if parent.kind() == SWITCH_CASE_LIST
                    && node.next_sibling().is_some_and(|next| next.kind() == IF_CONFIG_DECL) =>
            {
                DiagnosticKind::UnexpectedBeforeIfConfigClause { text }
            }
            Some(parent) if in_if_config_clause(&parent) => {
                DiagnosticKind::UnexpectedInIfConfigBlock { text }
            }
            Some(parent) if parent.kind() == SOURCE_FRAGMENT => {
                DiagnosticKind::UnexpectedText { text, context: None }
            }
            Some(parent) => DiagnosticKind::UnexpectedText { text, context: context(&parent) },
            None => DiagnosticKind::UnexpectedText { text, context: None },
        };
        self.diagnostics.push(Diagnostic::error(kind, range));
    }
}

fn has_present_tokens(node: &SyntaxNode) -> bool {
    node.tokens().any(|token| token.is_present())
}

fn is_missing_raw_delimiter(element: &SyntaxElement) -> bool {
    matches!(element, NodeOrToken::Token(token)
        if !token.is_present() && token.kind() == RAW_STRING_DELIMITER)
}

/// A missing closing delimiter whose opening one was found earlier in the
/// same node.
fn closes_present_opener(node: &SyntaxNode, token: &SyntaxToken) -> bool {
    let Some(opener) = token.kind().opening_delimiter() else { return false };
    node.child_tokens()
        .take_while(|child| child.index_in_parent() < token.index_in_parent())
        .any(|child| child.is_present() && child.kind() == opener)
}

fn at_top_level(parent: &SyntaxNode) -> bool {
    match parent.kind() {
        SOURCE_FILE => true,
        CODE_BLOCK_ITEM_LIST => parent.parent().is_some_and(|grand| grand.kind() == SOURCE_FILE),
        _ => false,
    }
}

fn in_if_config_clause(parent: &SyntaxNode) -> bool {
    parent.kind() == IF_CONFIG_CLAUSE
        || parent.parent().is_some_and(|grand| grand.kind() == IF_CONFIG_CLAUSE)
}

fn describe_missing_token(token: &SyntaxToken) -> String {
    match token.kind() {
        IDENTIFIER => "identifier".to_owned(),
        INTEGER_LITERAL => "integer literal".to_owned(),
        _ if token.text().is_empty() => "token".to_owned(),
        _ => format!("'{}'", token.text()),
    }
}

/// Placeholder nodes and constructs that are missing as a whole are
/// described by what they stand for rather than by their tokens.
fn describe_missing_node(node: &SyntaxNode) -> Option<String> {
    let parent = node.parent().map(|parent| parent.kind());
    let item = match node.kind() {
        MISSING_EXPR => match parent {
            Some(ARRAY_ELEMENT | DICTIONARY_ELEMENT | TUPLE_ELEMENT | LABELED_ARGUMENT) => "value",
            _ => "expression",
        },
        MISSING_TYPE if parent == Some(KEY_PATH_EXPR) => "root",
        MISSING_TYPE => "type",
        MISSING_PATTERN => "pattern",
        CODE_BLOCK if node.is_missing() => "code block",
        PARAMETER_CLAUSE if node.is_missing() => "parameter clause",
        _ => return None,
    };
    Some(item.to_owned())
}

fn join_items(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [single] => single.clone(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

/// Name of the nearest construct that encloses `node`, itself included.
fn context(node: &SyntaxNode) -> Option<&'static str> {
    node.ancestors().find_map(|ancestor| construct_name(&ancestor))
}

fn construct_name(node: &SyntaxNode) -> Option<&'static str> {
    let name = match node.kind() {
        IF_STMT => "'if' statement",
        GUARD_STMT => "'guard' statement",
        SWITCH_STMT => "'switch' statement",
        SWITCH_CASE => "switch case",
        DO_STMT => "'do' statement",
        CATCH_CLAUSE => "'catch' clause",
        FOR_STMT => "'for' statement",
        WHILE_STMT => "'while' statement",
        REPEAT_STMT => "'repeat' statement",
        THROW_STMT => "'throw' statement",
        DEFER_STMT => "'defer' statement",
        MATCHING_PATTERN_CONDITION => "pattern matching",
        IF_CONFIG_CLAUSE => "conditional compilation clause",
        IF_CONFIG_DECL => "conditional compilation block",
        VARIABLE_DECL => "variable",
        FUNCTION_DECL => "function",
        PARAMETER_CLAUSE => "parameter clause",
        ATTRIBUTE => "attribute",
        EXPRESSION_PATTERN => "pattern",
        TUPLE_PATTERN => "tuple pattern",
        ARRAY_EXPR => "array",
        ARRAY_ELEMENT => "array element",
        DICTIONARY_EXPR => "dictionary",
        DICTIONARY_ELEMENT => "dictionary element",
        TUPLE_EXPR => "tuple",
        CLOSURE_EXPR => "closure",
        CLOSURE_SIGNATURE => "closure signature",
        CLOSURE_CAPTURE_CLAUSE => "closure capture clause",
        FUNCTION_CALL_EXPR => "function call",
        SUBSCRIPT_EXPR => "subscript",
        MEMBER_ACCESS_EXPR => "member access",
        KEY_PATH_EXPR => "key path",
        STRING_LITERAL_EXPR => "string literal",
        OBJECT_LITERAL_EXPR => "object literal",
        MACRO_EXPANSION_EXPR => macro_name(node),
        GENERIC_ARGUMENT_CLAUSE => "generic argument clause",
        ARRAY_TYPE => "array type",
        DICTIONARY_TYPE => "dictionary type",
        TUPLE_TYPE => "tuple type",
        FUNCTION_TYPE => "function type",
        _ => return None,
    };
    Some(name)
}

fn macro_name(node: &SyntaxNode) -> &'static str {
    match node.first_token() {
        Some(token) if token.text_trimmed() == "#keyPath" => "'#keyPath' expression",
        _ => "macro expansion",
    }
}
