use std::fmt;

/// One wording per error situation, so messages stay consistent across
/// every place that reports them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Required tokens or nodes were not found. `items` is already
    /// formatted, e.g. `'}'` or `value and ']'`.
    Expected { items: String, context: Option<&'static str> },
    /// A closing delimiter is missing while its opener is present.
    ExpectedToEnd { closer: String, context: &'static str },
    ExpectedTernaryColon,
    ExtraneousAtTopLevel { text: String },
    UnexpectedText { text: String, context: Option<&'static str> },
    UnexpectedBeforeIfConfigClause { text: String },
    UnexpectedInIfConfigBlock { text: String },
    RemovedCStyleFor,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Expected { items, context: Some(context) } => {
                write!(f, "expected {items} in {context}")
            }
            DiagnosticKind::Expected { items, context: None } => write!(f, "expected {items}"),
            DiagnosticKind::ExpectedToEnd { closer, context } => {
                write!(f, "expected '{closer}' to end {context}")
            }
            DiagnosticKind::ExpectedTernaryColon => {
                f.write_str("expected ':' after '? ...' in ternary expression")
            }
            DiagnosticKind::ExtraneousAtTopLevel { text } => {
                write!(f, "extraneous '{text}' at top level")
            }
            DiagnosticKind::UnexpectedText { text, context: Some(context) } => {
                write!(f, "unexpected text '{text}' in {context}")
            }
            DiagnosticKind::UnexpectedText { text, context: None } => {
                write!(f, "unexpected text '{text}'")
            }
            DiagnosticKind::UnexpectedBeforeIfConfigClause { text } => {
                write!(f, "unexpected text '{text}' before conditional compilation clause")
            }
            DiagnosticKind::UnexpectedInIfConfigBlock { text } => {
                write!(f, "unexpected text '{text}' in conditional compilation block")
            }
            DiagnosticKind::RemovedCStyleFor => {
                f.write_str("C-style for statement has been removed in Swift 3")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wording() {
        let cases = [
            (
                DiagnosticKind::Expected { items: "value".into(), context: Some("array element") },
                "expected value in array element",
            ),
            (
                DiagnosticKind::ExpectedToEnd { closer: "\"#".into(), context: "string literal" },
                "expected '\"#' to end string literal",
            ),
            (
                DiagnosticKind::ExtraneousAtTopLevel { text: "case:".into() },
                "extraneous 'case:' at top level",
            ),
            (
                DiagnosticKind::UnexpectedText {
                    text: "* !".into(),
                    context: Some("'if' statement"),
                },
                "unexpected text '* !' in 'if' statement",
            ),
        ];
        for (kind, message) in cases {
            assert_eq!(kind.to_string(), message);
        }
    }
}
