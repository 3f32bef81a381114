#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
#[repr(u16)]
pub enum SyntaxKind {
    LEFT_PAREN,
    RIGHT_PAREN,
    LEFT_BRACKET,
    RIGHT_BRACKET,
    LEFT_BRACE,
    RIGHT_BRACE,
    LEFT_ANGLE,
    RIGHT_ANGLE,
    COMMA,
    COLON,
    SEMICOLON,
    PERIOD,
    EQ,
    ARROW,
    AT,
    POUND,
    BACKSLASH,
    INFIX_QUESTION_MARK,

    LET_KW,
    VAR_KW,
    FUNC_KW,
    IF_KW,
    ELSE_KW,
    GUARD_KW,
    SWITCH_KW,
    CASE_KW,
    DEFAULT_KW,
    DO_KW,
    CATCH_KW,
    FOR_KW,
    IN_KW,
    WHILE_KW,
    REPEAT_KW,
    RETURN_KW,
    BREAK_KW,
    CONTINUE_KW,
    THROW_KW,
    THROWS_KW,
    RETHROWS_KW,
    DEFER_KW,
    FALLTHROUGH_KW,
    WHERE_KW,
    AS_KW,
    IS_KW,
    TRY_KW,
    TRUE_KW,
    FALSE_KW,
    NIL_KW,
    SELF_KW,
    CAPITAL_SELF_KW,
    SUPER_KW,
    INIT_KW,
    INOUT_KW,

    // Contextual keywords. The tokenizer produces `IDENTIFIER` for these and
    // the parser remaps them where they act as keywords.
    ASYNC_KW,
    AWAIT_KW,
    MOVE_KW,
    ANY_KW,
    SOME_KW,
    WEAK_KW,
    UNOWNED_KW,

    POUND_IF,
    POUND_ELSEIF,
    POUND_ELSE,
    POUND_ENDIF,
    POUND_IDENTIFIER,

    IDENTIFIER,
    DOLLAR_IDENTIFIER,
    UNDERSCORE,
    EDITOR_PLACEHOLDER,
    INTEGER_LITERAL,
    FLOAT_LITERAL,
    REGEX_LITERAL,
    BINARY_OPERATOR,
    PREFIX_OPERATOR,
    POSTFIX_OPERATOR,

    RAW_STRING_DELIMITER,
    STRING_QUOTE,
    MULTILINE_STRING_QUOTE,
    SINGLE_QUOTE,
    STRING_SEGMENT,

    UNKNOWN,
    EOF,

    SOURCE_FILE,
    SOURCE_FRAGMENT,
    CODE_BLOCK,
    CODE_BLOCK_ITEM_LIST,

    IF_STMT,
    GUARD_STMT,
    SWITCH_STMT,
    SWITCH_CASE_LIST,
    SWITCH_CASE,
    SWITCH_CASE_LABEL,
    SWITCH_DEFAULT_LABEL,
    CASE_ITEM_LIST,
    CASE_ITEM,
    WHERE_CLAUSE,
    DO_STMT,
    CATCH_CLAUSE,
    CATCH_ITEM_LIST,
    CATCH_ITEM,
    FOR_STMT,
    WHILE_STMT,
    REPEAT_STMT,
    RETURN_STMT,
    BREAK_STMT,
    CONTINUE_STMT,
    THROW_STMT,
    DEFER_STMT,
    FALLTHROUGH_STMT,
    LABELED_STMT,
    CONDITION_ELEMENT_LIST,
    CONDITION_ELEMENT,
    OPTIONAL_BINDING_CONDITION,
    MATCHING_PATTERN_CONDITION,

    IF_CONFIG_DECL,
    IF_CONFIG_CLAUSE,

    VARIABLE_DECL,
    DECL_MODIFIER,
    PATTERN_BINDING_LIST,
    PATTERN_BINDING,
    TYPE_ANNOTATION,
    INITIALIZER_CLAUSE,
    FUNCTION_DECL,
    FUNCTION_SIGNATURE,
    PARAMETER_CLAUSE,
    PARAMETER,
    DEFAULT_ARGUMENT,
    EFFECT_SPECIFIERS,
    RETURN_CLAUSE,
    ATTRIBUTE_LIST,
    ATTRIBUTE,
    ATTRIBUTE_ARGUMENTS,

    IDENTIFIER_PATTERN,
    WILDCARD_PATTERN,
    TUPLE_PATTERN,
    TUPLE_PATTERN_ELEMENT,
    VALUE_BINDING_PATTERN,
    EXPRESSION_PATTERN,
    IS_TYPE_PATTERN,
    MISSING_PATTERN,

    BINARY_EXPR,
    TERNARY_EXPR,
    ARROW_EXPR,
    CAST_EXPR,
    IS_EXPR,
    PREFIX_EXPR,
    POSTFIX_EXPR,
    FORCE_UNWRAP_EXPR,
    OPTIONAL_CHAINING_EXPR,
    TRY_EXPR,
    AWAIT_EXPR,
    MOVE_EXPR,
    IDENTIFIER_EXPR,
    DISCARD_EXPR,
    BOOLEAN_LITERAL_EXPR,
    NIL_LITERAL_EXPR,
    INTEGER_LITERAL_EXPR,
    FLOAT_LITERAL_EXPR,
    STRING_LITERAL_EXPR,
    STRING_SEGMENT_LIST,
    EXPRESSION_SEGMENT,
    REGEX_LITERAL_EXPR,
    TUPLE_EXPR,
    TUPLE_ELEMENT_LIST,
    TUPLE_ELEMENT,
    ARRAY_EXPR,
    ARRAY_ELEMENT_LIST,
    ARRAY_ELEMENT,
    DICTIONARY_EXPR,
    DICTIONARY_ELEMENT_LIST,
    DICTIONARY_ELEMENT,
    CLOSURE_EXPR,
    CLOSURE_SIGNATURE,
    CLOSURE_CAPTURE_CLAUSE,
    CLOSURE_CAPTURE,
    CLOSURE_PARAM_LIST,
    CLOSURE_PARAM,
    FUNCTION_CALL_EXPR,
    SUBSCRIPT_EXPR,
    ARGUMENT_LIST,
    LABELED_ARGUMENT,
    ADDITIONAL_TRAILING_CLOSURE,
    MEMBER_ACCESS_EXPR,
    IMPLICIT_MEMBER_EXPR,
    SPECIALIZE_EXPR,
    GENERIC_ARGUMENT_CLAUSE,
    GENERIC_ARGUMENT,
    KEY_PATH_EXPR,
    KEY_PATH_COMPONENT_LIST,
    KEY_PATH_COMPONENT,
    MACRO_EXPANSION_EXPR,
    OBJECT_LITERAL_EXPR,
    EDITOR_PLACEHOLDER_EXPR,
    OPERATOR_REF_EXPR,
    TYPE_EXPR,
    PATTERN_EXPR,
    MISSING_EXPR,

    SIMPLE_TYPE,
    MEMBER_TYPE,
    OPTIONAL_TYPE,
    IMPLICITLY_UNWRAPPED_TYPE,
    ARRAY_TYPE,
    DICTIONARY_TYPE,
    TUPLE_TYPE,
    TUPLE_TYPE_ELEMENT,
    FUNCTION_TYPE,
    ATTRIBUTED_TYPE,
    SOME_OR_ANY_TYPE,
    COMPOSITION_TYPE,
    MISSING_TYPE,

    UNEXPECTED,
    TOMBSTONE,
}

use SyntaxKind::*;

impl SyntaxKind {
    pub const fn is_keyword(self) -> bool {
        (self as u16) >= (LET_KW as u16) && (self as u16) <= (UNOWNED_KW as u16)
    }

    pub const fn is_token(self) -> bool {
        (self as u16) <= (EOF as u16)
    }

    /// Nodes that stand for a required element that was not found.
    pub const fn is_missing_node(self) -> bool {
        matches!(self, MISSING_EXPR | MISSING_PATTERN | MISSING_TYPE)
    }

    pub const fn is_operator(self) -> bool {
        matches!(self, BINARY_OPERATOR | PREFIX_OPERATOR | POSTFIX_OPERATOR)
    }

    pub const fn is_string_quote(self) -> bool {
        matches!(self, STRING_QUOTE | MULTILINE_STRING_QUOTE | SINGLE_QUOTE)
    }

    /// The opening counterpart for tokens that end a delimited construct.
    pub const fn opening_delimiter(self) -> Option<SyntaxKind> {
        match self {
            RIGHT_PAREN => Some(LEFT_PAREN),
            RIGHT_BRACKET => Some(LEFT_BRACKET),
            RIGHT_BRACE => Some(LEFT_BRACE),
            RIGHT_ANGLE => Some(LEFT_ANGLE),
            STRING_QUOTE | MULTILINE_STRING_QUOTE | SINGLE_QUOTE => Some(self),
            _ => None,
        }
    }

    /// Source text of tokens whose spelling never varies.
    pub const fn fixed_text(self) -> Option<&'static str> {
        let text = match self {
            LEFT_PAREN => "(",
            RIGHT_PAREN => ")",
            LEFT_BRACKET => "[",
            RIGHT_BRACKET => "]",
            LEFT_BRACE => "{",
            RIGHT_BRACE => "}",
            LEFT_ANGLE => "<",
            RIGHT_ANGLE => ">",
            COMMA => ",",
            COLON => ":",
            SEMICOLON => ";",
            PERIOD => ".",
            EQ => "=",
            ARROW => "->",
            AT => "@",
            POUND => "#",
            BACKSLASH => "\\",
            INFIX_QUESTION_MARK => "?",
            LET_KW => "let",
            VAR_KW => "var",
            FUNC_KW => "func",
            IF_KW => "if",
            ELSE_KW => "else",
            GUARD_KW => "guard",
            SWITCH_KW => "switch",
            CASE_KW => "case",
            DEFAULT_KW => "default",
            DO_KW => "do",
            CATCH_KW => "catch",
            FOR_KW => "for",
            IN_KW => "in",
            WHILE_KW => "while",
            REPEAT_KW => "repeat",
            RETURN_KW => "return",
            BREAK_KW => "break",
            CONTINUE_KW => "continue",
            THROW_KW => "throw",
            THROWS_KW => "throws",
            RETHROWS_KW => "rethrows",
            DEFER_KW => "defer",
            FALLTHROUGH_KW => "fallthrough",
            WHERE_KW => "where",
            AS_KW => "as",
            IS_KW => "is",
            TRY_KW => "try",
            TRUE_KW => "true",
            FALSE_KW => "false",
            NIL_KW => "nil",
            SELF_KW => "self",
            CAPITAL_SELF_KW => "Self",
            SUPER_KW => "super",
            INIT_KW => "init",
            INOUT_KW => "inout",
            ASYNC_KW => "async",
            AWAIT_KW => "await",
            MOVE_KW => "_move",
            ANY_KW => "any",
            SOME_KW => "some",
            WEAK_KW => "weak",
            UNOWNED_KW => "unowned",
            POUND_IF => "#if",
            POUND_ELSEIF => "#elseif",
            POUND_ELSE => "#else",
            POUND_ENDIF => "#endif",
            UNDERSCORE => "_",
            STRING_QUOTE => "\"",
            MULTILINE_STRING_QUOTE => "\"\"\"",
            SINGLE_QUOTE => "'",
            EOF => "",
            _ => return None,
        };
        Some(text)
    }

    /// Keyword for an identifier spelling, if it is reserved.
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        let kind = match text {
            "let" => LET_KW,
            "var" => VAR_KW,
            "func" => FUNC_KW,
            "if" => IF_KW,
            "else" => ELSE_KW,
            "guard" => GUARD_KW,
            "switch" => SWITCH_KW,
            "case" => CASE_KW,
            "default" => DEFAULT_KW,
            "do" => DO_KW,
            "catch" => CATCH_KW,
            "for" => FOR_KW,
            "in" => IN_KW,
            "while" => WHILE_KW,
            "repeat" => REPEAT_KW,
            "return" => RETURN_KW,
            "break" => BREAK_KW,
            "continue" => CONTINUE_KW,
            "throw" => THROW_KW,
            "throws" => THROWS_KW,
            "rethrows" => RETHROWS_KW,
            "defer" => DEFER_KW,
            "fallthrough" => FALLTHROUGH_KW,
            "where" => WHERE_KW,
            "as" => AS_KW,
            "is" => IS_KW,
            "try" => TRY_KW,
            "true" => TRUE_KW,
            "false" => FALSE_KW,
            "nil" => NIL_KW,
            "self" => SELF_KW,
            "Self" => CAPITAL_SELF_KW,
            "super" => SUPER_KW,
            "init" => INIT_KW,
            "inout" => INOUT_KW,
            "_" => UNDERSCORE,
            _ => return None,
        };
        Some(kind)
    }

    /// Maps a `#word` spelling to its directive keyword.
    pub fn from_pound_keyword(text: &str) -> Option<SyntaxKind> {
        match text {
            "#if" => Some(POUND_IF),
            "#elseif" => Some(POUND_ELSEIF),
            "#else" => Some(POUND_ELSE),
            "#endif" => Some(POUND_ENDIF),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_range_is_contiguous() {
        assert!(LET_KW.is_keyword());
        assert!(UNOWNED_KW.is_keyword());
        assert!(!IDENTIFIER.is_keyword());
        assert!(!POUND_IF.is_keyword());
    }

    #[test]
    fn fixed_text_matches_keyword_table() {
        for text in ["let", "switch", "fallthrough", "Self", "inout"] {
            let kind = SyntaxKind::from_keyword(text).unwrap();
            assert_eq!(kind.fixed_text(), Some(text));
        }
    }

    #[test]
    fn node_kinds_are_not_tokens() {
        assert!(EOF.is_token());
        assert!(!SOURCE_FILE.is_token());
        assert!(!MISSING_EXPR.is_token());
    }
}
