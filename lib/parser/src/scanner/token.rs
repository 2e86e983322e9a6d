use span_util::Span;
use std::ops::Range;

use super::TokenType;

macro_rules! impl_token {
    ($_meth:ident, $tok:ident) => {
        pub fn $_meth(label: Range<usize>) -> Token {
            Token {
                token_type: TokenType::$tok,
                value: TokenType::$tok.to_string(),
                span: label.into(),
            }
        }
    };
}

macro_rules! impl_value_token {
    ($_meth:ident, $tok:ident) => {
        pub fn $_meth(value: String, label: Range<usize>) -> Token {
            Token {
                token_type: TokenType::$tok,
                value,
                span: label.into(),
            }
        }
    };
}

#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    pub token_type: TokenType,
    pub value: String,
    pub span: Span,
}

impl Token {
    impl_value_token!(identifier, Identifier);
    impl_value_token!(variable, Variable);
    impl_value_token!(at_keyword, AtKeyword);
    impl_value_token!(number, Number);
    impl_value_token!(string_const, StringConst);
    impl_value_token!(illegal, Illegal);

    impl_token!(true_token, True);
    impl_token!(false_token, False);
    impl_token!(null, Null);
    impl_token!(and, And);
    impl_token!(or, Or);
    impl_token!(not, Not);
    impl_token!(default, Default);

    impl_token!(plus, Plus);
    impl_token!(minus, Minus);
    impl_token!(star, Star);
    impl_token!(slash, Slash);
    impl_token!(percent, Percent);

    impl_token!(equal_equal, EqualEqual);
    impl_token!(not_equal, NotEqual);
    impl_token!(less_than, LessThan);
    impl_token!(less_than_equal, LessThanEqual);
    impl_token!(greater_than, GreaterThan);
    impl_token!(greater_than_equal, GreaterThanEqual);

    impl_token!(left_paren, LeftParen);
    impl_token!(right_paren, RightParen);
    impl_token!(left_brace, LeftBrace);
    impl_token!(right_brace, RightBrace);
    impl_token!(comma, Comma);
    impl_token!(colon, Colon);
    impl_token!(semi_colon, SemiColon);

    impl_token!(eof, EOF);

    pub fn is_eof(&self) -> bool {
        self.token_type == TokenType::EOF
    }

    /// Bare identifier with exactly this text, used for `from`, `to` and `through`.
    pub fn is_word(&self, word: &str) -> bool {
        self.token_type == TokenType::Identifier && self.value == word
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.token_type {
            TokenType::Variable => write!(f, "${}", self.value),
            TokenType::AtKeyword => write!(f, "@{}", self.value),
            TokenType::StringConst => write!(f, "\"{}\"", self.value),
            TokenType::EOF => write!(f, "end of input"),
            _ => write!(f, "{}", self.value),
        }
    }
}
