use ariadne::{Label, Report, ReportKind};
use ast::ArgumentError;
use span_util::Span;
use thiserror::Error;

use crate::scanner::Token;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParserError {
    #[error("{0}, found {1}")]
    ExpectedToken(String, Token),
    #[error("Unexpected token: {0}")]
    UnexpectedToken(Token),
    #[error("Expected expression, found {0}")]
    ExpectedExpression(Token),
    #[error("Invalid number: {0}")]
    InvalidNumber(String, Span),
    #[error("Unknown at-rule: @{0}")]
    UnknownAtRule(String, Span),
    #[error("Positional arguments must come before keyword arguments.")]
    PositionalAfterKeyword(Span),
    #[error("Duplicate argument ${0}.")]
    DuplicateArgument(String, Span),
    #[error("{0}")]
    Argument(ArgumentError, Span),
}

impl ParserError {
    pub fn span(&self) -> Span {
        match self {
            ParserError::ExpectedToken(_, tok)
            | ParserError::ExpectedExpression(tok)
            | ParserError::UnexpectedToken(tok) => tok.span,
            ParserError::InvalidNumber(_, span)
            | ParserError::UnknownAtRule(_, span)
            | ParserError::PositionalAfterKeyword(span)
            | ParserError::DuplicateArgument(_, span)
            | ParserError::Argument(_, span) => *span,
        }
    }

    pub fn into_report(&self) -> Report {
        let msg = self.to_string();
        let span = self.span();
        let label = Label::new(span.to_range());
        Report::build(ReportKind::Error, (), span.start)
            .with_message("Parser Error")
            .with_label(label.with_message(msg))
            .finish()
    }
}

#[cfg(test)]
mod test {
    use ast::ArgumentError;
    use pretty_assertions::assert_eq;
    use span_util::Span;

    use super::ParserError;
    use crate::scanner::Token;

    #[test]
    fn messages() {
        assert_eq!(
            ParserError::Argument(ArgumentError::InvalidArgument("else".into()), Span::fake())
                .to_string(),
            "The $else is not allowed as an argument to if"
        );
        assert_eq!(
            ParserError::ExpectedToken("Expected ';' after expression".into(), Token::eof(4..4))
                .to_string(),
            "Expected ';' after expression, found end of input"
        );
    }

    #[test]
    fn span_of_token_errors() {
        let err = ParserError::UnexpectedToken(Token::comma(3..4));
        assert_eq!(err.span().to_range(), 3..4);
    }
}
