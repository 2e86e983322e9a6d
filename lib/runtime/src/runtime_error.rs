use ariadne::{Label, Report, ReportKind};
use span_util::Span;
use thiserror::Error;

pub type RuntimeResult = Result<crate::Value, RuntimeError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("Undefined variable: \"${0}\".")]
    UndefinedVariable(String, Span),
    #[error("Undefined operation: \"{0}\".")]
    UndefinedOperation(String, Span),
    #[error("Incompatible units: '{1}' and '{0}'.")]
    IncompatibleUnits(String, String, Span),
    #[error("Function {0} doesn't have an argument named ${1}.")]
    UnknownKeyword(String, String, Span),
    #[error("Function {0} got multiple values for argument ${1}.")]
    DuplicateArgument(String, String, Span),
    #[error("Only {1} argument(s) allowed, but {2} were passed to {0}.")]
    TooManyArguments(String, usize, usize, Span),
    #[error("Missing argument ${1} for {0}.")]
    MissingArgument(String, String, Span),
    #[error("{0}")]
    TypeMismatch(String, Span),
    #[error("Plain CSS function {0} doesn't support keyword arguments.")]
    PlainFunctionKeywords(String, Span),
}

impl RuntimeError {
    pub fn span(&self) -> Span {
        match self {
            Self::UndefinedVariable(_, span)
            | Self::UndefinedOperation(_, span)
            | Self::IncompatibleUnits(_, _, span)
            | Self::UnknownKeyword(_, _, span)
            | Self::DuplicateArgument(_, _, span)
            | Self::TooManyArguments(_, _, _, span)
            | Self::MissingArgument(_, _, span)
            | Self::TypeMismatch(_, span)
            | Self::PlainFunctionKeywords(_, span) => *span,
        }
    }

    /// Attaches `span` unless the error already points somewhere more precise.
    ///
    /// Value operations don't know where they were written, so they raise with
    /// a fake span and the node performing them fills it in.
    pub fn at(mut self, span: Span) -> RuntimeError {
        if !self.span().is_fake() {
            return self;
        }

        match &mut self {
            Self::UndefinedVariable(_, s)
            | Self::UndefinedOperation(_, s)
            | Self::IncompatibleUnits(_, _, s)
            | Self::UnknownKeyword(_, _, s)
            | Self::DuplicateArgument(_, _, s)
            | Self::TooManyArguments(_, _, _, s)
            | Self::MissingArgument(_, _, s)
            | Self::TypeMismatch(_, s)
            | Self::PlainFunctionKeywords(_, s) => *s = span,
        }
        self
    }

    pub fn into_report(&self) -> Report {
        let msg = self.to_string();
        let label = Label::new(self.span().to_range());
        Report::build(ReportKind::Error, (), self.span().start)
            .with_message("Runtime Error")
            .with_label(label.with_message(msg))
            .finish()
    }
}
