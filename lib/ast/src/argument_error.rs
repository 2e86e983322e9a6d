use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("The ${0} is not allowed as an argument to if")]
    InvalidArgument(String),
    #[error("Missing argument ${0}.")]
    MissingArgument(String),
    #[error("Only 3 arguments allowed, but {0} were passed.")]
    TooManyArguments(usize),
}
