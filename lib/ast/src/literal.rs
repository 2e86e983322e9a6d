use std::any::Any;

use runtime::{Environment, RuntimeResult, Value, DEFAULT_PRECISION};
use span_util::Span;

use crate::{Node, Options};

#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub value: Value,
    pub span: Span,
}

impl Literal {
    pub fn new(value: Value, span: Span) -> Literal {
        Literal { value, span }
    }
}

impl Node for Literal {
    fn perform(&self, _env: &Environment) -> RuntimeResult {
        Ok(self.value.clone())
    }

    fn to_sass(&self, opts: &Options) -> String {
        match &self.value {
            Value::Number(n) => opts.format_number(n),
            v => v.inspect(opts.precision),
        }
    }

    fn deep_copy(&self) -> Box<dyn Node> {
        Box::new(self.clone())
    }

    fn inspect(&self) -> String {
        self.value.inspect(DEFAULT_PRECISION)
    }

    fn children(&self) -> Vec<&dyn Node> {
        vec![]
    }

    fn span(&self) -> Span {
        self.span
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
