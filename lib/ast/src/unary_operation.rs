use std::any::Any;

use runtime::{Environment, RuntimeResult};
use span_util::Span;

use crate::{Node, Operation, Options};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Minus,
    Plus,
    Not,
}

impl UnaryOperator {
    pub fn name(&self) -> &'static str {
        match self {
            UnaryOperator::Minus => "minus",
            UnaryOperator::Plus => "plus",
            UnaryOperator::Not => "not",
        }
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOperator::Minus => write!(f, "-"),
            UnaryOperator::Plus => write!(f, "+"),
            UnaryOperator::Not => write!(f, "not "),
        }
    }
}

#[derive(Debug)]
pub struct UnaryOperation {
    pub operator: UnaryOperator,
    pub operand: Box<dyn Node>,
    pub span: Span,
}

impl UnaryOperation {
    pub fn new(operator: UnaryOperator, operand: Box<dyn Node>, span: Span) -> UnaryOperation {
        UnaryOperation {
            operator,
            operand,
            span,
        }
    }
}

impl Node for UnaryOperation {
    fn perform(&self, env: &Environment) -> RuntimeResult {
        let value = self.operand.perform(env)?;
        let res = match self.operator {
            UnaryOperator::Minus => value.unary_minus(),
            UnaryOperator::Plus => value.unary_plus(),
            UnaryOperator::Not => value.unary_not(),
        };
        res.map_err(|e| e.at(self.span))
    }

    fn to_sass(&self, opts: &Options) -> String {
        let operand = self.operand.to_sass(opts);
        if self.operand.as_any().is::<Operation>() {
            format!("{}({})", self.operator, operand)
        } else {
            format!("{}{}", self.operator, operand)
        }
    }

    fn deep_copy(&self) -> Box<dyn Node> {
        Box::new(UnaryOperation::new(
            self.operator,
            self.operand.deep_copy(),
            self.span,
        ))
    }

    fn inspect(&self) -> String {
        format!("({} {})", self.operator.name(), self.operand.inspect())
    }

    fn children(&self) -> Vec<&dyn Node> {
        vec![self.operand.as_ref()]
    }

    fn span(&self) -> Span {
        self.span
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use runtime::{Environment, Value};

    use crate::test_utils::*;
    use crate::{BinaryOperator, Node, Options, UnaryOperator};

    #[test]
    fn perform() {
        let env = Environment::new();
        assert_eq!(
            unary(UnaryOperator::Minus, px(4.0)).perform(&env),
            Ok(Value::number_with_unit(-4.0, "px"))
        );
        assert_eq!(
            unary(UnaryOperator::Not, null()).perform(&env),
            Ok(Value::Bool(true))
        );
        assert_eq!(
            unary(UnaryOperator::Not, number(0.0)).perform(&env),
            Ok(Value::Bool(false))
        );
    }

    #[test]
    fn to_sass() {
        let opts = Options::default();
        assert_eq!(unary(UnaryOperator::Not, var("a")).to_sass(&opts), "not $a");
        assert_eq!(
            unary(
                UnaryOperator::Minus,
                op(var("a"), BinaryOperator::Plus, number(1.0))
            )
            .to_sass(&opts),
            "-($a + 1)"
        );
    }
}
